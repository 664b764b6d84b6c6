//! Resolved type information produced by the host resolver.
//!
//! Classes and variables live in a [`TypeTable`] arena and are addressed by
//! index. Supertype links are plain ids, so self-referential or mutually
//! referential hierarchies can be represented; every walk over them tracks the
//! visited classes.

use bitflags::bitflags;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ClassId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct VariableId(pub usize);

/// Name of the root iterable class; element types are inferred for anything
/// whose supertype chain reaches it.
pub const ITERABLE_CLASS_NAME: &str = "Iterable";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Type {
    Dynamic,
    Interface {
        class: ClassId,
        type_arguments: Vec<Type>,
    },
}

impl Type {
    pub fn interface(class: ClassId) -> Self {
        Type::Interface {
            class,
            type_arguments: Vec::new(),
        }
    }

    pub fn generic(class: ClassId, type_arguments: Vec<Type>) -> Self {
        Type::Interface {
            class,
            type_arguments,
        }
    }

    pub fn class(&self) -> Option<ClassId> {
        match self {
            Type::Interface { class, .. } => Some(*class),
            Type::Dynamic => None,
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, Type::Dynamic)
    }
}

bitflags! {
    /// Declaration modifiers of a class member.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const STATIC = 0b001;
        const FINAL = 0b010;
        const CONST = 0b100;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MemberKind {
    Field,
    Getter,
    Setter,
    Method,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberElement {
    pub name: String,
    pub name_offset: usize,
    pub kind: MemberKind,
    pub modifiers: Modifiers,
    /// Field type, getter/setter value type, or method return type.
    pub ty: Type,
}

impl MemberElement {
    pub fn new(name: impl Into<String>, name_offset: usize, kind: MemberKind) -> Self {
        MemberElement {
            name: name.into(),
            name_offset,
            kind,
            modifiers: Modifiers::empty(),
            ty: Type::Dynamic,
        }
    }

    /// Whether a template binding may write to this member.
    pub fn is_settable(&self) -> bool {
        match self.kind {
            MemberKind::Setter => true,
            MemberKind::Field => !self
                .modifiers
                .intersects(Modifiers::FINAL | Modifiers::CONST),
            MemberKind::Getter | MemberKind::Method => false,
        }
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.contains(Modifiers::STATIC)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassElement {
    pub id: ClassId,
    pub name: String,
    pub name_offset: Option<usize>,
    pub supertype: Option<Type>,
    pub members: Vec<MemberElement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableElement {
    pub id: VariableId,
    pub name: String,
    pub name_offset: usize,
    pub ty: Type,
}

/// Arena of every class and variable element known to one analysis run.
#[derive(Debug, Clone, Default)]
pub struct TypeTable {
    classes: Vec<ClassElement>,
    variables: Vec<VariableElement>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_class(&mut self, name: impl Into<String>, name_offset: Option<usize>) -> ClassId {
        let id = ClassId(self.classes.len());
        self.classes.push(ClassElement {
            id,
            name: name.into(),
            name_offset,
            supertype: None,
            members: Vec::new(),
        });
        id
    }

    pub fn class(&self, id: ClassId) -> Option<&ClassElement> {
        self.classes.get(id.0)
    }

    pub fn class_mut(&mut self, id: ClassId) -> Option<&mut ClassElement> {
        self.classes.get_mut(id.0)
    }

    pub fn classes(&self) -> impl Iterator<Item = &ClassElement> {
        self.classes.iter()
    }

    /// First class declared with `name`.
    pub fn class_by_name(&self, name: &str) -> Option<ClassId> {
        self.classes.iter().find(|c| c.name == name).map(|c| c.id)
    }

    pub fn set_supertype(&mut self, id: ClassId, supertype: Type) {
        if let Some(class) = self.class_mut(id) {
            class.supertype = Some(supertype);
        }
    }

    pub fn add_member(&mut self, id: ClassId, member: MemberElement) {
        if let Some(class) = self.class_mut(id) {
            class.members.push(member);
        }
    }

    /// The direct superclass of `id`, if it has one that is an interface type.
    pub fn superclass(&self, id: ClassId) -> Option<ClassId> {
        self.class(id)?.supertype.as_ref()?.class()
    }

    /// Finds `name` on `class` or the nearest supertype declaring it.
    pub fn lookup_member(&self, class: ClassId, name: &str) -> Option<(ClassId, &MemberElement)> {
        let mut visited = HashSet::new();
        let mut current = Some(class);
        while let Some(id) = current {
            if !visited.insert(id) {
                return None;
            }
            let element = self.class(id)?;
            if let Some(member) = element.members.iter().find(|m| m.name == name) {
                return Some((id, member));
            }
            current = self.superclass(id);
        }
        None
    }

    /// Like [`TypeTable::lookup_member`] but only accepts members a binding can write.
    pub fn lookup_settable(&self, class: ClassId, name: &str) -> Option<(ClassId, &MemberElement)> {
        let mut visited = HashSet::new();
        let mut current = Some(class);
        while let Some(id) = current {
            if !visited.insert(id) {
                return None;
            }
            let element = self.class(id)?;
            if let Some(member) = element
                .members
                .iter()
                .find(|m| m.name == name && m.is_settable())
            {
                return Some((id, member));
            }
            current = self.superclass(id);
        }
        None
    }

    /// Element type of an iterable `ty`: its first type argument, or `dynamic`
    /// for a raw iterable. `None` when `ty` is not iterable at all.
    pub fn iterable_element_type(&self, ty: &Type) -> Option<Type> {
        let Type::Interface {
            class,
            type_arguments,
        } = ty
        else {
            return Some(Type::Dynamic);
        };
        let mut visited = HashSet::new();
        let mut current = Some(*class);
        while let Some(id) = current {
            if !visited.insert(id) {
                return None;
            }
            if self.class(id)?.name == ITERABLE_CLASS_NAME {
                return Some(type_arguments.first().cloned().unwrap_or(Type::Dynamic));
            }
            current = self.superclass(id);
        }
        None
    }

    pub fn new_variable(&mut self, name: impl Into<String>, name_offset: usize) -> VariableId {
        let id = VariableId(self.variables.len());
        self.variables.push(VariableElement {
            id,
            name: name.into(),
            name_offset,
            ty: Type::Dynamic,
        });
        id
    }

    pub fn variable(&self, id: VariableId) -> Option<&VariableElement> {
        self.variables.get(id.0)
    }

    pub fn set_variable_type(&mut self, id: VariableId, ty: Type) {
        if let Some(variable) = self.variables.get_mut(id.0) {
            variable.ty = ty;
        }
    }

    /// Source-like rendering of a type, e.g. `List<String>`.
    pub fn display_type(&self, ty: &Type) -> String {
        match ty {
            Type::Dynamic => "dynamic".to_string(),
            Type::Interface {
                class,
                type_arguments,
            } => {
                let name = self
                    .class(*class)
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| "?".to_string());
                if type_arguments.is_empty() {
                    name
                } else {
                    let args: Vec<String> =
                        type_arguments.iter().map(|t| self.display_type(t)).collect();
                    format!("{}<{}>", name, args.join(", "))
                }
            }
        }
    }
}
