//! Name and type resolution over the host AST.
//!
//! The resolver fills in `static_element` and `static_type` in place. It can
//! resolve a whole compilation unit, or an arbitrary statement or expression
//! that is attached nowhere, against the scopes currently open.

use crate::ast::*;
use crate::types::{ClassId, MemberElement, MemberKind, Type, TypeTable, VariableId};
use indexmap::IndexMap;

const BOOL_CLASS_NAME: &str = "bool";

pub struct Resolver<'t> {
    types: &'t mut TypeTable,
    scopes: Vec<IndexMap<String, VariableId>>,
    this_class: Option<ClassId>,
}

impl<'t> Resolver<'t> {
    pub fn new(types: &'t mut TypeTable) -> Self {
        Resolver {
            types,
            scopes: vec![IndexMap::new()],
            this_class: None,
        }
    }

    pub fn types(&self) -> &TypeTable {
        &*self.types
    }

    pub fn types_mut(&mut self) -> &mut TypeTable {
        &mut *self.types
    }

    /// Resolves members and bodies as if they were written inside `class`.
    pub fn set_enclosing_class(&mut self, class: Option<ClassId>) {
        self.this_class = class;
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(IndexMap::new());
    }

    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Creates a variable element for a declared identifier without making it visible.
    pub fn declare_local(&mut self, identifier: &mut Identifier) -> VariableId {
        let id = self
            .types
            .new_variable(identifier.name.clone(), identifier.span.offset);
        identifier.static_element = Some(ElementRef::Variable(id));
        id
    }

    /// Makes `variable` visible to later resolution in the innermost scope.
    pub fn define(&mut self, variable: VariableId) {
        let Some(name) = self.types.variable(variable).map(|v| v.name.clone()) else {
            return;
        };
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name, variable);
        }
    }

    pub fn lookup_variable(&self, name: &str) -> Option<VariableId> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name).copied())
    }

    pub fn type_of(&self, type_name: &TypeName) -> Type {
        match self.types.class_by_name(&type_name.name.name) {
            Some(class) => Type::generic(
                class,
                type_name
                    .type_arguments
                    .iter()
                    .map(|argument| self.type_of(argument))
                    .collect(),
            ),
            None => Type::Dynamic,
        }
    }

    pub fn resolve_unit(&mut self, unit: &mut CompilationUnit) {
        for declaration in &mut unit.declarations {
            if let Declaration::Class(class) = declaration {
                let id = self
                    .types
                    .add_class(class.name.name.clone(), Some(class.name.span.offset));
                class.element = Some(id);
                class.name.static_element = Some(ElementRef::Class(id));
            }
        }
        for declaration in &mut unit.declarations {
            if let Declaration::Class(class) = declaration {
                self.resolve_class_header(class);
            }
        }
        for declaration in &mut unit.declarations {
            match declaration {
                Declaration::Class(class) => self.resolve_class_bodies(class),
                Declaration::Function(function) => {
                    self.this_class = None;
                    self.resolve_block(&mut function.body);
                }
                Declaration::Variables(list) => {
                    self.this_class = None;
                    self.resolve_variables(list);
                }
            }
        }
        self.this_class = None;
    }

    fn resolve_class_header(&mut self, class: &mut ClassDeclaration) {
        let Some(id) = class.element else {
            return;
        };
        if let Some(superclass) = &mut class.superclass {
            let supertype = self.type_of(superclass);
            superclass.name.static_element = supertype.class().map(ElementRef::Class);
            if !supertype.is_dynamic() {
                self.types.set_supertype(id, supertype);
            }
        }
        for member in &mut class.members {
            match member {
                ClassMember::Field(field) => {
                    let ty = field
                        .fields
                        .type_name
                        .as_ref()
                        .map(|t| self.type_of(t))
                        .unwrap_or(Type::Dynamic);
                    for variable in &mut field.fields.variables {
                        let mut element =
                            MemberElement::new(variable.name.name.clone(), variable.name.span.offset, MemberKind::Field);
                        element.modifiers = field.fields.modifiers;
                        element.ty = ty.clone();
                        variable.name.static_element = Some(self.add_member(id, element));
                        variable.name.static_type = Some(ty.clone());
                    }
                }
                ClassMember::Method(method) => {
                    let ty = match method.kind {
                        MemberKind::Setter => method
                            .parameters
                            .first()
                            .and_then(|p| p.type_name.as_ref())
                            .map(|t| self.type_of(t)),
                        _ => method.return_type.as_ref().map(|t| self.type_of(t)),
                    }
                    .unwrap_or(Type::Dynamic);
                    let mut element =
                        MemberElement::new(method.name.name.clone(), method.name.span.offset, method.kind);
                    element.modifiers = method.modifiers;
                    element.ty = ty;
                    method.name.static_element = Some(self.add_member(id, element));
                }
                ClassMember::Constructor(_) => {}
            }
        }
    }

    fn add_member(&mut self, class: ClassId, member: MemberElement) -> ElementRef {
        let index = self.types.class(class).map_or(0, |c| c.members.len());
        self.types.add_member(class, member);
        ElementRef::Member(class, index)
    }

    fn resolve_class_bodies(&mut self, class: &mut ClassDeclaration) {
        self.this_class = class.element;
        for member in &mut class.members {
            match member {
                ClassMember::Constructor(constructor) => self.resolve_block(&mut constructor.body),
                ClassMember::Method(method) => {
                    self.push_scope();
                    for parameter in &mut method.parameters {
                        let ty = parameter
                            .type_name
                            .as_ref()
                            .map(|t| self.type_of(t))
                            .unwrap_or(Type::Dynamic);
                        let id = self.declare_local(&mut parameter.name);
                        self.types.set_variable_type(id, ty.clone());
                        parameter.name.static_type = Some(ty);
                        self.define(id);
                    }
                    self.resolve_block(&mut method.body);
                    self.pop_scope();
                }
                ClassMember::Field(field) => {
                    for variable in &mut field.fields.variables {
                        if let Some(initializer) = &mut variable.initializer {
                            self.resolve_expression(initializer);
                        }
                    }
                }
            }
        }
        self.this_class = None;
    }

    pub fn resolve_block(&mut self, block: &mut Block) {
        self.push_scope();
        for statement in &mut block.statements {
            self.resolve_statement(statement);
        }
        self.pop_scope();
    }

    pub fn resolve_statement(&mut self, statement: &mut Statement) {
        match statement {
            Statement::Expression(expression) => self.resolve_expression(expression),
            Statement::Variables(list) => self.resolve_variables(list),
            Statement::Block(block) => self.resolve_block(block),
            Statement::ForEach(for_each) => self.resolve_for_each(for_each),
        }
    }

    fn resolve_variables(&mut self, list: &mut VariableDeclarationList) {
        let declared = list.type_name.as_ref().map(|t| self.type_of(t));
        for variable in &mut list.variables {
            if let Some(initializer) = &mut variable.initializer {
                self.resolve_expression(initializer);
            }
            let ty = declared.clone().unwrap_or_else(|| {
                variable
                    .initializer
                    .as_ref()
                    .map(Expression::best_type)
                    .unwrap_or(Type::Dynamic)
            });
            let id = match variable.name.variable() {
                Some(id) => id,
                None => self.declare_local(&mut variable.name),
            };
            self.types.set_variable_type(id, ty.clone());
            variable.name.static_type = Some(ty);
            self.define(id);
        }
    }

    fn resolve_for_each(&mut self, for_each: &mut ForEachStatement) {
        self.resolve_expression(&mut for_each.iterable);
        let element_type = match &for_each.loop_variable.type_name {
            Some(type_name) => self.type_of(type_name),
            None => self
                .types
                .iterable_element_type(&for_each.iterable.best_type())
                .unwrap_or(Type::Dynamic),
        };
        self.push_scope();
        let identifier = &mut for_each.loop_variable.identifier;
        let id = match identifier.variable() {
            Some(id) => id,
            None => self.declare_local(identifier),
        };
        self.types.set_variable_type(id, element_type.clone());
        identifier.static_type = Some(element_type);
        self.define(id);
        self.resolve_block(&mut for_each.body);
        self.pop_scope();
    }

    pub fn resolve_expression(&mut self, expression: &mut Expression) {
        match expression {
            Expression::Identifier(identifier) => self.resolve_identifier(identifier),
            Expression::StringLiteral(_)
            | Expression::IntegerLiteral(_)
            | Expression::BooleanLiteral(..)
            | Expression::NullLiteral(_) => {}
            Expression::MapLiteral(map) => {
                for entry in &mut map.entries {
                    self.resolve_expression(&mut entry.key);
                    self.resolve_expression(&mut entry.value);
                }
            }
            Expression::Named(named) => self.resolve_expression(&mut named.expression),
            Expression::InstanceCreation(creation) => {
                let ty = self.type_of(&creation.type_name);
                creation.type_name.name.static_element = ty.class().map(ElementRef::Class);
                creation.static_type = Some(ty);
                self.resolve_arguments(&mut creation.arguments);
            }
            Expression::MethodInvocation(invocation) => {
                let receiver = match &mut invocation.target {
                    Some(target) => {
                        self.resolve_expression(target);
                        target.best_type().class()
                    }
                    None => self.this_class,
                };
                self.resolve_invocation(invocation, receiver);
            }
            Expression::PropertyAccess(access) => {
                self.resolve_expression(&mut access.target);
                if let Some(class) = access.target.best_type().class() {
                    self.resolve_member_name(&mut access.property, class);
                }
            }
            Expression::Cascade(cascade) => {
                self.resolve_expression(&mut cascade.target);
                let receiver = cascade.target.best_type().class();
                for section in &mut cascade.sections {
                    self.resolve_invocation(section, receiver);
                }
            }
            Expression::Binary(binary) => {
                self.resolve_expression(&mut binary.left);
                self.resolve_expression(&mut binary.right);
                binary.static_type = match binary.operator.as_str() {
                    "==" | "!=" | "<" | ">" | "<=" | ">=" | "&&" | "||" => {
                        self.types.class_by_name(BOOL_CLASS_NAME).map(Type::interface)
                    }
                    _ => binary.left.static_type().cloned(),
                };
            }
        }
    }

    fn resolve_arguments(&mut self, arguments: &mut ArgumentList) {
        for argument in &mut arguments.arguments {
            self.resolve_expression(argument);
        }
    }

    fn resolve_invocation(&mut self, invocation: &mut MethodInvocation, receiver: Option<ClassId>) {
        if let Some(class) = receiver {
            self.resolve_member_name(&mut invocation.method_name, class);
            invocation.static_type = invocation.method_name.static_type.clone();
        }
        self.resolve_arguments(&mut invocation.arguments);
    }

    fn resolve_member_name(&mut self, name: &mut Identifier, class: ClassId) {
        let Some((owner, member)) = self.types.lookup_member(class, &name.name) else {
            tracing::trace!(name = %name.name, "unresolved member");
            return;
        };
        let index = self
            .types
            .class(owner)
            .and_then(|c| c.members.iter().position(|m| std::ptr::eq(m, member)));
        name.static_type = Some(member.ty.clone());
        name.static_element = index.map(|index| ElementRef::Member(owner, index));
    }

    fn resolve_identifier(&mut self, identifier: &mut Identifier) {
        if identifier.name == "this" {
            identifier.static_type = self.this_class.map(Type::interface);
            return;
        }
        if let Some(id) = self.lookup_variable(&identifier.name) {
            identifier.static_element = Some(ElementRef::Variable(id));
            identifier.static_type = self.types.variable(id).map(|v| v.ty.clone());
            return;
        }
        if let Some(class) = self.this_class {
            if self.types.lookup_member(class, &identifier.name).is_some() {
                self.resolve_member_name(identifier, class);
                return;
            }
        }
        if let Some(class) = self.types.class_by_name(&identifier.name) {
            identifier.static_element = Some(ElementRef::Class(class));
            return;
        }
        tracing::trace!(name = %identifier.name, "unresolved identifier");
    }
}
