use super::model::{ElementKind, ToolkitElement};
use host::{ClassId, VariableId};
use indexmap::IndexMap;
use serde::Serialize;
use smallvec::SmallVec;

/// Host declaration an element is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "id")]
pub enum DeclarationKey {
    Class(ClassId),
    Variable(VariableId),
}

/// Elements discovered in one compilation unit, in discovery order.
///
/// A declaration carries at most one element of each kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnitModel {
    elements: IndexMap<DeclarationKey, SmallVec<[ToolkitElement; 1]>>,
}

#[derive(Debug, Serialize)]
pub struct DeclarationEntry<'m> {
    pub declaration: DeclarationKey,
    pub elements: &'m [ToolkitElement],
}

impl UnitModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches `element` to `key`. Returns false and keeps the existing element
    /// if `key` already has one of the same kind.
    pub fn attach(&mut self, key: DeclarationKey, element: ToolkitElement) -> bool {
        let elements = self.elements.entry(key).or_default();
        if elements.iter().any(|e| e.kind() == element.kind()) {
            tracing::trace!(?key, kind = ?element.kind(), "duplicate element kind ignored");
            return false;
        }
        elements.push(element);
        true
    }

    pub fn elements(&self, key: DeclarationKey) -> &[ToolkitElement] {
        self.elements
            .get(&key)
            .map(|elements| elements.as_slice())
            .unwrap_or(&[])
    }

    pub fn element(&self, key: DeclarationKey, kind: ElementKind) -> Option<&ToolkitElement> {
        self.elements(key).iter().find(|e| e.kind() == kind)
    }

    pub fn class_elements(&self, class: ClassId) -> &[ToolkitElement] {
        self.elements(DeclarationKey::Class(class))
    }

    pub fn variable_elements(&self, variable: VariableId) -> &[ToolkitElement] {
        self.elements(DeclarationKey::Variable(variable))
    }

    pub fn iter(&self) -> impl Iterator<Item = (DeclarationKey, &ToolkitElement)> {
        self.elements
            .iter()
            .flat_map(|(key, elements)| elements.iter().map(move |e| (*key, e)))
    }

    pub fn entries(&self) -> Vec<DeclarationEntry<'_>> {
        self.elements
            .iter()
            .map(|(key, elements)| DeclarationEntry {
                declaration: *key,
                elements: elements.as_slice(),
            })
            .collect()
    }

    /// Number of elements across all declarations.
    pub fn len(&self) -> usize {
        self.elements.values().map(|elements| elements.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.entries())
    }
}
