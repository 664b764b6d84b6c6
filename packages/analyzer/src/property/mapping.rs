use crate::element::PropertyBinding;
use indexmap::IndexMap;

/// Bindings of one class keyed by public name, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct PropertyMapping {
    entries: IndexMap<String, PropertyBinding>,
}

impl PropertyMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `binding` unless its public name is already bound.
    pub fn insert(&mut self, binding: PropertyBinding) -> bool {
        if self.entries.contains_key(&binding.public_name) {
            tracing::trace!(public_name = %binding.public_name, "public name already bound");
            return false;
        }
        self.entries.insert(binding.public_name.clone(), binding);
        true
    }

    pub fn get(&self, public_name: &str) -> Option<&PropertyBinding> {
        self.entries.get(public_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<PropertyBinding> {
        self.entries.into_values().collect()
    }
}
