//! Property bindings of components and directives.
//!
//! Bindings come from two places: property annotations on fields and setters,
//! and the `map` argument of the class annotation, whose values are binding
//! spec strings such as `'<=>field'`.

mod collector;
mod mapping;
mod spec;

pub use collector::PropertyCollector;
pub use mapping::PropertyMapping;
pub use spec::{parse_binding_spec, BindingSpec, BindingSpecError, BINDING_MARKERS};

#[cfg(test)]
mod test;
