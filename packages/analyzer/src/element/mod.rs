//! Toolkit element model
//!
//! Elements are the framework-level facts discovered in host code: components,
//! controllers, directives, filters and modules. A [`UnitModel`] attaches them
//! to the declarations they were found on.

mod model;
mod unit_model;

pub use model::*;
pub use unit_model::{DeclarationEntry, DeclarationKey, UnitModel};
