//! Element model construction.
//!
//! [`ElementModelBuilder`] walks a resolved compilation unit and records every
//! toolkit element it finds, reporting malformed annotations as it goes.

mod annotation;
mod module;
mod unit_builder;

pub use module::is_module;
pub use unit_builder::ElementModelBuilder;

#[cfg(test)]
mod test;
