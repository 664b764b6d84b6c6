//! Diagnostics reported while building element models and resolving templates.
//!
//! Every defect in user code is recorded here; none of them is raised as a
//! Rust error across component boundaries.

mod diagnostic;
mod error_code;

pub use diagnostic::{Diagnostic, Diagnostics};
pub use error_code::AngularCode;

#[cfg(test)]
mod test;
