//! Angular Analyzer
//!
//! Static analysis of Angular-style annotations in host code and of the
//! templates that use them.

#![deny(clippy::all)]

pub mod builder;
pub mod config;
pub mod diagnostics;
pub mod element;
pub mod lookup;
pub mod property;
pub mod selector;
pub mod template;

pub use builder::{is_module, ElementModelBuilder};
pub use config::AnalyzerOptions;
pub use diagnostics::{AngularCode, Diagnostic, Diagnostics};
pub use element::*;
pub use lookup::{ElementLookup, LookupMatch};
pub use selector::{parse_selector, try_parse_selector, Selector, SelectorError};

use host::{CompilationUnit, TypeTable};
use rayon::prelude::*;

/// Element model and diagnostics of one compilation unit.
#[derive(Debug, Clone)]
pub struct UnitAnalysis {
    pub model: UnitModel,
    pub diagnostics: Diagnostics,
}

pub fn analyze_unit(
    unit: &CompilationUnit,
    types: &TypeTable,
    options: &AnalyzerOptions,
) -> UnitAnalysis {
    let mut diagnostics = Diagnostics::new();
    let model = ElementModelBuilder::new(types, options, &mut diagnostics).build(unit);
    UnitAnalysis { model, diagnostics }
}

/// Builds the element models of resolved units in parallel. Results are in
/// the order of `units`.
pub fn analyze_units(
    units: &[CompilationUnit],
    types: &TypeTable,
    options: &AnalyzerOptions,
) -> Vec<UnitAnalysis> {
    units
        .par_iter()
        .map(|unit| analyze_unit(unit, types, options))
        .collect()
}
