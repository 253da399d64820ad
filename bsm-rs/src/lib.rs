//! A library evaluating the Base Substrate Motion formulas at arbitrary
//! decimal precision.  The entry point for all API operations is the
//! [`Pipeline`] in the `pipeline` module, which also discusses how values are
//! resolved and cached.
#![warn(missing_docs)]

pub use dashu_int;

mod util;

pub mod constants;
pub mod coupling;
pub mod decimal;
pub mod diag;
pub mod equilibrium;
pub mod gravity;
pub mod pipeline;
pub mod qcd;
pub mod quantity;
pub mod report;
pub mod solver;
pub mod stage;
pub mod validation;
pub mod zdc;

#[cfg(test)]
mod pipeline_tests;
#[cfg(test)]
mod stage_tests;
#[cfg(test)]
mod validation_tests;

pub use decimal::Decimal;
pub use diag::Diagnostic;
pub use pipeline::{Pipeline, PipelineOptions, ResultCache};
pub use quantity::Quantity;
pub use stage::Stage;
