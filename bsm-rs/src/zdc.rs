//! The zero-discrepancy comparison: is `α⁻¹ = μ · 𝒢`?
//!
//! The number of matching significant digits is `floor(−log₁₀(δ))` for the
//! relative error `δ`.  A relative error of exactly zero means every digit of
//! the working precision matches; the logarithm is never taken in that case.

use crate::constants::Constant;
use crate::decimal::Decimal;
use crate::diag::Diagnostic;
use crate::quantity::Quantity;
use crate::stage::{Stage, StageOutput};
use crate::Pipeline;

/// How many significant digits of a prediction agree with the reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchingDigits {
    /// The prediction equals the reference at the given working precision.
    All(u32),
    /// `floor(−log₁₀(relative error))`; negative when off by more than 10×.
    Count(i64),
}

impl MatchingDigits {
    /// The digit count as a number: the working precision for [`All`].
    ///
    /// [`All`]: MatchingDigits::All
    #[must_use]
    pub fn digits(self) -> i64 {
        match self {
            MatchingDigits::All(precision) => i64::from(precision),
            MatchingDigits::Count(count) => count,
        }
    }
}

/// Counts matching digits from a relative error.
pub fn matching_digits(rel_error: &Decimal) -> Result<MatchingDigits, Diagnostic> {
    if rel_error.is_zero() {
        return Ok(MatchingDigits::All(rel_error.precision()));
    }
    let log = rel_error
        .log10()
        .ok_or(Diagnostic::MathDomain(Stage::Zdc, "-log10(relative error)"))?;
    let count = i64::try_from((-log).floor())
        .map_err(|_| Diagnostic::MathDomain(Stage::Zdc, "-log10(relative error)"))?;
    Ok(MatchingDigits::Count(count))
}

pub(crate) fn evaluate(pipeline: &mut Pipeline) -> Result<StageOutput, Diagnostic> {
    let coupling = pipeline.get_or_compute(Quantity::GGeom)?;
    let mass_ratio = pipeline.constant(Constant::MassRatio)?;
    let reference = pipeline.constant(Constant::InverseFineStructure)?;

    let predicted = &mass_ratio * &coupling;
    let error = (&predicted - &reference).abs();
    let rel_error = &error / &reference;
    let digits = matching_digits(&rel_error)?;
    Ok(vec![
        (Quantity::MassRatio, mass_ratio),
        (Quantity::AlphaInvPred, predicted),
        (Quantity::AlphaInvCodata, reference),
        (Quantity::ZdcError, error),
        (Quantity::ZdcRelError, rel_error),
        (
            Quantity::ZdcDigits,
            Decimal::from_i64(digits.digits(), pipeline.precision()),
        ),
    ])
}
