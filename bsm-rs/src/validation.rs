//! Pass/fail checks of the pipeline's predictions against documented
//! tolerances.
//!
//! A [`ValidationHarness`] collects [`Check`]s and writes a summary; the
//! binary turns a failed harness into exit code 1.  The standard check set
//! run by [`Pipeline::validate_results`] compares every headline prediction
//! with its reference value.
//!
//! [`Pipeline::validate_results`]: crate::Pipeline::validate_results

use crate::constants::Constant;
use crate::decimal::Decimal;
use crate::diag::Diagnostic;
use crate::quantity::Quantity;
use crate::Pipeline;
use std::fmt;
use std::io::{self, Write};

/// A single check with its outcome.
#[derive(Debug, Clone)]
pub struct Check {
    /// Human-readable label
    pub label: String,
    /// Whether this check passed
    pub passed: bool,
    /// Observed value
    pub observed: Decimal,
    /// Expected value; the lower end for [`ToleranceMode::Range`]
    pub expected: Decimal,
    /// Tolerance used; the upper end for [`ToleranceMode::Range`]
    pub tolerance: Decimal,
    /// How the tolerance was applied
    pub mode: ToleranceMode,
}

/// How a tolerance threshold is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToleranceMode {
    /// |observed - expected| < tolerance
    Absolute,
    /// |observed - expected| / |expected| < tolerance
    Relative,
    /// observed < threshold
    UpperBound,
    /// low <= observed <= high
    Range,
}

impl fmt::Display for ToleranceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absolute => write!(f, "abs"),
            Self::Relative => write!(f, "rel"),
            Self::UpperBound => write!(f, "<"),
            Self::Range => write!(f, "range"),
        }
    }
}

/// Tolerances of the standard check set.
#[derive(Debug, Clone)]
pub struct Tolerances {
    /// Absolute tolerance of 𝒢 against its published value.
    pub coupling: Decimal,
    /// Upper bound on the zero-discrepancy relative error.
    pub zdc: Decimal,
    /// Relative tolerance of the predicted G against CODATA.
    pub gravity: Decimal,
}

/// `mantissa × 10^-exponent`
fn scaled(mantissa: i64, exponent: u32, precision: u32) -> Decimal {
    &Decimal::from_i64(mantissa, precision) / &Decimal::from_i64(10, precision).powi(exponent)
}

impl Tolerances {
    /// Default tolerances: 10⁻⁹ for the coupling and the ZDC, and the
    /// 2.2×10⁻⁵ CODATA uncertainty of G.
    #[must_use]
    pub fn new(precision: u32) -> Self {
        Tolerances {
            coupling: scaled(1, 9, precision),
            zdc: scaled(1, 9, precision),
            gravity: scaled(22, 6, precision),
        }
    }
}

/// Accumulates checks and produces a summary.
#[derive(Debug, Default)]
#[must_use]
pub struct ValidationHarness {
    /// Name printed in the summary header
    pub name: String,
    /// All checks performed
    pub checks: Vec<Check>,
}

impl ValidationHarness {
    /// Creates an empty harness.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            checks: Vec::new(),
        }
    }

    fn push(
        &mut self,
        label: &str,
        passed: bool,
        observed: &Decimal,
        expected: &Decimal,
        tolerance: &Decimal,
        mode: ToleranceMode,
    ) {
        self.checks.push(Check {
            label: label.to_owned(),
            passed,
            observed: observed.clone(),
            expected: expected.clone(),
            tolerance: tolerance.clone(),
            mode,
        });
    }

    /// Adds an absolute tolerance check: |observed - expected| < tolerance
    pub fn check_abs(
        &mut self,
        label: &str,
        observed: &Decimal,
        expected: &Decimal,
        tolerance: &Decimal,
    ) {
        let passed = &(observed - expected).abs() < tolerance;
        self.push(label, passed, observed, expected, tolerance, ToleranceMode::Absolute);
    }

    /// Adds a relative tolerance check: |observed - expected| / |expected| <
    /// tolerance.  A zero expected value falls back to |observed| < tolerance.
    pub fn check_rel(
        &mut self,
        label: &str,
        observed: &Decimal,
        expected: &Decimal,
        tolerance: &Decimal,
    ) {
        let passed = if expected.is_zero() {
            &observed.abs() < tolerance
        } else {
            &(&(observed - expected) / expected).abs() < tolerance
        };
        self.push(label, passed, observed, expected, tolerance, ToleranceMode::Relative);
    }

    /// Adds an upper-bound check: observed < threshold
    pub fn check_upper(&mut self, label: &str, observed: &Decimal, threshold: &Decimal) {
        let passed = observed < threshold;
        self.push(label, passed, observed, threshold, threshold, ToleranceMode::UpperBound);
    }

    /// Adds a range check: low <= observed <= high
    pub fn check_range(&mut self, label: &str, observed: &Decimal, low: &Decimal, high: &Decimal) {
        let passed = low <= observed && observed <= high;
        self.push(label, passed, observed, low, high, ToleranceMode::Range);
    }

    /// Number of checks that passed.
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    /// Total number of checks.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.checks.len()
    }

    /// Whether all checks passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    /// Labels of the failed checks, in order.
    pub fn failed(&self) -> impl Iterator<Item = &str> + '_ {
        self.checks
            .iter()
            .filter(|c| !c.passed)
            .map(|c| c.label.as_str())
    }

    /// Writes the summary: a header with the pass count, one line per check
    /// and the overall verdict.
    pub fn write_summary(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(
            out,
            "═══ {} validation: {}/{} checks passed ═══",
            self.name,
            self.passed_count(),
            self.total_count()
        )?;
        for check in &self.checks {
            let icon = if check.passed { "✓" } else { "✗" };
            writeln!(
                out,
                "  {icon} {}: observed={}, expected={}, tol={} ({})",
                check.label,
                check.observed.to_exp_string(6),
                check.expected.to_exp_string(6),
                check.tolerance.to_exp_string(2),
                check.mode
            )?;
        }
        if self.all_passed() {
            writeln!(out, "ALL CHECKS PASSED")
        } else {
            let failed: Vec<&str> = self.failed().collect();
            writeln!(out, "FAILED CHECKS: {}", failed.join(", "))
        }
    }
}

/// Runs the standard check set against a pipeline whose stages have all run.
pub fn standard_checks(
    pipeline: &Pipeline,
    tolerances: &Tolerances,
) -> Result<ValidationHarness, Diagnostic> {
    let precision = pipeline.precision();
    let value = move |quantity: Quantity| {
        pipeline
            .get(quantity)
            .ok_or(Diagnostic::MissingQuantity(quantity))
    };
    let mut harness = ValidationHarness::new(&format!("bsm ({precision} digits)"));

    let residual_bound = scaled(1, precision.saturating_sub(5), precision);
    harness.check_upper(
        "T_eq residual",
        value(Quantity::TEqResidual)?,
        &residual_bound,
    );
    harness.check_abs(
        "G_geom vs published",
        value(Quantity::GGeom)?,
        value(Quantity::GGeomTarget)?,
        &tolerances.coupling,
    );
    harness.check_upper(
        "ZDC relative error",
        value(Quantity::ZdcRelError)?,
        &tolerances.zdc,
    );
    harness.check_rel(
        "G_pred vs CODATA",
        value(Quantity::GPred)?,
        value(Quantity::GCodata)?,
        &tolerances.gravity,
    );
    harness.check_range(
        "Lambda_QCD(1 GeV)",
        value(Quantity::LambdaQcd1GeV)?,
        &pipeline.constant(Constant::LambdaQcdLow)?,
        &pipeline.constant(Constant::LambdaQcdHigh)?,
    );
    harness.check_upper(
        "|Gdot/G| vs LLR bound",
        &value(Quantity::GDotOverG)?.abs(),
        value(Quantity::GDotBound)?,
    );
    Ok(harness)
}
