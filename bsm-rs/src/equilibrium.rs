//! The transcendental balance equation
//!
//! ```text
//! T · ln(1 + e/π) = 1 + e^(−πT) + ε
//! ```
//!
//! is solved for its unique root `T_eq` by the secant method seeded at
//! `T₀ = 1`.  The solve runs with guard digits and the root is rounded to the
//! working precision afterwards; the residual is then re-evaluated at working
//! precision with the cached constants, which is the figure the report and
//! the validation checks use.

use crate::constants::Constant;
use crate::decimal::Decimal;
use crate::diag::Diagnostic;
use crate::quantity::Quantity;
use crate::solver::secant;
use crate::stage::{Stage, StageOutput};
use crate::Pipeline;
use log::debug;

/// Extra digits the root finder works with.
const SOLVER_GUARD_DIGITS: u32 = 10;

/// Left minus right side of the balance equation at `t`.
#[must_use]
pub fn balance(t: &Decimal, log_term: &Decimal, pi: &Decimal, epsilon: &Decimal) -> Decimal {
    let one = Decimal::one(t.precision());
    let decay = (-(pi * t)).exp();
    &(&(t * log_term) - &one) - &(&decay + epsilon)
}

/// ln(1 + e/π)
fn log_term(e: &Decimal, pi: &Decimal) -> Result<Decimal, Diagnostic> {
    let one = Decimal::one(e.precision());
    (&one + &(e / pi))
        .ln()
        .ok_or(Diagnostic::MathDomain(Stage::Equilibrium, "ln(1 + e/pi)"))
}

pub(crate) fn evaluate(pipeline: &mut Pipeline) -> Result<StageOutput, Diagnostic> {
    let precision = pipeline.precision();
    let pi = pipeline.get_or_compute(Quantity::Pi)?;
    let epsilon = pipeline.constant(Constant::QuantumCorrection)?;

    let working = precision + SOLVER_GUARD_DIGITS;
    let pi_w = Decimal::pi(working);
    let e_w = Decimal::e(working);
    let log_term_w = log_term(&e_w, &pi_w)?;
    let epsilon_w = epsilon.with_precision(working);
    let seed = Constant::EquilibriumSeed.value(working)?;

    let root = secant(
        |t| balance(t, &log_term_w, &pi_w, &epsilon_w),
        &seed,
        pipeline.options().max_iterations,
    )
    .map_err(|failure| {
        Diagnostic::Convergence(Stage::Equilibrium, failure.iterations, failure.residual)
    })?;
    debug!("equilibrium root after {} secant steps", root.iterations);

    let t_eq = root.value.with_precision(precision);
    let log_term = log_term_w.with_precision(precision);
    let residual = balance(&t_eq, &log_term, &pi, &epsilon).abs();
    Ok(vec![
        (Quantity::Epsilon, epsilon),
        (Quantity::LogTerm, log_term),
        (Quantity::TEq, t_eq),
        (Quantity::TEqResidual, residual),
        (
            Quantity::TEqIterations,
            Decimal::from_u64(u64::from(root.iterations), precision),
        ),
    ])
}
