//! The QCD confinement scale from the gyroscopic factor.
//!
//! The gyroscopic factor is a product of five terms:
//!
//! | term | value                | origin                          |
//! |------|----------------------|---------------------------------|
//! | 1    | 1/(2√2)              | projection of the spin axis     |
//! | 2    | (e − 1)/(e + 1)      | kinematic refraction            |
//! | 3    | 1/ln(1 + e/π)        | inverse of the balance log term |
//! | 4    | (N_c² − 1)/(2N_c)    | SU(3) Casimir                   |
//! | 5    | γ̄ = 2.14             | fixed mean relativistic factor  |
//!
//! The bare scale `(m_e / α) · C_gyro` is evaluated with the predicted α from
//! the zero-discrepancy stage and converted to MeV, then carried to 1 GeV by
//! the one-loop factor `exp(2π / (b₀ (1/α_s(Λ) − 1/α_s(1 GeV))))`.

use crate::constants::Constant;
use crate::decimal::Decimal;
use crate::diag::Diagnostic;
use crate::quantity::Quantity;
use crate::stage::{Stage, StageOutput};
use crate::Pipeline;

/// The five factors of `C_gyro`, in order.
pub fn gyroscopic_terms(
    e: &Decimal,
    sqrt2: &Decimal,
    log_term: &Decimal,
    colors: &Decimal,
    mean_gamma: &Decimal,
) -> Result<[Decimal; 5], Diagnostic> {
    let precision = e.precision();
    let one = Decimal::one(precision);
    let two = Decimal::from_i64(2, precision);
    if log_term.is_zero() {
        return Err(Diagnostic::DegenerateInput(Stage::Qcd, "C_gyro"));
    }
    Ok([
        &one / &(&two * sqrt2),
        &(e - &one) / &(e + &one),
        &one / log_term,
        &(&(colors * colors) - &one) / &(&two * colors),
        mean_gamma.clone(),
    ])
}

/// One-loop coefficient `b₀ = (11 N_c − 2 n_f) / 3`.
#[must_use]
pub fn beta0(colors: &Decimal, flavors: &Decimal) -> Decimal {
    let precision = colors.precision();
    let eleven = Decimal::from_i64(11, precision);
    let two = Decimal::from_i64(2, precision);
    let three = Decimal::from_i64(3, precision);
    &(&(&eleven * colors) - &(&two * flavors)) / &three
}

pub(crate) fn evaluate(pipeline: &mut Pipeline) -> Result<StageOutput, Diagnostic> {
    let precision = pipeline.precision();
    let e = pipeline.get_or_compute(Quantity::E)?;
    let pi = pipeline.get_or_compute(Quantity::Pi)?;
    let sqrt2 = pipeline.get_or_compute(Quantity::Sqrt2)?;
    let log_term = pipeline.get_or_compute(Quantity::LogTerm)?;
    let alpha_inv = pipeline.get_or_compute(Quantity::AlphaInvPred)?;
    let colors = pipeline.constant(Constant::Colors)?;
    let flavors = pipeline.constant(Constant::Flavors)?;
    let mean_gamma = pipeline.constant(Constant::MeanGamma)?;
    let electron_mass = pipeline.constant(Constant::ElectronMass)?;
    let coupling_confinement = pipeline.constant(Constant::StrongCouplingConfinement)?;
    let coupling_1gev = pipeline.constant(Constant::StrongCoupling1GeV)?;

    let terms = gyroscopic_terms(&e, &sqrt2, &log_term, &colors, &mean_gamma)?;
    let gyro = terms
        .iter()
        .fold(Decimal::one(precision), |acc, term| &acc * term);

    if alpha_inv.is_zero() {
        return Err(Diagnostic::DegenerateInput(Stage::Qcd, "alpha"));
    }
    let one = Decimal::one(precision);
    let alpha = &one / &alpha_inv;
    let mega = Decimal::from_i64(1_000_000, precision);
    let bare = &(&(&electron_mass / &alpha) * &gyro) / &mega;

    let b0 = beta0(&colors, &flavors);
    if coupling_confinement.is_zero() || coupling_1gev.is_zero() {
        return Err(Diagnostic::DegenerateInput(Stage::Qcd, "a_s"));
    }
    let coupling_gap = &(&one / &coupling_confinement) - &(&one / &coupling_1gev);
    let denominator = &b0 * &coupling_gap;
    if denominator.is_zero() {
        return Err(Diagnostic::DegenerateInput(
            Stage::Qcd,
            "b0 * (1/a_s(L) - 1/a_s(1GeV))",
        ));
    }
    let two_pi = &Decimal::from_i64(2, precision) * &pi;
    let evolved = &bare * &(&two_pi / &denominator).exp();

    let [term1, term2, term3, term4, term5] = terms;
    Ok(vec![
        (Quantity::GyroTerm1, term1),
        (Quantity::GyroTerm2, term2),
        (Quantity::GyroTerm3, term3),
        (Quantity::GyroTerm4, term4),
        (Quantity::GyroTerm5, term5),
        (Quantity::CGyro, gyro),
        (Quantity::Beta0, b0),
        (Quantity::LambdaQcdBare, bare),
        (Quantity::LambdaQcd1GeV, evolved),
    ])
}
