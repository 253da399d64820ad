//! The Newtonian constant from the substrate mass scale, and the asserted
//! secular drift.
//!
//! ```text
//! M_s    = (ħ/c) · (π/√2) · 1/(𝒢 · T_eq)
//! G_pred = (c³/ħ) · 𝒢² / M_s²
//! ```
//!
//! `Ġ/G = −0.8 × 10⁻¹² yr⁻¹` is a model parameter reported next to the lunar
//! laser ranging bound; it is not computed.

use crate::constants::Constant;
use crate::decimal::Decimal;
use crate::diag::Diagnostic;
use crate::quantity::Quantity;
use crate::stage::{Stage, StageOutput};
use crate::Pipeline;

/// Mass scale `M_s = (ħ/c) · (π/√2) / (𝒢 · T_eq)`.
pub fn substrate_mass(
    hbar: &Decimal,
    c: &Decimal,
    pi: &Decimal,
    sqrt2: &Decimal,
    coupling: &Decimal,
    t_eq: &Decimal,
) -> Result<Decimal, Diagnostic> {
    let product = coupling * t_eq;
    if product.is_zero() {
        return Err(Diagnostic::DegenerateInput(Stage::Gravity, "G*T_eq"));
    }
    Ok(&(&(hbar / c) * &(pi / sqrt2)) / &product)
}

/// `G = (c³/ħ) · 𝒢² / M_s²`
pub fn newton_constant(
    c: &Decimal,
    hbar: &Decimal,
    coupling: &Decimal,
    mass: &Decimal,
) -> Result<Decimal, Diagnostic> {
    if mass.is_zero() {
        return Err(Diagnostic::DegenerateInput(Stage::Gravity, "M_s^2"));
    }
    Ok(&(&c.powi(3) / hbar) * &(&coupling.powi(2) / &mass.powi(2)))
}

pub(crate) fn evaluate(pipeline: &mut Pipeline) -> Result<StageOutput, Diagnostic> {
    let coupling = pipeline.get_or_compute(Quantity::GGeom)?;
    let t_eq = pipeline.get_or_compute(Quantity::TEq)?;
    let pi = pipeline.get_or_compute(Quantity::Pi)?;
    let sqrt2 = pipeline.get_or_compute(Quantity::Sqrt2)?;
    let c = pipeline.constant(Constant::SpeedOfLight)?;
    let hbar = pipeline.constant(Constant::ReducedPlanck)?;
    let reference = pipeline.constant(Constant::Gravitation)?;

    let mass = substrate_mass(&hbar, &c, &pi, &sqrt2, &coupling, &t_eq)?;
    let predicted = newton_constant(&c, &hbar, &coupling, &mass)?;
    let one = Decimal::one(pipeline.precision());
    let rel_error = (&(&predicted / &reference) - &one).abs();

    Ok(vec![
        (Quantity::SubstrateMass, mass),
        (Quantity::GPred, predicted),
        (Quantity::GCodata, reference),
        (Quantity::GRelError, rel_error),
        (Quantity::GDotOverG, pipeline.constant(Constant::SecularDrift)?),
        (
            Quantity::GDotBound,
            pipeline.constant(Constant::SecularDriftBound)?,
        ),
    ])
}
