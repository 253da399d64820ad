//! Geometric coupling `𝒢 = 1 / (e · π · √2 · T_eq)`.

use crate::constants::Constant;
use crate::decimal::Decimal;
use crate::diag::Diagnostic;
use crate::quantity::Quantity;
use crate::stage::{Stage, StageOutput};
use crate::Pipeline;

/// 𝒢 for a given equilibrium root.  Only a root of exactly zero is
/// degenerate; the physical regime is `T_eq` of order one.
pub fn geometric_coupling(
    t_eq: &Decimal,
    e: &Decimal,
    pi: &Decimal,
    sqrt2: &Decimal,
) -> Result<Decimal, Diagnostic> {
    if t_eq.is_zero() {
        return Err(Diagnostic::DegenerateInput(Stage::Coupling, "T_eq"));
    }
    let one = Decimal::one(t_eq.precision());
    Ok(&one / &(&(&(e * pi) * sqrt2) * t_eq))
}

pub(crate) fn evaluate(pipeline: &mut Pipeline) -> Result<StageOutput, Diagnostic> {
    let t_eq = pipeline.get_or_compute(Quantity::TEq)?;
    let e = pipeline.get_or_compute(Quantity::E)?;
    let pi = pipeline.get_or_compute(Quantity::Pi)?;
    let sqrt2 = pipeline.get_or_compute(Quantity::Sqrt2)?;

    let coupling = geometric_coupling(&t_eq, &e, &pi, &sqrt2)?;
    let target = pipeline.constant(Constant::CouplingTarget)?;
    let error = (&coupling - &target).abs();
    Ok(vec![
        (Quantity::GGeom, coupling),
        (Quantity::GGeomTarget, target),
        (Quantity::GGeomError, error),
    ])
}
