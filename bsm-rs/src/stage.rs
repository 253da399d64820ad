//! The stage graph.
//!
//! Stages are fixed at compile time; each declares the stages whose outputs
//! it reads.  The pipeline validates the declared graph once, at
//! construction, and evaluates in the resulting topological order.  Reads
//! that happen at run time go through [`Pipeline::get_or_compute`], so a
//! stage used on its own still pulls exactly its upstream stages.
//!
//! [`Pipeline::get_or_compute`]: crate::Pipeline::get_or_compute

use crate::decimal::Decimal;
use crate::diag::Diagnostic;
use crate::quantity::Quantity;
use crate::util::HashSet;
use crate::{coupling, equilibrium, gravity, qcd, zdc, Pipeline};
use std::fmt;
use std::hash::Hash;

/// The values produced by one stage evaluation.
pub(crate) type StageOutput = Vec<(Quantity, Decimal)>;

/// One step of the verification pipeline.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    /// π, e and √2 at working precision.
    Constants,
    /// Root of the transcendental balance equation.
    Equilibrium,
    /// Geometric coupling from the equilibrium root.
    Coupling,
    /// Zero-discrepancy comparison of μ·𝒢 with α⁻¹.
    Zdc,
    /// QCD confinement scale.
    Qcd,
    /// Gravitational constant and secular drift.
    Gravity,
}

impl Stage {
    /// Every stage, in declaration order.
    pub const ALL: &'static [Stage] = &[
        Stage::Constants,
        Stage::Equilibrium,
        Stage::Coupling,
        Stage::Zdc,
        Stage::Qcd,
        Stage::Gravity,
    ];

    /// A short identifier, used in logs and diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Stage::Constants => "constants",
            Stage::Equilibrium => "equilibrium",
            Stage::Coupling => "coupling",
            Stage::Zdc => "zdc",
            Stage::Qcd => "qcd",
            Stage::Gravity => "gravity",
        }
    }

    /// The report section heading.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Stage::Constants => "MATHEMATICAL CONSTANTS",
            Stage::Equilibrium => "TRANSCENDENTAL EQUATION WITH QUANTUM CORRECTION",
            Stage::Coupling => "GEOMETRIC COUPLING 𝒢",
            Stage::Zdc => "ZERO DISCREPANCY CONDITION (ZDC)",
            Stage::Qcd => "QCD CONFINEMENT SCALE",
            Stage::Gravity => "GRAVITATIONAL CONSTANT AND VARIATION",
        }
    }

    /// The formula the stage evaluates, in plain ASCII, for diagnostics.
    #[must_use]
    pub const fn formula(self) -> &'static str {
        match self {
            Stage::Constants => "pi, e, sqrt(2)",
            Stage::Equilibrium => "T * ln(1 + e/pi) = 1 + exp(-pi*T) + eps",
            Stage::Coupling => "G = 1 / (e * pi * sqrt(2) * T_eq)",
            Stage::Zdc => "1/alpha = mu * G",
            Stage::Qcd => {
                "L_QCD = (m_e / alpha) * C_gyro * exp(2*pi / (b0 * (1/a_s(L) - 1/a_s(1GeV))))"
            }
            Stage::Gravity => "M_s = (hbar/c) * (pi/sqrt(2)) / (G*T_eq); G_N = (c^3/hbar) * G^2 / M_s^2",
        }
    }

    /// The stages whose outputs this stage reads.
    #[must_use]
    pub const fn dependencies(self) -> &'static [Stage] {
        match self {
            Stage::Constants => &[],
            Stage::Equilibrium => &[Stage::Constants],
            Stage::Coupling => &[Stage::Constants, Stage::Equilibrium],
            Stage::Zdc => &[Stage::Coupling],
            Stage::Qcd => &[Stage::Constants, Stage::Equilibrium, Stage::Zdc],
            Stage::Gravity => &[Stage::Constants, Stage::Equilibrium, Stage::Coupling],
        }
    }

    /// The quantities this stage writes.
    pub fn outputs(self) -> impl Iterator<Item = Quantity> {
        Quantity::ALL.iter().copied().filter(move |q| q.stage() == self)
    }

    /// Runs the stage's computation against the pipeline's cache.
    pub(crate) fn evaluate(self, pipeline: &mut Pipeline) -> Result<StageOutput, Diagnostic> {
        match self {
            Stage::Constants => constants(pipeline.precision()),
            Stage::Equilibrium => equilibrium::evaluate(pipeline),
            Stage::Coupling => coupling::evaluate(pipeline),
            Stage::Zdc => zdc::evaluate(pipeline),
            Stage::Qcd => qcd::evaluate(pipeline),
            Stage::Gravity => gravity::evaluate(pipeline),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn constants(precision: u32) -> Result<StageOutput, Diagnostic> {
    let sqrt2 = Decimal::from_i64(2, precision)
        .sqrt()
        .ok_or(Diagnostic::MathDomain(Stage::Constants, "sqrt(2)"))?;
    Ok(vec![
        (Quantity::Pi, Decimal::pi(precision)),
        (Quantity::E, Decimal::e(precision)),
        (Quantity::Sqrt2, sqrt2),
    ])
}

/// Orders `nodes` so that every node comes after its dependencies.
///
/// Ties are broken by the order of `nodes`.  On a cycle, returns the nodes
/// along it, starting and ending with the same node.
pub fn topological_order<N, D>(nodes: &[N], dependencies: D) -> Result<Vec<N>, Vec<N>>
where
    N: Copy + Eq + Hash,
    D: Fn(N) -> Vec<N>,
{
    fn visit<N, D>(
        node: N,
        dependencies: &D,
        done: &mut HashSet<N>,
        path: &mut Vec<N>,
        order: &mut Vec<N>,
    ) -> Result<(), Vec<N>>
    where
        N: Copy + Eq + Hash,
        D: Fn(N) -> Vec<N>,
    {
        if done.contains(&node) {
            return Ok(());
        }
        if let Some(start) = path.iter().position(|&n| n == node) {
            let mut cycle = path[start..].to_vec();
            cycle.push(node);
            return Err(cycle);
        }
        path.push(node);
        for dep in dependencies(node) {
            visit(dep, dependencies, done, path, order)?;
        }
        path.pop();
        done.insert(node);
        order.push(node);
        Ok(())
    }

    let mut done = HashSet::default();
    let mut order = Vec::with_capacity(nodes.len());
    for &node in nodes {
        visit(node, &dependencies, &mut done, &mut Vec::new(), &mut order)?;
    }
    Ok(order)
}
