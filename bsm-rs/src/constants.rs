//! The constant table.
//!
//! Reference values are CODATA 2018 unless noted.  Model parameters which are
//! presented as derived elsewhere (the quantum correction ε, the mean factor
//! γ̄ and the secular drift Ġ/G) are fixed literals here; nothing in the
//! pipeline attempts to re-derive them.
//!
//! Literals are kept as strings and parsed at the pipeline's working
//! precision, so a value like `1836.15267343` is exact rather than the
//! nearest binary fraction.

use crate::decimal::Decimal;
use crate::diag::Diagnostic;
use crate::quantity::Unit;

/// A named literal of the constant table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Constant {
    /// Speed of light in vacuum
    SpeedOfLight,
    /// Reduced Planck constant ħ
    ReducedPlanck,
    /// Newtonian constant of gravitation
    Gravitation,
    /// Proton to electron mass ratio μ
    MassRatio,
    /// Inverse fine-structure constant α⁻¹
    InverseFineStructure,
    /// Electron mass
    ElectronMass,
    /// Quantum correction ε of the balance equation
    QuantumCorrection,
    /// Mean relativistic factor γ̄ of the gyroscopic average
    MeanGamma,
    /// Published value of the geometric coupling 𝒢
    CouplingTarget,
    /// SU(3) color count N_c
    Colors,
    /// Active quark flavors n_f in b₀
    Flavors,
    /// Strong coupling at the confinement scale
    StrongCouplingConfinement,
    /// Strong coupling at 1 GeV
    StrongCoupling1GeV,
    /// Lower edge of the experimental Λ_QCD range
    LambdaQcdLow,
    /// Upper edge of the experimental Λ_QCD range
    LambdaQcdHigh,
    /// Asserted secular drift Ġ/G
    SecularDrift,
    /// Lunar laser ranging bound on |Ġ/G|
    SecularDriftBound,
    /// Seed of the equilibrium root finder
    EquilibriumSeed,
}

impl Constant {
    /// Every entry of the table.
    pub const ALL: &'static [Constant] = &[
        Constant::SpeedOfLight,
        Constant::ReducedPlanck,
        Constant::Gravitation,
        Constant::MassRatio,
        Constant::InverseFineStructure,
        Constant::ElectronMass,
        Constant::QuantumCorrection,
        Constant::MeanGamma,
        Constant::CouplingTarget,
        Constant::Colors,
        Constant::Flavors,
        Constant::StrongCouplingConfinement,
        Constant::StrongCoupling1GeV,
        Constant::LambdaQcdLow,
        Constant::LambdaQcdHigh,
        Constant::SecularDrift,
        Constant::SecularDriftBound,
        Constant::EquilibriumSeed,
    ];

    /// The conventional symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Constant::SpeedOfLight => "c",
            Constant::ReducedPlanck => "ħ",
            Constant::Gravitation => "G",
            Constant::MassRatio => "μ",
            Constant::InverseFineStructure => "α⁻¹",
            Constant::ElectronMass => "m_e",
            Constant::QuantumCorrection => "ε_BSM",
            Constant::MeanGamma => "γ̄",
            Constant::CouplingTarget => "𝒢_target",
            Constant::Colors => "N_c",
            Constant::Flavors => "n_f",
            Constant::StrongCouplingConfinement => "α_s(Λ)",
            Constant::StrongCoupling1GeV => "α_s(1 GeV)",
            Constant::LambdaQcdLow => "Λ_QCD,min",
            Constant::LambdaQcdHigh => "Λ_QCD,max",
            Constant::SecularDrift => "Ġ/G",
            Constant::SecularDriftBound => "|Ġ/G|_LLR",
            Constant::EquilibriumSeed => "T₀",
        }
    }

    /// The literal value, exactly as published.
    #[must_use]
    pub const fn literal(self) -> &'static str {
        match self {
            Constant::SpeedOfLight => "299792458",
            Constant::ReducedPlanck => "1.054571817e-34",
            Constant::Gravitation => "6.67430e-11",
            Constant::MassRatio => "1836.15267343",
            Constant::InverseFineStructure => "137.035999084",
            Constant::ElectronMass => "510998.95",
            Constant::QuantumCorrection => "4.350917e-14",
            Constant::MeanGamma => "2.14",
            Constant::CouplingTarget => "0.074660340411",
            Constant::Colors | Constant::Flavors => "3",
            Constant::StrongCouplingConfinement => "1.0",
            Constant::StrongCoupling1GeV => "0.45",
            Constant::LambdaQcdLow => "150",
            Constant::LambdaQcdHigh => "200",
            Constant::SecularDrift => "-0.8e-12",
            Constant::SecularDriftBound => "1.0e-12",
            Constant::EquilibriumSeed => "1.0",
        }
    }

    /// The unit the literal is expressed in.
    #[must_use]
    pub const fn unit(self) -> Unit {
        match self {
            Constant::SpeedOfLight => Unit::MetrePerSecond,
            Constant::ReducedPlanck => Unit::JouleSecond,
            Constant::Gravitation => Unit::Gravitational,
            Constant::ElectronMass => Unit::ElectronVolt,
            Constant::LambdaQcdLow | Constant::LambdaQcdHigh => Unit::MegaElectronVolt,
            Constant::SecularDrift | Constant::SecularDriftBound => Unit::PerYear,
            Constant::Colors | Constant::Flavors => Unit::Count,
            Constant::MassRatio
            | Constant::InverseFineStructure
            | Constant::QuantumCorrection
            | Constant::MeanGamma
            | Constant::CouplingTarget
            | Constant::StrongCouplingConfinement
            | Constant::StrongCoupling1GeV
            | Constant::EquilibriumSeed => Unit::Dimensionless,
        }
    }

    /// Where the literal comes from.
    #[must_use]
    pub const fn provenance(self) -> &'static str {
        match self {
            Constant::SpeedOfLight
            | Constant::ReducedPlanck
            | Constant::Gravitation
            | Constant::MassRatio
            | Constant::InverseFineStructure
            | Constant::ElectronMass => "CODATA 2018",
            Constant::LambdaQcdLow | Constant::LambdaQcdHigh => "PDG, MS-bar scheme",
            Constant::SecularDriftBound => "lunar laser ranging",
            Constant::Colors | Constant::Flavors => "SU(3) with three light flavors",
            Constant::StrongCouplingConfinement | Constant::StrongCoupling1GeV => {
                "model input"
            }
            Constant::QuantumCorrection
            | Constant::MeanGamma
            | Constant::CouplingTarget
            | Constant::SecularDrift
            | Constant::EquilibriumSeed => "model parameter",
        }
    }

    /// The literal parsed at `precision` digits.
    pub fn value(self, precision: u32) -> Result<Decimal, Diagnostic> {
        Decimal::parse(self.literal(), precision).map_err(|_| Diagnostic::InvalidLiteral(self))
    }
}
