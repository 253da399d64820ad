//! Names, kinds and units of every value the pipeline caches.
//!
//! Each [`Quantity`] is owned by exactly one [`Stage`], which is the only
//! stage allowed to write it.  That makes the stage outputs disjoint and lets
//! the resolver find which stage to run for a missing value.

use crate::stage::Stage;
use std::fmt;

/// What a cached value represents.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QuantityKind {
    /// A mathematical or physical constant, or a literal reference value.
    PhysicalConstant,
    /// A value computed from the model's formulas.
    Derived,
    /// An error or agreement figure comparing a prediction with a reference.
    Comparison,
}

impl QuantityKind {
    /// A short lowercase name, used in listings.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            QuantityKind::PhysicalConstant => "constant",
            QuantityKind::Derived => "derived",
            QuantityKind::Comparison => "comparison",
        }
    }
}

impl fmt::Display for QuantityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The unit a value is expressed in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Unit {
    Dimensionless,
    Count,
    MetrePerSecond,
    JouleSecond,
    Kilogram,
    /// m³·kg⁻¹·s⁻²
    Gravitational,
    ElectronVolt,
    MegaElectronVolt,
    PerYear,
}

impl Unit {
    /// The symbol printed after a value; empty for dimensionless values.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Unit::Dimensionless | Unit::Count => "",
            Unit::MetrePerSecond => "m/s",
            Unit::JouleSecond => "J·s",
            Unit::Kilogram => "kg",
            Unit::Gravitational => "m³/kg·s²",
            Unit::ElectronVolt => "eV",
            Unit::MegaElectronVolt => "MeV",
            Unit::PerYear => "yr⁻¹",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

macro_rules! quantities {
    ($($(#[$doc:meta])* $variant:ident => $name:literal, $kind:ident, $unit:ident, $stage:ident;)*) => {
        /// A value held in the result cache.
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Quantity {
            $($(#[$doc])* $variant,)*
        }

        impl Quantity {
            /// Every quantity, in report order.
            pub const ALL: &'static [Quantity] = &[$(Quantity::$variant,)*];

            /// The cache key of this quantity.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Quantity::$variant => $name,)*
                }
            }

            /// Whether this is a constant, a derived value or a comparison.
            #[must_use]
            pub const fn kind(self) -> QuantityKind {
                match self {
                    $(Quantity::$variant => QuantityKind::$kind,)*
                }
            }

            /// The unit of this quantity.
            #[must_use]
            pub const fn unit(self) -> Unit {
                match self {
                    $(Quantity::$variant => Unit::$unit,)*
                }
            }

            /// The stage which writes this quantity.
            #[must_use]
            pub const fn stage(self) -> Stage {
                match self {
                    $(Quantity::$variant => Stage::$stage,)*
                }
            }
        }
    };
}

quantities! {
    /// π
    Pi => "pi", PhysicalConstant, Dimensionless, Constants;
    /// Euler's number
    E => "e", PhysicalConstant, Dimensionless, Constants;
    /// √2
    Sqrt2 => "sqrt2", PhysicalConstant, Dimensionless, Constants;

    /// Quantum correction ε added to the balance equation
    Epsilon => "epsilon", PhysicalConstant, Dimensionless, Equilibrium;
    /// ln(1 + e/π)
    LogTerm => "log_term", Derived, Dimensionless, Equilibrium;
    /// Root of the transcendental balance equation
    TEq => "T_eq", Derived, Dimensionless, Equilibrium;
    /// |f(T_eq)| at working precision
    TEqResidual => "T_eq_residual", Comparison, Dimensionless, Equilibrium;
    /// Secant steps taken by the root finder
    TEqIterations => "T_eq_iterations", Derived, Count, Equilibrium;

    /// Geometric coupling 𝒢
    GGeom => "G_geom", Derived, Dimensionless, Coupling;
    /// Published value of 𝒢
    GGeomTarget => "G_geom_target", PhysicalConstant, Dimensionless, Coupling;
    /// |𝒢 − target|
    GGeomError => "G_geom_error", Comparison, Dimensionless, Coupling;

    /// Proton to electron mass ratio μ
    MassRatio => "mass_ratio", PhysicalConstant, Dimensionless, Zdc;
    /// Predicted α⁻¹ = μ·𝒢
    AlphaInvPred => "alpha_inv_pred", Derived, Dimensionless, Zdc;
    /// CODATA α⁻¹
    AlphaInvCodata => "alpha_inv_codata", PhysicalConstant, Dimensionless, Zdc;
    /// |α⁻¹ predicted − α⁻¹ CODATA|
    ZdcError => "zdc_error", Comparison, Dimensionless, Zdc;
    /// Absolute error relative to the CODATA value
    ZdcRelError => "zdc_rel_error", Comparison, Dimensionless, Zdc;
    /// Number of matching significant digits
    ZdcDigits => "zdc_digits", Comparison, Count, Zdc;

    /// 1/(2√2)
    GyroTerm1 => "gyro_term1", Derived, Dimensionless, Qcd;
    /// (e − 1)/(e + 1)
    GyroTerm2 => "gyro_term2", Derived, Dimensionless, Qcd;
    /// 1/ln(1 + e/π)
    GyroTerm3 => "gyro_term3", Derived, Dimensionless, Qcd;
    /// (N_c² − 1)/(2N_c)
    GyroTerm4 => "gyro_term4", Derived, Dimensionless, Qcd;
    /// Mean relativistic factor γ̄
    GyroTerm5 => "gyro_term5", PhysicalConstant, Dimensionless, Qcd;
    /// Gyroscopic factor, the product of the five terms
    CGyro => "C_gyro", Derived, Dimensionless, Qcd;
    /// One-loop β-function coefficient b₀
    Beta0 => "beta0", Derived, Dimensionless, Qcd;
    /// Confinement scale at the electron mass
    LambdaQcdBare => "lambda_qcd_bare", Derived, MegaElectronVolt, Qcd;
    /// Confinement scale evolved to 1 GeV
    LambdaQcd1GeV => "lambda_qcd_1gev", Derived, MegaElectronVolt, Qcd;

    /// Substrate mass scale M_s
    SubstrateMass => "M_s", Derived, Kilogram, Gravity;
    /// Predicted Newtonian constant
    GPred => "G_pred", Derived, Gravitational, Gravity;
    /// CODATA Newtonian constant
    GCodata => "G_codata", PhysicalConstant, Gravitational, Gravity;
    /// |G_pred / G_codata − 1|
    GRelError => "G_rel_error", Comparison, Dimensionless, Gravity;
    /// Asserted secular drift Ġ/G
    GDotOverG => "G_dot_over_G", PhysicalConstant, PerYear, Gravity;
    /// Lunar laser ranging bound on |Ġ/G|
    GDotBound => "G_dot_bound", PhysicalConstant, PerYear, Gravity;
}

impl Quantity {
    /// Looks a quantity up by its cache key.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Quantity> {
        Quantity::ALL.iter().copied().find(|q| q.name() == name)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
