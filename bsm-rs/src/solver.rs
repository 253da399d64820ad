//! Secant root finding over [`Decimal`] functions.
//!
//! The iteration starts from `x0` and `x0 + 1/4` and stops when the step is
//! below `10^-(p - 5)` relative to the iterate, where `p` is the precision of
//! the seed, or when the residual is exactly zero.  Near the precision floor
//! the function differences become rounding noise; a vanishing secant slope
//! with a residual already under the tolerance counts as converged.

use crate::decimal::Decimal;
use log::trace;

/// Digits short of full precision accepted as converged.
const SLACK_DIGITS: u32 = 5;

/// A converged root.
#[derive(Debug, Clone)]
pub struct Root {
    /// The root, at the seed's precision.
    pub value: Decimal,
    /// |f(value)|.
    pub residual: Decimal,
    /// Secant steps taken.
    pub iterations: u32,
}

/// The iteration failed to settle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unconverged {
    /// Secant steps taken before giving up.
    pub iterations: u32,
    /// |f| at the last iterate.
    pub residual: Decimal,
}

/// Finds a root of `f` near `x0` with the secant method.
pub fn secant(
    mut f: impl FnMut(&Decimal) -> Decimal,
    x0: &Decimal,
    max_iterations: u32,
) -> Result<Root, Unconverged> {
    let precision = x0.precision();
    let tolerance = Decimal::parse(
        &format!("1e-{}", precision.saturating_sub(SLACK_DIGITS)),
        precision,
    )
    .unwrap_or_else(|_| Decimal::zero(precision));
    let one = Decimal::one(precision);
    let quarter = &one / &Decimal::from_i64(4, precision);

    let mut x_prev = x0.clone();
    let mut f_prev = f(&x_prev);
    let mut x = &x_prev + &quarter;
    let mut fx = f(&x);
    for iteration in 1..=max_iterations {
        if fx.is_zero() {
            return Ok(Root {
                residual: fx,
                value: x,
                iterations: iteration - 1,
            });
        }
        let slope = &fx - &f_prev;
        if slope.is_zero() {
            let residual = fx.abs();
            return if residual <= tolerance {
                Ok(Root {
                    value: x,
                    residual,
                    iterations: iteration - 1,
                })
            } else {
                Err(Unconverged {
                    iterations: iteration - 1,
                    residual,
                })
            };
        }
        let step = &(&fx * &(&x - &x_prev)) / &slope;
        let next = &x - &step;
        trace!("secant step {iteration}: x = {next:.20}, |dx| = {:.3}", step.abs());
        x_prev = std::mem::replace(&mut x, next);
        f_prev = std::mem::replace(&mut fx, f(&x));

        let scale = if x.abs() > one { x.abs() } else { one.clone() };
        if step.abs() <= &tolerance * &scale {
            return Ok(Root {
                residual: fx.abs(),
                value: x,
                iterations: iteration,
            });
        }
    }
    Err(Unconverged {
        iterations: max_iterations,
        residual: fx.abs(),
    })
}
