//! Arbitrary-precision decimal floating point.
//!
//! [`Decimal`] wraps a base-10 [`FBig`] from `dashu-float` with half-to-even
//! rounding.  Every value carries the number of significant decimal digits it
//! is kept to; results of arithmetic are rounded to the larger precision of
//! their operands.  There is no global precision setting, so two pipelines
//! working at different precisions never observe each other.
//!
//! The transcendental functions evaluate with guard digits and round once at
//! the end.  `dashu-float` has no π, so [`Decimal::pi`] sums Machin's formula
//! in fixed point.
//!
//! Division by zero panics, like integer division does; callers which may see
//! a zero divisor check [`Decimal::is_zero`] first.

use dashu_base::{Abs, Sign, SquareRoot};
use dashu_float::round::mode::HalfEven;
use dashu_float::FBig;
use dashu_int::IBig;
use std::error::Error;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// The smallest working precision accepted by the pipeline.
pub const MIN_PRECISION: u32 = 10;

/// Guard digits carried by the transcendental functions.
const GUARD_DIGITS: u32 = 10;

/// `exp` of an argument at or below `-10^UNDERFLOW_MAGNITUDE` is zero.
const UNDERFLOW_MAGNITUDE: isize = 15;

type Float = FBig<HalfEven, 10>;

/// An error produced when a decimal literal cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDecimalError {
    literal: String,
}

impl fmt::Display for ParseDecimalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid decimal literal `{}`", self.literal)
    }
}

impl Error for ParseDecimalError {}

/// An arbitrary-precision decimal floating-point number.
///
/// Equality and ordering compare exact values, regardless of precision.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Decimal(Float);

impl Decimal {
    /// Rounds (or re-tags) `value` to `precision` digits.
    fn rounded(value: Float, precision: u32) -> Self {
        Decimal(value.with_precision(precision as usize).value())
    }

    /// This value with `GUARD_DIGITS` more digits of room.
    fn guarded(&self) -> Float {
        let working = self.precision() + GUARD_DIGITS;
        self.0.clone().with_precision(working as usize).value()
    }

    /// Zero, kept to `precision` digits.
    #[must_use]
    pub fn zero(precision: u32) -> Self {
        Self::rounded(Float::ZERO, precision)
    }

    /// One, kept to `precision` digits.
    #[must_use]
    pub fn one(precision: u32) -> Self {
        Self::from_i64(1, precision)
    }

    /// An integer value, rounded to `precision` digits.
    #[must_use]
    pub fn from_i64(value: i64, precision: u32) -> Self {
        Self::rounded(Float::from_parts(IBig::from(value), 0), precision)
    }

    /// An unsigned integer value, rounded to `precision` digits.
    #[must_use]
    pub fn from_u64(value: u64, precision: u32) -> Self {
        Self::rounded(Float::from_parts(IBig::from(value), 0), precision)
    }

    /// Parses a literal such as `1836.15267343`, `-0.8e-12` or
    /// `1.054571817E-34`, rounding it to `precision` digits.
    pub fn parse(literal: &str, precision: u32) -> Result<Self, ParseDecimalError> {
        let value: Float = literal.trim().parse().map_err(|_| ParseDecimalError {
            literal: literal.to_owned(),
        })?;
        Ok(Self::rounded(value, precision))
    }

    /// π to `precision` digits (Machin's formula).
    #[must_use]
    pub fn pi(precision: u32) -> Self {
        fn arctan_inv(n: u32, unity: &IBig) -> IBig {
            let n = IBig::from(n);
            let n2 = &n * &n;
            let mut power = unity / &n;
            let mut sum = power.clone();
            let mut k = 1u32;
            loop {
                power = &power / &n2;
                if power == IBig::ZERO {
                    return sum;
                }
                let term = &power / IBig::from(2 * k + 1);
                if k % 2 == 1 {
                    sum -= term;
                } else {
                    sum += term;
                }
                k += 1;
            }
        }
        let working = precision + GUARD_DIGITS;
        let unity = IBig::from(10u8).pow(working as usize);
        let pi = (arctan_inv(5, &unity) * IBig::from(4u8) - arctan_inv(239, &unity))
            * IBig::from(4u8);
        Self::rounded(Float::from_parts(pi, -(working as isize)), precision)
    }

    /// Euler's number to `precision` digits.
    #[must_use]
    pub fn e(precision: u32) -> Self {
        Self::one(precision).exp()
    }

    /// The number of significant digits this value is kept to.
    #[must_use]
    pub fn precision(&self) -> u32 {
        u32::try_from(self.0.precision()).unwrap_or(u32::MAX)
    }

    /// This value re-rounded to `precision` digits.  Raising the precision
    /// does not invent digits; it only lets later arithmetic keep more.
    #[must_use]
    pub fn with_precision(&self, precision: u32) -> Self {
        Self::rounded(self.0.clone(), precision)
    }

    /// Whether the value is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.repr().is_zero()
    }

    /// Whether the value is strictly negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        !self.is_zero() && self.0.sign() == Sign::Negative
    }

    /// Whether the value is strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        !self.is_zero() && self.0.sign() == Sign::Positive
    }

    /// The absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Decimal(self.0.clone().abs())
    }

    /// The decimal order of magnitude: a nonzero value lies in
    /// `[10^(top-1), 10^top)`.
    fn top(&self) -> isize {
        let repr = self.0.repr();
        repr.exponent() + repr.digits() as isize
    }

    /// `self^n`.
    #[must_use]
    pub fn powi(&self, n: u32) -> Self {
        Self::rounded(self.0.powi(IBig::from(n)), self.precision())
    }

    /// The square root, or `None` for a negative value.
    #[must_use]
    pub fn sqrt(&self) -> Option<Self> {
        if self.is_negative() {
            return None;
        }
        if self.is_zero() {
            return Some(self.clone());
        }
        Some(Self::rounded(self.guarded().sqrt(), self.precision()))
    }

    /// The exponential function.  Arguments at or below `-1e15` underflow
    /// to zero.
    ///
    /// # Panics
    ///
    /// Panics if the result overflows the decimal exponent range.
    #[must_use]
    pub fn exp(&self) -> Self {
        let precision = self.precision();
        if self.is_negative() && self.top() > UNDERFLOW_MAGNITUDE {
            return Self::zero(precision);
        }
        Self::rounded(self.guarded().exp(), precision)
    }

    /// The natural logarithm, or `None` for a value that is not positive.
    #[must_use]
    pub fn ln(&self) -> Option<Self> {
        if !self.is_positive() {
            return None;
        }
        Some(Self::rounded(self.guarded().ln(), self.precision()))
    }

    /// The base-10 logarithm, or `None` for a value that is not positive.
    /// Exact powers of ten give exact integers.
    #[must_use]
    pub fn log10(&self) -> Option<Self> {
        if !self.is_positive() {
            return None;
        }
        let precision = self.precision();
        // the significand carries no trailing zeros
        let repr = self.0.repr();
        if *repr.significand() == IBig::ONE {
            return i64::try_from(repr.exponent())
                .ok()
                .map(|exponent| Self::from_i64(exponent, precision));
        }
        let value = self.guarded();
        let ln10 = Float::from(10u8)
            .with_precision(value.precision())
            .value()
            .ln();
        Some(Self::rounded(value.ln() / ln10, precision))
    }

    /// The largest integer not greater than this value.
    #[must_use]
    pub fn floor(&self) -> IBig {
        self.0.floor().to_int().value()
    }

    /// The digit string and decimal exponent after rounding to `digits`
    /// significant digits, with trailing zeros removed.
    fn rounded_digits(&self, digits: u32) -> (String, i64) {
        let rounded = self.0.clone().with_precision(digits.max(1) as usize).value();
        let repr = rounded.repr();
        let significand = repr.significand().to_string();
        let text = significand.trim_start_matches('-');
        let top = repr.exponent() as i64 + text.len() as i64;
        (text.trim_end_matches('0').to_owned(), top)
    }

    /// Formats with at most `digits` significant digits, positional for
    /// moderate magnitudes and scientific (`4.350917e-14`) otherwise.
    #[must_use]
    pub fn to_string_sig(&self, digits: u32) -> String {
        if self.is_zero() {
            return "0.0".to_owned();
        }
        let sign = if self.is_negative() { "-" } else { "" };
        let (text, top) = self.rounded_digits(digits);
        let sci = top - 1;
        #[allow(clippy::cast_possible_wrap)]
        let len = text.len() as i64;
        if (-5..i64::from(digits.max(1))).contains(&sci) {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let body = if top <= 0 {
                format!("0.{}{text}", "0".repeat((-top) as usize))
            } else if top >= len {
                format!("{text}{}.0", "0".repeat((top - len) as usize))
            } else {
                let (int, frac) = text.split_at(top as usize);
                format!("{int}.{frac}")
            };
            format!("{sign}{body}")
        } else {
            let (lead, rest) = text.split_at(1);
            let rest = if rest.is_empty() { "0" } else { rest };
            format!("{sign}{lead}.{rest}e{sci}")
        }
    }

    /// Formats in scientific notation with exactly `decimals` digits after
    /// the point and a two-digit exponent, like `3.13e-01`.
    #[must_use]
    pub fn to_exp_string(&self, decimals: u32) -> String {
        if self.is_zero() {
            return format!("{:.*}e+00", decimals as usize, 0.0);
        }
        let sign = if self.is_negative() { "-" } else { "" };
        let (mut text, top) = self.rounded_digits(decimals + 1);
        while text.len() < decimals as usize + 1 {
            text.push('0');
        }
        let (lead, rest) = text.split_at(1);
        let sci = top - 1;
        let exp_sign = if sci < 0 { '-' } else { '+' };
        let point = if decimals == 0 { "" } else { "." };
        format!("{sign}{lead}{point}{rest}e{exp_sign}{:02}", sci.unsigned_abs())
    }
}

impl fmt::Display for Decimal {
    /// Prints every kept digit, or `{:.N}` significant digits.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        #[allow(clippy::cast_possible_truncation)]
        let digits = f.precision().map_or(self.precision(), |d| d as u32);
        f.write_str(&self.to_string_sig(digits))
    }
}

impl Neg for Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        Decimal(-self.0)
    }
}

impl Neg for &Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        Decimal(-&self.0)
    }
}

impl Add<&Decimal> for &Decimal {
    type Output = Decimal;

    fn add(self, rhs: &Decimal) -> Decimal {
        Decimal(&self.0 + &rhs.0)
    }
}

impl Sub<&Decimal> for &Decimal {
    type Output = Decimal;

    fn sub(self, rhs: &Decimal) -> Decimal {
        Decimal(&self.0 - &rhs.0)
    }
}

impl Mul<&Decimal> for &Decimal {
    type Output = Decimal;

    fn mul(self, rhs: &Decimal) -> Decimal {
        Decimal(&self.0 * &rhs.0)
    }
}

impl Div<&Decimal> for &Decimal {
    type Output = Decimal;

    fn div(self, rhs: &Decimal) -> Decimal {
        assert!(!rhs.is_zero(), "attempt to divide a Decimal by zero");
        Decimal(&self.0 / &rhs.0)
    }
}

macro_rules! forward_owned_binop {
    ($($imp:ident $method:ident),*) => {$(
        impl $imp<Decimal> for Decimal {
            type Output = Decimal;

            fn $method(self, rhs: Decimal) -> Decimal {
                (&self).$method(&rhs)
            }
        }

        impl $imp<&Decimal> for Decimal {
            type Output = Decimal;

            fn $method(self, rhs: &Decimal) -> Decimal {
                (&self).$method(rhs)
            }
        }

        impl $imp<Decimal> for &Decimal {
            type Output = Decimal;

            fn $method(self, rhs: Decimal) -> Decimal {
                self.$method(&rhs)
            }
        }
    )*};
}

forward_owned_binop!(Add add, Sub sub, Mul mul, Div div);
