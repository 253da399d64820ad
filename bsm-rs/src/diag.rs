//! Diagnostics emitted by the pipeline.
//!
//! Every failure is fatal to the stage that raised it and to the stages
//! downstream of it.  The inputs are fixed literals, so none of these are
//! transient; they indicate a configuration or logic error and are reported
//! as such.
//!
//! Diagnostics tied to a stage render with the stage's formula as the
//! annotated source, pointing at the offending term where there is one.

use crate::constants::Constant;
use crate::decimal::Decimal;
use crate::quantity::Quantity;
use crate::stage::Stage;
use annotate_snippets::{Level, Message, Snippet};
use itertools::Itertools;
use std::borrow::Cow;
use std::error::Error;
use std::fmt::Display;
use std::io;

/// List of all diagnostic codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The root finder did not settle: stage, iterations taken, last residual.
    Convergence(Stage, u32, Decimal),
    /// The declared or runtime stage graph contains a cycle.
    CyclicDependency(Vec<Stage>),
    /// A divisor resolved to exactly zero: stage, divisor as written in the
    /// stage's formula.
    DegenerateInput(Stage, &'static str),
    /// A constant table literal does not parse.
    InvalidLiteral(Constant),
    /// The requested working precision is below the supported minimum.
    InvalidPrecision(u32),
    /// Writing output failed.
    IoError(String),
    /// A logarithm or square root of a value outside its domain.
    MathDomain(Stage, &'static str),
    /// The report needed a quantity that has not been computed.
    MissingQuantity(Quantity),
    /// No quantity has the given name.
    UnknownQuantity(String),
}
use self::Diagnostic::*;

impl From<io::Error> for Diagnostic {
    fn from(err: io::Error) -> Diagnostic {
        IoError(format!("{err}"))
    }
}

impl Diagnostic {
    /// The diagnostic's label
    #[must_use]
    pub fn label(&self) -> Cow<'static, str> {
        match self {
            Convergence(..) => "Root finder did not converge",
            CyclicDependency(_) => "Cyclic stage dependency",
            DegenerateInput(..) => "Division by zero",
            InvalidLiteral(_) => "Invalid constant literal",
            InvalidPrecision(_) => "Invalid working precision",
            IoError(_) => "I/O error",
            MathDomain(..) => "Argument outside the function's domain",
            MissingQuantity(_) => "Quantity not computed",
            UnknownQuantity(_) => "Unknown quantity",
        }
        .into()
    }

    /// The diagnostic's severity
    #[must_use]
    #[allow(clippy::unused_self)]
    pub const fn severity(&self) -> Level {
        Level::Error
    }

    /// The stage that raised this diagnostic, if any.
    #[must_use]
    pub const fn stage(&self) -> Option<Stage> {
        match self {
            Convergence(stage, ..) | DegenerateInput(stage, _) | MathDomain(stage, _) => {
                Some(*stage)
            }
            _ => None,
        }
    }

    /// A one-line explanation of this particular occurrence.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Convergence(_, iterations, residual) => format!(
                "no convergence after {iterations} iterations, residual {}",
                residual.to_exp_string(3)
            ),
            CyclicDependency(stages) => {
                format!("stages depend on each other: {}", stages.iter().join(" -> "))
            }
            DegenerateInput(_, divisor) => format!("`{divisor}` evaluated to exactly zero"),
            InvalidLiteral(constant) => format!(
                "`{}` for {} is not a decimal number",
                constant.literal(),
                constant.symbol()
            ),
            InvalidPrecision(digits) => format!(
                "{digits} digits requested, at least {} are required",
                crate::decimal::MIN_PRECISION
            ),
            IoError(err) => err.clone(),
            MathDomain(_, operation) => format!("cannot evaluate `{operation}`"),
            MissingQuantity(quantity) => {
                format!("`{quantity}` is needed but its stage has not run")
            }
            UnknownQuantity(name) => format!("no quantity is named `{name}`"),
        }
    }

    /// The part of the stage formula to point at.
    fn span_in(&self, formula: &str) -> std::ops::Range<usize> {
        let term = match self {
            DegenerateInput(_, term) | MathDomain(_, term) => Some(*term),
            _ => None,
        };
        term.and_then(|term| formula.find(term).map(|start| start..start + term.len()))
            .unwrap_or(0..formula.len())
    }

    /// Builds an annotated message and hands it to `f`.
    pub fn to_message<T>(&self, f: impl for<'a> FnOnce(Message<'a>) -> T) -> T {
        let label = self.label();
        let detail = self.detail();
        let level = self.severity();
        let message = level.title(&label);
        match self.stage() {
            Some(stage) => {
                let formula = stage.formula();
                let snippet = Snippet::source(formula)
                    .origin(stage.name())
                    .annotation(level.span(self.span_in(formula)).label(&detail));
                f(message.snippet(snippet))
            }
            None => f(message.footer(Level::Note.title(&detail))),
        }
    }

    /// Converts a list of diagnostics to rendered output, in order.
    pub fn render_list<T>(
        diags: &[Diagnostic],
        f: impl for<'a> FnOnce(Message<'a>) -> T + Copy,
    ) -> Vec<T> {
        diags.iter().map(|diag| diag.to_message(f)).collect()
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.stage() {
            Some(stage) => write!(f, "{} in stage `{stage}`: {}", self.label(), self.detail()),
            None => write!(f, "{}: {}", self.label(), self.detail()),
        }
    }
}

impl Error for Diagnostic {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        None
    }
}
