//! The plain-text verification report.
//!
//! One section per stage, in the pipeline's stage order, followed by a
//! summary of the headline comparisons.  Rendering only reads the cache: a
//! quantity that has not been computed is reported as
//! [`Diagnostic::MissingQuantity`] instead of being computed here.

use crate::constants::Constant;
use crate::decimal::Decimal;
use crate::diag::Diagnostic;
use crate::quantity::{Quantity, QuantityKind, Unit};
use crate::stage::Stage;
use crate::Pipeline;
use std::io::Write;

const BANNER_WIDTH: usize = 80;
const RULE_WIDTH: usize = 50;
/// Digits after the point for error figures.
const ERROR_DECIMALS: u32 = 2;

fn lookup(pipeline: &Pipeline, quantity: Quantity) -> Result<&Decimal, Diagnostic> {
    pipeline
        .get(quantity)
        .ok_or(Diagnostic::MissingQuantity(quantity))
}

/// Formats one value the way the report prints it.
#[must_use]
pub fn format_value(quantity: Quantity, value: &Decimal, digits: u32) -> String {
    let text = match (quantity.unit(), quantity.kind()) {
        (Unit::Count, _) => value.floor().to_string(),
        (_, QuantityKind::Comparison) => value.to_exp_string(ERROR_DECIMALS),
        _ => value.to_string_sig(digits),
    };
    match quantity.unit().symbol() {
        "" => text,
        symbol => format!("{text} {symbol}"),
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

fn write_banner(out: &mut impl Write, title: &str) -> Result<(), Diagnostic> {
    let banner = "=".repeat(BANNER_WIDTH);
    writeln!(out, "{banner}")?;
    writeln!(out, "{title}")?;
    writeln!(out, "{banner}")?;
    Ok(())
}

/// Lines specific to a stage, printed after its values.
fn write_stage_notes(
    pipeline: &Pipeline,
    stage: Stage,
    out: &mut impl Write,
) -> Result<(), Diagnostic> {
    match stage {
        Stage::Zdc => {
            let rel_error = lookup(pipeline, Quantity::ZdcRelError)?;
            if rel_error.is_zero() {
                let precision = pipeline.precision();
                writeln!(out, "Significant digits = {precision}")?;
                writeln!(out, "ZDC satisfied: all {precision} digits match")?;
            } else {
                let digits = lookup(pipeline, Quantity::ZdcDigits)?;
                let count = digits.floor();
                writeln!(out, "Significant digits = {count}")?;
                if digits.is_positive() {
                    writeln!(out, "ZDC satisfied to {count} significant digits")?;
                } else {
                    writeln!(out, "ZDC not satisfied")?;
                }
            }
        }
        Stage::Qcd => {
            let lambda = lookup(pipeline, Quantity::LambdaQcd1GeV)?;
            let low = pipeline.constant(Constant::LambdaQcdLow)?;
            let high = pipeline.constant(Constant::LambdaQcdHigh)?;
            writeln!(
                out,
                "Experimental range {}-{} MeV, prediction inside: {}",
                low.floor(),
                high.floor(),
                yes_no(&low <= lambda && lambda <= &high)
            )?;
        }
        Stage::Gravity => {
            let drift = lookup(pipeline, Quantity::GDotOverG)?;
            let bound = lookup(pipeline, Quantity::GDotBound)?;
            writeln!(
                out,
                "|Gdot/G| below the lunar laser ranging bound: {}",
                yes_no(&drift.abs() < bound)
            )?;
        }
        Stage::Constants | Stage::Equilibrium | Stage::Coupling => {}
    }
    Ok(())
}

fn write_summary(
    pipeline: &Pipeline,
    out: &mut impl Write,
    digits: u32,
) -> Result<(), Diagnostic> {
    write_banner(out, "SUMMARY")?;
    let t_eq = lookup(pipeline, Quantity::TEq)?;
    let coupling = lookup(pipeline, Quantity::GGeom)?;
    let alpha_inv = lookup(pipeline, Quantity::AlphaInvPred)?;
    let rel_error = lookup(pipeline, Quantity::ZdcRelError)?;
    let lambda = lookup(pipeline, Quantity::LambdaQcd1GeV)?;
    let g_rel = lookup(pipeline, Quantity::GRelError)?;
    let drift = lookup(pipeline, Quantity::GDotOverG)?;
    let shown = digits.min(20);
    writeln!(out, "T_eq           = {}", t_eq.to_string_sig(shown))?;
    writeln!(out, "G_geom         = {}", coupling.to_string_sig(shown))?;
    writeln!(out, "1/alpha (pred) = {}", alpha_inv.to_string_sig(shown))?;
    let rel_error = rel_error.to_exp_string(ERROR_DECIMALS);
    writeln!(out, "ZDC relative error {rel_error}")?;
    writeln!(out, "Lambda_QCD(1 GeV) = {} MeV", lambda.to_string_sig(6))?;
    writeln!(
        out,
        "G_N agreement with CODATA: relative error {}",
        g_rel.to_exp_string(ERROR_DECIMALS)
    )?;
    writeln!(out, "Gdot/G = {} yr^-1", drift.to_exp_string(1))?;
    Ok(())
}

/// Writes the full report for a pipeline whose stages have all run.
pub fn write_report(pipeline: &Pipeline, out: &mut impl Write) -> Result<(), Diagnostic> {
    let digits = pipeline
        .options()
        .display_digits
        .unwrap_or_else(|| pipeline.precision());
    let title = format!("BSM THEORY VERIFICATION AT {} DIGITS", pipeline.precision());
    write_banner(out, &title)?;
    for &stage in pipeline.stage_order() {
        writeln!(out)?;
        writeln!(out, "{}", stage.title())?;
        writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
        for quantity in stage.outputs() {
            let value = lookup(pipeline, quantity)?;
            writeln!(
                out,
                "{} = {}",
                quantity.name(),
                format_value(quantity, value, digits)
            )?;
        }
        write_stage_notes(pipeline, stage, out)?;
    }
    writeln!(out)?;
    write_summary(pipeline, out, digits)
}
