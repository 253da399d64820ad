use bsm_rs::constants::Constant;
use bsm_rs::report::format_value;
use bsm_rs::{Pipeline, Quantity};

/// Lists every computed quantity with its metadata, then the constant table.
pub fn list_quantities(
    pipeline: &Pipeline,
    digits: u32,
    out: &mut impl std::io::Write,
) -> Result<(), std::io::Error> {
    let separator = "-".repeat(79);
    for &quantity in Quantity::ALL {
        if let Some(value) = pipeline.get(quantity) {
            writeln!(
                out,
                "{:<18} {:<10} {:<12} {}",
                quantity.name(),
                quantity.kind(),
                quantity.stage(),
                format_value(quantity, value, digits)
            )?;
        }
    }
    writeln!(out, "{}", separator)?;
    for &constant in Constant::ALL {
        write_constant(constant, out)?;
    }
    Ok(())
}

pub fn write_constant(
    constant: Constant,
    out: &mut impl std::io::Write,
) -> Result<(), std::io::Error> {
    write!(out, "{:<14} {}", constant.symbol(), constant.literal())?;
    match constant.unit().symbol() {
        "" => {}
        unit => write!(out, " {unit}")?,
    }
    writeln!(out, " ({})", constant.provenance())?;
    Ok(())
}
