//! Runs the Base Substrate Motion verification pipeline and prints the
//! report.  The entry point for all API operations is in the `bsm-rs`
//! library.

mod list_quantities;

use annotate_snippets::Renderer;
use bsm_rs::report::format_value;
use bsm_rs::{Diagnostic, Pipeline, PipelineOptions, Quantity};
use clap::Parser;
use list_quantities::list_quantities;
use simple_logger::SimpleLogger;
use std::io::{stdout, BufWriter, Write};

/// A high-precision verification calculator for the Base Substrate Motion
/// model: solves the equilibrium equation, derives the geometric coupling,
/// and compares the predicted α⁻¹, Λ_QCD and G with their references.
#[derive(Debug, clap::Parser)]
#[command(version, about, verbatim_doc_comment)]
struct Cli {
    /// Working precision in significant decimal digits
    #[arg(
        short,
        long,
        value_name("DIGITS"),
        default_value_t = 100,
        value_parser = clap::value_parser!(u32).range(10..)
    )]
    precision: u32,
    /// Significant digits printed per value; all kept digits by default
    #[arg(
        short = 'd',
        long = "digits",
        value_name("DIGITS"),
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    display_digits: Option<u32>,
    /// Upper bound on root-finder iterations
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u32).range(1..))]
    max_iterations: u32,
    /// Prints milliseconds after each stage
    #[arg(long = "time")]
    timing: bool,
    /// Prints stages as they are computed
    #[arg(long)]
    trace_stages: bool,
    /// Activates debug logs, including every value a stage stores
    #[arg(long)]
    debug: bool,
    /// Prints the named values instead of the report, computing only what
    /// they need
    #[arg(short, long, value_name("NAME"))]
    query: Vec<String>,
    /// Lists every quantity with its kind, stage and value
    #[arg(short = 'L', long)]
    list: bool,
    /// Checks the predictions against their references
    #[arg(long)]
    check: bool,
}

/// Prints the queried values; unknown names are collected as diagnostics.
fn query(
    pipeline: &mut Pipeline,
    names: &[String],
    digits: u32,
    out: &mut impl Write,
    diags: &mut Vec<Diagnostic>,
) -> Result<(), Diagnostic> {
    for name in names {
        let Some(quantity) = Quantity::from_name(name) else {
            diags.push(Diagnostic::UnknownQuantity(name.clone()));
            continue;
        };
        let value = pipeline.get_or_compute(quantity)?;
        writeln!(out, "{name} = {}", format_value(quantity, &value, digits))?;
    }
    Ok(())
}

/// Runs what the command line asks for; returns whether every requested
/// check passed.
fn run(
    cli: &Cli,
    pipeline: &mut Pipeline,
    diags: &mut Vec<Diagnostic>,
) -> Result<bool, Diagnostic> {
    let digits = cli.display_digits.unwrap_or(cli.precision);
    let mut out = BufWriter::new(stdout().lock());
    if !cli.query.is_empty() {
        query(pipeline, &cli.query, digits, &mut out, diags)?;
    } else if cli.list {
        pipeline.run_all()?;
        list_quantities(pipeline, digits, &mut out)?;
    } else {
        pipeline.run_all_verifications(&mut out)?;
    }
    let mut passed = true;
    if cli.check {
        let harness = pipeline.validate_results()?;
        writeln!(out)?;
        harness.write_summary(&mut out)?;
        passed = harness.all_passed();
    }
    out.flush()?;
    Ok(passed)
}

fn main() {
    let cli = Cli::parse();

    let options = PipelineOptions {
        precision: cli.precision,
        display_digits: cli.display_digits,
        max_iterations: cli.max_iterations,
        timing: cli.timing,
        trace_stages: cli.trace_stages,
    };

    if cli.debug {
        if let Err(err) = SimpleLogger::new().init() {
            eprintln!("cannot enable debug logs: {err}");
        }
    }

    let mut diags = Vec::new();
    let passed = match Pipeline::new(options) {
        Ok(mut pipeline) => run(&cli, &mut pipeline, &mut diags).unwrap_or_else(|diag| {
            diags.push(diag);
            false
        }),
        Err(diag) => {
            diags.push(diag);
            false
        }
    };

    let r = Renderer::styled();
    let count = Diagnostic::render_list(&diags, |msg| eprintln!("{}", r.render(msg))).len();
    if count > 0 {
        eprintln!("{count} diagnostics issued.");
    }

    // Exit with code 1 if any diagnostic was issued or a check failed
    let code = if count > 0 || !passed { 1 } else { 0 };
    std::process::exit(code);
}
