//! The verification pipeline.
//!
//! A [`Pipeline`] owns the working precision, the [`ResultCache`] and the
//! validated stage order.  Nothing is shared between pipelines: two instances
//! at different precisions can run side by side, and a fresh instance always
//! recomputes from the constant table.
//!
//! Values are computed on demand.  [`Pipeline::get_or_compute`] returns a
//! cached value, or runs the quantity's owning stage first; that stage pulls
//! its own inputs the same way, so asking for `G_pred` on an empty pipeline
//! evaluates the constants, the equilibrium root and the coupling, and
//! nothing else.  A stage run on demand stores the outputs that are still
//! missing; values stored with [`Pipeline::set`] stay as they are.  Rerunning
//! a stage explicitly with [`Pipeline::run_stage`] overwrites its outputs and
//! drops everything computed downstream of it.
//!
//! The `*_pass` methods mirror this for whole stages: they make sure the
//! stage has run and return its headline value.
//!
//! Example:
//! ```
//! use bsm_rs::{Pipeline, PipelineOptions, Quantity};
//!
//! let mut options = PipelineOptions::default();
//! options.precision = 50;
//!
//! let mut pipeline = Pipeline::new(options)?;
//! let coupling = pipeline.coupling_pass()?;
//! assert!(pipeline.get(Quantity::TEq).is_some());
//! assert!(pipeline.get(Quantity::GPred).is_none());
//! assert_eq!(coupling.precision(), 50);
//! # Ok::<(), bsm_rs::diag::Diagnostic>(())
//! ```

use crate::constants::Constant;
use crate::decimal::{Decimal, MIN_PRECISION};
use crate::diag::Diagnostic;
use crate::quantity::Quantity;
use crate::report;
use crate::stage::{topological_order, Stage, StageOutput};
use crate::util::HashMap;
use crate::validation::{self, Tolerances, ValidationHarness};
use log::debug;
use std::io::Write;
use std::time::Instant;

/// Options controlling a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Working precision in significant decimal digits.
    pub precision: u32,
    /// Significant digits printed per value; `None` prints every kept digit.
    pub display_digits: Option<u32>,
    /// Upper bound on root-finder iterations.
    pub max_iterations: u32,
    /// Prints the time spent in each stage.
    pub timing: bool,
    /// Prints stages as they are computed.
    pub trace_stages: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        PipelineOptions {
            precision: 100,
            display_digits: None,
            max_iterations: 50,
            timing: false,
            trace_stages: false,
        }
    }
}

pub(crate) fn time<R, F: FnOnce() -> R>(opts: &PipelineOptions, name: &str, f: F) -> R {
    let now = Instant::now();
    let ret = f();
    if opts.timing {
        println!("{} {}ms", name, now.elapsed().as_millis());
    }
    ret
}

/// The computed values of one pipeline, keyed by quantity.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ResultCache {
    values: HashMap<Quantity, Decimal>,
}

impl ResultCache {
    /// The cached value of `quantity`, if it has been computed.
    #[must_use]
    pub fn get(&self, quantity: Quantity) -> Option<&Decimal> {
        self.values.get(&quantity)
    }

    /// The cached value of the quantity with the given cache key.
    pub fn get_by_name(&self, name: &str) -> Result<Option<&Decimal>, Diagnostic> {
        let quantity =
            Quantity::from_name(name).ok_or_else(|| Diagnostic::UnknownQuantity(name.to_owned()))?;
        Ok(self.get(quantity))
    }

    /// Whether `quantity` has been computed.
    #[must_use]
    pub fn contains(&self, quantity: Quantity) -> bool {
        self.values.contains_key(&quantity)
    }

    /// Number of cached values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing has been computed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The cached values in report order.
    pub fn iter(&self) -> impl Iterator<Item = (Quantity, &Decimal)> + '_ {
        Quantity::ALL
            .iter()
            .filter_map(move |&q| self.values.get(&q).map(|v| (q, v)))
    }

    fn insert(&mut self, quantity: Quantity, value: Decimal) {
        self.values.insert(quantity, value);
    }

    fn remove(&mut self, quantity: Quantity) -> Option<Decimal> {
        self.values.remove(&quantity)
    }
}

/// An instance of the verification pipeline.
#[derive(Debug)]
pub struct Pipeline {
    options: PipelineOptions,
    order: Vec<Stage>,
    cache: ResultCache,
    running: Vec<Stage>,
}

impl Pipeline {
    /// Creates an empty pipeline, validating the precision and the stage
    /// graph.
    pub fn new(options: PipelineOptions) -> Result<Pipeline, Diagnostic> {
        if options.precision < MIN_PRECISION {
            return Err(Diagnostic::InvalidPrecision(options.precision));
        }
        let order = topological_order(Stage::ALL, |stage| stage.dependencies().to_vec())
            .map_err(Diagnostic::CyclicDependency)?;
        debug!(
            "pipeline at {} digits, stage order {:?}",
            options.precision, order
        );
        Ok(Pipeline {
            options,
            order,
            cache: ResultCache::default(),
            running: Vec::new(),
        })
    }

    /// The options this pipeline was created with.
    #[must_use]
    pub const fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// The working precision in decimal digits.
    #[must_use]
    pub const fn precision(&self) -> u32 {
        self.options.precision
    }

    /// The stages in evaluation order.
    #[must_use]
    pub fn stage_order(&self) -> &[Stage] {
        &self.order
    }

    /// The result cache.
    #[must_use]
    pub const fn cache(&self) -> &ResultCache {
        &self.cache
    }

    /// A constant table entry at working precision.
    pub fn constant(&self, constant: Constant) -> Result<Decimal, Diagnostic> {
        constant.value(self.options.precision)
    }

    /// The cached value of `quantity`, without computing anything.
    #[must_use]
    pub fn get(&self, quantity: Quantity) -> Option<&Decimal> {
        self.cache.get(quantity)
    }

    /// Stores a value, replacing any previous one.
    pub fn set(&mut self, quantity: Quantity, value: Decimal) {
        self.cache.insert(quantity, value);
    }

    /// Returns the value of `quantity`, running its owning stage first if it
    /// has not been computed.
    pub fn get_or_compute(&mut self, quantity: Quantity) -> Result<Decimal, Diagnostic> {
        if !self.cache.contains(quantity) {
            self.fill_stage(quantity.stage())?;
        }
        self.cache
            .get(quantity)
            .cloned()
            .ok_or(Diagnostic::MissingQuantity(quantity))
    }

    /// Whether every output of `stage` is cached.
    #[must_use]
    pub fn is_complete(&self, stage: Stage) -> bool {
        stage.outputs().all(|q| self.cache.contains(q))
    }

    /// Evaluates `stage` without storing anything.  Upstream values that are
    /// missing are computed; cached ones are reused.
    fn evaluate_stage(&mut self, stage: Stage) -> Result<StageOutput, Diagnostic> {
        if let Some(start) = self.running.iter().position(|&s| s == stage) {
            let mut cycle = self.running[start..].to_vec();
            cycle.push(stage);
            return Err(Diagnostic::CyclicDependency(cycle));
        }
        if self.options.trace_stages {
            println!("Computing stage {stage}");
        }
        debug!("stage `{stage}` started");
        self.running.push(stage);
        let result = time(&self.options.clone(), stage.name(), || stage.evaluate(self));
        self.running.pop();
        debug!("stage `{stage}` finished");
        result
    }

    /// Runs `stage` unconditionally and stores its outputs, overwriting any
    /// previous values.  The cached outputs of every stage downstream of it
    /// are dropped, so later lookups recompute them from the new values.
    pub fn run_stage(&mut self, stage: Stage) -> Result<(), Diagnostic> {
        let outputs = self.evaluate_stage(stage)?;
        for (quantity, value) in outputs {
            debug_assert_eq!(quantity.stage(), stage, "{quantity} written by {stage}");
            debug!("{quantity} = {value:.20}");
            self.set(quantity, value);
        }
        self.invalidate_dependents(stage);
        Ok(())
    }

    /// Runs `stage` and stores only the outputs not already cached, so a
    /// value that was [`set`](Pipeline::set) explicitly is never replaced
    /// behind the caller's back.
    fn fill_stage(&mut self, stage: Stage) -> Result<(), Diagnostic> {
        let outputs = self.evaluate_stage(stage)?;
        for (quantity, value) in outputs {
            debug_assert_eq!(quantity.stage(), stage, "{quantity} written by {stage}");
            if self.cache.contains(quantity) {
                debug!("{quantity} already set, keeping it");
            } else {
                debug!("{quantity} = {value:.20}");
                self.set(quantity, value);
            }
        }
        Ok(())
    }

    fn invalidate_dependents(&mut self, stage: Stage) {
        let mut stale = vec![stage];
        for &later in &self.order {
            if stale.contains(&later) {
                continue;
            }
            if later.dependencies().iter().any(|dep| stale.contains(dep)) {
                stale.push(later);
                for quantity in later.outputs() {
                    if self.cache.remove(quantity).is_some() {
                        debug!("{quantity} dropped after rerunning `{stage}`");
                    }
                }
            }
        }
    }

    fn ensure(&mut self, stage: Stage) -> Result<(), Diagnostic> {
        if self.is_complete(stage) {
            Ok(())
        } else {
            self.fill_stage(stage)
        }
    }

    /// Solves the balance equation if needed; returns `T_eq`.
    pub fn equilibrium_pass(&mut self) -> Result<Decimal, Diagnostic> {
        self.ensure(Stage::Equilibrium)?;
        self.get_or_compute(Quantity::TEq)
    }

    /// Computes the geometric coupling if needed; returns 𝒢.
    pub fn coupling_pass(&mut self) -> Result<Decimal, Diagnostic> {
        self.ensure(Stage::Coupling)?;
        self.get_or_compute(Quantity::GGeom)
    }

    /// Runs the zero-discrepancy comparison if needed; returns the predicted
    /// α⁻¹.
    pub fn zdc_pass(&mut self) -> Result<Decimal, Diagnostic> {
        self.ensure(Stage::Zdc)?;
        self.get_or_compute(Quantity::AlphaInvPred)
    }

    /// Computes the confinement scale if needed; returns Λ_QCD at 1 GeV.
    pub fn qcd_pass(&mut self) -> Result<Decimal, Diagnostic> {
        self.ensure(Stage::Qcd)?;
        self.get_or_compute(Quantity::LambdaQcd1GeV)
    }

    /// Computes the gravitational constant if needed; returns `G_pred`.
    pub fn gravity_pass(&mut self) -> Result<Decimal, Diagnostic> {
        self.ensure(Stage::Gravity)?;
        self.get_or_compute(Quantity::GPred)
    }

    /// Runs every stage that is not complete, in dependency order.
    pub fn run_all(&mut self) -> Result<&ResultCache, Diagnostic> {
        for stage in self.order.clone() {
            self.ensure(stage)?;
        }
        Ok(&self.cache)
    }

    /// Runs every stage and writes the full report to `out`.
    pub fn run_all_verifications(
        &mut self,
        out: &mut impl Write,
    ) -> Result<&ResultCache, Diagnostic> {
        self.run_all()?;
        report::write_report(self, out)?;
        Ok(&self.cache)
    }

    /// Runs every stage and checks the predictions against their references
    /// with the default tolerances.
    pub fn validate_results(&mut self) -> Result<ValidationHarness, Diagnostic> {
        self.run_all()?;
        validation::standard_checks(self, &Tolerances::new(self.precision()))
    }
}
