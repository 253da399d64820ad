use crate::decimal::Decimal;
use crate::diag::Diagnostic;
use crate::quantity::Quantity;
use crate::stage::Stage;
use crate::{Pipeline, PipelineOptions};
use assert_matches::assert_matches;

pub(super) fn mkpipeline(precision: u32) -> Pipeline {
    let options = PipelineOptions {
        precision,
        ..PipelineOptions::default()
    };
    Pipeline::new(options).unwrap()
}

fn sig(pipeline: &Pipeline, quantity: Quantity, digits: u32) -> String {
    pipeline.get(quantity).unwrap().to_string_sig(digits)
}

#[test]
fn precision_below_minimum_is_rejected() {
    let options = PipelineOptions {
        precision: 9,
        ..PipelineOptions::default()
    };
    assert_matches!(Pipeline::new(options), Err(Diagnostic::InvalidPrecision(9)));
}

#[test]
fn stage_order_starts_with_constants() {
    let pipeline = mkpipeline(20);
    assert_eq!(pipeline.stage_order().first(), Some(&Stage::Constants));
    assert!(pipeline.cache().is_empty());
}

#[test]
fn equilibrium_residual_is_below_bound() {
    for precision in [30, 100] {
        let mut pipeline = mkpipeline(precision);
        pipeline.equilibrium_pass().unwrap();
        let residual = pipeline.get(Quantity::TEqResidual).unwrap();
        let bound = &Decimal::one(precision)
            / &Decimal::from_i64(10, precision).powi(precision - 5);
        assert!(residual < &bound, "residual {residual} at {precision} digits");
        assert!(pipeline.get(Quantity::TEqIterations).unwrap() >= &Decimal::one(precision));
    }
}

#[test]
fn equilibrium_root() {
    let mut pipeline = mkpipeline(50);
    let t_eq = pipeline.equilibrium_pass().unwrap();
    assert_eq!(t_eq.to_string_sig(14), "1.6141776262744");
    assert_eq!(sig(&pipeline, Quantity::LogTerm, 12), "0.623398298065");
    assert_eq!(
        pipeline.get(Quantity::Epsilon).unwrap().to_string(),
        "4.350917e-14"
    );
}

#[test]
fn converged_digits_are_stable_across_precisions() {
    let mut low = mkpipeline(50);
    let mut high = mkpipeline(200);
    let t_low = low.equilibrium_pass().unwrap();
    let t_high = high.equilibrium_pass().unwrap();
    assert_eq!(t_low.to_string_sig(45), t_high.to_string_sig(45));
    assert_eq!(t_high.precision(), 200);
}

#[test]
fn coupling_and_zdc() {
    let mut pipeline = mkpipeline(50);
    let coupling = pipeline.coupling_pass().unwrap();
    assert_eq!(coupling.to_string_sig(12), "0.0512966878419");

    let alpha_inv = pipeline.zdc_pass().unwrap();
    assert_eq!(alpha_inv.to_string_sig(12), "94.188550519");
    let reference = Decimal::parse("137.035999084", 50).unwrap();
    let rel_error = &(&alpha_inv - &reference).abs() / &reference;
    assert_eq!(pipeline.get(Quantity::ZdcRelError), Some(&rel_error));
    assert_eq!(rel_error.to_exp_string(2), "3.13e-01");
    assert_eq!(pipeline.get(Quantity::ZdcDigits), Some(&Decimal::zero(50)));
}

#[test]
fn confinement_scale() {
    let mut pipeline = mkpipeline(50);
    let lambda = pipeline.qcd_pass().unwrap();
    assert_eq!(lambda.to_string_sig(10), "20.33029547");
    assert_eq!(sig(&pipeline, Quantity::LambdaQcdBare, 10), "35.99250872");
    assert_eq!(sig(&pipeline, Quantity::CGyro, 12), "0.74781469884");
    assert_eq!(pipeline.get(Quantity::Beta0), Some(&Decimal::from_i64(9, 50)));
    assert_eq!(sig(&pipeline, Quantity::GyroTerm5, 10), "2.14");
}

#[test]
fn gravitational_constant() {
    let mut pipeline = mkpipeline(50);
    let g = pipeline.gravity_pass().unwrap();
    assert_eq!(g.to_string_sig(8), "7.5485794e138");
    assert_eq!(sig(&pipeline, Quantity::SubstrateMass, 8), "9.4373418e-42");
    assert_eq!(sig(&pipeline, Quantity::GDotOverG, 10), "-8.0e-13");
}

#[test]
fn values_are_pulled_on_demand() {
    let mut pipeline = mkpipeline(30);
    pipeline.get_or_compute(Quantity::GPred).unwrap();
    assert!(pipeline.is_complete(Stage::Constants));
    assert!(pipeline.is_complete(Stage::Equilibrium));
    assert!(pipeline.is_complete(Stage::Coupling));
    assert!(pipeline.is_complete(Stage::Gravity));
    assert!(!pipeline.cache().contains(Quantity::AlphaInvPred));
    assert!(!pipeline.cache().contains(Quantity::LambdaQcd1GeV));
}

#[test]
fn runs_are_deterministic() {
    let mut first = mkpipeline(60);
    let mut second = mkpipeline(60);
    let cache = first.run_all().unwrap().clone();
    assert_eq!(&cache, second.run_all().unwrap());
    assert_eq!(cache.len(), Quantity::ALL.len());
    assert_eq!(cache.iter().count(), Quantity::ALL.len());
}

#[test]
fn rerunning_a_stage_is_idempotent() {
    let mut pipeline = mkpipeline(30);
    let before = pipeline.run_all().unwrap().clone();
    pipeline.run_stage(Stage::Coupling).unwrap();
    pipeline.run_stage(Stage::Qcd).unwrap();
    pipeline.run_all().unwrap();
    assert_eq!(&before, pipeline.cache());
}

#[test]
fn run_all_keeps_values_that_were_set() {
    let mut pipeline = mkpipeline(30);
    pipeline.set(Quantity::TEq, Decimal::one(30));
    let coupling = pipeline.coupling_pass().unwrap();
    pipeline.run_all().unwrap();
    assert_eq!(pipeline.get(Quantity::TEq), Some(&Decimal::one(30)));
    assert_eq!(pipeline.get(Quantity::GGeom), Some(&coupling));
    assert_eq!(coupling.to_string_sig(12), "0.0828019658164");
    assert!(pipeline.cache().contains(Quantity::TEqResidual));
}

#[test]
fn rerunning_a_stage_drops_stale_dependents() {
    let mut pipeline = mkpipeline(30);
    pipeline.set(Quantity::TEq, Decimal::one(30));
    pipeline.gravity_pass().unwrap();
    pipeline.run_stage(Stage::Equilibrium).unwrap();
    assert_eq!(sig(&pipeline, Quantity::TEq, 12), "1.61417762627");
    assert!(!pipeline.cache().contains(Quantity::GGeom));
    assert!(!pipeline.cache().contains(Quantity::GPred));
    assert!(pipeline.cache().contains(Quantity::Pi));
    let coupling = pipeline.coupling_pass().unwrap();
    assert_eq!(coupling.to_string_sig(12), "0.0512966878419");
}

#[test]
fn set_value_is_used_downstream() {
    let mut pipeline = mkpipeline(30);
    pipeline.set(Quantity::TEq, Decimal::one(30));
    let coupling = pipeline.coupling_pass().unwrap();
    assert_eq!(coupling.to_string_sig(20), "0.082801965816351942114");
    assert!(!pipeline.cache().contains(Quantity::TEqResidual));
}

#[test]
fn zero_root_is_degenerate() {
    let mut pipeline = mkpipeline(30);
    pipeline.set(Quantity::TEq, Decimal::zero(30));
    assert_matches!(
        pipeline.coupling_pass(),
        Err(Diagnostic::DegenerateInput(Stage::Coupling, "T_eq"))
    );
    assert!(!pipeline.cache().contains(Quantity::GGeom));
}

#[test]
fn zero_coupling_is_degenerate_for_gravity() {
    let mut pipeline = mkpipeline(30);
    pipeline.set(Quantity::GGeom, Decimal::zero(30));
    assert_matches!(
        pipeline.gravity_pass(),
        Err(Diagnostic::DegenerateInput(Stage::Gravity, "G*T_eq"))
    );
    assert!(!pipeline.cache().contains(Quantity::GPred));
}

#[test]
fn iteration_limit_is_a_convergence_failure() {
    let options = PipelineOptions {
        precision: 30,
        max_iterations: 1,
        ..PipelineOptions::default()
    };
    let mut pipeline = Pipeline::new(options).unwrap();
    assert_matches!(
        pipeline.equilibrium_pass(),
        Err(Diagnostic::Convergence(Stage::Equilibrium, 1, _))
    );
    assert_matches!(pipeline.run_all(), Err(Diagnostic::Convergence(..)));
    assert!(!pipeline.cache().contains(Quantity::GGeom));
}

#[test]
fn lookup_by_name() {
    let mut pipeline = mkpipeline(20);
    pipeline.equilibrium_pass().unwrap();
    let cache = pipeline.cache();
    assert_eq!(cache.get_by_name("T_eq").unwrap(), cache.get(Quantity::TEq));
    assert_eq!(cache.get_by_name("G_pred").unwrap(), None);
    assert_matches!(
        cache.get_by_name("T_equilibrium"),
        Err(Diagnostic::UnknownQuantity(name)) if name == "T_equilibrium"
    );
}

#[test]
fn pipelines_are_independent() {
    fn assert_send<T: Send>() {}
    assert_send::<Pipeline>();

    let mut low = mkpipeline(20);
    let mut high = mkpipeline(40);
    assert_eq!(low.coupling_pass().unwrap().precision(), 20);
    assert_eq!(high.coupling_pass().unwrap().precision(), 40);
    assert_eq!(low.get(Quantity::Pi).unwrap().precision(), 20);
}
