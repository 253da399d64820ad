use crate::decimal::Decimal;
use crate::pipeline_tests::mkpipeline;
use crate::validation::{ToleranceMode, ValidationHarness};

fn dec(literal: &str) -> Decimal {
    Decimal::parse(literal, 30).unwrap()
}

fn summary(harness: &ValidationHarness) -> String {
    let mut out = Vec::new();
    harness.write_summary(&mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn harness_tracks_pass_fail() {
    let mut h = ValidationHarness::new("test");
    h.check_abs("exact", &dec("1"), &dec("1"), &dec("1e-10"));
    h.check_abs("close", &dec("1.0001"), &dec("1"), &dec("1e-3"));
    h.check_abs("far", &dec("2"), &dec("1"), &dec("1e-3"));
    assert_eq!(h.passed_count(), 2);
    assert_eq!(h.total_count(), 3);
    assert!(!h.all_passed());
    assert_eq!(h.failed().collect::<Vec<_>>(), ["far"]);
}

#[test]
fn relative_check_handles_zero() {
    let mut h = ValidationHarness::new("test");
    h.check_rel("near_zero", &dec("1e-15"), &dec("0"), &dec("1e-10"));
    h.check_rel("negative", &dec("-15.97"), &dec("-16"), &dec("0.02"));
    h.check_rel("sign", &dec("16"), &dec("-16"), &dec("0.1"));
    assert!(h.checks[0].passed);
    assert!(h.checks[1].passed);
    assert!(!h.checks[2].passed);
    assert_eq!(h.checks[0].mode, ToleranceMode::Relative);
}

#[test]
fn bounds_are_strict_and_ranges_inclusive() {
    let mut h = ValidationHarness::new("test");
    h.check_upper("below", &dec("0.5"), &dec("1"));
    h.check_upper("at", &dec("1"), &dec("1"));
    h.check_range("low edge", &dec("150"), &dec("150"), &dec("200"));
    h.check_range("outside", &dec("20.3"), &dec("150"), &dec("200"));
    let passed: Vec<bool> = h.checks.iter().map(|c| c.passed).collect();
    assert_eq!(passed, [true, false, true, false]);
}

#[test]
fn empty_harness_passes() {
    let h = ValidationHarness::new("empty");
    assert_eq!(h.total_count(), 0);
    assert!(h.all_passed());
    assert!(summary(&h).contains("ALL CHECKS PASSED"));
}

#[test]
fn tolerance_mode_display() {
    assert_eq!(ToleranceMode::Absolute.to_string(), "abs");
    assert_eq!(ToleranceMode::Relative.to_string(), "rel");
    assert_eq!(ToleranceMode::UpperBound.to_string(), "<");
    assert_eq!(ToleranceMode::Range.to_string(), "range");
}

#[test]
fn standard_checks() {
    let mut pipeline = mkpipeline(40);
    let harness = pipeline.validate_results().unwrap();
    assert_eq!(harness.total_count(), 6);
    assert_eq!(harness.passed_count(), 2);
    assert!(harness.checks[0].passed, "T_eq residual");
    assert!(harness.checks[5].passed, "secular drift");
    assert_eq!(harness.checks[1].mode, ToleranceMode::Absolute);
    assert_eq!(harness.checks[2].mode, ToleranceMode::UpperBound);
    let text = summary(&harness);
    assert!(text.contains("bsm (40 digits) validation: 2/6 checks passed"));
    assert!(text.contains(
        "FAILED CHECKS: G_geom vs published, ZDC relative error, G_pred vs CODATA, Lambda_QCD(1 GeV)"
    ));
    assert!(text.contains("  ✓ T_eq residual: "));
}
