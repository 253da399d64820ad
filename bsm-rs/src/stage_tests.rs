use crate::constants::Constant;
use crate::decimal::Decimal;
use crate::diag::Diagnostic;
use crate::gravity::{newton_constant, substrate_mass};
use crate::quantity::{Quantity, QuantityKind, Unit};
use crate::stage::{topological_order, Stage};
use crate::zdc::{matching_digits, MatchingDigits};
use assert_matches::assert_matches;

#[test]
fn stage_order_respects_dependencies() {
    let order = topological_order(Stage::ALL, |s| s.dependencies().to_vec()).unwrap();
    assert_eq!(order.len(), Stage::ALL.len());
    for (index, stage) in order.iter().enumerate() {
        for dep in stage.dependencies() {
            let position = order.iter().position(|s| s == dep).unwrap();
            assert!(position < index, "{dep} must run before {stage}");
        }
    }
    assert_eq!(order[0], Stage::Constants);
}

#[test]
fn cycle_is_reported_with_its_path() {
    let edges = |n: u8| match n {
        1 => vec![2],
        2 => vec![3],
        3 => vec![1],
        _ => vec![],
    };
    assert_eq!(topological_order(&[0, 1, 2, 3], edges), Err(vec![1, 2, 3, 1]));
}

#[test]
fn self_loop_is_a_cycle() {
    assert_eq!(topological_order(&['a'], |_| vec!['a']), Err(vec!['a', 'a']));
}

#[test]
fn independent_nodes_keep_their_order() {
    assert_eq!(topological_order(&[3, 1, 2], |_| vec![]), Ok(vec![3, 1, 2]));
    assert_eq!(
        topological_order(&[1, 2, 3], |n| if n == 1 { vec![3] } else { vec![] }),
        Ok(vec![3, 1, 2])
    );
}

#[test]
fn every_stage_writes_something() {
    for &stage in Stage::ALL {
        assert!(stage.outputs().next().is_some(), "{stage} has no outputs");
    }
}

#[test]
fn stages_read_only_declared_dependencies() {
    // outputs read by each stage belong to itself or a declared dependency
    let reads: &[(Stage, &[Quantity])] = &[
        (Stage::Equilibrium, &[Quantity::Pi]),
        (
            Stage::Coupling,
            &[Quantity::TEq, Quantity::E, Quantity::Pi, Quantity::Sqrt2],
        ),
        (Stage::Zdc, &[Quantity::GGeom]),
        (
            Stage::Qcd,
            &[
                Quantity::E,
                Quantity::Pi,
                Quantity::Sqrt2,
                Quantity::LogTerm,
                Quantity::AlphaInvPred,
            ],
        ),
        (
            Stage::Gravity,
            &[Quantity::GGeom, Quantity::TEq, Quantity::Pi, Quantity::Sqrt2],
        ),
    ];
    for (stage, quantities) in reads {
        for quantity in *quantities {
            assert!(stage.dependencies().contains(&quantity.stage()));
        }
    }
}

#[test]
fn quantity_names_round_trip() {
    for &quantity in Quantity::ALL {
        assert_eq!(Quantity::from_name(quantity.name()), Some(quantity));
    }
    assert_eq!(Quantity::from_name("G_geom"), Some(Quantity::GGeom));
    assert_eq!(Quantity::from_name("no_such_value"), None);
}

#[test]
fn quantity_metadata() {
    assert_eq!(Quantity::TEq.stage(), Stage::Equilibrium);
    assert_eq!(Quantity::GPred.unit(), Unit::Gravitational);
    assert_eq!(Quantity::LambdaQcd1GeV.unit().symbol(), "MeV");
    assert_eq!(Quantity::ZdcRelError.kind(), QuantityKind::Comparison);
    assert_eq!(Quantity::AlphaInvCodata.kind(), QuantityKind::PhysicalConstant);
    assert_eq!(Quantity::TEq.to_string(), "T_eq");
}

#[test]
fn constant_literals_parse() {
    for &constant in Constant::ALL {
        assert!(constant.value(30).is_ok(), "{}", constant.symbol());
    }
    assert_eq!(
        Constant::MassRatio.value(30).unwrap().to_string(),
        "1836.15267343"
    );
}

fn digits_for(rel_error: &str) -> MatchingDigits {
    matching_digits(&Decimal::parse(rel_error, 30).unwrap()).unwrap()
}

#[test]
fn matching_digits_floor_the_negative_log() {
    assert_eq!(digits_for("1.5e-7"), MatchingDigits::Count(6));
    assert_eq!(digits_for("1e-6"), MatchingDigits::Count(6));
    assert_eq!(digits_for("1.0000001e-6"), MatchingDigits::Count(5));
    assert_eq!(digits_for("9.9999999e-7"), MatchingDigits::Count(6));
    assert_eq!(digits_for("0.31267293887"), MatchingDigits::Count(0));
    assert_eq!(digits_for("12"), MatchingDigits::Count(-2));
    assert_eq!(digits_for("12").digits(), -2);
}

#[test]
fn exact_match_counts_every_digit() {
    let digits = matching_digits(&Decimal::zero(40)).unwrap();
    assert_eq!(digits, MatchingDigits::All(40));
    assert_eq!(digits.digits(), 40);
}

#[test]
fn zero_coupling_root_product_is_degenerate() {
    let p = 30;
    let c = Decimal::from_i64(299_792_458, p);
    let hbar = Decimal::parse("1.054571817e-34", p).unwrap();
    let pi = Decimal::pi(p);
    let sqrt2 = Decimal::from_i64(2, p).sqrt().unwrap();
    let one = Decimal::one(p);
    let zero = Decimal::zero(p);
    assert_matches!(
        substrate_mass(&hbar, &c, &pi, &sqrt2, &zero, &one),
        Err(Diagnostic::DegenerateInput(Stage::Gravity, "G*T_eq"))
    );
    assert_matches!(
        substrate_mass(&hbar, &c, &pi, &sqrt2, &one, &zero),
        Err(Diagnostic::DegenerateInput(Stage::Gravity, "G*T_eq"))
    );
    assert_matches!(
        newton_constant(&c, &hbar, &one, &zero),
        Err(Diagnostic::DegenerateInput(Stage::Gravity, "M_s^2"))
    );
    let mass = substrate_mass(&hbar, &c, &pi, &sqrt2, &one, &one).unwrap();
    assert!(mass.is_positive());
    assert!(newton_constant(&c, &hbar, &one, &mass).unwrap().is_positive());
}
