use strum::IntoEnumIterator;

use super::*;
use crate::harness::{NumericTest, TrialOutcome};

fn unit_case() -> QuadricCase<f32> {
    QuadricCase::new([1.0, 2.0, 3.0], [1.0, 1.0, 1.0], 2.0, DEFAULT_PRECISION).unwrap()
}

#[test]
fn reference_of_small_integer_case() {
    // (2² + 3² + 4²) − 2² = 25
    let case = unit_case();
    assert_eq!(case.reference().to_f64(), 25.0);
}

#[test]
fn algorithms_agree_on_exact_inputs() {
    let case = unit_case();
    for algorithm in all::<f32>().into_iter().skip(1) {
        assert_eq!(algorithm.run(&case), 25.0, "{}", algorithm.name());
    }
}

#[test]
fn null_evaluation_has_unit_relative_error() {
    let mut test: NumericTest<QuadricCase<f32>, f32> =
        NumericTest::new(Box::new(Null));
    assert_eq!(test.update_stats(&unit_case()).unwrap(), TrialOutcome::Recorded);
    assert_eq!(test.stats().mean().unwrap().to_f64(), 1.0);
}

#[test]
fn shape_labels() {
    let labels: Vec<String> = QuadricShape::iter().map(|shape| shape.to_string()).collect();
    assert_eq!(labels, vec!["Sphere Tests", "Axis Aligned Cylinder Tests"]);
}

#[test]
fn cylinder_has_one_untranslated_axis() {
    let mut generator = OperandGenerator::from_seed(17);
    for _ in 0..20 {
        let case: QuadricCase<f32> = QuadricCase::generate(
            QuadricShape::AxisCylinder,
            &mut generator,
            DEFAULT_MAX_MAGNITUDE,
            DEFAULT_PRECISION,
        )
        .unwrap();
        assert!(case.trans().iter().any(|&t| t == 0.0));
        assert!(case.radius() >= 0.0);
        assert!(case
            .pos()
            .iter()
            .all(|p| p.abs() <= DEFAULT_MAX_MAGNITUDE));
    }
}

#[test]
fn generated_reference_matches_definition() {
    let mut generator = OperandGenerator::from_seed(23);
    let case: QuadricCase<f32> = QuadricCase::generate(
        QuadricShape::Sphere,
        &mut generator,
        DEFAULT_MAX_MAGNITUDE,
        DEFAULT_PRECISION,
    )
    .unwrap();
    let rebuilt =
        QuadricCase::new(*case.pos(), *case.trans(), case.radius(), DEFAULT_PRECISION).unwrap();
    assert_eq!(rebuilt.reference(), case.reference());
}

#[test]
fn names() {
    let names: Vec<String> = all::<f32>().iter().map(|a| a.name()).collect();
    assert_eq!(
        names,
        vec![
            "Null Quadric Evaluation",
            "Naive Quadric Evaluation",
            "FMA Quadric Evaluation",
            "Kahan FMA Quadric Evaluation",
        ]
    );
}
