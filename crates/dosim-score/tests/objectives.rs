//! Integration tests for objective-list validation and classification.

use dosim_model::Objective;
use dosim_score::ObjectiveSet;

fn bin(label: &str) -> Objective {
    Objective::new(label, [0, 0, 0])
}

/// The five-bin ladder from the scorecard guide: boundaries at 8, 15, 29,
/// and 36, declared by SMALL (min), NORMAL (min and max), and LARGE (max).
fn size_ladder() -> ObjectiveSet {
    ObjectiveSet::new(vec![
        bin("VERY SMALL"),
        bin("SMALL").with_min(8.0),
        bin("NORMAL").with_min(15.0).with_max(29.0),
        bin("LARGE").with_max(36.0),
        bin("VERY LARGE"),
    ])
    .unwrap()
}

#[test]
fn size_ladder_classifies_the_guide_table() {
    let set = size_ladder();
    let cases = [
        (7.0, "VERY SMALL"),
        (8.0, "SMALL"),
        (14.99, "SMALL"),
        (15.0, "NORMAL"),
        (29.0, "NORMAL"),
        (29.01, "LARGE"),
        (36.0, "LARGE"),
        (36.01, "VERY LARGE"),
    ];
    for (value, expected) in cases {
        assert_eq!(set.classify(value).label(), expected, "value {value}");
    }
}

#[test]
fn declared_max_owns_its_threshold() {
    let set = ObjectiveSet::new(vec![bin("PASS").with_max(1.0), bin("FAIL")]).unwrap();
    assert_eq!(set.classify(1.0).label(), "PASS");
    assert_eq!(set.classify(1.0001).label(), "FAIL");
}

#[test]
fn declared_min_owns_its_threshold() {
    let set = ObjectiveSet::new(vec![bin("PASS"), bin("FAIL").with_min(1.0)]).unwrap();
    assert_eq!(set.classify(1.0).label(), "FAIL");
    assert_eq!(set.classify(0.9999).label(), "PASS");
}

#[test]
fn objective_ladder_from_wire_json() {
    let json = r#"[
        { "label": "IDEAL", "color": [18, 191, 0], "max": 0 },
        { "label": "GOOD", "color": [136, 223, 127], "max": 3 },
        { "label": "ACCEPTABLE", "color": [255, 216, 0], "max": 6 },
        { "label": "MARGINAL", "color": [255, 102, 0], "max": 9 },
        { "label": "UNACCEPTABLE", "color": [255, 0, 0] }
    ]"#;
    let objectives: Vec<Objective> = serde_json::from_str(json).unwrap();
    let set = ObjectiveSet::new(objectives).unwrap();

    assert_eq!(set.classify(-4.0).label(), "IDEAL");
    assert_eq!(set.classify(0.0).label(), "IDEAL");
    assert_eq!(set.classify(2.5).label(), "GOOD");
    assert_eq!(set.classify(9.0).label(), "MARGINAL");
    assert_eq!(set.classify(9.5).label(), "UNACCEPTABLE");
    let classification = set.classify(4.0);
    assert_eq!(classification.index, 2);
    assert_eq!(classification.color(), [255, 216, 0]);
}

#[test]
fn rejects_too_few_or_too_many_bins() {
    let err = ObjectiveSet::new(vec![bin("ONLY")]).unwrap_err();
    assert!(err.report.issues[0].message.contains("at least 2"));

    let mut bins = vec![bin("FIRST")];
    for index in 0..9 {
        bins.push(bin(&format!("BIN {index}")).with_min(index as f64));
    }
    bins.push(bin("LAST").with_min(9.0));
    let err = ObjectiveSet::new(bins).unwrap_err();
    assert!(
        err.report
            .issues
            .iter()
            .any(|issue| issue.message.contains("at most 10"))
    );
}

#[test]
fn rejects_label_over_limit() {
    let err =
        ObjectiveSet::new(vec![bin(&"n".repeat(65)).with_max(1.0), bin("FAIL")]).unwrap_err();
    assert!(
        err.report
            .issues
            .iter()
            .any(|issue| issue.path == "/0/label" && issue.message.contains("64"))
    );
}

#[test]
fn rejects_min_on_first_and_max_on_last() {
    let err = ObjectiveSet::new(vec![bin("A").with_min(0.0).with_max(1.0), bin("B")]).unwrap_err();
    assert!(
        err.report
            .issues
            .iter()
            .any(|issue| issue.path == "/0/min")
    );

    let err = ObjectiveSet::new(vec![bin("A").with_max(1.0), bin("B").with_max(2.0)]).unwrap_err();
    assert!(
        err.report
            .issues
            .iter()
            .any(|issue| issue.path == "/1/max")
    );
}

#[test]
fn rejects_doubly_declared_boundary() {
    let err =
        ObjectiveSet::new(vec![bin("A").with_max(1.0), bin("B").with_min(1.0)]).unwrap_err();
    assert!(
        err.report
            .issues
            .iter()
            .any(|issue| issue.message.contains("both declare"))
    );
}

#[test]
fn rejects_undeclared_boundary() {
    let err = ObjectiveSet::new(vec![bin("A"), bin("B"), bin("C").with_min(2.0)]).unwrap_err();
    assert!(
        err.report
            .issues
            .iter()
            .any(|issue| issue.message.contains("no boundary"))
    );
}

#[test]
fn rejects_wrong_total_threshold_count() {
    // First bin declares both min and max: the pair rule for (0, 1) passes,
    // but bin 0 may not declare a min and the total is 2 instead of 1.
    let err =
        ObjectiveSet::new(vec![bin("A").with_min(0.0).with_max(1.0), bin("B")]).unwrap_err();
    assert!(
        err.report
            .issues
            .iter()
            .any(|issue| issue.message.contains("expected 1 declared thresholds"))
    );
}

#[test]
fn rejects_empty_effective_range() {
    // Bin B sits above 10 (from A's max) but below 5 (its own max).
    let err = ObjectiveSet::new(vec![
        bin("A").with_max(10.0),
        bin("B").with_max(5.0),
        bin("C"),
    ])
    .unwrap_err();
    assert!(
        err.report
            .issues
            .iter()
            .any(|issue| issue.path == "/1" && issue.message.contains("empty effective range"))
    );

    // A bin whose own min equals its own max is zero-width.
    let err = ObjectiveSet::new(vec![
        bin("A"),
        bin("B").with_min(5.0).with_max(5.0),
        bin("C").with_min(6.0),
    ])
    .unwrap_err();
    assert!(
        err.report
            .issues
            .iter()
            .any(|issue| issue.path == "/1" && issue.message.contains("empty effective range"))
    );
}

#[test]
fn validation_reports_every_violation_at_once() {
    let err = ObjectiveSet::new(vec![
        bin("A").with_min(0.0),
        bin("B"),
        bin("C").with_max(9.0),
    ])
    .unwrap_err();
    // min on first, max on last, two undeclared boundaries; the total count
    // happens to equal N-1, so that rule stays quiet.
    assert_eq!(err.report.issues.len(), 4);
}
