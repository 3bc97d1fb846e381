//! Integration tests for partition_discretizer::rules
//!
//! Interval containment follows the `(low, high]` convention, with an
//! infinite upper end left open. Labels written by `Display` must parse back.

use partition_discretizer::rules::Interval;
use std::str::FromStr;

/// Left end excluded, right end included.
#[test]
fn interval_contains_is_left_open_right_closed() {
    let iv = Interval::new(1.0, 2.5);

    assert!(!iv.contains(1.0), "left end is excluded");
    assert!(iv.contains(1.0000001));
    assert!(iv.contains(2.0));
    assert!(iv.contains(2.5), "right end is included");
    assert!(!iv.contains(2.6));
}

#[test]
fn interval_with_infinite_ends() {
    let upper = Interval::new(2.5, f64::INFINITY);
    assert!(upper.contains(1e300));
    assert!(!upper.contains(f64::INFINITY));
    assert!(!upper.contains(2.5));

    let lower = Interval::new(f64::NEG_INFINITY, 2.5);
    assert!(lower.contains(-1e300));
    assert!(lower.contains(2.5));

    let all = Interval::unbounded();
    assert!(all.contains(0.0));
    assert!(!all.is_bounded());
}

#[test]
fn interval_display_labels() {
    assert_eq!(Interval::unbounded().to_string(), "(-inf; inf)");
    assert_eq!(
        Interval::new(f64::NEG_INFINITY, 2.5).to_string(),
        "(-inf; 2.5]"
    );
    assert_eq!(Interval::new(2.5, f64::INFINITY).to_string(), "(2.5; inf)");
    assert_eq!(Interval::new(-1.25, 3.0).to_string(), "(-1.25; 3]");
}

#[test]
fn interval_labels_parse_back() {
    for iv in [
        Interval::unbounded(),
        Interval::new(f64::NEG_INFINITY, 2.5),
        Interval::new(2.5, f64::INFINITY),
        Interval::new(-1.25, 0.000001),
    ] {
        let parsed = Interval::from_str(&iv.to_string()).expect("label parses");
        assert_eq!(parsed, iv, "label {} did not round trip", iv);
    }
}

#[test]
fn malformed_interval_labels_are_rejected() {
    for bad in ["[1; 2]", "(1, 2]", "(a; 2]", "(3; 1]", "ALL", ""] {
        assert!(
            Interval::from_str(bad).is_err(),
            "'{}' should not parse as an interval",
            bad
        );
    }
}

#[test]
fn representative_lies_inside() {
    for iv in [
        Interval::unbounded(),
        Interval::new(f64::NEG_INFINITY, -3.0),
        Interval::new(7.5, f64::INFINITY),
        Interval::new(0.1, 0.2),
    ] {
        let v = iv.representative();
        assert!(iv.contains(v), "{} does not contain its representative {}", iv, v);
    }
}

#[test]
fn split_produces_adjacent_intervals() {
    let (left, right) = Interval::unbounded().split(2.5);
    assert_eq!(left, Interval::new(f64::NEG_INFINITY, 2.5));
    assert_eq!(right, Interval::new(2.5, f64::INFINITY));
    assert!(left.contains(2.5) && !right.contains(2.5));
}
