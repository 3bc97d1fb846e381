use partition_discretizer::candidates::{
    Candidate, attribute_candidates, candidate_pool, generate_candidates, round_threshold,
};
use partition_discretizer::dataset::Dataset;
use partition_discretizer::selector::GreedyDiscretizer;

fn scenario_a() -> Dataset {
    Dataset::from_columns(vec![vec![1.0, 2.0, 3.0, 4.0]], &["A", "A", "B", "B"]).unwrap()
}

#[test]
fn midpoint_between_class_change() {
    let dataset = scenario_a();
    assert_eq!(generate_candidates(&dataset), vec![vec![2.5]]);
}

#[test]
fn single_label_yields_no_candidates() {
    let dataset = Dataset::from_columns(
        vec![vec![1.0, 2.0, 3.0], vec![5.0, 4.0, 3.0]],
        &["A", "A", "A"],
    )
    .unwrap();
    let candidates = generate_candidates(&dataset);
    assert_eq!(candidates.len(), 2, "one (empty) list per attribute");
    assert!(candidates.iter().all(|c| c.is_empty()));
}

#[test]
fn unsorted_input_is_sorted_first() {
    let dataset = Dataset::from_columns(
        vec![vec![4.0, 1.0, 3.0, 2.0, 6.0]],
        &["B", "A", "B", "A", "A"],
    )
    .unwrap();
    // sorted: 1A 2A 3B 4B 6A -> transitions at 2|3 and 4|6
    assert_eq!(generate_candidates(&dataset), vec![vec![2.5, 5.0]]);
}

#[test]
fn equal_values_never_produce_a_cut_between_them() {
    let sorted = vec![(1.0, 0), (1.0, 1), (1.0, 1)];
    assert!(attribute_candidates(&sorted).is_empty());
}

#[test]
fn thresholds_are_rounded_to_six_decimals() {
    assert_eq!(round_threshold(0.1234571), 0.123457);
    assert_eq!(round_threshold(2.5), 2.5);
    assert_eq!(round_threshold(-0.0000001), 0.0);
    assert!(round_threshold(-0.0000001).is_sign_positive());

    let sorted = vec![(0.123456, 0), (0.1234582, 1)];
    assert_eq!(attribute_candidates(&sorted), vec![0.123457]);
}

#[test]
fn consecutive_equal_rounded_midpoints_collapse() {
    // both midpoints round to 0.0
    let sorted = vec![(0.0, 0), (1e-7, 1), (2e-7, 0)];
    assert_eq!(attribute_candidates(&sorted), vec![0.0]);
}

#[test]
fn pool_is_ordered_by_attribute_then_threshold() {
    let pool = candidate_pool(&[vec![3.0, 5.0], vec![], vec![1.0, 2.0]]);
    assert_eq!(
        pool,
        vec![
            Candidate::new(0, 3.0),
            Candidate::new(0, 5.0),
            Candidate::new(2, 1.0),
            Candidate::new(2, 2.0),
        ]
    );
    assert_eq!(pool[2].to_string(), "x3 = 1");
}

#[test]
fn huge_values_keep_a_finite_midpoint() {
    assert_eq!(round_threshold(1.5e303), 1.5e303);
    assert_eq!(round_threshold(-1.5e303), -1.5e303);
    assert_eq!(round_threshold(1e10 + 0.25), 1e10 + 0.25);

    let dataset = Dataset::from_columns(vec![vec![1e303, 2e303]], &["A", "B"]).unwrap();
    assert_eq!(generate_candidates(&dataset), vec![vec![1.5e303]]);

    let mut discretizer = GreedyDiscretizer::default();
    let cut_set = discretizer.fit(&dataset).unwrap().clone();
    assert_eq!(cut_set.cuts(0), &[1.5e303]);
    assert_eq!(discretizer.score(), 1);

    // The sum of the two ends would overflow
    let extremes = vec![(-f64::MAX, 0), (f64::MAX, 1)];
    assert_eq!(attribute_candidates(&extremes), vec![0.0]);
}
