use partition_discretizer::error::DiscretizeError;
use partition_discretizer::merger::{IntervalMerger, merge_loss, separation_measure};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn zero_bins_is_rejected() {
    let err = IntervalMerger::new(0).unwrap_err();
    assert!(matches!(err, DiscretizeError::InvalidParameter(_)));
}

#[test]
fn fewer_points_than_bins_is_a_no_op() {
    let mut merger = IntervalMerger::new(5).unwrap();
    merger.fit(&[3.0, 1.0, 2.0], &["a", "b", "a"]).unwrap();
    assert_eq!(merger.bins(), vec![(1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]);
}

#[test]
fn identical_points_start_in_one_interval() {
    let mut merger = IntervalMerger::new(10).unwrap();
    merger.fit(&[1.0, 1.0, 2.0], &["a", "a", "b"]).unwrap();
    assert_eq!(merger.intervals().len(), 2);
    assert_eq!(merger.intervals()[0].points().len(), 2);
}

#[test]
fn lossless_merges_come_first() {
    let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
    let labels = ["a", "a", "b", "b", "a", "a"];
    let mut merger = IntervalMerger::new(3).unwrap();
    let bins = merger.fit_transform(&values, &labels).unwrap();

    assert_eq!(merger.bins(), vec![(1.0, 2.0), (3.0, 4.0), (5.0, 6.0)]);
    assert_eq!(bins, vec![Some(0), Some(0), Some(1), Some(1), Some(2), Some(2)]);
    assert_eq!(separation_measure(merger.intervals()), 2);
    assert_eq!(merger.count_separated_pairs(&values, &labels).unwrap(), 8);
}

#[test]
fn forced_merges_pick_the_lowest_index_on_ties() {
    let values = [1.0, 2.0, 3.0, 4.0];
    let labels = ["a", "b", "a", "b"];
    let mut merger = IntervalMerger::new(2).unwrap();
    merger.fit(&values, &labels).unwrap();
    assert_eq!(merger.bins(), vec![(1.0, 3.0), (4.0, 4.0)]);
}

#[test]
fn one_bin_separates_nothing() {
    let values = [1.0, 2.0, 3.0, 4.0];
    let labels = ["a", "b", "a", "b"];
    let mut merger = IntervalMerger::new(1).unwrap();
    merger.fit(&values, &labels).unwrap();
    assert_eq!(merger.bins(), vec![(1.0, 4.0)]);
    assert_eq!(merger.count_separated_pairs(&values, &labels).unwrap(), 0);
}

#[test]
fn values_between_bins_are_unassigned() {
    let mut merger = IntervalMerger::new(2).unwrap();
    merger.fit(&[1.0, 2.0, 5.0, 6.0], &["a", "a", "b", "b"]).unwrap();
    assert_eq!(
        merger.transform(&[1.5, 3.0, 5.0, 7.0]).unwrap(),
        vec![Some(0), None, Some(1), None]
    );
}

#[test]
fn transform_requires_fit() {
    let merger = IntervalMerger::new(2).unwrap();
    assert!(matches!(
        merger.transform(&[1.0]),
        Err(DiscretizeError::NotFitted)
    ));
}

#[test]
fn invalid_inputs_are_rejected() {
    let mut merger = IntervalMerger::new(2).unwrap();
    assert!(merger.fit(&[1.0, 2.0], &["a"]).is_err());
    assert!(merger.fit::<&str>(&[], &[]).is_err());
    assert!(merger.fit(&[1.0, f64::NAN], &["a", "b"]).is_err());
}

#[test]
fn merge_loss_matches_full_recount() {
    let mut rng = StdRng::seed_from_u64(17);
    for _ in 0..20 {
        let n = rng.random_range(2..30);
        let values: Vec<f64> = (0..n).map(|_| rng.random_range(0..12) as f64).collect();
        let labels: Vec<String> = (0..n).map(|_| format!("{}", rng.random_range(0..3))).collect();

        let mut merger = IntervalMerger::new(usize::MAX).unwrap();
        let intervals = merger.fit(&values, &labels).unwrap().to_vec();
        let before = separation_measure(&intervals);
        for idx in 0..intervals.len().saturating_sub(1) {
            let mut merged = intervals.clone();
            let joined = merged[idx].merge(&merged[idx + 1]);
            merged.splice(idx..idx + 2, std::iter::once(joined));
            assert_eq!(
                merge_loss(&intervals, idx),
                before - separation_measure(&merged),
                "pair {} of {:?}",
                idx,
                intervals.iter().map(|iv| (iv.start, iv.end)).collect::<Vec<_>>()
            );
        }
    }
}

#[test]
fn merge_loss_on_multi_point_runs() {
    let mut rng = StdRng::seed_from_u64(23);
    for _ in 0..20 {
        let n = rng.random_range(10..60);
        let values: Vec<f64> = (0..n).map(|_| rng.random_range(0..40) as f64).collect();
        let labels: Vec<String> = (0..n).map(|_| format!("{}", rng.random_range(0..2))).collect();

        let mut merger = IntervalMerger::new(4).unwrap();
        let intervals = merger.fit(&values, &labels).unwrap().to_vec();
        let before = separation_measure(&intervals);
        for idx in 0..intervals.len().saturating_sub(1) {
            let mut merged = intervals.clone();
            let joined = merged[idx].merge(&merged[idx + 1]);
            merged.splice(idx..idx + 2, std::iter::once(joined));
            assert_eq!(merge_loss(&intervals, idx), before - separation_measure(&merged));
        }
    }
}
