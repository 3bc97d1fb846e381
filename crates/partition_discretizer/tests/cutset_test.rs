use partition_discretizer::cutset::{CutSet, bucket_index};
use partition_discretizer::dataset::Dataset;
use partition_discretizer::error::DiscretizeError;

#[test]
fn bucket_index_is_right_closed() {
    let cuts = [1.0, 2.0, 3.0];
    assert_eq!(bucket_index(&cuts, 0.5), 0);
    assert_eq!(bucket_index(&cuts, 1.0), 0, "a value on a cut belongs to the bucket it closes");
    assert_eq!(bucket_index(&cuts, 1.5), 1);
    assert_eq!(bucket_index(&cuts, 3.0), 2);
    assert_eq!(bucket_index(&cuts, 3.5), 3);
    assert_eq!(bucket_index(&[], 42.0), 0);
}

#[test]
fn insert_keeps_cuts_sorted_and_unique() {
    let mut cut_set = CutSet::new(2);
    assert!(cut_set.insert(0, 5.0));
    assert!(cut_set.insert(0, 1.0));
    assert!(cut_set.insert(0, 3.0));
    assert!(!cut_set.insert(0, 3.0), "duplicate insert must be refused");

    assert_eq!(cut_set.cuts(0), &[1.0, 3.0, 5.0]);
    assert!(cut_set.cuts(1).is_empty());
    assert_eq!(cut_set.total_cuts(), 3);
    assert!(cut_set.contains(0, 3.0));
    assert!(!cut_set.contains(1, 3.0));
}

#[test]
fn with_cut_leaves_the_original_untouched() {
    let base = CutSet::new(1);
    let next = base.with_cut(0, 2.5);
    assert!(base.is_empty());
    assert_eq!(next.cuts(0), &[2.5]);
}

#[test]
fn from_cuts_rejects_unsorted_lists() {
    assert!(CutSet::from_cuts(vec![vec![1.0, 2.0], vec![]]).is_ok());
    let err = CutSet::from_cuts(vec![vec![2.0, 1.0]]).unwrap_err();
    assert!(matches!(err, DiscretizeError::InvalidParameter(_)));
    assert!(CutSet::from_cuts(vec![vec![1.0, 1.0]]).is_err());
    assert!(CutSet::from_cuts(vec![vec![f64::NAN]]).is_err());
}

#[test]
fn neighbors_skip_the_threshold_itself() {
    let cut_set = CutSet::from_cuts(vec![vec![1.0, 3.0, 5.0]]).unwrap();
    assert_eq!(cut_set.neighbors(0, 2.0), (Some(1.0), Some(3.0)));
    assert_eq!(cut_set.neighbors(0, 3.0), (Some(1.0), Some(5.0)));
    assert_eq!(cut_set.neighbors(0, 0.0), (None, Some(1.0)));
    assert_eq!(cut_set.neighbors(0, 9.0), (Some(5.0), None));
}

#[test]
fn partition_keys_follow_the_cuts() {
    let dataset = Dataset::from_rows(
        &[
            vec![1.0, 10.0],
            vec![2.0, 20.0],
            vec![3.0, 10.0],
            vec![4.0, 20.0],
        ],
        &["A", "A", "B", "B"],
    )
    .unwrap();
    let cut_set = CutSet::from_cuts(vec![vec![2.5], vec![15.0]]).unwrap();

    let keys = cut_set.partition_keys(&dataset).unwrap();
    assert_eq!(keys, vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]]);
    assert_eq!(cut_set.partition_key(&[2.5, 15.0]).unwrap(), vec![0, 0]);
    assert_eq!(cut_set.attribute_buckets(&dataset, 0), vec![0, 0, 1, 1]);

    // Every component stays within [0, len(cuts)]
    for key in &keys {
        for (attr, &bucket) in key.iter().enumerate() {
            assert!(bucket as usize <= cut_set.cuts(attr).len());
        }
    }
}

#[test]
fn partition_key_checks_width() {
    let cut_set = CutSet::new(2);
    let err = cut_set.partition_key(&[1.0]).unwrap_err();
    assert!(matches!(
        err,
        DiscretizeError::DimensionMismatch {
            expected: 2,
            got: 1
        }
    ));
}

#[test]
fn json_export_round_trips() {
    let cut_set = CutSet::from_cuts(vec![vec![-1.5, 2.5], vec![], vec![0.000001]]).unwrap();
    let json = cut_set.to_json().unwrap();
    assert!(json.contains("cuts"));
    assert_eq!(CutSet::from_json(&json).unwrap(), cut_set);

    assert!(CutSet::from_json(r#"{"cuts": [[3.0, 1.0]]}"#).is_err());
}
