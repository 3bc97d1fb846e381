use estimators::api::{FitError, TransformError, Transformer};
use partition_discretizer::conf::DiscretizerConfig;
use partition_discretizer::estimator::PartitionDiscretizer;
use polars::prelude::*;

fn frames() -> (DataFrame, DataFrame) {
    let x = DataFrame::new(vec![
        Column::new("x1".into(), vec![1.0, 2.0, 3.0, 4.0]),
        Column::new("x2".into(), vec![10.0, 10.0, 20.0, 20.0]),
    ])
    .unwrap();
    let y = DataFrame::new(vec![Column::new("target".into(), ["A", "A", "B", "B"])]).unwrap();
    (x, y)
}

#[test]
fn fit_transform_returns_interval_labels() {
    let (x, y) = frames();
    let mut model = PartitionDiscretizer::new(DiscretizerConfig::default());
    let out = model.fit_transform(&x, &y).unwrap();

    assert_eq!(out.shape(), (4, 2));
    let x1: Vec<&str> = out.column("x1").unwrap().str().unwrap().into_no_null_iter().collect();
    assert_eq!(x1, vec!["(-inf; 2.5]", "(-inf; 2.5]", "(2.5; inf)", "(2.5; inf)"]);
    assert_eq!(model.score(), 4);
    assert_eq!(model.history().len(), 1);
    assert!(model.fit_status().starts_with("CONVERGED"));

    let keys = model.apply(&x, &y).unwrap();
    assert_eq!(keys, vec![vec![0, 0], vec![0, 0], vec![1, 0], vec![1, 0]]);
}

#[test]
fn transform_before_fit_fails() {
    let (x, _) = frames();
    let model = PartitionDiscretizer::default();
    assert!(matches!(model.transform(&x), Err(TransformError::NotFitted)));
    assert_eq!(model.selection_summary(), "Discretizer not fitted");
}

#[test]
fn transform_checks_feature_names() {
    let (x, y) = frames();
    let mut model = PartitionDiscretizer::default();
    model.fit(&x, &y).unwrap();

    let renamed = DataFrame::new(vec![
        Column::new("x1".into(), vec![1.0]),
        Column::new("other".into(), vec![1.0]),
    ])
    .unwrap();
    assert!(matches!(
        model.transform(&renamed),
        Err(TransformError::InvalidInput(_))
    ));
}

#[test]
fn fit_rejects_mismatched_heights() {
    let (x, _) = frames();
    let y = DataFrame::new(vec![Column::new("target".into(), ["A", "B"])]).unwrap();
    let mut model = PartitionDiscretizer::default();
    match model.fit(&x, &y).unwrap_err() {
        FitError::InvalidInput(msg) => assert!(!msg.is_empty()),
        FitError::Transform(err) => panic!("unexpected transform error {:?}", err),
    }
    assert!(model.cut_set().is_none());
}
