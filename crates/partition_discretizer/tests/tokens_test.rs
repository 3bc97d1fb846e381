use partition_discretizer::conf::{ALL_TOKEN, DiscretizerConfig};
use partition_discretizer::selector::ConvergenceReason;
use partition_discretizer::tokens::{TokenCut, TokenSelector};
use polars::prelude::*;

fn strings(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}

fn interval_table() -> (Vec<Vec<String>>, Vec<&'static str>) {
    let columns = vec![
        strings(&["(-inf; 2.5]", "(-inf; 2.5]", "(2.5; inf)", "(2.5; inf)"]),
        strings(&["x", "y", "x", "y"]),
    ];
    (columns, vec!["A", "A", "B", "B"])
}

#[test]
fn best_token_is_selected_first() {
    let (columns, labels) = interval_table();
    let mut selector = TokenSelector::default();
    let selected = selector.fit(&columns, &labels).unwrap().to_vec();

    assert_eq!(
        selected,
        vec![TokenCut {
            attribute: 0,
            token: "(-inf; 2.5]".to_string()
        }]
    );
    assert_eq!(selector.score(), 4);
    assert_eq!(
        selector.convergence(),
        Some(ConvergenceReason::NoPositiveGain)
    );
}

#[test]
fn unselected_tokens_become_all() {
    let (columns, labels) = interval_table();
    let mut selector = TokenSelector::default();
    selector.fit(&columns, &labels).unwrap();

    let out = selector.transform(&columns).unwrap();
    assert_eq!(
        out[0],
        strings(&["(-inf; 2.5]", "(-inf; 2.5]", ALL_TOKEN, ALL_TOKEN])
    );
    assert!(out[1].iter().all(|t| t == ALL_TOKEN));
}

#[test]
fn single_label_selects_nothing() {
    let columns = vec![strings(&["p", "q", "r"])];
    let mut selector = TokenSelector::default();
    assert!(selector.fit(&columns, &["z", "z", "z"]).unwrap().is_empty());
    assert_eq!(selector.score(), 0);
}

#[test]
fn history_scores_accumulate() {
    let columns = vec![strings(&["p", "q", "r", "p", "q", "r"])];
    let labels = ["a", "b", "c", "a", "b", "c"];
    let mut selector = TokenSelector::default();
    selector.fit(&columns, &labels).unwrap();

    let mut previous = 0;
    for record in selector.history() {
        assert!(record.gain > 0);
        assert_eq!(record.score, previous + record.gain);
        previous = record.score;
    }
    // Two selected tokens already isolate all three classes
    assert_eq!(selector.score(), 12);
    assert_eq!(selector.history().len(), 2);
    assert_eq!(selector.history()[0].cut.token, "p");
}

#[test]
fn round_cap_and_parallel_evaluation() {
    let columns = vec![strings(&["p", "q", "r", "p", "q", "r"])];
    let labels = ["a", "b", "c", "a", "b", "c"];

    let mut capped = TokenSelector::new(DiscretizerConfig::default().with_max_rounds(Some(1)));
    capped.fit(&columns, &labels).unwrap();
    assert_eq!(capped.selected().len(), 1);
    assert_eq!(capped.convergence(), Some(ConvergenceReason::IterationLimit));

    let mut sequential = TokenSelector::default();
    let mut parallel = TokenSelector::new(DiscretizerConfig::default().with_parallel(true));
    assert_eq!(
        sequential.fit(&columns, &labels).unwrap().to_vec(),
        parallel.fit(&columns, &labels).unwrap().to_vec()
    );
}

#[test]
fn fit_from_a_discretized_frame() {
    let df = DataFrame::new(vec![
        Column::new("x1".into(), ["(-inf; 1]", "(1; inf)", "(1; inf)"]),
        Column::new("class".into(), ["no", "yes", "yes"]),
    ])
    .unwrap();
    let mut selector = TokenSelector::default();
    let selected = selector.fit_dataframe(&df).unwrap();
    assert_eq!(selected.len(), 1);
    assert!(selector.is_selected(0, "(-inf; 1]"));
}

#[test]
fn transform_requires_fit() {
    let selector = TokenSelector::default();
    assert!(selector.transform(&[strings(&["p"])]).is_err());
}
