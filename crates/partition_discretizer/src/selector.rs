//! Greedy forward selection of cuts.
//!
//! Each round evaluates every remaining candidate against the current cut set
//! and commits the single one with the largest positive gain. Ties go to the
//! lowest attribute index, then the lowest threshold. The loop never removes a
//! committed cut.

use crate::candidates::{Candidate, candidate_pool, generate_candidates};
use crate::conf::{DiscretizerConfig, GainMode};
use crate::cutset::CutSet;
use crate::dataset::Dataset;
use crate::error::{DiscretizeError, Result};
use crate::gain::GainEvaluator;
use crate::rules::Interval;
use crate::score::{SeparationScorer, weighted_purity};
use crate::transform::transform_dataset;
use core::fmt;
use rayon::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvergenceReason {
    NoPositiveGain,
    CandidatesExhausted,
    IterationLimit,
}

impl fmt::Display for ConvergenceReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvergenceReason::NoPositiveGain => write!(f, "no candidate with positive gain"),
            ConvergenceReason::CandidatesExhausted => write!(f, "candidate pool exhausted"),
            ConvergenceReason::IterationLimit => write!(f, "iteration limit"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorState {
    Unfitted,
    Searching,
    Converged(ConvergenceReason),
}

// Record of one committed cut
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionRecord {
    pub round: usize,
    pub candidate: Candidate,
    pub gain: u64,
    /// Cumulative separation score after the cut.
    pub score: u64,
    pub purity: f64,
}

pub struct GreedyDiscretizer {
    pub config: DiscretizerConfig,
    candidates: Vec<Vec<f64>>,
    cut_set: Option<CutSet>,
    attribute_names: Vec<String>,
    score: u64,
    history: Vec<SelectionRecord>,
    state: SelectorState,
}

impl Default for GreedyDiscretizer {
    fn default() -> Self {
        Self::new(DiscretizerConfig::default())
    }
}

/// Index of the strictly greatest positive gain; the first one wins ties.
fn best_candidate(gains: &[u64]) -> Option<usize> {
    let mut best: Option<(usize, u64)> = None;
    for (idx, &gain) in gains.iter().enumerate() {
        if gain == 0 {
            continue;
        }
        match best {
            Some((_, best_gain)) if gain <= best_gain => {}
            _ => best = Some((idx, gain)),
        }
    }
    best.map(|(idx, _)| idx)
}

impl GreedyDiscretizer {
    pub fn new(config: DiscretizerConfig) -> Self {
        Self {
            config,
            candidates: Vec::new(),
            cut_set: None,
            attribute_names: Vec::new(),
            score: 0,
            history: Vec::new(),
            state: SelectorState::Unfitted,
        }
    }

    /// Drop every fitted result and return to `Unfitted`.
    pub fn reset(&mut self) {
        self.candidates.clear();
        self.cut_set = None;
        self.attribute_names.clear();
        self.score = 0;
        self.history.clear();
        self.state = SelectorState::Unfitted;
    }

    /// Fit the cut set on `dataset`. Any previous fit is discarded, also when
    /// this one fails.
    pub fn fit(&mut self, dataset: &Dataset) -> Result<&CutSet> {
        self.reset();
        self.state = SelectorState::Searching;
        self.attribute_names = dataset.attribute_names().to_vec();

        let scorer = SeparationScorer::new(
            self.config.scoring,
            dataset,
            self.config.brute_force_max_rows,
        );
        self.candidates = generate_candidates(dataset);
        let mut pool = candidate_pool(&self.candidates);
        let mut cut_set = CutSet::new(dataset.n_attributes());
        let mut score = scorer.full_score(dataset, &cut_set)?;

        log::debug!(
            "fitting on {} rows x {} attributes, {} candidates, scoring {:?}",
            dataset.n_rows(),
            dataset.n_attributes(),
            pool.len(),
            scorer.strategy()
        );

        let mut round = 0usize;
        let reason = loop {
            if pool.is_empty() {
                break ConvergenceReason::CandidatesExhausted;
            }
            if self.config.max_rounds.is_some_and(|max| round >= max) {
                break ConvergenceReason::IterationLimit;
            }

            let gains = self.evaluate_round(dataset, &cut_set, &pool, &scorer)?;
            let Some(best_idx) = best_candidate(&gains) else {
                break ConvergenceReason::NoPositiveGain;
            };

            let gain = gains[best_idx];
            let candidate = pool.remove(best_idx);
            cut_set.insert(candidate.attribute, candidate.threshold);
            score += gain;
            round += 1;

            let keys = cut_set.partition_keys(dataset)?;
            let purity = weighted_purity(&keys, dataset.labels(), dataset.n_labels());
            log::info!(
                "round {}: added cut {} on '{}', separated pairs: {}, purity: {:.4}",
                round,
                candidate.threshold,
                dataset.attribute_names()[candidate.attribute],
                score,
                purity
            );
            self.history.push(SelectionRecord {
                round,
                candidate,
                gain,
                score,
                purity,
            });
        };

        log::debug!(
            "converged after {} round(s): {}; {} cut(s), score {}",
            round,
            reason,
            cut_set.total_cuts(),
            score
        );

        self.state = SelectorState::Converged(reason);
        self.score = score;
        Ok(self.cut_set.insert(cut_set))
    }

    fn evaluate_round(
        &self,
        dataset: &Dataset,
        cut_set: &CutSet,
        pool: &[Candidate],
        scorer: &SeparationScorer,
    ) -> Result<Vec<u64>> {
        match self.config.gain_mode {
            GainMode::Incremental => {
                let evaluator = GainEvaluator::new(dataset, cut_set)?;
                let gains = if self.config.parallel {
                    pool.par_iter().map(|c| evaluator.gain(c)).collect()
                } else {
                    pool.iter().map(|c| evaluator.gain(c)).collect()
                };
                Ok(gains)
            }
            GainMode::FullRecompute => {
                let base = scorer.full_score(dataset, cut_set)?;
                let gain_of = |c: &Candidate| -> Result<u64> {
                    let after =
                        scorer.full_score(dataset, &cut_set.with_cut(c.attribute, c.threshold))?;
                    Ok(after.saturating_sub(base))
                };
                if self.config.parallel {
                    pool.par_iter().map(gain_of).collect()
                } else {
                    pool.iter().map(gain_of).collect()
                }
            }
        }
    }

    pub fn is_fitted(&self) -> bool {
        self.cut_set.is_some()
    }

    pub fn cut_set(&self) -> Option<&CutSet> {
        self.cut_set.as_ref()
    }

    /// Candidate thresholds generated by the last fit, per attribute.
    pub fn candidates(&self) -> &[Vec<f64>] {
        &self.candidates
    }

    /// Cumulative separation score of the fitted cut set.
    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn history(&self) -> &[SelectionRecord] {
        &self.history
    }

    pub fn state(&self) -> SelectorState {
        self.state
    }

    /// Interval of every attribute for every row of `dataset`.
    pub fn transform(&self, dataset: &Dataset) -> Result<Vec<Vec<Interval>>> {
        let cut_set = self.cut_set.as_ref().ok_or(DiscretizeError::NotFitted)?;
        transform_dataset(dataset, cut_set)
    }

    pub fn selection_summary(&self) -> String {
        let mut info = String::new();

        info.push_str("=== Cut Selection Summary ===\n");
        match self.state {
            SelectorState::Converged(reason) => {
                info.push_str(&format!("Status: converged ({})\n", reason))
            }
            other => info.push_str(&format!("Status: {:?}\n", other)),
        }
        info.push_str(&format!("Rounds: {}\n", self.history.len()));
        info.push_str(&format!("Separated pairs: {}\n", self.score));

        if let Some(cut_set) = &self.cut_set {
            info.push_str(&format!("Total cuts: {}\n", cut_set.total_cuts()));
            for (attr, cuts) in cut_set.all_cuts().iter().enumerate() {
                let name = self
                    .attribute_names
                    .get(attr)
                    .cloned()
                    .unwrap_or_else(|| format!("x{}", attr + 1));
                info.push_str(&format!("  {}: {:?}\n", name, cuts));
            }
        }

        if !self.history.is_empty() {
            info.push_str("\nSelection details:\n");
            for record in &self.history {
                info.push_str(&format!(
                    "  {}. {} | gain: {}, score: {}, purity: {:.4}\n",
                    record.round, record.candidate, record.gain, record.score, record.purity
                ));
            }
        }
        info
    }
}
