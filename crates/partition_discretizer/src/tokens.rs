//! Greedy selection over an already discretized table.
//!
//! Every attribute holds string tokens, typically interval labels. A candidate
//! is an (attribute, token) pair. Once selected, examples carrying that token
//! keep it in their key; every other example of the attribute is keyed as
//! `ALL`.

use crate::conf::{ALL_TOKEN, DiscretizerConfig};
use crate::dataset::{DiscretizerFrameExt, LabelCode, ordered_label_codes};
use crate::error::{DiscretizeError, Result};
use crate::score::SeparationScorer;
use crate::selector::ConvergenceReason;
use polars::prelude::*;
use rayon::prelude::*;
use std::collections::HashSet;

/// Key component of an unselected token.
const ALL_CODE: u32 = 0;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenCut {
    pub attribute: usize,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TokenRecord {
    pub round: usize,
    pub cut: TokenCut,
    pub gain: u64,
    pub score: u64,
}

/// Token columns encoded per attribute; code 0 is reserved for `ALL`.
struct EncodedTokens {
    codes: Vec<Vec<u32>>,
    vocab: Vec<Vec<String>>,
    labels: Vec<LabelCode>,
    n_labels: usize,
}

impl EncodedTokens {
    fn new<S: AsRef<str>>(columns: &[Vec<String>], labels: &[S]) -> Result<Self> {
        if columns.is_empty() {
            return Err(DiscretizeError::InvalidDataset(
                "table needs at least one attribute column and a label column".to_string(),
            ));
        }
        if labels.len() < 2 {
            return Err(DiscretizeError::InvalidDataset(format!(
                "table needs at least two rows, got {}",
                labels.len()
            )));
        }
        let mut codes = Vec::with_capacity(columns.len());
        let mut vocab = Vec::with_capacity(columns.len());
        for (attr, column) in columns.iter().enumerate() {
            if column.len() != labels.len() {
                return Err(DiscretizeError::InvalidDataset(format!(
                    "attribute {} has {} tokens but there are {} labels",
                    attr,
                    column.len(),
                    labels.len()
                )));
            }
            let (column_codes, names) = ordered_label_codes(column.iter());
            codes.push(column_codes.into_iter().map(|c| c + 1).collect());
            vocab.push(names);
        }
        let (labels, label_names) = ordered_label_codes(labels.iter());
        Ok(Self {
            codes,
            vocab,
            labels,
            n_labels: label_names.len(),
        })
    }

    fn keys(&self, selected: &[HashSet<u32>]) -> Vec<Vec<u32>> {
        let n_rows = self.labels.len();
        (0..n_rows)
            .map(|row| {
                self.codes
                    .iter()
                    .zip(selected.iter())
                    .map(|(column, chosen)| {
                        let code = column[row];
                        if chosen.contains(&code) { code } else { ALL_CODE }
                    })
                    .collect()
            })
            .collect()
    }
}

pub struct TokenSelector {
    pub config: DiscretizerConfig,
    selected: Vec<TokenCut>,
    history: Vec<TokenRecord>,
    score: u64,
    reason: Option<ConvergenceReason>,
}

impl Default for TokenSelector {
    fn default() -> Self {
        Self::new(DiscretizerConfig::default())
    }
}

impl TokenSelector {
    pub fn new(config: DiscretizerConfig) -> Self {
        Self {
            config,
            selected: Vec::new(),
            history: Vec::new(),
            score: 0,
            reason: None,
        }
    }

    /// Fit on token columns (one `Vec<String>` per attribute) and labels.
    pub fn fit<S: AsRef<str>>(&mut self, columns: &[Vec<String>], labels: &[S]) -> Result<&[TokenCut]> {
        let encoded = EncodedTokens::new(columns, labels)?;
        let strategy = self
            .config
            .scoring
            .resolve(encoded.labels.len(), self.config.brute_force_max_rows);
        let scorer = SeparationScorer::from_parts(strategy, encoded.n_labels);

        let mut pool: Vec<(TokenCut, u32)> = encoded
            .vocab
            .iter()
            .enumerate()
            .flat_map(|(attr, names)| {
                names.iter().enumerate().map(move |(pos, token)| {
                    (
                        TokenCut {
                            attribute: attr,
                            token: token.clone(),
                        },
                        pos as u32 + 1,
                    )
                })
            })
            .collect();
        pool.sort_by(|a, b| a.0.cmp(&b.0));

        let mut selected: Vec<HashSet<u32>> = vec![HashSet::new(); encoded.codes.len()];
        let mut score = scorer.score(&encoded.keys(&selected), &encoded.labels);
        self.history.clear();
        self.selected.clear();

        let mut round = 0usize;
        let reason = loop {
            if pool.is_empty() {
                break ConvergenceReason::CandidatesExhausted;
            }
            if self.config.max_rounds.is_some_and(|max| round >= max) {
                break ConvergenceReason::IterationLimit;
            }

            let gain_of = |(cut, code): &(TokenCut, u32)| -> u64 {
                let mut trial = selected.clone();
                trial[cut.attribute].insert(*code);
                let after = scorer.score(&encoded.keys(&trial), &encoded.labels);
                after.saturating_sub(score)
            };
            let gains: Vec<u64> = if self.config.parallel {
                pool.par_iter().map(gain_of).collect()
            } else {
                pool.iter().map(gain_of).collect()
            };

            let mut best: Option<(usize, u64)> = None;
            for (idx, &gain) in gains.iter().enumerate() {
                if gain > best.map_or(0, |(_, g)| g) {
                    best = Some((idx, gain));
                }
            }
            let Some((idx, gain)) = best else {
                break ConvergenceReason::NoPositiveGain;
            };

            let (cut, code) = pool.remove(idx);
            selected[cut.attribute].insert(code);
            score += gain;
            round += 1;
            log::info!(
                "round {}: added token '{}' on attribute {}, separated pairs: {}",
                round,
                cut.token,
                cut.attribute,
                score
            );
            self.history.push(TokenRecord {
                round,
                cut: cut.clone(),
                gain,
                score,
            });
            self.selected.push(cut);
        };

        log::debug!("token selection converged: {}", reason);
        self.score = score;
        self.reason = Some(reason);
        Ok(&self.selected)
    }

    /// Fit on a frame whose last column holds the class label.
    pub fn fit_dataframe(&mut self, df: &DataFrame) -> Result<&[TokenCut]> {
        let names = df.column_names_vec();
        let Some((label_name, attribute_names)) = names.split_last() else {
            return Err(DiscretizeError::InvalidDataset("table has no columns".to_string()));
        };
        let columns = attribute_names
            .iter()
            .map(|name| df.token_column_values(name))
            .collect::<Result<Vec<_>>>()?;
        let labels = df.token_column_values(label_name)?;
        self.fit(&columns, &labels)
    }

    pub fn selected(&self) -> &[TokenCut] {
        &self.selected
    }

    pub fn is_selected(&self, attribute: usize, token: &str) -> bool {
        self.selected
            .iter()
            .any(|cut| cut.attribute == attribute && cut.token == token)
    }

    pub fn history(&self) -> &[TokenRecord] {
        &self.history
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn convergence(&self) -> Option<ConvergenceReason> {
        self.reason
    }

    /// Each token if its (attribute, token) pair was selected, `ALL` otherwise.
    pub fn transform(&self, columns: &[Vec<String>]) -> Result<Vec<Vec<String>>> {
        if self.reason.is_none() {
            return Err(DiscretizeError::NotFitted);
        }
        Ok(columns
            .iter()
            .enumerate()
            .map(|(attr, column)| {
                column
                    .iter()
                    .map(|token| {
                        if self.is_selected(attr, token) {
                            token.clone()
                        } else {
                            ALL_TOKEN.to_string()
                        }
                    })
                    .collect()
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unselected_tokens_share_the_all_key() {
        let columns = vec![vec!["a".to_string(), "b".to_string(), "c".to_string()]];
        let encoded = EncodedTokens::new(&columns, &["x", "y", "y"]).unwrap();
        assert!(encoded.codes[0].iter().all(|&c| c != ALL_CODE));

        let mut selected = vec![HashSet::new()];
        selected[0].insert(encoded.codes[0][0]);
        let keys = encoded.keys(&selected);
        assert_ne!(keys[0], keys[1]);
        assert_eq!(keys[1], keys[2], "tokens b and c both collapse into ALL");
    }
}
