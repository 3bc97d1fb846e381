use serde::{Deserialize, Serialize};

/// Decimal digits kept when a candidate threshold is generated.
pub const THRESHOLD_DECIMALS: i32 = 6;
/// Up to this many rows the `Auto` strategy scores with the pairwise oracle.
pub const DEFAULT_BRUTE_FORCE_MAX_ROWS: usize = 256;
pub const NEG_INF_TOKEN: &str = "-inf";
pub const POS_INF_TOKEN: &str = "inf";
pub const INTERVAL_SEPARATOR: &str = "; ";
/// Key component used by the token selector for unselected tokens.
pub const ALL_TOKEN: &str = "ALL";
/// Prefix of the default output file name, `DISC<input file name>`.
pub const OUTPUT_PREFIX: &str = "DISC";

#[derive(PartialEq, Eq, Debug, Clone, Copy, Serialize, Deserialize)]
pub enum ScoringStrategy {
    /// Enumerate every pair of examples.
    Brute,
    /// Aggregate label counts per partition cell.
    Bucket,
    /// Brute up to `brute_force_max_rows`, bucket beyond.
    Auto,
}

impl ScoringStrategy {
    pub fn resolve(&self, n_rows: usize, brute_force_max_rows: usize) -> ScoringStrategy {
        match self {
            ScoringStrategy::Auto if n_rows <= brute_force_max_rows => ScoringStrategy::Brute,
            ScoringStrategy::Auto => ScoringStrategy::Bucket,
            other => *other,
        }
    }
}

impl std::str::FromStr for ScoringStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "brute" => Ok(ScoringStrategy::Brute),
            "bucket" => Ok(ScoringStrategy::Bucket),
            "auto" => Ok(ScoringStrategy::Auto),
            other => Err(format!("unknown scoring strategy '{other}'")),
        }
    }
}

#[derive(PartialEq, Eq, Debug, Clone, Copy, Serialize, Deserialize)]
pub enum GainMode {
    /// Rescore only the cell a candidate splits.
    Incremental,
    /// Rescore the whole partition with the candidate inserted.
    FullRecompute,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscretizerConfig {
    pub scoring: ScoringStrategy,
    pub gain_mode: GainMode,
    pub brute_force_max_rows: usize,
    /// Optional cap on greedy rounds; hitting it leaves a valid partial cut set.
    pub max_rounds: Option<usize>,
    /// Evaluate candidate gains on the rayon pool.
    pub parallel: bool,
}

impl Default for DiscretizerConfig {
    fn default() -> Self {
        Self {
            scoring: ScoringStrategy::Auto,
            gain_mode: GainMode::Incremental,
            brute_force_max_rows: DEFAULT_BRUTE_FORCE_MAX_ROWS,
            max_rounds: None,
            parallel: false,
        }
    }
}

impl DiscretizerConfig {
    pub fn with_scoring(mut self, scoring: ScoringStrategy) -> Self {
        self.scoring = scoring;
        self
    }

    pub fn with_gain_mode(mut self, gain_mode: GainMode) -> Self {
        self.gain_mode = gain_mode;
        self
    }

    pub fn with_max_rounds(mut self, max_rounds: Option<usize>) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergerConfig {
    pub max_bins: usize,
}

impl Default for MergerConfig {
    fn default() -> Self {
        Self { max_bins: 5 }
    }
}
