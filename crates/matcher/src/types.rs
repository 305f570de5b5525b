use std::path::PathBuf;

use thiserror::Error;

use ingest::FileSignature;
use perceptual::{PerceptualError, SALT_TABLE_LEN};

/// Default similarity threshold for confirming a duplicate pair.
pub const DEFAULT_THRESHOLD: f64 = 0.85;
/// Default MinHash sketch length for the prefilter.
pub const DEFAULT_MINHASH_PERMS: usize = 64;
/// Default LSH band count for the prefilter.
pub const DEFAULT_LSH_BANDS: usize = 8;
/// Default corpus-size cutoff for the identical-shingle-set safety net.
pub const DEFAULT_EXACT_FALLBACK_LIMIT: usize = 50;

/// Configuration for one duplicate-detection run.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchConfig {
    /// Pairs at or above this similarity are reported. Out-of-range values
    /// are accepted: a negative threshold reports every pair and a
    /// threshold above 1.0 reports none.
    pub threshold: f64,
    /// Route comparisons through the MinHash/LSH prefilter instead of
    /// comparing every pair exactly.
    pub prefilter: bool,
    /// Sketch length used by the prefilter.
    pub minhash_perms: usize,
    /// Band count used by the prefilter.
    pub lsh_bands: usize,
    /// Corpora of at most this many signatures additionally promote every
    /// identical-shingle-set pair to candidate status, making the prefilter
    /// lossless for true exact duplicates. Larger corpora skip that pass
    /// for scalability.
    pub exact_fallback_limit: usize,
}

impl MatchConfig {
    /// Create a new configuration with the default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the similarity threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Enable or disable the MinHash/LSH prefilter.
    pub fn with_prefilter(mut self, prefilter: bool) -> Self {
        self.prefilter = prefilter;
        self
    }

    /// Set the MinHash sketch length. Must be 1..=[`SALT_TABLE_LEN`].
    pub fn with_minhash_perms(mut self, perms: usize) -> Self {
        self.minhash_perms = perms;
        self
    }

    /// Set the LSH band count. Must be 1..=`minhash_perms`.
    pub fn with_lsh_bands(mut self, bands: usize) -> Self {
        self.lsh_bands = bands;
        self
    }

    /// Set the safety-net corpus-size cutoff.
    pub fn with_exact_fallback_limit(mut self, limit: usize) -> Self {
        self.exact_fallback_limit = limit;
        self
    }

    /// Validates the prefilter parameters.
    ///
    /// Only meaningful when the prefilter is enabled; the exact path has no
    /// parameters that can be mis-set.
    pub fn validate(&self) -> Result<(), MatchError> {
        if !self.prefilter {
            return Ok(());
        }
        if self.minhash_perms == 0 || self.minhash_perms > SALT_TABLE_LEN {
            return Err(MatchError::InvalidConfig(format!(
                "minhash_perms must be 1..={SALT_TABLE_LEN} (got {})",
                self.minhash_perms
            )));
        }
        if self.lsh_bands == 0 || self.lsh_bands > self.minhash_perms {
            return Err(MatchError::InvalidConfig(format!(
                "lsh_bands must be 1..={} (got {})",
                self.minhash_perms, self.lsh_bands
            )));
        }
        Ok(())
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            prefilter: false,
            minhash_perms: DEFAULT_MINHASH_PERMS,
            lsh_bands: DEFAULT_LSH_BANDS,
            exact_fallback_limit: DEFAULT_EXACT_FALLBACK_LIMIT,
        }
    }
}

/// A confirmed duplicate pair: two signatures whose Jaccard similarity met
/// the configured threshold.
#[derive(Debug, Clone, Copy)]
pub struct DuplicatePair<'a> {
    /// Jaccard similarity of the two shingle sets, in [0, 1].
    pub similarity: f64,
    pub a: &'a FileSignature,
    pub b: &'a FileSignature,
}

/// A connected component of the duplicate-pair graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    /// Lexicographically smallest member path.
    pub representative: PathBuf,
    /// All member paths, ascending.
    pub members: Vec<PathBuf>,
    /// Member count.
    pub size: usize,
    /// Maximum edge similarity touching any member.
    pub max_similarity: f64,
}

/// Errors produced by duplicate detection.
#[derive(Debug, Error)]
pub enum MatchError {
    /// Invalid configuration, caught before any comparison runs.
    #[error("invalid match config: {0}")]
    InvalidConfig(String),
    /// The perceptual stage rejected the sketch or banding parameters.
    #[error("prefilter failed: {0}")]
    Prefilter(#[from] PerceptualError),
}
