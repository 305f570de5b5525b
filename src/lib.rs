//! Workspace umbrella crate for `dupfinder`.
//!
//! This crate stitches the pipeline stages together so callers can go from a
//! path list to reported duplicate pairs (and optionally clusters) with a
//! single call, and re-exports each stage's public surface for callers that
//! want to drive the stages themselves.
//!
//! Pipeline: paths → signature scan → duplicate pairs → clusters. The stage
//! crates hold the semantics; this crate holds the glue and the stable
//! report-record shapes that serialized output is built from.

pub use canonical::{collapse_whitespace, tokenize};
pub use ingest::{
    compute_signature, scan, FileSignature, ScanConfig, ScanError, SkipReason, DEFAULT_SHINGLE_K,
};
pub use matcher::{
    build_clusters, find_duplicates, jaccard, Cluster, DuplicatePair, MatchConfig, MatchError,
    DEFAULT_EXACT_FALLBACK_LIMIT, DEFAULT_LSH_BANDS, DEFAULT_MINHASH_PERMS, DEFAULT_THRESHOLD,
};
pub use perceptual::{shingle_hashes, PerceptualError, SALT_TABLE_LEN};

pub mod report;

use std::path::PathBuf;

use thiserror::Error;

use crate::report::Report;

/// Errors from the end-to-end pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("signature scan failed: {0}")]
    Scan(#[from] ScanError),
    #[error("duplicate detection failed: {0}")]
    Match(#[from] MatchError),
}

/// Runs the whole pipeline over a prepared path list.
///
/// Scans every path into a signature, finds duplicate pairs, and, when
/// `with_clusters` is set, folds the pairs into clusters. The result holds
/// owned report records, so it outlives the intermediate signatures.
///
/// An empty report is a valid outcome; configuration problems surface as an
/// error before any records are produced.
pub fn run(
    paths: &[PathBuf],
    scan_cfg: &ScanConfig,
    match_cfg: &MatchConfig,
    with_clusters: bool,
) -> Result<Report, PipelineError> {
    let signatures = scan(paths, scan_cfg)?;
    let pairs = find_duplicates(&signatures, match_cfg)?;
    let clusters = with_clusters.then(|| build_clusters(&pairs));
    Ok(Report::new(&pairs, clusters))
}
