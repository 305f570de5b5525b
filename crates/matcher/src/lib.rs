//! Duplicate-pair detection and clustering over file signatures.
//!
//! Two paths to the same answer:
//!
//! - **Exact**: Jaccard similarity over every unordered signature pair.
//!   Correct and simple, but O(n²) comparisons.
//! - **Prefiltered**: MinHash sketches are banded with LSH to propose a
//!   reduced candidate set, and only candidates are exactly compared. For
//!   small corpora an identical-shingle-set safety net guarantees that true
//!   exact duplicates can never be missed, whatever the banding parameters.
//!
//! Either way the confirmed pairs come out in a deterministic order
//! (similarity descending, then paths), and [`build_clusters`] folds them
//! into connected components with a canonical representative.
//!
//! Configuration problems (bad band counts, oversized sketches) fail up
//! front with [`MatchError`]; an empty result always means "no duplicates",
//! never "something went wrong halfway".

mod cluster;
mod engine;
mod types;

pub use crate::cluster::build_clusters;
pub use crate::engine::{find_duplicates, jaccard};
pub use crate::types::{
    Cluster, DuplicatePair, MatchConfig, MatchError, DEFAULT_EXACT_FALLBACK_LIMIT,
    DEFAULT_LSH_BANDS, DEFAULT_MINHASH_PERMS, DEFAULT_THRESHOLD,
};
