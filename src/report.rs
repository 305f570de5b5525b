//! Stable report records and their table/JSON renderings.
//!
//! These shapes are the external contract: internal hash representations may
//! change freely between releases, the records here may not. Every record
//! carries `schema_version` so consumers can detect shape changes.

use std::fmt::Write as _;
use std::path::Path;

use serde::Serialize;

use matcher::{Cluster, DuplicatePair};

/// Version of the serialized record shapes.
pub const REPORT_SCHEMA_VERSION: u32 = 1;

/// One confirmed duplicate pair, ready for serialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairRecord {
    pub schema_version: u32,
    /// Similarity rounded to four decimal places.
    pub similarity: f64,
    pub file_a: String,
    pub file_b: String,
    pub tokens_a: usize,
    pub tokens_b: usize,
}

impl PairRecord {
    fn from_pair(pair: &DuplicatePair<'_>) -> Self {
        Self {
            schema_version: REPORT_SCHEMA_VERSION,
            similarity: round4(pair.similarity),
            file_a: display_path(&pair.a.path),
            file_b: display_path(&pair.b.path),
            tokens_a: pair.a.size,
            tokens_b: pair.b.size,
        }
    }
}

/// One cluster of mutually-connected duplicates, ready for serialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterRecord {
    pub representative: String,
    pub members: Vec<String>,
    pub size: usize,
    /// Maximum pair similarity inside the cluster, rounded to four decimals.
    pub max_similarity: f64,
}

impl ClusterRecord {
    fn from_cluster(cluster: &Cluster) -> Self {
        Self {
            representative: display_path(&cluster.representative),
            members: cluster.members.iter().map(|m| display_path(m)).collect(),
            size: cluster.size,
            max_similarity: round4(cluster.max_similarity),
        }
    }
}

/// Envelope for cluster-mode JSON output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterReport {
    pub schema_version: u32,
    pub mode: &'static str,
    pub clusters: Vec<ClusterRecord>,
}

/// Owned result of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub pairs: Vec<PairRecord>,
    pub clusters: Option<Vec<ClusterRecord>>,
}

impl Report {
    /// Builds owned records from borrowed pipeline output, preserving order.
    pub fn new(pairs: &[DuplicatePair<'_>], clusters: Option<Vec<Cluster>>) -> Self {
        Self {
            pairs: pairs.iter().map(PairRecord::from_pair).collect(),
            clusters: clusters.map(|cs| cs.iter().map(ClusterRecord::from_cluster).collect()),
        }
    }

    /// Cluster records wrapped in the versioned JSON envelope.
    pub fn cluster_report(&self) -> ClusterReport {
        ClusterReport {
            schema_version: REPORT_SCHEMA_VERSION,
            mode: "clusters",
            clusters: self.clusters.clone().unwrap_or_default(),
        }
    }
}

/// Renders the pair table, or the no-duplicates message for empty input.
pub fn render_pair_table(pairs: &[PairRecord]) -> String {
    if pairs.is_empty() {
        return "No duplicates above threshold.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "{:<8} FILE_A | FILE_B", "SIM");
    let _ = writeln!(out, "{}", "-".repeat(80));
    for pair in pairs {
        let _ = writeln!(
            out,
            "{:<8.4} {} | {}",
            pair.similarity, pair.file_a, pair.file_b
        );
    }
    out
}

/// Renders the cluster table, one header row per cluster followed by its
/// members.
pub fn render_cluster_table(clusters: &[ClusterRecord]) -> String {
    if clusters.is_empty() {
        return "No duplicate clusters above threshold.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<11} {:<5} {:<8} REPRESENTATIVE",
        "CLUSTER_ID", "SIZE", "MAX_SIM"
    );
    let _ = writeln!(out, "{}", "-".repeat(80));
    for (id, cluster) in clusters.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:<11} {:<5} {:<8.4} {}",
            id, cluster.size, cluster.max_similarity, cluster.representative
        );
        for member in &cluster.members {
            let _ = writeln!(out, "    {member}");
        }
    }
    out
}

fn display_path(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
