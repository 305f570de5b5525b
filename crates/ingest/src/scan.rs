use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

use crate::signature::{compute_signature, FileSignature};

/// Default shingle window size.
pub const DEFAULT_SHINGLE_K: usize = 5;

/// Configuration for a signature scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Tokens per shingle window.
    pub k: usize,
    /// Files with fewer tokens than this are excluded from the result.
    pub min_tokens: usize,
    /// Worker count for the scan. `0` or `1` scans sequentially; anything
    /// larger fans files out across a fixed-size thread pool.
    pub workers: usize,
}

impl ScanConfig {
    /// Create a new configuration with the default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the shingle window size. Typical values: 2-9.
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Set the minimum token count for a file to be included.
    pub fn with_min_tokens(mut self, min_tokens: usize) -> Self {
        self.min_tokens = min_tokens;
        self
    }

    /// Set the worker count. Affects throughput only, never the result.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            k: DEFAULT_SHINGLE_K,
            min_tokens: 0,
            workers: 0,
        }
    }
}

/// Errors that can occur while setting up a scan.
///
/// Per-file problems are never surfaced here; they are skips (see
/// [`SkipReason`](crate::SkipReason)) and only reduce the result set.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("failed to build scan worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

/// Computes a [`FileSignature`] for every readable file in `paths`.
///
/// Files are processed in input order when `cfg.workers <= 1`, or across an
/// isolated thread pool of exactly `cfg.workers` threads otherwise. Workers
/// share no mutable state and the collected output preserves input order,
/// so the included path set and every per-path shingle set are identical at
/// any worker count.
///
/// Unreadable files and files below `cfg.min_tokens` are excluded; neither
/// aborts the scan.
pub fn scan(paths: &[PathBuf], cfg: &ScanConfig) -> Result<Vec<FileSignature>, ScanError> {
    let start = Instant::now();

    let outcomes: Vec<Option<FileSignature>> = if cfg.workers > 1 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(cfg.workers)
            .build()?;
        pool.install(|| paths.par_iter().map(|path| scan_one(path, cfg)).collect())
    } else {
        paths.iter().map(|path| scan_one(path, cfg)).collect()
    };

    let signatures: Vec<FileSignature> = outcomes.into_iter().flatten().collect();

    info!(
        files = paths.len(),
        included = signatures.len(),
        skipped = paths.len() - signatures.len(),
        workers = cfg.workers,
        elapsed_micros = start.elapsed().as_micros() as u64,
        "scan_complete"
    );

    Ok(signatures)
}

/// Scans one file, mapping skips and the minimum-token filter to `None`.
fn scan_one(path: &Path, cfg: &ScanConfig) -> Option<FileSignature> {
    match compute_signature(path, cfg.k) {
        Ok(sig) if sig.size >= cfg.min_tokens => Some(sig),
        Ok(sig) => {
            debug!(
                path = %path.display(),
                tokens = sig.size,
                min_tokens = cfg.min_tokens,
                "scan_below_min_tokens"
            );
            None
        }
        Err(reason) => {
            debug!(path = %path.display(), reason = %reason, "scan_skip");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::fs;

    use tempfile::TempDir;

    fn corpus(dir: &TempDir, files: &[(&str, &str)]) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        for (name, content) in files {
            let path = dir.path().join(name);
            fs::write(&path, content).expect("write fixture");
            paths.push(path);
        }
        paths
    }

    #[test]
    fn sequential_scan_preserves_input_order() {
        let dir = TempDir::new().unwrap();
        let paths = corpus(
            &dir,
            &[
                ("c.txt", "alpha beta gamma"),
                ("a.txt", "delta epsilon zeta"),
                ("b.txt", "eta theta iota"),
            ],
        );
        let sigs = scan(&paths, &ScanConfig::new().with_k(2)).unwrap();
        let scanned: Vec<&PathBuf> = sigs.iter().map(|s| &s.path).collect();
        assert_eq!(scanned, paths.iter().collect::<Vec<_>>());
    }

    #[test]
    fn unreadable_files_are_skipped_not_fatal() {
        let dir = TempDir::new().unwrap();
        let mut paths = corpus(&dir, &[("a.txt", "alpha beta gamma")]);
        paths.push(dir.path().join("missing.txt"));
        let sigs = scan(&paths, &ScanConfig::new().with_k(2)).unwrap();
        assert_eq!(sigs.len(), 1);
        assert_eq!(sigs[0].path, paths[0]);
    }

    #[test]
    fn min_tokens_filters_short_files() {
        let dir = TempDir::new().unwrap();
        let paths = corpus(
            &dir,
            &[("long.txt", "alpha beta gamma delta"), ("short.txt", "alpha")],
        );
        let sigs = scan(&paths, &ScanConfig::new().with_k(2).with_min_tokens(2)).unwrap();
        assert_eq!(sigs.len(), 1);
        assert!(sigs[0].path.ends_with("long.txt"));
    }

    #[test]
    fn parallel_scan_matches_serial() {
        let dir = TempDir::new().unwrap();
        let files: Vec<(String, String)> = (0..12)
            .map(|i| {
                (
                    format!("f{i}.txt"),
                    format!("alpha beta gamma delta epsilon {i}"),
                )
            })
            .collect();
        let borrowed: Vec<(&str, &str)> = files
            .iter()
            .map(|(n, c)| (n.as_str(), c.as_str()))
            .collect();
        let paths = corpus(&dir, &borrowed);

        let serial = scan(&paths, &ScanConfig::new().with_k(3)).unwrap();
        for workers in [2, 4, 8] {
            let parallel =
                scan(&paths, &ScanConfig::new().with_k(3).with_workers(workers)).unwrap();

            let serial_sizes: HashMap<&PathBuf, usize> =
                serial.iter().map(|s| (&s.path, s.shingles.len())).collect();
            let parallel_sizes: HashMap<&PathBuf, usize> = parallel
                .iter()
                .map(|s| (&s.path, s.shingles.len()))
                .collect();
            assert_eq!(serial_sizes, parallel_sizes, "workers={workers}");
        }
    }

    #[test]
    fn empty_worklist_is_fine() {
        let sigs = scan(&[], &ScanConfig::default()).unwrap();
        assert!(sigs.is_empty());
    }
}
