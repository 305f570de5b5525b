use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use ingest::DEFAULT_SHINGLE_K;
use matcher::{
    DEFAULT_EXACT_FALLBACK_LIMIT, DEFAULT_LSH_BANDS, DEFAULT_MINHASH_PERMS, DEFAULT_THRESHOLD,
};

/// Default extension filter, matching the common text/doc/source mix.
pub const DEFAULT_EXTENSIONS: &str = ".py,.md,.txt";

#[derive(Parser)]
#[command(name = "dupfinder")]
#[command(about = "Detect duplicate and near-duplicate text files by content similarity")]
#[command(version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a directory tree for duplicate / near-duplicate files
    Scan(ScanArgs),
}

#[derive(Args)]
pub struct ScanArgs {
    /// Root directory to scan recursively
    pub path: PathBuf,

    /// Similarity threshold (0-1) for reporting a pair
    #[arg(long, default_value_t = DEFAULT_THRESHOLD, allow_negative_numbers = true)]
    pub threshold: f64,

    /// Comma-separated list of file extensions; empty means all files
    #[arg(long, default_value = DEFAULT_EXTENSIONS)]
    pub ext: String,

    /// Shingle size (tokens per shingle)
    #[arg(long, default_value_t = DEFAULT_SHINGLE_K)]
    pub k: usize,

    /// Exclude files with fewer tokens than this
    #[arg(long, default_value_t = 0)]
    pub min_tokens: usize,

    /// Scan worker count; 0 or 1 scans sequentially
    #[arg(long, default_value_t = 0)]
    pub workers: usize,

    /// Emit JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Report clusters of connected duplicates instead of raw pairs
    #[arg(long)]
    pub clusters: bool,

    /// Propose candidate pairs with MinHash/LSH before exact comparison
    #[arg(long)]
    pub prefilter: bool,

    /// MinHash sketch length for the prefilter
    #[arg(long, default_value_t = DEFAULT_MINHASH_PERMS)]
    pub minhash_perms: usize,

    /// LSH band count for the prefilter
    #[arg(long, default_value_t = DEFAULT_LSH_BANDS)]
    pub lsh_bands: usize,

    /// Corpus-size cutoff for the exact-duplicate safety net
    #[arg(long, default_value_t = DEFAULT_EXACT_FALLBACK_LIMIT)]
    pub exact_fallback_limit: usize,
}

impl ScanArgs {
    /// Extension list parsed from `--ext`: trimmed, empties dropped.
    pub fn extensions(&self) -> Vec<String> {
        self.ext
            .split(',')
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(String::from)
            .collect()
    }
}
