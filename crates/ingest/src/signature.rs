use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use canonical::{collapse_whitespace, tokenize};
use perceptual::shingle_hashes;

/// The similarity-bearing fingerprint of one file.
///
/// Created exclusively by the scanner and immutable afterwards; every
/// downstream comparator takes it by shared reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSignature {
    /// Path the signature was computed from.
    pub path: PathBuf,
    /// Deduplicated 128-bit shingle hashes of the file's token stream.
    pub shingles: HashSet<u128>,
    /// Token count after normalization.
    pub size: usize,
}

/// Why a file was left out of a scan.
///
/// Skips are recoverable per-item outcomes, not errors: the scanner logs
/// them and moves on. Undecodable bytes are deliberately absent here —
/// lenient decoding means they can only shrink a token stream, not fail it.
#[derive(Debug, Error)]
pub enum SkipReason {
    #[error("unreadable file: {0}")]
    Unreadable(#[from] io::Error),
}

/// Computes the signature of a single file.
///
/// Reads the file, decodes it leniently (invalid byte sequences are
/// replaced, and the replacements drop out at tokenization), collapses
/// whitespace, tokenizes, and shingles with window size `k`.
///
/// A file with fewer than `k` tokens gets an empty shingle set, which is a
/// valid signature, not a skip.
pub fn compute_signature(path: &Path, k: usize) -> Result<FileSignature, SkipReason> {
    let bytes = fs::read(path)?;
    let text = String::from_utf8_lossy(&bytes);
    let normalized = collapse_whitespace(&text);
    let tokens = tokenize(&normalized);
    let shingles = shingle_hashes(&tokens, k);

    Ok(FileSignature {
        path: path.to_path_buf(),
        shingles,
        size: tokens.len(),
    })
}
