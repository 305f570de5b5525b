//! Canonical text layer for duplicate detection.
//!
//! This crate turns raw document text into the ordered token sequence that
//! every downstream similarity stage operates on. Two documents that differ
//! only in whitespace or punctuation canonicalize to the same token stream.
//!
//! ## What we do
//!
//! - Whitespace normalization (all runs collapse to single spaces)
//! - Word tokenization: maximal runs of ASCII letters, digits, or underscore
//! - Nothing else: no case folding, no Unicode normalization, no hashing
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock calls, no OS/locale dependence. Both operations are total
//! over arbitrary string input, including text recovered from lossy decoding:
//! replacement characters are not word characters and simply drop out at
//! tokenization.
//!
//! Bottom line: same input = same token sequence forever.

mod token;
mod whitespace;

pub use crate::token::tokenize;
pub use crate::whitespace::collapse_whitespace;
