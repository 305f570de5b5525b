//! Perceptual similarity primitives for duplicate detection.
//!
//! This crate owns the similarity-bearing artifacts of a document: the
//! hashed shingle set, the MinHash sketch derived from it, and the LSH
//! banding step that proposes candidate pairs without comparing every
//! document against every other.
//!
//! ## Contract
//!
//! - This layer **only** consumes canonical tokens produced upstream. It
//!   never normalizes, tokenizes, or touches the filesystem.
//! - Every operation is a pure function of its arguments plus the
//!   process-wide salt table; for the same inputs the output is
//!   bit-identical across runs and machines.
//!
//! ## Core pipeline
//!
//! 1. **Shingling**: slide a k-token window over the token stream, join each
//!    window with a fixed delimiter, and hash it with SHA-256 truncated to
//!    128 bits. The deduplicated hash set plus the token count is the whole
//!    signature of a document.
//!
//! 2. **MinHashing**: for each salt in the table, keep the minimum salted
//!    64-bit hash over the shingle set. Sketch agreement between two
//!    documents converges to their true Jaccard similarity as the sketch
//!    grows.
//!
//! 3. **Banding**: split sketches into contiguous bands; any bit-for-bit
//!    equal band makes two documents a candidate pair for exact
//!    confirmation downstream.
//!
//! Configuration mistakes (a sketch longer than the salt table, zero or
//! oversized band counts, mixed sketch lengths) are programmer errors and
//! fail up front with [`PerceptualError`]; they are never absorbed.

mod error;
pub mod lsh;
pub mod minhash;
mod shingle;

pub use crate::error::PerceptualError;
pub use crate::minhash::SALT_TABLE_LEN;
pub use crate::shingle::shingle_hashes;
