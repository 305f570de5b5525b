//! Deterministic k-shingling over a canonical token stream.
//!
//! Each shingle is the SHA-256 digest of its tokens joined by a fixed
//! delimiter, truncated to 128 bits. The digest is what makes two windows
//! with the same tokens collide and nothing else: the delimiter cannot occur
//! inside a word token, so `["ab", "c"]` and `["a", "bc"]` hash differently.

use std::collections::HashSet;

use sha2::{Digest, Sha256};

/// Joins the tokens of a window before hashing. Word tokens never contain
/// `:`, so the joined form is unambiguous.
const SHINGLE_DELIMITER: &str = "::";

/// Computes the deduplicated set of hashed k-shingles for a token sequence.
///
/// Slides a window of `k` tokens with stride 1 and hashes each window. The
/// caller must provide **canonical tokens in order**; this function makes no
/// attempt to normalize or tokenize raw text.
///
/// Returns the empty set when `k == 0` or fewer than `k` tokens are given.
pub fn shingle_hashes<S: AsRef<str>>(tokens: &[S], k: usize) -> HashSet<u128> {
    let n = tokens.len();
    if k == 0 || n < k {
        return HashSet::new();
    }

    let mut hashes = HashSet::with_capacity(n - k + 1);
    let mut joined = String::new();
    for window in tokens.windows(k) {
        joined.clear();
        for (i, token) in window.iter().enumerate() {
            if i > 0 {
                joined.push_str(SHINGLE_DELIMITER);
            }
            joined.push_str(token.as_ref());
        }
        hashes.insert(hash_shingle(&joined));
    }
    hashes
}

/// SHA-256 of the joined window, truncated to its first 128 bits.
fn hash_shingle(joined: &str) -> u128 {
    let digest = Sha256::digest(joined.as_bytes());
    let mut prefix = [0u8; 16];
    prefix.copy_from_slice(&digest[..16]);
    u128::from_be_bytes(prefix)
}
