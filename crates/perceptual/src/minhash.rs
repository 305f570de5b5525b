//! MinHash sketching over shingle sets.
//!
//! Instead of true minwise-independent permutations, each sketch slot uses a
//! salted 64-bit hash of every shingle and keeps the minimum. The salts live
//! in a process-wide table computed once; a fixed table is all that exact
//! reproducibility across runs requires.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use xxhash_rust::xxh3::{xxh3_64, xxh3_64_with_seed};

use crate::error::PerceptualError;

/// Number of precomputed salts, and therefore the maximum sketch length.
pub const SALT_TABLE_LEN: usize = 128;

/// Process-wide salt table, derived once from hashing sequential integer
/// labels. Read-only after initialization and safe for concurrent use.
static SALT_TABLE: Lazy<[u64; SALT_TABLE_LEN]> = Lazy::new(|| {
    let mut salts = [0u64; SALT_TABLE_LEN];
    for (i, salt) in salts.iter_mut().enumerate() {
        *salt = xxh3_64(format!("salt-{i}").as_bytes());
    }
    salts
});

/// Computes a MinHash sketch of length `perms` for a shingle set.
///
/// Slot `j` is the minimum of `hash(shingle, salt_j)` over all shingles. The
/// empty set maps to `u64::MAX` in every slot, a sentinel that cannot
/// spuriously agree with any non-empty document's sketch.
///
/// Fails if `perms` exceeds [`SALT_TABLE_LEN`]; that is a configuration
/// error, not data-dependent.
pub fn sketch(shingles: &HashSet<u128>, perms: usize) -> Result<Vec<u64>, PerceptualError> {
    if perms > SALT_TABLE_LEN {
        return Err(PerceptualError::SketchTooLong {
            perms,
            available: SALT_TABLE_LEN,
        });
    }

    if shingles.is_empty() {
        return Ok(vec![u64::MAX; perms]);
    }

    let mut out = Vec::with_capacity(perms);
    for &salt in SALT_TABLE[..perms].iter() {
        let mut minv = u64::MAX;
        for &shingle in shingles {
            let h = salted_hash(shingle, salt);
            if h < minv {
                minv = h;
            }
        }
        out.push(minv);
    }
    Ok(out)
}

/// Combines a shingle with a salt into a 64-bit value. Deterministic and
/// salt-seeded; the minimum over a set is independent of iteration order.
#[inline]
fn salted_hash(shingle: u128, salt: u64) -> u64 {
    xxh3_64_with_seed(&shingle.to_le_bytes(), salt)
}
