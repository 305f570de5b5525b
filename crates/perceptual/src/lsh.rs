//! LSH banding over MinHash sketches.
//!
//! The standard AND-within-band / OR-across-bands scheme: each sketch is cut
//! into `bands` contiguous segments, and two documents become a candidate
//! pair if any segment is bit-for-bit equal. With per-slot agreement
//! probability `s` and `r` slots per band, the candidate probability is
//! `1 - (1 - s^r)^bands`, so fewer, larger bands raise precision and more,
//! smaller bands raise recall.

use std::collections::{BTreeSet, HashMap};

use crate::error::PerceptualError;

/// An unordered pair of document indices `(i, j)` with `i < j`, proposed for
/// exact comparison. Carries no similarity value itself.
pub type CandidatePair = (usize, usize);

/// Proposes candidate pairs by bucketing sketches per band segment.
///
/// Segments are contiguous slices of length `perms / bands`; the last band
/// absorbs the remainder when `perms` is not evenly divisible. Buckets use
/// exact segment equality, so two identical sketches are always proposed.
///
/// The result is ordered (a [`BTreeSet`]) to keep downstream iteration
/// independent of hash-table iteration order.
///
/// # Errors
///
/// Fails when `bands == 0`, `bands > perms`, or the sketches do not all have
/// the same length. An empty sketch list yields an empty candidate set
/// without validation, since there is no sketch length to validate against.
pub fn candidates(
    sketches: &[Vec<u64>],
    bands: usize,
) -> Result<BTreeSet<CandidatePair>, PerceptualError> {
    let mut pairs = BTreeSet::new();
    let Some(first) = sketches.first() else {
        return Ok(pairs);
    };

    let perms = first.len();
    if let Some(odd) = sketches.iter().find(|s| s.len() != perms) {
        return Err(PerceptualError::MixedSketchLengths {
            expected: perms,
            got: odd.len(),
        });
    }
    if bands == 0 || bands > perms {
        return Err(PerceptualError::InvalidBands { bands, perms });
    }

    let band_size = perms / bands;
    for band in 0..bands {
        let start = band * band_size;
        let end = if band == bands - 1 {
            perms
        } else {
            start + band_size
        };

        let mut buckets: HashMap<&[u64], Vec<usize>> = HashMap::new();
        for (idx, sketch) in sketches.iter().enumerate() {
            buckets.entry(&sketch[start..end]).or_default().push(idx);
        }

        for members in buckets.values() {
            if members.len() < 2 {
                continue;
            }
            // Members are in ascending index order by construction.
            for (i, &a) in members.iter().enumerate() {
                for &b in &members[i + 1..] {
                    pairs.insert((a, b));
                }
            }
        }
    }

    Ok(pairs)
}
