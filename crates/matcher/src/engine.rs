use std::collections::{BTreeSet, HashMap, HashSet};
use std::time::Instant;

use tracing::{debug, info};

use ingest::FileSignature;
use perceptual::{lsh, minhash};

use crate::types::{DuplicatePair, MatchConfig, MatchError};

/// Jaccard similarity of two shingle sets: `|a ∩ b| / |a ∪ b|`.
///
/// Two empty sets are defined as identical (1.0); exactly one empty set is
/// defined as fully dissimilar (0.0). Both definitions avoid a division by
/// zero and keep the function total and symmetric.
pub fn jaccard(a: &HashSet<u128>, b: &HashSet<u128>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let intersection = small.iter().filter(|h| large.contains(h)).count();
    let union = a.len() + b.len() - intersection;
    intersection as f64 / union as f64
}

/// Finds every signature pair whose Jaccard similarity meets the threshold.
///
/// With `cfg.prefilter` disabled, every unordered pair is compared. With it
/// enabled, MinHash sketches are banded into LSH candidates first and only
/// those are compared exactly; for corpora of at most
/// `cfg.exact_fallback_limit` signatures, pairs with identical shingle sets
/// are promoted to candidates unconditionally, so true exact duplicates
/// survive any banding choice.
///
/// The result is sorted by descending similarity, then by both paths
/// ascending, so output order is reproducible regardless of worker count or
/// hash-table iteration order upstream.
pub fn find_duplicates<'a>(
    signatures: &'a [FileSignature],
    cfg: &MatchConfig,
) -> Result<Vec<DuplicatePair<'a>>, MatchError> {
    cfg.validate()?;
    let start = Instant::now();

    let mut pairs = if cfg.prefilter {
        let candidates = prefilter_candidates(signatures, cfg)?;
        debug!(
            signatures = signatures.len(),
            candidates = candidates.len(),
            "prefilter_candidates"
        );
        confirm(signatures, candidates.iter().copied(), cfg.threshold)
    } else {
        confirm(signatures, all_pairs(signatures.len()), cfg.threshold)
    };

    pairs.sort_by(|x, y| {
        y.similarity
            .total_cmp(&x.similarity)
            .then_with(|| x.a.path.cmp(&y.a.path))
            .then_with(|| x.b.path.cmp(&y.b.path))
    });

    info!(
        signatures = signatures.len(),
        pairs = pairs.len(),
        prefilter = cfg.prefilter,
        elapsed_micros = start.elapsed().as_micros() as u64,
        "find_duplicates_complete"
    );

    Ok(pairs)
}

/// Every unordered index pair `(i, j)` with `i < j`.
fn all_pairs(n: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..n).flat_map(move |i| (i + 1..n).map(move |j| (i, j)))
}

/// Exactly compares the given index pairs and keeps those at or above the
/// threshold.
fn confirm<'a>(
    signatures: &'a [FileSignature],
    pairs: impl Iterator<Item = (usize, usize)>,
    threshold: f64,
) -> Vec<DuplicatePair<'a>> {
    let mut out = Vec::new();
    for (i, j) in pairs {
        let a = &signatures[i];
        let b = &signatures[j];
        let similarity = jaccard(&a.shingles, &b.shingles);
        if similarity >= threshold {
            out.push(DuplicatePair { similarity, a, b });
        }
    }
    out
}

/// Sketches every signature, bands the sketches into LSH candidates, and
/// applies the small-corpus identical-shingle-set safety net.
fn prefilter_candidates(
    signatures: &[FileSignature],
    cfg: &MatchConfig,
) -> Result<BTreeSet<(usize, usize)>, MatchError> {
    let sketches: Vec<Vec<u64>> = signatures
        .iter()
        .map(|sig| minhash::sketch(&sig.shingles, cfg.minhash_perms))
        .collect::<Result<_, _>>()?;

    let mut candidates = lsh::candidates(&sketches, cfg.lsh_bands)?;

    if signatures.len() <= cfg.exact_fallback_limit {
        add_identical_set_pairs(signatures, &mut candidates);
    }

    Ok(candidates)
}

/// Promotes every pair of signatures with bit-identical shingle sets.
///
/// Signatures are grouped by an order-independent set fingerprint (length
/// plus XOR of all hashes) so the pass stays linear in corpus size; exact
/// set equality is confirmed before a pair is added.
fn add_identical_set_pairs(
    signatures: &[FileSignature],
    candidates: &mut BTreeSet<(usize, usize)>,
) {
    let mut groups: HashMap<(usize, u128), Vec<usize>> = HashMap::new();
    for (idx, sig) in signatures.iter().enumerate() {
        let fold = sig.shingles.iter().fold(0u128, |acc, h| acc ^ h);
        groups
            .entry((sig.shingles.len(), fold))
            .or_default()
            .push(idx);
    }

    for members in groups.values() {
        if members.len() < 2 {
            continue;
        }
        for (i, &a) in members.iter().enumerate() {
            for &b in &members[i + 1..] {
                if signatures[a].shingles == signatures[b].shingles {
                    candidates.insert((a, b));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;

    fn sig(path: &str, shingles: &[u128]) -> FileSignature {
        FileSignature {
            path: PathBuf::from(path),
            shingles: shingles.iter().copied().collect(),
            size: shingles.len(),
        }
    }

    // ==================== Jaccard Tests ====================

    #[test]
    fn jaccard_both_empty_is_one() {
        assert_eq!(jaccard(&HashSet::new(), &HashSet::new()), 1.0);
    }

    #[test]
    fn jaccard_one_empty_is_zero() {
        let a: HashSet<u128> = [1, 2, 3].into_iter().collect();
        assert_eq!(jaccard(&a, &HashSet::new()), 0.0);
        assert_eq!(jaccard(&HashSet::new(), &a), 0.0);
    }

    #[test]
    fn jaccard_identical_sets_is_one() {
        let a: HashSet<u128> = [1, 2, 3].into_iter().collect();
        assert_eq!(jaccard(&a, &a.clone()), 1.0);
    }

    #[test]
    fn jaccard_disjoint_sets_is_zero() {
        let a: HashSet<u128> = [1, 2].into_iter().collect();
        let b: HashSet<u128> = [3, 4].into_iter().collect();
        assert_eq!(jaccard(&a, &b), 0.0);
    }

    #[test]
    fn jaccard_partial_overlap() {
        let a: HashSet<u128> = [1, 2, 3].into_iter().collect();
        let b: HashSet<u128> = [2, 3, 4].into_iter().collect();
        // |∩| = 2, |∪| = 4.
        assert_eq!(jaccard(&a, &b), 0.5);
    }

    #[test]
    fn jaccard_is_symmetric() {
        let a: HashSet<u128> = (0..20).collect();
        let b: HashSet<u128> = (10..40).collect();
        assert_eq!(jaccard(&a, &b), jaccard(&b, &a));
    }

    #[test]
    fn jaccard_stays_in_unit_interval() {
        let a: HashSet<u128> = (0..7).collect();
        let b: HashSet<u128> = (3..25).collect();
        let s = jaccard(&a, &b);
        assert!((0.0..=1.0).contains(&s));
    }

    // ==================== Exact Path Tests ====================

    #[test]
    fn exact_path_finds_pairs_at_threshold() {
        let sigs = vec![
            sig("/a.txt", &[1, 2, 3, 4]),
            sig("/b.txt", &[1, 2, 3, 4]),
            sig("/c.txt", &[100, 200]),
        ];
        let cfg = MatchConfig::new().with_threshold(0.99);
        let pairs = find_duplicates(&sigs, &cfg).unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].a.path, PathBuf::from("/a.txt"));
        assert_eq!(pairs[0].b.path, PathBuf::from("/b.txt"));
        assert_eq!(pairs[0].similarity, 1.0);
    }

    #[test]
    fn threshold_is_inclusive() {
        let sigs = vec![sig("/a.txt", &[1, 2, 3]), sig("/b.txt", &[2, 3, 4])];
        // Similarity is exactly 0.5.
        let at = find_duplicates(&sigs, &MatchConfig::new().with_threshold(0.5)).unwrap();
        assert_eq!(at.len(), 1);
        let above = find_duplicates(&sigs, &MatchConfig::new().with_threshold(0.51)).unwrap();
        assert!(above.is_empty());
    }

    #[test]
    fn negative_threshold_reports_every_pair() {
        let sigs = vec![
            sig("/a.txt", &[1]),
            sig("/b.txt", &[2]),
            sig("/c.txt", &[3]),
        ];
        let pairs = find_duplicates(&sigs, &MatchConfig::new().with_threshold(-0.1)).unwrap();
        assert_eq!(pairs.len(), 3);
    }

    #[test]
    fn two_contentless_documents_are_identical() {
        let sigs = vec![sig("/empty-a.txt", &[]), sig("/empty-b.txt", &[])];
        let pairs = find_duplicates(&sigs, &MatchConfig::new().with_threshold(0.99)).unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].similarity, 1.0);
    }

    #[test]
    fn output_is_sorted_by_similarity_then_paths() {
        let sigs = vec![
            sig("/a.txt", &[1, 2, 3, 4]),
            sig("/b.txt", &[1, 2, 3, 4]),
            sig("/c.txt", &[1, 2, 3]),
        ];
        let pairs = find_duplicates(&sigs, &MatchConfig::new().with_threshold(0.1)).unwrap();
        assert_eq!(pairs.len(), 3);
        // (a, b) is a perfect match, then (a, c) before (b, c) at 0.75 each.
        assert_eq!(pairs[0].similarity, 1.0);
        assert_eq!(pairs[1].a.path, PathBuf::from("/a.txt"));
        assert_eq!(pairs[1].b.path, PathBuf::from("/c.txt"));
        assert_eq!(pairs[2].a.path, PathBuf::from("/b.txt"));
        assert_eq!(pairs[2].b.path, PathBuf::from("/c.txt"));
    }

    #[test]
    fn no_signatures_no_pairs() {
        let pairs = find_duplicates(&[], &MatchConfig::default()).unwrap();
        assert!(pairs.is_empty());
    }

    // ==================== Prefilter Tests ====================

    #[test]
    fn prefilter_matches_exact_on_duplicate_groups() {
        // Three exact-duplicate groups plus two loners. The safety net alone
        // guarantees every confirmed pair survives prefiltering.
        let mut sigs = Vec::new();
        for group in 0..3u128 {
            for copy in 0..3 {
                let shingles: Vec<u128> = (0..10).map(|s| group * 1000 + s).collect();
                sigs.push(sig(&format!("/g{group}-{copy}.txt"), &shingles));
            }
        }
        sigs.push(sig("/loner-1.txt", &[900_001, 900_002]));
        sigs.push(sig("/loner-2.txt", &[800_001, 800_002]));

        let exact_cfg = MatchConfig::new().with_threshold(0.9);
        let pre_cfg = MatchConfig::new()
            .with_threshold(0.9)
            .with_prefilter(true)
            .with_minhash_perms(32)
            .with_lsh_bands(8);

        let exact = find_duplicates(&sigs, &exact_cfg).unwrap();
        let prefiltered = find_duplicates(&sigs, &pre_cfg).unwrap();

        let exact_set: Vec<(&PathBuf, &PathBuf)> =
            exact.iter().map(|p| (&p.a.path, &p.b.path)).collect();
        let pre_set: Vec<(&PathBuf, &PathBuf)> =
            prefiltered.iter().map(|p| (&p.a.path, &p.b.path)).collect();
        assert_eq!(exact_set, pre_set);
        assert_eq!(exact.len(), 9);
    }

    #[test]
    fn prefilter_never_confirms_below_threshold() {
        let sigs = vec![
            sig("/a.txt", &(0..20).collect::<Vec<u128>>()),
            sig("/b.txt", &(15..35).collect::<Vec<u128>>()),
        ];
        let cfg = MatchConfig::new()
            .with_threshold(0.9)
            .with_prefilter(true)
            .with_minhash_perms(16)
            .with_lsh_bands(16);
        // Even with maximally permissive banding, exact confirmation rejects
        // the low-similarity pair.
        let pairs = find_duplicates(&sigs, &cfg).unwrap();
        assert!(pairs.is_empty());
    }

    #[test]
    fn safety_net_respects_corpus_cutoff() {
        // Shingle sets identical, sketches identical too; shrink the cutoff
        // below the corpus size and identical sketches still collide in
        // every band, so the pair survives. The cutoff only controls the
        // extra equality pass.
        let sigs = vec![
            sig("/a.txt", &[1, 2, 3, 4, 5]),
            sig("/b.txt", &[1, 2, 3, 4, 5]),
        ];
        let cfg = MatchConfig::new()
            .with_threshold(0.99)
            .with_prefilter(true)
            .with_exact_fallback_limit(0);
        let pairs = find_duplicates(&sigs, &cfg).unwrap();
        assert_eq!(pairs.len(), 1);
    }

    #[test]
    fn invalid_bands_fail_before_output() {
        let sigs = vec![sig("/a.txt", &[1, 2, 3])];
        let cfg = MatchConfig::new()
            .with_prefilter(true)
            .with_minhash_perms(16)
            .with_lsh_bands(0);
        assert!(matches!(
            find_duplicates(&sigs, &cfg),
            Err(MatchError::InvalidConfig(_))
        ));
    }

    #[test]
    fn empty_documents_pair_up_under_prefilter() {
        // Empty shingle sets share the sentinel sketch and identical sets,
        // and jaccard(∅, ∅) is defined as 1.0.
        let sigs = vec![sig("/empty-a.txt", &[]), sig("/empty-b.txt", &[])];
        let cfg = MatchConfig::new().with_threshold(0.99).with_prefilter(true);
        let pairs = find_duplicates(&sigs, &cfg).unwrap();
        assert_eq!(pairs.len(), 1);
    }

    #[test]
    fn identical_set_grouping_confirms_real_equality() {
        // Two different sets engineered to share length and XOR fold: the
        // fingerprint groups them, the equality check must split them.
        let a = [1u128, 2, 4];
        let b = [3u128, 5, 1];
        assert_eq!(
            a.iter().fold(0u128, |acc, h| acc ^ h),
            b.iter().fold(0u128, |acc, h| acc ^ h)
        );
        let sigs = vec![sig("/a.txt", &a), sig("/b.txt", &b)];
        let mut candidates = BTreeSet::new();
        add_identical_set_pairs(&sigs, &mut candidates);
        assert!(candidates.is_empty());
    }
}
