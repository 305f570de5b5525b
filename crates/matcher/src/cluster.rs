//! Clustering of confirmed duplicate pairs into connected components.
//!
//! Connectivity runs over dense integer indices with a union-find, not over
//! path strings; paths come back into play only at the presentation step,
//! where the smallest member is chosen as the representative. Because the
//! index arena is built from the sorted, deduplicated path list, the whole
//! computation is deterministic regardless of pair order.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::types::{Cluster, DuplicatePair};

/// Groups duplicate pairs into clusters, one per connected component.
///
/// Every path appearing in at least one pair lands in exactly one cluster.
/// Members are sorted ascending, the representative is the smallest member,
/// and the cluster list is sorted by representative ascending, then by
/// descending size for ties.
pub fn build_clusters(pairs: &[DuplicatePair<'_>]) -> Vec<Cluster> {
    // Arena of every path touched by a pair, sorted for determinism.
    let mut paths: Vec<&Path> = pairs
        .iter()
        .flat_map(|p| [p.a.path.as_path(), p.b.path.as_path()])
        .collect();
    paths.sort_unstable();
    paths.dedup();

    let index: HashMap<&Path, usize> = paths
        .iter()
        .enumerate()
        .map(|(i, path)| (*path, i))
        .collect();

    let mut dsu = UnionFind::new(paths.len());
    let mut max_sim = vec![0.0f64; paths.len()];
    for pair in pairs {
        let a = index[pair.a.path.as_path()];
        let b = index[pair.b.path.as_path()];
        dsu.union(a, b);
        max_sim[a] = max_sim[a].max(pair.similarity);
        max_sim[b] = max_sim[b].max(pair.similarity);
    }

    // Indices were assigned in path order, so each component's member list
    // comes out path-sorted for free.
    let mut components: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for i in 0..paths.len() {
        components.entry(dsu.find(i)).or_default().push(i);
    }

    let mut clusters: Vec<Cluster> = components
        .into_values()
        .map(|members| {
            let max_similarity = members.iter().fold(0.0f64, |acc, &i| acc.max(max_sim[i]));
            let member_paths: Vec<_> = members.iter().map(|&i| paths[i].to_path_buf()).collect();
            Cluster {
                representative: member_paths[0].clone(),
                size: member_paths.len(),
                members: member_paths,
                max_similarity,
            }
        })
        .collect();

    clusters.sort_by(|a, b| {
        a.representative
            .cmp(&b.representative)
            .then_with(|| b.size.cmp(&a.size))
    });
    clusters
}

/// Union-find with path compression and union by rank.
struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            // Halving: point x at its grandparent as we walk up.
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn union(&mut self, a: usize, b: usize) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
    }
}
