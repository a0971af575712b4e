use crate::errors::BuildError;
use crate::graph::CoverGraph;
use fxhash::{FxHashMap, FxHashSet};
use std::cmp::Ordering;

/// Default weight function: every node costs 1.
pub fn constant_weight(_node: usize) -> f64 {
    1.0
}

/// Turns raw nodes, edges and a weight function into the canonical
/// search input: a symmetric adjacency table plus the fixed visitation
/// order. The order visits high-degree nodes first and breaks ties by
/// ascending weight, then by node index; neighbor lists are sorted by
/// that rank.
pub struct GraphBuilder;

impl GraphBuilder {
    pub fn build<F>(
        node_count: usize,
        edges: &[(usize, usize)],
        weight_fn: F,
    ) -> Result<(CoverGraph, Vec<usize>), BuildError>
    where
        F: Fn(usize) -> f64,
    {
        if node_count == 0 || edges.is_empty() {
            return Err(BuildError::EmptyNodeSet);
        }

        let mut adjacency: FxHashMap<usize, FxHashSet<usize>> = FxHashMap::default();
        for (u, v) in edges.iter().copied() {
            for node in [u, v].iter().copied() {
                if node >= node_count {
                    return Err(BuildError::UnknownNode {
                        u,
                        v,
                        offending: node,
                        node_count,
                    });
                }
            }
            if u == v {
                continue;
            }
            adjacency.entry(u).or_default().insert(v);
            adjacency.entry(v).or_default().insert(u);
        }

        let degrees: FxHashMap<usize, usize> =
            adjacency.iter().map(|(u, nb)| (*u, nb.len())).collect();
        let mut order: Vec<usize> = adjacency.keys().copied().collect();
        order.sort_unstable_by(|a, b| {
            degrees[b]
                .cmp(&degrees[a])
                .then(
                    weight_fn(*a)
                        .partial_cmp(&weight_fn(*b))
                        .unwrap_or(Ordering::Equal),
                )
                .then(a.cmp(b))
        });

        let rank: FxHashMap<usize, usize> =
            order.iter().copied().enumerate().map(|(i, u)| (u, i)).collect();
        let mut data: FxHashMap<usize, Vec<usize>> = FxHashMap::default();
        data.reserve(adjacency.len());
        for (u, neighbors) in adjacency.into_iter() {
            let mut sorted: Vec<usize> = neighbors.into_iter().collect();
            sorted.sort_unstable_by_key(|v| rank[v]);
            data.insert(u, sorted);
        }

        Ok((CoverGraph::from_adjacency(data), order))
    }

    pub fn build_unweighted(
        node_count: usize,
        edges: &[(usize, usize)],
    ) -> Result<(CoverGraph, Vec<usize>), BuildError> {
        Self::build(node_count, edges, constant_weight)
    }
}
