//! Local metrics: degree, strength and the clustering coefficient.
//!
//! These only look at a vertex and its direct neighbours.

use std::collections::HashSet;


use crate::graph::WeightedGraph;

// ---------------------------------------------------------------------------
// Degree / Strength
// ---------------------------------------------------------------------------

/// Number of incident edges per vertex.
#[must_use]
pub fn degree(g: &WeightedGraph) -> Vec<usize> {
    g.graph
        .node_indices()
        .map(|n| g.graph.edges(n).count())
        .collect()
}

/// Sum of incident edge weights per vertex.
///
/// A graph without edges reports its degrees instead, i.e. all zeros.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn strength(g: &WeightedGraph) -> Vec<f64> {
    if g.edge_count() == 0 {
        return degree(g).into_iter().map(|d| d as f64).collect();
    }

    g.graph
        .node_indices()
        .map(|n| g.graph.edges(n).map(|e| *e.weight()).sum())
        .collect()
}

// ---------------------------------------------------------------------------
// Clustering
// ---------------------------------------------------------------------------

/// Local clustering coefficient per vertex, ignoring weights.
///
/// For a vertex with `k` distinct neighbours this is the number of edges
/// among those neighbours divided by `k(k-1)/2`. Vertices with fewer than
/// two neighbours score 0.0 instead of being undefined.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn local_clustering(g: &WeightedGraph) -> Vec<f64> {
    let neighbours: Vec<HashSet<usize>> = g
        .graph
        .node_indices()
        .map(|n| {
            g.graph
                .neighbors(n)
                .map(|m| m.index())
                .filter(|&m| m != n.index())
                .collect()
        })
        .collect();

    neighbours
        .iter()
        .map(|nbrs| {
            let k = nbrs.len();
            if k < 2 {
                return 0.0;
            }

            let mut sorted: Vec<usize> = nbrs.iter().copied().collect();
            sorted.sort_unstable();

            let links = sorted
                .iter()
                .enumerate()
                .map(|(i, &u)| {
                    sorted[i + 1..]
                        .iter()
                        .filter(|&&w| neighbours[u].contains(&w))
                        .count()
                })
                .sum::<usize>();

            links as f64 / (k * (k - 1) / 2) as f64
        })
        .collect()
}
