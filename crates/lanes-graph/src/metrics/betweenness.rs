//! Betweenness centrality via Brandes' algorithm.
//!
//! # Overview
//!
//! Betweenness centrality measures how often a vertex lies on shortest
//! paths between other pairs of vertices. In the similarity graph a
//! high-betweenness student bridges groups of students with otherwise
//! different lane picks.
//!
//! # Algorithm
//!
//! Brandes (2001), weighted variant:
//!
//! 1. For each source vertex `s`, run Dijkstra over `1 / weight` distances
//!    ([`crate::metrics::paths::shortest_paths`]) to get shortest-path counts
//!    and predecessors.
//! 2. Accumulate dependency scores in reverse settle order (farthest
//!    vertices first).
//! 3. Sum the dependency scores across all sources.
//!
//! Every unordered pair is visited from both ends in an undirected graph,
//! so the sums are halved at the end.
//!
//! # Output
//!
//! Raw scores (not normalized), one per vertex in node-index order.

use tracing::instrument;

use crate::graph::WeightedGraph;
use crate::metrics::paths::shortest_paths;

/// Compute betweenness centrality for every vertex.
///
/// Disconnected vertices and vertices with no shortest paths through them
/// score 0.0.
#[must_use]
#[instrument(skip(g))]
pub fn betweenness_centrality(g: &WeightedGraph) -> Vec<f64> {
    let adjacency = g.adjacency();
    let n = adjacency.len();
    let mut cb = vec![0.0; n];

    for s in 0..n {
        let sp = shortest_paths(&adjacency, s);
        let mut delta = vec![0.0; n];

        for &w in sp.order.iter().rev() {
            for &v in &sp.predecessors[w] {
                if sp.sigma[w] > 0.0 {
                    delta[v] += (sp.sigma[v] / sp.sigma[w]) * (1.0 + delta[w]);
                }
            }
            if w != s {
                cb[w] += delta[w];
            }
        }
    }

    for score in &mut cb {
        *score /= 2.0;
    }

    cb
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
