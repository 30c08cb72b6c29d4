//! Single-source shortest paths with path counting.
//!
//! Dijkstra's algorithm over `1 / weight` distances, recording for every
//! reached vertex its distance, the number of shortest paths leading to it
//! and its predecessors on those paths. This is the forward phase of
//! Brandes' betweenness algorithm and also all closeness needs.
//!
//! Path lengths are float sums, so `1/3 + 1/3 + 1/3` and `1` may differ in
//! the last bit. Two lengths within [`TIE_TOLERANCE`] (relative) count as
//! the same length.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Relative tolerance under which two path lengths are considered equal.
pub const TIE_TOLERANCE: f64 = 1e-10;

/// Distance of an edge with the given affinity weight.
///
/// Non-positive weights fall back to distance 1.0.
#[must_use]
pub fn edge_distance(weight: f64) -> f64 {
    if weight > 0.0 { 1.0 / weight } else { 1.0 }
}

fn same_length(a: f64, b: f64) -> bool {
    (a - b).abs() <= TIE_TOLERANCE * a.abs().max(b.abs()).max(1.0)
}

/// Result of one Dijkstra run.
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    /// Settled vertices in non-decreasing distance order; starts with the
    /// source.
    pub order: Vec<usize>,
    /// Distance from the source, `None` if unreachable.
    pub dist: Vec<Option<f64>>,
    /// Number of shortest paths from the source.
    pub sigma: Vec<f64>,
    /// Predecessors on shortest paths.
    pub predecessors: Vec<Vec<usize>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Candidate {
    dist: f64,
    node: usize,
}

impl Eq for Candidate {}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap on distance, then node index for a stable pop order.
        other
            .dist
            .total_cmp(&self.dist)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Run Dijkstra from `source` over `adjacency`, where each entry is
/// `(neighbour, weight)`.
#[must_use]
pub fn shortest_paths(adjacency: &[Vec<(usize, f64)>], source: usize) -> ShortestPaths {
    let n = adjacency.len();
    let mut order = Vec::with_capacity(n);
    let mut dist: Vec<Option<f64>> = vec![None; n];
    let mut sigma = vec![0.0; n];
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut settled = vec![false; n];

    dist[source] = Some(0.0);
    sigma[source] = 1.0;

    let mut heap = BinaryHeap::new();
    heap.push(Candidate {
        dist: 0.0,
        node: source,
    });

    while let Some(Candidate { dist: d, node: v }) = heap.pop() {
        if settled[v] {
            continue;
        }
        settled[v] = true;
        order.push(v);

        for &(w, weight) in &adjacency[v] {
            if settled[w] {
                continue;
            }
            let alt = d + edge_distance(weight);

            match dist[w] {
                Some(current) if same_length(alt, current) => {
                    sigma[w] += sigma[v];
                    predecessors[w].push(v);
                }
                Some(current) if alt > current => {}
                _ => {
                    dist[w] = Some(alt);
                    sigma[w] = sigma[v];
                    predecessors[w].clear();
                    predecessors[w].push(v);
                    heap.push(Candidate { dist: alt, node: w });
                }
            }
        }
    }

    ShortestPaths {
        order,
        dist,
        sigma,
        predecessors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn undirected(n: usize, edges: &[(usize, usize, f64)]) -> Vec<Vec<(usize, f64)>> {
        let mut adj = vec![Vec::new(); n];
        for &(a, b, w) in edges {
            adj[a].push((b, w));
            adj[b].push((a, w));
        }
        adj
    }

    #[test]
    fn distance_is_inverse_weight() {
        assert!((edge_distance(0.5) - 2.0).abs() < f64::EPSILON);
        assert!((edge_distance(4.0) - 0.25).abs() < f64::EPSILON);
        assert!((edge_distance(0.0) - 1.0).abs() < f64::EPSILON);
        assert!((edge_distance(-3.0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn heavy_edges_are_short() {
        // a–c direct with weight 0.25 (distance 4) vs a–b–c with weight 1
        // each (distance 2): the detour wins.
        let adj = undirected(3, &[(0, 2, 0.25), (0, 1, 1.0), (1, 2, 1.0)]);
        let sp = shortest_paths(&adj, 0);
        assert!((sp.dist[2].expect("reached") - 2.0).abs() < 1e-12);
        assert_eq!(sp.predecessors[2], [1]);
        assert_eq!(sp.order, [0, 1, 2]);
    }

    #[test]
    fn equal_paths_are_counted() {
        // Diamond: two paths of length 2 from 0 to 3.
        let adj = undirected(4, &[(0, 1, 1.0), (0, 2, 1.0), (1, 3, 1.0), (2, 3, 1.0)]);
        let sp = shortest_paths(&adj, 0);
        assert!((sp.sigma[3] - 2.0).abs() < f64::EPSILON);
        assert_eq!(sp.predecessors[3].len(), 2);
    }

    #[test]
    fn float_noise_does_not_split_ties() {
        // 1/3 + 1/3 + 1/3 against 1.0 through a different route.
        let third = 3.0;
        let adj = undirected(
            5,
            &[(0, 1, third), (1, 2, third), (2, 4, third), (0, 3, 2.0), (3, 4, 2.0)],
        );
        let sp = shortest_paths(&adj, 0);
        assert!((sp.sigma[4] - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unreachable_vertices_have_no_distance() {
        let adj = undirected(3, &[(0, 1, 1.0)]);
        let sp = shortest_paths(&adj, 0);
        assert!(sp.dist[2].is_none());
        assert!(sp.sigma[2].abs() < f64::EPSILON);
        assert_eq!(sp.order, [0, 1]);
    }
}
