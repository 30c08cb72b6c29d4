//! Basic graph statistics for the run summary.
//!
//! - **node_count** / **edge_count**: sizes of the graph.
//! - **density**: `edge_count / (n * (n - 1) / 2)` for an undirected graph.
//!   Zero for graphs with fewer than 2 nodes.
//! - **component_count**: number of connected components.
//! - **isolated_node_count**: nodes with no incident edge. In the similarity
//!   graph these are students who share no lane with anyone.

use petgraph::{algo::connected_components, graph::UnGraph};
use serde::Serialize;

/// Summary statistics for one graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub density: f64,
    pub component_count: usize,
    pub isolated_node_count: usize,
}

impl GraphStats {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_graph<N, E>(graph: &UnGraph<N, E>) -> Self {
        let node_count = graph.node_count();
        let edge_count = graph.edge_count();

        let density = if node_count < 2 {
            0.0
        } else {
            let max_edges = (node_count * (node_count - 1) / 2) as f64;
            edge_count as f64 / max_edges
        };

        let isolated_node_count = graph
            .node_indices()
            .filter(|&n| graph.neighbors(n).next().is_none())
            .count();

        Self {
            node_count,
            edge_count,
            density,
            component_count: connected_components(graph),
            isolated_node_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::WeightedGraph;

    #[test]
    fn empty_graph_stats() {
        let g = WeightedGraph::from_edges::<&str>(&[], &[]);
        let stats = GraphStats::from_graph(&g.graph);
        assert_eq!(stats.node_count, 0);
        assert_eq!(stats.edge_count, 0);
        assert!(stats.density.abs() < f64::EPSILON);
        assert_eq!(stats.component_count, 0);
        assert_eq!(stats.isolated_node_count, 0);
    }

    #[test]
    fn triangle_plus_isolated() {
        let g = WeightedGraph::from_edges(
            &["a", "b", "c", "d"],
            &[(0, 1, 1.0), (1, 2, 1.0), (0, 2, 1.0)],
        );
        let stats = GraphStats::from_graph(&g.graph);
        assert_eq!(stats.edge_count, 3);
        assert!((stats.density - 0.5).abs() < 1e-12);
        assert_eq!(stats.component_count, 2);
        assert_eq!(stats.isolated_node_count, 1);
    }
}
