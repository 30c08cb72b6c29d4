//! Vertex metrics for the weighted survey graphs.
//!
//! # Overview
//!
//! Each metric answers a different question about a student (similarity
//! graph) or a lane (co-occurrence graph):
//!
//! - **Degree / strength** (`basic`): how many neighbours, and how much
//!   total edge weight.
//! - **Betweenness** (`betweenness`): how often the vertex lies on shortest
//!   paths between two others.
//! - **Closeness** (`closeness`): how near the vertex is to everything it
//!   can reach.
//! - **Eigenvector** (`eigenvector`): how well connected the vertex is to
//!   other well-connected vertices.
//! - **Clustering** (`basic`): how many of the vertex's neighbours are
//!   neighbours of each other.
//!
//! # Distances
//!
//! Edge weights measure affinity, so path-based metrics run on the
//! distance `1 / weight` (see [`paths::edge_distance`]).
//!
//! # Usage
//!
//! ```rust,ignore
//! use lanes_graph::{WeightedGraph, compute_metrics};
//!
//! let g = WeightedGraph::from_similarity(&sim);
//! let table = compute_metrics(&g);
//! print!("{}", table.to_text_table().render());
//! ```

pub mod basic;
pub mod betweenness;
pub mod closeness;
pub mod eigenvector;
pub mod paths;

use lanes_core::table::TextTable;
use tracing::instrument;

use crate::graph::WeightedGraph;

/// Iteration cap for eigenvector centrality.
pub const EIGENVECTOR_MAX_ITER: usize = 1000;

/// Convergence tolerance for eigenvector centrality.
pub const EIGENVECTOR_TOLERANCE: f64 = 1e-12;

/// All per-vertex metrics of one graph, in node-index order.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsTable {
    pub names: Vec<String>,
    pub degree: Vec<usize>,
    pub strength: Vec<f64>,
    pub betweenness: Vec<f64>,
    /// `NaN` for vertices that reach no other vertex.
    pub closeness: Vec<f64>,
    pub eigenvector: Vec<f64>,
    pub clustering: Vec<f64>,
    /// Edges of the measured graph.
    pub edge_count: usize,
}

impl MetricsTable {
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Position of a vertex by name.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Columns `degree strength betweenness closeness eigenvector clustering`.
    #[must_use]
    pub fn to_text_table(&self) -> TextTable {
        let degree: Vec<i64> = self
            .degree
            .iter()
            .map(|&d| i64::try_from(d).unwrap_or(i64::MAX))
            .collect();

        let table = TextTable::new(self.names.clone()).int_column("degree", degree.clone());
        // Without edges strength is the degree column itself.
        let table = if self.edge_count == 0 {
            table.int_column("strength", degree)
        } else {
            table.float_column("strength", self.strength.clone())
        };

        table
            .float_column("betweenness", self.betweenness.clone())
            .float_column("closeness", self.closeness.clone())
            .float_column("eigenvector", self.eigenvector.clone())
            .float_column("clustering", self.clustering.clone())
    }
}

/// Compute every metric for `g`.
#[must_use]
#[instrument(skip(g), fields(nodes = g.node_count(), edges = g.edge_count()))]
pub fn compute_metrics(g: &WeightedGraph) -> MetricsTable {
    let eigen = eigenvector::eigenvector_centrality(g, EIGENVECTOR_MAX_ITER, EIGENVECTOR_TOLERANCE);
    if !eigen.converged {
        tracing::warn!(
            iterations = eigen.iterations,
            "eigenvector centrality did not converge"
        );
    }

    MetricsTable {
        names: g.names(),
        degree: basic::degree(g),
        strength: basic::strength(g),
        betweenness: betweenness::betweenness_centrality(g),
        closeness: closeness::closeness_centrality(g),
        eigenvector: eigen.scores,
        clustering: basic::local_clustering(g),
        edge_count: g.edge_count(),
    }
}
