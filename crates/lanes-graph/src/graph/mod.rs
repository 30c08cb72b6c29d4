//! Graphs derived from the survey tables.
//!
//! ## Pipeline
//!
//! ```text
//! IncidenceTable     ──  build::BipartiteGraph::from_incidence()
//!                        students ∪ lanes, one edge per 1-cell
//! SimilarityTable    ──  build::WeightedGraph::from_similarity()
//!                        students, edge weight = Jaccard > 0
//! CooccurrenceTable  ──  build::WeightedGraph::from_cooccurrence()
//!                        lanes, edge weight = shared picks > 0
//!        ↓  stats::GraphStats::from_graph()
//! GraphStats (nodes, edges, density, components, isolated)
//! ```
//!
//! Graphs are immutable once built. Only the two weighted graphs feed the
//! metrics in [`crate::metrics`]; the bipartite graph is drawn, never scored.

pub mod build;
pub mod stats;

pub use build::{BipartiteGraph, Vertex, VertexKind, WeightedGraph};
pub use stats::GraphStats;
