#![forbid(unsafe_code)]
//! lanes-graph library.
//!
//! # Conventions
//!
//! - **Graphs**: undirected `petgraph` graphs; vertex order follows the
//!   order of the table they were built from.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod graph;
pub mod metrics;

pub use graph::{BipartiteGraph, GraphStats, VertexKind, WeightedGraph};
pub use metrics::{MetricsTable, compute_metrics};
