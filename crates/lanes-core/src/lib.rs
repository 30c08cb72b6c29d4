#![forbid(unsafe_code)]
//! lanes-core library.
//!
//! Parses the lane survey and derives the relational tables every other
//! crate works from.
//!
//! # Conventions
//!
//! - **Errors**: typed `thiserror` enums for failures a caller may branch on;
//!   [`error::ErrorCode`] carries the stable machine-readable code.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod dataset;
pub mod error;
pub mod lane;
pub mod matrix;
pub mod table;

pub use dataset::{Dataset, DatasetError};
pub use lane::Lane;
pub use matrix::{CooccurrenceTable, IncidenceTable, SimilarityTable, jaccard};
