//! # riskgraph store
//!
//! In-memory quad store with named graphs, the [`Graph`] query capability the
//! models are written against, and an N-Quads reader.

pub mod graph;
pub mod nquads;
pub mod store;

pub use graph::{Graph, GraphId};
pub use store::{Quad, RdfStore, StoreStatistics};

use thiserror::Error;

/// Store loading errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("N-Quads syntax error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
