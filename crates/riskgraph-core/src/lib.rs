//! # riskgraph core
//!
//! Shared building blocks for the threat-model graph layer:
//! - identifier, literal and triple types
//! - the predicate and entity-type registry
//! - label normalization and threat description splitting
//! - risk vectors
//! - loader configuration
//! - the per-model entity identity cache

pub mod cache;
pub mod config;
pub mod model;
pub mod risk;
pub mod text;
pub mod vocabulary;

pub use cache::{EntityCache, EntityRecord};
pub use config::{LevelCeiling, ModelConfig, NamedGraphPolicy};
pub use model::{Iri, Literal, Term, Triple};
pub use risk::RiskVector;
pub use text::{split_description, un_camel_case, Description};
pub use vocabulary::{EntityType, Predicate};

use thiserror::Error;

/// Risk vector construction errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RiskVectorError {
    #[error("Keys in risk counts and risk levels must match (levels without rank: {missing_ranks:?}, levels without count: {missing_counts:?})")]
    KeyMismatch {
        missing_ranks: Vec<String>,
        missing_counts: Vec<String>,
    },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
