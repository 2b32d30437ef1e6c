//! # riskgraph domain
//!
//! Typed view of a threat-catalogue domain model: asset classes, threats,
//! misbehaviours, trustworthiness attributes, control strategies, the
//! pattern structures threats are matched with, and the ranked level scales.
//!
//! Entities are lightweight handles borrowed from the [`DomainModel`]. Two
//! lookups of the same identifier through the same factory yield equal
//! handles backed by one cached record.

pub mod entity;
pub mod level;
pub mod model;

pub use entity::{
    Asset, CaSetting, ConstructionPattern, Control, ControlSet, ControlStrategy, DomainEntity, DomainKind, InferredLink,
    MaDefaultSetting, MatchingPattern, Misbehaviour, MisbehaviourSet, Node, Relation, Role, RoleLink, RootPattern,
    Threat, ThreatCategory, TrustworthinessAttribute, TrustworthinessAttributeSet, TrustworthinessImpactSet,
};
pub use level::{Level, LevelKind};
pub use model::DomainModel;

use riskgraph_core::model::Iri;
use riskgraph_core::ConfigError;
use riskgraph_store::StoreError;
use thiserror::Error;

/// Domain model errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Malformed domain graph: {0}")]
    MalformedGraph(String),

    #[error("Invalid level {level}: {reason}")]
    InvalidLevel { level: Iri, reason: String },

    #[error("Invalid literal {value:?} for <{predicate}> on <{entity}>")]
    InvalidLiteral { entity: Iri, predicate: Iri, value: String },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
