//! # riskgraph system
//!
//! Typed view of an instantiated system threat model. A [`SystemModel`] owns
//! the system graph together with the [`DomainModel`] it was built against,
//! classifies system identifiers into entity kinds and aggregates computed
//! risk into a [`RiskVector`](riskgraph_core::RiskVector).
//!
//! ```rust,no_run
//! use riskgraph_system::SystemModel;
//!
//! # fn main() -> Result<(), riskgraph_system::SystemError> {
//! let system = std::fs::read_to_string("system.nq")?;
//! let domain = std::fs::read_to_string("domain.nq")?;
//! let model = SystemModel::from_nquads(&system, &domain)?;
//!
//! for ms in model.filter_misbehaviour_sets(3)? {
//!     println!("{}", ms);
//! }
//! # Ok(())
//! # }
//! ```

pub mod asset;
pub mod control;
pub mod entity;
pub mod misbehaviour;
pub mod model;
pub mod relation;
pub mod summary;
pub mod threat;
pub mod trustworthiness;

pub use asset::Asset;
pub use control::{ControlSet, ControlStrategy};
pub use entity::{Entity, RiskMode, SystemEntity, SystemKind};
pub use misbehaviour::MisbehaviourSet;
pub use model::{SystemModel, DEFAULT_RISK_THRESHOLD};
pub use relation::Relation;
pub use summary::SystemSummary;
pub use threat::Threat;
pub use trustworthiness::TrustworthinessAttributeSet;

pub use riskgraph_domain::DomainModel;

use riskgraph_core::model::Iri;
use riskgraph_core::RiskVectorError;
use riskgraph_domain::DomainError;
use riskgraph_store::{GraphId, StoreError};
use thiserror::Error;

/// System model errors
#[derive(Error, Debug)]
pub enum SystemError {
    #[error("Domain model version mismatch: expected {expected:?}, found {found:?}")]
    DomainVersionMismatch {
        expected: Option<String>,
        found: Option<String>,
    },

    #[error("Unknown entity {iri} (declared type {declared_type:?})")]
    UnknownEntity { iri: Iri, declared_type: Option<Iri> },

    #[error("More than one asserted graph candidate: {candidates:?}")]
    AmbiguousGraph { candidates: Vec<GraphId> },

    #[error("<{entity}> has no <{predicate}> reference")]
    MissingReference { entity: Iri, predicate: Iri },

    #[error("Invalid literal {value:?} for <{predicate}> on <{entity}>")]
    InvalidLiteral { entity: Iri, predicate: Iri, value: String },

    #[error("Domain model error: {0}")]
    Domain(#[from] DomainError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Risk vector error: {0}")]
    RiskVector(#[from] RiskVectorError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
