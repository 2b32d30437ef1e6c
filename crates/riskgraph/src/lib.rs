//! # riskgraph
//!
//! Typed, cached access to threat-modelling knowledge graphs. A *domain
//! model* is a threat catalogue: asset classes, threats, misbehaviours,
//! controls and the ranked level scales they are measured on. A *system
//! model* instantiates a domain model for one concrete system and carries
//! the inferred threats and computed risk levels.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use riskgraph::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let model = riskgraph::open("system.nq", "domain.nq")?;
//!
//!     if let Some(vector) = model.risk_vector() {
//!         println!("Risk: {}", vector);
//!     }
//!     for ms in model.filter_misbehaviour_sets(DEFAULT_RISK_THRESHOLD)? {
//!         println!("{}", ms.comment());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **`riskgraph-core`**: IRIs, literals, vocabulary, configuration, risk vectors
//! - **`riskgraph-store`**: N-Quads parsing and the indexed quad store
//! - **`riskgraph-domain`**: domain model handles and level scales
//! - **`riskgraph-system`**: system model handles, kind dispatch, risk aggregation
//!
//! ## Feature Flags
//!
//! - `full` (default): all crates included
//! - `core`: only the shared data model
//! - `store`: the quad store
//! - `domain`: domain models
//! - `system`: system models

#[cfg(feature = "riskgraph-core")]
pub use riskgraph_core as core;

#[cfg(feature = "riskgraph-store")]
pub use riskgraph_store as store;

#[cfg(feature = "riskgraph-domain")]
pub use riskgraph_domain as domain;

#[cfg(feature = "riskgraph-system")]
pub use riskgraph_system as system;

// Convenience re-exports for common types (feature-gated)
#[cfg(feature = "riskgraph-core")]
pub use riskgraph_core::{model, Iri, ModelConfig, RiskVector};

#[cfg(feature = "riskgraph-store")]
pub use riskgraph_store::{Graph, GraphId, RdfStore};

#[cfg(feature = "riskgraph-domain")]
pub use riskgraph_domain::{DomainError, DomainModel};

#[cfg(feature = "riskgraph-system")]
pub use riskgraph_system::{SystemError, SystemModel, SystemSummary};

// Commonly used external dependencies
pub use anyhow;
pub use serde;
pub use serde_json;

/// Prelude module for convenient imports
///
/// ```rust
/// use riskgraph::prelude::*;
/// ```
pub mod prelude {
    #[cfg(feature = "riskgraph-core")]
    pub use riskgraph_core::{
        Iri, LevelCeiling, Literal, ModelConfig, NamedGraphPolicy, RiskVector, Term, Triple,
    };

    #[cfg(feature = "riskgraph-store")]
    pub use riskgraph_store::{Graph, GraphId, RdfStore};

    #[cfg(feature = "riskgraph-domain")]
    pub use riskgraph_domain::{DomainEntity, DomainError, DomainModel, Level, LevelKind};

    #[cfg(feature = "riskgraph-system")]
    pub use riskgraph_system::{
        Entity, RiskMode, SystemEntity, SystemError, SystemKind, SystemModel, SystemSummary,
        DEFAULT_RISK_THRESHOLD,
    };

    // Common external types
    pub use anyhow::Result;
    pub use serde::{Deserialize, Serialize};
    pub use serde_json::Value;
}

/// Current version of riskgraph
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Load a system model and its domain model from N-Quads files on disk
#[cfg(feature = "riskgraph-system")]
pub fn open(
    system_path: impl AsRef<std::path::Path>,
    domain_path: impl AsRef<std::path::Path>,
) -> anyhow::Result<SystemModel> {
    open_with_config(system_path, domain_path, ModelConfig::default())
}

/// Like [`open`], with explicit model configuration
#[cfg(feature = "riskgraph-system")]
pub fn open_with_config(
    system_path: impl AsRef<std::path::Path>,
    domain_path: impl AsRef<std::path::Path>,
    config: ModelConfig,
) -> anyhow::Result<SystemModel> {
    use anyhow::Context;

    let domain_path = domain_path.as_ref();
    let system_path = system_path.as_ref();
    let domain = std::fs::read_to_string(domain_path)
        .with_context(|| format!("reading domain model {}", domain_path.display()))?;
    let system = std::fs::read_to_string(system_path)
        .with_context(|| format!("reading system model {}", system_path.display()))?;

    tracing::debug!(system = %system_path.display(), domain = %domain_path.display(), "opening system model");
    let model = SystemModel::from_nquads_with_config(&system, &domain, config)
        .with_context(|| format!("loading system model {}", system_path.display()))?;
    Ok(model)
}

/// Machine-readable overview of a loaded system model
///
/// Returns the model summary together with the crate version.
#[cfg(feature = "riskgraph-system")]
pub fn report(model: &SystemModel) -> serde_json::Value {
    serde_json::json!({
        "version": VERSION,
        "summary": model.summary(),
    })
}
