//! Shared contract of system entities and the dispatch result type

use crate::model::SystemModel;
use crate::{Asset, ControlSet, ControlStrategy, MisbehaviourSet, Relation, Threat, TrustworthinessAttributeSet};
use riskgraph_core::model::Iri;
use riskgraph_core::text::MISSING_TEXT;
use riskgraph_core::vocabulary::{EntityType, Predicate};
use serde::{Deserialize, Serialize};

/// Cache partition and dispatch tag of a system entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemKind {
    Asset,
    ControlSet,
    ControlStrategy,
    MisbehaviourSet,
    Relation,
    Threat,
    TrustworthinessAttributeSet,
}

impl SystemKind {
    /// Kinds recognised by a fixed type identifier, in dispatch order.
    /// Assets are typed by their domain class instead and come last.
    pub const TYPED: [(EntityType, SystemKind); 6] = [
        (EntityType::MisbehaviourSet, SystemKind::MisbehaviourSet),
        (EntityType::Threat, SystemKind::Threat),
        (EntityType::CardinalityConstraint, SystemKind::Relation),
        (EntityType::ControlStrategy, SystemKind::ControlStrategy),
        (EntityType::TrustworthinessAttributeSet, SystemKind::TrustworthinessAttributeSet),
        (EntityType::ControlSet, SystemKind::ControlSet),
    ];
}

/// Which control strategies count against a threat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskMode {
    /// Blocking strategies usable in current-risk calculation, skipping those
    /// whose runtime contingency plan is inactive
    Current,
    /// Blocking or mitigating strategies flagged for future risk
    Future,
    /// Future-risk strategies followed by current-risk ones, without repeats
    Both,
}

/// Label and comment contract shared by every system entity
pub trait SystemEntity<'m> {
    fn iri(&self) -> &Iri;

    fn model(&self) -> &'m SystemModel;

    fn label(&self) -> Option<String>;

    /// Human-readable one-line description
    fn comment(&self) -> String;

    fn has_id(&self) -> Option<String> {
        self.model().text(self.iri(), Predicate::HasId)
    }

    /// Raw `core:parent` identifier
    fn parent_iri(&self) -> Option<Iri> {
        self.model().iri_value(self.iri(), Predicate::Parent)
    }

    /// Text used by `Display`
    fn display_name(&self) -> String {
        self.label().unwrap_or_else(|| MISSING_TEXT.to_string())
    }
}

macro_rules! system_handle {
    ($(#[$meta:meta])* $name:ident, $title:literal { $($item:item)* }) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name<'m> {
            record: std::sync::Arc<riskgraph_core::cache::EntityRecord<$crate::entity::SystemKind>>,
            model: &'m $crate::model::SystemModel,
        }

        impl<'m> $name<'m> {
            pub(crate) fn new(
                record: std::sync::Arc<riskgraph_core::cache::EntityRecord<$crate::entity::SystemKind>>,
                model: &'m $crate::model::SystemModel,
            ) -> Self {
                Self { record, model }
            }
        }

        impl<'m> $crate::entity::SystemEntity<'m> for $name<'m> {
            fn iri(&self) -> &riskgraph_core::model::Iri {
                self.record.iri()
            }

            fn model(&self) -> &'m $crate::model::SystemModel {
                self.model
            }

            $($item)*
        }

        impl PartialEq for $name<'_> {
            fn eq(&self, other: &Self) -> bool {
                std::sync::Arc::ptr_eq(&self.record, &other.record) && std::ptr::eq(self.model, other.model)
            }
        }

        impl Eq for $name<'_> {}

        impl std::fmt::Debug for $name<'_> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.record.iri().as_str()).finish()
            }
        }

        impl std::fmt::Display for $name<'_> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let shown = $crate::entity::SystemEntity::display_name(self);
                write!(f, "{}: {} ({})", $title, shown, self.record.iri())
            }
        }
    };
}

pub(crate) use system_handle;

/// A classified system entity, as returned by [`SystemModel::get_entity`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entity<'m> {
    Asset(Asset<'m>),
    ControlSet(ControlSet<'m>),
    ControlStrategy(ControlStrategy<'m>),
    MisbehaviourSet(MisbehaviourSet<'m>),
    Relation(Relation<'m>),
    Threat(Threat<'m>),
    TrustworthinessAttributeSet(TrustworthinessAttributeSet<'m>),
}

impl<'m> Entity<'m> {
    pub fn kind(&self) -> SystemKind {
        match self {
            Entity::Asset(_) => SystemKind::Asset,
            Entity::ControlSet(_) => SystemKind::ControlSet,
            Entity::ControlStrategy(_) => SystemKind::ControlStrategy,
            Entity::MisbehaviourSet(_) => SystemKind::MisbehaviourSet,
            Entity::Relation(_) => SystemKind::Relation,
            Entity::Threat(_) => SystemKind::Threat,
            Entity::TrustworthinessAttributeSet(_) => SystemKind::TrustworthinessAttributeSet,
        }
    }

    fn as_dyn(&self) -> &dyn SystemEntity<'m> {
        match self {
            Entity::Asset(entity) => entity,
            Entity::ControlSet(entity) => entity,
            Entity::ControlStrategy(entity) => entity,
            Entity::MisbehaviourSet(entity) => entity,
            Entity::Relation(entity) => entity,
            Entity::Threat(entity) => entity,
            Entity::TrustworthinessAttributeSet(entity) => entity,
        }
    }

    pub fn iri(&self) -> &Iri {
        self.as_dyn().iri()
    }

    pub fn label(&self) -> Option<String> {
        self.as_dyn().label()
    }

    pub fn comment(&self) -> String {
        self.as_dyn().comment()
    }

    pub fn as_asset(&self) -> Option<&Asset<'m>> {
        match self {
            Entity::Asset(asset) => Some(asset),
            _ => None,
        }
    }

    pub fn as_threat(&self) -> Option<&Threat<'m>> {
        match self {
            Entity::Threat(threat) => Some(threat),
            _ => None,
        }
    }

    pub fn as_misbehaviour_set(&self) -> Option<&MisbehaviourSet<'m>> {
        match self {
            Entity::MisbehaviourSet(ms) => Some(ms),
            _ => None,
        }
    }
}

impl std::fmt::Display for Entity<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Entity::Asset(entity) => std::fmt::Display::fmt(entity, f),
            Entity::ControlSet(entity) => std::fmt::Display::fmt(entity, f),
            Entity::ControlStrategy(entity) => std::fmt::Display::fmt(entity, f),
            Entity::MisbehaviourSet(entity) => std::fmt::Display::fmt(entity, f),
            Entity::Relation(entity) => std::fmt::Display::fmt(entity, f),
            Entity::Threat(entity) => std::fmt::Display::fmt(entity, f),
            Entity::TrustworthinessAttributeSet(entity) => std::fmt::Display::fmt(entity, f),
        }
    }
}
