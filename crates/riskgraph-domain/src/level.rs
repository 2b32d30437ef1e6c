//! Ranked level scales

use crate::entity::{domain_handle, DomainEntity};
use crate::DomainError;
use riskgraph_core::vocabulary::EntityType;

/// The level scales a domain model declares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LevelKind {
    Trustworthiness,
    Population,
    Risk,
    Cost,
    Impact,
    PerformanceImpact,
    Likelihood,
}

impl LevelKind {
    pub const ALL: [LevelKind; 7] = [
        LevelKind::Trustworthiness,
        LevelKind::Population,
        LevelKind::Risk,
        LevelKind::Cost,
        LevelKind::Impact,
        LevelKind::PerformanceImpact,
        LevelKind::Likelihood,
    ];

    pub fn entity_type(self) -> EntityType {
        match self {
            LevelKind::Trustworthiness => EntityType::TrustworthinessLevel,
            LevelKind::Population => EntityType::PopulationLevel,
            LevelKind::Risk => EntityType::RiskLevel,
            LevelKind::Cost => EntityType::CostLevel,
            LevelKind::Impact => EntityType::ImpactLevel,
            LevelKind::PerformanceImpact => EntityType::PerformanceImpactLevel,
            LevelKind::Likelihood => EntityType::Likelihood,
        }
    }
}

domain_handle!(
    /// One rung of a level scale
    Level
);

impl<'m> Level<'m> {
    pub fn level_value(&self) -> Result<i64, DomainError> {
        self.model.level_value(self.iri())
    }

    /// Scale this level is declared on, if any
    pub fn kind(&self) -> Option<LevelKind> {
        LevelKind::ALL
            .iter()
            .copied()
            .find(|kind| self.model.has_type(self.iri(), kind.entity_type()))
    }
}
