//! Threats

use crate::entity::{system_handle, RiskMode, SystemEntity};
use crate::{Asset, ControlStrategy, MisbehaviourSet, SystemError, TrustworthinessAttributeSet};
use riskgraph_core::model::Term;
use riskgraph_core::text::{split_description, MISSING_TEXT};
use riskgraph_core::vocabulary::Predicate;
use riskgraph_domain::{DomainEntity, Level};
use tracing::error;

/// Level label shown when a threat has no computed level
pub const NOT_APPLICABLE: &str = "N/A";

system_handle!(
    /// A threat instance
    Threat, "Threat" {
        fn label(&self) -> Option<String> {
            self.model.text(self.iri(), Predicate::Label)
        }

        /// Short description; threats are shown by it rather than by label
        fn comment(&self) -> String {
            match self.short_description() {
                Some(short) => short,
                None => {
                    error!(threat = %self.iri(), "threat has no comment, the wrong domain model may be loaded");
                    MISSING_TEXT.to_string()
                }
            }
        }

        fn display_name(&self) -> String {
            self.comment()
        }
    }
);

impl<'m> Threat<'m> {
    fn description(&self) -> Option<String> {
        self.model.text(self.iri(), Predicate::Comment)
    }

    /// Description up to its first unquoted colon
    pub fn short_description(&self) -> Option<String> {
        let comment = self.description()?;
        let short = split_description(&comment).short().to_string();
        Some(short)
    }

    /// Description after its first unquoted colon, first letter uppercased
    pub fn long_description(&self) -> Option<String> {
        let comment = self.description()?;
        split_description(&comment).long()
    }

    pub fn likelihood(&self) -> Option<Level<'m>> {
        self.model.level_ref(self.iri(), Predicate::HasPrior)
    }

    /// `None` until risk calculation has given the threat a likelihood
    pub fn likelihood_level_value(&self) -> Result<Option<i64>, SystemError> {
        Ok(self.likelihood().map(|level| level.level_value()).transpose()?)
    }

    pub fn likelihood_level_label(&self) -> String {
        level_label(self.likelihood())
    }

    pub fn risk(&self) -> Option<Level<'m>> {
        self.model.level_ref(self.iri(), Predicate::HasRisk)
    }

    pub fn risk_level_value(&self) -> Result<Option<i64>, SystemError> {
        Ok(self.risk().map(|level| level.level_value()).transpose()?)
    }

    pub fn risk_level_label(&self) -> String {
        level_label(self.risk())
    }

    pub fn is_normal_op(&self) -> bool {
        self.model.is_true(self.iri(), Predicate::IsNormalOp)
    }

    pub fn is_current_risk(&self) -> bool {
        self.model.is_true(self.iri(), Predicate::IsCurrentRisk)
    }

    pub fn is_future_risk(&self) -> bool {
        self.model.is_true(self.iri(), Predicate::IsFutureRisk)
    }

    pub fn is_root_cause(&self) -> bool {
        self.model.is_true(self.iri(), Predicate::IsRootCause)
    }

    pub fn is_initial_cause(&self) -> bool {
        self.model.is_true(self.iri(), Predicate::IsInitialCause)
    }

    pub fn is_triggered(&self) -> bool {
        self.model.is_true(self.iri(), Predicate::IsTriggered)
    }

    /// Caused by misbehaviours rather than by weak trustworthiness
    pub fn is_secondary_threat(&self) -> bool {
        self.model.has_any(self.iri(), Predicate::HasSecondaryEffectCondition)
    }

    /// Has at least one trustworthiness entry point
    pub fn is_primary_threat(&self) -> bool {
        self.model.has_any(self.iri(), Predicate::HasEntryPoint)
    }

    /// Entry points of a primary threat
    pub fn trustworthiness_attribute_sets(&self) -> Vec<TrustworthinessAttributeSet<'m>> {
        self.model
            .iri_values(self.iri(), Predicate::HasEntryPoint)
            .iter()
            .map(|iri| self.model.trustworthiness_attribute_set(iri))
            .collect()
    }

    /// Misbehaviours that undermine this threat's entry points, found through
    /// the impact sets that affect each entry point
    pub fn primary_misbehaviour_parents(&self) -> Vec<MisbehaviourSet<'m>> {
        let graph = self.model.graph();
        let mut parents = Vec::new();
        for entry_point in self.model.iri_values(self.iri(), Predicate::HasEntryPoint) {
            let impact = graph.subject_value(Predicate::Affects.iri(), &Term::from(&entry_point));
            let cause = impact.and_then(|impact| self.model.iri_value(&impact, Predicate::AffectedBy));
            if let Some(ms) = cause {
                parents.push(self.model.misbehaviour_set(&ms));
            }
        }
        parents
    }

    pub fn secondary_misbehaviour_parents(&self) -> Vec<MisbehaviourSet<'m>> {
        self.misbehaviour_sets(Predicate::HasSecondaryEffectCondition)
    }

    /// Primary parents followed by secondary parents
    pub fn misbehaviour_parents(&self) -> Vec<MisbehaviourSet<'m>> {
        let mut parents = self.primary_misbehaviour_parents();
        parents.extend(self.secondary_misbehaviour_parents());
        parents
    }

    pub fn caused_misbehaviour_sets(&self) -> Vec<MisbehaviourSet<'m>> {
        self.misbehaviour_sets(Predicate::CausesMisbehaviour)
    }

    fn misbehaviour_sets(&self, predicate: Predicate) -> Vec<MisbehaviourSet<'m>> {
        self.model
            .iri_values(self.iri(), predicate)
            .iter()
            .map(|iri| self.model.misbehaviour_set(iri))
            .collect()
    }

    pub fn blocked_by(&self) -> Vec<ControlStrategy<'m>> {
        self.strategies_by(Predicate::BlockedBy)
    }

    pub fn mitigated_by(&self) -> Vec<ControlStrategy<'m>> {
        self.strategies_by(Predicate::MitigatedBy)
    }

    pub fn triggered_by(&self) -> Vec<ControlStrategy<'m>> {
        self.strategies_by(Predicate::TriggeredBy)
    }

    fn strategies_by(&self, predicate: Predicate) -> Vec<ControlStrategy<'m>> {
        self.model
            .iri_values(self.iri(), predicate)
            .iter()
            .map(|iri| self.model.control_strategy(iri))
            .collect()
    }

    pub fn threatens(&self) -> Option<Asset<'m>> {
        self.model
            .iri_value(self.iri(), Predicate::Threatens)
            .map(|iri| self.model.asset(&iri))
    }

    /// Control strategies that count against this threat under `mode`
    pub fn control_strategies(&self, mode: RiskMode) -> Vec<ControlStrategy<'m>> {
        match mode {
            RiskMode::Current => self.current_risk_strategies(),
            RiskMode::Future => self.future_risk_strategies(),
            RiskMode::Both => {
                let mut strategies = self.future_risk_strategies();
                for csg in self.current_risk_strategies() {
                    if !strategies.contains(&csg) {
                        strategies.push(csg);
                    }
                }
                strategies
            }
        }
    }

    fn current_risk_strategies(&self) -> Vec<ControlStrategy<'m>> {
        self.strategies_for(&[Predicate::Blocks])
            .into_iter()
            .filter(|csg| csg.is_current_risk() && !csg.has_inactive_contingency_plan())
            .collect()
    }

    fn future_risk_strategies(&self) -> Vec<ControlStrategy<'m>> {
        self.strategies_for(&[Predicate::Blocks, Predicate::Mitigates])
            .into_iter()
            .filter(|csg| csg.is_future_risk())
            .collect()
    }

    fn strategies_for(&self, predicates: &[Predicate]) -> Vec<ControlStrategy<'m>> {
        let mut strategies: Vec<ControlStrategy<'m>> = Vec::new();
        for predicate in predicates {
            for iri in self.model.iri_subjects(*predicate, self.iri()) {
                let csg = self.model.control_strategy(&iri);
                if !strategies.contains(&csg) {
                    strategies.push(csg);
                }
            }
        }
        strategies
    }
}

fn level_label(level: Option<Level<'_>>) -> String {
    match level {
        Some(level) => level.label().unwrap_or_else(|| level.iri().local_name().to_string()),
        None => NOT_APPLICABLE.to_string(),
    }
}
