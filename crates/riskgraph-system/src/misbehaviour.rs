//! Misbehaviour sets

use crate::entity::{system_handle, SystemEntity};
use crate::{Asset, SystemError, Threat};
use riskgraph_core::text::{un_camel_case_or_placeholder, MISSING_TEXT};
use riskgraph_core::vocabulary::Predicate;
use riskgraph_domain::{self as domain, DomainEntity, Level};

system_handle!(
    /// A misbehaviour occurring at one asset, also called a consequence
    MisbehaviourSet, "Misbehaviour" {
        fn label(&self) -> Option<String> {
            self.misbehaviour().ok().and_then(|misbehaviour| misbehaviour.label())
        }

        /// Likelihood phrase such as `High likelihood that "Server" loses Availability`
        fn comment(&self) -> String {
            let likelihood = self.likelihood_level_label();
            let likelihood = likelihood.as_deref().unwrap_or(MISSING_TEXT);
            let consequence = self.label().unwrap_or_else(|| MISSING_TEXT.to_string());
            let asset = self.asset().ok().and_then(|asset| asset.label());
            let asset = un_camel_case_or_placeholder(asset.as_deref());

            match aspect_of(&consequence) {
                Some((verb, aspect)) => format!(
                    "{} likelihood that \"{}\" {} {}",
                    likelihood,
                    asset,
                    verb,
                    un_camel_case_or_placeholder(Some(aspect))
                ),
                None => format!(
                    "{} likelihood of: {} at {}",
                    likelihood,
                    un_camel_case_or_placeholder(Some(&consequence)),
                    asset
                ),
            }
        }
    }
);

/// Verb and affected aspect of a `LossOf...`, `Loss Of...` or `Not...` label
fn aspect_of(consequence: &str) -> Option<(&'static str, &str)> {
    if let Some(aspect) = consequence.strip_prefix("LossOf") {
        Some(("loses", aspect))
    } else if let Some(aspect) = consequence.strip_prefix("Loss Of") {
        Some(("loses", aspect))
    } else {
        consequence.strip_prefix("Not").map(|aspect| ("is not", aspect))
    }
}

impl<'m> MisbehaviourSet<'m> {
    pub fn asset(&self) -> Result<Asset<'m>, SystemError> {
        let asset = self.model.required_iri(self.iri(), Predicate::LocatedAt)?;
        Ok(self.model.asset(&asset))
    }

    pub fn misbehaviour(&self) -> Result<domain::Misbehaviour<'m>, SystemError> {
        let misbehaviour = self.model.required_iri(self.iri(), Predicate::HasMisbehaviour)?;
        Ok(self.model.domain().misbehaviour(&misbehaviour))
    }

    pub fn likelihood(&self) -> Option<Level<'m>> {
        self.model.level_ref(self.iri(), Predicate::HasPrior)
    }

    pub fn likelihood_level_value(&self) -> Result<Option<i64>, SystemError> {
        Ok(self.likelihood().map(|level| level.level_value()).transpose()?)
    }

    pub fn likelihood_level_label(&self) -> Option<String> {
        self.likelihood().and_then(|level| level.label())
    }

    pub fn impact(&self) -> Option<Level<'m>> {
        self.model.level_ref(self.iri(), Predicate::HasImpactLevel)
    }

    pub fn impact_level_value(&self) -> Result<Option<i64>, SystemError> {
        Ok(self.impact().map(|level| level.level_value()).transpose()?)
    }

    pub fn impact_level_label(&self) -> Option<String> {
        self.impact().and_then(|level| level.label())
    }

    /// Computed risk level; required for risk aggregation
    pub fn risk_level(&self) -> Result<Level<'m>, SystemError> {
        let level = self.model.required_iri(self.iri(), Predicate::HasRisk)?;
        Ok(self.model.domain().level(&level))
    }

    pub fn risk_level_value(&self) -> Result<i64, SystemError> {
        Ok(self.risk_level()?.level_value()?)
    }

    pub fn risk_level_label(&self) -> Option<String> {
        self.risk_level().ok().and_then(|level| level.label())
    }

    pub fn is_normal_op(&self) -> bool {
        self.model.is_true(self.iri(), Predicate::IsNormalOpEffect)
    }

    pub fn is_external_cause(&self) -> bool {
        self.model.is_true(self.iri(), Predicate::IsExternalCause)
    }

    /// Threats that cause this misbehaviour and have a computed likelihood.
    ///
    /// Untriggered threats carry no likelihood and are left out.
    pub fn threat_parents(&self) -> Result<Vec<Threat<'m>>, SystemError> {
        let mut parents = Vec::new();
        for iri in self.model.iri_subjects(Predicate::CausesMisbehaviour, self.iri()) {
            let threat = self.model.threat(&iri);
            if matches!(threat.likelihood_level_value()?, Some(value) if value >= 0) {
                parents.push(threat);
            }
        }
        Ok(parents)
    }
}
