//! System assets

use crate::entity::{system_handle, SystemEntity};
use crate::{ControlSet, MisbehaviourSet, Relation, SystemError, TrustworthinessAttributeSet};
use riskgraph_core::text::MISSING_TEXT;
use riskgraph_core::vocabulary::Predicate;
use riskgraph_domain::{self as domain, DomainEntity, Level};

system_handle!(
    /// An asset instance, typed by a domain asset class
    Asset, "System Asset" {
        fn label(&self) -> Option<String> {
            self.model.text(self.iri(), Predicate::Label)
        }

        /// Comment of the asset's domain class
        fn comment(&self) -> String {
            self.class()
                .ok()
                .and_then(|class| class.comment())
                .unwrap_or_else(|| MISSING_TEXT.to_string())
        }
    }
);

impl<'m> Asset<'m> {
    /// Domain asset class this asset instantiates
    pub fn class(&self) -> Result<domain::Asset<'m>, SystemError> {
        let class = self
            .model
            .asset_class(self.iri())
            .ok_or_else(|| SystemError::MissingReference {
                entity: self.iri().clone(),
                predicate: Predicate::Type.iri().clone(),
            })?;
        Ok(self.model.domain().asset(&class))
    }

    /// True unless the asset's label was stated in the inferred graph
    pub fn is_asserted(&self) -> bool {
        !self.model.is_inferred(self.iri(), Predicate::Label)
    }

    pub fn population(&self) -> Option<Level<'m>> {
        self.model.level_ref(self.iri(), Predicate::Population)
    }

    pub fn population_level_value(&self) -> Result<Option<i64>, SystemError> {
        Ok(self.population().map(|level| level.level_value()).transpose()?)
    }

    pub fn population_level_label(&self) -> Option<String> {
        self.population().and_then(|level| level.label())
    }

    pub fn trustworthiness_attribute_sets(&self) -> Vec<TrustworthinessAttributeSet<'m>> {
        self.model
            .trustworthiness_attribute_sets()
            .into_iter()
            .filter(|twas| matches!(twas.asset(), Ok(asset) if asset == *self))
            .collect()
    }

    pub fn control_sets(&self) -> Vec<ControlSet<'m>> {
        self.model
            .control_sets()
            .into_iter()
            .filter(|cs| matches!(cs.asset(), Ok(asset) if asset == *self))
            .collect()
    }

    pub fn misbehaviour_sets(&self) -> Vec<MisbehaviourSet<'m>> {
        self.model
            .misbehaviour_sets()
            .into_iter()
            .filter(|ms| matches!(ms.asset(), Ok(asset) if asset == *self))
            .collect()
    }

    /// Relations leaving this asset
    pub fn links_to(&self) -> Vec<Relation<'m>> {
        self.model
            .iri_subjects(Predicate::LinksFrom, self.iri())
            .iter()
            .map(|iri| self.model.relation(iri))
            .collect()
    }

    /// Relations arriving at this asset
    pub fn links_from(&self) -> Vec<Relation<'m>> {
        self.model
            .iri_subjects(Predicate::LinksTo, self.iri())
            .iter()
            .map(|iri| self.model.relation(iri))
            .collect()
    }

    /// Outgoing relations whose target is an asserted asset
    pub fn links_to_asserted(&self) -> Vec<Relation<'m>> {
        self.links_to()
            .into_iter()
            .filter(|link| link.links_to().map_or(false, |asset| asset.is_asserted()))
            .collect()
    }

    /// Incoming relations whose source is an asserted asset
    pub fn links_from_asserted(&self) -> Vec<Relation<'m>> {
        self.links_from()
            .into_iter()
            .filter(|link| link.links_from().map_or(false, |asset| asset.is_asserted()))
            .collect()
    }
}
