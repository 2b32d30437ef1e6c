//! Typed links between system assets

use crate::entity::{system_handle, SystemEntity};
use crate::{Asset, SystemError};
use riskgraph_core::text::MISSING_TEXT;
use riskgraph_core::vocabulary::Predicate;
use riskgraph_domain::{self as domain, DomainEntity};

system_handle!(
    /// A relation between two assets, stored as a cardinality constraint
    Relation, "Relation" {
        fn label(&self) -> Option<String> {
            self.relation_type().ok().and_then(|relation| relation.label())
        }

        fn comment(&self) -> String {
            let from = self.links_from().ok().and_then(|asset| asset.label());
            let to = self.links_to().ok().and_then(|asset| asset.label());
            format!(
                "\"{}\" -> {} -> \"{}\"",
                from.as_deref().unwrap_or(MISSING_TEXT),
                self.label().as_deref().unwrap_or(MISSING_TEXT),
                to.as_deref().unwrap_or(MISSING_TEXT)
            )
        }
    }
);

impl<'m> Relation<'m> {
    pub fn relation_type(&self) -> Result<domain::Relation<'m>, SystemError> {
        let relation = self.model.required_iri(self.iri(), Predicate::LinkType)?;
        Ok(self.model.domain().relation(&relation))
    }

    pub fn links_from(&self) -> Result<Asset<'m>, SystemError> {
        let asset = self.model.required_iri(self.iri(), Predicate::LinksFrom)?;
        Ok(self.model.asset(&asset))
    }

    pub fn links_to(&self) -> Result<Asset<'m>, SystemError> {
        let asset = self.model.required_iri(self.iri(), Predicate::LinksTo)?;
        Ok(self.model.asset(&asset))
    }

    pub fn source_cardinality(&self) -> Result<Option<i64>, SystemError> {
        self.model.integer(self.iri(), Predicate::SourceCardinality)
    }

    pub fn target_cardinality(&self) -> Result<Option<i64>, SystemError> {
        self.model.integer(self.iri(), Predicate::TargetCardinality)
    }
}
