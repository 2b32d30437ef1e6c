//! Trustworthiness attribute sets

use crate::entity::{system_handle, SystemEntity};
use crate::{Asset, SystemError};
use riskgraph_core::text::{un_camel_case_or_placeholder, MISSING_TEXT};
use riskgraph_core::vocabulary::Predicate;
use riskgraph_domain::{self as domain, DomainEntity, Level};

system_handle!(
    /// Asserted and inferred trustworthiness of one attribute at one asset
    TrustworthinessAttributeSet, "Trustworthiness Attribute Set" {
        fn label(&self) -> Option<String> {
            self.trustworthiness_attribute().ok().and_then(|twa| twa.label())
        }

        fn comment(&self) -> String {
            let asset = self.asset().ok().and_then(|asset| asset.label());
            format!(
                "{} of \"{}\" is {}",
                un_camel_case_or_placeholder(self.label().as_deref()),
                asset.as_deref().unwrap_or(MISSING_TEXT),
                self.inferred_level_label().as_deref().unwrap_or(MISSING_TEXT)
            )
        }
    }
);

impl<'m> TrustworthinessAttributeSet<'m> {
    pub fn trustworthiness_attribute(&self) -> Result<domain::TrustworthinessAttribute<'m>, SystemError> {
        let twa = self.model.required_iri(self.iri(), Predicate::HasTwa)?;
        Ok(self.model.domain().trustworthiness_attribute(&twa))
    }

    pub fn asset(&self) -> Result<Asset<'m>, SystemError> {
        let asset = self.model.required_iri(self.iri(), Predicate::LocatedAt)?;
        Ok(self.model.asset(&asset))
    }

    pub fn asserted_level(&self) -> Option<Level<'m>> {
        self.model.level_ref(self.iri(), Predicate::HasAssertedLevel)
    }

    pub fn asserted_level_value(&self) -> Result<Option<i64>, SystemError> {
        Ok(self.asserted_level().map(|level| level.level_value()).transpose()?)
    }

    pub fn asserted_level_label(&self) -> Option<String> {
        self.asserted_level().and_then(|level| level.label())
    }

    pub fn inferred_level(&self) -> Option<Level<'m>> {
        self.model.level_ref(self.iri(), Predicate::HasInferredLevel)
    }

    pub fn inferred_level_value(&self) -> Result<Option<i64>, SystemError> {
        Ok(self.inferred_level().map(|level| level.level_value()).transpose()?)
    }

    pub fn inferred_level_label(&self) -> Option<String> {
        self.inferred_level().and_then(|level| level.label())
    }

    pub fn is_external_cause(&self) -> bool {
        self.model.is_true(self.iri(), Predicate::IsExternalCause)
    }
}
