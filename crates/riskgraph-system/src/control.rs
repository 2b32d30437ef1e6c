//! Control sets and control strategies

use crate::entity::{system_handle, SystemEntity};
use crate::{Asset, SystemError, Threat};
use itertools::Itertools;
use riskgraph_core::model::Iri;
use riskgraph_core::text::{un_camel_case_or_placeholder, MISSING_TEXT};
use riskgraph_core::vocabulary::{EntityType, Predicate};
use riskgraph_domain::{self as domain, DomainEntity, Level};

system_handle!(
    /// A domain control applied at one asset
    ControlSet, "Control Set" {
        fn label(&self) -> Option<String> {
            self.control().ok().and_then(|control| control.label())
        }

        fn comment(&self) -> String {
            let asset = self.asset().ok().and_then(|asset| asset.label());
            format!(
                "{} at \"{}\" is {}",
                self.label().as_deref().unwrap_or(MISSING_TEXT),
                asset.as_deref().unwrap_or(MISSING_TEXT),
                if self.is_proposed() { "active" } else { "inactive" }
            )
        }
    }
);

impl<'m> ControlSet<'m> {
    pub fn asset(&self) -> Result<Asset<'m>, SystemError> {
        let asset = self.model.required_iri(self.iri(), Predicate::LocatedAt)?;
        Ok(self.model.asset(&asset))
    }

    pub fn control(&self) -> Result<domain::Control<'m>, SystemError> {
        let control = self.model.required_iri(self.iri(), Predicate::HasControl)?;
        Ok(self.model.domain().control(&control))
    }

    /// Stated true in either the asserted or the inferred graph
    pub fn is_proposed(&self) -> bool {
        self.model.is_true(self.iri(), Predicate::IsProposed)
    }

    pub fn is_work_in_progress(&self) -> bool {
        self.model.is_true(self.iri(), Predicate::IsWorkInProgress)
    }

    pub fn coverage(&self) -> Option<Level<'m>> {
        self.model.level_ref(self.iri(), Predicate::HasCoverageLevel)
    }

    pub fn coverage_level_value(&self) -> Result<Option<i64>, SystemError> {
        Ok(self.coverage().map(|level| level.level_value()).transpose()?)
    }

    pub fn coverage_level_label(&self) -> Option<String> {
        self.coverage().and_then(|level| level.label())
    }
}

system_handle!(
    /// An instance of a domain control strategy
    ControlStrategy, "Control Strategy" {
        fn label(&self) -> Option<String> {
            self.parent().ok().and_then(|parent| parent.label())
        }

        /// Readable label followed by the sorted, quoted labels of the assets
        /// its control sets sit at
        fn comment(&self) -> String {
            let assets = self
                .control_sets()
                .iter()
                .map(|cs| {
                    let label = cs.asset().ok().and_then(|asset| asset.label());
                    format!("\"{}\"", label.as_deref().unwrap_or(MISSING_TEXT))
                })
                .sorted()
                .join(", ");
            format!("{} ({})", un_camel_case_or_placeholder(self.label().as_deref()), assets)
        }
    }
);

impl<'m> ControlStrategy<'m> {
    /// Domain control strategy this one instantiates
    pub fn parent(&self) -> Result<domain::ControlStrategy<'m>, SystemError> {
        let parent = self.model.required_iri(self.iri(), Predicate::Parent)?;
        Ok(self.model.domain().control_strategy(&parent))
    }

    pub fn effectiveness_value(&self) -> Result<Option<i64>, SystemError> {
        Ok(self.parent()?.effectiveness_value()?)
    }

    pub fn effectiveness_label(&self) -> Option<String> {
        self.parent().ok().and_then(|parent| parent.effectiveness_label())
    }

    pub fn maximum_likelihood_value(&self) -> Result<Option<i64>, SystemError> {
        Ok(self.parent()?.maximum_likelihood_value()?)
    }

    pub fn is_current_risk(&self) -> bool {
        self.parent().map_or(false, |parent| parent.is_current_risk())
    }

    pub fn is_future_risk(&self) -> bool {
        self.parent().map_or(false, |parent| parent.is_future_risk())
    }

    pub fn blocked_threats(&self) -> Vec<Threat<'m>> {
        self.threats(Predicate::Blocks)
    }

    pub fn mitigated_threats(&self) -> Vec<Threat<'m>> {
        self.threats(Predicate::Mitigates)
    }

    pub fn triggered_threats(&self) -> Vec<Threat<'m>> {
        self.threats(Predicate::Triggers)
    }

    fn threats(&self, predicate: Predicate) -> Vec<Threat<'m>> {
        self.model
            .iri_values(self.iri(), predicate)
            .iter()
            .map(|iri| self.model.threat(iri))
            .collect()
    }

    /// All mandatory control sets are proposed
    pub fn is_active(&self) -> bool {
        self.mandatory_control_sets().iter().all(|cs| cs.is_proposed())
    }

    pub fn mandatory_control_sets(&self) -> Vec<ControlSet<'m>> {
        self.control_sets_by(Predicate::HasMandatoryControlSet)
    }

    pub fn optional_control_sets(&self) -> Vec<ControlSet<'m>> {
        self.control_sets_by(Predicate::HasOptionalControlSet)
    }

    /// Mandatory control sets followed by optional ones
    pub fn control_sets(&self) -> Vec<ControlSet<'m>> {
        let mut control_sets = self.mandatory_control_sets();
        control_sets.extend(self.optional_control_sets());
        control_sets
    }

    fn control_sets_by(&self, predicate: Predicate) -> Vec<ControlSet<'m>> {
        self.model
            .iri_values(self.iri(), predicate)
            .iter()
            .map(|iri| self.model.control_set(iri))
            .collect()
    }

    /// Runtime counterpart of an `-Implementation` strategy
    pub fn contingency_plan(&self) -> Option<ControlStrategy<'m>> {
        let iri = self.iri().as_str();
        if !iri.contains("-Implementation") {
            return None;
        }
        let runtime = Iri::new(iri.replace("-Implementation", "-Runtime"));
        if self.model.has_type(&runtime, EntityType::ControlStrategy) {
            Some(self.model.control_strategy(&runtime))
        } else {
            None
        }
    }

    /// True for an implementation strategy whose runtime contingency plan
    /// exists but is not active
    pub fn has_inactive_contingency_plan(&self) -> bool {
        self.contingency_plan().map_or(false, |plan| !plan.is_active())
    }
}

#[cfg(test)]
mod tests {
    use crate::model::SystemModel;
    use crate::SystemEntity;
    use riskgraph_core::model::Iri;

    const DOMAIN: &str = r#"
<http://example.org/domain> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://www.w3.org/2002/07/owl#Ontology> <http://example.org/domain> .
<http://example.org/domain> <http://www.w3.org/2002/07/owl#versionInfo> "1" <http://example.org/domain> .
<http://example.org/domain#Host> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://www.w3.org/2002/07/owl#Class> <http://example.org/domain> .
<http://example.org/domain#Patching> <http://www.w3.org/2000/01/rdf-schema#label> "SoftwarePatching" <http://example.org/domain> .
<http://example.org/domain#CSG-Patching-Implementation> <http://www.w3.org/2000/01/rdf-schema#label> "PatchingImplementation" <http://example.org/domain> .
<http://example.org/domain#CSG-Patching-Implementation> <http://it-innovation.soton.ac.uk/ontologies/trustworthiness/core#isCurrentRisk> "true"^^<http://www.w3.org/2001/XMLSchema#boolean> <http://example.org/domain> .
"#;

    const SYSTEM: &str = r#"
<http://example.org/system> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://www.w3.org/2002/07/owl#Ontology> <http://example.org/system> .
<http://example.org/system> <http://it-innovation.soton.ac.uk/ontologies/trustworthiness/core#domainVersion> "1" <http://example.org/system> .
<http://example.org/system#web> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://example.org/domain#Host> <http://example.org/system> .
<http://example.org/system#web> <http://www.w3.org/2000/01/rdf-schema#label> "Web" <http://example.org/system> .
<http://example.org/system#db> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://example.org/domain#Host> <http://example.org/system> .
<http://example.org/system#db> <http://www.w3.org/2000/01/rdf-schema#label> "DB" <http://example.org/system> .
<http://example.org/system#CS-Patching-web> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://it-innovation.soton.ac.uk/ontologies/trustworthiness/core#ControlSet> <http://example.org/system/inf> .
<http://example.org/system#CS-Patching-web> <http://it-innovation.soton.ac.uk/ontologies/trustworthiness/core#locatedAt> <http://example.org/system#web> <http://example.org/system/inf> .
<http://example.org/system#CS-Patching-web> <http://it-innovation.soton.ac.uk/ontologies/trustworthiness/core#hasControl> <http://example.org/domain#Patching> <http://example.org/system/inf> .
<http://example.org/system#CS-Patching-web> <http://it-innovation.soton.ac.uk/ontologies/trustworthiness/core#isProposed> "true"^^<http://www.w3.org/2001/XMLSchema#boolean> <http://example.org/system> .
<http://example.org/system#CS-Patching-db> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://it-innovation.soton.ac.uk/ontologies/trustworthiness/core#ControlSet> <http://example.org/system/inf> .
<http://example.org/system#CS-Patching-db> <http://it-innovation.soton.ac.uk/ontologies/trustworthiness/core#locatedAt> <http://example.org/system#db> <http://example.org/system/inf> .
<http://example.org/system#CS-Patching-db> <http://it-innovation.soton.ac.uk/ontologies/trustworthiness/core#hasControl> <http://example.org/domain#Patching> <http://example.org/system/inf> .
<http://example.org/system#CSG-Patching-Implementation-1> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://it-innovation.soton.ac.uk/ontologies/trustworthiness/core#ControlStrategy> <http://example.org/system/inf> .
<http://example.org/system#CSG-Patching-Implementation-1> <http://it-innovation.soton.ac.uk/ontologies/trustworthiness/core#parent> <http://example.org/domain#CSG-Patching-Implementation> <http://example.org/system/inf> .
<http://example.org/system#CSG-Patching-Implementation-1> <http://it-innovation.soton.ac.uk/ontologies/trustworthiness/core#hasMandatoryCS> <http://example.org/system#CS-Patching-web> <http://example.org/system/inf> .
<http://example.org/system#CSG-Patching-Implementation-1> <http://it-innovation.soton.ac.uk/ontologies/trustworthiness/core#hasOptionalCS> <http://example.org/system#CS-Patching-db> <http://example.org/system/inf> .
<http://example.org/system#CSG-Patching-Runtime-1> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://it-innovation.soton.ac.uk/ontologies/trustworthiness/core#ControlStrategy> <http://example.org/system/inf> .
<http://example.org/system#CSG-Patching-Runtime-1> <http://it-innovation.soton.ac.uk/ontologies/trustworthiness/core#hasMandatoryCS> <http://example.org/system#CS-Patching-db> <http://example.org/system/inf> .
"#;

    fn model() -> SystemModel {
        SystemModel::from_nquads(SYSTEM, DOMAIN).unwrap()
    }

    fn iri(local: &str) -> Iri {
        Iri::new(format!("http://example.org/system#{}", local))
    }

    #[test]
    fn test_control_set_fields() {
        let model = model();
        let cs = model.control_set(&iri("CS-Patching-web"));
        assert_eq!(cs.label().as_deref(), Some("SoftwarePatching"));
        assert_eq!(cs.comment(), "SoftwarePatching at \"Web\" is active");
        assert!(cs.is_proposed());
        assert!(!cs.is_work_in_progress());
        assert_eq!(cs.asset().unwrap(), model.asset(&iri("web")));

        let inactive = model.control_set(&iri("CS-Patching-db"));
        assert_eq!(inactive.comment(), "SoftwarePatching at \"DB\" is inactive");
        assert_eq!(inactive.coverage_level_value().unwrap(), None);
    }

    #[test]
    fn test_control_strategy_fields() {
        let model = model();
        let csg = model.control_strategy(&iri("CSG-Patching-Implementation-1"));
        assert_eq!(csg.label().as_deref(), Some("PatchingImplementation"));
        assert_eq!(csg.comment(), "Patching Implementation (\"DB\", \"Web\")");
        assert!(csg.is_active());
        assert!(csg.is_current_risk());
        assert!(!csg.is_future_risk());
        assert_eq!(csg.control_sets().len(), 2);
        assert_eq!(csg.effectiveness_value().unwrap(), None);
    }

    #[test]
    fn test_inactive_contingency_plan() {
        let model = model();
        let csg = model.control_strategy(&iri("CSG-Patching-Implementation-1"));
        let plan = csg.contingency_plan().unwrap();
        assert_eq!(plan, model.control_strategy(&iri("CSG-Patching-Runtime-1")));
        assert!(!plan.is_active());
        assert!(csg.has_inactive_contingency_plan());
        assert!(!plan.has_inactive_contingency_plan());
    }

    #[test]
    fn test_missing_parent_is_reported() {
        let model = model();
        let csg = model.control_strategy(&iri("CSG-Patching-Runtime-1"));
        assert!(matches!(csg.parent(), Err(crate::SystemError::MissingReference { .. })));
        assert_eq!(csg.label(), None);
        assert!(!csg.is_current_risk());
    }
}
