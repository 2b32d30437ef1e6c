//! Predicate and entity-type registry
//!
//! Fixed lookup tables from semantic names to graph identifiers. Every
//! predicate the domain and system models read, and every type identifier they
//! classify against, is declared here once.

use crate::model::Iri;
use lazy_static::lazy_static;
use std::collections::HashMap;

pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const OWL: &str = "http://www.w3.org/2002/07/owl#";
pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
pub const CORE: &str = "http://it-innovation.soton.ac.uk/ontologies/trustworthiness/core#";
pub const DOMAIN: &str = "http://it-innovation.soton.ac.uk/ontologies/trustworthiness/domain#";
pub const SYSTEM: &str = "http://it-innovation.soton.ac.uk/ontologies/trustworthiness/system#";

pub const XSD_BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
pub const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

macro_rules! registry {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => ($key:literal, $ns:expr, $local:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Semantic name of the entry
            pub fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $key),+
                }
            }

            pub fn from_name(name: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|entry| entry.name() == name)
            }

            fn expand(self) -> String {
                match self {
                    $($name::$variant => format!("{}{}", $ns, $local)),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

registry! {
    /// Predicates read by the models
    pub enum Predicate {
        Type => ("type", RDF, "type"),
        Label => ("label", RDFS, "label"),
        Comment => ("comment", RDFS, "comment"),
        SubClassOf => ("sub_class_of", RDFS, "subClassOf"),
        Range => ("range", RDFS, "range"),
        Domain => ("domain", RDFS, "domain"),
        VersionInfo => ("version_info", OWL, "versionInfo"),

        AffectedBy => ("affected_by", CORE, "affectedBy"),
        Affects => ("affects", CORE, "affects"),
        AppliesTo => ("applies_to", CORE, "appliesTo"),
        BlockedBy => ("blocked_by", CORE, "blockedBy"),
        Blocks => ("blocks", CORE, "blocks"),
        CausesDirectMisbehaviour => ("causes_direct_misbehaviour", CORE, "causesDirectMisbehaviour"),
        CausesIndirectMisbehaviour => ("causes_indirect_misbehaviour", CORE, "causesIndirectMisbehaviour"),
        CausesMisbehaviour => ("causes_misbehaviour", CORE, "causesMisbehaviour"),
        CausesThreat => ("causes_threat", CORE, "causesThreat"),
        Created => ("created", CORE, "created"),
        DisplayedAtNode => ("displayed_at_node", CORE, "displayedAtNode"),
        DomainVersion => ("domain_version", CORE, "domainVersion"),
        HasAssertedLevel => ("has_asserted_level", CORE, "hasAssertedLevel"),
        HasAsset => ("has_asset", CORE, "hasAsset"),
        HasBlockingEffect => ("has_blocking_effect", CORE, "hasBlockingEffect"),
        HasCategory => ("has_category", CORE, "hasCategory"),
        HasControl => ("has_control", CORE, "hasControl"),
        HasControlSet => ("has_control_set", CORE, "hasControlSet"),
        HasCoverageLevel => ("has_coverage_level", CORE, "hasCoverageLevel"),
        HasEntryPoint => ("has_entry_point", CORE, "hasEntryPoint"),
        HasFrequency => ("has_frequency", CORE, "hasFrequency"),
        HasId => ("has_id", CORE, "hasID"),
        HasImpactLevel => ("has_impact_level", CORE, "hasImpactLevel"),
        HasInferredLevel => ("has_inferred_level", CORE, "hasInferredLevel"),
        HasInferredLink => ("has_inferred_link", CORE, "hasInferredLink"),
        HasInferredNode => ("has_inferred_node", CORE, "hasInferredNode"),
        HasKeyNode => ("has_key_node", CORE, "hasKeyNode"),
        HasLevel => ("has_level", CORE, "hasLevel"),
        HasLink => ("has_link", CORE, "hasLink"),
        HasMandatoryControlSet => ("has_mandatory_control_set", CORE, "hasMandatoryCS"),
        HasMatchingPattern => ("has_matching_pattern", CORE, "hasMatchingPattern"),
        HasMax => ("has_max", CORE, "hasMax"),
        HasMin => ("has_min", CORE, "hasMin"),
        HasMisbehaviour => ("has_misbehaviour", CORE, "hasMisbehaviour"),
        HasNode => ("has_node", CORE, "hasNode"),
        HasOptionalControlSet => ("has_optional_control_set", CORE, "hasOptionalCS"),
        HasPrior => ("has_prior", CORE, "hasPrior"),
        HasPriority => ("has_priority", CORE, "hasPriority"),
        HasRisk => ("has_risk", CORE, "hasRisk"),
        HasRole => ("has_role", CORE, "hasRole"),
        HasRootPattern => ("has_root_pattern", CORE, "hasRootPattern"),
        HasSecondaryEffectCondition => ("has_secondary_effect_condition", CORE, "hasSecondaryEffectCondition"),
        HasTwa => ("has_twa", CORE, "hasTrustworthinessAttribute"),
        IndependentLevels => ("independent_levels", CORE, "independentLevels"),
        IsAssertable => ("is_assertable", CORE, "isAssertable"),
        IsCalculatingRisk => ("is_calculating_risk", CORE, "isCalculatingRisk"),
        IsCurrentRisk => ("is_current_risk", CORE, "isCurrentRisk"),
        IsExternalCause => ("is_external_cause", CORE, "isExternalCause"),
        IsFutureRisk => ("is_future_risk", CORE, "isFutureRisk"),
        IsInitialCause => ("is_initial_cause", CORE, "isInitialCause"),
        IsNormalOp => ("is_normal_op", CORE, "isNormalOp"),
        IsNormalOpEffect => ("is_normal_op_effect", CORE, "isNormalOpEffect"),
        IsProposed => ("is_proposed", CORE, "isProposed"),
        IsRootCause => ("is_root_cause", CORE, "isRootCause"),
        IsSecondaryThreat => ("is_secondary_threat", CORE, "isSecondaryThreat"),
        IsTriggered => ("is_triggered", CORE, "isTriggered"),
        IsValid => ("is_valid", CORE, "isValid"),
        IsValidating => ("is_validating", CORE, "isValidating"),
        IsVisible => ("is_visible", CORE, "isVisible"),
        IsWorkInProgress => ("is_work_in_progress", CORE, "isWorkInProgress"),
        Iterate => ("iterate", CORE, "iterate"),
        LevelValue => ("level_value", CORE, "levelValue"),
        LinkType => ("link_type", CORE, "linkType"),
        LinksFrom => ("links_from", CORE, "linksFrom"),
        LinksTo => ("links_to", CORE, "linksTo"),
        LocatedAt => ("located_at", CORE, "locatedAt"),
        MaxIterations => ("max_iterations", CORE, "maxIterations"),
        MetaHasAsset => ("meta_has_asset", CORE, "metaHasAsset"),
        MetaLocatedAt => ("meta_located_at", CORE, "metaLocatedAt"),
        MinOf => ("min_of", CORE, "minOf"),
        MitigatedBy => ("mitigated_by", CORE, "mitigatedBy"),
        Mitigates => ("mitigates", CORE, "mitigates"),
        Modified => ("modified", CORE, "modified"),
        Parent => ("parent", CORE, "parent"),
        PerformanceImpact => ("performance_impact", CORE, "performanceImpact"),
        Population => ("population", CORE, "population"),
        RiskCalculationMode => ("risk_calculation_mode", CORE, "riskCalculationMode"),
        RisksValid => ("risks_valid", CORE, "risksValid"),
        SourceCardinality => ("source_cardinality", CORE, "sourceCardinality"),
        TargetCardinality => ("target_cardinality", CORE, "targetCardinality"),
        Threatens => ("threatens", CORE, "threatens"),
        TriggeredBy => ("triggered_by", CORE, "triggeredBy"),
        Triggers => ("triggers", CORE, "triggers"),
        UnitCost => ("unit_cost", CORE, "unitCost"),
    }
}

registry! {
    /// Type identifiers used for classification
    pub enum EntityType {
        Ontology => ("ontology", OWL, "Ontology"),
        Asset => ("asset", OWL, "Class"),
        Relation => ("relation", OWL, "ObjectProperty"),
        CardinalityConstraint => ("cardinality_constraint", CORE, "CardinalityConstraint"),
        CaSetting => ("ca_setting", CORE, "CASetting"),
        ComplianceSet => ("compliance_set", CORE, "ComplianceSet"),
        ConstructionPattern => ("construction_pattern", CORE, "ConstructionPattern"),
        Control => ("control", CORE, "Control"),
        ControlSet => ("control_set", CORE, "ControlSet"),
        ControlStrategy => ("control_strategy", CORE, "ControlStrategy"),
        InferredLink => ("inferred_link", CORE, "InferredLink"),
        MaDefaultSetting => ("ma_default_setting", CORE, "MADefaultSetting"),
        MatchingPattern => ("matching_pattern", CORE, "MatchingPattern"),
        Misbehaviour => ("misbehaviour", CORE, "Misbehaviour"),
        MisbehaviourSet => ("misbehaviour_set", CORE, "MisbehaviourSet"),
        Node => ("node", CORE, "Node"),
        Role => ("role", CORE, "Role"),
        RoleLink => ("role_link", CORE, "RoleLink"),
        RootPattern => ("root_pattern", CORE, "RootPattern"),
        Threat => ("threat", CORE, "Threat"),
        ThreatCategory => ("threat_category", CORE, "ThreatCategory"),
        TrustworthinessAttribute => ("trustworthiness_attribute", CORE, "TrustworthinessAttribute"),
        TrustworthinessAttributeSet => ("trustworthiness_attribute_set", CORE, "TrustworthinessAttributeSet"),
        TrustworthinessImpactSet => ("trustworthiness_impact_set", CORE, "TrustworthinessImpactSet"),
        TwaaDefaultSetting => ("twaa_default_setting", CORE, "TWAADefaultSetting"),
        CostLevel => ("cost_level", CORE, "CostLevel"),
        ImpactLevel => ("impact_level", CORE, "ImpactLevel"),
        Likelihood => ("likelihood", CORE, "Likelihood"),
        PerformanceImpactLevel => ("performance_impact_level", CORE, "PerformanceImpactLevel"),
        PopulationLevel => ("population_level", CORE, "PopulationLevel"),
        RiskLevel => ("risk_level", CORE, "RiskLevel"),
        TrustworthinessLevel => ("trustworthiness_level", CORE, "TrustworthinessLevel"),
    }
}

lazy_static! {
    static ref PREDICATE_IRIS: HashMap<Predicate, Iri> = Predicate::ALL
        .iter()
        .map(|predicate| (*predicate, Iri::new(predicate.expand())))
        .collect();
    static ref TYPE_IRIS: HashMap<EntityType, Iri> = EntityType::ALL
        .iter()
        .map(|entity_type| (*entity_type, Iri::new(entity_type.expand())))
        .collect();
}

impl Predicate {
    pub fn iri(self) -> &'static Iri {
        &PREDICATE_IRIS[&self]
    }
}

impl EntityType {
    pub fn iri(self) -> &'static Iri {
        &TYPE_IRIS[&self]
    }
}

/// Identifier of the predicate registered under `name`
pub fn predicate(name: &str) -> Option<&'static Iri> {
    Predicate::from_name(name).map(Predicate::iri)
}

/// Identifier of the entity type registered under `kind_name`
pub fn type_identifier(kind_name: &str) -> Option<&'static Iri> {
    EntityType::from_name(kind_name).map(EntityType::iri)
}
