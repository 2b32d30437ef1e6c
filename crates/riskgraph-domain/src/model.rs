//! Domain model loading, lookups and entity factories

use crate::entity::*;
use crate::level::{Level, LevelKind};
use crate::DomainError;
use riskgraph_core::cache::EntityCache;
use riskgraph_core::config::{LevelCeiling, ModelConfig};
use riskgraph_core::model::{Iri, Term};
use riskgraph_core::vocabulary::{EntityType, Predicate};
use riskgraph_store::{Graph, RdfStore};
use std::io::BufRead;
use tracing::info;

/// A loaded threat-catalogue domain model.
///
/// Read-only after construction. Entity handles borrow the model; each
/// `(kind, identifier)` pair is backed by a single cached record for the
/// lifetime of the model.
pub struct DomainModel {
    graph: Box<dyn Graph + Send + Sync>,
    config: ModelConfig,
    ontology_iri: Iri,
    level_ceiling: i64,
    cache: EntityCache<DomainKind>,
}

macro_rules! factories {
    ($($factory:ident, $enumeration:ident => $handle:ident, $entity_type:ident;)+) => {
        impl DomainModel {
            $(
                pub fn $factory(&self, iri: &Iri) -> $handle<'_> {
                    $handle::new(self.cache.get_or_insert(DomainKind::$handle, iri), self)
                }

                pub fn $enumeration(&self) -> Vec<$handle<'_>> {
                    self.scan(EntityType::$entity_type)
                        .iter()
                        .map(|iri| self.$factory(iri))
                        .collect()
                }
            )+
        }
    };
}

factories! {
    asset, assets => Asset, Asset;
    ca_setting, ca_settings => CaSetting, CaSetting;
    construction_pattern, construction_patterns => ConstructionPattern, ConstructionPattern;
    control, controls => Control, Control;
    control_set, control_sets => ControlSet, ControlSet;
    control_strategy, control_strategies => ControlStrategy, ControlStrategy;
    inferred_link, inferred_links => InferredLink, InferredLink;
    ma_default_setting, ma_default_settings => MaDefaultSetting, MaDefaultSetting;
    matching_pattern, matching_patterns => MatchingPattern, MatchingPattern;
    misbehaviour, misbehaviours => Misbehaviour, Misbehaviour;
    misbehaviour_set, misbehaviour_sets => MisbehaviourSet, MisbehaviourSet;
    node, nodes => Node, Node;
    relation, relations => Relation, Relation;
    role, roles => Role, Role;
    role_link, role_links => RoleLink, RoleLink;
    root_pattern, root_patterns => RootPattern, RootPattern;
    threat, threats => Threat, Threat;
    threat_category, threat_categories => ThreatCategory, ThreatCategory;
    trustworthiness_attribute, trustworthiness_attributes => TrustworthinessAttribute, TrustworthinessAttribute;
    trustworthiness_attribute_set, trustworthiness_attribute_sets => TrustworthinessAttributeSet, TrustworthinessAttributeSet;
    trustworthiness_impact_set, trustworthiness_impact_sets => TrustworthinessImpactSet, TrustworthinessImpactSet;
}

impl DomainModel {
    /// Wrap a parsed domain graph with the default configuration
    pub fn load<G>(graph: G) -> Result<Self, DomainError>
    where
        G: Graph + Send + Sync + 'static,
    {
        Self::with_config(graph, ModelConfig::default())
    }

    /// Wrap a parsed domain graph.
    ///
    /// Fails with [`DomainError::MalformedGraph`] when the graph declares no
    /// ontology, or when the level ceiling is derived and no likelihood levels
    /// exist.
    pub fn with_config<G>(graph: G, config: ModelConfig) -> Result<Self, DomainError>
    where
        G: Graph + Send + Sync + 'static,
    {
        config.validate()?;
        let graph: Box<dyn Graph + Send + Sync> = Box::new(graph);
        let ontology_iri = graph
            .subject_value(Predicate::Type.iri(), &Term::from(EntityType::Ontology.iri()))
            .ok_or_else(|| DomainError::MalformedGraph("no owl:Ontology declaration found".to_string()))?;

        let mut model = Self {
            graph,
            config,
            ontology_iri,
            level_ceiling: 0,
            cache: EntityCache::new(),
        };
        model.level_ceiling = match model.config.level_ceiling {
            LevelCeiling::Fixed(ceiling) => ceiling,
            LevelCeiling::Derived => model.derive_level_ceiling()?,
        };

        info!(
            ontology = %model.ontology_iri,
            version = ?model.version_info(),
            level_ceiling = model.level_ceiling,
            assets = model.scan(EntityType::Asset).len(),
            threats = model.scan(EntityType::Threat).len(),
            "loaded domain model"
        );
        Ok(model)
    }

    pub fn from_nquads(source: &str) -> Result<Self, DomainError> {
        Self::load(RdfStore::from_nquads(source)?)
    }

    pub fn from_nquads_with_config(source: &str, config: ModelConfig) -> Result<Self, DomainError> {
        Self::with_config(RdfStore::from_nquads(source)?, config)
    }

    pub fn read_nquads<R: BufRead>(reader: R) -> Result<Self, DomainError> {
        Self::load(RdfStore::read_nquads(reader)?)
    }

    fn derive_level_ceiling(&self) -> Result<i64, DomainError> {
        let mut ceiling = None;
        for level in self.level_range(LevelKind::Likelihood) {
            let value = level.level_value()?;
            ceiling = Some(ceiling.map_or(value, |current: i64| current.max(value)));
        }
        ceiling.ok_or_else(|| {
            DomainError::MalformedGraph("no likelihood levels to derive the level ceiling from".to_string())
        })
    }

    pub fn graph(&self) -> &(dyn Graph + Send + Sync) {
        self.graph.as_ref()
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn ontology_iri(&self) -> &Iri {
        &self.ontology_iri
    }

    pub fn version_info(&self) -> Option<String> {
        self.text(&self.ontology_iri, Predicate::VersionInfo)
    }

    pub fn label(&self) -> Option<String> {
        self.label_of(&self.ontology_iri)
    }

    pub fn comment(&self) -> Option<String> {
        self.comment_of(&self.ontology_iri)
    }

    /// True when `iri` is declared as an asset class
    pub fn is_asset(&self, iri: &Iri) -> bool {
        self.has_type(iri, EntityType::Asset)
    }

    pub fn has_type(&self, iri: &Iri, entity_type: EntityType) -> bool {
        self.graph
            .contains(iri, Predicate::Type.iri(), &Term::from(entity_type.iri()))
    }

    pub fn label_of(&self, iri: &Iri) -> Option<String> {
        self.text(iri, Predicate::Label)
    }

    pub fn comment_of(&self, iri: &Iri) -> Option<String> {
        self.text(iri, Predicate::Comment)
    }

    /// Integer rank of a level
    pub fn level_value(&self, level: &Iri) -> Result<i64, DomainError> {
        let value = self.graph.value(level, Predicate::LevelValue.iri()).ok_or_else(|| {
            DomainError::InvalidLevel {
                level: level.clone(),
                reason: "no level value".to_string(),
            }
        })?;
        match value.as_literal().map(|literal| literal.as_integer()) {
            Some(Ok(number)) => Ok(number),
            _ => Err(DomainError::InvalidLevel {
                level: level.clone(),
                reason: format!("level value {:?} is not an integer", value.lexical()),
            }),
        }
    }

    pub fn level_label(&self, level: &Iri) -> Option<String> {
        self.label_of(level)
    }

    /// `ceiling - number`, turning a blocking effectiveness into the highest
    /// likelihood it leaves
    pub fn level_number_inverse(&self, number: i64) -> i64 {
        self.level_ceiling - number
    }

    pub fn level_ceiling(&self) -> i64 {
        self.level_ceiling
    }

    pub fn level(&self, iri: &Iri) -> Level<'_> {
        Level::new(self.cache.get_or_insert(DomainKind::Level, iri), self)
    }

    /// Levels declared on one scale, in graph order
    pub fn level_range(&self, kind: LevelKind) -> Vec<Level<'_>> {
        self.scan(kind.entity_type()).iter().map(|iri| self.level(iri)).collect()
    }

    /// Number of entity records created so far
    pub fn cached_entities(&self) -> usize {
        self.cache.len()
    }

    fn scan(&self, entity_type: EntityType) -> Vec<Iri> {
        self.graph
            .subjects(Predicate::Type.iri(), &Term::from(entity_type.iri()))
    }

    fn text(&self, subject: &Iri, predicate: Predicate) -> Option<String> {
        self.graph
            .value(subject, predicate.iri())
            .map(|term| term.lexical().to_string())
    }

    pub(crate) fn iri_value(&self, subject: &Iri, predicate: Predicate) -> Option<Iri> {
        self.graph
            .value(subject, predicate.iri())
            .and_then(Term::into_iri)
    }

    pub(crate) fn iri_values(&self, subject: &Iri, predicate: Predicate) -> Vec<Iri> {
        self.graph
            .objects(subject, predicate.iri())
            .into_iter()
            .filter_map(Term::into_iri)
            .collect()
    }

    pub(crate) fn iri_subjects(&self, predicate: Predicate, object: &Iri) -> Vec<Iri> {
        self.graph.subjects(predicate.iri(), &Term::from(object))
    }

    pub(crate) fn flag(&self, subject: &Iri, predicate: Predicate) -> Option<bool> {
        self.graph
            .value(subject, predicate.iri())
            .and_then(|term| term.as_bool())
    }

    pub(crate) fn integer(&self, subject: &Iri, predicate: Predicate) -> Result<Option<i64>, DomainError> {
        let Some(term) = self.graph.value(subject, predicate.iri()) else {
            return Ok(None);
        };
        match term.as_literal().map(|literal| literal.as_integer()) {
            Some(Ok(number)) => Ok(Some(number)),
            _ => Err(DomainError::InvalidLiteral {
                entity: subject.clone(),
                predicate: predicate.iri().clone(),
                value: term.lexical().to_string(),
            }),
        }
    }

    pub(crate) fn level_ref(&self, subject: &Iri, predicate: Predicate) -> Option<Level<'_>> {
        self.iri_value(subject, predicate).map(|iri| self.level(&iri))
    }
}

impl std::fmt::Debug for DomainModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DomainModel")
            .field("ontology_iri", &self.ontology_iri)
            .field("level_ceiling", &self.level_ceiling)
            .field("cached_entities", &self.cache.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use riskgraph_core::model::{Literal, Triple};
    use riskgraph_core::vocabulary::DOMAIN;
    use riskgraph_store::GraphId;

    fn d(local: &str) -> Iri {
        Iri::new(format!("{}{}", DOMAIN, local))
    }

    struct Fixture {
        store: RdfStore,
    }

    impl Fixture {
        fn new() -> Self {
            Self { store: RdfStore::new() }
        }

        fn add<O: Into<Term>>(&mut self, subject: &Iri, predicate: Predicate, object: O) -> &mut Self {
            self.store.insert(
                Triple::new(subject.clone(), predicate.iri().clone(), object),
                GraphId::Named(Iri::new("http://it-innovation.soton.ac.uk/ontologies/trustworthiness/domain")),
            );
            self
        }

        fn typed(&mut self, subject: &Iri, entity_type: EntityType) -> &mut Self {
            self.add(subject, Predicate::Type, entity_type.iri())
        }

        fn level(&mut self, local: &str, entity_type: EntityType, value: i64, label: &str) -> &mut Self {
            let iri = d(local);
            self.typed(&iri, entity_type)
                .add(&iri, Predicate::LevelValue, Literal::integer(value))
                .add(&iri, Predicate::Label, Literal::plain(label))
        }

        fn with_ontology(mut self) -> Self {
            let ontology = Iri::new("http://it-innovation.soton.ac.uk/ontologies/trustworthiness/domain-network");
            self.typed(&ontology, EntityType::Ontology)
                .add(&ontology, Predicate::VersionInfo, Literal::plain("6a3-2-5"))
                .add(&ontology, Predicate::Label, Literal::plain("Network domain"));
            self
        }

        fn with_catalogue(mut self) -> Self {
            let host = d("Host");
            let server = d("Server");
            let router = d("NetworkRouter");
            self.typed(&host, EntityType::Asset)
                .add(&host, Predicate::Label, Literal::plain("Host"))
                .typed(&server, EntityType::Asset)
                .add(&server, Predicate::Label, Literal::plain("Server"))
                .add(&server, Predicate::SubClassOf, host.clone())
                .add(&server, Predicate::IsAssertable, Literal::boolean(true))
                .typed(&router, EntityType::Asset);

            for (value, label) in ["Negligible", "Very Low", "Low", "Medium", "High", "Very High"].iter().enumerate() {
                self.level(&format!("Likelihood{}", value), EntityType::Likelihood, value as i64, label);
            }
            self.level("TrustworthinessLevelHigh", EntityType::TrustworthinessLevel, 4, "High");

            let user_tw = d("UserTW");
            let twaa = d("TWAA-Host-UserTW");
            self.typed(&user_tw, EntityType::TrustworthinessAttribute)
                .add(&user_tw, Predicate::Label, Literal::plain("UserTW"))
                .typed(&twaa, EntityType::TwaaDefaultSetting)
                .add(&twaa, Predicate::MetaLocatedAt, host.clone())
                .add(&twaa, Predicate::HasTwa, user_tw.clone());

            let threat = d("H.A.HS.1");
            let category = d("ThreatCategoryAuthentication");
            self.typed(&threat, EntityType::Threat)
                .add(&threat, Predicate::Comment, Literal::plain(r#"The "A:B" device fails: it stops working"#))
                .add(&threat, Predicate::HasCategory, category.clone())
                .add(&threat, Predicate::IsCurrentRisk, Literal::boolean(true))
                .typed(&category, EntityType::ThreatCategory)
                .add(&category, Predicate::Label, Literal::plain("Authentication"));

            let runtime = d("CSG-Patching-Runtime");
            let design = d("CSG-Patching");
            let control_set = d("CS-Patching-n_Host");
            self.typed(&runtime, EntityType::ControlStrategy)
                .add(&runtime, Predicate::IsCurrentRisk, Literal::boolean(true))
                .add(&runtime, Predicate::HasBlockingEffect, d("TrustworthinessLevelHigh"))
                .add(&runtime, Predicate::Blocks, threat.clone())
                .add(&runtime, Predicate::HasMandatoryControlSet, control_set.clone())
                .typed(&design, EntityType::ControlStrategy)
                .add(&design, Predicate::IsCurrentRisk, Literal::boolean(true))
                .add(&design, Predicate::IsFutureRisk, Literal::boolean(true))
                .typed(&control_set, EntityType::ControlSet)
                .add(&control_set, Predicate::HasControl, d("SoftwarePatching"));

            let relation = d("hosts");
            self.typed(&relation, EntityType::Relation)
                .add(&relation, Predicate::Domain, host.clone())
                .add(&relation, Predicate::Range, server.clone());

            let broken = d("LikelihoodBroken");
            self.typed(&broken, EntityType::RiskLevel)
                .add(&broken, Predicate::LevelValue, Literal::plain("High"));
            self
        }

        fn load(self) -> Result<DomainModel, DomainError> {
            DomainModel::load(self.store)
        }

        fn load_with(self, config: ModelConfig) -> Result<DomainModel, DomainError> {
            DomainModel::with_config(self.store, config)
        }
    }

    fn catalogue() -> DomainModel {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        Fixture::new().with_ontology().with_catalogue().load().unwrap()
    }

    #[test]
    fn test_missing_ontology_is_malformed() {
        let result = Fixture::new().with_catalogue().load();
        assert!(matches!(result, Err(DomainError::MalformedGraph(_))));
    }

    #[test]
    fn test_ontology_metadata() {
        let model = catalogue();
        assert_eq!(model.version_info().as_deref(), Some("6a3-2-5"));
        assert_eq!(model.label().as_deref(), Some("Network domain"));
        assert_eq!(model.comment(), None);
        assert!(model.ontology_iri().as_str().ends_with("domain-network"));
    }

    #[test]
    fn test_factory_returns_cached_entity() {
        let model = catalogue();
        let first = model.asset(&d("Host"));
        let cached = model.cached_entities();
        let second = model.asset(&d("Host"));
        assert_eq!(first, second);
        assert_eq!(model.cached_entities(), cached);
        assert_ne!(model.asset(&d("Server")), first);
    }

    #[test]
    fn test_asset_label_falls_back_to_local_name() {
        let model = catalogue();
        assert_eq!(model.asset(&d("NetworkRouter")).label().as_deref(), Some("NetworkRouter"));
        assert_eq!(model.asset(&d("Host")).label().as_deref(), Some("Host"));
    }

    #[test]
    fn test_asset_fields() {
        let model = catalogue();
        let server = model.asset(&d("Server"));
        assert_eq!(server.parents(), vec![model.asset(&d("Host"))]);
        assert_eq!(server.is_assertable(), Some(true));
        assert_eq!(server.is_visible(), None);

        let host = model.asset(&d("Host"));
        let attributes = host.trustworthiness_attributes();
        assert_eq!(attributes.len(), 1);
        assert_eq!(attributes[0].label().as_deref(), Some("UserTW"));
        assert!(model.is_asset(&d("Host")));
        assert!(!model.is_asset(&d("UserTW")));
    }

    #[test]
    fn test_enumerations() {
        let model = catalogue();
        assert_eq!(model.assets().len(), 3);
        assert_eq!(model.threats().len(), 1);
        assert_eq!(model.control_strategies().len(), 2);
        assert_eq!(model.relations().len(), 1);
        assert!(model.root_patterns().is_empty());
        assert!(model.construction_patterns().is_empty());
    }

    #[test]
    fn test_threat_descriptions_and_category() {
        let model = catalogue();
        let threat = model.threat(&d("H.A.HS.1"));
        assert_eq!(threat.short_description().as_deref(), Some(r#"The "A:B" device fails"#));
        assert_eq!(threat.long_description().as_deref(), Some("It stops working"));
        assert_eq!(threat.category().and_then(|c| c.label()).as_deref(), Some("Authentication"));
        assert_eq!(threat.is_current_risk(), Some(true));
        assert_eq!(threat.is_future_risk(), None);

        let unlabelled = model.threat(&d("NoSuchThreat"));
        assert_eq!(unlabelled.short_description(), None);
        assert_eq!(unlabelled.long_description(), None);
    }

    #[test]
    fn test_control_strategy_fields() {
        let model = catalogue();
        let runtime = model.control_strategy(&d("CSG-Patching-Runtime"));
        assert!(runtime.is_current_risk());
        assert!(!runtime.is_future_risk());
        assert_eq!(runtime.effectiveness_value().unwrap(), Some(4));
        assert_eq!(runtime.effectiveness_label().as_deref(), Some("High"));
        assert_eq!(runtime.maximum_likelihood_value().unwrap(), Some(1));
        assert_eq!(runtime.blocks(), vec![model.threat(&d("H.A.HS.1"))]);
        assert_eq!(runtime.mandatory_control_sets().len(), 1);
        assert!(runtime.optional_control_sets().is_empty());

        // flagged current risk, but neither a runtime nor an implementation variant
        let design = model.control_strategy(&d("CSG-Patching"));
        assert!(!design.is_current_risk());
        assert!(design.is_future_risk());
        assert_eq!(design.effectiveness_value().unwrap(), None);
    }

    #[test]
    fn test_relation_range_and_domain() {
        let model = catalogue();
        let relation = model.relation(&d("hosts"));
        assert_eq!(relation.domain(), vec![model.asset(&d("Host"))]);
        assert_eq!(relation.range(), vec![model.asset(&d("Server"))]);
    }

    #[test]
    fn test_level_values() {
        let model = catalogue();
        assert_eq!(model.level_value(&d("Likelihood3")).unwrap(), 3);
        assert_eq!(model.level(&d("Likelihood3")).kind(), Some(LevelKind::Likelihood));
        assert_eq!(model.level_label(&d("Likelihood3")).as_deref(), Some("Medium"));
        assert_eq!(model.level_range(LevelKind::Likelihood).len(), 6);
        assert_eq!(model.level_range(LevelKind::Risk).len(), 1);
    }

    #[test]
    fn test_invalid_levels() {
        let model = catalogue();
        assert!(matches!(
            model.level_value(&d("LikelihoodBroken")),
            Err(DomainError::InvalidLevel { .. })
        ));
        assert!(matches!(
            model.level_value(&d("Host")),
            Err(DomainError::InvalidLevel { .. })
        ));
    }

    #[test]
    fn test_level_number_inverse_fixed_ceiling() {
        let model = catalogue();
        assert_eq!(model.level_ceiling(), 5);
        assert_eq!(model.level_number_inverse(2), 3);
    }

    #[test]
    fn test_level_number_inverse_derived_ceiling() {
        let config = ModelConfig::default().with_level_ceiling(LevelCeiling::Derived);
        let model = Fixture::new().with_ontology().with_catalogue().load_with(config).unwrap();
        let highest = model
            .level_range(LevelKind::Likelihood)
            .iter()
            .map(|level| level.level_value().unwrap())
            .max()
            .unwrap();
        assert_eq!(model.level_ceiling(), highest);
        assert_eq!(model.level_number_inverse(2), 3);
    }

    #[test]
    fn test_derived_ceiling_requires_likelihood_levels() {
        let config = ModelConfig::default().with_level_ceiling(LevelCeiling::Derived);
        let result = Fixture::new().with_ontology().load_with(config);
        assert!(matches!(result, Err(DomainError::MalformedGraph(_))));
    }

    #[test]
    fn test_display_uses_label() {
        let model = catalogue();
        let host = model.asset(&d("Host"));
        assert_eq!(host.to_string(), format!("Domain Asset: Host ({}Host)", DOMAIN));
    }
}
