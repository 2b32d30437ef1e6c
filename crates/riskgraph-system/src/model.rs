//! System model loading, metadata, entity dispatch and risk aggregation

use crate::entity::{Entity, SystemKind};
use crate::summary::SystemSummary;
use crate::{
    Asset, ControlSet, ControlStrategy, MisbehaviourSet, Relation, SystemError, Threat, TrustworthinessAttributeSet,
};
use chrono::{DateTime, Utc};
use riskgraph_core::cache::EntityCache;
use riskgraph_core::config::{ModelConfig, NamedGraphPolicy};
use riskgraph_core::model::{Iri, Term};
use riskgraph_core::risk::RiskVector;
use riskgraph_core::vocabulary::{EntityType, Predicate};
use riskgraph_domain::{DomainEntity, DomainModel, Level};
use riskgraph_store::{Graph, GraphId, RdfStore};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{PoisonError, RwLock};
use tracing::{debug, error, info, warn};

/// Risk rank at or above which misbehaviour sets are usually reported
pub const DEFAULT_RISK_THRESHOLD: i64 = 3;

/// A loaded system threat model and the domain model it instantiates.
///
/// Queries run against the union of all named graphs. The asserted graph's
/// identifier is the subject of the system metadata; the inferred graph is
/// used to tell asserted assets from inferred ones.
pub struct SystemModel {
    graph: Box<dyn Graph + Send + Sync>,
    domain: DomainModel,
    config: ModelConfig,
    asserted_graph: GraphId,
    inferred_graph: Option<GraphId>,
    ui_graph: Option<GraphId>,
    cache: EntityCache<SystemKind>,
    kinds: RwLock<HashMap<Iri, SystemKind>>,
}

macro_rules! factories {
    ($($factory:ident => $handle:ident;)+) => {
        impl SystemModel {
            $(
                pub fn $factory(&self, iri: &Iri) -> $handle<'_> {
                    $handle::new(self.cache.get_or_insert(SystemKind::$handle, iri), self)
                }
            )+
        }
    };
}

factories! {
    asset => Asset;
    control_set => ControlSet;
    control_strategy => ControlStrategy;
    misbehaviour_set => MisbehaviourSet;
    relation => Relation;
    threat => Threat;
    trustworthiness_attribute_set => TrustworthinessAttributeSet;
}

impl SystemModel {
    /// Attach a parsed system graph to its domain model, using the domain
    /// model's configuration
    pub fn load<G>(graph: G, domain: DomainModel) -> Result<Self, SystemError>
    where
        G: Graph + Send + Sync + 'static,
    {
        let config = domain.config().clone();
        Self::with_config(graph, domain, config)
    }

    /// Attach a parsed system graph to its domain model.
    ///
    /// Partitions the named graphs, then checks that the system was built
    /// against this version of the domain model. No model is returned when
    /// either step fails.
    pub fn with_config<G>(graph: G, domain: DomainModel, config: ModelConfig) -> Result<Self, SystemError>
    where
        G: Graph + Send + Sync + 'static,
    {
        config.validate().map_err(riskgraph_domain::DomainError::from)?;
        let graph: Box<dyn Graph + Send + Sync> = Box::new(graph);
        let (asserted_graph, inferred_graph, ui_graph) = partition(graph.as_ref(), &config)?;

        let model = Self {
            graph,
            domain,
            config,
            asserted_graph,
            inferred_graph,
            ui_graph,
            cache: EntityCache::new(),
            kinds: RwLock::new(HashMap::new()),
        };
        model.check_domain_match()?;

        info!(
            asserted = %model.asserted_graph,
            domain_version = ?model.domain_version(),
            "loaded system model"
        );
        Ok(model)
    }

    /// Parse both N-Quads documents and attach the system to the domain
    pub fn from_nquads(system_source: &str, domain_source: &str) -> Result<Self, SystemError> {
        let domain = DomainModel::from_nquads(domain_source)?;
        Self::load(RdfStore::from_nquads(system_source)?, domain)
    }

    pub fn from_nquads_with_config(
        system_source: &str,
        domain_source: &str,
        config: ModelConfig,
    ) -> Result<Self, SystemError> {
        let domain = DomainModel::from_nquads_with_config(domain_source, config.clone())?;
        Self::with_config(RdfStore::from_nquads(system_source)?, domain, config)
    }

    /// Fails unless the system's recorded domain version equals the domain
    /// model's version info
    pub fn check_domain_match(&self) -> Result<(), SystemError> {
        let expected = self.domain_version();
        let found = self.domain.version_info();
        if expected != found {
            error!(expected = ?expected, found = ?found, "domain model version mismatch");
            return Err(SystemError::DomainVersionMismatch { expected, found });
        }
        Ok(())
    }

    pub fn domain(&self) -> &DomainModel {
        &self.domain
    }

    pub fn graph(&self) -> &(dyn Graph + Send + Sync) {
        self.graph.as_ref()
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn asserted_graph(&self) -> &GraphId {
        &self.asserted_graph
    }

    pub fn inferred_graph(&self) -> Option<&GraphId> {
        self.inferred_graph.as_ref()
    }

    pub fn ui_graph(&self) -> Option<&GraphId> {
        self.ui_graph.as_ref()
    }

    pub fn ontology_iri(&self) -> Option<Iri> {
        self.graph
            .subject_value(Predicate::Type.iri(), &Term::from(EntityType::Ontology.iri()))
    }

    pub fn domain_version(&self) -> Option<String> {
        self.ontology_iri()
            .and_then(|ontology| self.text(&ontology, Predicate::DomainVersion))
    }

    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.metadata(Predicate::Created).and_then(|text| parse_timestamp(&text))
    }

    pub fn modified(&self) -> Option<DateTime<Utc>> {
        self.metadata(Predicate::Modified).and_then(|text| parse_timestamp(&text))
    }

    pub fn system_label(&self) -> Option<String> {
        self.metadata(Predicate::Label)
    }

    pub fn system_comment(&self) -> Option<String> {
        self.metadata(Predicate::Comment)
    }

    pub fn risk_calculation_mode(&self) -> Option<String> {
        self.metadata(Predicate::RiskCalculationMode)
    }

    /// Overall risk level recorded by the last risk calculation
    pub fn has_risk(&self) -> Option<Level<'_>> {
        let subject = self.asserted_graph.iri()?;
        self.iri_value(subject, Predicate::HasRisk)
            .map(|level| self.domain.level(&level))
    }

    pub fn risks_valid(&self) -> bool {
        self.metadata_flag(Predicate::RisksValid)
    }

    pub fn is_valid(&self) -> bool {
        self.metadata_flag(Predicate::IsValid)
    }

    pub fn is_validating(&self) -> bool {
        self.metadata_flag(Predicate::IsValidating)
    }

    /// True when any subject reports a risk calculation in progress
    pub fn is_calculating_risk(&self) -> bool {
        self.graph
            .triples(None, Some(Predicate::IsCalculatingRisk.iri()), None, None)
            .first()
            .and_then(|triple| triple.object.as_bool())
            .unwrap_or(false)
    }

    fn metadata(&self, predicate: Predicate) -> Option<String> {
        let subject = self.asserted_graph.iri()?;
        self.text(subject, predicate)
    }

    fn metadata_flag(&self, predicate: Predicate) -> bool {
        self.asserted_graph
            .iri()
            .and_then(|subject| self.flag(subject, predicate))
            .unwrap_or(false)
    }

    /// Classify `iri` and wrap it in the matching entity kind.
    ///
    /// Fixed entity types are tested first, in dispatch order; otherwise the
    /// declared type must be a domain asset class. The resolved kind is cached
    /// so later lookups skip the membership tests.
    pub fn get_entity(&self, iri: &Iri) -> Result<Entity<'_>, SystemError> {
        let kind = match self.cached_kind(iri) {
            Some(kind) => kind,
            None => {
                let kind = self.classify(iri)?;
                self.kinds
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .insert(iri.clone(), kind);
                kind
            }
        };

        Ok(match kind {
            SystemKind::Asset => Entity::Asset(self.asset(iri)),
            SystemKind::ControlSet => Entity::ControlSet(self.control_set(iri)),
            SystemKind::ControlStrategy => Entity::ControlStrategy(self.control_strategy(iri)),
            SystemKind::MisbehaviourSet => Entity::MisbehaviourSet(self.misbehaviour_set(iri)),
            SystemKind::Relation => Entity::Relation(self.relation(iri)),
            SystemKind::Threat => Entity::Threat(self.threat(iri)),
            SystemKind::TrustworthinessAttributeSet => {
                Entity::TrustworthinessAttributeSet(self.trustworthiness_attribute_set(iri))
            }
        })
    }

    fn cached_kind(&self, iri: &Iri) -> Option<SystemKind> {
        self.kinds
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(iri)
            .copied()
    }

    fn classify(&self, iri: &Iri) -> Result<SystemKind, SystemError> {
        for (entity_type, kind) in SystemKind::TYPED {
            if self.has_type(iri, entity_type) {
                return Ok(kind);
            }
        }

        if self.asset_class(iri).is_some() {
            return Ok(SystemKind::Asset);
        }

        let declared_type = self.iri_value(iri, Predicate::Type);
        error!(
            entity = %iri,
            declared_type = ?declared_type.as_ref().map(Iri::as_str),
            "unable to classify system entity"
        );
        Err(SystemError::UnknownEntity {
            iri: iri.clone(),
            declared_type,
        })
    }

    /// Asset instances of every domain asset class, each reported once
    pub fn assets(&self) -> Vec<Asset<'_>> {
        let mut seen = HashSet::new();
        let mut assets = Vec::new();
        for class in self.domain.assets() {
            for iri in self.graph.subjects(Predicate::Type.iri(), &Term::from(class.iri())) {
                if seen.insert(iri.clone()) {
                    assets.push(self.asset(&iri));
                }
            }
        }
        assets
    }

    pub fn control_sets(&self) -> Vec<ControlSet<'_>> {
        self.scan(EntityType::ControlSet)
            .iter()
            .map(|iri| self.control_set(iri))
            .collect()
    }

    pub fn control_strategies(&self) -> Vec<ControlStrategy<'_>> {
        self.scan(EntityType::ControlStrategy)
            .iter()
            .map(|iri| self.control_strategy(iri))
            .collect()
    }

    pub fn misbehaviour_sets(&self) -> Vec<MisbehaviourSet<'_>> {
        self.scan(EntityType::MisbehaviourSet)
            .iter()
            .map(|iri| self.misbehaviour_set(iri))
            .collect()
    }

    pub fn relations(&self) -> Vec<Relation<'_>> {
        self.scan(EntityType::CardinalityConstraint)
            .iter()
            .map(|iri| self.relation(iri))
            .collect()
    }

    pub fn threats(&self) -> Vec<Threat<'_>> {
        self.scan(EntityType::Threat)
            .iter()
            .map(|iri| self.threat(iri))
            .collect()
    }

    pub fn trustworthiness_attribute_sets(&self) -> Vec<TrustworthinessAttributeSet<'_>> {
        self.scan(EntityType::TrustworthinessAttributeSet)
            .iter()
            .map(|iri| self.trustworthiness_attribute_set(iri))
            .collect()
    }

    /// Count of misbehaviour sets per risk level, ranked by each level's value.
    ///
    /// Logs and returns `None` when a misbehaviour set has no usable risk
    /// level; see [`SystemModel::try_risk_vector`] for the error itself.
    pub fn risk_vector(&self) -> Option<RiskVector> {
        match self.try_risk_vector() {
            Ok(vector) => Some(vector),
            Err(e) => {
                error!(error = %e, "unable to build risk vector");
                None
            }
        }
    }

    pub fn try_risk_vector(&self) -> Result<RiskVector, SystemError> {
        let mut counts: BTreeMap<String, u64> = BTreeMap::new();
        let mut ranks: BTreeMap<String, i64> = BTreeMap::new();
        for ms in self.misbehaviour_sets() {
            let level = ms.risk_level()?;
            let rank = level.level_value()?;
            let label = level
                .label()
                .unwrap_or_else(|| level.iri().local_name().to_string());
            ranks.entry(label.clone()).or_insert(rank);
            *counts.entry(label).or_insert(0) += 1;
        }
        Ok(RiskVector::new(counts, ranks)?)
    }

    /// Misbehaviour sets whose risk rank is at least `threshold`, highest
    /// first; equal ranks keep enumeration order
    pub fn filter_misbehaviour_sets(&self, threshold: i64) -> Result<Vec<MisbehaviourSet<'_>>, SystemError> {
        let all = self.misbehaviour_sets();
        let total = all.len();

        let mut ranked = Vec::new();
        for ms in all {
            let rank = ms.risk_level_value()?;
            if rank >= threshold {
                ranked.push((rank, ms));
            }
        }
        ranked.sort_by(|a, b| b.0.cmp(&a.0));

        debug!(threshold, kept = ranked.len(), total, "filtered misbehaviour sets");
        Ok(ranked.into_iter().map(|(_, ms)| ms).collect())
    }

    /// Typed overview of the model
    pub fn summary(&self) -> SystemSummary {
        let risk_vector = self.risk_vector();
        let overall_risk_level = risk_vector
            .as_ref()
            .and_then(|vector| vector.overall_level().map(str::to_string));
        SystemSummary {
            system_label: self.system_label(),
            system_comment: self.system_comment(),
            created: self.created(),
            modified: self.modified(),
            domain_version: self.domain_version(),
            domain_label: self.domain.label(),
            is_valid: self.is_valid(),
            risks_valid: self.risks_valid(),
            risk_calculation_mode: self.risk_calculation_mode(),
            has_risk: self.has_risk().and_then(|level| level.label()),
            assets: self.assets().len(),
            misbehaviour_sets: self.misbehaviour_sets().len(),
            threats: self.threats().len(),
            control_strategies: self.control_strategies().len(),
            control_sets: self.control_sets().len(),
            risk_vector,
            overall_risk_level,
        }
    }

    fn scan(&self, entity_type: EntityType) -> Vec<Iri> {
        self.graph
            .subjects(Predicate::Type.iri(), &Term::from(entity_type.iri()))
    }

    pub(crate) fn has_type(&self, iri: &Iri, entity_type: EntityType) -> bool {
        self.graph
            .contains(iri, Predicate::Type.iri(), &Term::from(entity_type.iri()))
    }

    pub(crate) fn text(&self, subject: &Iri, predicate: Predicate) -> Option<String> {
        self.graph
            .value(subject, predicate.iri())
            .map(|term| term.lexical().to_string())
    }

    pub(crate) fn iri_value(&self, subject: &Iri, predicate: Predicate) -> Option<Iri> {
        self.graph
            .value(subject, predicate.iri())
            .and_then(Term::into_iri)
    }

    pub(crate) fn required_iri(&self, subject: &Iri, predicate: Predicate) -> Result<Iri, SystemError> {
        self.iri_value(subject, predicate)
            .ok_or_else(|| SystemError::MissingReference {
                entity: subject.clone(),
                predicate: predicate.iri().clone(),
            })
    }

    pub(crate) fn iri_values(&self, subject: &Iri, predicate: Predicate) -> Vec<Iri> {
        self.graph
            .objects(subject, predicate.iri())
            .into_iter()
            .filter_map(Term::into_iri)
            .collect()
    }

    /// First declared type of `subject` that is a domain asset class
    pub(crate) fn asset_class(&self, subject: &Iri) -> Option<Iri> {
        self.iri_values(subject, Predicate::Type)
            .into_iter()
            .find(|class| self.domain.is_asset(class))
    }

    pub(crate) fn iri_subjects(&self, predicate: Predicate, object: &Iri) -> Vec<Iri> {
        self.graph.subjects(predicate.iri(), &Term::from(object))
    }

    pub(crate) fn has_any(&self, subject: &Iri, predicate: Predicate) -> bool {
        self.graph.has_any(subject, predicate.iri())
    }

    fn flag(&self, subject: &Iri, predicate: Predicate) -> Option<bool> {
        self.graph
            .value(subject, predicate.iri())
            .and_then(|term| term.as_bool())
    }

    /// True when `(subject, predicate, true)` is stated in any named graph
    pub(crate) fn is_true(&self, subject: &Iri, predicate: Predicate) -> bool {
        self.graph
            .objects(subject, predicate.iri())
            .iter()
            .any(|term| term.as_bool() == Some(true))
    }

    pub(crate) fn integer(&self, subject: &Iri, predicate: Predicate) -> Result<Option<i64>, SystemError> {
        let Some(term) = self.graph.value(subject, predicate.iri()) else {
            return Ok(None);
        };
        match term.as_literal().map(|literal| literal.as_integer()) {
            Some(Ok(number)) => Ok(Some(number)),
            _ => Err(SystemError::InvalidLiteral {
                entity: subject.clone(),
                predicate: predicate.iri().clone(),
                value: term.lexical().to_string(),
            }),
        }
    }

    /// Domain level referenced by `(subject, predicate, _)`
    pub(crate) fn level_ref(&self, subject: &Iri, predicate: Predicate) -> Option<Level<'_>> {
        self.iri_value(subject, predicate)
            .map(|level| self.domain.level(&level))
    }

    /// True when `(subject, predicate, _)` is stated in the inferred graph
    pub(crate) fn is_inferred(&self, subject: &Iri, predicate: Predicate) -> bool {
        match &self.inferred_graph {
            Some(context) => !self
                .graph
                .triples(Some(subject), Some(predicate.iri()), None, Some(context))
                .is_empty(),
            None => false,
        }
    }
}

impl std::fmt::Debug for SystemModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemModel")
            .field("asserted_graph", &self.asserted_graph)
            .field("inferred_graph", &self.inferred_graph)
            .field("ui_graph", &self.ui_graph)
            .field("domain", &self.domain)
            .finish()
    }
}

/// Split named graphs into asserted, inferred and UI graphs by identifier
/// suffix. A graph without a known suffix is an asserted-graph candidate.
fn partition(
    graph: &(dyn Graph + Send + Sync),
    config: &ModelConfig,
) -> Result<(GraphId, Option<GraphId>, Option<GraphId>), SystemError> {
    let mut asserted = Vec::new();
    let mut inferred = None;
    let mut ui = None;

    for context in graph.contexts() {
        info!(graph = %context, "loaded named graph");
        if context.ends_with(&config.inferred_suffix) {
            inferred = Some(context);
        } else if context.ends_with(&config.ui_suffix) {
            ui = Some(context);
        } else {
            asserted.push(context);
        }
    }

    if asserted.len() > 1 {
        match config.named_graphs {
            NamedGraphPolicy::Strict => {
                return Err(SystemError::AmbiguousGraph { candidates: asserted });
            }
            NamedGraphPolicy::LastWins => {
                for discarded in &asserted[..asserted.len() - 1] {
                    warn!(graph = %discarded, "ignoring asserted graph candidate, a later one wins");
                }
            }
        }
    }

    let asserted = asserted.pop().unwrap_or(GraphId::Default);
    info!(asserted = %asserted, inferred = inferred.is_some(), ui = ui.is_some(), "partitioned named graphs");
    Ok((asserted, inferred, ui))
}

fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text.trim())
        .ok()
        .map(|timestamp| timestamp.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::SystemEntity;
    use riskgraph_core::config::LevelCeiling;

    const DOMAIN: &str = r#"
<http://example.org/domain> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://www.w3.org/2002/07/owl#Ontology> <http://example.org/domain> .
<http://example.org/domain> <http://www.w3.org/2002/07/owl#versionInfo> "6a3-2-5" <http://example.org/domain> .
<http://example.org/domain#Host> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://www.w3.org/2002/07/owl#Class> <http://example.org/domain> .
"#;

    fn system(extra: &str) -> String {
        format!(
            r#"
<http://example.org/system> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://www.w3.org/2002/07/owl#Ontology> <http://example.org/system> .
<http://example.org/system> <http://it-innovation.soton.ac.uk/ontologies/trustworthiness/core#domainVersion> "6a3-2-5" <http://example.org/system> .
<http://example.org/system> <http://www.w3.org/2000/01/rdf-schema#label> "Lab network" <http://example.org/system> .
<http://example.org/system> <http://it-innovation.soton.ac.uk/ontologies/trustworthiness/core#created> "2024-03-01T10:15:00Z" <http://example.org/system> .
<http://example.org/system> <http://it-innovation.soton.ac.uk/ontologies/trustworthiness/core#modified> "not a date" <http://example.org/system> .
<http://example.org/system#h1> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://example.org/domain#Host> <http://example.org/system> .
{}"#,
            extra
        )
    }

    #[test]
    fn test_metadata() {
        let model = SystemModel::from_nquads(&system(""), DOMAIN).unwrap();
        assert_eq!(model.domain_version().as_deref(), Some("6a3-2-5"));
        assert_eq!(model.system_label().as_deref(), Some("Lab network"));
        assert_eq!(
            model.created().map(|created| created.to_rfc3339()),
            Some("2024-03-01T10:15:00+00:00".to_string())
        );
        assert_eq!(model.modified(), None);
        assert!(!model.is_valid());
        assert!(!model.is_calculating_risk());
        assert_eq!(model.asserted_graph(), &GraphId::Named(Iri::new("http://example.org/system")));
        assert!(model.inferred_graph().is_none());
    }

    #[test]
    fn test_version_mismatch_fails() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let domain = DOMAIN.replace("6a3-2-5", "6a3-1-4");
        let result = SystemModel::from_nquads(&system(""), &domain);
        match result {
            Err(SystemError::DomainVersionMismatch { expected, found }) => {
                assert_eq!(expected.as_deref(), Some("6a3-2-5"));
                assert_eq!(found.as_deref(), Some("6a3-1-4"));
            }
            other => panic!("expected version mismatch, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_strict_policy_rejects_two_asserted_graphs() {
        let extra = "<http://example.org/system#h2> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://example.org/domain#Host> <http://example.org/other> .\n";
        let result = SystemModel::from_nquads(&system(extra), DOMAIN);
        assert!(matches!(result, Err(SystemError::AmbiguousGraph { ref candidates }) if candidates.len() == 2));
    }

    #[test]
    fn test_last_wins_policy_keeps_last_graph() {
        let extra = "<http://example.org/system#h2> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://example.org/domain#Host> <http://example.org/other> .\n";
        let config = ModelConfig::default().with_named_graphs(NamedGraphPolicy::LastWins);
        let model = SystemModel::from_nquads_with_config(&system(extra), DOMAIN, config).unwrap();
        assert_eq!(model.asserted_graph(), &GraphId::Named(Iri::new("http://example.org/other")));
        assert_eq!(model.assets().len(), 2);
    }

    #[test]
    fn test_get_entity_caches_kind() {
        let model = SystemModel::from_nquads(&system(""), DOMAIN).unwrap();
        let iri = Iri::new("http://example.org/system#h1");
        let first = model.get_entity(&iri).unwrap();
        assert_eq!(first.kind(), SystemKind::Asset);
        assert_eq!(model.cached_kind(&iri), Some(SystemKind::Asset));
        assert_eq!(model.get_entity(&iri).unwrap(), first);
    }

    #[test]
    fn test_asset_with_several_types() {
        let extra = concat!(
            "<http://example.org/system#h3> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://www.w3.org/2002/07/owl#NamedIndividual> <http://example.org/system> .\n",
            "<http://example.org/system#h3> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://example.org/domain#Host> <http://example.org/system> .\n",
        );
        let model = SystemModel::from_nquads(&system(extra), DOMAIN).unwrap();
        let iri = Iri::new("http://example.org/system#h3");

        assert_eq!(model.get_entity(&iri).unwrap().kind(), SystemKind::Asset);

        let asset = model
            .assets()
            .into_iter()
            .find(|asset| asset.iri() == &iri)
            .unwrap();
        assert_eq!(
            asset.class().unwrap().iri(),
            &Iri::new("http://example.org/domain#Host")
        );
    }

    #[test]
    fn test_unknown_entity() {
        let model = SystemModel::from_nquads(&system(""), DOMAIN).unwrap();
        let result = model.get_entity(&Iri::new("http://example.org/system#nothing"));
        assert!(matches!(result, Err(SystemError::UnknownEntity { declared_type: None, .. })));
        assert_eq!(model.cached_kind(&Iri::new("http://example.org/system#nothing")), None);
    }

    #[test]
    fn test_derived_ceiling_requires_domain_likelihoods() {
        let config = ModelConfig::default().with_level_ceiling(LevelCeiling::Derived);
        let result = SystemModel::from_nquads_with_config(&system(""), DOMAIN, config);
        assert!(matches!(result, Err(SystemError::Domain(_))));
    }

    #[test]
    fn test_empty_model_risk_vector() {
        let model = SystemModel::from_nquads(&system(""), DOMAIN).unwrap();
        let vector = model.risk_vector().unwrap();
        assert!(vector.is_empty());
        assert!(model.filter_misbehaviour_sets(DEFAULT_RISK_THRESHOLD).unwrap().is_empty());
    }
}
