//! Graph query capability

use riskgraph_core::model::{Iri, Term, Triple};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Graph identifier for organizing triples
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GraphId {
    /// Default graph
    Default,
    /// Named graph
    Named(Iri),
}

impl GraphId {
    pub fn iri(&self) -> Option<&Iri> {
        match self {
            GraphId::Default => None,
            GraphId::Named(iri) => Some(iri),
        }
    }

    /// True for a named graph whose identifier ends with `suffix`
    pub fn ends_with(&self, suffix: &str) -> bool {
        self.iri().map_or(false, |iri| iri.ends_with(suffix))
    }
}

impl std::fmt::Display for GraphId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphId::Default => write!(f, "(default graph)"),
            GraphId::Named(iri) => write!(f, "{}", iri),
        }
    }
}

/// Pattern-query access to a set of named graphs.
///
/// `None` in a pattern position matches anything. Without a context the graph
/// behaves as the union of all its named graphs: a triple stored in several
/// contexts is reported once, in first-insertion order.
pub trait Graph {
    fn triples(
        &self,
        subject: Option<&Iri>,
        predicate: Option<&Iri>,
        object: Option<&Term>,
        context: Option<&GraphId>,
    ) -> Vec<&Triple>;

    /// Named graphs in first-seen order
    fn contexts(&self) -> Vec<GraphId>;

    /// Subjects `s` with `(s, predicate, object)` in the graph
    fn subjects(&self, predicate: &Iri, object: &Term) -> Vec<Iri> {
        let mut seen = HashSet::new();
        let mut subjects = Vec::new();
        for triple in self.triples(None, Some(predicate), Some(object), None) {
            if seen.insert(&triple.subject) {
                subjects.push(triple.subject.clone());
            }
        }
        subjects
    }

    /// Objects `o` with `(subject, predicate, o)` in the graph
    fn objects(&self, subject: &Iri, predicate: &Iri) -> Vec<Term> {
        let mut seen = HashSet::new();
        let mut objects = Vec::new();
        for triple in self.triples(Some(subject), Some(predicate), None, None) {
            if seen.insert(&triple.object) {
                objects.push(triple.object.clone());
            }
        }
        objects
    }

    /// First object of `(subject, predicate, _)`
    fn value(&self, subject: &Iri, predicate: &Iri) -> Option<Term> {
        self.triples(Some(subject), Some(predicate), None, None)
            .first()
            .map(|triple| triple.object.clone())
    }

    /// First subject of `(_, predicate, object)`
    fn subject_value(&self, predicate: &Iri, object: &Term) -> Option<Iri> {
        self.triples(None, Some(predicate), Some(object), None)
            .first()
            .map(|triple| triple.subject.clone())
    }

    fn contains(&self, subject: &Iri, predicate: &Iri, object: &Term) -> bool {
        !self.triples(Some(subject), Some(predicate), Some(object), None).is_empty()
    }

    fn contains_in(&self, context: &GraphId, subject: &Iri, predicate: &Iri, object: &Term) -> bool {
        !self
            .triples(Some(subject), Some(predicate), Some(object), Some(context))
            .is_empty()
    }

    /// True when `(subject, predicate, _)` has any match
    fn has_any(&self, subject: &Iri, predicate: &Iri) -> bool {
        !self.triples(Some(subject), Some(predicate), None, None).is_empty()
    }
}
