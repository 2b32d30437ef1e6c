//! Indexed in-memory quad store

use crate::graph::{Graph, GraphId};
use crate::nquads::parse_line;
use crate::StoreError;
use riskgraph_core::model::{Iri, Term, Triple};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::{HashMap, HashSet};
use std::io::BufRead;

type Postings = SmallVec<[usize; 8]>;

/// A triple together with the graph it was asserted in
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quad {
    pub triple: Triple,
    pub graph_id: GraphId,
}

/// Read-only-after-load RDF store.
///
/// Quads keep their insertion order; every index is a posting list of
/// positions into that order, so pattern matches come back in the order the
/// source declared them.
#[derive(Debug, Default)]
pub struct RdfStore {
    quads: Vec<Quad>,
    seen: HashSet<Quad>,
    /// Subject index for fast lookup
    subject_index: HashMap<Iri, Postings>,
    /// Predicate index for fast lookup
    predicate_index: HashMap<Iri, Postings>,
    /// Object index for fast lookup
    object_index: HashMap<Term, Postings>,
    context_index: HashMap<GraphId, Vec<usize>>,
    context_order: Vec<GraphId>,
}

impl RdfStore {
    /// Create a new empty RDF store
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an N-Quads document into a new store
    pub fn from_nquads(source: &str) -> Result<Self, StoreError> {
        let mut store = Self::new();
        for (index, line) in source.lines().enumerate() {
            if let Some(quad) = parse_line(line, index + 1)? {
                store.insert(quad.triple, quad.graph_id);
            }
        }
        tracing::debug!(quads = store.len(), contexts = store.context_order.len(), "parsed n-quads document");
        Ok(store)
    }

    /// Read an N-Quads document line by line
    pub fn read_nquads<R: BufRead>(reader: R) -> Result<Self, StoreError> {
        let mut store = Self::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if let Some(quad) = parse_line(&line, index + 1)? {
                store.insert(quad.triple, quad.graph_id);
            }
        }
        tracing::debug!(quads = store.len(), contexts = store.context_order.len(), "read n-quads stream");
        Ok(store)
    }

    /// Insert a triple into `graph_id`; returns false when the quad was already present
    pub fn insert(&mut self, triple: Triple, graph_id: GraphId) -> bool {
        let quad = Quad { triple, graph_id };
        if self.seen.contains(&quad) {
            return false;
        }

        let position = self.quads.len();
        self.subject_index
            .entry(quad.triple.subject.clone())
            .or_default()
            .push(position);
        self.predicate_index
            .entry(quad.triple.predicate.clone())
            .or_default()
            .push(position);
        self.object_index
            .entry(quad.triple.object.clone())
            .or_default()
            .push(position);

        let context = self.context_index.entry(quad.graph_id.clone()).or_default();
        if context.is_empty() {
            self.context_order.push(quad.graph_id.clone());
        }
        context.push(position);

        self.seen.insert(quad.clone());
        self.quads.push(quad);
        true
    }

    /// Insert multiple triples into the same graph
    pub fn insert_batch<I>(&mut self, triples: I, graph_id: GraphId)
    where
        I: IntoIterator<Item = Triple>,
    {
        for triple in triples {
            self.insert(triple, graph_id.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.quads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    /// All quads in insertion order
    pub fn quads(&self) -> &[Quad] {
        &self.quads
    }

    /// Get statistics
    pub fn statistics(&self) -> StoreStatistics {
        StoreStatistics {
            total_triples: self.quads.len(),
            graph_count: self.context_order.len(),
        }
    }

    /// Most selective posting list for the bound positions, `None` when
    /// nothing is bound
    fn candidates(
        &self,
        subject: Option<&Iri>,
        predicate: Option<&Iri>,
        object: Option<&Term>,
        context: Option<&GraphId>,
    ) -> Option<&[usize]> {
        let mut best = None;
        if let Some(subject) = subject {
            best = narrower(best, self.subject_index.get(subject).map(|p| p.as_slice()));
        }
        if let Some(predicate) = predicate {
            best = narrower(best, self.predicate_index.get(predicate).map(|p| p.as_slice()));
        }
        if let Some(object) = object {
            best = narrower(best, self.object_index.get(object).map(|p| p.as_slice()));
        }
        if let Some(context) = context {
            best = narrower(best, self.context_index.get(context).map(|p| p.as_slice()));
        }
        best
    }
}

/// The shorter of two posting lists; an unindexed value has no matches
fn narrower<'a>(best: Option<&'a [usize]>, postings: Option<&'a [usize]>) -> Option<&'a [usize]> {
    let postings = postings.unwrap_or(&[]);
    match best {
        Some(current) if current.len() <= postings.len() => Some(current),
        _ => Some(postings),
    }
}

impl Graph for RdfStore {
    fn triples(
        &self,
        subject: Option<&Iri>,
        predicate: Option<&Iri>,
        object: Option<&Term>,
        context: Option<&GraphId>,
    ) -> Vec<&Triple> {
        let matches = |quad: &Quad| {
            subject.map_or(true, |s| &quad.triple.subject == s)
                && predicate.map_or(true, |p| &quad.triple.predicate == p)
                && object.map_or(true, |o| &quad.triple.object == o)
                && context.map_or(true, |c| &quad.graph_id == c)
        };

        let selected: Vec<&Quad> = match self.candidates(subject, predicate, object, context) {
            Some(positions) => positions
                .iter()
                .map(|position| &self.quads[*position])
                .filter(|quad| matches(*quad))
                .collect(),
            None => self.quads.iter().collect(),
        };

        if context.is_some() {
            return selected.into_iter().map(|quad| &quad.triple).collect();
        }

        let mut seen = HashSet::new();
        let mut triples = Vec::with_capacity(selected.len());
        for quad in selected {
            if seen.insert(&quad.triple) {
                triples.push(&quad.triple);
            }
        }
        triples
    }

    fn contexts(&self) -> Vec<GraphId> {
        self.context_order.clone()
    }
}

/// Store statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStatistics {
    pub total_triples: usize,
    pub graph_count: usize,
}
