//! Graph term models shared by the store and the domain/system models

use serde::{Deserialize, Serialize};
use std::num::ParseIntError;
use std::sync::Arc;

/// Opaque node identifier.
///
/// Clones share one allocation, so identifiers can be used freely as cache
/// keys and join keys. Blank nodes are carried as identifiers starting with `_:`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Iri(Arc<str>);

impl Iri {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Iri(Arc::from(s.as_ref()))
    }

    /// Get the string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Trailing segment of the identifier after its last `/` or `#`
    pub fn local_name(&self) -> &str {
        self.0.rsplit(['/', '#']).next().unwrap_or(&self.0)
    }

    pub fn is_blank_node(&self) -> bool {
        self.0.starts_with("_:")
    }

    pub fn ends_with(&self, suffix: &str) -> bool {
        self.0.ends_with(suffix)
    }
}

impl From<String> for Iri {
    fn from(s: String) -> Self {
        Iri(Arc::from(s))
    }
}

impl From<&str> for Iri {
    fn from(s: &str) -> Self {
        Iri::new(s)
    }
}

impl From<&String> for Iri {
    fn from(s: &String) -> Self {
        Iri::new(s)
    }
}

impl std::fmt::Display for Iri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Iri {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// RDF literal
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    pub lexical: String,
    pub datatype: Option<Iri>,
    pub language: Option<String>,
}

impl Literal {
    /// Plain string literal without datatype or language
    pub fn plain<S: Into<String>>(lexical: S) -> Self {
        Literal {
            lexical: lexical.into(),
            datatype: None,
            language: None,
        }
    }

    pub fn typed<S: Into<String>>(lexical: S, datatype: Iri) -> Self {
        Literal {
            lexical: lexical.into(),
            datatype: Some(datatype),
            language: None,
        }
    }

    pub fn boolean(value: bool) -> Self {
        Literal::typed(value.to_string(), Iri::new(crate::vocabulary::XSD_BOOLEAN))
    }

    pub fn integer(value: i64) -> Self {
        Literal::typed(value.to_string(), Iri::new(crate::vocabulary::XSD_INTEGER))
    }

    pub fn as_str(&self) -> &str {
        &self.lexical
    }

    /// Boolean reading of the lexical form; `None` when it is not a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self.lexical.trim() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Result<i64, ParseIntError> {
        self.lexical.trim().parse::<i64>()
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.lexical)
    }
}

/// Object position of a triple
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    Iri(Iri),
    Literal(Literal),
}

impl Term {
    pub fn as_iri(&self) -> Option<&Iri> {
        match self {
            Term::Iri(iri) => Some(iri),
            Term::Literal(_) => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(literal) => Some(literal),
            Term::Iri(_) => None,
        }
    }

    pub fn into_iri(self) -> Option<Iri> {
        match self {
            Term::Iri(iri) => Some(iri),
            Term::Literal(_) => None,
        }
    }

    /// Text of the term: the identifier for IRIs, the lexical form for literals
    pub fn lexical(&self) -> &str {
        match self {
            Term::Iri(iri) => iri.as_str(),
            Term::Literal(literal) => literal.as_str(),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.as_literal().and_then(Literal::as_bool)
    }
}

impl From<Iri> for Term {
    fn from(iri: Iri) -> Self {
        Term::Iri(iri)
    }
}

impl From<&Iri> for Term {
    fn from(iri: &Iri) -> Self {
        Term::Iri(iri.clone())
    }
}

impl From<Literal> for Term {
    fn from(literal: Literal) -> Self {
        Term::Literal(literal)
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "<{}>", iri),
            Term::Literal(literal) => write!(f, "\"{}\"", literal),
        }
    }
}

/// RDF Triple representation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triple {
    pub subject: Iri,
    pub predicate: Iri,
    pub object: Term,
}

impl Triple {
    pub fn new<S, P, O>(subject: S, predicate: P, object: O) -> Self
    where
        S: Into<Iri>,
        P: Into<Iri>,
        O: Into<Term>,
    {
        Triple {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }
}
