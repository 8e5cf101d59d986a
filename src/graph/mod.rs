//! Knowledge graph: the RDF triple model shared by every retrieval strategy.
//!
//! - **Data model** ([`EntityId`], [`Literal`], [`Term`], [`Triple`])
//! - **Read interface** ([`view::GraphView`]): what the reasoning core may ask of a graph
//! - **In-memory store** ([`index::TripleStore`]): `petgraph` + `dashmap` indexes
//! - **Loader** ([`rdf::RdfLoader`]): parses serialized ontologies with `oxigraph`

pub mod index;
pub mod rdf;
pub mod view;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Well-known vocabulary IRIs.
pub mod vocab {
    pub const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
    pub const RDFS_COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";
    pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    pub const RDF_LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";
    pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
    pub const SKOS_PREF_LABEL: &str = "http://www.w3.org/2004/02/skos/core#prefLabel";
    pub const SKOS_DEFINITION: &str = "http://www.w3.org/2004/02/skos/core#definition";
    pub const DCTERMS_TITLE: &str = "http://purl.org/dc/terms/title";
    pub const DCTERMS_DESCRIPTION: &str = "http://purl.org/dc/terms/description";
}

/// Identifier of a graph node: an opaque, IRI-like string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(iri: impl Into<String>) -> Self {
        Self(iri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Trailing fragment of the identifier: the part after the last `#`,
    /// then after the last `/` of that remainder.
    pub fn local_name(&self) -> &str {
        let after_hash = self.0.rsplit('#').next().unwrap_or(&self.0);
        after_hash.rsplit('/').next().unwrap_or(after_hash)
    }

    /// The `rdfs:label` predicate.
    pub fn label() -> Self {
        Self::new(vocab::RDFS_LABEL)
    }

    /// The `rdf:type` predicate.
    pub fn rdf_type() -> Self {
        Self::new(vocab::RDF_TYPE)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.0)
    }
}

impl From<&str> for EntityId {
    fn from(iri: &str) -> Self {
        Self::new(iri)
    }
}

/// A literal value terminating a fact.
///
/// Plain strings are stored without a datatype; `xsd:string` and
/// `rdf:langString` are normalised away on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    /// Lexical form.
    pub value: String,
    /// Datatype IRI for typed literals (numbers, dates, ...).
    pub datatype: Option<EntityId>,
    /// BCP 47 language tag, if any.
    pub language: Option<String>,
}

impl Literal {
    /// A plain string literal.
    pub fn plain(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            datatype: None,
            language: None,
        }
    }

    /// A language-tagged string literal.
    pub fn with_language(value: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            datatype: None,
            language: Some(language.into()),
        }
    }

    /// A typed literal.
    pub fn typed(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        let datatype = datatype.into();
        let datatype = if datatype == vocab::XSD_STRING || datatype == vocab::RDF_LANG_STRING {
            None
        } else {
            Some(EntityId::new(datatype))
        };
        Self {
            value: value.into(),
            datatype,
            language: None,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Object position of a triple: an entity or a literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    Entity(EntityId),
    Literal(Literal),
}

impl Term {
    pub fn as_entity(&self) -> Option<&EntityId> {
        match self {
            Term::Entity(id) => Some(id),
            Term::Literal(_) => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(lit) => Some(lit),
            Term::Entity(_) => None,
        }
    }
}

impl From<EntityId> for Term {
    fn from(id: EntityId) -> Self {
        Term::Entity(id)
    }
}

impl From<Literal> for Term {
    fn from(lit: Literal) -> Self {
        Term::Literal(lit)
    }
}

/// A triple (subject, predicate, object) in the knowledge graph.
///
/// Identity is the exact `(subject, predicate, object)` match; two triples
/// with the same components are the same fact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triple {
    pub subject: EntityId,
    pub predicate: EntityId,
    pub object: Term,
}

impl Triple {
    pub fn new(subject: EntityId, predicate: EntityId, object: impl Into<Term>) -> Self {
        Self {
            subject,
            predicate,
            object: object.into(),
        }
    }

    /// The entity at the object position, if the object is not a literal.
    pub fn object_entity(&self) -> Option<&EntityId> {
        self.object.as_entity()
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.object {
            Term::Entity(o) => write!(f, "{} {} {}", self.subject, self.predicate, o),
            Term::Literal(l) => write!(f, "{} {} \"{}\"", self.subject, self.predicate, l),
        }
    }
}
