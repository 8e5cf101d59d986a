//! Read-only graph interface consumed by the retrieval strategies.
//!
//! Nothing in this trait can mutate a graph, so any number of queries may
//! share one store concurrently as long as the implementation supports
//! concurrent reads.

use crate::error::GraphError;

use super::{EntityId, Term, Triple};

/// Result type for graph operations.
pub type GraphResult<T> = std::result::Result<T, GraphError>;

/// Read access to a triple graph.
///
/// Every enumeration is returned in the store's iteration order; callers that
/// need reproducible output rely on that order being stable for an
/// unmodified graph.
pub trait GraphView {
    /// All triples with the given predicate.
    fn triples_with_predicate(&self, predicate: &EntityId) -> GraphResult<Vec<Triple>>;

    /// All triples where `subject` is the subject (outgoing edges).
    fn triples_from(&self, subject: &EntityId) -> GraphResult<Vec<Triple>>;

    /// `(subject, predicate)` pairs of all triples whose object is `object`
    /// (incoming edges).
    fn triples_to(&self, object: &EntityId) -> GraphResult<Vec<(EntityId, EntityId)>>;

    /// Exact reverse-label lookup: the single entity whose `rdfs:label` has
    /// lexical form `text`. `None` when no entity, or more than one, carries it.
    fn resolve_label(&self, text: &str) -> GraphResult<Option<EntityId>>;

    /// The first textual `rdfs:label` of `entity`. Blank labels are skipped.
    fn label_of(&self, entity: &EntityId) -> GraphResult<Option<String>> {
        let label = EntityId::label();
        Ok(self
            .triples_from(entity)?
            .into_iter()
            .filter(|t| t.predicate == label)
            .find_map(|t| match t.object {
                Term::Literal(lit) if !lit.value.trim().is_empty() => Some(lit.value),
                _ => None,
            }))
    }

    /// Entities asserted as `rdf:type` of `entity`.
    fn types_of(&self, entity: &EntityId) -> GraphResult<Vec<EntityId>> {
        let rdf_type = EntityId::rdf_type();
        Ok(self
            .triples_from(entity)?
            .into_iter()
            .filter(|t| t.predicate == rdf_type)
            .filter_map(|t| match t.object {
                Term::Entity(id) => Some(id),
                Term::Literal(_) => None,
            })
            .collect())
    }
}
