//! In-memory triple store with secondary indexes.
//!
//! Uses `petgraph` for the graph structure (nodes are terms, edges carry the
//! predicate) and `DashMap` for fast lookups by term, predicate, or label text.
//! All enumerations come back in insertion order.

use std::collections::HashSet;
use std::sync::{RwLock, RwLockReadGuard};

use dashmap::{DashMap, DashSet};
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::error::GraphError;

use super::view::{GraphResult, GraphView};
use super::{EntityId, Term, Triple, vocab};

/// In-memory triple store backed by petgraph with dual-indexing.
///
/// The store deduplicates triples: inserting the same `(s, p, o)` twice is a
/// no-op. Readers only need `&self`, so a loaded store can be shared across
/// threads behind an `Arc`.
pub struct TripleStore {
    /// The directed multigraph: nodes are terms, edges are predicates.
    graph: RwLock<DiGraph<Term, EntityId>>,
    /// Term → NodeIndex mapping for O(1) node lookups.
    node_index: DashMap<Term, NodeIndex>,
    /// Predicate → triples carrying it, in insertion order.
    predicate_index: DashMap<EntityId, Vec<Triple>>,
    /// `rdfs:label` lexical form → labelled subjects.
    label_index: DashMap<String, Vec<EntityId>>,
    /// Every stored triple, for deduplication.
    triples: DashSet<Triple>,
}

impl TripleStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            graph: RwLock::new(DiGraph::new()),
            node_index: DashMap::new(),
            predicate_index: DashMap::new(),
            label_index: DashMap::new(),
            triples: DashSet::new(),
        }
    }

    fn read(&self) -> GraphResult<RwLockReadGuard<'_, DiGraph<Term, EntityId>>> {
        self.graph
            .read()
            .map_err(|_| GraphError::LockPoisoned { what: "triple graph" })
    }

    /// Ensure a node exists for the given term. Caller holds the write lock.
    fn ensure_node(&self, graph: &mut DiGraph<Term, EntityId>, term: &Term) -> NodeIndex {
        if let Some(idx) = self.node_index.get(term) {
            return *idx.value();
        }
        let idx = graph.add_node(term.clone());
        self.node_index.insert(term.clone(), idx);
        idx
    }

    /// Insert a triple. Returns `false` if it was already present.
    pub fn insert_triple(&self, triple: &Triple) -> GraphResult<bool> {
        {
            let mut graph = self
                .graph
                .write()
                .map_err(|_| GraphError::LockPoisoned { what: "triple graph" })?;
            // Recorded only once the graph can take the edge.
            if !self.triples.insert(triple.clone()) {
                return Ok(false);
            }
            let subject = Term::Entity(triple.subject.clone());
            let subj_idx = self.ensure_node(&mut graph, &subject);
            let obj_idx = self.ensure_node(&mut graph, &triple.object);
            graph.add_edge(subj_idx, obj_idx, triple.predicate.clone());
        }

        self.predicate_index
            .entry(triple.predicate.clone())
            .or_default()
            .push(triple.clone());

        if triple.predicate.as_str() == vocab::RDFS_LABEL {
            if let Term::Literal(lit) = &triple.object {
                self.label_index
                    .entry(lit.value.clone())
                    .or_default()
                    .push(triple.subject.clone());
            }
        }

        Ok(true)
    }

    /// Bulk-load triples. Returns the number of new triples stored.
    pub fn bulk_load(&self, triples: &[Triple]) -> GraphResult<usize> {
        let mut count = 0;
        for triple in triples {
            if self.insert_triple(triple)? {
                count += 1;
            }
        }
        Ok(count)
    }

    /// Whether the entity appears anywhere as subject or object.
    pub fn has_entity(&self, entity: &EntityId) -> bool {
        self.node_index.contains_key(&Term::Entity(entity.clone()))
    }

    /// Number of nodes (entities and distinct literals).
    pub fn node_count(&self) -> usize {
        self.node_index.len()
    }

    /// Number of triples.
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// All distinct predicates.
    pub fn predicates(&self) -> Vec<EntityId> {
        let mut preds: Vec<EntityId> = self.predicate_index.iter().map(|e| e.key().clone()).collect();
        preds.sort();
        preds
    }

    /// Every triple in insertion order.
    pub fn all_triples(&self) -> GraphResult<Vec<Triple>> {
        let graph = self.read()?;
        Ok(graph
            .edge_indices()
            .filter_map(|ei| {
                let (src, dst) = graph.edge_endpoints(ei)?;
                let subject = graph.node_weight(src)?.as_entity()?.clone();
                let object = graph.node_weight(dst)?.clone();
                let predicate = graph.edge_weight(ei)?.clone();
                Some(Triple {
                    subject,
                    predicate,
                    object,
                })
            })
            .collect())
    }

    fn node_of(&self, entity: &EntityId) -> Option<NodeIndex> {
        self.node_index
            .get(&Term::Entity(entity.clone()))
            .map(|idx| *idx.value())
    }
}

impl GraphView for TripleStore {
    fn triples_with_predicate(&self, predicate: &EntityId) -> GraphResult<Vec<Triple>> {
        Ok(self
            .predicate_index
            .get(predicate)
            .map(|v| v.value().clone())
            .unwrap_or_default())
    }

    fn triples_from(&self, subject: &EntityId) -> GraphResult<Vec<Triple>> {
        let Some(subj_idx) = self.node_of(subject) else {
            return Ok(vec![]);
        };
        let graph = self.read()?;

        // petgraph walks adjacency lists newest-first.
        let mut triples: Vec<Triple> = graph
            .edges_directed(subj_idx, Direction::Outgoing)
            .filter_map(|e| {
                let object = graph.node_weight(e.target())?.clone();
                Some(Triple {
                    subject: subject.clone(),
                    predicate: e.weight().clone(),
                    object,
                })
            })
            .collect();
        triples.reverse();
        Ok(triples)
    }

    fn triples_to(&self, object: &EntityId) -> GraphResult<Vec<(EntityId, EntityId)>> {
        let Some(obj_idx) = self.node_of(object) else {
            return Ok(vec![]);
        };
        let graph = self.read()?;

        let mut pairs: Vec<(EntityId, EntityId)> = graph
            .edges_directed(obj_idx, Direction::Incoming)
            .filter_map(|e| {
                let subject = graph.node_weight(e.source())?.as_entity()?.clone();
                Some((subject, e.weight().clone()))
            })
            .collect();
        pairs.reverse();
        Ok(pairs)
    }

    fn resolve_label(&self, text: &str) -> GraphResult<Option<EntityId>> {
        let Some(subjects) = self.label_index.get(text) else {
            return Ok(None);
        };
        let distinct: HashSet<&EntityId> = subjects.value().iter().collect();
        if distinct.len() == 1 {
            Ok(subjects.value().first().cloned())
        } else {
            Ok(None)
        }
    }
}

impl Default for TripleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TripleStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TripleStore")
            .field("nodes", &self.node_count())
            .field("triples", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Literal;

    fn ent(name: &str) -> EntityId {
        EntityId::new(format!("http://example.org/hpc#{name}"))
    }

    #[test]
    fn insert_and_query() {
        let store = TripleStore::new();
        let sun = ent("Sun");
        let is_a = ent("isA");
        let star = ent("Star");

        assert!(store.insert_triple(&Triple::new(sun.clone(), is_a.clone(), star.clone())).unwrap());

        assert!(store.has_entity(&sun));
        assert!(store.has_entity(&star));
        assert!(!store.has_entity(&is_a)); // predicates are edges, not nodes
        assert_eq!(store.node_count(), 2);
        assert_eq!(store.len(), 1);

        let from = store.triples_from(&sun).unwrap();
        assert_eq!(from, vec![Triple::new(sun.clone(), is_a.clone(), star.clone())]);

        let to = store.triples_to(&star).unwrap();
        assert_eq!(to, vec![(sun, is_a)]);
    }

    #[test]
    fn duplicates_are_ignored() {
        let store = TripleStore::new();
        let t = Triple::new(ent("A"), ent("r"), ent("B"));
        assert!(store.insert_triple(&t).unwrap());
        assert!(!store.insert_triple(&t).unwrap());
        assert_eq!(store.len(), 1);
        assert_eq!(store.triples_from(&ent("A")).unwrap().len(), 1);
        assert_eq!(store.triples_with_predicate(&ent("r")).unwrap().len(), 1);
    }

    #[test]
    fn enumeration_is_insertion_order() {
        let store = TripleStore::new();
        let a = ent("A");
        for name in ["B", "C", "D"] {
            store
                .insert_triple(&Triple::new(a.clone(), ent("r"), ent(name)))
                .unwrap();
        }
        let objects: Vec<_> = store
            .triples_from(&a)
            .unwrap()
            .into_iter()
            .map(|t| t.object)
            .collect();
        assert_eq!(
            objects,
            vec![
                Term::Entity(ent("B")),
                Term::Entity(ent("C")),
                Term::Entity(ent("D")),
            ]
        );

        let all = store.all_triples().unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].object, Term::Entity(ent("B")));
    }

    #[test]
    fn triples_to_lists_incoming_edges() {
        let store = TripleStore::new();
        let c = ent("C");
        store.insert_triple(&Triple::new(ent("A"), ent("r1"), c.clone())).unwrap();
        store.insert_triple(&Triple::new(ent("B"), ent("r2"), c.clone())).unwrap();
        store
            .insert_triple(&Triple::new(ent("A"), EntityId::label(), Literal::plain("A")))
            .unwrap();

        let incoming = store.triples_to(&c).unwrap();
        assert_eq!(incoming, vec![(ent("A"), ent("r1")), (ent("B"), ent("r2"))]);
    }

    #[test]
    fn label_lookups() {
        let store = TripleStore::new();
        let fs = ent("FalseSharing");
        store
            .insert_triple(&Triple::new(fs.clone(), EntityId::label(), Literal::plain("False sharing")))
            .unwrap();
        store
            .insert_triple(&Triple::new(fs.clone(), EntityId::rdf_type(), ent("ProblemePerformance")))
            .unwrap();

        assert_eq!(store.resolve_label("False sharing").unwrap(), Some(fs.clone()));
        assert_eq!(store.resolve_label("false sharing").unwrap(), None);
        assert_eq!(store.label_of(&fs).unwrap().as_deref(), Some("False sharing"));
        assert_eq!(store.types_of(&fs).unwrap(), vec![ent("ProblemePerformance")]);
    }

    #[test]
    fn ambiguous_label_resolves_to_none() {
        let store = TripleStore::new();
        for name in ["A", "B"] {
            store
                .insert_triple(&Triple::new(ent(name), EntityId::label(), Literal::plain("Twin")))
                .unwrap();
        }
        assert_eq!(store.resolve_label("Twin").unwrap(), None);
    }

    #[test]
    fn same_entity_with_two_language_labels_still_resolves() {
        let store = TripleStore::new();
        let a = ent("A");
        store
            .insert_triple(&Triple::new(a.clone(), EntityId::label(), Literal::with_language("Cache", "fr")))
            .unwrap();
        store
            .insert_triple(&Triple::new(a.clone(), EntityId::label(), Literal::with_language("Cache", "en")))
            .unwrap();
        assert_eq!(store.resolve_label("Cache").unwrap(), Some(a));
    }

    #[test]
    fn non_literal_label_is_not_a_label() {
        let store = TripleStore::new();
        let a = ent("A");
        store
            .insert_triple(&Triple::new(a.clone(), EntityId::label(), ent("B")))
            .unwrap();
        assert_eq!(store.label_of(&a).unwrap(), None);
    }

    #[test]
    fn poisoned_lock_does_not_record_the_triple() {
        let store = TripleStore::new();
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = store.graph.write().unwrap();
            panic!("writer died while holding the lock");
        }));

        let t = Triple::new(ent("A"), ent("r"), ent("B"));
        assert!(matches!(
            store.insert_triple(&t),
            Err(GraphError::LockPoisoned { .. })
        ));
        assert!(store.is_empty());
        assert!(store.triples_with_predicate(&ent("r")).unwrap().is_empty());
        // A retry still reports the failure instead of claiming a duplicate.
        assert!(matches!(
            store.insert_triple(&t),
            Err(GraphError::LockPoisoned { .. })
        ));
    }

    #[test]
    fn empty_queries() {
        let store = TripleStore::new();
        assert!(store.is_empty());
        assert!(store.triples_from(&ent("A")).unwrap().is_empty());
        assert!(store.triples_to(&ent("A")).unwrap().is_empty());
        assert!(store.triples_with_predicate(&ent("r")).unwrap().is_empty());
        assert_eq!(store.resolve_label("A").unwrap(), None);
    }
}
