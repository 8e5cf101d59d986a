//! Relational path discovery between resolved entities.
//!
//! Breadth-first search over the undirected view of the graph: from each node
//! both outgoing edges (node as subject) and incoming edges (node as object)
//! are candidate hops, but every hop keeps its stored direction. Only entity
//! neighbors are followed; literals terminate facts, not paths.

use std::collections::{HashMap, VecDeque};

use serde::Serialize;

use crate::graph::view::{GraphResult, GraphView};
use crate::graph::{EntityId, Triple};

/// An ordered chain of triples linking a start entity to an end entity.
///
/// Consecutive hops share an entity (as subject or object). A path with no
/// hops means start and end are the same entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Path {
    hops: Vec<Triple>,
}

impl Path {
    pub fn new(hops: Vec<Triple>) -> Self {
        Self { hops }
    }

    /// Number of hops.
    pub fn len(&self) -> usize {
        self.hops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hops.is_empty()
    }

    pub fn hops(&self) -> &[Triple] {
        &self.hops
    }

    /// Entities touched by the path, each once, in order of appearance.
    pub fn entities(&self) -> Vec<&EntityId> {
        let mut seen = Vec::new();
        for hop in &self.hops {
            for node in std::iter::once(&hop.subject).chain(hop.object_entity()) {
                if !seen.contains(&node) {
                    seen.push(node);
                }
            }
        }
        seen
    }
}

/// Shortest path by hop count from `start` to `end`, ignoring edge direction.
///
/// Nodes are marked visited when enqueued, and the search stops as soon as
/// `end` is discovered. Among several shortest paths, the one whose edges the
/// graph enumerates first wins (outgoing edges before incoming ones).
/// Returns `Ok(None)` when `end` is unreachable.
pub fn shortest_path<G: GraphView + ?Sized>(
    graph: &G,
    start: &EntityId,
    end: &EntityId,
) -> GraphResult<Option<Path>> {
    if start == end {
        return Ok(Some(Path::default()));
    }

    // node -> (hop that discovered it, node it was discovered from)
    let mut parents: HashMap<EntityId, (Triple, EntityId)> = HashMap::new();
    let mut queue: VecDeque<EntityId> = VecDeque::new();
    queue.push_back(start.clone());

    let is_visited = |parents: &HashMap<EntityId, (Triple, EntityId)>, node: &EntityId| {
        node == start || parents.contains_key(node)
    };

    while let Some(current) = queue.pop_front() {
        let outgoing = graph
            .triples_from(&current)?
            .into_iter()
            .filter_map(|t| {
                let next = t.object_entity()?.clone();
                Some((next, t))
            });
        let incoming = graph
            .triples_to(&current)?
            .into_iter()
            .map(|(subject, predicate)| {
                let hop = Triple::new(subject.clone(), predicate, current.clone());
                (subject, hop)
            });

        for (next, hop) in outgoing.chain(incoming) {
            if is_visited(&parents, &next) {
                continue;
            }
            parents.insert(next.clone(), (hop, current.clone()));
            if &next == end {
                return Ok(Some(rebuild(&parents, start, end)));
            }
            queue.push_back(next);
        }
    }

    Ok(None)
}

fn rebuild(
    parents: &HashMap<EntityId, (Triple, EntityId)>,
    start: &EntityId,
    end: &EntityId,
) -> Path {
    let mut hops = Vec::new();
    let mut node = end;
    while node != start {
        let Some((hop, prev)) = parents.get(node) else {
            break;
        };
        hops.push(hop.clone());
        node = prev;
    }
    hops.reverse();
    Path::new(hops)
}

/// Search ordered pairs of distinct entities and return the first non-empty path.
///
/// Pairs are enumerated as permutations in entity order: `(e0, e1), (e0, e2),
/// ..., (e1, e0), (e1, e2), ...`. Both directions of a pair are tried since
/// tie-breaking can differ. The first pair with any path wins, which is not
/// necessarily the globally shortest path across all pairs. Fewer than two
/// entities means no search.
pub fn first_connecting_path<G: GraphView + ?Sized>(
    graph: &G,
    entities: &[EntityId],
) -> GraphResult<Option<Path>> {
    if entities.len() < 2 {
        return Ok(None);
    }
    for (i, start) in entities.iter().enumerate() {
        for (j, end) in entities.iter().enumerate() {
            if i == j {
                continue;
            }
            tracing::debug!(start = %start, end = %end, "searching path");
            if let Some(path) = shortest_path(graph, start, end)? {
                if !path.is_empty() {
                    tracing::info!(start = %start, end = %end, hops = path.len(), "path found");
                    return Ok(Some(path));
                }
            }
        }
    }
    tracing::info!(pairs = entities.len() * (entities.len() - 1), "no connecting path");
    Ok(None)
}
