//! Supporting-fact aggregation under two mutually exclusive regimes.
//!
//! - **Path regime**: the path's own triples, plus the `rdfs:label` and
//!   `rdf:type` triples of every entity the path touches.
//! - **Neighborhood regime**: every outgoing triple of the first resolved
//!   entity, unfiltered and uncapped.

use serde::Serialize;

use crate::graph::view::{GraphResult, GraphView};
use crate::graph::{EntityId, Triple};

use super::path::Path;
use super::set::InsertionSet;

/// Deduplicated facts in aggregation order.
pub type FactSet = InsertionSet<Triple>;

/// Which collection policy produced a fact set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FactRegime {
    /// A connecting path was found.
    Path,
    /// No path; facts describe the first resolved entity.
    Neighborhood,
    /// Nothing was resolved.
    Empty,
}

impl std::fmt::Display for FactRegime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Path => write!(f, "path"),
            Self::Neighborhood => write!(f, "neighborhood"),
            Self::Empty => write!(f, "empty"),
        }
    }
}

/// Output of [`aggregate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedFacts {
    pub regime: FactRegime,
    pub facts: FactSet,
}

/// Collect the facts supporting an answer.
///
/// A `Some` path with no hops counts as "no path": only a path that actually
/// links two entities selects the path regime.
pub fn aggregate<G: GraphView + ?Sized>(
    resolved: &[EntityId],
    path: Option<&Path>,
    graph: &G,
) -> GraphResult<AggregatedFacts> {
    let aggregated = match path.filter(|p| !p.is_empty()) {
        Some(path) => AggregatedFacts {
            regime: FactRegime::Path,
            facts: path_facts(path, graph)?,
        },
        None => match resolved.first() {
            Some(main) => AggregatedFacts {
                regime: FactRegime::Neighborhood,
                facts: graph.triples_from(main)?.into_iter().collect(),
            },
            None => AggregatedFacts {
                regime: FactRegime::Empty,
                facts: FactSet::new(),
            },
        },
    };
    tracing::info!(
        regime = %aggregated.regime,
        facts = aggregated.facts.len(),
        "facts aggregated"
    );
    Ok(aggregated)
}

fn path_facts<G: GraphView + ?Sized>(path: &Path, graph: &G) -> GraphResult<FactSet> {
    let label = EntityId::label();
    let rdf_type = EntityId::rdf_type();

    let mut facts: FactSet = path.hops().iter().cloned().collect();
    for node in path.entities() {
        facts.extend(
            graph
                .triples_from(node)?
                .into_iter()
                .filter(|t| t.predicate == label || t.predicate == rdf_type),
        );
    }
    Ok(facts)
}
