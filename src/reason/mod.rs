//! Relational reasoning over the ontology.
//!
//! Control flows strictly forward through four stages:
//!
//! 1. [`resolve`]: question text → resolved entities (ordered, deduplicated)
//! 2. [`path`]: first ordered entity pair with a connecting path, BFS per pair
//! 3. [`facts`]: path regime or neighborhood regime fact collection
//! 4. [`report`]: labels, path edges and facts rendered as strings
//!
//! The core is synchronous and holds no state between queries; each call gets
//! its own traversal state, so one graph may serve concurrent questions.

pub mod facts;
pub mod path;
pub mod report;
pub mod resolve;
pub mod set;

use crate::graph::view::{GraphResult, GraphView};

use facts::{AggregatedFacts, FactRegime, aggregate};
use path::{Path, first_connecting_path};
use report::{ReasoningReport, format_report};
use resolve::{EntityResolver, ResolvedEntities, SynonymTable};

/// Intermediate results of one reasoning run, before rendering.
#[derive(Debug, Clone)]
pub struct ReasoningTrace {
    pub resolved: ResolvedEntities,
    pub path: Option<Path>,
    pub facts: AggregatedFacts,
}

/// The relational-reasoning retrieval strategy.
#[derive(Debug, Clone, Default)]
pub struct Reasoner {
    resolver: EntityResolver,
}

impl Reasoner {
    /// Create a reasoner using the given synonym table for entity resolution.
    pub fn new(synonyms: SynonymTable) -> Self {
        Self {
            resolver: EntityResolver::new(synonyms),
        }
    }

    pub fn resolver(&self) -> &EntityResolver {
        &self.resolver
    }

    /// Run resolution, path search and aggregation, keeping the raw results.
    pub fn trace<G: GraphView + ?Sized>(&self, question: &str, graph: &G) -> GraphResult<ReasoningTrace> {
        let resolved = self.resolver.resolve(question, graph)?;
        if resolved.is_empty() {
            return Ok(ReasoningTrace {
                resolved,
                path: None,
                facts: AggregatedFacts {
                    regime: FactRegime::Empty,
                    facts: Default::default(),
                },
            });
        }

        let path = first_connecting_path(graph, resolved.as_slice())?;
        let facts = aggregate(resolved.as_slice(), path.as_ref(), graph)?;
        Ok(ReasoningTrace {
            resolved,
            path,
            facts,
        })
    }

    /// Answer `question` with a structured report of entities, path and facts.
    ///
    /// Degenerate input never fails: an unresolved question yields an empty
    /// report. Only graph failures are returned as errors.
    pub fn reason<G: GraphView + ?Sized>(&self, question: &str, graph: &G) -> GraphResult<ReasoningReport> {
        tracing::info!(question, "reasoning");
        let trace = self.trace(question, graph)?;
        if trace.resolved.is_empty() {
            return Ok(ReasoningReport::empty(question));
        }
        format_report(
            question,
            trace.resolved.as_slice(),
            trace.path.as_ref(),
            trace.facts.facts.as_slice(),
            graph,
        )
    }
}
