//! Human-readable rendering of a reasoning run.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::graph::view::{GraphResult, GraphView};
use crate::graph::{EntityId, Term, Triple};

use super::path::Path;

/// Terminal artifact of one query, handed to response generation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasoningReport {
    /// The question as asked.
    pub question: String,
    /// Labels of the resolved entities, in resolution order.
    pub entities: Vec<String>,
    /// Path edges in path order; empty when no path was found.
    pub path: Vec<String>,
    /// Supporting facts in aggregation order.
    pub facts: Vec<String>,
}

impl ReasoningReport {
    /// Report for a question with no graph correlate.
    pub fn empty(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            ..Default::default()
        }
    }
}

impl fmt::Display for ReasoningReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Question: {}", self.question)?;
        if self.entities.is_empty() {
            return writeln!(f, "Entities: (none)");
        }
        writeln!(f, "Entities: {}", self.entities.join(", "))?;
        if self.path.is_empty() {
            writeln!(f, "Path: (none)")?;
        } else {
            writeln!(f, "Path:")?;
            for edge in &self.path {
                writeln!(f, "  {edge}")?;
            }
        }
        writeln!(f, "Facts ({}):", self.facts.len())?;
        for fact in &self.facts {
            writeln!(f, "  - {fact}")?;
        }
        Ok(())
    }
}

/// Display name of an entity: its first `rdfs:label`, else the trailing
/// fragment of its identifier.
pub fn entity_label<G: GraphView + ?Sized>(graph: &G, entity: &EntityId) -> GraphResult<String> {
    Ok(match graph.label_of(entity)? {
        Some(label) => label,
        None => entity.local_name().to_string(),
    })
}

/// Render a triple as `"<subject> --[<predicate>]--> <object>"`.
///
/// Entities render through [`entity_label`]; literal objects are quoted.
pub fn format_triple<G: GraphView + ?Sized>(graph: &G, triple: &Triple) -> GraphResult<String> {
    let object = match &triple.object {
        Term::Entity(id) => entity_label(graph, id)?,
        Term::Literal(lit) => format!("\"{}\"", lit.value),
    };
    Ok(format!(
        "{} --[{}]--> {}",
        entity_label(graph, &triple.subject)?,
        entity_label(graph, &triple.predicate)?,
        object
    ))
}

/// Assemble the report from the stages' outputs.
pub fn format_report<G: GraphView + ?Sized>(
    question: &str,
    resolved: &[EntityId],
    path: Option<&Path>,
    facts: &[Triple],
    graph: &G,
) -> GraphResult<ReasoningReport> {
    let entities = resolved
        .iter()
        .map(|e| entity_label(graph, e))
        .collect::<GraphResult<Vec<_>>>()?;
    let path = match path {
        Some(path) => path
            .hops()
            .iter()
            .map(|t| format_triple(graph, t))
            .collect::<GraphResult<Vec<_>>>()?,
        None => Vec::new(),
    };
    let facts = facts
        .iter()
        .map(|t| format_triple(graph, t))
        .collect::<GraphResult<Vec<_>>>()?;

    Ok(ReasoningReport {
        question: question.to_string(),
        entities,
        path,
        facts,
    })
}
