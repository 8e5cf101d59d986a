//! Entity resolution: map a question's vocabulary to graph entities.
//!
//! Two passes write into one insertion-ordered set:
//!
//! 1. **Synonym pass**: every synonym keyword found in the lowercased question
//!    contributes the entities named by its formal labels (exact reverse-label
//!    lookup; unknown or ambiguous labels are skipped).
//! 2. **Direct-label pass**: every `rdfs:label` literal that occurs in the
//!    lowercased question contributes its subject.
//!
//! The resulting order (synonym table order, then label iteration order) is
//! the contract that pair selection and the neighborhood fallback rely on.

use serde::{Deserialize, Serialize};

use crate::graph::view::{GraphResult, GraphView};
use crate::graph::{EntityId, Term};

use super::set::InsertionSet;

/// Entities resolved for one question, in discovery order.
pub type ResolvedEntities = InsertionSet<EntityId>;

/// One synonym entry: an informal keyword and the formal labels it stands for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynonymEntry {
    pub keyword: String,
    pub labels: Vec<String>,
}

/// Read-only mapping from lowercase informal keywords to formal labels.
///
/// Entries keep their declaration order. Declaring a keyword twice appends
/// the new labels to the existing entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynonymTable {
    entries: Vec<SynonymEntry>,
}

impl SynonymTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add labels for a keyword. The keyword is lowercased; empty keywords are ignored.
    pub fn insert<I, S>(&mut self, keyword: &str, labels: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keyword = keyword.trim().to_lowercase();
        if keyword.is_empty() {
            return;
        }
        let labels = labels.into_iter().map(Into::into);
        match self.entries.iter_mut().find(|e| e.keyword == keyword) {
            Some(entry) => entry.labels.extend(labels),
            None => self.entries.push(SynonymEntry {
                keyword,
                labels: labels.collect(),
            }),
        }
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with<I, S>(mut self, keyword: &str, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(keyword, labels);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &SynonymEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<SynonymEntry> for SynonymTable {
    fn from_iter<I: IntoIterator<Item = SynonymEntry>>(iter: I) -> Self {
        let mut table = Self::new();
        for entry in iter {
            table.insert(&entry.keyword, entry.labels);
        }
        table
    }
}

/// Resolves question text to graph entities.
#[derive(Debug, Clone, Default)]
pub struct EntityResolver {
    synonyms: SynonymTable,
}

impl EntityResolver {
    pub fn new(synonyms: SynonymTable) -> Self {
        Self { synonyms }
    }

    pub fn synonyms(&self) -> &SynonymTable {
        &self.synonyms
    }

    /// Resolve every entity named or alluded to in `question`.
    ///
    /// An empty result is a normal outcome, not an error; errors only come
    /// from the graph itself.
    pub fn resolve<G: GraphView + ?Sized>(
        &self,
        question: &str,
        graph: &G,
    ) -> GraphResult<ResolvedEntities> {
        let mut found = ResolvedEntities::new();
        let question_lower = question.to_lowercase();
        if question_lower.trim().is_empty() {
            return Ok(found);
        }

        tracing::debug!("resolving entities (synonyms, then direct labels)");
        self.synonym_pass(&question_lower, graph, &mut found)?;
        Self::direct_label_pass(&question_lower, graph, &mut found)?;

        if found.is_empty() {
            tracing::warn!("no entity found in question");
        } else {
            tracing::info!(count = found.len(), "entities identified");
        }
        Ok(found)
    }

    fn synonym_pass<G: GraphView + ?Sized>(
        &self,
        question_lower: &str,
        graph: &G,
        found: &mut ResolvedEntities,
    ) -> GraphResult<()> {
        for entry in self.synonyms.iter() {
            if !question_lower.contains(entry.keyword.as_str()) {
                continue;
            }
            for label in &entry.labels {
                if let Some(entity) = graph.resolve_label(label)? {
                    if found.insert(entity.clone()) {
                        tracing::info!(
                            keyword = %entry.keyword,
                            label = %label,
                            entity = %entity,
                            "entity found via synonym"
                        );
                    }
                }
            }
        }
        Ok(())
    }

    fn direct_label_pass<G: GraphView + ?Sized>(
        question_lower: &str,
        graph: &G,
        found: &mut ResolvedEntities,
    ) -> GraphResult<()> {
        for triple in graph.triples_with_predicate(&EntityId::label())? {
            // Non-literal labels are malformed; skip them.
            let Term::Literal(lit) = &triple.object else {
                continue;
            };
            let label_lower = lit.value.to_lowercase();
            // An empty label would match every question.
            if label_lower.trim().is_empty() || !question_lower.contains(label_lower.as_str()) {
                continue;
            }
            if found.insert(triple.subject.clone()) {
                tracing::info!(label = %lit.value, entity = %triple.subject, "entity found by direct label");
            }
        }
        Ok(())
    }
}
