//! Keyword retrieval: facts about entities whose text mentions a question keyword.
//!
//! This is the simpler of the two augmenting strategies. It has no notion of
//! relations between entities: question keywords are matched as substrings of
//! textual annotations, and each matched subject is expanded into a handful of
//! `"<label> (type: ..) - <property>: <value>"` strings.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::KeywordConfig;
use crate::graph::view::{GraphResult, GraphView};
use crate::graph::{EntityId, Term, vocab};
use crate::reason::set::InsertionSet;

// ── Keyword extraction ──────────────────────────────────────────────────

static RE_PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s-]").unwrap());

const STOPWORDS_FR: &[&str] = &[
    "le", "la", "les", "de", "des", "du", "et", "ou", "est", "sont", "un", "une", "en", "pour",
    "que", "qui", "quoi", "quel", "quelle", "quels", "quelles", "avec", "sans", "dans", "sur",
    "sous", "par", "ce", "cet", "cette", "ces", "mon", "ma", "mes", "ton", "ta", "tes", "son",
    "sa", "ses", "notre", "nos", "votre", "vos", "leur", "leurs", "je", "tu", "il", "elle",
    "nous", "vous", "ils", "elles", "ai", "as", "a", "avons", "avez", "ont", "suis", "es",
    "sommes", "etes", "étais", "était", "étions", "étiez", "étaient", "serai", "seras", "sera",
    "serons", "serez", "seront", "comment", "pourquoi", "quand", "où", "y", "a-t-il",
];

const STOPWORDS_EN: &[&str] = &[
    "a", "an", "the", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
    "do", "does", "did", "will", "would", "should", "can", "could", "may", "might", "must", "and",
    "or", "but", "if", "of", "at", "by", "for", "with", "about", "to", "in", "on", "what",
    "which", "who", "whom", "this", "that", "these", "those", "i", "you", "he", "she", "it", "we",
    "they", "me", "him", "her", "us", "them", "my", "your", "his", "its", "our", "their", "mine",
    "yours", "hers", "ours", "theirs", "how", "why", "when", "where",
];

static STOPWORDS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOPWORDS_FR.iter().chain(STOPWORDS_EN).copied().collect());

/// Extract search keywords from a question.
///
/// Lowercases, strips punctuation except hyphens, and keeps words longer than
/// two characters that are not French or English stopwords. A hyphenated word
/// also yields its hyphen-less and space-separated forms.
pub fn extract_keywords(question: &str) -> Vec<String> {
    let lowered = question.to_lowercase();
    let cleaned = RE_PUNCTUATION.replace_all(&lowered, "");

    let mut keywords: InsertionSet<String> = cleaned
        .split_whitespace()
        .filter(|w| w.chars().count() > 2 && !STOPWORDS.contains(*w))
        .map(str::to_string)
        .collect();

    let hyphenated: Vec<String> = keywords.iter().filter(|k| k.contains('-')).cloned().collect();
    for word in hyphenated {
        keywords.insert(word.replace('-', ""));
        keywords.insert(word.replace('-', " "));
    }
    keywords.into_vec()
}

// ── Retriever ───────────────────────────────────────────────────────────

/// Keyword-based fact lookup.
#[derive(Debug, Clone, Default)]
pub struct KeywordRetriever {
    config: KeywordConfig,
}

impl KeywordRetriever {
    pub fn new(config: KeywordConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &KeywordConfig {
        &self.config
    }

    /// Retrieve at most `max_facts` fact strings relevant to `question`.
    pub fn retrieve<G: GraphView + ?Sized>(&self, question: &str, graph: &G) -> GraphResult<Vec<String>> {
        let keywords = extract_keywords(question);
        if keywords.is_empty() {
            tracing::info!("no keywords extracted, returning no facts");
            return Ok(Vec::new());
        }
        tracing::debug!(?keywords, "keywords extracted");

        let subjects = self.matching_subjects(&keywords, graph)?;
        let facts = self.expand(subjects.as_slice(), graph)?;
        tracing::info!(subjects = subjects.len(), facts = facts.len(), "keyword facts retrieved");
        Ok(facts)
    }

    fn matching_subjects<G: GraphView + ?Sized>(
        &self,
        keywords: &[String],
        graph: &G,
    ) -> GraphResult<InsertionSet<EntityId>> {
        let mut found = InsertionSet::new();
        for predicate in &self.config.text_predicates {
            for triple in graph.triples_with_predicate(&EntityId::new(predicate.as_str()))? {
                let Term::Literal(lit) = &triple.object else {
                    continue;
                };
                let value = lit.value.to_lowercase();
                if let Some(keyword) = keywords.iter().find(|k| value.contains(k.as_str())) {
                    if found.insert(triple.subject.clone()) {
                        tracing::debug!(keyword = %keyword, subject = %triple.subject, "keyword matched");
                    }
                }
            }
        }
        Ok(found)
    }

    fn expand<G: GraphView + ?Sized>(&self, subjects: &[EntityId], graph: &G) -> GraphResult<Vec<String>> {
        let max_facts = self.config.max_facts;
        let priority = [EntityId::label(), EntityId::new(vocab::RDFS_COMMENT)];
        let mut facts: InsertionSet<String> = InsertionSet::new();

        for subject in subjects.iter().take(self.config.max_subjects) {
            if facts.len() >= max_facts {
                break;
            }
            let heading = subject_heading(graph, subject)?;
            let outgoing = graph.triples_from(subject)?;

            for prop in &priority {
                let prop_label = node_label(graph, prop)?;
                for triple in outgoing.iter().filter(|t| &t.predicate == prop) {
                    if facts.len() >= max_facts {
                        break;
                    }
                    if let Term::Literal(lit) = &triple.object {
                        facts.insert(format!("{heading} - {prop_label}: {}", lit.value));
                    }
                }
            }

            let mut others = 0;
            for triple in outgoing.iter().filter(|t| !priority.contains(&t.predicate)) {
                if others >= self.config.max_other_per_subject || facts.len() >= max_facts {
                    break;
                }
                let value = match &triple.object {
                    Term::Literal(lit) => lit.value.clone(),
                    Term::Entity(id) => node_label(graph, id)?,
                };
                let prop_label = node_label(graph, &triple.predicate)?;
                if facts.insert(format!("{heading} - {prop_label}: {value}")) {
                    others += 1;
                }
            }
        }
        Ok(facts.into_vec())
    }
}

/// First textual label among `rdfs:label`, `skos:prefLabel`, `dcterms:title`,
/// else the bracketed identifier.
pub fn node_label<G: GraphView + ?Sized>(graph: &G, node: &EntityId) -> GraphResult<String> {
    let outgoing = graph.triples_from(node)?;
    for prop in [vocab::RDFS_LABEL, vocab::SKOS_PREF_LABEL, vocab::DCTERMS_TITLE] {
        let label = outgoing
            .iter()
            .filter(|t| t.predicate.as_str() == prop)
            .filter_map(|t| t.object.as_literal())
            .find(|lit| !lit.value.trim().is_empty());
        if let Some(lit) = label {
            return Ok(lit.value.clone());
        }
    }
    Ok(node.to_string())
}

fn subject_heading<G: GraphView + ?Sized>(graph: &G, subject: &EntityId) -> GraphResult<String> {
    let label = node_label(graph, subject)?;
    let types = graph
        .types_of(subject)?
        .iter()
        .map(|t| node_label(graph, t))
        .collect::<GraphResult<Vec<_>>>()?;
    Ok(if types.is_empty() {
        label
    } else {
        format!("{label} (type: {})", types.join(", "))
    })
}
