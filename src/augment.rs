//! Strategy selection and prompt-context rendering.
//!
//! Three strategies are compared on the same question:
//!
//! - [`Strategy::Baseline`]: no augmentation, the question alone
//! - [`Strategy::Keyword`]: facts from [`KeywordRetriever`]
//! - [`Strategy::Reasoning`]: entities, path and facts from [`Reasoner`]
//!
//! [`AugmentedContext::render`] produces the text block a prompt builder
//! would embed. Model invocation itself is not part of this crate.

use std::fmt::Write;

use serde::Serialize;

use crate::config::{Config, ContextConfig};
use crate::graph::view::{GraphResult, GraphView};
use crate::reason::Reasoner;
use crate::reason::report::ReasoningReport;
use crate::retrieve::KeywordRetriever;

/// Retrieval strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Baseline,
    Keyword,
    Reasoning,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Baseline => write!(f, "baseline"),
            Self::Keyword => write!(f, "keyword"),
            Self::Reasoning => write!(f, "reasoning"),
        }
    }
}

/// Retrieved context for one question under one strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AugmentedContext {
    pub strategy: Strategy,
    pub question: String,
    /// Fact strings in retrieval order, uncapped.
    pub facts: Vec<String>,
    /// Full reasoning report, for [`Strategy::Reasoning`] only.
    pub report: Option<ReasoningReport>,
}

impl AugmentedContext {
    /// Render the context block, keeping at most `max_facts` facts.
    pub fn render(&self, max_facts: usize) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Question: {}", self.question);
        if self.strategy == Strategy::Baseline {
            return out;
        }
        out.push('\n');

        if let Some(report) = &self.report {
            if !report.entities.is_empty() {
                let _ = writeln!(out, "Entities: {}", report.entities.join(", "));
            }
            if !report.path.is_empty() {
                let _ = writeln!(out, "Reasoning path:");
                for edge in &report.path {
                    let _ = writeln!(out, "  {edge}");
                }
            }
        }

        if self.facts.is_empty() {
            let _ = writeln!(out, "No relevant facts were found in the knowledge base.");
            return out;
        }
        let _ = writeln!(out, "Relevant facts from the knowledge base:");
        for fact in self.facts.iter().take(max_facts) {
            let _ = writeln!(out, "- {fact}");
        }
        let omitted = self.facts.len().saturating_sub(max_facts);
        if omitted > 0 {
            let _ = writeln!(out, "({omitted} more facts omitted)");
        }
        out
    }
}

/// Runs any of the three strategies with shared configuration.
#[derive(Debug, Clone, Default)]
pub struct Augmenter {
    reasoner: Reasoner,
    retriever: KeywordRetriever,
    context: ContextConfig,
}

impl Augmenter {
    pub fn new(reasoner: Reasoner, retriever: KeywordRetriever, context: ContextConfig) -> Self {
        Self {
            reasoner,
            retriever,
            context,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Reasoner::new(config.synonym_table()),
            KeywordRetriever::new(config.keyword.clone()),
            config.context.clone(),
        )
    }

    pub fn reasoner(&self) -> &Reasoner {
        &self.reasoner
    }

    pub fn retriever(&self) -> &KeywordRetriever {
        &self.retriever
    }

    /// The fact cap applied by [`render`](Self::render).
    pub fn max_facts(&self) -> usize {
        self.context.max_facts
    }

    /// Retrieve context for `question` with the chosen strategy.
    pub fn augment<G: GraphView + ?Sized>(
        &self,
        strategy: Strategy,
        question: &str,
        graph: &G,
    ) -> GraphResult<AugmentedContext> {
        tracing::info!(%strategy, "augmenting question");
        let (facts, report) = match strategy {
            Strategy::Baseline => (Vec::new(), None),
            Strategy::Keyword => (self.retriever.retrieve(question, graph)?, None),
            Strategy::Reasoning => {
                let report = self.reasoner.reason(question, graph)?;
                (report.facts.clone(), Some(report))
            }
        };
        Ok(AugmentedContext {
            strategy,
            question: question.to_string(),
            facts,
            report,
        })
    }

    /// Render `context` with the configured fact cap.
    pub fn render(&self, context: &AugmentedContext) -> String {
        context.render(self.context.max_facts)
    }
}
