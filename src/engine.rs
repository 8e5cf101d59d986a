//! Top-level facade: one loaded ontology plus the configured strategies.
//!
//! The [`Engine`] owns the [`TripleStore`] and an [`Augmenter`] built from the
//! configuration, and exposes every strategy behind [`OntoResult`].

use std::fmt;
use std::path::Path;

use crate::augment::{Augmenter, AugmentedContext, Strategy};
use crate::config::Config;
use crate::error::OntoResult;
use crate::graph::EntityId;
use crate::graph::index::TripleStore;
use crate::graph::rdf::{LoadReport, RdfLoader};
use crate::graph::view::GraphView;
use crate::reason::path::shortest_path;
use crate::reason::report::{ReasoningReport, format_triple};

/// A loaded ontology ready to answer questions.
#[derive(Debug)]
pub struct Engine {
    store: TripleStore,
    load_report: LoadReport,
    augmenter: Augmenter,
}

/// Summary statistics of the loaded ontology.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineInfo {
    pub load: LoadReport,
    pub nodes: usize,
    pub predicates: usize,
    pub labels: usize,
    pub synonyms: usize,
}

impl fmt::Display for EngineInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  {}", self.load)?;
        writeln!(f, "  nodes: {}", self.nodes)?;
        writeln!(f, "  predicates: {}", self.predicates)?;
        writeln!(f, "  labels: {}", self.labels)?;
        write!(f, "  synonym keywords: {}", self.synonyms)
    }
}

impl Engine {
    /// Load `ontology` and the configuration at `config`, or the bundled one.
    pub fn open(ontology: &Path, config: Option<&Path>) -> OntoResult<Self> {
        let config = match config {
            Some(path) => Config::load(path)?,
            None => Config::bundled()?,
        };
        let (store, load_report) = RdfLoader::new().load_file(ontology)?;
        Ok(Self {
            store,
            load_report,
            augmenter: Augmenter::from_config(&config),
        })
    }

    /// Wrap an already populated store.
    pub fn with_store(store: TripleStore, config: &Config) -> Self {
        let load_report = LoadReport {
            triples: store.len(),
            ..Default::default()
        };
        Self {
            store,
            load_report,
            augmenter: Augmenter::from_config(config),
        }
    }

    pub fn store(&self) -> &TripleStore {
        &self.store
    }

    pub fn augmenter(&self) -> &Augmenter {
        &self.augmenter
    }

    /// Relational-reasoning report for `question`.
    pub fn reason(&self, question: &str) -> OntoResult<ReasoningReport> {
        Ok(self.augmenter.reasoner().reason(question, &self.store)?)
    }

    /// Keyword-retrieval facts for `question`.
    pub fn retrieve(&self, question: &str) -> OntoResult<Vec<String>> {
        Ok(self.augmenter.retriever().retrieve(question, &self.store)?)
    }

    /// Retrieved context for `question` under `strategy`.
    pub fn augment(&self, strategy: Strategy, question: &str) -> OntoResult<AugmentedContext> {
        Ok(self.augmenter.augment(strategy, question, &self.store)?)
    }

    /// Rendered prompt context, with the configured fact cap applied.
    pub fn context(&self, strategy: Strategy, question: &str) -> OntoResult<String> {
        let context = self.augment(strategy, question)?;
        Ok(self.augmenter.render(&context))
    }

    /// Find an entity by exact `rdfs:label`, else by IRI.
    pub fn lookup_entity(&self, name: &str) -> OntoResult<Option<EntityId>> {
        if let Some(id) = self.store.resolve_label(name)? {
            return Ok(Some(id));
        }
        let id = EntityId::new(name);
        Ok(self.store.has_entity(&id).then_some(id))
    }

    /// Rendered hops of the shortest path between two entities.
    ///
    /// `Ok(None)` when unreachable; an empty list when `from == to`.
    pub fn path_between(&self, from: &EntityId, to: &EntityId) -> OntoResult<Option<Vec<String>>> {
        let Some(path) = shortest_path(&self.store, from, to)? else {
            return Ok(None);
        };
        let hops = path
            .hops()
            .iter()
            .map(|hop| format_triple(&self.store, hop))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Some(hops))
    }

    pub fn info(&self) -> OntoResult<EngineInfo> {
        Ok(EngineInfo {
            load: self.load_report.clone(),
            nodes: self.store.node_count(),
            predicates: self.store.predicates().len(),
            labels: self.store.triples_with_predicate(&EntityId::label())?.len(),
            synonyms: self.augmenter.reasoner().resolver().synonyms().len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, LoadError, OntoError};
    use std::path::PathBuf;

    fn fixture() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/hpc.ttl")
    }

    #[test]
    fn open_with_bundled_config() {
        let engine = Engine::open(&fixture(), None).unwrap();
        let info = engine.info().unwrap();
        assert_eq!(info.load.triples, 30);
        assert_eq!(info.synonyms, 4);

        let report = engine.reason("Quelle version d'OpenMP ?").unwrap();
        assert_eq!(report.entities, vec!["OpenMP"]);
    }

    #[test]
    fn missing_ontology_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Engine::open(&dir.path().join("absent.ttl"), None).unwrap_err();
        assert!(matches!(err, OntoError::Load(LoadError::Io { .. })));
    }

    #[test]
    fn missing_config_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("absent.toml");
        let err = Engine::open(&fixture(), Some(&config)).unwrap_err();
        assert!(matches!(err, OntoError::Config(ConfigError::Io { .. })));
    }

    #[test]
    fn lookup_by_label_or_iri() {
        let engine = Engine::open(&fixture(), None).unwrap();
        let by_label = engine.lookup_entity("Bank conflicts L2").unwrap().unwrap();
        let by_iri = engine
            .lookup_entity("http://example.org/hpc#PaddingMemoire3D")
            .unwrap()
            .unwrap();
        assert_eq!(
            engine.path_between(&by_label, &by_iri).unwrap(),
            Some(vec!["Padding mémoire 3D --[corrige]--> Bank conflicts L2".to_string()])
        );
        assert_eq!(engine.lookup_entity("Inconnu").unwrap(), None);
    }

    #[test]
    fn context_applies_strategy() {
        let store = TripleStore::new();
        let engine = Engine::with_store(store, &Config::default());
        assert_eq!(
            engine.context(Strategy::Baseline, "q").unwrap(),
            "Question: q\n"
        );
        assert!(engine.retrieve("rien").unwrap().is_empty());
    }
}
