//! Process-wide configuration: synonym table and retrieval limits.
//!
//! Configuration is TOML. The bundled default (`data/ontorag.toml`) is compiled
//! into the binary via `include_str!`; a user file passed with `--config`
//! replaces it entirely. Sections missing from a file fall back to defaults.
//!
//! ```toml
//! [[synonyms]]
//! keyword = "lent"
//! labels = ["Goulot d'étranglement réseau", "Haute latence inter-groupe"]
//!
//! [keyword]
//! max_facts = 7
//!
//! [context]
//! max_facts = 25
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::graph::vocab;
use crate::reason::resolve::{SynonymEntry, SynonymTable};

/// Result type for configuration loading.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

const BUNDLED_TOML: &str = include_str!("../data/ontorag.toml");

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Informal keyword → formal labels, in declaration order.
    pub synonyms: Vec<SynonymEntry>,
    /// Keyword retrieval limits.
    pub keyword: KeywordConfig,
    /// Prompt-context rendering.
    pub context: ContextConfig,
}

/// Limits and matched predicates of the keyword retriever.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordConfig {
    /// Maximum number of fact strings returned.
    pub max_facts: usize,
    /// Maximum number of matched subjects expanded into facts.
    pub max_subjects: usize,
    /// Maximum number of non-priority facts per subject.
    pub max_other_per_subject: usize,
    /// Predicates whose literal objects are searched for keywords.
    pub text_predicates: Vec<String>,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            max_facts: 7,
            max_subjects: 5,
            max_other_per_subject: 3,
            text_predicates: vec![
                vocab::RDFS_LABEL.to_string(),
                vocab::RDFS_COMMENT.to_string(),
                vocab::DCTERMS_DESCRIPTION.to_string(),
                vocab::SKOS_DEFINITION.to_string(),
            ],
        }
    }
}

/// Consumer-side rendering of retrieved facts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Facts beyond this many are dropped from the rendered context.
    pub max_facts: usize,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self { max_facts: 25 }
    }
}

impl Config {
    /// The built-in configuration with the default HPC synonym table.
    pub fn bundled() -> ConfigResult<Self> {
        Self::from_toml_str(BUNDLED_TOML, "<bundled>")
    }

    /// Read a configuration file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml_str(&text, &path.display().to_string())?;
        tracing::info!(
            path = %path.display(),
            synonyms = config.synonyms.len(),
            "configuration loaded"
        );
        Ok(config)
    }

    /// Parse configuration text. `origin` names the source in error messages.
    pub fn from_toml_str(text: &str, origin: &str) -> ConfigResult<Self> {
        toml::from_str(text).map_err(|e| ConfigError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })
    }

    /// Build the read-only synonym table injected into entity resolution.
    pub fn synonym_table(&self) -> SynonymTable {
        self.synonyms.iter().cloned().collect()
    }
}
