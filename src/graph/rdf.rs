//! Ontology loading backed by oxigraph's RDF parsers.
//!
//! Parses Turtle, N-Triples, N-Quads, TriG, N3 and RDF/XML into a
//! [`TripleStore`]. Quads from named graphs are merged into one graph.
//! Blank nodes have no stable identity outside the file they come from, so
//! any statement touching one is skipped and counted.

use std::io::Read;
use std::path::Path;

use oxigraph::io::{RdfFormat, RdfParser};
use oxigraph::model::{Quad, Term as OxTerm};

use crate::error::LoadError;

use super::index::TripleStore;
use super::{EntityId, Literal, Term, Triple};

/// Result type for loading operations.
pub type LoadResult<T> = std::result::Result<T, LoadError>;

/// Summary of a load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Triples stored.
    pub triples: usize,
    /// Statements already present (same triple in several named graphs).
    pub duplicates: usize,
    /// Statements skipped because they involve a blank node.
    pub skipped_blank: usize,
}

impl std::fmt::Display for LoadReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} triples ({} duplicates, {} blank-node statements skipped)",
            self.triples, self.duplicates, self.skipped_blank
        )
    }
}

/// Loads serialized ontologies into an in-memory [`TripleStore`].
#[derive(Debug, Clone, Default)]
pub struct RdfLoader {
    base_iri: Option<String>,
}

impl RdfLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative IRIs against `base`.
    pub fn with_base_iri(mut self, base: impl Into<String>) -> Self {
        self.base_iri = Some(base.into());
        self
    }

    /// Guess the RDF format from a file extension (`ttl`, `nt`, `owl`, ...).
    pub fn format_for(path: &Path) -> Option<RdfFormat> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            // OWL files in the wild are almost always RDF/XML.
            "owl" => Some(RdfFormat::RdfXml),
            other => RdfFormat::from_extension(other),
        }
    }

    /// Load an ontology file, choosing the parser from its extension.
    pub fn load_file(&self, path: &Path) -> LoadResult<(TripleStore, LoadReport)> {
        let format = Self::format_for(path).ok_or_else(|| LoadError::UnknownFormat {
            path: path.display().to_string(),
        })?;
        let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let (store, report) =
            self.load_named(format, std::io::BufReader::new(file), &path.display().to_string())?;
        tracing::info!(
            path = %path.display(),
            triples = report.triples,
            skipped_blank = report.skipped_blank,
            "loaded ontology"
        );
        Ok((store, report))
    }

    /// Load an ontology from any reader.
    pub fn load_reader<R: Read>(
        &self,
        format: RdfFormat,
        reader: R,
    ) -> LoadResult<(TripleStore, LoadReport)> {
        self.load_named(format, reader, "(reader)")
    }

    /// Load an ontology held in a string.
    pub fn load_str(&self, format: RdfFormat, text: &str) -> LoadResult<(TripleStore, LoadReport)> {
        self.load_named(format, text.as_bytes(), "(string)")
    }

    fn load_named<R: Read>(
        &self,
        format: RdfFormat,
        reader: R,
        source_name: &str,
    ) -> LoadResult<(TripleStore, LoadReport)> {
        let mut parser = RdfParser::from_format(format);
        if let Some(base) = &self.base_iri {
            parser = parser.with_base_iri(base.as_str()).map_err(|e| LoadError::Parse {
                source_name: source_name.to_string(),
                message: format!("invalid base IRI {base}: {e}"),
            })?;
        }

        let store = TripleStore::new();
        let mut report = LoadReport::default();

        for quad in parser.for_reader(reader) {
            let quad = quad.map_err(|e| LoadError::Parse {
                source_name: source_name.to_string(),
                message: e.to_string(),
            })?;
            let Some(triple) = convert_quad(quad) else {
                report.skipped_blank += 1;
                continue;
            };
            if store.insert_triple(&triple)? {
                report.triples += 1;
            } else {
                report.duplicates += 1;
            }
        }

        if report.skipped_blank > 0 {
            tracing::debug!(
                source = source_name,
                skipped = report.skipped_blank,
                "skipped blank-node statements"
            );
        }
        Ok((store, report))
    }
}

/// Convert an oxigraph quad to a [`Triple`], or `None` if it involves a blank node.
fn convert_quad(quad: Quad) -> Option<Triple> {
    let subject = match OxTerm::from(quad.subject) {
        OxTerm::NamedNode(node) => EntityId::new(node.into_string()),
        _ => return None,
    };
    let predicate = EntityId::new(quad.predicate.into_string());
    let object = match quad.object {
        OxTerm::NamedNode(node) => Term::Entity(EntityId::new(node.into_string())),
        OxTerm::Literal(lit) => Term::Literal(convert_literal(&lit)),
        _ => return None,
    };
    Some(Triple {
        subject,
        predicate,
        object,
    })
}

fn convert_literal(lit: &oxigraph::model::Literal) -> Literal {
    match lit.language() {
        Some(lang) => Literal::with_language(lit.value(), lang),
        None => Literal::typed(lit.value(), lit.datatype().as_str()),
    }
}
