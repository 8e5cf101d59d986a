//! Rich diagnostic error types for ontorag.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes and help text. Note that "nothing matched" is never an
//! error: an unresolved question or a missing path yields an empty report.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type.
#[derive(Debug, Error, Diagnostic)]
pub enum OntoError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// Graph errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum GraphError {
    #[error("graph lock poisoned while accessing {what}")]
    #[diagnostic(
        code(ontorag::graph::lock_poisoned),
        help(
            "A thread panicked while holding the triple store lock. \
             The store can no longer be trusted; reload the ontology."
        )
    )]
    LockPoisoned { what: &'static str },

    #[error("graph store unavailable: {message}")]
    #[diagnostic(
        code(ontorag::graph::unavailable),
        help("The backing graph store could not be queried. Check that it is reachable.")
    )]
    Unavailable { message: String },
}

// ---------------------------------------------------------------------------
// Ontology loading errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum LoadError {
    #[error("failed to read ontology file: {path}")]
    #[diagnostic(
        code(ontorag::load::io),
        help("Ensure the file exists and is readable.")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot guess RDF format of {path}")]
    #[diagnostic(
        code(ontorag::load::unknown_format),
        help(
            "Use one of the recognised extensions: .ttl, .nt, .nq, .trig, .n3, .rdf, .owl. \
             Library callers can pass the format explicitly to `RdfLoader::load_reader`."
        )
    )]
    UnknownFormat { path: String },

    #[error("failed to parse ontology {source_name}: {message}")]
    #[diagnostic(
        code(ontorag::load::parse),
        help("Check the RDF syntax near the reported position.")
    )]
    Parse { source_name: String, message: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Store(#[from] GraphError),
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config file: {path}")]
    #[diagnostic(
        code(ontorag::config::io),
        help("Ensure the file exists and is readable, or omit --config to use the bundled defaults.")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {message}")]
    #[diagnostic(
        code(ontorag::config::parse),
        help(
            "Check the TOML syntax. Synonyms are declared as `[[synonyms]]` tables \
             with a `keyword` string and a `labels` array."
        )
    )]
    Parse { path: String, message: String },
}

/// Convenience alias for functions returning ontorag results.
pub type OntoResult<T> = std::result::Result<T, OntoError>;
