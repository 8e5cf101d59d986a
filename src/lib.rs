// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # ontorag
//!
//! Ontology-augmented retrieval for language-model prompts. Given a question
//! and an RDF knowledge graph, ontorag finds the facts worth putting in front
//! of the model.
//!
//! ## Architecture
//!
//! - **Knowledge graph** (`graph`): triple model, read-only [`GraphView`](graph::view::GraphView)
//!   trait, in-memory petgraph store, oxigraph-based loader
//! - **Relational reasoning** (`reason`): entity resolution, BFS path search,
//!   fact aggregation, report rendering
//! - **Keyword retrieval** (`retrieve`): substring matching on textual annotations
//! - **Strategies** (`augment`): baseline / keyword / reasoning, prompt context
//! - **Configuration** (`config`): synonym table and limits from TOML
//! - **Engine** (`engine`): one loaded ontology behind a single error type
//!
//! ## Library usage
//!
//! ```no_run
//! use ontorag::engine::Engine;
//!
//! let engine = Engine::open("hpc.ttl".as_ref(), None).unwrap();
//! let report = engine.reason("Comment corriger le false sharing ?").unwrap();
//! println!("{report}");
//! ```

pub mod augment;
pub mod config;
pub mod engine;
pub mod error;
pub mod graph;
pub mod reason;
pub mod retrieve;
