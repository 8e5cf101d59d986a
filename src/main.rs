//! ontorag CLI: ontology-augmented retrieval over RDF knowledge graphs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use ontorag::augment::Strategy;
use ontorag::engine::Engine;
use ontorag::graph::EntityId;

#[derive(Parser)]
#[command(name = "ontorag", version, about = "Ontology-augmented retrieval for LLM prompts")]
struct Cli {
    /// Configuration file (synonyms, limits). Defaults to the bundled configuration.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve entities, find a connecting path and aggregate facts.
    Reason {
        /// Ontology file (.ttl, .nt, .rdf, .owl, ...).
        #[arg(long)]
        ontology: PathBuf,

        /// The question to answer.
        question: String,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Retrieve facts by keyword matching.
    Retrieve {
        #[arg(long)]
        ontology: PathBuf,

        question: String,
    },

    /// Render the prompt context produced by a retrieval strategy.
    Context {
        #[arg(long)]
        ontology: PathBuf,

        question: String,

        #[arg(long, value_enum, default_value = "reasoning")]
        strategy: Strategy,
    },

    /// Shortest relational path between two entities (label or IRI).
    Path {
        #[arg(long)]
        ontology: PathBuf,

        #[arg(long)]
        from: String,

        #[arg(long)]
        to: String,
    },

    /// Show ontology statistics.
    Info {
        #[arg(long)]
        ontology: PathBuf,
    },
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Reason {
            ontology,
            question,
            json,
        } => {
            let report = Engine::open(&ontology, config)?.reason(&question)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report).into_diagnostic()?);
            } else {
                print!("{report}");
            }
        }

        Commands::Retrieve { ontology, question } => {
            let facts = Engine::open(&ontology, config)?.retrieve(&question)?;
            if facts.is_empty() {
                println!("No facts found.");
            } else {
                for (i, fact) in facts.iter().enumerate() {
                    println!("  {}. {fact}", i + 1);
                }
            }
        }

        Commands::Context {
            ontology,
            question,
            strategy,
        } => {
            print!("{}", Engine::open(&ontology, config)?.context(strategy, &question)?);
        }

        Commands::Path { ontology, from, to } => {
            let engine = Engine::open(&ontology, config)?;
            let start = lookup_entity(&engine, &from)?;
            let end = lookup_entity(&engine, &to)?;
            match engine.path_between(&start, &end)? {
                Some(hops) if hops.is_empty() => println!("{from} and {to} are the same entity."),
                Some(hops) => {
                    println!("Path ({} hops):", hops.len());
                    for hop in hops {
                        println!("  {hop}");
                    }
                }
                None => println!("No path between {from} and {to}."),
            }
        }

        Commands::Info { ontology } => {
            let engine = Engine::open(&ontology, config)?;
            println!("Ontology: {}", ontology.display());
            println!("{}", engine.info()?);
        }
    }

    Ok(())
}

/// Accept either an exact `rdfs:label` or a full IRI present in the graph.
fn lookup_entity(engine: &Engine, name: &str) -> Result<EntityId> {
    match engine.lookup_entity(name)? {
        Some(id) => Ok(id),
        None => miette::bail!("no entity with label or IRI `{name}`"),
    }
}
