//! End-to-end integration tests for ontorag.
//!
//! These tests load the HPC Turtle fixture through the RDF loader and run the
//! retrieval strategies against it, validating that entity resolution, path
//! search, fact aggregation and rendering work together.

use std::io::Write;
use std::path::PathBuf;

use ontorag::augment::{Augmenter, Strategy};
use ontorag::config::Config;
use ontorag::graph::index::TripleStore;
use ontorag::graph::rdf::RdfLoader;
use ontorag::graph::view::GraphView;
use ontorag::graph::{EntityId, Triple};
use ontorag::reason::Reasoner;
use ontorag::reason::facts::{FactRegime, aggregate};
use ontorag::reason::path::{first_connecting_path, shortest_path};
use ontorag::reason::report::format_report;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/hpc.ttl")
}

fn hpc_store() -> TripleStore {
    let (store, _) = RdfLoader::new().load_file(&fixture_path()).unwrap();
    store
}

fn hpc(name: &str) -> EntityId {
    EntityId::new(format!("http://example.org/hpc#{name}"))
}

fn bundled_reasoner() -> Reasoner {
    Reasoner::new(Config::bundled().unwrap().synonym_table())
}

#[test]
fn fixture_loads_completely() {
    let (store, report) = RdfLoader::new().load_file(&fixture_path()).unwrap();
    assert_eq!(report.triples, 30);
    assert_eq!(report.duplicates, 0);
    assert_eq!(report.skipped_blank, 0);
    assert_eq!(store.len(), 30);
    assert!(store.has_entity(&hpc("FalseSharing")));
}

#[test]
fn unresolved_question_gives_all_empty_report() {
    let store = hpc_store();
    let report = bundled_reasoner().reason("Quelle heure est-il ?", &store).unwrap();
    assert_eq!(report.question, "Quelle heure est-il ?");
    assert!(report.entities.is_empty());
    assert!(report.path.is_empty());
    assert!(report.facts.is_empty());
}

#[test]
fn single_entity_gives_exactly_its_outgoing_triples() {
    let store = hpc_store();
    let report = bundled_reasoner().reason("Quelle version d'OpenMP ?", &store).unwrap();

    assert_eq!(report.entities, vec!["OpenMP"]);
    assert!(report.path.is_empty());
    assert_eq!(
        report.facts,
        vec![
            "OpenMP --[type]--> Bibliotheque",
            "OpenMP --[label]--> \"OpenMP\"",
            "OpenMP --[version]--> \"5.2\"",
        ]
    );
}

#[test]
fn false_sharing_scenario() {
    let store = hpc_store();
    let question = "Comment le false sharing est-il résolu par l'alignement sur ligne de cache ?";
    let reasoner = bundled_reasoner();

    let trace = reasoner.trace(question, &store).unwrap();
    assert_eq!(
        trace.resolved.as_slice(),
        &[hpc("FalseSharing"), hpc("CacheLineAlignment")]
    );
    assert_eq!(trace.facts.regime, FactRegime::Path);

    let report = reasoner.reason(question, &store).unwrap();
    assert_eq!(report.entities, vec!["FalseSharing", "CacheLineAlignment"]);
    assert_eq!(
        report.path,
        vec!["FalseSharing --[estResoluPar]--> CacheLineAlignment"]
    );
    assert_eq!(
        report.facts,
        vec![
            "FalseSharing --[estResoluPar]--> CacheLineAlignment",
            "FalseSharing --[type]--> ProblemePerformance",
            "FalseSharing --[label]--> \"FalseSharing\"",
            "FalseSharing --[label]--> \"False sharing\"",
            "CacheLineAlignment --[type]--> StrategieOptimisation",
            "CacheLineAlignment --[label]--> \"CacheLineAlignment\"",
            "CacheLineAlignment --[label]--> \"Alignement sur ligne de cache\"",
        ]
    );
    // Path regime keeps labels and types only.
    assert!(!report.facts.iter().any(|f| f.contains("aImpact")));
}

#[test]
fn two_hop_relation_is_found_with_exact_length() {
    let store = hpc_store();
    let start = hpc("FalseSharing");
    let end = hpc("AMD_EPYC_9654");
    let path = shortest_path(&store, &start, &end).unwrap().unwrap();
    assert_eq!(path.len(), 2);
    assert_eq!(path.hops()[0].predicate, hpc("estResoluPar"));
    assert_eq!(path.hops()[1].predicate, hpc("dependDe"));

    let facts = aggregate(&[start, end], Some(&path), &store).unwrap();
    assert_eq!(facts.regime, FactRegime::Path);
    for hop in path.hops() {
        assert!(facts.facts.contains(hop));
    }
    // 2 hops + 3 label/type triples for each of the first two nodes + 2 for the processor.
    assert_eq!(facts.facts.len(), 10);
    let amd_label = Triple::new(
        hpc("AMD_EPYC_9654"),
        EntityId::label(),
        ontorag::graph::Literal::plain("AMD EPYC 9654"),
    );
    assert!(facts.facts.contains(&amd_label));
}

#[test]
fn edge_stored_backwards_is_still_one_hop() {
    let store = hpc_store();
    let path = shortest_path(&store, &hpc("BankConflicts"), &hpc("PaddingMemoire3D"))
        .unwrap()
        .unwrap();
    assert_eq!(path.len(), 1);
    let hop = &path.hops()[0];
    assert_eq!(hop.subject, hpc("PaddingMemoire3D"));
    assert_eq!(hop.object_entity(), Some(&hpc("BankConflicts")));
}

#[test]
fn direct_edge_wins_over_detour() {
    let turtle = r#"
        @prefix : <urn:bfs:> .
        :A :r :C .
        :C :r :B .
        :A :r :B .
    "#;
    let (store, _) = RdfLoader::new()
        .load_str(oxigraph::io::RdfFormat::Turtle, turtle)
        .unwrap();
    let a = EntityId::new("urn:bfs:A");
    let b = EntityId::new("urn:bfs:B");
    let path = shortest_path(&store, &a, &b).unwrap().unwrap();
    assert_eq!(path.hops(), &[Triple::new(a, EntityId::new("urn:bfs:r"), b)]);
}

#[test]
fn synonym_resolves_informal_vocabulary() {
    let store = hpc_store();
    let report = bundled_reasoner()
        .reason("Quelle solution contre les Bank conflicts L2 ?", &store)
        .unwrap();
    assert_eq!(report.entities, vec!["Padding mémoire 3D", "Bank conflicts L2"]);
    assert_eq!(
        report.path,
        vec!["Padding mémoire 3D --[corrige]--> Bank conflicts L2"]
    );
}

#[test]
fn unconnected_entities_fall_back_to_first_neighborhood() {
    let store = hpc_store();
    let report = bundled_reasoner()
        .reason("OpenMP et le nœud isolé", &store)
        .unwrap();
    assert_eq!(report.entities, vec!["OpenMP", "Nœud isolé"]);
    assert!(report.path.is_empty());
    assert_eq!(report.facts.len(), 3);
    assert!(report.facts.iter().all(|f| f.starts_with("OpenMP")));
}

#[test]
fn reasoning_is_idempotent() {
    let store = hpc_store();
    let reasoner = bundled_reasoner();
    let question = "Pourquoi le réseau est-il lent ?";
    let first = reasoner.reason(question, &store).unwrap();
    let second = reasoner.reason(question, &store).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        first.path,
        vec!["Goulot d'étranglement réseau --[provoque]--> Haute latence inter-groupe"]
    );
}

#[test]
fn custom_config_replaces_bundled_synonyms() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[[synonyms]]
keyword = "lenteur"
labels = ["Haute latence inter-groupe"]
"#
    )
    .unwrap();
    let config = Config::load(file.path()).unwrap();
    let reasoner = Reasoner::new(config.synonym_table());
    let store = hpc_store();

    let report = reasoner.reason("D'où vient cette lenteur ?", &store).unwrap();
    assert_eq!(report.entities, vec!["Haute latence inter-groupe"]);
    // Incoming edges are not part of the neighborhood.
    assert_eq!(
        report.facts,
        vec!["Haute latence inter-groupe --[label]--> \"Haute latence inter-groupe\""]
    );
}

#[test]
fn pipeline_stages_compose_by_hand() {
    let store = hpc_store();
    let entities = [hpc("NoeudIsole"), hpc("PaddingMemoire3D"), hpc("BankConflicts")];
    let path = first_connecting_path(&store, &entities).unwrap().unwrap();
    // Pairs involving the isolated node fail until (Padding, BankConflicts).
    assert_eq!(path.hops()[0].subject, hpc("PaddingMemoire3D"));

    let facts = aggregate(&entities, Some(&path), &store).unwrap();
    let report = format_report("q", &entities, Some(&path), facts.facts.as_slice(), &store).unwrap();
    assert_eq!(report.entities.len(), 3);
    assert_eq!(report.path.len(), 1);
}

#[test]
fn strategies_differ_on_the_same_question() {
    let store = hpc_store();
    let augmenter = Augmenter::from_config(&Config::bundled().unwrap());
    let question = "Comment corriger le false sharing ?";

    let baseline = augmenter.augment(Strategy::Baseline, question, &store).unwrap();
    assert!(baseline.facts.is_empty());
    assert_eq!(augmenter.render(&baseline), format!("Question: {question}\n"));

    let keyword = augmenter.augment(Strategy::Keyword, question, &store).unwrap();
    assert!(!keyword.facts.is_empty());
    assert!(keyword.facts.len() <= 7);
    assert!(keyword.report.is_none());

    let reasoning = augmenter.augment(Strategy::Reasoning, question, &store).unwrap();
    let report = reasoning.report.as_ref().unwrap();
    assert!(report.entities.contains(&"FalseSharing".to_string()));
    assert!(augmenter.render(&reasoning).contains("Relevant facts from the knowledge base:"));
}

#[test]
fn labels_are_resolvable_in_reverse() {
    let store = hpc_store();
    assert_eq!(
        store.resolve_label("Padding mémoire 3D").unwrap(),
        Some(hpc("PaddingMemoire3D"))
    );
    assert_eq!(store.resolve_label("Algorithme de compensation").unwrap(), None);
    assert_eq!(store.label_of(&hpc("NoeudIsole")).unwrap().as_deref(), Some("Nœud isolé"));
    assert_eq!(store.types_of(&hpc("OpenMP")).unwrap(), vec![hpc("Bibliotheque")]);
}
