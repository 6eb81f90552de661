//! End-to-end pipeline test over the library with hand-built embedding
//! vectors, so no model download is needed.

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use ticket_index::classify::{is_genuine, BotNames};
use ticket_index::compose::{compose, ComposeStats};
use ticket_index::corpus::load_tickets;
use ticket_index::index;
use ticket_index::search::{to_search_result, top_k};

const CORPUS: &str = r#"{"data":{"issues":{"nodes":[
    {
        "identifier": "HT-1",
        "title": "Device offline",
        "description": "The device drops off the network overnight.",
        "url": "https://example.com/HT-1",
        "comments": {"nodes": [
            {"body": "restarted the loop", "user": {"name": "Ana"}},
            {"body": "Issue resolved automatically",
             "externalUser": {"name": "Problème résolu"}}
        ]}
    },
    {
        "identifier": "HT-2",
        "title": "Wrong price displayed",
        "comments": {"nodes": [
            {"body": "price sync was delayed", "externalUser": {"name": "Bob"}}
        ]}
    }
]}}}"#;

fn setup() -> (TempDir, PathBuf, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let corpus_path = tmp.path().join("tickets.json");
    let index_path = tmp.path().join("tickets.index");
    fs::write(&corpus_path, CORPUS).unwrap();
    (tmp, corpus_path, index_path)
}

fn default_bots() -> BotNames {
    BotNames::new(
        vec![
            "Problème résolu".to_string(),
            "Limitation technique".to_string(),
        ],
        false,
    )
}

#[test]
fn build_and_query_device_offline_scenario() {
    let (_tmp, corpus_path, index_path) = setup();
    let bots = default_bots();

    // Load and compose.
    let tickets = load_tickets(&corpus_path).unwrap();
    assert_eq!(tickets.len(), 2);

    let mut documents = Vec::new();
    let mut stats = ComposeStats::default();
    for (position, ticket) in tickets.iter().enumerate() {
        let (doc, s) = compose(position, ticket, &bots);
        documents.push(doc);
        stats.add(s);
    }

    // The bot auto-reply never reaches the composed text.
    assert_eq!(stats.total_comments, 3);
    assert_eq!(stats.included_comments, 2);
    assert!(documents[0].text.contains("Device offline Device offline"));
    assert!(documents[0].text.contains("restarted the loop"));
    assert!(!documents[0].text.contains("Issue resolved automatically"));

    // Build and persist with synthetic vectors standing in for the model:
    // HT-1 sits close to the "device offline" query direction.
    let embeddings = vec![vec![1.0, 0.1], vec![0.1, 1.0]];
    let built = index::build(documents, embeddings, "test-model").unwrap();
    index::save(&built, &index_path).unwrap();

    // Round-trip preserves order, identifiers, and vectors.
    let loaded = index::load(&index_path).unwrap();
    assert_eq!(loaded.model_name, "test-model");
    assert_eq!(loaded.dims, 2);
    assert_eq!(loaded.documents[0].document.identifier, "HT-1");
    assert_eq!(loaded.documents[1].document.identifier, "HT-2");
    assert_eq!(loaded.documents[0].embedding, vec![1.0, 0.1]);

    // Query along the HT-1 direction ranks it first.
    let query = vec![1.0, 0.0];
    let hits = top_k(&query, &loaded, 5);
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].0, 0);
    assert!(hits[0].1 > hits[1].1);

    // Rehydrated detail excludes the bot comment.
    let (position, similarity) = hits[0];
    let result = to_search_result(
        1,
        similarity,
        &loaded.documents[position].document,
        &tickets[position],
        &bots,
    );
    assert_eq!(result.identifier, "HT-1");
    assert_eq!(result.url.as_deref(), Some("https://example.com/HT-1"));
    assert_eq!(result.comments.len(), 1);
    assert_eq!(result.comments[0].author, "Ana");
    assert_eq!(result.comments[0].body, "restarted the loop");
}

#[test]
fn corpus_touch_marks_index_stale() {
    let (_tmp, corpus_path, index_path) = setup();

    // No artifact yet: stale.
    assert!(index::is_stale(&corpus_path, &index_path).unwrap());

    let tickets = load_tickets(&corpus_path).unwrap();
    let bots = default_bots();
    let documents: Vec<_> = tickets
        .iter()
        .enumerate()
        .map(|(i, t)| compose(i, t, &bots).0)
        .collect();
    let built = index::build(documents, vec![vec![1.0], vec![0.5]], "test-model").unwrap();

    // Make the artifact strictly newer than the corpus.
    std::thread::sleep(std::time::Duration::from_millis(50));
    index::save(&built, &index_path).unwrap();
    assert!(!index::is_stale(&corpus_path, &index_path).unwrap());

    // Rewriting the corpus afterwards forces a rebuild.
    std::thread::sleep(std::time::Duration::from_millis(50));
    fs::write(&corpus_path, CORPUS).unwrap();
    assert!(index::is_stale(&corpus_path, &index_path).unwrap());
}

#[test]
fn classifier_is_shared_between_build_and_rehydration() {
    let (_tmp, corpus_path, _) = setup();
    let tickets = load_tickets(&corpus_path).unwrap();
    let bots = default_bots();

    // The same predicate drives composition and display filtering: every
    // comment excluded from the composed text is excluded from results too.
    let ticket = &tickets[0];
    let (doc, _) = compose(0, ticket, &bots);
    for comment in &ticket.comments {
        let body = comment.body.as_deref().unwrap_or("");
        if !is_genuine(comment, &bots) {
            assert!(!doc.text.contains(body));
        }
    }
}
