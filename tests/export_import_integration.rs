//! Integration tests for chat history export and import through files

use dadu::catalog::Category;
use dadu::chat::session::{ConversationEntry, SessionKey};
use dadu::chat::{ChatExport, SessionCache, VenueAssistant};
use std::fs;
use tempfile::TempDir;

const VENUE: &str = "Sate Khas Senayan (Bekasi)";

fn assistant_with_history(count: usize) -> VenueAssistant {
    let mut cache = SessionCache::default();
    let session = cache.get_or_create(SessionKey::new(VENUE, Category::Food));
    for i in 0..count {
        if i % 2 == 0 {
            session.push(ConversationEntry::user(format!("tanya {}", i)));
        } else {
            session.push(ConversationEntry::assistant(format!("jawab {}", i)));
        }
    }
    VenueAssistant::new(None, cache, 8)
}

#[test]
fn test_export_then_import_restores_history() {
    let dir = TempDir::new().unwrap();
    let source = assistant_with_history(6);

    let path = source
        .write_export(VENUE, Category::Food, dir.path())
        .unwrap();
    let file_name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(file_name.starts_with("dnAI-chat-sate_khas_senayan__bekasi_-"));
    assert!(file_name.ends_with(".json"));

    let mut target = VenueAssistant::new(None, SessionCache::default(), 8);
    assert!(target.import_session(&fs::read_to_string(&path).unwrap()));

    assert_eq!(
        target.history(VENUE, Category::Food),
        source.history(VENUE, Category::Food)
    );
}

#[test]
fn test_exported_file_is_pretty_json() {
    let dir = TempDir::new().unwrap();
    let path = assistant_with_history(2)
        .write_export(VENUE, Category::Food, dir.path())
        .unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains("\n  \"result\""));

    let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(value["category"], "food");
    assert_eq!(value["messages"].as_array().unwrap().len(), 2);
    assert!(value["exportDate"].is_string());
}

#[test]
fn test_import_caps_long_histories() {
    let messages: Vec<ConversationEntry> = (0..30)
        .map(|i| ConversationEntry::user(format!("pesan {}", i)))
        .collect();
    let export = ChatExport::from_entries(VENUE, Category::Food, &messages);

    let mut assistant = VenueAssistant::new(None, SessionCache::default(), 8);
    assert!(assistant.import_session(&export.to_json_pretty().unwrap()));

    let history = assistant.history(VENUE, Category::Food);
    assert_eq!(history.len(), 24);
    assert_eq!(history[0].content, "pesan 6");
}

#[test]
fn test_failed_import_leaves_existing_session() {
    let mut assistant = assistant_with_history(4);

    assert!(!assistant.import_session(r#"{"result": "", "category": "food", "messages": []}"#));
    assert!(!assistant.import_session(r#"{"result": "X", "category": "drink", "messages": []}"#));
    assert!(!assistant.import_session("[]"));

    assert_eq!(assistant.history(VENUE, Category::Food).len(), 4);
    assert_eq!(assistant.memory_stats().active_sessions, 1);
}

#[test]
fn test_search_and_stats_after_import() {
    let json = serde_json::json!({
        "result": VENUE,
        "category": "food",
        "messages": [
            {"role": "user", "content": "Sate-nya enak?", "timestamp": "2025-03-01T10:00:00Z"},
            {"role": "assistant", "content": "Enak banget, sate ayam juara", "timestamp": "2025-03-01T10:00:30Z"}
        ]
    })
    .to_string();

    let mut assistant = VenueAssistant::new(None, SessionCache::default(), 8);
    assert!(assistant.import_session(&json));

    let hits = assistant.search(VENUE, Category::Food, "SATE");
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].highlighted, "<mark>Sate</mark>-nya enak?");
    assert_eq!(
        hits[1].highlighted,
        "Enak banget, <mark>sate</mark> ayam juara"
    );

    let stats = assistant.response_stats(VENUE, Category::Food);
    assert_eq!(stats.user_messages, 1);
    assert_eq!(stats.assistant_messages, 1);
    assert_eq!(stats.session_duration.num_seconds(), 30);
}
