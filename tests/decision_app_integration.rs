//! Integration tests for the dice and assistant wiring
//!
//! Covers:
//! - Cache is empty after every committed roll
//! - Roll results stay inside the allowed set for each mode
//! - Invalidated rolls do not clear the chat

mod common;

use common::{mount_completion, provider_config};
use dadu::catalog::{Category, VenueCatalog};
use dadu::config::Config;
use dadu::providers::create_provider;
use dadu::roll::{RandomSource, ThreadRandom};
use dadu::DecisionApp;
use std::time::Duration;
use wiremock::MockServer;

struct Cycle(usize);

impl RandomSource for Cycle {
    fn index(&mut self, len: usize) -> usize {
        self.0 = (self.0 + 1) % len;
        self.0
    }
}

#[tokio::test]
async fn test_cache_is_empty_after_each_commit() {
    let server = MockServer::start().await;
    mount_completion(&server, "Sabi!").await;

    let mut config = Config::default();
    config.roll.tick_interval_ms = 1;
    config.roll.commit_delay_ms = 1;
    let provider = create_provider(&provider_config(&server)).unwrap();
    let mut app = DecisionApp::with_parts(
        &config,
        Category::Food,
        Box::new(Cycle(0)),
        Some(provider),
    );

    for _ in 0..3 {
        let result = app.roll_and_wait().await.expect("roll commits");
        assert!(app.assistant().cache().is_empty());

        let reply = app.ask("Worth it gak?").await.unwrap();
        assert!(reply.animate);
        assert_eq!(app.assistant().history(&result, Category::Food).len(), 2);
    }
}

#[tokio::test(start_paused = true)]
async fn test_results_stay_in_allowed_set() {
    let catalog = VenueCatalog::default();

    for category in [Category::Food, Category::Place] {
        for secret in [false, true] {
            let mut app =
                DecisionApp::with_parts(&Config::default(), category, Box::new(ThreadRandom), None);
            if secret {
                app.toggle_secret_mode();
            }

            let allowed = catalog.candidates(category, secret);
            for _ in 0..10 {
                let result = app.roll_and_wait().await.unwrap();
                assert!(allowed.contains(&result), "{} not allowed", result);
            }
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_secret_place_is_fixed() {
    let mut app = DecisionApp::with_parts(
        &Config::default(),
        Category::Place,
        Box::new(ThreadRandom),
        None,
    );
    app.toggle_secret_mode();

    assert_eq!(
        app.roll_and_wait().await.as_deref(),
        Some("Lagoon Avenue Bekasi")
    );
}

#[tokio::test(start_paused = true)]
async fn test_invalidated_roll_keeps_chat() {
    let mut app = DecisionApp::with_parts(
        &Config::default(),
        Category::Food,
        Box::new(ThreadRandom),
        None,
    );
    let imported = serde_json::json!({
        "result": "Bakmi GM",
        "category": "food",
        "messages": [
            {"role": "user", "content": "halo", "timestamp": "2025-01-01T00:00:00Z"}
        ]
    })
    .to_string();
    assert!(app.assistant_mut().import_session(&imported));

    let handle = app.dice().roll().unwrap();
    tokio::time::sleep(Duration::from_millis(300)).await;
    app.set_category(Category::Place);
    assert_eq!(handle.wait().await, None);

    assert_eq!(app.assistant().memory_stats().total_messages, 1);
}
