//! Dadu - dice-roll food and place picker with a venue chat assistant
//!
//! This library provides the core functionality for Dadu: a randomized
//! "Makan Apa? / Kemana Ya?" picker with a short dice animation, and dnAI,
//! an assistant that answers questions about the rolled venue.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `catalog`: Static venue lists and the secret-mode restricted sets
//! - `roll`: Dice roll sequencer with generation-based invalidation
//! - `chat`: Conversation sessions, prompt and fallback tables, the assistant
//! - `providers`: Chat completion provider abstraction and implementation
//! - `app`: Wiring of dice and assistant
//! - `commands`: CLI command handlers
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use dadu::{Category, Config, DecisionApp};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/config.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     let mut app = DecisionApp::from_config(&config, Category::Food)?;
//!     if let Some(venue) = app.roll_and_wait().await {
//!         let reply = app.ask("Kenapa harus ke sini?").await;
//!         println!("{}: {:?}", venue, reply);
//!     }
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod catalog;
pub mod chat;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod providers;
pub mod roll;

// Re-export commonly used types
pub use app::DecisionApp;
pub use catalog::{Category, VenueCatalog};
pub use chat::{AssistantReply, VenueAssistant};
pub use config::Config;
pub use error::{DaduError, Result};
pub use roll::{RollEvent, RollSequencer};
