//! Command-line interface definition for Dadu
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for rolling, chatting, and one-shot questions.

use clap::{Parser, Subcommand};

/// Dadu - roll the dice to decide where to eat or where to go
///
/// Picks a random venue from the built-in catalog and lets you ask an
/// AI assistant about it.
#[derive(Parser, Debug, Clone)]
#[command(name = "dadu")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the model sent to the chat completion service
    #[arg(long)]
    pub model: Option<String>,

    /// Override the chat completion endpoint URL
    #[arg(long)]
    pub api_url: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Dadu
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Roll the dice once and print the picked venue
    Roll {
        /// Category to roll: food or place
        #[arg(short = 'k', long, default_value = "food")]
        category: String,

        /// Draw from the secret venue set
        #[arg(short, long)]
        secret: bool,
    },

    /// Start an interactive session: roll, then chat about the result
    Chat {
        /// Initial category: food or place
        #[arg(short = 'k', long, default_value = "food")]
        category: String,

        /// Start with secret mode enabled
        #[arg(short, long)]
        secret: bool,
    },

    /// Ask a single question about a venue
    Ask {
        /// Venue name, e.g. "Sate Khas Senayan (Bekasi)"
        venue: String,

        /// Question to ask
        question: String,

        /// Category of the venue: food or place
        #[arg(short = 'k', long, default_value = "food")]
        category: String,
    },

    /// Print the suggested questions for a venue
    Prompts {
        /// Venue name
        venue: String,

        /// Category of the venue: food or place
        #[arg(short = 'k', long, default_value = "food")]
        category: String,
    },
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            model: None,
            api_url: None,
            command: Commands::Roll {
                category: "food".to_string(),
                secret: false,
            },
        }
    }
}
