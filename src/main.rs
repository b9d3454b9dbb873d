//! Dadu - dice-roll food and place picker
//!
#![doc = "Main entry point for the Dadu application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use dadu::catalog::Category;
use dadu::cli::{Cli, Commands};
use dadu::commands;
use dadu::config::Config;
use dadu::error::DaduError;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    match cli.command {
        Commands::Roll { category, secret } => {
            tracing::info!("Starting roll");
            commands::roll::run_roll(config, parse_category(&category)?, secret).await
        }
        Commands::Chat { category, secret } => {
            commands::chat::run_chat(config, parse_category(&category)?, secret).await
        }
        Commands::Ask {
            venue,
            question,
            category,
        } => {
            tracing::debug!("Asking about {}", venue);
            commands::ask::run_ask(config, venue, question, parse_category(&category)?).await
        }
        Commands::Prompts { venue, category } => {
            commands::prompts::run_prompts(&venue, parse_category(&category)?)
        }
    }
}

fn parse_category(value: &str) -> Result<Category> {
    Category::parse_str(value).map_err(|e| DaduError::Config(e).into())
}

/// Initialize tracing subscriber with environment filter
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "dadu=debug" } else { "dadu=info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
