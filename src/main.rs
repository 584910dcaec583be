//! Main entry point for the nmt-client CLI

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nmt_client::cli::commands::{self, Commands};
use nmt_client::cli::interactive::run_session;
use nmt_client::core::client::{ApiClient, TranslationApi};
use nmt_client::core::clipboard::{Clipboard, MemoryClipboard, SystemClipboard};
use nmt_client::core::config::ClientConfig;

/// nmt-client - English ↔ Tamil translation from the terminal
#[derive(Parser, Debug)]
#[command(name = "nmt-client", version, about, long_about = None)]
struct Args {
    /// Backend base URL (optional, defaults to NMT_API_URL env var)
    #[arg(long)]
    api_url: Option<String>,

    /// Request timeout in milliseconds (optional, defaults to NMT_TIMEOUT_MS env var)
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("nmt_client={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Override config with CLI args if provided
    let mut config = ClientConfig::from_env()?;
    if let Some(api_url) = args.api_url {
        config.base_url = api_url;
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config.timeout_ms = timeout_ms;
    }

    let api: Arc<dyn TranslationApi> = Arc::new(ApiClient::new(config)?);

    // Execute command
    match args.command {
        Some(Commands::Translate {
            text,
            from,
            to,
            beams,
            max_length,
            json,
        }) => {
            commands::handle_translate(api, text, from, to, beams, max_length, json).await?;
        }
        Some(Commands::Batch {
            file,
            text,
            from,
            to,
            beams,
            max_length,
        }) => {
            commands::handle_batch(api, file, text, from, to, beams, max_length).await?;
        }
        Some(Commands::Languages) => {
            commands::handle_languages(api).await?;
        }
        Some(Commands::Health) => {
            commands::handle_health(api).await?;
        }
        Some(Commands::ModelInfo) => {
            commands::handle_model_info(api).await?;
        }
        Some(Commands::Interactive { memory_clipboard }) => {
            let clipboard: Arc<dyn Clipboard> = if memory_clipboard {
                Arc::new(MemoryClipboard::new())
            } else {
                Arc::new(SystemClipboard::default())
            };
            run_session(api, clipboard).await?;
        }
        None => {
            println!("Please specify a command. Use --help for more information.");
        }
    }

    Ok(())
}
