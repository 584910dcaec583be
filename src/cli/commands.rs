//! CLI command definitions and handlers

use clap::Subcommand;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::core::client::TranslationApi;

/// Commands for the translation client
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate a single text
    Translate {
        /// Text to translate (1-1000 characters)
        #[arg(short, long)]
        text: String,

        /// Source language (auto-detected from the text if not specified)
        #[arg(long)]
        from: Option<String>,

        /// Target language (opposite of the detected source if not specified)
        #[arg(long)]
        to: Option<String>,

        /// Number of beams for beam search (1-10)
        #[arg(short, long, default_value_t = 4)]
        beams: u32,

        /// Maximum output length (128-1024)
        #[arg(short, long, default_value_t = 512)]
        max_length: u32,

        /// Print the full response as JSON
        #[arg(long)]
        json: bool,
    },

    /// Translate many texts in one request
    Batch {
        /// File with one text per line
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Text to translate; may be repeated
        #[arg(short, long)]
        text: Vec<String>,

        /// Source language (default: en)
        #[arg(long, default_value = "en")]
        from: String,

        /// Target language (default: ta)
        #[arg(long, default_value = "ta")]
        to: String,

        /// Number of beams for beam search (1-10)
        #[arg(short, long)]
        beams: Option<u32>,

        /// Maximum output length (128-1024)
        #[arg(short, long)]
        max_length: Option<u32>,
    },

    /// List supported languages
    Languages,

    /// Check backend health
    Health,

    /// Show backend model diagnostics
    ModelInfo,

    /// Interactive translation session
    Interactive {
        /// Keep copies in memory instead of the system clipboard
        #[arg(long)]
        memory_clipboard: bool,
    },
}

/// Handle single-text translation command
pub async fn handle_translate(
    api: Arc<dyn TranslationApi>,
    text: String,
    from: Option<String>,
    to: Option<String>,
    beams: u32,
    max_length: u32,
    json: bool,
) -> anyhow::Result<()> {
    use crate::controller::translation::TranslationController;
    use crate::core::clipboard::MemoryClipboard;
    use crate::utils::format_time;

    // one-shot command never copies
    let form = TranslationController::new(api, Arc::new(MemoryClipboard::new()));
    form.set_input_text(text).await;
    if let Some(from) = from {
        form.set_source_language(from).await;
    }
    if let Some(to) = to {
        form.set_target_language(to).await;
    }
    form.set_num_beams(beams).await;
    form.set_max_length(max_length).await;

    let response = match form.translate().await {
        Ok(response) => response,
        Err(_) => {
            let state = form.snapshot().await;
            anyhow::bail!(state.error.unwrap_or_default());
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!("{}", response.translated_text);
    println!();
    println!(
        "   {} → {} | {} | {} characters | {} on {}",
        response.source_language,
        response.target_language,
        format_time(response.processing_time_ms),
        response.characters_translated(),
        response.model_info.name,
        response.model_info.device
    );

    Ok(())
}

/// Read batch input: one text per non-blank line
pub fn read_batch_file(path: &Path) -> anyhow::Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

/// Handle batch translation command
pub async fn handle_batch(
    api: Arc<dyn TranslationApi>,
    file: Option<PathBuf>,
    text: Vec<String>,
    from: String,
    to: String,
    beams: Option<u32>,
    max_length: Option<u32>,
) -> anyhow::Result<()> {
    use crate::core::models::BatchTranslationRequest;
    use crate::utils::{format_time, truncate_text};
    use indicatif::{ProgressBar, ProgressStyle};
    use std::time::Duration;
    use tracing::info;

    let mut texts = match &file {
        Some(path) => read_batch_file(path)?,
        None => Vec::new(),
    };
    texts.extend(text.into_iter().filter(|t| !t.trim().is_empty()));

    if texts.is_empty() {
        anyhow::bail!("No texts to translate");
    }

    info!("Translating {} texts ({} → {})", texts.len(), from, to);

    let mut request = BatchTranslationRequest::new(texts).with_languages(from, to);
    request.num_beams = beams;
    request.max_length = max_length;

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);
    pb.set_message(format!("Translating {} texts...", request.texts.len()));
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = api.translate_batch(&request).await;
    pb.finish_and_clear();

    let response = result.map_err(|e| anyhow::anyhow!(e.message))?;

    for (i, item) in response.translations.iter().enumerate() {
        println!("{}. {}", i + 1, truncate_text(&item.original_text, 60));
        println!("   {}", item.translated_text);
    }

    println!("\n✅ Batch translation completed!");
    println!("   Translated: {}", response.translations.len());
    println!("   Time: {}", format_time(response.total_processing_time_ms));

    Ok(())
}

/// Handle languages command
pub async fn handle_languages(api: Arc<dyn TranslationApi>) -> anyhow::Result<()> {
    let response = api
        .get_supported_languages()
        .await
        .map_err(|e| anyhow::anyhow!(e.message))?;

    for lang in &response.languages {
        println!("{:<6} {}", lang.code, lang.label());
    }
    println!("\n{} languages", response.total_count);

    Ok(())
}

/// Handle health command
pub async fn handle_health(api: Arc<dyn TranslationApi>) -> anyhow::Result<()> {
    use crate::controller::health::HealthPoller;

    let poller = HealthPoller::new(api);
    let _ = poller.mount().await;
    let state = poller.snapshot().await;

    if let Some(error) = state.error {
        anyhow::bail!(error);
    }

    if let Some(health) = state.health {
        let icon = if health.is_healthy() { "✅" } else { "❌" };
        println!("{} Service Status: {}", icon, health.status);
        println!("   Model: {}", if health.model_loaded { "Loaded" } else { "Loading" });
        println!("   Version: {}", health.version);
        if let Some(model) = health.model_info {
            println!("   Name: {}", model.name);
            println!("   Device: {}", model.device);
        }
    }

    Ok(())
}

/// Handle model info command
pub async fn handle_model_info(api: Arc<dyn TranslationApi>) -> anyhow::Result<()> {
    let info = api
        .get_model_info()
        .await
        .map_err(|e| anyhow::anyhow!(e.message))?;

    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}
