//! Line-oriented translation session
//!
//! Plain lines become the form input and are submitted; lines starting with
//! `:` are form actions.

use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::controller::health::HealthPoller;
use crate::controller::translation::{FormPhase, TranslationController};
use crate::core::client::TranslationApi;
use crate::core::clipboard::Clipboard;

const HELP: &str = "\
Type text and press enter to translate it.
  :swap         swap languages and input/output
  :clear        clear input and output
  :copy         copy the translation
  :retry        submit the current input again
  :from <code>  set source language
  :to <code>    set target language
  :beams <n>    beams for beam search (1-10)
  :max <n>      maximum output length (128-1024)
  :langs        list languages
  :health       check backend health
  :help         show this help
  :quit         leave";

/// One parsed line of input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Plain text: set as input and submit
    Translate(String),
    /// `:retry`
    Retry,
    /// `:swap`
    Swap,
    /// `:clear`
    Clear,
    /// `:copy`
    Copy,
    /// `:from <code>`
    From(String),
    /// `:to <code>`
    To(String),
    /// `:beams <n>`
    Beams(u32),
    /// `:max <n>`
    MaxLength(u32),
    /// `:langs`
    Languages,
    /// `:health`
    Health,
    /// `:help`
    Help,
    /// `:quit`, `:q` or `:exit`
    Quit,
    /// Blank line
    Empty,
    /// Unknown action or bad argument, with the reason
    Invalid(String),
}

/// Parse a line typed into the session
pub fn parse_command(line: &str) -> SessionCommand {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return SessionCommand::Empty;
    }

    let Some(action) = trimmed.strip_prefix(':') else {
        return SessionCommand::Translate(line.trim_end_matches(['\r', '\n']).to_string());
    };

    let mut parts = action.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let arg = parts.next();

    match (name, arg) {
        ("swap", None) => SessionCommand::Swap,
        ("clear", None) => SessionCommand::Clear,
        ("copy", None) => SessionCommand::Copy,
        ("retry", None) => SessionCommand::Retry,
        ("langs", None) => SessionCommand::Languages,
        ("health", None) => SessionCommand::Health,
        ("help", None) => SessionCommand::Help,
        ("quit", None) | ("q", None) | ("exit", None) => SessionCommand::Quit,
        ("from", Some(code)) => SessionCommand::From(code.to_string()),
        ("to", Some(code)) => SessionCommand::To(code.to_string()),
        ("beams", Some(n)) => match n.parse() {
            Ok(n) => SessionCommand::Beams(n),
            Err(_) => SessionCommand::Invalid(format!("not a number: {}", n)),
        },
        ("max", Some(n)) => match n.parse() {
            Ok(n) => SessionCommand::MaxLength(n),
            Err(_) => SessionCommand::Invalid(format!("not a number: {}", n)),
        },
        _ => SessionCommand::Invalid(format!("unknown command: {}", trimmed)),
    }
}

/// Run the session on stdin until `:quit` or end of input
pub async fn run_session(
    api: Arc<dyn TranslationApi>,
    clipboard: Arc<dyn Clipboard>,
) -> anyhow::Result<()> {
    run_session_with(api, clipboard, BufReader::new(tokio::io::stdin())).await
}

async fn run_session_with<R>(
    api: Arc<dyn TranslationApi>,
    clipboard: Arc<dyn Clipboard>,
    input: R,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let form = TranslationController::new(api.clone(), clipboard);
    let health = HealthPoller::new(api);

    form.mount().await;
    let state = form.snapshot().await;
    println!(
        "Neural Machine Translation ({} → {}). Type :help for commands.",
        state.source_language, state.target_language
    );

    let _ = health.mount().await;
    print_health(&health).await;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            SessionCommand::Quit => break,
            SessionCommand::Empty => {}
            SessionCommand::Help => println!("{}", HELP),
            SessionCommand::Invalid(message) => println!("⚠️  {}", message),
            SessionCommand::Translate(text) => {
                form.set_input_text(text).await;
                submit(&form).await;
            }
            SessionCommand::Retry => submit(&form).await,
            SessionCommand::Swap => match form.swap_languages().await {
                Ok(()) => {
                    let state = form.snapshot().await;
                    println!(
                        "↔ {} → {} | input: {}",
                        state.source_language, state.target_language, state.input_text
                    );
                }
                Err(e) => println!("⚠️  {}", e),
            },
            SessionCommand::Clear => {
                form.clear().await;
                println!("Cleared");
            }
            SessionCommand::Copy => {
                if form.copy_to_clipboard().await {
                    println!("📋 Copied");
                } else {
                    println!("Nothing copied");
                }
            }
            SessionCommand::From(code) => {
                form.set_source_language(code).await;
                print_pair(&form).await;
            }
            SessionCommand::To(code) => {
                form.set_target_language(code).await;
                print_pair(&form).await;
            }
            SessionCommand::Beams(n) => println!("Beams: {}", form.set_num_beams(n).await),
            SessionCommand::MaxLength(n) => {
                println!("Max length: {}", form.set_max_length(n).await)
            }
            SessionCommand::Languages => {
                for (code, label) in form.language_options().await {
                    println!("{:<6} {}", code, label);
                }
            }
            SessionCommand::Health => {
                let _ = health.retry().await;
                print_health(&health).await;
            }
        }
    }

    Ok(())
}

async fn print_health(health: &HealthPoller) {
    let state = health.snapshot().await;
    match (state.health, state.error) {
        (_, Some(error)) => println!("❌ {}", error),
        (Some(h), None) => println!(
            "{} {} (v{}, model {})",
            if h.is_healthy() { "✅" } else { "❌" },
            h.status,
            h.version,
            if h.model_loaded { "loaded" } else { "loading" }
        ),
        (None, None) => {}
    }
}

async fn submit(form: &TranslationController) {
    let _ = form.translate().await;
    let state = form.snapshot().await;

    match state.phase {
        FormPhase::Success => {
            println!("→ {}", state.translated_text);
            if let Some(stats) = form.stats().await {
                println!(
                    "   {} | {} characters",
                    stats.processing_time, stats.characters_translated
                );
            }
        }
        FormPhase::Failed => println!("❌ {}", state.error.unwrap_or_default()),
        FormPhase::Idle | FormPhase::Submitting => {}
    }
}

async fn print_pair(form: &TranslationController) {
    let state = form.snapshot().await;
    println!("{} → {}", state.source_language, state.target_language);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::testing::FakeApi;
    use crate::core::clipboard::MemoryClipboard;

    #[test]
    fn test_plain_text_translates() {
        assert_eq!(
            parse_command("Hello world"),
            SessionCommand::Translate("Hello world".to_string())
        );
        assert_eq!(
            parse_command("  வணக்கம்\r\n"),
            SessionCommand::Translate("  வணக்கம்".to_string())
        );
    }

    #[test]
    fn test_actions() {
        assert_eq!(parse_command(":swap"), SessionCommand::Swap);
        assert_eq!(parse_command(" :clear "), SessionCommand::Clear);
        assert_eq!(parse_command(":copy"), SessionCommand::Copy);
        assert_eq!(parse_command(":retry"), SessionCommand::Retry);
        assert_eq!(parse_command(":q"), SessionCommand::Quit);
        assert_eq!(parse_command(":from ta"), SessionCommand::From("ta".to_string()));
        assert_eq!(parse_command(":beams 6"), SessionCommand::Beams(6));
        assert_eq!(parse_command(":max 640"), SessionCommand::MaxLength(640));
        assert_eq!(parse_command("   "), SessionCommand::Empty);
    }

    #[tokio::test]
    async fn test_session_checks_health_on_start() {
        let api = Arc::new(FakeApi::new());
        let clipboard = Arc::new(MemoryClipboard::new());

        run_session_with(api.clone(), clipboard, &b":quit\n"[..])
            .await
            .unwrap();
        assert_eq!(api.health_calls(), 1);
        assert_eq!(api.translate_calls(), 0);
    }

    #[tokio::test]
    async fn test_session_health_command_refetches() {
        let api = Arc::new(FakeApi::new());
        let clipboard = Arc::new(MemoryClipboard::new());

        run_session_with(api.clone(), clipboard.clone(), &b"Hello\n:health\n:copy\n"[..])
            .await
            .unwrap();
        assert_eq!(api.health_calls(), 2);
        assert_eq!(api.translate_calls(), 1);
        assert_eq!(clipboard.contents().as_deref(), Some("translated:Hello"));
    }

    #[test]
    fn test_invalid_actions() {
        assert!(matches!(parse_command(":beams many"), SessionCommand::Invalid(_)));
        assert!(matches!(parse_command(":from"), SessionCommand::Invalid(_)));
        assert!(matches!(parse_command(":dance"), SessionCommand::Invalid(_)));
    }
}
