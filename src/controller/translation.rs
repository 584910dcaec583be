//! Translation form state machine
//!
//! Owns the form state (input, language pair, beam/length options, last
//! result, error, in-flight flag) and applies user actions and request
//! completions to it. Nothing here returns early with a half-updated state:
//! every failure is written into [`InteractionState::error`] before the
//! method returns.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::core::client::TranslationApi;
use crate::core::clipboard::Clipboard;
use crate::core::detect::detect_language;
use crate::core::errors::FormError;
use crate::core::models::{
    fallback_languages, is_valid_text, LanguageInfo, TranslationRequest, TranslationResponse,
    DEFAULT_MAX_LENGTH, DEFAULT_NUM_BEAMS, DEFAULT_SOURCE_LANGUAGE, DEFAULT_TARGET_LANGUAGE,
    MAX_LENGTH_RANGE, NUM_BEAMS_RANGE,
};
use crate::utils::format_time;

/// Validation failure message
pub const INVALID_TEXT_MESSAGE: &str = "Please enter valid text (1-1000 characters)";
/// Fallback when a failure carries no message
pub const TRANSLATION_FAILED_MESSAGE: &str = "Translation failed. Please try again.";

/// How long the "copied" indicator stays up
pub const COPY_FEEDBACK: Duration = Duration::from_millis(2000);

/// Where the form is in its submit cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    /// Nothing submitted yet, or cleared
    Idle,
    /// Request in flight
    Submitting,
    /// Last request succeeded
    Success,
    /// Last request failed
    Failed,
}

/// Everything the form renders
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionState {
    /// Text as typed
    pub input_text: String,
    /// Output of the last successful translation
    pub translated_text: String,
    /// Source language code
    pub source_language: String,
    /// Target language code
    pub target_language: String,
    /// Beam search width
    pub num_beams: u32,
    /// Output length limit
    pub max_length: u32,
    /// Full payload of the last success
    pub last_response: Option<TranslationResponse>,
    /// Message shown in `Failed`
    pub error: Option<String>,
    /// Submit cycle position
    pub phase: FormPhase,
    /// Picker options; the fallback pair when listing fails
    pub languages: Vec<LanguageInfo>,
    /// Copy indicator
    pub copied: bool,
    generation: u64,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            input_text: String::new(),
            translated_text: String::new(),
            source_language: DEFAULT_SOURCE_LANGUAGE.to_string(),
            target_language: DEFAULT_TARGET_LANGUAGE.to_string(),
            num_beams: DEFAULT_NUM_BEAMS,
            max_length: DEFAULT_MAX_LENGTH,
            last_response: None,
            error: None,
            phase: FormPhase::Idle,
            languages: Vec::new(),
            copied: false,
            generation: 0,
        }
    }
}

impl InteractionState {
    /// In-flight flag; true only while submitting
    pub fn is_translating(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    fn request(&self) -> TranslationRequest {
        TranslationRequest::new(self.input_text.clone())
            .with_languages(self.source_language.clone(), self.target_language.clone())
            .with_num_beams(self.num_beams)
            .with_max_length(self.max_length)
    }
}

/// Controller behavior knobs
#[derive(Debug, Clone)]
pub struct FormSettings {
    /// How long the "copied" indicator stays up
    pub copy_feedback: Duration,
    /// Drop responses that settle after a newer submit or a clear.
    ///
    /// Off by default: the last request to settle wins, even if the form
    /// was cleared in the meantime.
    pub discard_stale_responses: bool,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            copy_feedback: COPY_FEEDBACK,
            discard_stale_responses: false,
        }
    }
}

/// Summary of the last successful translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationStats {
    /// Formatted processing time, e.g. `1.50s`
    pub processing_time: String,
    /// Characters in the original text
    pub characters_translated: usize,
}

/// Drives the translation form
#[derive(Clone)]
pub struct TranslationController {
    api: Arc<dyn TranslationApi>,
    clipboard: Arc<dyn Clipboard>,
    settings: FormSettings,
    state: Arc<RwLock<InteractionState>>,
}

impl TranslationController {
    /// Controller with default settings
    pub fn new(api: Arc<dyn TranslationApi>, clipboard: Arc<dyn Clipboard>) -> Self {
        Self::with_settings(api, clipboard, FormSettings::default())
    }

    /// Controller with custom [`FormSettings`]
    pub fn with_settings(
        api: Arc<dyn TranslationApi>,
        clipboard: Arc<dyn Clipboard>,
        settings: FormSettings,
    ) -> Self {
        Self {
            api,
            clipboard,
            settings,
            state: Arc::new(RwLock::new(InteractionState::default())),
        }
    }

    /// Copy of the current state
    pub async fn snapshot(&self) -> InteractionState {
        self.state.read().await.clone()
    }

    /// First-render work: load the language list
    pub async fn mount(&self) {
        self.load_languages().await;
    }

    /// Fetch supported languages, falling back to English/Tamil.
    ///
    /// The fallback is never surfaced as an error.
    pub async fn load_languages(&self) {
        let languages = match self.api.get_supported_languages().await {
            Ok(response) => response.languages,
            Err(e) => {
                warn!("Failed to load languages: {}", e);
                fallback_languages()
            }
        };

        let mut state = self.state.write().await;
        state.languages = languages;
    }

    /// `(code, label)` pairs for a language picker
    pub async fn language_options(&self) -> Vec<(String, String)> {
        self.state
            .read()
            .await
            .languages
            .iter()
            .map(|lang| (lang.code.clone(), lang.label()))
            .collect()
    }

    /// Replace the input text and re-run language auto-detection
    pub async fn set_input_text(&self, text: impl Into<String>) {
        let mut state = self.state.write().await;
        state.input_text = text.into();
        Self::follow_detected_language(&mut state);
    }

    /// Pick the source language; detection on the current input still wins
    pub async fn set_source_language(&self, code: impl Into<String>) {
        let mut state = self.state.write().await;
        state.source_language = code.into();
        Self::follow_detected_language(&mut state);
    }

    /// Point the pair at the detected language of non-blank input
    fn follow_detected_language(state: &mut InteractionState) {
        if state.input_text.trim().is_empty() {
            return;
        }

        let detected = detect_language(&state.input_text);
        if let Some(opposite) = detected.opposite() {
            if detected.code() != state.source_language {
                debug!("Detected {}, switching pair to {}→{}", detected, detected, opposite);
                state.source_language = detected.code().to_string();
                state.target_language = opposite.code().to_string();
            }
        }
    }

    /// Pick the target language
    pub async fn set_target_language(&self, code: impl Into<String>) {
        self.state.write().await.target_language = code.into();
    }

    /// Set beam width, clamped to the supported range
    pub async fn set_num_beams(&self, num_beams: u32) -> u32 {
        let value = num_beams.clamp(*NUM_BEAMS_RANGE.start(), *NUM_BEAMS_RANGE.end());
        self.state.write().await.num_beams = value;
        value
    }

    /// Set output length limit, clamped to the supported range
    pub async fn set_max_length(&self, max_length: u32) -> u32 {
        let value = max_length.clamp(*MAX_LENGTH_RANGE.start(), *MAX_LENGTH_RANGE.end());
        self.state.write().await.max_length = value;
        value
    }

    /// Whether the submit control should be enabled
    pub async fn can_submit(&self) -> bool {
        let state = self.state.read().await;
        !state.is_translating() && !state.input_text.trim().is_empty()
    }

    /// Validate and snapshot the form, moving to `Submitting`.
    ///
    /// Invalid input moves the form to `Failed` instead and nothing is
    /// sent. Call [`PendingTranslation::settle`] to perform the request.
    pub async fn begin_translate(&self) -> Result<PendingTranslation, FormError> {
        let mut state = self.state.write().await;

        if !is_valid_text(&state.input_text) {
            state.error = Some(INVALID_TEXT_MESSAGE.to_string());
            state.phase = FormPhase::Failed;
            return Err(FormError::Validation(INVALID_TEXT_MESSAGE.to_string()));
        }

        state.generation += 1;
        state.phase = FormPhase::Submitting;
        state.error = None;

        Ok(PendingTranslation {
            request: state.request(),
            generation: state.generation,
            controller: self.clone(),
        })
    }

    /// Submit the current input and wait for the outcome
    pub async fn translate(&self) -> Result<TranslationResponse, FormError> {
        self.begin_translate().await?.settle().await
    }

    /// Exchange languages and input/output text.
    ///
    /// Refused while a translation is in flight.
    pub async fn swap_languages(&self) -> Result<(), FormError> {
        let mut state = self.state.write().await;
        if state.is_translating() {
            return Err(FormError::Busy);
        }

        let state = &mut *state;
        std::mem::swap(&mut state.source_language, &mut state.target_language);
        std::mem::swap(&mut state.input_text, &mut state.translated_text);
        Ok(())
    }

    /// Reset input, output, error and last response.
    ///
    /// An in-flight request is not cancelled; when it settles it still
    /// applies its outcome unless stale responses are being discarded.
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        state.input_text.clear();
        state.translated_text.clear();
        state.error = None;
        state.last_response = None;

        if self.settings.discard_stale_responses {
            state.generation += 1;
            state.phase = FormPhase::Idle;
        } else if !state.is_translating() {
            state.phase = FormPhase::Idle;
        }
    }

    /// Copy the translated text; returns whether the indicator went up.
    ///
    /// Clipboard failures are logged and otherwise ignored.
    pub async fn copy_to_clipboard(&self) -> bool {
        let text = self.state.read().await.translated_text.clone();
        if text.is_empty() {
            return false;
        }

        if let Err(e) = self.clipboard.write_text(&text).await {
            warn!("Failed to copy text: {}", e);
            return false;
        }

        self.state.write().await.copied = true;

        let state = self.state.clone();
        let feedback = self.settings.copy_feedback;
        tokio::spawn(async move {
            tokio::time::sleep(feedback).await;
            state.write().await.copied = false;
        });

        true
    }

    /// Processing time and size of the last successful translation
    pub async fn stats(&self) -> Option<TranslationStats> {
        self.state
            .read()
            .await
            .last_response
            .as_ref()
            .map(|response| TranslationStats {
                processing_time: format_time(response.processing_time_ms),
                characters_translated: response.characters_translated(),
            })
    }

    async fn apply_outcome(
        &self,
        generation: u64,
        outcome: &Result<TranslationResponse, FormError>,
    ) {
        let mut state = self.state.write().await;

        if self.settings.discard_stale_responses && generation != state.generation {
            debug!(
                "Discarding stale translation (generation {}, current {})",
                generation, state.generation
            );
            return;
        }

        match outcome {
            Ok(response) => {
                info!(
                    "Translated {} chars in {}",
                    response.characters_translated(),
                    format_time(response.processing_time_ms)
                );
                state.translated_text = response.translated_text.clone();
                state.last_response = Some(response.clone());
                state.error = None;
                state.phase = FormPhase::Success;
            }
            Err(FormError::Api(e)) => {
                state.error = Some(e.message_or(TRANSLATION_FAILED_MESSAGE));
                state.phase = FormPhase::Failed;
            }
            Err(e) => {
                state.error = Some(e.to_string());
                state.phase = FormPhase::Failed;
            }
        }
    }
}

/// A submitted translation that has not been sent yet
pub struct PendingTranslation {
    request: TranslationRequest,
    generation: u64,
    controller: TranslationController,
}

impl PendingTranslation {
    /// The request that will be sent
    pub fn request(&self) -> &TranslationRequest {
        &self.request
    }

    /// Send the request and apply its outcome to the form
    pub async fn settle(self) -> Result<TranslationResponse, FormError> {
        let outcome = self
            .controller
            .api
            .translate(&self.request)
            .await
            .map_err(FormError::from);

        self.controller
            .apply_outcome(self.generation, &outcome)
            .await;
        outcome
    }
}
