//! nmt-client - client for an English ↔ Tamil neural machine translation service
//!
//! This library wraps the backend's REST API behind a single normalized error
//! shape and provides the interaction controllers that drive a translation
//! form and a health widget.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod controller;
pub mod core;
pub mod utils;

// Re-export key types for convenience
pub use controller::{
    health::{HealthPhase, HealthPoller, HealthState},
    translation::{FormPhase, FormSettings, InteractionState, TranslationController},
};
pub use core::{
    client::{ApiClient, TranslationApi},
    clipboard::{Clipboard, MemoryClipboard, SystemClipboard},
    config::ClientConfig,
    detect::{detect_language, DetectedLanguage},
    errors::{ApiError, ClipboardError, FormError},
    models::{
        BatchTranslationRequest, BatchTranslationResponse, HealthResponse, LanguageInfo,
        SupportedLanguagesResponse, TranslationRequest, TranslationResponse,
    },
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
