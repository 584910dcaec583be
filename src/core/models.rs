//! Wire models for the translation backend

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Maximum input length, in characters, after trimming
pub const MAX_TEXT_CHARS: usize = 1000;

/// Allowed beam search widths
pub const NUM_BEAMS_RANGE: RangeInclusive<u32> = 1..=10;

/// Allowed output length limits
pub const MAX_LENGTH_RANGE: RangeInclusive<u32> = 128..=1024;

/// Default source language
pub const DEFAULT_SOURCE_LANGUAGE: &str = "en";
/// Default target language
pub const DEFAULT_TARGET_LANGUAGE: &str = "ta";
/// Default beam search width
pub const DEFAULT_NUM_BEAMS: u32 = 4;
/// Default output length limit
pub const DEFAULT_MAX_LENGTH: u32 = 512;

/// True when `text` is non-empty after trimming and at most
/// [`MAX_TEXT_CHARS`] characters long
pub fn is_valid_text(text: &str) -> bool {
    let trimmed = text.trim();
    !trimmed.is_empty() && trimmed.chars().count() <= MAX_TEXT_CHARS
}

/// Single-text translation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRequest {
    /// Text to translate, sent as typed
    pub text: String,
    /// Source language code
    pub source_language: String,
    /// Target language code
    pub target_language: String,
    /// Beam search width
    pub num_beams: u32,
    /// Output length limit
    pub max_length: u32,
}

impl TranslationRequest {
    /// Request with the default pair and parameters
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source_language: DEFAULT_SOURCE_LANGUAGE.to_string(),
            target_language: DEFAULT_TARGET_LANGUAGE.to_string(),
            num_beams: DEFAULT_NUM_BEAMS,
            max_length: DEFAULT_MAX_LENGTH,
        }
    }

    /// Set the language pair
    pub fn with_languages(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.source_language = source.into();
        self.target_language = target.into();
        self
    }

    /// Set the beam search width
    pub fn with_num_beams(mut self, num_beams: u32) -> Self {
        self.num_beams = num_beams;
        self
    }

    /// Set the output length limit
    pub fn with_max_length(mut self, max_length: u32) -> Self {
        self.max_length = max_length;
        self
    }
}

/// Model description embedded in translation responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSummary {
    /// Model name
    pub name: String,
    /// Device the model runs on
    pub device: String,
    /// Whether the weights are loaded
    pub loaded: bool,
}

/// Successful translation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationResponse {
    /// Input echoed back by the backend
    pub original_text: String,
    /// Translation
    pub translated_text: String,
    /// Source language code
    pub source_language: String,
    /// Target language code
    pub target_language: String,
    /// Beam width used
    pub num_beams: u32,
    /// Model confidence, when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<f64>,
    /// Backend processing time
    pub processing_time_ms: f64,
    /// Model that served the request
    pub model_info: ModelSummary,
    /// ISO-8601 as sent by the backend, usually without an offset
    pub timestamp: String,
}

impl TranslationResponse {
    /// Parse the timestamp, treating offset-less values as UTC
    pub fn timestamp_utc(&self) -> Option<DateTime<Utc>> {
        if let Ok(ts) = DateTime::parse_from_rfc3339(&self.timestamp) {
            return Some(ts.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(&self.timestamp, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }

    /// Number of characters in the original text
    pub fn characters_translated(&self) -> usize {
        self.original_text.chars().count()
    }
}

/// Multi-text translation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchTranslationRequest {
    /// Texts to translate, in order
    pub texts: Vec<String>,
    /// Source language code
    pub source_language: String,
    /// Target language code
    pub target_language: String,
    /// Beam width; backend default when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_beams: Option<u32>,
    /// Length limit; backend default when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
}

impl BatchTranslationRequest {
    /// Batch with the default pair
    pub fn new(texts: Vec<String>) -> Self {
        Self {
            texts,
            source_language: DEFAULT_SOURCE_LANGUAGE.to_string(),
            target_language: DEFAULT_TARGET_LANGUAGE.to_string(),
            num_beams: None,
            max_length: None,
        }
    }

    /// Set the language pair
    pub fn with_languages(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.source_language = source.into();
        self.target_language = target.into();
        self
    }
}

/// Batch result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchTranslationResponse {
    /// One result per input text, in order
    pub translations: Vec<TranslationResponse>,
    /// Backend time for the whole batch
    pub total_processing_time_ms: f64,
}

/// One selectable language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageInfo {
    /// Language code, e.g. `ta`
    pub code: String,
    /// English name
    pub name: String,
    /// Name in the language itself
    pub native_name: String,
}

impl LanguageInfo {
    /// Build from borrowed parts
    pub fn new(code: &str, name: &str, native_name: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            native_name: native_name.to_string(),
        }
    }

    /// Label shown in language pickers, e.g. `Tamil (தமிழ்)`
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.native_name)
    }
}

/// Languages used when the backend cannot list its own
pub fn fallback_languages() -> Vec<LanguageInfo> {
    vec![
        LanguageInfo::new("en", "English", "English"),
        LanguageInfo::new("ta", "Tamil", "தமிழ்"),
    ]
}

/// Languages the backend can translate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportedLanguagesResponse {
    /// Listed languages
    pub languages: Vec<LanguageInfo>,
    /// Count reported by the backend
    pub total_count: usize,
}

/// Model details reported by the health endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthModelInfo {
    /// Model name
    pub name: String,
    /// Device the model runs on
    pub device: String,
    /// Whether the weights are loaded
    pub loaded: bool,
    /// Total parameter count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<u64>,
    /// Trainable parameter count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trainable_parameters: Option<u64>,
}

/// Health endpoint payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `healthy` when the backend is ready
    pub status: String,
    /// Backend version
    pub version: String,
    /// Whether the model finished loading
    pub model_loaded: bool,
    /// Model details, when loaded
    pub model_info: Option<HealthModelInfo>,
}

impl HealthResponse {
    /// True when the backend reports `healthy`
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Backend diagnostics, passed through uninterpreted
pub type ModelInfoMap = serde_json::Map<String, serde_json::Value>;

#[cfg(test)]
mod tests {
    use super::*;
    use assert_json_diff::assert_json_eq;
    use serde_json::json;

    #[test]
    fn test_is_valid_text() {
        assert!(!is_valid_text(""));
        assert!(!is_valid_text("   \n\t"));
        assert!(is_valid_text("Hello"));
        assert!(is_valid_text(&"a".repeat(MAX_TEXT_CHARS)));
        assert!(!is_valid_text(&"a".repeat(MAX_TEXT_CHARS + 1)));
        // surrounding whitespace does not count
        assert!(is_valid_text(&format!("  {}  ", "a".repeat(MAX_TEXT_CHARS))));
        // limit is in characters, not bytes
        assert!(is_valid_text(&"த".repeat(MAX_TEXT_CHARS)));
    }

    #[test]
    fn test_request_body_shape() {
        let request = TranslationRequest::new("Hello")
            .with_languages("en", "ta")
            .with_num_beams(6)
            .with_max_length(256);

        assert_json_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "text": "Hello",
                "source_language": "en",
                "target_language": "ta",
                "num_beams": 6,
                "max_length": 256
            })
        );
    }

    #[test]
    fn test_batch_request_omits_unset_options() {
        let request = BatchTranslationRequest::new(vec!["a".into(), "b".into()]);
        assert_json_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "texts": ["a", "b"],
                "source_language": "en",
                "target_language": "ta"
            })
        );
    }

    #[test]
    fn test_response_from_backend_json() {
        let response: TranslationResponse = serde_json::from_value(json!({
            "original_text": "Hello",
            "translated_text": "வணக்கம்",
            "source_language": "en",
            "target_language": "ta",
            "num_beams": 4,
            "confidence_score": null,
            "processing_time_ms": 123.4,
            "model_info": {"name": "nllb", "device": "cpu", "loaded": true},
            "timestamp": "2024-05-01T10:20:30.123456"
        }))
        .unwrap();

        assert_eq!(response.translated_text, "வணக்கம்");
        assert_eq!(response.characters_translated(), 5);
        let ts = response.timestamp_utc().unwrap();
        assert_eq!(ts.to_rfc3339_opts(chrono::SecondsFormat::Secs, true), "2024-05-01T10:20:30Z");
    }

    #[test]
    fn test_timestamp_with_offset() {
        let response = TranslationResponse {
            original_text: String::new(),
            translated_text: String::new(),
            source_language: "en".into(),
            target_language: "ta".into(),
            num_beams: 4,
            confidence_score: None,
            processing_time_ms: 0.0,
            model_info: ModelSummary {
                name: "m".into(),
                device: "cpu".into(),
                loaded: true,
            },
            timestamp: "2024-05-01T12:00:00+02:00".into(),
        };
        let ts = response.timestamp_utc().unwrap();
        assert_eq!(ts.to_rfc3339_opts(chrono::SecondsFormat::Secs, true), "2024-05-01T10:00:00Z");
    }

    #[test]
    fn test_fallback_languages() {
        let langs = fallback_languages();
        assert_eq!(langs.len(), 2);
        assert_eq!(langs[0].code, "en");
        assert_eq!(langs[1].code, "ta");
        assert_eq!(langs[1].label(), "Tamil (தமிழ்)");
    }

    #[test]
    fn test_health_without_model_info() {
        let health: HealthResponse = serde_json::from_value(json!({
            "status": "unhealthy",
            "version": "1.0.0",
            "model_loaded": false,
            "model_info": null
        }))
        .unwrap();
        assert!(!health.is_healthy());
        assert!(health.model_info.is_none());
    }
}
