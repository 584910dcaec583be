//! Character-set language guessing for the English ↔ Tamil pair

use std::fmt;

/// Best-effort guess of the language of a piece of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetectedLanguage {
    /// ASCII letters and no Tamil script
    English,
    /// Contains Tamil script
    Tamil,
    /// Nothing to go on
    Unknown,
}

impl DetectedLanguage {
    /// Language code used by the backend, `"unknown"` for no guess
    pub fn code(&self) -> &'static str {
        match self {
            DetectedLanguage::English => "en",
            DetectedLanguage::Tamil => "ta",
            DetectedLanguage::Unknown => "unknown",
        }
    }

    /// The other side of the pair; `None` when there is no guess
    pub fn opposite(&self) -> Option<DetectedLanguage> {
        match self {
            DetectedLanguage::English => Some(DetectedLanguage::Tamil),
            DetectedLanguage::Tamil => Some(DetectedLanguage::English),
            DetectedLanguage::Unknown => None,
        }
    }
}

impl fmt::Display for DetectedLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Tamil Unicode block
fn is_tamil(c: char) -> bool {
    ('\u{0B80}'..='\u{0BFF}').contains(&c)
}

/// Guess the language of `text`.
///
/// Any character from the Tamil block wins, even in mixed text; otherwise
/// any ASCII letter means English.
pub fn detect_language(text: &str) -> DetectedLanguage {
    if text.chars().any(is_tamil) {
        DetectedLanguage::Tamil
    } else if text.chars().any(|c| c.is_ascii_alphabetic()) {
        DetectedLanguage::English
    } else {
        DetectedLanguage::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_english() {
        assert_eq!(detect_language("Hello"), DetectedLanguage::English);
        assert_eq!(detect_language("123 go!"), DetectedLanguage::English);
    }

    #[test]
    fn test_detect_tamil() {
        assert_eq!(detect_language("வணக்கம்"), DetectedLanguage::Tamil);
        assert_eq!(detect_language("Hello வணக்கம்"), DetectedLanguage::Tamil);
    }

    #[test]
    fn test_detect_unknown() {
        assert_eq!(detect_language(""), DetectedLanguage::Unknown);
        assert_eq!(detect_language("   1234 !?"), DetectedLanguage::Unknown);
        // non-ASCII Latin letters are not counted
        assert_eq!(detect_language("ñé"), DetectedLanguage::Unknown);
        assert_eq!(detect_language("你好"), DetectedLanguage::Unknown);
    }

    #[test]
    fn test_block_edges() {
        assert_eq!(detect_language("\u{0B80}"), DetectedLanguage::Tamil);
        assert_eq!(detect_language("\u{0BFF}"), DetectedLanguage::Tamil);
        assert_eq!(detect_language("\u{0C00}"), DetectedLanguage::Unknown);
    }

    #[test]
    fn test_opposite() {
        assert_eq!(DetectedLanguage::English.opposite(), Some(DetectedLanguage::Tamil));
        assert_eq!(DetectedLanguage::Tamil.opposite(), Some(DetectedLanguage::English));
        assert_eq!(DetectedLanguage::Unknown.opposite(), None);
        assert_eq!(DetectedLanguage::Tamil.to_string(), "ta");
    }
}
