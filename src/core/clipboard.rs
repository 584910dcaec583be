//! Clipboard access used by the copy action

use async_trait::async_trait;
use cli_clipboard::{ClipboardContext, ClipboardProvider};
use std::sync::{Arc, Mutex};

use crate::core::errors::ClipboardError;

/// Something text can be copied to
#[async_trait]
pub trait Clipboard: Send + Sync {
    /// Replace the clipboard contents with `text`
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Copies to the system clipboard
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    /// Handle to the system clipboard
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Clipboard for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let text = text.to_owned();

        // clipboard backends block on the display server
        tokio::task::spawn_blocking(move || {
            ClipboardContext::new()
                .and_then(|mut ctx| ctx.set_contents(text))
                .map_err(|e| ClipboardError::new(e.to_string()))
        })
        .await
        .map_err(|e| ClipboardError::new(e.to_string()))?
    }
}

/// In-process clipboard, for sessions without a display
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Arc<Mutex<Option<String>>>,
}

impl MemoryClipboard {
    /// Empty clipboard
    pub fn new() -> Self {
        Self::default()
    }

    /// Last copied text
    pub fn contents(&self) -> Option<String> {
        self.contents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl Clipboard for MemoryClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut contents = self
            .contents
            .lock()
            .map_err(|_| ClipboardError::new("clipboard lock poisoned"))?;
        *contents = Some(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clipboard() {
        let clipboard = MemoryClipboard::new();
        assert_eq!(clipboard.contents(), None);

        tokio_test::block_on(clipboard.write_text("வணக்கம்")).unwrap();
        assert_eq!(clipboard.contents().as_deref(), Some("வணக்கம்"));
    }

    #[tokio::test]
    async fn test_system_clipboard_reports_failures() {
        // headless machines have no clipboard; either outcome must come back
        // as a value rather than a panic
        match SystemClipboard::new().write_text("வணக்கம்").await {
            Ok(()) => {}
            Err(e) => assert!(!e.message.is_empty()),
        }
    }
}
