// src/clipboard.rs
// =============================================================================
// Writing commit hashes to the system clipboard.
//
// The explorer only depends on the Clipboard trait; SystemClipboard is the
// real thing (arboard), tests use an in-memory fake.
//
// On Linux/X11 the clipboard contents belong to the process that set them,
// so SystemClipboard keeps its arboard handle alive for the whole session
// instead of creating one per copy.
// =============================================================================

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
#[error("Could not access the clipboard: {0}")]
pub struct ClipboardError(String);

pub trait Clipboard {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError>;
}

// Connects lazily: a headless machine only fails when a copy is attempted
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        let clipboard = match self.inner.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new().map_err(|e| ClipboardError(e.to_string()))?,
        };
        let clipboard = self.inner.insert(clipboard);

        clipboard
            .set_text(text)
            .map_err(|e| ClipboardError(e.to_string()))?;
        debug!(len = text.len(), "copied to clipboard");
        Ok(())
    }
}
