//! Clipboard operations using arboard.

use super::ExportError;
use arboard::Clipboard;
use std::sync::Mutex;
use tracing::debug;

/// Host clipboard-write capability.
pub trait ClipboardWriter: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), ExportError>;
}

/// System clipboard.
///
/// The arboard handle is opened lazily on first use and kept afterwards,
/// since on X11 the clipboard content is owned by the process that set it.
#[derive(Default)]
pub struct SystemClipboard {
    handle: Mutex<Option<Clipboard>>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardWriter for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<(), ExportError> {
        let mut guard = self
            .handle
            .lock()
            .map_err(|_| ExportError::ClipboardUnavailable("Clipboard mutex poisoned".into()))?;

        if guard.is_none() {
            let clipboard =
                Clipboard::new().map_err(|e| ExportError::ClipboardUnavailable(e.to_string()))?;
            *guard = Some(clipboard);
        }

        if let Some(clipboard) = guard.as_mut() {
            clipboard
                .set_text(text)
                .map_err(|e| ExportError::ClipboardUnavailable(e.to_string()))?;
        }

        debug!("Copied {} characters to clipboard", text.chars().count());
        Ok(())
    }
}

/// Get text from the system clipboard
#[cfg(test)]
fn get_from_clipboard() -> Result<String, ExportError> {
    let mut clipboard =
        Clipboard::new().map_err(|e| ExportError::ClipboardUnavailable(e.to_string()))?;

    clipboard
        .get_text()
        .map_err(|e| ExportError::ClipboardUnavailable(e.to_string()))
}
