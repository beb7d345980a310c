//! Exporting input or translated text: clipboard and file download.

pub mod clipboard;
pub mod file;

pub use clipboard::{ClipboardWriter, SystemClipboard};
pub use file::{bare_filename, DirectorySaver, FileSaver};

use crate::notify::{NotificationEvent, NotificationSink};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Suggested filename for downloaded translations.
pub const DEFAULT_EXPORT_FILENAME: &str = "translation.txt";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    #[error("Clipboard unavailable: {0}")]
    ClipboardUnavailable(String),

    #[error("Nothing to export")]
    EmptyPayload,

    #[error("Invalid export filename: {0:?}")]
    InvalidFilename(String),

    #[error("Failed to save file: {0}")]
    SaveFailed(String),
}

/// Which buffer an export reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopySource {
    Input,
    Output,
}

impl fmt::Display for CopySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => write!(f, "input"),
            Self::Output => write!(f, "output"),
        }
    }
}

impl std::str::FromStr for CopySource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "input" | "in" | "source" => Ok(Self::Input),
            "output" | "out" | "translation" => Ok(Self::Output),
            _ => Err(format!("Unknown copy source: {} (expected input or output)", s)),
        }
    }
}

/// Pushes text to the clipboard and reports the outcome.
#[derive(Clone)]
pub struct ClipboardExporter {
    writer: Arc<dyn ClipboardWriter>,
    notifier: Arc<dyn NotificationSink>,
}

impl ClipboardExporter {
    pub fn new(writer: Arc<dyn ClipboardWriter>, notifier: Arc<dyn NotificationSink>) -> Self {
        Self { writer, notifier }
    }

    pub fn copy(&self, source: CopySource, text: &str) -> Result<(), ExportError> {
        match self.writer.write_text(text) {
            Ok(()) => {
                let message = match source {
                    CopySource::Input => "Input copied to clipboard!",
                    CopySource::Output => "Output copied to clipboard!",
                };
                info!("Copied {} text to clipboard", source);
                self.notifier.notify(&NotificationEvent::info(message));
                Ok(())
            }
            Err(e) => {
                self.notifier
                    .notify(&NotificationEvent::error(format!("Copy failed: {}", e)));
                Err(e)
            }
        }
    }
}

/// Hands translated text to the host save mechanism.
#[derive(Clone)]
pub struct FileExporter {
    saver: Arc<dyn FileSaver>,
    notifier: Arc<dyn NotificationSink>,
}

impl FileExporter {
    pub fn new(saver: Arc<dyn FileSaver>, notifier: Arc<dyn NotificationSink>) -> Self {
        Self { saver, notifier }
    }

    /// Save `text` under `filename`. Empty text is refused and nothing is
    /// written.
    pub fn download(&self, text: &str, filename: &str) -> Result<PathBuf, ExportError> {
        if text.is_empty() {
            self.notifier
                .notify(&NotificationEvent::error("No translation to download"));
            return Err(ExportError::EmptyPayload);
        }

        match self.saver.save(filename, text.as_bytes()) {
            Ok(path) => {
                self.notifier
                    .notify(&NotificationEvent::info("Translation downloaded!"));
                Ok(path)
            }
            Err(e) => {
                self.notifier
                    .notify(&NotificationEvent::error(format!("Download failed: {}", e)));
                Err(e)
            }
        }
    }
}
