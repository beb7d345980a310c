//! Session text buffers.

use crate::language::SourceLanguage;
use chrono::{DateTime, Utc};

/// Source text and its declared language.
///
/// Created empty and lives for the whole session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBuffer {
    pub text: String,
    pub language: SourceLanguage,
}

impl InputBuffer {
    pub fn new(language: SourceLanguage) -> Self {
        Self {
            text: String::new(),
            language,
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn set_language(&mut self, language: SourceLanguage) {
        self.language = language;
    }

    /// True when there is nothing but whitespace to translate.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// A completed translation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationResult {
    /// Input text as it was when the translation was triggered
    pub source_text: String,
    /// Translated text
    pub output_text: String,
    /// Language of `source_text`
    pub source: SourceLanguage,
    /// Language of `output_text`
    pub target: SourceLanguage,
    pub completed_at: DateTime<Utc>,
}

/// Holds the latest successful translation.
///
/// Only a successful translation replaces the content; failures leave the
/// previous result in place.
#[derive(Debug, Clone, Default)]
pub struct OutputBuffer {
    latest: Option<TranslationResult>,
}

impl OutputBuffer {
    pub fn latest(&self) -> Option<&TranslationResult> {
        self.latest.as_ref()
    }

    /// Translated text, or an empty string before the first success.
    pub fn output_text(&self) -> &str {
        self.latest
            .as_ref()
            .map(|r| r.output_text.as_str())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.output_text().is_empty()
    }

    pub(crate) fn publish(&mut self, result: TranslationResult) {
        self.latest = Some(result);
    }
}
