//! The fixed English/Spanish language pair.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Language the source text is written in.
///
/// Only two values exist; the translation target is always the other one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceLanguage {
    #[default]
    English,
    Spanish,
}

impl SourceLanguage {
    /// The other language of the pair.
    pub fn swap(self) -> Self {
        match self {
            Self::English => Self::Spanish,
            Self::Spanish => Self::English,
        }
    }

    /// ISO 639-1 code, as expected by translation backends.
    pub fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Spanish => "es",
        }
    }

    /// Human-readable name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Spanish => "Spanish",
        }
    }
}

impl fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::English => write!(f, "english"),
            Self::Spanish => write!(f, "spanish"),
        }
    }
}

impl std::str::FromStr for SourceLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "english" | "en" => Ok(Self::English),
            "spanish" | "es" | "español" | "espanol" => Ok(Self::Spanish),
            _ => Err(format!(
                "Unknown language: {} (expected 'english' or 'spanish')",
                s
            )),
        }
    }
}

/// Holds the current source language and toggles it.
///
/// Swapping only changes the label. Neither the input text nor the last
/// translation is touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LanguagePairSelector {
    current: SourceLanguage,
}

impl LanguagePairSelector {
    pub fn new(initial: SourceLanguage) -> Self {
        Self { current: initial }
    }

    pub fn current(&self) -> SourceLanguage {
        self.current
    }

    /// Language the next translation will produce.
    pub fn target(&self) -> SourceLanguage {
        self.current.swap()
    }

    pub fn set(&mut self, language: SourceLanguage) {
        self.current = language;
    }

    /// Toggle to the other language and return the new value.
    pub fn swap(&mut self) -> SourceLanguage {
        self.current = self.current.swap();
        self.current
    }
}
