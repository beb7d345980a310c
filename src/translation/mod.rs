//! Translation backends.
//!
//! The workbench treats translation as an opaque asynchronous capability:
//! text plus its source language in, translated text out. Backends:
//! - Simulated: fixed delay, echoes the input with a prefix
//! - Ollama: LLM-based translation through a local Ollama instance

mod ollama;
mod simulated;

pub use ollama::OllamaTranslator;
pub use simulated::SimulatedTranslator;

use crate::config::TranslationConfig;
use crate::language::SourceLanguage;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Translation-related errors.
#[derive(Error, Debug)]
pub enum TranslationError {
    #[error("Ollama error: {0}")]
    Ollama(String),

    #[error("Backend returned an empty translation")]
    EmptyResponse,

    #[error("{0}")]
    Backend(String),
}

/// Translation engine trait for different backends.
#[async_trait]
pub trait TranslationEngine: Send + Sync {
    /// Translate `text` from `source` into the other language of the pair.
    async fn translate(
        &self,
        text: &str,
        source: SourceLanguage,
    ) -> Result<String, TranslationError>;

    /// Get the name of the translation engine.
    fn name(&self) -> &str;
}

/// Translation backend selected in the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationBackend {
    /// Fixed-delay stand-in
    #[default]
    Simulated,
    /// Ollama LLM-based translation (local)
    Ollama,
}

impl fmt::Display for TranslationBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simulated => write!(f, "simulated"),
            Self::Ollama => write!(f, "ollama"),
        }
    }
}

impl std::str::FromStr for TranslationBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "simulated" | "sim" | "demo" => Ok(Self::Simulated),
            "ollama" | "llm" => Ok(Self::Ollama),
            _ => Err(format!("Unknown translation engine: {}", s)),
        }
    }
}

/// Build the configured translation engine.
pub fn from_config(config: &TranslationConfig) -> Arc<dyn TranslationEngine> {
    match config.engine {
        TranslationBackend::Simulated => Arc::new(SimulatedTranslator::new(Duration::from_millis(
            config.simulated_delay_ms,
        ))),
        TranslationBackend::Ollama => Arc::new(OllamaTranslator::new(
            &config.ollama_url,
            &config.ollama_model,
            config.timeout_secs,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translation_backend_from_str() {
        assert_eq!(
            "simulated".parse::<TranslationBackend>().unwrap(),
            TranslationBackend::Simulated
        );
        assert_eq!(
            "Ollama".parse::<TranslationBackend>().unwrap(),
            TranslationBackend::Ollama
        );
        assert!("m2m100".parse::<TranslationBackend>().is_err());
    }

    #[test]
    fn test_translation_backend_display() {
        assert_eq!(TranslationBackend::Simulated.to_string(), "simulated");
        assert_eq!(TranslationBackend::Ollama.to_string(), "ollama");
    }

    #[test]
    fn test_from_config_picks_engine() {
        let mut config = TranslationConfig::default();
        assert_eq!(from_config(&config).name(), "simulated");

        config.engine = TranslationBackend::Ollama;
        assert_eq!(from_config(&config).name(), "ollama");
    }

    #[test]
    fn test_translation_error_display() {
        let err = TranslationError::Ollama("HTTP 502".to_string());
        assert!(err.to_string().contains("HTTP 502"));
    }
}
