//! Ollama-based translation using LLMs.
//!
//! Uses a local Ollama instance to translate between English and Spanish.
//! Quality depends on the model used (llama3.2, mistral, aya, etc.)

use super::{TranslationEngine, TranslationError};
use crate::language::SourceLanguage;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Ollama generate request.
#[derive(Debug, Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    stream: bool,
}

/// Ollama generate response.
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
}

/// Ollama-based translator.
pub struct OllamaTranslator {
    client: Client,
    url: String,
    model: String,
}

impl OllamaTranslator {
    /// Create a new Ollama translator. The timeout bounds each request.
    pub fn new(url: &str, model: &str, timeout_secs: u32) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs as u64))
            .build()
            .unwrap_or_default();

        Self {
            client,
            url: url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }

    /// Build translation prompt.
    fn build_prompt(&self, text: &str, source: SourceLanguage) -> String {
        format!(
            r#"Translate the following text from {} to {}.
Only output the translation, nothing else. Do not add explanations or notes.

Text: {}

Translation:"#,
            source.display_name(),
            source.swap().display_name(),
            text
        )
    }
}

#[async_trait]
impl TranslationEngine for OllamaTranslator {
    async fn translate(
        &self,
        text: &str,
        source: SourceLanguage,
    ) -> Result<String, TranslationError> {
        let prompt = self.build_prompt(text, source);
        debug!("Ollama translation prompt: {}", prompt);

        let request = OllamaRequest {
            model: self.model.clone(),
            prompt,
            stream: false,
        };

        let url = format!("{}/api/generate", self.url);

        let start = std::time::Instant::now();
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| TranslationError::Ollama(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TranslationError::Ollama(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let result: OllamaResponse = response
            .json()
            .await
            .map_err(|e| TranslationError::Ollama(e.to_string()))?;

        info!(
            "Ollama translation took {}ms ({} -> {}, {} chars)",
            start.elapsed().as_millis(),
            source.code(),
            source.swap().code(),
            text.len()
        );

        let translated = clean_response(&result.response);
        if translated.is_empty() {
            return Err(TranslationError::EmptyResponse);
        }

        debug!("Translated: '{}' -> '{}'", text, translated);
        Ok(translated)
    }

    fn name(&self) -> &str {
        "ollama"
    }
}

/// Strip whitespace and wrapping quotes the model tends to add.
fn clean_response(raw: &str) -> String {
    raw.trim()
        .trim_matches('"')
        .trim_matches('\'')
        .trim()
        .to_string()
}
