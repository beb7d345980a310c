//! Stand-in translation backend with a fixed delay.

use super::{TranslationEngine, TranslationError};
use crate::language::SourceLanguage;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Waits for `delay`, then returns the input prefixed with `Translated: `.
#[derive(Debug, Clone)]
pub struct SimulatedTranslator {
    delay: Duration,
}

impl SimulatedTranslator {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedTranslator {
    fn default() -> Self {
        Self::new(Duration::from_millis(1000))
    }
}

#[async_trait]
impl TranslationEngine for SimulatedTranslator {
    async fn translate(
        &self,
        text: &str,
        source: SourceLanguage,
    ) -> Result<String, TranslationError> {
        debug!(
            "Simulating {} -> {} translation ({}ms)",
            source,
            source.swap(),
            self.delay.as_millis()
        );
        tokio::time::sleep(self.delay).await;
        Ok(format!("Translated: {}", text))
    }

    fn name(&self) -> &str {
        "simulated"
    }
}
