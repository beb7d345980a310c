//! Model training backends.
//!
//! Training is an opaque, long-running maintenance job: no input, no output
//! beyond success or failure.

use crate::config::TrainingConfig;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum TrainingError {
    #[error("Training backend failed: {0}")]
    Backend(String),
}

/// Training engine trait for different backends.
#[async_trait]
pub trait TrainingEngine: Send + Sync {
    /// Run one training job to completion.
    async fn train(&self) -> Result<(), TrainingError>;

    fn name(&self) -> &str;
}

/// Training backend selected in the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrainingBackend {
    #[default]
    Simulated,
}

impl fmt::Display for TrainingBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simulated => write!(f, "simulated"),
        }
    }
}

/// Stand-in trainer that just takes its time.
#[derive(Debug, Clone)]
pub struct SimulatedTrainer {
    duration: Duration,
}

impl SimulatedTrainer {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }
}

impl Default for SimulatedTrainer {
    fn default() -> Self {
        Self::new(Duration::from_millis(3000))
    }
}

#[async_trait]
impl TrainingEngine for SimulatedTrainer {
    async fn train(&self) -> Result<(), TrainingError> {
        debug!("Simulating training run ({}ms)", self.duration.as_millis());
        tokio::time::sleep(self.duration).await;
        Ok(())
    }

    fn name(&self) -> &str {
        "simulated"
    }
}

/// Build the configured training engine.
pub fn from_config(config: &TrainingConfig) -> Arc<dyn TrainingEngine> {
    match config.engine {
        TrainingBackend::Simulated => Arc::new(SimulatedTrainer::new(Duration::from_millis(
            config.simulated_duration_ms,
        ))),
    }
}
