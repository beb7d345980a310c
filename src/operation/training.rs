//! The train operation.

use super::{current_runtime, Operation, OperationKind, OperationState, Pending};
use crate::error::{OperationError, WorkbenchError};
use crate::notify::{NotificationEvent, NotificationSink};
use crate::training::TrainingEngine;
use std::sync::Arc;
use tracing::{error, info};

/// Runs training jobs. Shares nothing with the text buffers.
///
/// Unlike translation, an accepted trigger is acknowledged right away since
/// a run can take a long time.
pub struct TrainingOperation {
    operation: Arc<Operation<()>>,
    engine: Arc<dyn TrainingEngine>,
    notifier: Arc<dyn NotificationSink>,
}

impl TrainingOperation {
    pub fn new(engine: Arc<dyn TrainingEngine>, notifier: Arc<dyn NotificationSink>) -> Self {
        Self {
            operation: Arc::new(Operation::new(OperationKind::Training)),
            engine,
            notifier,
        }
    }

    pub fn state(&self) -> OperationState<()> {
        self.operation.state()
    }

    pub fn operation(&self) -> &Operation<()> {
        &self.operation
    }

    pub fn engine_name(&self) -> &str {
        self.engine.name()
    }

    /// Start a training run on the current Tokio runtime.
    ///
    /// Refused without touching the state when no runtime is available or a
    /// run is already in flight.
    pub fn trigger(&self) -> Result<Pending<()>, WorkbenchError> {
        let runtime = match current_runtime(OperationKind::Training) {
            Ok(runtime) => runtime,
            Err(e) => {
                self.notifier
                    .notify(&NotificationEvent::error(format!("Model training failed: {}", e)));
                return Err(e.into());
            }
        };

        if let Err(e) = self.operation.begin() {
            self.notifier
                .notify(&NotificationEvent::error("Training is already in progress."));
            return Err(e.into());
        }

        info!("Training started with {}", self.engine.name());
        self.notifier.notify(&NotificationEvent::info(
            "Training process started. This may take a while...",
        ));

        let operation = Arc::clone(&self.operation);
        let engine = Arc::clone(&self.engine);
        let notifier = Arc::clone(&self.notifier);

        let handle = runtime.spawn(async move {
            let call = tokio::spawn(async move { engine.train().await });
            let outcome = match call.await {
                Ok(Ok(())) => Ok(()),
                Ok(Err(e)) => Err(OperationError::ExternalFailure(e.to_string())),
                Err(e) => Err(OperationError::ExternalFailure(format!(
                    "training task aborted: {}",
                    e
                ))),
            };

            match outcome {
                Ok(()) => {
                    let state = operation.complete(Ok(()));
                    info!("Training completed");
                    notifier.notify(&NotificationEvent::info(
                        "Model training completed successfully!",
                    ));
                    state
                }
                Err(e) => {
                    error!("Training failed: {}", e);
                    let message = format!("Model training failed: {}", e);
                    let state = operation.complete(Err(e));
                    notifier.notify(&NotificationEvent::error(message));
                    state
                }
            }
        });

        Ok(Pending::new(OperationKind::Training, handle))
    }
}
