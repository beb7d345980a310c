//! The translate operation.

use super::{current_runtime, lock, Operation, OperationKind, OperationState, Pending};
use crate::buffer::{InputBuffer, OutputBuffer, TranslationResult};
use crate::error::{OperationError, ValidationError, WorkbenchError};
use crate::notify::{NotificationEvent, NotificationSink};
use crate::translation::TranslationEngine;
use chrono::Utc;
use std::sync::{Arc, Mutex};
use tracing::{error, info};

/// Runs translations against the external engine and publishes successful
/// results into the shared [`OutputBuffer`].
///
/// Notifies only on terminal transitions (and on rejected triggers).
pub struct TranslationOperation {
    operation: Arc<Operation<TranslationResult>>,
    engine: Arc<dyn TranslationEngine>,
    output: Arc<Mutex<OutputBuffer>>,
    notifier: Arc<dyn NotificationSink>,
}

impl TranslationOperation {
    pub fn new(
        engine: Arc<dyn TranslationEngine>,
        output: Arc<Mutex<OutputBuffer>>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            operation: Arc::new(Operation::new(OperationKind::Translation)),
            engine,
            output,
            notifier,
        }
    }

    pub fn state(&self) -> OperationState<TranslationResult> {
        self.operation.state()
    }

    pub fn operation(&self) -> &Operation<TranslationResult> {
        &self.operation
    }

    pub fn engine_name(&self) -> &str {
        self.engine.name()
    }

    /// Start translating a snapshot of `input`.
    ///
    /// Returns as soon as the operation is Running; the engine call happens
    /// on a task spawned onto the current Tokio runtime. Blank input, a
    /// missing runtime and a trigger while a previous translation is still in
    /// flight are all refused without touching the state.
    pub fn trigger(&self, input: &InputBuffer) -> Result<Pending<TranslationResult>, WorkbenchError> {
        if input.is_blank() {
            self.notifier
                .notify(&NotificationEvent::error("Please enter text to translate."));
            return Err(ValidationError::EmptyInput.into());
        }

        let runtime = match current_runtime(OperationKind::Translation) {
            Ok(runtime) => runtime,
            Err(e) => {
                self.notifier
                    .notify(&NotificationEvent::error(format!("Translation failed: {}", e)));
                return Err(e.into());
            }
        };

        if let Err(e) = self.operation.begin() {
            self.notifier.notify(&NotificationEvent::error(
                "A translation is already in progress.",
            ));
            return Err(e.into());
        }

        let snapshot = input.clone();
        info!(
            "Translating {} chars ({} -> {}) with {}",
            snapshot.text.chars().count(),
            snapshot.language,
            snapshot.language.swap(),
            self.engine.name()
        );

        let operation = Arc::clone(&self.operation);
        let engine = Arc::clone(&self.engine);
        let output = Arc::clone(&self.output);
        let notifier = Arc::clone(&self.notifier);

        let handle = runtime.spawn(async move {
            let text = snapshot.text.clone();
            let source = snapshot.language;

            // The engine runs on its own task so a panicking backend still
            // ends in Failed instead of leaving the operation Running.
            let call = tokio::spawn(async move { engine.translate(&text, source).await });
            let outcome = match call.await {
                Ok(Ok(output_text)) => Ok(output_text),
                Ok(Err(e)) => Err(OperationError::ExternalFailure(e.to_string())),
                Err(e) => Err(OperationError::ExternalFailure(format!(
                    "translation task aborted: {}",
                    e
                ))),
            };

            match outcome {
                Ok(output_text) => {
                    let result = TranslationResult {
                        source_text: snapshot.text,
                        output_text,
                        source,
                        target: source.swap(),
                        completed_at: Utc::now(),
                    };
                    // Publish before the state flips so observers of
                    // Succeeded always find the result in the buffer.
                    lock(&output).publish(result.clone());
                    let state = operation.complete(Ok(result));
                    info!("Translation completed");
                    notifier.notify(&NotificationEvent::info(
                        "Translation completed successfully!",
                    ));
                    state
                }
                Err(e) => {
                    error!("Translation failed: {}", e);
                    let message = format!("Translation failed: {}", e);
                    let state = operation.complete(Err(e));
                    notifier.notify(&NotificationEvent::error(message));
                    state
                }
            }
        });

        Ok(Pending::new(OperationKind::Translation, handle))
    }
}
