//! Error taxonomy for workbench calls.
//!
//! Every error is terminal for the call that raised it. Nothing here is
//! retried automatically; the user re-triggers instead.

use crate::export::ExportError;
use crate::import::ImportError;
use crate::operation::OperationKind;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Input text is empty")]
    EmptyInput,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConcurrencyError {
    #[error("{0} is already running")]
    AlreadyRunning(OperationKind),
}

/// Failure reported by (or while driving) an external capability.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OperationError {
    #[error("External capability failed: {0}")]
    ExternalFailure(String),

    #[error("{0} cannot start outside a Tokio runtime")]
    NoRuntime(OperationKind),
}

#[derive(Error, Debug)]
pub enum WorkbenchError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Concurrency(#[from] ConcurrencyError),
}

impl WorkbenchError {
    /// True when a trigger was refused because the operation is in flight.
    pub fn is_already_running(&self) -> bool {
        matches!(
            self,
            WorkbenchError::Concurrency(ConcurrencyError::AlreadyRunning(_))
        )
    }
}
