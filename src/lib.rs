//! English/Spanish translation workbench.
//!
//! The library holds the session model and its two asynchronous operations;
//! the `nmt-workbench` binary is a thin CLI over [`Workbench`].

pub mod buffer;
pub mod config;
pub mod error;
pub mod export;
pub mod import;
pub mod language;
pub mod notify;
pub mod operation;
pub mod panic_handler;
pub mod training;
pub mod translation;
pub mod workbench;

// Re-export commonly used types for convenience
pub use buffer::{InputBuffer, OutputBuffer, TranslationResult};
pub use config::Config;
pub use error::{ConcurrencyError, OperationError, ValidationError, WorkbenchError};
pub use export::{CopySource, ExportError};
pub use import::{FileImporter, ImportError};
pub use language::{LanguagePairSelector, SourceLanguage};
pub use notify::{NotificationEvent, NotificationSink, Severity};
pub use operation::{OperationKind, OperationState, Pending};
pub use workbench::{Workbench, WorkbenchBuilder, WorkbenchStatus};
