//! Asynchronous operation state machines.
//!
//! Each operation kind (translation, training) owns one [`Operation`] cell
//! moving through `Idle -> Running -> Succeeded | Failed`. At most one run of
//! a kind is in flight; a trigger while Running is refused rather than
//! cancelling the earlier run. The two kinds are independent of each other.
//!
//! State changes are published on a `watch` channel so a presentation layer
//! can derive its own affordances (disabled buttons, spinners) from them.

pub mod training;
pub mod translation;

pub use training::TrainingOperation;
pub use translation::TranslationOperation;

use crate::error::{ConcurrencyError, OperationError};
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// The two independently triggerable operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Translation,
    Training,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Translation => write!(f, "Translation"),
            Self::Training => write!(f, "Training"),
        }
    }
}

/// Lifecycle of one operation kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationState<T> {
    Idle,
    Running,
    Succeeded(T),
    Failed(OperationError),
}

impl<T> OperationState<T> {
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }

    /// Succeeded or Failed.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded(_) | Self::Failed(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Succeeded(_) => "succeeded",
            Self::Failed(_) => "failed",
        }
    }
}

/// Shared state cell for one operation kind.
#[derive(Debug)]
pub struct Operation<T> {
    kind: OperationKind,
    state: watch::Sender<OperationState<T>>,
}

impl<T: Clone> Operation<T> {
    pub fn new(kind: OperationKind) -> Self {
        let (state, _) = watch::channel(OperationState::Idle);
        Self { kind, state }
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    /// Current state.
    pub fn state(&self) -> OperationState<T> {
        self.state.borrow().clone()
    }

    pub fn is_running(&self) -> bool {
        self.state.borrow().is_running()
    }

    /// Watch state transitions.
    pub fn subscribe(&self) -> watch::Receiver<OperationState<T>> {
        self.state.subscribe()
    }

    /// Enter Running unless a run is already in flight.
    ///
    /// Check and transition happen under the channel's lock, so two racing
    /// triggers cannot both be accepted.
    pub fn begin(&self) -> Result<(), ConcurrencyError> {
        let accepted = self.state.send_if_modified(|state| {
            if state.is_running() {
                false
            } else {
                *state = OperationState::Running;
                true
            }
        });

        if accepted {
            debug!("{} entered Running", self.kind);
            Ok(())
        } else {
            Err(ConcurrencyError::AlreadyRunning(self.kind))
        }
    }

    /// Leave Running with the outcome of the run and return the terminal
    /// state. Ignored (with a warning) when no run is in flight.
    pub fn complete(&self, outcome: Result<T, OperationError>) -> OperationState<T> {
        let terminal = match outcome {
            Ok(value) => OperationState::Succeeded(value),
            Err(e) => OperationState::Failed(e),
        };

        let applied = self.state.send_if_modified(|state| {
            if state.is_running() {
                *state = terminal.clone();
                true
            } else {
                false
            }
        });

        if applied {
            debug!("{} finished: {}", self.kind, terminal.label());
        } else {
            warn!(
                "{} completion ({}) arrived while not running, ignoring",
                self.kind,
                terminal.label()
            );
        }
        terminal
    }

    /// Return a terminal state to Idle. Has no effect while Running.
    pub fn reset(&self) -> bool {
        self.state.send_if_modified(|state| {
            if state.is_terminal() {
                *state = OperationState::Idle;
                true
            } else {
                false
            }
        })
    }
}

/// Handle to an accepted trigger; resolves once the run is terminal.
///
/// Dropping the handle does not cancel the run.
#[derive(Debug)]
pub struct Pending<T> {
    kind: OperationKind,
    handle: JoinHandle<OperationState<T>>,
}

impl<T> Pending<T> {
    pub(crate) fn new(kind: OperationKind, handle: JoinHandle<OperationState<T>>) -> Self {
        Self { kind, handle }
    }

    /// Wait for the terminal state of this run.
    pub async fn wait(self) -> OperationState<T> {
        match self.handle.await {
            Ok(state) => state,
            Err(e) => OperationState::Failed(OperationError::ExternalFailure(format!(
                "{} task stopped: {}",
                self.kind, e
            ))),
        }
    }
}

/// The runtime a trigger spawns on, resolved before `begin()` so a missing
/// runtime never leaves the operation Running.
pub(crate) fn current_runtime(kind: OperationKind) -> Result<Handle, OperationError> {
    Handle::try_current().map_err(|e| {
        warn!("{} triggered outside a runtime: {}", kind, e);
        OperationError::NoRuntime(kind)
    })
}

/// Lock a mutex, recovering the data if a previous holder panicked.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
