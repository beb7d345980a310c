//! User-facing status notifications.
//!
//! Every component reports what happened through a [`NotificationSink`].
//! Events are forwarded as-is and never retained by the core; the
//! presentation layer decides how to render them.

use std::fmt;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A single status message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationEvent {
    pub message: String,
    pub severity: Severity,
}

impl NotificationEvent {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Info,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Receiver of notification events.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, event: &NotificationEvent);
}

/// Mirrors notifications into the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, event: &NotificationEvent) {
        match event.severity {
            Severity::Info => info!(target: "nmt_workbench::notify", "{}", event.message),
            Severity::Error => warn!(target: "nmt_workbench::notify", "{}", event.message),
        }
    }
}

/// Prints notifications to stderr, for the command-line front end.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl NotificationSink for ConsoleSink {
    fn notify(&self, event: &NotificationEvent) {
        match event.severity {
            Severity::Info => eprintln!("[info] {}", event.message),
            Severity::Error => eprintln!("[error] {}", event.message),
        }
    }
}

/// Forwards notifications into a channel.
///
/// Presentation layers (and tests) hold the receiving half.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<NotificationEvent>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<NotificationEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl NotificationSink for ChannelSink {
    fn notify(&self, event: &NotificationEvent) {
        if self.tx.send(event.clone()).is_err() {
            debug!("Notification receiver dropped, discarding: {}", event.message);
        }
    }
}

/// Raises desktop notifications.
#[derive(Debug, Clone)]
pub struct DesktopSink {
    app_name: String,
}

impl DesktopSink {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }
}

impl Default for DesktopSink {
    fn default() -> Self {
        Self::new("NMT Workbench")
    }
}

impl NotificationSink for DesktopSink {
    fn notify(&self, event: &NotificationEvent) {
        let summary = match event.severity {
            Severity::Info => self.app_name.clone(),
            Severity::Error => format!("{} - error", self.app_name),
        };

        // A missing notification daemon must not affect the operation that
        // produced the event.
        if let Err(e) = notify_rust::Notification::new()
            .summary(&summary)
            .body(&event.message)
            .appname(&self.app_name)
            .show()
        {
            warn!("Desktop notification failed: {}", e);
        }
    }
}

/// Delivers every event to each wrapped sink in order.
#[derive(Clone, Default)]
pub struct Fanout {
    sinks: Vec<Arc<dyn NotificationSink>>,
}

impl Fanout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: Arc<dyn NotificationSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl NotificationSink for Fanout {
    fn notify(&self, event: &NotificationEvent) {
        for sink in &self.sinks {
            sink.notify(event);
        }
    }
}
