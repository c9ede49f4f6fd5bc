//! Diagnostic reporting
//!
//! Components never log through a global; they receive a [`DiagnosticSink`]
//! when constructed. [`TracingSink`] forwards to `tracing`, [`MemorySink`]
//! keeps everything in memory for inspection.

use crate::types::{ConfigError, ErrorKind};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Debug,
    Info,
    Warn,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Name of the emitting component, e.g. `discovery`
    pub component: &'static str,
    pub kind: Option<ErrorKind>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(severity: Severity, component: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity,
            component,
            kind: None,
            message: message.into(),
        }
    }

    pub fn from_error(severity: Severity, component: &'static str, error: &ConfigError) -> Self {
        Self {
            severity,
            component,
            kind: Some(error.kind()),
            message: error.to_string(),
        }
    }
}

pub trait DiagnosticSink: Send + Sync {
    fn record(&self, diagnostic: Diagnostic);
}

/// Convenience wrapper binding a sink to one component name
#[derive(Clone)]
pub struct Reporter {
    component: &'static str,
    sink: Arc<dyn DiagnosticSink>,
}

impl Reporter {
    pub fn new(component: &'static str, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self { component, sink }
    }

    pub fn debug(&self, message: impl Into<String>) {
        self.sink
            .record(Diagnostic::new(Severity::Debug, self.component, message));
    }

    pub fn info(&self, message: impl Into<String>) {
        self.sink
            .record(Diagnostic::new(Severity::Info, self.component, message));
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.sink
            .record(Diagnostic::new(Severity::Warn, self.component, message));
    }

    pub fn error(&self, severity: Severity, error: &ConfigError) {
        self.sink
            .record(Diagnostic::from_error(severity, self.component, error));
    }
}

/// Forwards diagnostics to the `tracing` subscriber
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, diagnostic: Diagnostic) {
        let kind = diagnostic.kind.map(|k| k.to_string()).unwrap_or_default();
        let component = diagnostic.component;
        let message = diagnostic.message;
        match diagnostic.severity {
            Severity::Debug => debug!(component, kind = %kind, "{}", message),
            Severity::Info => info!(component, kind = %kind, "{}", message),
            Severity::Warn => warn!(component, kind = %kind, "{}", message),
        }
    }
}

/// Keeps every diagnostic in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    pub fn kinds(&self) -> Vec<ErrorKind> {
        self.entries().iter().filter_map(|d| d.kind).collect()
    }

    pub fn contains_kind(&self, kind: ErrorKind) -> bool {
        self.kinds().contains(&kind)
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }
}

impl DiagnosticSink for MemorySink {
    fn record(&self, diagnostic: Diagnostic) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(diagnostic);
        }
    }
}
