//! Diagnostics collected during mutation and generation.
//!
//! A translation run never stops on an incompatibility; it records one of
//! these and keeps going, so a single run surfaces every problem in the
//! unit. The sink is cheaply clonable and tolerates concurrent append, so
//! a driver translating units in parallel can share one.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warn,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    /// Enclosing `Type.member` path, when known. The interchange tree
    /// carries no line numbers.
    pub location: Option<String>,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Diagnostic {
            severity,
            message: message.into(),
            location: None,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.location {
            Some(loc) => write!(f, "{}: [{}] {}", self.severity.as_str(), loc, self.message),
            None => write!(f, "{}: {}", self.severity.as_str(), self.message),
        }
    }
}

/// Ordered, append-only diagnostic collector shared by the mutation engine
/// and the code generator. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticSink {
    inner: Arc<Mutex<Vec<Diagnostic>>>,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, diag: Diagnostic) {
        self.inner.lock().push(diag);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(Diagnostic::new(Severity::Info, message));
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.push(Diagnostic::new(Severity::Warn, message));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(Diagnostic::new(Severity::Error, message));
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.inner
            .lock()
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Drain the collected diagnostics in emission order.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.inner.lock())
    }

    /// Snapshot without draining.
    pub fn snapshot(&self) -> Vec<Diagnostic> {
        self.inner.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sink_preserves_order() {
        let sink = DiagnosticSink::new();
        sink.info("first");
        sink.warn("second");
        sink.error("third");

        let diags = sink.take();
        assert_eq!(diags.len(), 3);
        assert_eq!(diags[0].message, "first");
        assert_eq!(diags[1].severity, Severity::Warn);
        assert_eq!(diags[2].severity, Severity::Error);
        assert!(sink.is_empty());
    }

    #[test]
    fn clones_share_the_buffer() {
        let sink = DiagnosticSink::new();
        let other = sink.clone();
        other.warn("from the clone");

        assert_eq!(sink.len(), 1);
        assert!(!sink.has_errors());
    }

    #[test]
    fn display_includes_location() {
        let diag =
            Diagnostic::new(Severity::Error, "no can do").with_location("Foo.bar");
        assert_eq!(diag.to_string(), "error: [Foo.bar] no can do");
    }
}
