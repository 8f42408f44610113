//! Diagnostic sink for observability.
//!
//! The sanitizer never errors outward; the only way to see that a field
//! received its fallback is through diagnostic events. Sinks are
//! fire-and-forget: recording must not influence sanitization behavior,
//! and the default [`NullSink`] drops everything.

use std::sync::Mutex;

use serde::Serialize;
use serde_json::Value;

/// How serious a diagnostic event is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Routine notice (e.g. a fallback default was inserted for a missing field).
    Info,
    /// Something was off but recoverable (e.g. a type mismatch, a repaired candidate).
    Warning,
    /// A stage failed outright and an entire subtree fell back.
    Failure,
}

/// A structured notification emitted during sanitization.
///
/// Serializable so sinks can ship events to whatever backend they like.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticEvent {
    /// Event severity.
    pub severity: Severity,
    /// Human-readable description.
    pub message: String,
    /// Optional structured payload (field name, offending value, etc.).
    pub context: Option<Value>,
}

impl DiagnosticEvent {
    /// Creates an info-level event.
    #[inline]
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    /// Creates a warning-level event.
    #[inline]
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Creates a failure-level event.
    #[inline]
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(Severity::Failure, message)
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            context: None,
        }
    }

    /// Attaches a structured payload to the event.
    #[inline]
    pub fn with_context(mut self, context: Value) -> Self {
        self.context = Some(context);
        self
    }
}

/// Receiver for diagnostic events.
///
/// Implementations must be cheap and must never panic; the sanitizer calls
/// `record` inline on its own thread.
pub trait DiagnosticSink: Send + Sync + std::fmt::Debug {
    /// Records one event.
    fn record(&self, event: DiagnosticEvent);
}

/// Sink that discards all events. The default when no sink is injected.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    #[inline]
    fn record(&self, _event: DiagnosticEvent) {}
}

/// Sink that forwards events to the `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, event: DiagnosticEvent) {
        let context = event
            .context
            .as_ref()
            .map(Value::to_string)
            .unwrap_or_default();
        match event.severity {
            Severity::Info => tracing::info!(target: "salvage", %context, "{}", event.message),
            Severity::Warning => tracing::warn!(target: "salvage", %context, "{}", event.message),
            Severity::Failure => tracing::error!(target: "salvage", %context, "{}", event.message),
        }
    }
}

/// Sink that buffers events in memory, mainly for tests and debugging.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<DiagnosticEvent>>,
}

impl MemorySink {
    /// Creates an empty memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all recorded events.
    pub fn events(&self) -> Vec<DiagnosticEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Returns how many events of the given severity were recorded.
    pub fn count(&self, severity: Severity) -> usize {
        self.events()
            .iter()
            .filter(|e| e.severity == severity)
            .count()
    }
}

impl DiagnosticSink for MemorySink {
    fn record(&self, event: DiagnosticEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_event_constructors() {
        let event = DiagnosticEvent::warning("type mismatch");
        assert_eq!(event.severity, Severity::Warning);
        assert_eq!(event.message, "type mismatch");
        assert!(event.context.is_none());
    }

    #[test]
    fn test_event_with_context() {
        let event = DiagnosticEvent::info("default inserted").with_context(json!({"field": "age"}));
        assert_eq!(event.context, Some(json!({"field": "age"})));
    }

    #[test]
    fn test_memory_sink_collects() {
        let sink = MemorySink::new();
        sink.record(DiagnosticEvent::info("one"));
        sink.record(DiagnosticEvent::failure("two"));

        assert_eq!(sink.events().len(), 2);
        assert_eq!(sink.count(Severity::Failure), 1);
        assert_eq!(sink.count(Severity::Warning), 0);
    }

    #[test]
    fn test_null_sink_is_silent() {
        let sink = NullSink;
        sink.record(DiagnosticEvent::failure("dropped"));
    }
}
