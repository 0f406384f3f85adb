//! Audit sink implementations.
//!
//! Every binder application, accepted or rejected, is reported to the sink
//! attached to the registry. Provides a bounded in-memory log and a JSON-lines
//! writer.

use std::collections::VecDeque;
use std::fmt;
use std::io::Write;

use serde::Serialize;
use uuid::Uuid;

use crate::core::binder::BinderKind;
use crate::util::clock::now_ms;

/// Result of one binder application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingOutcome {
    /// The increment was written onto the target's own record.
    Applied,
    /// The application failed and nothing was written.
    Rejected,
}

impl fmt::Display for BindingOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Applied => f.write_str("applied"),
            Self::Rejected => f.write_str("rejected"),
        }
    }
}

/// Audit event structure.
#[derive(Debug, Clone, Serialize)]
pub struct BindingEvent {
    /// Event identifier.
    pub event_id: String,
    /// Name of the targeted type.
    pub target: String,
    /// Binder that was applied.
    pub binder: BinderKind,
    /// Whether the application went through.
    pub outcome: BindingOutcome,
    /// Timestamp milliseconds.
    pub created_at_ms: u128,
    /// Additional context, e.g. the rejection message.
    pub detail: Option<String>,
}

/// Audit sink abstraction.
pub trait AuditSink: Send {
    /// Record an audit event.
    fn record(&mut self, event: BindingEvent);
}

/// In-memory audit sink for testing and dev.
pub struct InMemoryAuditSink {
    events: VecDeque<BindingEvent>,
    max_events: usize,
}

impl InMemoryAuditSink {
    /// Create a new in-memory sink with a bounded buffer.
    pub fn new(max_events: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(max_events),
            max_events,
        }
    }

    /// Retrieve a snapshot of stored events.
    pub fn events(&self) -> Vec<BindingEvent> {
        self.events.iter().cloned().collect()
    }
}

impl AuditSink for InMemoryAuditSink {
    fn record(&mut self, event: BindingEvent) {
        if self.max_events == 0 {
            return;
        }
        if self.events.len() >= self.max_events {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }
}

/// Writes each event as one JSON object per line.
pub struct JsonLinesAuditSink<W> {
    writer: W,
}

impl<W: Write + Send> JsonLinesAuditSink<W> {
    /// Wrap a writer.
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> AuditSink for JsonLinesAuditSink<W> {
    fn record(&mut self, event: BindingEvent) {
        let written = serde_json::to_writer(&mut self.writer, &event)
            .map_err(std::io::Error::from)
            .and_then(|()| self.writer.write_all(b"\n"));
        if let Err(e) = written {
            tracing::error!("failed to write audit event {}: {}", event.event_id, e);
        }
    }
}

/// Helper to build an audit event from context.
pub fn build_binding_event(
    target: impl Into<String>,
    binder: BinderKind,
    outcome: BindingOutcome,
    detail: Option<String>,
) -> BindingEvent {
    BindingEvent {
        event_id: Uuid::new_v4().to_string(),
        target: target.into(),
        binder,
        outcome,
        created_at_ms: now_ms(),
        detail,
    }
}
