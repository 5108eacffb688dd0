// crates/schema-form-core/src/runtime/audit.rs
// ============================================================================
// Module: Schema Form Audit Logging
// Description: Structured audit events for variant selection changes.
// Purpose: Emit JSON-line selection records without hard logging dependencies.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The resolver reports each selection decision to a [`FieldAuditSink`]:
//! mounts, rematches, sticky fallbacks, resets, and explicit switches. The
//! bundled sinks write one JSON object per line; hosts with their own
//! logging pipeline implement the trait directly.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::core::FieldPath;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Variant selection audit event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Field whose selection was evaluated.
    pub field: FieldPath,
    /// Previously active index, when one existed.
    pub from: Option<usize>,
    /// Active index after the event.
    pub to: usize,
    /// Number of options offered by the field.
    pub option_count: usize,
}

impl FieldAuditEvent {
    /// Builds an event stamped with the current wall-clock time.
    #[must_use]
    pub fn new(
        event: &'static str,
        field: &FieldPath,
        from: Option<usize>,
        to: usize,
        option_count: usize,
    ) -> Self {
        Self {
            event,
            timestamp_ms: now_millis(),
            field: field.clone(),
            from,
            to,
            option_count,
        }
    }
}

/// Returns milliseconds since the Unix epoch, or zero when the clock is before it.
fn now_millis() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |elapsed| elapsed.as_millis())
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for variant selection events.
pub trait FieldAuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &FieldAuditEvent);
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl FieldAuditSink for StderrAuditSink {
    fn record(&self, event: &FieldAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl FieldAuditSink for FileAuditSink {
    fn record(&self, event: &FieldAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl FieldAuditSink for NoopAuditSink {
    fn record(&self, _event: &FieldAuditEvent) {}
}

/// Audit sink that keeps events in memory for inspection.
#[derive(Default)]
pub struct MemoryAuditSink {
    /// Recorded events in arrival order.
    events: Mutex<Vec<FieldAuditEvent>>,
}

impl MemoryAuditSink {
    /// Creates an empty in-memory sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<FieldAuditEvent> {
        self.events.lock().map(|events| events.clone()).unwrap_or_default()
    }
}

impl FieldAuditSink for MemoryAuditSink {
    fn record(&self, event: &FieldAuditEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
