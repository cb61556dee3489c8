// crates/pstore-core/tests/audit_sinks.rs
// ============================================================================
// Module: Audit Sink Tests
// Description: Tests for audited stores and JSON-line sinks.
// ============================================================================
//! ## Overview
//! Verifies one event per call, outcome labeling, file-sink output, and that
//! parameter values never appear in audit payloads.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::sync::Arc;
use std::sync::Mutex;

use pstore_core::AuditSink;
use pstore_core::AuditedParameterStore;
use pstore_core::FileAuditSink;
use pstore_core::InMemoryParameterStore;
use pstore_core::NoopAuditSink;
use pstore_core::ParameterAuditEvent;
use pstore_core::Step;
use pstore_core::Walkthrough;
use pstore_core::WalkthroughSettings;
use pstore_core::audit::AuditOutcome;
use pstore_core::audit::ParameterOperation;
use pstore_core::runtime::walkthrough::DEMO_VALUE;
use serde_json::Value;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Sink that keeps events in memory.
#[derive(Default)]
struct CapturingSink {
    /// Captured events.
    events: Mutex<Vec<ParameterAuditEvent>>,
}

impl AuditSink for CapturingSink {
    fn record(&self, event: &ParameterAuditEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

// ============================================================================
// SECTION: Audited Store
// ============================================================================

/// Tests each walkthrough call produces one labeled event.
#[test]
fn test_one_event_per_call() {
    let sink = Arc::new(CapturingSink::default());
    let store = AuditedParameterStore::new(InMemoryParameterStore::new(), sink.clone());
    let mut walkthrough = Walkthrough::new(&store, Vec::new(), WalkthroughSettings::new("/demo/secret"));
    walkthrough.run(&Step::ALL).unwrap();

    let events = sink.events.lock().unwrap();
    let operations: Vec<ParameterOperation> = events.iter().map(|event| event.operation).collect();
    assert_eq!(
        operations,
        vec![
            ParameterOperation::PutParameter,
            ParameterOperation::GetParameter,
            ParameterOperation::GetParameters,
            ParameterOperation::GetParametersByPath,
            ParameterOperation::DeleteParameter,
        ]
    );
    assert!(events.iter().all(|event| event.outcome == AuditOutcome::Ok));
    assert_eq!(events[0].version, Some(1));
    assert_eq!(events[2].names, vec!["/demo/secret", "InvalidParamName"]);
    assert_eq!(events[2].result_count, Some(1));
    assert_eq!(events[3].path.as_deref(), Some("/"));
    assert!(store.inner().is_empty().unwrap());
}

/// Tests failures are recorded with their error kind.
#[test]
fn test_failures_are_recorded() {
    let sink = Arc::new(CapturingSink::default());
    let store = AuditedParameterStore::new(InMemoryParameterStore::new(), sink.clone());
    let mut walkthrough = Walkthrough::new(&store, Vec::new(), WalkthroughSettings::new("/missing"));
    assert!(walkthrough.run(&[Step::Delete]).is_err());

    let events = sink.events.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].outcome, AuditOutcome::Error);
    assert_eq!(events[0].error_kind, Some("not_found"));
}

/// Tests the no-op sink leaves the store behavior unchanged.
#[test]
fn test_noop_sink_passes_through() {
    let store = AuditedParameterStore::new(InMemoryParameterStore::new(), Arc::new(NoopAuditSink));
    let mut walkthrough = Walkthrough::new(&store, Vec::new(), WalkthroughSettings::new("/demo/secret"));
    assert_eq!(walkthrough.put_parameter_example().unwrap().version, 1);
}

// ============================================================================
// SECTION: File Sink
// ============================================================================

/// Tests the file sink appends JSON lines without parameter values.
#[test]
fn test_file_sink_writes_json_lines() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("audit.jsonl");
    let sink = Arc::new(FileAuditSink::new(&path).unwrap());
    let store = AuditedParameterStore::new(InMemoryParameterStore::new(), sink);
    let mut walkthrough = Walkthrough::new(&store, Vec::new(), WalkthroughSettings::new("/demo/secret"));
    walkthrough.run(&[Step::Put, Step::Get]).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(!contents.contains(DEMO_VALUE));
    let lines: Vec<Value> = contents.lines().map(|line| serde_json::from_str(line).unwrap()).collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["event"], "parameter_call");
    assert_eq!(lines[0]["operation"], "put_parameter");
    assert_eq!(lines[0]["outcome"], "ok");
    assert_eq!(lines[0]["redaction"], "values_omitted");
    assert_eq!(lines[1]["operation"], "get_parameter");
    assert_eq!(lines[1]["result_count"], 1);
}

/// Tests reopening the file sink appends rather than truncates.
#[test]
fn test_file_sink_appends() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("audit.jsonl");
    for _ in 0..2 {
        let sink = Arc::new(FileAuditSink::new(&path).unwrap());
        let store = AuditedParameterStore::new(InMemoryParameterStore::new(), sink);
        let mut walkthrough = Walkthrough::new(&store, Vec::new(), WalkthroughSettings::new("/demo/secret"));
        walkthrough.put_parameter_example().unwrap();
    }
    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents.lines().count(), 2);
}
