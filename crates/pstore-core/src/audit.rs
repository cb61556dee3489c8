// crates/pstore-core/src/audit.rs
// ============================================================================
// Module: Parameter Audit Logging
// Description: Structured audit events for parameter-store calls.
// Purpose: Emit JSON-line call records without logging parameter values.
// Dependencies: serde, serde_json, crate::interfaces
// ============================================================================

//! ## Overview
//! Every call made through [`AuditedParameterStore`] produces one
//! [`ParameterAuditEvent`]. Events carry names, paths, outcomes, and counts
//! but never values, so secure parameters cannot leak into logs. Sinks are
//! lightweight and route events to stderr, an append-only file, or nowhere.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::core::DeleteParameterRequest;
use crate::core::DeleteParameterResponse;
use crate::core::GetParameterRequest;
use crate::core::GetParameterResponse;
use crate::core::GetParametersByPathRequest;
use crate::core::GetParametersByPathResponse;
use crate::core::GetParametersRequest;
use crate::core::GetParametersResponse;
use crate::core::PutParameterRequest;
use crate::core::PutParameterResponse;
use crate::interfaces::ParameterStore;
use crate::interfaces::StoreError;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Parameter-store operation classification.
///
/// # Invariants
/// - Variants are stable for audit labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterOperation {
    /// Create-or-update call.
    PutParameter,
    /// Single-record read.
    GetParameter,
    /// Multi-name read.
    GetParameters,
    /// Path-prefix read.
    GetParametersByPath,
    /// Delete call.
    DeleteParameter,
}

impl ParameterOperation {
    /// Returns a stable label for the operation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PutParameter => "put_parameter",
            Self::GetParameter => "get_parameter",
            Self::GetParameters => "get_parameters",
            Self::GetParametersByPath => "get_parameters_by_path",
            Self::DeleteParameter => "delete_parameter",
        }
    }
}

/// Call outcome classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditOutcome {
    /// The call succeeded.
    Ok,
    /// The call failed.
    Error,
}

/// Parameter-store audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct ParameterAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Operation performed.
    pub operation: ParameterOperation,
    /// Parameter names named by the request.
    pub names: Vec<String>,
    /// Path prefix for path reads.
    pub path: Option<String>,
    /// Call outcome.
    pub outcome: AuditOutcome,
    /// Error kind label on failure.
    pub error_kind: Option<&'static str>,
    /// Number of records returned by reads.
    pub result_count: Option<usize>,
    /// Version written by create-or-update calls.
    pub version: Option<i64>,
    /// Redaction classification for payload logging.
    pub redaction: &'static str,
}

/// Inputs required to construct an audit event.
pub struct ParameterAuditEventParams {
    /// Operation performed.
    pub operation: ParameterOperation,
    /// Parameter names named by the request.
    pub names: Vec<String>,
    /// Path prefix for path reads.
    pub path: Option<String>,
    /// Call outcome.
    pub outcome: AuditOutcome,
    /// Error kind label on failure.
    pub error_kind: Option<&'static str>,
    /// Number of records returned by reads.
    pub result_count: Option<usize>,
    /// Version written by create-or-update calls.
    pub version: Option<i64>,
}

impl ParameterAuditEvent {
    /// Creates a new audit event with a consistent timestamp.
    #[must_use]
    pub fn new(params: ParameterAuditEventParams) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event: "parameter_call",
            timestamp_ms,
            operation: params.operation,
            names: params.names,
            path: params.path,
            outcome: params.outcome,
            error_kind: params.error_kind,
            result_count: params.result_count,
            version: params.version,
            redaction: "values_omitted",
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for parameter-store call events.
pub trait AuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &ParameterAuditEvent);
}

/// Audit sink that discards events.
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record(&self, _event: &ParameterAuditEvent) {}
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl AuditSink for StderrAuditSink {
    fn record(&self, event: &ParameterAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
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

impl AuditSink for FileAuditSink {
    fn record(&self, event: &ParameterAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

// ============================================================================
// SECTION: Audited Store
// ============================================================================

/// Store decorator that records one audit event per call.
pub struct AuditedParameterStore<S> {
    /// Wrapped store.
    inner: S,
    /// Destination for audit events.
    sink: Arc<dyn AuditSink>,
}

impl<S: ParameterStore> AuditedParameterStore<S> {
    /// Wraps a store with an audit sink.
    #[must_use]
    pub fn new(inner: S, sink: Arc<dyn AuditSink>) -> Self {
        Self {
            inner,
            sink,
        }
    }

    /// Returns the wrapped store.
    #[must_use]
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    /// Records the outcome of a call and passes the result through.
    fn observe<T>(
        &self,
        operation: ParameterOperation,
        names: Vec<String>,
        path: Option<String>,
        result: Result<T, StoreError>,
        summarize: impl Fn(&T) -> (Option<usize>, Option<i64>),
    ) -> Result<T, StoreError> {
        let (outcome, error_kind, result_count, version) = match &result {
            Ok(value) => {
                let (count, version) = summarize(value);
                (AuditOutcome::Ok, None, count, version)
            }
            Err(err) => (AuditOutcome::Error, Some(err.kind()), None, None),
        };
        self.sink.record(&ParameterAuditEvent::new(ParameterAuditEventParams {
            operation,
            names,
            path,
            outcome,
            error_kind,
            result_count,
            version,
        }));
        result
    }
}

impl<S: ParameterStore> ParameterStore for AuditedParameterStore<S> {
    fn put_parameter(
        &self,
        request: &PutParameterRequest,
    ) -> Result<PutParameterResponse, StoreError> {
        self.observe(
            ParameterOperation::PutParameter,
            vec![request.name.to_string()],
            None,
            self.inner.put_parameter(request),
            |response| (None, Some(response.version)),
        )
    }

    fn get_parameter(
        &self,
        request: &GetParameterRequest,
    ) -> Result<GetParameterResponse, StoreError> {
        self.observe(
            ParameterOperation::GetParameter,
            vec![request.name.to_string()],
            None,
            self.inner.get_parameter(request),
            |response| (Some(usize::from(response.parameter.is_some())), None),
        )
    }

    fn get_parameters(
        &self,
        request: &GetParametersRequest,
    ) -> Result<GetParametersResponse, StoreError> {
        self.observe(
            ParameterOperation::GetParameters,
            request.names.iter().map(ToString::to_string).collect(),
            None,
            self.inner.get_parameters(request),
            |response| (Some(response.parameters.len()), None),
        )
    }

    fn get_parameters_by_path(
        &self,
        request: &GetParametersByPathRequest,
    ) -> Result<GetParametersByPathResponse, StoreError> {
        self.observe(
            ParameterOperation::GetParametersByPath,
            Vec::new(),
            Some(request.path.clone()),
            self.inner.get_parameters_by_path(request),
            |response| (Some(response.parameters.len()), None),
        )
    }

    fn delete_parameter(
        &self,
        request: &DeleteParameterRequest,
    ) -> Result<DeleteParameterResponse, StoreError> {
        self.observe(
            ParameterOperation::DeleteParameter,
            vec![request.name.to_string()],
            None,
            self.inner.delete_parameter(request),
            |_| (None, None),
        )
    }
}
