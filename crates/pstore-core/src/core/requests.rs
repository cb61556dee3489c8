// crates/pstore-core/src/core/requests.rs
// ============================================================================
// Module: Parameter Requests
// Description: Request and response payloads for parameter-store operations.
// Purpose: Describe the single-round-trip calls issued against a store.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Each operation takes one request struct and returns one response struct.
//! Requests are plain Rust values; responses serialize with the service's
//! `PascalCase` field names so they can be rendered by
//! [`crate::prettify::prettify`] or written as JSON.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::ParameterName;
use crate::core::parameter::Parameter;
use crate::core::parameter::ParameterStringFilter;
use crate::core::parameter::ParameterTier;
use crate::core::parameter::ParameterType;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum number of names accepted by a multi-name read.
pub const MAX_NAMES_PER_REQUEST: usize = 10;
/// Maximum page size for path-prefix reads.
pub const MAX_RESULTS_PER_PAGE: u32 = 10;
/// Maximum value length for standard-tier records, in characters.
pub const MAX_STANDARD_VALUE_CHARS: usize = 4096;

// ============================================================================
// SECTION: Read One
// ============================================================================

/// Reads one record by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetParameterRequest {
    /// Record name.
    pub name: ParameterName,
    /// Return secure values in plaintext.
    pub with_decryption: bool,
}

/// Response for a single-record read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetParameterResponse {
    /// Record returned by the service.
    pub parameter: Option<Parameter>,
}

// ============================================================================
// SECTION: Read By List
// ============================================================================

/// Reads several records by explicit name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetParametersRequest {
    /// Record names, at most [`MAX_NAMES_PER_REQUEST`].
    pub names: Vec<ParameterName>,
    /// Return secure values in plaintext.
    pub with_decryption: bool,
}

/// Response for a multi-name read.
///
/// # Invariants
/// - Unknown names appear in `invalid_parameters` and never fail the call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetParametersResponse {
    /// Requested names that do not exist or are malformed.
    pub invalid_parameters: Vec<String>,
    /// Records found, in request order.
    pub parameters: Vec<Parameter>,
}

// ============================================================================
// SECTION: Read By Path
// ============================================================================

/// Reads records under a hierarchical path prefix (single page).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetParametersByPathRequest {
    /// Path prefix, starting with `/`.
    pub path: String,
    /// Include every level below the path instead of just the next one.
    pub recursive: bool,
    /// Attribute filters applied to matching records.
    pub parameter_filters: Vec<ParameterStringFilter>,
    /// Page size; the service default applies when absent.
    pub max_results: Option<u32>,
    /// Return secure values in plaintext.
    pub with_decryption: bool,
}

/// Response for a path-prefix read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetParametersByPathResponse {
    /// Continuation token reported by the service; never followed.
    pub next_token: Option<String>,
    /// Records in this page.
    pub parameters: Vec<Parameter>,
}

// ============================================================================
// SECTION: Create Or Update
// ============================================================================

/// Creates or updates a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutParameterRequest {
    /// Record name.
    pub name: ParameterName,
    /// Value payload.
    pub value: String,
    /// Type tag; required when creating a new record.
    pub parameter_type: Option<ParameterType>,
    /// Replace an existing record with the same name.
    pub overwrite: bool,
    /// Optional description.
    pub description: Option<String>,
    /// Key used to encrypt secure values; the service default applies when absent.
    pub key_id: Option<String>,
}

/// Response for a create-or-update call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PutParameterResponse {
    /// Storage tier of the record.
    pub tier: ParameterTier,
    /// New version number.
    pub version: i64,
}

// ============================================================================
// SECTION: Delete
// ============================================================================

/// Deletes one record by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteParameterRequest {
    /// Record name.
    pub name: ParameterName,
}

/// Response for a delete call (carries no fields).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeleteParameterResponse {}
