// crates/pstore-core/src/core/parameter.rs
// ============================================================================
// Module: Parameter Records
// Description: Parameter record model mirrored from the remote service.
// Purpose: Hold transient, request-scoped copies of parameter-store records.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Records are owned by the remote service; this crate only holds transient
//! copies returned by a call. Field names serialize in the service's
//! `PascalCase` form and are declared in the service's order so rendered
//! output reads the same as the service documentation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use serde::Serializer;

use crate::core::identifiers::ParameterName;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Parameter Type
// ============================================================================

/// Value type tag attached to every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterType {
    /// Plain text value.
    String,
    /// Comma-separated list of plain text values.
    StringList,
    /// Value encrypted at rest; plaintext requires decryption on read.
    SecureString,
}

impl ParameterType {
    /// Returns the service wire name for the type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "String",
            Self::StringList => "StringList",
            Self::SecureString => "SecureString",
        }
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParameterType {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "String" => Ok(Self::String),
            "StringList" => Ok(Self::StringList),
            "SecureString" => Ok(Self::SecureString),
            other => Err(UnknownVariant::new("parameter type", other)),
        }
    }
}

// ============================================================================
// SECTION: Parameter Tier
// ============================================================================

/// Storage tier reported by the service after a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ParameterTier {
    /// Standard tier (default).
    #[default]
    Standard,
    /// Advanced tier.
    Advanced,
    /// Service-selected tier.
    #[serde(rename = "Intelligent-Tiering")]
    IntelligentTiering,
}

impl ParameterTier {
    /// Returns the service wire name for the tier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Advanced => "Advanced",
            Self::IntelligentTiering => "Intelligent-Tiering",
        }
    }
}

impl FromStr for ParameterTier {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Standard" => Ok(Self::Standard),
            "Advanced" => Ok(Self::Advanced),
            "Intelligent-Tiering" => Ok(Self::IntelligentTiering),
            other => Err(UnknownVariant::new("parameter tier", other)),
        }
    }
}

/// Error returned when a wire name does not match a known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    /// Enumeration being parsed.
    kind: &'static str,
    /// Rejected input.
    value: String,
}

impl UnknownVariant {
    /// Builds a new unknown-variant error.
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

// ============================================================================
// SECTION: Records
// ============================================================================

/// Transient copy of a parameter-store record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Parameter {
    /// Resource name assigned by the service.
    #[serde(rename = "ARN")]
    pub arn: Option<String>,
    /// Data type hint (`text` unless set otherwise).
    pub data_type: Option<String>,
    /// Last modification time.
    pub last_modified_date: Option<Timestamp>,
    /// Record name.
    pub name: ParameterName,
    /// Version or label selector used in the request, if any.
    pub selector: Option<String>,
    /// Source reference for values resolved from other services.
    pub source_result: Option<String>,
    /// Value type tag.
    #[serde(rename = "Type")]
    pub parameter_type: ParameterType,
    /// Value payload (ciphertext when a secure value was read without decryption).
    pub value: String,
    /// Version number maintained by the service.
    pub version: i64,
}

/// Filter applied to path-prefix reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ParameterStringFilter {
    /// Attribute the filter applies to (for example `Type`).
    pub key: String,
    /// Comparison option (`Equals` when absent).
    pub option: Option<String>,
    /// Accepted values for the attribute.
    pub values: Vec<String>,
}

impl ParameterStringFilter {
    /// Builds an `Equals` filter restricting results to one parameter type.
    #[must_use]
    pub fn type_equals(parameter_type: ParameterType) -> Self {
        Self {
            key: "Type".to_string(),
            option: Some("Equals".to_string()),
            values: vec![parameter_type.as_str().to_string()],
        }
    }
}

// ============================================================================
// SECTION: Binary Buffers
// ============================================================================

/// Opaque binary payload that serializes as raw bytes.
///
/// None of the five service responses carries binary data. `Blob` is the
/// byte-buffer carrier for caller-defined values passed to
/// [`crate::prettify::prettify`], which renders it as `<binary> len N`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Blob(Vec<u8>);

impl Blob {
    /// Wraps a byte buffer.
    #[must_use]
    pub const fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Returns the buffer contents.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the buffer length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for Blob {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl Serialize for Blob {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bytes(&self.0)
    }
}
