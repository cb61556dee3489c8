// crates/pstore-core/src/core/identifiers.rs
// ============================================================================
// Module: Parameter Identifiers
// Description: Opaque identifiers for parameter-store records.
// Purpose: Provide strongly typed, serializable names with stable string forms.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Parameter names are opaque strings. Validation of the hierarchical naming
//! rules lives in [`crate::core::naming`] and is applied at store boundaries
//! rather than within this wrapper, since the remote service is the
//! authority on what it accepts.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

/// Name of a parameter-store record (plain or slash-delimited hierarchy).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterName(String);

impl ParameterName {
    /// Creates a new parameter name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true when the name belongs to a path hierarchy.
    #[must_use]
    pub fn is_hierarchical(&self) -> bool {
        self.0.starts_with('/')
    }
}

impl fmt::Display for ParameterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for ParameterName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ParameterName {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl AsRef<str> for ParameterName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
