// crates/pstore-core/src/core/time.rs
// ============================================================================
// Module: Parameter Time Model
// Description: Timestamp wrapper for last-modified metadata.
// Purpose: Serialize record timestamps as RFC 3339 text.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! [`Timestamp`] wraps [`OffsetDateTime`] and serializes as RFC 3339 text. It
//! serializes through a marked newtype so the pretty-printer can render it as
//! plain text instead of expanding it; JSON and TOML see an ordinary string.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::Error as _;
use serde::ser::Error as _;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::prettify::TIMESTAMP_TOKEN;

// ============================================================================
// SECTION: Time Values
// ============================================================================

/// Wall-clock timestamp attached to parameter records.
///
/// # Invariants
/// - Values round-trip through RFC 3339 text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(OffsetDateTime);

impl Timestamp {
    /// Wraps an existing date-time value.
    #[must_use]
    pub const fn new(value: OffsetDateTime) -> Self {
        Self(value)
    }

    /// Returns the current UTC time.
    #[must_use]
    pub fn now_utc() -> Self {
        Self(OffsetDateTime::now_utc())
    }

    /// Builds a timestamp from nanoseconds since the Unix epoch.
    ///
    /// # Errors
    ///
    /// Returns [`time::error::ComponentRange`] when the value is out of range.
    pub fn from_unix_nanos(nanos: i128) -> Result<Self, time::error::ComponentRange> {
        OffsetDateTime::from_unix_timestamp_nanos(nanos).map(Self)
    }

    /// Parses an RFC 3339 timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`time::error::Parse`] when the text is not valid RFC 3339.
    pub fn parse_rfc3339(value: &str) -> Result<Self, time::error::Parse> {
        OffsetDateTime::parse(value, &Rfc3339).map(Self)
    }

    /// Formats the timestamp as RFC 3339 text.
    ///
    /// # Errors
    ///
    /// Returns [`time::error::Format`] when the value cannot be represented.
    pub fn to_rfc3339(&self) -> Result<String, time::error::Format> {
        self.0.format(&Rfc3339)
    }

    /// Returns the wrapped date-time value.
    #[must_use]
    pub const fn as_offset_date_time(&self) -> OffsetDateTime {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.to_rfc3339().map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl From<OffsetDateTime> for Timestamp {
    fn from(value: OffsetDateTime) -> Self {
        Self(value)
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let text = self.to_rfc3339().map_err(S::Error::custom)?;
        serializer.serialize_newtype_struct(TIMESTAMP_TOKEN, &text)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        Self::parse_rfc3339(&text).map_err(D::Error::custom)
    }
}
