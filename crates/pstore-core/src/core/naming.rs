// crates/pstore-core/src/core/naming.rs
// ============================================================================
// Module: Parameter Naming Rules
// Description: Validation of parameter names and hierarchy paths.
// Purpose: Reproduce the service's naming rules for offline stores.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! The remote service is the authority on naming; these checks exist so the
//! in-memory store rejects the same inputs the service would. Names are
//! either flat (`app-config`) or hierarchical (`/team/app/db-password`).

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum parameter name length in characters.
pub const MAX_NAME_CHARS: usize = 2048;
/// Maximum number of hierarchy levels in a name or path.
pub const MAX_HIERARCHY_LEVELS: usize = 15;
/// Name prefixes reserved by the service (case-insensitive).
const RESERVED_PREFIXES: &[&str] = &["aws", "ssm"];

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Naming rule violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamingError {
    /// Name or path is empty.
    #[error("parameter name must be non-empty")]
    Empty,
    /// Name exceeds the maximum length.
    #[error("parameter name exceeds {max} characters ({actual})")]
    TooLong {
        /// Actual length in characters.
        actual: usize,
        /// Maximum length in characters.
        max: usize,
    },
    /// Name contains a character outside `a-zA-Z0-9_.-/`.
    #[error("parameter name contains invalid character '{0}'")]
    InvalidCharacter(char),
    /// Hierarchical name or path does not start with `/`.
    #[error("hierarchical parameter names must start with '/'")]
    MissingLeadingSlash,
    /// Hierarchical name ends with `/`.
    #[error("parameter name must not end with '/'")]
    TrailingSlash,
    /// Hierarchy contains an empty level (`//`).
    #[error("parameter hierarchy contains an empty level")]
    EmptySegment,
    /// Hierarchy is too deep.
    #[error("parameter hierarchy exceeds {max} levels ({actual})")]
    TooDeep {
        /// Actual number of levels.
        actual: usize,
        /// Maximum number of levels.
        max: usize,
    },
    /// Name starts with a reserved prefix.
    #[error("parameter name must not start with reserved prefix '{0}'")]
    ReservedPrefix(&'static str),
}

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Validates a parameter name against the service naming rules.
///
/// # Errors
///
/// Returns [`NamingError`] describing the first rule the name violates.
pub fn validate_parameter_name(name: &str) -> Result<(), NamingError> {
    if name.is_empty() {
        return Err(NamingError::Empty);
    }
    let length = name.chars().count();
    if length > MAX_NAME_CHARS {
        return Err(NamingError::TooLong {
            actual: length,
            max: MAX_NAME_CHARS,
        });
    }
    validate_characters(name)?;
    let first_segment = if name.contains('/') {
        let Some(rest) = name.strip_prefix('/') else {
            return Err(NamingError::MissingLeadingSlash);
        };
        if rest.ends_with('/') || rest.is_empty() {
            return Err(NamingError::TrailingSlash);
        }
        validate_segments(rest)?;
        rest.split('/').next().unwrap_or(rest)
    } else {
        name
    };
    let lowered = first_segment.to_ascii_lowercase();
    for prefix in RESERVED_PREFIXES {
        if lowered.starts_with(prefix) {
            return Err(NamingError::ReservedPrefix(*prefix));
        }
    }
    Ok(())
}

/// Validates a hierarchy path used for prefix reads.
///
/// The root path `/` is valid, and a single trailing `/` is tolerated.
///
/// # Errors
///
/// Returns [`NamingError`] describing the first rule the path violates.
pub fn validate_parameter_path(path: &str) -> Result<(), NamingError> {
    if path.is_empty() {
        return Err(NamingError::Empty);
    }
    let Some(rest) = path.strip_prefix('/') else {
        return Err(NamingError::MissingLeadingSlash);
    };
    let length = path.chars().count();
    if length > MAX_NAME_CHARS {
        return Err(NamingError::TooLong {
            actual: length,
            max: MAX_NAME_CHARS,
        });
    }
    validate_characters(path)?;
    if rest.starts_with('/') {
        return Err(NamingError::EmptySegment);
    }
    let trimmed = rest.strip_suffix('/').unwrap_or(rest);
    if trimmed.is_empty() {
        return Ok(());
    }
    validate_segments(trimmed)
}

/// Normalizes a hierarchy path into a prefix ending with exactly one `/`.
#[must_use]
pub fn path_prefix(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    format!("{trimmed}/")
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Rejects characters outside the allowed set.
fn validate_characters(value: &str) -> Result<(), NamingError> {
    match value.chars().find(|ch| !is_allowed_char(*ch)) {
        Some(ch) => Err(NamingError::InvalidCharacter(ch)),
        None => Ok(()),
    }
}

/// Returns true for characters allowed in names and paths.
const fn is_allowed_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '_' | '.' | '-' | '/')
}

/// Checks that a slash-separated hierarchy has no empty levels and is shallow enough.
fn validate_segments(hierarchy: &str) -> Result<(), NamingError> {
    let mut levels = 0usize;
    for segment in hierarchy.split('/') {
        if segment.is_empty() {
            return Err(NamingError::EmptySegment);
        }
        levels += 1;
    }
    if levels > MAX_HIERARCHY_LEVELS {
        return Err(NamingError::TooDeep {
            actual: levels,
            max: MAX_HIERARCHY_LEVELS,
        });
    }
    Ok(())
}
