// crates/pstore-core/tests/naming.rs
// ============================================================================
// Module: Naming Rule Tests
// Description: Unit and property tests for name and path validation.
// ============================================================================
//! ## Overview
//! Pins the service naming rules: allowed characters, hierarchy shape,
//! depth and length limits, and reserved prefixes.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use proptest::prelude::*;
use pstore_core::NamingError;
use pstore_core::core::naming::MAX_HIERARCHY_LEVELS;
use pstore_core::core::naming::MAX_NAME_CHARS;
use pstore_core::core::naming::path_prefix;
use pstore_core::core::naming::validate_parameter_name;
use pstore_core::core::naming::validate_parameter_path;

// ============================================================================
// SECTION: Names
// ============================================================================

/// Tests well-formed names are accepted.
#[test]
fn test_valid_names() {
    for name in ["db", "MyParam_1.v-2", "/app/db/password", "/a", "/Prod/x.y_z-1"] {
        assert_eq!(validate_parameter_name(name), Ok(()), "{name}");
    }
}

/// Tests each rule violation maps to its error.
#[test]
fn test_invalid_names() {
    assert_eq!(validate_parameter_name(""), Err(NamingError::Empty));
    assert_eq!(validate_parameter_name("has space"), Err(NamingError::InvalidCharacter(' ')));
    assert_eq!(validate_parameter_name("app/db"), Err(NamingError::MissingLeadingSlash));
    assert_eq!(validate_parameter_name("/app/"), Err(NamingError::TrailingSlash));
    assert_eq!(validate_parameter_name("/"), Err(NamingError::TrailingSlash));
    assert_eq!(validate_parameter_name("/app//db"), Err(NamingError::EmptySegment));
    assert_eq!(validate_parameter_name("awsConfig"), Err(NamingError::ReservedPrefix("aws")));
    assert_eq!(validate_parameter_name("/SSM/thing"), Err(NamingError::ReservedPrefix("ssm")));
}

/// Tests reserved prefixes only apply to the first level.
#[test]
fn test_reserved_prefix_only_first_level() {
    assert_eq!(validate_parameter_name("/app/aws"), Ok(()));
}

/// Tests length and depth limits.
#[test]
fn test_limits() {
    let longest = "a".repeat(MAX_NAME_CHARS);
    assert_eq!(validate_parameter_name(&longest), Ok(()));
    let too_long = "a".repeat(MAX_NAME_CHARS + 1);
    assert_eq!(
        validate_parameter_name(&too_long),
        Err(NamingError::TooLong {
            actual: MAX_NAME_CHARS + 1,
            max: MAX_NAME_CHARS,
        })
    );

    let deepest: String = (0..MAX_HIERARCHY_LEVELS).map(|level| format!("/l{level}")).collect();
    assert_eq!(validate_parameter_name(&deepest), Ok(()));
    let too_deep = format!("{deepest}/extra");
    assert_eq!(
        validate_parameter_name(&too_deep),
        Err(NamingError::TooDeep {
            actual: MAX_HIERARCHY_LEVELS + 1,
            max: MAX_HIERARCHY_LEVELS,
        })
    );
}

// ============================================================================
// SECTION: Paths
// ============================================================================

/// Tests path validation and prefix normalization.
#[test]
fn test_paths() {
    assert_eq!(validate_parameter_path("/"), Ok(()));
    assert_eq!(validate_parameter_path("/app"), Ok(()));
    assert_eq!(validate_parameter_path("/app/"), Ok(()));
    assert_eq!(validate_parameter_path(""), Err(NamingError::Empty));
    assert_eq!(validate_parameter_path("app"), Err(NamingError::MissingLeadingSlash));
    assert_eq!(validate_parameter_path("//"), Err(NamingError::EmptySegment));
    assert_eq!(validate_parameter_path("/a//b"), Err(NamingError::EmptySegment));

    assert_eq!(path_prefix("/"), "/");
    assert_eq!(path_prefix("/app"), "/app/");
    assert_eq!(path_prefix("/app/"), "/app/");
}

// ============================================================================
// SECTION: Properties
// ============================================================================

proptest! {
    /// Tests hierarchical names built from safe segments always validate.
    #[test]
    fn prop_safe_hierarchies_validate(
        segments in prop::collection::vec("[b-rt-z][a-z0-9_.-]{0,8}", 1..=MAX_HIERARCHY_LEVELS),
    ) {
        let name = format!("/{}", segments.join("/"));
        prop_assert_eq!(validate_parameter_name(&name), Ok(()));
        prop_assert_eq!(validate_parameter_path(&name), Ok(()));
    }

    /// Tests any disallowed character is reported.
    #[test]
    fn prop_disallowed_characters_rejected(
        prefix in "[b-z]{1,5}",
        bad in prop::char::any().prop_filter("disallowed", |ch| {
            !(ch.is_ascii_alphanumeric() || matches!(ch, '_' | '.' | '-' | '/'))
        }),
    ) {
        let name = format!("{prefix}{bad}");
        prop_assert_eq!(validate_parameter_name(&name), Err(NamingError::InvalidCharacter(bad)));
    }

    /// Tests validation never panics on arbitrary input.
    #[test]
    fn prop_arbitrary_input_is_total(input in ".{0,64}") {
        let _ = validate_parameter_name(&input);
        let _ = validate_parameter_path(&input);
    }
}
