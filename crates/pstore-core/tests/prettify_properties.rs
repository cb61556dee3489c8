// crates/pstore-core/tests/prettify_properties.rs
// ============================================================================
// Module: Pretty Printer Property Tests
// Description: Property tests for response rendering.
// ============================================================================
//! ## Overview
//! Checks rendering invariants over generated records: field order, omission
//! of absent fields, length-only binary output, and layout of sequences.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use proptest::prelude::*;
use pstore_core::Blob;
use pstore_core::GetParametersResponse;
use pstore_core::Parameter;
use pstore_core::ParameterName;
use pstore_core::ParameterType;
use pstore_core::prettify;

// ============================================================================
// SECTION: Strategies
// ============================================================================

/// Generates a parameter type.
fn parameter_type() -> impl Strategy<Value = ParameterType> {
    prop_oneof![
        Just(ParameterType::String),
        Just(ParameterType::StringList),
        Just(ParameterType::SecureString),
    ]
}

/// Generates a record with optional metadata.
fn parameter() -> impl Strategy<Value = Parameter> {
    (
        "/[a-z]{1,8}(/[a-z]{1,8}){0,3}",
        "[a-z0-9 ]{1,24}",
        parameter_type(),
        1i64..1000,
        proptest::option::of("[a-z:/0-9-]{1,20}"),
        proptest::option::of("[a-z]{1,8}"),
    )
        .prop_map(|(name, value, parameter_type, version, arn, data_type)| Parameter {
            arn,
            data_type,
            last_modified_date: None,
            name: ParameterName::new(name),
            selector: None,
            source_result: None,
            parameter_type,
            value,
            version,
        })
}

// ============================================================================
// SECTION: Properties
// ============================================================================

proptest! {
    /// Tests present fields keep declaration order and absent fields vanish.
    #[test]
    fn prop_record_fields_ordered_and_omitted(record in parameter()) {
        let text = prettify(&record);
        prop_assert!(text.starts_with("{\n"), "output must start with an opening brace line");
        prop_assert!(text.ends_with("\n}"), "output must end with a closing brace line");
        prop_assert!(!text.contains("Selector"));
        prop_assert!(!text.contains("SourceResult"));
        prop_assert!(!text.contains("LastModifiedDate"));
        prop_assert_eq!(text.contains("ARN: "), record.arn.is_some());
        prop_assert_eq!(text.contains("DataType: "), record.data_type.is_some());

        let name_at = text.find("  Name: ").unwrap();
        let type_at = text.find("  Type: ").unwrap();
        let value_at = text.find("  Value: ").unwrap();
        let version_at = text.find("  Version: ").unwrap();
        prop_assert!(name_at < type_at && type_at < value_at && value_at < version_at);
    }

    /// Tests byte buffers render their length and never their contents.
    #[test]
    fn prop_binary_renders_length(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let expected = format!("<binary> len {}", bytes.len());
        prop_assert_eq!(prettify(&Blob::new(bytes)), expected);
    }

    /// Tests sequence layout switches to one element per line above three.
    #[test]
    fn prop_sequence_layout(items in prop::collection::vec("[a-z]{1,4}", 0..8)) {
        let text = prettify(&items);
        if items.len() <= 3 {
            prop_assert!(!text.contains('\n'));
        } else {
            prop_assert_eq!(text.lines().count(), items.len() + 2);
        }
    }

    /// Tests every invalid name appears in the multi-name rendering.
    #[test]
    fn prop_invalid_names_rendered(names in prop::collection::vec("[A-Za-z]{1,10}", 1..6)) {
        let response = GetParametersResponse {
            invalid_parameters: names.clone(),
            parameters: Vec::new(),
        };
        let text = prettify(&response);
        for name in &names {
            let quoted = format!("\"{name}\"");
            prop_assert!(text.contains(&quoted));
        }
    }
}
