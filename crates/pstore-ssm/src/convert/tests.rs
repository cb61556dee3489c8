// crates/pstore-ssm/src/convert/tests.rs
// ============================================================================
// Module: SSM Conversion Tests
// Description: Unit tests for SDK-to-core mapping.
// Purpose: Pin field mapping and rejection of unknown enumerations.
// Dependencies: aws-sdk-ssm, pstore-core
// ============================================================================

//! ## Overview
//! Builds SDK shapes directly and checks the core values they map to.

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::panic,
    reason = "Test-only assertions favor direct unwrap/expect for clarity."
)]

use super::*;

/// Tests a fully populated record maps every field.
#[test]
fn record_fields_map_through() {
    let sdk = SdkParameter::builder()
        .name("/app/db")
        .r#type(SdkParameterType::SecureString)
        .value("secret")
        .version(3)
        .arn("arn:aws:ssm:us-east-1:123456789012:parameter/app/db")
        .data_type("text")
        .last_modified_date(DateTime::from_secs(1_709_633_472))
        .build();
    let parameter = from_sdk_parameter(&sdk).unwrap();
    assert_eq!(parameter.name.as_str(), "/app/db");
    assert_eq!(parameter.parameter_type, ParameterType::SecureString);
    assert_eq!(parameter.value, "secret");
    assert_eq!(parameter.version, 3);
    assert_eq!(parameter.data_type.as_deref(), Some("text"));
    assert_eq!(parameter.selector, None);
    assert_eq!(
        parameter.last_modified_date.unwrap().to_rfc3339().unwrap(),
        "2024-03-05T10:11:12Z"
    );
}

/// Tests records without a name or type are rejected.
#[test]
fn incomplete_records_are_backend_errors() {
    let nameless = SdkParameter::builder().r#type(SdkParameterType::String).build();
    assert!(matches!(from_sdk_parameter(&nameless), Err(StoreError::Backend(_))));

    let untyped = SdkParameter::builder().name("x").build();
    assert!(matches!(from_sdk_parameter(&untyped), Err(StoreError::Backend(_))));
}

/// Tests type tags round through their wire names.
#[test]
fn type_tags_use_wire_names() {
    for parameter_type in [ParameterType::String, ParameterType::StringList, ParameterType::SecureString] {
        assert_eq!(from_sdk_type(&to_sdk_type(parameter_type)).unwrap(), parameter_type);
    }
    assert_eq!(to_sdk_type(ParameterType::SecureString), SdkParameterType::SecureString);
    assert!(from_sdk_type(&SdkParameterType::from("Binary")).is_err());
}

/// Tests tier mapping and the standard default.
#[test]
fn tiers_map_and_default() {
    assert_eq!(from_sdk_tier(None).unwrap(), ParameterTier::Standard);
    assert_eq!(
        from_sdk_tier(Some(&SdkParameterTier::IntelligentTiering)).unwrap(),
        ParameterTier::IntelligentTiering
    );
    assert_eq!(from_sdk_tier(Some(&SdkParameterTier::Advanced)).unwrap(), ParameterTier::Advanced);
}

/// Tests path filters carry key, option, and values.
#[test]
fn filters_map_to_sdk() {
    let filter = to_sdk_filter(&ParameterStringFilter::type_equals(ParameterType::SecureString)).unwrap();
    assert_eq!(filter.key(), "Type");
    assert_eq!(filter.option(), Some("Equals"));
    assert_eq!(filter.values(), ["SecureString".to_string()]);
}
