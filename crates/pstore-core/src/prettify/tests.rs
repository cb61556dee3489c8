// crates/pstore-core/src/prettify/tests.rs
// ============================================================================
// Module: Pretty Printer Tests
// Description: Unit tests for the indented text renderer.
// Purpose: Pin field ordering, omission, and scalar specializations.
// Dependencies: pstore-core, serde
// ============================================================================

//! ## Overview
//! Exercises the node serializer and renderer against hand-built values and
//! the crate's own response types.

// ============================================================================
// SECTION: Lint Configuration
// ============================================================================

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::panic,
    reason = "Test-only assertions favor direct unwrap/expect for clarity."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Serialize;

use super::*;
use crate::core::Blob;
use crate::core::DeleteParameterResponse;
use crate::core::GetParametersResponse;
use crate::core::Parameter;
use crate::core::ParameterName;
use crate::core::ParameterTier;
use crate::core::ParameterType;
use crate::core::PutParameterResponse;
use crate::core::Timestamp;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct Inner {
    label: String,
    count: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct Outer {
    zeta: bool,
    alpha: Inner,
    tags: Option<Vec<String>>,
    attributes: Option<BTreeMap<String, String>>,
    link: Option<Box<Inner>>,
    #[serde(skip)]
    #[allow(dead_code, reason = "Skipped field exists only to prove it is never rendered.")]
    hidden: u32,
}

#[derive(Serialize)]
enum Shape {
    Point,
    Circle(u32),
    Rect { width: u32, height: u32 },
}

fn sample_timestamp() -> Timestamp {
    Timestamp::parse_rfc3339("2024-03-05T10:11:12Z").unwrap()
}

// ============================================================================
// SECTION: Structures
// ============================================================================

#[test]
fn fields_render_in_declaration_order() {
    let value = Outer {
        zeta: true,
        alpha: Inner {
            label: "db".to_string(),
            count: 2,
        },
        tags: None,
        attributes: None,
        link: None,
        hidden: 7,
    };
    let text = prettify(&value);
    assert_eq!(text, "{\n  Zeta: true,\n  Alpha: {\n    Label: \"db\",\n    Count: 2\n  }\n}");
}

#[test]
fn absent_optional_fields_are_omitted() {
    let value = Outer {
        zeta: false,
        alpha: Inner {
            label: String::new(),
            count: 0,
        },
        tags: None,
        attributes: None,
        link: None,
        hidden: 1,
    };
    let text = prettify(&value);
    assert!(!text.contains("Tags"));
    assert!(!text.contains("Attributes"));
    assert!(!text.contains("Link"));
    assert!(!text.contains("Hidden"));
}

#[test]
fn present_optional_fields_render_nested() {
    let mut attributes = BTreeMap::new();
    attributes.insert("env".to_string(), "prod".to_string());
    let value = Outer {
        zeta: false,
        alpha: Inner {
            label: "a".to_string(),
            count: 1,
        },
        tags: Some(vec!["x".to_string()]),
        attributes: Some(attributes),
        link: Some(Box::new(Inner {
            label: "b".to_string(),
            count: 9,
        })),
        hidden: 0,
    };
    let text = prettify(&value);
    assert!(text.contains("  Tags: [\"x\"],\n"));
    assert!(text.contains("  Attributes: {\n    env: \"prod\"\n  },\n"));
    assert!(text.ends_with("  Link: {\n    Label: \"b\",\n    Count: 9\n  }\n}"));
}

#[test]
fn empty_structure_renders_braces() {
    assert_eq!(prettify(&DeleteParameterResponse {}), "{}");
}

#[test]
fn empty_nested_map_renders_braces() {
    #[derive(Serialize)]
    struct Holder {
        m: BTreeMap<String, u32>,
    }
    assert_eq!(prettify(&Holder { m: BTreeMap::new() }), "{\n  m: {}\n}");
}

// ============================================================================
// SECTION: Sequences
// ============================================================================

#[test]
fn short_sequences_render_inline() {
    assert_eq!(prettify(&vec![1u32, 2, 3]), "[1,2,3]");
    assert_eq!(prettify(&Vec::<u32>::new()), "[]");
}

#[test]
fn long_sequences_render_one_per_line() {
    let text = prettify(&vec!["a", "b", "c", "d"]);
    assert_eq!(text, "[\n  \"a\",\n  \"b\",\n  \"c\",\n  \"d\"\n]");
}

#[test]
fn nested_long_sequences_indent_from_parent() {
    #[derive(Serialize)]
    struct Wrapper {
        #[serde(rename = "Items")]
        items: Vec<u16>,
    }
    let text = prettify(&Wrapper {
        items: vec![1, 2, 3, 4],
    });
    assert_eq!(text, "{\n  Items: [\n    1,\n    2,\n    3,\n    4\n  ]\n}");
}

#[test]
fn absent_sequence_elements_render_placeholder() {
    assert_eq!(prettify(&vec![Some(1u32), None]), "[1,<invalid value>]");
}

// ============================================================================
// SECTION: Scalars
// ============================================================================

#[test]
fn byte_buffers_render_length_only() {
    assert_eq!(prettify(&Blob::new(vec![0xde, 0xad, 0xbe, 0xef, 0x00])), "<binary> len 5");
    assert_eq!(prettify(&vec![7u8; 12]), "<binary> len 12");
    assert_eq!(prettify(&Blob::default()), "<binary> len 0");
}

#[test]
fn blob_fields_render_length_only() {
    #[derive(Serialize)]
    #[serde(rename_all = "PascalCase")]
    struct Attachment {
        name: String,
        payload: Blob,
    }
    let attachment = Attachment {
        name: "cert".to_string(),
        payload: Blob::from(vec![1, 2, 3]),
    };
    assert_eq!(attachment.payload.len(), 3);
    assert_eq!(attachment.payload.as_bytes(), [1, 2, 3]);
    assert_eq!(prettify(&attachment), "{\n  Name: \"cert\",\n  Payload: <binary> len 3\n}");
}

#[test]
fn timestamps_render_as_plain_text() {
    let text = prettify(&sample_timestamp());
    assert_eq!(text, "2024-03-05T10:11:12Z");
}

#[test]
fn strings_are_quoted_and_escaped() {
    assert_eq!(prettify("plain"), "\"plain\"");
    assert_eq!(prettify("say \"hi\"\n"), "\"say \\\"hi\\\"\\n\"");
    assert_eq!(prettify("tab\there"), "\"tab\\there\"");
    assert_eq!(prettify("bell\u{7}"), "\"bell\\u{0007}\"");
    assert_eq!(prettify(&'c'), "\"c\"");
}

#[test]
fn enum_variants_render_by_shape() {
    assert_eq!(prettify(&Shape::Point), "\"Point\"");
    assert_eq!(prettify(&Shape::Circle(4)), "{\n  Circle: 4\n}");
    assert_eq!(
        prettify(&Shape::Rect {
            width: 2,
            height: 3
        }),
        "{\n  Rect: {\n    width: 2,\n    height: 3\n  }\n}"
    );
}

#[test]
fn bare_none_renders_placeholder() {
    assert_eq!(prettify(&Option::<u32>::None), "<invalid value>");
    assert_eq!(prettify(&()), "<invalid value>");
}

#[test]
fn unsupported_map_keys_are_reported() {
    let mut map = BTreeMap::new();
    map.insert(vec![1u32], "value");
    assert_eq!(try_prettify(&map), Err(PrettifyError::UnsupportedKey));
    assert!(prettify(&map).starts_with("<invalid value: "));
}

// ============================================================================
// SECTION: Response Types
// ============================================================================

#[test]
fn put_response_renders_tier_and_version() {
    let response = PutParameterResponse {
        tier: ParameterTier::Standard,
        version: 4,
    };
    assert_eq!(prettify(&response), "{\n  Tier: \"Standard\",\n  Version: 4\n}");
}

#[test]
fn multi_name_response_renders_service_fields() {
    let response = GetParametersResponse {
        invalid_parameters: vec!["InvalidParamName".to_string()],
        parameters: vec![Parameter {
            arn: None,
            data_type: Some("text".to_string()),
            last_modified_date: Some(sample_timestamp()),
            name: ParameterName::new("/app/db"),
            selector: None,
            source_result: None,
            parameter_type: ParameterType::SecureString,
            value: "secret".to_string(),
            version: 1,
        }],
    };
    let expected = "{\n  InvalidParameters: [\"InvalidParamName\"],\n  Parameters: [{\n      DataType: \
                    \"text\",\n      LastModifiedDate: 2024-03-05T10:11:12Z,\n      Name: \
                    \"/app/db\",\n      Type: \"SecureString\",\n      Value: \"secret\",\n      \
                    Version: 1\n    }]\n}";
    assert_eq!(prettify(&response), expected);
}
