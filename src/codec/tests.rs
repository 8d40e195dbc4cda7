//! Tests for the body codec module

use super::*;
use crate::error::Error;
use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use serde_json::json;
use test_case::test_case;

// ============================================================================
// Request Body Tests
// ============================================================================

#[derive(Debug, Default, Serialize)]
struct PolicyOpts {
    name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    protocols: Vec<String>,
}

impl RequestBody for PolicyOpts {
    fn validate(&self) -> crate::Result<()> {
        require("name", &self.name)
    }
}

#[derive(Debug, Serialize)]
struct NodeOpts {
    count: u32,
    spec: NodeSpec,
}

#[derive(Debug, Serialize)]
struct NodeSpec {
    flavor: String,
}

impl RequestBody for NodeOpts {
    fn validate(&self) -> crate::Result<()> {
        require("count", &self.count)?;
        self.spec.validate()
    }
}

impl RequestBody for NodeSpec {
    fn validate(&self) -> crate::Result<()> {
        require("spec.flavor", &self.flavor)
    }
}

#[test]
fn test_build_request_body_wrapped() {
    let opts = PolicyOpts {
        name: "tls-strict".to_string(),
        protocols: vec!["TLSv1.2".to_string()],
        ..Default::default()
    };

    let body = build_request_body(&opts, "security_policy").unwrap();
    assert_eq!(
        body,
        json!({"security_policy": {"name": "tls-strict", "protocols": ["TLSv1.2"]}})
    );
}

#[test]
fn test_build_request_body_without_wrapper() {
    let opts = PolicyOpts {
        name: "p".to_string(),
        description: "d".to_string(),
        ..Default::default()
    };

    let body = build_request_body(&opts, "").unwrap();
    assert_eq!(body, json!({"name": "p", "description": "d"}));
}

#[test]
fn test_build_request_body_missing_required() {
    let err = build_request_body(&PolicyOpts::default(), "security_policy").unwrap_err();
    assert!(matches!(err, Error::Validation { ref field } if field == "name"));
}

#[test]
fn test_build_request_body_nested_required() {
    let opts = NodeOpts {
        count: 2,
        spec: NodeSpec {
            flavor: String::new(),
        },
    };
    let err = build_request_body(&opts, "spec").unwrap_err();
    assert!(matches!(err, Error::Validation { ref field } if field == "spec.flavor"));

    let opts = NodeOpts {
        count: 0,
        spec: NodeSpec {
            flavor: "s3.large.2".to_string(),
        },
    };
    let err = build_request_body(&opts, "spec").unwrap_err();
    assert!(matches!(err, Error::Validation { ref field } if field == "count"));
}

#[test]
fn test_build_request_body_from_map() {
    let body = build_request_body(&json!({"os-start": null}), "").unwrap();
    assert_eq!(body, json!({"os-start": null}));
}

#[test]
fn test_build_request_body_encoding_error() {
    use std::collections::HashMap;

    #[derive(Serialize)]
    struct BadKeys {
        map: HashMap<(u8, u8), String>,
    }
    impl RequestBody for BadKeys {}

    let mut map = HashMap::new();
    map.insert((1, 2), "x".to_string());
    let err = build_request_body(&BadKeys { map }, "").unwrap_err();
    assert!(matches!(err, Error::Encoding { .. }));
}

#[test_case("", true ; "empty string")]
#[test_case("x", false ; "non-empty string")]
fn test_is_zero_str(value: &str, expected: bool) {
    assert_eq!(value.is_zero(), expected);
}

#[test]
fn test_is_zero_values() {
    assert!(0u32.is_zero());
    assert!(!7i64.is_zero());
    assert!(0.0f64.is_zero());
    assert!(None::<String>.is_zero());
    assert!(Vec::<u8>::new().is_zero());
    assert!(!vec![1].is_zero());
    assert!(!true.is_zero());
    assert!(json!(null).is_zero());
    assert!(!json!({"a": 1}).is_zero());
}

// ============================================================================
// Extraction Tests
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
struct Thing {
    id: String,
    size: u32,
    #[serde(default)]
    tags: Vec<String>,
}

fn sample_thing() -> Thing {
    Thing {
        id: "t-1".to_string(),
        size: 40,
        tags: vec!["a".to_string(), "b".to_string()],
    }
}

#[test]
fn test_extract_into_whole_body() {
    let body = br#"{"id": "t-1", "size": 40, "tags": ["a", "b"]}"#;
    let thing: Thing = extract_into(body).unwrap();
    assert_eq!(thing, sample_thing());
}

#[test]
fn test_extract_into_malformed_json() {
    let err = extract_into::<Thing>(b"{not json").unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
}

#[test]
fn test_extract_into_type_mismatch() {
    let err = extract_into::<Thing>(br#"{"id": 1, "size": "big"}"#).unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
}

#[test]
fn test_extract_into_struct_wrapped_thing() {
    let original = sample_thing();
    let body = serde_json::to_vec(&json!({ "thing": original })).unwrap();

    let extracted: Thing = extract_into_struct(&body, "thing").unwrap();
    assert_eq!(extracted, original);
}

#[test]
fn test_extract_into_struct_missing_key() {
    let body = br#"{"other": {"id": "x", "size": 1}}"#;
    let err = extract_into_struct::<Thing>(body, "thing").unwrap_err();
    match err {
        Error::Shape { key, .. } => assert_eq!(key, "thing"),
        other => panic!("Expected Shape error, got {other:?}"),
    }
}

#[test]
fn test_extract_into_struct_wrong_kind() {
    let body = br#"{"thing": [1, 2, 3]}"#;
    let err = extract_into_struct::<Thing>(body, "thing").unwrap_err();
    assert!(matches!(err, Error::Shape { .. }));

    let err = extract_into_struct::<Thing>(b"[]", "thing").unwrap_err();
    assert!(matches!(err, Error::Shape { .. }));
}

#[test]
fn test_extract_into_struct_empty_key() {
    let body = br#"{"id": "t-9", "size": 1}"#;
    let thing: Thing = extract_into_struct(body, "").unwrap();
    assert_eq!(thing.id, "t-9");
}

#[test]
fn test_extract_into_slice() {
    let body = br#"{"things": [{"id": "a", "size": 1}, {"id": "b", "size": 2}], "things_links": []}"#;
    let things: Vec<Thing> = extract_into_slice(body, "things").unwrap();
    assert_eq!(things.len(), 2);
    assert_eq!(things[1].id, "b");
}

#[test]
fn test_extract_into_slice_null_is_empty() {
    let things: Vec<Thing> = extract_into_slice(br#"{"things": null}"#, "things").unwrap();
    assert!(things.is_empty());
}

#[test]
fn test_extract_into_slice_errors() {
    let err = extract_into_slice::<Thing>(br#"{"items": []}"#, "things").unwrap_err();
    assert!(matches!(err, Error::Shape { .. }));

    let err = extract_into_slice::<Thing>(br#"{"things": {"id": "a"}}"#, "things").unwrap_err();
    assert!(matches!(err, Error::Shape { .. }));

    let err = extract_into_slice::<Thing>(br#"{"things": [{"id": 5}]}"#, "things").unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
}

#[test]
fn test_extract_or_default_variants() {
    let thing: Thing = extract_into_struct_or_default(br#"{"other": 1}"#, "thing").unwrap();
    assert_eq!(thing, Thing::default());

    let things: Vec<Thing> = extract_into_slice_or_default(br"{}", "things").unwrap();
    assert!(things.is_empty());

    // Malformed JSON is never tolerated
    let err = extract_into_struct_or_default::<Thing>(b"<html>", "thing").unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
}
