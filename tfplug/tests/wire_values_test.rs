//! Tests for config values as they arrive from Terraform: wire decoding,
//! path navigation and schema validation over nested blocks

#![allow(clippy::disallowed_methods)] // Allow unwrap() in tests for clarity

use std::collections::HashMap;
use std::sync::Arc;
use tfplug::types::{AttributePath, Dynamic, DynamicValue};
use tfplug::{
    AttributeBuilder, Block, NestedBlock, NestingMode, SchemaBuilder, TfplugError, Validator,
    ValidatorRequest, ValidatorResponse,
};
use tokio_test::{assert_err, assert_ok};

struct NoSpaces;

impl Validator for NoSpaces {
    fn description(&self) -> String {
        "must not contain spaces".to_string()
    }

    fn validate(&self, request: ValidatorRequest) -> ValidatorResponse {
        let mut response = ValidatorResponse::default();
        if let Some(s) = request.config_value.value.as_string() {
            if s.contains(' ') {
                response.diagnostics.push(tfplug::Diagnostic::attribute_error(
                    request.path,
                    "Invalid Value",
                    format!("{:?} {}", s, self.description()),
                ));
            }
        }
        response
    }
}

fn disk_block(nesting: NestingMode) -> NestedBlock {
    NestedBlock {
        type_name: "disk".to_string(),
        block: Block {
            attributes: vec![AttributeBuilder::string("label")
                .optional()
                .validator(Arc::new(NoSpaces))
                .build()],
            ..Block::default()
        },
        nesting,
        min_items: 0,
        max_items: 0,
    }
}

fn disk(label: &str) -> Dynamic {
    Dynamic::Map(HashMap::from([(
        "label".to_string(),
        Dynamic::String(label.to_string()),
    )]))
}

#[test]
fn msgpack_preserves_unknown_and_null() {
    let value = DynamicValue::new(Dynamic::Map(HashMap::from([
        ("id".to_string(), Dynamic::Unknown),
        ("name".to_string(), Dynamic::Null),
        ("cores".to_string(), Dynamic::Number(4.0)),
    ])));

    let wire = assert_ok!(value.encode_msgpack());
    let decoded = assert_ok!(DynamicValue::decode_msgpack(&wire));

    assert!(assert_ok!(decoded.get(&AttributePath::new("id"))).is_unknown());
    assert!(assert_ok!(decoded.get(&AttributePath::new("name"))).is_null());
    assert_eq!(decoded, value);
}

#[test]
fn null_value_is_empty_on_the_wire() {
    let wire = assert_ok!(DynamicValue::null().encode_msgpack());
    assert!(wire.is_empty());
    assert!(assert_ok!(DynamicValue::decode_msgpack(&wire)).is_null());
}

#[test]
fn corrupt_msgpack_is_a_decoding_error() {
    let err = assert_err!(DynamicValue::decode_msgpack(&[0xc1]));
    assert!(matches!(err, TfplugError::DecodingError(_)));
}

#[test]
fn json_round_trip_keeps_structure() {
    let value = DynamicValue::new(Dynamic::List(vec![disk("boot"), disk("data")]));
    let json = assert_ok!(value.encode_json());
    let decoded = assert_ok!(DynamicValue::decode_json(&json));

    let label = assert_ok!(decoded.get_string(&AttributePath::root().index(1).attribute("label")));
    assert_eq!(label, "data");
}

#[test]
fn validation_reports_list_block_paths() {
    let schema = SchemaBuilder::new().block(disk_block(NestingMode::List)).build();
    let config = DynamicValue::new(Dynamic::Map(HashMap::from([(
        "disk".to_string(),
        Dynamic::List(vec![disk("boot"), disk("scratch space")]),
    )])));

    let diags = schema.validate(&config);
    assert_eq!(diags.len(), 1);
    assert_eq!(
        diags.errors[0].attribute.as_ref().unwrap().to_string(),
        "disk[1].label"
    );
}

#[test]
fn validation_reports_map_block_paths() {
    let schema = SchemaBuilder::new().block(disk_block(NestingMode::Map)).build();
    let config = DynamicValue::new(Dynamic::Map(HashMap::from([(
        "disk".to_string(),
        Dynamic::Map(HashMap::from([("scsi0".to_string(), disk("os disk"))])),
    )])));

    let diags = schema.validate(&config);
    assert_eq!(
        diags.errors[0].attribute.as_ref().unwrap().to_string(),
        r#"disk["scsi0"].label"#
    );
}

#[test]
fn validation_skips_unknown_blocks() {
    let schema = SchemaBuilder::new().block(disk_block(NestingMode::Single)).build();
    let config = DynamicValue::new(Dynamic::Map(HashMap::from([(
        "disk".to_string(),
        Dynamic::Unknown,
    )])));

    assert!(schema.validate(&config).is_empty());
}
