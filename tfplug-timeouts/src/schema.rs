//! Schema fragments shared by every timeouts kind

use crate::validators::time_duration;
use crate::ATTRIBUTE_NAME;
use std::sync::Arc;
use tfplug::schema::{Attribute, AttributeBuilder, Block, CustomType, NestedBlock};

pub const DEFAULT_TIMEOUT_DESCRIPTION: &str = concat!(
    r#"A string that can be [parsed as a duration](https://pkg.go.dev/time#ParseDuration) "#,
    r#"consisting of numbers and unit suffixes, such as "30s" or "2h45m". Valid time units are "#,
    r#""s" (seconds), "m" (minutes), "h" (hours)."#,
);

/// A timeout name and its description override
pub(crate) type TimeoutField<'a> = (&'static str, Option<&'a str>);

/// Optional string attribute for one timeout. Empty descriptions fall back to the default.
pub(crate) fn timeout_attribute(name: &str, description: Option<&str>) -> Attribute {
    let description = description
        .filter(|d| !d.is_empty())
        .unwrap_or(DEFAULT_TIMEOUT_DESCRIPTION);

    AttributeBuilder::string(name)
        .description(description)
        .optional()
        .validator(time_duration())
        .build()
}

fn timeout_attributes(fields: &[TimeoutField<'_>]) -> Vec<Attribute> {
    fields
        .iter()
        .map(|(name, description)| timeout_attribute(name, *description))
        .collect()
}

pub(crate) fn timeouts_block(
    fields: &[TimeoutField<'_>],
    custom_type: Option<Arc<dyn CustomType>>,
) -> NestedBlock {
    let block = Block {
        attributes: timeout_attributes(fields),
        custom_type,
        ..Block::default()
    };
    NestedBlock::single(ATTRIBUTE_NAME, block)
}

pub(crate) fn timeouts_attribute(
    fields: &[TimeoutField<'_>],
    custom_type: Option<Arc<dyn CustomType>>,
) -> Attribute {
    let builder =
        AttributeBuilder::single_nested(ATTRIBUTE_NAME, timeout_attributes(fields)).optional();
    match custom_type {
        Some(custom) => builder.custom_type(custom).build(),
        None => builder.build(),
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;
    use tfplug::schema::{AttributeType, NestingMode};

    #[test]
    fn timeout_attribute_uses_default_description() {
        for description in [None, Some("")] {
            let attr = timeout_attribute("create", description);
            assert_eq!(attr.name, "create");
            assert_eq!(attr.r#type, AttributeType::String);
            assert!(attr.optional);
            assert!(!attr.required);
            assert!(!attr.computed);
            assert_eq!(attr.description, DEFAULT_TIMEOUT_DESCRIPTION);
            assert_eq!(attr.validators.len(), 1);
        }
    }

    #[test]
    fn timeout_attribute_keeps_custom_description() {
        let attr = timeout_attribute("read", Some("read description"));
        assert_eq!(attr.description, "read description");
    }

    #[test]
    fn block_without_custom_type_uses_object_type() {
        let block = timeouts_block(&[("create", None), ("delete", None)], None);

        assert_eq!(block.type_name, "timeouts");
        assert_eq!(block.nesting, NestingMode::Single);
        assert!(block.block.custom_type.is_none());
        assert_eq!(
            block.attribute_type(),
            AttributeType::object([
                ("create", AttributeType::String),
                ("delete", AttributeType::String),
            ])
        );
    }

    #[test]
    fn attribute_is_optional_single_nested() {
        let attr = timeouts_attribute(&[("open", None)], None);

        assert_eq!(attr.name, "timeouts");
        assert!(attr.optional);
        assert!(attr.custom_type.is_none());
        let nested = attr.nested_type.as_ref().unwrap();
        assert!(nested.attribute("open").is_some());
        assert_eq!(attr.r#type, AttributeType::object([("open", AttributeType::String)]));
    }

    #[test]
    fn default_description_text() {
        assert_eq!(
            DEFAULT_TIMEOUT_DESCRIPTION,
            r#"A string that can be [parsed as a duration](https://pkg.go.dev/time#ParseDuration) consisting of numbers and unit suffixes, such as "30s" or "2h45m". Valid time units are "s" (seconds), "m" (minutes), "h" (hours)."#
        );
    }
}
