//! Timeouts for ephemeral resources: `open`

use crate::schema::{timeouts_attribute, timeouts_block, TimeoutField};
use crate::{TimeoutsType, OPEN};
use std::sync::Arc;
use std::time::Duration;
use tfplug::schema::{Attribute, CustomType, NestedBlock};
use tfplug::types::Diagnostics;

define_timeouts_kind!("ephemeral");

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Opts {
    pub open_description: Option<String>,
}

impl Opts {
    pub fn with_open_description(mut self, description: impl Into<String>) -> Self {
        self.open_description = Some(description.into());
        self
    }

    fn fields(&self) -> [TimeoutField<'_>; 1] {
        [(OPEN, self.open_description.as_deref())]
    }
}

fn timeouts_type() -> Arc<dyn CustomType> {
    Arc::new(Type(TimeoutsType::for_timeouts([OPEN])))
}

/// Single nested `timeouts` block with an `open` timeout
pub fn block() -> NestedBlock {
    block_with_opts(&Opts::default())
}

pub fn block_with_opts(opts: &Opts) -> NestedBlock {
    timeouts_block(&opts.fields(), Some(timeouts_type()))
}

/// Optional single nested `timeouts` attribute with an `open` timeout
pub fn attributes() -> Attribute {
    attributes_with_opts(&Opts::default())
}

pub fn attributes_with_opts(opts: &Opts) -> Attribute {
    timeouts_attribute(&opts.fields(), Some(timeouts_type()))
}

impl Value {
    pub fn open(&self, default: Duration) -> (Duration, Diagnostics) {
        self.timeout(OPEN, default)
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;
    use crate::DEFAULT_TIMEOUT_DESCRIPTION;
    use std::collections::HashMap;
    use tfplug::schema::{AttributeType, NestingMode};
    use tfplug::types::{Dynamic, DynamicValue};

    const DEFAULT: Duration = Duration::from_secs(20 * 60);

    #[test]
    fn block_has_open_timeout() {
        let block = block();

        assert_eq!(block.type_name, "timeouts");
        assert_eq!(block.nesting, NestingMode::Single);
        let open = block.block.attribute("open").unwrap();
        assert!(open.optional);
        assert_eq!(open.description, DEFAULT_TIMEOUT_DESCRIPTION);
        assert_eq!(
            block.block.custom_type.as_ref().unwrap().terraform_type(),
            AttributeType::object([("open", AttributeType::String)])
        );
    }

    #[test]
    fn block_with_opts_overrides_description() {
        let block = block_with_opts(&Opts::default().with_open_description("open description"));
        assert_eq!(
            block.block.attribute("open").unwrap().description,
            "open description"
        );
    }

    #[test]
    fn attributes_have_open_timeout() {
        let attr = attributes();

        assert_eq!(attr.name, "timeouts");
        assert!(attr.optional);
        assert!(attr.nested_type.as_ref().unwrap().attribute("open").is_some());
        assert_eq!(
            attr.custom_type.as_ref().unwrap().type_name(),
            r#"ephemeral::TimeoutsType["open":string]"#
        );

        let attr = attributes_with_opts(&Opts::default().with_open_description("open description"));
        assert_eq!(
            attr.nested_type.unwrap().attributes[0].description,
            "open description"
        );
    }

    #[test]
    fn open_decodes_wire_value() {
        let wire = DynamicValue::new(Dynamic::Map(HashMap::from([(
            "open".to_string(),
            Dynamic::String("10m".to_string()),
        )])))
        .encode_msgpack()
        .unwrap();

        let value = Type(TimeoutsType::for_timeouts([OPEN]))
            .value_from_msgpack(&wire)
            .unwrap();
        assert_eq!(value.open(DEFAULT), (Duration::from_secs(600), Diagnostics::new()));
    }

    #[test]
    fn open_defaults_for_unknown_object() {
        let value = Type(TimeoutsType::for_timeouts([OPEN]))
            .value_from_terraform(&Dynamic::Unknown)
            .unwrap();
        assert!(value.is_unknown());
        assert_eq!(value.to_string(), "<unknown>");
        assert_eq!(value.open(DEFAULT), (DEFAULT, Diagnostics::new()));
    }
}
