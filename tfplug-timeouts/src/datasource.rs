//! Timeouts for data sources: `read`

use crate::schema::{timeouts_attribute, timeouts_block, TimeoutField};
use crate::{TimeoutsType, READ};
use std::sync::Arc;
use std::time::Duration;
use tfplug::schema::{Attribute, CustomType, NestedBlock};
use tfplug::types::Diagnostics;

define_timeouts_kind!("datasource");

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Opts {
    pub read_description: Option<String>,
}

impl Opts {
    pub fn with_read_description(mut self, description: impl Into<String>) -> Self {
        self.read_description = Some(description.into());
        self
    }

    fn fields(&self) -> [TimeoutField<'_>; 1] {
        [(READ, self.read_description.as_deref())]
    }
}

fn timeouts_type() -> Arc<dyn CustomType> {
    Arc::new(Type(TimeoutsType::for_timeouts([READ])))
}

/// Single nested `timeouts` block with a `read` timeout
pub fn block() -> NestedBlock {
    block_with_opts(&Opts::default())
}

pub fn block_with_opts(opts: &Opts) -> NestedBlock {
    timeouts_block(&opts.fields(), Some(timeouts_type()))
}

/// Optional single nested `timeouts` attribute with a `read` timeout
pub fn attributes() -> Attribute {
    attributes_with_opts(&Opts::default())
}

pub fn attributes_with_opts(opts: &Opts) -> Attribute {
    timeouts_attribute(&opts.fields(), Some(timeouts_type()))
}

impl Value {
    pub fn read(&self, default: Duration) -> (Duration, Diagnostics) {
        self.timeout(READ, default)
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
    fn block_has_read_timeout() {
        let block = block();

        assert_eq!(block.type_name, "timeouts");
        assert_eq!(block.nesting, NestingMode::Single);
        let read = block.block.attribute("read").unwrap();
        assert!(read.optional);
        assert_eq!(read.description, DEFAULT_TIMEOUT_DESCRIPTION);
        assert_eq!(
            block.block.custom_type.as_ref().unwrap().terraform_type(),
            AttributeType::object([("read", AttributeType::String)])
        );
    }

    #[test]
    fn block_with_opts_overrides_description() {
        let block = block_with_opts(&Opts::default().with_read_description("read description"));
        assert_eq!(
            block.block.attribute("read").unwrap().description,
            "read description"
        );
    }

    #[test]
    fn attributes_have_read_timeout() {
        let attr = attributes();

        assert_eq!(attr.name, "timeouts");
        assert!(attr.optional);
        assert!(attr.nested_type.as_ref().unwrap().attribute("read").is_some());
        assert_eq!(
            attr.custom_type.as_ref().unwrap().type_name(),
            r#"datasource::TimeoutsType["read":string]"#
        );

        let attr = attributes_with_opts(&Opts::default().with_read_description("read description"));
        assert_eq!(
            attr.nested_type.unwrap().attributes[0].description,
            "read description"
        );
    }

    #[test]
    fn read_decodes_wire_value() {
        let wire = DynamicValue::new(Dynamic::Map(HashMap::from([(
            "read".to_string(),
            Dynamic::String("10m".to_string()),
        )])))
        .encode_msgpack()
        .unwrap();

        let value = Type(TimeoutsType::for_timeouts([READ]))
            .value_from_msgpack(&wire)
            .unwrap();
        assert_eq!(value.read(DEFAULT), (Duration::from_secs(600), Diagnostics::new()));
    }

    #[test]
    fn read_defaults_for_null_object() {
        let value = Type(TimeoutsType::for_timeouts([READ])).value_type();
        assert!(value.is_null());
        assert_eq!(value.read(DEFAULT), (DEFAULT, Diagnostics::new()));
    }
}
