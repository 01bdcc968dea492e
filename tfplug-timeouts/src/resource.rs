//! Timeouts for managed resources: `create`, `read`, `update` and `delete`

use crate::schema::{timeouts_attribute, timeouts_block, TimeoutField};
use crate::{TimeoutsType, CREATE, DELETE, READ, UPDATE};
use std::sync::Arc;
use std::time::Duration;
use tfplug::schema::{Attribute, CustomType, NestedBlock};
use tfplug::types::Diagnostics;

define_timeouts_kind!("resource");

/// Selects which timeouts appear in the schema, with optional description overrides
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Opts {
    pub create: bool,
    pub read: bool,
    pub update: bool,
    pub delete: bool,
    pub create_description: Option<String>,
    pub read_description: Option<String>,
    pub update_description: Option<String>,
    pub delete_description: Option<String>,
}

impl Opts {
    /// All four timeouts with default descriptions
    pub fn all() -> Self {
        Self {
            create: true,
            read: true,
            update: true,
            delete: true,
            ..Self::default()
        }
    }

    pub fn with_create(mut self) -> Self {
        self.create = true;
        self
    }

    pub fn with_read(mut self) -> Self {
        self.read = true;
        self
    }

    pub fn with_update(mut self) -> Self {
        self.update = true;
        self
    }

    pub fn with_delete(mut self) -> Self {
        self.delete = true;
        self
    }

    pub fn with_create_description(mut self, description: impl Into<String>) -> Self {
        self.create = true;
        self.create_description = Some(description.into());
        self
    }

    pub fn with_read_description(mut self, description: impl Into<String>) -> Self {
        self.read = true;
        self.read_description = Some(description.into());
        self
    }

    pub fn with_update_description(mut self, description: impl Into<String>) -> Self {
        self.update = true;
        self.update_description = Some(description.into());
        self
    }

    pub fn with_delete_description(mut self, description: impl Into<String>) -> Self {
        self.delete = true;
        self.delete_description = Some(description.into());
        self
    }

    fn fields(&self) -> Vec<TimeoutField<'_>> {
        [
            (CREATE, self.create, &self.create_description),
            (READ, self.read, &self.read_description),
            (UPDATE, self.update, &self.update_description),
            (DELETE, self.delete, &self.delete_description),
        ]
        .into_iter()
        .filter(|(_, enabled, _)| *enabled)
        .map(|(name, _, description)| (name, description.as_deref()))
        .collect()
    }

    fn custom_type(&self) -> Arc<dyn CustomType> {
        Arc::new(Type(TimeoutsType::for_timeouts(
            self.fields().into_iter().map(|(name, _)| name),
        )))
    }
}

/// Single nested `timeouts` block holding the timeouts selected by `opts`
pub fn block(opts: &Opts) -> NestedBlock {
    timeouts_block(&opts.fields(), Some(opts.custom_type()))
}

pub fn block_all() -> NestedBlock {
    block(&Opts::all())
}

/// Optional single nested `timeouts` attribute holding the timeouts selected by `opts`
pub fn attributes(opts: &Opts) -> Attribute {
    timeouts_attribute(&opts.fields(), Some(opts.custom_type()))
}

pub fn attributes_all() -> Attribute {
    attributes(&Opts::all())
}

impl Value {
    pub fn create(&self, default: Duration) -> (Duration, Diagnostics) {
        self.timeout(CREATE, default)
    }

    pub fn read(&self, default: Duration) -> (Duration, Diagnostics) {
        self.timeout(READ, default)
    }

    pub fn update(&self, default: Duration) -> (Duration, Diagnostics) {
        self.timeout(UPDATE, default)
    }

    pub fn delete(&self, default: Duration) -> (Duration, Diagnostics) {
        self.timeout(DELETE, default)
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;
    use crate::DEFAULT_TIMEOUT_DESCRIPTION;
    use std::collections::HashMap;
    use tfplug::schema::{AttributeType, NestingMode};
    use tfplug::types::Dynamic;

    const DEFAULT: Duration = Duration::from_secs(20 * 60);

    fn decode(entries: &[(&str, &str)]) -> Value {
        let map = entries
            .iter()
            .map(|(name, value)| (name.to_string(), Dynamic::String(value.to_string())))
            .collect::<HashMap<_, _>>();
        Type(TimeoutsType::for_timeouts([CREATE, READ, UPDATE, DELETE]))
            .value_from_terraform(&Dynamic::Map(map))
            .unwrap()
    }

    #[test]
    fn block_with_empty_opts_has_no_attributes() {
        let block = block(&Opts::default());

        assert_eq!(block.type_name, "timeouts");
        assert_eq!(block.nesting, NestingMode::Single);
        assert!(block.block.attributes.is_empty());
        assert_eq!(block.attribute_type(), AttributeType::object(Vec::<(String, _)>::new()));
    }

    #[test]
    fn block_with_create_and_update() {
        let block = block(&Opts::default().with_create().with_update());

        let names: Vec<_> = block.block.attributes.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["create", "update"]);
        for attr in &block.block.attributes {
            assert!(attr.optional);
            assert_eq!(attr.description, DEFAULT_TIMEOUT_DESCRIPTION);
            assert_eq!(attr.validators.len(), 1);
        }

        let custom = block.block.custom_type.as_ref().unwrap();
        assert_eq!(
            custom.terraform_type(),
            AttributeType::object([
                ("create", AttributeType::String),
                ("update", AttributeType::String),
            ])
        );
        assert_eq!(
            custom.type_name(),
            r#"resource::TimeoutsType["create":string, "update":string]"#
        );
    }

    #[test]
    fn block_uses_description_overrides() {
        let block = block(
            &Opts::default()
                .with_create_description("create description")
                .with_update_description("update description"),
        );

        assert_eq!(
            block.block.attribute("create").unwrap().description,
            "create description"
        );
        assert_eq!(
            block.block.attribute("update").unwrap().description,
            "update description"
        );
        assert!(block.block.attribute("read").is_none());
    }

    #[test]
    fn block_all_has_every_timeout() {
        let block = block_all();
        for name in [CREATE, READ, UPDATE, DELETE] {
            assert!(block.block.attribute(name).is_some(), "missing {name}");
        }
    }

    #[test]
    fn attributes_carry_custom_type() {
        let attr = attributes(&Opts::default().with_read().with_delete());

        assert_eq!(attr.name, "timeouts");
        assert!(attr.optional);
        let nested = attr.nested_type.as_ref().unwrap();
        assert!(nested.attribute("read").is_some());
        assert!(nested.attribute("delete").is_some());
        assert!(nested.attribute("create").is_none());
        assert_eq!(
            attr.custom_type.as_ref().unwrap().terraform_type(),
            attr.r#type
        );
    }

    #[test]
    fn attributes_all_has_every_timeout() {
        let attr = attributes_all();
        assert_eq!(attr.nested_type.unwrap().attributes.len(), 4);
    }

    #[test]
    fn accessors_read_configured_values() {
        let value = decode(&[("create", "60m"), ("read", "30m"), ("update", "10m"), ("delete", "25m")]);

        assert_eq!(value.create(DEFAULT).0, Duration::from_secs(60 * 60));
        assert_eq!(value.read(DEFAULT).0, Duration::from_secs(30 * 60));
        assert_eq!(value.update(DEFAULT).0, Duration::from_secs(10 * 60));
        assert_eq!(value.delete(DEFAULT).0, Duration::from_secs(25 * 60));
    }

    #[test]
    fn accessors_fall_back_to_default() {
        let value = decode(&[("read", "30m")]);

        let (timeout, diags) = value.create(DEFAULT);
        assert_eq!(timeout, DEFAULT);
        assert!(diags.is_empty());

        let (timeout, diags) = Value::default().delete(DEFAULT);
        assert_eq!(timeout, DEFAULT);
        assert!(diags.is_empty());
    }

    #[test]
    fn unparseable_value_reports_diagnostic() {
        let value = decode(&[("update", "10x")]);

        let (timeout, diags) = value.update(DEFAULT);
        assert_eq!(timeout, DEFAULT);
        assert_eq!(diags.errors[0].summary, "Timeout Cannot Be Parsed");
        assert_eq!(
            diags.errors[0].detail,
            r#"timeout for "update" cannot be parsed, time: unknown unit "x" in duration "10x""#
        );
    }

    #[test]
    fn value_reports_its_type() {
        let value = decode(&[]);
        assert_eq!(
            value.value_type(),
            Type(TimeoutsType::for_timeouts([CREATE, READ, UPDATE, DELETE]))
        );
        assert_eq!(
            value.to_string(),
            r#"{"create":<null>,"delete":<null>,"read":<null>,"update":<null>}"#
        );
    }
}
