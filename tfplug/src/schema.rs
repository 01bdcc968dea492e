//! Schema types and builders for tfplug
//!
//! This module provides the schema system for defining resource and data source
//! schemas, including attribute types, blocks, custom types and validation.

use crate::types::{AttributePath, Diagnostic, Diagnostics, Dynamic, DynamicValue};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// AttributeType defines the type system for Terraform attributes
/// This must match Terraform's type system exactly
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeType {
    String,
    Number, // Always f64
    Bool,
    List(Box<AttributeType>),                // Ordered, allows duplicates
    Set(Box<AttributeType>),                 // Unordered, no duplicates
    Map(Box<AttributeType>),                 // String keys only
    Object(BTreeMap<String, AttributeType>), // Fixed structure
}

impl AttributeType {
    /// Object type from `(name, type)` pairs
    pub fn object<I, S>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (S, AttributeType)>,
        S: Into<String>,
    {
        AttributeType::Object(
            attributes
                .into_iter()
                .map(|(name, ty)| (name.into(), ty))
                .collect(),
        )
    }

    /// Whether `value` conforms to this type. Null and unknown conform to every type.
    pub fn accepts(&self, value: &Dynamic) -> bool {
        match (self, value) {
            (_, Dynamic::Null) | (_, Dynamic::Unknown) => true,
            (AttributeType::String, Dynamic::String(_)) => true,
            (AttributeType::Number, Dynamic::Number(_)) => true,
            (AttributeType::Bool, Dynamic::Bool(_)) => true,
            (AttributeType::List(elem), Dynamic::List(items))
            | (AttributeType::Set(elem), Dynamic::List(items)) => {
                items.iter().all(|item| elem.accepts(item))
            }
            (AttributeType::Map(elem), Dynamic::Map(entries)) => {
                entries.values().all(|entry| elem.accepts(entry))
            }
            (AttributeType::Object(fields), Dynamic::Map(entries)) => {
                entries.iter().all(|(name, entry)| {
                    fields
                        .get(name)
                        .map(|ty| ty.accepts(entry))
                        .unwrap_or(false)
                })
            }
            _ => false,
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeType::String => f.write_str("string"),
            AttributeType::Number => f.write_str("number"),
            AttributeType::Bool => f.write_str("bool"),
            AttributeType::List(elem) => write!(f, "list({})", elem),
            AttributeType::Set(elem) => write!(f, "set({})", elem),
            AttributeType::Map(elem) => write!(f, "map({})", elem),
            AttributeType::Object(fields) => {
                f.write_str("object({")?;
                for (i, (name, ty)) in fields.iter().enumerate() {
                    if i != 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}={}", name, ty)?;
                }
                f.write_str("})")
            }
        }
    }
}

/// CustomType lets an extension attach its own named type to an attribute or block.
/// The framework only needs the underlying Terraform type; value conversion is up
/// to the implementor.
pub trait CustomType: Send + Sync {
    /// Human-readable type name
    fn type_name(&self) -> String;
    /// Underlying Terraform type
    fn terraform_type(&self) -> AttributeType;
}

impl fmt::Debug for dyn CustomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_name())
    }
}

/// Schema is returned by providers/resources/data sources
/// Version is used for state migration
#[derive(Debug, Clone)]
pub struct Schema {
    pub version: i64, // Increment when schema changes require migration
    pub block: Block, // Root block containing all attributes
}

impl Schema {
    /// Run every attribute validator against `config`
    pub fn validate(&self, config: &DynamicValue) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();
        self.block
            .validate(&config.value, &AttributePath::root(), &mut diagnostics);
        diagnostics
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.block.attribute(name)
    }

    pub fn nested_block(&self, type_name: &str) -> Option<&NestedBlock> {
        self.block.nested_block(type_name)
    }
}

/// Block represents a configuration block
#[derive(Debug, Clone)]
pub struct Block {
    pub version: i64,
    pub attributes: Vec<Attribute>,
    pub block_types: Vec<NestedBlock>,
    pub description: String,
    pub description_kind: StringKind,
    pub deprecated: bool,
    pub custom_type: Option<Arc<dyn CustomType>>,
}

impl Default for Block {
    fn default() -> Self {
        Self {
            version: 0,
            attributes: Vec::new(),
            block_types: Vec::new(),
            description: String::new(),
            description_kind: StringKind::Plain,
            deprecated: false,
            custom_type: None,
        }
    }
}

impl Block {
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attr| attr.name == name)
    }

    pub fn nested_block(&self, type_name: &str) -> Option<&NestedBlock> {
        self.block_types
            .iter()
            .find(|block| block.type_name == type_name)
    }

    /// Object type described by this block's attributes and nested blocks
    pub fn object_type(&self) -> AttributeType {
        let attributes = self
            .attributes
            .iter()
            .map(|attr| (attr.name.clone(), attr.r#type.clone()));
        let blocks = self
            .block_types
            .iter()
            .map(|block| (block.type_name.clone(), block.attribute_type()));
        AttributeType::object(attributes.chain(blocks))
    }

    /// Validate an object value against this block. Null and unknown objects are skipped.
    pub fn validate(&self, value: &Dynamic, path: &AttributePath, diagnostics: &mut Diagnostics) {
        let Dynamic::Map(fields) = value else {
            return;
        };

        for attr in &self.attributes {
            let field = fields.get(&attr.name).unwrap_or(&Dynamic::Null);
            attr.validate(field, &path.clone().attribute(&attr.name), diagnostics);
        }

        for nested in &self.block_types {
            let field = fields.get(&nested.type_name).unwrap_or(&Dynamic::Null);
            nested.validate(
                field,
                &path.clone().attribute(&nested.type_name),
                diagnostics,
            );
        }
    }
}

/// Attribute represents a single configuration attribute
#[derive(Clone)]
pub struct Attribute {
    pub name: String,
    pub r#type: AttributeType,
    pub description: String,
    pub required: bool,
    pub optional: bool,
    pub computed: bool,
    pub sensitive: bool,
    pub validators: Vec<Arc<dyn Validator>>,
    pub nested_type: Option<NestedType>,
    pub custom_type: Option<Arc<dyn CustomType>>,
    pub deprecated: bool,
}

// Manual Debug implementation since validators don't implement Debug
impl fmt::Debug for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attribute")
            .field("name", &self.name)
            .field("type", &self.r#type)
            .field("description", &self.description)
            .field("required", &self.required)
            .field("optional", &self.optional)
            .field("computed", &self.computed)
            .field("sensitive", &self.sensitive)
            .field(
                "validators",
                &self
                    .validators
                    .iter()
                    .map(|v| v.description())
                    .collect::<Vec<_>>(),
            )
            .field("nested_type", &self.nested_type)
            .field("custom_type", &self.custom_type)
            .field("deprecated", &self.deprecated)
            .finish()
    }
}

impl Attribute {
    /// Run this attribute's validators, then descend into nested attributes
    pub fn validate(&self, value: &Dynamic, path: &AttributePath, diagnostics: &mut Diagnostics) {
        for validator in &self.validators {
            let response = validator.validate(ValidatorRequest {
                config_value: DynamicValue::new(value.clone()),
                path: path.clone(),
            });
            diagnostics.extend(response.diagnostics);
        }

        if let Some(nested) = &self.nested_type {
            nested.validate(value, path, diagnostics);
        }
    }
}

/// NestedBlock represents a nested configuration block
#[derive(Debug, Clone)]
pub struct NestedBlock {
    pub type_name: String,
    pub block: Block,
    pub nesting: NestingMode,
    pub min_items: i64,
    pub max_items: i64,
}

impl NestedBlock {
    /// A block that appears at most once
    pub fn single(type_name: &str, block: Block) -> Self {
        Self {
            type_name: type_name.to_string(),
            block,
            nesting: NestingMode::Single,
            min_items: 0,
            max_items: 0,
        }
    }

    /// Type of the value this block produces in config
    pub fn attribute_type(&self) -> AttributeType {
        let object = match &self.block.custom_type {
            Some(custom) => custom.terraform_type(),
            None => self.block.object_type(),
        };
        match self.nesting {
            NestingMode::List => AttributeType::List(Box::new(object)),
            NestingMode::Set => AttributeType::Set(Box::new(object)),
            NestingMode::Map => AttributeType::Map(Box::new(object)),
            NestingMode::Single | NestingMode::Group | NestingMode::Invalid => object,
        }
    }

    pub fn validate(&self, value: &Dynamic, path: &AttributePath, diagnostics: &mut Diagnostics) {
        match (self.nesting, value) {
            (NestingMode::List | NestingMode::Set, Dynamic::List(items)) => {
                for (idx, item) in items.iter().enumerate() {
                    self.block
                        .validate(item, &path.clone().index(idx as i64), diagnostics);
                }
            }
            (NestingMode::Map, Dynamic::Map(entries)) => {
                for (key, item) in entries {
                    self.block.validate(item, &path.clone().key(key), diagnostics);
                }
            }
            (NestingMode::Single | NestingMode::Group, _) => {
                self.block.validate(value, path, diagnostics)
            }
            _ => {}
        }
    }
}

/// NestingMode defines how nested blocks are structured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NestingMode {
    Invalid,
    Single,
    List,
    Set,
    Map,
    Group,
}

/// NestedType for attributes with nested structures
#[derive(Debug, Clone)]
pub struct NestedType {
    pub attributes: Vec<Attribute>,
    pub nesting: ObjectNestingMode,
}

impl NestedType {
    pub fn single(attributes: Vec<Attribute>) -> Self {
        Self {
            attributes,
            nesting: ObjectNestingMode::Single,
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attr| attr.name == name)
    }

    /// Object type of a single nested element
    pub fn object_type(&self) -> AttributeType {
        AttributeType::object(
            self.attributes
                .iter()
                .map(|attr| (attr.name.clone(), attr.r#type.clone())),
        )
    }

    fn validate_object(&self, value: &Dynamic, path: &AttributePath, diagnostics: &mut Diagnostics) {
        let Dynamic::Map(fields) = value else {
            return;
        };
        for attr in &self.attributes {
            let field = fields.get(&attr.name).unwrap_or(&Dynamic::Null);
            attr.validate(field, &path.clone().attribute(&attr.name), diagnostics);
        }
    }

    pub fn validate(&self, value: &Dynamic, path: &AttributePath, diagnostics: &mut Diagnostics) {
        match (self.nesting, value) {
            (ObjectNestingMode::Single, _) => self.validate_object(value, path, diagnostics),
            (ObjectNestingMode::List | ObjectNestingMode::Set, Dynamic::List(items)) => {
                for (idx, item) in items.iter().enumerate() {
                    self.validate_object(item, &path.clone().index(idx as i64), diagnostics);
                }
            }
            (ObjectNestingMode::Map, Dynamic::Map(entries)) => {
                for (key, item) in entries {
                    self.validate_object(item, &path.clone().key(key), diagnostics);
                }
            }
            _ => {}
        }
    }
}

/// ObjectNestingMode for nested attribute objects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectNestingMode {
    Invalid,
    Single,
    List,
    Set,
    Map,
}

/// StringKind represents the format of string values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringKind {
    Plain,
    Markdown,
}

/// Validator performs validation on attribute values during planning
/// Implement this for custom validation logic
pub trait Validator: Send + Sync {
    /// Human-readable description
    fn description(&self) -> String;
    /// Markdown description, used in generated documentation
    fn markdown_description(&self) -> String {
        self.description()
    }
    /// Perform validation
    fn validate(&self, request: ValidatorRequest) -> ValidatorResponse;
}

/// Request for validators
#[derive(Debug, Clone)]
pub struct ValidatorRequest {
    pub config_value: DynamicValue,
    pub path: AttributePath,
}

/// Response from validators
#[derive(Debug, Clone, Default)]
pub struct ValidatorResponse {
    pub diagnostics: Vec<Diagnostic>,
}

/// AttributeBuilder provides fluent API for building attributes
/// ALWAYS use this instead of constructing Attribute directly
pub struct AttributeBuilder {
    attribute: Attribute,
}

impl AttributeBuilder {
    /// Create a new attribute builder
    pub fn new(name: &str, type_: AttributeType) -> Self {
        Self {
            attribute: Attribute {
                name: name.to_string(),
                r#type: type_,
                description: String::new(),
                required: false,
                optional: false,
                computed: false,
                sensitive: false,
                validators: Vec::new(),
                nested_type: None,
                custom_type: None,
                deprecated: false,
            },
        }
    }

    pub fn string(name: &str) -> Self {
        Self::new(name, AttributeType::String)
    }

    /// Single nested attribute; its type is derived from the nested attributes
    pub fn single_nested(name: &str, attributes: Vec<Attribute>) -> Self {
        let nested = NestedType::single(attributes);
        Self::new(name, nested.object_type()).nested_type(nested)
    }

    /// Set description
    pub fn description(mut self, desc: &str) -> Self {
        self.attribute.description = desc.to_string();
        self
    }

    /// Mark as required
    pub fn required(mut self) -> Self {
        self.attribute.required = true;
        self.attribute.optional = false;
        self
    }

    /// Mark as optional
    pub fn optional(mut self) -> Self {
        self.attribute.optional = true;
        self.attribute.required = false;
        self
    }

    /// Mark as computed
    pub fn computed(mut self) -> Self {
        self.attribute.computed = true;
        self
    }

    /// Mark as sensitive (hidden)
    pub fn sensitive(mut self) -> Self {
        self.attribute.sensitive = true;
        self
    }

    /// Mark as deprecated
    pub fn deprecated(mut self) -> Self {
        self.attribute.deprecated = true;
        self
    }

    /// Add validator
    pub fn validator(mut self, validator: Arc<dyn Validator>) -> Self {
        self.attribute.validators.push(validator);
        self
    }

    /// Set nested type
    pub fn nested_type(mut self, nested: NestedType) -> Self {
        self.attribute.nested_type = Some(nested);
        self
    }

    /// Set custom type
    pub fn custom_type(mut self, custom: Arc<dyn CustomType>) -> Self {
        self.attribute.custom_type = Some(custom);
        self
    }

    /// Finalize the attribute
    pub fn build(self) -> Attribute {
        self.attribute
    }
}

/// SchemaBuilder provides fluent API for building schemas
/// ALWAYS use this for consistency
pub struct SchemaBuilder {
    schema: Schema,
}

impl SchemaBuilder {
    /// Create a new schema builder
    pub fn new() -> Self {
        Self {
            schema: Schema {
                version: 0,
                block: Block::default(),
            },
        }
    }

    /// Set schema version
    pub fn version(mut self, version: i64) -> Self {
        self.schema.version = version;
        self.schema.block.version = version;
        self
    }

    /// Add attribute
    pub fn attribute(mut self, attr: Attribute) -> Self {
        self.schema.block.attributes.push(attr);
        self
    }

    /// Add nested block
    pub fn block(mut self, block: NestedBlock) -> Self {
        self.schema.block.block_types.push(block);
        self
    }

    /// Set description
    pub fn description(mut self, desc: &str) -> Self {
        self.schema.block.description = desc.to_string();
        self
    }

    /// Set description kind
    pub fn description_kind(mut self, kind: StringKind) -> Self {
        self.schema.block.description_kind = kind;
        self
    }

    /// Mark as deprecated
    pub fn deprecated(mut self) -> Self {
        self.schema.block.deprecated = true;
        self
    }

    /// Finalize the schema
    pub fn build(self) -> Schema {
        self.schema
    }
}

impl std::default::Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}
