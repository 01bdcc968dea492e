//! Object type adapter that turns wire values into [`TimeoutsValue`]s

use crate::value::TimeoutsValue;
use std::collections::BTreeMap;
use std::fmt;
use tfplug::error::{Result, TfplugError};
use tfplug::schema::{AttributeType, CustomType};
use tfplug::types::{Dynamic, DynamicValue};

/// Object type whose attributes are timeout names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeoutsType {
    attr_types: BTreeMap<String, AttributeType>,
}

impl TimeoutsType {
    pub fn new(attr_types: BTreeMap<String, AttributeType>) -> Self {
        Self { attr_types }
    }

    /// Type with one string attribute per timeout name
    pub fn for_timeouts<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            names
                .into_iter()
                .map(|name| (name.into(), AttributeType::String))
                .collect(),
        )
    }

    pub fn attribute_types(&self) -> &BTreeMap<String, AttributeType> {
        &self.attr_types
    }

    pub fn with_attribute_types(&self, attr_types: BTreeMap<String, AttributeType>) -> Self {
        Self::new(attr_types)
    }

    pub fn attribute_type(&self, name: &str) -> Option<&AttributeType> {
        self.attr_types.get(name)
    }

    pub fn terraform_type(&self) -> AttributeType {
        AttributeType::Object(self.attr_types.clone())
    }

    /// Zero value of this type: a null object
    pub fn value_type(&self) -> TimeoutsValue {
        TimeoutsValue::null(self.attr_types.clone())
    }

    /// Convert a decoded wire value. Declared attributes missing from the
    /// input read as null.
    pub fn value_from_terraform(&self, value: &Dynamic) -> Result<TimeoutsValue> {
        match value {
            Dynamic::Null => Ok(TimeoutsValue::null(self.attr_types.clone())),
            Dynamic::Unknown => Ok(TimeoutsValue::unknown(self.attr_types.clone())),
            Dynamic::Map(fields) => {
                let mut attributes: BTreeMap<String, Dynamic> = fields
                    .iter()
                    .map(|(name, value)| (name.clone(), value.clone()))
                    .collect();
                for name in self.attr_types.keys() {
                    attributes.entry(name.clone()).or_insert(Dynamic::Null);
                }
                TimeoutsValue::new(self.attr_types.clone(), attributes)
            }
            other => Err(TfplugError::TypeMismatch {
                expected: self.terraform_type().to_string(),
                actual: other.type_name().to_string(),
            }),
        }
    }

    /// Decode msgpack bytes, then convert. Empty input is a null object.
    pub fn value_from_msgpack(&self, data: &[u8]) -> Result<TimeoutsValue> {
        let decoded = DynamicValue::decode_msgpack(data)?;
        self.value_from_terraform(&decoded.value)
    }
}

impl fmt::Display for TimeoutsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TimeoutsType[")?;
        for (i, (name, ty)) in self.attr_types.iter().enumerate() {
            if i != 0 {
                f.write_str(", ")?;
            }
            write!(f, "{:?}:{}", name, ty)?;
        }
        f.write_str("]")
    }
}

impl CustomType for TimeoutsType {
    fn type_name(&self) -> String {
        self.to_string()
    }

    fn terraform_type(&self) -> AttributeType {
        TimeoutsType::terraform_type(self)
    }
}
