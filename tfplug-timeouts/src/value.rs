//! The timeouts object value and its default-duration lookup

use crate::duration::{parse_duration, to_std_duration};
use crate::timeouts_type::TimeoutsType;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;
use tfplug::context::Context;
use tfplug::error::{Result, TfplugError};
use tfplug::schema::AttributeType;
use tfplug::types::{Diagnostics, Dynamic, DynamicValue};

pub const TIMEOUT_CANNOT_BE_PARSED_SUMMARY: &str = "Timeout Cannot Be Parsed";

#[derive(Debug, Clone, PartialEq)]
enum ObjectState {
    Null,
    Unknown,
    Known(BTreeMap<String, Dynamic>),
}

/// An object holding one string per configured timeout.
///
/// The object itself may be null (the block was omitted) or unknown (its
/// value is only known after apply). The default value is a null object with
/// no attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeoutsValue {
    attr_types: BTreeMap<String, AttributeType>,
    state: ObjectState,
}

impl Default for TimeoutsValue {
    fn default() -> Self {
        Self::null(BTreeMap::new())
    }
}

impl TimeoutsValue {
    /// Known object. Every declared attribute must be present, no others may
    /// be, and each value must conform to its declared type.
    pub fn new(
        attr_types: BTreeMap<String, AttributeType>,
        attributes: BTreeMap<String, Dynamic>,
    ) -> Result<Self> {
        let type_name = || TimeoutsType::new(attr_types.clone()).to_string();

        for (name, value) in &attributes {
            let ty = attr_types
                .get(name)
                .ok_or_else(|| TfplugError::UnexpectedAttribute {
                    attribute: name.clone(),
                    type_name: type_name(),
                })?;
            if !ty.accepts(value) {
                return Err(TfplugError::TypeMismatch {
                    expected: ty.to_string(),
                    actual: value.type_name().to_string(),
                });
            }
        }

        if let Some(missing) = attr_types.keys().find(|name| !attributes.contains_key(*name)) {
            return Err(TfplugError::MissingAttribute {
                attribute: missing.clone(),
                type_name: type_name(),
            });
        }

        Ok(Self {
            attr_types,
            state: ObjectState::Known(attributes),
        })
    }

    pub fn null(attr_types: BTreeMap<String, AttributeType>) -> Self {
        Self {
            attr_types,
            state: ObjectState::Null,
        }
    }

    pub fn unknown(attr_types: BTreeMap<String, AttributeType>) -> Self {
        Self {
            attr_types,
            state: ObjectState::Unknown,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self.state, ObjectState::Null)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self.state, ObjectState::Unknown)
    }

    pub fn attribute_types(&self) -> &BTreeMap<String, AttributeType> {
        &self.attr_types
    }

    /// Type of this value
    pub fn timeouts_type(&self) -> TimeoutsType {
        TimeoutsType::new(self.attr_types.clone())
    }

    /// Attribute values, `None` when the object is null or unknown
    pub fn attributes(&self) -> Option<&BTreeMap<String, Dynamic>> {
        match &self.state {
            ObjectState::Known(attributes) => Some(attributes),
            ObjectState::Null | ObjectState::Unknown => None,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Dynamic> {
        self.attributes().and_then(|attributes| attributes.get(name))
    }

    pub fn to_terraform_value(&self) -> Dynamic {
        match &self.state {
            ObjectState::Null => Dynamic::Null,
            ObjectState::Unknown => Dynamic::Unknown,
            ObjectState::Known(attributes) => Dynamic::Map(
                attributes
                    .iter()
                    .map(|(name, value)| (name.clone(), value.clone()))
                    .collect(),
            ),
        }
    }

    pub fn encode_msgpack(&self) -> Result<Vec<u8>> {
        DynamicValue::new(self.to_terraform_value()).encode_msgpack()
    }

    /// Duration configured for the timeout `name`, or `default`.
    ///
    /// The default applies when the object is null or unknown, or when the
    /// attribute is absent, null, unknown or not a string. A string that does
    /// not parse also yields the default, together with an error diagnostic.
    /// Negative durations are clamped to zero.
    pub fn timeout(&self, name: &str, default: Duration) -> (Duration, Diagnostics) {
        let mut diagnostics = Diagnostics::new();

        let Some(raw) = self.get(name).and_then(Dynamic::as_string) else {
            tracing::debug!(timeout = name, ?default, "timeout not configured, using default");
            return (default, diagnostics);
        };

        match parse_duration(raw) {
            Ok(delta) => (to_std_duration(delta), diagnostics),
            Err(err) => {
                tracing::warn!(timeout = name, value = raw, error = %err, "timeout cannot be parsed, using default");
                diagnostics.add_error(
                    TIMEOUT_CANNOT_BE_PARSED_SUMMARY,
                    Some(format!("timeout for {:?} cannot be parsed, {}", name, err)),
                );
                (default, diagnostics)
            }
        }
    }

    /// Derive a child of `ctx` bounded by the timeout `name`
    pub fn deadline_context(
        &self,
        ctx: &Context,
        name: &str,
        default: Duration,
    ) -> (Context, Diagnostics) {
        let (timeout, diagnostics) = self.timeout(name, default);
        (ctx.with_timeout(timeout), diagnostics)
    }
}

impl fmt::Display for TimeoutsValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            ObjectState::Null => f.write_str("<null>"),
            ObjectState::Unknown => f.write_str("<unknown>"),
            ObjectState::Known(attributes) => {
                f.write_str("{")?;
                for (i, (name, value)) in attributes.iter().enumerate() {
                    if i != 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{:?}:{}", name, value)?;
                }
                f.write_str("}")
            }
        }
    }
}
