//! tfplug-timeouts - Timeouts blocks and attributes for tfplug providers
//!
//! Providers add a `timeouts` block (or nested attribute) to their schemas with
//! one of the per-kind modules, then read the configured durations back out of
//! the decoded config:
//!
//! - [`resource`]: `create`, `read`, `update` and `delete`
//! - [`datasource`]: `read`
//! - [`ephemeral`]: `open`
//! - [`action`]: `invoke`
//!
//! Every timeout attribute is an optional string validated against the
//! duration grammar of [`parse_duration`]. Accessors return the caller's
//! default whenever a timeout is not configured.

/// Defines the `Type` and `Value` newtypes of a timeouts kind.
///
/// Both wrap the shared [`TimeoutsType`] / [`TimeoutsValue`] and deref to
/// them, so the kind module only adds its named accessors.
macro_rules! define_timeouts_kind {
    ($kind:literal) => {
        /// Custom type of the `timeouts` object
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct Type(pub $crate::TimeoutsType);

        impl Type {
            pub fn new(
                attr_types: ::std::collections::BTreeMap<String, ::tfplug::schema::AttributeType>,
            ) -> Self {
                Self($crate::TimeoutsType::new(attr_types))
            }

            pub fn value_type(&self) -> Value {
                Value(self.0.value_type())
            }

            pub fn value_from_terraform(
                &self,
                value: &::tfplug::types::Dynamic,
            ) -> ::tfplug::error::Result<Value> {
                self.0.value_from_terraform(value).map(Value)
            }

            pub fn value_from_msgpack(&self, data: &[u8]) -> ::tfplug::error::Result<Value> {
                self.0.value_from_msgpack(data).map(Value)
            }
        }

        impl ::std::ops::Deref for Type {
            type Target = $crate::TimeoutsType;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl From<$crate::TimeoutsType> for Type {
            fn from(inner: $crate::TimeoutsType) -> Self {
                Self(inner)
            }
        }

        impl ::std::fmt::Display for Type {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}::{}", $kind, self.0)
            }
        }

        impl ::tfplug::schema::CustomType for Type {
            fn type_name(&self) -> String {
                self.to_string()
            }

            fn terraform_type(&self) -> ::tfplug::schema::AttributeType {
                self.0.terraform_type()
            }
        }

        /// Decoded `timeouts` object
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct Value(pub $crate::TimeoutsValue);

        impl Value {
            pub fn value_type(&self) -> Type {
                Type(self.0.timeouts_type())
            }

            pub fn into_inner(self) -> $crate::TimeoutsValue {
                self.0
            }
        }

        impl ::std::ops::Deref for Value {
            type Target = $crate::TimeoutsValue;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl From<$crate::TimeoutsValue> for Value {
            fn from(inner: $crate::TimeoutsValue) -> Self {
                Self(inner)
            }
        }

        impl ::std::fmt::Display for Value {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

pub mod action;
pub mod datasource;
pub mod duration;
pub mod ephemeral;
pub mod error;
pub mod legacy;
pub mod resource;
mod schema;
pub mod timeouts_type;
pub mod validators;
pub mod value;

/// Name of the block or nested attribute holding the timeouts
pub const ATTRIBUTE_NAME: &str = "timeouts";

pub const CREATE: &str = "create";
pub const READ: &str = "read";
pub const UPDATE: &str = "update";
pub const DELETE: &str = "delete";
pub const OPEN: &str = "open";
pub const INVOKE: &str = "invoke";

pub use duration::{parse_duration, to_std_duration};
pub use error::ParseDurationError;
pub use schema::DEFAULT_TIMEOUT_DESCRIPTION;
pub use timeouts_type::TimeoutsType;
pub use validators::{time_duration, TimeDuration};
pub use value::TimeoutsValue;
