//! First-generation timeouts API.
//!
//! Schema fragments here carry no custom type, and the accessors are strict:
//! each problem with the configured value is returned as a diagnostic instead
//! of falling back silently. Prefer the per-kind modules such as
//! [`crate::resource`].
#![allow(deprecated)]

use crate::duration::{parse_duration, to_std_duration};
use crate::schema::{timeouts_attribute, timeouts_block, TimeoutField};
use crate::value::TimeoutsValue;
use crate::{CREATE, DELETE, READ, UPDATE};
use std::time::Duration;
use tfplug::schema::{Attribute, NestedBlock};
use tfplug::types::{Diagnostics, Dynamic};

#[deprecated(note = "use resource::Opts or datasource::Opts")]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Opts {
    pub create: bool,
    pub read: bool,
    pub update: bool,
    pub delete: bool,
}

impl Opts {
    pub fn all() -> Self {
        Self {
            create: true,
            read: true,
            update: true,
            delete: true,
        }
    }

    fn fields(&self) -> Vec<TimeoutField<'static>> {
        [
            (CREATE, self.create),
            (READ, self.read),
            (UPDATE, self.update),
            (DELETE, self.delete),
        ]
        .into_iter()
        .filter_map(|(name, enabled)| enabled.then_some((name, None)))
        .collect()
    }
}

#[deprecated(note = "use resource::block or datasource::block")]
pub fn block(opts: Opts) -> NestedBlock {
    timeouts_block(&opts.fields(), None)
}

#[deprecated(note = "use resource::block_all or datasource::block")]
pub fn block_all() -> NestedBlock {
    block(Opts::all())
}

#[deprecated(note = "use resource::attributes or datasource::attributes")]
pub fn attributes(opts: Opts) -> Attribute {
    timeouts_attribute(&opts.fields(), None)
}

#[deprecated(note = "use resource::attributes_all or datasource::attributes")]
pub fn attributes_all() -> Attribute {
    attributes(Opts::all())
}

/// "create" -> "Create"
fn title(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn lookup(value: &TimeoutsValue, name: &str) -> Result<Duration, Diagnostics> {
    let label = title(name);
    let mut diagnostics = Diagnostics::new();

    let Some(attr) = value.get(name) else {
        diagnostics.add_error(
            format!("{label} Timeout Not Found"),
            Some(format!("{label} timeout is not present within the timeouts")),
        );
        return Err(diagnostics);
    };

    // Null and unknown strings have no text to parse
    let raw = match attr {
        Dynamic::String(raw) => raw.as_str(),
        Dynamic::Null | Dynamic::Unknown => "",
        _ => {
            diagnostics.add_error(
                format!("{label} Timeout Not String"),
                Some(format!("{label} timeout must be a string")),
            );
            return Err(diagnostics);
        }
    };

    match parse_duration(raw) {
        Ok(delta) => Ok(to_std_duration(delta)),
        Err(err) => {
            tracing::debug!(timeout = name, error = %err, "strict timeout lookup failed");
            diagnostics.add_error(
                format!("{label} Timeout Not Parseable"),
                Some(format!("{label} timeout cannot be parsed as time.Duration")),
            );
            Err(diagnostics)
        }
    }
}

fn lookup_or(value: &TimeoutsValue, name: &str, default: Duration) -> Duration {
    lookup(value, name).unwrap_or(default)
}

#[deprecated(note = "use resource::Value::create")]
pub fn create(value: &TimeoutsValue) -> Result<Duration, Diagnostics> {
    lookup(value, CREATE)
}

#[deprecated(note = "use resource::Value::create")]
pub fn create_default(value: &TimeoutsValue, default: Duration) -> Duration {
    lookup_or(value, CREATE, default)
}

#[deprecated(note = "use resource::Value::read or datasource::Value::read")]
pub fn read(value: &TimeoutsValue) -> Result<Duration, Diagnostics> {
    lookup(value, READ)
}

#[deprecated(note = "use resource::Value::read or datasource::Value::read")]
pub fn read_default(value: &TimeoutsValue, default: Duration) -> Duration {
    lookup_or(value, READ, default)
}

#[deprecated(note = "use resource::Value::update")]
pub fn update(value: &TimeoutsValue) -> Result<Duration, Diagnostics> {
    lookup(value, UPDATE)
}

#[deprecated(note = "use resource::Value::update")]
pub fn update_default(value: &TimeoutsValue, default: Duration) -> Duration {
    lookup_or(value, UPDATE, default)
}

#[deprecated(note = "use resource::Value::delete")]
pub fn delete(value: &TimeoutsValue) -> Result<Duration, Diagnostics> {
    lookup(value, DELETE)
}

#[deprecated(note = "use resource::Value::delete")]
pub fn delete_default(value: &TimeoutsValue, default: Duration) -> Duration {
    lookup_or(value, DELETE, default)
}
