//! Core type system for tfplug
//!
//! This module provides the value types shared by schemas, validators and
//! providers: untyped `Dynamic` values, their wire wrapper, attribute paths
//! and diagnostics.

use crate::error::{Result, TfplugError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Marker used on the wire for values that are not known until apply
const UNKNOWN_MARKER: &str = "__unknown__";

/// Dynamic represents Terraform values that can be of any type
/// This is the core type for all configuration and state data
#[derive(Debug, Clone, PartialEq)]
pub enum Dynamic {
    /// Explicit null value
    Null,
    /// Boolean value
    Bool(bool),
    /// Number value (all numbers are f64 to match Terraform)
    Number(f64),
    /// String value
    String(String),
    /// List of values (ordered, allows duplicates)
    List(Vec<Dynamic>),
    /// Map of string keys to values (objects are represented as Maps)
    Map(HashMap<String, Dynamic>),
    /// Value not yet known (during planning)
    Unknown,
}

impl Dynamic {
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Dynamic::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Dynamic::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Dynamic::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Dynamic]> {
        match self {
            Dynamic::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&HashMap<String, Dynamic>> {
        match self {
            Dynamic::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Dynamic::Null)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Dynamic::Unknown)
    }

    /// True for anything that is neither null nor unknown
    pub fn is_known(&self) -> bool {
        !self.is_null() && !self.is_unknown()
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Dynamic::Null => "null",
            Dynamic::Bool(_) => "bool",
            Dynamic::Number(_) => "number",
            Dynamic::String(_) => "string",
            Dynamic::List(_) => "list",
            Dynamic::Map(_) => "map",
            Dynamic::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Dynamic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dynamic::Null => f.write_str("<null>"),
            Dynamic::Unknown => f.write_str("<unknown>"),
            Dynamic::Bool(b) => write!(f, "{}", b),
            Dynamic::Number(n) => write!(f, "{}", n),
            Dynamic::String(s) => write!(f, "{:?}", s),
            Dynamic::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i != 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Dynamic::Map(m) => {
                // Sorted so the output is stable across runs
                let mut keys: Vec<&String> = m.keys().collect();
                keys.sort();

                f.write_str("{")?;
                for (i, key) in keys.into_iter().enumerate() {
                    if i != 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{:?}:{}", key, m[key])?;
                }
                f.write_str("}")
            }
        }
    }
}

impl Serialize for Dynamic {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Dynamic::Null => serializer.serialize_unit(),
            Dynamic::Bool(b) => serializer.serialize_bool(*b),
            Dynamic::Number(n) => serializer.serialize_f64(*n),
            Dynamic::String(s) => serializer.serialize_str(s),
            Dynamic::List(l) => l.serialize(serializer),
            Dynamic::Map(m) => m.serialize(serializer),
            Dynamic::Unknown => serializer.serialize_str(UNKNOWN_MARKER),
        }
    }
}

impl<'de> Deserialize<'de> for Dynamic {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct DynamicVisitor;

        impl<'de> Visitor<'de> for DynamicVisitor {
            type Value = Dynamic;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a valid Dynamic value")
            }

            fn visit_unit<E: de::Error>(self) -> std::result::Result<Dynamic, E> {
                Ok(Dynamic::Null)
            }

            fn visit_none<E: de::Error>(self) -> std::result::Result<Dynamic, E> {
                Ok(Dynamic::Null)
            }

            fn visit_bool<E: de::Error>(self, value: bool) -> std::result::Result<Dynamic, E> {
                Ok(Dynamic::Bool(value))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> std::result::Result<Dynamic, E> {
                Ok(Dynamic::Number(value as f64))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> std::result::Result<Dynamic, E> {
                Ok(Dynamic::Number(value as f64))
            }

            fn visit_f64<E: de::Error>(self, value: f64) -> std::result::Result<Dynamic, E> {
                Ok(Dynamic::Number(value))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<Dynamic, E> {
                if value == UNKNOWN_MARKER {
                    Ok(Dynamic::Unknown)
                } else {
                    Ok(Dynamic::String(value.to_string()))
                }
            }

            fn visit_string<E: de::Error>(self, value: String) -> std::result::Result<Dynamic, E> {
                if value == UNKNOWN_MARKER {
                    Ok(Dynamic::Unknown)
                } else {
                    Ok(Dynamic::String(value))
                }
            }

            fn visit_seq<V>(self, mut seq: V) -> std::result::Result<Dynamic, V::Error>
            where
                V: de::SeqAccess<'de>,
            {
                let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(item) = seq.next_element()? {
                    items.push(item);
                }
                Ok(Dynamic::List(items))
            }

            fn visit_map<V>(self, mut map: V) -> std::result::Result<Dynamic, V::Error>
            where
                V: de::MapAccess<'de>,
            {
                let mut entries = HashMap::new();
                while let Some((key, value)) = map.next_entry()? {
                    entries.insert(key, value);
                }
                Ok(Dynamic::Map(entries))
            }
        }

        deserializer.deserialize_any(DynamicVisitor)
    }
}

/// DynamicValue wraps Dynamic and provides encoding/decoding capabilities
/// This is what gets passed between Terraform and the provider
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicValue {
    pub value: Dynamic,
}

impl DynamicValue {
    pub fn new(value: Dynamic) -> Self {
        Self { value }
    }

    pub fn null() -> Self {
        Self {
            value: Dynamic::Null,
        }
    }

    pub fn unknown() -> Self {
        Self {
            value: Dynamic::Unknown,
        }
    }

    /// Terraform uses msgpack by default; a null value is sent as no bytes at all
    pub fn encode_msgpack(&self) -> Result<Vec<u8>> {
        if self.value.is_null() {
            return Ok(Vec::new());
        }
        rmp_serde::encode::to_vec(&self.value)
            .map_err(|e| TfplugError::EncodingError(format!("msgpack encoding failed: {}", e)))
    }

    pub fn decode_msgpack(data: &[u8]) -> Result<Self> {
        if data.is_empty() {
            return Ok(Self::null());
        }
        let value = rmp_serde::decode::from_slice::<Dynamic>(data)
            .map_err(|e| TfplugError::DecodingError(format!("msgpack decoding failed: {}", e)))?;
        Ok(Self { value })
    }

    pub fn encode_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(&self.value)
            .map_err(|e| TfplugError::EncodingError(format!("json encoding failed: {}", e)))
    }

    pub fn decode_json(data: &[u8]) -> Result<Self> {
        let value = serde_json::from_slice(data)
            .map_err(|e| TfplugError::DecodingError(format!("json decoding failed: {}", e)))?;
        Ok(Self { value })
    }

    /// Navigate to the value at `path`
    pub fn get(&self, path: &AttributePath) -> Result<&Dynamic> {
        let mut current = &self.value;

        for step in &path.steps {
            current = match (current, step) {
                (Dynamic::Map(m), AttributePathStep::AttributeName(name))
                | (Dynamic::Map(m), AttributePathStep::ElementKeyString(name)) => {
                    m.get(name).ok_or_else(|| {
                        TfplugError::InvalidPath(format!("attribute '{}' not found", name))
                    })?
                }
                (Dynamic::List(l), AttributePathStep::ElementKeyInt(idx)) => usize::try_from(*idx)
                    .ok()
                    .and_then(|idx| l.get(idx))
                    .ok_or_else(|| {
                        TfplugError::InvalidPath(format!("list index {} out of bounds", idx))
                    })?,
                (value, step) => {
                    return Err(TfplugError::InvalidPath(format!(
                        "cannot apply {:?} to {}",
                        step,
                        value.type_name()
                    )))
                }
            };
        }

        Ok(current)
    }

    pub fn get_string(&self, path: &AttributePath) -> Result<String> {
        let value = self.get(path)?;
        value
            .as_string()
            .map(str::to_string)
            .ok_or_else(|| TfplugError::TypeMismatch {
                expected: "string".to_string(),
                actual: value.type_name().to_string(),
            })
    }

    /// Set the value at `path`, creating intermediate objects as needed
    pub fn set(&mut self, path: &AttributePath, new_value: Dynamic) -> Result<()> {
        let Some((last, parents)) = path.steps.split_last() else {
            self.value = new_value;
            return Ok(());
        };

        if !matches!(self.value, Dynamic::Map(_)) {
            self.value = Dynamic::Map(HashMap::new());
        }

        let mut current = &mut self.value;
        for step in parents {
            current = match (current, step) {
                (Dynamic::Map(m), AttributePathStep::AttributeName(name))
                | (Dynamic::Map(m), AttributePathStep::ElementKeyString(name)) => m
                    .entry(name.clone())
                    .or_insert_with(|| Dynamic::Map(HashMap::new())),
                (Dynamic::List(l), AttributePathStep::ElementKeyInt(idx)) => {
                    let len = l.len();
                    usize::try_from(*idx)
                        .ok()
                        .and_then(|idx| l.get_mut(idx))
                        .ok_or_else(|| {
                            TfplugError::InvalidPath(format!(
                                "list index {} out of bounds (len {})",
                                idx, len
                            ))
                        })?
                }
                (_, step) => {
                    return Err(TfplugError::InvalidPath(format!(
                        "cannot navigate through {:?}",
                        step
                    )))
                }
            };
        }

        match (current, last) {
            (Dynamic::Map(m), AttributePathStep::AttributeName(name))
            | (Dynamic::Map(m), AttributePathStep::ElementKeyString(name)) => {
                m.insert(name.clone(), new_value);
                Ok(())
            }
            (Dynamic::List(l), AttributePathStep::ElementKeyInt(idx)) => {
                match usize::try_from(*idx).ok().and_then(|idx| l.get_mut(idx)) {
                    Some(slot) => {
                        *slot = new_value;
                        Ok(())
                    }
                    None => Err(TfplugError::InvalidPath(format!(
                        "list index {} out of bounds",
                        idx
                    ))),
                }
            }
            (_, step) => Err(TfplugError::InvalidPath(format!(
                "cannot set value through {:?}",
                step
            ))),
        }
    }

    pub fn is_null(&self) -> bool {
        self.value.is_null()
    }

    pub fn is_unknown(&self) -> bool {
        self.value.is_unknown()
    }
}

/// AttributePath represents a path to an attribute within a DynamicValue
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributePath {
    pub steps: Vec<AttributePathStep>,
}

impl AttributePath {
    pub fn new(name: &str) -> Self {
        Self {
            steps: vec![AttributePathStep::AttributeName(name.to_string())],
        }
    }

    pub fn root() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn attribute(mut self, name: &str) -> Self {
        self.steps
            .push(AttributePathStep::AttributeName(name.to_string()));
        self
    }

    pub fn index(mut self, idx: i64) -> Self {
        self.steps.push(AttributePathStep::ElementKeyInt(idx));
        self
    }

    pub fn key(mut self, key: &str) -> Self {
        self.steps
            .push(AttributePathStep::ElementKeyString(key.to_string()));
        self
    }
}

impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            match step {
                AttributePathStep::AttributeName(name) => {
                    if i != 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(name)?;
                }
                AttributePathStep::ElementKeyString(key) => write!(f, "[{:?}]", key)?,
                AttributePathStep::ElementKeyInt(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

/// Individual step in an AttributePath
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributePathStep {
    /// Access attribute by name in object/map
    AttributeName(String),
    /// Access element by string key (for maps)
    ElementKeyString(String),
    /// Access element by integer index (for lists)
    ElementKeyInt(i64),
}

/// Diagnostic represents a warning or error from the provider
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: DiagnosticSeverity,
    pub summary: String,
    pub detail: String,
    pub attribute: Option<AttributePath>,
}

impl Diagnostic {
    pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Error,
            summary: summary.into(),
            detail: detail.into(),
            attribute: None,
        }
    }

    pub fn warning(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Warning,
            summary: summary.into(),
            detail: detail.into(),
            attribute: None,
        }
    }

    pub fn attribute_error(
        path: AttributePath,
        summary: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self::error(summary, detail).with_attribute(path)
    }

    pub fn with_attribute(mut self, path: AttributePath) -> Self {
        self.attribute = Some(path);
        self
    }
}

/// Severity level for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticSeverity {
    Invalid,
    Error,
    Warning,
}

/// Diagnostics collects the errors and warnings produced by an operation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, summary: impl Into<String>, detail: Option<String>) {
        self.errors
            .push(Diagnostic::error(summary, detail.unwrap_or_default()));
    }

    pub fn add_warning(&mut self, summary: impl Into<String>, detail: Option<String>) {
        self.warnings
            .push(Diagnostic::warning(summary, detail.unwrap_or_default()));
    }

    /// Route a diagnostic by its severity; invalid severities count as errors
    pub fn push(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            DiagnosticSeverity::Warning => self.warnings.push(diagnostic),
            DiagnosticSeverity::Error | DiagnosticSeverity::Invalid => {
                self.errors.push(diagnostic)
            }
        }
    }

    pub fn has_error(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }

    /// Errors first, then warnings
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.errors.iter().chain(self.warnings.iter())
    }
}

impl Extend<Diagnostic> for Diagnostics {
    fn extend<I: IntoIterator<Item = Diagnostic>>(&mut self, iter: I) {
        for diagnostic in iter {
            self.push(diagnostic);
        }
    }
}

impl Extend<Diagnostics> for Diagnostics {
    fn extend<I: IntoIterator<Item = Diagnostics>>(&mut self, iter: I) {
        for other in iter {
            self.errors.extend(other.errors);
            self.warnings.extend(other.warnings);
        }
    }
}

impl FromIterator<Diagnostic> for Diagnostics {
    fn from_iter<I: IntoIterator<Item = Diagnostic>>(iter: I) -> Self {
        let mut diagnostics = Diagnostics::new();
        diagnostics.extend(iter);
        diagnostics
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;

    #[test]
    fn dynamic_value_nested_access() {
        let mut dv = DynamicValue::new(Dynamic::Map(HashMap::new()));
        let path = AttributePath::new("timeouts").attribute("create");
        dv.set(&path, Dynamic::String("10m".to_string())).unwrap();

        assert_eq!(dv.get_string(&path).unwrap(), "10m");
        assert!(dv.get(&AttributePath::new("timeouts")).unwrap().as_map().is_some());
    }

    #[test]
    fn get_string_reports_type_mismatch() {
        let mut dv = DynamicValue::null();
        dv.set(&AttributePath::new("enabled"), Dynamic::Bool(true))
            .unwrap();

        let err = dv.get_string(&AttributePath::new("enabled")).unwrap_err();
        assert!(matches!(
            err,
            TfplugError::TypeMismatch { ref expected, ref actual } if expected == "string" && actual == "bool"
        ));
    }

    #[test]
    fn get_missing_attribute_is_invalid_path() {
        let dv = DynamicValue::new(Dynamic::Map(HashMap::new()));
        assert!(matches!(
            dv.get(&AttributePath::new("missing")),
            Err(TfplugError::InvalidPath(_))
        ));
    }

    #[test]
    fn msgpack_preserves_unknown_and_null() {
        let dv = DynamicValue::new(Dynamic::Map(HashMap::from([
            ("create".to_string(), Dynamic::Unknown),
            ("read".to_string(), Dynamic::Null),
            ("update".to_string(), Dynamic::String("5m".to_string())),
        ])));

        let decoded = DynamicValue::decode_msgpack(&dv.encode_msgpack().unwrap()).unwrap();
        assert_eq!(decoded, dv);
    }

    #[test]
    fn empty_msgpack_is_null() {
        assert!(DynamicValue::decode_msgpack(&[]).unwrap().is_null());
        assert!(DynamicValue::null().encode_msgpack().unwrap().is_empty());
    }

    #[test]
    fn json_decoding_maps_null() {
        let dv = DynamicValue::decode_json(br#"{"read": null, "open": "1h"}"#).unwrap();
        let map = dv.value.as_map().unwrap();
        assert!(map["read"].is_null());
        assert_eq!(map["open"].as_string(), Some("1h"));
    }

    #[test]
    fn dynamic_display_sorts_keys() {
        let value = Dynamic::Map(HashMap::from([
            ("read".to_string(), Dynamic::Null),
            ("create".to_string(), Dynamic::String("10m".to_string())),
            ("delete".to_string(), Dynamic::Unknown),
        ]));

        assert_eq!(
            value.to_string(),
            r#"{"create":"10m","delete":<unknown>,"read":<null>}"#
        );
    }

    #[test]
    fn attribute_path_display() {
        let path = AttributePath::new("timeouts").attribute("create");
        assert_eq!(path.to_string(), "timeouts.create");

        let path = AttributePath::new("rules").index(2).key("name");
        assert_eq!(path.to_string(), r#"rules[2]["name"]"#);

        assert_eq!(AttributePath::root().to_string(), "");
    }

    #[test]
    fn diagnostics_route_by_severity() {
        let mut diags = Diagnostics::new();
        diags.add_error("broken", Some("detail".to_string()));
        diags.push(Diagnostic::warning("careful", ""));
        diags.extend(vec![Diagnostic::error("also broken", "")]);

        assert!(diags.has_error());
        assert_eq!(diags.errors.len(), 2);
        assert_eq!(diags.warnings.len(), 1);
        assert_eq!(diags.len(), 3);
        assert_eq!(diags.iter().next().unwrap().summary, "broken");
    }
}
