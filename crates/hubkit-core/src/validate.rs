// ── Field-contract validation ──
//
// Records arrive as loosely typed JSON. A record is checked against a
// static field table: presence of every field first (in declaration
// order), then the primitive type of each field. The first violation wins.

use serde_json::{Map, Value};
use strum::Display;

use crate::error::CoreError;

/// Primitive JSON type of a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum FieldKind {
    String,
    Number,
    Boolean,
    Array,
    Object,
    Null,
}

impl FieldKind {
    /// Classify a JSON value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::String(_) => Self::String,
            Value::Number(_) => Self::Number,
            Value::Bool(_) => Self::Boolean,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
            Value::Null => Self::Null,
        }
    }
}

/// One required field and its expected type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldRule {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

/// Fields every hub must carry.
pub const HUB_SCHEMA: &[FieldRule] = &[
    FieldRule::new("id", FieldKind::String),
    FieldRule::new("serial_number", FieldKind::String),
];

/// Fields every customer address must carry.
pub const ADDRESS_SCHEMA: &[FieldRule] = &[
    FieldRule::new("id", FieldKind::Number),
    FieldRule::new("first_name", FieldKind::String),
    FieldRule::new("last_name", FieldKind::String),
    FieldRule::new("street", FieldKind::String),
    FieldRule::new("postcode", FieldKind::String),
    FieldRule::new("state", FieldKind::String),
    FieldRule::new("country", FieldKind::String),
    FieldRule::new("lat", FieldKind::Number),
    FieldRule::new("lon", FieldKind::Number),
];

/// Pseudo-field name reported when the record itself is not an object.
pub const RECORD_FIELD: &str = "<record>";

fn as_object(record: &Value) -> Result<&Map<String, Value>, CoreError> {
    record.as_object().ok_or_else(|| CoreError::TypeMismatch {
        field: RECORD_FIELD.into(),
        expected: FieldKind::Object,
        found: FieldKind::of(record),
    })
}

/// Check that `record` has every field in `names`.
///
/// Fails with [`CoreError::MissingField`] naming the first absent field
/// in the order given. A field holding `null` counts as present.
pub fn validate_fields<'a>(record: &'a Value, names: &[&str]) -> Result<&'a Value, CoreError> {
    let object = as_object(record)?;
    if let Some(missing) = names.iter().find(|name| !object.contains_key(**name)) {
        return Err(CoreError::MissingField {
            field: (*missing).to_owned(),
        });
    }
    Ok(record)
}

/// Check presence, then type, of every field in `schema`.
///
/// Type checks only run once all fields are known to be present, so a
/// record that is both incomplete and mistyped reports the missing field.
pub fn validate_schema<'a>(record: &'a Value, schema: &[FieldRule]) -> Result<&'a Value, CoreError> {
    let names: Vec<&str> = schema.iter().map(|rule| rule.name).collect();
    validate_fields(record, &names)?;

    let object = as_object(record)?;
    for rule in schema {
        let Some(value) = object.get(rule.name) else {
            continue;
        };
        let found = FieldKind::of(value);
        if found != rule.kind {
            return Err(CoreError::TypeMismatch {
                field: rule.name.to_owned(),
                expected: rule.kind,
                found,
            });
        }
    }
    Ok(record)
}
