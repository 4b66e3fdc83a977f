//! Structural validation of candidate to-do documents.

use std::fmt;

use jiff::civil::Date;
use serde_json::Value;
use thiserror::Error;

use super::{FieldType, ObjectSpec, TODO_DOCUMENT_SPEC};
use crate::models::TodoDocument;

/// Why a candidate failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    MissingField,
    WrongType {
        expected: &'static str,
        found: &'static str,
    },
    InvalidDate(String),
    Decode(String),
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::MissingField => write!(f, "missing required field"),
            ViolationKind::WrongType { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
            ViolationKind::InvalidDate(raw) => write!(f, "'{raw}' is not a YYYY-MM-DD date"),
            ViolationKind::Decode(message) => write!(f, "{message}"),
        }
    }
}

/// First violation found in a candidate, with a JSON-path-like location.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path}: {kind}")]
pub struct ValidationError {
    pub path: String,
    pub kind: ViolationKind,
}

impl ValidationError {
    fn new(path: &str, kind: ViolationKind) -> Self {
        Self {
            path: path.to_string(),
            kind,
        }
    }
}

/// Validates arbitrary JSON against the canonical to-do schema.
///
/// Fails closed: a single mismatch anywhere rejects the whole document.
/// Keys not named by the schema are ignored.
pub fn validate(candidate: &Value) -> Result<TodoDocument, ValidationError> {
    check_object(&TODO_DOCUMENT_SPEC, candidate, "$")?;
    serde_json::from_value(candidate.clone())
        .map_err(|e| ValidationError::new("$", ViolationKind::Decode(e.to_string())))
}

fn check_object(spec: &ObjectSpec, value: &Value, path: &str) -> Result<(), ValidationError> {
    let object = value.as_object().ok_or_else(|| {
        ValidationError::new(
            path,
            ViolationKind::WrongType {
                expected: "object",
                found: json_type(value),
            },
        )
    })?;

    for field in spec.fields {
        let field_path = format!("{path}.{}", field.name);
        let Some(value) = object.get(field.name) else {
            return Err(ValidationError::new(&field_path, ViolationKind::MissingField));
        };
        if value.is_null() && field.nullable {
            continue;
        }
        check_value(field.ty, value, &field_path)?;
    }
    Ok(())
}

fn check_value(ty: FieldType, value: &Value, path: &str) -> Result<(), ValidationError> {
    let mismatch = || {
        ValidationError::new(
            path,
            ViolationKind::WrongType {
                expected: ty.json_type(),
                found: json_type(value),
            },
        )
    };

    match ty {
        FieldType::String => value.as_str().map(drop).ok_or_else(mismatch),
        FieldType::Boolean => value.as_bool().map(drop).ok_or_else(mismatch),
        FieldType::Date => {
            let raw = value.as_str().ok_or_else(mismatch)?;
            if is_iso_date(raw) {
                Ok(())
            } else {
                Err(ValidationError::new(
                    path,
                    ViolationKind::InvalidDate(raw.to_string()),
                ))
            }
        }
        FieldType::Array(items) => {
            let elements = value.as_array().ok_or_else(mismatch)?;
            for (index, element) in elements.iter().enumerate() {
                check_object(items, element, &format!("{path}[{index}]"))?;
            }
            Ok(())
        }
    }
}

/// `YYYY-MM-DD` with a real calendar day.
fn is_iso_date(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    let shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    shaped && raw.parse::<Date>().is_ok()
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
