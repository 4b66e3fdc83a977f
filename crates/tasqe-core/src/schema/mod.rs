//! Canonical to-do schema and its structural validator.
//!
//! The schema is kept as plain data ([`ObjectSpec`] / [`FieldSpec`]) so the
//! same description drives both local validation ([`validate`]) and the JSON
//! schema sent to the provider's structured-output endpoint
//! ([`response_format`]).

use serde_json::{json, Map, Value};

mod validate;


pub use validate::{validate, ValidationError, ViolationKind};

/// Name under which the schema is registered with the provider.
pub const SCHEMA_NAME: &str = "todo_basic";

/// Declared type of a single field.
#[derive(Debug, Clone, Copy)]
pub enum FieldType {
    String,
    Boolean,
    /// String holding a calendar date written `YYYY-MM-DD`
    Date,
    /// Array whose elements are objects of the given shape
    Array(&'static ObjectSpec),
}

impl FieldType {
    /// JSON type keyword for this field type.
    pub fn json_type(&self) -> &'static str {
        match self {
            FieldType::String | FieldType::Date => "string",
            FieldType::Boolean => "boolean",
            FieldType::Array(_) => "array",
        }
    }
}

/// One named field of an object shape.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub ty: FieldType,
    /// `null` is an accepted value; the key itself is still required
    pub nullable: bool,
    pub description: &'static str,
}

/// Object shape: every listed field is required.
#[derive(Debug)]
pub struct ObjectSpec {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

const fn field(
    name: &'static str,
    ty: FieldType,
    nullable: bool,
    description: &'static str,
) -> FieldSpec {
    FieldSpec {
        name,
        ty,
        nullable,
        description,
    }
}

pub static SUBTASK_SPEC: ObjectSpec = ObjectSpec {
    name: "Subtask",
    fields: &[
        field("name", FieldType::String, false, "Short name of the subtask"),
        field("time", FieldType::String, false, "Time estimate, e.g. \"15 mins\""),
        field("done", FieldType::Boolean, false, "Whether the subtask is complete"),
    ],
};

pub static TASK_SPEC: ObjectSpec = ObjectSpec {
    name: "Task",
    fields: &[
        field("name", FieldType::String, false, "Short name of the task"),
        field("descr", FieldType::String, true, "Longer description of the task"),
        field("time", FieldType::String, false, "Time estimate, e.g. \"2 hrs\""),
        field("date", FieldType::Date, true, "Due date as YYYY-MM-DD"),
        field("done", FieldType::Boolean, false, "Whether the task is complete"),
        field(
            "subtasks",
            FieldType::Array(&SUBTASK_SPEC),
            true,
            "Undated steps of the task",
        ),
    ],
};

pub static CATEGORY_SPEC: ObjectSpec = ObjectSpec {
    name: "Category",
    fields: &[
        field("name", FieldType::String, false, "Broad grouping such as Health or Academics"),
        field("items", FieldType::Array(&TASK_SPEC), false, "Tasks in this category"),
    ],
};

pub static TODO_DOCUMENT_SPEC: ObjectSpec = ObjectSpec {
    name: "TodoDocument",
    fields: &[field(
        "todo",
        FieldType::Array(&CATEGORY_SPEC),
        false,
        "Categories of the to-do list",
    )],
};

impl FieldSpec {
    /// JSON schema fragment for this field.
    pub fn to_json_schema(&self) -> Value {
        let mut schema = match self.ty {
            FieldType::String | FieldType::Boolean => json!({ "type": self.ty.json_type() }),
            FieldType::Date => json!({
                "type": "string",
                "pattern": "^\\d{4}-\\d{2}-\\d{2}$",
            }),
            FieldType::Array(items) => json!({
                "type": "array",
                "items": items.to_json_schema(),
            }),
        };
        if self.nullable {
            schema["type"] = json!([self.ty.json_type(), "null"]);
        }
        schema["description"] = json!(self.description);
        schema
    }
}

impl ObjectSpec {
    /// Strict JSON schema for this object: all fields required, no extras.
    pub fn to_json_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .fields
            .iter()
            .map(|f| (f.name.to_string(), f.to_json_schema()))
            .collect();
        let required: Vec<&str> = self.fields.iter().map(|f| f.name).collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
            "additionalProperties": false,
        })
    }
}

/// The `text.format` block of a structured-completion request.
pub fn response_format() -> Value {
    json!({
        "type": "json_schema",
        "name": SCHEMA_NAME,
        "schema": TODO_DOCUMENT_SPEC.to_json_schema(),
        "strict": true,
    })
}
