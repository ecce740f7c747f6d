//! Dynamic values exchanged with Tasteloop functions
//!
//! Function arguments and results are `Value`s. A failure is also a value
//! (`Value::Error`) so a caller inspects the result instead of unwinding.

use std::collections::HashMap;
use std::fmt;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use crate::TasteloopError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Value {
    Number(f64),
    Text(String),
    Bool(bool),
    Object(HashMap<String, Value>),
    List(Vec<Value>),
    #[default]
    Null,
    Error(TasteloopError),
}

impl Value {
    pub fn as_number(&self) -> Option<f64> {
        if let Value::Number(n) = self { Some(*n) } else { None }
    }

    pub fn as_text(&self) -> Option<&str> {
        if let Value::Text(s) = self { Some(s.as_str()) } else { None }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        if let Value::List(items) = self { Some(items.as_slice()) } else { None }
    }

    pub fn as_error(&self) -> Option<&TasteloopError> {
        if let Value::Error(e) = self { Some(e) } else { None }
    }

    pub fn is_error(&self) -> bool {
        self.as_error().is_some()
    }

    pub fn is_null(&self) -> bool {
        *self == Value::Null
    }

    /// Field of an object value.
    ///
    /// A missing field or a non-object yields an error value; an error
    /// value propagates unchanged.
    pub fn get(&self, field: &str) -> Value {
        match self {
            Value::Object(fields) => fields
                .get(field)
                .cloned()
                .unwrap_or_else(|| TasteloopError::undefined_field(field).into()),
            Value::Error(_) => self.clone(),
            other => TasteloopError::type_error("Object", other.type_name()).into(),
        }
    }

    /// Name used in argument type errors
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "Number",
            Value::Text(_) => "Text",
            Value::Bool(_) => "Bool",
            Value::Object(_) => "Object",
            Value::List(_) => "List",
            Value::Null => "Null",
            Value::Error(_) => "Error",
        }
    }

    /// Plain JSON rendering for tool output.
    ///
    /// Numbers stay numbers; NaN and infinities have no JSON form and
    /// become null. Errors render as `{code, message, suggestion?}`.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Number(n) => serde_json::Number::from_f64(*n).map_or(JsonValue::Null, JsonValue::Number),
            Value::Text(s) => JsonValue::from(s.as_str()),
            Value::Bool(b) => JsonValue::from(*b),
            Value::Object(fields) => JsonValue::Object(
                fields.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
            Value::List(items) => items.iter().map(Value::to_json).collect(),
            Value::Null => JsonValue::Null,
            Value::Error(e) => serde_json::to_value(e).unwrap_or(JsonValue::Null),
        }
    }

    /// Read plain JSON, as received in tool call arguments
    pub fn from_json(json: &JsonValue) -> Value {
        match json {
            JsonValue::Number(n) => n.as_f64().map_or(Value::Null, Value::Number),
            JsonValue::String(s) => Value::Text(s.clone()),
            JsonValue::Bool(b) => Value::Bool(*b),
            JsonValue::Object(fields) => Value::Object(
                fields.iter().map(|(k, v)| (k.clone(), Value::from_json(v))).collect(),
            ),
            JsonValue::Array(items) => Value::List(items.iter().map(Value::from_json).collect()),
            JsonValue::Null => Value::Null,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Object(fields) => write!(f, "{{{} fields}}", fields.len()),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Null => f.write_str("null"),
            Value::Error(e) => write!(f, "error {}", e.code),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<TasteloopError> for Value {
    fn from(e: TasteloopError) -> Self {
        Value::Error(e)
    }
}
