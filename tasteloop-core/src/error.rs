//! Error values returned by Tasteloop functions
//!
//! A failed call produces a `TasteloopError` inside `Value::Error`. The
//! `code` is stable and meant for programs; `message` and `suggestion` are
//! for people.

use std::fmt;
use serde::{Deserialize, Serialize};

/// Stable error codes
pub mod codes {
    // Calling convention
    pub const UNDEFINED_FUNC: &str = "UNDEFINED_FUNC";
    pub const UNDEFINED_FIELD: &str = "UNDEFINED_FIELD";
    pub const TYPE_ERROR: &str = "TYPE_ERROR";
    pub const ARG_COUNT: &str = "ARG_COUNT";
    pub const ARG_TYPE: &str = "ARG_TYPE";
    pub const NOT_FOUND: &str = "NOT_FOUND";

    // Unit conversion
    pub const UNMATCHED_UNIT: &str = "UNMATCHED_UNIT";
    pub const MALFORMED_QUANTITY: &str = "MALFORMED_QUANTITY";
    pub const UNIT_CATEGORY_MISMATCH: &str = "UNIT_CATEGORY_MISMATCH";
    pub const NON_FINITE: &str = "NON_FINITE";
    pub const UNKNOWN_CATEGORY: &str = "UNKNOWN_CATEGORY";

    // Recipe scaling
    pub const INVALID_SERVINGS: &str = "INVALID_SERVINGS";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TasteloopError {
    pub code: String,
    pub message: String,
    /// What the caller can change to make the call succeed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl TasteloopError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(self, suggestion: impl Into<String>) -> Self {
        Self { suggestion: Some(suggestion.into()), ..self }
    }

    pub fn undefined_func(name: &str) -> Self {
        Self::new(codes::UNDEFINED_FUNC, format!("no function named '{}'", name))
    }

    pub fn undefined_field(field: &str) -> Self {
        Self::new(codes::UNDEFINED_FIELD, format!("object has no field '{}'", field))
    }

    pub fn type_error(expected: &str, found: &str) -> Self {
        Self::new(codes::TYPE_ERROR, format!("expected {}, found {}", expected, found))
    }

    /// Too few arguments for `func`
    pub fn arg_count(func: &str, expected: usize, found: usize) -> Self {
        Self::new(
            codes::ARG_COUNT,
            format!("{} takes {} argument(s), {} given", func, expected, found),
        )
        .with_suggestion(format!("See help for '{}'", func))
    }

    pub fn arg_type(func: &str, arg: &str, expected: &str, found: &str) -> Self {
        Self::new(
            codes::ARG_TYPE,
            format!("{}: '{}' must be {}, found {}", func, arg, expected, found),
        )
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(codes::NOT_FOUND, message)
    }
}

impl fmt::Display for TasteloopError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        match &self.suggestion {
            Some(hint) => write!(f, " (suggestion: {})", hint),
            None => Ok(()),
        }
    }
}

impl std::error::Error for TasteloopError {}
