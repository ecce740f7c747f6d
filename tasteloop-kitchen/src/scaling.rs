//! Servings scaling
//!
//! Ingredient quantities scale linearly with the number of servings.
//! Servings below one are raised to one; a recipe must serve at least one.

use std::collections::HashMap;
use tasteloop_core::{codes, TasteloopError, Value};
use tasteloop_plugin::{ArgKind, ArgMeta, FunctionMeta, FunctionPlugin};

use crate::helpers::{clamp_servings, extract_number, whole_count};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScalingError {
    #[error("{field} must be a whole number of at least 1, got {value}")]
    InvalidServings { field: &'static str, value: f64 },

    #[error("servings must be a finite number, got {value}")]
    NonFiniteServings { value: f64 },
}

impl ScalingError {
    pub fn code(&self) -> &'static str {
        match self {
            ScalingError::InvalidServings { .. } | ScalingError::NonFiniteServings { .. } => {
                codes::INVALID_SERVINGS
            }
        }
    }
}

impl From<ScalingError> for TasteloopError {
    fn from(e: ScalingError) -> Self {
        TasteloopError::new(e.code(), e.to_string())
    }
}

/// Multiplier from `base_servings` to `servings`
pub fn scale_factor(base_servings: u32, servings: u32) -> Result<f64, ScalingError> {
    if base_servings == 0 {
        return Err(ScalingError::InvalidServings {
            field: "base_servings",
            value: 0.0,
        });
    }
    Ok(servings.max(1) as f64 / base_servings as f64)
}

pub fn scale_quantity(base: f64, factor: f64) -> f64 {
    base * factor
}

/// Round to two decimals, dropping trailing zeros ("1.5", "2", "0.33")
pub fn format_quantity(n: f64) -> String {
    let rounded = (n * 100.0).round() / 100.0;
    // -0.0 would print as "-0"
    if rounded == 0.0 {
        return "0".to_string();
    }
    rounded.to_string()
}

/// Note shown under the servings control, e.g. "Scaled x1.50 from base 2 servings"
pub fn scale_note(base_servings: u32, servings: u32) -> Result<String, ScalingError> {
    let factor = scale_factor(base_servings, servings)?;
    Ok(note_for(base_servings, factor))
}

fn note_for(base_servings: u32, factor: f64) -> String {
    let shown = (factor * 100.0).round() / 100.0;
    format!("Scaled x{:.2} from base {} servings", shown, base_servings)
}

fn base_servings_arg(value: &Value) -> Result<u32, TasteloopError> {
    let n = extract_number(value, "scale_servings", "base_servings")?;
    match whole_count(n) {
        Some(count) if count >= 1 => Ok(count),
        _ => Err(ScalingError::InvalidServings { field: "base_servings", value: n }.into()),
    }
}

fn servings_arg(value: &Value) -> Result<u32, TasteloopError> {
    let n = extract_number(value, "scale_servings", "servings")?;
    clamp_servings(n)
        .ok_or_else(|| ScalingError::NonFiniteServings { value: n }.into())
}

// ============ scale_servings ============

pub struct ScaleServings;

static SCALE_SERVINGS_ARGS: [ArgMeta; 3] = [
    ArgMeta::required("value", ArgKind::Number, "Ingredient amount for the base recipe"),
    ArgMeta::required("base_servings", ArgKind::Number, "Servings the recipe was written for"),
    ArgMeta::required("servings", ArgKind::Number, "Servings wanted; fractions round down and values below 1 count as 1"),
];

static SCALE_SERVINGS_EXAMPLES: [&str; 2] = [
    "scale_servings(1, 2, 3) → {value: 1.5, display: \"1.5\", note: \"Scaled x1.50 from base 2 servings\"}",
    "scale_servings(200, 4, 2) → {value: 100, display: \"100\"}",
];

static SCALE_SERVINGS_RELATED: [&str; 1] = ["convert"];

impl FunctionPlugin for ScaleServings {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "scale_servings",
            description: "Scale an ingredient amount from the recipe's servings to a new count",
            usage: "scale_servings(value, base_servings, servings)",
            args: &SCALE_SERVINGS_ARGS,
            returns: "Object {value, display, factor, servings, note}",
            examples: &SCALE_SERVINGS_EXAMPLES,
            category: "kitchen",
            related: &SCALE_SERVINGS_RELATED,
        }
    }

    fn call(&self, args: &[Value]) -> Value {
        if args.len() < 3 {
            return Value::Error(TasteloopError::arg_count("scale_servings", 3, args.len()));
        }

        let amount = match extract_number(&args[0], "scale_servings", "value") {
            Ok(n) if n.is_finite() => n,
            Ok(n) => return Value::Error(TasteloopError::new(
                codes::NON_FINITE,
                format!("magnitude must be a finite number, got {}", n),
            )),
            Err(e) => return Value::Error(e),
        };
        let base = match base_servings_arg(&args[1]) {
            Ok(n) => n,
            Err(e) => return Value::Error(e),
        };
        let servings = match servings_arg(&args[2]) {
            Ok(n) => n,
            Err(e) => return Value::Error(e),
        };

        let factor = match scale_factor(base, servings) {
            Ok(f) => f,
            Err(e) => return Value::Error(e.into()),
        };
        let note = note_for(base, factor);
        let scaled = scale_quantity(amount, factor);

        let mut obj = HashMap::new();
        obj.insert("value".to_string(), Value::Number(scaled));
        obj.insert("display".to_string(), Value::Text(format_quantity(scaled)));
        obj.insert("factor".to_string(), Value::Number(factor));
        obj.insert("servings".to_string(), Value::Number(servings as f64));
        obj.insert("note".to_string(), Value::Text(note));
        Value::Object(obj)
    }
}
