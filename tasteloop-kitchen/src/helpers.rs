//! Common kitchen utilities

use tasteloop_core::{TasteloopError, Value};

/// Extract a Number from a Value, returning error context
pub fn extract_number(value: &Value, func: &str, arg: &str) -> Result<f64, TasteloopError> {
    match value {
        Value::Number(n) => Ok(*n),
        Value::Error(e) => Err(e.clone()),
        other => Err(TasteloopError::arg_type(func, arg, "Number", other.type_name())),
    }
}

/// Interpret a number as a whole count of servings
pub fn whole_count(value: f64) -> Option<u32> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64 {
        Some(value as u32)
    } else {
        None
    }
}

/// Interpret a requested servings count: fractions round down and anything
/// below one becomes one. Only non-finite input is rejected.
pub fn clamp_servings(value: f64) -> Option<u32> {
    if !value.is_finite() {
        return None;
    }
    Some(value.floor().clamp(1.0, u32::MAX as f64) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_number() {
        let val = Value::Number(42.0);
        assert_eq!(extract_number(&val, "test", "arg"), Ok(42.0));

        let err = extract_number(&Value::from("42"), "test", "arg").unwrap_err();
        assert_eq!(err.code, "ARG_TYPE");
    }

    #[test]
    fn test_whole_count() {
        assert_eq!(whole_count(4.0), Some(4));
        assert_eq!(whole_count(0.0), Some(0));
        assert_eq!(whole_count(2.5), None);
        assert_eq!(whole_count(-1.0), None);
        assert_eq!(whole_count(f64::NAN), None);
    }

    #[test]
    fn test_clamp_servings() {
        assert_eq!(clamp_servings(3.0), Some(3));
        assert_eq!(clamp_servings(2.7), Some(2));
        assert_eq!(clamp_servings(0.5), Some(1));
        assert_eq!(clamp_servings(0.0), Some(1));
        assert_eq!(clamp_servings(-1.0), Some(1));
        assert_eq!(clamp_servings(f64::INFINITY), None);
    }
}
