//! Unit conversion functions for Tasteloop

use std::collections::HashMap;
use tasteloop_plugin::prelude::*;
use crate::{Category, Unit, Conversion, ConversionError, UNITS};
use crate::conversion::{convert, convert_text};
use crate::format::format_for_display;
use crate::parse::{normalize_unit_token, parse_freeform_quantity, resolve_unit};

/// Map an engine error onto the structured error returned to callers
fn conversion_error_to_tasteloop(e: ConversionError) -> TasteloopError {
    let suggestion = match &e {
        ConversionError::UnmatchedUnitToken(_) => {
            "Use a unit such as ml, tsp, tbsp, cup, g, kg, oz, lb, C or F".to_string()
        }
        ConversionError::MalformedQuantityText(_) => {
            "Write the quantity as '<number> <unit>', e.g. '1.5 cups'".to_string()
        }
        ConversionError::UnitCategoryMismatch { category, .. } => category.hint().to_string(),
        ConversionError::NonFiniteMagnitude(_) => "Provide a finite number".to_string(),
        ConversionError::UnknownCategory(_) => "Use volume, weight or temperature".to_string(),
    };
    TasteloopError::new(e.code(), e.to_string()).with_suggestion(suggestion)
}

impl From<ConversionError> for TasteloopError {
    fn from(e: ConversionError) -> Self {
        conversion_error_to_tasteloop(e)
    }
}

fn conversion_to_value(c: &Conversion) -> Value {
    let mut obj = HashMap::new();
    obj.insert("value".to_string(), Value::Number(c.magnitude));
    obj.insert("from".to_string(), Value::Text(c.from.symbol().to_string()));
    obj.insert("to".to_string(), Value::Text(c.to.symbol().to_string()));
    obj.insert("display".to_string(), Value::Text(c.display()));
    obj.insert("summary".to_string(), Value::Text(c.summary()));
    Value::Object(obj)
}

/// Resolve selector or typed units, inferring the category from the source
/// unit when none is given.
fn resolve_units(from: &str, to: &str, category: Option<&str>) -> Result<(Category, Unit, Unit), ConversionError> {
    let (category, from_unit) = match category {
        Some(c) => {
            let category: Category = c.parse()?;
            let unit = resolve_unit(category, from)
                .ok_or_else(|| ConversionError::UnmatchedUnitToken(from.trim().to_string()))?;
            (category, unit)
        }
        None => {
            let unit = normalize_unit_token(from)
                .ok_or_else(|| ConversionError::UnmatchedUnitToken(from.trim().to_string()))?;
            (unit.category(), unit)
        }
    };
    let to_unit = resolve_unit(category, to)
        .ok_or_else(|| ConversionError::UnmatchedUnitToken(to.trim().to_string()))?;
    Ok((category, from_unit, to_unit))
}

// ============ convert ============

pub struct Convert;

static CONVERT_ARGS: [ArgMeta; 4] = [
    ArgMeta::required("value", ArgKind::Number, "Value to convert"),
    ArgMeta::required("from", ArgKind::Text, "Source unit (e.g., \"cup\")"),
    ArgMeta::required("to", ArgKind::Text, "Target unit (e.g., \"ml\")"),
    ArgMeta::optional("category", ArgKind::Text, "volume, weight or temperature; inferred from the source unit when omitted", "inferred"),
];

static CONVERT_EXAMPLES: [&str; 3] = [
    "convert(1, \"cup\", \"ml\") → 240",
    "convert(180, \"C\", \"F\", \"temperature\") → 356",
    "convert(1, \"kg\", \"g\") → 1000",
];

static CONVERT_RELATED: [&str; 3] = ["convert_text", "format_display", "category_units"];

impl FunctionPlugin for Convert {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "convert",
            description: "Convert a value from one kitchen unit to another",
            usage: "convert(value, from, to, [category])",
            args: &CONVERT_ARGS,
            returns: "Number",
            examples: &CONVERT_EXAMPLES,
            category: "units",
            related: &CONVERT_RELATED,
        }
    }

    fn call(&self, args: &[Value]) -> Value {
        if args.len() < 3 {
            return Value::Error(TasteloopError::arg_count("convert", 3, args.len()));
        }

        let value = match args[0].as_number() {
            Some(n) => n,
            None => return Value::Error(TasteloopError::arg_type("convert", "value", "Number", args[0].type_name())),
        };

        let from_str = match args[1].as_text() {
            Some(s) => s,
            None => return Value::Error(TasteloopError::arg_type("convert", "from", "Text", args[1].type_name())),
        };

        let to_str = match args[2].as_text() {
            Some(s) => s,
            None => return Value::Error(TasteloopError::arg_type("convert", "to", "Text", args[2].type_name())),
        };

        let category = match args.get(3) {
            None | Some(Value::Null) => None,
            Some(Value::Text(s)) => Some(s.as_str()),
            Some(other) => return Value::Error(TasteloopError::arg_type("convert", "category", "Text", other.type_name())),
        };

        let result = resolve_units(from_str, to_str, category)
            .and_then(|(category, from, to)| convert(category, value, from, to));

        match result {
            Ok(c) => Value::Number(c.magnitude),
            Err(e) => Value::Error(e.into()),
        }
    }
}

// ============ convert_text ============

pub struct ConvertText;

static CONVERT_TEXT_ARGS: [ArgMeta; 3] = [
    ArgMeta::required("category", ArgKind::Text, "volume, weight or temperature"),
    ArgMeta::required("from", ArgKind::Text, "Quantity as free text (e.g., \"1.5 cups\")"),
    ArgMeta::required("to", ArgKind::Text, "Target unit (e.g., \"ml\")"),
];

static CONVERT_TEXT_EXAMPLES: [&str; 2] = [
    "convert_text(\"volume\", \"1.5 cups\", \"ml\") → {value: 360, display: \"360\", summary: \"1.5 CUP ≈ 360 ML\"}",
    "convert_text(\"weight\", \"200 g\", \"oz\") → {value: 7.05, display: \"7.05\"}",
];

static CONVERT_TEXT_RELATED: [&str; 2] = ["convert", "parse_quantity"];

impl FunctionPlugin for ConvertText {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "convert_text",
            description: "Convert a free-text quantity and return the formatted result",
            usage: "convert_text(category, from, to)",
            args: &CONVERT_TEXT_ARGS,
            returns: "Object {value, from, to, display, summary}",
            examples: &CONVERT_TEXT_EXAMPLES,
            category: "units",
            related: &CONVERT_TEXT_RELATED,
        }
    }

    fn call(&self, args: &[Value]) -> Value {
        if args.len() < 3 {
            return Value::Error(TasteloopError::arg_count("convert_text", 3, args.len()));
        }

        let mut texts = Vec::with_capacity(3);
        for (arg, meta) in args.iter().zip(CONVERT_TEXT_ARGS.iter()) {
            match arg.as_text() {
                Some(s) => texts.push(s),
                None => return Value::Error(TasteloopError::arg_type("convert_text", meta.name, "Text", arg.type_name())),
            }
        }

        let result = texts[0].parse::<Category>()
            .and_then(|category| convert_text(category, texts[1], texts[2]));

        match result {
            Ok(c) => conversion_to_value(&c),
            Err(e) => Value::Error(e.into()),
        }
    }
}

// ============ normalize_unit ============

pub struct NormalizeUnit;

static NORMALIZE_UNIT_ARGS: [ArgMeta; 1] = [
    ArgMeta::required("text", ArgKind::Text, "Unit as written (e.g., \"Tablespoons\")"),
];

static NORMALIZE_UNIT_EXAMPLES: [&str; 3] = [
    "normalize_unit(\"Tablespoons\") → \"tbsp\"",
    "normalize_unit(\"T\") → \"tbsp\"",
    "normalize_unit(\"smidgen\") → null",
];

static NORMALIZE_UNIT_RELATED: [&str; 1] = ["parse_quantity"];

impl FunctionPlugin for NormalizeUnit {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "normalize_unit",
            description: "Resolve a unit spelling or abbreviation to its canonical symbol",
            usage: "normalize_unit(text)",
            args: &NORMALIZE_UNIT_ARGS,
            returns: "Text or Null",
            examples: &NORMALIZE_UNIT_EXAMPLES,
            category: "units",
            related: &NORMALIZE_UNIT_RELATED,
        }
    }

    fn call(&self, args: &[Value]) -> Value {
        if args.is_empty() {
            return Value::Error(TasteloopError::arg_count("normalize_unit", 1, 0));
        }

        let text = match args[0].as_text() {
            Some(s) => s,
            None => return Value::Error(TasteloopError::arg_type("normalize_unit", "text", "Text", args[0].type_name())),
        };

        match normalize_unit_token(text) {
            Some(unit) => Value::Text(unit.symbol().to_string()),
            None => Value::Null,
        }
    }
}

// ============ parse_quantity ============

pub struct ParseQuantity;

static PARSE_QUANTITY_ARGS: [ArgMeta; 1] = [
    ArgMeta::required("text", ArgKind::Text, "Quantity as free text (e.g., \"200 g\")"),
];

static PARSE_QUANTITY_EXAMPLES: [&str; 2] = [
    "parse_quantity(\"1.5 cups\") → {value: 1.5, unit_token: \"cups\", unit: \"cup\"}",
    "parse_quantity(\"lots\") → null",
];

static PARSE_QUANTITY_RELATED: [&str; 2] = ["normalize_unit", "convert_text"];

impl FunctionPlugin for ParseQuantity {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "parse_quantity",
            description: "Split free text into a number and a unit phrase",
            usage: "parse_quantity(text)",
            args: &PARSE_QUANTITY_ARGS,
            returns: "Object {value, unit_token, unit} or Null",
            examples: &PARSE_QUANTITY_EXAMPLES,
            category: "units",
            related: &PARSE_QUANTITY_RELATED,
        }
    }

    fn call(&self, args: &[Value]) -> Value {
        if args.is_empty() {
            return Value::Error(TasteloopError::arg_count("parse_quantity", 1, 0));
        }

        let text = match args[0].as_text() {
            Some(s) => s,
            None => return Value::Error(TasteloopError::arg_type("parse_quantity", "text", "Text", args[0].type_name())),
        };

        let quantity = match parse_freeform_quantity(text) {
            Some(q) => q,
            None => return Value::Null,
        };

        let mut obj = HashMap::new();
        obj.insert("value".to_string(), Value::Number(quantity.magnitude));
        obj.insert("unit".to_string(), match quantity.unit() {
            Some(unit) => Value::Text(unit.symbol().to_string()),
            None => Value::Null,
        });
        obj.insert("unit_token".to_string(), Value::Text(quantity.unit_token));
        Value::Object(obj)
    }
}

// ============ format_display ============

pub struct FormatDisplay;

static FORMAT_DISPLAY_ARGS: [ArgMeta; 1] = [
    ArgMeta::required("value", ArgKind::Number, "Magnitude to format"),
];

static FORMAT_DISPLAY_EXAMPLES: [&str; 3] = [
    "format_display(7.4567) → \"7.46\"",
    "format_display(42.19) → \"42.2\"",
    "format_display(123.4) → \"123\"",
];

static FORMAT_DISPLAY_RELATED: [&str; 1] = ["convert"];

impl FunctionPlugin for FormatDisplay {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "format_display",
            description: "Format a magnitude with precision based on its size",
            usage: "format_display(value)",
            args: &FORMAT_DISPLAY_ARGS,
            returns: "Text",
            examples: &FORMAT_DISPLAY_EXAMPLES,
            category: "units",
            related: &FORMAT_DISPLAY_RELATED,
        }
    }

    fn call(&self, args: &[Value]) -> Value {
        if args.is_empty() {
            return Value::Error(TasteloopError::arg_count("format_display", 1, 0));
        }

        match args[0].as_number() {
            Some(n) => Value::Text(format_for_display(n)),
            None => Value::Error(TasteloopError::arg_type("format_display", "value", "Number", args[0].type_name())),
        }
    }
}

// ============ category_units ============

pub struct CategoryUnits;

static CATEGORY_UNITS_ARGS: [ArgMeta; 1] = [
    ArgMeta::required("category", ArgKind::Text, "volume, weight or temperature"),
];

static CATEGORY_UNITS_EXAMPLES: [&str; 1] = [
    "category_units(\"weight\") → {label: \"Weight\", units: [\"mg\", \"g\", \"kg\", \"oz\", \"lb\"]}",
];

static CATEGORY_UNITS_RELATED: [&str; 1] = ["convert"];

impl FunctionPlugin for CategoryUnits {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "category_units",
            description: "List the units a category accepts, in selector order",
            usage: "category_units(category)",
            args: &CATEGORY_UNITS_ARGS,
            returns: "Object {category, label, hint, units, aliases}",
            examples: &CATEGORY_UNITS_EXAMPLES,
            category: "units",
            related: &CATEGORY_UNITS_RELATED,
        }
    }

    fn call(&self, args: &[Value]) -> Value {
        if args.is_empty() {
            return Value::Error(TasteloopError::arg_count("category_units", 1, 0));
        }

        let text = match args[0].as_text() {
            Some(s) => s,
            None => return Value::Error(TasteloopError::arg_type("category_units", "category", "Text", args[0].type_name())),
        };

        let category: Category = match text.parse() {
            Ok(c) => c,
            Err(e) => return Value::Error(e.into()),
        };

        let mut obj = HashMap::new();
        obj.insert("category".to_string(), Value::Text(category.id().to_string()));
        obj.insert("label".to_string(), Value::Text(category.label().to_string()));
        obj.insert("hint".to_string(), Value::Text(category.hint().to_string()));
        obj.insert("units".to_string(), Value::List(
            category.units().iter().map(|u| Value::Text(u.symbol().to_string())).collect()
        ));
        obj.insert("aliases".to_string(), Value::Object(
            category.units().iter()
                .map(|u| {
                    let names = UNITS.aliases_of(*u).into_iter().map(Value::from).collect();
                    (u.symbol().to_string(), Value::List(names))
                })
                .collect()
        ));
        Value::Object(obj)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    #[test]
    fn test_error_conversion_keeps_code() {
        let err: TasteloopError = ConversionError::UnmatchedUnitToken("pinch".to_string()).into();
        assert_eq!(err.code, "UNMATCHED_UNIT");
        assert_eq!(err.message, "unknown unit: 'pinch'");
        assert!(err.suggestion.is_some());
    }

    #[test]
    fn test_convert_infers_category() {
        let result = Convert.call(&[Value::Number(1.0), text("cups"), text("ml")]);
        assert_eq!(result.as_number(), Some(240.0));
    }

    #[test]
    fn test_convert_with_category() {
        let result = Convert.call(&[Value::Number(180.0), text("C"), text("F"), text("temperature")]);
        let n = result.as_number().unwrap();
        assert!((n - 356.0).abs() < 1e-9);
    }

    #[test]
    fn test_convert_c_without_category_is_cup() {
        // "c" alone resolves to cup, so asking for fahrenheit is a mismatch
        let result = Convert.call(&[Value::Number(180.0), text("c"), text("f")]);
        let err = result.as_error().unwrap();
        assert_eq!(err.code, "UNIT_CATEGORY_MISMATCH");
        assert_eq!(err.message, "unit 'f' is not valid for Volume");
    }

    #[test]
    fn test_convert_category_mismatch() {
        let result = Convert.call(&[Value::Number(1.0), text("kg"), text("g"), text("volume")]);
        let err = result.as_error().unwrap();
        assert_eq!(err.code, "UNIT_CATEGORY_MISMATCH");
        assert_eq!(err.suggestion.as_deref(), Some(Category::Volume.hint()));
    }

    #[test]
    fn test_convert_non_finite() {
        let result = Convert.call(&[Value::Number(f64::NAN), text("ml"), text("l")]);
        assert_eq!(result.as_error().unwrap().code, "NON_FINITE");
    }

    #[test]
    fn test_convert_arg_errors() {
        assert_eq!(Convert.call(&[Value::Number(1.0)]).as_error().unwrap().code, "ARG_COUNT");
        let result = Convert.call(&[text("1"), text("ml"), text("l")]);
        assert_eq!(result.as_error().unwrap().code, "ARG_TYPE");
    }

    #[test]
    fn test_convert_text_object() {
        let result = ConvertText.call(&[text("volume"), text("1 cup"), text("ml")]);
        assert_eq!(result.get("display").as_text(), Some("240"));
        assert_eq!(result.get("summary").as_text(), Some("1 CUP ≈ 240 ML"));
        assert_eq!(result.get("to").as_text(), Some("ml"));
    }

    #[test]
    fn test_convert_text_malformed() {
        let result = ConvertText.call(&[text("volume"), text("a cup"), text("ml")]);
        assert_eq!(result.as_error().unwrap().code, "MALFORMED_QUANTITY");

        let result = ConvertText.call(&[text("length"), text("1 cup"), text("ml")]);
        assert_eq!(result.as_error().unwrap().code, "UNKNOWN_CATEGORY");
    }

    #[test]
    fn test_normalize_unit() {
        assert_eq!(NormalizeUnit.call(&[text("Tablespoons")]).as_text(), Some("tbsp"));
        assert!(NormalizeUnit.call(&[text("smidgen")]).is_null());
    }

    #[test]
    fn test_parse_quantity() {
        let result = ParseQuantity.call(&[text("1.5 cups")]);
        assert_eq!(result.get("value").as_number(), Some(1.5));
        assert_eq!(result.get("unit_token").as_text(), Some("cups"));
        assert_eq!(result.get("unit").as_text(), Some("cup"));

        let result = ParseQuantity.call(&[text("3 smidgens")]);
        assert!(result.get("unit").is_null());

        assert!(ParseQuantity.call(&[text("lots")]).is_null());
    }

    #[test]
    fn test_format_display() {
        assert_eq!(FormatDisplay.call(&[Value::Number(7.4567)]).as_text(), Some("7.46"));
    }

    #[test]
    fn test_category_units() {
        let result = CategoryUnits.call(&[text("Temp")]);
        assert_eq!(result.get("label").as_text(), Some("Temperature"));
        let units: Vec<String> = result.get("units").as_list().unwrap()
            .iter().map(|v| v.to_string()).collect();
        assert_eq!(units, vec!["c", "f", "k"]);

        let aliases = result.get("aliases").get("f");
        let names: Vec<&str> = aliases.as_list().unwrap().iter().filter_map(Value::as_text).collect();
        assert_eq!(names, vec!["fahrenheit", "°f"]);
    }
}
