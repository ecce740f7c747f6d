//! Conversion engine
//!
//! Volume and weight convert by ratio through a base unit (milliliters,
//! grams). Temperature converts affinely through Celsius. Every function
//! here is pure; the static tables are the only shared data.

use serde::{Serialize, Deserialize};
use crate::{Category, Unit, ConversionError};
use crate::format::format_for_display;
use crate::parse::{parse_freeform_quantity, resolve_unit};

/// A single conversion request, built per user action
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub category: Category,
    pub magnitude: f64,
    pub from: Unit,
    pub to: Unit,
}

impl ConversionRequest {
    pub fn new(category: Category, magnitude: f64, from: Unit, to: Unit) -> Self {
        Self { category, magnitude, from, to }
    }

    pub fn execute(&self) -> Result<Conversion, ConversionError> {
        convert(self.category, self.magnitude, self.from, self.to)
    }
}

/// Successful conversion; `magnitude` is unrounded
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    pub input: f64,
    pub magnitude: f64,
    pub from: Unit,
    pub to: Unit,
}

impl Conversion {
    /// Converted magnitude formatted for display
    pub fn display(&self) -> String {
        format_for_display(self.magnitude)
    }

    /// Result line such as "1 CUP ≈ 240 ML"
    pub fn summary(&self) -> String {
        format!(
            "{} {} ≈ {} {}",
            self.input,
            self.from.symbol().to_uppercase(),
            self.display(),
            self.to.symbol().to_uppercase(),
        )
    }
}

/// Convert `magnitude` from one canonical unit to another within `category`
pub fn convert(category: Category, magnitude: f64, from: Unit, to: Unit) -> Result<Conversion, ConversionError> {
    if !magnitude.is_finite() {
        return Err(ConversionError::NonFiniteMagnitude(magnitude));
    }
    for unit in [from, to] {
        if !category.contains(unit) {
            return Err(ConversionError::UnitCategoryMismatch { category, unit });
        }
    }

    let converted = if from == to {
        magnitude
    } else {
        match category {
            Category::Volume | Category::Weight => convert_ratio(magnitude, from, to),
            Category::Temperature => convert_temperature(magnitude, from, to),
        }
    };

    Ok(Conversion { input: magnitude, magnitude: converted, from, to })
}

// Both helpers run only after the category membership check in `convert`

fn convert_ratio(magnitude: f64, from: Unit, to: Unit) -> f64 {
    match (from.factor(), to.factor()) {
        (Some(from_factor), Some(to_factor)) => magnitude * from_factor / to_factor,
        _ => unreachable!("{} to {} is not a ratio conversion", from, to),
    }
}

fn convert_temperature(magnitude: f64, from: Unit, to: Unit) -> f64 {
    match from.to_celsius(magnitude).and_then(|c| to.from_celsius(c)) {
        Some(converted) => converted,
        None => unreachable!("{} to {} is not a temperature conversion", from, to),
    }
}

/// Convert from free text: `from_text` is "<number> <unit>", `to_text` a
/// unit phrase. Units are resolved with `category` as context.
pub fn convert_text(category: Category, from_text: &str, to_text: &str) -> Result<Conversion, ConversionError> {
    let quantity = parse_freeform_quantity(from_text)
        .ok_or_else(|| ConversionError::MalformedQuantityText(from_text.trim().to_string()))?;

    let from = resolve_unit(category, &quantity.unit_token)
        .ok_or_else(|| ConversionError::UnmatchedUnitToken(quantity.unit_token.clone()))?;
    let to = resolve_unit(category, to_text)
        .ok_or_else(|| ConversionError::UnmatchedUnitToken(to_text.trim().to_string()))?;

    convert(category, quantity.magnitude, from, to)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(actual: f64, expected: f64, tol: f64) -> bool {
        (actual - expected).abs() <= tol
    }

    fn relative(actual: f64, expected: f64, tol: f64) -> bool {
        if expected == 0.0 {
            return actual.abs() <= tol;
        }
        ((actual - expected) / expected).abs() <= tol
    }

    const SAMPLES: [f64; 7] = [0.0, 1.0, -3.5, 0.125, 42.0, 180.0, 12345.678];

    #[test]
    fn test_cup_to_ml() {
        let c = convert(Category::Volume, 1.0, Unit::Cup, Unit::Milliliter).unwrap();
        assert!(approx(c.magnitude, 240.0, 1e-9));
        assert_eq!(c.display(), "240");
    }

    #[test]
    fn test_kg_to_g() {
        let c = convert(Category::Weight, 1.0, Unit::Kilogram, Unit::Gram).unwrap();
        assert!(approx(c.magnitude, 1000.0, 1e-9));
        assert_eq!(c.display(), "1000");
    }

    #[test]
    fn test_celsius_to_fahrenheit() {
        let c = convert(Category::Temperature, 180.0, Unit::Celsius, Unit::Fahrenheit).unwrap();
        assert!(approx(c.magnitude, 356.0, 1e-9));
        assert_eq!(c.display(), "356");
    }

    #[test]
    fn test_absolute_zero() {
        let c = convert(Category::Temperature, 0.0, Unit::Kelvin, Unit::Celsius).unwrap();
        assert!(approx(c.magnitude, -273.15, 1e-9));
    }

    #[test]
    fn test_fahrenheit_to_kelvin() {
        let c = convert(Category::Temperature, 32.0, Unit::Fahrenheit, Unit::Kelvin).unwrap();
        assert!(approx(c.magnitude, 273.15, 1e-9));
    }

    #[test]
    fn test_round_trip_ratio_categories() {
        for category in [Category::Volume, Category::Weight] {
            for &a in category.units() {
                for &b in category.units() {
                    for x in SAMPLES {
                        let there = convert(category, x, a, b).unwrap().magnitude;
                        let back = convert(category, there, b, a).unwrap().magnitude;
                        assert!(relative(back, x, 1e-9), "{} {} -> {} -> {}", x, a, b, back);
                    }
                }
            }
        }
    }

    #[test]
    fn test_round_trip_temperature() {
        let category = Category::Temperature;
        for &a in category.units() {
            for &b in category.units() {
                for x in SAMPLES {
                    let there = convert(category, x, a, b).unwrap().magnitude;
                    let back = convert(category, there, b, a).unwrap().magnitude;
                    assert!(approx(back, x, 1e-9), "{} {} -> {} -> {}", x, a, b, back);
                }
            }
        }
    }

    #[test]
    fn test_identity_is_exact() {
        for unit in Unit::ALL {
            for x in SAMPLES {
                let c = convert(unit.category(), x, unit, unit).unwrap();
                assert_eq!(c.magnitude, x);
            }
        }
    }

    #[test]
    fn test_category_rejection() {
        let err = convert(Category::Volume, 1.0, Unit::Kilogram, Unit::Gram).unwrap_err();
        assert_eq!(err, ConversionError::UnitCategoryMismatch {
            category: Category::Volume,
            unit: Unit::Kilogram,
        });

        let err = convert(Category::Temperature, 1.0, Unit::Celsius, Unit::Cup).unwrap_err();
        assert_eq!(err, ConversionError::UnitCategoryMismatch {
            category: Category::Temperature,
            unit: Unit::Cup,
        });
    }

    #[test]
    fn test_non_finite_rejection() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = convert(Category::Volume, bad, Unit::Milliliter, Unit::Liter).unwrap_err();
            assert!(matches!(err, ConversionError::NonFiniteMagnitude(_)));
        }
    }

    #[test]
    fn test_non_finite_checked_before_category() {
        let err = convert(Category::Volume, f64::NAN, Unit::Kilogram, Unit::Gram).unwrap_err();
        assert!(matches!(err, ConversionError::NonFiniteMagnitude(_)));
    }

    #[test]
    fn test_eighth_cup_display() {
        let c = convert(Category::Volume, 30.0, Unit::Milliliter, Unit::Cup).unwrap();
        assert_eq!(c.magnitude, 0.125);
        assert_eq!(c.summary(), "30 ML ≈ 0.13 CUP");
    }

    #[test]
    fn test_request_execute() {
        let req = ConversionRequest::new(Category::Weight, 2.0, Unit::Pound, Unit::Ounce);
        let c = req.execute().unwrap();
        assert!(approx(c.magnitude, 2.0 * 453.592 / 28.3495, 1e-12));
    }

    #[test]
    fn test_summary_line() {
        let c = convert(Category::Volume, 1.0, Unit::Cup, Unit::Milliliter).unwrap();
        assert_eq!(c.summary(), "1 CUP ≈ 240 ML");

        let c = convert(Category::Temperature, 180.0, Unit::Celsius, Unit::Fahrenheit).unwrap();
        assert_eq!(c.summary(), "180 C ≈ 356 F");
    }

    #[test]
    fn test_convert_text() {
        let c = convert_text(Category::Volume, "2 cups", "ml").unwrap();
        assert!(approx(c.magnitude, 480.0, 1e-9));

        let c = convert_text(Category::Temperature, "350 F", "C").unwrap();
        assert_eq!(c.to, Unit::Celsius);
        assert!(approx(c.magnitude, 176.666_666_666_666_7, 1e-9));
    }

    #[test]
    fn test_convert_text_errors() {
        assert_eq!(
            convert_text(Category::Volume, "two cups", "ml"),
            Err(ConversionError::MalformedQuantityText("two cups".to_string()))
        );
        assert_eq!(
            convert_text(Category::Volume, "2 smidgens", "ml"),
            Err(ConversionError::UnmatchedUnitToken("smidgens".to_string()))
        );
        assert_eq!(
            convert_text(Category::Volume, "2 cups", "jiggers"),
            Err(ConversionError::UnmatchedUnitToken("jiggers".to_string()))
        );
        assert!(matches!(
            convert_text(Category::Weight, "1 cup", "g"),
            Err(ConversionError::UnitCategoryMismatch { .. })
        ));
    }
}
