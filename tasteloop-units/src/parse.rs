//! Free-text parsing - unit tokens and "<number> <unit>" quantities

use serde::{Serialize, Deserialize};
use crate::{Category, Unit};
use crate::units::UNITS;

/// A quantity read from free text, unit not yet resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreeformQuantity {
    pub magnitude: f64,
    /// Unit phrase as written, tokens joined by a single space
    pub unit_token: String,
}

impl FreeformQuantity {
    /// Resolve the unit phrase to a canonical unit
    pub fn unit(&self) -> Option<Unit> {
        normalize_unit_token(&self.unit_token)
    }
}

/// Resolve free text to a canonical unit.
///
/// Unmatched input yields None; the caller decides whether that is a
/// parse failure or an unknown unit.
pub fn normalize_unit_token(raw: &str) -> Option<Unit> {
    UNITS.get(raw)
}

/// Resolve a unit with the category as context.
///
/// A canonical symbol of `category` wins over the global aliases, so "C"
/// picked from a temperature selector is celsius rather than cup.
pub fn resolve_unit(category: Category, raw: &str) -> Option<Unit> {
    let folded = raw.trim().to_lowercase();
    if let Some(unit) = category.units().iter().copied().find(|u| u.symbol() == folded) {
        return Some(unit);
    }
    normalize_unit_token(raw)
}

/// Parse text shaped like "1.5 cups" or "200 g"
pub fn parse_freeform_quantity(raw: &str) -> Option<FreeformQuantity> {
    let mut tokens = raw.split_whitespace();

    let magnitude = parse_finite(tokens.next()?)?;
    let unit_token = tokens.collect::<Vec<_>>().join(" ");
    if unit_token.is_empty() {
        return None;
    }

    Some(FreeformQuantity { magnitude, unit_token })
}

/// Parse a decimal number, rejecting NaN and infinities
pub fn parse_finite(token: &str) -> Option<f64> {
    token.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_equivalent_spellings() {
        let tbsp = normalize_unit_token("tbsp");
        assert_eq!(tbsp, Some(Unit::Tablespoon));
        assert_eq!(normalize_unit_token("Tablespoons"), tbsp);
        assert_eq!(normalize_unit_token("T"), tbsp);
    }

    #[test]
    fn test_normalize_multi_word() {
        assert_eq!(normalize_unit_token(" Fluid Ounce "), Some(Unit::FluidOunce));
    }

    #[test]
    fn test_normalize_unknown() {
        assert_eq!(normalize_unit_token("smidgen"), None);
        assert_eq!(normalize_unit_token(""), None);
    }

    #[test]
    fn test_resolve_unit_in_category() {
        assert_eq!(resolve_unit(Category::Temperature, "C"), Some(Unit::Celsius));
        assert_eq!(resolve_unit(Category::Volume, "c"), Some(Unit::Cup));
        assert_eq!(resolve_unit(Category::Weight, "c"), Some(Unit::Cup));
        assert_eq!(resolve_unit(Category::Volume, "T"), Some(Unit::Tablespoon));
        assert_eq!(resolve_unit(Category::Temperature, "fahrenheit"), Some(Unit::Fahrenheit));
    }

    #[test]
    fn test_parse_freeform() {
        let q = parse_freeform_quantity("1.5 cups").unwrap();
        assert_eq!(q.magnitude, 1.5);
        assert_eq!(q.unit_token, "cups");
        assert_eq!(q.unit(), Some(Unit::Cup));
    }

    #[test]
    fn test_parse_freeform_joins_words() {
        let q = parse_freeform_quantity("  -2   fluid    ounces ").unwrap();
        assert_eq!(q.magnitude, -2.0);
        assert_eq!(q.unit_token, "fluid ounces");
        assert_eq!(q.unit(), Some(Unit::FluidOunce));
    }

    #[test]
    fn test_parse_freeform_keeps_case() {
        let q = parse_freeform_quantity("2 T").unwrap();
        assert_eq!(q.unit_token, "T");
        assert_eq!(q.unit(), Some(Unit::Tablespoon));
    }

    #[test]
    fn test_parse_freeform_rejects() {
        assert!(parse_freeform_quantity("").is_none());
        assert!(parse_freeform_quantity("200").is_none());
        assert!(parse_freeform_quantity("abc g").is_none());
        assert!(parse_freeform_quantity("NaN g").is_none());
        assert!(parse_freeform_quantity("inf ml").is_none());
        assert!(parse_freeform_quantity("200g").is_none());
    }

    #[test]
    fn test_parse_finite() {
        assert_eq!(parse_finite("+3"), Some(3.0));
        assert_eq!(parse_finite("0.25"), Some(0.25));
        assert_eq!(parse_finite("-infinity"), None);
    }
}
