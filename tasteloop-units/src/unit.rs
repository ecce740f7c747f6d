//! Canonical units with their conversion constants

use std::fmt;
use serde::{Serialize, Deserialize};
use tasteloop_core::codes;
use crate::Category;

/// A canonical unit, scoped to exactly one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "ml")]
    Milliliter,
    #[serde(rename = "l")]
    Liter,
    #[serde(rename = "tsp")]
    Teaspoon,
    #[serde(rename = "tbsp")]
    Tablespoon,
    #[serde(rename = "cup")]
    Cup,
    #[serde(rename = "floz")]
    FluidOunce,
    #[serde(rename = "pint")]
    Pint,
    #[serde(rename = "quart")]
    Quart,
    #[serde(rename = "gallon")]
    Gallon,
    #[serde(rename = "mg")]
    Milligram,
    #[serde(rename = "g")]
    Gram,
    #[serde(rename = "kg")]
    Kilogram,
    #[serde(rename = "oz")]
    Ounce,
    #[serde(rename = "lb")]
    Pound,
    #[serde(rename = "c")]
    Celsius,
    #[serde(rename = "f")]
    Fahrenheit,
    #[serde(rename = "k")]
    Kelvin,
}

impl Unit {
    pub const ALL: [Unit; 17] = [
        Unit::Milliliter, Unit::Liter, Unit::Teaspoon, Unit::Tablespoon, Unit::Cup,
        Unit::FluidOunce, Unit::Pint, Unit::Quart, Unit::Gallon,
        Unit::Milligram, Unit::Gram, Unit::Kilogram, Unit::Ounce, Unit::Pound,
        Unit::Celsius, Unit::Fahrenheit, Unit::Kelvin,
    ];

    /// Canonical identifier (e.g., "tbsp", "kg", "f")
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Milliliter => "ml",
            Unit::Liter => "l",
            Unit::Teaspoon => "tsp",
            Unit::Tablespoon => "tbsp",
            Unit::Cup => "cup",
            Unit::FluidOunce => "floz",
            Unit::Pint => "pint",
            Unit::Quart => "quart",
            Unit::Gallon => "gallon",
            Unit::Milligram => "mg",
            Unit::Gram => "g",
            Unit::Kilogram => "kg",
            Unit::Ounce => "oz",
            Unit::Pound => "lb",
            Unit::Celsius => "c",
            Unit::Fahrenheit => "f",
            Unit::Kelvin => "k",
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Unit::Milliliter | Unit::Liter | Unit::Teaspoon | Unit::Tablespoon | Unit::Cup
            | Unit::FluidOunce | Unit::Pint | Unit::Quart | Unit::Gallon => Category::Volume,
            Unit::Milligram | Unit::Gram | Unit::Kilogram | Unit::Ounce | Unit::Pound => Category::Weight,
            Unit::Celsius | Unit::Fahrenheit | Unit::Kelvin => Category::Temperature,
        }
    }

    /// Exact match against canonical identifiers (no aliases, no case folding)
    pub fn from_symbol(symbol: &str) -> Option<Unit> {
        Unit::ALL.iter().copied().find(|u| u.symbol() == symbol)
    }

    /// Magnitude of one unit in the category base (milliliters or grams).
    ///
    /// Temperature units have no ratio factor and return None.
    pub fn factor(&self) -> Option<f64> {
        let factor = match self {
            Unit::Milliliter => 1.0,
            Unit::Liter => 1000.0,
            Unit::Teaspoon => 4.92892,
            Unit::Tablespoon => 14.7868,
            Unit::Cup => 240.0,
            Unit::FluidOunce => 29.5735,
            Unit::Pint => 473.176,
            Unit::Quart => 946.353,
            Unit::Gallon => 3785.41,
            Unit::Milligram => 0.001,
            Unit::Gram => 1.0,
            Unit::Kilogram => 1000.0,
            Unit::Ounce => 28.3495,
            Unit::Pound => 453.592,
            Unit::Celsius | Unit::Fahrenheit | Unit::Kelvin => return None,
        };
        Some(factor)
    }

    /// Convert a temperature in this unit to Celsius
    pub fn to_celsius(&self, value: f64) -> Option<f64> {
        match self {
            Unit::Celsius => Some(value),
            Unit::Fahrenheit => Some((value - 32.0) * 5.0 / 9.0),
            Unit::Kelvin => Some(value - 273.15),
            _ => None,
        }
    }

    /// Convert a Celsius temperature into this unit
    pub fn from_celsius(&self, celsius: f64) -> Option<f64> {
        match self {
            Unit::Celsius => Some(celsius),
            Unit::Fahrenheit => Some(celsius * 9.0 / 5.0 + 32.0),
            Unit::Kelvin => Some(celsius + 273.15),
            _ => None,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Errors that can occur while parsing or converting
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    /// Free text did not resolve to any known unit
    #[error("unknown unit: '{0}'")]
    UnmatchedUnitToken(String),

    /// Free text had no parseable leading number or no unit phrase
    #[error("could not read a quantity from '{0}', expected '<number> <unit>'")]
    MalformedQuantityText(String),

    /// A unit does not belong to the requested category
    #[error("unit '{unit}' is not valid for {category}")]
    UnitCategoryMismatch { category: Category, unit: Unit },

    /// Magnitude was NaN or infinite
    #[error("magnitude must be a finite number, got {0}")]
    NonFiniteMagnitude(f64),

    /// Category name did not match volume, weight or temperature
    #[error("unknown category: '{0}'")]
    UnknownCategory(String),
}

impl ConversionError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            ConversionError::UnmatchedUnitToken(_) => codes::UNMATCHED_UNIT,
            ConversionError::MalformedQuantityText(_) => codes::MALFORMED_QUANTITY,
            ConversionError::UnitCategoryMismatch { .. } => codes::UNIT_CATEGORY_MISMATCH,
            ConversionError::NonFiniteMagnitude(_) => codes::NON_FINITE,
            ConversionError::UnknownCategory(_) => codes::UNKNOWN_CATEGORY,
        }
    }
}
