//! Measurement categories

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};
use crate::{Unit, ConversionError};

/// Which unit set and which conversion law apply to a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Volume,
    Weight,
    Temperature,
}

static VOLUME_UNITS: [Unit; 9] = [
    Unit::Milliliter,
    Unit::Liter,
    Unit::Teaspoon,
    Unit::Tablespoon,
    Unit::Cup,
    Unit::FluidOunce,
    Unit::Pint,
    Unit::Quart,
    Unit::Gallon,
];

static WEIGHT_UNITS: [Unit; 5] = [
    Unit::Milligram,
    Unit::Gram,
    Unit::Kilogram,
    Unit::Ounce,
    Unit::Pound,
];

static TEMPERATURE_UNITS: [Unit; 3] = [
    Unit::Celsius,
    Unit::Fahrenheit,
    Unit::Kelvin,
];

impl Category {
    pub const ALL: [Category; 3] = [Category::Volume, Category::Weight, Category::Temperature];

    /// Lowercase identifier ("volume", "weight", "temperature")
    pub fn id(&self) -> &'static str {
        match self {
            Category::Volume => "volume",
            Category::Weight => "weight",
            Category::Temperature => "temperature",
        }
    }

    /// Display label for selector headings
    pub fn label(&self) -> &'static str {
        match self {
            Category::Volume => "Volume",
            Category::Weight => "Weight",
            Category::Temperature => "Temperature",
        }
    }

    /// Canonical units in selector order
    pub fn units(&self) -> &'static [Unit] {
        match self {
            Category::Volume => &VOLUME_UNITS,
            Category::Weight => &WEIGHT_UNITS,
            Category::Temperature => &TEMPERATURE_UNITS,
        }
    }

    /// One-line hint listing the valid units
    pub fn hint(&self) -> &'static str {
        match self {
            Category::Volume => "Volume units: ml, l, tsp, tbsp, cup, floz, pint, quart, gallon",
            Category::Weight => "Weight units: mg, g, kg, oz, lb",
            Category::Temperature => "Temperature units: C, F, K",
        }
    }

    pub fn contains(&self, unit: Unit) -> bool {
        unit.category() == *self
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Category {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "volume" => Ok(Category::Volume),
            "weight" => Ok(Category::Weight),
            "temperature" | "temp" => Ok(Category::Temperature),
            _ => Err(ConversionError::UnknownCategory(s.trim().to_string())),
        }
    }
}
