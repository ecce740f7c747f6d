//! Tasteloop Units - Kitchen Unit Conversion
//!
//! Converts recipe quantities within one measurement category.
//!
//! Categories:
//! - Volume (ml, l, tsp, tbsp, cup, floz, pint, quart, gallon), by ratio through milliliters
//! - Weight (mg, g, kg, oz, lb), by ratio through grams
//! - Temperature (C, F, K), affine through Celsius
//!
//! Free text goes through `normalize_unit_token` and
//! `parse_freeform_quantity`; `convert` only accepts canonical units.

mod category;
mod unit;
mod units;
mod parse;
mod conversion;
mod format;
mod convert;

pub use category::Category;
pub use unit::{Unit, ConversionError};
pub use units::{UNITS, UnitRegistry};
pub use parse::{normalize_unit_token, parse_freeform_quantity, parse_finite, resolve_unit, FreeformQuantity};
pub use conversion::{convert, convert_text, Conversion, ConversionRequest};
pub use format::format_for_display;

use tasteloop_plugin::PluginRegistry;

/// Load unit functions into registry
pub fn load_units_library(registry: PluginRegistry) -> PluginRegistry {
    registry
        // Conversion (2 functions)
        .with_function(convert::Convert)
        .with_function(convert::ConvertText)

        // Parsing (2 functions)
        .with_function(convert::NormalizeUnit)
        .with_function(convert::ParseQuantity)

        // Display (2 functions)
        .with_function(convert::FormatDisplay)
        .with_function(convert::CategoryUnits)
}
