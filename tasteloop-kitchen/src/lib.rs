//! Tasteloop Kitchen Functions Plugin
//!
//! Recipe-side helpers that sit next to unit conversion:
//! - Scaling ingredient amounts by servings
//! - Short quantity formatting for ingredient lists
//!
//! For unit conversions (cups ↔ mL, F ↔ C), use tasteloop-units.

mod helpers;
mod scaling;

pub use scaling::{scale_factor, scale_quantity, scale_note, format_quantity, ScalingError};

use tasteloop_plugin::PluginRegistry;

/// Load kitchen functions into registry
pub fn load_kitchen_library(registry: PluginRegistry) -> PluginRegistry {
    registry
        .with_function(scaling::ScaleServings)
}
