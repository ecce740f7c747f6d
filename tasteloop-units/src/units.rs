//! Alias registry - free-text surface forms mapped to canonical units

use std::collections::HashMap;
use std::sync::LazyLock;
use crate::Unit;

/// Global alias registry
pub static UNITS: LazyLock<UnitRegistry> = LazyLock::new(UnitRegistry::new);

/// Registry of unit aliases
pub struct UnitRegistry {
    /// Lowercased aliases
    aliases: HashMap<String, Unit>,
    /// Aliases matched before case folding ("T" is tablespoon, "t" teaspoon)
    exact: HashMap<&'static str, Unit>,
}

impl UnitRegistry {
    pub fn new() -> Self {
        let mut registry = UnitRegistry {
            aliases: HashMap::new(),
            exact: HashMap::new(),
        };
        registry.register_all_aliases();
        registry
    }

    /// Resolve raw text to a canonical unit.
    ///
    /// Order: case-sensitive exceptions, then lowercased aliases, then
    /// lowercased canonical symbols.
    pub fn get(&self, raw: &str) -> Option<Unit> {
        let trimmed = raw.trim();
        if let Some(unit) = self.exact.get(trimmed) {
            return Some(*unit);
        }
        let folded = trimmed.to_lowercase();
        if let Some(unit) = self.aliases.get(&folded) {
            return Some(*unit);
        }
        Unit::from_symbol(&folded)
    }

    /// All lowercased aliases that resolve to `unit`, sorted
    pub fn aliases_of(&self, unit: Unit) -> Vec<&str> {
        let mut names: Vec<&str> = self.aliases.iter()
            .filter(|(_, u)| **u == unit)
            .map(|(name, _)| name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    fn alias(&mut self, alias: &str, unit: Unit) {
        self.aliases.insert(alias.to_lowercase(), unit);
    }

    fn exact_alias(&mut self, alias: &'static str, unit: Unit) {
        self.exact.insert(alias, unit);
    }

    fn register_all_aliases(&mut self) {
        self.register_volume_aliases();
        self.register_weight_aliases();
        self.register_temperature_aliases();
        self.register_shorthand_aliases();
    }

    fn register_volume_aliases(&mut self) {
        self.alias("milliliter", Unit::Milliliter);
        self.alias("milliliters", Unit::Milliliter);
        self.alias("ml", Unit::Milliliter);
        self.alias("liter", Unit::Liter);
        self.alias("liters", Unit::Liter);
        self.alias("litre", Unit::Liter);
        self.alias("litres", Unit::Liter);
        self.alias("l", Unit::Liter);
        self.alias("teaspoon", Unit::Teaspoon);
        self.alias("teaspoons", Unit::Teaspoon);
        self.alias("tsp", Unit::Teaspoon);
        self.alias("tablespoon", Unit::Tablespoon);
        self.alias("tablespoons", Unit::Tablespoon);
        self.alias("tbsp", Unit::Tablespoon);
        self.alias("cup", Unit::Cup);
        self.alias("cups", Unit::Cup);
        self.alias("fl oz", Unit::FluidOunce);
        self.alias("floz", Unit::FluidOunce);
        self.alias("fluid ounce", Unit::FluidOunce);
        self.alias("fluid ounces", Unit::FluidOunce);
        self.alias("pint", Unit::Pint);
        self.alias("pints", Unit::Pint);
        self.alias("quart", Unit::Quart);
        self.alias("quarts", Unit::Quart);
        self.alias("gallon", Unit::Gallon);
        self.alias("gallons", Unit::Gallon);
    }

    fn register_weight_aliases(&mut self) {
        self.alias("gram", Unit::Gram);
        self.alias("grams", Unit::Gram);
        self.alias("g", Unit::Gram);
        self.alias("kilogram", Unit::Kilogram);
        self.alias("kilograms", Unit::Kilogram);
        self.alias("kg", Unit::Kilogram);
        self.alias("milligram", Unit::Milligram);
        self.alias("milligrams", Unit::Milligram);
        self.alias("mg", Unit::Milligram);
        self.alias("ounce", Unit::Ounce);
        self.alias("ounces", Unit::Ounce);
        self.alias("oz", Unit::Ounce);
        self.alias("pound", Unit::Pound);
        self.alias("pounds", Unit::Pound);
        self.alias("lb", Unit::Pound);
        self.alias("lbs", Unit::Pound);
    }

    fn register_temperature_aliases(&mut self) {
        // Bare "c" is claimed by cup below; spelled-out names are unambiguous
        self.alias("celsius", Unit::Celsius);
        self.alias("°c", Unit::Celsius);
        self.alias("fahrenheit", Unit::Fahrenheit);
        self.alias("°f", Unit::Fahrenheit);
        self.alias("kelvin", Unit::Kelvin);
    }

    fn register_shorthand_aliases(&mut self) {
        // Recipe shorthand: c = cup, t = teaspoon, T = tablespoon
        self.alias("c", Unit::Cup);
        self.alias("t", Unit::Teaspoon);
        self.exact_alias("T", Unit::Tablespoon);
    }
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Category;

    #[test]
    fn test_alias_lookup() {
        let reg = UnitRegistry::new();

        assert_eq!(reg.get("tablespoons"), Some(Unit::Tablespoon));
        assert_eq!(reg.get("  Litres "), Some(Unit::Liter));
        assert_eq!(reg.get("fl oz"), Some(Unit::FluidOunce));
        assert_eq!(reg.get("LBS"), Some(Unit::Pound));
        assert_eq!(reg.get("unknown_xyz"), None);
    }

    #[test]
    fn test_shorthand_policy() {
        let reg = UnitRegistry::new();

        assert_eq!(reg.get("c"), Some(Unit::Cup));
        assert_eq!(reg.get("C"), Some(Unit::Cup));
        assert_eq!(reg.get("t"), Some(Unit::Teaspoon));
        assert_eq!(reg.get("T"), Some(Unit::Tablespoon));
        assert_eq!(reg.get(" T "), Some(Unit::Tablespoon));
    }

    #[test]
    fn test_canonical_symbol_fallback() {
        let reg = UnitRegistry::new();

        assert_eq!(reg.get("F"), Some(Unit::Fahrenheit));
        assert_eq!(reg.get("k"), Some(Unit::Kelvin));
        assert_eq!(reg.get("GALLON"), Some(Unit::Gallon));
    }

    #[test]
    fn test_every_ratio_unit_has_alias() {
        let reg = UnitRegistry::new();
        for category in [Category::Volume, Category::Weight] {
            for unit in category.units() {
                assert!(!reg.aliases_of(*unit).is_empty(), "{} has no alias", unit);
            }
        }
    }

    #[test]
    fn test_aliases_of() {
        let reg = UnitRegistry::new();
        assert_eq!(reg.aliases_of(Unit::Kilogram), vec!["kg", "kilogram", "kilograms"]);
    }

    #[test]
    fn test_global_registry() {
        assert_eq!(UNITS.get("cups"), Some(Unit::Cup));
    }
}
