//! Conversion Registry - static unit tables per measurement category.
//!
//! Every category assigns factor `1.0` to exactly one base unit; every other
//! entry reads as "1 unit = factor base-units".

use super::error::ConversionError;

// ============================================================================
// Tables
// ============================================================================

const LENGTH_UNITS: &[(&str, f64)] = &[
    ("mm", 1.0),
    ("cm", 10.0),
    ("m", 1_000.0),
    ("km", 1_000_000.0),
    ("in", 25.4),
    ("ft", 304.8),
    ("yd", 914.4),
    ("mi", 1_609_344.0),
];

const WEIGHT_UNITS: &[(&str, f64)] = &[
    ("mg", 1.0),
    ("g", 1_000.0),
    ("kg", 1_000_000.0),
    ("oz", 28_349.5),
    ("lb", 453_592.0),
];

static CATEGORIES: &[ConversionCategory] = &[
    ConversionCategory {
        name: "length",
        base_unit: "mm",
        units: LENGTH_UNITS,
    },
    ConversionCategory {
        name: "weight",
        base_unit: "mg",
        units: WEIGHT_UNITS,
    },
];

// ============================================================================
// Category
// ============================================================================

/// A named group of units sharing one base unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionCategory {
    /// Category name as used in requests (e.g. "length").
    pub name: &'static str,

    /// Unit symbol carrying factor 1.
    pub base_unit: &'static str,

    units: &'static [(&'static str, f64)],
}

impl ConversionCategory {
    /// Scale factor of `unit` relative to the base unit.
    pub fn factor(&self, unit: &str) -> Result<f64, ConversionError> {
        self.units
            .iter()
            .find(|(symbol, _)| *symbol == unit)
            .map(|(_, factor)| *factor)
            .ok_or_else(|| ConversionError::unknown_unit(self.name, unit))
    }

    /// Whether the category knows `unit`.
    pub fn contains(&self, unit: &str) -> bool {
        self.units.iter().any(|(symbol, _)| *symbol == unit)
    }

    /// Unit symbols in table order.
    pub fn units(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.units.iter().map(|(symbol, _)| *symbol)
    }

    /// Convert `value` from one unit to another through the base unit.
    ///
    /// The result is not rounded; callers decide on presentation precision.
    pub fn convert(&self, value: f64, from_unit: &str, to_unit: &str) -> Result<f64, ConversionError> {
        let from = self.factor(from_unit)?;
        let to = self.factor(to_unit)?;
        let base_value = value * from;
        Ok(base_value / to)
    }
}

// ============================================================================
// Lookup
// ============================================================================

/// Resolve a category by name.
pub fn lookup(category: &str) -> Result<&'static ConversionCategory, ConversionError> {
    CATEGORIES
        .iter()
        .find(|c| c.name == category)
        .ok_or_else(|| ConversionError::unknown_category(category))
}

/// All registered categories.
pub fn categories() -> &'static [ConversionCategory] {
    CATEGORIES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_categories() {
        assert_eq!(lookup("length").unwrap().base_unit, "mm");
        assert_eq!(lookup("weight").unwrap().base_unit, "mg");
    }

    #[test]
    fn test_lookup_unknown_category() {
        let err = lookup("volume").unwrap_err();
        assert_eq!(err, ConversionError::UnknownCategory("volume".to_string()));
    }

    #[test]
    fn test_each_category_has_exactly_one_base_unit() {
        for category in categories() {
            let base_units: Vec<_> = category
                .units
                .iter()
                .filter(|(_, factor)| *factor == 1.0)
                .map(|(symbol, _)| *symbol)
                .collect();
            assert_eq!(base_units, vec![category.base_unit], "{}", category.name);
        }
    }

    #[test]
    fn test_factors_are_positive() {
        for category in categories() {
            for unit in category.units() {
                assert!(category.factor(unit).unwrap() > 0.0);
            }
        }
    }

    #[test]
    fn test_table_contents() {
        let length = lookup("length").unwrap();
        assert_eq!(length.factor("in").unwrap(), 25.4);
        assert_eq!(length.factor("mi").unwrap(), 1_609_344.0);
        assert_eq!(length.units().count(), 8);

        let weight = lookup("weight").unwrap();
        assert_eq!(weight.factor("oz").unwrap(), 28_349.5);
        assert_eq!(weight.factor("lb").unwrap(), 453_592.0);
        assert_eq!(weight.units().count(), 5);
    }

    #[test]
    fn test_convert_meters_to_centimeters() {
        let length = lookup("length").unwrap();
        assert_eq!(length.convert(2.0, "m", "cm").unwrap(), 200.0);
    }

    #[test]
    fn test_convert_unknown_unit() {
        let length = lookup("length").unwrap();
        let err = length.convert(1.0, "m", "kg").unwrap_err();
        assert_eq!(err, ConversionError::unknown_unit("length", "kg"));
        assert!(!length.contains("kg"));
    }

    #[test]
    fn test_round_trip_all_pairs() {
        for category in categories() {
            for from in category.units() {
                for to in category.units() {
                    for x in [0.001, 1.0, 42.5, 123_456.789] {
                        let there = category.convert(x, from, to).unwrap();
                        let back = category.convert(there, to, from).unwrap();
                        let rel = ((back - x) / x).abs();
                        assert!(rel < 1e-6, "{from}->{to} {x}: got {back}");
                    }
                }
            }
        }
    }
}
