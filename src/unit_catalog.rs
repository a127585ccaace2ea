//! # Unit Compatibility Catalog
//!
//! Classifies free-text unit codes into a [`UnitFamily`] and lists the unit
//! choices offered for conversion within that family.
//!
//! Classification is a lookup only: no conversion factor is ever produced here.
//!
//! ```rust
//! use recipe_composer::unit_catalog::{classify, compatible_units, UnitFamily};
//!
//! assert_eq!(classify("KG"), Some(UnitFamily::Weight));
//! let values: Vec<_> = compatible_units("kg").into_iter().map(|u| u.value).collect();
//! assert_eq!(values, ["g", "kg", "oz", "lb"]);
//! ```

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Family a unit belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitFamily {
    Weight,
    Volume,
    Count,
}

/// One selectable unit in a conversion dropdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitOption {
    /// Unit code stored on the ingredient reference
    pub value: String,
    /// Label shown to the user
    pub label: String,
}

const WEIGHT_UNITS: &[&str] = &[
    "g", "kg", "gram", "grams", "kilogram", "kilograms", "oz", "ounce", "ounces", "lb", "lbs",
    "pound", "pounds",
];

const VOLUME_UNITS: &[&str] = &[
    "ml",
    "l",
    "liter",
    "liters",
    "milliliter",
    "milliliters",
    "cup",
    "cups",
    "tbsp",
    "tablespoon",
    "tablespoons",
    "tsp",
    "teaspoon",
    "teaspoons",
    "gallon",
    "gallons",
    "quart",
    "quarts",
    "pint",
    "pints",
];

const COUNT_UNITS: &[&str] = &[
    "pc", "pcs", "piece", "pieces", "count", "unit", "units", "item", "items", "portion",
    "portions",
];

const WEIGHT_CHOICES: &[(&str, &str)] = &[
    ("g", "Grams (g)"),
    ("kg", "Kilograms (kg)"),
    ("oz", "Ounces (oz)"),
    ("lb", "Pounds (lb)"),
];

const VOLUME_CHOICES: &[(&str, &str)] = &[
    ("ml", "Milliliters (ml)"),
    ("L", "Liters (L)"),
    ("cup", "Cups"),
    ("tbsp", "Tablespoons (tbsp)"),
    ("tsp", "Teaspoons (tsp)"),
];

const COUNT_CHOICES: &[(&str, &str)] = &[("pc", "Pieces (pc)"), ("portion", "Portions")];

lazy_static! {
    /// Lowercased vocabulary word -> family
    static ref UNIT_FAMILIES: HashMap<&'static str, UnitFamily> = {
        let mut map = HashMap::new();
        for unit in WEIGHT_UNITS {
            map.insert(*unit, UnitFamily::Weight);
        }
        for unit in VOLUME_UNITS {
            map.insert(*unit, UnitFamily::Volume);
        }
        for unit in COUNT_UNITS {
            map.insert(*unit, UnitFamily::Count);
        }
        map
    };
}

impl UnitFamily {
    /// Human-readable family name
    pub fn display_name(&self) -> &'static str {
        match self {
            UnitFamily::Weight => "weight",
            UnitFamily::Volume => "volume",
            UnitFamily::Count => "count",
        }
    }

    /// Fixed, ordered list of unit choices offered for this family
    pub fn units(&self) -> Vec<UnitOption> {
        let choices = match self {
            UnitFamily::Weight => WEIGHT_CHOICES,
            UnitFamily::Volume => VOLUME_CHOICES,
            UnitFamily::Count => COUNT_CHOICES,
        };
        choices
            .iter()
            .map(|(value, label)| UnitOption {
                value: (*value).to_string(),
                label: (*label).to_string(),
            })
            .collect()
    }
}

impl fmt::Display for UnitFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Classify a unit code into its family.
///
/// Matching is case-insensitive and ignores surrounding whitespace, but is
/// otherwise exact: `"kgs"` or `"tbsp."` are not recognized.
pub fn classify(unit: &str) -> Option<UnitFamily> {
    let normalized = unit.trim().to_lowercase();
    UNIT_FAMILIES.get(normalized.as_str()).copied()
}

/// Units a quantity expressed in `unit` may be converted to.
///
/// Returns the whole family list, including `unit` itself. An empty list means
/// no conversion is offered.
pub fn compatible_units(unit: &str) -> Vec<UnitOption> {
    classify(unit).map(|family| family.units()).unwrap_or_default()
}

/// Whether `target` is one of the conversion choices offered for `unit`
pub fn is_conversion_target(unit: &str, target: &str) -> bool {
    compatible_units(unit)
        .iter()
        .any(|option| option.value.eq_ignore_ascii_case(target.trim()))
}
