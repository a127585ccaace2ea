//! # Ingredient Reference Data Model
//!
//! An ingredient reference points from a recipe or variant to either an
//! inventory item or a sub-recipe, plus the quantity and unit used.
//!
//! ## Core Concepts
//!
//! - **Source**: which catalog the reference resolves against, and the item
//!   chosen from it (if any)
//! - **Quantity**: amount in `unit`, required to be positive once complete
//! - **Conversion target**: an optional unit from the same family as `unit`
//!
//! ## Usage
//!
//! ```rust
//! use recipe_composer::ingredient_model::{IngredientReference, SourceType};
//!
//! let flour = IngredientReference::new(SourceType::Inventory)
//!     .with_selection("inv-1", "Flour")
//!     .with_quantity(2.0)
//!     .with_unit("kg");
//!
//! assert!(flour.is_selected());
//! assert_eq!(flour.to_string(), "2 kg Flour");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::composer_errors::CompositionError;
use crate::unit_catalog;

/// Catalog an ingredient reference resolves against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Inventory,
    Recipe,
}

/// Concrete item chosen from a catalog
///
/// Both fields are empty while nothing is selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SourceSelection {
    pub source_id: String,
    /// Display name captured when the item was picked
    #[serde(rename = "name")]
    pub name_snapshot: String,
}

/// Tagged source of an ingredient reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "sourceType", rename_all = "lowercase")]
pub enum IngredientSource {
    /// An item from the inventory catalog
    Inventory(SourceSelection),
    /// A sub-recipe used as an ingredient
    Recipe(SourceSelection),
}

/// A single ingredient line of a recipe or variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientReference {
    #[serde(flatten)]
    pub source: IngredientSource,

    /// Amount in `unit`; `None` while the field is blank
    #[serde(default)]
    pub quantity: Option<f64>,

    #[serde(default)]
    pub unit: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub convert_to_unit: Option<String>,

    /// Stored cost field, carried along but never computed here
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_per_unit: Option<f64>,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Inventory => "inventory",
            SourceType::Recipe => "recipe",
        }
    }

    /// Unit assumed when a selected catalog item carries none
    pub fn default_unit(&self) -> &'static str {
        match self {
            SourceType::Inventory => "pc",
            SourceType::Recipe => "portion",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SourceType {
    type Err = CompositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "inventory" => Ok(SourceType::Inventory),
            "recipe" => Ok(SourceType::Recipe),
            other => Err(CompositionError::UnknownSourceType(other.to_string())),
        }
    }
}

impl IngredientSource {
    /// An unselected source of the given type
    pub fn empty(source_type: SourceType) -> Self {
        Self::with_selection(source_type, SourceSelection::default())
    }

    pub fn with_selection(source_type: SourceType, selection: SourceSelection) -> Self {
        match source_type {
            SourceType::Inventory => IngredientSource::Inventory(selection),
            SourceType::Recipe => IngredientSource::Recipe(selection),
        }
    }

    pub fn source_type(&self) -> SourceType {
        match self {
            IngredientSource::Inventory(_) => SourceType::Inventory,
            IngredientSource::Recipe(_) => SourceType::Recipe,
        }
    }

    pub fn selection(&self) -> &SourceSelection {
        match self {
            IngredientSource::Inventory(selection) | IngredientSource::Recipe(selection) => {
                selection
            }
        }
    }
}

impl IngredientReference {
    /// Create an unselected reference with no quantity or unit
    pub fn new(source_type: SourceType) -> Self {
        Self {
            source: IngredientSource::empty(source_type),
            quantity: None,
            unit: String::new(),
            convert_to_unit: None,
            cost_per_unit: None,
        }
    }

    /// Point this reference at a concrete catalog item
    pub fn with_selection(mut self, source_id: &str, name: &str) -> Self {
        self.source = IngredientSource::with_selection(
            self.source_type(),
            SourceSelection {
                source_id: source_id.to_string(),
                name_snapshot: name.to_string(),
            },
        );
        self
    }

    pub fn with_quantity(mut self, quantity: f64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = unit.to_string();
        self
    }

    pub fn with_convert_to_unit(mut self, unit: &str) -> Self {
        self.convert_to_unit = Some(unit.to_string());
        self
    }

    pub fn with_cost_per_unit(mut self, cost: f64) -> Self {
        self.cost_per_unit = Some(cost);
        self
    }

    pub fn source_type(&self) -> SourceType {
        self.source.source_type()
    }

    pub fn source_id(&self) -> &str {
        &self.source.selection().source_id
    }

    pub fn name_snapshot(&self) -> &str {
        &self.source.selection().name_snapshot
    }

    /// Whether a concrete catalog item has been chosen
    pub fn is_selected(&self) -> bool {
        !self.source_id().is_empty()
    }

    /// The conversion unit, only when `unit` belongs to a known family
    pub fn conversion_target(&self) -> Option<&str> {
        let target = self.convert_to_unit.as_deref()?.trim();
        if target.is_empty() || unit_catalog::classify(&self.unit).is_none() {
            return None;
        }
        Some(target)
    }
}

impl fmt::Display for IngredientReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(quantity) = self.quantity {
            write!(f, "{} ", quantity)?;
        }

        if !self.unit.is_empty() {
            write!(f, "{} ", self.unit)?;
        }

        if self.is_selected() {
            write!(f, "{}", self.name_snapshot())?;
        } else {
            write!(f, "(no {} selected)", self.source_type())?;
        }

        if let Some(target) = self.conversion_target() {
            write!(f, " -> {}", target)?;
        }

        Ok(())
    }
}
