//! # Recipe Variant Data Model
//!
//! A variant is a named modifier (size, flavor, crust or custom) that can be
//! attached to one or more base recipes. Its ingredient list holds additions
//! or overrides relative to the base recipe, never the full composition.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::composer_errors::CompositionError;
use crate::ingredient_model::IngredientReference;

/// Kind of modification a variant applies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantType {
    #[default]
    Size,
    Flavor,
    Crust,
    Custom,
}

/// A variant as edited in the back office
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeVariant {
    pub name: String,
    pub description: String,
    pub variant_type: VariantType,
    /// Portion scale factor, only meaningful for size variants
    pub size_multiplier: f64,
    /// Only meaningful for crust variants
    pub crust_type: String,
    /// Signed delta applied on top of the base recipe price
    pub base_cost_adjustment: f64,
    /// Base recipes this variant can be attached to
    pub applies_to: Vec<String>,
    pub ingredients: Vec<IngredientReference>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantMetadata {
    pub applies_to: Vec<String>,
}

/// Payload handed to the save collaborator
///
/// `recipe_id` and `metadata.applies_to` always carry the same list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeVariantFormData {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub variant_type: VariantType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_multiplier: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crust_type: Option<String>,
    pub base_cost_adjustment: f64,
    pub recipe_id: Vec<String>,
    pub ingredients: Vec<IngredientReference>,
    pub metadata: VariantMetadata,
}

pub const DEFAULT_SIZE_MULTIPLIER: f64 = 1.0;

impl VariantType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VariantType::Size => "size",
            VariantType::Flavor => "flavor",
            VariantType::Crust => "crust",
            VariantType::Custom => "custom",
        }
    }
}

impl fmt::Display for VariantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VariantType {
    type Err = CompositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "size" => Ok(VariantType::Size),
            "flavor" => Ok(VariantType::Flavor),
            "crust" => Ok(VariantType::Crust),
            "custom" => Ok(VariantType::Custom),
            other => Err(CompositionError::UnknownVariantType(other.to_string())),
        }
    }
}

impl Default for RecipeVariant {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            variant_type: VariantType::default(),
            size_multiplier: DEFAULT_SIZE_MULTIPLIER,
            crust_type: String::new(),
            base_cost_adjustment: 0.0,
            applies_to: Vec::new(),
            ingredients: Vec::new(),
        }
    }
}

impl RecipeVariant {
    /// Assemble the save payload.
    ///
    /// Type-specific fields are only emitted for their own variant type, and
    /// conversion targets are dropped where the unit has no known family.
    pub fn to_form_data(&self) -> RecipeVariantFormData {
        let size_multiplier = match self.variant_type {
            VariantType::Size => Some(self.size_multiplier),
            _ => None,
        };
        let crust_type = match self.variant_type {
            VariantType::Crust => Some(self.crust_type.trim().to_string()),
            _ => None,
        };

        let ingredients = self
            .ingredients
            .iter()
            .map(|reference| {
                let mut reference = reference.clone();
                reference.convert_to_unit = reference.conversion_target().map(str::to_string);
                reference
            })
            .collect();

        RecipeVariantFormData {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            variant_type: self.variant_type,
            size_multiplier,
            crust_type,
            base_cost_adjustment: self.base_cost_adjustment,
            recipe_id: self.applies_to.clone(),
            ingredients,
            metadata: VariantMetadata {
                applies_to: self.applies_to.clone(),
            },
        }
    }
}

impl RecipeVariantFormData {
    pub fn applies_to(&self) -> &[String] {
        &self.metadata.applies_to
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingredient_model::SourceType;
    use serde_json::json;

    #[test]
    fn test_variant_type_parsing() {
        assert_eq!("Crust".parse::<VariantType>(), Ok(VariantType::Crust));
        assert!("topping".parse::<VariantType>().is_err());
        assert_eq!(VariantType::default(), VariantType::Size);
    }

    #[test]
    fn test_default_variant() {
        let variant = RecipeVariant::default();
        assert_eq!(variant.size_multiplier, 1.0);
        assert_eq!(variant.base_cost_adjustment, 0.0);
        assert!(variant.applies_to.is_empty());
    }

    #[test]
    fn test_form_data_mirrors_applies_to() {
        let variant = RecipeVariant {
            name: " Large ".to_string(),
            applies_to: vec!["r1".to_string(), "r2".to_string()],
            ..Default::default()
        };
        let data = variant.to_form_data();
        assert_eq!(data.name, "Large");
        assert_eq!(data.recipe_id, vec!["r1", "r2"]);
        assert_eq!(data.metadata.applies_to, data.recipe_id);
    }

    #[test]
    fn test_form_data_type_specific_fields() {
        let size = RecipeVariant {
            size_multiplier: 1.5,
            crust_type: "thin".to_string(),
            ..Default::default()
        };
        let data = size.to_form_data();
        assert_eq!(data.size_multiplier, Some(1.5));
        assert_eq!(data.crust_type, None);

        let crust = RecipeVariant {
            variant_type: VariantType::Crust,
            crust_type: "stuffed".to_string(),
            ..Default::default()
        };
        let data = crust.to_form_data();
        assert_eq!(data.size_multiplier, None);
        assert_eq!(data.crust_type, Some("stuffed".to_string()));
    }

    #[test]
    fn test_form_data_drops_meaningless_conversion() {
        let variant = RecipeVariant {
            ingredients: vec![
                IngredientReference::new(SourceType::Inventory)
                    .with_unit("bunch")
                    .with_convert_to_unit("g"),
                IngredientReference::new(SourceType::Inventory)
                    .with_unit("kg")
                    .with_convert_to_unit("g"),
            ],
            ..Default::default()
        };
        let data = variant.to_form_data();
        assert_eq!(data.ingredients[0].convert_to_unit, None);
        assert_eq!(data.ingredients[1].convert_to_unit, Some("g".to_string()));
    }

    #[test]
    fn test_form_data_wire_shape() {
        let variant = RecipeVariant {
            name: "Large".to_string(),
            applies_to: vec!["r1".to_string()],
            base_cost_adjustment: 2.5,
            ..Default::default()
        };
        let value = serde_json::to_value(variant.to_form_data()).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "Large",
                "description": "",
                "type": "size",
                "sizeMultiplier": 1.0,
                "baseCostAdjustment": 2.5,
                "recipeId": ["r1"],
                "ingredients": [],
                "metadata": { "appliesTo": ["r1"] }
            })
        );
    }
}
