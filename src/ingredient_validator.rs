//! # Ingredient Validator
//!
//! Completeness checks for a single ingredient reference. Every rule runs
//! independently, so one call reports all missing fields at once.

use serde::Serialize;
use std::fmt;

use crate::ingredient_model::IngredientReference;

/// A field that keeps an ingredient reference from being complete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MissingField {
    ItemNotSelected,
    Quantity,
    Unit,
}

impl MissingField {
    /// Label shown next to the incomplete row
    pub fn label(&self) -> &'static str {
        match self {
            MissingField::ItemNotSelected => "Item not selected",
            MissingField::Quantity => "Quantity",
            MissingField::Unit => "Unit",
        }
    }

    /// Localization key for the label
    pub fn message_key(&self) -> &'static str {
        match self {
            MissingField::ItemNotSelected => "missing-item",
            MissingField::Quantity => "missing-quantity",
            MissingField::Unit => "missing-unit",
        }
    }
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// List the missing or invalid fields of a reference, in rule order
pub fn validate(reference: &IngredientReference) -> Vec<MissingField> {
    let mut missing = Vec::new();

    if reference.source_id().trim().is_empty() {
        missing.push(MissingField::ItemNotSelected);
    }

    let quantity_ok = reference
        .quantity
        .is_some_and(|quantity| quantity.is_finite() && quantity > 0.0);
    if !quantity_ok {
        missing.push(MissingField::Quantity);
    }

    if reference.unit.trim().is_empty() {
        missing.push(MissingField::Unit);
    }

    missing
}

pub fn is_complete(reference: &IngredientReference) -> bool {
    validate(reference).is_empty()
}

/// Number of references that fail validation
pub fn count_incomplete(references: &[IngredientReference]) -> usize {
    references
        .iter()
        .filter(|reference| !is_complete(reference))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingredient_model::SourceType;

    fn complete() -> IngredientReference {
        IngredientReference::new(SourceType::Inventory)
            .with_selection("inv-1", "Flour")
            .with_quantity(1.0)
            .with_unit("kg")
    }

    #[test]
    fn test_complete_reference() {
        assert!(validate(&complete()).is_empty());
        assert!(is_complete(&complete()));
    }

    #[test]
    fn test_empty_reference_reports_everything() {
        let reference = IngredientReference::new(SourceType::Recipe);
        assert_eq!(
            validate(&reference),
            vec![
                MissingField::ItemNotSelected,
                MissingField::Quantity,
                MissingField::Unit
            ]
        );
    }

    #[test]
    fn test_zero_quantity_always_reported() {
        let reference = complete().with_quantity(0.0);
        assert_eq!(validate(&reference), vec![MissingField::Quantity]);

        let reference = IngredientReference::new(SourceType::Inventory).with_quantity(0.0);
        assert!(validate(&reference).contains(&MissingField::Quantity));
    }

    #[test]
    fn test_negative_and_nan_quantity() {
        assert_eq!(
            validate(&complete().with_quantity(-2.0)),
            vec![MissingField::Quantity]
        );
        assert_eq!(
            validate(&complete().with_quantity(f64::NAN)),
            vec![MissingField::Quantity]
        );
    }

    #[test]
    fn test_blank_unit() {
        let reference = complete().with_unit("   ");
        assert_eq!(validate(&reference), vec![MissingField::Unit]);
    }

    #[test]
    fn test_labels() {
        assert_eq!(MissingField::ItemNotSelected.label(), "Item not selected");
        assert_eq!(MissingField::Quantity.to_string(), "Quantity");
        assert_eq!(MissingField::Unit.to_string(), "Unit");
    }

    #[test]
    fn test_count_incomplete() {
        let references = vec![
            complete(),
            complete().with_unit(""),
            IngredientReference::new(SourceType::Inventory),
        ];
        assert_eq!(count_incomplete(&references), 2);
    }
}
