//! # Ingredient List Manager
//!
//! Ordered, editable list of ingredient references as shown in a recipe or
//! variant editor.
//!
//! Each row carries its own UI state (search-box text, suggestion dropdown
//! visibility). Reference and UI state live in one record, so inserting,
//! removing or moving a row always carries its UI state along and the set of
//! UI-state positions is exactly `0..len()`.
//!
//! ```rust
//! use recipe_composer::ingredient_list::{IngredientListManager, IngredientUpdate};
//!
//! let mut list = IngredientListManager::new();
//! let row = list.append();
//! list.update(row, IngredientUpdate::QuantityText("1 1/2".to_string())).unwrap();
//! assert_eq!(list.get(row).unwrap().quantity, Some(1.5));
//! ```

use log::debug;

use crate::composer_errors::CompositionError;
use crate::ingredient_model::{IngredientReference, SourceType};
use crate::ingredient_validator::{self, MissingField};
use crate::quantity_parser::parse_quantity_input;
use crate::source_resolver::{self, CatalogEntry};
use crate::unit_catalog::{self, UnitOption};

/// Per-row editor state that must follow its row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowUiState {
    pub search_text: String,
    pub show_suggestions: bool,
}

#[derive(Debug, Clone, PartialEq)]
struct IngredientRow {
    reference: IngredientReference,
    ui: RowUiState,
}

/// A single-field edit of an ingredient row
#[derive(Debug, Clone, PartialEq)]
pub enum IngredientUpdate {
    /// Switch catalogs; clears the current selection
    SourceType(SourceType),
    Quantity(Option<f64>),
    /// Raw text from the quantity input, parsed leniently
    QuantityText(String),
    Unit(String),
    ConvertToUnit(Option<String>),
    CostPerUnit(Option<f64>),
}

/// Ordered ingredient rows with their UI state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngredientListManager {
    rows: Vec<IngredientRow>,
}

impl IngredientListManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap existing references, each with fresh UI state
    pub fn from_references(references: Vec<IngredientReference>) -> Self {
        let rows = references
            .into_iter()
            .map(|reference| IngredientRow {
                reference,
                ui: RowUiState::default(),
            })
            .collect();
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&IngredientReference> {
        self.rows.get(index).map(|row| &row.reference)
    }

    pub fn iter(&self) -> impl Iterator<Item = &IngredientReference> {
        self.rows.iter().map(|row| &row.reference)
    }

    pub fn to_references(&self) -> Vec<IngredientReference> {
        self.iter().cloned().collect()
    }

    pub fn ui_state(&self, index: usize) -> Option<&RowUiState> {
        self.rows.get(index).map(|row| &row.ui)
    }

    /// Positions that currently hold UI state
    pub fn ui_keys(&self) -> Vec<usize> {
        (0..self.rows.len()).collect()
    }

    /// One-based number shown next to a row
    pub fn display_number(index: usize) -> usize {
        index + 1
    }

    /// Add an unselected inventory row at the end and return its index
    pub fn append(&mut self) -> usize {
        self.rows.push(IngredientRow {
            reference: IngredientReference::new(SourceType::Inventory),
            ui: RowUiState::default(),
        });
        debug!("Appended ingredient row, list now has {}", self.rows.len());
        self.rows.len() - 1
    }

    /// Apply a single-field edit to the row at `index`
    pub fn update(
        &mut self,
        index: usize,
        update: IngredientUpdate,
    ) -> Result<(), CompositionError> {
        let row = self.row_mut(index)?;
        let reference = &mut row.reference;

        match update {
            IngredientUpdate::SourceType(source_type) => {
                *reference = source_resolver::switch_source_type(reference, source_type);
                row.ui = RowUiState::default();
            }
            IngredientUpdate::Quantity(quantity) => reference.quantity = quantity,
            IngredientUpdate::QuantityText(text) => {
                reference.quantity = parse_quantity_input(&text);
            }
            IngredientUpdate::Unit(unit) => reference.unit = unit,
            IngredientUpdate::ConvertToUnit(target) => {
                reference.convert_to_unit = target.filter(|t| !t.trim().is_empty());
            }
            IngredientUpdate::CostPerUnit(cost) => reference.cost_per_unit = cost,
        }

        Ok(())
    }

    /// Pick a catalog entry for the row at `index`
    pub fn select(&mut self, index: usize, entry: &CatalogEntry) -> Result<(), CompositionError> {
        let row = self.row_mut(index)?;
        let resolved = entry.resolve(row.reference.source_type());
        row.reference = source_resolver::apply_selection(&row.reference, &resolved);
        row.ui = RowUiState::default();
        debug!(
            "Row {} now references {} {:?}",
            index,
            row.reference.source_type(),
            row.reference.source_id()
        );
        Ok(())
    }

    /// Remove the row at `index`; later rows move up together with their UI state
    pub fn remove(&mut self, index: usize) -> Result<IngredientReference, CompositionError> {
        self.check_index(index)?;
        let removed = self.rows.remove(index);
        debug!("Removed ingredient row {}, {} left", index, self.rows.len());
        Ok(removed.reference)
    }

    /// Move the row at `from` so that it ends up at `to`
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), CompositionError> {
        move_item(&mut self.rows, from, to)
    }

    pub fn set_search_text(&mut self, index: usize, text: &str) -> Result<(), CompositionError> {
        let row = self.row_mut(index)?;
        row.ui.search_text = text.to_string();
        row.ui.show_suggestions = !text.trim().is_empty();
        Ok(())
    }

    pub fn set_suggestions_visible(
        &mut self,
        index: usize,
        visible: bool,
    ) -> Result<(), CompositionError> {
        self.row_mut(index)?.ui.show_suggestions = visible;
        Ok(())
    }

    /// Catalog entries matching the row's search text
    pub fn suggestions<'a>(
        &self,
        index: usize,
        entries: &'a [CatalogEntry],
    ) -> Result<Vec<&'a CatalogEntry>, CompositionError> {
        self.check_index(index)?;
        Ok(source_resolver::search_catalog(
            entries,
            &self.rows[index].ui.search_text,
        ))
    }

    /// Conversion choices for the row's current unit
    pub fn compatible_units(&self, index: usize) -> Result<Vec<UnitOption>, CompositionError> {
        self.check_index(index)?;
        Ok(unit_catalog::compatible_units(&self.rows[index].reference.unit))
    }

    pub fn validation(&self, index: usize) -> Option<Vec<MissingField>> {
        self.get(index).map(ingredient_validator::validate)
    }

    /// Number of rows that fail validation
    pub fn incomplete_count(&self) -> usize {
        self.iter()
            .filter(|reference| !ingredient_validator::is_complete(reference))
            .count()
    }

    fn check_index(&self, index: usize) -> Result<(), CompositionError> {
        if index < self.rows.len() {
            Ok(())
        } else {
            Err(CompositionError::IndexOutOfRange {
                index,
                len: self.rows.len(),
            })
        }
    }

    fn row_mut(&mut self, index: usize) -> Result<&mut IngredientRow, CompositionError> {
        let len = self.rows.len();
        self.rows
            .get_mut(index)
            .ok_or(CompositionError::IndexOutOfRange { index, len })
    }
}

/// Move one element so it ends up at position `to`, shifting the rest
pub(crate) fn move_item<T>(
    items: &mut Vec<T>,
    from: usize,
    to: usize,
) -> Result<(), CompositionError> {
    let len = items.len();
    for index in [from, to] {
        if index >= len {
            return Err(CompositionError::IndexOutOfRange { index, len });
        }
    }
    if from != to {
        let item = items.remove(from);
        items.insert(to, item);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn flour() -> CatalogEntry {
        CatalogEntry::from_value(&json!({ "_id": "flour-id", "Name": "Flour", "Unit": "kg" }))
            .unwrap()
    }

    fn three_rows() -> IngredientListManager {
        let mut list = IngredientListManager::new();
        for (i, text) in ["a", "b", "c"].iter().enumerate() {
            list.append();
            list.update(i, IngredientUpdate::Unit(format!("unit-{text}"))).unwrap();
            list.set_search_text(i, text).unwrap();
        }
        list
    }

    #[test]
    fn test_append_initializes_ui_state() {
        let mut list = IngredientListManager::new();
        let index = list.append();
        assert_eq!(index, 0);
        assert_eq!(list.ui_state(0), Some(&RowUiState::default()));
        assert_eq!(list.get(0).unwrap().source_type(), SourceType::Inventory);
        assert!(!list.get(0).unwrap().is_selected());
    }

    #[test]
    fn test_select_resolves_entry() {
        let mut list = IngredientListManager::new();
        list.append();
        list.set_search_text(0, "flo").unwrap();
        list.select(0, &flour()).unwrap();

        let reference = list.get(0).unwrap();
        assert_eq!(reference.source_id(), "flour-id");
        assert_eq!(reference.name_snapshot(), "Flour");
        assert_eq!(reference.unit, "kg");
        assert_eq!(list.ui_state(0), Some(&RowUiState::default()));

        let units: Vec<_> = list
            .compatible_units(0)
            .unwrap()
            .into_iter()
            .map(|u| u.value)
            .collect();
        assert_eq!(units, ["g", "kg", "oz", "lb"]);
    }

    #[test]
    fn test_update_source_type_clears_selection() {
        let mut list = IngredientListManager::new();
        list.append();
        list.select(0, &flour()).unwrap();
        list.update(0, IngredientUpdate::Quantity(Some(2.0))).unwrap();
        list.update(0, IngredientUpdate::SourceType(SourceType::Recipe)).unwrap();

        let reference = list.get(0).unwrap();
        assert_eq!(reference.source_type(), SourceType::Recipe);
        assert_eq!(reference.source_id(), "");
        assert_eq!(reference.name_snapshot(), "");
        assert_eq!(reference.unit, "kg");
        assert_eq!(reference.quantity, Some(2.0));
    }

    #[test]
    fn test_update_shallow_fields() {
        let mut list = IngredientListManager::new();
        list.append();
        list.update(0, IngredientUpdate::QuantityText("1,5".to_string())).unwrap();
        list.update(0, IngredientUpdate::Unit("L".to_string())).unwrap();
        list.update(0, IngredientUpdate::ConvertToUnit(Some("ml".to_string()))).unwrap();
        list.update(0, IngredientUpdate::CostPerUnit(Some(0.8))).unwrap();

        let reference = list.get(0).unwrap();
        assert_eq!(reference.quantity, Some(1.5));
        assert_eq!(reference.unit, "L");
        assert_eq!(reference.convert_to_unit.as_deref(), Some("ml"));
        assert_eq!(reference.cost_per_unit, Some(0.8));

        list.update(0, IngredientUpdate::ConvertToUnit(Some("  ".to_string()))).unwrap();
        assert_eq!(list.get(0).unwrap().convert_to_unit, None);
    }

    #[test]
    fn test_out_of_range_leaves_list_unchanged() {
        let mut list = three_rows();
        let before = list.clone();
        assert_eq!(
            list.update(3, IngredientUpdate::Unit("g".to_string())),
            Err(CompositionError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert!(list.remove(7).is_err());
        assert!(list.reorder(0, 3).is_err());
        assert_eq!(list, before);
    }

    #[test]
    fn test_remove_shifts_ui_state() {
        let mut list = three_rows();
        let removed = list.remove(1).unwrap();
        assert_eq!(removed.unit, "unit-b");

        assert_eq!(list.len(), 2);
        assert_eq!(list.ui_keys(), vec![0, 1]);
        assert_eq!(list.get(0).unwrap().unit, "unit-a");
        assert_eq!(list.get(1).unwrap().unit, "unit-c");
        assert_eq!(list.ui_state(1).unwrap().search_text, "c");
        assert!(list.ui_state(2).is_none());
    }

    #[test]
    fn test_reorder_moves_ui_state_with_row() {
        let mut list = three_rows();
        list.reorder(0, 2).unwrap();
        let units: Vec<_> = list.iter().map(|r| r.unit.as_str()).collect();
        assert_eq!(units, ["unit-b", "unit-c", "unit-a"]);
        assert_eq!(list.ui_state(2).unwrap().search_text, "a");
        assert_eq!(list.ui_keys().len(), list.len());
    }

    #[test]
    fn test_suggestions_follow_search_text() {
        let mut list = IngredientListManager::new();
        list.append();
        let entries = vec![flour()];
        list.set_search_text(0, "FL").unwrap();
        assert!(list.ui_state(0).unwrap().show_suggestions);
        assert_eq!(list.suggestions(0, &entries).unwrap().len(), 1);

        list.set_suggestions_visible(0, false).unwrap();
        assert!(!list.ui_state(0).unwrap().show_suggestions);
    }

    #[test]
    fn test_duplicates_allowed() {
        let mut list = IngredientListManager::new();
        list.append();
        list.append();
        list.select(0, &flour()).unwrap();
        list.select(1, &flour()).unwrap();
        assert_eq!(list.get(0).unwrap().source_id(), list.get(1).unwrap().source_id());
    }

    #[test]
    fn test_incomplete_count() {
        let mut list = IngredientListManager::new();
        list.append();
        list.append();
        list.select(0, &flour()).unwrap();
        list.update(0, IngredientUpdate::Quantity(Some(1.0))).unwrap();
        assert_eq!(list.incomplete_count(), 1);
        assert_eq!(
            list.validation(1).unwrap(),
            vec![MissingField::ItemNotSelected, MissingField::Quantity, MissingField::Unit]
        );
    }

    #[test]
    fn test_move_item() {
        let mut items = vec![1, 2, 3, 4];
        move_item(&mut items, 3, 1).unwrap();
        assert_eq!(items, [1, 4, 2, 3]);
        move_item(&mut items, 2, 2).unwrap();
        assert_eq!(items, [1, 4, 2, 3]);
    }
}
