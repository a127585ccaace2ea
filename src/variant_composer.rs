//! # Variant Composer
//!
//! Editing session for one recipe variant: top-level fields, the set of base
//! recipes it applies to, its own ingredient list and the reference catalogs
//! used to pick ingredients.
//!
//! Submission checks, in order and failing fast:
//! 1. the name is not blank
//! 2. at least one base recipe is selected
//! 3. every ingredient row is complete
//!
//! Only then is the save collaborator called, exactly once. The session state is
//! never modified by a submission, so a failed attempt can be corrected and
//! retried.

use log::{debug, info, warn};
use serde_json::Value;

use crate::catalog::{CatalogSource, ReferenceCatalogs, VariantSaver};
use crate::composer_errors::{CompositionError, SubmitError, GENERIC_SAVE_FAILURE};
use crate::ingredient_list::IngredientListManager;
use crate::ingredient_validator::{self, MissingField};
use crate::source_resolver;
use crate::variant_model::{RecipeVariant, RecipeVariantFormData, VariantType};

#[derive(Debug, Clone, PartialEq)]
pub struct VariantComposer {
    name: String,
    description: String,
    variant_type: VariantType,
    size_multiplier: f64,
    crust_type: String,
    base_cost_adjustment: f64,
    applies_to: Vec<String>,
    ingredients: IngredientListManager,
    catalogs: ReferenceCatalogs,
}

impl Default for VariantComposer {
    fn default() -> Self {
        Self::from_variant(RecipeVariant::default())
    }
}

impl VariantComposer {
    /// Start an empty variant
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_variant(variant: RecipeVariant) -> Self {
        Self {
            name: variant.name,
            description: variant.description,
            variant_type: variant.variant_type,
            size_multiplier: variant.size_multiplier,
            crust_type: variant.crust_type,
            base_cost_adjustment: variant.base_cost_adjustment,
            applies_to: variant.applies_to,
            ingredients: IngredientListManager::from_references(variant.ingredients),
            catalogs: ReferenceCatalogs::default(),
        }
    }

    /// Reopen a stored variant, whatever field-name convention it was saved with
    pub fn from_existing(value: &Value) -> Result<Self, CompositionError> {
        let variant = source_resolver::rehydrate_variant(value)?;
        Ok(Self::from_variant(variant))
    }

    /// Fetch the reference catalogs for this session
    pub async fn load_catalogs<S: CatalogSource>(&mut self, source: &S) {
        self.catalogs = ReferenceCatalogs::load(source).await;
    }

    pub fn catalogs(&self) -> &ReferenceCatalogs {
        &self.catalogs
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn set_description(&mut self, description: &str) {
        self.description = description.to_string();
    }

    pub fn variant_type(&self) -> VariantType {
        self.variant_type
    }

    pub fn set_variant_type(&mut self, variant_type: VariantType) {
        self.variant_type = variant_type;
    }

    pub fn set_size_multiplier(&mut self, multiplier: f64) {
        self.size_multiplier = multiplier;
    }

    pub fn set_crust_type(&mut self, crust_type: &str) {
        self.crust_type = crust_type.to_string();
    }

    pub fn set_base_cost_adjustment(&mut self, adjustment: f64) {
        self.base_cost_adjustment = adjustment;
    }

    /// Base recipes this variant applies to, in selection order
    pub fn applies_to(&self) -> &[String] {
        &self.applies_to
    }

    /// Add or remove a base recipe; returns whether it is now selected
    pub fn toggle_recipe(&mut self, recipe_id: &str) -> bool {
        if let Some(pos) = self.applies_to.iter().position(|id| id == recipe_id) {
            self.applies_to.remove(pos);
            false
        } else {
            self.applies_to.push(recipe_id.to_string());
            true
        }
    }

    /// Replace the recipe selection, dropping blanks and duplicates
    pub fn select_recipes<I, S>(&mut self, recipe_ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.applies_to.clear();
        for id in recipe_ids.into_iter().map(Into::into) {
            if !id.trim().is_empty() && !self.applies_to.contains(&id) {
                self.applies_to.push(id);
            }
        }
    }

    pub fn ingredients(&self) -> &IngredientListManager {
        &self.ingredients
    }

    pub fn ingredients_mut(&mut self) -> &mut IngredientListManager {
        &mut self.ingredients
    }

    /// Snapshot of the variant being edited
    pub fn variant(&self) -> RecipeVariant {
        RecipeVariant {
            name: self.name.clone(),
            description: self.description.clone(),
            variant_type: self.variant_type,
            size_multiplier: self.size_multiplier,
            crust_type: self.crust_type.clone(),
            base_cost_adjustment: self.base_cost_adjustment,
            applies_to: self.applies_to.clone(),
            ingredients: self.ingredients.to_references(),
        }
    }

    /// Assemble the save payload without checking it
    pub fn form_data(&self) -> RecipeVariantFormData {
        self.variant().to_form_data()
    }

    /// Incomplete rows with their missing fields
    pub fn validation_summary(&self) -> Vec<(usize, Vec<MissingField>)> {
        self.ingredients
            .iter()
            .enumerate()
            .map(|(index, reference)| (index, ingredient_validator::validate(reference)))
            .filter(|(_, missing)| !missing.is_empty())
            .collect()
    }

    /// Run the submission preconditions in order
    pub fn check(&self) -> Result<(), SubmitError> {
        if self.name.trim().is_empty() {
            return Err(SubmitError::MissingName);
        }
        if self.applies_to.is_empty() {
            return Err(SubmitError::NoRecipesSelected);
        }
        let incomplete = self.ingredients.incomplete_count();
        if incomplete > 0 {
            return Err(SubmitError::IncompleteIngredients(incomplete));
        }
        Ok(())
    }

    /// Validate and hand the variant to the save collaborator.
    ///
    /// Returns the payload that was saved. Completeness errors never reach the
    /// collaborator; a collaborator failure is reported with its own message.
    pub async fn submit<S: VariantSaver>(
        &self,
        saver: &S,
    ) -> Result<RecipeVariantFormData, SubmitError> {
        if let Err(e) = self.check() {
            debug!("Variant {:?} not submitted: {}", self.name, e);
            return Err(e);
        }

        let data = self.form_data();
        let response = saver.save(&data).await?;

        if response.success {
            info!(
                "Saved variant {:?} for {} recipe(s) with {} ingredient(s)",
                data.name,
                data.recipe_id.len(),
                data.ingredients.len()
            );
            Ok(data)
        } else {
            let reason = response
                .error
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| GENERIC_SAVE_FAILURE.to_string());
            warn!("Backend rejected variant {:?}: {}", data.name, reason);
            Err(SubmitError::Rejected(reason))
        }
    }
}
