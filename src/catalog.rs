//! # External Collaborators
//!
//! The composition core never talks to the network itself. It consumes
//! reference catalogs through [`CatalogSource`] and persists variants through
//! [`VariantSaver`]; `backend_client` provides the REST implementation.

use anyhow::Result;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;

use crate::ingredient_model::SourceType;
use crate::source_resolver::{normalize_catalog, CatalogEntry};
use crate::variant_model::RecipeVariantFormData;

/// Supplier of raw inventory and recipe records
pub trait CatalogSource {
    fn inventory_items(&self) -> impl Future<Output = Result<Vec<Value>>> + Send;
    fn recipes(&self) -> impl Future<Output = Result<Vec<Value>>> + Send;
}

/// Persists an assembled variant
pub trait VariantSaver {
    fn save(
        &self,
        data: &RecipeVariantFormData,
    ) -> impl Future<Output = Result<SaveResponse>> + Send;
}

/// Outcome reported by the save collaborator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SaveResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: &str) -> Self {
        Self {
            success: false,
            error: Some(error.to_string()),
        }
    }
}

/// Reference catalogs loaded when an editor opens
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceCatalogs {
    pub inventory: Vec<CatalogEntry>,
    /// Recipes flagged as usable ingredients
    pub sub_recipes: Vec<CatalogEntry>,
    /// Every recipe, for choosing what a variant applies to
    pub recipes: Vec<CatalogEntry>,
}

impl ReferenceCatalogs {
    /// Fetch and normalize all catalogs.
    ///
    /// A failed fetch is logged and leaves that catalog empty; the editor stays
    /// usable and there is no retry here.
    pub async fn load<S: CatalogSource>(source: &S) -> Self {
        let (inventory, recipes) = tokio::join!(source.inventory_items(), source.recipes());

        let inventory = match inventory {
            Ok(items) => normalize_catalog(&items),
            Err(e) => {
                warn!("Failed to load inventory catalog: {:#}", e);
                Vec::new()
            }
        };
        let recipes = match recipes {
            Ok(items) => normalize_catalog(&items),
            Err(e) => {
                warn!("Failed to load recipe catalog: {:#}", e);
                Vec::new()
            }
        };
        let sub_recipes: Vec<CatalogEntry> = recipes
            .iter()
            .filter(|entry| entry.is_sub_recipe())
            .cloned()
            .collect();

        info!(
            "Loaded catalogs: {} inventory items, {} recipes ({} sub-recipes)",
            inventory.len(),
            recipes.len(),
            sub_recipes.len()
        );

        Self {
            inventory,
            sub_recipes,
            recipes,
        }
    }

    /// Ingredient candidates for a source type
    pub fn entries_for(&self, source_type: SourceType) -> &[CatalogEntry] {
        match source_type {
            SourceType::Inventory => &self.inventory,
            SourceType::Recipe => &self.sub_recipes,
        }
    }

    pub fn find_recipe(&self, id: &str) -> Option<&CatalogEntry> {
        self.recipes.iter().find(|entry| entry.id == id)
    }
}
