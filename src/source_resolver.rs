//! # Ingredient Source Resolver
//!
//! Normalization boundary between backend records and the composition core.
//!
//! Catalog and variant records come from several backend generations and spell
//! the same fields differently (`Name`/`name`, `_id`/`id`/`ID`,
//! `Unit`/`baseUnit`, camelCase or PascalCase variant payloads). Everything is
//! resolved here once; the rest of the crate only sees canonical types.

use log::{debug, trace};
use serde_json::{Map, Value};

use crate::composer_errors::CompositionError;
use crate::ingredient_model::{
    IngredientReference, IngredientSource, SourceSelection, SourceType,
};
use crate::unit_catalog;
use crate::variant_model::{RecipeVariant, VariantType, DEFAULT_SIZE_MULTIPLIER};

const ID_KEYS: &[&str] = &["_id", "id", "ID"];
const NAME_KEYS: &[&str] = &["Name", "name"];
const UNIT_KEYS: &[&str] = &["Unit", "baseUnit"];
const KIND_KEYS: &[&str] = &["type", "Type"];

/// Recipe-catalog flag marking recipes usable as ingredients
pub const SUB_RECIPE_KIND: &str = "sub";

/// Fields taken from a catalog item when it is selected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSource {
    pub source_id: String,
    pub name_snapshot: String,
    pub unit: String,
}

/// A catalog record with its field names normalized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    pub unit: Option<String>,
    /// Recipe classification flag (`"sub"` for sub-recipes)
    pub kind: Option<String>,
}

impl CatalogEntry {
    /// Normalize a raw catalog record.
    ///
    /// Fails when the record is not an object or carries no identifier.
    pub fn from_value(item: &Value) -> Result<Self, CompositionError> {
        let obj = item.as_object().ok_or_else(|| {
            CompositionError::InvalidPayload(format!("catalog item is not an object: {item}"))
        })?;

        let id = string_field(obj, ID_KEYS)
            .ok_or_else(|| CompositionError::MissingIdentifier(item.to_string()))?;
        let name = string_field(obj, NAME_KEYS).unwrap_or_default();
        let unit = string_field(obj, UNIT_KEYS);
        let kind = string_field(obj, KIND_KEYS);

        Ok(Self {
            id,
            name,
            unit,
            kind,
        })
    }

    pub fn is_sub_recipe(&self) -> bool {
        self.kind
            .as_deref()
            .is_some_and(|kind| kind.eq_ignore_ascii_case(SUB_RECIPE_KIND))
    }

    /// Fields to copy onto a reference of the given source type
    pub fn resolve(&self, source_type: SourceType) -> ResolvedSource {
        ResolvedSource {
            source_id: self.id.clone(),
            name_snapshot: self.name.clone(),
            unit: self
                .unit
                .clone()
                .unwrap_or_else(|| source_type.default_unit().to_string()),
        }
    }
}

/// Resolve a raw catalog item into the fields stored on a reference
pub fn resolve(item: &Value, source_type: SourceType) -> Result<ResolvedSource, CompositionError> {
    let entry = CatalogEntry::from_value(item)?;
    Ok(entry.resolve(source_type))
}

/// Normalize a whole catalog, skipping records that cannot be used
pub fn normalize_catalog(items: &[Value]) -> Vec<CatalogEntry> {
    items
        .iter()
        .filter_map(|item| match CatalogEntry::from_value(item) {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!("Skipping catalog record: {}", e);
                None
            }
        })
        .collect()
}

/// Case-insensitive substring search on entry names.
///
/// An empty (or whitespace) query returns every entry.
pub fn search_catalog<'a>(entries: &'a [CatalogEntry], query: &str) -> Vec<&'a CatalogEntry> {
    let needle = query.trim().to_lowercase();
    entries
        .iter()
        .filter(|entry| needle.is_empty() || entry.name.to_lowercase().contains(&needle))
        .collect()
}

/// Move a reference to another catalog.
///
/// The chosen item belonged to the old catalog, so the selection is cleared;
/// quantity, unit, conversion target and cost are kept. Switching to the
/// current type returns the reference unchanged.
pub fn switch_source_type(
    reference: &IngredientReference,
    source_type: SourceType,
) -> IngredientReference {
    if reference.source_type() == source_type {
        return reference.clone();
    }
    trace!(
        "Switching ingredient source {} -> {}, clearing selection {:?}",
        reference.source_type(),
        source_type,
        reference.source_id()
    );
    IngredientReference {
        source: IngredientSource::empty(source_type),
        quantity: reference.quantity,
        unit: reference.unit.clone(),
        convert_to_unit: reference.convert_to_unit.clone(),
        cost_per_unit: reference.cost_per_unit,
    }
}

/// Store a resolved catalog item on a reference.
///
/// The item's unit replaces the current one. A conversion target that is not
/// offered for the new unit is dropped.
pub fn apply_selection(
    reference: &IngredientReference,
    resolved: &ResolvedSource,
) -> IngredientReference {
    let convert_to_unit = reference
        .convert_to_unit
        .clone()
        .filter(|target| unit_catalog::is_conversion_target(&resolved.unit, target));

    IngredientReference {
        source: IngredientSource::with_selection(
            reference.source_type(),
            SourceSelection {
                source_id: resolved.source_id.clone(),
                name_snapshot: resolved.name_snapshot.clone(),
            },
        ),
        quantity: reference.quantity,
        unit: resolved.unit.clone(),
        convert_to_unit,
        cost_per_unit: reference.cost_per_unit,
    }
}

/// Rebuild an ingredient reference from a stored camelCase or PascalCase record
pub fn rehydrate_ingredient(value: &Value) -> Result<IngredientReference, CompositionError> {
    let obj = value.as_object().ok_or_else(|| {
        CompositionError::InvalidPayload(format!("ingredient is not an object: {value}"))
    })?;

    let source_type = match string_field(obj, &["sourceType", "SourceType"]) {
        Some(raw) => raw.parse::<SourceType>()?,
        None => SourceType::Inventory,
    };

    let selection = SourceSelection {
        source_id: string_field(obj, &["sourceId", "SourceId"]).unwrap_or_default(),
        name_snapshot: string_field(obj, &["name", "Name", "nameSnapshot"]).unwrap_or_default(),
    };

    Ok(IngredientReference {
        source: IngredientSource::with_selection(source_type, selection),
        quantity: number_field(obj, &["quantity", "Quantity"]),
        unit: string_field(obj, &["unit", "Unit"]).unwrap_or_default(),
        convert_to_unit: string_field(obj, &["convertToUnit", "ConvertToUnit"]),
        cost_per_unit: number_field(obj, &["costPerUnit", "CostPerUnit"]),
    })
}

/// Rebuild a variant from whichever field-name convention the backend used
pub fn rehydrate_variant(value: &Value) -> Result<RecipeVariant, CompositionError> {
    let obj = value.as_object().ok_or_else(|| {
        CompositionError::InvalidPayload(format!("variant is not an object: {value}"))
    })?;

    let variant_type = match string_field(obj, &["type", "Type"]) {
        Some(raw) => raw.parse::<VariantType>()?,
        None => VariantType::default(),
    };

    let metadata_applies_to = field(obj, &["metadata", "Metadata"])
        .and_then(Value::as_object)
        .and_then(|meta| field(meta, &["appliesTo", "AppliesTo"]))
        .map(string_list)
        .filter(|list| !list.is_empty());
    let applies_to = match metadata_applies_to {
        Some(list) => list,
        None => field(obj, &["recipeId", "RecipeId"])
            .map(string_list)
            .unwrap_or_default(),
    };

    let ingredients = match field(obj, &["ingredients", "Ingredients"]) {
        Some(Value::Array(items)) => items
            .iter()
            .map(rehydrate_ingredient)
            .collect::<Result<Vec<_>, _>>()?,
        Some(other) => {
            return Err(CompositionError::InvalidPayload(format!(
                "ingredients is not an array: {other}"
            )))
        }
        None => Vec::new(),
    };

    let variant = RecipeVariant {
        name: string_field(obj, &["name", "Name"]).unwrap_or_default(),
        description: string_field(obj, &["description", "Description"]).unwrap_or_default(),
        variant_type,
        size_multiplier: number_field(obj, &["sizeMultiplier", "SizeMultiplier"])
            .unwrap_or(DEFAULT_SIZE_MULTIPLIER),
        crust_type: string_field(obj, &["crustType", "CrustType"]).unwrap_or_default(),
        base_cost_adjustment: number_field(obj, &["baseCostAdjustment", "BaseCostAdjustment"])
            .unwrap_or(0.0),
        applies_to,
        ingredients,
    };

    debug!(
        "Rehydrated variant {:?} ({}, {} ingredients, {} recipes)",
        variant.name,
        variant.variant_type,
        variant.ingredients.len(),
        variant.applies_to.len()
    );

    Ok(variant)
}

/// First non-null value among `keys`
fn field<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .find(|value| !value.is_null())
}

/// First non-empty string (or number, stringified) among `keys`
fn string_field(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .find_map(scalar_to_string)
}

fn number_field(obj: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    field(obj, keys).and_then(|value| match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// A list of identifiers from an array or a single scalar, deduplicated in order
fn string_list(value: &Value) -> Vec<String> {
    let mut list: Vec<String> = Vec::new();
    let items: Vec<&Value> = match value {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    };
    for id in items.into_iter().filter_map(scalar_to_string) {
        if !list.contains(&id) {
            list.push(id);
        }
    }
    list
}
