//! # Variant Report
//!
//! Plain-text, localized summary of a variant editing session: what it applies
//! to, each ingredient row with its missing fields or conversion choices, and
//! whether it can be submitted.

use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::composer_errors::SubmitError;
use crate::ingredient_validator;
use crate::localization::{t_args_lang, t_lang};
use crate::unit_catalog;
use crate::variant_composer::VariantComposer;

/// Load a stored variant (camelCase or PascalCase JSON) from disk
pub fn load_variant_file(path: &Path) -> Result<VariantComposer> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    let composer = VariantComposer::from_existing(&value)
        .with_context(|| format!("{} is not a recipe variant", path.display()))?;
    Ok(composer)
}

/// Localized text for a submission error
pub fn describe_submit_error(err: &SubmitError, language: Option<&str>) -> String {
    let (key, args) = err.message_key();
    let args: Vec<(&str, &str)> = args.iter().map(|(k, v)| (*k, v.as_str())).collect();
    t_args_lang(key, &args, language)
}

/// Render the session as report lines
pub fn render_report(composer: &VariantComposer, language: Option<&str>) -> String {
    let mut lines = Vec::new();

    lines.push(t_args_lang(
        "report-title",
        &[
            ("name", composer.name()),
            ("type", composer.variant_type().as_str()),
        ],
        language,
    ));

    if composer.applies_to().is_empty() {
        lines.push(t_lang("report-no-recipes", language));
    } else {
        let recipes = composer
            .applies_to()
            .iter()
            .map(|id| match composer.catalogs().find_recipe(id) {
                Some(entry) if !entry.name.is_empty() => entry.name.clone(),
                _ => id.clone(),
            })
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(t_args_lang("report-applies-to", &[("recipes", &recipes)], language));
    }

    if composer.ingredients().is_empty() {
        lines.push(t_lang("report-no-ingredients", language));
    }

    for (index, reference) in composer.ingredients().iter().enumerate() {
        let number = (index + 1).to_string();
        let ingredient = reference.to_string();
        let missing = ingredient_validator::validate(reference);

        if missing.is_empty() {
            lines.push(t_args_lang(
                "report-ingredient-ok",
                &[("number", &number), ("ingredient", &ingredient)],
                language,
            ));
            let units = unit_catalog::compatible_units(&reference.unit);
            if !units.is_empty() {
                let units = units
                    .iter()
                    .map(|u| u.value.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                lines.push(format!(
                    "   {}",
                    t_args_lang("report-conversions", &[("units", &units)], language)
                ));
            }
        } else {
            let fields = missing
                .iter()
                .map(|field| t_lang(field.message_key(), language))
                .collect::<Vec<_>>()
                .join(", ");
            lines.push(t_args_lang(
                "report-ingredient-missing",
                &[
                    ("number", &number),
                    ("ingredient", &ingredient),
                    ("fields", &fields),
                ],
                language,
            ));
        }
    }

    match composer.check() {
        Ok(()) => lines.push(t_lang("report-ready", language)),
        Err(e) => lines.push(describe_submit_error(&e, language)),
    }

    lines.join("\n")
}
