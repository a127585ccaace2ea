//! # Recipe Composer
//!
//! Recipe ingredient and variant composition core for a restaurant back office.
//! Ingredients reference either inventory items or sub-recipes, carry a
//! quantity and unit, and can offer a unit conversion within the same family.
//! Variants layer extra ingredients and a price adjustment onto one or more
//! base recipes and are validated before being handed to the backend.

pub mod backend_client;
pub mod backend_config;
pub mod catalog;
pub mod composer_errors;
pub mod ingredient_list;
pub mod ingredient_model;
pub mod ingredient_validator;
pub mod localization;
pub mod priced_options;
pub mod quantity_parser;
pub mod report;
pub mod source_resolver;
pub mod unit_catalog;
pub mod variant_composer;
pub mod variant_model;
