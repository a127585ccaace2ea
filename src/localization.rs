//! # Localization
//!
//! User-facing messages (row validation labels, submission errors, CLI report
//! lines) are Fluent messages. English and French resources are embedded in
//! the binary; any other language falls back to English.

use anyhow::{anyhow, Result};
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource, FluentValue};
use lazy_static::lazy_static;
use log::warn;
use std::collections::HashMap;
use unic_langid::LanguageIdentifier;

pub const DEFAULT_LANGUAGE: &str = "en";

/// Arguments that drive plural selectors; every other argument is shown as written
const NUMERIC_ARGS: &[&str] = &["count"];

const RESOURCES: &[(&str, &str)] = &[
    ("en", include_str!("../locales/en/main.ftl")),
    ("fr", include_str!("../locales/fr/main.ftl")),
];

/// Localization manager holding one bundle per supported language
pub struct LocalizationManager {
    bundles: HashMap<String, FluentBundle<FluentResource>>,
}

lazy_static! {
    static ref LOCALIZATION: LocalizationManager = LocalizationManager::new().unwrap_or_else(|e| {
        warn!("Localization unavailable, falling back to message keys: {:#}", e);
        LocalizationManager {
            bundles: HashMap::new(),
        }
    });
}

impl LocalizationManager {
    /// Build bundles for every embedded resource
    pub fn new() -> Result<Self> {
        let mut bundles = HashMap::new();
        for (language, source) in RESOURCES {
            let bundle = Self::create_bundle(language, source)?;
            bundles.insert((*language).to_string(), bundle);
        }
        Ok(Self { bundles })
    }

    fn create_bundle(language: &str, source: &str) -> Result<FluentBundle<FluentResource>> {
        let locale: LanguageIdentifier = language.parse()?;
        let mut bundle = FluentBundle::new_concurrent(vec![locale]);
        bundle.set_use_isolating(false);

        let resource = FluentResource::try_new(source.to_string())
            .map_err(|(_, errors)| anyhow!("Invalid {} resource: {:?}", language, errors))?;
        bundle
            .add_resource(resource)
            .map_err(|errors| anyhow!("Conflicting {} messages: {:?}", language, errors))?;

        Ok(bundle)
    }

    pub fn supports(&self, language: &str) -> bool {
        self.bundles.contains_key(language)
    }

    /// Format a message in `language`, falling back to English.
    ///
    /// Arguments named in `NUMERIC_ARGS` are passed as numbers so plural
    /// selectors work; all others are inserted verbatim.
    pub fn get_message_in_language(
        &self,
        key: &str,
        language: &str,
        args: Option<&HashMap<&str, &str>>,
    ) -> String {
        let bundle = match self
            .bundles
            .get(language)
            .or_else(|| self.bundles.get(DEFAULT_LANGUAGE))
        {
            Some(bundle) => bundle,
            None => return format!("Missing translation: {}", key),
        };

        let pattern = match bundle.get_message(key).and_then(|msg| msg.value()) {
            Some(pattern) => pattern,
            None => return format!("Missing translation: {}", key),
        };

        let fluent_args = args.map(|args| {
            let mut fluent_args = FluentArgs::new();
            for (name, value) in args {
                let value = match value.parse::<f64>() {
                    Ok(number) if NUMERIC_ARGS.contains(name) => FluentValue::from(number),
                    _ => FluentValue::from(*value),
                };
                fluent_args.set(*name, value);
            }
            fluent_args
        });

        let mut errors = vec![];
        let value = bundle.format_pattern(pattern, fluent_args.as_ref(), &mut errors);
        if !errors.is_empty() {
            warn!("Errors formatting message {}: {:?}", key, errors);
        }
        value.into_owned()
    }

    pub fn get_message_with_args(
        &self,
        key: &str,
        language: &str,
        args: &[(&str, &str)],
    ) -> String {
        let args_map: HashMap<&str, &str> = args.iter().cloned().collect();
        self.get_message_in_language(key, language, Some(&args_map))
    }
}

/// Get the shared localization manager
pub fn get_localization_manager() -> &'static LocalizationManager {
    &LOCALIZATION
}

/// Localized message without arguments
pub fn t_lang(key: &str, language: Option<&str>) -> String {
    LOCALIZATION.get_message_in_language(key, language.unwrap_or(DEFAULT_LANGUAGE), None)
}

/// Localized message with string arguments
pub fn t_args_lang(key: &str, args: &[(&str, &str)], language: Option<&str>) -> String {
    LOCALIZATION.get_message_with_args(key, language.unwrap_or(DEFAULT_LANGUAGE), args)
}
