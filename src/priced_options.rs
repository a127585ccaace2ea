//! # Priced Option Lists
//!
//! Named options with a price and an active flag, as used by menu-side tabs
//! (size ladders, add-on lists). Name and price are one record, so adding,
//! removing or reordering can never separate a price from its name.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::composer_errors::CompositionError;
use crate::ingredient_list::move_item;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedOption {
    pub name: String,
    pub price: f64,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PricedOptionList {
    options: Vec<PricedOption>,
}

impl PricedOption {
    pub fn new(name: &str, price: f64) -> Self {
        Self {
            name: name.to_string(),
            price,
            active: true,
        }
    }
}

impl PricedOptionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from legacy parallel `names`/`prices` arrays.
    ///
    /// Compatibility shim for older payloads; arrays of different lengths are
    /// rejected rather than silently truncated.
    pub fn from_parallel(names: &[String], prices: &[f64]) -> Result<Self, CompositionError> {
        if names.len() != prices.len() {
            warn!(
                "Rejecting parallel option arrays: {} names, {} prices",
                names.len(),
                prices.len()
            );
            return Err(CompositionError::LengthMismatch {
                names: names.len(),
                prices: prices.len(),
            });
        }
        let options = names
            .iter()
            .zip(prices)
            .map(|(name, price)| PricedOption::new(name, *price))
            .collect();
        Ok(Self { options })
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PricedOption> {
        self.options.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PricedOption> {
        self.options.iter()
    }

    /// Active options only, in list order
    pub fn active(&self) -> impl Iterator<Item = &PricedOption> {
        self.options.iter().filter(|option| option.active)
    }

    pub fn add(&mut self, option: PricedOption) -> usize {
        self.options.push(option);
        self.options.len() - 1
    }

    pub fn update(
        &mut self,
        index: usize,
        name: Option<&str>,
        price: Option<f64>,
    ) -> Result<(), CompositionError> {
        let len = self.options.len();
        let option = self
            .options
            .get_mut(index)
            .ok_or(CompositionError::IndexOutOfRange { index, len })?;
        if let Some(name) = name {
            option.name = name.to_string();
        }
        if let Some(price) = price {
            option.price = price;
        }
        Ok(())
    }

    /// Flip the active flag and return its new value
    pub fn toggle(&mut self, index: usize) -> Result<bool, CompositionError> {
        let len = self.options.len();
        let option = self
            .options
            .get_mut(index)
            .ok_or(CompositionError::IndexOutOfRange { index, len })?;
        option.active = !option.active;
        Ok(option.active)
    }

    pub fn remove(&mut self, index: usize) -> Result<PricedOption, CompositionError> {
        if index >= self.options.len() {
            return Err(CompositionError::IndexOutOfRange {
                index,
                len: self.options.len(),
            });
        }
        let removed = self.options.remove(index);
        debug!("Removed priced option {:?}", removed.name);
        Ok(removed)
    }

    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), CompositionError> {
        move_item(&mut self.options, from, to)
    }

    /// Split back into parallel arrays for consumers that still expect them
    pub fn to_parallel(&self) -> (Vec<String>, Vec<f64>) {
        self.options
            .iter()
            .map(|option| (option.name.clone(), option.price))
            .unzip()
    }
}
