//! # Quantity Input Parser
//!
//! Turns the text typed in an ingredient row's quantity field into a number.
//!
//! Accepted forms:
//! - decimals: `"2"`, `"1.5"`, `".25"`
//! - decimal comma: `"1,5"`, `"0,250"`
//! - fractions: `"1/2"`, `"3⁄4"`
//! - mixed numbers: `"1 1/2"`
//!
//! Anything else (negative numbers, zero denominators, words) yields `None`,
//! which the row stores as a blank quantity. So does `"1,000"`: a comma
//! followed by exactly three digits after a non-zero integer part may be a
//! thousands separator, so it is left for the user to retype.

use lazy_static::lazy_static;
use log::{debug, trace};
use regex::Regex;

lazy_static! {
    static ref DECIMAL: Regex = Regex::new(r"^(\d*[.,]?\d+)$").unwrap();
    static ref THOUSANDS_GROUP: Regex = Regex::new(r"^[1-9]\d{0,2},\d{3}$").unwrap();
    static ref FRACTION: Regex = Regex::new(r"^(?:(\d+)\s+)?(\d+)\s*[⁄/]\s*(\d+)$").unwrap();
}

/// Parse a quantity field; blank or malformed input gives `None`
pub fn parse_quantity_input(input: &str) -> Option<f64> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if THOUSANDS_GROUP.is_match(input) {
        debug!("Ambiguous quantity input {:?} left blank", input);
        return None;
    }

    if let Some(captures) = DECIMAL.captures(input) {
        return captures[1].replace(',', ".").parse::<f64>().ok();
    }

    if let Some(captures) = FRACTION.captures(input) {
        let whole = captures
            .get(1)
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .unwrap_or(0);
        let numerator = captures[2].parse::<u32>().ok()?;
        let denominator = captures[3].parse::<u32>().ok()?;
        if denominator == 0 {
            return None;
        }
        return Some(whole as f64 + numerator as f64 / denominator as f64);
    }

    trace!("Unparseable quantity input: {:?}", input);
    None
}
