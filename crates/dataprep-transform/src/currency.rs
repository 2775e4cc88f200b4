//! Currency-string parsing for product prices.
//!
//! Listing prices arrive as strings like `"₹1,299"` or `"$29.99"`: a
//! leading non-digit run (the currency symbol) followed by a run of
//! digits, commas, and dots (the magnitude).

use std::sync::LazyLock;

use regex::Regex;

static CURRENCY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\D+)([\d.,]+)").expect("currency regex"));

/// A price string split into its currency symbol and numeric magnitude.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CurrencySplit {
    pub symbol: Option<String>,
    pub amount: Option<f64>,
}

/// Split a raw price into symbol and magnitude.
///
/// Commas are stripped from the magnitude before conversion. Values that
/// do not match the pattern, or whose magnitude does not convert, yield
/// missing for both parts.
pub fn split_currency(raw: &str) -> CurrencySplit {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return CurrencySplit::default();
    }
    let Some(captures) = CURRENCY_RE.captures(trimmed) else {
        return CurrencySplit::default();
    };
    let symbol = captures[1].trim();
    let magnitude = captures[2].replace(',', "");
    let Ok(amount) = magnitude.parse::<f64>() else {
        return CurrencySplit::default();
    };
    CurrencySplit {
        symbol: if symbol.is_empty() {
            None
        } else {
            Some(symbol.to_string())
        },
        amount: Some(amount),
    }
}
