//! Currency symbol resolution and money formatting.

use crate::types::Money;

/// Symbol used when a currency code is unknown and no symbol was supplied.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";

/// Currency code used by a freshly created site configuration.
pub const DEFAULT_CURRENCY_CODE: &str = "USD";

/// Known currency codes and their display symbols.
pub const CURRENCY_SYMBOLS: &[(&str, &str)] = &[
    ("USD", "$"),
    ("EUR", "€"),
    ("GBP", "£"),
    ("KES", "KSh"),
    ("INR", "₹"),
    ("CNY", "¥"),
];

/// Maximum stored length of a currency symbol (`site_configs.currency_symbol`).
pub const MAX_SYMBOL_LENGTH: usize = 5;

/// Look up the symbol for a known currency code.
pub fn symbol_for(code: &str) -> Option<&'static str> {
    CURRENCY_SYMBOLS
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, symbol)| *symbol)
}

/// Resolve the symbol to store for `code`.
///
/// An explicitly supplied, non-blank symbol wins. Otherwise the fixed table
/// is consulted, and unknown codes fall back to [`DEFAULT_CURRENCY_SYMBOL`].
pub fn resolve_currency_symbol(code: &str, supplied: Option<&str>) -> String {
    if let Some(symbol) = supplied.map(str::trim).filter(|s| !s.is_empty()) {
        return symbol.to_string();
    }
    symbol_for(code)
        .unwrap_or(DEFAULT_CURRENCY_SYMBOL)
        .to_string()
}

/// Render an amount with its currency symbol, e.g. `KSh1500.00`.
pub fn format_money(symbol: &str, amount: Money) -> String {
    format!("{symbol}{amount}")
}
