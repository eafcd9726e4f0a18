use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::currency::CurrencyCode;

/// One entry of the fixed rate table: 1 unit of `currency` equals
/// `rate` units of the reference currency.
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub struct RateToBase {
    pub currency: CurrencyCode,
    pub rate: Decimal,
}

/// Rendering options for formatted amounts.
///
/// Grouping always inserts a comma every three integer digits; every
/// locale in the registry groups by threes, so no per-locale table is
/// needed.
#[derive(Debug, Clone, Copy)]
pub struct FormatOptions {
    pub with_symbol: bool,
    pub use_grouping: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            with_symbol: true,
            use_grouping: true,
        }
    }
}
