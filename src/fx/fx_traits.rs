use rust_decimal::Decimal;

use super::currency::CurrencyCode;
use super::fx_model::FormatOptions;
use crate::errors::Result;

/// Trait defining the contract for currency conversion operations.
pub trait FxServiceTrait: Send + Sync {
    /// Converts `amount` from one currency to another and rounds to the
    /// target currency's precision. Identity conversions still round.
    fn convert(&self, amount: Decimal, from: CurrencyCode, to: CurrencyCode) -> Result<Decimal>;

    /// Rounds `amount` to the currency's precision. Total, never fails.
    fn round_with_precision(&self, amount: Decimal, code: CurrencyCode) -> Decimal;

    /// Renders `amount` with exactly `precision` fraction digits,
    /// optional digit grouping and an optional leading symbol.
    fn format(&self, amount: Decimal, code: CurrencyCode, options: &FormatOptions) -> String;

    /// Composition of [`convert`](Self::convert) and
    /// [`format`](Self::format); used wherever a converted value is
    /// shown next to the original.
    fn convert_and_format(
        &self,
        amount: Decimal,
        from: CurrencyCode,
        to: CurrencyCode,
        options: &FormatOptions,
    ) -> Result<String>;
}
