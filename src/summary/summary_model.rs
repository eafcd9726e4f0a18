use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::fx::CurrencyCode;

/// Portfolio-level totals for the overview cards. Spend fields are
/// already rounded to the display currency's precision.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionSummary {
    pub total_count: usize,
    pub monthly_spend: Decimal,
    pub yearly_spend: Decimal,
    pub currency: CurrencyCode,
    /// Subscriptions due within the requested window (today inclusive).
    pub due_within_window: usize,
}
