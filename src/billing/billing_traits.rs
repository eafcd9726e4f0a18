use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::errors::Result;
use crate::fx::CurrencyCode;
use crate::subscriptions::Subscription;

/// Trait defining the contract for billing calculations.
pub trait BillingServiceTrait: Send + Sync {
    /// Normalized monthly cost in the subscription's own currency.
    fn monthly_equivalent(&self, subscription: &Subscription) -> Decimal;

    /// Fraction of `reference`'s month the subscription is active for,
    /// given its start date. Always in `[0, 1]`.
    fn first_month_fraction(&self, start: NaiveDate, reference: NaiveDate) -> Decimal;

    /// Prorated spend for `reference`'s month across all subscriptions,
    /// converted to `display`.
    fn monthly_spend(
        &self,
        subscriptions: &[Subscription],
        display: CurrencyCode,
        reference: NaiveDate,
    ) -> Result<Decimal>;

    /// Prorated spend for `reference`'s year across all subscriptions,
    /// converted to `display`.
    fn yearly_spend(
        &self,
        subscriptions: &[Subscription],
        display: CurrencyCode,
        reference: NaiveDate,
    ) -> Result<Decimal>;
}
