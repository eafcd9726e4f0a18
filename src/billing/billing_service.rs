use std::sync::Arc;

use chrono::{Datelike, Months, NaiveDate};
use log::error;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::billing_traits::BillingServiceTrait;
use crate::errors::Result;
use crate::fx::{CurrencyCode, FxServiceTrait};
use crate::subscriptions::{BillingCycle, Subscription};

/// Computes what each subscription contributes to "this month" and
/// "this year", honoring partial first periods.
///
/// Month and year equivalents put heterogeneous cycles on a common
/// basis; the first-period fraction keeps spend from being overstated
/// for items that started mid-period.
pub struct BillingService {
    fx: Arc<dyn FxServiceTrait>,
}

impl BillingService {
    pub fn new(fx: Arc<dyn FxServiceTrait>) -> Self {
        BillingService { fx }
    }

    /// Number of "equivalent months" a subscription contributes to the
    /// reference year: 12 when it predates the year or has no start, 0
    /// when it starts after it, otherwise the full months after the
    /// start month plus the start month's own fraction.
    fn equivalent_months_in_year(&self, start: Option<NaiveDate>, reference: NaiveDate) -> Decimal {
        match start {
            None => dec!(12),
            Some(start) if start.year() < reference.year() => dec!(12),
            Some(start) if start.year() > reference.year() => Decimal::ZERO,
            Some(start) => {
                let full_months = Decimal::from(12 - start.month());
                full_months + self.first_month_fraction(start, start)
            }
        }
    }
}

/// Calendar length of the month `reference` falls in.
pub fn days_in_month(reference: NaiveDate) -> u32 {
    let first = reference.with_day(1).unwrap_or(reference);
    match first.checked_add_months(Months::new(1)) {
        Some(next_month) => next_month.signed_duration_since(first).num_days() as u32,
        // Only reachable at the end of chrono's date range
        None => 31,
    }
}

impl BillingServiceTrait for BillingService {
    fn monthly_equivalent(&self, subscription: &Subscription) -> Decimal {
        let price = subscription.sanitized_price();
        match subscription.cycle {
            BillingCycle::Monthly => price,
            BillingCycle::Quarterly => price / dec!(3),
            BillingCycle::Yearly => price / dec!(12),
            BillingCycle::Lifetime | BillingCycle::Other => Decimal::ZERO,
        }
    }

    fn first_month_fraction(&self, start: NaiveDate, reference: NaiveDate) -> Decimal {
        let month_days = days_in_month(reference);
        let month_start = reference.with_day(1).unwrap_or(reference);
        let month_end = reference.with_day(month_days).unwrap_or(reference);

        if start > month_end {
            // Not started yet, contributes nothing this month
            Decimal::ZERO
        } else if start < month_start {
            Decimal::ONE
        } else {
            // Days from the start day (inclusive) through month end
            let active_days = month_days - (start.day() - 1);
            Decimal::from(active_days) / Decimal::from(month_days)
        }
    }

    fn monthly_spend(
        &self,
        subscriptions: &[Subscription],
        display: CurrencyCode,
        reference: NaiveDate,
    ) -> Result<Decimal> {
        let mut total = Decimal::ZERO;
        for subscription in subscriptions {
            let equivalent = self.monthly_equivalent(subscription);
            if equivalent.is_zero() {
                continue;
            }
            // No start date means fully active
            let fraction = match subscription.parsed_start_date() {
                Some(start) => self.first_month_fraction(start, reference),
                None => Decimal::ONE,
            };
            if fraction.is_zero() {
                continue;
            }
            match self
                .fx
                .convert(equivalent * fraction, subscription.currency, display)
            {
                Ok(converted) => total += converted,
                Err(e) => {
                    error!(
                        "Skipping subscription {} in monthly spend: {}",
                        subscription.id, e
                    );
                }
            }
        }
        Ok(total)
    }

    fn yearly_spend(
        &self,
        subscriptions: &[Subscription],
        display: CurrencyCode,
        reference: NaiveDate,
    ) -> Result<Decimal> {
        let mut total = Decimal::ZERO;
        for subscription in subscriptions {
            let equivalent = self.monthly_equivalent(subscription);
            if equivalent.is_zero() {
                continue;
            }
            let months =
                self.equivalent_months_in_year(subscription.parsed_start_date(), reference);
            if months.is_zero() {
                continue;
            }
            match self
                .fx
                .convert(equivalent * months, subscription.currency, display)
            {
                Ok(converted) => total += converted,
                Err(e) => {
                    error!(
                        "Skipping subscription {} in yearly spend: {}",
                        subscription.id, e
                    );
                }
            }
        }
        Ok(total)
    }
}
