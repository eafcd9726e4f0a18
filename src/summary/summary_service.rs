use std::sync::Arc;

use chrono::NaiveDate;
use log::debug;

use super::summary_model::SubscriptionSummary;
use crate::billing::BillingServiceTrait;
use crate::errors::Result;
use crate::fx::CurrencyCode;
use crate::renewal::days_until;
use crate::subscriptions::Subscription;

/// Folds the subscription collection into the overview totals.
///
/// Side-effect free and idempotent: the UI recomputes it on every state
/// change, so identical inputs must produce identical output.
pub struct SummaryService {
    billing: Arc<dyn BillingServiceTrait>,
}

impl SummaryService {
    pub fn new(billing: Arc<dyn BillingServiceTrait>) -> Self {
        SummaryService { billing }
    }

    pub fn summarize(
        &self,
        subscriptions: &[Subscription],
        display: CurrencyCode,
        today: NaiveDate,
        due_window_days: i64,
    ) -> Result<SubscriptionSummary> {
        debug!(
            "Summarizing {} subscription(s) in {}",
            subscriptions.len(),
            display
        );

        let monthly_spend = self.billing.monthly_spend(subscriptions, display, today)?;
        let yearly_spend = self.billing.yearly_spend(subscriptions, display, today)?;

        let due_within_window = subscriptions
            .iter()
            .filter(|s| {
                matches!(
                    days_until(s.parsed_next_due_date(), today),
                    Some(days) if (0..=due_window_days).contains(&days)
                )
            })
            .count();

        Ok(SubscriptionSummary {
            total_count: subscriptions.len(),
            monthly_spend,
            yearly_spend,
            currency: display,
            due_within_window,
        })
    }
}
