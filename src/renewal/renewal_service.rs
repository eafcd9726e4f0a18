//! Due-date scheduling for recurring subscriptions.
//!
//! Everything here is a pure function over immutable records; the batch
//! entry point returns updated copies for the caller to persist. Month
//! addition clamps day-of-month to the target month's length (Jan 31
//! plus one month is Feb 28/29, never early March).

use chrono::{Months, NaiveDate};
use log::debug;

use crate::subscriptions::{BillingCycle, Subscription};

/// Next due date after `current` for the given cycle. Non-recurring
/// cycles return `current` unchanged, so callers must not loop on this
/// expecting progress.
pub fn advance_due_date(current: NaiveDate, cycle: BillingCycle) -> NaiveDate {
    match cycle.months() {
        // checked_add_months clamps the day to the target month's end
        Some(months) => current
            .checked_add_months(Months::new(months))
            .unwrap_or(current),
        None => current,
    }
}

/// Signed whole days from `today` to the due date; negative when
/// overdue, `None` when there is no due date.
pub fn days_until(due_date: Option<NaiveDate>, today: NaiveDate) -> Option<i64> {
    due_date.map(|due| due.signed_duration_since(today).num_days())
}

/// A subscription renews when auto-renew is set, the cycle recurs, and
/// the due date is today or past.
pub fn is_due_for_renewal(subscription: &Subscription, today: NaiveDate) -> bool {
    if !subscription.auto_renew || !subscription.cycle.is_recurring() {
        return false;
    }
    matches!(
        days_until(subscription.parsed_next_due_date(), today),
        Some(days) if days <= 0
    )
}

/// Returns a copy with the due date caught up past `today`, advancing
/// over as many cycles as the record is overdue by. Identity when not
/// due, which makes repeated application a no-op.
pub fn apply_renewal(subscription: &Subscription, today: NaiveDate) -> Subscription {
    if !is_due_for_renewal(subscription, today) {
        return subscription.clone();
    }
    let mut due = match subscription.parsed_next_due_date() {
        Some(due) => due,
        None => return subscription.clone(),
    };
    while due.signed_duration_since(today).num_days() <= 0 {
        let next = advance_due_date(due, subscription.cycle);
        if next == due {
            break;
        }
        due = next;
    }
    subscription.with_next_due_date(due)
}

/// Batch renewal pass: returns the records whose due date advanced, for
/// the caller to persist through the store in one step.
pub fn process_renewals(subscriptions: &[Subscription], today: NaiveDate) -> Vec<Subscription> {
    let renewed: Vec<Subscription> = subscriptions
        .iter()
        .filter(|s| is_due_for_renewal(s, today))
        .map(|s| apply_renewal(s, today))
        .collect();
    if !renewed.is_empty() {
        debug!("Advanced due dates for {} subscription(s)", renewed.len());
    }
    renewed
}
