use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::BASE_CURRENCY;
use crate::fx::{decimal_from_f64, CurrencyCode};

/// Recurrence pattern of a subscription's charge.
///
/// `Lifetime` and `Other` never produce a recurring monthly/yearly
/// contribution and never advance a due date. Unknown persisted values
/// degrade to `Other` rather than failing deserialization.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    Monthly,
    Quarterly,
    Yearly,
    Lifetime,
    #[serde(other)]
    Other,
}

impl BillingCycle {
    /// Cycle length in months for the recurring cycles, `None` for the
    /// non-recurring ones.
    pub fn months(&self) -> Option<u32> {
        match self {
            BillingCycle::Monthly => Some(1),
            BillingCycle::Quarterly => Some(3),
            BillingCycle::Yearly => Some(12),
            BillingCycle::Lifetime | BillingCycle::Other => None,
        }
    }

    pub fn is_recurring(&self) -> bool {
        self.months().is_some()
    }
}

/// A subscription record as the external store holds it.
///
/// The core treats records as immutable values per calculation call:
/// renewal produces a new record with the same id, and persisting it is
/// the caller's job. Dates are kept in their persisted ISO form; the
/// `parsed_*` accessors treat unparseable values as absent.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: String,
    pub name: String,
    /// Category/group label; not used by any calculation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: Decimal,
    #[serde(default = "default_currency", deserialize_with = "lenient_currency")]
    pub currency: CurrencyCode,
    pub cycle: BillingCycle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_due_date: Option<String>,
    #[serde(default)]
    pub auto_renew: bool,
}

impl Subscription {
    /// Price clamped to the non-negative range the calculations assume.
    pub fn sanitized_price(&self) -> Decimal {
        self.price.max(Decimal::ZERO)
    }

    pub fn parsed_start_date(&self) -> Option<NaiveDate> {
        parse_iso_date(self.start_date.as_deref())
    }

    pub fn parsed_next_due_date(&self) -> Option<NaiveDate> {
        parse_iso_date(self.next_due_date.as_deref())
    }

    /// Copy of this record with an advanced due date; identity is kept.
    pub fn with_next_due_date(&self, due: NaiveDate) -> Subscription {
        let mut updated = self.clone();
        updated.next_due_date = Some(due.format("%Y-%m-%d").to_string());
        updated
    }
}

fn parse_iso_date(value: Option<&str>) -> Option<NaiveDate> {
    value.and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
}

fn default_currency() -> CurrencyCode {
    BASE_CURRENCY
}

/// Missing or non-finite prices become zero; error reporting for bad
/// records belongs to whoever constructs them, not the calculations.
fn lenient_price<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(raw.map(decimal_from_f64).unwrap_or(Decimal::ZERO))
}

/// Missing or unknown currency codes fall back to the base currency.
fn lenient_currency<'de, D>(deserializer: D) -> Result<CurrencyCode, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .and_then(|s| CurrencyCode::from_str(&s).ok())
        .unwrap_or(BASE_CURRENCY))
}

/// Payment method entry of the app's export format. Carried only so the
/// snapshot shape stays structurally complete; no calculation reads it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    pub id: String,
    pub name: String,
}

/// Shape of the app's bulk import/export JSON. The core does no file
/// I/O; this exists so `subscriptions` stays structurally compatible
/// with the boundary format.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotData {
    pub version: String,
    pub exported_at: String,
    pub currency: CurrencyCode,
    pub subscriptions: Vec<Subscription>,
    #[serde(default)]
    pub payment_methods: Vec<PaymentMethod>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_deserialize_full_record() {
        let json = r#"{
            "id": "sub-1",
            "name": "Music Plus",
            "group": "entertainment",
            "price": 15.8,
            "currency": "USD",
            "cycle": "monthly",
            "startDate": "2024-03-20",
            "nextDueDate": "2024-04-20",
            "autoRenew": true
        }"#;
        let sub: Subscription = serde_json::from_str(json).unwrap();
        assert_eq!(sub.price, dec!(15.8));
        assert_eq!(sub.currency, CurrencyCode::Usd);
        assert_eq!(sub.cycle, BillingCycle::Monthly);
        assert_eq!(
            sub.parsed_start_date(),
            NaiveDate::from_ymd_opt(2024, 3, 20)
        );
        assert!(sub.auto_renew);
    }

    #[test]
    fn test_unknown_currency_falls_back_to_base() {
        let json = r#"{"id":"s","name":"n","price":1.0,"currency":"DOGE","cycle":"monthly"}"#;
        let sub: Subscription = serde_json::from_str(json).unwrap();
        assert_eq!(sub.currency, BASE_CURRENCY);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let json = r#"{"id":"s","name":"n","cycle":"yearly"}"#;
        let sub: Subscription = serde_json::from_str(json).unwrap();
        assert_eq!(sub.price, Decimal::ZERO);
        assert_eq!(sub.currency, BASE_CURRENCY);
        assert!(!sub.auto_renew);
        assert!(sub.parsed_start_date().is_none());
        assert!(sub.parsed_next_due_date().is_none());
    }

    #[test]
    fn test_unknown_cycle_degrades_to_other() {
        let json = r#"{"id":"s","name":"n","cycle":"weekly"}"#;
        let sub: Subscription = serde_json::from_str(json).unwrap();
        assert_eq!(sub.cycle, BillingCycle::Other);
        assert!(!sub.cycle.is_recurring());
    }

    #[test]
    fn test_unparseable_date_treated_as_absent() {
        let json = r#"{"id":"s","name":"n","cycle":"monthly","nextDueDate":"not-a-date"}"#;
        let sub: Subscription = serde_json::from_str(json).unwrap();
        assert!(sub.next_due_date.is_some());
        assert!(sub.parsed_next_due_date().is_none());
    }

    #[test]
    fn test_negative_price_sanitized() {
        let json = r#"{"id":"s","name":"n","price":-5.0,"cycle":"monthly"}"#;
        let sub: Subscription = serde_json::from_str(json).unwrap();
        assert_eq!(sub.sanitized_price(), Decimal::ZERO);
    }

    #[test]
    fn test_with_next_due_date_keeps_identity() {
        let json = r#"{"id":"s","name":"n","cycle":"monthly","nextDueDate":"2024-01-31"}"#;
        let sub: Subscription = serde_json::from_str(json).unwrap();
        let updated = sub.with_next_due_date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(updated.id, sub.id);
        assert_eq!(updated.next_due_date.as_deref(), Some("2024-02-29"));
        // original untouched
        assert_eq!(sub.next_due_date.as_deref(), Some("2024-01-31"));
    }

    #[test]
    fn test_cycle_months() {
        assert_eq!(BillingCycle::Monthly.months(), Some(1));
        assert_eq!(BillingCycle::Quarterly.months(), Some(3));
        assert_eq!(BillingCycle::Yearly.months(), Some(12));
        assert_eq!(BillingCycle::Lifetime.months(), None);
        assert_eq!(BillingCycle::Other.months(), None);
    }

    #[test]
    fn test_snapshot_shape_round_trips() {
        let json = r#"{
            "version": "1",
            "exportedAt": "2025-06-01T10:00:00Z",
            "currency": "CNY",
            "subscriptions": [{"id":"s","name":"n","price":9.9,"cycle":"monthly"}],
            "paymentMethods": [{"id":"pm1","name":"Visa"}]
        }"#;
        let snapshot: SnapshotData = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.subscriptions.len(), 1);
        assert_eq!(snapshot.payment_methods.len(), 1);
        let back = serde_json::to_string(&snapshot).unwrap();
        assert!(back.contains("\"exportedAt\""));
    }
}
