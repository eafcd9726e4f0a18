use crate::fx::CurrencyCode;

/// Reference currency for the fixed rate table and the display default.
pub const BASE_CURRENCY: CurrencyCode = CurrencyCode::Cny;

/// Days ahead that count as "due soon" on the overview card.
pub const UPCOMING_RENEWAL_WINDOW_DAYS: i64 = 7;

/// Snapshot format version written by the app's export boundary.
pub const SNAPSHOT_FORMAT_VERSION: &str = "1";
