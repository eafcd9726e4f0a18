pub mod currency;
pub mod fx_errors;
pub mod fx_model;
pub mod fx_service;
pub mod fx_traits;

pub use currency::{CurrencyCode, CurrencyMeta};
pub use fx_errors::FxError;
pub use fx_model::{FormatOptions, RateToBase};
pub use fx_service::{decimal_from_f64, FxService};
pub use fx_traits::FxServiceTrait;
