use thiserror::Error;

/// Errors from the conversion engine. These indicate configuration or
/// schema problems (an unsupported code, a broken rate table), never
/// malformed user data - that is normalized upstream.
#[derive(Error, Debug)]
pub enum FxError {
    #[error("Exchange rate not found: {0}")]
    RateNotFound(String),

    #[error("Invalid currency code: {0}")]
    InvalidCurrencyCode(String),

    #[error("Invalid exchange rate: {0}")]
    InvalidRate(String),
}
