use thiserror::Error;

#[derive(Error, Debug)]
pub enum SubscriptionError {
    #[error("Subscription not found: {0}")]
    NotFound(String),

    #[error("Invalid subscription data: {0}")]
    InvalidData(String),
}
