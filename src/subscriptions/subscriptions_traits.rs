use super::subscriptions_model::Subscription;
use crate::errors::Result;

/// Trait defining the contract for subscription persistence.
///
/// The calculation services never touch a store; they take plain
/// subscription slices. Applications implement this trait so records
/// move through an explicit seam instead of global state, and renewal
/// results are written back through `update_subscription`.
pub trait SubscriptionStoreTrait: Send + Sync {
    fn get_subscriptions(&self) -> Result<Vec<Subscription>>;
    fn get_subscription(&self, id: &str) -> Result<Subscription>;
    fn add_subscription(&self, subscription: Subscription) -> Result<Subscription>;
    fn update_subscription(&self, subscription: Subscription) -> Result<Subscription>;
    fn remove_subscription(&self, id: &str) -> Result<()>;
    fn replace_subscriptions(&self, subscriptions: Vec<Subscription>) -> Result<()>;
}
