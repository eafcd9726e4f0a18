pub mod subscriptions_errors;
pub mod subscriptions_model;
pub mod subscriptions_repository;
pub mod subscriptions_traits;

pub use subscriptions_errors::SubscriptionError;
pub use subscriptions_model::{BillingCycle, PaymentMethod, SnapshotData, Subscription};
pub use subscriptions_repository::InMemorySubscriptionRepository;
pub use subscriptions_traits::SubscriptionStoreTrait;
