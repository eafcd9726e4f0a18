pub mod billing_service;
pub mod billing_traits;

pub use billing_service::BillingService;
pub use billing_traits::BillingServiceTrait;
