pub mod summary_model;
pub mod summary_service;

pub use summary_model::SubscriptionSummary;
pub use summary_service::SummaryService;
