pub mod renewal_service;

pub use renewal_service::{
    advance_due_date, apply_renewal, days_until, is_due_for_renewal, process_renewals,
};
