// --- File: crates/banklink_stripe/src/lib.rs ---

pub mod error;
pub mod logic;
pub mod service;

pub use error::StripeError; // Re-export the error type
pub use service::StripeBillingService; // Re-export the billing service
