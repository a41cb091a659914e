// --- File: crates/banklink_plaid/src/lib.rs ---

pub mod error;
pub mod logic;
pub mod service;

pub use error::PlaidError;
pub use service::PlaidLinkService;
