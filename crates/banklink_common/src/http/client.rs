// --- File: crates/banklink_common/src/http/client.rs ---
use once_cell::sync::Lazy;
use reqwest::{Client, Error as ReqwestError};
use std::time::Duration;

/// Upper bound on a single Stripe or Plaid round trip.
pub const PROVIDER_TIMEOUT_SECS: u64 = 30;

/// Connection pool shared by the Stripe and Plaid clients.
pub static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    create_client(PROVIDER_TIMEOUT_SECS).unwrap_or_else(|err| {
        tracing::warn!("Falling back to a default HTTP client: {}", err);
        Client::new()
    })
});

/// Builds a provider client whose requests give up after `timeout_secs`.
pub fn create_client(timeout_secs: u64) -> Result<Client, ReqwestError> {
    Client::builder()
        .user_agent(concat!("banklink/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(timeout_secs))
        .build()
}
