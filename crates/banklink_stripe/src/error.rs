// --- File: crates/banklink_stripe/src/error.rs ---
use banklink_common::{config_error, external_service_error, parse_error, BanklinkError};
use thiserror::Error;

/// Stripe-specific error types.
#[derive(Error, Debug)]
pub enum StripeError {
    /// Error occurred during a Stripe API request
    #[error("Stripe API request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Error returned by the Stripe API
    #[error("Stripe API returned an error: {message} (Status: {status_code})")]
    ApiError { status_code: u16, message: String },

    /// Error parsing Stripe API response
    #[error("Failed to parse Stripe API response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Missing or unusable Stripe configuration
    #[error("Stripe configuration missing or incomplete")]
    ConfigError,
}

/// Convert StripeError to BanklinkError
impl From<StripeError> for BanklinkError {
    fn from(err: StripeError) -> Self {
        match err {
            StripeError::RequestError(e) => {
                external_service_error("Stripe", e.status().map(|s| s.as_u16()), e)
            }
            StripeError::ApiError {
                status_code,
                message,
            } => external_service_error("Stripe", Some(status_code), message),
            StripeError::ParseError(e) => parse_error(e),
            StripeError::ConfigError => {
                config_error("Stripe configuration missing or incomplete")
            }
        }
    }
}
