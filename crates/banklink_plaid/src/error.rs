use banklink_common::{config_error, external_service_error, parse_error, BanklinkError};
use thiserror::Error;

/// Plaid-specific error types.
#[derive(Error, Debug)]
pub enum PlaidError {
    /// Error occurred during a Plaid API request
    #[error("Plaid API request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Error returned by the Plaid API
    #[error("Plaid API returned an error: {message} ({error_code}, Status: {status_code})")]
    ApiError {
        status_code: u16,
        error_type: String,
        error_code: String,
        message: String,
    },

    /// Error parsing Plaid API response
    #[error("Failed to parse Plaid API response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Missing or unusable Plaid configuration
    #[error("Plaid configuration missing or incomplete")]
    ConfigError,
}

/// Convert PlaidError to BanklinkError
impl From<PlaidError> for BanklinkError {
    fn from(err: PlaidError) -> Self {
        match err {
            PlaidError::RequestError(e) => {
                external_service_error("Plaid", e.status().map(|s| s.as_u16()), e)
            }
            PlaidError::ApiError {
                status_code,
                message,
                ..
            } => external_service_error("Plaid", Some(status_code), message),
            PlaidError::ParseError(e) => parse_error(e),
            PlaidError::ConfigError => config_error("Plaid configuration missing or incomplete"),
        }
    }
}
