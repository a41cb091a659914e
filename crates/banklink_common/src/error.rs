// --- File: crates/banklink_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type shared by every Banklink crate.
///
/// Provider crates convert their own error types into this one at the service
/// boundary, so the onboarding flows only ever deal with `BanklinkError`.
/// `Display` is meant for logs; callers only ever see [`BanklinkError::message`].
#[derive(Error, Debug)]
pub enum BanklinkError {
    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The incoming request could not be understood
    #[error("Invalid request: {0}")]
    ValidationError(String),

    /// Request processing stopped before producing a result
    #[error("Internal error: {0}")]
    InternalError(String),

    /// An upstream provider rejected the call
    #[error("{service_name}: {message}")]
    ExternalServiceError {
        service_name: String,
        /// HTTP status returned by the provider, when there was one.
        status: Option<u16>,
        message: String,
    },
}

impl BanklinkError {
    /// The raw message, without the kind or provider prefix used in logs.
    pub fn message(&self) -> &str {
        match self {
            BanklinkError::ParseError(message)
            | BanklinkError::ConfigError(message)
            | BanklinkError::ValidationError(message)
            | BanklinkError::InternalError(message) => message,
            BanklinkError::ExternalServiceError { message, .. } => message,
        }
    }

    /// Name of the upstream provider involved, if any.
    pub fn service_name(&self) -> Option<&str> {
        match self {
            BanklinkError::ExternalServiceError { service_name, .. } => Some(service_name),
            _ => None,
        }
    }

    /// Status code the upstream provider answered with, if any.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            BanklinkError::ExternalServiceError { status, .. } => *status,
            _ => None,
        }
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> BanklinkError {
    BanklinkError::ConfigError(message.to_string())
}

pub fn parse_error<T: fmt::Display>(message: T) -> BanklinkError {
    BanklinkError::ParseError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> BanklinkError {
    BanklinkError::ValidationError(message.to_string())
}

pub fn internal_error<T: fmt::Display>(message: T) -> BanklinkError {
    BanklinkError::InternalError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(
    service_name: &str,
    status: Option<u16>,
    message: T,
) -> BanklinkError {
    BanklinkError::ExternalServiceError {
        service_name: service_name.to_string(),
        status,
        message: message.to_string(),
    }
}
