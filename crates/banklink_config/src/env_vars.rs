//! Environment variable naming for the Banklink service.
//!
//! Two naming schemes are understood. The structured one mirrors the
//! configuration tree (`BANKLINK__STRIPE__PRICE_ID`), the legacy one is the
//! flat set of names operators already export (`STRIPE_PRICE_ID`, `PORT`).

/// The prefix for structured configuration environment variables
pub const DEFAULT_PREFIX: &str = "BANKLINK";

/// The separator for structured configuration environment variables
pub const CONFIG_SEPARATOR: &str = "__";

/// Configuration paths that may also be set through a legacy flat name.
pub const LEGACY_PATHS: &[&str] = &[
    "stripe.secret_key",
    "stripe.price_id",
    "plaid.client_id",
    "plaid.secret",
    "plaid.env",
    "server.port",
];

/// Convert a configuration path to its structured environment variable name
///
/// `"stripe.price_id"` becomes `"BANKLINK__STRIPE__PRICE_ID"`.
pub fn config_path_to_env_var(path: &str) -> String {
    let path = path.replace('.', CONFIG_SEPARATOR);
    format!("{}{}{}", DEFAULT_PREFIX, CONFIG_SEPARATOR, path).to_uppercase()
}

/// Convert a configuration path to its legacy flat environment variable name
///
/// `"plaid.client_id"` becomes `"PLAID_CLIENT_ID"`. The listening port keeps
/// its conventional bare `PORT` name.
pub fn legacy_path_to_env_var(path: &str) -> String {
    if path == "server.port" {
        return "PORT".to_string();
    }

    let parts: Vec<&str> = path.split('.').collect();
    if parts.len() < 2 {
        return path.to_uppercase();
    }

    let service = parts[0];
    let key = parts[1..].join("_");
    format!("{}_{}", service, key).to_uppercase()
}

/// Check if a path holds a credential that must never be logged
pub fn is_secret_path(path: &str) -> bool {
    let path_lower = path.to_lowercase();
    path_lower.contains("secret") || path_lower.contains("key") || path_lower.contains("token")
}
