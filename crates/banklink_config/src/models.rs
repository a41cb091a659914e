// --- File: crates/banklink_config/src/models.rs ---

use serde::Deserialize;
use std::fmt;

pub const DEFAULT_STRIPE_API_BASE: &str = "https://api.stripe.com";

// --- General Server Config ---
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served at the root path for the frontend assets.
    pub static_dir: String,
}

// --- Stripe Config ---
// Secret key is usually supplied through STRIPE_SECRET_KEY.
#[derive(Deserialize, Clone)]
pub struct StripeConfig {
    pub secret_key: String,
    /// Recurring price every subscription is created against.
    pub price_id: String,
    pub api_base: String,
}

impl fmt::Debug for StripeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StripeConfig")
            .field("secret_key", &"<redacted>")
            .field("price_id", &self.price_id)
            .field("api_base", &self.api_base)
            .finish()
    }
}

/// Plaid deployment the client talks to.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlaidEnvironment {
    #[default]
    Sandbox,
    Development,
    Production,
}

impl PlaidEnvironment {
    pub fn base_url(&self) -> &'static str {
        match self {
            PlaidEnvironment::Sandbox => "https://sandbox.plaid.com",
            PlaidEnvironment::Development => "https://development.plaid.com",
            PlaidEnvironment::Production => "https://production.plaid.com",
        }
    }
}

// --- Plaid Config ---
// Client id and secret are usually supplied through PLAID_CLIENT_ID / PLAID_SECRET.
#[derive(Deserialize, Clone)]
pub struct PlaidConfig {
    pub client_id: String,
    pub secret: String,
    #[serde(default)]
    pub env: PlaidEnvironment,
    /// Name shown to the user inside the Plaid Link widget.
    pub client_name: String,
    /// Overrides the environment's host, used against local mocks.
    #[serde(default)]
    pub base_url: Option<String>,
}

impl PlaidConfig {
    pub fn api_base(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.env.base_url())
    }
}

impl fmt::Debug for PlaidConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaidConfig")
            .field("client_id", &self.client_id)
            .field("secret", &"<redacted>")
            .field("env", &self.env)
            .field("client_name", &self.client_name)
            .field("base_url", &self.base_url)
            .finish()
    }
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub stripe: StripeConfig,
    pub plaid: PlaidConfig,
}

impl AppConfig {
    /// Rejects configurations that cannot possibly talk to either provider.
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        let required = [
            ("stripe.secret_key", &self.stripe.secret_key),
            ("stripe.price_id", &self.stripe.price_id),
            ("stripe.api_base", &self.stripe.api_base),
            ("plaid.client_id", &self.plaid.client_id),
            ("plaid.secret", &self.plaid.secret),
        ];
        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(path, _)| *path)
            .collect();

        if !missing.is_empty() {
            return Err(config::ConfigError::Message(format!(
                "missing required configuration values: {}",
                missing.join(", ")
            )));
        }
        if self.server.port == 0 {
            return Err(config::ConfigError::Message(
                "server.port must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}
