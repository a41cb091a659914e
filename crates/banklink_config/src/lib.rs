// --- File: crates/banklink_config/src/lib.rs ---
use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::env;
use tracing::debug;

pub mod env_vars;
pub mod models;

pub use models::*;

use env_vars::{
    config_path_to_env_var, is_secret_path, legacy_path_to_env_var, CONFIG_SEPARATOR,
    DEFAULT_PREFIX, LEGACY_PATHS,
};

/// Loads the configuration from `.env`, the optional config files and the
/// process environment, then validates it.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();
    load_config_from_env(env::vars().collect())
}

/// Builds the configuration from an explicit set of environment variables.
///
/// Layers, lowest priority first: built-in defaults, `config/default`,
/// `config/{RUN_ENV}`, `BANKLINK__SECTION__KEY` variables and finally the
/// legacy flat names (`STRIPE_SECRET_KEY`, `PLAID_ENV`, `PORT`, ...).
pub fn load_config_from_env(vars: HashMap<String, String>) -> Result<AppConfig, ConfigError> {
    let run_env = vars
        .get("RUN_ENV")
        .cloned()
        .unwrap_or_else(|| "debug".to_string());
    let config_dir = vars
        .get("CONFIG_DIR")
        .cloned()
        .unwrap_or_else(|| "config".to_string());

    let mut builder = Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3000)?
        .set_default("server.static_dir", "public")?
        .set_default("stripe.secret_key", "")?
        .set_default("stripe.price_id", "")?
        .set_default("stripe.api_base", DEFAULT_STRIPE_API_BASE)?
        .set_default("plaid.client_id", "")?
        .set_default("plaid.secret", "")?
        .set_default("plaid.env", "sandbox")?
        .set_default("plaid.client_name", "Your App Name")?
        .add_source(File::with_name(&format!("{}/default", config_dir)).required(false))
        .add_source(File::with_name(&format!("{}/{}", config_dir, run_env)).required(false))
        .add_source(
            Environment::with_prefix(DEFAULT_PREFIX)
                .separator(CONFIG_SEPARATOR)
                .source(Some(vars.clone().into_iter().collect())),
        );

    for path in LEGACY_PATHS {
        let env_var = legacy_path_to_env_var(path);
        let value = vars.get(&env_var).filter(|v| !v.is_empty()).cloned();
        if value.is_some() {
            let shadowed = config_path_to_env_var(path);
            if is_secret_path(path) {
                debug!("Config: {} set from {} over {} (redacted)", path, env_var, shadowed);
            } else {
                debug!("Config: {} set from {} over {} = {:?}", path, env_var, shadowed, value);
            }
        }
        builder = builder.set_override_option(*path, value)?;
    }

    let config: AppConfig = builder.build()?.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// The file is `DOTENV_OVERRIDE` when set, otherwise a first command line
/// argument starting with `.env`, otherwise `.env`. A missing file is not an
/// error. Returns the path that was used.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path_override = env::var("DOTENV_OVERRIDE").ok();
    let dotenv_path_arg = env::args().nth(1).filter(|s| s.starts_with(".env"));

    let dotenv_path = dotenv_path_override
        .or(dotenv_path_arg)
        .unwrap_or_else(|| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        let mut map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        // Keep the tests independent of any config/ directory next to the crate.
        map.entry("CONFIG_DIR".to_string())
            .or_insert_with(|| "/nonexistent-banklink-config".to_string());
        map
    }

    fn complete_legacy_vars() -> Vec<(&'static str, &'static str)> {
        vec![
            ("STRIPE_SECRET_KEY", "sk_test_123"),
            ("STRIPE_PRICE_ID", "price_monthly"),
            ("PLAID_CLIENT_ID", "client-abc"),
            ("PLAID_SECRET", "plaid-secret"),
            ("PLAID_ENV", "sandbox"),
        ]
    }

    #[test]
    fn test_legacy_env_vars_populate_config() {
        let mut pairs = complete_legacy_vars();
        pairs.push(("PORT", "8080"));
        let config = load_config_from_env(vars(&pairs)).expect("config should load");

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.stripe.secret_key, "sk_test_123");
        assert_eq!(config.stripe.price_id, "price_monthly");
        assert_eq!(config.plaid.client_id, "client-abc");
        assert_eq!(config.plaid.secret, "plaid-secret");
        assert_eq!(config.plaid.env, PlaidEnvironment::Sandbox);
    }

    #[test]
    fn test_defaults_apply() {
        let config = load_config_from_env(vars(&complete_legacy_vars())).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.static_dir, "public");
        assert_eq!(config.stripe.api_base, DEFAULT_STRIPE_API_BASE);
        assert_eq!(config.plaid.client_name, "Your App Name");
        assert_eq!(config.plaid.api_base(), "https://sandbox.plaid.com");
    }

    #[test]
    fn test_structured_env_vars_are_read() {
        let mut pairs = complete_legacy_vars();
        pairs.push(("BANKLINK__PLAID__CLIENT_NAME", "Acme Savings"));
        pairs.push(("BANKLINK__SERVER__STATIC_DIR", "dist"));
        let config = load_config_from_env(vars(&pairs)).unwrap();

        assert_eq!(config.plaid.client_name, "Acme Savings");
        assert_eq!(config.server.static_dir, "dist");
    }

    #[test]
    fn test_legacy_name_wins_over_structured_name() {
        let mut pairs = complete_legacy_vars();
        pairs.push(("BANKLINK__STRIPE__PRICE_ID", "price_structured"));
        let config = load_config_from_env(vars(&pairs)).unwrap();

        assert_eq!(config.stripe.price_id, "price_monthly");
    }

    #[test]
    fn test_production_environment_selects_host() {
        let mut pairs: Vec<(&str, &str)> = complete_legacy_vars()
            .into_iter()
            .filter(|(k, _)| *k != "PLAID_ENV")
            .collect();
        pairs.push(("PLAID_ENV", "production"));
        let config = load_config_from_env(vars(&pairs)).unwrap();

        assert_eq!(config.plaid.env, PlaidEnvironment::Production);
        assert_eq!(config.plaid.api_base(), "https://production.plaid.com");
    }

    #[test]
    fn test_unknown_plaid_environment_is_rejected() {
        let mut pairs: Vec<(&str, &str)> = complete_legacy_vars()
            .into_iter()
            .filter(|(k, _)| *k != "PLAID_ENV")
            .collect();
        pairs.push(("PLAID_ENV", "staging"));

        assert!(load_config_from_env(vars(&pairs)).is_err());
    }

    #[test]
    fn test_missing_secrets_fail_validation() {
        let pairs: Vec<(&str, &str)> = complete_legacy_vars()
            .into_iter()
            .filter(|(k, _)| *k != "STRIPE_SECRET_KEY" && *k != "PLAID_SECRET")
            .collect();

        let err = load_config_from_env(vars(&pairs)).unwrap_err().to_string();
        assert!(err.contains("stripe.secret_key"), "unexpected error: {}", err);
        assert!(err.contains("plaid.secret"), "unexpected error: {}", err);
    }

    #[test]
    fn test_debug_output_redacts_secrets() {
        let config = load_config_from_env(vars(&complete_legacy_vars())).unwrap();
        let rendered = format!("{:?}", config);

        assert!(!rendered.contains("sk_test_123"));
        assert!(!rendered.contains("plaid-secret"));
        assert!(rendered.contains("price_monthly"));
    }
}
