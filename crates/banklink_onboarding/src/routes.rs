// --- File: crates/banklink_onboarding/src/routes.rs ---
use crate::handlers::{complete_subscription_handler, initiate_plaid_link_handler, OnboardingState};
use axum::{routing::post, Router};
use banklink_common::ServiceFactory;
use banklink_config::AppConfig;
use std::sync::Arc;

/// Creates a router containing both onboarding routes.
pub fn routes(config: Arc<AppConfig>, factory: &dyn ServiceFactory) -> Router {
    let onboarding_state = Arc::new(OnboardingState::new(&config, factory));

    Router::new()
        .route("/initiate-plaid-link", post(initiate_plaid_link_handler))
        .route("/complete-subscription", post(complete_subscription_handler))
        .with_state(onboarding_state)
}
