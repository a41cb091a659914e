// --- File: crates/services/banklink_backend/src/service_factory.rs ---
//! Service factory implementation.
//!
//! Builds the Stripe and Plaid clients once at startup and hands out shared
//! handles to them.
use banklink_common::{ServiceFactory, SharedBankLinkService, SharedBillingService};
use banklink_config::AppConfig;
use banklink_plaid::PlaidLinkService;
use banklink_stripe::StripeBillingService;
use std::sync::Arc;
use tracing::info;

/// Service factory backed by the real providers.
pub struct BanklinkServiceFactory {
    billing_service: SharedBillingService,
    bank_link_service: SharedBankLinkService,
}

impl BanklinkServiceFactory {
    /// Create a new service factory.
    pub fn new(config: &AppConfig) -> Self {
        info!("Initializing Stripe billing service ({})", config.stripe.api_base);
        let billing_service: SharedBillingService =
            Arc::new(StripeBillingService::new(config.stripe.clone()));

        info!(
            "Initializing Plaid link service ({:?}, {})",
            config.plaid.env,
            config.plaid.api_base()
        );
        let bank_link_service: SharedBankLinkService =
            Arc::new(PlaidLinkService::new(config.plaid.clone()));

        Self {
            billing_service,
            bank_link_service,
        }
    }
}

impl ServiceFactory for BanklinkServiceFactory {
    fn billing_service(&self) -> SharedBillingService {
        self.billing_service.clone()
    }

    fn bank_link_service(&self) -> SharedBankLinkService {
        self.bank_link_service.clone()
    }
}
