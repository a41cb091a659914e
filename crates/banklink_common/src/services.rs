// --- File: crates/banklink_common/src/services.rs ---
//! Service abstractions for the two external providers.
//!
//! The onboarding flows only talk to these traits. The backend wires in the
//! Stripe and Plaid implementations; tests wire in stubs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::BanklinkError;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Shared handle to the billing provider as injected into handlers.
pub type SharedBillingService = Arc<dyn BillingService<Error = BanklinkError>>;

/// Shared handle to the bank-linking provider as injected into handlers.
pub type SharedBankLinkService = Arc<dyn BankLinkService<Error = BanklinkError>>;

/// Operations against the payment processor.
pub trait BillingService: Send + Sync {
    /// Error type returned by billing operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Create a billing customer.
    fn create_customer(&self, email: &str, name: &str)
        -> BoxFuture<'_, BillingCustomer, Self::Error>;

    /// Create a bank-account payment method from a processor bank-account token.
    fn create_bank_account_payment_method(
        &self,
        token: &ProcessorToken,
    ) -> BoxFuture<'_, PaymentMethodRecord, Self::Error>;

    /// Attach a payment method to a customer.
    fn attach_payment_method(
        &self,
        payment_method_id: &str,
        customer_id: &str,
    ) -> BoxFuture<'_, PaymentMethodRecord, Self::Error>;

    /// Make a payment method the customer's default for invoices.
    fn set_default_payment_method(
        &self,
        customer_id: &str,
        payment_method_id: &str,
    ) -> BoxFuture<'_, BillingCustomer, Self::Error>;

    /// Create a bank-debit subscription on a price.
    fn create_subscription(
        &self,
        customer_id: &str,
        price_id: &str,
    ) -> BoxFuture<'_, SubscriptionRecord, Self::Error>;
}

/// Operations against the bank-linking provider.
pub trait BankLinkService: Send + Sync {
    /// Error type returned by bank-linking operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Create a link session token for the frontend widget.
    fn create_link_token(&self, client_user_id: &str) -> BoxFuture<'_, LinkSession, Self::Error>;

    /// Exchange a single-use public token for a durable access credential.
    fn exchange_public_token(
        &self,
        public_token: &str,
    ) -> BoxFuture<'_, AccessCredential, Self::Error>;

    /// Mint a bank-account token the payment processor accepts.
    fn create_processor_token(
        &self,
        access: &AccessCredential,
        account_id: &str,
    ) -> BoxFuture<'_, ProcessorToken, Self::Error>;
}

/// Builds the process-wide provider clients.
pub trait ServiceFactory: Send + Sync {
    /// Get the billing service instance.
    fn billing_service(&self) -> SharedBillingService;

    /// Get the bank-linking service instance.
    fn bank_link_service(&self) -> SharedBankLinkService;
}

/// A billing customer as returned by the payment processor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BillingCustomer {
    pub id: String,
    pub email: Option<String>,
    pub name: Option<String>,
}

/// A payment method record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentMethodRecord {
    pub id: String,
    /// Customer the method is attached to, once attached.
    pub customer: Option<String>,
}

/// A created subscription.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubscriptionRecord {
    pub id: String,
    pub status: String,
    pub latest_invoice_status: Option<String>,
    /// Status of the payment intent behind the first invoice.
    pub first_charge_status: Option<String>,
}

/// A link session for the bank-linking widget.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinkSession {
    pub link_token: String,
    pub expiration: Option<DateTime<Utc>>,
    pub request_id: Option<String>,
}

/// Bank-account token minted by the bank-linking provider for the processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessorToken(pub String);

impl ProcessorToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Durable credential for a linked bank item.
///
/// Not `Serialize`, and its `Debug` output is redacted, so it cannot end up
/// in a response body or a log line. It can only be read from a provider.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct AccessCredential(String);

impl AccessCredential {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Raw credential value, only for sending back to the provider.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessCredential(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_credential_debug_is_redacted() {
        let credential = AccessCredential::new("access-sandbox-1234");

        assert_eq!(format!("{:?}", credential), "AccessCredential(<redacted>)");
        assert_eq!(credential.expose(), "access-sandbox-1234");
    }
}
