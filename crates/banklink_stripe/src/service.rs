// --- File: crates/banklink_stripe/src/service.rs ---
use banklink_common::{
    BanklinkError, BillingCustomer, BillingService, BoxFuture, PaymentMethodRecord,
    ProcessorToken, SubscriptionRecord,
};
use banklink_config::StripeConfig;

use crate::logic::{
    attach_payment_method, create_bank_account_payment_method, create_customer,
    create_subscription, set_default_payment_method, StripeCustomer, StripePaymentMethod,
    StripeSubscription,
};

/// Stripe billing service implementation
pub struct StripeBillingService {
    config: StripeConfig,
}

impl StripeBillingService {
    /// Create a new Stripe billing service
    pub fn new(config: StripeConfig) -> Self {
        Self { config }
    }
}

impl From<StripeCustomer> for BillingCustomer {
    fn from(customer: StripeCustomer) -> Self {
        BillingCustomer {
            id: customer.id,
            email: customer.email,
            name: customer.name,
        }
    }
}

impl From<StripePaymentMethod> for PaymentMethodRecord {
    fn from(method: StripePaymentMethod) -> Self {
        PaymentMethodRecord {
            id: method.id,
            customer: method.customer,
        }
    }
}

impl From<StripeSubscription> for SubscriptionRecord {
    fn from(subscription: StripeSubscription) -> Self {
        let latest_invoice_status = subscription
            .latest_invoice()
            .and_then(|invoice| invoice.status.clone());
        let first_charge_status = subscription.first_charge_status().map(str::to_string);
        SubscriptionRecord {
            id: subscription.id,
            status: subscription.status,
            latest_invoice_status,
            first_charge_status,
        }
    }
}

impl BillingService for StripeBillingService {
    type Error = BanklinkError;

    fn create_customer(
        &self,
        email: &str,
        name: &str,
    ) -> BoxFuture<'_, BillingCustomer, Self::Error> {
        // Clone the values to avoid lifetime issues
        let email = email.to_string();
        let name = name.to_string();
        Box::pin(async move {
            create_customer(&self.config, &email, &name)
                .await
                .map(BillingCustomer::from)
                .map_err(BanklinkError::from)
        })
    }

    fn create_bank_account_payment_method(
        &self,
        token: &ProcessorToken,
    ) -> BoxFuture<'_, PaymentMethodRecord, Self::Error> {
        let token = token.clone();
        Box::pin(async move {
            create_bank_account_payment_method(&self.config, token.as_str())
                .await
                .map(PaymentMethodRecord::from)
                .map_err(BanklinkError::from)
        })
    }

    fn attach_payment_method(
        &self,
        payment_method_id: &str,
        customer_id: &str,
    ) -> BoxFuture<'_, PaymentMethodRecord, Self::Error> {
        let payment_method_id = payment_method_id.to_string();
        let customer_id = customer_id.to_string();
        Box::pin(async move {
            attach_payment_method(&self.config, &payment_method_id, &customer_id)
                .await
                .map(PaymentMethodRecord::from)
                .map_err(BanklinkError::from)
        })
    }

    fn set_default_payment_method(
        &self,
        customer_id: &str,
        payment_method_id: &str,
    ) -> BoxFuture<'_, BillingCustomer, Self::Error> {
        let customer_id = customer_id.to_string();
        let payment_method_id = payment_method_id.to_string();
        Box::pin(async move {
            set_default_payment_method(&self.config, &customer_id, &payment_method_id)
                .await
                .map(BillingCustomer::from)
                .map_err(BanklinkError::from)
        })
    }

    fn create_subscription(
        &self,
        customer_id: &str,
        price_id: &str,
    ) -> BoxFuture<'_, SubscriptionRecord, Self::Error> {
        let customer_id = customer_id.to_string();
        let price_id = price_id.to_string();
        Box::pin(async move {
            create_subscription(&self.config, &customer_id, &price_id)
                .await
                .map(SubscriptionRecord::from)
                .map_err(BanklinkError::from)
        })
    }
}
