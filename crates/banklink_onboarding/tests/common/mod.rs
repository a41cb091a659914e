// Counting stubs of the two provider traits, shared by the integration tests.
#![allow(dead_code)]

use banklink_common::{
    external_service_error, AccessCredential, BankLinkService, BanklinkError, BillingCustomer,
    BillingService, BoxFuture, LinkSession, PaymentMethodRecord, ProcessorToken, ServiceFactory,
    SharedBankLinkService, SharedBillingService, SubscriptionRecord,
};
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing_subscriber::fmt::MakeWriter;

pub const CUSTOMER_ID: &str = "cus_test_1";
pub const LINK_TOKEN: &str = "link-sandbox-test";
pub const ACCESS_TOKEN: &str = "access-sandbox-very-secret";
pub const BANK_ACCOUNT_TOKEN: &str = "btok_test_1";
pub const PAYMENT_METHOD_ID: &str = "pm_test_1";
pub const SUBSCRIPTION_ID: &str = "sub_test_1";

/// Records every provider call in order, fails the named step and holds
/// the slow step for a while before it answers.
#[derive(Default)]
pub struct CallLog {
    calls: Mutex<Vec<String>>,
    fail_at: Option<&'static str>,
    slow_at: Option<(&'static str, Duration)>,
    client_user_id: Mutex<Option<String>>,
    processor_access: Mutex<Option<String>>,
    subscription_price: Mutex<Option<String>>,
}

impl CallLog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing_at(step: &'static str) -> Arc<Self> {
        Arc::new(Self {
            fail_at: Some(step),
            ..Self::default()
        })
    }

    pub fn slow_at(step: &'static str, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            slow_at: Some((step, delay)),
            ..Self::default()
        })
    }

    async fn timed_step(&self, name: &'static str) -> Result<(), BanklinkError> {
        let result = self.step(name);
        if let Some((slow, delay)) = self.slow_at {
            if slow == name {
                tokio::time::sleep(delay).await;
            }
        }
        result
    }

    fn step(&self, name: &'static str) -> Result<(), BanklinkError> {
        self.calls.lock().unwrap().push(name.to_string());
        if self.fail_at == Some(name) {
            let service = if name.contains("token") { "Plaid" } else { "Stripe" };
            return Err(external_service_error(
                service,
                Some(400),
                format!("{} rejected", name),
            ));
        }
        Ok(())
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn client_user_id(&self) -> Option<String> {
        self.client_user_id.lock().unwrap().clone()
    }

    pub fn processor_access(&self) -> Option<String> {
        self.processor_access.lock().unwrap().clone()
    }

    pub fn subscription_price(&self) -> Option<String> {
        self.subscription_price.lock().unwrap().clone()
    }
}

pub struct StubBilling(pub Arc<CallLog>);

impl BillingService for StubBilling {
    type Error = BanklinkError;

    fn create_customer(
        &self,
        email: &str,
        name: &str,
    ) -> BoxFuture<'_, BillingCustomer, Self::Error> {
        let customer = BillingCustomer {
            id: CUSTOMER_ID.to_string(),
            email: Some(email.to_string()),
            name: Some(name.to_string()),
        };
        Box::pin(async move { self.0.step("create_customer").map(|()| customer) })
    }

    fn create_bank_account_payment_method(
        &self,
        token: &ProcessorToken,
    ) -> BoxFuture<'_, PaymentMethodRecord, Self::Error> {
        let valid = token.as_str() == BANK_ACCOUNT_TOKEN;
        Box::pin(async move {
            self.0.step("create_payment_method").and_then(|()| {
                if valid {
                    Ok(PaymentMethodRecord {
                        id: PAYMENT_METHOD_ID.to_string(),
                        customer: None,
                    })
                } else {
                    Err(external_service_error("Stripe", Some(400), "unexpected token"))
                }
            })
        })
    }

    fn attach_payment_method(
        &self,
        payment_method_id: &str,
        customer_id: &str,
    ) -> BoxFuture<'_, PaymentMethodRecord, Self::Error> {
        let record = PaymentMethodRecord {
            id: payment_method_id.to_string(),
            customer: Some(customer_id.to_string()),
        };
        Box::pin(async move { self.0.step("attach_payment_method").map(|()| record) })
    }

    fn set_default_payment_method(
        &self,
        customer_id: &str,
        _payment_method_id: &str,
    ) -> BoxFuture<'_, BillingCustomer, Self::Error> {
        let customer = BillingCustomer {
            id: customer_id.to_string(),
            email: None,
            name: None,
        };
        Box::pin(async move { self.0.step("set_default_payment_method").map(|()| customer) })
    }

    fn create_subscription(
        &self,
        _customer_id: &str,
        price_id: &str,
    ) -> BoxFuture<'_, SubscriptionRecord, Self::Error> {
        *self.0.subscription_price.lock().unwrap() = Some(price_id.to_string());
        Box::pin(async move {
            self.0.step("create_subscription").map(|()| SubscriptionRecord {
                id: SUBSCRIPTION_ID.to_string(),
                status: "incomplete".to_string(),
                latest_invoice_status: Some("open".to_string()),
                first_charge_status: Some("processing".to_string()),
            })
        })
    }
}

pub struct StubBankLink(pub Arc<CallLog>);

impl BankLinkService for StubBankLink {
    type Error = BanklinkError;

    fn create_link_token(&self, client_user_id: &str) -> BoxFuture<'_, LinkSession, Self::Error> {
        *self.0.client_user_id.lock().unwrap() = Some(client_user_id.to_string());
        Box::pin(async move {
            self.0.step("create_link_token").map(|()| LinkSession {
                link_token: LINK_TOKEN.to_string(),
                expiration: None,
                request_id: Some("req_test".to_string()),
            })
        })
    }

    fn exchange_public_token(
        &self,
        _public_token: &str,
    ) -> BoxFuture<'_, AccessCredential, Self::Error> {
        Box::pin(async move {
            self.0
                .timed_step("exchange_public_token")
                .await
                .map(|()| AccessCredential::new(ACCESS_TOKEN))
        })
    }

    fn create_processor_token(
        &self,
        access: &AccessCredential,
        _account_id: &str,
    ) -> BoxFuture<'_, ProcessorToken, Self::Error> {
        *self.0.processor_access.lock().unwrap() = Some(access.expose().to_string());
        Box::pin(async move {
            self.0
                .step("create_processor_token")
                .map(|()| ProcessorToken(BANK_ACCOUNT_TOKEN.to_string()))
        })
    }
}

/// Hands out stubs that share one call log.
pub struct StubFactory {
    pub log: Arc<CallLog>,
}

impl ServiceFactory for StubFactory {
    fn billing_service(&self) -> SharedBillingService {
        Arc::new(StubBilling(self.log.clone()))
    }

    fn bank_link_service(&self) -> SharedBankLinkService {
        Arc::new(StubBankLink(self.log.clone()))
    }
}

pub fn test_config() -> banklink_config::AppConfig {
    use banklink_config::{AppConfig, PlaidConfig, PlaidEnvironment, ServerConfig, StripeConfig};

    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            static_dir: "public".to_string(),
        },
        stripe: StripeConfig {
            secret_key: "sk_test_123".to_string(),
            price_id: "price_monthly".to_string(),
            api_base: "http://127.0.0.1:9".to_string(),
        },
        plaid: PlaidConfig {
            client_id: "client_abc".to_string(),
            secret: "secret_xyz".to_string(),
            env: PlaidEnvironment::Sandbox,
            client_name: "Your App Name".to_string(),
            base_url: None,
        },
    }
}

/// Collects formatted log output for assertions.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
