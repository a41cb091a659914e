// --- File: crates/banklink_stripe/src/logic.rs ---
use banklink_config::StripeConfig;
use reqwest::Url;
use serde::{de::DeserializeOwned, Deserialize};
use tracing::{error, info};

use crate::error::StripeError;

// Import the HTTP client from banklink_common
use banklink_common::HTTP_CLIENT;

/// Payment method type used for every bank debit.
pub const BANK_ACCOUNT_METHOD_TYPE: &str = "us_bank_account";

/// Expansion requested on subscription creation so the first charge is visible.
pub const SUBSCRIPTION_EXPAND: &str = "latest_invoice.payment_intent";

// --- Data Structures ---

/// Response FROM Stripe for `/v1/customers`.
#[derive(Deserialize, Debug, Clone)]
pub struct StripeCustomer {
    pub id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub invoice_settings: Option<StripeInvoiceSettings>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct StripeInvoiceSettings {
    pub default_payment_method: Option<String>,
}

/// Response FROM Stripe for `/v1/payment_methods`.
#[derive(Deserialize, Debug, Clone)]
pub struct StripePaymentMethod {
    pub id: String,
    #[serde(rename = "type")]
    pub method_type: Option<String>,
    pub customer: Option<String>,
}

/// A field Stripe returns either as an id or, when expanded, as the object.
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum Expandable<T> {
    Id(String),
    Object(Box<T>),
}

impl<T> Expandable<T> {
    pub fn as_object(&self) -> Option<&T> {
        match self {
            Expandable::Object(object) => Some(object),
            Expandable::Id(_) => None,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct StripePaymentIntent {
    pub id: String,
    pub status: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct StripeInvoice {
    pub id: String,
    pub status: Option<String>,
    pub payment_intent: Option<Expandable<StripePaymentIntent>>,
}

/// Response FROM Stripe for `/v1/subscriptions`.
#[derive(Deserialize, Debug, Clone)]
pub struct StripeSubscription {
    pub id: String,
    pub status: String,
    pub customer: Option<String>,
    pub latest_invoice: Option<Expandable<StripeInvoice>>,
}

impl StripeSubscription {
    pub fn latest_invoice(&self) -> Option<&StripeInvoice> {
        self.latest_invoice.as_ref().and_then(Expandable::as_object)
    }

    /// Status of the payment intent behind the first invoice, when expanded.
    pub fn first_charge_status(&self) -> Option<&str> {
        self.latest_invoice()
            .and_then(|invoice| invoice.payment_intent.as_ref())
            .and_then(Expandable::as_object)
            .and_then(|intent| intent.status.as_deref())
    }
}

// --- Core Logic Functions ---

/// Creates a Stripe customer.
pub async fn create_customer(
    stripe_config: &StripeConfig,
    email: &str,
    name: &str,
) -> Result<StripeCustomer, StripeError> {
    info!("[Stripe Logic] Creating customer");
    let form_body = vec![
        ("email".to_string(), email.to_string()),
        ("name".to_string(), name.to_string()),
    ];
    let customer: StripeCustomer = post_form(stripe_config, &["customers"], &form_body).await?;
    info!("[Stripe Logic] Customer {} created", customer.id);
    Ok(customer)
}

/// Creates a `us_bank_account` payment method from a processor bank-account token.
pub async fn create_bank_account_payment_method(
    stripe_config: &StripeConfig,
    bank_account_token: &str,
) -> Result<StripePaymentMethod, StripeError> {
    info!("[Stripe Logic] Creating {} payment method", BANK_ACCOUNT_METHOD_TYPE);
    let form_body = vec![
        ("type".to_string(), BANK_ACCOUNT_METHOD_TYPE.to_string()),
        (
            "us_bank_account[bank_account_token]".to_string(),
            bank_account_token.to_string(),
        ),
    ];
    let method: StripePaymentMethod =
        post_form(stripe_config, &["payment_methods"], &form_body).await?;
    info!("[Stripe Logic] Payment method {} created", method.id);
    Ok(method)
}

/// Attaches a payment method to a customer.
pub async fn attach_payment_method(
    stripe_config: &StripeConfig,
    payment_method_id: &str,
    customer_id: &str,
) -> Result<StripePaymentMethod, StripeError> {
    info!(
        "[Stripe Logic] Attaching payment method {} to customer {}",
        payment_method_id, customer_id
    );
    let form_body = vec![("customer".to_string(), customer_id.to_string())];
    post_form(
        stripe_config,
        &["payment_methods", payment_method_id, "attach"],
        &form_body,
    )
    .await
}

/// Sets the customer's default payment method for invoices.
pub async fn set_default_payment_method(
    stripe_config: &StripeConfig,
    customer_id: &str,
    payment_method_id: &str,
) -> Result<StripeCustomer, StripeError> {
    info!(
        "[Stripe Logic] Setting default payment method {} on customer {}",
        payment_method_id, customer_id
    );
    let form_body = vec![(
        "invoice_settings[default_payment_method]".to_string(),
        payment_method_id.to_string(),
    )];
    post_form(stripe_config, &["customers", customer_id], &form_body).await
}

/// Creates a subscription billed to bank-account payment methods only.
pub async fn create_subscription(
    stripe_config: &StripeConfig,
    customer_id: &str,
    price_id: &str,
) -> Result<StripeSubscription, StripeError> {
    info!(
        "[Stripe Logic] Creating subscription on price {} for customer {}",
        price_id, customer_id
    );
    let form_body = vec![
        ("customer".to_string(), customer_id.to_string()),
        ("items[0][price]".to_string(), price_id.to_string()),
        (
            "payment_settings[payment_method_types][0]".to_string(),
            BANK_ACCOUNT_METHOD_TYPE.to_string(),
        ),
        ("expand[0]".to_string(), SUBSCRIPTION_EXPAND.to_string()),
    ];
    let subscription: StripeSubscription =
        post_form(stripe_config, &["subscriptions"], &form_body).await?;
    info!(
        "[Stripe Logic] Subscription {} created with status {}. First charge: {:?}",
        subscription.id,
        subscription.status,
        subscription.first_charge_status()
    );
    Ok(subscription)
}

/// Builds `{api_base}/v1/{segments...}`, percent-encoding each segment.
fn api_url(stripe_config: &StripeConfig, segments: &[&str]) -> Result<Url, StripeError> {
    let mut url = Url::parse(&stripe_config.api_base).map_err(|_| StripeError::ConfigError)?;
    url.path_segments_mut()
        .map_err(|_| StripeError::ConfigError)?
        .pop_if_empty()
        .push("v1")
        .extend(segments);
    Ok(url)
}

/// Sends a form-encoded POST to Stripe and decodes the JSON answer.
async fn post_form<T: DeserializeOwned>(
    stripe_config: &StripeConfig,
    segments: &[&str],
    form_body: &[(String, String)],
) -> Result<T, StripeError> {
    let api_url = api_url(stripe_config, segments)?;
    let path = api_url.path().to_string();
    info!("[Stripe Logic] Sending request to Stripe API: {}", path);

    let response = HTTP_CLIENT
        .post(api_url)
        .basic_auth(&stripe_config.secret_key, None::<&str>)
        .form(form_body)
        .send()
        .await?;

    let status = response.status();
    let body_text = response.text().await?;

    info!("[Stripe Logic] Stripe API response status: {}", status);

    if status.is_success() {
        serde_json::from_str(&body_text).map_err(|e| {
            error!("[Stripe Logic] {} returned an unreadable body: {}", path, e);
            StripeError::ParseError(e)
        })
    } else {
        let error_message = api_error_message(&body_text);
        error!(
            "[Stripe Logic] Stripe API request failed with HTTP status: {}. Message: {}",
            status, error_message
        );
        Err(StripeError::ApiError {
            status_code: status.as_u16(),
            message: error_message,
        })
    }
}

/// Extracts `error.message` from a Stripe error body, falling back to the raw body.
pub fn api_error_message(body_text: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body_text) {
        Ok(json_body) => json_body
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
            .unwrap_or(body_text)
            .to_string(),
        Err(_) => body_text.to_string(),
    }
}
