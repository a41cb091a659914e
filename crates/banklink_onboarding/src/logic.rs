// --- File: crates/banklink_onboarding/src/logic.rs ---

use banklink_common::{validation_error, BankLinkService, BanklinkError, BillingService};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Status label returned once a link token has been issued.
pub const LINK_TOKEN_CREATED: &str = "link_token_created";
/// Status label returned once the subscription exists.
pub const SUBSCRIPTION_CREATED: &str = "success";
/// Instruction returned alongside a fresh link token.
pub const LINK_TOKEN_MESSAGE: &str = "Use this link_token to initialize Plaid Link in your frontend";

#[derive(Error, Debug)]
pub enum OnboardingError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    /// An external call failed; the message is the provider's own.
    #[error("{source}")]
    StepFailed {
        step: &'static str,
        source: BanklinkError,
    },
}

impl OnboardingError {
    /// Name of the flow step that failed, if an external call failed.
    pub fn step(&self) -> Option<&'static str> {
        match self {
            OnboardingError::StepFailed { step, .. } => Some(*step),
            OnboardingError::InvalidRequest(_) => None,
        }
    }
}

impl From<OnboardingError> for BanklinkError {
    fn from(err: OnboardingError) -> Self {
        match err {
            OnboardingError::InvalidRequest(msg) => validation_error(msg),
            OnboardingError::StepFailed { source, .. } => source,
        }
    }
}

// --- Request / Response bodies ---

#[derive(Deserialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct InitiatePlaidLinkRequest {
    #[cfg_attr(feature = "openapi", schema(example = "jane.doe@example.com"))]
    pub email: String,
    #[cfg_attr(feature = "openapi", schema(example = "Jane Doe"))]
    pub name: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct InitiatePlaidLinkResponse {
    pub status: String,
    pub link_token: String,
    pub customer_id: String,
    pub message: String,
}

#[derive(Deserialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CompleteSubscriptionRequest {
    #[cfg_attr(feature = "openapi", schema(example = "cus_NffrFeUfNV2Hib"))]
    pub customer_id: String,
    /// Single-use token handed out by Plaid Link on success.
    #[cfg_attr(feature = "openapi", schema(example = "public-sandbox-b0e2c4ee"))]
    pub public_token: String,
    /// Account the user selected inside Plaid Link.
    #[cfg_attr(feature = "openapi", schema(example = "vzeNDwK7KQIm4yEog683uElbp9GRLEFXGK98D"))]
    pub account_id: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CompleteSubscriptionResponse {
    pub status: String,
    pub subscription_id: String,
    pub payment_method_id: String,
    pub customer_id: String,
}

// --- Identifiers ---

/// Keeps only ASCII letters and digits, so `a.b@x.com` becomes `abxcom`.
pub fn sanitize_email(email: &str) -> String {
    email.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}

/// Plaid user id for a customer: `<customerId>-<sanitized email>`.
///
/// Distinct emails that only differ in stripped characters map to the same id.
pub fn client_user_id(customer_id: &str, email: &str) -> String {
    format!("{}-{}", customer_id, sanitize_email(email))
}

fn step_failed(step: &'static str, source: BanklinkError) -> OnboardingError {
    error!(
        "[Onboarding] Step '{}' failed (provider: {}, status: {:?}): {}",
        step,
        source.service_name().unwrap_or("none"),
        source.upstream_status(),
        source.message()
    );
    OnboardingError::StepFailed { step, source }
}

fn require(field: &str, value: &str) -> Result<(), OnboardingError> {
    if value.trim().is_empty() {
        return Err(OnboardingError::InvalidRequest(format!(
            "`{}` must not be empty",
            field
        )));
    }
    Ok(())
}

// --- Flows ---

/// Creates the billing customer and a Plaid link token scoped to it.
///
/// A customer created before a failing link token request is left in place.
pub async fn initiate_plaid_link(
    billing: &dyn BillingService<Error = BanklinkError>,
    bank_link: &dyn BankLinkService<Error = BanklinkError>,
    request: InitiatePlaidLinkRequest,
) -> Result<InitiatePlaidLinkResponse, OnboardingError> {
    require("email", &request.email)?;

    let customer = billing
        .create_customer(&request.email, &request.name)
        .await
        .map_err(|e| step_failed("create_customer", e))?;
    info!("[Onboarding] Created customer {}", customer.id);

    let user_id = client_user_id(&customer.id, &request.email);
    let session = match bank_link.create_link_token(&user_id).await {
        Ok(session) => session,
        Err(e) => {
            warn!(
                "[Onboarding] Customer {} was created but has no link token",
                customer.id
            );
            return Err(step_failed("create_link_token", e));
        }
    };
    info!(
        "[Onboarding] Link token issued for customer {} (expires: {:?})",
        customer.id, session.expiration
    );
    debug!("[Onboarding] Plaid client user id: {}", user_id);

    Ok(InitiatePlaidLinkResponse {
        status: LINK_TOKEN_CREATED.to_string(),
        link_token: session.link_token,
        customer_id: customer.id,
        message: LINK_TOKEN_MESSAGE.to_string(),
    })
}

/// Turns a completed Plaid Link session into a default bank-debit payment
/// method and a subscription on `price_id`.
///
/// Steps run strictly in order and stop at the first failure. Nothing that
/// already happened upstream is undone.
pub async fn complete_subscription(
    billing: &dyn BillingService<Error = BanklinkError>,
    bank_link: &dyn BankLinkService<Error = BanklinkError>,
    price_id: &str,
    request: CompleteSubscriptionRequest,
) -> Result<CompleteSubscriptionResponse, OnboardingError> {
    require("customerId", &request.customer_id)?;
    require("publicToken", &request.public_token)?;
    require("accountId", &request.account_id)?;
    let customer_id = request.customer_id.as_str();

    let access = bank_link
        .exchange_public_token(&request.public_token)
        .await
        .map_err(|e| step_failed("exchange_public_token", e))?;

    let processor_token = bank_link
        .create_processor_token(&access, &request.account_id)
        .await
        .map_err(|e| step_failed("create_processor_token", e))?;

    let payment_method = billing
        .create_bank_account_payment_method(&processor_token)
        .await
        .map_err(|e| step_failed("create_payment_method", e))?;
    info!("[Onboarding] Created payment method {}", payment_method.id);

    if let Err(e) = billing
        .attach_payment_method(&payment_method.id, customer_id)
        .await
    {
        warn!(
            "[Onboarding] Payment method {} was created but not attached to {}",
            payment_method.id, customer_id
        );
        return Err(step_failed("attach_payment_method", e));
    }

    if let Err(e) = billing
        .set_default_payment_method(customer_id, &payment_method.id)
        .await
    {
        warn!(
            "[Onboarding] Payment method {} stays attached to {} without being the default",
            payment_method.id, customer_id
        );
        return Err(step_failed("set_default_payment_method", e));
    }

    let subscription = match billing.create_subscription(customer_id, price_id).await {
        Ok(subscription) => subscription,
        Err(e) => {
            warn!(
                "[Onboarding] Customer {} keeps default payment method {} but has no subscription",
                customer_id, payment_method.id
            );
            return Err(step_failed("create_subscription", e));
        }
    };
    info!(
        "[Onboarding] Subscription {} created for {} (status: {}, first charge: {})",
        subscription.id,
        customer_id,
        subscription.status,
        subscription
            .first_charge_status
            .as_deref()
            .unwrap_or("unknown")
    );

    Ok(CompleteSubscriptionResponse {
        status: SUBSCRIPTION_CREATED.to_string(),
        subscription_id: subscription.id,
        payment_method_id: payment_method.id,
        customer_id: request.customer_id,
    })
}
