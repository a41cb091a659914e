// --- File: crates/banklink_plaid/src/logic.rs ---
use banklink_common::{AccessCredential, HTTP_CLIENT};
use banklink_config::PlaidConfig;
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::error::PlaidError;

/// Products requested for every link session (account and routing numbers).
pub const PRODUCTS: &[&str] = &["auth"];
/// Countries the link widget offers institutions from.
pub const COUNTRY_CODES: &[&str] = &["US"];
/// Language of the link widget.
pub const LANGUAGE: &str = "en";
/// API version pinned on every request.
pub const PLAID_VERSION: &str = "2020-09-14";

// --- Request payloads sent TO Plaid ---

#[derive(Serialize, Debug)]
struct LinkTokenUser<'a> {
    client_user_id: &'a str,
}

#[derive(Serialize, Debug)]
struct LinkTokenCreateRequest<'a> {
    client_name: &'a str,
    user: LinkTokenUser<'a>,
    products: &'a [&'a str],
    country_codes: &'a [&'a str],
    language: &'a str,
}

#[derive(Serialize, Debug)]
struct PublicTokenExchangeRequest<'a> {
    public_token: &'a str,
}

// Not Debug: carries the raw access credential.
#[derive(Serialize)]
struct ProcessorTokenCreateRequest<'a> {
    access_token: &'a str,
    account_id: &'a str,
}

// --- Responses FROM Plaid ---

/// Response FROM Plaid for `/link/token/create`.
#[derive(Deserialize, Debug, Clone)]
pub struct LinkTokenCreateResponse {
    pub link_token: String,
    pub expiration: Option<DateTime<Utc>>,
    pub request_id: Option<String>,
}

/// Response FROM Plaid for `/item/public_token/exchange`.
#[derive(Deserialize, Debug, Clone)]
pub struct PublicTokenExchangeResponse {
    pub access_token: AccessCredential,
    pub item_id: Option<String>,
    pub request_id: Option<String>,
}

/// Response FROM Plaid for `/processor/stripe/bank_account_token/create`.
#[derive(Deserialize, Debug, Clone)]
pub struct StripeBankAccountTokenResponse {
    pub stripe_bank_account_token: String,
    pub request_id: Option<String>,
}

/// Error body returned by Plaid on non-2xx answers.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct PlaidErrorBody {
    #[serde(default)]
    pub error_type: String,
    #[serde(default)]
    pub error_code: String,
    #[serde(default)]
    pub error_message: String,
    pub display_message: Option<String>,
    pub request_id: Option<String>,
}

// --- Core Logic Functions ---

/// Creates a link token for the Plaid Link widget, scoped to one user.
pub async fn create_link_token(
    plaid_config: &PlaidConfig,
    client_user_id: &str,
) -> Result<LinkTokenCreateResponse, PlaidError> {
    info!("[Plaid Logic] Creating link token");
    debug!("[Plaid Logic] Link token client user: {}", client_user_id);
    let request = LinkTokenCreateRequest {
        client_name: &plaid_config.client_name,
        user: LinkTokenUser { client_user_id },
        products: PRODUCTS,
        country_codes: COUNTRY_CODES,
        language: LANGUAGE,
    };
    let response: LinkTokenCreateResponse =
        post_json(plaid_config, "/link/token/create", &request).await?;
    info!(
        "[Plaid Logic] Link token created (request_id: {:?}, expires: {:?})",
        response.request_id, response.expiration
    );
    Ok(response)
}

/// Exchanges a public token from Plaid Link for an access token.
pub async fn exchange_public_token(
    plaid_config: &PlaidConfig,
    public_token: &str,
) -> Result<PublicTokenExchangeResponse, PlaidError> {
    info!("[Plaid Logic] Exchanging public token");
    let request = PublicTokenExchangeRequest { public_token };
    let response: PublicTokenExchangeResponse =
        post_json(plaid_config, "/item/public_token/exchange", &request).await?;
    info!(
        "[Plaid Logic] Public token exchanged for item {:?}",
        response.item_id
    );
    Ok(response)
}

/// Creates a Stripe bank-account token for one account of a linked item.
pub async fn create_stripe_bank_account_token(
    plaid_config: &PlaidConfig,
    access_token: &AccessCredential,
    account_id: &str,
) -> Result<StripeBankAccountTokenResponse, PlaidError> {
    info!(
        "[Plaid Logic] Creating Stripe bank account token for account {}",
        account_id
    );
    let request = ProcessorTokenCreateRequest {
        access_token: access_token.expose(),
        account_id,
    };
    post_json(
        plaid_config,
        "/processor/stripe/bank_account_token/create",
        &request,
    )
    .await
}

/// Sends an authenticated JSON POST to Plaid and decodes the answer.
async fn post_json<B: Serialize, T: DeserializeOwned>(
    plaid_config: &PlaidConfig,
    endpoint: &str,
    body: &B,
) -> Result<T, PlaidError> {
    let base = plaid_config.api_base().trim_end_matches('/');
    if base.is_empty() {
        return Err(PlaidError::ConfigError);
    }
    let api_url = format!("{}{}", base, endpoint);

    let response = HTTP_CLIENT
        .post(&api_url)
        .header("PLAID-CLIENT-ID", &plaid_config.client_id)
        .header("PLAID-SECRET", &plaid_config.secret)
        .header("Plaid-Version", PLAID_VERSION)
        .json(body)
        .send()
        .await?;

    let status = response.status();
    let body_text = response.text().await?;

    info!("[Plaid Logic] {} response status: {}", endpoint, status);

    if status.is_success() {
        serde_json::from_str(&body_text).map_err(|e| {
            error!("[Plaid Logic] {} returned an unreadable body: {}", endpoint, e);
            PlaidError::ParseError(e)
        })
    } else {
        let error_body = parse_error_body(&body_text);
        error!(
            "[Plaid Logic] {} failed with HTTP status: {}. {}: {} (request_id: {:?})",
            endpoint,
            status,
            error_body.error_code,
            error_body.error_message,
            error_body.request_id
        );
        Err(PlaidError::ApiError {
            status_code: status.as_u16(),
            error_type: error_body.error_type,
            error_code: error_body.error_code,
            message: error_body.error_message,
        })
    }
}

/// Parses a Plaid error body, keeping the raw text when it is not one.
pub fn parse_error_body(body_text: &str) -> PlaidErrorBody {
    match serde_json::from_str::<PlaidErrorBody>(body_text) {
        Ok(body) if !body.error_message.is_empty() => body,
        _ => PlaidErrorBody {
            error_message: body_text.to_string(),
            ..PlaidErrorBody::default()
        },
    }
}
