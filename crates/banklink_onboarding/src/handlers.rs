// --- File: crates/banklink_onboarding/src/handlers.rs ---
use crate::logic::{
    complete_subscription, initiate_plaid_link, CompleteSubscriptionRequest,
    CompleteSubscriptionResponse, InitiatePlaidLinkRequest, InitiatePlaidLinkResponse,
    OnboardingError,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Json, Response},
};
use banklink_common::{
    handle_json_result, internal_error, logging::{log_error, log_result}, BanklinkError,
    ServiceFactory, SharedBankLinkService, SharedBillingService,
};
use banklink_config::AppConfig;
use std::future::Future;
use std::sync::Arc;
use tracing::{info_span, Instrument, Span};
use uuid::Uuid;

// --- State for Onboarding Handlers ---
// Provider clients are built once by the service factory and shared.
#[derive(Clone)]
pub struct OnboardingState {
    pub billing: SharedBillingService,
    pub bank_link: SharedBankLinkService,
    /// Recurring price every subscription is created on.
    pub price_id: String,
}

impl OnboardingState {
    pub fn new(config: &AppConfig, factory: &dyn ServiceFactory) -> Self {
        Self {
            billing: factory.billing_service(),
            bank_link: factory.bank_link_service(),
            price_id: config.stripe.price_id.clone(),
        }
    }
}

fn reject_body(rejection: JsonRejection, context: &str) -> Response {
    let err = BanklinkError::from(rejection);
    log_error(&err, context);
    err.into_response()
}

/// Runs a flow on its own task so it finishes even if the caller goes away.
///
/// Dropping the handler future (client disconnect) only drops the wait; the
/// provider calls keep going and the response is discarded.
async fn run_detached<T, F>(span: Span, flow: F) -> Result<T, BanklinkError>
where
    T: Send + 'static,
    F: Future<Output = Result<T, OnboardingError>> + Send + 'static,
{
    match tokio::spawn(flow.instrument(span)).await {
        Ok(result) => result.map_err(BanklinkError::from),
        Err(join_error) => Err(internal_error(format!(
            "onboarding flow did not finish: {}",
            join_error
        ))),
    }
}

/// Axum handler creating the customer and the Plaid link token.
#[axum::debug_handler]
pub async fn initiate_plaid_link_handler(
    State(state): State<Arc<OnboardingState>>,
    payload: Result<Json<InitiatePlaidLinkRequest>, JsonRejection>,
) -> Result<Json<InitiatePlaidLinkResponse>, Response> {
    let span = info_span!("initiate_plaid_link", request_id = %Uuid::new_v4());
    let Json(request) = match payload {
        Ok(body) => body,
        Err(rejection) => {
            return Err(span.in_scope(|| reject_body(rejection, "Rejected initiate-plaid-link body")))
        }
    };

    let result = run_detached(span.clone(), async move {
        initiate_plaid_link(state.billing.as_ref(), state.bank_link.as_ref(), request).await
    })
    .await;

    span.in_scope(|| {
        handle_json_result(log_result(
            result,
            "Plaid link initiated",
            "Error in initiate-plaid-link",
        ))
    })
}

/// Axum handler finishing bank linking and creating the subscription.
#[axum::debug_handler]
pub async fn complete_subscription_handler(
    State(state): State<Arc<OnboardingState>>,
    payload: Result<Json<CompleteSubscriptionRequest>, JsonRejection>,
) -> Result<Json<CompleteSubscriptionResponse>, Response> {
    let span = info_span!("complete_subscription", request_id = %Uuid::new_v4());
    let Json(request) = match payload {
        Ok(body) => body,
        Err(rejection) => {
            return Err(span.in_scope(|| reject_body(rejection, "Rejected complete-subscription body")))
        }
    };

    let result = run_detached(span.clone(), async move {
        complete_subscription(
            state.billing.as_ref(),
            state.bank_link.as_ref(),
            &state.price_id,
            request,
        )
        .await
    })
    .await;

    span.in_scope(|| {
        handle_json_result(log_result(
            result,
            "Subscription completed",
            "Error in complete-subscription",
        ))
    })
}
