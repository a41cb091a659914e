// --- File: crates/banklink_onboarding/src/doc.rs ---
#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;
use banklink_common::ErrorBody;
use crate::logic::{
    CompleteSubscriptionRequest, CompleteSubscriptionResponse, InitiatePlaidLinkRequest,
    InitiatePlaidLinkResponse,
};

#[utoipa::path(
    post,
    path = "/initiate-plaid-link", // Path relative to /api
    request_body(content = InitiatePlaidLinkRequest, example = json!({
        "email": "jane.doe@example.com",
        "name": "Jane Doe"
    })),
    responses(
        (status = 200, description = "Customer created and link token issued", body = InitiatePlaidLinkResponse),
        (status = 500, description = "Invalid body, Stripe or Plaid error", body = ErrorBody)
    ),
    tag = "Onboarding"
)]
fn doc_initiate_plaid_link_handler() {}

#[utoipa::path(
    post,
    path = "/complete-subscription", // Path relative to /api
    request_body(content = CompleteSubscriptionRequest, example = json!({
        "customerId": "cus_NffrFeUfNV2Hib",
        "publicToken": "public-sandbox-b0e2c4ee",
        "accountId": "vzeNDwK7KQIm4yEog683uElbp9GRLEFXGK98D"
    })),
    responses(
        (status = 200, description = "Bank account attached and subscription created", body = CompleteSubscriptionResponse),
        (status = 500, description = "Invalid body, Stripe or Plaid error", body = ErrorBody)
    ),
    tag = "Onboarding"
)]
fn doc_complete_subscription_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(doc_initiate_plaid_link_handler, doc_complete_subscription_handler),
    components(schemas(
        InitiatePlaidLinkRequest,
        InitiatePlaidLinkResponse,
        CompleteSubscriptionRequest,
        CompleteSubscriptionResponse,
        ErrorBody
    )),
    tags((name = "Onboarding", description = "Plaid bank linking and Stripe bank-debit subscriptions"))
)]
pub struct OnboardingApiDoc;
