// --- File: crates/banklink_onboarding/src/lib.rs ---

pub mod doc;
pub mod handlers;
pub mod logic;
#[cfg(test)]
mod logic_proptest;
pub mod routes;

// Re-export for main backend
pub use handlers::OnboardingState;
pub use logic::{
    CompleteSubscriptionRequest, CompleteSubscriptionResponse, InitiatePlaidLinkRequest,
    InitiatePlaidLinkResponse, OnboardingError,
};
pub use routes::routes;
