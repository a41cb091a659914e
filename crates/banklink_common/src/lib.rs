// --- File: crates/banklink_common/src/lib.rs ---

// Declare modules within this crate
pub mod error;    // Error handling
pub mod http;     // HTTP utilities
pub mod logging;  // Logging utilities
pub mod routes;   // Route definitions
pub mod services; // Service abstractions

// Re-export the routes function to be used by the main backend service
pub use routes::routes;

// Re-export error types and utilities for easier access
pub use error::{
    config_error,
    external_service_error,
    internal_error,
    parse_error,
    validation_error,
    BanklinkError,
};

// Re-export HTTP utilities for easier access
pub use http::{
    client::{create_client, HTTP_CLIENT},
    handle_json_result,
    ErrorBody,
    IntoHttpResponse,
};

pub use services::{
    AccessCredential, BankLinkService, BillingCustomer, BillingService, BoxFuture, LinkSession,
    PaymentMethodRecord, ProcessorToken, ServiceFactory, SharedBankLinkService,
    SharedBillingService, SubscriptionRecord,
};
