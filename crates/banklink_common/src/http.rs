// --- File: crates/banklink_common/src/http.rs ---
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::error::{validation_error, BanklinkError};

// Include the client module
pub mod client;

/// Body returned for every failed API call.
#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorBody {
    pub error: String,
}

/// Extension trait for BanklinkError to convert it to an Axum HTTP response.
///
/// Callers get a single failure shape: status 500 and `{ "error": message }`
/// carrying the raw message. The kind of failure and the provider name are
/// only visible in the logs.
pub trait IntoHttpResponse {
    /// Converts the error into an Axum HTTP response.
    fn into_http_response(self) -> Response;
}

impl IntoHttpResponse for BanklinkError {
    fn into_http_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message().to_string(),
        });
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

/// Implement IntoResponse for BanklinkError to make it easier to use in Axum handlers.
impl IntoResponse for BanklinkError {
    fn into_response(self) -> Response {
        self.into_http_response()
    }
}

/// Converts a rejected JSON body into the common error type.
impl From<JsonRejection> for BanklinkError {
    fn from(rejection: JsonRejection) -> Self {
        validation_error(rejection.body_text())
    }
}

/// A utility function to convert a Result<T, BanklinkError> to a Result<Json<T>, Response>.
/// This is useful for Axum handlers that return a JSON response.
pub fn handle_json_result<T>(result: Result<T, BanklinkError>) -> Result<Json<T>, Response>
where
    T: Serialize,
{
    result.map(Json).map_err(|err| err.into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{external_service_error, parse_error};

    async fn error_body(err: BanklinkError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_error_renders_as_server_error_with_raw_provider_message() {
        let (status, body) =
            error_body(external_service_error("Plaid", Some(400), "INVALID_PUBLIC_TOKEN")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "INVALID_PUBLIC_TOKEN");
    }

    #[tokio::test]
    async fn test_parse_error_body_has_no_prefix() {
        let (status, body) = error_body(parse_error("missing field `id`")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "missing field `id`");
    }

    #[tokio::test]
    async fn test_handle_json_result_passes_success_through() {
        let ok: Result<serde_json::Value, BanklinkError> = Ok(serde_json::json!({ "ok": true }));
        match handle_json_result(ok) {
            Ok(Json(value)) => assert_eq!(value["ok"], true),
            Err(_) => panic!("expected a JSON success"),
        }
    }
}
