// --- File: crates/textwave_dispatch/src/error.rs ---
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

/// Failure exits of the dispatch pipeline.
///
/// The `Display` strings are the wire contract: callers receive them
/// verbatim in the `error` field and the UI shows them unchanged, so the
/// wording must not drift. Every variant renders as HTTP 400 regardless of
/// which stage failed; callers distinguish failures by message text only.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// No bearer credential was presented.
    #[error("Missing authorization header")]
    AuthenticationMissing,

    /// A required send parameter is absent or empty.
    #[error("Missing required parameters")]
    MissingParameters,

    /// A balance request arrived without a gateway id.
    #[error("Gateway ID is required")]
    MissingGatewayId,

    /// Lookup failed or no such gateway. Deliberately ambiguous so callers
    /// cannot probe for gateway existence.
    #[error("Gateway not found or access denied")]
    GatewayNotFound,

    /// The resolved gateway belongs to a different provider than this
    /// endpoint implements.
    #[error("Invalid gateway provider")]
    ProviderMismatch,

    /// The stored credentials do not match the provider's required shape.
    #[error("Invalid gateway credentials")]
    CredentialsInvalid,

    /// A provider-specific payload rule was violated before any network call.
    #[error("{0}")]
    Validation(String),

    /// The provider call itself failed (network error or non-2xx response).
    #[error("{0}")]
    Provider(String),
}

impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn every_variant_renders_as_400_with_error_field() {
        let cases = [
            (
                DispatchError::AuthenticationMissing,
                "Missing authorization header",
            ),
            (DispatchError::MissingParameters, "Missing required parameters"),
            (DispatchError::MissingGatewayId, "Gateway ID is required"),
            (
                DispatchError::GatewayNotFound,
                "Gateway not found or access denied",
            ),
            (DispatchError::ProviderMismatch, "Invalid gateway provider"),
            (
                DispatchError::CredentialsInvalid,
                "Invalid gateway credentials",
            ),
            (
                DispatchError::Validation(
                    "Either template_sid or message is required".to_string(),
                ),
                "Either template_sid or message is required",
            ),
            (
                DispatchError::Provider("Failed to send SMS: boom".to_string()),
                "Failed to send SMS: boom",
            ),
        ];

        for (error, expected) in cases {
            let response = error.into_response();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);

            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(body["error"], expected);
        }
    }
}
