// --- File: crates/textwave_billing/src/handlers.rs ---
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use std::sync::Arc;
use textwave_config::AppConfig;
use textwave_store::BillingRepository;
use tracing::{error, info};

use crate::logic::{process_event, verify_signature, BillingEvent};

// --- State for Billing Handlers ---
#[derive(Clone)]
pub struct BillingState {
    pub config: Arc<AppConfig>,
    pub billing: Arc<dyn BillingRepository>,
}

/// Webhook endpoint for the payment processor.
///
/// The raw body is needed for signature verification, so the payload is
/// deserialized only after the signature checks out.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/billing/webhook",
    responses(
        (status = 200, description = "Event received and acknowledged"),
        (status = 400, description = "Missing/invalid signature or processing failure"),
        (status = 500, description = "Webhook secret not configured")
    ),
    tag = "Billing"
))]
pub async fn billing_webhook_handler(
    State(state): State<Arc<BillingState>>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let signature = headers
        .get("stripe-signature")
        .and_then(|h| h.to_str().ok());
    if signature.is_none() {
        return (StatusCode::BAD_REQUEST, "No signature").into_response();
    }

    // Signing secret from config, falling back to the conventional env var.
    let secret = state
        .config
        .billing
        .as_ref()
        .and_then(|b| b.webhook_secret.clone())
        .or_else(|| std::env::var("STRIPE_WEBHOOK_SECRET").ok());
    let Some(secret) = secret else {
        error!("Billing webhook secret not configured");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };

    if let Err(e) = verify_signature(body.as_bytes(), signature, &secret) {
        error!("Billing webhook signature verification failed: {}", e);
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response();
    }

    let event: BillingEvent = match serde_json::from_str(&body) {
        Ok(event) => event,
        Err(e) => {
            error!("Failed to deserialize billing event: {}", e);
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Invalid payload format" })),
            )
                .into_response();
        }
    };

    match process_event(event, state.billing.as_ref()).await {
        Ok(()) => {
            info!("Billing webhook processed successfully");
            (StatusCode::OK, Json(json!({ "received": true }))).into_response()
        }
        Err(e) => {
            error!("Error processing billing webhook: {}", e);
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}
