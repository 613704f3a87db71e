// --- File: crates/textwave_messagebird/src/handlers.rs ---
use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use textwave_common::services::{BalanceReport, MessagingProvider, OutboundMessage};
use textwave_common::Provider;
use textwave_dispatch::{
    present, reconcile_sent, require_auth, resolve_gateway, typed_credentials, DispatchError,
};
use textwave_store::{GatewayRepository, MessageRepository};
use tracing::info;

use crate::service::MessageBirdService;

// --- State for MessageBird Handlers ---
#[derive(Clone)]
pub struct MessageBirdState {
    pub gateways: Arc<dyn GatewayRepository>,
    pub messages: Arc<dyn MessageRepository>,
    pub service: MessageBirdService,
}

// --- Request / Response Types ---

#[derive(Deserialize, Debug, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SendSmsRequest {
    #[serde(default)]
    pub gateway_id: Option<String>,
    #[serde(default)]
    pub recipient: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SendSmsResponse {
    pub success: bool,
    pub message_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct CreditsQuery {
    #[serde(default)]
    pub gateway_id: Option<String>,
}

// --- Handlers ---

/// Send an SMS through a MessageBird gateway.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/messagebird/send-sms",
    request_body = SendSmsRequest,
    responses(
        (status = 200, description = "Message accepted by MessageBird", body = SendSmsResponse),
        (status = 400, description = "Dispatch failure, body carries {error}")
    ),
    tag = "MessageBird"
))]
pub async fn send_sms_handler(
    State(state): State<Arc<MessageBirdState>>,
    headers: HeaderMap,
    Json(payload): Json<SendSmsRequest>,
) -> Result<Json<SendSmsResponse>, DispatchError> {
    require_auth(&headers)?;

    let gateway_id =
        present(payload.gateway_id.as_deref()).ok_or(DispatchError::MissingParameters)?;
    let recipient =
        present(payload.recipient.as_deref()).ok_or(DispatchError::MissingParameters)?;
    let message = present(payload.message.as_deref()).ok_or(DispatchError::MissingParameters)?;

    let gateway =
        resolve_gateway(state.gateways.as_ref(), gateway_id, Provider::Messagebird).await?;
    let credentials = typed_credentials(&gateway)?;

    info!("Sending SMS via gateway {} to {}", gateway_id, recipient);
    let receipt = state
        .service
        .send_message(&credentials, &OutboundMessage::text(recipient, message))
        .await
        .map_err(|e| DispatchError::Provider(e.to_string()))?;

    // The provider accepted the message; from here on failures are local only.
    reconcile_sent(state.messages.as_ref(), gateway_id, recipient, Some(message)).await;

    Ok(Json(SendSmsResponse {
        success: true,
        message_id: receipt.message_id,
        status: receipt.status,
    }))
}

/// Report balance for a MessageBird gateway.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/messagebird/credits",
    params(CreditsQuery),
    responses(
        (status = 200, description = "Normalized balance", body = BalanceReport),
        (status = 400, description = "Dispatch failure, body carries {error}")
    ),
    tag = "MessageBird"
))]
pub async fn credits_handler(
    State(state): State<Arc<MessageBirdState>>,
    headers: HeaderMap,
    Query(query): Query<CreditsQuery>,
) -> Result<Json<BalanceReport>, DispatchError> {
    require_auth(&headers)?;

    let gateway_id =
        present(query.gateway_id.as_deref()).ok_or(DispatchError::MissingGatewayId)?;

    let gateway =
        resolve_gateway(state.gateways.as_ref(), gateway_id, Provider::Messagebird).await?;
    let credentials = typed_credentials(&gateway)?;

    let report = state
        .service
        .get_balance(&credentials)
        .await
        .map_err(|e| DispatchError::Provider(e.to_string()))?;

    Ok(Json(report))
}
