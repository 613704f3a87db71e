// --- File: crates/textwave_twilio/src/handlers.rs ---
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

use crate::error::TwilioError;
use crate::service::{TwilioSmsService, TwilioWhatsAppService};

// --- State for Twilio Handlers ---
#[derive(Clone)]
pub struct TwilioState {
    pub gateways: Arc<dyn GatewayRepository>,
    pub messages: Arc<dyn MessageRepository>,
    pub sms: TwilioSmsService,
    pub whatsapp: TwilioWhatsAppService,
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
    pub message_sid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SendWhatsAppRequest {
    #[serde(default)]
    pub gateway_id: Option<String>,
    #[serde(default)]
    pub recipient: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub template_sid: Option<String>,
    #[serde(default)]
    pub template_variables: Option<serde_json::Value>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SendWhatsAppResponse {
    pub success: bool,
    pub message_sid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub details: serde_json::Value,
}

#[derive(Deserialize, Debug, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct CreditsQuery {
    #[serde(default)]
    pub gateway_id: Option<String>,
}

// --- Handlers ---

/// Send an SMS through a Twilio gateway.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/twilio/send-sms",
    request_body = SendSmsRequest,
    responses(
        (status = 200, description = "Message accepted by Twilio", body = SendSmsResponse),
        (status = 400, description = "Dispatch failure, body carries {error}")
    ),
    tag = "Twilio"
))]
pub async fn send_sms_handler(
    State(state): State<Arc<TwilioState>>,
    headers: HeaderMap,
    Json(payload): Json<SendSmsRequest>,
) -> Result<Json<SendSmsResponse>, DispatchError> {
    require_auth(&headers)?;

    let gateway_id =
        present(payload.gateway_id.as_deref()).ok_or(DispatchError::MissingParameters)?;
    let recipient =
        present(payload.recipient.as_deref()).ok_or(DispatchError::MissingParameters)?;
    let message = present(payload.message.as_deref()).ok_or(DispatchError::MissingParameters)?;

    let gateway = resolve_gateway(state.gateways.as_ref(), gateway_id, Provider::Twilio).await?;
    let credentials = typed_credentials(&gateway)?;

    info!("Sending SMS via gateway {} to {}", gateway_id, recipient);
    let receipt = state
        .sms
        .send_message(&credentials, &OutboundMessage::text(recipient, message))
        .await
        .map_err(|e| DispatchError::Provider(format!("Failed to send SMS: {}", e)))?;

    // The provider accepted the message; from here on failures are local only.
    reconcile_sent(state.messages.as_ref(), gateway_id, recipient, Some(message)).await;

    Ok(Json(SendSmsResponse {
        success: true,
        message_sid: receipt.message_id,
        status: receipt.status,
    }))
}

/// Send a WhatsApp message (freeform or templated) through a Twilio gateway.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/whatsapp/send-message",
    request_body = SendWhatsAppRequest,
    responses(
        (status = 200, description = "Message accepted by Twilio", body = SendWhatsAppResponse),
        (status = 400, description = "Dispatch failure, body carries {error}")
    ),
    tag = "WhatsApp"
))]
pub async fn send_whatsapp_handler(
    State(state): State<Arc<TwilioState>>,
    headers: HeaderMap,
    Json(payload): Json<SendWhatsAppRequest>,
) -> Result<Json<SendWhatsAppResponse>, DispatchError> {
    require_auth(&headers)?;

    let gateway_id =
        present(payload.gateway_id.as_deref()).ok_or(DispatchError::MissingParameters)?;
    let recipient =
        present(payload.recipient.as_deref()).ok_or(DispatchError::MissingParameters)?;

    let gateway =
        resolve_gateway(state.gateways.as_ref(), gateway_id, Provider::WhatsappTwilio).await?;
    let credentials = typed_credentials(&gateway)?;

    let outbound = OutboundMessage {
        recipient: recipient.to_string(),
        body: payload.message.clone(),
        template_sid: payload.template_sid.clone(),
        template_variables: payload.template_variables.clone(),
    };

    info!(
        "Sending WhatsApp message via gateway {} to {}",
        gateway_id, recipient
    );
    let receipt = state
        .whatsapp
        .send_message(&credentials, &outbound)
        .await
        .map_err(|e| match e {
            TwilioError::Validation(message) => DispatchError::Validation(message),
            other => DispatchError::Provider(other.to_string()),
        })?;

    // Template sends carry no body, so the ledger match skips the body filter.
    reconcile_sent(state.messages.as_ref(), gateway_id, recipient, None).await;

    Ok(Json(SendWhatsAppResponse {
        success: true,
        message_sid: receipt.message_id,
        status: receipt.status,
        details: receipt.details.unwrap_or(serde_json::Value::Null),
    }))
}

/// Report balance and account details for a Twilio gateway.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/twilio/credits",
    params(CreditsQuery),
    responses(
        (status = 200, description = "Normalized balance with account extras", body = BalanceReport),
        (status = 400, description = "Dispatch failure, body carries {error}")
    ),
    tag = "Twilio"
))]
pub async fn twilio_credits_handler(
    State(state): State<Arc<TwilioState>>,
    headers: HeaderMap,
    Query(query): Query<CreditsQuery>,
) -> Result<Json<BalanceReport>, DispatchError> {
    require_auth(&headers)?;

    let gateway_id =
        present(query.gateway_id.as_deref()).ok_or(DispatchError::MissingGatewayId)?;

    let gateway = resolve_gateway(state.gateways.as_ref(), gateway_id, Provider::Twilio).await?;
    let credentials = typed_credentials(&gateway)?;

    let report = state
        .sms
        .get_balance(&credentials)
        .await
        .map_err(|e| DispatchError::Provider(format!("Failed to fetch Twilio balance: {}", e)))?;

    Ok(Json(report))
}

/// Report balance for a WhatsApp gateway's Twilio account.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/whatsapp/credits",
    params(CreditsQuery),
    responses(
        (status = 200, description = "Normalized balance with account extras", body = BalanceReport),
        (status = 400, description = "Dispatch failure, body carries {error}")
    ),
    tag = "WhatsApp"
))]
pub async fn whatsapp_credits_handler(
    State(state): State<Arc<TwilioState>>,
    headers: HeaderMap,
    Query(query): Query<CreditsQuery>,
) -> Result<Json<BalanceReport>, DispatchError> {
    require_auth(&headers)?;

    let gateway_id =
        present(query.gateway_id.as_deref()).ok_or(DispatchError::MissingGatewayId)?;

    let gateway =
        resolve_gateway(state.gateways.as_ref(), gateway_id, Provider::WhatsappTwilio).await?;
    let credentials = typed_credentials(&gateway)?;

    let report = state
        .whatsapp
        .get_balance(&credentials)
        .await
        .map_err(|e| DispatchError::Provider(format!("Failed to fetch Twilio balance: {}", e)))?;

    Ok(Json(report))
}
