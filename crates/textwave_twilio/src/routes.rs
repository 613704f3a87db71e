// --- File: crates/textwave_twilio/src/routes.rs ---

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use textwave_config::AppConfig;
use textwave_dispatch::preflight;
use textwave_store::{GatewayRepository, MessageRepository};

use crate::handlers::{
    send_sms_handler, send_whatsapp_handler, twilio_credits_handler, whatsapp_credits_handler,
    TwilioState,
};
use crate::logic::TwilioClient;
use crate::service::{TwilioSmsService, TwilioWhatsAppService};

/// Creates a router containing all routes for the Twilio SMS and WhatsApp
/// gateways.
///
/// # Arguments
/// * `config` - Shared application configuration (`Arc<AppConfig>`).
/// * `gateways` - Gateway lookup repository.
/// * `messages` - Message ledger repository.
///
/// # Returns
/// An Axum Router configured with the Twilio routes and state.
pub fn routes(
    config: Arc<AppConfig>,
    gateways: Arc<dyn GatewayRepository>,
    messages: Arc<dyn MessageRepository>,
) -> Router {
    let client = TwilioClient::from_config(config.twilio.as_ref());
    let state = Arc::new(TwilioState {
        gateways,
        messages,
        sms: TwilioSmsService::new(client.clone()),
        whatsapp: TwilioWhatsAppService::new(client),
    });

    Router::new()
        .route(
            "/twilio/send-sms",
            post(send_sms_handler).options(preflight),
        )
        .route(
            "/twilio/credits",
            get(twilio_credits_handler).options(preflight),
        )
        .route(
            "/whatsapp/send-message",
            post(send_whatsapp_handler).options(preflight),
        )
        .route(
            "/whatsapp/credits",
            get(whatsapp_credits_handler).options(preflight),
        )
        .with_state(state)
}
