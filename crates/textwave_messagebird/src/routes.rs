// --- File: crates/textwave_messagebird/src/routes.rs ---

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use textwave_config::AppConfig;
use textwave_dispatch::preflight;
use textwave_store::{GatewayRepository, MessageRepository};

use crate::handlers::{credits_handler, send_sms_handler, MessageBirdState};
use crate::logic::MessageBirdClient;
use crate::service::MessageBirdService;

/// Creates a router containing all routes for the MessageBird gateway.
///
/// # Arguments
/// * `config` - Shared application configuration (`Arc<AppConfig>`).
/// * `gateways` - Gateway lookup repository.
/// * `messages` - Message ledger repository.
///
/// # Returns
/// An Axum Router configured with the MessageBird routes and state.
pub fn routes(
    config: Arc<AppConfig>,
    gateways: Arc<dyn GatewayRepository>,
    messages: Arc<dyn MessageRepository>,
) -> Router {
    let client = MessageBirdClient::from_config(config.messagebird.as_ref());
    let state = Arc::new(MessageBirdState {
        gateways,
        messages,
        service: MessageBirdService::new(client),
    });

    Router::new()
        .route(
            "/messagebird/send-sms",
            post(send_sms_handler).options(preflight),
        )
        .route(
            "/messagebird/credits",
            get(credits_handler).options(preflight),
        )
        .with_state(state)
}
