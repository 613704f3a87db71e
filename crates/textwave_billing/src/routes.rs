// --- File: crates/textwave_billing/src/routes.rs ---

use axum::{routing::post, Router};
use std::sync::Arc;
use textwave_config::AppConfig;
use textwave_store::BillingRepository;

use crate::handlers::{billing_webhook_handler, BillingState};

/// Creates a router containing the billing webhook route.
///
/// # Arguments
/// * `config` - Shared application configuration (`Arc<AppConfig>`).
/// * `billing` - Subscription/payment repository.
///
/// # Returns
/// An Axum Router configured with the billing route and state.
pub fn routes(config: Arc<AppConfig>, billing: Arc<dyn BillingRepository>) -> Router {
    let state = Arc::new(BillingState { config, billing });

    Router::new()
        // Server-to-server endpoint; no CORS preflight needed here
        .route("/billing/webhook", post(billing_webhook_handler))
        .with_state(state)
}
