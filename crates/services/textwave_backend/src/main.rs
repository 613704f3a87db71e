// File: services/textwave_backend/src/main.rs
mod app_state;

use app_state::AppState;
use axum::http::{header, Method};
use axum::{routing::get, Router};
use std::sync::Arc;
use textwave_config::load_config;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

#[cfg(feature = "billing")]
use textwave_billing::routes as billing_routes;
#[cfg(feature = "messagebird")]
use textwave_messagebird::routes as messagebird_routes;
#[cfg(feature = "twilio")]
use textwave_twilio::routes as twilio_routes;

/// Permissive CORS for the dashboard: any origin, the three methods the
/// dispatch endpoints use, and the two headers the UI sends.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

#[tokio::main]
async fn main() {
    let config = Arc::new(load_config().expect("Failed to load config"));
    textwave_common::logging::init();

    let state = AppState::new(config.clone())
        .await
        .expect("Failed to initialise the store");

    let api_router = Router::new().route("/", get(|| async { "Welcome to the Textwave API!" }));

    let api_router = {
        #[allow(unused_mut)] // with no gateway features the router stays as-is
        let mut router = api_router;
        #[cfg(feature = "twilio")]
        {
            if textwave_common::is_twilio_enabled(&config) {
                info!("Twilio gateway routes enabled");
                router = router.merge(twilio_routes::routes(
                    config.clone(),
                    state.gateways.clone(),
                    state.messages.clone(),
                ));
            }
        }
        #[cfg(feature = "messagebird")]
        {
            if textwave_common::is_messagebird_enabled(&config) {
                info!("MessageBird gateway routes enabled");
                router = router.merge(messagebird_routes::routes(
                    config.clone(),
                    state.gateways.clone(),
                    state.messages.clone(),
                ));
            }
        }
        #[cfg(feature = "billing")]
        {
            if textwave_common::is_billing_enabled(&config) {
                info!("Billing webhook route enabled");
                router =
                    router.merge(billing_routes::routes(config.clone(), state.billing.clone()));
            }
        }
        router
    };

    #[allow(unused_mut)] // only the openapi feature mutates the app further
    let mut app = Router::new()
        .nest("/api", api_router)
        .layer(cors_layer());

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        #[cfg(feature = "billing")]
        use textwave_billing::doc::BillingApiDoc;
        #[cfg(feature = "messagebird")]
        use textwave_messagebird::doc::MessageBirdApiDoc;
        #[cfg(feature = "twilio")]
        use textwave_twilio::doc::TwilioApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        // Define the merged OpenAPI documentation struct
        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Textwave API",
                version = "0.1.0",
                description = "Textwave messaging gateway API docs",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            components(),
            tags( (name = "Textwave", description = "Gateway dispatch endpoints")),
            servers( (url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        #[allow(unused_mut)] // for the features it needs to be mutable
        let mut openapi_doc = ApiDoc::openapi();
        #[cfg(feature = "twilio")]
        openapi_doc.merge(TwilioApiDoc::openapi());
        #[cfg(feature = "messagebird")]
        openapi_doc.merge(MessageBirdApiDoc::openapi());
        #[cfg(feature = "billing")]
        openapi_doc.merge(BillingApiDoc::openapi());
        info!("Adding Swagger UI at /api/docs");

        let swagger_ui =
            SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc.clone());
        app = app.merge(swagger_ui);
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await.unwrap();
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .unwrap();
}
