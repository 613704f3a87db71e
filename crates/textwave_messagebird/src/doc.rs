// --- File: crates/textwave_messagebird/src/doc.rs ---

// Only compile this module if the 'openapi' feature is enabled
#![cfg(feature = "openapi")]

use utoipa::OpenApi;

use crate::handlers::{SendSmsRequest, SendSmsResponse};
use textwave_common::services::BalanceReport;

// Define the OpenAPI documentation structure for this crate/feature
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::send_sms_handler,
        crate::handlers::credits_handler,
    ),
    components(schemas(SendSmsRequest, SendSmsResponse, BalanceReport)),
    tags(
        (name = "MessageBird", description = "MessageBird SMS gateway dispatch")
    )
)]
pub struct MessageBirdApiDoc;
