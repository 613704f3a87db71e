// --- File: crates/textwave_twilio/src/doc.rs ---

// Only compile this module if the 'openapi' feature is enabled
#![cfg(feature = "openapi")]

use utoipa::OpenApi;

use crate::handlers::{
    SendSmsRequest, SendSmsResponse, SendWhatsAppRequest, SendWhatsAppResponse,
};
use textwave_common::services::BalanceReport;

// Define the OpenAPI documentation structure for this crate/feature
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::send_sms_handler,
        crate::handlers::twilio_credits_handler,
        crate::handlers::send_whatsapp_handler,
        crate::handlers::whatsapp_credits_handler,
    ),
    components(schemas(
        SendSmsRequest,
        SendSmsResponse,
        SendWhatsAppRequest,
        SendWhatsAppResponse,
        BalanceReport
    )),
    tags(
        (name = "Twilio", description = "Twilio SMS gateway dispatch"),
        (name = "WhatsApp", description = "Twilio WhatsApp gateway dispatch")
    )
)]
pub struct TwilioApiDoc;
