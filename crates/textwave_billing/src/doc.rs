// --- File: crates/textwave_billing/src/doc.rs ---

// Only compile this module if the 'openapi' feature is enabled
#![cfg(feature = "openapi")]

use utoipa::OpenApi;

// Define the OpenAPI documentation structure for this crate/feature
#[derive(OpenApi)]
#[openapi(
    paths(crate::handlers::billing_webhook_handler),
    tags(
        (name = "Billing", description = "Payment processor webhook")
    )
)]
pub struct BillingApiDoc;
