// --- File: crates/textwave_billing/src/error.rs ---
use textwave_store::StoreError;
use thiserror::Error;

/// Billing-webhook error types.
#[derive(Error, Debug)]
pub enum BillingError {
    /// Webhook signature verification failed
    #[error("Webhook signature verification failed: {0}")]
    Signature(String),

    /// The event lacks the user/plan metadata the row updates key on
    #[error("Missing metadata")]
    MissingMetadata,

    /// Error parsing the webhook payload
    #[error("Failed to parse webhook payload: {0}")]
    Parse(#[from] serde_json::Error),

    /// A row write failed
    #[error(transparent)]
    Store(#[from] StoreError),
}
