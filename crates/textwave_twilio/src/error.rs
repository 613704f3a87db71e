// --- File: crates/textwave_twilio/src/error.rs ---
use thiserror::Error;

/// Twilio-specific error types.
///
/// `Display` output is surfaced to callers (wrapped or raw depending on the
/// endpoint), so `Api` renders the bare provider detail rather than a
/// decorated message.
#[derive(Error, Debug)]
pub enum TwilioError {
    /// Error occurred while performing the HTTP request
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    /// Non-2xx response from the Twilio API. `message` already carries the
    /// provider's `message` field or the generic fallback.
    #[error("{message}")]
    Api { status_code: u16, message: String },

    /// Error parsing a Twilio API response
    #[error("Failed to parse Twilio response: {0}")]
    Parse(#[from] serde_json::Error),

    /// A payload rule was violated before any request was issued
    #[error("{0}")]
    Validation(String),

    /// The API answered 2xx but the payload is not usable
    #[error("Unexpected Twilio response: {0}")]
    UnexpectedResponse(String),
}
