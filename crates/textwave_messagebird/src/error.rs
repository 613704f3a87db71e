// --- File: crates/textwave_messagebird/src/error.rs ---
use thiserror::Error;

/// MessageBird-specific error types.
///
/// `Api` renders the bare provider detail (the first entry of the provider's
/// `errors` array, or the operation's generic fallback) because the dispatch
/// layer surfaces it to callers verbatim.
#[derive(Error, Debug)]
pub enum MessageBirdError {
    /// Error occurred while performing the HTTP request
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    /// Non-2xx response from the MessageBird API
    #[error("{message}")]
    Api { status_code: u16, message: String },

    /// Error parsing a MessageBird API response
    #[error("Failed to parse MessageBird response: {0}")]
    Parse(#[from] serde_json::Error),
}
