// --- File: crates/textwave_common/src/services.rs ---
//! Service abstractions for external messaging providers.
//!
//! This module defines the normalized contract every provider adapter must
//! implement: sending a message and reporting the account balance. The trait
//! decouples the dispatch handlers from the provider wire protocols and lets
//! tests substitute fakes.

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A normalized outbound message, before provider-specific encoding.
///
/// `body` and `template_sid` are mutually exclusive payload modes for
/// template-capable providers; plain SMS providers only read `body`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboundMessage {
    /// Destination phone number.
    pub recipient: String,
    /// Freeform message body.
    pub body: Option<String>,
    /// Provider content/template identifier.
    pub template_sid: Option<String>,
    /// Substitution variables for a templated send, JSON-encoded on the wire.
    pub template_variables: Option<serde_json::Value>,
}

impl OutboundMessage {
    /// A plain text message to a single recipient.
    pub fn text(recipient: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            body: Some(body.into()),
            template_sid: None,
            template_variables: None,
        }
    }
}

/// The result of a confirmed provider send.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendReceipt {
    /// The provider-assigned message identifier.
    pub message_id: String,
    /// The provider-reported delivery status, when the provider returns one.
    pub status: Option<String>,
    /// The raw provider payload, for endpoints that surface it to callers.
    pub details: Option<serde_json::Value>,
}

/// The normalized balance shape all adapters must produce.
///
/// `balance` and `currency` are mandatory; the remaining fields are
/// provider-specific extras that serialize under their original wire names
/// and disappear when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BalanceReport {
    pub balance: f64,
    pub currency: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none", default)]
    pub account_type: Option<String>,
    #[serde(rename = "status", skip_serializing_if = "Option::is_none", default)]
    pub account_status: Option<String>,
    #[serde(
        rename = "created_at",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub created_at: Option<String>,
}

/// A trait for messaging provider adapters.
///
/// Each adapter translates the normalized send/balance operations into one
/// provider's wire protocol. Credentials are passed per call because they
/// are resolved per gateway record, not per process.
pub trait MessagingProvider: Send + Sync {
    /// The provider-shaped credential set this adapter consumes.
    type Credentials;

    /// Error type returned by provider operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Send a message through the provider.
    fn send_message(
        &self,
        credentials: &Self::Credentials,
        message: &OutboundMessage,
    ) -> BoxFuture<'_, SendReceipt, Self::Error>;

    /// Fetch the account balance in the normalized shape.
    fn get_balance(
        &self,
        credentials: &Self::Credentials,
    ) -> BoxFuture<'_, BalanceReport, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance_report_omits_absent_extras() {
        let report = BalanceReport {
            balance: 12.5,
            currency: "EUR".to_string(),
            account_type: None,
            account_status: None,
            created_at: None,
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value, serde_json::json!({"balance": 12.5, "currency": "EUR"}));
    }

    #[test]
    fn balance_report_extras_use_wire_names() {
        let report = BalanceReport {
            balance: 3.4,
            currency: "USD".to_string(),
            account_type: Some("Trial".to_string()),
            account_status: Some("active".to_string()),
            created_at: Some("2023-01-01".to_string()),
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "balance": 3.4,
                "currency": "USD",
                "type": "Trial",
                "status": "active",
                "created_at": "2023-01-01"
            })
        );
    }
}
