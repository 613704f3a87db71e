// --- File: crates/textwave_messagebird/src/logic.rs ---
use reqwest::Client;
use serde::{Deserialize, Serialize};
use textwave_common::services::BalanceReport;
use textwave_common::HTTP_CLIENT;
use textwave_config::MessageBirdConfig;
use tracing::error;

use crate::error::MessageBirdError;

pub const DEFAULT_BASE_URL: &str = "https://rest.messagebird.com";

// --- Data Structures ---

#[derive(Serialize, Debug)]
struct SendMessageBody<'a> {
    originator: &'a str,
    recipients: [&'a str; 1],
    body: &'a str,
}

/// Response from the MessageBird message-creation endpoint. MessageBird does
/// not always report a status at the top level, so it stays optional.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MessageBirdMessageResponse {
    pub id: String,
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Deserialize, Debug)]
struct MessageBirdBalanceResponse {
    pub amount: f64,
    #[serde(rename = "type")]
    pub balance_type: String,
}

// --- Wire Client ---

/// Thin client over the MessageBird REST API.
///
/// The access key is supplied per call because it is resolved per gateway
/// record. The base URL is configurable so tests can point the client at a
/// mock server.
#[derive(Debug, Clone)]
pub struct MessageBirdClient {
    http: Client,
    base_url: String,
}

impl MessageBirdClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Build a client from the optional MessageBird config section.
    pub fn from_config(config: Option<&MessageBirdConfig>) -> Self {
        let base_url = config
            .and_then(|c| c.api_base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::with_base_url(base_url)
    }

    /// Point the client at a custom base URL (useful for tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: HTTP_CLIENT.clone(),
            base_url: base_url.into(),
        }
    }

    /// Send one SMS to one recipient.
    pub async fn send_message(
        &self,
        api_key: &str,
        originator: &str,
        recipient: &str,
        body: &str,
    ) -> Result<MessageBirdMessageResponse, MessageBirdError> {
        let url = format!("{}/messages", self.base_url);

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("AccessKey {}", api_key))
            .json(&SendMessageBody {
                originator,
                recipients: [recipient],
                body,
            })
            .send()
            .await?;

        let status = response.status();
        let payload: serde_json::Value = response.json().await?;

        if !status.is_success() {
            error!("MessageBird API error: {}", payload);
            return Err(api_error(status.as_u16(), &payload, "Failed to send message"));
        }

        Ok(serde_json::from_value(payload)?)
    }

    /// Fetch the account balance, normalized to `{balance, currency}`.
    pub async fn fetch_balance(&self, api_key: &str) -> Result<BalanceReport, MessageBirdError> {
        let url = format!("{}/balance", self.base_url);

        let response = self
            .http
            .get(&url)
            .header("Authorization", format!("AccessKey {}", api_key))
            .send()
            .await?;

        let status = response.status();
        let payload: serde_json::Value = response.json().await?;

        if !status.is_success() {
            error!("MessageBird API error: {}", payload);
            return Err(api_error(
                status.as_u16(),
                &payload,
                "Failed to fetch balance",
            ));
        }

        let balance: MessageBirdBalanceResponse = serde_json::from_value(payload)?;
        Ok(BalanceReport {
            balance: balance.amount,
            currency: balance.balance_type,
            account_type: None,
            account_status: None,
            created_at: None,
        })
    }
}

impl Default for MessageBirdClient {
    fn default() -> Self {
        Self::new()
    }
}

fn api_error(status_code: u16, body: &serde_json::Value, fallback: &str) -> MessageBirdError {
    let message = body
        .get("errors")
        .and_then(|errors| errors.get(0))
        .and_then(|first| first.get("description"))
        .and_then(|description| description.as_str())
        .map(String::from)
        .unwrap_or_else(|| fallback.to_string());
    MessageBirdError::Api {
        status_code,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn api_error_prefers_the_first_error_description() {
        let err = api_error(
            422,
            &json!({"errors": [
                {"code": 9, "description": "no (correct) recipients found", "parameter": "recipient"},
                {"code": 10, "description": "second error", "parameter": "originator"}
            ]}),
            "Failed to send message",
        );
        assert_eq!(err.to_string(), "no (correct) recipients found");
    }

    #[test]
    fn api_error_falls_back_per_operation() {
        let err = api_error(500, &json!({}), "Failed to fetch balance");
        assert_eq!(err.to_string(), "Failed to fetch balance");
    }
}
