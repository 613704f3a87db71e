// --- File: crates/textwave_twilio/src/logic.rs ---
use reqwest::Client;
use serde::{Deserialize, Serialize};
use textwave_common::models::TwilioWhatsAppCredentials;
use textwave_common::services::{BalanceReport, OutboundMessage};
use textwave_common::HTTP_CLIENT;
use textwave_config::TwilioConfig;
use tracing::error;

use crate::error::TwilioError;

pub const DEFAULT_BASE_URL: &str = "https://api.twilio.com";

// --- Data Structures ---

/// Response from the Twilio message-creation endpoint. Fields beyond the
/// ones the dispatch layer reads are kept so the WhatsApp endpoint can echo
/// the full provider payload back to the caller.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TwilioMessageResponse {
    pub sid: String,
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Deserialize, Debug)]
struct TwilioBalanceResponse {
    pub balance: String,
    pub currency: String,
}

#[derive(Deserialize, Debug)]
struct TwilioAccountResponse {
    #[serde(rename = "type")]
    pub account_type: Option<String>,
    pub status: Option<String>,
    pub date_created: Option<String>,
}

// --- Wire Client ---

/// Thin client over the Twilio REST API.
///
/// Account credentials are supplied per call because they are resolved per
/// gateway record. The base URL is configurable so tests can point the
/// client at a mock server.
#[derive(Debug, Clone)]
pub struct TwilioClient {
    http: Client,
    base_url: String,
}

impl TwilioClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Build a client from the optional Twilio config section.
    pub fn from_config(config: Option<&TwilioConfig>) -> Self {
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

    /// Issue the form-encoded message-creation call shared by the SMS and
    /// WhatsApp adapters.
    pub async fn create_message(
        &self,
        account_sid: &str,
        auth_token: &str,
        params: &[(String, String)],
    ) -> Result<TwilioMessageResponse, TwilioError> {
        let url = format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.base_url, account_sid
        );

        let response = self
            .http
            .post(&url)
            .basic_auth(account_sid, Some(auth_token))
            .form(params)
            .send()
            .await?;

        let status = response.status();
        let body: serde_json::Value = response.json().await?;

        if !status.is_success() {
            error!("Twilio API error: {}", body);
            return Err(api_error(status.as_u16(), &body));
        }

        Ok(serde_json::from_value(body)?)
    }

    /// Fetch the account balance merged with account details.
    ///
    /// Two sequential GETs; both must succeed. There is no partial balance
    /// reporting, a failure of either call aborts the whole operation.
    pub async fn fetch_balance(
        &self,
        account_sid: &str,
        auth_token: &str,
    ) -> Result<BalanceReport, TwilioError> {
        let balance_url = format!(
            "{}/2010-04-01/Accounts/{}/Balance.json",
            self.base_url, account_sid
        );
        let balance: TwilioBalanceResponse = serde_json::from_value(
            self.get_json(&balance_url, account_sid, auth_token).await?,
        )?;

        let account_url = format!("{}/2010-04-01/Accounts/{}.json", self.base_url, account_sid);
        let account: TwilioAccountResponse = serde_json::from_value(
            self.get_json(&account_url, account_sid, auth_token).await?,
        )?;

        let amount = balance.balance.parse::<f64>().map_err(|_| {
            TwilioError::UnexpectedResponse(format!(
                "balance is not a number: {}",
                balance.balance
            ))
        })?;

        Ok(BalanceReport {
            balance: amount,
            currency: balance.currency,
            account_type: account.account_type,
            account_status: account.status,
            created_at: account.date_created,
        })
    }

    async fn get_json(
        &self,
        url: &str,
        account_sid: &str,
        auth_token: &str,
    ) -> Result<serde_json::Value, TwilioError> {
        let response = self
            .http
            .get(url)
            .basic_auth(account_sid, Some(auth_token))
            .send()
            .await?;

        let status = response.status();
        let body: serde_json::Value = response.json().await?;

        if !status.is_success() {
            error!("Twilio API error: {}", body);
            return Err(api_error(status.as_u16(), &body));
        }

        Ok(body)
    }
}

impl Default for TwilioClient {
    fn default() -> Self {
        Self::new()
    }
}

fn api_error(status_code: u16, body: &serde_json::Value) -> TwilioError {
    let message = body
        .get("message")
        .and_then(|m| m.as_str())
        .map(String::from)
        .unwrap_or_else(|| format!("Twilio API error: {}", status_code));
    TwilioError::Api {
        status_code,
        message,
    }
}

/// Build the form parameters for a WhatsApp send.
///
/// Numbers carry the `whatsapp:` scheme on both sides. Exactly one payload
/// mode must be present: a content template (with optional JSON-encoded
/// variables) or a freeform body. Validation runs before any network call.
pub(crate) fn whatsapp_params(
    credentials: &TwilioWhatsAppCredentials,
    message: &OutboundMessage,
) -> Result<Vec<(String, String)>, TwilioError> {
    let mut params = vec![
        (
            "From".to_string(),
            format!("whatsapp:{}", credentials.whatsapp_number),
        ),
        ("To".to_string(), format!("whatsapp:{}", message.recipient)),
    ];

    let template_sid = message.template_sid.as_deref().filter(|s| !s.is_empty());
    let body = message.body.as_deref().filter(|s| !s.is_empty());

    if let Some(template_sid) = template_sid {
        params.push(("ContentSid".to_string(), template_sid.to_string()));
        if let Some(variables) = &message.template_variables {
            params.push((
                "ContentVariables".to_string(),
                serde_json::to_string(variables)?,
            ));
        }
    } else if let Some(body) = body {
        params.push(("Body".to_string(), body.to_string()));
    } else {
        return Err(TwilioError::Validation(
            "Either template_sid or message is required".to_string(),
        ));
    }

    Ok(params)
}
