// --- File: crates/textwave_common/src/models.rs ---

// Data structures shared between the store, the dispatch layer, and the
// provider crates: the gateway provider discriminant and the per-provider
// credential shapes stored in the gateways table.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The external messaging provider a gateway is bound to.
///
/// The string forms are the values stored in the `provider` column of the
/// gateways table and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    Twilio,
    WhatsappTwilio,
    Messagebird,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Twilio => "twilio",
            Provider::WhatsappTwilio => "whatsapp_twilio",
            Provider::Messagebird => "messagebird",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A provider-shaped credential set parsed out of a gateway record.
///
/// Deserialization catches missing fields; `is_complete` catches fields that
/// are present but empty. Both cases are treated as invalid credentials by
/// the dispatch layer, before any network call.
pub trait CredentialSet {
    /// Returns true when every required field is non-empty.
    fn is_complete(&self) -> bool;
}

/// Credentials for a `twilio` SMS gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwilioSmsCredentials {
    pub account_sid: String,
    pub auth_token: String,
    pub sender_number: String,
}

impl CredentialSet for TwilioSmsCredentials {
    fn is_complete(&self) -> bool {
        !self.account_sid.is_empty()
            && !self.auth_token.is_empty()
            && !self.sender_number.is_empty()
    }
}

/// Credentials for a `whatsapp_twilio` gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwilioWhatsAppCredentials {
    pub account_sid: String,
    pub auth_token: String,
    pub whatsapp_number: String,
}

impl CredentialSet for TwilioWhatsAppCredentials {
    fn is_complete(&self) -> bool {
        !self.account_sid.is_empty()
            && !self.auth_token.is_empty()
            && !self.whatsapp_number.is_empty()
    }
}

/// Credentials for a `messagebird` gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageBirdCredentials {
    pub api_key: String,
    pub originator: String,
}

impl CredentialSet for MessageBirdCredentials {
    fn is_complete(&self) -> bool {
        !self.api_key.is_empty() && !self.originator.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn provider_serializes_to_column_values() {
        assert_eq!(Provider::Twilio.as_str(), "twilio");
        assert_eq!(Provider::WhatsappTwilio.as_str(), "whatsapp_twilio");
        assert_eq!(Provider::Messagebird.as_str(), "messagebird");
        let parsed: Provider = serde_json::from_value(json!("whatsapp_twilio")).unwrap();
        assert_eq!(parsed, Provider::WhatsappTwilio);
    }

    #[test]
    fn twilio_credentials_require_all_fields() {
        let complete: TwilioSmsCredentials = serde_json::from_value(json!({
            "account_sid": "AC123",
            "auth_token": "secret",
            "sender_number": "+15550001111"
        }))
        .unwrap();
        assert!(complete.is_complete());

        let missing = serde_json::from_value::<TwilioSmsCredentials>(json!({
            "account_sid": "AC123",
            "auth_token": "secret"
        }));
        assert!(missing.is_err());

        let empty: TwilioSmsCredentials = serde_json::from_value(json!({
            "account_sid": "AC123",
            "auth_token": "",
            "sender_number": "+15550001111"
        }))
        .unwrap();
        assert!(!empty.is_complete());
    }

    #[test]
    fn whatsapp_credentials_reject_sms_shape() {
        // An SMS-shaped blob has no whatsapp_number and must not parse.
        let result = serde_json::from_value::<TwilioWhatsAppCredentials>(json!({
            "account_sid": "AC123",
            "auth_token": "secret",
            "sender_number": "+15550001111"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn messagebird_credentials_parse() {
        let creds: MessageBirdCredentials = serde_json::from_value(json!({
            "api_key": "live_key",
            "originator": "Textwave"
        }))
        .unwrap();
        assert!(creds.is_complete());
    }
}
