// --- File: crates/textwave_twilio/src/service.rs ---
//! Twilio adapter implementations of the normalized messaging contract.
//!
//! Two adapters share one wire client: plain SMS and WhatsApp. They differ
//! in credential shape and payload encoding, not in transport.

use textwave_common::models::{TwilioSmsCredentials, TwilioWhatsAppCredentials};
use textwave_common::services::{
    BalanceReport, BoxFuture, MessagingProvider, OutboundMessage, SendReceipt,
};

use crate::error::TwilioError;
use crate::logic::{whatsapp_params, TwilioClient};

/// Twilio SMS adapter.
#[derive(Debug, Clone)]
pub struct TwilioSmsService {
    client: TwilioClient,
}

impl TwilioSmsService {
    pub fn new(client: TwilioClient) -> Self {
        Self { client }
    }
}

impl MessagingProvider for TwilioSmsService {
    type Credentials = TwilioSmsCredentials;
    type Error = TwilioError;

    fn send_message(
        &self,
        credentials: &TwilioSmsCredentials,
        message: &OutboundMessage,
    ) -> BoxFuture<'_, SendReceipt, TwilioError> {
        // Clone the values to avoid lifetime issues
        let credentials = credentials.clone();
        let message = message.clone();

        Box::pin(async move {
            let params = vec![
                ("To".to_string(), message.recipient.clone()),
                ("From".to_string(), credentials.sender_number.clone()),
                ("Body".to_string(), message.body.clone().unwrap_or_default()),
            ];

            let response = self
                .client
                .create_message(&credentials.account_sid, &credentials.auth_token, &params)
                .await?;

            Ok(SendReceipt {
                message_id: response.sid,
                status: response.status,
                details: None,
            })
        })
    }

    fn get_balance(
        &self,
        credentials: &TwilioSmsCredentials,
    ) -> BoxFuture<'_, BalanceReport, TwilioError> {
        let credentials = credentials.clone();

        Box::pin(async move {
            self.client
                .fetch_balance(&credentials.account_sid, &credentials.auth_token)
                .await
        })
    }
}

/// Twilio WhatsApp adapter.
#[derive(Debug, Clone)]
pub struct TwilioWhatsAppService {
    client: TwilioClient,
}

impl TwilioWhatsAppService {
    pub fn new(client: TwilioClient) -> Self {
        Self { client }
    }
}

impl MessagingProvider for TwilioWhatsAppService {
    type Credentials = TwilioWhatsAppCredentials;
    type Error = TwilioError;

    fn send_message(
        &self,
        credentials: &TwilioWhatsAppCredentials,
        message: &OutboundMessage,
    ) -> BoxFuture<'_, SendReceipt, TwilioError> {
        let credentials = credentials.clone();
        let message = message.clone();

        Box::pin(async move {
            // Payload validation happens before any request is issued.
            let params = whatsapp_params(&credentials, &message)?;

            let response = self
                .client
                .create_message(&credentials.account_sid, &credentials.auth_token, &params)
                .await?;

            let details = serde_json::to_value(&response)?;
            Ok(SendReceipt {
                message_id: response.sid,
                status: response.status,
                details: Some(details),
            })
        })
    }

    fn get_balance(
        &self,
        credentials: &TwilioWhatsAppCredentials,
    ) -> BoxFuture<'_, BalanceReport, TwilioError> {
        // WhatsApp gateways live on a regular Twilio account, so balance
        // comes from the same account endpoints as SMS.
        let credentials = credentials.clone();

        Box::pin(async move {
            self.client
                .fetch_balance(&credentials.account_sid, &credentials.auth_token)
                .await
        })
    }
}
