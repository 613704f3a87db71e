// --- File: crates/textwave_messagebird/src/service.rs ---
//! MessageBird adapter implementation of the normalized messaging contract.

use textwave_common::models::MessageBirdCredentials;
use textwave_common::services::{
    BalanceReport, BoxFuture, MessagingProvider, OutboundMessage, SendReceipt,
};

use crate::error::MessageBirdError;
use crate::logic::MessageBirdClient;

/// MessageBird SMS adapter.
#[derive(Debug, Clone)]
pub struct MessageBirdService {
    client: MessageBirdClient,
}

impl MessageBirdService {
    pub fn new(client: MessageBirdClient) -> Self {
        Self { client }
    }
}

impl MessagingProvider for MessageBirdService {
    type Credentials = MessageBirdCredentials;
    type Error = MessageBirdError;

    fn send_message(
        &self,
        credentials: &MessageBirdCredentials,
        message: &OutboundMessage,
    ) -> BoxFuture<'_, SendReceipt, MessageBirdError> {
        // Clone the values to avoid lifetime issues
        let credentials = credentials.clone();
        let message = message.clone();

        Box::pin(async move {
            let response = self
                .client
                .send_message(
                    &credentials.api_key,
                    &credentials.originator,
                    &message.recipient,
                    message.body.as_deref().unwrap_or_default(),
                )
                .await?;

            Ok(SendReceipt {
                message_id: response.id,
                status: response.status,
                details: None,
            })
        })
    }

    fn get_balance(
        &self,
        credentials: &MessageBirdCredentials,
    ) -> BoxFuture<'_, BalanceReport, MessageBirdError> {
        let credentials = credentials.clone();

        Box::pin(async move { self.client.fetch_balance(&credentials.api_key).await })
    }
}
