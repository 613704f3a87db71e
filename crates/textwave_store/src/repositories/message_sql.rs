//! SQL implementation of the message ledger repository

use crate::error::StoreError;
use crate::repositories::message::MessageRepository;
use crate::DbClient;
use textwave_common::services::BoxFuture;
use tracing::{debug, error};

/// SQL implementation of the message ledger repository
#[derive(Debug, Clone)]
pub struct SqlMessageRepository {
    db_client: DbClient,
}

impl SqlMessageRepository {
    /// Create a new SQL message repository
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }

    /// Create the messages table if it does not exist yet.
    pub async fn init_schema(&self) -> Result<(), StoreError> {
        debug!("Initializing message schema");

        let query = r#"
            CREATE TABLE IF NOT EXISTS messages (
                id TEXT PRIMARY KEY,
                gateway_id TEXT NOT NULL,
                recipient TEXT NOT NULL,
                message TEXT,
                status TEXT NOT NULL DEFAULT 'pending',
                created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                scheduled_for TIMESTAMP,
                sent_at TIMESTAMP
            )
        "#;

        self.db_client.execute(query).await
    }
}

impl MessageRepository for SqlMessageRepository {
    fn mark_sent(
        &self,
        gateway_id: &str,
        recipient: &str,
        body: Option<&str>,
    ) -> BoxFuture<'_, u64, StoreError> {
        let gateway_id = gateway_id.to_string();
        let recipient = recipient.to_string();
        let body = body.map(str::to_string);

        Box::pin(async move {
            let result = match &body {
                Some(body) => {
                    let query = r#"
                        UPDATE messages
                        SET status = 'sent', sent_at = CURRENT_TIMESTAMP
                        WHERE gateway_id = $1 AND recipient = $2 AND message = $3
                          AND status = 'pending'
                    "#;
                    sqlx::query(query)
                        .bind(&gateway_id)
                        .bind(&recipient)
                        .bind(body)
                        .execute(self.db_client.pool())
                        .await
                }
                None => {
                    let query = r#"
                        UPDATE messages
                        SET status = 'sent', sent_at = CURRENT_TIMESTAMP
                        WHERE gateway_id = $1 AND recipient = $2
                          AND status = 'pending'
                    "#;
                    sqlx::query(query)
                        .bind(&gateway_id)
                        .bind(&recipient)
                        .execute(self.db_client.pool())
                        .await
                }
            };

            let result = result.map_err(|e| {
                error!("Failed to update message status: {}", e);
                StoreError::Query(e.to_string())
            })?;

            debug!(
                "Marked {} message(s) as sent for gateway {} -> {}",
                result.rows_affected(),
                gateway_id,
                recipient
            );
            Ok(result.rows_affected())
        })
    }
}
