//! SQL implementation of the gateway repository

use crate::error::StoreError;
use crate::models::GatewayRecord;
use crate::repositories::gateway::GatewayRepository;
use crate::DbClient;
use sqlx::Row;
use textwave_common::services::BoxFuture;
use tracing::{debug, error};

/// SQL implementation of the gateway repository
#[derive(Debug, Clone)]
pub struct SqlGatewayRepository {
    db_client: DbClient,
}

impl SqlGatewayRepository {
    /// Create a new SQL gateway repository
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }

    /// Create the gateways table if it does not exist yet.
    pub async fn init_schema(&self) -> Result<(), StoreError> {
        debug!("Initializing gateway schema");

        let query = r#"
            CREATE TABLE IF NOT EXISTS gateways (
                id TEXT PRIMARY KEY,
                name TEXT,
                provider TEXT NOT NULL,
                credentials TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'active',
                created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            )
        "#;

        self.db_client.execute(query).await
    }
}

impl GatewayRepository for SqlGatewayRepository {
    fn find_by_id(&self, id: &str) -> BoxFuture<'_, Option<GatewayRecord>, StoreError> {
        let id = id.to_string();

        Box::pin(async move {
            let query = r#"
                SELECT id, provider, credentials, status
                FROM gateways
                WHERE id = $1
            "#;

            let row = sqlx::query(query)
                .bind(&id)
                .fetch_optional(self.db_client.pool())
                .await
                .map_err(|e| {
                    error!("Failed to fetch gateway {}: {}", id, e);
                    StoreError::Query(e.to_string())
                })?;

            let Some(row) = row else {
                return Ok(None);
            };

            let credentials_raw: String = row
                .try_get("credentials")
                .map_err(|e| StoreError::Query(e.to_string()))?;
            let credentials = serde_json::from_str(&credentials_raw).map_err(|e| {
                error!("Gateway {} holds malformed credentials JSON: {}", id, e);
                StoreError::Data(format!("malformed credentials for gateway {}: {}", id, e))
            })?;

            Ok(Some(GatewayRecord {
                id: row
                    .try_get("id")
                    .map_err(|e| StoreError::Query(e.to_string()))?,
                provider: row
                    .try_get("provider")
                    .map_err(|e| StoreError::Query(e.to_string()))?,
                credentials,
                status: row
                    .try_get("status")
                    .map_err(|e| StoreError::Query(e.to_string()))?,
            }))
        })
    }
}
