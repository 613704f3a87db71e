//! SQL implementation of the billing repository

use crate::error::StoreError;
use crate::models::{NewPayment, NewSubscription, SubscriptionChange};
use crate::repositories::billing::BillingRepository;
use crate::DbClient;
use textwave_common::services::BoxFuture;
use tracing::{debug, error};

/// SQL implementation of the billing repository
#[derive(Debug, Clone)]
pub struct SqlBillingRepository {
    db_client: DbClient,
}

impl SqlBillingRepository {
    /// Create a new SQL billing repository
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }

    /// Create the billing tables if they do not exist yet.
    pub async fn init_schema(&self) -> Result<(), StoreError> {
        debug!("Initializing billing schema");

        self.db_client
            .execute(
                r#"
                CREATE TABLE IF NOT EXISTS customer_subscriptions (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    user_id TEXT NOT NULL,
                    subscription_plan_id TEXT NOT NULL,
                    status TEXT NOT NULL,
                    start_date TIMESTAMP,
                    end_date TIMESTAMP,
                    auto_renew BOOLEAN NOT NULL DEFAULT TRUE
                )
            "#,
            )
            .await?;

        self.db_client
            .execute(
                r#"
                CREATE TABLE IF NOT EXISTS payments (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    user_id TEXT NOT NULL,
                    subscription_plan_id TEXT NOT NULL,
                    amount REAL NOT NULL,
                    status TEXT NOT NULL,
                    transaction_id TEXT,
                    payment_date TIMESTAMP
                )
            "#,
            )
            .await
    }
}

impl BillingRepository for SqlBillingRepository {
    fn create_subscription(
        &self,
        subscription: NewSubscription,
    ) -> BoxFuture<'_, (), StoreError> {
        Box::pin(async move {
            let query = r#"
                INSERT INTO customer_subscriptions
                    (user_id, subscription_plan_id, status, start_date, end_date, auto_renew)
                VALUES ($1, $2, $3, $4, $5, $6)
            "#;

            sqlx::query(query)
                .bind(&subscription.user_id)
                .bind(&subscription.subscription_plan_id)
                .bind(&subscription.status)
                .bind(&subscription.start_date)
                .bind(&subscription.end_date)
                .bind(subscription.auto_renew)
                .execute(self.db_client.pool())
                .await
                .map_err(|e| {
                    error!("Failed to insert subscription: {}", e);
                    StoreError::Query(e.to_string())
                })?;

            Ok(())
        })
    }

    fn record_payment(&self, payment: NewPayment) -> BoxFuture<'_, (), StoreError> {
        Box::pin(async move {
            let query = r#"
                INSERT INTO payments
                    (user_id, subscription_plan_id, amount, status, transaction_id, payment_date)
                VALUES ($1, $2, $3, $4, $5, $6)
            "#;

            sqlx::query(query)
                .bind(&payment.user_id)
                .bind(&payment.subscription_plan_id)
                .bind(payment.amount)
                .bind(&payment.status)
                .bind(payment.transaction_id.as_deref())
                .bind(&payment.payment_date)
                .execute(self.db_client.pool())
                .await
                .map_err(|e| {
                    error!("Failed to insert payment: {}", e);
                    StoreError::Query(e.to_string())
                })?;

            Ok(())
        })
    }

    fn apply_subscription_change(
        &self,
        change: SubscriptionChange,
    ) -> BoxFuture<'_, u64, StoreError> {
        Box::pin(async move {
            let query = r#"
                UPDATE customer_subscriptions
                SET status = $1, end_date = $2, auto_renew = $3
                WHERE user_id = $4 AND subscription_plan_id = $5
            "#;

            let result = sqlx::query(query)
                .bind(&change.status)
                .bind(change.end_date.as_deref())
                .bind(change.auto_renew)
                .bind(&change.user_id)
                .bind(&change.subscription_plan_id)
                .execute(self.db_client.pool())
                .await
                .map_err(|e| {
                    error!("Failed to update subscription: {}", e);
                    StoreError::Query(e.to_string())
                })?;

            debug!(
                "Applied subscription change for user {} plan {} ({} row(s))",
                change.user_id,
                change.subscription_plan_id,
                result.rows_affected()
            );
            Ok(result.rows_affected())
        })
    }
}
