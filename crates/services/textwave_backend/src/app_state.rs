// --- File: crates/services/textwave_backend/src/app_state.rs ---
use std::sync::Arc;
use textwave_config::AppConfig;
use textwave_store::{
    BillingRepository, DbClient, GatewayRepository, MessageRepository, SqlBillingRepository,
    SqlGatewayRepository, SqlMessageRepository, StoreError,
};

/// Repositories shared across all routers.
///
/// Everything is held as a trait object so the routers stay independent of
/// the SQL implementations; the binary is the only place that knows about
/// the concrete store.
pub struct AppState {
    pub gateways: Arc<dyn GatewayRepository>,
    pub messages: Arc<dyn MessageRepository>,
    pub billing: Arc<dyn BillingRepository>,
}

impl AppState {
    /// Connect to the configured database and make sure every table the
    /// repositories touch exists.
    pub async fn new(config: Arc<AppConfig>) -> Result<Self, StoreError> {
        let db = DbClient::new(&config).await?;

        let gateways = SqlGatewayRepository::new(db.clone());
        gateways.init_schema().await?;

        let messages = SqlMessageRepository::new(db.clone());
        messages.init_schema().await?;

        let billing = SqlBillingRepository::new(db);
        billing.init_schema().await?;

        Ok(Self {
            gateways: Arc::new(gateways),
            messages: Arc::new(messages),
            billing: Arc::new(billing),
        })
    }
}
