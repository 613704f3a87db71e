//! Repository for gateway records
//!
//! The dispatch layer has read-only access to the `gateways` table: it
//! resolves a gateway by id to obtain its provider and stored credentials.

use crate::error::StoreError;
use crate::models::GatewayRecord;
use textwave_common::services::BoxFuture;

/// Read access to configured gateways.
pub trait GatewayRepository: Send + Sync {
    /// Look up a gateway by its id.
    ///
    /// # Returns
    ///
    /// The gateway record if found, or None if no such row exists
    fn find_by_id(&self, id: &str) -> BoxFuture<'_, Option<GatewayRecord>, StoreError>;
}
