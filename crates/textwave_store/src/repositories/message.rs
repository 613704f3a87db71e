//! Repository for the message ledger
//!
//! The dispatch layer owns exactly one transition on `messages` rows:
//! `pending -> sent`, matched by a composite filter. It never inserts rows;
//! callers create them in `pending` state before the provider call.

use crate::error::StoreError;
use textwave_common::services::BoxFuture;

/// Update access to the message ledger.
pub trait MessageRepository: Send + Sync {
    /// Mark matching pending messages as sent and stamp `sent_at`.
    ///
    /// Rows are matched on `(gateway_id, recipient, status = 'pending')`,
    /// plus the message body when one is given. Template sends carry no
    /// body, so their filter omits it.
    ///
    /// # Returns
    ///
    /// The number of rows that were transitioned
    fn mark_sent(
        &self,
        gateway_id: &str,
        recipient: &str,
        body: Option<&str>,
    ) -> BoxFuture<'_, u64, StoreError>;
}
