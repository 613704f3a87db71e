//! Repository for subscription and payment rows
//!
//! The billing webhook performs single-row writes only: it creates a
//! subscription and a payment on checkout completion, and applies status
//! changes when the payment processor reports subscription updates.

use crate::error::StoreError;
use crate::models::{NewPayment, NewSubscription, SubscriptionChange};
use textwave_common::services::BoxFuture;

/// Write access to the billing tables.
pub trait BillingRepository: Send + Sync {
    /// Insert a new customer subscription row.
    fn create_subscription(&self, subscription: NewSubscription)
        -> BoxFuture<'_, (), StoreError>;

    /// Insert a payment row.
    fn record_payment(&self, payment: NewPayment) -> BoxFuture<'_, (), StoreError>;

    /// Apply a status change to the subscription matching the change's
    /// user and plan.
    ///
    /// # Returns
    ///
    /// The number of rows that were updated
    fn apply_subscription_change(
        &self,
        change: SubscriptionChange,
    ) -> BoxFuture<'_, u64, StoreError>;
}
