//! Row models for the tables the store reads and writes.

use serde::{Deserialize, Serialize};

/// A gateway record resolved from the `gateways` table.
///
/// `provider` is kept as the raw column value; the dispatch layer compares
/// it against the provider an endpoint expects, so an unknown value surfaces
/// as a provider mismatch rather than a decoding failure. `credentials` is
/// the decoded JSON blob, still untyped; parsing it into a provider shape
/// happens at the dispatch boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayRecord {
    pub id: String,
    pub provider: String,
    pub credentials: serde_json::Value,
    pub status: String,
}

/// A new `customer_subscriptions` row, written on checkout completion.
///
/// Dates are RFC 3339 strings; the Any driver cannot bind chrono values.
#[derive(Debug, Clone)]
pub struct NewSubscription {
    pub user_id: String,
    pub subscription_plan_id: String,
    pub status: String,
    pub start_date: String,
    pub end_date: String,
    pub auto_renew: bool,
}

/// A new `payments` row, written on checkout completion.
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub user_id: String,
    pub subscription_plan_id: String,
    pub amount: f64,
    pub status: String,
    pub transaction_id: Option<String>,
    pub payment_date: String,
}

/// A status transition applied to an existing subscription row.
#[derive(Debug, Clone)]
pub struct SubscriptionChange {
    pub user_id: String,
    pub subscription_plan_id: String,
    pub status: String,
    pub end_date: Option<String>,
    pub auto_renew: bool,
}
