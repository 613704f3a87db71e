// --- File: crates/textwave_billing/src/logic.rs ---
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::collections::HashMap;
use textwave_store::{BillingRepository, NewPayment, NewSubscription, SubscriptionChange};
use tracing::{debug, info};

use crate::error::BillingError;

/// Maximum accepted age of a signed payload.
const TOLERANCE_SECONDS: i64 = 300;

// --- Event Structures ---

/// Represents the `data` field within a payment processor event.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct BillingEventData {
    /// The object related to the event. Its structure varies by event type,
    /// so it stays a raw value until the type is known.
    pub object: serde_json::Value,
}

/// The outer event envelope delivered to the webhook.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct BillingEvent {
    pub id: String,
    pub created: Option<i64>,
    pub livemode: Option<bool>,
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: BillingEventData,
}

/// The `data.object` of a `checkout.session.completed` event.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct CheckoutSessionObject {
    pub id: String,
    pub amount_total: Option<i64>,
    pub currency: Option<String>,
    pub payment_intent: Option<String>,
    pub metadata: Option<HashMap<String, String>>,
}

/// The `data.object` of a `customer.subscription.*` event.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SubscriptionObject {
    pub id: String,
    pub status: Option<String>,
    pub current_period_end: Option<i64>,
    pub metadata: Option<HashMap<String, String>>,
}

// --- Signature Verification ---

/// Verifies the signature of an incoming webhook request.
///
/// The signature header carries a timestamp `t` and one or more `v1`
/// HMAC-SHA256 signatures over `"{t}.{payload}"`. Verification must pass
/// before the payload is parsed; unsigned or stale requests are rejected.
pub fn verify_signature(
    payload_bytes: &[u8],
    sig_header: Option<&str>,
    secret: &str,
) -> Result<(), BillingError> {
    let sig_header_value = sig_header
        .ok_or_else(|| BillingError::Signature("Missing signature header".to_string()))?;

    let mut timestamp_str: Option<&str> = None;
    let mut v1_signatures_hex: Vec<&str> = Vec::new();

    for item in sig_header_value.split(',') {
        let parts: Vec<&str> = item.trim().splitn(2, '=').collect();
        if parts.len() == 2 {
            match parts[0] {
                "t" => timestamp_str = Some(parts[1]),
                "v1" => v1_signatures_hex.push(parts[1]),
                _ => {} // Ignore other schemes like v0
            }
        }
    }

    let timestamp_str = timestamp_str
        .ok_or_else(|| BillingError::Signature("Missing timestamp 't' in signature".to_string()))?;
    let parsed_timestamp = timestamp_str
        .parse::<i64>()
        .map_err(|_| BillingError::Signature("Invalid timestamp format in signature".to_string()))?;

    if v1_signatures_hex.is_empty() {
        return Err(BillingError::Signature(
            "Missing v1 signature".to_string(),
        ));
    }

    let current_timestamp = Utc::now().timestamp();
    if (current_timestamp - parsed_timestamp).abs() > TOLERANCE_SECONDS {
        return Err(BillingError::Signature(
            "Timestamp outside tolerance".to_string(),
        ));
    }

    let signed_payload = format!("{}.{}", timestamp_str, String::from_utf8_lossy(payload_bytes));

    type HmacSha256 = Hmac<Sha256>;
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| BillingError::Signature("Invalid webhook secret format".to_string()))?;
    mac.update(signed_payload.as_bytes());
    let calculated_signature_hex = hex::encode(mac.finalize().into_bytes());

    for provided_sig_hex in v1_signatures_hex {
        if constant_time_eq(
            calculated_signature_hex.as_bytes(),
            provided_sig_hex.as_bytes(),
        ) {
            return Ok(());
        }
    }

    Err(BillingError::Signature("Signature mismatch".to_string()))
}

/// Helper for constant-time string comparison.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result = 0;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

// --- Event Processing ---

/// Processes a verified webhook event.
///
/// Three event kinds carry row updates; everything else is acknowledged
/// without action. Each update keys on the `userId`/`planId` metadata the
/// checkout flow attaches to the processor objects.
pub async fn process_event(
    event: BillingEvent,
    billing: &dyn BillingRepository,
) -> Result<(), BillingError> {
    info!("Processing billing event type: {}", event.event_type);

    match event.event_type.as_str() {
        "checkout.session.completed" => {
            let session: CheckoutSessionObject = serde_json::from_value(event.data.object)?;
            let (user_id, plan_id) = required_metadata(session.metadata.as_ref())?;

            let now = Utc::now();
            billing
                .create_subscription(NewSubscription {
                    user_id: user_id.clone(),
                    subscription_plan_id: plan_id.clone(),
                    status: "active".to_string(),
                    start_date: now.to_rfc3339(),
                    end_date: (now + Duration::days(30)).to_rfc3339(),
                    auto_renew: true,
                })
                .await?;

            billing
                .record_payment(NewPayment {
                    user_id,
                    subscription_plan_id: plan_id,
                    amount: session.amount_total.map(|a| a as f64 / 100.0).unwrap_or(0.0),
                    status: "completed".to_string(),
                    transaction_id: session.payment_intent,
                    payment_date: now.to_rfc3339(),
                })
                .await?;
        }
        "customer.subscription.updated" => {
            let subscription: SubscriptionObject = serde_json::from_value(event.data.object)?;
            let (user_id, plan_id) = required_metadata(subscription.metadata.as_ref())?;

            let active = subscription.status.as_deref() == Some("active");
            let end_date = subscription
                .current_period_end
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0))
                .map(|dt| dt.to_rfc3339());

            billing
                .apply_subscription_change(SubscriptionChange {
                    user_id,
                    subscription_plan_id: plan_id,
                    status: if active { "active" } else { "cancelled" }.to_string(),
                    end_date,
                    auto_renew: active,
                })
                .await?;
        }
        "customer.subscription.deleted" => {
            let subscription: SubscriptionObject = serde_json::from_value(event.data.object)?;
            let (user_id, plan_id) = required_metadata(subscription.metadata.as_ref())?;

            billing
                .apply_subscription_change(SubscriptionChange {
                    user_id,
                    subscription_plan_id: plan_id,
                    status: "expired".to_string(),
                    end_date: Some(Utc::now().to_rfc3339()),
                    auto_renew: false,
                })
                .await?;
        }
        other => {
            debug!("Ignoring unhandled billing event type: {}", other);
        }
    }

    Ok(())
}

fn required_metadata(
    metadata: Option<&HashMap<String, String>>,
) -> Result<(String, String), BillingError> {
    let user_id = metadata.and_then(|m| m.get("userId").cloned());
    let plan_id = metadata.and_then(|m| m.get("planId").cloned());
    match (user_id, plan_id) {
        (Some(user_id), Some(plan_id)) => Ok((user_id, plan_id)),
        _ => Err(BillingError::MissingMetadata),
    }
}
