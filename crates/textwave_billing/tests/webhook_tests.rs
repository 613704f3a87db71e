use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::{Arc, Mutex};
use textwave_billing::handlers::{billing_webhook_handler, BillingState};
use textwave_billing::logic::{process_event, BillingEvent};
use textwave_common::services::BoxFuture;
use textwave_config::{AppConfig, BillingConfig, ServerConfig};
use textwave_store::{
    BillingRepository, NewPayment, NewSubscription, StoreError, SubscriptionChange,
};

// --- Test fixtures ---

#[derive(Default)]
struct RecordingBilling {
    subscriptions: Mutex<Vec<NewSubscription>>,
    payments: Mutex<Vec<NewPayment>>,
    changes: Mutex<Vec<SubscriptionChange>>,
}

impl BillingRepository for RecordingBilling {
    fn create_subscription(
        &self,
        subscription: NewSubscription,
    ) -> BoxFuture<'_, (), StoreError> {
        self.subscriptions.lock().unwrap().push(subscription);
        Box::pin(async move { Ok(()) })
    }

    fn record_payment(&self, payment: NewPayment) -> BoxFuture<'_, (), StoreError> {
        self.payments.lock().unwrap().push(payment);
        Box::pin(async move { Ok(()) })
    }

    fn apply_subscription_change(
        &self,
        change: SubscriptionChange,
    ) -> BoxFuture<'_, u64, StoreError> {
        self.changes.lock().unwrap().push(change);
        Box::pin(async move { Ok(1) })
    }
}

fn event(event_type: &str, object: serde_json::Value) -> BillingEvent {
    serde_json::from_value(serde_json::json!({
        "id": "evt_1",
        "type": event_type,
        "created": 1767225600,
        "livemode": false,
        "data": {"object": object}
    }))
    .unwrap()
}

fn sign(payload: &str, secret: &str) -> String {
    type HmacSha256 = Hmac<Sha256>;
    let timestamp = Utc::now().timestamp();
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(format!("{}.{}", timestamp, payload).as_bytes());
    format!("t={},v1={}", timestamp, hex::encode(mac.finalize().into_bytes()))
}

fn config(secret: Option<&str>) -> Arc<AppConfig> {
    Arc::new(AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8086,
        },
        use_twilio: false,
        use_messagebird: false,
        use_billing: true,
        database: None,
        twilio: None,
        messagebird: None,
        billing: Some(BillingConfig {
            webhook_secret: secret.map(str::to_string),
        }),
    })
}

// --- Event processing ---

#[tokio::test]
async fn checkout_completion_creates_subscription_and_payment() {
    let billing = RecordingBilling::default();
    let event = event(
        "checkout.session.completed",
        serde_json::json!({
            "id": "cs_test_1",
            "amount_total": 4900,
            "currency": "usd",
            "payment_intent": "pi_123",
            "metadata": {"userId": "user-1", "planId": "plan-pro"}
        }),
    );

    process_event(event, &billing).await.unwrap();

    let subscriptions = billing.subscriptions.lock().unwrap();
    assert_eq!(subscriptions.len(), 1);
    assert_eq!(subscriptions[0].user_id, "user-1");
    assert_eq!(subscriptions[0].subscription_plan_id, "plan-pro");
    assert_eq!(subscriptions[0].status, "active");
    assert!(subscriptions[0].auto_renew);

    let payments = billing.payments.lock().unwrap();
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].amount, 49.0);
    assert_eq!(payments[0].status, "completed");
    assert_eq!(payments[0].transaction_id.as_deref(), Some("pi_123"));
}

#[tokio::test]
async fn checkout_without_metadata_fails() {
    let billing = RecordingBilling::default();
    let event = event(
        "checkout.session.completed",
        serde_json::json!({"id": "cs_test_1", "amount_total": 4900}),
    );

    let err = process_event(event, &billing).await.unwrap_err();
    assert_eq!(err.to_string(), "Missing metadata");
    assert!(billing.subscriptions.lock().unwrap().is_empty());
    assert!(billing.payments.lock().unwrap().is_empty());
}

#[tokio::test]
async fn subscription_update_tracks_active_state() {
    let billing = RecordingBilling::default();
    let event = event(
        "customer.subscription.updated",
        serde_json::json!({
            "id": "sub_1",
            "status": "past_due",
            "current_period_end": 1769904000,
            "metadata": {"userId": "user-1", "planId": "plan-pro"}
        }),
    );

    process_event(event, &billing).await.unwrap();

    let changes = billing.changes.lock().unwrap();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].status, "cancelled");
    assert!(!changes[0].auto_renew);
    assert!(changes[0].end_date.as_deref().unwrap().starts_with("2026-02-01"));
}

#[tokio::test]
async fn subscription_deletion_expires_the_row() {
    let billing = RecordingBilling::default();
    let event = event(
        "customer.subscription.deleted",
        serde_json::json!({
            "id": "sub_1",
            "status": "canceled",
            "metadata": {"userId": "user-1", "planId": "plan-pro"}
        }),
    );

    process_event(event, &billing).await.unwrap();

    let changes = billing.changes.lock().unwrap();
    assert_eq!(changes[0].status, "expired");
    assert!(!changes[0].auto_renew);
    assert!(changes[0].end_date.is_some());
}

#[tokio::test]
async fn unhandled_event_types_are_acknowledged_without_writes() {
    let billing = RecordingBilling::default();
    let event = event(
        "payment_intent.succeeded",
        serde_json::json!({"id": "pi_123"}),
    );

    process_event(event, &billing).await.unwrap();

    assert!(billing.subscriptions.lock().unwrap().is_empty());
    assert!(billing.payments.lock().unwrap().is_empty());
    assert!(billing.changes.lock().unwrap().is_empty());
}

// --- Handler surface ---

#[tokio::test]
async fn missing_signature_header_is_rejected_with_400() {
    let state = Arc::new(BillingState {
        config: config(Some("whsec_test")),
        billing: Arc::new(RecordingBilling::default()),
    });

    let response =
        billing_webhook_handler(State(state), HeaderMap::new(), "{}".to_string()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], &b"No signature"[..]);
}

#[tokio::test]
async fn bad_signature_is_rejected_before_processing() {
    let billing = Arc::new(RecordingBilling::default());
    let state = Arc::new(BillingState {
        config: config(Some("whsec_test")),
        billing: billing.clone(),
    });

    let mut headers = HeaderMap::new();
    headers.insert("stripe-signature", "t=1,v1=deadbeef".parse().unwrap());

    let response = billing_webhook_handler(State(state), headers, "{}".to_string()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(billing.changes.lock().unwrap().is_empty());
}

#[tokio::test]
async fn signed_event_is_processed_and_acknowledged() {
    let billing = Arc::new(RecordingBilling::default());
    let state = Arc::new(BillingState {
        config: config(Some("whsec_test")),
        billing: billing.clone(),
    });

    let payload = serde_json::json!({
        "id": "evt_2",
        "type": "customer.subscription.deleted",
        "data": {"object": {
            "id": "sub_1",
            "metadata": {"userId": "user-1", "planId": "plan-pro"}
        }}
    })
    .to_string();

    let mut headers = HeaderMap::new();
    headers.insert(
        "stripe-signature",
        sign(&payload, "whsec_test").parse().unwrap(),
    );

    let response = billing_webhook_handler(State(state), headers, payload).await;
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["received"], true);
    assert_eq!(billing.changes.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn missing_secret_is_a_server_error() {
    // Guard against ambient configuration leaking into the test.
    std::env::remove_var("STRIPE_WEBHOOK_SECRET");

    let state = Arc::new(BillingState {
        config: config(None),
        billing: Arc::new(RecordingBilling::default()),
    });

    let mut headers = HeaderMap::new();
    headers.insert("stripe-signature", "t=1,v1=deadbeef".parse().unwrap());

    let response = billing_webhook_handler(State(state), headers, "{}".to_string()).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
