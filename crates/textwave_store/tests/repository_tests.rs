use textwave_store::{
    BillingRepository, DbClient, GatewayRepository, MessageRepository, NewPayment,
    NewSubscription, SqlBillingRepository, SqlGatewayRepository, SqlMessageRepository,
    SubscriptionChange,
};

// Each test gets its own SQLite database file so the pooled connections all
// see the same data (":memory:" would give every pooled connection a
// separate database).
fn temp_db_url(name: &str) -> String {
    format!(
        "sqlite:{}/textwave_{}_{}.db",
        std::env::temp_dir().display(),
        name,
        std::process::id()
    )
}

async fn client(name: &str) -> DbClient {
    let url = temp_db_url(name);
    let path = url.trim_start_matches("sqlite:").to_string();
    let _ = std::fs::remove_file(path);
    DbClient::from_url(&url).await.unwrap()
}

#[tokio::test]
async fn gateway_lookup_returns_decoded_record() {
    let db = client("gateway_lookup").await;
    let gateways = SqlGatewayRepository::new(db.clone());
    gateways.init_schema().await.unwrap();

    db.execute(
        r#"
        INSERT INTO gateways (id, name, provider, credentials, status)
        VALUES ('gw-1', 'Main line', 'twilio',
                '{"account_sid":"AC123","auth_token":"secret","sender_number":"+15550001111"}',
                'active')
    "#,
    )
    .await
    .unwrap();

    let record = gateways.find_by_id("gw-1").await.unwrap().unwrap();
    assert_eq!(record.provider, "twilio");
    assert_eq!(record.status, "active");
    assert_eq!(record.credentials["account_sid"], "AC123");

    assert!(gateways.find_by_id("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn gateway_with_malformed_credentials_is_an_error() {
    let db = client("gateway_malformed").await;
    let gateways = SqlGatewayRepository::new(db.clone());
    gateways.init_schema().await.unwrap();

    db.execute(
        "INSERT INTO gateways (id, provider, credentials, status) \
         VALUES ('gw-bad', 'twilio', 'not json', 'active')",
    )
    .await
    .unwrap();

    assert!(gateways.find_by_id("gw-bad").await.is_err());
}

#[tokio::test]
async fn mark_sent_transitions_only_matching_pending_rows() {
    let db = client("mark_sent").await;
    let messages = SqlMessageRepository::new(db.clone());
    messages.init_schema().await.unwrap();

    db.execute(
        "INSERT INTO messages (id, gateway_id, recipient, message, status) VALUES \
         ('m-1', 'gw-1', '+15551234567', 'hello', 'pending'), \
         ('m-2', 'gw-1', '+15551234567', 'other body', 'pending'), \
         ('m-3', 'gw-1', '+15559999999', 'hello', 'pending')",
    )
    .await
    .unwrap();

    let updated = messages
        .mark_sent("gw-1", "+15551234567", Some("hello"))
        .await
        .unwrap();
    assert_eq!(updated, 1);

    // Already sent; the pending filter makes the transition idempotent.
    let updated_again = messages
        .mark_sent("gw-1", "+15551234567", Some("hello"))
        .await
        .unwrap();
    assert_eq!(updated_again, 0);

    // No body filter matches every pending row for the recipient.
    let updated_no_body = messages
        .mark_sent("gw-1", "+15551234567", None)
        .await
        .unwrap();
    assert_eq!(updated_no_body, 1);
}

#[tokio::test]
async fn billing_rows_insert_and_update() {
    let db = client("billing").await;
    let billing = SqlBillingRepository::new(db.clone());
    billing.init_schema().await.unwrap();

    billing
        .create_subscription(NewSubscription {
            user_id: "user-1".to_string(),
            subscription_plan_id: "plan-pro".to_string(),
            status: "active".to_string(),
            start_date: "2026-01-01T00:00:00Z".to_string(),
            end_date: "2026-01-31T00:00:00Z".to_string(),
            auto_renew: true,
        })
        .await
        .unwrap();

    billing
        .record_payment(NewPayment {
            user_id: "user-1".to_string(),
            subscription_plan_id: "plan-pro".to_string(),
            amount: 49.0,
            status: "completed".to_string(),
            transaction_id: Some("pi_123".to_string()),
            payment_date: "2026-01-01T00:00:00Z".to_string(),
        })
        .await
        .unwrap();

    let changed = billing
        .apply_subscription_change(SubscriptionChange {
            user_id: "user-1".to_string(),
            subscription_plan_id: "plan-pro".to_string(),
            status: "expired".to_string(),
            end_date: Some("2026-02-01T00:00:00Z".to_string()),
            auto_renew: false,
        })
        .await
        .unwrap();
    assert_eq!(changed, 1);

    let unmatched = billing
        .apply_subscription_change(SubscriptionChange {
            user_id: "user-2".to_string(),
            subscription_plan_id: "plan-pro".to_string(),
            status: "expired".to_string(),
            end_date: None,
            auto_renew: false,
        })
        .await
        .unwrap();
    assert_eq!(unmatched, 0);
}
