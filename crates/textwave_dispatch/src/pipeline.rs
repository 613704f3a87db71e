// --- File: crates/textwave_dispatch/src/pipeline.rs ---
use axum::http::{header, HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use textwave_common::models::CredentialSet;
use textwave_common::Provider;
use textwave_store::{GatewayRecord, GatewayRepository, MessageRepository};
use tracing::{debug, error, warn};

use crate::error::DispatchError;

/// RECEIVED -> AUTHENTICATED: the request must carry a non-empty bearer
/// credential. The credential is forwarded, not verified here; deeper
/// verification is the identity provider's job.
pub fn require_auth(headers: &HeaderMap) -> Result<(), DispatchError> {
    let present = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| !value.is_empty());

    if present {
        Ok(())
    } else {
        Err(DispatchError::AuthenticationMissing)
    }
}

/// Treats an empty string the same as an absent parameter.
pub fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// AUTHENTICATED -> PROVIDER_MATCHED: load the gateway record and check it
/// belongs to the provider this endpoint implements.
///
/// A lookup error and a missing row collapse into the same ambiguous
/// "not found or access denied" failure.
pub async fn resolve_gateway(
    gateways: &dyn GatewayRepository,
    gateway_id: &str,
    expected: Provider,
) -> Result<GatewayRecord, DispatchError> {
    let record = gateways
        .find_by_id(gateway_id)
        .await
        .map_err(|e| {
            warn!("Gateway lookup failed for {}: {}", gateway_id, e);
            DispatchError::GatewayNotFound
        })?
        .ok_or(DispatchError::GatewayNotFound)?;

    if record.provider != expected.as_str() {
        return Err(DispatchError::ProviderMismatch);
    }

    Ok(record)
}

/// PROVIDER_MATCHED -> ADAPTER_INVOKED: parse the stored credential blob
/// into the provider's shape. A missing, mistyped, or empty required field
/// fails here, before any network call is attempted.
pub fn typed_credentials<T>(gateway: &GatewayRecord) -> Result<T, DispatchError>
where
    T: DeserializeOwned + CredentialSet,
{
    let credentials: T = serde_json::from_value(gateway.credentials.clone())
        .map_err(|_| DispatchError::CredentialsInvalid)?;

    if !credentials.is_complete() {
        return Err(DispatchError::CredentialsInvalid);
    }

    Ok(credentials)
}

/// ADAPTER_INVOKED -> LEDGER_RECONCILED: best-effort transition of the
/// matching pending ledger row to sent.
///
/// The provider send has already succeeded at this point, so a ledger
/// failure is logged and swallowed; it must never turn a delivered message
/// into a caller-visible error.
pub async fn reconcile_sent(
    messages: &dyn MessageRepository,
    gateway_id: &str,
    recipient: &str,
    body: Option<&str>,
) {
    match messages.mark_sent(gateway_id, recipient, body).await {
        Ok(0) => debug!(
            "No pending ledger row matched gateway {} -> {}",
            gateway_id, recipient
        ),
        Ok(_) => {}
        Err(e) => error!("Error updating message status: {}", e),
    }
}

/// Answers a plain CORS preflight. Headers come from the CORS layer on the
/// app router.
pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}
