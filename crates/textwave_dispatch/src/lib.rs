//! Shared request pipeline for the gateway dispatch endpoints.
//!
//! Every dispatch endpoint walks the same stages: check that a bearer
//! credential is present, resolve the gateway record, verify it belongs to
//! the provider the endpoint implements, validate the stored credential
//! shape, invoke the provider adapter, and reconcile the message ledger.
//! This crate holds the stages that are identical across providers and the
//! uniform error envelope; the provider crates own the adapter calls and
//! their wire formats.

pub mod error;
pub mod pipeline;

pub use error::DispatchError;
pub use pipeline::{preflight, present, reconcile_sent, require_auth, resolve_gateway, typed_credentials};
