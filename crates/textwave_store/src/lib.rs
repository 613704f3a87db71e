//! Relational store access for Textwave
//!
//! This crate provides a database client that is designed to be database
//! agnostic, using SQLx as the underlying database library, plus the
//! repositories the dispatch and billing layers consume: gateway lookup,
//! message-ledger reconciliation, and subscription/payment writes.
//!
//! The client supports SQLite, PostgreSQL, and MySQL through feature flags;
//! SQLite is the default and is what the test suite runs against.

pub mod client;
pub mod error;
pub mod models;
pub mod repositories;

// Re-export the client and the repository surface for ease of use
pub use client::DbClient;
pub use error::StoreError;
pub use models::{GatewayRecord, NewPayment, NewSubscription, SubscriptionChange};

pub use repositories::{
    BillingRepository, GatewayRepository, MessageRepository, SqlBillingRepository,
    SqlGatewayRepository, SqlMessageRepository,
};
