//! Repositories for the tables the dispatch and billing layers touch.

pub mod billing;
pub mod billing_sql;
pub mod gateway;
pub mod gateway_sql;
pub mod message;
pub mod message_sql;

pub use billing::BillingRepository;
pub use billing_sql::SqlBillingRepository;
pub use gateway::GatewayRepository;
pub use gateway_sql::SqlGatewayRepository;
pub use message::MessageRepository;
pub use message_sql::SqlMessageRepository;
