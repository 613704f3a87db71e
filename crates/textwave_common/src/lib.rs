// --- File: crates/textwave_common/src/lib.rs ---

// Declare modules within this crate
pub mod features; // Feature flag handling
pub mod http; // Shared HTTP client
pub mod logging; // Logging utilities
pub mod models; // Provider and credential models
pub mod services; // Service abstractions

// Re-export the most used items for easier access
pub use http::HTTP_CLIENT;

pub use models::{
    CredentialSet, MessageBirdCredentials, Provider, TwilioSmsCredentials,
    TwilioWhatsAppCredentials,
};

pub use services::{BalanceReport, BoxFuture, MessagingProvider, OutboundMessage, SendReceipt};

pub use features::is_feature_enabled;

// Conditionally re-export feature-specific helpers
#[cfg(feature = "twilio")]
pub use features::is_twilio_enabled;

#[cfg(feature = "messagebird")]
pub use features::is_messagebird_enabled;

#[cfg(feature = "billing")]
pub use features::is_billing_enabled;
