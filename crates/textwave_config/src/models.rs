// --- File: crates/textwave_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Database Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub url: String, // e.g., DATABASE_URL loaded via TW_DATABASE__URL or DATABASE_URL
}

// --- Twilio Config ---
// Per-gateway credentials live in the gateways table; this section only
// carries deployment-level knobs for the Twilio REST API.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct TwilioConfig {
    /// Override of the Twilio API base URL (tests point this at a local mock).
    pub api_base_url: Option<String>,
}

// --- MessageBird Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct MessageBirdConfig {
    /// Override of the MessageBird REST base URL.
    pub api_base_url: Option<String>,
}

// --- Billing Config ---
// Holds non-secret billing config. The webhook signing secret may also be
// supplied via the STRIPE_WEBHOOK_SECRET environment variable.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct BillingConfig {
    pub webhook_secret: Option<String>,
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_twilio: bool,
    #[serde(default)]
    pub use_messagebird: bool,
    #[serde(default)]
    pub use_billing: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub database: Option<DatabaseConfig>, // Central DB config
    #[serde(default)]
    pub twilio: Option<TwilioConfig>,
    #[serde(default)]
    pub messagebird: Option<MessageBirdConfig>,
    #[serde(default)]
    pub billing: Option<BillingConfig>,
}
