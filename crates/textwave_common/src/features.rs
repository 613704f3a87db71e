//! Feature flag handling for the Textwave application.
//!
//! Feature flags are used in two ways:
//!
//! 1. Compile-time feature flags using `#[cfg(feature = "...")]`
//! 2. Runtime feature flags using configuration values
//!
//! This module provides helper functions for checking if features are enabled
//! at runtime based on configuration values.
//!
//! ## Available Features
//!
//! - `openapi`: Enables OpenAPI documentation generation
//! - `twilio`: Enables the Twilio SMS and WhatsApp gateways
//! - `messagebird`: Enables the MessageBird SMS gateway
//! - `billing`: Enables the payment processor webhook

use std::sync::Arc;
use textwave_config::AppConfig;

/// Check if a feature is enabled at runtime based on configuration.
///
/// # Arguments
///
/// * `config` - The application configuration
/// * `use_feature` - The configuration flag that enables the feature
/// * `feature_config` - The configuration section for the feature
///
/// # Returns
///
/// `true` if the feature is enabled, `false` otherwise
pub fn is_feature_enabled<T>(
    _config: &Arc<AppConfig>,
    use_feature: bool,
    feature_config: Option<&T>,
) -> bool {
    use_feature && feature_config.is_some()
}

/// Check if the Twilio gateways are enabled at runtime.
#[cfg(feature = "twilio")]
pub fn is_twilio_enabled(config: &Arc<AppConfig>) -> bool {
    is_feature_enabled(config, config.use_twilio, config.twilio.as_ref())
}

/// Check if the MessageBird gateway is enabled at runtime.
#[cfg(feature = "messagebird")]
pub fn is_messagebird_enabled(config: &Arc<AppConfig>) -> bool {
    is_feature_enabled(config, config.use_messagebird, config.messagebird.as_ref())
}

/// Check if the billing webhook is enabled at runtime.
#[cfg(feature = "billing")]
pub fn is_billing_enabled(config: &Arc<AppConfig>) -> bool {
    is_feature_enabled(config, config.use_billing, config.billing.as_ref())
}
