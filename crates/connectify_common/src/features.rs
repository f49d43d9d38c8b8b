//! Feature flag handling.
//!
//! Feature flags are used in two ways:
//!
//! 1. Compile-time feature flags using `#[cfg(feature = "...")]`
//! 2. Runtime feature flags using configuration values
//!
//! ## Available Features
//!
//! - `openapi`: derives OpenAPI schemas for the shared models
//! - `booking`: exposes [`is_booking_enabled`]

use connectify_config::AppConfig;
use std::sync::Arc;

/// `true` when the runtime switch is on and its configuration section is present.
pub fn is_feature_enabled<T>(
    _config: &Arc<AppConfig>,
    use_feature: bool,
    feature_config: Option<&T>,
) -> bool {
    use_feature && feature_config.is_some()
}

/// Check if the booking API should be mounted.
#[cfg(feature = "booking")]
pub fn is_booking_enabled(config: &Arc<AppConfig>) -> bool {
    is_feature_enabled(config, config.use_booking, config.booking.as_ref())
}
