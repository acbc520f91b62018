//! Configuration validation

use crate::{CheckoutConfig, ConfigError, Result};

/// Validation error details
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Maximum sensible double-submit guard; anything above this locks
/// customers out of ordering twice in one session.
const MAX_ORDER_INTERVAL_SECS: u64 = 3600;

/// Validate the entire checkout configuration
pub fn validate_config(config: &CheckoutConfig) -> Result<()> {
    let mut errors = Vec::new();

    if !VALID_LOG_LEVELS.contains(&config.log_level.as_str()) {
        errors.push(ValidationError::new(
            "log_level",
            format!("unknown log level '{}'", config.log_level),
        ));
    }

    if config.cart.max_displayed_warnings == 0 {
        errors.push(ValidationError::new(
            "cart.max_displayed_warnings",
            "at least one warning must be displayable",
        ));
    }

    if config.order.min_order_placement_interval_secs > MAX_ORDER_INTERVAL_SECS {
        errors.push(ValidationError::new(
            "order.min_order_placement_interval_secs",
            format!("must not exceed {MAX_ORDER_INTERVAL_SECS} seconds"),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        let joined = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Err(ConfigError::ValidationError(joined))
    }
}
