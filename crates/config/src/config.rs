//! Settings read by the checkout workflow at startup

use serde::{Deserialize, Serialize};

/// Checkout configuration, loaded once per process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// Order placement settings
    #[serde(default)]
    pub order: OrderConfig,

    /// Cart and flow settings
    #[serde(default)]
    pub cart: CartConfig,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            order: OrderConfig::default(),
            cart: CartConfig::default(),
            log_level: default_log_level(),
        }
    }
}

/// Order placement settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderConfig {
    /// Whether guests may check out without registering
    #[serde(default = "default_true")]
    pub anonymous_checkout_allowed: bool,

    /// Minimum number of seconds between two orders of the same customer.
    /// Guards against accidental double submits; 0 disables the guard.
    #[serde(default = "default_min_order_interval_secs")]
    pub min_order_placement_interval_secs: u64,
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            anonymous_checkout_allowed: default_true(),
            min_order_placement_interval_secs: default_min_order_interval_secs(),
        }
    }
}

/// Cart and flow settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartConfig {
    /// Run all checkout steps in one pass instead of one page per step
    #[serde(default)]
    pub quick_checkout_enabled: bool,

    /// How many validation warnings are surfaced to the customer at once
    #[serde(default = "default_max_displayed_warnings")]
    pub max_displayed_warnings: usize,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            quick_checkout_enabled: false,
            max_displayed_warnings: default_max_displayed_warnings(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_min_order_interval_secs() -> u64 {
    30
}

fn default_max_displayed_warnings() -> usize {
    3
}
