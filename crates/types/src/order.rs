use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An order that has been persisted by the order placement service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacedOrder {
    pub id: Uuid,

    /// Human-readable order number
    pub number: String,

    pub store_id: u64,
    pub customer_id: u64,
    pub total: Decimal,
    pub placed_at: DateTime<Utc>,
}

/// Result of an order placement attempt that did not raise an error. A
/// structurally unsuccessful placement carries messages instead of an order.
#[derive(Debug, Clone, Default)]
pub struct OrderPlacementOutcome {
    pub success: bool,
    pub placed_order: Option<PlacedOrder>,
    pub errors: Vec<String>,
}

impl OrderPlacementOutcome {
    pub fn placed(order: PlacedOrder) -> Self {
        Self {
            success: true,
            placed_order: Some(order),
            errors: Vec::new(),
        }
    }

    pub fn failed(errors: Vec<String>) -> Self {
        Self {
            success: false,
            placed_order: None,
            errors,
        }
    }
}

/// Result of payment post-processing (capture/confirmation) for a placed
/// order. Some providers hand back an external URL to finish payment on
/// their side.
#[derive(Debug, Clone, Default)]
pub struct PostPaymentOutcome {
    pub redirect_url: Option<String>,
}
