use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use storefront_checkout_types::Cart;

/// A shipping method the customer can choose from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingOption {
    pub id: String,
    pub label: String,
    pub cost: Decimal,
}

/// A payment method the customer can choose from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentOption {
    pub id: String,
    pub label: String,
}

/// Provider errors
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider unavailable: {0}")]
    Unavailable(String),
}

/// Computes the shipping methods available for a cart. Rate computation is
/// external; the step only cares about the resulting option set.
#[async_trait]
pub trait ShippingOptionsProvider: Send + Sync {
    async fn options(&self, cart: &Cart) -> Result<Vec<ShippingOption>, ProviderError>;
}

/// Computes the payment methods available for a cart.
#[async_trait]
pub trait PaymentOptionsProvider: Send + Sync {
    async fn options(&self, cart: &Cart) -> Result<Vec<PaymentOption>, ProviderError>;
}
