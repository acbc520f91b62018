use std::collections::BTreeMap;

use async_trait::async_trait;
use thiserror::Error;

use storefront_checkout_types::{
    Cart, CartItem, Customer, NavTarget, OrderPlacementOutcome, PaymentRequest, PlacedOrder,
    PostPaymentOutcome,
};

/// A payment failure raised by order placement or post-processing. Providers
/// may supply their own redirect target (e.g. a retry page); otherwise the
/// workflow falls back to the payment method page.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct PaymentError {
    pub message: String,
    pub redirect: Option<NavTarget>,
}

impl PaymentError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            redirect: None,
        }
    }

    pub fn with_redirect(message: impl Into<String>, redirect: NavTarget) -> Self {
        Self {
            message: message.into(),
            redirect: Some(redirect),
        }
    }
}

/// Order placement errors
#[derive(Debug, Error)]
pub enum PlaceOrderError {
    #[error(transparent)]
    Payment(#[from] PaymentError),

    #[error("order placement failed: {0}")]
    Unexpected(#[from] anyhow::Error),
}

/// Payment post-processing errors
#[derive(Debug, Error)]
pub enum PostPaymentError {
    #[error(transparent)]
    Payment(#[from] PaymentError),

    #[error("payment post-processing failed: {0}")]
    Unexpected(#[from] anyhow::Error),
}

/// Validates cart contents against business rules. Warnings are appended to
/// the caller-supplied list; the return value reports whether validation
/// passed as a whole.
#[async_trait]
pub trait CartValidator: Send + Sync {
    async fn validate_cart(
        &self,
        cart: &Cart,
        warnings: &mut Vec<String>,
        validate_checkout_attributes: bool,
    ) -> bool;

    /// Re-validate a single line against current catalog and stock rules.
    async fn validate_cart_item(
        &self,
        item: &CartItem,
        cart: &Cart,
        warnings: &mut Vec<String>,
    ) -> bool;
}

/// Extension point published while a cart is validated. Subscribers may
/// append warnings and may short-circuit the flow with their own navigation
/// result.
#[async_trait]
pub trait CheckoutEvents: Send + Sync {
    async fn cart_validating(&self, cart: &Cart, warnings: &mut Vec<String>) -> Option<NavTarget>;
}

/// Flushes pending cart mutations to the backing store. Persistence itself
/// lives outside this system.
#[async_trait]
pub trait CartStore: Send + Sync {
    async fn save(&self, cart: &Cart) -> anyhow::Result<()>;
}

/// Order placement service interface
#[async_trait]
pub trait OrderPlacementService: Send + Sync {
    /// Whether enough time has passed since the customer's last placed
    /// order. Evaluated against the stored last-order timestamp; guards
    /// against accidental double submits.
    async fn is_min_order_interval_elapsed(&self, customer: &Customer, store_id: u64) -> bool;

    async fn place_order(
        &self,
        request: PaymentRequest,
        extra_data: BTreeMap<String, String>,
    ) -> Result<OrderPlacementOutcome, PlaceOrderError>;
}

/// Payment service interface (capture/confirmation after placement)
#[async_trait]
pub trait PaymentService: Send + Sync {
    async fn post_process(&self, order: &PlacedOrder)
        -> Result<PostPaymentOutcome, PostPaymentError>;
}

/// Fire-and-forget surface for user-facing notices. The workflow never
/// inspects what happens to them.
pub trait Notifier: Send + Sync {
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_error_display() {
        let error = PaymentError::new("card declined");
        assert_eq!(error.to_string(), "card declined");
        assert!(error.redirect.is_none());
    }

    #[test]
    fn test_payment_error_redirect() {
        let error = PaymentError::with_redirect("3ds required", NavTarget::checkout("Retry"));
        assert!(error.redirect.is_some());
    }

    #[test]
    fn test_place_order_error_from_anyhow() {
        let error: PlaceOrderError = anyhow::anyhow!("db connection lost").into();
        assert!(matches!(error, PlaceOrderError::Unexpected(_)));
        assert!(error.to_string().contains("db connection lost"));
    }
}
