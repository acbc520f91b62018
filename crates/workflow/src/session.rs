use storefront_checkout_types::{PaymentRequest, SessionStore};
use tracing::debug;

/// Session key of the payment request assembled during checkout.
pub const ORDER_PAYMENT_INFO_KEY: &str = "checkout.order-payment-info";

/// Session key of the per-flow checkout state blob.
pub const CHECKOUT_STATE_KEY: &str = "checkout.state";

/// Typed access to the checkout-scoped portion of the customer's session.
pub struct CheckoutSession<'a> {
    store: &'a dyn SessionStore,
}

impl<'a> CheckoutSession<'a> {
    pub fn new(store: &'a dyn SessionStore) -> Self {
        Self { store }
    }

    /// The payment request cached by the payment method page, if any.
    pub fn payment_request(&self) -> Option<PaymentRequest> {
        self.store
            .get(ORDER_PAYMENT_INFO_KEY)
            .and_then(|value| serde_json::from_value(value).ok())
    }

    pub fn set_payment_request(&self, request: &PaymentRequest) {
        match serde_json::to_value(request) {
            Ok(value) => self.store.set(ORDER_PAYMENT_INFO_KEY, value),
            Err(error) => debug!(error = %error, "payment request not serializable"),
        }
    }

    pub fn clear_payment_request(&self) {
        self.store.remove(ORDER_PAYMENT_INFO_KEY);
    }

    /// Drop the per-flow checkout state.
    pub fn abandon_state(&self) {
        self.store.remove(CHECKOUT_STATE_KEY);
    }

    /// Drop everything checkout-scoped from the session.
    pub fn abandon(&self) {
        self.clear_payment_request();
        self.abandon_state();
    }
}

/// Clears checkout session data when dropped. Scoped around payment
/// post-processing so cleanup runs on every exit path: normal return,
/// payment failure, unexpected failure.
pub struct SessionCleanup<'a> {
    store: &'a dyn SessionStore,
}

impl<'a> SessionCleanup<'a> {
    pub fn new(store: &'a dyn SessionStore) -> Self {
        Self { store }
    }
}

impl Drop for SessionCleanup<'_> {
    fn drop(&mut self) {
        CheckoutSession::new(self.store).abandon();
    }
}
