use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use storefront_checkout_types::{CheckoutContext, NavTarget, RouteIdent, StepOutcome};

use crate::{CheckoutStepHandler, PaymentOptionsProvider};

/// Route action of the payment method selection page.
pub const PAYMENT_METHOD_ACTION: &str = "PaymentMethod";

/// Payment method selection. Skips its page when there is nothing to pay or
/// when only a single method is offered.
pub struct PaymentMethodStep {
    order: i32,
    provider: Arc<dyn PaymentOptionsProvider>,
}

impl PaymentMethodStep {
    pub const DEFAULT_ORDER: i32 = 30;

    pub fn new(provider: Arc<dyn PaymentOptionsProvider>) -> Self {
        Self {
            order: Self::DEFAULT_ORDER,
            provider,
        }
    }

    pub fn with_order(order: i32, provider: Arc<dyn PaymentOptionsProvider>) -> Self {
        Self { order, provider }
    }
}

#[async_trait]
impl CheckoutStepHandler for PaymentMethodStep {
    fn order(&self) -> i32 {
        self.order
    }

    fn label(&self) -> &'static str {
        "payment-method"
    }

    fn is_handler_for(&self, route: &RouteIdent) -> bool {
        route.matches("Checkout", PAYMENT_METHOD_ACTION)
    }

    fn page(&self, _ctx: &CheckoutContext<'_>) -> NavTarget {
        NavTarget::checkout(PAYMENT_METHOD_ACTION)
    }

    async fn process(&self, ctx: &mut CheckoutContext<'_>) -> StepOutcome {
        if ctx.cart.subtotal().is_zero() {
            // Nothing to pay, e.g. fully covered by a voucher
            ctx.cart.customer.selected_payment_method = None;
            return StepOutcome::skip();
        }

        let options = match self.provider.options(ctx.cart).await {
            Ok(options) => options,
            Err(error) => {
                warn!(error = %error, "payment options unavailable");
                return StepOutcome::failure_with_message(
                    "Payment methods are currently unavailable. Please try again.",
                );
            }
        };

        if options.is_empty() {
            return StepOutcome::failure_with_message(
                "No payment method is available for this order.",
            );
        }

        if options.len() == 1 {
            debug!(method = %options[0].id, "single payment method, skipping page");
            ctx.cart.customer.selected_payment_method = Some(options[0].id.clone());
            return StepOutcome::skip();
        }

        match &ctx.cart.customer.selected_payment_method {
            Some(selected) if options.iter().any(|o| o.id == *selected) => StepOutcome::success(),
            _ => StepOutcome::failure(Vec::new()),
        }
    }
}
