use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use storefront_checkout_types::{CheckoutContext, NavTarget, RouteIdent, StepOutcome};

use crate::{CheckoutStepHandler, ShippingOptionsProvider};

/// Route action of the shipping method selection page.
pub const SHIPPING_METHOD_ACTION: &str = "ShippingMethod";

/// Shipping method selection. Skips its page when the cart needs no
/// shipping or when only a single method is offered.
pub struct ShippingMethodStep {
    order: i32,
    provider: Arc<dyn ShippingOptionsProvider>,
}

impl ShippingMethodStep {
    pub const DEFAULT_ORDER: i32 = 20;

    pub fn new(provider: Arc<dyn ShippingOptionsProvider>) -> Self {
        Self {
            order: Self::DEFAULT_ORDER,
            provider,
        }
    }

    pub fn with_order(order: i32, provider: Arc<dyn ShippingOptionsProvider>) -> Self {
        Self { order, provider }
    }
}

#[async_trait]
impl CheckoutStepHandler for ShippingMethodStep {
    fn order(&self) -> i32 {
        self.order
    }

    fn label(&self) -> &'static str {
        "shipping-method"
    }

    fn is_handler_for(&self, route: &RouteIdent) -> bool {
        route.matches("Checkout", SHIPPING_METHOD_ACTION)
    }

    fn page(&self, _ctx: &CheckoutContext<'_>) -> NavTarget {
        NavTarget::checkout(SHIPPING_METHOD_ACTION)
    }

    async fn process(&self, ctx: &mut CheckoutContext<'_>) -> StepOutcome {
        if !ctx.cart.requires_shipping() {
            // Stale selection from a previous cart composition
            ctx.cart.customer.selected_shipping_method = None;
            return StepOutcome::skip();
        }

        let options = match self.provider.options(ctx.cart).await {
            Ok(options) => options,
            Err(error) => {
                warn!(error = %error, "shipping options unavailable");
                return StepOutcome::failure_with_message(
                    "Shipping methods are currently unavailable. Please try again.",
                );
            }
        };

        if options.is_empty() {
            return StepOutcome::failure_with_message(
                "No shipping method is available for this order.",
            );
        }

        if options.len() == 1 {
            debug!(method = %options[0].id, "single shipping method, skipping page");
            ctx.cart.customer.selected_shipping_method = Some(options[0].id.clone());
            return StepOutcome::skip();
        }

        match &ctx.cart.customer.selected_shipping_method {
            Some(selected) if options.iter().any(|o| o.id == *selected) => StepOutcome::success(),
            _ => StepOutcome::failure(Vec::new()),
        }
    }
}
