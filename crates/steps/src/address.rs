use async_trait::async_trait;
use tracing::debug;

use storefront_checkout_types::{CheckoutContext, NavTarget, RouteIdent, StepOutcome};

use crate::CheckoutStepHandler;

/// Route action of the address selection page.
pub const ADDRESS_ACTION: &str = "Address";

/// Billing/shipping address selection. Satisfied once a billing address is
/// chosen and, for carts that ship, a shipping address too. When the
/// customer's address book holds exactly one entry there is nothing to
/// choose: the step applies it and skips its page.
pub struct AddressStep {
    order: i32,
}

impl AddressStep {
    pub const DEFAULT_ORDER: i32 = 10;

    pub fn new() -> Self {
        Self {
            order: Self::DEFAULT_ORDER,
        }
    }

    pub fn with_order(order: i32) -> Self {
        Self { order }
    }
}

impl Default for AddressStep {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CheckoutStepHandler for AddressStep {
    fn order(&self) -> i32 {
        self.order
    }

    fn label(&self) -> &'static str {
        "address"
    }

    fn is_handler_for(&self, route: &RouteIdent) -> bool {
        route.matches("Checkout", ADDRESS_ACTION)
    }

    fn page(&self, _ctx: &CheckoutContext<'_>) -> NavTarget {
        NavTarget::checkout(ADDRESS_ACTION)
    }

    async fn process(&self, ctx: &mut CheckoutContext<'_>) -> StepOutcome {
        let needs_shipping = ctx.cart.requires_shipping();
        let customer = &mut ctx.cart.customer;

        let satisfied = customer.billing_address.is_some()
            && (!needs_shipping || customer.shipping_address.is_some());
        if satisfied {
            return StepOutcome::success();
        }

        if customer.addresses.len() == 1 {
            let only = customer.addresses[0].clone();
            if customer.billing_address.is_none() {
                customer.billing_address = Some(only.clone());
            }
            if needs_shipping && customer.shipping_address.is_none() {
                customer.shipping_address = Some(only);
            }
            debug!(customer_id = customer.id, "applied sole address, skipping page");
            return StepOutcome::skip();
        }

        // Customer has to pick or create an address on the page.
        StepOutcome::failure(Vec::new())
    }
}
