use std::sync::Arc;

use storefront_checkout_steps::{CheckoutStepHandler, StepRegistry};
use storefront_checkout_types::{CheckoutContext, NavTarget, RouteIdent};

/// Which way the customer is moving through the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Computes adjacent steps and, for skipped pages, the direction of travel.
pub struct NavigationResolver {
    registry: Arc<StepRegistry>,
}

impl NavigationResolver {
    pub fn new(registry: Arc<StepRegistry>) -> Self {
        Self { registry }
    }

    /// The handler with the smallest order strictly greater than the given
    /// handler's, or `None` when it is the last. Handlers sharing the order
    /// are never adjacent to each other.
    pub fn next(&self, handler: &dyn CheckoutStepHandler) -> Option<Arc<dyn CheckoutStepHandler>> {
        self.registry
            .handlers()
            .iter()
            .find(|h| h.order() > handler.order())
            .cloned()
    }

    /// The handler with the largest order strictly less than the given
    /// handler's, or `None` when it is the first.
    pub fn previous(
        &self,
        handler: &dyn CheckoutStepHandler,
    ) -> Option<Arc<dyn CheckoutStepHandler>> {
        self.registry
            .handlers()
            .iter()
            .rev()
            .find(|h| h.order() < handler.order())
            .cloned()
    }

    /// Decide whether a customer skipping `handler`'s page is moving forward
    /// or backward, judged by where they came from. No durable current-step
    /// pointer exists; the referrer is all there is, and an unknown or
    /// missing referrer defaults to forward.
    pub fn skip_direction(
        &self,
        handler: &dyn CheckoutStepHandler,
        referrer: Option<&RouteIdent>,
    ) -> Direction {
        let Some(referrer) = referrer else {
            return Direction::Forward;
        };

        if referrer.is_checkout_entry() {
            // Coming from the entry page, the only way is onwards.
            return Direction::Forward;
        }

        if referrer.is_checkout_confirm() {
            // Stepping back from the confirmation page.
            return Direction::Backward;
        }

        match self.registry.handler_for(referrer) {
            Some(referrer_handler) if referrer_handler.order() < handler.order() => {
                Direction::Forward
            }
            Some(_) => Direction::Backward,
            None => Direction::Forward,
        }
    }

    /// Destination for a step whose page must be skipped: the adjacent step
    /// in the direction of travel, falling back to the confirmation page
    /// past the last step and to the cart page before the first.
    pub fn adjacent(
        &self,
        handler: &dyn CheckoutStepHandler,
        ctx: &CheckoutContext<'_>,
    ) -> NavTarget {
        match self.skip_direction(handler, ctx.referrer.as_ref()) {
            Direction::Forward => self
                .next(handler)
                .map(|h| h.page(ctx))
                .unwrap_or_else(|| NavTarget::route(RouteIdent::checkout_confirm())),
            Direction::Backward => self
                .previous(handler)
                .map(|h| h.page(ctx))
                .unwrap_or_else(NavTarget::cart),
        }
    }
}
