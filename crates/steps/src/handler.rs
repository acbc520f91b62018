use async_trait::async_trait;
use storefront_checkout_types::{CheckoutContext, NavTarget, RouteIdent, StepOutcome};

/// One page-sized unit of the checkout flow. Implementations are registered
/// once at startup and are read-only afterwards; all per-request state lives
/// in the [`CheckoutContext`].
#[async_trait]
pub trait CheckoutStepHandler: Send + Sync {
    /// Position of the step in the flow. May repeat across handlers; ties
    /// keep registration order.
    fn order(&self) -> i32;

    /// Short name used in logs.
    fn label(&self) -> &'static str;

    /// Whether this handler owns the given route.
    fn is_handler_for(&self, route: &RouteIdent) -> bool;

    /// The page associated with this step.
    fn page(&self, ctx: &CheckoutContext<'_>) -> NavTarget;

    /// Evaluate the step against the current request, recording any
    /// selection it can make on the customer's behalf.
    async fn process(&self, ctx: &mut CheckoutContext<'_>) -> StepOutcome;
}
