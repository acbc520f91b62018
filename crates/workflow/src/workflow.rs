use std::collections::BTreeMap;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error, info};

use storefront_checkout_config::{CartConfig, OrderConfig};
use storefront_checkout_steps::StepRegistry;
use storefront_checkout_types::{
    CheckoutContext, CheckoutMessage, CheckoutWorkflowResult, NavTarget, RouteIdent,
};

use crate::{
    text_to_html, CartStore, CartValidator, CheckoutEvents, CheckoutSession, NavigationResolver,
    Notifier, OrderPlacementService, PaymentError, PaymentService, PlaceOrderError,
    PostPaymentError, SessionCleanup,
};

/// Form fields forwarded verbatim to order placement.
const EXTRA_DATA_FIELDS: &[&str] = &[
    "customer_comment",
    "subscribe_to_newsletter",
    "accept_third_party_email_handover",
];

const MIN_ORDER_INTERVAL_MESSAGE: &str =
    "Your previous order was placed only moments ago. Please wait a little before ordering again.";

/// Builder error
#[derive(Debug, Error)]
pub enum BuilderError {
    #[error("missing required field: {field}")]
    MissingField { field: String },
}

/// Builder for [`CheckoutWorkflow`], validating that all collaborators are
/// wired before the workflow can serve requests.
#[derive(Default)]
pub struct CheckoutWorkflowBuilder {
    registry: Option<Arc<StepRegistry>>,
    cart_validator: Option<Arc<dyn CartValidator>>,
    events: Option<Arc<dyn CheckoutEvents>>,
    cart_store: Option<Arc<dyn CartStore>>,
    orders: Option<Arc<dyn OrderPlacementService>>,
    payments: Option<Arc<dyn PaymentService>>,
    notifier: Option<Arc<dyn Notifier>>,
    order_config: OrderConfig,
    cart_config: CartConfig,
}

impl CheckoutWorkflowBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(mut self, registry: Arc<StepRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn with_cart_validator(mut self, cart_validator: Arc<dyn CartValidator>) -> Self {
        self.cart_validator = Some(cart_validator);
        self
    }

    pub fn with_events(mut self, events: Arc<dyn CheckoutEvents>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn with_cart_store(mut self, cart_store: Arc<dyn CartStore>) -> Self {
        self.cart_store = Some(cart_store);
        self
    }

    pub fn with_order_placement(mut self, orders: Arc<dyn OrderPlacementService>) -> Self {
        self.orders = Some(orders);
        self
    }

    pub fn with_payment_service(mut self, payments: Arc<dyn PaymentService>) -> Self {
        self.payments = Some(payments);
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn with_order_config(mut self, order_config: OrderConfig) -> Self {
        self.order_config = order_config;
        self
    }

    pub fn with_cart_config(mut self, cart_config: CartConfig) -> Self {
        self.cart_config = cart_config;
        self
    }

    pub fn build(self) -> Result<CheckoutWorkflow, BuilderError> {
        fn missing(field: &str) -> BuilderError {
            BuilderError::MissingField {
                field: field.to_string(),
            }
        }

        let registry = self.registry.ok_or_else(|| missing("registry"))?;

        Ok(CheckoutWorkflow {
            navigation: NavigationResolver::new(Arc::clone(&registry)),
            registry,
            cart_validator: self.cart_validator.ok_or_else(|| missing("cart_validator"))?,
            events: self.events.ok_or_else(|| missing("events"))?,
            cart_store: self.cart_store.ok_or_else(|| missing("cart_store"))?,
            orders: self.orders.ok_or_else(|| missing("orders"))?,
            payments: self.payments.ok_or_else(|| missing("payments"))?,
            notifier: self.notifier.ok_or_else(|| missing("notifier"))?,
            order_config: self.order_config,
            cart_config: self.cart_config,
        })
    }
}

/// The checkout state machine. Stateless across requests: everything it
/// knows about one checkout lives in the cart, the session and the route
/// the request came in on.
pub struct CheckoutWorkflow {
    registry: Arc<StepRegistry>,
    navigation: NavigationResolver,
    cart_validator: Arc<dyn CartValidator>,
    events: Arc<dyn CheckoutEvents>,
    cart_store: Arc<dyn CartStore>,
    orders: Arc<dyn OrderPlacementService>,
    payments: Arc<dyn PaymentService>,
    notifier: Arc<dyn Notifier>,
    order_config: OrderConfig,
    cart_config: CartConfig,
}

impl CheckoutWorkflow {
    pub fn builder() -> CheckoutWorkflowBuilder {
        CheckoutWorkflowBuilder::new()
    }

    /// Checks whether checkout can run at all. An empty step registry is
    /// unrepresentable here: `StepRegistry::new` refuses to construct one,
    /// so that wiring defect aborts initialization instead of surfacing
    /// per request.
    fn preliminary(&self, ctx: &CheckoutContext<'_>) -> Option<CheckoutWorkflowResult> {
        if !self.order_config.anonymous_checkout_allowed && ctx.cart.customer.is_guest() {
            return Some(CheckoutWorkflowResult::redirect(NavTarget::Challenge));
        }

        if !ctx.cart.has_items() {
            return Some(CheckoutWorkflowResult::redirect(NavTarget::cart()));
        }

        None
    }

    /// Enter the checkout flow: reset stale checkout state, validate the
    /// cart, then advance to the first actionable page.
    pub async fn start(&self, ctx: &mut CheckoutContext<'_>) -> CheckoutWorkflowResult {
        if let Some(result) = self.preliminary(ctx) {
            return result;
        }

        info!(
            customer_id = ctx.cart.customer.id,
            store_id = ctx.cart.store_id,
            "starting checkout"
        );

        // Idempotent reset of any previous, unfinished checkout.
        ctx.cart.customer.reset_checkout_data();
        CheckoutSession::new(ctx.session).abandon();

        let mut warnings = Vec::new();
        if self
            .cart_validator
            .validate_cart(ctx.cart, &mut warnings, true)
            .await
        {
            if let Some(target) = self.events.cart_validating(ctx.cart, &mut warnings).await {
                return CheckoutWorkflowResult::redirect(target);
            }

            // Re-validate each line against current catalog and stock rules,
            // stopping at the first line that produced warnings.
            for item in &ctx.cart.items {
                if !warnings.is_empty() {
                    break;
                }

                self.cart_validator
                    .validate_cart_item(item, ctx.cart, &mut warnings)
                    .await;
            }
        }

        if let Err(err) = self.cart_store.save(ctx.cart).await {
            error!(error = %err, "failed to persist cart state");
        }

        if !warnings.is_empty() {
            // The displayed set is capped; the full set still decides failure.
            self.notify_warnings(&warnings);
            return CheckoutWorkflowResult::redirect(NavTarget::cart());
        }

        self.advance(ctx).await
    }

    /// Re-evaluate the step owning the current route. Decides whether its
    /// page renders, or must be skipped in the direction of travel.
    pub async fn process(&self, ctx: &mut CheckoutContext<'_>) -> CheckoutWorkflowResult {
        if let Some(result) = self.preliminary(ctx) {
            return result;
        }

        if let Some(handler) = self.registry.handler_for(&ctx.route) {
            let outcome = handler.process(ctx).await;
            if outcome.skip_page {
                // Nothing to decide on this page, e.g. a single shipping
                // method. Send the customer onwards in the direction they
                // were moving.
                let destination = outcome
                    .destination
                    .unwrap_or_else(|| self.navigation.adjacent(handler.as_ref(), ctx));
                return CheckoutWorkflowResult::redirect(destination);
            }

            // No redirect: opening the current checkout page is fine.
            return CheckoutWorkflowResult::with_errors(None, outcome.errors);
        }

        CheckoutWorkflowResult::stay()
    }

    /// Walk the step sequence to find the next actionable page.
    pub async fn advance(&self, ctx: &mut CheckoutContext<'_>) -> CheckoutWorkflowResult {
        if let Some(result) = self.preliminary(ctx) {
            return result;
        }

        if self.cart_config.quick_checkout_enabled {
            self.advance_quick(ctx).await
        } else {
            self.advance_stepwise(ctx).await
        }
    }

    /// Quick checkout: run every handler in flow order and open the page of
    /// the first one reporting unsuccessful.
    async fn advance_quick(&self, ctx: &mut CheckoutContext<'_>) -> CheckoutWorkflowResult {
        for handler in self.registry.handlers() {
            let outcome = handler.process(ctx).await;
            if !outcome.success {
                debug!(step = handler.label(), "quick checkout stopped");
                let destination = outcome
                    .destination
                    .unwrap_or_else(|| handler.page(ctx));
                return CheckoutWorkflowResult::with_errors(Some(destination), outcome.errors);
            }
        }

        // All handlers satisfied: the order can be confirmed.
        CheckoutWorkflowResult::redirect(NavTarget::route(RouteIdent::checkout_confirm()))
    }

    /// Stepwise checkout: one page per step.
    async fn advance_stepwise(&self, ctx: &mut CheckoutContext<'_>) -> CheckoutWorkflowResult {
        if ctx.route.is_checkout_entry() {
            // Entering the flow: show the first step's page, nothing to
            // process yet.
            return CheckoutWorkflowResult::redirect(self.registry.first().page(ctx));
        }

        if let Some(handler) = self.registry.handler_for(&ctx.route) {
            let outcome = handler.process(ctx).await;
            if !outcome.success {
                let destination = outcome
                    .destination
                    .unwrap_or_else(|| handler.page(ctx));
                return CheckoutWorkflowResult::with_errors(Some(destination), outcome.errors);
            }

            if self.registry.is_last(&handler) {
                return CheckoutWorkflowResult::redirect(NavTarget::route(
                    RouteIdent::checkout_confirm(),
                ));
            }

            if let Some(next) = self.navigation.next(handler.as_ref()) {
                return CheckoutWorkflowResult::redirect(next.page(ctx));
            }
        }

        // A destination cannot be determined.
        CheckoutWorkflowResult::stay()
    }

    /// Place the order and finalize payment. At most one placement attempt
    /// per invocation; checkout session data is guaranteed to be cleared
    /// once post-processing is reached.
    pub async fn complete(&self, ctx: &mut CheckoutContext<'_>) -> CheckoutWorkflowResult {
        if let Some(result) = self.preliminary(ctx) {
            return result;
        }

        let mut warnings = Vec::new();
        if let Some(target) = self.events.cart_validating(ctx.cart, &mut warnings).await {
            return CheckoutWorkflowResult::redirect(target);
        }

        if !warnings.is_empty() {
            self.notify_warnings(&warnings);
            return CheckoutWorkflowResult::redirect(NavTarget::cart());
        }

        // Prevent two orders from being placed within the configured
        // interval. The order is not even attempted on violation.
        if !self
            .orders
            .is_min_order_interval_elapsed(&ctx.cart.customer, ctx.cart.store_id)
            .await
        {
            self.notifier.warning(MIN_ORDER_INTERVAL_MESSAGE);
            return CheckoutWorkflowResult::redirect(NavTarget::route(
                RouteIdent::checkout_confirm(),
            ));
        }

        let session = CheckoutSession::new(ctx.session);
        let mut payment_request = session.payment_request().unwrap_or_default();
        payment_request.store_id = ctx.cart.store_id;
        payment_request.customer_id = ctx.cart.customer.id;
        payment_request.payment_method = ctx.cart.customer.selected_payment_method.clone();

        let extra_data: BTreeMap<String, String> = EXTRA_DATA_FIELDS
            .iter()
            .map(|&field| (field.to_string(), ctx.form_value(field)))
            .collect();

        let outcome = match self.orders.place_order(payment_request, extra_data).await {
            Ok(outcome) => outcome,
            Err(PlaceOrderError::Payment(err)) => return self.payment_failure(err),
            Err(PlaceOrderError::Unexpected(err)) => {
                error!(error = %err, "order placement failed unexpectedly");
                return CheckoutWorkflowResult::errors_only(vec![CheckoutMessage::new(
                    err.to_string(),
                )]);
            }
        };

        let success = outcome.success;
        let order = match (success, outcome.placed_order) {
            (true, Some(order)) => order,
            _ => {
                let errors = outcome
                    .errors
                    .iter()
                    .take(self.cart_config.max_displayed_warnings)
                    .map(|e| CheckoutMessage::new(text_to_html(e)))
                    .collect();
                return CheckoutWorkflowResult::errors_only(errors);
            }
        };

        info!(
            order_id = %order.id,
            order_number = %order.number,
            customer_id = order.customer_id,
            "order placed"
        );

        // Cached payment data is cleared and checkout state abandoned on
        // every exit path from here on.
        let post_outcome = {
            let _cleanup = SessionCleanup::new(ctx.session);

            match self.payments.post_process(&order).await {
                Ok(outcome) => Some(outcome),
                Err(PostPaymentError::Payment(err)) => return self.payment_failure(err),
                Err(PostPaymentError::Unexpected(err)) => {
                    // The order already exists; a failed capture is reported
                    // but nothing is rolled back.
                    error!(error = %err, order_id = %order.id, "payment post-processing failed");
                    self.notifier.error(&err.to_string());
                    None
                }
            }
        };

        if let Some(url) = post_outcome.and_then(|o| o.redirect_url) {
            return CheckoutWorkflowResult::redirect(NavTarget::Url(url));
        }

        CheckoutWorkflowResult::redirect(NavTarget::route(RouteIdent::checkout_completed()))
    }

    fn payment_failure(&self, err: PaymentError) -> CheckoutWorkflowResult {
        error!(error = %err, "payment failure during checkout completion");
        self.notifier.error(&err.message);

        let target = err
            .redirect
            .unwrap_or_else(|| NavTarget::route(RouteIdent::checkout_payment_method()));
        CheckoutWorkflowResult::redirect(target)
    }

    fn notify_warnings(&self, warnings: &[String]) {
        for warning in warnings
            .iter()
            .take(self.cart_config.max_displayed_warnings)
        {
            self.notifier.warning(warning);
        }
    }
}
