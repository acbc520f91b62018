//! End-to-end checkout flows driving the real built-in steps through the
//! orchestrator.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use storefront_checkout::config::{CartConfig, OrderConfig};
use storefront_checkout::steps::{
    AddressStep, CheckoutStepHandler, PaymentMethodStep, PaymentOption, PaymentOptionsProvider,
    ProviderError, ShippingMethodStep, ShippingOption, ShippingOptionsProvider, StepRegistry,
};
use storefront_checkout::types::{
    Address, Cart, CartItem, CheckoutContext, Customer, MemorySessionStore, NavTarget,
    OrderPlacementOutcome, PaymentRequest, PlacedOrder, PostPaymentOutcome, RouteIdent,
    SessionStore,
};
use storefront_checkout::workflow::{
    CartStore, CartValidator, CheckoutEvents, CheckoutWorkflow, Notifier, OrderPlacementService,
    PaymentService, PlaceOrderError, PostPaymentError, CHECKOUT_STATE_KEY, ORDER_PAYMENT_INFO_KEY,
};

// ═══════════════════════════════════════════════════════════════════════════
// COLLABORATOR IMPLEMENTATIONS FOR TESTING
// ═══════════════════════════════════════════════════════════════════════════

struct PassingValidator;

#[async_trait]
impl CartValidator for PassingValidator {
    async fn validate_cart(
        &self,
        _cart: &Cart,
        _warnings: &mut Vec<String>,
        _validate_checkout_attributes: bool,
    ) -> bool {
        true
    }

    async fn validate_cart_item(
        &self,
        item: &CartItem,
        _cart: &Cart,
        warnings: &mut Vec<String>,
    ) -> bool {
        if item.in_stock {
            true
        } else {
            warnings.push(format!("{} is out of stock", item.name));
            false
        }
    }
}

struct NoopEvents;

#[async_trait]
impl CheckoutEvents for NoopEvents {
    async fn cart_validating(
        &self,
        _cart: &Cart,
        _warnings: &mut Vec<String>,
    ) -> Option<NavTarget> {
        None
    }
}

struct NoopCartStore;

#[async_trait]
impl CartStore for NoopCartStore {
    async fn save(&self, _cart: &Cart) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Places orders in memory and counts them.
#[derive(Default)]
struct InMemoryOrders {
    placed: AtomicUsize,
}

#[async_trait]
impl OrderPlacementService for InMemoryOrders {
    async fn is_min_order_interval_elapsed(&self, _customer: &Customer, _store_id: u64) -> bool {
        true
    }

    async fn place_order(
        &self,
        request: PaymentRequest,
        _extra_data: BTreeMap<String, String>,
    ) -> Result<OrderPlacementOutcome, PlaceOrderError> {
        self.placed.fetch_add(1, Ordering::SeqCst);
        Ok(OrderPlacementOutcome::placed(PlacedOrder {
            id: uuid::Uuid::new_v4(),
            number: format!("100{}", self.placed.load(Ordering::SeqCst)),
            store_id: request.store_id,
            customer_id: request.customer_id,
            total: "24.98".parse().unwrap(),
            placed_at: chrono::Utc::now(),
        }))
    }
}

struct NoopPayments;

#[async_trait]
impl PaymentService for NoopPayments {
    async fn post_process(
        &self,
        _order: &PlacedOrder,
    ) -> Result<PostPaymentOutcome, PostPaymentError> {
        Ok(PostPaymentOutcome::default())
    }
}

#[derive(Default)]
struct CollectingNotifier {
    messages: Mutex<Vec<String>>,
}

impl Notifier for CollectingNotifier {
    fn warning(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

struct FixedShipping(Vec<ShippingOption>);

#[async_trait]
impl ShippingOptionsProvider for FixedShipping {
    async fn options(&self, _cart: &Cart) -> Result<Vec<ShippingOption>, ProviderError> {
        Ok(self.0.clone())
    }
}

struct FixedPayments(Vec<PaymentOption>);

#[async_trait]
impl PaymentOptionsProvider for FixedPayments {
    async fn options(&self, _cart: &Cart) -> Result<Vec<PaymentOption>, ProviderError> {
        Ok(self.0.clone())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// SETUP
// ═══════════════════════════════════════════════════════════════════════════

fn shipping_option(id: &str) -> ShippingOption {
    ShippingOption {
        id: id.to_string(),
        label: id.to_string(),
        cost: "4.95".parse().unwrap(),
    }
}

fn payment_option(id: &str) -> PaymentOption {
    PaymentOption {
        id: id.to_string(),
        label: id.to_string(),
    }
}

fn build_workflow(
    shipping: Vec<ShippingOption>,
    payments: Vec<PaymentOption>,
    quick_checkout: bool,
    anonymous_allowed: bool,
) -> (CheckoutWorkflow, Arc<InMemoryOrders>) {
    let handlers: Vec<Arc<dyn CheckoutStepHandler>> = vec![
        Arc::new(AddressStep::new()),
        Arc::new(ShippingMethodStep::new(Arc::new(FixedShipping(shipping)))),
        Arc::new(PaymentMethodStep::new(Arc::new(FixedPayments(payments)))),
    ];
    let registry = Arc::new(StepRegistry::new(handlers).unwrap());
    let orders = Arc::new(InMemoryOrders::default());

    let workflow = CheckoutWorkflow::builder()
        .with_registry(registry)
        .with_cart_validator(Arc::new(PassingValidator))
        .with_events(Arc::new(NoopEvents))
        .with_cart_store(Arc::new(NoopCartStore))
        .with_order_placement(orders.clone())
        .with_payment_service(Arc::new(NoopPayments))
        .with_notifier(Arc::new(CollectingNotifier::default()))
        .with_order_config(OrderConfig {
            anonymous_checkout_allowed: anonymous_allowed,
            min_order_placement_interval_secs: 30,
        })
        .with_cart_config(CartConfig {
            quick_checkout_enabled: quick_checkout,
            max_displayed_warnings: 3,
        })
        .build()
        .unwrap();

    (workflow, orders)
}

fn make_address(id: u64) -> Address {
    Address {
        id,
        first_name: "Jo".to_string(),
        last_name: "Doe".to_string(),
        street: "1 Main St".to_string(),
        city: "Springfield".to_string(),
        zip: "12345".to_string(),
        country_code: "US".to_string(),
    }
}

fn make_cart(customer: Customer) -> Cart {
    let mut cart = Cart::new(1, customer);
    cart.items.push(CartItem {
        product_id: 1,
        sku: "SKU-1".to_string(),
        name: "Widget".to_string(),
        quantity: 2,
        unit_price: "12.49".parse().unwrap(),
        requires_shipping: true,
        in_stock: true,
    });
    cart
}

// ═══════════════════════════════════════════════════════════════════════════
// SCENARIOS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_unauthenticated_customer_is_challenged() {
    let (workflow, orders) = build_workflow(
        vec![shipping_option("ground")],
        vec![payment_option("card")],
        false,
        false,
    );
    let session = MemorySessionStore::new();
    let mut cart = make_cart(Customer::guest(5));

    let mut ctx = CheckoutContext::new(&mut cart, RouteIdent::checkout_entry(), &session);
    let result = workflow.start(&mut ctx).await;

    assert_eq!(result.navigate_to, Some(NavTarget::Challenge));
    assert_eq!(orders.placed.load(Ordering::SeqCst), 0);
    assert_eq!(cart.items.len(), 1, "cart must not be mutated");
}

#[tokio::test]
async fn test_empty_cart_goes_back_to_cart_page() {
    let (workflow, _) = build_workflow(
        vec![shipping_option("ground")],
        vec![payment_option("card")],
        false,
        true,
    );
    let session = MemorySessionStore::new();
    let mut cart = Cart::new(1, Customer::registered(7, "jo@example.com"));

    let mut ctx = CheckoutContext::new(&mut cart, RouteIdent::checkout_entry(), &session);
    let result = workflow.start(&mut ctx).await;

    assert!(result.navigate_to.unwrap().is_route(&RouteIdent::cart()));
}

#[tokio::test]
async fn test_quick_checkout_single_options_reach_confirm() {
    // One saved address, one shipping method, one payment method: every
    // step can decide on its own and the flow lands on the confirm page.
    let (workflow, _) = build_workflow(
        vec![shipping_option("ground")],
        vec![payment_option("invoice")],
        true,
        true,
    );
    let session = MemorySessionStore::new();
    let mut customer = Customer::registered(7, "jo@example.com");
    customer.addresses.push(make_address(1));
    let mut cart = make_cart(customer);

    let mut ctx = CheckoutContext::new(&mut cart, RouteIdent::checkout_entry(), &session);
    let result = workflow.start(&mut ctx).await;

    assert!(result
        .navigate_to
        .unwrap()
        .is_route(&RouteIdent::checkout_confirm()));
    assert!(cart.customer.billing_address.is_some());
    assert_eq!(
        cart.customer.selected_shipping_method.as_deref(),
        Some("ground")
    );
    assert_eq!(
        cart.customer.selected_payment_method.as_deref(),
        Some("invoice")
    );
}

#[tokio::test]
async fn test_quick_checkout_stops_at_undecidable_step() {
    // Two payment methods and no selection: quick checkout must stop at the
    // payment page.
    let (workflow, _) = build_workflow(
        vec![shipping_option("ground")],
        vec![payment_option("card"), payment_option("invoice")],
        true,
        true,
    );
    let session = MemorySessionStore::new();
    let mut customer = Customer::registered(7, "jo@example.com");
    customer.addresses.push(make_address(1));
    let mut cart = make_cart(customer);

    let mut ctx = CheckoutContext::new(&mut cart, RouteIdent::checkout_entry(), &session);
    let result = workflow.start(&mut ctx).await;

    assert!(result
        .navigate_to
        .unwrap()
        .is_route(&RouteIdent::checkout("PaymentMethod")));
}

#[tokio::test]
async fn test_stepwise_entry_shows_first_step_page() {
    let (workflow, _) = build_workflow(
        vec![shipping_option("ground")],
        vec![payment_option("card")],
        false,
        true,
    );
    let session = MemorySessionStore::new();
    let mut cart = make_cart(Customer::registered(7, "jo@example.com"));

    let mut ctx = CheckoutContext::new(&mut cart, RouteIdent::checkout_entry(), &session);
    let result = workflow.advance(&mut ctx).await;

    assert!(result
        .navigate_to
        .unwrap()
        .is_route(&RouteIdent::checkout("Address")));
    // Nothing was processed on the entry request
    assert!(cart.customer.billing_address.is_none());
}

#[tokio::test]
async fn test_stepwise_walk_to_completed_order() {
    let (workflow, orders) = build_workflow(
        vec![shipping_option("ground"), shipping_option("express")],
        vec![payment_option("card"), payment_option("invoice")],
        false,
        true,
    );
    let session = MemorySessionStore::new();
    session.set(CHECKOUT_STATE_KEY, serde_json::json!({"entered": true}));

    let mut customer = Customer::registered(7, "jo@example.com");
    customer.addresses.push(make_address(1));
    customer.addresses.push(make_address(2));
    let mut cart = make_cart(customer);

    // Address page: the customer picks addresses, then the flow advances.
    cart.customer.billing_address = Some(make_address(2));
    cart.customer.shipping_address = Some(make_address(2));
    let mut ctx = CheckoutContext::new(&mut cart, RouteIdent::checkout("Address"), &session);
    let result = workflow.advance(&mut ctx).await;
    assert!(result
        .navigate_to
        .unwrap()
        .is_route(&RouteIdent::checkout("ShippingMethod")));

    // Shipping page: pick a method.
    cart.customer.selected_shipping_method = Some("express".to_string());
    let mut ctx =
        CheckoutContext::new(&mut cart, RouteIdent::checkout("ShippingMethod"), &session);
    let result = workflow.advance(&mut ctx).await;
    assert!(result
        .navigate_to
        .unwrap()
        .is_route(&RouteIdent::checkout("PaymentMethod")));

    // Payment page: pick a method; last step leads to confirm.
    cart.customer.selected_payment_method = Some("card".to_string());
    let mut ctx =
        CheckoutContext::new(&mut cart, RouteIdent::checkout("PaymentMethod"), &session);
    let result = workflow.advance(&mut ctx).await;
    assert!(result
        .navigate_to
        .unwrap()
        .is_route(&RouteIdent::checkout_confirm()));

    // Confirm page: place the order.
    let mut ctx = CheckoutContext::new(&mut cart, RouteIdent::checkout_confirm(), &session);
    let result = workflow.complete(&mut ctx).await;
    assert!(result
        .navigate_to
        .unwrap()
        .is_route(&RouteIdent::checkout_completed()));
    assert_eq!(orders.placed.load(Ordering::SeqCst), 1);

    // Checkout session data is gone once the order exists.
    assert!(session.get(ORDER_PAYMENT_INFO_KEY).is_none());
    assert!(session.get(CHECKOUT_STATE_KEY).is_none());
}

#[tokio::test]
async fn test_skipped_shipping_page_redirects_forward() {
    // A single shipping method: opening the shipping page redirects onwards
    // to the payment page.
    let (workflow, _) = build_workflow(
        vec![shipping_option("ground")],
        vec![payment_option("card"), payment_option("invoice")],
        false,
        true,
    );
    let session = MemorySessionStore::new();
    let mut customer = Customer::registered(7, "jo@example.com");
    customer.billing_address = Some(make_address(1));
    customer.shipping_address = Some(make_address(1));
    let mut cart = make_cart(customer);

    let mut ctx =
        CheckoutContext::new(&mut cart, RouteIdent::checkout("ShippingMethod"), &session)
            .with_referrer(RouteIdent::parse_path("/Checkout/Address"));
    let result = workflow.process(&mut ctx).await;

    assert!(result
        .navigate_to
        .unwrap()
        .is_route(&RouteIdent::checkout("PaymentMethod")));
    assert_eq!(
        cart.customer.selected_shipping_method.as_deref(),
        Some("ground")
    );
}
