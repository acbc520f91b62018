pub mod collaborators;
pub mod html;
pub mod navigation;
pub mod session;
pub mod workflow;


// Re-export main types
pub use collaborators::{
    CartStore, CartValidator, CheckoutEvents, Notifier, OrderPlacementService, PaymentError,
    PaymentService, PlaceOrderError, PostPaymentError,
};
pub use html::text_to_html;
pub use navigation::{Direction, NavigationResolver};
pub use session::{CheckoutSession, SessionCleanup, CHECKOUT_STATE_KEY, ORDER_PAYMENT_INFO_KEY};
pub use workflow::{BuilderError, CheckoutWorkflow, CheckoutWorkflowBuilder};
