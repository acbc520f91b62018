//! Step-sequencing checkout workflow for an online storefront.
//!
//! Given a customer's shopping cart, the workflow drives a series of
//! pluggable steps (address, shipping method, payment method) towards a
//! completed order and answers one question after every request: which page
//! should the customer see next?

pub use storefront_checkout_config as config;
pub use storefront_checkout_steps as steps;
pub use storefront_checkout_types as types;
pub use storefront_checkout_workflow as workflow;

pub use storefront_checkout_steps::{CheckoutStepHandler, StepRegistry};
pub use storefront_checkout_types::{
    Cart, CheckoutContext, CheckoutWorkflowResult, NavTarget, RouteIdent,
};
pub use storefront_checkout_workflow::CheckoutWorkflow;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Tracing error types
#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("tracing initialization error: {0}")]
    InitError(String),
}

/// Initialize tracing for a process hosting the checkout workflow. Honors
/// `RUST_LOG`; defaults to info with debug output for the checkout crates.
pub fn init_tracing() -> Result<(), TracingError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storefront_checkout=debug"));

    let fmt_layer = fmt::layer().with_target(true).with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| TracingError::InitError(e.to_string()))?;

    Ok(())
}
