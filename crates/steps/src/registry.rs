use std::sync::Arc;

use thiserror::Error;
use tracing::warn;

use storefront_checkout_types::RouteIdent;

use crate::CheckoutStepHandler;

/// Registry errors
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A flow with zero steps cannot terminate; this is a wiring defect and
    /// aborts initialization.
    #[error("no checkout step handlers registered")]
    NoHandlers,
}

/// The ordered set of checkout steps. Built once at startup, sorted by
/// ascending handler order, read-only afterwards.
pub struct StepRegistry {
    handlers: Vec<Arc<dyn CheckoutStepHandler>>,
}

impl StepRegistry {
    pub fn new(mut handlers: Vec<Arc<dyn CheckoutStepHandler>>) -> Result<Self, RegistryError> {
        if handlers.is_empty() {
            return Err(RegistryError::NoHandlers);
        }

        // sort_by_key is stable: handlers with equal order keep their
        // registration order.
        handlers.sort_by_key(|h| h.order());

        Ok(Self { handlers })
    }

    pub fn handlers(&self) -> &[Arc<dyn CheckoutStepHandler>] {
        &self.handlers
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        // Never true past construction
        self.handlers.is_empty()
    }

    pub fn first(&self) -> &Arc<dyn CheckoutStepHandler> {
        &self.handlers[0]
    }

    pub fn last(&self) -> &Arc<dyn CheckoutStepHandler> {
        &self.handlers[self.handlers.len() - 1]
    }

    pub fn is_last(&self, handler: &Arc<dyn CheckoutStepHandler>) -> bool {
        Arc::ptr_eq(self.last(), handler)
    }

    /// The handler owning the given route. At most one handler should match;
    /// when more than one erroneously does, the first (by flow order) wins
    /// and the collision is logged.
    pub fn handler_for(&self, route: &RouteIdent) -> Option<Arc<dyn CheckoutStepHandler>> {
        let mut matching = self.handlers.iter().filter(|h| h.is_handler_for(route));
        let first = matching.next()?;

        if let Some(second) = matching.next() {
            warn!(
                route = %route,
                first = first.label(),
                second = second.label(),
                "multiple step handlers match route, using the first"
            );
        }

        Some(Arc::clone(first))
    }
}
