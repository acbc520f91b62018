use serde::{Deserialize, Serialize};

/// Controller name of the checkout pages.
pub const CHECKOUT_CONTROLLER: &str = "Checkout";

/// Entry page action of the checkout flow.
pub const CHECKOUT_ENTRY_ACTION: &str = "Index";

/// Confirmation page action (last page before the order is placed).
pub const CHECKOUT_CONFIRM_ACTION: &str = "Confirm";

/// Action of the page shown once the order has been placed.
pub const CHECKOUT_COMPLETED_ACTION: &str = "Completed";

/// Action of the payment method selection page.
pub const CHECKOUT_PAYMENT_METHOD_ACTION: &str = "PaymentMethod";

/// Controller/action of the shopping cart page.
pub const CART_CONTROLLER: &str = "Cart";
pub const CART_ACTION: &str = "Index";

/// Identity of a request route (controller/action pair). Comparisons are
/// case-insensitive, matching how routing treats path segments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteIdent {
    pub controller: String,
    pub action: String,
}

impl RouteIdent {
    pub fn new(controller: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            controller: controller.into(),
            action: action.into(),
        }
    }

    /// A route within the checkout controller.
    pub fn checkout(action: impl Into<String>) -> Self {
        Self::new(CHECKOUT_CONTROLLER, action)
    }

    /// The checkout entry page.
    pub fn checkout_entry() -> Self {
        Self::checkout(CHECKOUT_ENTRY_ACTION)
    }

    /// The order confirmation page.
    pub fn checkout_confirm() -> Self {
        Self::checkout(CHECKOUT_CONFIRM_ACTION)
    }

    /// The order completed page.
    pub fn checkout_completed() -> Self {
        Self::checkout(CHECKOUT_COMPLETED_ACTION)
    }

    /// The payment method selection page.
    pub fn checkout_payment_method() -> Self {
        Self::checkout(CHECKOUT_PAYMENT_METHOD_ACTION)
    }

    /// The shopping cart page.
    pub fn cart() -> Self {
        Self::new(CART_CONTROLLER, CART_ACTION)
    }

    pub fn matches(&self, controller: &str, action: &str) -> bool {
        self.controller.eq_ignore_ascii_case(controller) && self.action.eq_ignore_ascii_case(action)
    }

    pub fn is_checkout_entry(&self) -> bool {
        self.matches(CHECKOUT_CONTROLLER, CHECKOUT_ENTRY_ACTION)
    }

    pub fn is_checkout_confirm(&self) -> bool {
        self.matches(CHECKOUT_CONTROLLER, CHECKOUT_CONFIRM_ACTION)
    }

    /// Parse a URL path of the shape `/{controller}/{action}/{id?}` into a
    /// route identity. Query strings are ignored. Returns `None` for paths
    /// that do not fit the shape; callers treat that as an unknown route.
    pub fn parse_path(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            [controller, action] | [controller, action, _] => {
                Some(Self::new(*controller, *action))
            }
            _ => None,
        }
    }
}

impl PartialEq for RouteIdent {
    fn eq(&self, other: &Self) -> bool {
        self.matches(&other.controller, &other.action)
    }
}

impl Eq for RouteIdent {}

impl std::fmt::Display for RouteIdent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.controller, self.action)
    }
}
