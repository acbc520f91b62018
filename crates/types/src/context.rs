use std::collections::HashMap;

use crate::{Cart, RouteIdent, SessionStore};

/// Everything one inbound request hands to the workflow: the cart (owned by
/// the caller), the identity of the requested page, the parsed referrer
/// route if any, the session handle and the posted form fields.
///
/// Constructed per request, discarded once the response is produced.
pub struct CheckoutContext<'a> {
    pub cart: &'a mut Cart,
    pub route: RouteIdent,

    /// Route identity parsed from the referrer header; `None` when absent
    /// or unparseable.
    pub referrer: Option<RouteIdent>,

    pub session: &'a dyn SessionStore,

    /// Raw form fields posted with the request.
    pub form: HashMap<String, String>,
}

impl<'a> CheckoutContext<'a> {
    pub fn new(cart: &'a mut Cart, route: RouteIdent, session: &'a dyn SessionStore) -> Self {
        Self {
            cart,
            route,
            referrer: None,
            session,
            form: HashMap::new(),
        }
    }

    pub fn with_referrer(mut self, referrer: Option<RouteIdent>) -> Self {
        self.referrer = referrer;
        self
    }

    pub fn with_form(mut self, form: HashMap<String, String>) -> Self {
        self.form = form;
        self
    }

    /// A posted form field, empty string when absent.
    pub fn form_value(&self, name: &str) -> String {
        self.form.get(name).cloned().unwrap_or_default()
    }
}
