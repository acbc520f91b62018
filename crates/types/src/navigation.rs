use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::RouteIdent;

/// The destination the workflow instructs the calling web layer to show
/// next. The caller turns this into an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavTarget {
    /// An internal page identified by its route, with optional parameters.
    Route {
        route: RouteIdent,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        params: BTreeMap<String, String>,
    },

    /// An external URL, e.g. a payment provider redirect.
    Url(String),

    /// An authentication challenge (sign in before checking out).
    Challenge,
}

impl NavTarget {
    pub fn route(route: RouteIdent) -> Self {
        Self::Route {
            route,
            params: BTreeMap::new(),
        }
    }

    pub fn route_with_params(route: RouteIdent, params: BTreeMap<String, String>) -> Self {
        Self::Route { route, params }
    }

    /// The shopping cart page.
    pub fn cart() -> Self {
        Self::route(RouteIdent::cart())
    }

    /// A checkout page by action name.
    pub fn checkout(action: impl Into<String>) -> Self {
        Self::route(RouteIdent::checkout(action))
    }

    /// True if the target is the given route.
    pub fn is_route(&self, other: &RouteIdent) -> bool {
        matches!(self, Self::Route { route, .. } if route == other)
    }
}
