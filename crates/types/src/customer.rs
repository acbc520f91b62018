use serde::{Deserialize, Serialize};

/// A postal address on file for a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub street: String,
    pub city: String,
    pub zip: String,
    /// ISO 3166-1 alpha-2 country code
    pub country_code: String,
}

/// The customer owning the current cart and session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: u64,
    pub email: Option<String>,

    /// Whether the customer has a registered account (as opposed to a guest)
    pub registered: bool,

    /// Address book
    pub addresses: Vec<Address>,

    /// Billing address chosen for the current checkout
    pub billing_address: Option<Address>,

    /// Shipping address chosen for the current checkout
    pub shipping_address: Option<Address>,

    /// Shipping method chosen for the current checkout
    pub selected_shipping_method: Option<String>,

    /// Payment method chosen for the current checkout
    pub selected_payment_method: Option<String>,
}

impl Customer {
    /// Create a guest customer with an empty address book.
    pub fn guest(id: u64) -> Self {
        Self {
            id,
            email: None,
            registered: false,
            addresses: Vec::new(),
            billing_address: None,
            shipping_address: None,
            selected_shipping_method: None,
            selected_payment_method: None,
        }
    }

    /// Create a registered customer.
    pub fn registered(id: u64, email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            registered: true,
            ..Self::guest(id)
        }
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }

    pub fn is_guest(&self) -> bool {
        !self.registered
    }

    /// Clear all checkout selections made during a previous, unfinished
    /// checkout. Calling this on a fresh customer is a no-op.
    pub fn reset_checkout_data(&mut self) {
        self.billing_address = None;
        self.shipping_address = None;
        self.selected_shipping_method = None;
        self.selected_payment_method = None;
    }
}
