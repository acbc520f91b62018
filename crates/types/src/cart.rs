use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::Customer;

/// A single line in the shopping cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: u64,
    pub sku: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,

    /// Whether this item needs physical delivery
    pub requires_shipping: bool,

    /// Stock state at the time the cart was loaded
    pub in_stock: bool,
}

impl CartItem {
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// The shopping cart a checkout operates on. Owned by the caller for the
/// duration of one request; the workflow only ever borrows it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    pub store_id: u64,
    pub customer: Customer,
    pub items: Vec<CartItem>,
}

impl Cart {
    pub fn new(store_id: u64, customer: Customer) -> Self {
        Self {
            store_id,
            customer,
            items: Vec::new(),
        }
    }

    pub fn has_items(&self) -> bool {
        !self.items.is_empty()
    }

    /// True if any line needs physical delivery.
    pub fn requires_shipping(&self) -> bool {
        self.items.iter().any(|i| i.requires_shipping)
    }

    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(CartItem::subtotal).sum()
    }
}
