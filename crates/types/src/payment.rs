use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The payment data assembled while the customer walks through checkout.
/// Cached in the session between payment method selection and order
/// placement, then merged with store and customer identity on completion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub store_id: u64,
    pub customer_id: u64,

    /// System name of the selected payment method
    pub payment_method: Option<String>,

    /// Provider-specific data captured on the payment page (masked card
    /// reference, wallet token, ...)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub session_data: BTreeMap<String, String>,
}
