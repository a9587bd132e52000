//! Order placement payloads.

use crate::ids::{OrderId, PaymentOptionId, ShipmentOptionId, SkuId};
use serde::{Deserialize, Serialize};

/// Body of an order-placement call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub address: String,
    pub payment_option: PaymentOptionId,
    pub items: Vec<OrderLine>,
    /// Order placed straight from a product page, bypassing the cart.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub buy_now: bool,
}

/// One ordered line with its own shipment option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub sku_id: SkuId,
    pub quantity: i64,
    pub shipment_option: ShipmentOptionId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Backend acknowledgement of a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub id: OrderId,
    /// External redirect target, e.g. a payment gateway.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Where the storefront goes after a successful order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextStep {
    /// Leave the storefront for the given URL.
    Redirect(String),
    /// Show the order confirmation view.
    Confirmation(OrderId),
}

impl OrderConfirmation {
    pub fn next_step(&self) -> NextStep {
        match self.url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => NextStep::Redirect(url.to_string()),
            _ => NextStep::Confirmation(self.id.clone()),
        }
    }
}
