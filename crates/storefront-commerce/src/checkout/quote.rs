//! Shipping quote inputs and results.

use crate::checkout::Address;
use crate::cart::LineItem;
use crate::ids::{PromotionId, ShipmentOptionId, SkuId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Everything a quote depends on, as last entered by the customer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteInputs {
    pub address: Option<Address>,
    pub items: Vec<LineItem>,
    pub shipment_option: Option<ShipmentOptionId>,
}

impl QuoteInputs {
    /// Build the request these inputs call for, or `None` when a
    /// precondition is missing: blank address, no items, or no shipment
    /// option.
    pub fn to_request(&self) -> Option<QuoteRequest> {
        let address = self.address.as_ref().filter(|a| !a.is_blank())?;
        let shipment_option = self.shipment_option.as_ref()?;
        if self.items.is_empty() {
            return None;
        }

        Some(QuoteRequest {
            address: address.one_line(),
            items: self
                .items
                .iter()
                .map(|item| QuoteLine {
                    sku_id: item.sku_id.clone(),
                    quantity: item.quantity,
                    shipment_option: shipment_option.clone(),
                    promotion_ids: item.promotion_ids.clone(),
                })
                .collect(),
        })
    }
}

/// Body of a quote lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub address: String,
    pub items: Vec<QuoteLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteLine {
    pub sku_id: SkuId,
    pub quantity: i64,
    pub shipment_option: ShipmentOptionId,
    pub promotion_ids: Vec<PromotionId>,
}

/// Authoritative figures from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub total: Money,
    pub product_cost: Money,
    pub ship_cost: Money,
}
