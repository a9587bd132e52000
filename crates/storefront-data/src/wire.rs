//! JSON shapes exchanged with the backend.
//!
//! The backend speaks decimal amounts; the domain speaks minor units. The
//! conversion happens here and nowhere else.

use serde::{Deserialize, Serialize};
use storefront_commerce::cart::LineItem;
use storefront_commerce::checkout::Quote;
use storefront_commerce::ids::{PromotionId, SkuId};
use storefront_commerce::money::{Currency, Money};

/// One line of `GET /cart`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLineDto {
    pub sku_id: SkuId,
    pub quantity: i64,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bulk_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bulk_threshold: Option<i64>,
    #[serde(default, alias = "product_name")]
    pub name: String,
    #[serde(default)]
    pub promotion_ids: Vec<PromotionId>,
}

impl CartLineDto {
    pub fn into_line_item(self, currency: Currency) -> LineItem {
        let mut item = LineItem::new(
            self.sku_id,
            self.name,
            self.quantity,
            Money::from_decimal(self.price, currency),
        );
        item.bulk_price = self.bulk_price.map(|p| Money::from_decimal(p, currency));
        item.bulk_threshold = self.bulk_threshold;
        item.promotion_ids = self.promotion_ids;
        item
    }
}

/// A cart mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartUpdate {
    /// Set an absolute quantity; 0 removes the line.
    Quantity { sku_id: SkuId, quantity: i64 },
    /// Add to (or subtract from) the current quantity.
    Delta { sku_id: SkuId, delta: i64 },
}

impl CartUpdate {
    pub fn remove(sku_id: SkuId) -> Self {
        CartUpdate::Quantity {
            sku_id,
            quantity: 0,
        }
    }

    pub fn sku_id(&self) -> &SkuId {
        match self {
            CartUpdate::Quantity { sku_id, .. } | CartUpdate::Delta { sku_id, .. } => sku_id,
        }
    }
}

/// Body of `POST /cart`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CartUpdateBody<'a> {
    pub sku_id: &'a SkuId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta_quantity: Option<i64>,
}

impl<'a> From<&'a CartUpdate> for CartUpdateBody<'a> {
    fn from(update: &'a CartUpdate) -> Self {
        match update {
            CartUpdate::Quantity { sku_id, quantity } => Self {
                sku_id,
                quantity: Some(*quantity),
                delta_quantity: None,
            },
            CartUpdate::Delta { sku_id, delta } => Self {
                sku_id,
                quantity: None,
                delta_quantity: Some(*delta),
            },
        }
    }
}

/// Response of `POST /quote`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct QuoteDto {
    pub total: f64,
    pub product_cost: f64,
    pub ship_cost: f64,
}

impl QuoteDto {
    pub fn into_quote(self, currency: Currency) -> Quote {
        Quote {
            total: Money::from_decimal(self.total, currency),
            product_cost: Money::from_decimal(self.product_cost, currency),
            ship_cost: Money::from_decimal(self.ship_cost, currency),
        }
    }
}

/// Error body the backend sends alongside non-success statuses.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl ErrorBody {
    /// Pull a human-readable message out of an error response body.
    pub fn message_from(text: &str) -> Option<String> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        match serde_json::from_str::<ErrorBody>(trimmed) {
            Ok(body) => body
                .message
                .or(body.error)
                .or(body.detail)
                .filter(|m| !m.trim().is_empty()),
            Err(_) if !trimmed.starts_with('{') && trimmed.len() <= 200 => {
                Some(trimmed.to_string())
            }
            Err(_) => None,
        }
    }
}
