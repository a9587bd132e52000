//! Cart line items.

use crate::error::CommerceError;
use crate::ids::{PromotionId, SkuId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// A line in the cart: one purchasable variant and its quantity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Variant being purchased.
    pub sku_id: SkuId,
    /// Product name (denormalized for display).
    #[serde(default)]
    pub product_name: String,
    /// Quantity, always at least 1 once in a cart.
    pub quantity: i64,
    /// Regular unit price.
    pub unit_price: Money,
    /// Discounted unit price unlocked at `bulk_threshold`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bulk_price: Option<Money>,
    /// Minimum quantity for `bulk_price`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bulk_threshold: Option<i64>,
    /// Vendor promotions forwarded to the quote endpoint.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub promotion_ids: Vec<PromotionId>,
    /// UI selection flag. Never persisted.
    #[serde(skip)]
    pub selected: bool,
}

impl LineItem {
    /// Create a new line item without bulk pricing.
    pub fn new(
        sku_id: impl Into<SkuId>,
        product_name: impl Into<String>,
        quantity: i64,
        unit_price: Money,
    ) -> Self {
        Self {
            sku_id: sku_id.into(),
            product_name: product_name.into(),
            quantity,
            unit_price,
            bulk_price: None,
            bulk_threshold: None,
            promotion_ids: Vec::new(),
            selected: false,
        }
    }

    /// Attach a bulk price tier.
    pub fn with_bulk_price(mut self, price: Money, threshold: i64) -> Self {
        self.bulk_price = Some(price);
        self.bulk_threshold = Some(threshold);
        self
    }

    /// Attach vendor promotions.
    pub fn with_promotions(mut self, ids: impl IntoIterator<Item = PromotionId>) -> Self {
        self.promotion_ids.extend(ids);
        self
    }

    /// Whether the bulk tier applies at the current quantity.
    pub fn bulk_applies(&self) -> bool {
        matches!(
            (self.bulk_price, self.bulk_threshold),
            (Some(_), Some(threshold)) if self.quantity >= threshold
        )
    }

    /// Check the data contract pricing relies on.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.quantity <= 0 {
            return Err(CommerceError::InvalidQuantity {
                sku_id: self.sku_id.to_string(),
                quantity: self.quantity,
            });
        }
        if self.quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                self.quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }
        if self.unit_price.is_negative() {
            return Err(CommerceError::NegativePrice(self.sku_id.to_string()));
        }
        if let Some(bulk) = self.bulk_price {
            if bulk.currency != self.unit_price.currency {
                return Err(CommerceError::CurrencyMismatch {
                    expected: self.unit_price.currency.code().to_string(),
                    got: bulk.currency.code().to_string(),
                });
            }
            if bulk.is_negative() {
                return Err(CommerceError::NegativePrice(self.sku_id.to_string()));
            }
            if bulk.amount_cents > self.unit_price.amount_cents {
                return Err(CommerceError::BulkPriceAboveUnitPrice(
                    self.sku_id.to_string(),
                ));
            }
        }
        Ok(())
    }
}
