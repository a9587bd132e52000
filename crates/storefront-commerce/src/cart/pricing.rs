//! Line item pricing.

use crate::cart::LineItem;
use crate::error::CommerceError;
use crate::ids::SkuId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Unit price after the bulk tier, if it applies.
pub fn effective_price(item: &LineItem) -> Money {
    match item.bulk_price {
        Some(bulk) if item.bulk_applies() => bulk,
        _ => item.unit_price,
    }
}

/// `effective_price × quantity`.
pub fn line_total(item: &LineItem) -> Money {
    effective_price(item).saturating_mul(item.quantity)
}

/// Pricing breakdown for a single line item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItemPricing {
    pub sku_id: SkuId,
    pub quantity: i64,
    /// Regular unit price.
    pub unit_price: Money,
    /// Unit price actually charged.
    pub effective_price: Money,
    /// `unit_price × quantity`, the pre-discount reference figure.
    pub subtotal: Money,
    /// `(unit_price − effective_price) × quantity`.
    pub bulk_savings: Money,
    /// `effective_price × quantity`.
    pub total: Money,
}

impl LineItemPricing {
    /// Price a validated line item with checked arithmetic.
    pub fn for_item(item: &LineItem) -> Result<Self, CommerceError> {
        item.validate()?;

        let effective = effective_price(item);
        let subtotal = item.unit_price.checked_mul(item.quantity)?;
        let total = effective.checked_mul(item.quantity)?;
        let bulk_savings = subtotal.checked_sub(&total)?;

        Ok(Self {
            sku_id: item.sku_id.clone(),
            quantity: item.quantity,
            unit_price: item.unit_price,
            effective_price: effective,
            subtotal,
            bulk_savings,
            total,
        })
    }

    pub fn has_bulk_savings(&self) -> bool {
        self.bulk_savings.amount_cents > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn bulk_item(quantity: i64) -> LineItem {
        LineItem::new("sku-1", "Widget", quantity, Money::new(10, Currency::USD))
            .with_bulk_price(Money::new(8, Currency::USD), 5)
    }

    #[test]
    fn test_below_threshold_pays_unit_price() {
        let item = bulk_item(4);
        assert_eq!(effective_price(&item).amount_cents, 10);
        assert_eq!(line_total(&item).amount_cents, 40);
    }

    #[test]
    fn test_at_threshold_pays_bulk_price() {
        let item = bulk_item(5);
        assert_eq!(effective_price(&item).amount_cents, 8);
        assert_eq!(line_total(&item).amount_cents, 40);
    }

    #[test]
    fn test_threshold_without_price_is_ignored() {
        let mut item = LineItem::new("sku-1", "Widget", 50, Money::new(10, Currency::USD));
        item.bulk_threshold = Some(5);
        assert_eq!(effective_price(&item).amount_cents, 10);
    }

    #[test]
    fn test_pricing_breakdown() {
        let pricing = LineItemPricing::for_item(&bulk_item(6)).unwrap();
        assert_eq!(pricing.subtotal.amount_cents, 60);
        assert_eq!(pricing.total.amount_cents, 48);
        assert_eq!(pricing.bulk_savings.amount_cents, 12);
        assert!(pricing.has_bulk_savings());
    }

    #[test]
    fn test_pricing_rejects_malformed_item() {
        let item = LineItem::new("sku-1", "Widget", -2, Money::new(10, Currency::USD));
        assert!(LineItemPricing::for_item(&item).is_err());
    }
}
