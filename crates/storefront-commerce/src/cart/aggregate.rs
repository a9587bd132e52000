//! Cart aggregation.
//!
//! Folds line items, or a selected subset of them, into the figures the cart
//! and checkout views display:
//!
//! ```text
//! subtotal        = Σ unit_price × quantity
//! bulk_savings    = Σ (unit_price − bulk_price) × quantity   (items at threshold)
//! coupon_discount = coupon applied to (subtotal − bulk_savings)
//! total           = subtotal − bulk_savings − coupon_discount + shipping_cost
//! ```
//!
//! The total is not clamped at zero.

use std::collections::HashSet;

use crate::cart::{AppliedCoupon, Coupon, LineItem, LineItemPricing};
use crate::checkout::ShipmentOption;
use crate::error::CommerceError;
use crate::ids::SkuId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Outcome of aggregating a cart.
///
/// `Empty` and `NothingSelected` are distinct from a priced cart whose total
/// happens to be zero, and from each other.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CartTotals {
    /// The cart has no items.
    Empty,
    /// Selection mode is active but no item is selected.
    NothingSelected,
    /// Priced items.
    Priced(CartAggregate),
}

impl CartTotals {
    pub fn priced(&self) -> Option<&CartAggregate> {
        match self {
            CartTotals::Priced(aggregate) => Some(aggregate),
            _ => None,
        }
    }

    pub fn into_priced(self) -> Option<CartAggregate> {
        match self {
            CartTotals::Priced(aggregate) => Some(aggregate),
            _ => None,
        }
    }
}

/// Pricing figures for the items under consideration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartAggregate {
    /// Per-line breakdown, in cart order.
    pub lines: Vec<LineItemPricing>,
    /// Pre-discount reference figure.
    pub subtotal: Money,
    pub bulk_savings: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupon: Option<AppliedCoupon>,
    pub coupon_discount: Money,
    /// Client-side estimate until a quote supersedes it.
    pub shipping_cost: Money,
    pub total: Money,
}

impl CartAggregate {
    pub fn currency(&self) -> Currency {
        self.subtotal.currency
    }

    /// Item total after bulk pricing, before coupon and shipping.
    pub fn items_total(&self) -> Money {
        Money::new(
            self.subtotal.amount_cents - self.bulk_savings.amount_cents,
            self.subtotal.currency,
        )
    }

    /// Sum of quantities.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn savings(&self) -> Money {
        Money::new(
            self.bulk_savings.amount_cents + self.coupon_discount.amount_cents,
            self.subtotal.currency,
        )
    }
}

/// Cart aggregation with an optional coupon and shipping option.
#[derive(Debug, Clone, Copy, Default)]
pub struct Aggregator<'a> {
    coupon: Option<&'a Coupon>,
    shipping: Option<&'a ShipmentOption>,
}

impl<'a> Aggregator<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a coupon to the post-bulk total.
    pub fn with_coupon(mut self, coupon: Option<&'a Coupon>) -> Self {
        self.coupon = coupon;
        self
    }

    /// Estimate shipping with the given option.
    pub fn with_shipping(mut self, shipping: Option<&'a ShipmentOption>) -> Self {
        self.shipping = shipping;
        self
    }

    /// Aggregate `items`, restricted to `selection` when one is given.
    ///
    /// Any malformed item fails the whole aggregation.
    pub fn aggregate(
        &self,
        items: &[LineItem],
        selection: Option<&[SkuId]>,
    ) -> Result<CartTotals, CommerceError> {
        if items.is_empty() {
            return Ok(CartTotals::Empty);
        }

        let considered: Vec<&LineItem> = match selection {
            None => items.iter().collect(),
            Some(selected) => {
                let wanted: HashSet<&SkuId> = selected.iter().collect();
                items.iter().filter(|i| wanted.contains(&i.sku_id)).collect()
            }
        };

        if considered.is_empty() {
            return Ok(CartTotals::NothingSelected);
        }

        let lines = considered
            .iter()
            .map(|item| LineItemPricing::for_item(item))
            .collect::<Result<Vec<_>, _>>()?;

        let currency = lines
            .first()
            .map(|l| l.unit_price.currency)
            .unwrap_or_default();

        let subtotal = Money::try_sum(lines.iter().map(|l| &l.subtotal), currency)?;
        let bulk_savings = Money::try_sum(lines.iter().map(|l| &l.bulk_savings), currency)?;
        let items_total = subtotal.checked_sub(&bulk_savings)?;

        let coupon = self
            .coupon
            .map(|c| AppliedCoupon::from_coupon(c, c.discount_on(&items_total)));
        let coupon_discount = coupon
            .as_ref()
            .map(|c| c.amount)
            .unwrap_or_else(|| Money::zero(currency));

        let after_coupon = items_total.checked_sub(&coupon_discount)?;
        let shipping_cost = match self.shipping {
            Some(option) => option.estimate(&after_coupon),
            None => Money::zero(currency),
        };
        let total = after_coupon.checked_add(&shipping_cost)?;

        Ok(CartTotals::Priced(CartAggregate {
            lines,
            subtotal,
            bulk_savings,
            coupon,
            coupon_discount,
            shipping_cost,
            total,
        }))
    }
}

/// Aggregate without coupon or shipping.
pub fn aggregate(
    items: &[LineItem],
    selection: Option<&[SkuId]>,
) -> Result<CartTotals, CommerceError> {
    Aggregator::new().aggregate(items, selection)
}
