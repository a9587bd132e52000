//! Reconciling the client estimate with a backend quote.

use crate::cart::CartAggregate;
use crate::checkout::Quote;
use crate::error::CommerceError;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Where the displayed figures came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TotalsSource {
    /// Computed locally from cart prices and the flat shipping fee.
    Estimate,
    /// Backed by an authoritative quote.
    Quote,
}

/// Figures shown on the checkout page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciledTotals {
    /// Item total after bulk pricing.
    pub items_total: Money,
    pub bulk_savings: Money,
    pub coupon_discount: Money,
    pub shipping: Money,
    pub total: Money,
    pub source: TotalsSource,
}

impl ReconciledTotals {
    /// Display the client-side estimate as-is.
    pub fn from_estimate(aggregate: &CartAggregate) -> Self {
        Self {
            items_total: aggregate.items_total(),
            bulk_savings: aggregate.bulk_savings,
            coupon_discount: aggregate.coupon_discount,
            shipping: aggregate.shipping_cost,
            total: aggregate.total,
            source: TotalsSource::Estimate,
        }
    }

    /// Let a quote supersede the estimate.
    ///
    /// `product_cost` replaces the item total, the active coupon is re-applied
    /// to it, and `ship_cost` replaces the estimated shipping.
    pub fn with_quote(aggregate: &CartAggregate, quote: &Quote) -> Result<Self, CommerceError> {
        let items_total = quote.product_cost;
        let coupon_discount = match aggregate.coupon {
            Some(ref coupon) => items_total.percentage(coupon.percent_off),
            None => Money::zero(items_total.currency),
        };
        let total = items_total
            .checked_sub(&coupon_discount)?
            .checked_add(&quote.ship_cost)?;

        Ok(Self {
            items_total,
            bulk_savings: aggregate.bulk_savings,
            coupon_discount,
            shipping: quote.ship_cost,
            total,
            source: TotalsSource::Quote,
        })
    }

    /// Quote-backed figures when a quote is available, the estimate otherwise.
    pub fn reconcile(aggregate: &CartAggregate, quote: Option<&Quote>) -> Result<Self, CommerceError> {
        match quote {
            Some(quote) => Self::with_quote(aggregate, quote),
            None => Ok(Self::from_estimate(aggregate)),
        }
    }

    pub fn is_authoritative(&self) -> bool {
        self.source == TotalsSource::Quote
    }
}
