//! Shipment options and the client-side shipping estimate.

use crate::ids::ShipmentOptionId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A shipping method the customer can pick at checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShipmentOption {
    pub id: ShipmentOptionId,
    /// Display name.
    pub name: String,
    /// Carrier name (e.g., "UPS").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,
    /// Flat fee charged below the free-shipping threshold.
    pub flat_fee: Money,
    /// Item total at or above which shipping is free.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_over: Option<Money>,
}

impl ShipmentOption {
    pub fn new(id: impl Into<ShipmentOptionId>, name: impl Into<String>, flat_fee: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            carrier: None,
            flat_fee,
            free_over: None,
        }
    }

    /// Waive the fee once the item total reaches `threshold`.
    pub fn free_over(mut self, threshold: Money) -> Self {
        self.free_over = Some(threshold);
        self
    }

    /// Estimated shipping for a post-discount item total.
    ///
    /// Only a placeholder until the backend quote arrives.
    pub fn estimate(&self, items_total: &Money) -> Money {
        match self.free_over {
            Some(threshold)
                if threshold.currency == items_total.currency
                    && items_total.amount_cents >= threshold.amount_cents =>
            {
                Money::zero(self.flat_fee.currency)
            }
            _ => self.flat_fee,
        }
    }

    pub fn is_free(&self) -> bool {
        self.flat_fee.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_flat_fee_below_threshold() {
        let option = ShipmentOption::new("std", "Standard", Money::new(599, Currency::USD))
            .free_over(Money::new(5000, Currency::USD));
        let estimate = option.estimate(&Money::new(4999, Currency::USD));
        assert_eq!(estimate.amount_cents, 599);
    }

    #[test]
    fn test_free_at_threshold() {
        let option = ShipmentOption::new("std", "Standard", Money::new(599, Currency::USD))
            .free_over(Money::new(5000, Currency::USD));
        assert!(option.estimate(&Money::new(5000, Currency::USD)).is_zero());
    }

    #[test]
    fn test_no_threshold_always_charges() {
        let option = ShipmentOption::new("exp", "Express", Money::new(1500, Currency::USD));
        let estimate = option.estimate(&Money::new(1_000_000, Currency::USD));
        assert_eq!(estimate.amount_cents, 1500);
        assert!(!option.is_free());
    }
}
