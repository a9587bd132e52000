//! Coupon codes.
//!
//! Coupons are matched exactly against a static table after uppercasing the
//! submitted code. Only one coupon is active on a cart at a time.

use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A recognized coupon.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Coupon {
    /// Canonical (uppercase) code.
    pub code: String,
    /// Whole-number percentage taken off the base amount.
    pub percent_off: u32,
}

impl Coupon {
    pub fn new(code: impl Into<String>, percent_off: u32) -> Self {
        Self {
            code: code.into().to_uppercase(),
            percent_off,
        }
    }

    /// Discount this coupon grants on `base`.
    pub fn discount_on(&self, base: &Money) -> Money {
        base.percentage(self.percent_off)
    }
}

/// Result of evaluating a code against an amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CouponOutcome {
    pub applied: bool,
    pub discount: Money,
}

/// Static coupon rule table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouponBook {
    coupons: Vec<Coupon>,
}

impl CouponBook {
    /// Build a table from explicit entries.
    pub fn new(coupons: impl IntoIterator<Item = Coupon>) -> Self {
        Self {
            coupons: coupons.into_iter().collect(),
        }
    }

    /// The storefront's standard table: `SAVE10` and `SAVE20`.
    pub fn standard() -> Self {
        Self::new([Coupon::new("SAVE10", 10), Coupon::new("SAVE20", 20)])
    }

    /// Find the coupon for a user-entered code.
    pub fn lookup(&self, code: &str) -> Option<&Coupon> {
        let normalized = code.to_uppercase();
        self.coupons.iter().find(|c| c.code == normalized)
    }

    /// Evaluate a code against a base amount.
    pub fn evaluate(&self, code: &str, base: &Money) -> CouponOutcome {
        match self.lookup(code) {
            Some(coupon) => CouponOutcome {
                applied: true,
                discount: coupon.discount_on(base),
            },
            None => CouponOutcome {
                applied: false,
                discount: Money::zero(base.currency),
            },
        }
    }
}

impl Default for CouponBook {
    fn default() -> Self {
        Self::standard()
    }
}

/// A coupon as applied to a priced cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppliedCoupon {
    pub code: String,
    pub percent_off: u32,
    /// Amount discounted.
    pub amount: Money,
}

impl AppliedCoupon {
    pub fn from_coupon(coupon: &Coupon, amount: Money) -> Self {
        Self {
            code: coupon.code.clone(),
            percent_off: coupon.percent_off,
            amount,
        }
    }
}
