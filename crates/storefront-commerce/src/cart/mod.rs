//! Shopping cart module.
//!
//! Contains line items, the line item pricer, the cart aggregator and coupons.

mod aggregate;
mod cart;
mod coupon;
mod line_item;
mod pricing;

pub use aggregate::{aggregate, Aggregator, CartAggregate, CartTotals};
pub use cart::{Cart, SelectionMode};
pub use coupon::{AppliedCoupon, Coupon, CouponBook, CouponOutcome};
pub use line_item::{LineItem, MAX_QUANTITY_PER_ITEM};
pub use pricing::{effective_price, line_total, LineItemPricing};
