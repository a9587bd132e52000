//! Cart pricing and checkout domain types for the storefront.
//!
//! This crate is pure: no I/O, no clocks, no async.
//!
//! - **Cart**: line items, bulk-tier pricing, selection, coupons, aggregation
//! - **Checkout**: addresses, shipment options, quote and order payloads,
//!   form validation, reconciliation of estimates with backend quotes
//!
//! # Example
//!
//! ```rust
//! use storefront_commerce::prelude::*;
//!
//! let mut cart = Cart::from_items(vec![
//!     LineItem::new("sku-1", "Hex bolts", 6, Money::new(1000, Currency::USD))
//!         .with_bulk_price(Money::new(800, Currency::USD), 5),
//! ]);
//! cart.apply_coupon(&CouponBook::standard(), "save10").unwrap();
//!
//! let totals = cart.totals(SelectionMode::All, None).unwrap();
//! let priced = totals.priced().unwrap();
//! assert_eq!(priced.total.display(), "$43.20");
//! ```

pub mod cart;
pub mod checkout;
pub mod error;
pub mod ids;
pub mod money;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Cart
    pub use crate::cart::{
        aggregate, effective_price, line_total, AppliedCoupon, Aggregator, Cart, CartAggregate,
        CartTotals, Coupon, CouponBook, CouponOutcome, LineItem, LineItemPricing, SelectionMode,
        MAX_QUANTITY_PER_ITEM,
    };

    // Checkout
    pub use crate::checkout::{
        Address, CheckoutSelection, NextStep, OrderConfirmation, OrderLine, OrderRequest, Quote,
        QuoteInputs, QuoteLine, QuoteRequest, ReconciledTotals, SelectionError, ShipmentOption,
        TotalsSource,
    };
}
