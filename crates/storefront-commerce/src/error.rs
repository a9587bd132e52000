//! Commerce error types.

use thiserror::Error;

/// Errors raised by cart pricing and cart mutations.
///
/// Malformed line items are reported, never coerced into a total.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// Quantity outside the accepted range for pricing.
    #[error("Invalid quantity {quantity} for {sku_id}")]
    InvalidQuantity { sku_id: String, quantity: i64 },

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// Negative unit or bulk price.
    #[error("Negative price for {0}")]
    NegativePrice(String),

    /// Bulk price above the regular unit price.
    #[error("Bulk price for {0} exceeds its unit price")]
    BulkPriceAboveUnitPrice(String),

    /// Item not in cart.
    #[error("Item not in cart: {0}")]
    ItemNotInCart(String),

    /// Unrecognized coupon code.
    #[error("Invalid coupon code: {0}")]
    InvalidCouponCode(String),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
