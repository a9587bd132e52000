//! Checkout flow errors.

use storefront_commerce::checkout::SelectionError;
use storefront_commerce::CommerceError;
use storefront_data::FetchError;
use thiserror::Error;

/// Why an order submission did not go through.
///
/// `Display` is the customer-facing message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// A required field is missing. Nothing was sent.
    #[error(transparent)]
    Validation(#[from] SelectionError),

    /// A submission is already in progress. Nothing was sent.
    #[error("Your order is already being placed")]
    AlreadySubmitting,

    /// This checkout already produced an order.
    #[error("This order has already been placed")]
    AlreadyPlaced,

    /// The backend refused the order or could not be reached.
    #[error("{message}")]
    Rejected {
        message: String,
        #[source]
        source: FetchError,
    },
}

impl CheckoutError {
    /// Whether the backend was contacted.
    pub fn reached_backend(&self) -> bool {
        matches!(self, CheckoutError::Rejected { .. })
    }
}

impl From<FetchError> for CheckoutError {
    fn from(source: FetchError) -> Self {
        CheckoutError::Rejected {
            message: source.user_message(),
            source,
        }
    }
}

/// Errors from cart operations that touch both local state and the backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    #[error(transparent)]
    Commerce(#[from] CommerceError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl CartError {
    pub fn user_message(&self) -> String {
        match self {
            CartError::Commerce(e) => e.to_string(),
            CartError::Fetch(e) => e.user_message(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_is_field_specific() {
        let err = CheckoutError::from(SelectionError::MissingShipmentOption);
        assert_eq!(err.to_string(), "Please choose a shipping method");
        assert!(!err.reached_backend());
    }

    #[test]
    fn test_rejection_carries_backend_text() {
        let err = CheckoutError::from(FetchError::Http {
            status: 409,
            url: "http://shop.test/checkout".to_string(),
            message: Some("Item b is out of stock".to_string()),
        });
        assert_eq!(err.to_string(), "Item b is out of stock");
        assert!(err.reached_backend());
    }
}
