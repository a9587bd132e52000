//! The backend port used by checkout coordination.

use std::sync::Arc;

use async_trait::async_trait;
use storefront_commerce::cart::LineItem;
use storefront_commerce::checkout::{OrderConfirmation, OrderRequest, Quote, QuoteRequest};

use crate::error::FetchError;
use crate::wire::CartUpdate;

/// Calls the storefront makes against its REST backend.
///
/// Cart mutations are independent calls: the backend applies them
/// last-write-wins and the caller refetches afterwards.
#[async_trait]
pub trait StorefrontBackend: Send + Sync {
    /// `GET /cart`.
    async fn fetch_cart(&self) -> Result<Vec<LineItem>, FetchError>;

    /// `POST /cart`. Returns the updated cart.
    async fn update_cart(&self, update: &CartUpdate) -> Result<Vec<LineItem>, FetchError>;

    /// `DELETE /cart`.
    async fn clear_cart(&self) -> Result<(), FetchError>;

    /// `POST /quote`.
    async fn quote(&self, request: &QuoteRequest) -> Result<Quote, FetchError>;

    /// `POST /checkout`.
    async fn place_order(&self, request: &OrderRequest) -> Result<OrderConfirmation, FetchError>;
}

#[async_trait]
impl<T: StorefrontBackend + ?Sized> StorefrontBackend for Arc<T> {
    async fn fetch_cart(&self) -> Result<Vec<LineItem>, FetchError> {
        (**self).fetch_cart().await
    }

    async fn update_cart(&self, update: &CartUpdate) -> Result<Vec<LineItem>, FetchError> {
        (**self).update_cart(update).await
    }

    async fn clear_cart(&self) -> Result<(), FetchError> {
        (**self).clear_cart().await
    }

    async fn quote(&self, request: &QuoteRequest) -> Result<Quote, FetchError> {
        (**self).quote(request).await
    }

    async fn place_order(&self, request: &OrderRequest) -> Result<OrderConfirmation, FetchError> {
        (**self).place_order(request).await
    }
}
