//! A cart kept in step with the backend.

use std::sync::Arc;

use storefront_commerce::cart::{Cart, CartTotals, CouponBook, SelectionMode, MAX_QUANTITY_PER_ITEM};
use storefront_commerce::checkout::ShipmentOption;
use storefront_commerce::ids::SkuId;
use storefront_commerce::CommerceError;
use storefront_data::{CartUpdate, StorefrontBackend};
use tracing::{debug, info};

use crate::error::CartError;

/// Local cart state plus the backend it mirrors.
///
/// Mutations go to the backend first; the local cart is replaced with the
/// backend's copy afterwards, keeping selection flags and the coupon.
pub struct CartSession<B: ?Sized> {
    backend: Arc<B>,
    coupons: CouponBook,
    cart: Cart,
}

impl<B> CartSession<B>
where
    B: StorefrontBackend + ?Sized,
{
    /// Fetch the cart and start a session around it.
    pub async fn load(backend: Arc<B>, coupons: CouponBook) -> Result<Self, CartError> {
        let items = backend.fetch_cart().await?;
        debug!(lines = items.len(), "cart loaded");
        Ok(Self {
            backend,
            coupons,
            cart: Cart::from_items(items),
        })
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Re-read the cart from the backend.
    pub async fn refresh(&mut self) -> Result<(), CartError> {
        let items = self.backend.fetch_cart().await?;
        self.cart.refresh(items);
        Ok(())
    }

    /// Set a line's quantity. Zero or less removes the line.
    pub async fn set_quantity(&mut self, sku_id: &SkuId, quantity: i64) -> Result<(), CartError> {
        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(quantity, MAX_QUANTITY_PER_ITEM).into());
        }
        self.apply(CartUpdate::Quantity {
            sku_id: sku_id.clone(),
            quantity: quantity.max(0),
        })
        .await
    }

    /// Change a line's quantity by `delta`.
    pub async fn adjust_quantity(&mut self, sku_id: &SkuId, delta: i64) -> Result<(), CartError> {
        let current = self
            .cart
            .get_item(sku_id)
            .map(|item| item.quantity)
            .ok_or_else(|| CommerceError::ItemNotInCart(sku_id.to_string()))?;
        let target = current.checked_add(delta).ok_or(CommerceError::Overflow)?;
        if target > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(target, MAX_QUANTITY_PER_ITEM).into());
        }
        self.apply(CartUpdate::Delta {
            sku_id: sku_id.clone(),
            delta,
        })
        .await
    }

    pub async fn remove(&mut self, sku_id: &SkuId) -> Result<(), CartError> {
        self.apply(CartUpdate::remove(sku_id.clone())).await
    }

    /// Empty the cart on the backend and drop the local coupon.
    pub async fn clear(&mut self) -> Result<(), CartError> {
        self.backend.clear_cart().await?;
        self.cart.clear();
        info!("cart cleared");
        Ok(())
    }

    /// Apply a coupon code locally. An unknown code leaves the cart unchanged.
    pub fn apply_coupon(&mut self, code: &str) -> Result<u32, CartError> {
        let coupon = self.cart.apply_coupon(&self.coupons, code)?;
        Ok(coupon.percent_off)
    }

    pub fn clear_coupon(&mut self) -> bool {
        self.cart.clear_coupon()
    }

    pub fn toggle_selected(&mut self, sku_id: &SkuId) -> Result<bool, CartError> {
        Ok(self.cart.toggle_selected(sku_id)?)
    }

    pub fn select_all(&mut self, selected: bool) {
        self.cart.select_all(selected);
    }

    pub fn totals(
        &self,
        mode: SelectionMode,
        shipping: Option<&ShipmentOption>,
    ) -> Result<CartTotals, CartError> {
        Ok(self.cart.totals(mode, shipping)?)
    }

    async fn apply(&mut self, update: CartUpdate) -> Result<(), CartError> {
        debug!(sku_id = %update.sku_id(), ?update, "updating cart line");
        let items = self.backend.update_cart(&update).await?;
        self.cart.refresh(items);
        Ok(())
    }
}
