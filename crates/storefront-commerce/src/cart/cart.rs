//! Client-side cart state.

use crate::cart::{Aggregator, CartTotals, Coupon, CouponBook, LineItem, MAX_QUANTITY_PER_ITEM};
use crate::checkout::ShipmentOption;
use crate::error::CommerceError;
use crate::ids::SkuId;
use crate::money::Currency;
use serde::{Deserialize, Serialize};

/// Which items a totals computation covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// Every item in the cart.
    #[default]
    All,
    /// Only items flagged as selected.
    Selected,
}

/// A shopping cart as the storefront holds it between backend round trips.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Cart {
    /// Items in backend order.
    pub items: Vec<LineItem>,
    /// Active coupon, at most one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupon: Option<Coupon>,
    /// Cart currency.
    #[serde(default)]
    pub currency: Currency,
}

impl Cart {
    /// Create a cart from items fetched from the backend.
    pub fn from_items(items: Vec<LineItem>) -> Self {
        let currency = items
            .first()
            .map(|i| i.unit_price.currency)
            .unwrap_or_default();
        Self {
            items,
            coupon: None,
            currency,
        }
    }

    /// Replace items with a fresh backend copy, keeping selection flags for
    /// SKUs that are still present.
    pub fn refresh(&mut self, items: Vec<LineItem>) {
        let selected: Vec<SkuId> = self.selected_skus();
        self.items = items;
        for item in &mut self.items {
            item.selected = selected.contains(&item.sku_id);
        }
        if let Some(first) = self.items.first() {
            self.currency = first.unit_price.currency;
        }
    }

    /// Set an item's quantity.
    ///
    /// A quantity of zero or less removes the item. Returns whether the cart
    /// changed.
    pub fn set_quantity(&mut self, sku_id: &SkuId, quantity: i64) -> Result<bool, CommerceError> {
        if quantity <= 0 {
            return Ok(self.remove_item(sku_id));
        }

        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        match self.items.iter_mut().find(|i| &i.sku_id == sku_id) {
            Some(item) => {
                item.quantity = quantity;
                Ok(true)
            }
            None => Err(CommerceError::ItemNotInCart(sku_id.to_string())),
        }
    }

    /// Change an item's quantity by `delta`.
    pub fn adjust_quantity(&mut self, sku_id: &SkuId, delta: i64) -> Result<bool, CommerceError> {
        let current = self
            .get_item(sku_id)
            .map(|i| i.quantity)
            .ok_or_else(|| CommerceError::ItemNotInCart(sku_id.to_string()))?;
        let quantity = current.checked_add(delta).ok_or(CommerceError::Overflow)?;
        self.set_quantity(sku_id, quantity)
    }

    /// Remove an item from the cart.
    pub fn remove_item(&mut self, sku_id: &SkuId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.sku_id != sku_id);
        self.items.len() < len_before
    }

    /// Clear all items and the coupon.
    pub fn clear(&mut self) {
        self.items.clear();
        self.coupon = None;
    }

    /// Apply a coupon code, replacing any active coupon.
    ///
    /// An unknown code leaves the cart unchanged.
    pub fn apply_coupon(&mut self, book: &CouponBook, code: &str) -> Result<&Coupon, CommerceError> {
        let coupon = book
            .lookup(code)
            .cloned()
            .ok_or_else(|| CommerceError::InvalidCouponCode(code.to_string()))?;
        Ok(self.coupon.insert(coupon))
    }

    /// Remove the active coupon. Returns whether one was active.
    pub fn clear_coupon(&mut self) -> bool {
        self.coupon.take().is_some()
    }

    /// Flip an item's selection flag. Returns the new flag.
    pub fn toggle_selected(&mut self, sku_id: &SkuId) -> Result<bool, CommerceError> {
        let item = self
            .items
            .iter_mut()
            .find(|i| &i.sku_id == sku_id)
            .ok_or_else(|| CommerceError::ItemNotInCart(sku_id.to_string()))?;
        item.selected = !item.selected;
        Ok(item.selected)
    }

    /// Select or deselect every item.
    pub fn select_all(&mut self, selected: bool) {
        for item in &mut self.items {
            item.selected = selected;
        }
    }

    /// SKUs currently flagged as selected, in cart order.
    pub fn selected_skus(&self) -> Vec<SkuId> {
        self.items
            .iter()
            .filter(|i| i.selected)
            .map(|i| i.sku_id.clone())
            .collect()
    }

    /// Items covered by `mode`.
    pub fn items_for(&self, mode: SelectionMode) -> Vec<&LineItem> {
        self.items
            .iter()
            .filter(|i| mode == SelectionMode::All || i.selected)
            .collect()
    }

    /// Price the cart with its coupon and an optional shipping option.
    pub fn totals(
        &self,
        mode: SelectionMode,
        shipping: Option<&ShipmentOption>,
    ) -> Result<CartTotals, CommerceError> {
        let aggregator = Aggregator::new()
            .with_coupon(self.coupon.as_ref())
            .with_shipping(shipping);
        match mode {
            SelectionMode::All => aggregator.aggregate(&self.items, None),
            SelectionMode::Selected => {
                let selected = self.selected_skus();
                aggregator.aggregate(&self.items, Some(&selected))
            }
        }
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get_item(&self, sku_id: &SkuId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.sku_id == sku_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn sample_cart() -> Cart {
        Cart::from_items(vec![
            LineItem::new("a", "Bolts", 2, Money::new(1000, Currency::USD)),
            LineItem::new("b", "Nuts", 1, Money::new(500, Currency::USD)),
        ])
    }

    #[test]
    fn test_set_quantity() {
        let mut cart = sample_cart();
        assert!(cart.set_quantity(&SkuId::new("a"), 5).unwrap());
        assert_eq!(cart.item_count(), 6);
    }

    #[test]
    fn test_zero_quantity_removes() {
        let mut cart = sample_cart();
        assert!(cart.set_quantity(&SkuId::new("a"), 0).unwrap());
        assert!(cart.get_item(&SkuId::new("a")).is_none());
        assert_eq!(cart.items.len(), 1);
    }

    #[test]
    fn test_adjust_quantity_down_to_removal() {
        let mut cart = sample_cart();
        cart.adjust_quantity(&SkuId::new("a"), -2).unwrap();
        assert!(cart.get_item(&SkuId::new("a")).is_none());
    }

    #[test]
    fn test_quantity_limit() {
        let mut cart = sample_cart();
        let result = cart.set_quantity(&SkuId::new("a"), MAX_QUANTITY_PER_ITEM + 1);
        assert!(matches!(result, Err(CommerceError::QuantityExceedsLimit(..))));
    }

    #[test]
    fn test_unknown_item() {
        let mut cart = sample_cart();
        assert!(cart.set_quantity(&SkuId::new("zzz"), 1).is_err());
        assert!(!cart.remove_item(&SkuId::new("zzz")));
    }

    #[test]
    fn test_coupon_replaces_previous() {
        let mut cart = sample_cart();
        let book = CouponBook::standard();
        cart.apply_coupon(&book, "save10").unwrap();
        cart.apply_coupon(&book, "SAVE20").unwrap();
        assert_eq!(cart.coupon.as_ref().unwrap().code, "SAVE20");

        let agg = cart.totals(SelectionMode::All, None).unwrap().into_priced().unwrap();
        assert_eq!(agg.coupon_discount.amount_cents, 500);
    }

    #[test]
    fn test_invalid_coupon_leaves_cart_unchanged() {
        let mut cart = sample_cart();
        let book = CouponBook::standard();
        cart.apply_coupon(&book, "SAVE10").unwrap();
        let err = cart.apply_coupon(&book, "BOGUS").unwrap_err();
        assert_eq!(err, CommerceError::InvalidCouponCode("BOGUS".to_string()));
        assert_eq!(cart.coupon.as_ref().unwrap().code, "SAVE10");
    }

    #[test]
    fn test_clear_coupon_reverts_discount() {
        let mut cart = sample_cart();
        cart.apply_coupon(&CouponBook::standard(), "SAVE10").unwrap();
        assert!(cart.clear_coupon());
        let agg = cart.totals(SelectionMode::All, None).unwrap().into_priced().unwrap();
        assert!(agg.coupon_discount.is_zero());
    }

    #[test]
    fn test_selection_mode_with_nothing_selected() {
        let cart = sample_cart();
        assert_eq!(
            cart.totals(SelectionMode::Selected, None).unwrap(),
            CartTotals::NothingSelected
        );
    }

    #[test]
    fn test_selection_mode_prices_selected_items() {
        let mut cart = sample_cart();
        cart.toggle_selected(&SkuId::new("b")).unwrap();
        let agg = cart
            .totals(SelectionMode::Selected, None)
            .unwrap()
            .into_priced()
            .unwrap();
        assert_eq!(agg.subtotal.amount_cents, 500);

        cart.select_all(true);
        assert_eq!(cart.selected_skus().len(), 2);
    }

    #[test]
    fn test_refresh_keeps_selection() {
        let mut cart = sample_cart();
        cart.toggle_selected(&SkuId::new("a")).unwrap();
        cart.refresh(vec![
            LineItem::new("a", "Bolts", 3, Money::new(1000, Currency::USD)),
            LineItem::new("c", "Washers", 1, Money::new(50, Currency::USD)),
        ]);
        assert_eq!(cart.selected_skus(), vec![SkuId::new("a")]);
    }

    #[test]
    fn test_clear_drops_coupon() {
        let mut cart = sample_cart();
        cart.apply_coupon(&CouponBook::standard(), "SAVE10").unwrap();
        cart.clear();
        assert!(cart.is_empty());
        assert!(cart.coupon.is_none());
    }
}
