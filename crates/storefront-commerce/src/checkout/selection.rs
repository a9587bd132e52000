//! Checkout form state and its validation.

use std::collections::BTreeMap;

use crate::cart::LineItem;
use crate::checkout::{Address, OrderLine, OrderRequest, QuoteInputs};
use crate::ids::{PaymentOptionId, ShipmentOptionId, SkuId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A required checkout field is missing.
///
/// Messages are shown to the customer as-is.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Please choose a shipping method")]
    MissingShipmentOption,

    #[error("Please enter a complete delivery address")]
    IncompleteAddress,

    #[error("Please choose a payment method")]
    MissingPaymentOption,

    #[error("There are no items to order")]
    NoItems,
}

/// What the customer has chosen on the checkout page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckoutSelection {
    pub address: Option<Address>,
    pub shipment_option: Option<ShipmentOptionId>,
    pub payment_option: Option<PaymentOptionId>,
    /// Per-item notes to the vendor.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub notes: BTreeMap<SkuId, String>,
    #[serde(default)]
    pub buy_now: bool,
}

impl CheckoutSelection {
    pub fn with_address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    pub fn with_shipment_option(mut self, id: impl Into<ShipmentOptionId>) -> Self {
        self.shipment_option = Some(id.into());
        self
    }

    pub fn with_payment_option(mut self, id: impl Into<PaymentOptionId>) -> Self {
        self.payment_option = Some(id.into());
        self
    }

    /// Attach a note to one item. Blank notes are dropped.
    pub fn set_note(&mut self, sku_id: SkuId, note: impl Into<String>) {
        let note = note.into();
        if note.trim().is_empty() {
            self.notes.remove(&sku_id);
        } else {
            self.notes.insert(sku_id, note);
        }
    }

    /// Check required fields: shipment option, then address, then payment
    /// option. The first missing one is reported.
    pub fn validate(&self) -> Result<(), SelectionError> {
        if self.shipment_option.is_none() {
            return Err(SelectionError::MissingShipmentOption);
        }
        if !self.address.as_ref().is_some_and(Address::is_complete) {
            return Err(SelectionError::IncompleteAddress);
        }
        if self.payment_option.is_none() {
            return Err(SelectionError::MissingPaymentOption);
        }
        Ok(())
    }

    /// Build the order-placement body for `items`.
    pub fn order_request(&self, items: &[LineItem]) -> Result<OrderRequest, SelectionError> {
        self.validate()?;

        let (Some(address), Some(shipment_option), Some(payment_option)) = (
            self.address.as_ref(),
            self.shipment_option.as_ref(),
            self.payment_option.as_ref(),
        ) else {
            return Err(SelectionError::IncompleteAddress);
        };

        if items.is_empty() {
            return Err(SelectionError::NoItems);
        }

        Ok(OrderRequest {
            address: address.one_line(),
            payment_option: payment_option.clone(),
            items: items
                .iter()
                .map(|item| OrderLine {
                    sku_id: item.sku_id.clone(),
                    quantity: item.quantity,
                    shipment_option: shipment_option.clone(),
                    note: self.notes.get(&item.sku_id).cloned(),
                })
                .collect(),
            buy_now: self.buy_now,
        })
    }

    /// Inputs for a shipping quote over `items`.
    pub fn quote_inputs(&self, items: Vec<LineItem>) -> QuoteInputs {
        QuoteInputs {
            address: self.address.clone(),
            items,
            shipment_option: self.shipment_option.clone(),
        }
    }
}
