//! Checkout module.
//!
//! Contains addresses, shipment options, quote and order payloads, the
//! checkout form selection and total reconciliation.

mod address;
mod order;
mod quote;
mod reconcile;
mod selection;
mod shipping;

pub use address::Address;
pub use order::{NextStep, OrderConfirmation, OrderLine, OrderRequest};
pub use quote::{Quote, QuoteInputs, QuoteLine, QuoteRequest};
pub use reconcile::{ReconciledTotals, TotalsSource};
pub use selection::{CheckoutSelection, SelectionError};
pub use shipping::ShipmentOption;
