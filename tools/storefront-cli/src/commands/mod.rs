//! CLI command implementations.

pub mod cart;
pub mod checkout;
pub mod config;
pub mod price;
pub mod quote;

use clap::{Args, Subcommand};
use storefront_commerce::checkout::Address;

/// Arguments for the price command.
#[derive(Args)]
pub struct PriceArgs {
    /// Cart file: a JSON array of backend cart lines.
    pub file: String,

    /// Coupon code to apply.
    #[arg(long)]
    pub coupon: Option<String>,

    /// Price only these SKUs (comma-separated). Pass with no value for an
    /// empty selection.
    #[arg(long, num_args = 0.., value_delimiter = ',')]
    pub select: Option<Vec<String>>,

    /// Shipping option id for the estimate.
    #[arg(short, long)]
    pub shipping: Option<String>,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: CartCommand,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the backend cart with an estimate.
    Show {
        /// Shipping option id for the estimate.
        #[arg(short, long)]
        shipping: Option<String>,
    },
    /// Set a line's quantity. 0 removes it.
    Set {
        /// SKU id.
        sku: String,
        /// New quantity.
        quantity: i64,
    },
    /// Change a line's quantity by a signed amount.
    Add {
        /// SKU id.
        sku: String,
        /// Amount to add (negative to subtract).
        #[arg(allow_hyphen_values = true)]
        delta: i64,
    },
    /// Remove a line.
    Remove {
        /// SKU id.
        sku: String,
    },
    /// Empty the cart.
    Clear,
}

/// Delivery address flags shared by `quote` and `checkout`.
#[derive(Args, Default)]
pub struct AddressArgs {
    /// Recipient name.
    #[arg(long)]
    pub recipient: Option<String>,

    /// Street address.
    #[arg(long)]
    pub line1: Option<String>,

    /// Apartment, suite, etc.
    #[arg(long)]
    pub line2: Option<String>,

    #[arg(long)]
    pub city: Option<String>,

    /// State or province.
    #[arg(long)]
    pub region: Option<String>,

    #[arg(long)]
    pub postal_code: Option<String>,

    /// ISO country code.
    #[arg(long)]
    pub country: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,
}

impl AddressArgs {
    /// The entered address, or `None` when no field was given.
    pub fn to_address(&self) -> Option<Address> {
        let address = Address {
            recipient: self.recipient.clone().unwrap_or_default(),
            line1: self.line1.clone().unwrap_or_default(),
            line2: self.line2.clone(),
            city: self.city.clone().unwrap_or_default(),
            region: self.region.clone(),
            postal_code: self.postal_code.clone().unwrap_or_default(),
            country_code: self.country.clone().unwrap_or_default(),
            phone: self.phone.clone(),
        };
        (!address.is_blank()).then_some(address)
    }
}

/// Arguments for the quote command.
#[derive(Args)]
pub struct QuoteArgs {
    #[command(flatten)]
    pub address: AddressArgs,

    /// Shipping option id.
    #[arg(short, long)]
    pub shipping: Option<String>,

    /// Coupon code to apply.
    #[arg(long)]
    pub coupon: Option<String>,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    #[command(flatten)]
    pub address: AddressArgs,

    /// Shipping option id.
    #[arg(short, long)]
    pub shipping: Option<String>,

    /// Payment option id.
    #[arg(short, long)]
    pub payment: Option<String>,

    /// Coupon code to apply.
    #[arg(long)]
    pub coupon: Option<String>,

    /// Note to the vendor for one item, as `SKU=TEXT`. Repeatable.
    #[arg(long = "note", value_name = "SKU=TEXT")]
    pub notes: Vec<String>,

    /// Order only these SKUs (comma-separated).
    #[arg(long, value_delimiter = ',')]
    pub select: Option<Vec<String>>,

    /// Mark the order as a direct purchase.
    #[arg(long)]
    pub buy_now: bool,

    /// Skip waiting for a shipping quote before submitting.
    #[arg(long)]
    pub no_quote: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Backend base URL to write into the file.
        #[arg(long, default_value = "http://localhost:8080")]
        base_url: String,

        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_address_flags_mean_no_address() {
        assert!(AddressArgs::default().to_address().is_none());
    }

    #[test]
    fn test_partial_address_is_kept_for_validation() {
        let args = AddressArgs {
            recipient: Some("Ada".to_string()),
            line1: Some("1 Main St".to_string()),
            ..AddressArgs::default()
        };
        let address = args.to_address().unwrap();
        assert!(!address.is_complete());
    }
}
