//! CLI configuration.

use std::collections::HashSet;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use storefront_checkout::QuoteConfig;
use storefront_commerce::checkout::ShipmentOption;
use storefront_commerce::money::{Currency, Money};
use storefront_data::ClientConfig;
use storefront_observability::LoggingConfig;

/// Config file names searched for, in order.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// `storefront.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Currency the store prices in.
    #[serde(default)]
    pub currency: Currency,

    /// Backend connection.
    #[serde(default)]
    pub backend: BackendConfig,

    /// Quote debounce.
    #[serde(default)]
    pub quote: QuoteConfig,

    /// Shipping methods offered at checkout.
    #[serde(default)]
    pub shipping: ShippingConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StorefrontConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Connection settings for [`storefront_data::HttpBackend`].
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.backend.base_url.clone(),
            timeout_ms: self.backend.timeout_ms,
            currency: self.currency,
            auth_token: self.backend.auth_token.clone(),
        }
    }

    pub fn shipment_option(&self, id: &str) -> Option<ShipmentOption> {
        self.shipping
            .options
            .iter()
            .find(|option| option.id == id)
            .map(|option| option.to_shipment_option(self.currency))
    }

    /// Problems that would make the config unusable.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !(self.backend.base_url.starts_with("http://")
            || self.backend.base_url.starts_with("https://"))
        {
            errors.push(format!(
                "backend.base_url must be an http(s) URL, got '{}'",
                self.backend.base_url
            ));
        }
        if self.backend.timeout_ms == Some(0) {
            errors.push("backend.timeout_ms must be positive when set".to_string());
        }

        let mut seen = HashSet::new();
        for (i, option) in self.shipping.options.iter().enumerate() {
            if option.id.trim().is_empty() {
                errors.push(format!("shipping.options[{}].id is required", i));
            } else if !seen.insert(option.id.as_str()) {
                errors.push(format!("shipping.options[{}].id '{}' is duplicated", i, option.id));
            }
            if option.flat_fee_cents < 0 {
                errors.push(format!("shipping.options[{}].flat_fee_cents must not be negative", i));
            }
            if option.free_over_cents.is_some_and(|cents| cents < 0) {
                errors.push(format!("shipping.options[{}].free_over_cents must not be negative", i));
            }
        }

        errors
    }
}

/// `[backend]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// REST API root.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Whole-request timeout. Off when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,

    /// Bearer token for the customer session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: None,
            auth_token: None,
        }
    }
}

/// `[shipping]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingConfig {
    #[serde(default)]
    pub options: Vec<ShippingOptionConfig>,
}

impl Default for ShippingConfig {
    fn default() -> Self {
        Self {
            options: vec![
                ShippingOptionConfig {
                    id: "standard".to_string(),
                    name: "Standard".to_string(),
                    carrier: None,
                    flat_fee_cents: 599,
                    free_over_cents: Some(5000),
                },
                ShippingOptionConfig {
                    id: "express".to_string(),
                    name: "Express".to_string(),
                    carrier: None,
                    flat_fee_cents: 1499,
                    free_over_cents: None,
                },
            ],
        }
    }
}

/// One `[[shipping.options]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingOptionConfig {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,
    #[serde(default)]
    pub flat_fee_cents: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_over_cents: Option<i64>,
}

impl ShippingOptionConfig {
    pub fn to_shipment_option(&self, currency: Currency) -> ShipmentOption {
        let mut option = ShipmentOption::new(
            self.id.as_str(),
            self.name.as_str(),
            Money::new(self.flat_fee_cents, currency),
        );
        option.carrier = self.carrier.clone();
        if let Some(cents) = self.free_over_cents {
            option = option.free_over(Money::new(cents, currency));
        }
        option
    }
}

/// Generate a default storefront.toml.
pub fn generate_default_config(base_url: &str) -> String {
    format!(
        r#"# Storefront CLI configuration

currency = "USD"

[backend]
base_url = "{base_url}"
# timeout_ms = 10000
# auth_token = "..."

[quote]
# Quiet period after the last edit before a shipping quote is requested.
debounce_ms = 500

[[shipping.options]]
id = "standard"
name = "Standard"
flat_fee_cents = 599
free_over_cents = 5000

[[shipping.options]]
id = "express"
name = "Express"
flat_fee_cents = 1499

[logging]
format = "human"
level = "info"
"#,
        base_url = base_url
    )
}
