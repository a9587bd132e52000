//! Delivery addresses.

use serde::{Deserialize, Serialize};

/// A postal address entered at checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Address {
    /// Recipient name.
    pub recipient: String,
    /// Street line.
    pub line1: String,
    /// Apartment, suite, etc.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    pub city: String,
    /// State/province code (e.g., "CA").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    pub postal_code: String,
    /// ISO country code (e.g., "US").
    pub country_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Address {
    /// Create a new address.
    pub fn new(
        recipient: impl Into<String>,
        line1: impl Into<String>,
        city: impl Into<String>,
        postal_code: impl Into<String>,
        country_code: impl Into<String>,
    ) -> Self {
        Self {
            recipient: recipient.into(),
            line1: line1.into(),
            line2: None,
            city: city.into(),
            region: None,
            postal_code: postal_code.into(),
            country_code: country_code.into(),
            phone: None,
        }
    }

    /// Format as a single line, the form the backend expects.
    pub fn one_line(&self) -> String {
        let mut parts = vec![self.recipient.as_str(), self.line1.as_str()];
        if let Some(ref line2) = self.line2 {
            parts.push(line2);
        }
        parts.push(&self.city);
        if let Some(ref region) = self.region {
            parts.push(region);
        }
        parts.push(&self.postal_code);
        parts.push(&self.country_code);
        parts
            .into_iter()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// No meaningful field has been filled in.
    pub fn is_blank(&self) -> bool {
        self.one_line().is_empty()
    }

    /// Every required field is present.
    pub fn is_complete(&self) -> bool {
        [
            &self.recipient,
            &self.line1,
            &self.city,
            &self.postal_code,
            &self.country_code,
        ]
        .iter()
        .all(|field| !field.trim().is_empty())
    }
}
