//! REST implementation of [`StorefrontBackend`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use storefront_commerce::cart::LineItem;
use storefront_commerce::checkout::{OrderConfirmation, OrderRequest, Quote, QuoteRequest};
use storefront_commerce::money::Currency;
use tracing::{debug, warn};

use crate::backend::StorefrontBackend;
use crate::error::FetchError;
use crate::wire::{CartLineDto, CartUpdate, CartUpdateBody, ErrorBody, QuoteDto};

/// Connection settings for the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL, e.g. `"https://api.example.com/v1"`.
    pub base_url: String,

    /// Whole-request timeout. No timeout when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,

    /// Currency the backend prices in.
    #[serde(default)]
    pub currency: Currency,

    /// Bearer token for the customer session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_ms: None,
            currency: Currency::default(),
            auth_token: None,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

/// HTTP client for the storefront REST backend.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    config: ClientConfig,
    http: Client,
}

impl HttpBackend {
    /// Create a client from the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self, FetchError> {
        if !(config.base_url.starts_with("http://") || config.base_url.starts_with("https://")) {
            return Err(FetchError::InvalidConfig(format!(
                "base_url must be an http(s) URL, got {:?}",
                config.base_url
            )));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| FetchError::InvalidConfig(e.to_string()))?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Absolute URL for an endpoint path.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.config.auth_token {
            Some(ref token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &str,
    ) -> Result<T, FetchError> {
        let response = self.send(request, url).await?;
        Ok(response.json::<T>().await?)
    }

    async fn send(&self, request: RequestBuilder, url: &str) -> Result<Response, FetchError> {
        let response = self.authorize(request).send().await?;
        let status = response.status();
        if status.is_success() {
            debug!(url, status = status.as_u16(), "backend call succeeded");
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = ErrorBody::message_from(&text);
        warn!(url, status = status.as_u16(), message = ?message, "backend call failed");
        Err(FetchError::Http {
            status: status.as_u16(),
            url: url.to_string(),
            message,
        })
    }

    fn into_items(&self, lines: Vec<CartLineDto>) -> Vec<LineItem> {
        lines
            .into_iter()
            .map(|line| line.into_line_item(self.config.currency))
            .collect()
    }
}

#[async_trait]
impl StorefrontBackend for HttpBackend {
    async fn fetch_cart(&self) -> Result<Vec<LineItem>, FetchError> {
        let url = self.endpoint("/cart");
        let lines: Vec<CartLineDto> = self.send_json(self.http.get(&url), &url).await?;
        Ok(self.into_items(lines))
    }

    async fn update_cart(&self, update: &CartUpdate) -> Result<Vec<LineItem>, FetchError> {
        let url = self.endpoint("/cart");
        let body = CartUpdateBody::from(update);
        let lines: Vec<CartLineDto> = self
            .send_json(self.http.post(&url).json(&body), &url)
            .await?;
        Ok(self.into_items(lines))
    }

    async fn clear_cart(&self) -> Result<(), FetchError> {
        let url = self.endpoint("/cart");
        self.send(self.http.delete(&url), &url).await?;
        Ok(())
    }

    async fn quote(&self, request: &QuoteRequest) -> Result<Quote, FetchError> {
        let url = self.endpoint("/quote");
        let dto: QuoteDto = self
            .send_json(self.http.post(&url).json(request), &url)
            .await?;
        Ok(dto.into_quote(self.config.currency))
    }

    async fn place_order(&self, request: &OrderRequest) -> Result<OrderConfirmation, FetchError> {
        let url = self.endpoint("/checkout");
        self.send_json(self.http.post(&url).json(request), &url)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joining() {
        let backend = HttpBackend::new(ClientConfig::new("https://api.example.com/v1/")).unwrap();
        assert_eq!(backend.endpoint("/quote"), "https://api.example.com/v1/quote");
        assert_eq!(backend.endpoint("cart"), "https://api.example.com/v1/cart");
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let err = HttpBackend::new(ClientConfig::new("ftp://example.com")).unwrap_err();
        assert!(matches!(err, FetchError::InvalidConfig(_)));
    }

    #[test]
    fn test_config_defaults_from_toml_like_json() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"base_url": "https://shop.test", "timeout_ms": 2500}"#)
                .unwrap();
        assert_eq!(config.timeout(), Some(Duration::from_millis(2500)));
        assert_eq!(config.currency, Currency::USD);
        assert!(config.auth_token.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_a_connection_error() {
        // Bind an ephemeral port, then release it so nothing is listening.
        let addr = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        let backend = HttpBackend::new(ClientConfig {
            timeout_ms: Some(2000),
            ..ClientConfig::new(format!("http://{addr}"))
        })
        .unwrap();
        let err = backend.fetch_cart().await.unwrap_err();
        assert!(err.is_transient());
    }
}
