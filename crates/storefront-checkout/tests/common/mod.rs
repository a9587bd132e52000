//! In-process backend double shared by the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use storefront_commerce::prelude::*;
use storefront_data::{CartUpdate, FetchError, StorefrontBackend};
use tokio::time::Instant;

/// A scripted reply: wait `delay`, then return `result`.
pub struct Reply<T> {
    pub delay: Duration,
    pub result: Result<T, FetchError>,
}

impl<T> Reply<T> {
    pub fn ok(value: T) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Ok(value),
        }
    }

    pub fn err(error: FetchError) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Err(error),
        }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Default)]
pub struct FakeBackend {
    pub cart: Mutex<Vec<LineItem>>,
    pub quote_calls: AtomicUsize,
    pub order_calls: AtomicUsize,
    pub quote_log: Mutex<Vec<(Instant, QuoteRequest)>>,
    pub order_log: Mutex<Vec<OrderRequest>>,
    pub cart_updates: Mutex<Vec<CartUpdate>>,
    quote_replies: Mutex<VecDeque<Reply<Quote>>>,
    order_replies: Mutex<VecDeque<Reply<OrderConfirmation>>>,
}

impl FakeBackend {
    pub fn with_cart(items: Vec<LineItem>) -> Self {
        Self {
            cart: Mutex::new(items),
            ..Self::default()
        }
    }

    pub fn script_quote(&self, reply: Reply<Quote>) {
        self.quote_replies.lock().unwrap().push_back(reply);
    }

    pub fn script_order(&self, reply: Reply<OrderConfirmation>) {
        self.order_replies.lock().unwrap().push_back(reply);
    }

    pub fn quote_calls(&self) -> usize {
        self.quote_calls.load(Ordering::SeqCst)
    }

    pub fn order_calls(&self) -> usize {
        self.order_calls.load(Ordering::SeqCst)
    }

    pub fn quote_times(&self) -> Vec<Instant> {
        self.quote_log.lock().unwrap().iter().map(|(at, _)| *at).collect()
    }
}

#[async_trait]
impl StorefrontBackend for FakeBackend {
    async fn fetch_cart(&self) -> Result<Vec<LineItem>, FetchError> {
        Ok(self.cart.lock().unwrap().clone())
    }

    async fn update_cart(&self, update: &CartUpdate) -> Result<Vec<LineItem>, FetchError> {
        self.cart_updates.lock().unwrap().push(update.clone());
        let mut cart = self.cart.lock().unwrap();
        let sku_id = update.sku_id().clone();
        let current = cart
            .iter()
            .find(|item| item.sku_id == sku_id)
            .map(|item| item.quantity)
            .ok_or_else(|| FetchError::Http {
                status: 404,
                url: "/cart".to_string(),
                message: Some(format!("{sku_id} is not in the cart")),
            })?;
        let quantity = match update {
            CartUpdate::Quantity { quantity, .. } => *quantity,
            CartUpdate::Delta { delta, .. } => current + delta,
        };
        if quantity <= 0 {
            cart.retain(|item| item.sku_id != sku_id);
        } else if let Some(item) = cart.iter_mut().find(|item| item.sku_id == sku_id) {
            item.quantity = quantity;
        }
        Ok(cart.clone())
    }

    async fn clear_cart(&self) -> Result<(), FetchError> {
        self.cart.lock().unwrap().clear();
        Ok(())
    }

    async fn quote(&self, request: &QuoteRequest) -> Result<Quote, FetchError> {
        self.quote_calls.fetch_add(1, Ordering::SeqCst);
        self.quote_log
            .lock()
            .unwrap()
            .push((Instant::now(), request.clone()));
        let reply = self
            .quote_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Reply::ok(quote(1000, 500)));
        tokio::time::sleep(reply.delay).await;
        reply.result
    }

    async fn place_order(&self, request: &OrderRequest) -> Result<OrderConfirmation, FetchError> {
        self.order_calls.fetch_add(1, Ordering::SeqCst);
        self.order_log.lock().unwrap().push(request.clone());
        let reply = self
            .order_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Reply::ok(OrderConfirmation {
                    id: OrderId::new("ord-1"),
                    url: None,
                })
            });
        tokio::time::sleep(reply.delay).await;
        reply.result
    }
}

pub fn usd(cents: i64) -> Money {
    Money::new(cents, Currency::USD)
}

pub fn quote(product_cents: i64, ship_cents: i64) -> Quote {
    Quote {
        total: usd(product_cents + ship_cents),
        product_cost: usd(product_cents),
        ship_cost: usd(ship_cents),
    }
}

pub fn address(line1: &str) -> Address {
    Address::new("Ada Lovelace", line1, "Springfield", "12345", "US")
}

pub fn items() -> Vec<LineItem> {
    vec![
        LineItem::new("bolts", "Hex bolts", 6, usd(1000)).with_bulk_price(usd(800), 5),
        LineItem::new("nuts", "Lock nuts", 2, usd(250)),
    ]
}

pub fn quote_inputs(line1: &str) -> QuoteInputs {
    QuoteInputs {
        address: Some(address(line1)),
        items: items(),
        shipment_option: Some(ShipmentOptionId::new("standard")),
    }
}

pub fn server_error() -> FetchError {
    FetchError::Http {
        status: 503,
        url: "http://shop.test/quote".to_string(),
        message: None,
    }
}
