//! Debounced, last-request-wins shipping quotes.
//!
//! A [`QuoteCoordinator`] owns one background task. Callers push the latest
//! [`QuoteInputs`] and read a [`QuoteView`]; the task decides when to call
//! the backend:
//!
//! 1. Every input change restarts the quiet period and drops any request
//!    still in flight. A dropped request's response is never applied.
//! 2. When the quiet period elapses, a request is issued only if the inputs
//!    have an address, items and a shipment option.
//! 3. A successful response becomes the displayed quote. A failed one keeps
//!    the previous quote for reference and marks the view as failed; totals
//!    fall back to the client estimate until a quote for the current inputs
//!    arrives.

use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use storefront_commerce::cart::CartAggregate;
use storefront_commerce::checkout::{Quote, QuoteInputs, ReconciledTotals};
use storefront_commerce::CommerceError;
use storefront_data::{FetchError, StorefrontBackend};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, warn};

const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Quote lookup settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteConfig {
    /// Quiet period after the last input change before a request is issued.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl QuoteConfig {
    pub fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Lifecycle of the displayed quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    /// No request pending: inputs incomplete, or nothing entered yet.
    Idle,
    /// Inputs changed; waiting out the quiet period.
    Debouncing,
    /// A request is in flight.
    Requesting,
    /// The quote matches the current inputs.
    Ready,
    /// The last request failed. The previous quote, if any, is still shown.
    Failed,
}

impl QuoteStatus {
    pub fn is_pending(self) -> bool {
        matches!(self, QuoteStatus::Debouncing | QuoteStatus::Requesting)
    }
}

/// What the checkout page displays for shipping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteView {
    pub status: QuoteStatus,
    /// Most recent successful quote.
    pub quote: Option<Quote>,
    /// Input revision `quote` was priced for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_revision: Option<u64>,
    /// Input revision this view reflects.
    pub revision: u64,
    /// Customer-facing text for the last failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Default for QuoteView {
    fn default() -> Self {
        Self {
            status: QuoteStatus::Idle,
            quote: None,
            quote_revision: None,
            revision: 0,
            error: None,
        }
    }
}

impl QuoteView {
    /// The held quote, if it was priced for the current inputs.
    ///
    /// A quote for older inputs is kept for reference but never displayed
    /// as the authoritative total.
    pub fn current_quote(&self) -> Option<&Quote> {
        match (self.status, self.quote_revision) {
            (QuoteStatus::Ready, Some(priced_for)) if priced_for == self.revision => {
                self.quote.as_ref()
            }
            _ => None,
        }
    }

    /// Display totals for `aggregate`: the current quote when there is one,
    /// the client estimate otherwise.
    pub fn reconcile(&self, aggregate: &CartAggregate) -> Result<ReconciledTotals, CommerceError> {
        ReconciledTotals::reconcile(aggregate, self.current_quote())
    }
}

#[derive(Debug, Clone, Default)]
struct Revision {
    number: u64,
    inputs: QuoteInputs,
}

/// Handle to the background quote task.
///
/// Dropping the handle stops the task and cancels any request in flight.
#[derive(Debug)]
pub struct QuoteCoordinator {
    inputs: watch::Sender<Revision>,
    view: watch::Receiver<QuoteView>,
    task: JoinHandle<()>,
}

impl QuoteCoordinator {
    /// Start the coordinator on the current tokio runtime.
    pub fn spawn<B>(backend: Arc<B>, config: QuoteConfig) -> Self
    where
        B: StorefrontBackend + ?Sized + 'static,
    {
        let (inputs, inputs_rx) = watch::channel(Revision::default());
        let (view_tx, view) = watch::channel(QuoteView::default());
        let task = tokio::spawn(run(backend, inputs_rx, view_tx, config.quiet_period()));
        Self { inputs, view, task }
    }

    /// Replace the quote inputs. Identical inputs are not a change.
    ///
    /// Returns the revision the inputs were recorded under.
    pub fn update(&self, inputs: QuoteInputs) -> u64 {
        self.inputs.send_if_modified(|current| {
            if current.inputs == inputs {
                return false;
            }
            current.number += 1;
            current.inputs = inputs;
            true
        });
        self.revision()
    }

    /// Edit the quote inputs in place.
    pub fn update_with(&self, edit: impl FnOnce(&mut QuoteInputs)) -> u64 {
        let mut inputs = self.inputs.borrow().inputs.clone();
        edit(&mut inputs);
        self.update(inputs)
    }

    /// Latest input revision.
    pub fn revision(&self) -> u64 {
        self.inputs.borrow().number
    }

    /// Snapshot of the current view.
    pub fn current(&self) -> QuoteView {
        self.view.borrow().clone()
    }

    /// Receiver for view changes.
    pub fn subscribe(&self) -> watch::Receiver<QuoteView> {
        self.view.clone()
    }

    /// Wait until the view reflects the latest inputs and nothing is pending.
    pub async fn settled(&self) -> QuoteView {
        let target = self.revision();
        let mut view = self.view.clone();
        let settled = match view
            .wait_for(|v| v.revision >= target && !v.status.is_pending())
            .await
        {
            Ok(settled) => Some(settled.clone()),
            Err(_) => None,
        };
        settled.unwrap_or_else(|| view.borrow().clone())
    }
}

impl Drop for QuoteCoordinator {
    fn drop(&mut self) {
        self.task.abort();
    }
}

type InFlight = BoxFuture<'static, Result<Quote, FetchError>>;

async fn run<B>(
    backend: Arc<B>,
    mut inputs: watch::Receiver<Revision>,
    view: watch::Sender<QuoteView>,
    quiet_period: Duration,
) where
    B: StorefrontBackend + ?Sized + 'static,
{
    let mut deadline: Option<Instant> = None;
    let mut in_flight: Option<InFlight> = None;
    let mut revision = 0;

    loop {
        tokio::select! {
            changed = inputs.changed() => {
                if changed.is_err() {
                    debug!("quote inputs closed, stopping coordinator");
                    break;
                }
                revision = inputs.borrow_and_update().number;
                if in_flight.take().is_some() {
                    debug!(revision, "superseded in-flight quote request");
                }
                deadline = Some(Instant::now() + quiet_period);
                view.send_modify(|v| {
                    v.status = QuoteStatus::Debouncing;
                    v.revision = revision;
                });
            }

            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                deadline = None;
                let request = inputs.borrow().inputs.to_request();
                match request {
                    Some(request) => {
                        debug!(revision, items = request.items.len(), "issuing quote request");
                        let backend = Arc::clone(&backend);
                        in_flight = Some(async move { backend.quote(&request).await }.boxed());
                        view.send_modify(|v| v.status = QuoteStatus::Requesting);
                    }
                    None => {
                        debug!(revision, "quote inputs incomplete, skipping request");
                        view.send_modify(|v| v.status = QuoteStatus::Idle);
                    }
                }
            }

            result = async {
                match in_flight.as_mut() {
                    Some(request) => request.await,
                    None => std::future::pending().await,
                }
            } => {
                in_flight = None;
                match result {
                    Ok(quote) => {
                        info!(
                            revision,
                            total = %quote.total,
                            ship_cost = %quote.ship_cost,
                            "quote received"
                        );
                        view.send_modify(|v| {
                            v.status = QuoteStatus::Ready;
                            v.quote = Some(quote);
                            v.quote_revision = Some(revision);
                            v.error = None;
                        });
                    }
                    Err(error) => {
                        warn!(revision, error = %error, "quote request failed, keeping previous figures");
                        view.send_modify(|v| {
                            v.status = QuoteStatus::Failed;
                            v.error = Some(error.user_message());
                        });
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_quiet_period() {
        assert_eq!(QuoteConfig::default().quiet_period(), Duration::from_millis(500));
    }

    #[test]
    fn test_view_without_quote_reconciles_to_estimate() {
        use storefront_commerce::cart::{Aggregator, LineItem};
        use storefront_commerce::money::{Currency, Money};

        let items = vec![LineItem::new("a", "Bolts", 2, Money::new(500, Currency::USD))];
        let aggregate = Aggregator::new()
            .aggregate(&items, None)
            .unwrap()
            .into_priced()
            .unwrap();

        let totals = QuoteView::default().reconcile(&aggregate).unwrap();
        assert!(!totals.is_authoritative());
        assert_eq!(totals.total.amount_cents, 1000);
    }

    #[test]
    fn test_quote_for_older_inputs_is_not_current() {
        use storefront_commerce::money::{Currency, Money};

        let usd = |cents| Money::new(cents, Currency::USD);
        let quote = Quote {
            total: usd(1500),
            product_cost: usd(1000),
            ship_cost: usd(500),
        };
        let ready = QuoteView {
            status: QuoteStatus::Ready,
            quote: Some(quote),
            quote_revision: Some(3),
            revision: 3,
            error: None,
        };
        assert_eq!(ready.current_quote(), Some(&quote));

        let moved_on = QuoteView {
            status: QuoteStatus::Debouncing,
            revision: 4,
            ..ready.clone()
        };
        assert_eq!(moved_on.current_quote(), None);

        let failed = QuoteView {
            status: QuoteStatus::Failed,
            revision: 4,
            ..ready
        };
        assert_eq!(failed.current_quote(), None);
    }

    #[test]
    fn test_pending_statuses() {
        assert!(QuoteStatus::Debouncing.is_pending());
        assert!(QuoteStatus::Requesting.is_pending());
        assert!(!QuoteStatus::Failed.is_pending());
        assert!(!QuoteStatus::Idle.is_pending());
    }
}
