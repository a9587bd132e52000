//! Order placement behind validation and a single-flight state machine.

use std::sync::Arc;

use serde::Serialize;
use storefront_commerce::cart::LineItem;
use storefront_commerce::checkout::{CheckoutSelection, OrderConfirmation};
use storefront_data::StorefrontBackend;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::CheckoutError;

/// Where a checkout submission stands.
///
/// `Idle -> Validating -> Submitting -> Succeeded | Failed`. A validation
/// failure returns to `Idle`; `Failed` accepts a retry. A submission whose
/// future is dropped mid-request ends in `Failed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum SubmissionPhase {
    Idle,
    Validating,
    Submitting,
    Succeeded { confirmation: OrderConfirmation },
    Failed { message: String },
}

impl SubmissionPhase {
    /// Whether a new submission may start from this phase.
    pub fn accepts_submit(&self) -> bool {
        matches!(self, SubmissionPhase::Idle | SubmissionPhase::Failed { .. })
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, SubmissionPhase::Validating | SubmissionPhase::Submitting)
    }
}

/// Places orders at most once at a time.
///
/// Shared by reference; concurrent `submit` calls race on an atomic
/// check-and-set of the phase, and the loser returns without touching the
/// network.
#[derive(Debug)]
pub struct CheckoutGuard<B: ?Sized> {
    backend: Arc<B>,
    phase: watch::Sender<SubmissionPhase>,
}

impl<B> CheckoutGuard<B>
where
    B: StorefrontBackend + ?Sized,
{
    pub fn new(backend: Arc<B>) -> Self {
        let (phase, _) = watch::channel(SubmissionPhase::Idle);
        Self { backend, phase }
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SubmissionPhase> {
        self.phase.subscribe()
    }

    /// Validate `selection` and place an order for `items`.
    ///
    /// Validation checks the shipment option, then the address, then the
    /// payment option, and stops at the first missing field.
    pub async fn submit(
        &self,
        selection: &CheckoutSelection,
        items: &[LineItem],
    ) -> Result<OrderConfirmation, CheckoutError> {
        self.enter()?;
        let attempt = Attempt::new(&self.phase);

        let request = match selection.order_request(items) {
            Ok(request) => request,
            Err(error) => {
                debug!(%error, "checkout validation failed");
                attempt.finish(SubmissionPhase::Idle);
                return Err(error.into());
            }
        };

        self.phase.send_replace(SubmissionPhase::Submitting);
        info!(
            items = request.items.len(),
            payment_option = %request.payment_option,
            buy_now = request.buy_now,
            "placing order"
        );

        match self.backend.place_order(&request).await {
            Ok(confirmation) => {
                info!(order_id = %confirmation.id, redirect = confirmation.url.is_some(), "order placed");
                attempt.finish(SubmissionPhase::Succeeded {
                    confirmation: confirmation.clone(),
                });
                Ok(confirmation)
            }
            Err(source) => {
                let error = CheckoutError::from(source);
                warn!(%error, "order placement failed");
                attempt.finish(SubmissionPhase::Failed {
                    message: error.to_string(),
                });
                Err(error)
            }
        }
    }

    /// Start a fresh checkout after a success.
    ///
    /// Does nothing while a submission is in progress.
    pub fn reset(&self) -> bool {
        self.phase.send_if_modified(|phase| {
            if phase.is_busy() || *phase == SubmissionPhase::Idle {
                return false;
            }
            *phase = SubmissionPhase::Idle;
            true
        })
    }

    fn enter(&self) -> Result<(), CheckoutError> {
        let mut refusal = None;
        self.phase.send_if_modified(|phase| {
            if phase.accepts_submit() {
                *phase = SubmissionPhase::Validating;
                return true;
            }
            refusal = Some(match phase {
                SubmissionPhase::Succeeded { .. } => CheckoutError::AlreadyPlaced,
                _ => CheckoutError::AlreadySubmitting,
            });
            false
        });

        match refusal {
            Some(error) => {
                debug!(%error, "submit refused");
                Err(error)
            }
            None => Ok(()),
        }
    }
}

/// Message recorded when a submission is abandoned before the backend answers.
pub const INTERRUPTED_MESSAGE: &str = "Your order was interrupted. Please try again.";

/// One submission in progress.
///
/// Records the outcome via [`Attempt::finish`]. If the owning `submit`
/// future is dropped first, the phase moves to `Failed` so the checkout can
/// be retried.
struct Attempt<'a> {
    phase: &'a watch::Sender<SubmissionPhase>,
    finished: bool,
}

impl<'a> Attempt<'a> {
    fn new(phase: &'a watch::Sender<SubmissionPhase>) -> Self {
        Self {
            phase,
            finished: false,
        }
    }

    fn finish(mut self, outcome: SubmissionPhase) {
        self.finished = true;
        self.phase.send_replace(outcome);
    }
}

impl Drop for Attempt<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        warn!("order submission dropped before completion");
        self.phase.send_if_modified(|phase| {
            if !phase.is_busy() {
                return false;
            }
            *phase = SubmissionPhase::Failed {
                message: INTERRUPTED_MESSAGE.to_string(),
            };
            true
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_transitions_allowed() {
        assert!(SubmissionPhase::Idle.accepts_submit());
        assert!(SubmissionPhase::Failed {
            message: "declined".to_string()
        }
        .accepts_submit());
        assert!(!SubmissionPhase::Submitting.accepts_submit());
        assert!(!SubmissionPhase::Validating.accepts_submit());
    }
}
