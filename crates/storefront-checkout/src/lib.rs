//! Checkout coordination for the storefront.
//!
//! - [`QuoteCoordinator`]: debounced, last-request-wins shipping quotes
//! - [`CheckoutGuard`]: validated, single-flight order placement
//! - [`CartSession`]: cart mutations mirrored against the backend
//!
//! Everything here runs on tokio and talks to the backend through
//! [`storefront_data::StorefrontBackend`].

pub mod error;
pub mod guard;
pub mod quote;
pub mod session;

pub use error::{CartError, CheckoutError};
pub use guard::{CheckoutGuard, SubmissionPhase, INTERRUPTED_MESSAGE};
pub use quote::{QuoteConfig, QuoteCoordinator, QuoteStatus, QuoteView};
pub use session::CartSession;
