//! Backend access for the storefront.
//!
//! [`StorefrontBackend`] is the port the checkout flow talks to.
//! [`HttpBackend`] implements it over the REST API:
//!
//! | Call          | Route            |
//! |---------------|------------------|
//! | fetch cart    | `GET /cart`      |
//! | update line   | `POST /cart`     |
//! | clear cart    | `DELETE /cart`   |
//! | price quote   | `POST /quote`    |
//! | place order   | `POST /checkout` |

pub mod backend;
pub mod client;
pub mod error;
pub mod wire;

pub use backend::StorefrontBackend;
pub use client::{ClientConfig, HttpBackend};
pub use error::FetchError;
pub use wire::{CartLineDto, CartUpdate, CartUpdateBody, ErrorBody, QuoteDto};
