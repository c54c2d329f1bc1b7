//! HTTP request pipeline
//!
//! Wraps a [`reqwest`] client with a request phase (pending-request
//! de-duplication, loading hook, bearer-token injection) and a response
//! phase (envelope classification and failure handling). See
//! [`client::ApiClient`] for the call surface.

pub mod client;
pub mod errors;
pub(crate) mod pending;
pub mod status;

pub use client::{ApiClient, RequestOptions};
pub use errors::ApiError;
pub use status::status_message;
