//! # VaultView Client
//!
//! HTTP request pipeline and persisted session store for the VaultView
//! application.
//!
//! The pipeline wraps a [`reqwest`] client with a request phase (in-flight
//! de-duplication, loading hook, bearer-token injection) and a response
//! phase (envelope classification, user notification, session recovery,
//! offline redirect). The session store keeps the signed-in user's state in
//! memory and transparently persists it through a pluggable storage seam.
//!
//! # Architecture
//!
//! - [`ApiClient`] is constructed explicitly at the application's
//!   composition point; there are no module-scope globals.
//! - UI concerns (toasts, routing, loading overlay, connectivity) enter
//!   through the trait objects bundled in [`UiHooks`].
//! - Cancellation of duplicate in-flight requests uses
//!   `tokio_util::sync::CancellationToken`; a cancelled call settles with
//!   [`ApiError::Cancelled`], a valid terminal state rather than a fault.
//! - No retry logic anywhere: a failed or cancelled call is never reissued.

pub mod config;
pub mod http;
pub mod session;
pub mod ui;

pub use config::ApiClientConfig;
pub use http::client::{ApiClient, RequestOptions};
pub use http::errors::ApiError;
pub use http::status::status_message;
pub use session::storage::{FileStorage, MemoryStorage, SessionStorage, StorageError};
pub use session::store::SessionStore;
pub use ui::{Connectivity, LoadingIndicator, NavTarget, Navigator, Notifier, UiHooks};
pub use vaultview_domain::{Envelope, SessionState};
