//! Collaborator seams for UI side effects
//!
//! The toast system, router, loading overlay and connectivity probe all
//! live outside this crate. The pipeline only ever talks to them through
//! the trait objects bundled in [`UiHooks`], which keeps the side effects
//! injectable and the tests hermetic.

use std::sync::Arc;

use vaultview_domain::constants::{LOGIN_PATH, OFFLINE_PATH};

/// User-facing notification sink (toast system).
pub trait Notifier: Send + Sync {
    /// Show an error notification.
    fn error(&self, message: &str);
}

/// Redirect destination handed to the navigation collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    /// Login view, used when the server declares the session invalid.
    Login,
    /// Offline/error view, used when connectivity is lost.
    Offline,
}

impl NavTarget {
    /// Application route for this target.
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => LOGIN_PATH,
            Self::Offline => OFFLINE_PATH,
        }
    }
}

/// Navigation collaborator (router).
pub trait Navigator: Send + Sync {
    /// Redirect the user to the given target.
    fn redirect(&self, target: NavTarget);
}

/// Loading-overlay collaborator, driven per call unless the caller opts
/// out via [`RequestOptions::no_loading`](crate::RequestOptions).
pub trait LoadingIndicator: Send + Sync {
    fn begin(&self);
    fn finish(&self);
}

/// Connectivity probe (the `navigator.onLine` analogue).
pub trait Connectivity: Send + Sync {
    fn is_online(&self) -> bool;
}

/// Bundle of the injected UI collaborators.
///
/// Defaults are no-ops that report the client as online, so headless
/// callers can build a pipeline without wiring any UI at all.
#[derive(Clone)]
pub struct UiHooks {
    pub notifier: Arc<dyn Notifier>,
    pub navigator: Arc<dyn Navigator>,
    pub loading: Arc<dyn LoadingIndicator>,
    pub connectivity: Arc<dyn Connectivity>,
}

impl Default for UiHooks {
    fn default() -> Self {
        let noop = Arc::new(NoopUi);
        Self {
            notifier: noop.clone(),
            navigator: noop.clone(),
            loading: noop.clone(),
            connectivity: noop,
        }
    }
}

/// No-op implementation of every collaborator trait.
struct NoopUi;

impl Notifier for NoopUi {
    fn error(&self, _message: &str) {}
}

impl Navigator for NoopUi {
    fn redirect(&self, _target: NavTarget) {}
}

impl LoadingIndicator for NoopUi {
    fn begin(&self) {}
    fn finish(&self) {}
}

impl Connectivity for NoopUi {
    fn is_online(&self) -> bool {
        true
    }
}
