//! Persisted user-session store
//!
//! Holds [`SessionState`] in memory and writes the whole record to durable
//! storage on every mutation. Setters deliberately return nothing: a
//! persistence failure is logged and the in-memory state stays
//! authoritative for the rest of the run.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::warn;
use vaultview_domain::constants::SESSION_STORAGE_KEY;
use vaultview_domain::SessionState;

use super::storage::SessionStorage;

/// In-memory session state with transparent persistence.
pub struct SessionStore {
    state: RwLock<SessionState>,
    storage: Arc<dyn SessionStorage>,
}

impl SessionStore {
    /// Create the store, rehydrating state from durable storage if present.
    ///
    /// A missing or unreadable document falls back to empty defaults.
    pub fn load(storage: Arc<dyn SessionStorage>) -> Self {
        let state = match storage.read(SESSION_STORAGE_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(error = %e, "persisted session unreadable, starting fresh");
                SessionState::default()
            }),
            Ok(None) => SessionState::default(),
            Err(e) => {
                warn!(error = %e, "session storage read failed, starting fresh");
                SessionState::default()
            }
        };

        Self { state: RwLock::new(state), storage }
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> SessionState {
        self.state.read().clone()
    }

    /// Current in-memory token.
    pub fn token(&self) -> String {
        self.state.read().token.clone()
    }

    pub fn user_name(&self) -> String {
        self.state.read().user_name.clone()
    }

    pub fn avatar(&self) -> String {
        self.state.read().avatar.clone()
    }

    /// Token used for the `Authorization` header: the in-memory value,
    /// falling back to the persisted document when it is empty.
    pub fn bearer_token(&self) -> String {
        let token = self.token();
        if !token.is_empty() {
            return token;
        }
        match self.storage.read(SESSION_STORAGE_KEY) {
            Ok(Some(raw)) => serde_json::from_str::<SessionState>(&raw)
                .map(|s| s.token)
                .unwrap_or_default(),
            Ok(None) => String::new(),
            Err(e) => {
                warn!(error = %e, "session storage read failed during token lookup");
                String::new()
            }
        }
    }

    pub fn set_token(&self, token: impl Into<String>) {
        self.mutate(|s| s.token = token.into());
    }

    pub fn set_token_head(&self, token_head: impl Into<String>) {
        self.mutate(|s| s.token_head = token_head.into());
    }

    pub fn set_refresh_token(&self, refresh_token: impl Into<String>) {
        self.mutate(|s| s.refresh_token = refresh_token.into());
    }

    pub fn set_user_name(&self, user_name: impl Into<String>) {
        self.mutate(|s| s.user_name = user_name.into());
    }

    pub fn set_avatar(&self, avatar: impl Into<String>) {
        self.mutate(|s| s.avatar = avatar.into());
    }

    pub fn set_language(&self, language: impl Into<String>) {
        self.mutate(|s| s.language = language.into());
    }

    pub fn set_theme(&self, theme: impl Into<String>) {
        self.mutate(|s| s.theme = theme.into());
    }

    /// Clear the identity fields after an authentication failure.
    ///
    /// Token, user name and avatar are emptied in one mutation (one
    /// persistence write); preferences are left alone.
    pub fn clear_identity(&self) {
        self.mutate(|s| {
            s.token.clear();
            s.user_name.clear();
            s.avatar.clear();
        });
    }

    fn mutate(&self, f: impl FnOnce(&mut SessionState)) {
        let snapshot = {
            let mut state = self.state.write();
            f(&mut state);
            state.clone()
        };
        self.persist(&snapshot);
    }

    fn persist(&self, state: &SessionState) {
        let raw = match serde_json::to_string(state) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "failed to serialize session state");
                return;
            }
        };
        if let Err(e) = self.storage.write(SESSION_STORAGE_KEY, &raw) {
            warn!(error = %e, "failed to persist session state");
        }
    }
}
