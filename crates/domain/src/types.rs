//! Domain data types
//!
//! The response envelope and the user session state. Both serialize with
//! camelCase field names so the persisted session document and the wire
//! shape match the server's conventions.

use serde::{Deserialize, Serialize};

use crate::constants::CODE_SUCCESS;

/// The `{ code, message, data }` wrapper every JSON API response follows.
///
/// `code` partitions into bands: `200` success, `401` unauthorized,
/// `403` forbidden, any other value a generic application error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Whether the envelope carries a success code.
    pub fn is_success(&self) -> bool {
        self.code == CODE_SUCCESS
    }
}

/// The current user's auth and preference state.
///
/// All fields are plain strings with empty defaults and no cross-field
/// invariants. The whole record is what gets persisted to durable storage.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionState {
    /// Bearer token for the current session
    pub token: String,
    /// Token scheme prefix handed out at login
    pub token_head: String,
    /// Refresh token paired with the access token
    pub refresh_token: String,
    /// Display name of the signed-in user
    pub user_name: String,
    /// Avatar URL
    pub avatar: String,
    /// i18n language preference
    pub language: String,
    /// Dark/light theme preference
    pub theme: String,
}
