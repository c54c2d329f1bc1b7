//! Domain constants
//!
//! Centralized location for the result-code bands, the fixed request
//! timeout and the collaborator-facing paths shared across the workspace.

// Result-code bands returned in the response envelope
pub const CODE_SUCCESS: i64 = 200;
pub const CODE_UNAUTHORIZED: i64 = 401;
pub const CODE_FORBIDDEN: i64 = 403;

// Fixed transport timeout applied when configuration does not override it
pub const REQUEST_TIMEOUT_MS: u64 = 10_000;

// Single durable-storage key holding the serialized session state
pub const SESSION_STORAGE_KEY: &str = "vaultview-session";

// Redirect targets handed to the navigation collaborator
pub const LOGIN_PATH: &str = "/@login";
pub const OFFLINE_PATH: &str = "/500";
