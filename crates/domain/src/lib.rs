//! # VaultView Domain
//!
//! Shared domain types for the VaultView API client.
//!
//! This crate contains:
//! - The response envelope every JSON API endpoint follows
//! - The user session state and its persisted shape
//! - Result-code bands, redirect paths and other domain constants
//!
//! ## Architecture
//! - No dependencies on other VaultView crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod constants;
pub mod types;

// Re-export commonly used items
pub use types::{Envelope, SessionState};
