//! Session store and its durable-storage seam
//!
//! [`store::SessionStore`] owns the in-memory [`SessionState`] and persists
//! the whole record through a [`storage::SessionStorage`] implementation on
//! every mutation. Callers of the setters never deal with persistence.
//!
//! [`SessionState`]: vaultview_domain::SessionState

pub mod storage;
pub mod store;

pub use storage::{FileStorage, MemoryStorage, SessionStorage, StorageError};
pub use store::SessionStore;
