//! # Services Layer
//!
//! External resources used by the application controller: the two Mesto
//! servers and the token storage. Each sits behind a trait so the controller
//! can be driven by fakes in tests.

pub mod auth;
pub mod content;
pub mod http;
pub mod storage;

// Re-export service types
pub use auth::{AuthApi, AuthUser, HttpAuthClient};
pub use content::{ContentApi, HttpContentClient};
pub use http::{ApiError, HttpTransport};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
