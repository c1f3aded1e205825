//! Synergia shared layer
//!
//! Everything the console does that is not DOM rendering lives here so it can
//! be exercised on the host:
//! - `models`: records exchanged with the backend
//! - `session` / `store`: login decoding, admin detection, the session store
//! - `api` / `http`: REST wrappers over an injectable HTTP port
//! - `routes`: route table and guards
//! - `pagination`, `listing`, `normalize`, `validation`, `forms`: view helpers

pub mod api;
pub mod config;
pub mod date;
pub mod error;
pub mod forms;
pub mod http;
pub mod listing;
pub mod models;
pub mod normalize;
pub mod pagination;
pub mod routes;
pub mod serde_helper;
pub mod session;
pub mod storage;
pub mod store;
pub mod validation;

pub use api::ApiClient;
pub use config::AppConfig;
pub use error::{ApiError, DecodeError, ErrorEnvelope};
pub use models::*;
pub use routes::{AppRoute, AuthStatus, RouteDecision, ShowcaseSite};
pub use session::Session;
pub use storage::{MemoryStorage, StorageError, StoragePort};
pub use store::{SessionState, SessionStore};

// =========================================================
// Constants
// =========================================================

/// Local-storage key holding the serialized logged-in user.
pub const STORAGE_USER_KEY: &str = "synergia_usuario";
/// Local-storage key mirroring the access token (kept for older pages).
pub const STORAGE_TOKEN_KEY: &str = "authToken";
pub const HEADER_AUTHORIZATION: &str = "Authorization";
