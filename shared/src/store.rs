//! Session store
//!
//! Owns the logged-in user and mirrors it to local storage. Views subscribe
//! to state changes; the store itself knows nothing about rendering.

use crate::api::ApiClient;
use crate::error::{ApiError, ApiResult};
use crate::http::HttpClient;
use crate::models::{LoginRequest, RegisterRequest, User};
use crate::session::{Session, decode_session};
use crate::storage::StoragePort;
use crate::{STORAGE_TOKEN_KEY, STORAGE_USER_KEY};
use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    pub current_user: Option<Session>,
    pub is_loading: bool,
    pub last_error: Option<String>,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.current_user.as_ref().is_some_and(|s| s.is_admin)
    }
}

pub type ListenerId = u64;
type Listener = Arc<dyn Fn(&SessionState) + Send + Sync>;

pub struct SessionStore {
    storage: Arc<dyn StoragePort>,
    state: RwLock<SessionState>,
    listeners: RwLock<Vec<(ListenerId, Listener)>>,
    next_listener: AtomicU64,
}

/// Reads the stored user; an unparseable entry counts as logged out.
fn load_session(storage: &dyn StoragePort) -> Option<Session> {
    let raw = storage.get(STORAGE_USER_KEY)?;
    parse_stored(&raw)
}

fn parse_stored(raw: &str) -> Option<Session> {
    match Session::from_stored(raw) {
        Ok(session) => Some(session),
        Err(e) => {
            tracing::warn!("discarding stored session: {}", e);
            None
        }
    }
}

impl SessionStore {
    pub fn new(storage: Arc<dyn StoragePort>) -> Self {
        let current_user = load_session(storage.as_ref());
        if let Some(session) = &current_user {
            tracing::debug!(
                "session restored for user {:?} (admin: {})",
                session.user_id(),
                session.is_admin
            );
        }
        Self {
            storage,
            state: RwLock::new(SessionState {
                current_user,
                ..Default::default()
            }),
            listeners: RwLock::new(Vec::new()),
            next_listener: AtomicU64::new(1),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state.read().clone()
    }

    pub fn current_user(&self) -> Option<Session> {
        self.state.read().current_user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read().is_authenticated()
    }

    pub fn is_admin(&self) -> bool {
        self.state.read().is_admin()
    }

    // ---------------------------------------------------------
    // Subscriptions
    // ---------------------------------------------------------

    pub fn subscribe(&self, listener: impl Fn(&SessionState) + Send + Sync + 'static) -> ListenerId {
        let id = self.next_listener.fetch_add(1, Ordering::Relaxed);
        self.listeners.write().push((id, Arc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: ListenerId) {
        self.listeners.write().retain(|(listener_id, _)| *listener_id != id);
    }

    fn update(&self, f: impl FnOnce(&mut SessionState)) {
        let snapshot = {
            let mut state = self.state.write();
            f(&mut state);
            state.clone()
        };
        // listeners run outside the locks so they may read the store again
        let listeners: Vec<Listener> = self
            .listeners
            .read()
            .iter()
            .map(|(_, l)| l.clone())
            .collect();
        for listener in listeners {
            listener(&snapshot);
        }
    }

    // ---------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------

    fn persist(&self, session: &Session) {
        let stored = session.to_stored_value().to_string();
        if let Err(e) = self.storage.set(STORAGE_USER_KEY, &stored) {
            tracing::warn!("failed to persist session: {}", e);
        }
        match &session.token {
            Some(token) => {
                if let Err(e) = self.storage.set(STORAGE_TOKEN_KEY, token) {
                    tracing::warn!("failed to mirror token: {}", e);
                }
            }
            None => self.storage.remove(STORAGE_TOKEN_KEY),
        }
    }

    fn clear_storage(&self) {
        self.storage.remove(STORAGE_USER_KEY);
        self.storage.remove(STORAGE_TOKEN_KEY);
    }

    // ---------------------------------------------------------
    // Operations
    // ---------------------------------------------------------

    pub async fn login<C: HttpClient>(
        &self,
        api: &ApiClient<C>,
        email: &str,
        password: &str,
    ) -> ApiResult<Session> {
        self.update(|s| {
            s.is_loading = true;
            s.last_error = None;
        });

        let credentials = LoginRequest {
            email: email.trim().to_string(),
            senha: password.to_string(),
        };

        let result = match api.login(&credentials).await {
            Ok(value) => decode_session(&value).map_err(ApiError::from),
            Err(e) => Err(e),
        };

        match result {
            Ok(session) => {
                tracing::info!(
                    "login ok for user {:?} (admin: {})",
                    session.user_id(),
                    session.is_admin
                );
                self.persist(&session);
                let stored = session.clone();
                self.update(move |s| {
                    s.current_user = Some(stored);
                    s.is_loading = false;
                });
                Ok(session)
            }
            Err(e) => {
                tracing::warn!("login failed: {}", e);
                let message = e.user_message();
                self.update(move |s| {
                    s.last_error = Some(message);
                    s.is_loading = false;
                });
                Err(e)
            }
        }
    }

    pub fn logout(&self) {
        tracing::info!("logout");
        self.clear_storage();
        self.update(|s| {
            s.current_user = None;
            s.last_error = None;
        });
    }

    /// Creates the account without logging in.
    pub async fn register<C: HttpClient>(
        &self,
        api: &ApiClient<C>,
        payload: &RegisterRequest,
    ) -> ApiResult<User> {
        self.update(|s| {
            s.is_loading = true;
            s.last_error = None;
        });

        let result = api.register(payload).await;
        let error = result.as_ref().err().map(ApiError::user_message);
        if let Some(message) = &error {
            tracing::warn!("registration failed: {}", message);
        }
        self.update(move |s| {
            s.is_loading = false;
            s.last_error = error;
        });
        result
    }

    /// Replaces the logged-in user (profile edits), keeping token and role.
    pub fn update_user(&self, user: User) {
        let session = {
            let state = self.state.read();
            match &state.current_user {
                Some(current) => Session {
                    user,
                    token: current.token.clone(),
                    is_admin: current.is_admin,
                },
                None => Session {
                    user,
                    ..Default::default()
                },
            }
        };
        self.persist(&session);
        self.update(move |s| s.current_user = Some(session));
    }

    /// Cross-tab sync. `key == None` means the whole storage was cleared.
    pub fn sync_from_storage_event(&self, key: Option<&str>, new_value: Option<&str>) {
        if key.is_some_and(|k| k != STORAGE_USER_KEY) {
            return;
        }
        let session = new_value.and_then(parse_stored);
        tracing::debug!("session synced from another tab (logged in: {})", session.is_some());
        self.update(move |s| s.current_user = session);
    }

    /// Re-reads the stored user, e.g. after another component wrote it.
    pub fn reload_from_storage(&self) {
        let session = load_session(self.storage.as_ref());
        self.update(move |s| s.current_user = session);
    }

    /// 401 path: both keys and the in-memory user are dropped.
    pub fn handle_unauthorized(&self) {
        tracing::warn!("unauthorized, dropping session");
        self.clear_storage();
        self.update(|s| {
            s.current_user = None;
            s.last_error = Some(ApiError::Unauthorized.user_message());
        });
    }
}
