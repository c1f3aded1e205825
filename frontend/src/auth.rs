//! Authentication context
//!
//! Holds the shared [`SessionStore`] and the REST client and mirrors the store
//! into a signal. The router only sees the derived [`AuthStatus`].

use crate::web::router::hard_navigate;
use crate::web::{BrowserStorage, FetchHttpClient, on_storage_change};
use leptos::prelude::*;
use std::sync::Arc;
use synergia_shared::{
    ApiClient, AppConfig, AppRoute, AuthStatus, Session, SessionState, SessionStore,
};

pub type Api = ApiClient<FetchHttpClient>;

#[derive(Clone, Copy)]
pub struct AuthContext {
    /// Mirror of the store, updated by a store listener.
    pub state: RwSignal<SessionState>,
    store: StoredValue<Arc<SessionStore>>,
    api: StoredValue<Arc<Api>>,
    config: StoredValue<AppConfig>,
}

impl AuthContext {
    pub fn new(config: AppConfig) -> Self {
        let storage = BrowserStorage::detect();
        let store = Arc::new(SessionStore::new(storage.clone()));

        let hook_store = store.clone();
        let api = ApiClient::new(&config, FetchHttpClient, storage)
            .with_unauthorized_hook(move || {
                hook_store.handle_unauthorized();
                hard_navigate(&AppRoute::Login.to_path());
            });

        let state = RwSignal::new(store.state());
        store.subscribe(move |s| state.set(s.clone()));

        Self {
            state,
            store: StoredValue::new(store),
            api: StoredValue::new(Arc::new(api)),
            config: StoredValue::new(config),
        }
    }

    pub fn store(&self) -> Arc<SessionStore> {
        self.store.get_value()
    }

    pub fn api(&self) -> Arc<Api> {
        self.api.get_value()
    }

    pub fn config(&self) -> AppConfig {
        self.config.get_value()
    }

    pub fn current_user(&self) -> Option<Session> {
        self.state.with(|s| s.current_user.clone())
    }

    pub fn is_admin(&self) -> bool {
        self.state.with(|s| s.is_admin())
    }

    /// Injected into the router for its guards.
    pub fn status_signal(&self) -> Signal<AuthStatus> {
        let state = self.state;
        Signal::derive(move || state.with(|s| AuthStatus::from_session(s.current_user.as_ref())))
    }

    pub fn logout(&self) {
        self.store().logout();
    }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// Keeps the session in sync with logins and logouts made in other tabs.
pub fn init_auth(ctx: &AuthContext) {
    let store = ctx.store();
    on_storage_change(move |key, value| {
        store.sync_from_storage_event(key.as_deref(), value.as_deref());
    });
}
