//! `localStorage` adapter
//!
//! The `Storage` handle is looked up on every call, so the adapter stays a unit
//! struct and satisfies the `Send + Sync` bound of [`StoragePort`].

use std::sync::Arc;
use synergia_shared::storage::{MemoryStorage, StorageError, StoragePort};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    pub fn is_available() -> bool {
        Self::storage().is_some()
    }

    /// `localStorage` when the browser allows it, otherwise an in-memory map
    /// that lasts until the tab closes.
    pub fn detect() -> Arc<dyn StoragePort> {
        if Self::is_available() {
            Arc::new(BrowserStorage)
        } else {
            tracing::warn!("localStorage unavailable, session will not survive a reload");
            Arc::new(MemoryStorage::new())
        }
    }
}

impl StoragePort for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = Self::storage().ok_or(StorageError::Unavailable)?;
        storage.set_item(key, value).map_err(|e| StorageError::Write {
            key: key.to_string(),
            reason: e.as_string().unwrap_or_else(|| format!("{:?}", e)),
        })
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// Calls `on_change(key, new_value)` whenever another tab writes `localStorage`.
/// A `None` key means the storage was cleared.
pub fn on_storage_change<F>(on_change: F)
where
    F: Fn(Option<String>, Option<String>) + 'static,
{
    let closure = Closure::<dyn Fn(web_sys::Event)>::new(move |ev: web_sys::Event| {
        if let Ok(ev) = ev.dyn_into::<web_sys::StorageEvent>() {
            on_change(ev.key(), ev.new_value());
        }
    });

    if let Some(window) = web_sys::window() {
        let _ = window.add_event_listener_with_callback("storage", closure.as_ref().unchecked_ref());
    }

    // the listener lives as long as the page
    closure.forget();
}
