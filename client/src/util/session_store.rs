//! Browser Web Storage helpers for the login session marker.
//!
//! SYSTEM CONTEXT
//! ==============
//! "Remember me" sessions live in `localStorage` and survive a browser
//! restart; all others live in `sessionStorage`. These helpers centralize the
//! hydrate-only read/write behavior so `HttpAuthManager` stays free of
//! web-sys glue.

#[cfg(test)]
#[path = "session_store_test.rs"]
mod session_store_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::net::types::Session;

/// Storage key holding the serialized [`Session`].
pub const SESSION_KEY: &str = "portal_session";

/// Which Web Storage area to use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageKind {
    Local,
    Session,
}

impl StorageKind {
    /// Storage area matching the "remember me" choice.
    pub fn for_persistence(persist_session: bool) -> Self {
        if persist_session { Self::Local } else { Self::Session }
    }
}

#[cfg(feature = "hydrate")]
fn storage(kind: StorageKind) -> Option<web_sys::Storage> {
    let window = web_sys::window()?;
    match kind {
        StorageKind::Local => window.local_storage().ok().flatten(),
        StorageKind::Session => window.session_storage().ok().flatten(),
    }
}

/// Load a JSON value from the given storage area for `key`.
pub fn load_json<T: DeserializeOwned>(kind: StorageKind, key: &str) -> Option<T> {
    #[cfg(feature = "hydrate")]
    {
        let raw = storage(kind)?.get_item(key).ok().flatten()?;
        serde_json::from_str(&raw).ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (kind, key);
        None
    }
}

/// Save a JSON value to the given storage area for `key`.
pub fn save_json<T: Serialize>(kind: StorageKind, key: &str, value: &T) {
    #[cfg(feature = "hydrate")]
    {
        let Some(storage) = storage(kind) else {
            return;
        };
        let Ok(raw) = serde_json::to_string(value) else {
            return;
        };
        let _ = storage.set_item(key, &raw);
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (kind, key, value);
    }
}

/// Remove `key` from the given storage area.
pub fn remove(kind: StorageKind, key: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(storage) = storage(kind) {
            let _ = storage.remove_item(key);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (kind, key);
    }
}

pub fn load_session(kind: StorageKind) -> Option<Session> {
    load_json(kind, SESSION_KEY)
}

pub fn save_session(kind: StorageKind, session: &Session) {
    save_json(kind, SESSION_KEY, session);
}

/// Forget the session marker in both storage areas.
pub fn clear_sessions() {
    remove(StorageKind::Local, SESSION_KEY);
    remove(StorageKind::Session, SESSION_KEY);
}

/// Current wall-clock time in epoch milliseconds (0 off-browser).
#[allow(clippy::cast_possible_truncation)]
pub fn now_ms() -> i64 {
    #[cfg(feature = "hydrate")]
    {
        js_sys::Date::now() as i64
    }
    #[cfg(not(feature = "hydrate"))]
    {
        0
    }
}
