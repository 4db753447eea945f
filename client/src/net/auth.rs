//! Authentication collaborator used by the login and home pages.
//!
//! ARCHITECTURE
//! ============
//! Pages depend on the `AuthManager` trait rather than on HTTP directly, so
//! the login reducer can be exercised with an in-memory fake. The browser
//! implementation posts credentials through `net::api` and mirrors the
//! resulting session into Web Storage, which is what makes `is_logged_in`
//! answerable synchronously.
//!
//! TRADE-OFFS
//! ==========
//! The server session cookie is HttpOnly, so the stored marker is only a
//! hint. Guarded pages confirm it with `refresh_session`, which drops the
//! marker once the server answers 401. A failed check of any other kind
//! keeps the marker so a flaky network does not sign the user out.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use thiserror::Error;

use super::api;
use super::types::{LoginRequest, Session};
use crate::config::PortalConfig;
use crate::util::session_store::{self, StorageKind};

/// HTTP status the auth endpoint uses for rejected credentials.
pub const UNAUTHORIZED: u16 = 401;

/// Failure of a single `authenticate` call.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The endpoint answered 401.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// Anything else; `status` is `None` when no response was received.
    #[error("authentication failed: {detail}")]
    Unknown { status: Option<u16>, detail: String },
}

impl AuthError {
    /// Classify a non-success HTTP status.
    pub fn from_status(status: u16, detail: impl Into<String>) -> Self {
        if status == UNAUTHORIZED {
            Self::InvalidCredentials
        } else {
            Self::Unknown { status: Some(status), detail: detail.into() }
        }
    }

    /// A failure that never reached the server (network, CORS, decoding).
    pub fn transport(detail: impl Into<String>) -> Self {
        Self::Unknown { status: None, detail: detail.into() }
    }

    /// Status code carried by the failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::InvalidCredentials => Some(UNAUTHORIZED),
            Self::Unknown { status, .. } => *status,
        }
    }
}

/// Session capability the login view delegates to.
#[allow(async_fn_in_trait)]
pub trait AuthManager {
    /// Whether a usable session already exists.
    fn is_logged_in(&self) -> bool;

    /// Submit credentials once; no retry.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] when the credentials are
    /// rejected and [`AuthError::Unknown`] for every other failure.
    async fn authenticate(&self, identifier: &str, secret: &str, persist_session: bool) -> Result<Session, AuthError>;

    /// Drop the current session, locally and on the server.
    async fn logout(&self);
}

/// Browser `AuthManager` backed by the portal REST endpoints.
#[derive(Clone, Debug, Default)]
pub struct HttpAuthManager {
    config: PortalConfig,
}

impl HttpAuthManager {
    pub fn new(config: PortalConfig) -> Self {
        Self { config }
    }

    /// The stored session marker, if one exists and has not expired.
    pub fn current_session(&self) -> Option<Session> {
        let now = session_store::now_ms();
        [StorageKind::Local, StorageKind::Session]
            .into_iter()
            .filter_map(session_store::load_session)
            .find(|session| session.is_active_at(now))
    }

    /// Confirm the stored marker against `GET /api/auth/me`.
    pub async fn refresh_session(&self) -> Option<Session> {
        let server = api::fetch_current_session(&self.config).await;
        let (session, stale) = reconcile_session(server, self.current_session());
        if stale {
            #[cfg(feature = "hydrate")]
            log::info!("stored session rejected by server");
            session_store::clear_sessions();
        }
        session
    }
}

/// Combine the server's answer with the stored marker.
/// Returns the session to trust and whether the marker must be cleared.
pub(crate) fn reconcile_session(server: Result<Session, AuthError>, marker: Option<Session>) -> (Option<Session>, bool) {
    match server {
        Ok(session) => (Some(session), false),
        Err(AuthError::InvalidCredentials) => (None, marker.is_some()),
        Err(AuthError::Unknown { .. }) => (marker, false),
    }
}

impl AuthManager for HttpAuthManager {
    fn is_logged_in(&self) -> bool {
        self.current_session().is_some()
    }

    async fn authenticate(&self, identifier: &str, secret: &str, persist_session: bool) -> Result<Session, AuthError> {
        let request = LoginRequest {
            username: identifier.to_owned(),
            password: secret.to_owned(),
            remember_me: persist_session,
        };
        let session = api::login(&self.config, &request).await?;

        session_store::clear_sessions();
        session_store::save_session(StorageKind::for_persistence(persist_session), &session);
        #[cfg(feature = "hydrate")]
        log::info!("session established for {}", session.username);
        Ok(session)
    }

    async fn logout(&self) {
        api::logout(&self.config).await;
        session_store::clear_sessions();
    }
}
