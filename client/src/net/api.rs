//! REST API helpers for the portal auth endpoints.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning an error since these endpoints
//! are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Result` outputs instead of panics so a failed login
//! surfaces as a notice rather than crashing hydration.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::auth::AuthError;
use super::types::{LoginRequest, Session};
use crate::config::PortalConfig;

pub(crate) const LOGIN_PATH: &str = "/api/auth/login";
pub(crate) const ME_PATH: &str = "/api/auth/me";
pub(crate) const LOGOUT_PATH: &str = "/api/auth/logout";

#[cfg(any(test, feature = "hydrate"))]
fn login_failed_detail(status: u16) -> String {
    format!("login failed: {status}")
}

/// Submit credentials via `POST /api/auth/login`.
///
/// # Errors
///
/// Returns [`AuthError::InvalidCredentials`] on a 401 response and
/// [`AuthError::Unknown`] for transport failures, other statuses, or an
/// unreadable body.
pub async fn login(config: &PortalConfig, request: &LoginRequest) -> Result<Session, AuthError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post(&config.endpoint(LOGIN_PATH))
            .json(request)
            .map_err(|e| AuthError::transport(e.to_string()))?
            .send()
            .await
            .map_err(|e| AuthError::transport(e.to_string()))?;
        if !resp.ok() {
            let status = resp.status();
            return Err(AuthError::from_status(status, login_failed_detail(status)));
        }
        resp.json::<Session>()
            .await
            .map_err(|e| AuthError::transport(e.to_string()))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, request);
        Err(AuthError::transport("not available on server"))
    }
}

/// Fetch the live session from `GET /api/auth/me`.
///
/// # Errors
///
/// Returns [`AuthError::InvalidCredentials`] when the server has no session
/// for the cookie and [`AuthError::Unknown`] for anything else, including
/// every call made off-browser.
pub async fn fetch_current_session(config: &PortalConfig) -> Result<Session, AuthError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(&config.endpoint(ME_PATH))
            .send()
            .await
            .map_err(|e| AuthError::transport(e.to_string()))?;
        if !resp.ok() {
            let status = resp.status();
            return Err(AuthError::from_status(status, format!("session check failed: {status}")));
        }
        resp.json::<Session>()
            .await
            .map_err(|e| AuthError::transport(e.to_string()))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = config;
        Err(AuthError::transport("not available on server"))
    }
}

/// Log out the current user by calling `POST /api/auth/logout`.
pub async fn logout(config: &PortalConfig) {
    #[cfg(feature = "hydrate")]
    {
        let _ = gloo_net::http::Request::post(&config.endpoint(LOGOUT_PATH))
            .send()
            .await;
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = config;
    }
}
