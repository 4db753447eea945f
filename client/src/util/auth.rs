//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Guarded routes should apply identical unauthenticated redirect behavior,
//! always carrying the current location back to the login page as the
//! `referrer` query parameter.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::auth::AuthState;
use crate::state::login::REFERRER_PARAM;

/// Route of the login page.
pub const LOGIN_ROUTE: &str = "/login";

/// Whether a guarded page should send the user to the login page.
pub fn should_redirect_unauth(state: &AuthState) -> bool {
    !state.loading && state.session.is_none()
}

/// Login URL that returns to `referrer` after authentication.
pub fn login_path(referrer: &str) -> String {
    if referrer.is_empty() {
        return LOGIN_ROUTE.to_owned();
    }
    format!("{LOGIN_ROUTE}?{REFERRER_PARAM}={}", urlencoding::encode(referrer))
}

/// Redirect to `/login` whenever auth has loaded and no session is present.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, referrer: String, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let target = login_path(&referrer);
    Effect::new(move || {
        let state = auth.get();
        if should_redirect_unauth(&state) {
            navigate(&target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}
