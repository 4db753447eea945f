//! View state and reducer for the login page.
//!
//! DESIGN
//! ======
//! The page never mutates `LoginState` field by field. Every user action or
//! async completion becomes a `LoginEvent` and goes through
//! `LoginState::apply`. Navigation is an explicit effect returned by the
//! reducer on the unauthenticated -> authenticated transition, and the page
//! executes it. Rendering only follows the state.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use crate::net::auth::{AuthError, AuthManager};

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username/password!";
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error occurred!";

/// Query-string parameter naming the post-login destination.
pub const REFERRER_PARAM: &str = "referrer";

/// Transient login form state, owned by one `LoginPage` instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginState {
    pub identifier: String,
    pub secret: String,
    pub authenticated: bool,
    pub persist_session: bool,
    pub redirect_target: String,
    pub error_message: Option<String>,
    pub show_error: bool,
    /// Bumped on each failure so a stale auto-hide timer cannot close a newer notice.
    pub notice_generation: u32,
}

/// Inputs to the reducer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginEvent {
    Initialized { referrer: Option<String>, session_active: bool },
    IdentifierChanged(String),
    SecretChanged(String),
    PersistToggled(bool),
    SubmitSucceeded,
    SubmitFailed(AuthError),
    NoticeExpired(u32),
    NoticeDismissed,
}

/// Side effect requested by the reducer: leave the login page for this URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigate(pub String);

/// Credentials captured from the form at submit time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub identifier: String,
    pub secret: String,
    pub persist_session: bool,
}

impl LoginState {
    /// Fresh state whose redirect target is the application root.
    pub fn new(default_root: impl Into<String>) -> Self {
        Self {
            identifier: String::new(),
            secret: String::new(),
            authenticated: false,
            persist_session: false,
            redirect_target: default_root.into(),
            error_message: None,
            show_error: false,
            notice_generation: 0,
        }
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        !self.identifier.is_empty() && !self.secret.is_empty()
    }

    /// Snapshot of the form for a submit call.
    pub fn credentials(&self) -> Credentials {
        Credentials {
            identifier: self.identifier.clone(),
            secret: self.secret.clone(),
            persist_session: self.persist_session,
        }
    }

    /// Apply one event; returns a navigation effect when the view must redirect.
    pub fn apply(&mut self, event: LoginEvent) -> Option<Navigate> {
        match event {
            LoginEvent::Initialized { referrer, session_active } => {
                self.redirect_target = resolve_redirect_target(referrer.as_deref(), &self.redirect_target);
                if session_active {
                    return self.mark_authenticated();
                }
            }
            LoginEvent::IdentifierChanged(value) => {
                self.identifier = value;
                self.show_error = false;
            }
            LoginEvent::SecretChanged(value) => {
                self.secret = value;
                self.show_error = false;
            }
            LoginEvent::PersistToggled(checked) => self.persist_session = checked,
            LoginEvent::SubmitSucceeded => return self.mark_authenticated(),
            LoginEvent::SubmitFailed(error) => {
                self.identifier.clear();
                self.secret.clear();
                self.error_message = Some(error_message_for(&error).to_owned());
                self.show_error = true;
                self.notice_generation = self.notice_generation.wrapping_add(1);
            }
            LoginEvent::NoticeExpired(generation) => {
                if generation == self.notice_generation {
                    self.show_error = false;
                }
            }
            LoginEvent::NoticeDismissed => self.show_error = false,
        }
        None
    }

    fn mark_authenticated(&mut self) -> Option<Navigate> {
        if self.authenticated {
            return None;
        }
        self.authenticated = true;
        Some(Navigate(self.redirect_target.clone()))
    }
}

/// User-facing text for an authentication failure.
pub fn error_message_for(error: &AuthError) -> &'static str {
    match error {
        AuthError::InvalidCredentials => INVALID_CREDENTIALS_MESSAGE,
        AuthError::Unknown { .. } => UNKNOWN_ERROR_MESSAGE,
    }
}

/// Pick the post-login destination.
///
/// Only same-origin paths are honored; anything else falls back to
/// `default_root` so the login page cannot be used as an open redirect.
pub fn resolve_redirect_target(referrer: Option<&str>, default_root: &str) -> String {
    match referrer.map(str::trim) {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => path.to_owned(),
        _ => default_root.to_owned(),
    }
}

/// Run one authentication attempt and turn its outcome into a reducer event.
pub async fn submit<A: AuthManager>(auth: &A, credentials: Credentials) -> LoginEvent {
    match auth
        .authenticate(&credentials.identifier, &credentials.secret, credentials.persist_session)
        .await
    {
        Ok(_) => LoginEvent::SubmitSucceeded,
        Err(error) => LoginEvent::SubmitFailed(error),
    }
}
