use std::cell::RefCell;

use futures::executor::block_on;

use super::*;
use crate::net::types::Session;

// =============================================================
// Helpers
// =============================================================

const ROOT: &str = "/portal/";

struct FakeAuth {
    logged_in: bool,
    outcome: Result<Session, AuthError>,
    calls: RefCell<Vec<(String, String, bool)>>,
}

impl FakeAuth {
    fn answering(outcome: Result<Session, AuthError>) -> Self {
        Self { logged_in: false, outcome, calls: RefCell::new(Vec::new()) }
    }
}

impl AuthManager for FakeAuth {
    fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    async fn authenticate(&self, identifier: &str, secret: &str, persist_session: bool) -> Result<Session, AuthError> {
        self.calls
            .borrow_mut()
            .push((identifier.to_owned(), secret.to_owned(), persist_session));
        self.outcome.clone()
    }

    async fn logout(&self) {}
}

fn session() -> Session {
    Session { username: "admin".to_owned(), expires_at: i64::MAX }
}

fn filled_state() -> LoginState {
    let mut state = LoginState::new(ROOT);
    state.apply(LoginEvent::IdentifierChanged("admin".to_owned()));
    state.apply(LoginEvent::SecretChanged("secret".to_owned()));
    state
}

fn init(referrer: Option<&str>, session_active: bool) -> (LoginState, Option<Navigate>) {
    let mut state = LoginState::new(ROOT);
    let nav = state.apply(LoginEvent::Initialized { referrer: referrer.map(str::to_owned), session_active });
    (state, nav)
}

// =============================================================
// Initialization
// =============================================================

#[test]
fn new_state_is_empty_and_unauthenticated() {
    let state = LoginState::new(ROOT);
    assert!(state.identifier.is_empty());
    assert!(state.secret.is_empty());
    assert!(!state.authenticated);
    assert!(!state.persist_session);
    assert!(!state.show_error);
    assert_eq!(state.error_message, None);
    assert_eq!(state.redirect_target, ROOT);
}

#[test]
fn init_uses_referrer_from_query() {
    let (state, nav) = init(Some("/x"), false);
    assert_eq!(state.redirect_target, "/x");
    assert_eq!(nav, None);
}

#[test]
fn init_without_referrer_uses_application_root() {
    let (state, _) = init(None, false);
    assert_eq!(state.redirect_target, ROOT);
}

#[test]
fn init_with_empty_referrer_uses_application_root() {
    let (state, _) = init(Some(""), false);
    assert_eq!(state.redirect_target, ROOT);
}

#[test]
fn init_with_existing_session_redirects_immediately() {
    let (state, nav) = init(Some("/dashboards/sales"), true);
    assert!(state.authenticated);
    assert_eq!(nav, Some(Navigate("/dashboards/sales".to_owned())));
}

#[test]
fn init_with_existing_session_and_no_referrer_redirects_to_root() {
    let (_, nav) = init(None, true);
    assert_eq!(nav, Some(Navigate(ROOT.to_owned())));
}

// =============================================================
// resolve_redirect_target
// =============================================================

#[test]
fn redirect_target_keeps_path_query_and_fragment() {
    assert_eq!(resolve_redirect_target(Some("/a/b?c=1#d"), ROOT), "/a/b?c=1#d");
}

#[test]
fn redirect_target_rejects_absolute_urls() {
    assert_eq!(resolve_redirect_target(Some("https://evil.example.com/"), ROOT), ROOT);
    assert_eq!(resolve_redirect_target(Some("javascript:alert(1)"), ROOT), ROOT);
}

#[test]
fn redirect_target_rejects_protocol_relative_urls() {
    assert_eq!(resolve_redirect_target(Some("//evil.example.com"), ROOT), ROOT);
    assert_eq!(resolve_redirect_target(Some("/\\evil.example.com"), ROOT), ROOT);
}

#[test]
fn redirect_target_rejects_relative_paths() {
    assert_eq!(resolve_redirect_target(Some("portal/dashboards"), ROOT), ROOT);
    let (state, _) = init(Some("portal/dashboards"), false);
    assert_eq!(state.redirect_target, ROOT);
}

#[test]
fn redirect_target_trims_whitespace() {
    assert_eq!(resolve_redirect_target(Some("  /x  "), ROOT), "/x");
}

// =============================================================
// Field edits
// =============================================================

#[test]
fn can_submit_only_with_both_fields() {
    let mut state = LoginState::new(ROOT);
    assert!(!state.can_submit());
    state.apply(LoginEvent::IdentifierChanged("admin".to_owned()));
    assert!(!state.can_submit());
    state.apply(LoginEvent::SecretChanged("secret".to_owned()));
    assert!(state.can_submit());
    state.apply(LoginEvent::IdentifierChanged(String::new()));
    assert!(!state.can_submit());
}

#[test]
fn editing_identifier_hides_error() {
    let mut state = filled_state();
    state.apply(LoginEvent::SubmitFailed(AuthError::InvalidCredentials));
    assert!(state.show_error);
    state.apply(LoginEvent::IdentifierChanged("a".to_owned()));
    assert!(!state.show_error);
}

#[test]
fn editing_secret_hides_error() {
    let mut state = filled_state();
    state.apply(LoginEvent::SubmitFailed(AuthError::transport("offline")));
    state.apply(LoginEvent::SecretChanged("s".to_owned()));
    assert!(!state.show_error);
}

#[test]
fn persist_toggle_updates_flag_and_credentials() {
    let mut state = filled_state();
    state.apply(LoginEvent::PersistToggled(true));
    assert_eq!(
        state.credentials(),
        Credentials { identifier: "admin".to_owned(), secret: "secret".to_owned(), persist_session: true }
    );
}

// =============================================================
// Submit outcomes
// =============================================================

#[test]
fn success_authenticates_and_navigates_once() {
    let mut state = filled_state();
    state.apply(LoginEvent::Initialized { referrer: Some("/x".to_owned()), session_active: false });
    assert_eq!(state.apply(LoginEvent::SubmitSucceeded), Some(Navigate("/x".to_owned())));
    assert!(state.authenticated);
    assert_eq!(state.apply(LoginEvent::SubmitSucceeded), None);
}

#[test]
fn invalid_credentials_clears_fields_and_sets_message() {
    let mut state = filled_state();
    let nav = state.apply(LoginEvent::SubmitFailed(AuthError::InvalidCredentials));
    assert_eq!(nav, None);
    assert!(state.identifier.is_empty());
    assert!(state.secret.is_empty());
    assert_eq!(state.error_message.as_deref(), Some(INVALID_CREDENTIALS_MESSAGE));
    assert!(state.show_error);
    assert!(!state.authenticated);
}

#[test]
fn other_failures_set_generic_message() {
    let failures = [
        AuthError::from_status(500, "server error"),
        AuthError::from_status(403, "forbidden"),
        AuthError::transport("network"),
    ];
    for failure in failures {
        let mut state = filled_state();
        state.apply(LoginEvent::SubmitFailed(failure));
        assert_eq!(state.error_message.as_deref(), Some(UNKNOWN_ERROR_MESSAGE));
        assert!(state.identifier.is_empty());
        assert!(state.secret.is_empty());
        assert!(state.show_error);
    }
}

#[test]
fn failure_after_failure_can_resubmit() {
    let mut state = filled_state();
    state.apply(LoginEvent::SubmitFailed(AuthError::InvalidCredentials));
    state.apply(LoginEvent::IdentifierChanged("admin".to_owned()));
    state.apply(LoginEvent::SecretChanged("right".to_owned()));
    assert!(state.can_submit());
    assert!(state.apply(LoginEvent::SubmitSucceeded).is_some());
}

// =============================================================
// Notice lifetime
// =============================================================

#[test]
fn notice_expires_for_current_generation() {
    let mut state = filled_state();
    state.apply(LoginEvent::SubmitFailed(AuthError::InvalidCredentials));
    let generation = state.notice_generation;
    state.apply(LoginEvent::NoticeExpired(generation));
    assert!(!state.show_error);
}

#[test]
fn stale_notice_timer_does_not_hide_newer_notice() {
    let mut state = filled_state();
    state.apply(LoginEvent::SubmitFailed(AuthError::InvalidCredentials));
    let first = state.notice_generation;
    state.apply(LoginEvent::SubmitFailed(AuthError::transport("again")));
    state.apply(LoginEvent::NoticeExpired(first));
    assert!(state.show_error);
}

#[test]
fn notice_dismissed_hides_notice_and_keeps_message() {
    let mut state = filled_state();
    state.apply(LoginEvent::SubmitFailed(AuthError::InvalidCredentials));
    state.apply(LoginEvent::NoticeDismissed);
    assert!(!state.show_error);
    assert_eq!(state.error_message.as_deref(), Some(INVALID_CREDENTIALS_MESSAGE));
}

// =============================================================
// submit()
// =============================================================

#[test]
fn submit_passes_credentials_through_once() {
    let auth = FakeAuth::answering(Ok(session()));
    let credentials = Credentials { identifier: "admin".to_owned(), secret: "pw".to_owned(), persist_session: true };
    let event = block_on(submit(&auth, credentials));
    assert_eq!(event, LoginEvent::SubmitSucceeded);
    assert_eq!(*auth.calls.borrow(), vec![("admin".to_owned(), "pw".to_owned(), true)]);
}

#[test]
fn submit_maps_rejection_to_failed_event() {
    let auth = FakeAuth::answering(Err(AuthError::InvalidCredentials));
    let event = block_on(submit(&auth, filled_state().credentials()));
    assert_eq!(event, LoginEvent::SubmitFailed(AuthError::InvalidCredentials));
    assert_eq!(auth.calls.borrow().len(), 1);
}

#[test]
fn full_flow_with_existing_session_skips_form() {
    let auth = FakeAuth { logged_in: true, ..FakeAuth::answering(Ok(session())) };
    let mut state = LoginState::new(ROOT);
    let nav = state.apply(LoginEvent::Initialized { referrer: None, session_active: auth.is_logged_in() });
    assert_eq!(nav, Some(Navigate(ROOT.to_owned())));
    assert!(auth.calls.borrow().is_empty());
}

#[test]
fn error_message_for_maps_both_kinds() {
    assert_eq!(error_message_for(&AuthError::InvalidCredentials), INVALID_CREDENTIALS_MESSAGE);
    assert_eq!(error_message_for(&AuthError::transport("x")), UNKNOWN_ERROR_MESSAGE);
}
