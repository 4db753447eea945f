//! Login page with username/password form and "remember me".
//!
//! SYSTEM CONTEXT
//! ==============
//! Reached directly or via the unauthenticated redirect of guarded pages,
//! which pass their own location as `?referrer=`. All state changes go
//! through `LoginState::apply`; navigation requested by the reducer is
//! parked in a signal and executed by a dedicated effect.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::components::notice::Notice;
use crate::config::PortalConfig;
use crate::net::auth::{AuthManager, HttpAuthManager};
use crate::state::login::{LoginEvent, LoginState, Navigate, REFERRER_PARAM, submit};

#[component]
pub fn LoginPage() -> impl IntoView {
    let config = PortalConfig::default();
    let manager = HttpAuthManager::new(config.clone());
    let query = use_query_map();
    let navigate = use_navigate();

    let state = RwSignal::new(LoginState::new(config.context_path.clone()));
    let pending_navigation = RwSignal::new(None::<String>);

    let dispatch = move |event: LoginEvent| {
        if let Some(Some(Navigate(target))) = state.try_update(|s| s.apply(event)) {
            pending_navigation.set(Some(target));
        }
    };

    Effect::new(move || {
        if let Some(target) = pending_navigation.get() {
            navigate(&target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    // Runs once after mount; nothing it reads is tracked.
    {
        let manager = manager.clone();
        Effect::new(move || {
            let referrer = query.with_untracked(|q| q.get(REFERRER_PARAM));
            dispatch(LoginEvent::Initialized { referrer, session_active: manager.is_logged_in() });
        });
    }

    let notice_duration_ms = config.notice_duration_ms;
    let notice = Memo::new(move |_| state.with(|s| (s.show_error, s.notice_generation)));
    Effect::new(move || {
        let (open, generation) = notice.get();
        if !open {
            return;
        }
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(notice_duration_ms).await;
            state.try_update(|s| s.apply(LoginEvent::NoticeExpired(generation)));
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (generation, notice_duration_ms);
    });

    let on_submit = Callback::new(move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(credentials) = state.with_untracked(|s| s.can_submit().then(|| s.credentials())) else {
            return;
        };
        let manager = manager.clone();
        leptos::task::spawn_local(async move {
            let event = submit(&manager, credentials).await;
            #[cfg(feature = "hydrate")]
            if let LoginEvent::SubmitFailed(err) = &event {
                log::warn!("login rejected: {err}");
            }
            dispatch(event);
        });
    });

    let on_dismiss = Callback::new(move |()| dispatch(LoginEvent::NoticeDismissed));
    let notice_message = Signal::derive(move || state.with(|s| s.error_message.clone().unwrap_or_default()));
    let notice_open = Signal::derive(move || notice.get().0);

    view! {
        <div class="login-page">
            <Show
                when=move || !state.with(|s| s.authenticated)
                fallback=|| view! { <p class="login-message">"Redirecting..."</p> }
            >
                <div class="login-card">
                    <h1>"Portal"</h1>
                    <p class="login-card__subtitle">"Login"</p>
                    <form class="login-form" on:submit=move |ev| on_submit.run(ev)>
                        <input
                            class="login-input"
                            type="text"
                            name="username"
                            placeholder="Username"
                            autocomplete="username"
                            prop:value=move || state.with(|s| s.identifier.clone())
                            on:input=move |ev| dispatch(LoginEvent::IdentifierChanged(event_target_value(&ev)))
                        />
                        <input
                            class="login-input"
                            type="password"
                            name="password"
                            placeholder="Password"
                            autocomplete="current-password"
                            prop:value=move || state.with(|s| s.secret.clone())
                            on:input=move |ev| dispatch(LoginEvent::SecretChanged(event_target_value(&ev)))
                        />
                        <label class="login-remember">
                            <input
                                type="checkbox"
                                prop:checked=move || state.with(|s| s.persist_session)
                                on:change=move |ev| dispatch(LoginEvent::PersistToggled(event_target_checked(&ev)))
                            />
                            "Remember Me"
                        </label>
                        <button
                            class="login-button"
                            type="submit"
                            disabled=move || !state.with(LoginState::can_submit)
                        >
                            "Login"
                        </button>
                    </form>
                </div>
            </Show>
            <Notice message=notice_message open=notice_open on_dismiss=on_dismiss/>
        </div>
    }
}
