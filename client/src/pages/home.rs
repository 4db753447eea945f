//! Portal landing page at the application root.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the default post-login destination. Visitors without a session are
//! sent to `/login` with their current path as the referrer.

use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};

use crate::config::PortalConfig;
use crate::net::auth::{AuthManager, HttpAuthManager};
use crate::state::auth::AuthState;
use crate::util::auth::install_unauth_redirect;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let manager = HttpAuthManager::new(PortalConfig::default());
    let location = use_location();
    let navigate = use_navigate();

    // Resolve from the stored marker, then confirm it with the server.
    {
        let manager = manager.clone();
        Effect::new(move || {
            let marker = manager.current_session();
            let confirm = marker.is_some();
            auth.set(AuthState::resolved(marker));
            if confirm {
                let manager = manager.clone();
                leptos::task::spawn_local(async move {
                    let session = manager.refresh_session().await;
                    auth.set(AuthState::resolved(session));
                });
            }
        });
    }

    let referrer = location.pathname.get_untracked();
    install_unauth_redirect(auth, referrer, navigate);

    // Clearing the session lets the unauthenticated redirect take over.
    let on_logout = Callback::new(move |()| {
        let manager = manager.clone();
        leptos::task::spawn_local(async move {
            manager.logout().await;
            auth.set(AuthState::resolved(None));
        });
    });

    view! {
        <div class="home-page">
            <header class="home-header">
                <h1>"Portal"</h1>
                <Show when=move || auth.with(|s| s.session.is_some())>
                    <span class="home-header__user">
                        "Signed in as "
                        {move || auth.with(|s| s.username().map(str::to_owned)).unwrap_or_default()}
                    </span>
                    <button class="login-button" type="button" on:click=move |_| on_logout.run(())>
                        "Logout"
                    </button>
                </Show>
            </header>
        </div>
    }
}
