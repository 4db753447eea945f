//! Transient notice shown under the login form.

use leptos::prelude::*;

/// Dismissible alert bar; visibility is owned by the caller.
#[component]
pub fn Notice(message: Signal<String>, open: Signal<bool>, on_dismiss: Callback<()>) -> impl IntoView {
    view! {
        <Show when=move || open.get()>
            <div class="notice" role="alert">
                <span class="notice__message">{move || message.get()}</span>
                <button
                    type="button"
                    class="notice__dismiss"
                    title="Dismiss"
                    on:click=move |_| on_dismiss.run(())
                >
                    "✕"
                </button>
            </div>
        </Show>
    }
}
