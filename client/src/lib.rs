//! # client
//!
//! Leptos + WASM frontend for the portal login flow.
//!
//! This crate contains the login and home pages, the login reducer, the
//! `AuthManager` capability with its browser implementation, and the wire
//! types shared with the server's `/api/auth/*` endpoints.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("portal client hydrating");
    leptos::mount::hydrate_body(app::App);
}
