//! Networking modules for the portal auth endpoints.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles REST calls, `auth` wraps them behind the `AuthManager`
//! capability, and `types` defines the shared wire schema.

pub mod api;
pub mod auth;
pub mod types;
