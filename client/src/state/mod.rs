//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern: `auth` holds the resolved session for route
//! guards, `login` holds the login form and its reducer.

pub mod auth;
pub mod login;
