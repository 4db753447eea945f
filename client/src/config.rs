//! Compile-time portal configuration.
//!
//! SYSTEM CONTEXT
//! ==============
//! The portal can be mounted under a context path (e.g. `/portal/`). Pages
//! fall back to that root whenever no explicit redirect target is supplied.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Default auto-hide delay for the login error notice.
pub const DEFAULT_NOTICE_DURATION_MS: u32 = 4000;

/// Portal-wide settings shared by pages and the auth manager.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortalConfig {
    /// Application root used as the post-login redirect fallback.
    pub context_path: String,
    /// Prefix for REST endpoints; empty means same origin.
    pub api_base: String,
    /// How long the error notice stays visible.
    pub notice_duration_ms: u32,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self::from_values(option_env!("PORTAL_CONTEXT_PATH"), option_env!("PORTAL_API_BASE"))
    }
}

impl PortalConfig {
    /// Build a config from optional raw values, normalising blanks to defaults.
    pub fn from_values(context_path: Option<&str>, api_base: Option<&str>) -> Self {
        let context_path = context_path
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map_or_else(|| "/".to_owned(), normalize_context_path);
        let api_base = api_base
            .map(|b| b.trim().trim_end_matches('/').to_owned())
            .unwrap_or_default();
        Self { context_path, api_base, notice_duration_ms: DEFAULT_NOTICE_DURATION_MS }
    }

    /// Absolute endpoint URL for an API path such as `/api/auth/login`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.api_base)
    }
}

fn normalize_context_path(raw: &str) -> String {
    if raw.starts_with('/') { raw.to_owned() } else { format!("/{raw}") }
}
