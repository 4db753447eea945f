//! Wire DTOs for the portal auth endpoints.
//!
//! DESIGN
//! ======
//! These types mirror the server's `/api/auth/*` payloads. `Session` doubles
//! as the browser-side session marker so the stored shape and the login
//! response never drift apart.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Body of `POST /api/auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Entered username.
    pub username: String,
    /// Entered password.
    pub password: String,
    /// Whether the session should outlive the browser session.
    #[serde(default)]
    pub remember_me: bool,
}

/// An established portal session as returned by login and `/api/auth/me`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Username the session belongs to.
    pub username: String,
    /// Expiry in milliseconds since the Unix epoch.
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub expires_at: i64,
}

impl Session {
    /// Whether the session is still valid at `now_ms`.
    pub fn is_active_at(&self, now_ms: i64) -> bool {
        !self.username.is_empty() && self.expires_at > now_ms
    }
}

fn deserialize_i64_from_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                return Ok(int);
            }
            #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
            if let Some(float) = number.as_f64()
                && float.is_finite()
                && float.fract() == 0.0
                && float >= i64::MIN as f64
                && float <= i64::MAX as f64
            {
                return Ok(float as i64);
            }
            Err(D::Error::custom(format!("expected integer timestamp, got {number}")))
        }
        other => Err(D::Error::custom(format!("expected number, got {other}"))),
    }
}
