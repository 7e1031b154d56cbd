//! JSON bodies returned by the API routes.

use serde::{Deserialize, Serialize};

/// Response body for `GET /api/session`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    /// Email the session was opened for.
    pub email: String,
    /// When the session token was sealed, nanoseconds since the Unix epoch.
    pub issued_at_unix_ns: u64,
}

/// Standard error response body returned on any non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"token_expired"`).
    pub code: String,
    /// Human-readable description safe to expose to callers.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    /// AEAD suite the tokener was keyed with.
    pub suite: String,
    pub ttl_secs: u64,
}
