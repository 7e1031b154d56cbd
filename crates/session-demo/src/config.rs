//! Configuration loading and validation for the session demo.
//!
//! All values are read from environment variables at startup. The process
//! exits with a clear error message if any required variable is missing or
//! invalid.

use std::time::Duration;

use anyhow::{Context, Result};
use base64::{
    alphabet,
    engine::{general_purpose::GeneralPurposeConfig, DecodePaddingMode, GeneralPurpose},
    Engine as _,
};
use securetoken::SuiteKind;
use serde::Deserialize;

/// Accepts `TOKEN_KEY` with or without `=` padding.
const KEY_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Validated demo configuration.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// base64url-encoded 16- or 32-byte token key. **Required.**
    pub token_key: String,

    /// Session lifetime in seconds.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: u64,

    /// Port the HTTP server listens on.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Name of the session cookie.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_token_ttl() -> u64 {
    24 * 60 * 60
}
fn default_listen_port() -> u16 {
    8080
}
fn default_cookie_name() -> String {
    "session".into()
}
fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any required variable is absent or cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Decoded key bytes.
    pub fn key_bytes(&self) -> Result<Vec<u8>> {
        KEY_ENGINE
            .decode(self.token_key.trim())
            .context("TOKEN_KEY must be base64url encoded")
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_secs)
    }

    fn validate(&self) -> Result<()> {
        let key = self.key_bytes()?;
        if SuiteKind::for_key_len(key.len()).is_none() {
            anyhow::bail!("TOKEN_KEY must decode to 16 or 32 bytes, got {}", key.len());
        }
        if !is_cookie_name(&self.cookie_name) {
            anyhow::bail!("COOKIE_NAME must be a non-empty cookie token");
        }
        Ok(())
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("token_key", &"[REDACTED]")
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("listen_port", &self.listen_port)
            .field("cookie_name", &self.cookie_name)
            .field("log_level", &self.log_level)
            .finish()
    }
}

/// RFC 6265 `token`: visible ASCII minus separators.
fn is_cookie_name(name: &str) -> bool {
    !name.is_empty()
        && name.bytes().all(|b| {
            b.is_ascii_graphic() && !b"()<>@,;:\\\"/[]?={}".contains(&b)
        })
}
