//! Sealing and unsealing of tokens.
//!
//! # Token format
//!
//! ```text
//! byte 0          version (1)
//! bytes 1..13     nonce = timestamp (u64 LE, ns since Unix epoch) || 4 random bytes
//! bytes 13..      AEAD ciphertext || 16-byte tag
//! ```
//!
//! The whole buffer is base64url encoded with `=` padding. The nonce is not
//! passed as associated data; any change to it changes the AEAD keystream and
//! the tag check fails.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock, Timestamp};
use crate::error::{ConstructionError, TokenError};
use crate::random::{OsRandom, RandomSource};
use crate::suite::{Suite, SuiteKind, MAX_PLAINTEXT_LEN, NONCE_LEN, TAG_LEN};

/// Format version written as the first byte of every token.
pub const VERSION: u8 = 1;

/// Leading nonce bytes holding the issuance timestamp.
pub const TIMESTAMP_LEN: usize = 8;

const HEADER_LEN: usize = 1 + NONCE_LEN;

/// Shortest decoded buffer that can be a token (empty plaintext).
pub const MIN_TOKEN_LEN: usize = HEADER_LEN + TAG_LEN;

/// Lifetime used by [`TokenerBuilder`] when none is given.
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Issues and verifies expiring, encrypted tokens.
///
/// A `Tokener` is immutable after construction. It is `Send + Sync` and cheap
/// to clone; clones share the cipher, clock and random source.
#[derive(Clone)]
pub struct Tokener {
    suite: Arc<Suite>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
    random: Arc<dyn RandomSource>,
}

/// An authenticated, unexpired token's contents.
#[derive(Clone, PartialEq, Eq)]
pub struct Unsealed {
    pub plaintext: Vec<u8>,
    /// When the token was sealed, as read from the sealing tokener's clock.
    pub issued_at: Timestamp,
}

impl fmt::Debug for Unsealed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unsealed")
            .field("plaintext_len", &self.plaintext.len())
            .field("issued_at", &self.issued_at)
            .finish()
    }
}

/// Length of the token string produced for a plaintext of `plaintext_len`
/// bytes. Depends only on the length, never on the content.
pub fn sealed_len(plaintext_len: usize) -> usize {
    (MIN_TOKEN_LEN + plaintext_len).div_ceil(3) * 4
}

impl Tokener {
    /// Build a tokener using the system clock and OS randomness.
    ///
    /// The suite is chosen from the key length: 16 bytes selects
    /// AES-128-GCM-SIV, 32 bytes AES-256-GCM-SIV.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::InvalidKeyLength`] for any other length.
    pub fn new(key: &[u8], ttl: Duration) -> Result<Self, ConstructionError> {
        Self::builder(key).ttl(ttl).build()
    }

    pub fn builder(key: &[u8]) -> TokenerBuilder<'_> {
        TokenerBuilder {
            key,
            ttl: DEFAULT_TTL,
            suite: None,
            clock: Arc::new(SystemClock),
            random: Arc::new(OsRandom),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn suite(&self) -> SuiteKind {
        self.suite.kind()
    }

    /// Seal `plaintext` into a token bound to the current time.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::RandomnessUnavailable`] if the random source
    /// fails; no token is produced with a weaker nonce.
    pub fn seal(&self, plaintext: &[u8]) -> Result<String, TokenError> {
        if plaintext.len() as u64 > MAX_PLAINTEXT_LEN {
            return Err(TokenError::PlaintextTooLarge(plaintext.len()));
        }

        let nonce = self.fresh_nonce()?;

        let mut buf = Vec::with_capacity(MIN_TOKEN_LEN + plaintext.len());
        buf.push(VERSION);
        buf.extend_from_slice(&nonce);
        buf.extend_from_slice(plaintext);

        let tag = self
            .suite
            .encrypt(&nonce, &mut buf[HEADER_LEN..])
            .map_err(|_| TokenError::PlaintextTooLarge(plaintext.len()))?;
        buf.extend_from_slice(&tag);

        Ok(URL_SAFE.encode(&buf))
    }

    /// Seal a UTF-8 string.
    pub fn seal_str(&self, plaintext: &str) -> Result<String, TokenError> {
        self.seal(plaintext.as_bytes())
    }

    /// Verify `token` and return its plaintext.
    ///
    /// # Errors
    ///
    /// - [`TokenError::Invalid`] if the token is malformed, has an unknown
    ///   version, or fails authentication.
    /// - [`TokenError::Expired`] if it authenticates but is older than the ttl.
    pub fn unseal(&self, token: &str) -> Result<Vec<u8>, TokenError> {
        self.unseal_detailed(token).map(|u| u.plaintext)
    }

    /// Like [`Tokener::unseal`], for tokens sealed with [`Tokener::seal_str`].
    /// Authenticated bytes that are not UTF-8 are reported as invalid.
    pub fn unseal_string(&self, token: &str) -> Result<String, TokenError> {
        let plaintext = self.unseal(token)?;
        String::from_utf8(plaintext).map_err(|_| rejected("plaintext is not utf-8"))
    }

    /// Like [`Tokener::unseal`], also returning the authenticated issue time.
    pub fn unseal_detailed(&self, token: &str) -> Result<Unsealed, TokenError> {
        let mut raw = URL_SAFE
            .decode(token)
            .map_err(|_| rejected("malformed encoding"))?;
        if raw.len() < MIN_TOKEN_LEN {
            return Err(rejected("too short"));
        }
        if raw[0] != VERSION {
            return Err(rejected("unsupported version"));
        }

        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(&raw[1..HEADER_LEN]);
        let mut ts = [0u8; TIMESTAMP_LEN];
        ts.copy_from_slice(&nonce[..TIMESTAMP_LEN]);
        let issued_at = Timestamp::from_le_bytes(ts);

        let tag_at = raw.len() - TAG_LEN;
        let mut tag = [0u8; TAG_LEN];
        tag.copy_from_slice(&raw[tag_at..]);
        self.suite
            .decrypt(&nonce, &mut raw[HEADER_LEN..tag_at], &tag)
            .map_err(|_| rejected("authentication failed"))?;

        // Freshness is only meaningful once the timestamp is authenticated.
        let age = self.clock.now().duration_since(issued_at);
        if age > self.ttl {
            debug!(age_ns = age.as_nanos() as u64, "token expired");
            return Err(TokenError::Expired);
        }

        raw.truncate(tag_at);
        raw.drain(..HEADER_LEN);
        Ok(Unsealed {
            plaintext: raw,
            issued_at,
        })
    }

    fn fresh_nonce(&self) -> Result<[u8; NONCE_LEN], TokenError> {
        let mut nonce = [0u8; NONCE_LEN];
        let (ts, suffix) = nonce.split_at_mut(TIMESTAMP_LEN);
        ts.copy_from_slice(&self.clock.now().to_le_bytes());
        self.random.fill(suffix).map_err(|e| {
            warn!(error = %e, "random source failed; refusing to seal");
            TokenError::RandomnessUnavailable(e)
        })?;
        Ok(nonce)
    }
}

impl fmt::Debug for Tokener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tokener")
            .field("suite", &self.suite.kind())
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

fn rejected(reason: &'static str) -> TokenError {
    debug!(reason, "token rejected");
    TokenError::Invalid
}

/// Configures a [`Tokener`]. Created by [`Tokener::builder`].
pub struct TokenerBuilder<'k> {
    key: &'k [u8],
    ttl: Duration,
    suite: Option<SuiteKind>,
    clock: Arc<dyn Clock>,
    random: Arc<dyn RandomSource>,
}

impl<'k> TokenerBuilder<'k> {
    /// How long a token stays valid after it is sealed. Zero means a token is
    /// only accepted at the exact instant it was issued.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Require a specific suite instead of inferring it from the key length.
    pub fn suite(mut self, suite: SuiteKind) -> Self {
        self.suite = Some(suite);
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn random(mut self, random: impl RandomSource + 'static) -> Self {
        self.random = Arc::new(random);
        self
    }

    /// Run the key schedule and produce the tokener.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstructionError`] if the key length is not accepted.
    pub fn build(self) -> Result<Tokener, ConstructionError> {
        let kind = match self.suite {
            Some(kind) => kind,
            None => SuiteKind::for_key_len(self.key.len())
                .ok_or(ConstructionError::InvalidKeyLength(self.key.len()))?,
        };
        let suite = Suite::new(kind, self.key)?;
        debug!(suite = %kind, ttl_s = self.ttl.as_secs(), "tokener built");
        Ok(Tokener {
            suite: Arc::new(suite),
            ttl: self.ttl,
            clock: self.clock,
            random: self.random,
        })
    }
}
