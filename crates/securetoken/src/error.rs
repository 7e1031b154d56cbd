//! Error types for token construction, sealing and unsealing.

use thiserror::Error;

use crate::random::RandomError;
use crate::suite::SuiteKind;

/// Errors raised while building a [`Tokener`](crate::Tokener).
///
/// These are configuration mistakes and are never produced by `seal` or
/// `unseal`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    /// No supported suite accepts a key of this length.
    #[error("invalid key length: {0} bytes (expected 16 or 32)")]
    InvalidKeyLength(usize),

    /// The explicitly requested suite needs a key of a different length.
    #[error("{suite} requires a {expected}-byte key, got {actual} bytes")]
    KeyLengthMismatch {
        suite: SuiteKind,
        expected: usize,
        actual: usize,
    },
}

/// Errors returned by `seal` and `unseal`.
///
/// [`TokenError::Invalid`] and [`TokenError::Expired`] are both "reject the
/// credential"; the split exists for diagnostics only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Malformed encoding, truncated buffer, unknown version or failed
    /// authentication. Deliberately carries no detail.
    #[error("securetoken: token invalid")]
    Invalid,

    /// The token authenticated but was issued more than `ttl` ago.
    #[error("securetoken: token expired")]
    Expired,

    /// The random source could not produce nonce bytes.
    #[error("securetoken: cannot seal token: {0}")]
    RandomnessUnavailable(#[from] RandomError),

    /// The plaintext exceeds what the AEAD can encrypt under one nonce.
    #[error("securetoken: plaintext of {0} bytes is too large to seal")]
    PlaintextTooLarge(usize),
}

impl TokenError {
    /// Returns `true` when the caller should reject the presented token.
    pub fn is_rejection(&self) -> bool {
        matches!(self, TokenError::Invalid | TokenError::Expired)
    }
}
