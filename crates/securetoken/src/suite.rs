//! AEAD cipher suites a [`Tokener`](crate::Tokener) can be keyed with.
//!
//! Both suites are AES-GCM-SIV (RFC 8452): nonce-misuse-resistant, 96-bit
//! nonce, 128-bit tag. The suite is fixed when the tokener is built and is not
//! recorded in the token; the version byte covers format changes.

use std::fmt;

use aes_gcm_siv::{
    aead::{AeadInPlace, KeyInit},
    Aes128GcmSiv, Aes256GcmSiv, Nonce, Tag,
};

use crate::error::ConstructionError;

/// Byte length of every supported AEAD nonce.
pub const NONCE_LEN: usize = 12;

/// Byte length of every supported AEAD tag.
pub const TAG_LEN: usize = 16;

/// Largest plaintext AES-GCM-SIV accepts under one nonce (2^36 bytes).
pub const MAX_PLAINTEXT_LEN: u64 = 1 << 36;

/// Selects which AEAD a tokener uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuiteKind {
    /// AES-128-GCM-SIV, 16-byte key.
    Aes128GcmSiv,
    /// AES-256-GCM-SIV, 32-byte key.
    Aes256GcmSiv,
}

impl SuiteKind {
    /// Key length in bytes required by this suite.
    pub const fn key_len(self) -> usize {
        match self {
            SuiteKind::Aes128GcmSiv => 16,
            SuiteKind::Aes256GcmSiv => 32,
        }
    }

    /// Picks the suite that accepts a key of `len` bytes.
    pub fn for_key_len(len: usize) -> Option<Self> {
        match len {
            16 => Some(SuiteKind::Aes128GcmSiv),
            32 => Some(SuiteKind::Aes256GcmSiv),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            SuiteKind::Aes128GcmSiv => "AES-128-GCM-SIV",
            SuiteKind::Aes256GcmSiv => "AES-256-GCM-SIV",
        }
    }
}

impl fmt::Display for SuiteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A keyed AEAD. The key schedule runs once in [`Suite::new`].
#[derive(Clone)]
pub enum Suite {
    Aes128GcmSiv(Aes128GcmSiv),
    Aes256GcmSiv(Aes256GcmSiv),
}

impl Suite {
    /// Key the given suite.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::KeyLengthMismatch`] if `key` is not
    /// [`SuiteKind::key_len`] bytes.
    pub fn new(kind: SuiteKind, key: &[u8]) -> Result<Self, ConstructionError> {
        let mismatch = || ConstructionError::KeyLengthMismatch {
            suite: kind,
            expected: kind.key_len(),
            actual: key.len(),
        };
        if key.len() != kind.key_len() {
            return Err(mismatch());
        }
        match kind {
            SuiteKind::Aes128GcmSiv => Aes128GcmSiv::new_from_slice(key)
                .map(Suite::Aes128GcmSiv)
                .map_err(|_| mismatch()),
            SuiteKind::Aes256GcmSiv => Aes256GcmSiv::new_from_slice(key)
                .map(Suite::Aes256GcmSiv)
                .map_err(|_| mismatch()),
        }
    }

    pub fn kind(&self) -> SuiteKind {
        match self {
            Suite::Aes128GcmSiv(_) => SuiteKind::Aes128GcmSiv,
            Suite::Aes256GcmSiv(_) => SuiteKind::Aes256GcmSiv,
        }
    }

    /// Encrypt `buffer` in place and return the detached tag.
    ///
    /// # Errors
    ///
    /// Fails only if `buffer` is longer than [`MAX_PLAINTEXT_LEN`].
    pub fn encrypt(
        &self,
        nonce: &[u8; NONCE_LEN],
        buffer: &mut [u8],
    ) -> Result<[u8; TAG_LEN], aes_gcm_siv::Error> {
        let nonce = Nonce::from_slice(nonce);
        let tag = match self {
            Suite::Aes128GcmSiv(c) => c.encrypt_in_place_detached(nonce, b"", buffer)?,
            Suite::Aes256GcmSiv(c) => c.encrypt_in_place_detached(nonce, b"", buffer)?,
        };
        let mut out = [0u8; TAG_LEN];
        out.copy_from_slice(&tag);
        Ok(out)
    }

    /// Verify `tag` and decrypt `buffer` in place.
    ///
    /// On error the contents of `buffer` are unspecified and must be discarded.
    pub fn decrypt(
        &self,
        nonce: &[u8; NONCE_LEN],
        buffer: &mut [u8],
        tag: &[u8; TAG_LEN],
    ) -> Result<(), aes_gcm_siv::Error> {
        let nonce = Nonce::from_slice(nonce);
        let tag = Tag::from_slice(tag);
        match self {
            Suite::Aes128GcmSiv(c) => c.decrypt_in_place_detached(nonce, b"", buffer, tag),
            Suite::Aes256GcmSiv(c) => c.decrypt_in_place_detached(nonce, b"", buffer, tag),
        }
    }
}

impl fmt::Debug for Suite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The cipher state is key material.
        f.debug_tuple("Suite").field(&self.kind()).finish()
    }
}
