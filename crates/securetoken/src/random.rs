//! Secure random collaborator used for the random part of each nonce.

use aes_gcm_siv::aead::{rand_core::RngCore, OsRng};
use thiserror::Error;

/// The random source could not fill the requested bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("random source unavailable: {0}")]
pub struct RandomError(String);

impl RandomError {
    pub fn new(reason: impl Into<String>) -> Self {
        RandomError(reason.into())
    }
}

/// Fills buffers with unpredictable bytes.
///
/// Implementations must be safe to share between threads and must report
/// failure instead of returning weaker output.
pub trait RandomSource: Send + Sync {
    fn fill(&self, dest: &mut [u8]) -> Result<(), RandomError>;
}

/// The operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill(&self, dest: &mut [u8]) -> Result<(), RandomError> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| RandomError::new(e.to_string()))
    }
}
