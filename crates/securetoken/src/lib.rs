//! Compact, self-contained tokens that carry arbitrary data, are encrypted and
//! authenticated, and expire a fixed time after they are issued.
//!
//! The intended use is stateless session identifiers such as HTTP cookies:
//! the token is the session, no server-side store is needed.
//!
//! ```
//! use std::time::Duration;
//! use securetoken::Tokener;
//!
//! let tokener = Tokener::new(b"1234567887654321", Duration::from_secs(24 * 60 * 60))?;
//! let token = tokener.seal_str("secretuserid")?;
//! assert_eq!(tokener.unseal_string(&token)?, "secretuserid");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Security notes
//!
//! - Keys are never logged or printed by `Debug`.
//! - Authentication is checked before expiry, so an expiry verdict is only
//!   ever given about a genuine token.

pub mod clock;
pub mod error;
pub mod random;
pub mod suite;
pub mod tokener;

pub use clock::{Clock, ManualClock, SystemClock, Timestamp};
pub use error::{ConstructionError, TokenError};
pub use random::{OsRandom, RandomError, RandomSource};
pub use suite::SuiteKind;
pub use tokener::{sealed_len, Tokener, TokenerBuilder, Unsealed};
