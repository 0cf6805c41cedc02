//! The threshold vault core.
//!
//! A [`VaultHeader`] holds N password-protected shares of a symmetric
//! master key; any K of them reconstruct it. The lifecycle is:
//!
//! 1. [`VaultHeader::new`]: allocate shares with fresh salts.
//! 2. [`VaultHeader::set_password`]: derive each share's password key.
//! 3. [`VaultHeader::split`]: generate and whiten the master key, share
//!    it, and seal every share under its password key.
//! 4. [`VaultHeader::try_password`]: later, attempt one password against
//!    all still-locked shares (repeatable with different passwords).
//! 5. [`VaultHeader::combine`]: reconstruct the master key once at least
//!    K shares are unlocked.
//!
//! # Components
//! - `header`: data model and parameters.
//! - `identifiers`: unbiased distinct share-identifier generation.
//! - `crypt`: password KDF and the authenticated share envelope.
//! - `split` / `unlock` / `combine`: the three orchestration paths.

pub mod combine;
pub mod crypt;
pub mod header;
pub mod identifiers;
pub mod split;
pub mod unlock;

pub use header::{Share, VaultHeader, VaultParams};

use thiserror::Error;

use crate::entropy::EntropyError;
use crate::sss::SssError;

/// Errors surfaced by vault operations.
///
/// Wrong passwords during unlock are *not* errors; they are counted
/// misses reported through [`VaultHeader::try_password`]'s return value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VaultError {
    /// The threshold invariant `1 <= k <= n <= 255` was violated.
    #[error("invalid threshold configuration: k={threshold}, n={n_shares}")]
    InvalidThreshold { threshold: u8, n_shares: u8 },

    /// A share index was out of range.
    #[error("share index {index} out of range ({n_shares} shares)")]
    ShareIndexOutOfRange { index: usize, n_shares: u8 },

    /// `split` was called before every share had a password key installed.
    #[error("share {index} has no password key installed")]
    MissingPasswordKey { index: usize },

    /// The operation requires the master key to be absent, but it is
    /// already resident (split already ran, or combine already succeeded).
    #[error("master key already present")]
    MasterKeyPresent,

    /// Too few shares are unlocked to reach the threshold.
    #[error("{unlocked} share(s) unlocked, {required} required")]
    InsufficientShares { unlocked: usize, required: usize },

    /// The reconstructed master key did not match the verifier recorded
    /// at split time. Distinct from insufficiency: the scheme produced a
    /// key, but it is not the one that was split.
    #[error("reconstructed master key failed verification")]
    VerificationFailed,

    /// The entropy source failed. Security-critical and unrecoverable.
    #[error("entropy source failure: {0:?}")]
    Entropy(EntropyError),

    /// An encryption primitive failed at the library level. The header
    /// must be discarded; partial state is not valid.
    #[error("cryptographic primitive failure in {0}")]
    Crypto(&'static str),

    /// The secret-sharing primitive rejected its inputs.
    #[error("secret sharing failure: {0:?}")]
    Sharing(SssError),
}

impl From<EntropyError> for VaultError {
    fn from(err: EntropyError) -> Self {
        VaultError::Entropy(err)
    }
}

impl From<SssError> for VaultError {
    fn from(err: SssError) -> Self {
        VaultError::Sharing(err)
    }
}
