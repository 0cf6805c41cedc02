//! Threshold secret sharing.
//!
//! Shamir's Secret Sharing over GF(256), exposed behind the
//! [`ThresholdScheme`] trait so the vault depends on the capability, not
//! the algebra.
//!
//! # Contract
//! - `split` takes explicit, caller-supplied nonzero identifiers (the
//!   x-coordinates); it does not invent its own numbering.
//! - `combine` interpolates whatever points it is handed. Given fewer than
//!   the threshold number of correct points it returns a *wrong* secret,
//!   never an error: that is the information-theoretic property of the
//!   scheme, and callers must not rely on it to detect insufficiency.
//!
//! # Security
//! - Polynomial coefficients live in wiped-on-drop buffers.
//! - All field arithmetic is constant-time ([`crate::gf256`]).

pub mod combine;
pub mod split;

use crate::entropy::EntropySource;
use crate::mem::SecretBuf;

/// Errors for secret-sharing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SssError {
    /// Threshold out of range (needs 2..=identifier count).
    InvalidThreshold,
    /// An identifier was zero.
    InvalidIdentifier,
    /// Two points carried the same identifier.
    DuplicateIdentifier,
    /// Point values differ in length.
    LengthMismatch,
    /// The secret (or point set) was empty.
    EmptyInput,
    /// Random number generator failure.
    RngFailure,
}

/// A (K,N) threshold secret-sharing scheme.
pub trait ThresholdScheme {
    /// Splits `secret` into one share value per identifier; any
    /// `threshold` of them reconstruct it.
    fn split<R: EntropySource + ?Sized>(
        &self,
        secret: &[u8],
        threshold: u8,
        identifiers: &[u8],
        rng: &mut R,
    ) -> Result<Vec<SecretBuf>, SssError>;

    /// Reconstructs a secret from `(identifier, value)` points.
    ///
    /// Never detects under-threshold input; see the module docs.
    fn combine(&self, points: &[(u8, &[u8])]) -> Result<SecretBuf, SssError>;
}

/// Shamir's scheme over GF(256).
pub struct ShamirGf256;

impl ThresholdScheme for ShamirGf256 {
    fn split<R: EntropySource + ?Sized>(
        &self,
        secret: &[u8],
        threshold: u8,
        identifiers: &[u8],
        rng: &mut R,
    ) -> Result<Vec<SecretBuf>, SssError> {
        split::split_secret(secret, threshold, identifiers, rng)
    }

    fn combine(&self, points: &[(u8, &[u8])]) -> Result<SecretBuf, SssError> {
        combine::interpolate_secret(points)
    }
}
