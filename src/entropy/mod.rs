//! Entropy sources.
//!
//! Defines the interface the vault uses to obtain random bytes for keys,
//! salts, and unbiased identifier sampling, plus the OS-backed default
//! source.
//!
//! # Design
//! - **Trait seam**: operations take a generic source so tests can
//!   substitute deterministic mocks.
//! - **Fail-fast**: an entropy failure is security-critical and carries no
//!   recovery path; callers propagate it and abandon the operation.

pub mod os;

pub use os::OsEntropy;

/// Error types for entropy collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntropyError {
    /// The underlying source failed or returned short.
    SourceFailure,
}

/// A source of cryptographically strong random bytes.
pub trait EntropySource {
    /// Returns a unique identifier for the source.
    fn name(&self) -> &'static str;

    /// Fills `dest` with random bytes from the source.
    ///
    /// Either fills the whole buffer or fails; partial fills are not
    /// reported as success.
    fn fill(&mut self, dest: &mut [u8]) -> Result<(), EntropyError>;
}
