//! Operating-system entropy source.

use super::{EntropyError, EntropySource};

/// Entropy source backed by the platform CSPRNG (`getrandom`).
///
/// This is the source for all production key and salt material. A failure
/// here means the platform cannot guarantee the security properties of the
/// vault; callers must treat it as fatal.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn name(&self) -> &'static str {
        "os"
    }

    fn fill(&mut self, dest: &mut [u8]) -> Result<(), EntropyError> {
        getrandom::fill(dest).map_err(|_| EntropyError::SourceFailure)
    }
}
