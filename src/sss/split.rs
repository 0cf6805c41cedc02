//! Polynomial generation and share evaluation.

use super::SssError;
use crate::entropy::EntropySource;
use crate::gf256::Gf256;
use crate::mem::SecretBuf;

/// Splits `secret` byte-by-byte into one value per identifier.
///
/// For each secret byte a fresh degree-(threshold-1) polynomial is drawn
/// with the secret byte as the constant term; each identifier's value byte
/// is the polynomial evaluated at that x-coordinate.
pub(crate) fn split_secret<R: EntropySource + ?Sized>(
    secret: &[u8],
    threshold: u8,
    identifiers: &[u8],
    rng: &mut R,
) -> Result<Vec<SecretBuf>, SssError> {
    if secret.is_empty() {
        return Err(SssError::EmptyInput);
    }
    if threshold < 2 || threshold as usize > identifiers.len() {
        return Err(SssError::InvalidThreshold);
    }
    validate_identifiers(identifiers)?;

    let mut values: Vec<SecretBuf> = identifiers
        .iter()
        .map(|_| SecretBuf::zeroed(secret.len()))
        .collect();

    // One coefficient buffer, reused per byte and wiped on drop.
    // coeffs[0] is the secret byte; the rest are fresh randomness.
    let mut coeffs = SecretBuf::zeroed(threshold as usize);

    for (pos, &byte) in secret.iter().enumerate() {
        coeffs[0] = byte;
        rng.fill(&mut coeffs[1..]).map_err(|_| SssError::RngFailure)?;

        for (i, &id) in identifiers.iter().enumerate() {
            values[i][pos] = evaluate(&coeffs, Gf256(id)).0;
        }
    }
    coeffs.wipe();

    Ok(values)
}

pub(crate) fn validate_identifiers(identifiers: &[u8]) -> Result<(), SssError> {
    let mut seen = [false; 256];
    for &id in identifiers {
        if id == 0 {
            return Err(SssError::InvalidIdentifier);
        }
        if seen[id as usize] {
            return Err(SssError::DuplicateIdentifier);
        }
        seen[id as usize] = true;
    }
    Ok(())
}

/// Horner evaluation of `c[0] + c[1]*x + ... + c[k-1]*x^(k-1)`.
#[inline]
fn evaluate(coeffs: &[u8], x: Gf256) -> Gf256 {
    let mut acc = Gf256(0);
    for &c in coeffs.iter().rev() {
        acc = acc * x + Gf256(c);
    }
    acc
}
