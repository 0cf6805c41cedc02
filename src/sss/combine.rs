//! Secret reconstruction by Lagrange interpolation.

use super::split::validate_identifiers;
use super::SssError;
use crate::gf256::Gf256;
use crate::mem::SecretBuf;

/// Interpolates the polynomial through `points` at x=0, recovering the
/// constant term (the secret) byte-by-byte.
///
/// This function has no notion of a threshold: with fewer correct points
/// than the polynomial degree requires, the interpolation simply passes
/// through a different polynomial and yields a different (wrong) secret.
/// Refusing under-threshold input is the caller's job.
pub(crate) fn interpolate_secret(points: &[(u8, &[u8])]) -> Result<SecretBuf, SssError> {
    if points.is_empty() {
        return Err(SssError::EmptyInput);
    }

    let value_len = points[0].1.len();
    if value_len == 0 {
        return Err(SssError::EmptyInput);
    }
    for &(_, value) in points {
        if value.len() != value_len {
            return Err(SssError::LengthMismatch);
        }
    }
    let identifiers: Vec<u8> = points.iter().map(|&(id, _)| id).collect();
    validate_identifiers(&identifiers)?;

    // Lagrange basis at x=0: lambda_j = prod_{m != j} x_m / (x_m - x_j).
    // In GF(2^8) subtraction is XOR, so the denominator term is x_m + x_j.
    let mut lambdas = Vec::with_capacity(points.len());
    for (j, &(xj, _)) in points.iter().enumerate() {
        let xj = Gf256(xj);
        let mut numerator = Gf256(1);
        let mut denominator = Gf256(1);

        for (m, &(xm, _)) in points.iter().enumerate() {
            if m == j {
                continue;
            }
            let xm = Gf256(xm);
            numerator *= xm;
            denominator *= xm + xj;
        }
        lambdas.push(numerator * denominator.inv());
    }

    let mut secret = SecretBuf::zeroed(value_len);
    for pos in 0..value_len {
        let mut sum = Gf256(0);
        for (j, &(_, value)) in points.iter().enumerate() {
            sum += Gf256(value[pos]) * lambdas[j];
        }
        secret[pos] = sum.0;
    }

    Ok(secret)
}
