//! Share identifier generation.
//!
//! Identifiers are the nonzero x-coordinates of the secret-sharing
//! polynomial. They are drawn as the first `n` elements of a uniformly
//! shuffled {1..255} pool; each Fisher-Yates draw uses rejection sampling
//! so the modulo reduction introduces no bias.

use super::VaultError;
use crate::entropy::EntropySource;

/// Returns `n` distinct nonzero identifiers, uniformly chosen.
///
/// Precondition: `1 <= n` (and `n <= 255` holds by type). Cannot exhaust
/// the pool; the only failure mode is the entropy source.
pub(crate) fn generate<R: EntropySource + ?Sized>(
    n: u8,
    rng: &mut R,
) -> Result<Vec<u8>, VaultError> {
    debug_assert!(n >= 1);

    let mut pool: [u8; 255] = core::array::from_fn(|i| (i + 1) as u8);

    let mut i = pool.len();
    while i > 1 {
        let r = draw_below(i as u32, rng)? as usize;
        pool.swap(i - 1, r);
        i -= 1;
    }

    Ok(pool[..n as usize].to_vec())
}

/// Uniform draw in `0..bound` by rejection sampling: draws above the
/// largest multiple of `bound` minus one are redrawn, so `r % bound`
/// carries no modulo bias.
fn draw_below<R: EntropySource + ?Sized>(bound: u32, rng: &mut R) -> Result<u32, VaultError> {
    let limit = u32::MAX - (u32::MAX % bound) - 1;
    loop {
        let mut buf = [0u8; 4];
        rng.fill(&mut buf)?;
        let r = u32::from_le_bytes(buf);
        if r <= limit {
            return Ok(r % bound);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::OsEntropy;

    #[test]
    fn test_distinct_nonzero_full_range() {
        let mut rng = OsEntropy;
        for n in [1u8, 2, 5, 254, 255] {
            let ids = generate(n, &mut rng).unwrap();
            assert_eq!(ids.len(), n as usize);

            let mut seen = [false; 256];
            for &id in &ids {
                assert_ne!(id, 0);
                assert!(!seen[id as usize], "duplicate identifier {id}");
                seen[id as usize] = true;
            }
        }
    }

    #[test]
    fn test_draw_below_in_range() {
        let mut rng = OsEntropy;
        for bound in [1u32, 2, 3, 200, 255] {
            for _ in 0..50 {
                assert!(draw_below(bound, &mut rng).unwrap() < bound);
            }
        }
    }

    #[test]
    fn test_positions_vary_across_trials() {
        // Coarse uniformity check at the front, middle, and tail of the
        // shuffled pool: across trials no sampled position should be
        // stuck on a handful of values. A uniform shuffle puts ~139
        // distinct values in each slot over 200 trials.
        const POSITIONS: [usize; 3] = [0, 127, 254];

        let mut rng = OsEntropy;
        let mut seen = [[false; 256]; POSITIONS.len()];
        for _ in 0..200 {
            let ids = generate(255, &mut rng).unwrap();
            for (slot, &pos) in POSITIONS.iter().enumerate() {
                seen[slot][ids[pos] as usize] = true;
            }
        }
        for (slot, seen) in seen.iter().enumerate() {
            let distinct = seen.iter().filter(|&&s| s).count();
            assert!(
                distinct > 50,
                "position {}: only {distinct} distinct values",
                POSITIONS[slot]
            );
        }
    }
}
