//! GF(2^8) arithmetic.
//!
//! Finite field arithmetic over GF(2^8) with the irreducible polynomial
//! x^8 + x^4 + x^3 + x + 1 (0x11B), as used by the secret-sharing scheme.
//! All operations are constant-time and branch-free: multiplication is
//! bit-serial with mask-based conditionals (no lookup tables, so no
//! cache-timing leaks), and inversion is a fixed exponentiation chain.

use core::ops::{Add, AddAssign, Mul, MulAssign};

/// Low byte of the irreducible polynomial (full poly: 0x11B).
const POLY: u8 = 0x1B;

/// A field element, wrapping a `u8`.
///
/// The wrapper keeps field operations type-safe so a raw XOR or integer
/// multiply cannot be substituted by accident.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[repr(transparent)]
pub struct Gf256(pub u8);

impl Add for Gf256 {
    type Output = Self;

    /// Field addition is XOR (characteristic 2).
    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Gf256(self.0 ^ rhs.0)
    }
}

impl AddAssign for Gf256 {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

impl Mul for Gf256 {
    type Output = Self;

    /// Bit-serial multiplication modulo 0x11B.
    ///
    /// Fixed eight iterations; conditionals are realized as masks derived
    /// with `wrapping_mul(0xFF)`, never as branches on secret data.
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        let mut a = self.0;
        let mut b = rhs.0;
        let mut acc = 0u8;
        for _ in 0..8 {
            let low_mask = (b & 1).wrapping_mul(0xFF);
            acc ^= a & low_mask;
            let carry_mask = (a >> 7).wrapping_mul(0xFF);
            a = (a << 1) ^ (POLY & carry_mask);
            b >>= 1;
        }
        Gf256(acc)
    }
}

impl MulAssign for Gf256 {
    #[inline(always)]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Gf256 {
    /// Multiplicative inverse, computed as a^254 (Fermat, since the
    /// multiplicative group has order 255).
    ///
    /// Fixed squaring chain, constant-time. `inv(0)` returns 0; callers
    /// guarantee nonzero inputs (share identifiers are 1..=255).
    pub fn inv(self) -> Self {
        // 254 = 2 + 4 + 8 + 16 + 32 + 64 + 128
        let x2 = self * self;
        let x4 = x2 * x2;
        let x8 = x4 * x4;
        let x16 = x8 * x8;
        let x32 = x16 * x16;
        let x64 = x32 * x32;
        let x128 = x64 * x64;
        x2 * x4 * x8 * x16 * x32 * x64 * x128
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_is_xor() {
        assert_eq!(Gf256(0x53) + Gf256(0xCA), Gf256(0x99));
        assert_eq!(Gf256(0xFF) + Gf256(0xFF), Gf256(0));
    }

    #[test]
    fn test_mul_known_vectors() {
        // Standard AES-field examples (same polynomial).
        assert_eq!(Gf256(0x53) * Gf256(0xCA), Gf256(0x01));
        assert_eq!(Gf256(0x57) * Gf256(0x83), Gf256(0xC1));
        assert_eq!(Gf256(0x02) * Gf256(0x80), Gf256(0x1B));
    }

    #[test]
    fn test_mul_identity_and_zero() {
        for v in 0..=255u8 {
            assert_eq!(Gf256(v) * Gf256(1), Gf256(v));
            assert_eq!(Gf256(v) * Gf256(0), Gf256(0));
        }
    }

    #[test]
    fn test_inverse() {
        for v in 1..=255u8 {
            let a = Gf256(v);
            assert_eq!(a * a.inv(), Gf256(1), "inverse failed for {v:#04x}");
        }
        assert_eq!(Gf256(0).inv(), Gf256(0));
    }

    #[test]
    fn test_mul_commutative() {
        for a in (0..=255u8).step_by(17) {
            for b in (0..=255u8).step_by(13) {
                assert_eq!(Gf256(a) * Gf256(b), Gf256(b) * Gf256(a));
            }
        }
    }
}
