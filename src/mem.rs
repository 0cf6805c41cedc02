//! Secure buffer utilities.
//!
//! Every sensitive buffer in the vault (master key, password-derived keys,
//! unlocked share payloads, polynomial coefficients) lives in a [`SecretBuf`],
//! which allocates zero-initialized and wipes itself on every exit path,
//! including panics and early returns.
//!
//! # Security
//! - **Zeroization**: `SecretBuf` zeroizes on drop via the `zeroize` crate.
//! - **Redacted Debug**: contents never appear in `Debug` output.
//! - **Constant-Time**: [`memxor`] and [`secret_eq`] avoid secret-dependent
//!   branches.

use core::fmt;
use core::ops::{Deref, DerefMut};

use subtle::ConstantTimeEq;
use zeroize::Zeroize;

/// A heap buffer for key material, zero-initialized on allocation and
/// zeroized on drop.
pub struct SecretBuf {
    data: Box<[u8]>,
}

impl SecretBuf {
    /// Allocates a zero-filled buffer of `len` bytes.
    pub fn zeroed(len: usize) -> Self {
        Self {
            data: vec![0u8; len].into_boxed_slice(),
        }
    }

    /// Allocates a buffer holding a copy of `bytes`.
    pub fn from_slice(bytes: &[u8]) -> Self {
        Self {
            data: bytes.to_vec().into_boxed_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Zeroizes the contents in place without freeing the allocation.
    ///
    /// Used when a scratch buffer is reused for the next attempt.
    pub fn wipe(&mut self) {
        self.data.zeroize();
    }
}

impl Deref for SecretBuf {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.data
    }
}

impl DerefMut for SecretBuf {
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl Drop for SecretBuf {
    fn drop(&mut self) {
        self.data.zeroize();
    }
}

impl PartialEq for SecretBuf {
    /// Constant-time comparison; equality of secrets must not leak the
    /// length of a matching prefix through timing.
    fn eq(&self, other: &Self) -> bool {
        secret_eq(&self.data, &other.data)
    }
}

impl Eq for SecretBuf {}

impl fmt::Debug for SecretBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretBuf")
            .field("length", &self.data.len())
            .field("data", &"***SENSITIVE***")
            .finish()
    }
}

/// XORs `src` into `dst` in place (`dst[i] ^= src[i]`).
///
/// Processes 8-byte blocks followed by a byte tail; no secret-dependent
/// branching. Requires `dst.len() == src.len()`.
pub fn memxor(dst: &mut [u8], src: &[u8]) {
    debug_assert_eq!(dst.len(), src.len());
    let len = dst.len().min(src.len());
    let mut i = 0;

    while i + 8 <= len {
        let mut a = [0u8; 8];
        let mut b = [0u8; 8];
        a.copy_from_slice(&dst[i..i + 8]);
        b.copy_from_slice(&src[i..i + 8]);
        let x = u64::from_ne_bytes(a) ^ u64::from_ne_bytes(b);
        dst[i..i + 8].copy_from_slice(&x.to_ne_bytes());
        i += 8;
    }

    while i < len {
        dst[i] ^= src[i];
        i += 1;
    }
}

/// Constant-time equality for secret-derived byte strings.
///
/// Length mismatch short-circuits; lengths are public here.
pub fn secret_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && bool::from(a.ct_eq(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeroed_and_wipe() {
        let mut buf = SecretBuf::zeroed(32);
        assert_eq!(buf.len(), 32);
        assert!(buf.iter().all(|&b| b == 0));

        buf.copy_from_slice(&[0xAA; 32]);
        buf.wipe();
        assert!(buf.iter().all(|&b| b == 0));
        assert_eq!(buf.len(), 32);
    }

    #[test]
    fn test_memxor_roundtrip() {
        let data = (0..100).map(|i| i as u8).collect::<Vec<u8>>();
        let key = (0..100).map(|i| (i as u8).wrapping_mul(7)).collect::<Vec<u8>>();

        let mut out = data.clone();
        memxor(&mut out, &key);
        assert_ne!(out, data);
        memxor(&mut out, &key);
        assert_eq!(out, data);
    }

    #[test]
    fn test_secret_eq() {
        assert!(secret_eq(b"abcd", b"abcd"));
        assert!(!secret_eq(b"abcd", b"abce"));
        assert!(!secret_eq(b"abcd", b"abc"));
    }

    #[test]
    fn test_buffer_equality() {
        let a = SecretBuf::from_slice(&[1, 2, 3]);
        assert_eq!(a, SecretBuf::from_slice(&[1, 2, 3]));
        assert_ne!(a, SecretBuf::from_slice(&[1, 2, 4]));
        assert_ne!(a, SecretBuf::from_slice(&[1, 2]));
    }

    #[test]
    fn test_debug_redaction() {
        let buf = SecretBuf::from_slice(&[0xFF; 16]);
        let s = format!("{:?}", buf);
        assert!(s.contains("***SENSITIVE***"));
        assert!(!s.contains("255"));
    }
}
