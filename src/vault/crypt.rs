//! Share crypto: password KDF and the authenticated envelope.
//!
//! # Scheme
//! 1. **KDF**: PBKDF2-HMAC-SHA256(password, salt, iterations) -> 32-byte key.
//!    The iteration count is a per-call parameter: per-share counts may
//!    differ, and the master-verifier derivation uses its own fixed count.
//! 2. **Envelope**: ChaCha20-Poly1305 with a detached 16-byte tag.
//!    Ciphertext length equals plaintext length (no padding).
//!
//! # Nonce
//! The nonce is fixed at zero: every key that reaches [`seal`] is derived
//! from a fresh random salt and seals exactly one payload, so (key, nonce)
//! pairs never repeat.
//!
//! # Failure semantics
//! [`open`] fails closed: on tag mismatch it returns [`AuthFailure`] and
//! never hands back partially decrypted data. An `AuthFailure` during
//! unlock means "wrong password for this share" and is expected, not an
//! error condition.

use chacha20poly1305::aead::AeadInPlace;
use chacha20poly1305::{ChaCha20Poly1305, Key, KeyInit, Nonce, Tag};
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;

use super::header::TAG_SIZE;
use super::VaultError;

/// Authentication failure: the tag did not match under the given key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AuthFailure;

/// Deterministic password-based key derivation into `out`.
pub(crate) fn derive_key(password: &[u8], salt: &[u8], iterations: u32, out: &mut [u8]) {
    pbkdf2_hmac::<Sha256>(password, salt, iterations, out);
}

/// Encrypts `payload` in place under `key`, returning the detached tag.
///
/// After a successful call the buffer holds ciphertext of the same length.
pub(crate) fn seal(key: &[u8], payload: &mut [u8]) -> Result<[u8; TAG_SIZE], VaultError> {
    let cipher = ChaCha20Poly1305::new(Key::from_slice(key));
    let tag = cipher
        .encrypt_in_place_detached(&Nonce::default(), &[], payload)
        .map_err(|_| VaultError::Crypto("share seal"))?;
    Ok(tag.into())
}

/// Authenticates and decrypts `buffer` in place under `key`.
///
/// On [`AuthFailure`] the caller must treat the buffer contents as
/// garbage and wipe them.
pub(crate) fn open(key: &[u8], buffer: &mut [u8], tag: &[u8; TAG_SIZE]) -> Result<(), AuthFailure> {
    let cipher = ChaCha20Poly1305::new(Key::from_slice(key));
    cipher
        .decrypt_in_place_detached(&Nonce::default(), &[], buffer, Tag::from_slice(tag))
        .map_err(|_| AuthFailure)
}
