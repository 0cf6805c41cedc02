//! The unlock path: try one password against every locked share.

use core::mem;

use super::header::{KEY_SIZE, PAYLOAD_SIZE};
use super::{crypt, VaultHeader};
use crate::mem::SecretBuf;

/// Reusable scratch space for unlock attempts.
///
/// One candidate key buffer and one plaintext buffer are shared across
/// all attempts of a pass, so key material never sits in more than one
/// place at a time. On a successful unlock the plaintext buffer is
/// promoted into the share and replaced with a fresh allocation, so the
/// next attempt cannot clobber just-unlocked data.
struct Scratch {
    key: SecretBuf,
    plaintext: SecretBuf,
}

impl Scratch {
    fn new() -> Self {
        Self {
            key: SecretBuf::zeroed(KEY_SIZE),
            plaintext: SecretBuf::zeroed(PAYLOAD_SIZE),
        }
    }

    /// Hands the current plaintext buffer to the caller and installs a
    /// fresh one.
    fn promote_plaintext(&mut self) -> SecretBuf {
        mem::replace(&mut self.plaintext, SecretBuf::zeroed(PAYLOAD_SIZE))
    }
}

impl VaultHeader {
    /// Attempts `password` against every currently locked share and
    /// returns the number of shares newly unlocked (0 if it matched
    /// none).
    ///
    /// Already-unlocked shares are skipped, so repeating a password is a
    /// no-op; calling again with a different shareholder's password
    /// accumulates unlocks. A wrong password for one share never aborts
    /// evaluation of the remaining shares.
    pub fn try_password(&mut self, password: &[u8]) -> usize {
        let mut scratch = Scratch::new();
        let mut unlocked = 0;

        for (i, share) in self.shares.iter_mut().enumerate() {
            if share.is_unlocked() {
                continue;
            }
            // A share that was never sealed has nothing to unlock.
            if share.ciphertext.len() != PAYLOAD_SIZE {
                continue;
            }
            log::debug!("checking share {i}");

            crypt::derive_key(
                password,
                share.salt(),
                share.kdf_iterations(),
                &mut scratch.key,
            );
            scratch.plaintext.copy_from_slice(&share.ciphertext);

            match crypt::open(&scratch.key, &mut scratch.plaintext, &share.tag) {
                Ok(()) => {
                    log::info!("unlocked share {i}");
                    share.plaintext = Some(scratch.promote_plaintext());
                    unlocked += 1;
                }
                Err(crypt::AuthFailure) => {
                    // Wrong password for this share; keep going.
                    scratch.plaintext.wipe();
                }
            }
            scratch.key.wipe();
        }

        unlocked
    }
}
