//! The split path: generate the master key and seal all shares.

use super::header::{KEY_SIZE, PAYLOAD_SIZE, VERIFIER_ITERATIONS};
use super::{crypt, identifiers, VaultError, VaultHeader};
use crate::entropy::EntropySource;
use crate::mem::{memxor, SecretBuf};
use crate::sss::{ShamirGf256, ThresholdScheme};

impl VaultHeader {
    /// Generates the master key and locks every share.
    ///
    /// Requires every share's password key to be installed
    /// ([`VaultHeader::set_password`]) and no master key to be resident.
    ///
    /// Steps:
    /// 1. Fill the master key and master salt from the entropy source.
    /// 2. Whiten the master key by XORing in each share's password key,
    ///    in share order, folding independently sourced password entropy
    ///    into it as a hedge against a weak system RNG.
    /// 3. Record the master verifier (PBKDF2 at a fixed count).
    /// 4. Threshold 1: every share value is the master key (replication).
    ///    Threshold > 1: Shamir-split under fresh distinct identifiers.
    /// 5. Seal each payload under its share's password key, then wipe the
    ///    payload and consume the password key.
    ///
    /// On success the master key stays resident for the caller's use.
    /// On any error the header holds partial state and must be discarded.
    pub fn split<R: EntropySource + ?Sized>(&mut self, rng: &mut R) -> Result<(), VaultError> {
        if self.master_key.is_some() {
            return Err(VaultError::MasterKeyPresent);
        }
        for (index, share) in self.shares.iter().enumerate() {
            if share.password_key.is_none() {
                return Err(VaultError::MissingPasswordKey { index });
            }
        }

        let mut master = SecretBuf::zeroed(KEY_SIZE);
        rng.fill(&mut master)?;
        rng.fill(&mut self.master_salt)?;

        // Whitening: defense-in-depth, not the primary security property.
        for share in &self.shares {
            if let Some(key) = share.password_key.as_deref() {
                memxor(&mut master, key);
            }
        }

        crypt::derive_key(
            &master,
            &self.master_salt,
            VERIFIER_ITERATIONS,
            &mut self.master_verifier,
        );

        let ids = identifiers::generate(self.n_shares(), rng)?;
        let values: Vec<SecretBuf> = if self.threshold() == 1 {
            self.shares
                .iter()
                .map(|_| SecretBuf::from_slice(&master))
                .collect()
        } else {
            ShamirGf256.split(&master, self.threshold(), &ids, rng)?
        };

        for (i, share) in self.shares.iter_mut().enumerate() {
            let mut payload = SecretBuf::zeroed(PAYLOAD_SIZE);
            payload[0] = ids[i];
            payload[1..].copy_from_slice(&values[i]);

            // Consume the password key; it is wiped on drop below.
            let key = share
                .password_key
                .take()
                .ok_or(VaultError::MissingPasswordKey { index: i })?;

            // seal() overwrites the payload buffer with ciphertext.
            let tag = crypt::seal(&key, &mut payload)?;
            share.ciphertext = payload.to_vec();
            share.tag = tag;
        }

        self.master_key = Some(master);
        log::info!(
            "split complete: {} shares sealed, threshold {}",
            self.n_shares(),
            self.threshold()
        );
        Ok(())
    }
}
