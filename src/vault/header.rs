//! Vault data model.
//!
//! [`VaultHeader`] owns the share sequence and all master-key material.
//! [`Share`] holds what is persisted per shareholder (salt, iteration
//! count, ciphertext, tag) plus two strictly transient buffers: the
//! password-derived key and, after a successful unlock, the plaintext
//! payload. Both transient buffers are wiped the moment they are no
//! longer needed.

use core::fmt;

use super::{crypt, VaultError};
use crate::entropy::EntropySource;
use crate::mem::SecretBuf;

/// Master key size in bytes (ChaCha20-Poly1305 key).
pub const KEY_SIZE: usize = 32;
/// Detached authentication tag size in bytes (Poly1305).
pub const TAG_SIZE: usize = 16;
/// Salt size for both the master verifier and per-share KDF salts.
pub const SALT_SIZE: usize = 8;
/// Master verifier size in bytes.
pub const VERIFIER_SIZE: usize = 32;
/// Share payload size: identifier byte followed by the share value.
pub const PAYLOAD_SIZE: usize = KEY_SIZE + 1;

/// Fixed iteration count for the master verifier derivation. Deliberately
/// distinct from any per-share count; used only to sanity-check a later
/// reconstruction, never to gate access.
pub const VERIFIER_ITERATIONS: u32 = 250_000;
/// Default per-share KDF iteration count.
pub const DEFAULT_KDF_ITERATIONS: u32 = 100_000;

/// Construction parameters for a vault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VaultParams {
    /// Total number of shares N (1..=255).
    pub n_shares: u8,
    /// Threshold K (1..=n_shares).
    pub threshold: u8,
    /// Per-share KDF iteration count applied to every share; individual
    /// shares can be re-tuned with [`VaultHeader::set_kdf_iterations`].
    pub kdf_iterations: u32,
}

impl Default for VaultParams {
    fn default() -> Self {
        Self {
            n_shares: 1,
            threshold: 1,
            kdf_iterations: DEFAULT_KDF_ITERATIONS,
        }
    }
}

/// One of the N shares of the vault.
pub struct Share {
    salt: [u8; SALT_SIZE],
    kdf_iterations: u32,
    /// Password-derived key; present only between `set_password` and
    /// `split`, or transiently inside an unlock attempt's scratch space.
    pub(crate) password_key: Option<SecretBuf>,
    /// Identifier byte followed by the share value; present only while
    /// the share is unlocked.
    pub(crate) plaintext: Option<SecretBuf>,
    /// Sealed payload, written exactly once at split time.
    pub(crate) ciphertext: Vec<u8>,
    /// Detached authentication tag, written exactly once at split time.
    pub(crate) tag: [u8; TAG_SIZE],
}

impl Share {
    fn new(salt: [u8; SALT_SIZE], kdf_iterations: u32) -> Self {
        Self {
            salt,
            kdf_iterations,
            password_key: None,
            plaintext: None,
            ciphertext: Vec::new(),
            tag: [0u8; TAG_SIZE],
        }
    }

    pub fn salt(&self) -> &[u8; SALT_SIZE] {
        &self.salt
    }

    pub fn kdf_iterations(&self) -> u32 {
        self.kdf_iterations
    }

    /// Whether this share's plaintext payload is currently resident.
    pub fn is_unlocked(&self) -> bool {
        self.plaintext.is_some()
    }

    /// The share identifier: byte 0 of the plaintext payload. Only
    /// readable while the share is unlocked.
    pub fn identifier(&self) -> Option<u8> {
        self.plaintext.as_ref().map(|p| p[0])
    }

    /// The share value (payload minus the identifier byte).
    pub(crate) fn value(&self) -> Option<&[u8]> {
        self.plaintext.as_ref().map(|p| &p[1..])
    }
}

impl fmt::Debug for Share {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Share")
            .field("kdf_iterations", &self.kdf_iterations)
            .field("unlocked", &self.is_unlocked())
            .field("payload", &"***SENSITIVE***")
            .finish()
    }
}

/// The vault aggregate: parameters, master-key material, and shares.
pub struct VaultHeader {
    n_shares: u8,
    threshold: u8,
    key_size: usize,
    tag_size: usize,
    pub(crate) master_key: Option<SecretBuf>,
    pub(crate) master_salt: [u8; SALT_SIZE],
    pub(crate) master_verifier: [u8; VERIFIER_SIZE],
    pub(crate) shares: Vec<Share>,
}

impl VaultHeader {
    /// Creates a vault with `params.n_shares` locked, passwordless shares,
    /// each with a fresh independent salt.
    ///
    /// Fails with [`VaultError::InvalidThreshold`] unless
    /// `1 <= threshold <= n_shares`.
    pub fn new<R: EntropySource + ?Sized>(
        params: VaultParams,
        rng: &mut R,
    ) -> Result<Self, VaultError> {
        if params.n_shares == 0 || params.threshold == 0 || params.threshold > params.n_shares {
            return Err(VaultError::InvalidThreshold {
                threshold: params.threshold,
                n_shares: params.n_shares,
            });
        }

        let mut shares = Vec::with_capacity(params.n_shares as usize);
        for _ in 0..params.n_shares {
            let mut salt = [0u8; SALT_SIZE];
            rng.fill(&mut salt)?;
            shares.push(Share::new(salt, params.kdf_iterations));
        }

        Ok(Self {
            n_shares: params.n_shares,
            threshold: params.threshold,
            key_size: KEY_SIZE,
            tag_size: TAG_SIZE,
            master_key: None,
            master_salt: [0u8; SALT_SIZE],
            master_verifier: [0u8; VERIFIER_SIZE],
            shares,
        })
    }

    pub fn n_shares(&self) -> u8 {
        self.n_shares
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    pub fn key_size(&self) -> usize {
        self.key_size
    }

    pub fn tag_size(&self) -> usize {
        self.tag_size
    }

    pub fn shares(&self) -> &[Share] {
        &self.shares
    }

    /// The master key, if generated (after `split`) or reconstructed
    /// (after `combine`).
    pub fn master_key(&self) -> Option<&[u8]> {
        self.master_key.as_deref()
    }

    /// Wipes and releases the resident master key once the caller is done
    /// with it.
    pub fn wipe_master_key(&mut self) {
        // SecretBuf zeroizes on drop.
        self.master_key = None;
    }

    /// Number of currently unlocked shares.
    pub fn unlocked_count(&self) -> usize {
        self.shares.iter().filter(|s| s.is_unlocked()).count()
    }

    /// Re-tunes one share's KDF iteration count. Must happen before that
    /// share's password is set; iteration counts may differ across shares.
    pub fn set_kdf_iterations(&mut self, index: usize, iterations: u32) -> Result<(), VaultError> {
        let n_shares = self.n_shares;
        let share = self
            .shares
            .get_mut(index)
            .ok_or(VaultError::ShareIndexOutOfRange { index, n_shares })?;
        share.kdf_iterations = iterations;
        Ok(())
    }

    /// Derives and installs share `index`'s password key. Must be called
    /// for every share before [`VaultHeader::split`]; this is also how
    /// share-password entropy enters the master-key whitening step.
    pub fn set_password(&mut self, index: usize, password: &[u8]) -> Result<(), VaultError> {
        let n_shares = self.n_shares;
        let share = self
            .shares
            .get_mut(index)
            .ok_or(VaultError::ShareIndexOutOfRange { index, n_shares })?;

        let mut key = SecretBuf::zeroed(KEY_SIZE);
        crypt::derive_key(password, &share.salt, share.kdf_iterations, &mut key);
        share.password_key = Some(key);
        Ok(())
    }
}

impl fmt::Debug for VaultHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VaultHeader")
            .field("n_shares", &self.n_shares)
            .field("threshold", &self.threshold)
            .field("unlocked", &self.unlocked_count())
            .field("master_key", &self.master_key.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sss::testutil::MockEntropy;

    #[test]
    fn test_invariant_validation() {
        let mut rng = MockEntropy { fill_val: 0 };

        for (n, k) in [(0u8, 1u8), (3, 0), (3, 4)] {
            let params = VaultParams {
                n_shares: n,
                threshold: k,
                kdf_iterations: 4,
            };
            assert_eq!(
                VaultHeader::new(params, &mut rng).err(),
                Some(VaultError::InvalidThreshold {
                    threshold: k,
                    n_shares: n
                })
            );
        }
    }

    #[test]
    fn test_new_header_shape() {
        let mut rng = MockEntropy { fill_val: 1 };
        let params = VaultParams {
            n_shares: 4,
            threshold: 2,
            kdf_iterations: 4,
        };
        let header = VaultHeader::new(params, &mut rng).unwrap();

        assert_eq!(header.n_shares(), 4);
        assert_eq!(header.threshold(), 2);
        assert_eq!(header.key_size(), KEY_SIZE);
        assert_eq!(header.tag_size(), TAG_SIZE);
        assert!(header.master_key().is_none());
        assert_eq!(header.unlocked_count(), 0);

        // Salts are independent per share.
        assert_ne!(header.shares()[0].salt(), header.shares()[1].salt());
    }

    #[test]
    fn test_share_index_errors() {
        let mut rng = MockEntropy { fill_val: 1 };
        let params = VaultParams {
            n_shares: 2,
            threshold: 1,
            kdf_iterations: 4,
        };
        let mut header = VaultHeader::new(params, &mut rng).unwrap();

        assert!(matches!(
            header.set_password(2, b"pw"),
            Err(VaultError::ShareIndexOutOfRange { index: 2, .. })
        ));
        assert!(matches!(
            header.set_kdf_iterations(9, 10),
            Err(VaultError::ShareIndexOutOfRange { index: 9, .. })
        ));
    }

    #[test]
    fn test_debug_redaction() {
        let mut rng = MockEntropy { fill_val: 1 };
        let params = VaultParams {
            n_shares: 1,
            threshold: 1,
            kdf_iterations: 4,
        };
        let mut header = VaultHeader::new(params, &mut rng).unwrap();
        header.set_password(0, b"secret-password").unwrap();

        let s = format!("{:?} {:?}", header, header.shares()[0]);
        assert!(s.contains("***SENSITIVE***"));
        assert!(!s.contains("secret-password"));
    }
}
