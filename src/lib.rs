//! threshvault: a K-of-N threshold secret-sharing vault for a symmetric
//! master key.
//!
//! The master key is split into N shares such that any K reconstruct it
//! and fewer than K reveal nothing. Each share is sealed under its own
//! password-derived key with an authenticated envelope, so different
//! shareholders hold different passwords.
//!
//! ```no_run
//! use threshvault::entropy::OsEntropy;
//! use threshvault::vault::{VaultHeader, VaultParams};
//!
//! # fn main() -> Result<(), threshvault::vault::VaultError> {
//! let mut rng = OsEntropy;
//! let params = VaultParams { n_shares: 5, threshold: 3, ..Default::default() };
//!
//! let mut header = VaultHeader::new(params, &mut rng)?;
//! for (i, password) in ["red", "green", "blue", "cyan", "plum"].iter().enumerate() {
//!     header.set_password(i, password.as_bytes())?;
//! }
//! header.split(&mut rng)?;
//! // ... persist the shares, hand header.master_key() to the consumer ...
//!
//! // Recovery: any 3 shareholders type their passwords.
//! header.wipe_master_key();
//! header.try_password(b"green");
//! header.try_password(b"cyan");
//! header.try_password(b"plum");
//! header.combine()?;
//! # Ok(())
//! # }
//! ```
//!
//! Serialization of headers and the surrounding CLI are out of scope;
//! this crate produces and reconstructs the master key, nothing more.

#![forbid(unsafe_code)]

pub mod entropy;
pub mod gf256;
pub mod mem;
pub mod sss;
pub mod vault;

pub use vault::{Share, VaultError, VaultHeader, VaultParams};
