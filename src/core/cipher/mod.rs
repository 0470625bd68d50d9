//! Cryptographic operations.
//!
//! Provides the encryption/decryption abstraction the store seals its blob
//! with, and the default age implementation.
//!
//! ## Backends
//!
//! - **age**: Default, always available. Encrypts to SSH (`ssh-ed25519`,
//!   `ssh-rsa`) or native x25519 recipients.
//!
//! ## Adding a New Backend
//!
//! 1. Implement the `Cipher` trait
//! 2. Add the implementation in a new file
//! 3. Construct the store with `SecretStore::with_cipher`

use zeroize::Zeroizing;

use crate::error::Result;

mod age;

pub use self::age::Age;

/// Cryptographic backend trait.
///
/// Abstracts encryption and decryption of the storage blob so the store can
/// be driven by any asymmetric scheme.
pub trait Cipher {
    /// Type representing a recipient public key.
    type Recipient;

    /// Type representing a private identity/key.
    type Identity;

    /// Encrypt plaintext for the given recipients.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::EncryptionFailed` if encryption fails.
    fn encrypt(&self, plaintext: &str, recipients: &[&Self::Recipient]) -> Result<Vec<u8>>;

    /// Decrypt a ciphertext using a private identity.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::DecryptionFailed` if the identity does not match
    /// or the ciphertext is damaged.
    fn decrypt(&self, ciphertext: &[u8], identity: &Self::Identity) -> Result<Zeroizing<String>>;

    /// Backend name for logs.
    fn name(&self) -> &'static str;
}
