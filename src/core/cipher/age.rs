//! Age encryption backend implementation.
//!
//! Writes the binary age format. Reading accepts both binary and
//! ASCII-armored input.

use std::io::{Read, Write};

use tracing::trace;
use zeroize::Zeroizing;

use super::Cipher;
use crate::core::domain::{Identity, Recipient};
use crate::error::{CipherError, Result};

/// Age-based cryptographic backend
#[derive(Debug, Default, Clone, Copy)]
pub struct Age;

impl Cipher for Age {
    type Recipient = Recipient;
    type Identity = Identity;

    fn name(&self) -> &'static str {
        "age"
    }

    fn encrypt(&self, plaintext: &str, recipients: &[&Recipient]) -> Result<Vec<u8>> {
        trace!(
            recipients = recipients.len(),
            plaintext_len = plaintext.len(),
            "encrypting"
        );

        let encryptor = age::Encryptor::with_recipients(recipients.iter().map(|r| r.as_age()))
            .map_err(|e| CipherError::EncryptionFailed(format!("{}", e)))?;

        let mut encrypted = Vec::new();
        let mut writer = encryptor
            .wrap_output(&mut encrypted)
            .map_err(|e| CipherError::EncryptionFailed(format!("{}", e)))?;

        writer
            .write_all(plaintext.as_bytes())
            .map_err(|e| CipherError::EncryptionFailed(format!("{}", e)))?;
        writer
            .finish()
            .map_err(|e| CipherError::EncryptionFailed(format!("{}", e)))?;

        trace!(ciphertext_len = encrypted.len(), "encrypted");

        Ok(encrypted)
    }

    fn decrypt(&self, ciphertext: &[u8], identity: &Identity) -> Result<Zeroizing<String>> {
        trace!(ciphertext_len = ciphertext.len(), "decrypting");

        let reader = age::armor::ArmoredReader::new(ciphertext);
        let decryptor = age::Decryptor::new(reader)
            .map_err(|e| CipherError::DecryptionFailed(format!("{}", e)))?;

        let mut reader = decryptor
            .decrypt(std::iter::once(identity.as_age()))
            .map_err(|e| CipherError::DecryptionFailed(format!("{}", e)))?;

        let mut decrypted = Zeroizing::new(Vec::new());
        reader
            .read_to_end(&mut decrypted)
            .map_err(|e| CipherError::DecryptionFailed(format!("{}", e)))?;

        trace!(plaintext_len = decrypted.len(), "decrypted");

        let text = std::str::from_utf8(&decrypted)
            .map_err(|e| CipherError::DecryptionFailed(format!("UTF-8 error: {}", e)))?;
        Ok(Zeroizing::new(text.to_string()))
    }
}
