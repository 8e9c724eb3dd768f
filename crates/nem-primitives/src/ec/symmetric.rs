//! Symmetric encryption for transfer messages.
//!
//! AES-256-CBC with PKCS7 padding and a random IV prefixed to the
//! ciphertext. The 32-byte key is an ECDH-derived shared secret; see the
//! message crate for the full salt-prefixed wire format.

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::RngCore;

use crate::PrimitivesError;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// AES key length in bytes.
pub const KEY_LEN: usize = 32;

/// AES block and IV length in bytes.
pub const BLOCK_LEN: usize = 16;

/// A 256-bit symmetric encryption key.
///
/// Provides AES-256-CBC encryption and decryption with PKCS7 padding.
/// The encryption output format is: IV (16 bytes) || ciphertext.
pub struct SymmetricKey {
    key: [u8; KEY_LEN],
}

impl SymmetricKey {
    /// Create a SymmetricKey from exactly 32 key bytes.
    ///
    /// # Arguments
    /// * `key` - The key bytes.
    ///
    /// # Returns
    /// `Ok(SymmetricKey)`, or `PrimitivesError::InvalidKeyLength` for any
    /// other length. Unlike some SDKs there is no silent padding here; a
    /// wrong-length key is always a caller bug.
    pub fn new(key: &[u8]) -> Result<Self, PrimitivesError> {
        if key.len() != KEY_LEN {
            return Err(PrimitivesError::InvalidKeyLength {
                expected: KEY_LEN,
                got: key.len(),
            });
        }
        let mut fixed = [0u8; KEY_LEN];
        fixed.copy_from_slice(key);
        Ok(SymmetricKey { key: fixed })
    }

    /// Encrypt a plaintext message.
    ///
    /// A fresh random IV is generated per call and prefixed to the
    /// ciphertext.
    ///
    /// # Arguments
    /// * `plaintext` - The data to encrypt. May be empty; PKCS7 always
    ///   emits at least one full block.
    ///
    /// # Returns
    /// `Ok(Vec<u8>)` containing IV || ciphertext.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, PrimitivesError> {
        let mut iv = [0u8; BLOCK_LEN];
        rand::rngs::OsRng.fill_bytes(&mut iv);
        self.encrypt_with_iv(plaintext, &iv)
    }

    fn encrypt_with_iv(
        &self,
        plaintext: &[u8],
        iv: &[u8; BLOCK_LEN],
    ) -> Result<Vec<u8>, PrimitivesError> {
        let ciphertext = Aes256CbcEnc::new(&self.key.into(), iv.into())
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext);

        let mut result = Vec::with_capacity(BLOCK_LEN + ciphertext.len());
        result.extend_from_slice(iv);
        result.extend_from_slice(&ciphertext);
        Ok(result)
    }

    /// Decrypt a message produced by [`encrypt`](Self::encrypt).
    ///
    /// Expected input format: IV (16 bytes) || ciphertext, where the
    /// ciphertext is a whole number of blocks.
    ///
    /// # Arguments
    /// * `message` - The encrypted data.
    ///
    /// # Returns
    /// `Ok(Vec<u8>)` with the plaintext, or a `DecryptionError` on
    /// truncated input or corrupt padding. No partial plaintext is ever
    /// returned.
    pub fn decrypt(&self, message: &[u8]) -> Result<Vec<u8>, PrimitivesError> {
        if message.len() < BLOCK_LEN * 2 {
            return Err(PrimitivesError::DecryptionError(
                "message is too short to hold an IV and one block".to_string(),
            ));
        }
        let iv = &message[..BLOCK_LEN];
        let ciphertext = &message[BLOCK_LEN..];
        if ciphertext.len() % BLOCK_LEN != 0 {
            return Err(PrimitivesError::DecryptionError(
                "ciphertext is not a whole number of blocks".to_string(),
            ));
        }

        Aes256CbcDec::new(&self.key.into(), iv.into())
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|_| PrimitivesError::DecryptionError("invalid padding".to_string()))
    }
}
