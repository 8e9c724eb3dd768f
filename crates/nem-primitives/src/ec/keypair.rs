//! ed25519 key pairs using SHA3-512 as the curve's internal hash.
//!
//! The network's signature scheme is ed25519 with every internal SHA-512
//! invocation replaced by SHA3-512 (key expansion, nonce derivation, and
//! the challenge hash). This substitution is the defining characteristic of
//! the scheme, so the general-purpose ed25519 crates, which hardcode
//! SHA-512, cannot be used; the scheme is assembled here from the Edwards
//! curve arithmetic directly.

use curve25519_dalek::edwards::{CompressedEdwardsY, EdwardsPoint};
use curve25519_dalek::scalar::Scalar;
use rand::RngCore;

use crate::hash::sha3_512;
use crate::PrimitivesError;

/// Private key seed length in bytes.
pub const SEED_LEN: usize = 32;

/// Compressed public key length in bytes.
pub const PUBLIC_KEY_LEN: usize = 32;

/// Detached signature length in bytes (R followed by s).
pub const SIGNATURE_LEN: usize = 64;

/// A detached ed25519-sha3 signature.
pub type Signature = [u8; SIGNATURE_LEN];

/// An ed25519-sha3 key pair derived deterministically from a 32-byte seed.
///
/// Immutable once constructed and safe to share across threads.
#[derive(Clone)]
pub struct KeyPair {
    seed: [u8; SEED_LEN],
    /// Clamped private scalar, first half of SHA3-512(seed).
    scalar: Scalar,
    /// Nonce prefix, second half of SHA3-512(seed).
    prefix: [u8; 32],
    public: [u8; PUBLIC_KEY_LEN],
}

impl KeyPair {
    /// Derive a key pair from a 32-byte private key seed.
    ///
    /// # Arguments
    /// * `seed` - The 32-byte seed.
    ///
    /// # Returns
    /// `Ok(KeyPair)`, or `PrimitivesError::InvalidSeedLength` if the seed
    /// is not exactly 32 bytes.
    pub fn from_seed(seed: &[u8]) -> Result<Self, PrimitivesError> {
        if seed.len() != SEED_LEN {
            return Err(PrimitivesError::InvalidSeedLength {
                expected: SEED_LEN,
                got: seed.len(),
            });
        }
        let mut seed_arr = [0u8; SEED_LEN];
        seed_arr.copy_from_slice(seed);

        let h = sha3_512(&seed_arr);
        let mut scalar_bytes = [0u8; 32];
        scalar_bytes.copy_from_slice(&h[..32]);
        scalar_bytes[0] &= 248;
        scalar_bytes[31] &= 127;
        scalar_bytes[31] |= 64;
        let scalar = Scalar::from_bytes_mod_order(scalar_bytes);

        let mut prefix = [0u8; 32];
        prefix.copy_from_slice(&h[32..]);

        let public = EdwardsPoint::mul_base(&scalar).compress().to_bytes();

        Ok(KeyPair {
            seed: seed_arr,
            scalar,
            prefix,
            public,
        })
    }

    /// Derive a key pair from 32 cryptographically random seed bytes.
    pub fn random() -> Self {
        let mut seed = [0u8; SEED_LEN];
        rand::rngs::OsRng.fill_bytes(&mut seed);
        // 32 random bytes are always a valid seed.
        Self::from_seed(&seed).expect("seed length is fixed")
    }

    /// The private key seed.
    pub fn seed(&self) -> &[u8; SEED_LEN] {
        &self.seed
    }

    /// The compressed public key bytes.
    pub fn public_key(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.public
    }

    /// Create a detached signature over the exact message bytes.
    ///
    /// # Arguments
    /// * `message` - The message to sign.
    ///
    /// # Returns
    /// A 64-byte signature, R (32 bytes) followed by s (32 bytes).
    pub fn sign(&self, message: &[u8]) -> Signature {
        // r = H(prefix || M), R = r * B
        let mut r_input = Vec::with_capacity(32 + message.len());
        r_input.extend_from_slice(&self.prefix);
        r_input.extend_from_slice(message);
        let r = Scalar::from_bytes_mod_order_wide(&sha3_512(&r_input));
        let big_r = EdwardsPoint::mul_base(&r).compress();

        // k = H(R || A || M), s = r + k * a
        let k = Scalar::from_bytes_mod_order_wide(&sha3_512(
            &[big_r.as_bytes().as_slice(), &self.public, message].concat(),
        ));
        let s = r + k * self.scalar;

        let mut signature = [0u8; SIGNATURE_LEN];
        signature[..32].copy_from_slice(big_r.as_bytes());
        signature[32..].copy_from_slice(&s.to_bytes());
        signature
    }

    /// Verify a detached signature over a message.
    ///
    /// Returns `false` for a wrong signature, a malformed signature, or a
    /// message that does not match; verification never fails with an error.
    ///
    /// # Arguments
    /// * `message` - The message bytes.
    /// * `signature` - The 64-byte signature to check.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        verify_with_public_key(&self.public, message, signature)
    }

    /// Compute the raw ECDH point product `a * P` with another party's
    /// public key, compressed to 32 bytes.
    ///
    /// This is the commutative core of the message cipher's shared secret:
    /// `a_alice * A_bob == a_bob * A_alice`.
    ///
    /// # Arguments
    /// * `other_public` - The other party's compressed public key.
    ///
    /// # Returns
    /// `Ok([u8; 32])`, or `PrimitivesError::InvalidPublicKey` if the key
    /// does not decode to a curve point.
    pub fn shared_point(&self, other_public: &[u8]) -> Result<[u8; 32], PrimitivesError> {
        let point = decompress_public_key(other_public)?;
        Ok((point * self.scalar).compress().to_bytes())
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the seed.
        f.debug_struct("KeyPair")
            .field("public", &hex::encode(self.public))
            .finish()
    }
}

/// Verify a detached signature against a compressed public key.
///
/// # Arguments
/// * `public_key` - The signer's 32-byte compressed public key.
/// * `message` - The message bytes.
/// * `signature` - The 64-byte signature.
pub fn verify_with_public_key(public_key: &[u8], message: &[u8], signature: &[u8]) -> bool {
    if public_key.len() != PUBLIC_KEY_LEN || signature.len() != SIGNATURE_LEN {
        return false;
    }
    let mut r_bytes = [0u8; 32];
    r_bytes.copy_from_slice(&signature[..32]);
    let mut s_bytes = [0u8; 32];
    s_bytes.copy_from_slice(&signature[32..]);

    // s must be canonical; reject malleable signatures.
    let s = match Option::<Scalar>::from(Scalar::from_canonical_bytes(s_bytes)) {
        Some(s) => s,
        None => return false,
    };
    let a = match decompress_public_key(public_key) {
        Ok(a) => a,
        Err(_) => return false,
    };

    let k = Scalar::from_bytes_mod_order_wide(&crate::hash::sha3_512(
        &[&signature[..32], public_key, message].concat(),
    ));

    // Check s * B == R + k * A, computed as (-k) * A + s * B == R.
    let expected_r = EdwardsPoint::vartime_double_scalar_mul_basepoint(&-k, &a, &s);
    expected_r.compress().to_bytes() == r_bytes
}

fn decompress_public_key(public_key: &[u8]) -> Result<EdwardsPoint, PrimitivesError> {
    if public_key.len() != PUBLIC_KEY_LEN {
        return Err(PrimitivesError::InvalidKeyLength {
            expected: PUBLIC_KEY_LEN,
            got: public_key.len(),
        });
    }
    let mut bytes = [0u8; PUBLIC_KEY_LEN];
    bytes.copy_from_slice(public_key);
    CompressedEdwardsY(bytes)
        .decompress()
        .ok_or_else(|| PrimitivesError::InvalidPublicKey("point is not on the curve".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivation_is_deterministic() {
        let seed = [7u8; 32];
        let a = KeyPair::from_seed(&seed).unwrap();
        let b = KeyPair::from_seed(&seed).unwrap();
        assert_eq!(a.public_key(), b.public_key());
    }

    // Fixed vector from the network's reference wallet.
    #[test]
    fn public_key_vector() {
        let seed =
            hex::decode("c0786ab5bf1052330122fb862bd6ce4cc2b1aa486030d634fa7efe3ac3b70c2d")
                .unwrap();
        let pair = KeyPair::from_seed(&seed).unwrap();
        assert_eq!(
            hex::encode(pair.public_key()),
            "d033867885270eb9013376d6614939188faa0a8ba1fa538c460fa44f82efc478"
        );
    }

    #[test]
    fn rejects_short_seed() {
        assert!(matches!(
            KeyPair::from_seed(&[0u8; 31]),
            Err(PrimitivesError::InvalidSeedLength { expected: 32, got: 31 })
        ));
    }

    #[test]
    fn sign_verify_round_trip() {
        let pair = KeyPair::random();
        let message = b"an arbitrary payload";
        let signature = pair.sign(message);
        assert!(pair.verify(message, &signature));
    }

    #[test]
    fn verify_rejects_altered_message() {
        let pair = KeyPair::random();
        let signature = pair.sign(b"payload");
        assert!(!pair.verify(b"payloae", &signature));
    }

    #[test]
    fn verify_rejects_altered_signature() {
        let pair = KeyPair::random();
        let message = b"payload";
        let signature = pair.sign(message);
        for i in 0..SIGNATURE_LEN {
            let mut tampered = signature;
            tampered[i] ^= 0x01;
            assert!(!pair.verify(message, &tampered), "byte {} accepted", i);
        }
    }

    #[test]
    fn verify_rejects_wrong_key() {
        let signer = KeyPair::random();
        let other = KeyPair::random();
        let signature = signer.sign(b"payload");
        assert!(!other.verify(b"payload", &signature));
    }

    #[test]
    fn shared_point_is_commutative() {
        let alice = KeyPair::random();
        let bob = KeyPair::random();
        let ab = alice.shared_point(bob.public_key()).unwrap();
        let ba = bob.shared_point(alice.public_key()).unwrap();
        assert_eq!(ab, ba);
    }
}
