//! Elliptic curve operations: ed25519-sha3 key pairs, detached signatures,
//! ECDH shared secrets, and symmetric encryption.

pub mod keypair;
pub mod symmetric;

pub use keypair::{KeyPair, Signature, PUBLIC_KEY_LEN, SEED_LEN, SIGNATURE_LEN};
pub use symmetric::SymmetricKey;
