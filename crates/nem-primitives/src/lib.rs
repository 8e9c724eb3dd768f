//! NEM SDK - Cryptographic primitives, hashing, and byte codecs.
//!
//! This crate provides the foundational building blocks for the NEM SDK:
//! - Hash functions (SHA3-256, SHA3-512, RIPEMD-160)
//! - Byte codecs (hex, little-endian integers, padless Base32, reversal)
//! - ed25519 key pairs using SHA3-512 as the curve's internal hash
//! - Detached signing and verification
//! - AES-256-CBC symmetric encryption with PKCS7 padding
//! - Account and checksum address derivation

pub mod hash;
pub mod convert;
pub mod ec;
pub mod account;

mod error;
pub use error::PrimitivesError;
pub use account::Account;
pub use ec::keypair::KeyPair;
