#![deny(missing_docs)]

//! NEM SDK - encrypted transfer message payloads.
//!
//! Provides encryption and decryption of transaction message payloads
//! between two accounts using an ECDH-derived shared secret and
//! AES-256-CBC, in the salt-prefixed wire format NIS expects.
//!
//! # Example
//!
//! ```
//! use nem_primitives::account::{Account, NetworkVersion};
//!
//! let sender = Account::random(NetworkVersion::Main);
//! let receiver = Account::random(NetworkVersion::Main);
//!
//! let wire = nem_message::encrypt(&sender, receiver.public_key(), b"hello").unwrap();
//! let plain = nem_message::decrypt(&receiver, sender.public_key(), &wire).unwrap();
//! assert_eq!(plain, b"hello");
//! ```

mod error;
pub mod encrypted;

pub use encrypted::{decrypt, encrypt};
pub use error::MessageError;
