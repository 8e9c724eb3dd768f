//! NEM SDK - Transaction building, fee calculation, and serialization.
//!
//! Provides the transaction envelope and variant bodies, the deterministic
//! fee table, exact binary wire serialization of the unsigned envelope,
//! and packaging of a signed transaction into an announce request.

pub mod types;
pub mod transaction;
pub mod fee;
pub mod builder;

pub use transaction::{
    CosignatoryModification, ModificationAction, Mosaic, MosaicAttachment, Transaction,
    TransactionBody, TransactionCommon, TransferMessage,
};
pub use builder::RequestAnnounce;

#[cfg(test)]
mod tests;
