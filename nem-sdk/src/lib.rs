#![deny(missing_docs)]

//! NEM SDK - Complete SDK.
//!
//! Re-exports all NEM SDK components for convenient single-crate usage.

pub use nem_client as client;
pub use nem_message as message;
pub use nem_primitives as primitives;
pub use nem_transaction as transaction;
pub use nem_websocket as websocket;
