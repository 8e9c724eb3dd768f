#![deny(missing_docs)]

//! # nem-websocket
//!
//! STOMP subscription channel for the NEM NIS WebSocket endpoint: a
//! frame codec, duplex-transport traits, a reference-counted
//! subscription channel, and a typed client for the node's push APIs.
//!
//! Concrete socket implementations are out of scope; plug any
//! WebSocket library in through [`DuplexTransport`].
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use nem_websocket::{DuplexTransport, NemWebSocketClient};
//!
//! # fn example(transport: Arc<dyn DuplexTransport>) -> Result<(), nem_websocket::WebSocketError> {
//! let client = NemWebSocketClient::new("http://104.128.226.60:7778", transport);
//!
//! let subscription = client.account_get(
//!     "NCCRHLLID4JQNVQHXCANFIGAYWFNS65FRSIPS2O6",
//!     Arc::new(|result| match result {
//!         Ok(pair) => println!("balance: {}", pair.account.balance),
//!         Err(e) => eprintln!("subscription ended: {e}"),
//!     }),
//! )?;
//!
//! // ... later
//! subscription.dispose();
//! # Ok(())
//! # }
//! ```

pub mod channel;
pub mod client;
pub mod error;
pub mod stomp;
pub mod transport;


pub use channel::{FrameListener, Subscription, SubscriptionChannel, HANDSHAKE_PATH};
pub use client::{BlockHeight, NemWebSocketClient, SubscriptionCallback};
pub use error::WebSocketError;
pub use stomp::{StompCommand, StompFrame};
pub use transport::{DuplexConnection, DuplexListener, DuplexTransport};
