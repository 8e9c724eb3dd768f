#![deny(missing_docs)]

//! # nem-client
//!
//! Async HTTP client for the NEM NIS API: account and mosaic queries,
//! mosaic definition lookup, and transaction announcement.
//!
//! # Example
//!
//! ```no_run
//! use nem_client::{NemApiClient, NemClientConfig};
//!
//! # async fn example() -> Result<(), nem_client::ClientError> {
//! let client = NemApiClient::with_host("http://104.128.226.60:7890");
//!
//! let account = client
//!     .account_get("NCCRHLLID4JQNVQHXCANFIGAYWFNS65FRSIPS2O6")
//!     .await?;
//! println!("balance: {}", account.account.balance);
//!
//! let owned = client
//!     .account_mosaic_owned("NCCRHLLID4JQNVQHXCANFIGAYWFNS65FRSIPS2O6")
//!     .await?;
//! println!("mosaics: {}", owned.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod nodes;
pub mod types;


pub use client::NemApiClient;
pub use error::ClientError;
pub use types::{
    AccountInfo, AccountMetaData, AccountMetaDataPair, GeneralTransaction, MosaicDefinition,
    MosaicDefinitionMetaDataPair, MosaicDefinitionPage, MosaicId, NemAnnounceResult,
    NemClientConfig, NodeInfo, OwnedMosaic, TransactionMetaDataPair,
};
