//! Typed subscription client over the NIS WebSocket endpoint.
//!
//! Each method registers one subscription on the shared channel and
//! decodes frame bodies into the matching model. Decode failures reach
//! only the affected subscriber; the channel stays up.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;

use nem_client::types::{
    AccountMetaDataPair, Block, GeneralTransaction, MosaicDefinition, Namespace, OwnedMosaic,
    TransactionHash, TransactionMetaData, TransactionMetaDataPair,
};

use crate::channel::{FrameListener, Subscription, SubscriptionChannel};
use crate::error::WebSocketError;
use crate::stomp::StompFrame;
use crate::transport::DuplexTransport;

/// Callback receiving decoded subscription results.
pub type SubscriptionCallback<T> = Arc<dyn Fn(Result<T, WebSocketError>) + Send + Sync>;

/// Height of a newly confirmed block.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockHeight {
    /// The block height.
    #[serde(default)]
    pub height: u64,
}

// The unconfirmed channel serves meta without a valid height; decode it
// loosely and pin the height to zero.
#[derive(Deserialize)]
struct UnconfirmedMeta {
    #[serde(default)]
    id: i64,
    #[serde(default)]
    hash: TransactionHash,
}

#[derive(Deserialize)]
struct UnconfirmedPair {
    meta: UnconfirmedMeta,
    transaction: GeneralTransaction,
}

// The owned-definition channel nests the definition one level down.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MosaicDefinitionWrapper {
    mosaic_definition: MosaicDefinition,
}

#[derive(Deserialize)]
struct TransactionMetaDataPairArray {
    #[serde(default)]
    data: Vec<TransactionMetaDataPair>,
}

/// Subscription client for a NIS node's WebSocket endpoint.
pub struct NemWebSocketClient {
    channel: Arc<SubscriptionChannel>,
}

impl NemWebSocketClient {
    /// Create a client for the given NIS host URL.
    ///
    /// # Arguments
    /// * `host_url` - Base URL of the node's WebSocket port (conventionally
    ///   7778, e.g. `http://104.128.226.60:7778`).
    /// * `transport` - Duplex transport used to open connections.
    pub fn new(host_url: &str, transport: Arc<dyn DuplexTransport>) -> Self {
        NemWebSocketClient {
            channel: Arc::new(SubscriptionChannel::new(transport, host_url)),
        }
    }

    /// The underlying channel.
    pub fn channel(&self) -> &Arc<SubscriptionChannel> {
        &self.channel
    }

    /// Subscribe to account state changes for an address.
    ///
    /// The current state is pushed once right after subscribing, then on
    /// every change.
    pub fn account_get(
        &self,
        address: &str,
        callback: SubscriptionCallback<AccountMetaDataPair>,
    ) -> Result<Subscription, WebSocketError> {
        self.subscribe_decoded(
            &format!("/account/{address}"),
            Some(account_trigger("/w/api/account/get", address)),
            decode_json,
            callback,
        )
    }

    /// Subscribe to the recent confirmed transactions of an address. The
    /// current list is pushed once right after subscribing.
    pub fn recent_transactions(
        &self,
        address: &str,
        callback: SubscriptionCallback<Vec<TransactionMetaDataPair>>,
    ) -> Result<Subscription, WebSocketError> {
        self.subscribe_decoded(
            &format!("/recenttransactions/{address}"),
            Some(account_trigger("/w/api/account/transfers/all", address)),
            |body| decode_json::<TransactionMetaDataPairArray>(body).map(|array| array.data),
            callback,
        )
    }

    /// Subscribe to transactions of an address as they confirm.
    pub fn transactions(
        &self,
        address: &str,
        callback: SubscriptionCallback<TransactionMetaDataPair>,
    ) -> Result<Subscription, WebSocketError> {
        self.subscribe_decoded(
            &format!("/transactions/{address}"),
            None,
            decode_json,
            callback,
        )
    }

    /// Subscribe to unconfirmed transactions involving an address.
    pub fn unconfirmed_transactions(
        &self,
        address: &str,
        callback: SubscriptionCallback<TransactionMetaDataPair>,
    ) -> Result<Subscription, WebSocketError> {
        self.subscribe_decoded(
            &format!("/unconfirmed/{address}"),
            None,
            |body| {
                decode_json::<UnconfirmedPair>(body).map(|pair| TransactionMetaDataPair {
                    meta: TransactionMetaData {
                        height: 0,
                        id: pair.meta.id,
                        hash: pair.meta.hash,
                    },
                    transaction: pair.transaction,
                })
            },
            callback,
        )
    }

    /// Subscribe to the mosaic definitions owned by an address. The
    /// current definitions are pushed one per frame right after
    /// subscribing, then on every change.
    pub fn account_mosaic_owned_definition(
        &self,
        address: &str,
        callback: SubscriptionCallback<MosaicDefinition>,
    ) -> Result<Subscription, WebSocketError> {
        self.subscribe_decoded(
            &format!("/account/mosaic/owned/definition/{address}"),
            Some(account_trigger(
                "/w/api/account/mosaic/owned/definition",
                address,
            )),
            |body| {
                decode_json::<MosaicDefinitionWrapper>(body)
                    .map(|wrapper| wrapper.mosaic_definition)
            },
            callback,
        )
    }

    /// Subscribe to the mosaics owned by an address, one per frame.
    pub fn account_mosaic_owned(
        &self,
        address: &str,
        callback: SubscriptionCallback<OwnedMosaic>,
    ) -> Result<Subscription, WebSocketError> {
        self.subscribe_decoded(
            &format!("/account/mosaic/owned/{address}"),
            Some(account_trigger("/w/api/account/mosaic/owned", address)),
            decode_json,
            callback,
        )
    }

    /// Subscribe to the namespaces owned by an address, one per frame.
    pub fn account_namespace_owned(
        &self,
        address: &str,
        callback: SubscriptionCallback<Namespace>,
    ) -> Result<Subscription, WebSocketError> {
        self.subscribe_decoded(
            &format!("/account/namespace/owned/{address}"),
            Some(account_trigger("/w/api/account/namespace/owned", address)),
            decode_json,
            callback,
        )
    }

    /// Subscribe to newly confirmed blocks with their transactions.
    pub fn blocks(
        &self,
        callback: SubscriptionCallback<Block>,
    ) -> Result<Subscription, WebSocketError> {
        self.subscribe_decoded("/blocks", None, decode_json, callback)
    }

    /// Subscribe to newly confirmed block heights.
    pub fn new_blocks(
        &self,
        callback: SubscriptionCallback<BlockHeight>,
    ) -> Result<Subscription, WebSocketError> {
        self.subscribe_decoded("/blocks/new", None, decode_json, callback)
    }

    fn subscribe_decoded<T, D>(
        &self,
        destination: &str,
        after_subscribe: Option<StompFrame>,
        decode: D,
        callback: SubscriptionCallback<T>,
    ) -> Result<Subscription, WebSocketError>
    where
        T: 'static,
        D: Fn(&str) -> Result<T, WebSocketError> + Send + Sync + 'static,
    {
        let listener: FrameListener = Arc::new(move |result| match result {
            Ok(frame) => callback(decode(&frame.body)),
            Err(e) => callback(Err(e)),
        });
        self.channel.subscribe(destination, after_subscribe, listener)
    }
}

// NIS expects the trigger body in this single-quoted pseudo-JSON form.
fn account_trigger(destination: &str, address: &str) -> StompFrame {
    StompFrame::send(destination, &format!("{{'account':'{address}'}}"))
}

fn decode_json<T: DeserializeOwned>(body: &str) -> Result<T, WebSocketError> {
    serde_json::from_str(body)
        .map_err(|e| WebSocketError::Parse(format!("failed to parse response: {e}")))
}
