//! Transaction construction helpers.
//!
//! Each helper assembles a complete, fee-calculated transaction of one
//! kind; [`create_request_announce`] then signs the serialized unsigned
//! bytes and packages them for the announce endpoint.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use nem_primitives::account::{Account, NetworkVersion};
use nem_primitives::ec::PUBLIC_KEY_LEN;

use crate::fee;
use crate::transaction::{
    CosignatoryModification, Mosaic, MosaicAttachment, Transaction, TransactionBody,
    TransactionCommon, TransferMessage,
};
use crate::types::ImportanceMode;

/// Unix timestamp of the nemesis block, 2015-03-29T00:06:25Z. Transaction
/// timestamps count seconds from this instant.
const NEMESIS_EPOCH_SECS: u64 = 1_427_587_585;

/// Default transaction validity window in seconds.
const DEFAULT_DEADLINE_SECS: u32 = 3600;

/// Optional overrides shared by all builder helpers.
///
/// Any field left `None` is computed: the fee from the fee table, the
/// timestamp from the current time, and the deadline as timestamp + 1 hour.
#[derive(Debug, Clone, Default)]
pub struct TransactionOptions {
    /// Explicit fee in micro XEM.
    pub fee: Option<u64>,
    /// Explicit timestamp, seconds since the nemesis instant.
    pub timestamp: Option<u32>,
    /// Explicit deadline, seconds since the nemesis instant.
    pub deadline: Option<u32>,
}

impl TransactionOptions {
    fn resolve(&self, calculated_fee: u64) -> (u64, u32, u32) {
        let fee = self.fee.unwrap_or(calculated_fee);
        let timestamp = self.timestamp.unwrap_or_else(current_time_from_origin);
        let deadline = self
            .deadline
            .unwrap_or(timestamp + DEFAULT_DEADLINE_SECS);
        (fee, timestamp, deadline)
    }
}

/// A signed transaction packaged for the announce endpoint: hex-encoded
/// serialized bytes plus the hex-encoded detached signature.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RequestAnnounce {
    /// Hex of the serialized unsigned transaction bytes.
    pub data: String,
    /// Hex of the detached signature over those bytes.
    pub signature: String,
}

/// Create an XEM transfer transaction.
///
/// # Arguments
/// * `signer_public_key` - Public key of the sending account.
/// * `recipient` - Recipient address.
/// * `micro_nem` - Amount in micro XEM.
/// * `message` - Optional attached message.
/// * `network` - Network version.
/// * `options` - Fee/timestamp/deadline overrides.
pub fn xem_transfer(
    signer_public_key: [u8; PUBLIC_KEY_LEN],
    recipient: &str,
    micro_nem: u64,
    message: Option<TransferMessage>,
    network: NetworkVersion,
    options: &TransactionOptions,
) -> Transaction {
    let message_payload = message.as_ref().map(|m| m.payload.as_slice()).unwrap_or(&[]);
    let calculated =
        fee::MINIMUM_TRANSFER_FEE.max(fee::xem_transfer_fee(micro_nem) + fee::message_fee(message_payload));

    build(
        signer_public_key,
        network,
        calculated,
        options,
        TransactionBody::Transfer {
            recipient: recipient.to_string(),
            amount: micro_nem,
            message,
            mosaics: Vec::new(),
        },
    )
}

/// Create a mosaic transfer transaction.
///
/// The XEM amount is fixed at 1_000_000 (one whole XEM, the multiplier
/// NIS applies to attached mosaic quantities).
///
/// # Arguments
/// * `signer_public_key` - Public key of the sending account.
/// * `recipient` - Recipient address.
/// * `attachments` - Mosaics to transfer, with fee context.
/// * `message` - Optional attached message.
/// * `network` - Network version.
/// * `options` - Fee/timestamp/deadline overrides.
pub fn mosaic_transfer(
    signer_public_key: [u8; PUBLIC_KEY_LEN],
    recipient: &str,
    attachments: &[MosaicAttachment],
    message: Option<TransferMessage>,
    network: NetworkVersion,
    options: &TransactionOptions,
) -> Transaction {
    let message_payload = message.as_ref().map(|m| m.payload.as_slice()).unwrap_or(&[]);
    let calculated = if attachments.is_empty() {
        fee::MINIMUM_TRANSFER_FEE.max(fee::xem_transfer_fee(0) + fee::message_fee(message_payload))
    } else {
        let mosaic_total: u64 = attachments
            .iter()
            .map(|a| fee::mosaic_transfer_fee(a.quantity, a.supply, a.divisibility))
            .sum();
        fee::MINIMUM_TRANSFER_FEE.max(mosaic_total + fee::message_fee(message_payload))
    };

    let mosaics: Vec<Mosaic> = attachments.iter().map(MosaicAttachment::to_mosaic).collect();

    build(
        signer_public_key,
        network,
        calculated,
        options,
        TransactionBody::Transfer {
            recipient: recipient.to_string(),
            amount: 1_000_000,
            message,
            mosaics,
        },
    )
}

/// Create an importance transfer transaction.
pub fn importance_transfer(
    signer_public_key: [u8; PUBLIC_KEY_LEN],
    mode: ImportanceMode,
    remote_public_key: [u8; PUBLIC_KEY_LEN],
    network: NetworkVersion,
    options: &TransactionOptions,
) -> Transaction {
    build(
        signer_public_key,
        network,
        fee::IMPORTANCE_TRANSFER_FEE,
        options,
        TransactionBody::ImportanceTransfer {
            mode,
            remote_public_key,
        },
    )
}

/// Create a multisig aggregate modification transaction.
///
/// # Arguments
/// * `signer_public_key` - Public key of the (multisig) account being
///   modified.
/// * `modifications` - Cosignatory additions and removals.
/// * `min_cosignatories_delta` - Relative change of the minimum
///   cosignatory count.
/// * `network` - Network version.
/// * `options` - Fee/timestamp/deadline overrides.
pub fn multisig_aggregate_modification(
    signer_public_key: [u8; PUBLIC_KEY_LEN],
    modifications: Vec<CosignatoryModification>,
    min_cosignatories_delta: i32,
    network: NetworkVersion,
    options: &TransactionOptions,
) -> Transaction {
    build(
        signer_public_key,
        network,
        fee::AGGREGATE_MODIFICATION_FEE,
        options,
        TransactionBody::MultisigAggregateModification {
            modifications,
            min_cosignatories_delta,
        },
    )
}

/// Wrap an inner transaction in a multisig transaction issued by a
/// cosignatory.
pub fn multisig(
    signer_public_key: [u8; PUBLIC_KEY_LEN],
    inner: Transaction,
    network: NetworkVersion,
    options: &TransactionOptions,
) -> Transaction {
    build(
        signer_public_key,
        network,
        fee::MULTISIG_WRAPPER_FEE,
        options,
        TransactionBody::Multisig {
            inner: Box::new(inner),
        },
    )
}

/// Create a cosignature for a pending multisig transaction.
///
/// # Arguments
/// * `signer_public_key` - Public key of the cosigning account.
/// * `other_hash` - Hash of the inner transaction being cosigned.
/// * `other_address` - Address of the multisig account.
/// * `network` - Network version.
/// * `options` - Fee/timestamp/deadline overrides.
pub fn multisig_signature(
    signer_public_key: [u8; PUBLIC_KEY_LEN],
    other_hash: [u8; 32],
    other_address: &str,
    network: NetworkVersion,
    options: &TransactionOptions,
) -> Transaction {
    build(
        signer_public_key,
        network,
        fee::MULTISIG_SIGNATURE_FEE,
        options,
        TransactionBody::MultisigSignature {
            other_hash,
            other_address: other_address.to_string(),
        },
    )
}

/// Sign a transaction and package it as an announce request.
///
/// The signature is computed over the exact unsigned wire bytes; both the
/// bytes and the signature are hex-encoded for transport.
pub fn create_request_announce(sender: &Account, transaction: &Transaction) -> RequestAnnounce {
    let bytes = transaction.to_bytes();
    let signature = sender.sign(&bytes);
    RequestAnnounce {
        data: hex::encode(&bytes),
        signature: hex::encode(signature),
    }
}

/// Seconds elapsed since the creation of the nemesis block.
pub fn current_time_from_origin() -> u32 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before the unix epoch")
        .as_secs();
    (now - NEMESIS_EPOCH_SECS) as u32
}

fn build(
    signer_public_key: [u8; PUBLIC_KEY_LEN],
    network: NetworkVersion,
    calculated_fee: u64,
    options: &TransactionOptions,
    body: TransactionBody,
) -> Transaction {
    let (fee, timestamp, deadline) = options.resolve(calculated_fee);
    Transaction {
        common: TransactionCommon {
            kind: body.kind(),
            network,
            timestamp,
            fee,
            deadline,
            signer_public_key,
        },
        body,
    }
}
