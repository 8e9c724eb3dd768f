//! Transaction envelope, variant bodies, and binary wire serialization.
//!
//! Serialization is defined only over the *unsigned* envelope: the
//! signature is computed over exactly these bytes and is never part of the
//! bytes being signed. All length prefixes are fixed-width little-endian
//! integers.

use nem_primitives::account::NetworkVersion;
use nem_primitives::convert::{u32_le, u64_le};
use nem_primitives::ec::PUBLIC_KEY_LEN;

use crate::types::{ImportanceMode, MessageKind, TransactionType};

/// Fields shared by every transaction kind.
///
/// # Wire format (unsigned envelope header)
///
/// | Field          | Size                  |
/// |----------------|-----------------------|
/// | type           | 4 bytes (LE)          |
/// | version        | 4 bytes (LE)          |
/// | timestamp      | 4 bytes (LE)          |
/// | pubkey length  | 4 bytes (LE), always 32 |
/// | signer pubkey  | 32 bytes              |
/// | fee            | 8 bytes (LE)          |
/// | deadline       | 4 bytes (LE)          |
///
/// The version field packs the network byte into the high byte:
/// `network << 24 | version_offset`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionCommon {
    /// Transaction kind.
    pub kind: TransactionType,
    /// Network the transaction is valid on.
    pub network: NetworkVersion,
    /// Seconds since the nemesis instant.
    pub timestamp: u32,
    /// Fee in the network's smallest currency unit (micro XEM).
    pub fee: u64,
    /// Expiry, seconds since the nemesis instant.
    pub deadline: u32,
    /// Public key of the signing account.
    pub signer_public_key: [u8; PUBLIC_KEY_LEN],
}

impl TransactionCommon {
    /// The packed version field.
    pub fn version(&self) -> u32 {
        (self.network.value() as u32) << 24 | self.kind.version_offset()
    }

    fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&u32_le(self.kind.code()));
        out.extend_from_slice(&u32_le(self.version()));
        out.extend_from_slice(&u32_le(self.timestamp));
        out.extend_from_slice(&u32_le(PUBLIC_KEY_LEN as u32));
        out.extend_from_slice(&self.signer_public_key);
        out.extend_from_slice(&u64_le(self.fee));
        out.extend_from_slice(&u32_le(self.deadline));
    }
}

/// A message attached to a transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferMessage {
    /// Plain or encrypted.
    pub kind: MessageKind,
    /// Raw payload bytes: UTF-8 for plain messages, the cipher wire
    /// format for encrypted ones.
    pub payload: Vec<u8>,
}

impl TransferMessage {
    /// A plain-text message from a string.
    pub fn plain(text: &str) -> Self {
        TransferMessage {
            kind: MessageKind::Plain,
            payload: text.as_bytes().to_vec(),
        }
    }

    /// An encrypted message from cipher output bytes.
    pub fn encrypted(payload: Vec<u8>) -> Self {
        TransferMessage {
            kind: MessageKind::Encrypted,
            payload,
        }
    }
}

/// A mosaic reference carried on the wire: namespace, name, and quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mosaic {
    /// Namespace the mosaic is defined under.
    pub namespace_id: String,
    /// Mosaic name within the namespace.
    pub name: String,
    /// Quantity in the mosaic's smallest unit.
    pub quantity: u64,
}

impl Mosaic {
    /// The fully qualified name, used for the canonical wire ordering.
    pub fn full_name(&self) -> String {
        format!("{}:{}", self.namespace_id, self.name)
    }
}

/// A mosaic attachment with the supply context needed for fee calculation.
///
/// Supply and divisibility are caller-supplied context used purely to
/// compute the fee; the wire form only carries namespace, name, and
/// quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MosaicAttachment {
    /// Namespace the mosaic is defined under.
    pub namespace_id: String,
    /// Mosaic name within the namespace.
    pub name: String,
    /// Quantity to transfer, in the mosaic's smallest unit.
    pub quantity: u64,
    /// Current total supply of the mosaic, in whole units.
    pub supply: u64,
    /// Divisibility (number of decimal places) of the mosaic.
    pub divisibility: u32,
}

impl MosaicAttachment {
    /// The wire-form mosaic reference, dropping the fee context.
    pub fn to_mosaic(&self) -> Mosaic {
        Mosaic {
            namespace_id: self.namespace_id.clone(),
            name: self.name.clone(),
            quantity: self.quantity,
        }
    }
}

/// A single cosignatory change within an aggregate modification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CosignatoryModification {
    /// Whether the cosignatory is added or removed.
    pub action: ModificationAction,
    /// Public key of the affected cosignatory.
    pub cosignatory_public_key: [u8; PUBLIC_KEY_LEN],
}

/// Cosignatory modification action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModificationAction {
    /// Add a cosignatory.
    Add,
    /// Remove a cosignatory.
    Delete,
}

impl ModificationAction {
    /// The raw modification code.
    pub fn code(self) -> u32 {
        match self {
            ModificationAction::Add => 1,
            ModificationAction::Delete => 2,
        }
    }
}

/// Variant-specific transaction payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionBody {
    /// XEM and/or mosaic transfer to a recipient address.
    Transfer {
        /// Recipient address (40-character Base32).
        recipient: String,
        /// Micro XEM amount; fixed at 1_000_000 for mosaic transfers.
        amount: u64,
        /// Optional attached message.
        message: Option<TransferMessage>,
        /// Attached mosaics; empty for a pure XEM transfer.
        mosaics: Vec<Mosaic>,
    },
    /// Importance transfer for delegated harvesting.
    ImportanceTransfer {
        /// Activation or deactivation.
        mode: ImportanceMode,
        /// Public key of the remote (delegated) account.
        remote_public_key: [u8; PUBLIC_KEY_LEN],
    },
    /// Cosignatory set / minimum-cosignatory modification.
    MultisigAggregateModification {
        /// Cosignatory additions and removals.
        modifications: Vec<CosignatoryModification>,
        /// Relative change of the minimum cosignatory count.
        min_cosignatories_delta: i32,
    },
    /// Cosignature of a pending multisig transaction.
    MultisigSignature {
        /// SHA3 hash of the inner transaction being cosigned.
        other_hash: [u8; 32],
        /// Address of the multisig account.
        other_address: String,
    },
    /// Wrapper carrying an inner transaction for a multisig account.
    Multisig {
        /// The wrapped inner transaction.
        inner: Box<Transaction>,
    },
}

impl TransactionBody {
    /// The transaction kind this body belongs to.
    pub fn kind(&self) -> TransactionType {
        match self {
            TransactionBody::Transfer { .. } => TransactionType::Transfer,
            TransactionBody::ImportanceTransfer { .. } => TransactionType::ImportanceTransfer,
            TransactionBody::MultisigAggregateModification { .. } => {
                TransactionType::MultisigAggregateModification
            }
            TransactionBody::MultisigSignature { .. } => TransactionType::MultisigSignature,
            TransactionBody::Multisig { .. } => TransactionType::Multisig,
        }
    }
}

/// A transaction: the common envelope plus a variant body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Envelope fields shared by all kinds.
    pub common: TransactionCommon,
    /// Variant payload.
    pub body: TransactionBody,
}

impl Transaction {
    /// Serialize the unsigned transaction to its exact wire bytes.
    ///
    /// Building the same transaction twice with identical inputs yields
    /// byte-identical output.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(128);
        self.common.write_to(&mut out);
        match &self.body {
            TransactionBody::Transfer {
                recipient,
                amount,
                message,
                mosaics,
            } => {
                out.extend_from_slice(&u32_le(recipient.len() as u32));
                out.extend_from_slice(recipient.as_bytes());
                out.extend_from_slice(&u64_le(*amount));
                write_message_block(&mut out, message.as_ref());
                write_mosaics_block(&mut out, mosaics);
            }
            TransactionBody::ImportanceTransfer {
                mode,
                remote_public_key,
            } => {
                out.extend_from_slice(&u32_le(mode.code()));
                out.extend_from_slice(&u32_le(PUBLIC_KEY_LEN as u32));
                out.extend_from_slice(remote_public_key);
            }
            TransactionBody::MultisigAggregateModification {
                modifications,
                min_cosignatories_delta,
            } => {
                out.extend_from_slice(&u32_le(modifications.len() as u32));
                for modification in modifications {
                    // action + pubkey length prefix + pubkey
                    let struct_len = 4 + 4 + PUBLIC_KEY_LEN as u32;
                    out.extend_from_slice(&u32_le(struct_len));
                    out.extend_from_slice(&u32_le(modification.action.code()));
                    out.extend_from_slice(&u32_le(PUBLIC_KEY_LEN as u32));
                    out.extend_from_slice(&modification.cosignatory_public_key);
                }
                // Minimum-cosignatory block, present in version 2.
                out.extend_from_slice(&u32_le(4));
                out.extend_from_slice(&min_cosignatories_delta.to_le_bytes());
            }
            TransactionBody::MultisigSignature {
                other_hash,
                other_address,
            } => {
                // Hash block nests a length-prefixed hash in an outer
                // length-prefixed struct.
                out.extend_from_slice(&u32_le(4 + other_hash.len() as u32));
                out.extend_from_slice(&u32_le(other_hash.len() as u32));
                out.extend_from_slice(other_hash);
                out.extend_from_slice(&u32_le(other_address.len() as u32));
                out.extend_from_slice(other_address.as_bytes());
            }
            TransactionBody::Multisig { inner } => {
                let inner_bytes = inner.to_bytes();
                out.extend_from_slice(&u32_le(inner_bytes.len() as u32));
                out.extend_from_slice(&inner_bytes);
            }
        }
        out
    }

    /// Hex encoding of [`to_bytes`](Self::to_bytes).
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }
}

fn write_message_block(out: &mut Vec<u8>, message: Option<&TransferMessage>) {
    match message {
        Some(message) if !message.payload.is_empty() => {
            // type + payload length prefix + payload
            let field_len = 4 + 4 + message.payload.len() as u32;
            out.extend_from_slice(&u32_le(field_len));
            out.extend_from_slice(&u32_le(message.kind.code()));
            out.extend_from_slice(&u32_le(message.payload.len() as u32));
            out.extend_from_slice(&message.payload);
        }
        _ => out.extend_from_slice(&u32_le(0)),
    }
}

fn write_mosaics_block(out: &mut Vec<u8>, mosaics: &[Mosaic]) {
    if mosaics.is_empty() {
        out.extend_from_slice(&u32_le(0));
        return;
    }
    // Canonical ordering: ascending by fully qualified name.
    let mut sorted: Vec<&Mosaic> = mosaics.iter().collect();
    sorted.sort_by_key(|m| m.full_name());

    out.extend_from_slice(&u32_le(sorted.len() as u32));
    for mosaic in sorted {
        let id_struct_len = 4 + mosaic.namespace_id.len() as u32 + 4 + mosaic.name.len() as u32;
        let struct_len = 4 + id_struct_len + 8;
        out.extend_from_slice(&u32_le(struct_len));
        out.extend_from_slice(&u32_le(id_struct_len));
        out.extend_from_slice(&u32_le(mosaic.namespace_id.len() as u32));
        out.extend_from_slice(mosaic.namespace_id.as_bytes());
        out.extend_from_slice(&u32_le(mosaic.name.len() as u32));
        out.extend_from_slice(mosaic.name.as_bytes());
        out.extend_from_slice(&u64_le(mosaic.quantity));
    }
}
