//! Transaction type codes, format versions, and message kinds.

/// The transaction kind, as tagged on the wire and in NIS JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionType {
    /// XEM or mosaic transfer.
    Transfer,
    /// Delegated-harvesting importance transfer.
    ImportanceTransfer,
    /// Multisig cosignatory set / minimum modification.
    MultisigAggregateModification,
    /// Cosignature of a pending multisig transaction.
    MultisigSignature,
    /// Wrapper carrying an inner transaction issued for a multisig account.
    Multisig,
    /// Namespace rental.
    ProvisionNamespace,
    /// Mosaic definition creation.
    MosaicDefinitionCreation,
    /// Mosaic supply change.
    MosaicSupplyChange,
}

impl TransactionType {
    /// The raw type code serialized into the envelope.
    pub fn code(self) -> u32 {
        match self {
            TransactionType::Transfer => 0x0101,
            TransactionType::ImportanceTransfer => 0x0801,
            TransactionType::MultisigAggregateModification => 0x1001,
            TransactionType::MultisigSignature => 0x1002,
            TransactionType::Multisig => 0x1004,
            TransactionType::ProvisionNamespace => 0x2001,
            TransactionType::MosaicDefinitionCreation => 0x4001,
            TransactionType::MosaicSupplyChange => 0x4002,
        }
    }

    /// Per-type structure version, combined with the network byte into the
    /// envelope's version field. Transfers are version 2 (mosaic support);
    /// aggregate modifications are version 2 (minimum-cosignatory field).
    pub fn version_offset(self) -> u32 {
        match self {
            TransactionType::Transfer => 2,
            TransactionType::MultisigAggregateModification => 2,
            _ => 1,
        }
    }

    /// Map a raw NIS type code back to the kind, if known.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0x0101 => Some(TransactionType::Transfer),
            0x0801 => Some(TransactionType::ImportanceTransfer),
            0x1001 => Some(TransactionType::MultisigAggregateModification),
            0x1002 => Some(TransactionType::MultisigSignature),
            0x1004 => Some(TransactionType::Multisig),
            0x2001 => Some(TransactionType::ProvisionNamespace),
            0x4001 => Some(TransactionType::MosaicDefinitionCreation),
            0x4002 => Some(TransactionType::MosaicSupplyChange),
            _ => None,
        }
    }
}

/// Transfer message kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// Plain UTF-8 payload.
    Plain,
    /// Payload encrypted with the message cipher.
    Encrypted,
}

impl MessageKind {
    /// The raw message type code.
    pub fn code(self) -> u32 {
        match self {
            MessageKind::Plain => 1,
            MessageKind::Encrypted => 2,
        }
    }
}

/// Importance transfer direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportanceMode {
    /// Activate delegated harvesting with the remote account.
    Activate,
    /// Deactivate delegated harvesting.
    Deactivate,
}

impl ImportanceMode {
    /// The raw mode code.
    pub fn code(self) -> u32 {
        match self {
            ImportanceMode::Activate => 1,
            ImportanceMode::Deactivate => 2,
        }
    }
}
