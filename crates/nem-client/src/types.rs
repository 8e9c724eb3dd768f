//! NIS response models: accounts, mosaics, announce results, and the
//! flat transaction record with typed accessor views.
//!
//! NIS serves camelCase JSON; every model renames accordingly and
//! defaults missing fields so partial responses still decode.

use serde::{Deserialize, Serialize};

use nem_transaction::types::TransactionType;

/// Configuration for a [`NemApiClient`](crate::NemApiClient).
#[derive(Debug, Clone)]
pub struct NemClientConfig {
    /// Base URL of the NIS node (e.g. `http://62.75.171.41:7890`).
    pub host_url: String,
}

impl Default for NemClientConfig {
    fn default() -> Self {
        Self {
            host_url: "http://127.0.0.1:7890".to_string(),
        }
    }
}

/// A NIS node address.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NodeInfo {
    /// Host name or IP address.
    pub host: String,
    /// NIS API port, conventionally 7890.
    pub port: u16,
}

impl NodeInfo {
    /// The node's base URL for API requests.
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

/// Account state paired with its node-side metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountMetaDataPair {
    /// Node-side metadata (harvesting status, cosignatory relations).
    pub meta: AccountMetaData,
    /// The account state itself.
    pub account: AccountInfo,
}

/// Core account state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    /// Account address.
    #[serde(default)]
    pub address: String,
    /// Balance in micro XEM.
    #[serde(default)]
    pub balance: u64,
    /// Vested part of the balance in micro XEM.
    #[serde(default)]
    pub vested_balance: u64,
    /// Importance score used for harvesting eligibility.
    #[serde(default)]
    pub importance: f64,
    /// Hex public key, absent until the account has signed something.
    #[serde(default)]
    pub public_key: Option<String>,
    /// Optional account label.
    #[serde(default)]
    pub label: Option<String>,
    /// Number of blocks the account has harvested.
    #[serde(default)]
    pub harvested_blocks: u32,
    /// Multisig relation counts, if the account is multisig.
    #[serde(default)]
    pub multisig_info: MultisigInfo,
}

/// Multisig relation counts of an account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultisigInfo {
    /// Number of cosignatories of this account.
    #[serde(default)]
    pub cosignatories_count: Option<u32>,
    /// Minimum cosignatories required to sign.
    #[serde(default)]
    pub min_cosignatories: Option<u32>,
}

/// Node-side account metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountMetaData {
    /// Harvesting status (`LOCKED`, `UNLOCKED`, ...).
    #[serde(default)]
    pub status: String,
    /// Remote (delegated) harvesting status.
    #[serde(default)]
    pub remote_status: String,
    /// Accounts this account cosigns for.
    #[serde(default)]
    pub cosignatory_of: Vec<AccountInfo>,
    /// Cosignatories of this account.
    #[serde(default)]
    pub cosignatories: Vec<AccountInfo>,
}

/// A mosaic identifier: namespace plus name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MosaicId {
    /// Namespace the mosaic is defined under.
    #[serde(default)]
    pub namespace_id: String,
    /// Mosaic name within the namespace.
    #[serde(default)]
    pub name: String,
}

/// An owned or transferred mosaic quantity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedMosaic {
    /// The mosaic identifier.
    pub mosaic_id: MosaicId,
    /// Quantity in the mosaic's smallest unit.
    #[serde(default)]
    pub quantity: u64,
}

/// Wrapper NIS uses for mosaic arrays.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct MosaicArray {
    #[serde(default)]
    pub data: Vec<OwnedMosaic>,
}

/// A name/value mosaic property.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MosaicProperty {
    /// Property name (`divisibility`, `initialSupply`, ...).
    #[serde(default)]
    pub name: String,
    /// Property value, always a string on the wire.
    #[serde(default)]
    pub value: String,
}

/// A mosaic definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MosaicDefinition {
    /// Hex public key of the creator.
    #[serde(default)]
    pub creator: String,
    /// The mosaic identifier.
    pub id: MosaicId,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Definition properties as name/value pairs.
    #[serde(default)]
    pub properties: Vec<MosaicProperty>,
}

impl MosaicDefinition {
    fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }

    /// The `divisibility` property, if present and numeric.
    pub fn divisibility(&self) -> Option<u32> {
        self.property("divisibility")?.parse().ok()
    }

    /// The `initialSupply` property, if present and numeric.
    pub fn initial_supply(&self) -> Option<u64> {
        self.property("initialSupply")?.parse().ok()
    }

    /// The `supplyMutable` property, if present.
    pub fn supply_mutable(&self) -> Option<bool> {
        self.property("supplyMutable")?.parse().ok()
    }

    /// The `transferable` property, if present.
    pub fn transferable(&self) -> Option<bool> {
        self.property("transferable")?.parse().ok()
    }
}

/// A mosaic definition paired with its database id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MosaicDefinitionMetaDataPair {
    /// Database metadata, used as the paging cursor.
    pub meta: MosaicDefinitionMetaData,
    /// The definition itself.
    pub mosaic: MosaicDefinition,
}

/// Database metadata of a mosaic definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MosaicDefinitionMetaData {
    /// Topmost database id, passed back as the `id` paging parameter.
    #[serde(default)]
    pub id: i64,
}

/// One page of mosaic definitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MosaicDefinitionPage {
    /// Definitions on this page, newest first.
    #[serde(default)]
    pub data: Vec<MosaicDefinitionMetaDataPair>,
}

/// A provisioned namespace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Namespace {
    /// Fully qualified namespace name.
    #[serde(default)]
    pub fqn: String,
    /// Address of the owning account.
    #[serde(default)]
    pub owner: String,
    /// Height at which the ownership began.
    #[serde(default)]
    pub height: u64,
}

/// A transaction hash wrapper as NIS serializes it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransactionHash {
    /// Hex hash bytes; empty when the hash is not applicable.
    #[serde(default)]
    pub data: String,
}

/// Result of announcing a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NemAnnounceResult {
    /// Result type (1 = validation result).
    #[serde(default, rename = "type")]
    pub result_type: i32,
    /// Result code; 1 means the transaction was accepted.
    #[serde(default)]
    pub code: i32,
    /// Human-readable result message.
    #[serde(default)]
    pub message: String,
    /// Hash of the announced transaction.
    #[serde(default)]
    pub transaction_hash: TransactionHash,
    /// Hash of the inner transaction for multisig announcements.
    #[serde(default)]
    pub inner_transaction_hash: TransactionHash,
}

/// A transaction's database metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionMetaData {
    /// Height of the containing block.
    #[serde(default)]
    pub height: u64,
    /// Database id.
    #[serde(default)]
    pub id: i64,
    /// Transaction hash.
    #[serde(default)]
    pub hash: TransactionHash,
}

/// A confirmed transaction paired with its metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionMetaDataPair {
    /// Database metadata.
    pub meta: TransactionMetaData,
    /// The transaction record.
    pub transaction: GeneralTransaction,
}

/// A block with its transactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Seconds since the nemesis instant at harvest time.
    #[serde(default)]
    pub time_stamp: u32,
    /// Hex signature of the block.
    #[serde(default)]
    pub signature: String,
    /// Hash of the previous block.
    #[serde(default)]
    pub prev_block_hash: TransactionHash,
    /// Block type: -1 for the nemesis block, 1 for regular blocks.
    #[serde(default, rename = "type")]
    pub block_type: i32,
    /// Transactions contained in the block.
    #[serde(default)]
    pub transactions: Vec<GeneralTransaction>,
    /// Block version.
    #[serde(default)]
    pub version: i32,
    /// Hex public key of the harvester.
    #[serde(default)]
    pub signer: String,
    /// Block height.
    #[serde(default)]
    pub height: u64,
}

/// A transfer message as NIS serializes it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDto {
    /// Hex payload bytes.
    #[serde(default)]
    pub payload: String,
    /// Message type: 1 plain, 2 encrypted.
    #[serde(default, rename = "type")]
    pub message_type: i32,
}

/// One cosignatory modification as NIS serializes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CosignatoryModificationDto {
    /// 1 to add, 2 to delete.
    #[serde(default)]
    pub modification_type: i32,
    /// Hex public key of the affected cosignatory.
    #[serde(default)]
    pub cosignatory_account: String,
}

/// Relative minimum-cosignatory change as NIS serializes it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinimumCosignatories {
    /// Relative change of the minimum cosignatory count.
    #[serde(default)]
    pub relative_change: i32,
}

/// A transaction as NIS serves it: one flat record whose populated
/// fields depend on the `type` code.
///
/// The `as_*` accessors give a typed view for each kind, returning
/// `None` when the type code does not match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralTransaction {
    /// Seconds since the nemesis instant.
    #[serde(default)]
    pub time_stamp: u32,
    /// Hex detached signature; absent on inner multisig transactions.
    #[serde(default)]
    pub signature: Option<String>,
    /// Fee in micro XEM.
    #[serde(default)]
    pub fee: u64,
    /// Raw transaction type code.
    #[serde(default, rename = "type")]
    pub transaction_type: u32,
    /// Expiry, seconds since the nemesis instant.
    #[serde(default)]
    pub deadline: u32,
    /// Packed version field (network byte in the high byte).
    #[serde(default)]
    pub version: u32,
    /// Hex public key of the signer.
    #[serde(default)]
    pub signer: String,

    // Transfer fields.
    /// Micro XEM amount.
    #[serde(default)]
    pub amount: Option<u64>,
    /// Recipient address.
    #[serde(default)]
    pub recipient: Option<String>,
    /// Attached mosaics.
    #[serde(default)]
    pub mosaics: Option<Vec<OwnedMosaic>>,
    /// Attached message.
    #[serde(default)]
    pub message: Option<MessageDto>,

    // Importance transfer fields.
    /// 1 activate, 2 deactivate.
    #[serde(default)]
    pub mode: Option<i32>,
    /// Hex public key of the remote account.
    #[serde(default)]
    pub remote_account: Option<String>,

    // Multisig aggregate modification fields.
    /// Cosignatory additions and removals.
    #[serde(default)]
    pub modifications: Option<Vec<CosignatoryModificationDto>>,
    /// Relative minimum-cosignatory change.
    #[serde(default)]
    pub min_cosignatories: Option<MinimumCosignatories>,

    // Multisig signature fields.
    /// Hash of the cosigned inner transaction.
    #[serde(default)]
    pub other_hash: Option<TransactionHash>,
    /// Address of the multisig account.
    #[serde(default)]
    pub other_account: Option<String>,

    // Multisig wrapper fields.
    /// The wrapped inner transaction.
    #[serde(default)]
    pub other_trans: Option<Box<GeneralTransaction>>,
    /// Cosignatures attached to the wrapper.
    #[serde(default)]
    pub signatures: Option<Vec<GeneralTransaction>>,

    // Provision namespace fields.
    /// Rental fee in micro XEM.
    #[serde(default)]
    pub rental_fee: Option<u64>,
    /// Address of the rental fee sink.
    #[serde(default)]
    pub rental_fee_sink: Option<String>,
    /// New namespace part being provisioned.
    #[serde(default)]
    pub new_part: Option<String>,
    /// Parent namespace, absent for root namespaces.
    #[serde(default)]
    pub parent: Option<String>,

    // Mosaic definition creation fields.
    /// Creation fee in micro XEM.
    #[serde(default)]
    pub creation_fee: Option<u64>,
    /// Address of the creation fee sink.
    #[serde(default)]
    pub creation_fee_sink: Option<String>,
    /// The created definition.
    #[serde(default)]
    pub mosaic_definition: Option<MosaicDefinition>,

    // Mosaic supply change fields.
    /// 1 increase, 2 decrease.
    #[serde(default)]
    pub supply_type: Option<i32>,
    /// Supply delta in the mosaic's smallest unit.
    #[serde(default)]
    pub delta: Option<u64>,
    /// The affected mosaic.
    #[serde(default)]
    pub mosaic_id: Option<MosaicId>,
}

/// Typed view of a transfer transaction.
#[derive(Debug, Clone)]
pub struct TransferView {
    /// Micro XEM amount.
    pub amount: u64,
    /// Recipient address.
    pub recipient: String,
    /// Attached mosaics.
    pub mosaics: Vec<OwnedMosaic>,
    /// Attached message, if any.
    pub message: Option<MessageDto>,
}

/// Typed view of an importance transfer.
#[derive(Debug, Clone)]
pub struct ImportanceTransferView {
    /// 1 activate, 2 deactivate.
    pub mode: i32,
    /// Hex public key of the remote account.
    pub remote_account: String,
}

/// Typed view of a multisig aggregate modification.
#[derive(Debug, Clone)]
pub struct AggregateModificationView {
    /// Cosignatory additions and removals.
    pub modifications: Vec<CosignatoryModificationDto>,
    /// Relative minimum-cosignatory change.
    pub min_cosignatories: MinimumCosignatories,
}

/// Typed view of a multisig cosignature.
#[derive(Debug, Clone)]
pub struct MultisigSignatureView {
    /// Hash of the cosigned inner transaction.
    pub other_hash: TransactionHash,
    /// Address of the multisig account.
    pub other_account: String,
}

/// Typed view of a multisig wrapper.
#[derive(Debug, Clone)]
pub struct MultisigView {
    /// The wrapped inner transaction.
    pub other_trans: GeneralTransaction,
    /// Cosignatures attached to the wrapper.
    pub signatures: Vec<GeneralTransaction>,
}

/// Typed view of a namespace provision.
#[derive(Debug, Clone)]
pub struct ProvisionNamespaceView {
    /// Rental fee in micro XEM.
    pub rental_fee: u64,
    /// Address of the rental fee sink.
    pub rental_fee_sink: String,
    /// New namespace part.
    pub new_part: String,
    /// Parent namespace, if any.
    pub parent: Option<String>,
}

/// Typed view of a mosaic definition creation.
#[derive(Debug, Clone)]
pub struct MosaicDefinitionCreationView {
    /// Creation fee in micro XEM.
    pub creation_fee: u64,
    /// Address of the creation fee sink.
    pub creation_fee_sink: String,
    /// The created definition.
    pub mosaic_definition: MosaicDefinition,
}

/// Typed view of a mosaic supply change.
#[derive(Debug, Clone)]
pub struct MosaicSupplyChangeView {
    /// 1 increase, 2 decrease.
    pub supply_type: i32,
    /// Supply delta in the mosaic's smallest unit.
    pub delta: u64,
    /// The affected mosaic.
    pub mosaic_id: MosaicId,
}

impl GeneralTransaction {
    fn is(&self, kind: TransactionType) -> bool {
        self.transaction_type == kind.code()
    }

    /// The decoded transaction kind, if the type code is known.
    pub fn kind(&self) -> Option<TransactionType> {
        TransactionType::from_code(self.transaction_type)
    }

    /// View as a transfer, if the type matches.
    pub fn as_transfer(&self) -> Option<TransferView> {
        self.is(TransactionType::Transfer).then(|| TransferView {
            amount: self.amount.unwrap_or(0),
            recipient: self.recipient.clone().unwrap_or_default(),
            mosaics: self.mosaics.clone().unwrap_or_default(),
            message: self.message.clone(),
        })
    }

    /// View as an importance transfer, if the type matches.
    pub fn as_importance_transfer(&self) -> Option<ImportanceTransferView> {
        self.is(TransactionType::ImportanceTransfer)
            .then(|| ImportanceTransferView {
                mode: self.mode.unwrap_or(0),
                remote_account: self.remote_account.clone().unwrap_or_default(),
            })
    }

    /// View as a multisig aggregate modification, if the type matches.
    pub fn as_aggregate_modification(&self) -> Option<AggregateModificationView> {
        self.is(TransactionType::MultisigAggregateModification)
            .then(|| AggregateModificationView {
                modifications: self.modifications.clone().unwrap_or_default(),
                min_cosignatories: self.min_cosignatories.clone().unwrap_or_default(),
            })
    }

    /// View as a multisig cosignature, if the type matches.
    pub fn as_multisig_signature(&self) -> Option<MultisigSignatureView> {
        self.is(TransactionType::MultisigSignature)
            .then(|| MultisigSignatureView {
                other_hash: self.other_hash.clone().unwrap_or_default(),
                other_account: self.other_account.clone().unwrap_or_default(),
            })
    }

    /// View as a multisig wrapper, if the type matches.
    pub fn as_multisig(&self) -> Option<MultisigView> {
        self.is(TransactionType::Multisig).then(|| MultisigView {
            other_trans: self
                .other_trans
                .clone()
                .map(|boxed| *boxed)
                .unwrap_or_default(),
            signatures: self.signatures.clone().unwrap_or_default(),
        })
    }

    /// View as a namespace provision, if the type matches.
    pub fn as_provision_namespace(&self) -> Option<ProvisionNamespaceView> {
        self.is(TransactionType::ProvisionNamespace)
            .then(|| ProvisionNamespaceView {
                rental_fee: self.rental_fee.unwrap_or(0),
                rental_fee_sink: self.rental_fee_sink.clone().unwrap_or_default(),
                new_part: self.new_part.clone().unwrap_or_default(),
                parent: self.parent.clone(),
            })
    }

    /// View as a mosaic definition creation, if the type matches.
    pub fn as_mosaic_definition_creation(&self) -> Option<MosaicDefinitionCreationView> {
        if !self.is(TransactionType::MosaicDefinitionCreation) {
            return None;
        }
        let mosaic_definition = self.mosaic_definition.clone()?;
        Some(MosaicDefinitionCreationView {
            creation_fee: self.creation_fee.unwrap_or(0),
            creation_fee_sink: self.creation_fee_sink.clone().unwrap_or_default(),
            mosaic_definition,
        })
    }

    /// View as a mosaic supply change, if the type matches.
    pub fn as_mosaic_supply_change(&self) -> Option<MosaicSupplyChangeView> {
        if !self.is(TransactionType::MosaicSupplyChange) {
            return None;
        }
        let mosaic_id = self.mosaic_id.clone()?;
        Some(MosaicSupplyChangeView {
            supply_type: self.supply_type.unwrap_or(0),
            delta: self.delta.unwrap_or(0),
            mosaic_id,
        })
    }
}
