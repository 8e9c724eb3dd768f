//! Tests for fee calculation, serialization, and announce packaging.

use nem_primitives::account::{Account, NetworkVersion};

use crate::builder::{self, TransactionOptions};
use crate::fee;
use crate::transaction::{
    CosignatoryModification, ModificationAction, MosaicAttachment, TransactionBody,
    TransferMessage,
};
use crate::types::{ImportanceMode, TransactionType};

const RECIPIENT: &str = "NCCRHLLID4JQNVQHXCANFIGAYWFNS65FRSIPS2O6";

fn signer_key() -> [u8; 32] {
    let mut key = [0u8; 32];
    key.copy_from_slice(
        &hex::decode("d033867885270eb9013376d6614939188faa0a8ba1fa538c460fa44f82efc478").unwrap(),
    );
    key
}

fn fixed_options() -> TransactionOptions {
    TransactionOptions {
        fee: None,
        timestamp: Some(90_000_000),
        deadline: Some(90_003_600),
    }
}

fn attachment(quantity: u64, supply: u64, divisibility: u32) -> MosaicAttachment {
    MosaicAttachment {
        namespace_id: "ttech".to_string(),
        name: "ryuta".to_string(),
        quantity,
        supply,
        divisibility,
    }
}

// ---------------------------------------------------------------------
// Fee table
// ---------------------------------------------------------------------

#[test]
fn xem_transfer_fee_boundaries() {
    let cases: [(u64, u64); 8] = [
        (0, 50_000),
        (10_000_000_000, 50_000),
        (19_999_999_999, 50_000),
        (20_000_000_000, 100_000),
        (249_999_999_999, 1_200_000),
        (250_000_000_000, 1_250_000),
        (250_000_000_001, 1_250_000),
        (1_000_000_000_000, 1_250_000),
    ];
    for (micro_nem, expected) in cases {
        assert_eq!(fee::xem_transfer_fee(micro_nem), expected, "amount {}", micro_nem);
    }
}

#[test]
fn message_fee_boundaries() {
    let cases: [(usize, u64); 4] = [(0, 0), (31, 50_000), (32, 100_000), (63, 100_000)];
    for (len, expected) in cases {
        let payload = vec![b'1'; len];
        assert_eq!(fee::message_fee(&payload), expected, "len {}", len);
    }
    // 65 bytes start a third chunk.
    assert_eq!(fee::message_fee(&[b'1'; 65]), 150_000);
}

#[test]
fn mosaic_transfer_fee_fixtures() {
    let cases: [(u64, u64, u32, u64); 7] = [
        (1, 1_000, 0, 50_000),
        (1, 1_000_000, 0, 50_000),
        (23, 1_000_000, 0, 100_000),
        (24, 1_000_000, 0, 150_000),
        (25, 1_000_000, 0, 200_000),
        (28, 1_000_000, 0, 350_000),
        (29, 1_000_000, 0, 350_000),
    ];
    for (quantity, supply, divisibility, expected) in cases {
        assert_eq!(
            fee::mosaic_transfer_fee(quantity, supply, divisibility),
            expected,
            "quantity {}",
            quantity
        );
    }
}

#[test]
fn small_business_mosaic_pays_one_step() {
    assert_eq!(fee::mosaic_transfer_fee(9_999, 9_999, 0), 50_000);
    // Divisibility pushes it onto the scaled formula.
    assert_ne!(fee::mosaic_transfer_fee(9_999, 9_999, 1), 50_000);
}

// ---------------------------------------------------------------------
// Builders and fee selection
// ---------------------------------------------------------------------

#[test]
fn transfer_applies_minimum_fee() {
    let tx = builder::xem_transfer(
        signer_key(),
        RECIPIENT,
        1_000_000,
        None,
        NetworkVersion::Main,
        &fixed_options(),
    );
    assert_eq!(tx.common.fee, 50_000);
}

#[test]
fn transfer_adds_message_fee() {
    let tx = builder::xem_transfer(
        signer_key(),
        RECIPIENT,
        20_000_000_000,
        Some(TransferMessage::plain("12345678901234567890123456789012")),
        NetworkVersion::Main,
        &fixed_options(),
    );
    assert_eq!(tx.common.fee, 100_000 + 100_000);
}

#[test]
fn explicit_fee_wins() {
    let options = TransactionOptions {
        fee: Some(7),
        ..fixed_options()
    };
    let tx = builder::xem_transfer(
        signer_key(),
        RECIPIENT,
        1_000_000,
        None,
        NetworkVersion::Main,
        &options,
    );
    assert_eq!(tx.common.fee, 7);
}

#[test]
fn default_deadline_is_one_hour() {
    let options = TransactionOptions {
        timestamp: Some(1_000),
        ..Default::default()
    };
    let tx = builder::xem_transfer(
        signer_key(),
        RECIPIENT,
        0,
        None,
        NetworkVersion::Main,
        &options,
    );
    assert_eq!(tx.common.deadline, 4_600);
}

#[test]
fn mosaic_transfer_sums_attachment_fees() {
    let tx = builder::mosaic_transfer(
        signer_key(),
        RECIPIENT,
        &[attachment(24, 1_000_000, 0), attachment(1, 1_000, 0)],
        None,
        NetworkVersion::Main,
        &fixed_options(),
    );
    assert_eq!(tx.common.fee, 150_000 + 50_000);
    match &tx.body {
        TransactionBody::Transfer { amount, mosaics, .. } => {
            assert_eq!(*amount, 1_000_000);
            assert_eq!(mosaics.len(), 2);
        }
        other => panic!("unexpected body {:?}", other),
    }
}

#[test]
fn flat_fees() {
    let opts = fixed_options();
    let aggregate = builder::multisig_aggregate_modification(
        signer_key(),
        Vec::new(),
        0,
        NetworkVersion::Main,
        &opts,
    );
    assert_eq!(aggregate.common.fee, 500_000);

    let wrapper = builder::multisig(signer_key(), aggregate, NetworkVersion::Main, &opts);
    assert_eq!(wrapper.common.fee, 150_000);

    let cosignature = builder::multisig_signature(
        signer_key(),
        [0u8; 32],
        RECIPIENT,
        NetworkVersion::Main,
        &opts,
    );
    assert_eq!(cosignature.common.fee, 150_000);

    let importance = builder::importance_transfer(
        signer_key(),
        ImportanceMode::Activate,
        [1u8; 32],
        NetworkVersion::Main,
        &opts,
    );
    assert_eq!(importance.common.fee, 150_000);
}

// ---------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------

#[test]
fn transfer_wire_layout() {
    let tx = builder::xem_transfer(
        signer_key(),
        RECIPIENT,
        1_000_000,
        None,
        NetworkVersion::Main,
        &fixed_options(),
    );
    let bytes = tx.to_bytes();
    assert_eq!(bytes.len(), 120);

    // Envelope header.
    assert_eq!(&bytes[0..4], &0x0101u32.to_le_bytes());
    assert_eq!(&bytes[4..8], &0x6800_0002u32.to_le_bytes());
    assert_eq!(&bytes[8..12], &90_000_000u32.to_le_bytes());
    assert_eq!(&bytes[12..16], &32u32.to_le_bytes());
    assert_eq!(&bytes[16..48], &signer_key());
    assert_eq!(&bytes[48..56], &50_000u64.to_le_bytes());
    assert_eq!(&bytes[56..60], &90_003_600u32.to_le_bytes());

    // Transfer body.
    assert_eq!(&bytes[60..64], &40u32.to_le_bytes());
    assert_eq!(&bytes[64..104], RECIPIENT.as_bytes());
    assert_eq!(&bytes[104..112], &1_000_000u64.to_le_bytes());
    // Empty message and mosaic blocks collapse to single zero words.
    assert_eq!(&bytes[112..116], &[0u8; 4]);
    assert_eq!(&bytes[116..120], &[0u8; 4]);
}

#[test]
fn test_network_version_packs_high_byte() {
    let tx = builder::xem_transfer(
        signer_key(),
        RECIPIENT,
        0,
        None,
        NetworkVersion::Test,
        &fixed_options(),
    );
    assert_eq!(&tx.to_bytes()[4..8], &0x9800_0002u32.to_le_bytes());
}

#[test]
fn message_block_layout() {
    let tx = builder::xem_transfer(
        signer_key(),
        RECIPIENT,
        0,
        Some(TransferMessage::plain("hi")),
        NetworkVersion::Main,
        &fixed_options(),
    );
    let bytes = tx.to_bytes();
    let block = &bytes[112..];
    assert_eq!(&block[0..4], &10u32.to_le_bytes()); // 4 + 4 + 2
    assert_eq!(&block[4..8], &1u32.to_le_bytes()); // plain
    assert_eq!(&block[8..12], &2u32.to_le_bytes());
    assert_eq!(&block[12..14], b"hi");
    // Mosaic block follows.
    assert_eq!(&block[14..18], &[0u8; 4]);
}

#[test]
fn empty_message_collapses_to_zero_word() {
    let with_empty = builder::xem_transfer(
        signer_key(),
        RECIPIENT,
        0,
        Some(TransferMessage::plain("")),
        NetworkVersion::Main,
        &fixed_options(),
    );
    let without = builder::xem_transfer(
        signer_key(),
        RECIPIENT,
        0,
        None,
        NetworkVersion::Main,
        &fixed_options(),
    );
    assert_eq!(with_empty.to_bytes(), without.to_bytes());
}

#[test]
fn mosaics_serialize_sorted_by_full_name() {
    let mut second = attachment(5, 1_000, 0);
    second.namespace_id = "alpha".to_string();
    let tx = builder::mosaic_transfer(
        signer_key(),
        RECIPIENT,
        &[attachment(1, 1_000, 0), second],
        None,
        NetworkVersion::Main,
        &fixed_options(),
    );
    let bytes = tx.to_bytes();
    let block = &bytes[116..];
    assert_eq!(&block[0..4], &2u32.to_le_bytes());
    // First mosaic struct: alpha:ryuta, quantity 5.
    assert_eq!(&block[4..8], &30u32.to_le_bytes()); // 4 + 18 + 8
    assert_eq!(&block[8..12], &18u32.to_le_bytes()); // 4 + 5 + 4 + 5
    assert_eq!(&block[12..16], &5u32.to_le_bytes());
    assert_eq!(&block[16..21], b"alpha");
    assert_eq!(&block[21..25], &5u32.to_le_bytes());
    assert_eq!(&block[25..30], b"ryuta");
    assert_eq!(&block[30..38], &5u64.to_le_bytes());
    // Second mosaic struct: ttech:ryuta, quantity 1.
    assert_eq!(&block[42..46], &5u32.to_le_bytes());
    assert_eq!(&block[46..51], b"ttech");
}

#[test]
fn importance_transfer_wire_layout() {
    let tx = builder::importance_transfer(
        signer_key(),
        ImportanceMode::Activate,
        [9u8; 32],
        NetworkVersion::Main,
        &fixed_options(),
    );
    let bytes = tx.to_bytes();
    assert_eq!(&bytes[0..4], &0x0801u32.to_le_bytes());
    assert_eq!(&bytes[4..8], &0x6800_0001u32.to_le_bytes());
    assert_eq!(&bytes[60..64], &1u32.to_le_bytes());
    assert_eq!(&bytes[64..68], &32u32.to_le_bytes());
    assert_eq!(&bytes[68..100], &[9u8; 32]);
}

#[test]
fn aggregate_modification_wire_layout() {
    let tx = builder::multisig_aggregate_modification(
        signer_key(),
        vec![CosignatoryModification {
            action: ModificationAction::Add,
            cosignatory_public_key: [3u8; 32],
        }],
        -1,
        NetworkVersion::Main,
        &fixed_options(),
    );
    let bytes = tx.to_bytes();
    assert_eq!(&bytes[0..4], &0x1001u32.to_le_bytes());
    assert_eq!(&bytes[4..8], &0x6800_0002u32.to_le_bytes());
    let body = &bytes[60..];
    assert_eq!(&body[0..4], &1u32.to_le_bytes()); // modification count
    assert_eq!(&body[4..8], &40u32.to_le_bytes()); // struct length
    assert_eq!(&body[8..12], &1u32.to_le_bytes()); // add
    assert_eq!(&body[12..16], &32u32.to_le_bytes());
    assert_eq!(&body[16..48], &[3u8; 32]);
    // Minimum-cosignatory block.
    assert_eq!(&body[48..52], &4u32.to_le_bytes());
    assert_eq!(&body[52..56], &(-1i32).to_le_bytes());
    assert_eq!(bytes.len(), 60 + 56);
}

#[test]
fn multisig_signature_wire_layout() {
    let tx = builder::multisig_signature(
        signer_key(),
        [0xabu8; 32],
        RECIPIENT,
        NetworkVersion::Main,
        &fixed_options(),
    );
    let bytes = tx.to_bytes();
    assert_eq!(&bytes[0..4], &0x1002u32.to_le_bytes());
    let body = &bytes[60..];
    assert_eq!(&body[0..4], &36u32.to_le_bytes()); // outer hash struct
    assert_eq!(&body[4..8], &32u32.to_le_bytes());
    assert_eq!(&body[8..40], &[0xabu8; 32]);
    assert_eq!(&body[40..44], &40u32.to_le_bytes());
    assert_eq!(&body[44..84], RECIPIENT.as_bytes());
}

#[test]
fn multisig_wrapper_embeds_inner_bytes() {
    let inner = builder::xem_transfer(
        signer_key(),
        RECIPIENT,
        1_000_000,
        None,
        NetworkVersion::Main,
        &fixed_options(),
    );
    let inner_bytes = inner.to_bytes();
    let wrapper = builder::multisig(
        signer_key(),
        inner,
        NetworkVersion::Main,
        &fixed_options(),
    );
    let bytes = wrapper.to_bytes();
    assert_eq!(&bytes[0..4], &0x1004u32.to_le_bytes());
    assert_eq!(&bytes[60..64], &(inner_bytes.len() as u32).to_le_bytes());
    assert_eq!(&bytes[64..], &inner_bytes[..]);
}

#[test]
fn serialization_is_deterministic() {
    let build = || {
        builder::xem_transfer(
            signer_key(),
            RECIPIENT,
            20_000_000_000,
            Some(TransferMessage::plain("deterministic")),
            NetworkVersion::Main,
            &fixed_options(),
        )
    };
    assert_eq!(build().to_bytes(), build().to_bytes());
}

// ---------------------------------------------------------------------
// Announce packaging
// ---------------------------------------------------------------------

#[test]
fn request_announce_signs_serialized_bytes() {
    let sender = Account::random(NetworkVersion::Main);
    let tx = builder::xem_transfer(
        *sender.public_key(),
        RECIPIENT,
        1_000_000,
        None,
        NetworkVersion::Main,
        &fixed_options(),
    );
    let announce = builder::create_request_announce(&sender, &tx);

    assert_eq!(announce.data, tx.to_hex());
    let signature = hex::decode(&announce.signature).unwrap();
    assert!(sender.verify(&tx.to_bytes(), &signature));
}

#[test]
fn request_announce_json_shape() {
    let announce = crate::RequestAnnounce {
        data: "00ff".to_string(),
        signature: "aa55".to_string(),
    };
    let json = serde_json::to_value(&announce).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"data": "00ff", "signature": "aa55"})
    );
}

#[test]
fn transaction_kind_matches_body() {
    let tx = builder::xem_transfer(
        signer_key(),
        RECIPIENT,
        0,
        None,
        NetworkVersion::Main,
        &fixed_options(),
    );
    assert_eq!(tx.common.kind, TransactionType::Transfer);
    assert_eq!(tx.body.kind(), TransactionType::Transfer);
}
