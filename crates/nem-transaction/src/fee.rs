//! The deterministic fee table.
//!
//! Fees are expressed in the network's smallest currency unit (micro XEM).
//! The mosaic fee deliberately uses floating-point natural log and floor,
//! matching the network's reference implementation at every boundary; it
//! must not be converted to fixed point without re-verifying the table.

/// Minimum fee for any transfer.
pub const MINIMUM_TRANSFER_FEE: u64 = 50_000;

/// Cap on the amount-scaled XEM transfer fee.
pub const MAXIMUM_XEM_TRANSFER_FEE: u64 = 1_250_000;

/// Fee step per 10_000 whole XEM transferred, and per 32-byte message
/// chunk.
pub const TRANSFER_FEE_FACTOR: u64 = 50_000;

/// Flat fee for a multisig aggregate modification (flat since network
/// release 0.6.93).
pub const AGGREGATE_MODIFICATION_FEE: u64 = 500_000;

/// Flat fee for the multisig wrapper transaction.
pub const MULTISIG_WRAPPER_FEE: u64 = 150_000;

/// Flat fee for a multisig cosignature.
pub const MULTISIG_SIGNATURE_FEE: u64 = 150_000;

/// Flat fee for an importance transfer.
pub const IMPORTANCE_TRANSFER_FEE: u64 = 150_000;

/// Calculate the transfer fee for an amount of XEM.
///
/// `max(min_fee, min(floor(amount / 10^10) * factor, max_fee))`; input and
/// output are micro XEM.
pub fn xem_transfer_fee(micro_nem: u64) -> u64 {
    MINIMUM_TRANSFER_FEE.max(((micro_nem / 10_000_000_000) * TRANSFER_FEE_FACTOR).min(MAXIMUM_XEM_TRANSFER_FEE))
}

/// Calculate the fee for an attached message payload.
///
/// Zero for an empty payload, otherwise one fee step per started 32-byte
/// chunk beyond the first byte.
pub fn message_fee(payload: &[u8]) -> u64 {
    if payload.is_empty() {
        0
    } else {
        TRANSFER_FEE_FACTOR * (1 + payload.len() as u64 / 32)
    }
}

/// Calculate the fee for a single mosaic attachment.
///
/// Small-business mosaics (divisibility 0, supply below 10_000) pay a
/// single fee step. All others pay the XEM-equivalent transfer fee,
/// discounted by a supply-related adjustment:
///
/// ```text
/// total      = supply * 10^divisibility
/// adjustment = floor(0.8 * ln(9_000_000_000_000_000 / total))
/// equivalent = 8_999_999_999 * quantity / total
/// fee        = max(factor, xem_transfer_fee(equivalent * 10^6) - factor * adjustment)
/// ```
pub fn mosaic_transfer_fee(quantity: u64, supply: u64, divisibility: u32) -> u64 {
    if divisibility == 0 && supply < 10_000 {
        return TRANSFER_FEE_FACTOR;
    }
    const MAX_MOSAIC_QUANTITY: f64 = 9_000_000_000_000_000.0;

    let total_quantity = supply as f64 * 10f64.powi(divisibility as i32);
    let supply_adjustment = (0.8 * (MAX_MOSAIC_QUANTITY / total_quantity).ln()).floor() as i64;

    let xem_equivalent = 8_999_999_999.0 * quantity as f64 / total_quantity;
    let equivalent_fee = xem_transfer_fee((xem_equivalent * 1_000_000.0) as u64) as i64;

    (TRANSFER_FEE_FACTOR as i64).max(equivalent_fee - TRANSFER_FEE_FACTOR as i64 * supply_adjustment)
        as u64
}
