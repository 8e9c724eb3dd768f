//! Byte codec helpers for the NEM SDK.
//!
//! Provides hex string conversion, fixed-width little-endian integer
//! encoding, byte-array reversal, and the padless Base32 encoding used by
//! the address format. All transaction fields on this network are
//! length-prefixed with fixed-width little-endian integers, so there is no
//! variable-length integer encoding here.

use crate::PrimitivesError;

/// Decode a hex string into bytes.
///
/// Decoding is strict: an odd-length string or any non-hex digit is a
/// typed failure, never a silent truncation.
///
/// # Arguments
/// * `s` - Hex string, two digits per byte, upper or lower case.
///
/// # Returns
/// `Ok(Vec<u8>)` on success, or `PrimitivesError::InvalidHex`.
pub fn from_hex(s: &str) -> Result<Vec<u8>, PrimitivesError> {
    Ok(hex::decode(s)?)
}

/// Encode bytes as a lowercase hex string, two digits per byte, no
/// separators.
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Return a new vector with the byte order reversed.
///
/// Used for the wallet-compatible private key export, which stores the
/// seed byte-swapped.
pub fn reverse_bytes(bytes: &[u8]) -> Vec<u8> {
    bytes.iter().rev().copied().collect()
}

/// Encode a 32-bit value as 4 little-endian bytes.
pub fn u32_le(value: u32) -> [u8; 4] {
    value.to_le_bytes()
}

/// Encode a 64-bit value as 8 little-endian bytes.
pub fn u64_le(value: u64) -> [u8; 8] {
    value.to_le_bytes()
}

/// Encode bytes with Base32 (RFC 4648 alphabet A-Z, 2-7) without padding.
///
/// Bits are packed MSB-first across the whole input. A partial trailing
/// 5-bit group is implicitly zero-padded by the packing loop and still
/// emits one output character; no `=` padding is appended.
///
/// # Arguments
/// * `bytes` - Input bytes.
///
/// # Returns
/// The Base32 string.
pub fn base32_nopad(bytes: &[u8]) -> String {
    let mut out = String::with_capacity((bytes.len() * 8).div_ceil(5));
    let mut current = 0u32;
    let mut bit_count = 0u32;
    for &byte in bytes {
        for i in (0..8).rev() {
            current = (current << 1) | ((byte >> i) & 1) as u32;
            bit_count += 1;
            if bit_count == 5 {
                out.push(alphabet_char(current as u8));
                current = 0;
                bit_count = 0;
            }
        }
    }
    if bit_count > 0 {
        out.push(alphabet_char((current << (5 - bit_count)) as u8));
    }
    out
}

fn alphabet_char(group: u8) -> char {
    debug_assert!(group < 32);
    if group < 26 {
        (b'A' + group) as char
    } else {
        (b'2' + group - 26) as char
    }
}
