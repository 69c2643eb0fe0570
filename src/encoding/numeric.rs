//! Numeric header fields as minimal big-endian bytes
//!
//! RLP scalars carry no leading zero bytes and zero is the empty string.
//! Values are parsed with arbitrary precision so pre-merge difficulties
//! wider than 64 bits survive.

use super::hex_field::{hex_field_bytes, strip_hex_prefix};

/// Encode a decimal or `0x`-hex unsigned integer as minimal big-endian bytes.
///
/// Zero and anything unparsable encode as the empty byte string.
pub fn numeric_field_bytes(s: &str) -> Vec<u8> {
    let trimmed = s.trim();
    let bytes = if trimmed.starts_with("0x") || trimmed.starts_with("0X") {
        let digits = strip_hex_prefix(trimmed);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            tracing::debug!(value = s, "unparsable hex number, encoding as empty");
            return Vec::new();
        }
        hex_field_bytes(digits)
    } else {
        match decimal_to_be_bytes(trimmed) {
            Some(bytes) => bytes,
            None => {
                tracing::debug!(value = s, "unparsable decimal number, encoding as empty");
                return Vec::new();
            }
        }
    };

    trim_leading_zeros(bytes)
}

/// Parse a decimal field to `u64` if it fits, accepting `0x` hex as well.
///
/// Digits only: a sign is rejected like any other stray character.
pub fn parse_u64(s: &str) -> Option<u64> {
    let trimmed = s.trim();
    let (digits, radix) = if trimmed.starts_with("0x") || trimmed.starts_with("0X") {
        (strip_hex_prefix(trimmed), 16)
    } else {
        (trimmed, 10)
    };
    if !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u64::from_str_radix(digits, radix).ok()
}

/// Convert a string of ASCII decimal digits into big-endian bytes.
fn decimal_to_be_bytes(digits: &str) -> Option<Vec<u8>> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    // Little-endian accumulator, multiplied by ten per digit.
    let mut acc: Vec<u8> = Vec::new();
    for d in digits.bytes() {
        let mut carry = u16::from(d - b'0');
        for byte in acc.iter_mut() {
            let v = u16::from(*byte) * 10 + carry;
            *byte = (v & 0xff) as u8;
            carry = v >> 8;
        }
        if carry > 0 {
            acc.push(carry as u8);
        }
    }
    acc.reverse();
    Some(acc)
}

fn trim_leading_zeros(bytes: Vec<u8>) -> Vec<u8> {
    match bytes.iter().position(|b| *b != 0) {
        Some(first) => bytes[first..].to_vec(),
        None => Vec::new(),
    }
}
