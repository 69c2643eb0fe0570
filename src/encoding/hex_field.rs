//! Hex text to raw bytes
//!
//! Hash, address and opaque byte fields arrive as hex text. Decoding is
//! lenient: a missing `0x`, an odd nibble count and garbage input are all
//! absorbed rather than reported.

/// Strip an optional `0x` / `0X` prefix.
pub fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Decode a hex header field into bytes.
///
/// Odd-length input is left-padded with a single zero nibble. Empty input,
/// a bare `0x`, or anything that is not hex yields an empty byte string.
pub fn hex_field_bytes(s: &str) -> Vec<u8> {
    let clean = strip_hex_prefix(s.trim());
    if clean.is_empty() {
        return Vec::new();
    }

    let decoded = if clean.len() % 2 == 1 {
        hex::decode(format!("0{clean}"))
    } else {
        hex::decode(clean)
    };

    match decoded {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!(value = s, error = %e, "unparsable hex field, encoding as empty");
            Vec::new()
        }
    }
}
