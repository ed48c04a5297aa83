//! Hex codec for hashes, signatures and keys.
//!
//! Text crossing the wire is uppercase hex. Decoding accepts either case.

use crate::error::Result;

/// Encode bytes as an uppercase hex string.
pub fn to_hex(bytes: impl AsRef<[u8]>) -> String {
    hex::encode_upper(bytes)
}

/// Decode a hex string into bytes.
pub fn from_hex(s: &str) -> Result<Vec<u8>> {
    Ok(hex::decode(s)?)
}

/// Decode a hex string into exactly `N` bytes.
pub fn from_hex_array<const N: usize>(s: &str) -> Result<[u8; N]> {
    let bytes = from_hex(s)?;
    if bytes.len() != N {
        return Err(hex::FromHexError::InvalidStringLength.into());
    }
    let mut arr = [0u8; N];
    arr.copy_from_slice(&bytes);
    Ok(arr)
}
