//! Parsing Ed25519-SHA3 keys from hex.
//!
//! Public keys are 32 bytes (64 hex characters). Private keys are either a
//! 32-byte seed or the 64-byte `seed || public key` form (128 hex
//! characters); the second form is checked for consistency.

use crate::crypto::{Ed25519PrivateKey, Ed25519PublicKey, Keypair, PUBLIC_KEY_LEN, SEED_LEN};
use crate::error::{Error, Result};
use crate::hex_codec::from_hex;

/// Parse a public key from hex.
pub fn parse_hex_public_key(hex_public_key: &str) -> Result<Ed25519PublicKey> {
    Ed25519PublicKey::from_hex(hex_public_key)
}

/// Parse a private key from hex.
pub fn parse_hex_private_key(hex_private_key: &str) -> Result<Ed25519PrivateKey> {
    let bytes = from_hex(hex_private_key)?;
    match bytes.len() {
        SEED_LEN => {
            let mut seed = [0u8; SEED_LEN];
            seed.copy_from_slice(&bytes);
            Ok(Ed25519PrivateKey::from_seed(seed))
        }
        n if n == SEED_LEN + PUBLIC_KEY_LEN => {
            let mut seed = [0u8; SEED_LEN];
            seed.copy_from_slice(&bytes[..SEED_LEN]);
            let private = Ed25519PrivateKey::from_seed(seed);

            let mut public = [0u8; PUBLIC_KEY_LEN];
            public.copy_from_slice(&bytes[SEED_LEN..]);
            if private.public_key().0 != public {
                return Err(Error::KeyMismatch);
            }
            Ok(private)
        }
        _ => Err(hex::FromHexError::InvalidStringLength.into()),
    }
}

/// Parse a keypair from hex, rejecting halves that do not belong together.
pub fn parse_hex_keypair(hex_public_key: &str, hex_private_key: &str) -> Result<Keypair> {
    let public = parse_hex_public_key(hex_public_key)?;
    let private = parse_hex_private_key(hex_private_key)?;
    Keypair::from_parts(public, private)
}
