//! Signer: binds a canonical hash to a signature and the signer's public key.

use serde::{Deserialize, Serialize};

use crate::crypto::{Ed25519PublicKey, Ed25519Signature, Keypair};
use crate::digest::Hashable;
use crate::error::Result;

/// A signature as carried on the wire: raw signature and public key, both
/// uppercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature {
    pub signature: String,
    pub public_key: String,
}

impl Signature {
    /// Check this signature against a hash.
    pub fn verify(&self, hash: &[u8]) -> Result<()> {
        let public_key = Ed25519PublicKey::from_hex(&self.public_key)?;
        let signature = Ed25519Signature::from_hex(&self.signature)?;
        public_key.verify(hash, &signature)
    }
}

/// Sign the canonical hash of `item`.
pub fn sign<T: Hashable + ?Sized>(item: &T, keypair: &Keypair) -> Signature {
    sign_hash(item.hash().as_ref(), keypair)
}

/// Sign raw hash bytes.
pub fn sign_hash(hash: &[u8], keypair: &Keypair) -> Signature {
    let raw = keypair.sign(hash);
    Signature {
        signature: raw.to_hex(),
        public_key: keypair.public_key().to_hex(),
    }
}
