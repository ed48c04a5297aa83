//! Cryptographic primitives: Ed25519-SHA3 signing and SHA3 hashing.
//!
//! The ledger uses Ed25519 with SHA3-512 in place of SHA-512, both for seed
//! expansion and for the signing nonce and challenge. `ed25519-dalek`'s
//! hazmat layer is generic over that digest, so the curve arithmetic is
//! still dalek's.

use ed25519_dalek::hazmat::{raw_sign, raw_verify, ExpandedSecretKey};
use ed25519_dalek::{Signature as DalekSignature, VerifyingKey};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_512};
use std::fmt;

use crate::error::{Error, Result};
use crate::hex_codec::{from_hex_array, to_hex};

/// Length of an Ed25519 seed (private key) in bytes.
pub const SEED_LEN: usize = 32;

/// Length of an Ed25519 public key in bytes.
pub const PUBLIC_KEY_LEN: usize = 32;

/// Length of an Ed25519 signature in bytes.
pub const SIGNATURE_LEN: usize = 64;

/// A 32-byte Ed25519 public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ed25519PublicKey(pub [u8; PUBLIC_KEY_LEN]);

impl Ed25519PublicKey {
    /// Create from raw bytes, checking that they encode a curve point.
    pub fn try_from_bytes(bytes: [u8; PUBLIC_KEY_LEN]) -> Result<Self> {
        VerifyingKey::from_bytes(&bytes)?;
        Ok(Self(bytes))
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.0
    }

    /// Convert to uppercase hex.
    pub fn to_hex(&self) -> String {
        to_hex(self.0)
    }

    /// Parse from hex.
    pub fn from_hex(s: &str) -> Result<Self> {
        Self::try_from_bytes(from_hex_array(s)?)
    }

    /// Verify an Ed25519-SHA3 signature over a message.
    pub fn verify(&self, message: &[u8], signature: &Ed25519Signature) -> Result<()> {
        let verifying_key = VerifyingKey::from_bytes(&self.0)?;
        let sig = DalekSignature::from_bytes(&signature.0);
        raw_verify::<Sha3_512>(&verifying_key, message, &sig)?;
        Ok(())
    }
}

impl fmt::Debug for Ed25519PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519Pub({}...)", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for Ed25519PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// A 32-byte Ed25519 seed.
#[derive(Clone, PartialEq, Eq)]
pub struct Ed25519PrivateKey([u8; SEED_LEN]);

impl Ed25519PrivateKey {
    /// Create from a raw seed.
    pub const fn from_seed(seed: [u8; SEED_LEN]) -> Self {
        Self(seed)
    }

    /// Get the raw seed (secret key material).
    pub const fn seed(&self) -> &[u8; SEED_LEN] {
        &self.0
    }

    /// Uppercase hex of the seed.
    pub fn to_hex(&self) -> String {
        to_hex(self.0)
    }

    /// Derive the matching public key.
    pub fn public_key(&self) -> Ed25519PublicKey {
        let esk = expand_seed(&self.0);
        Ed25519PublicKey(VerifyingKey::from(&esk).to_bytes())
    }
}

impl fmt::Debug for Ed25519PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Ed25519Priv(..)")
    }
}

/// A 64-byte Ed25519 signature.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Ed25519Signature(pub [u8; SIGNATURE_LEN]);

impl Ed25519Signature {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; SIGNATURE_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; SIGNATURE_LEN] {
        &self.0
    }

    /// Convert to uppercase hex.
    pub fn to_hex(&self) -> String {
        to_hex(self.0)
    }

    /// Parse from hex.
    pub fn from_hex(s: &str) -> Result<Self> {
        Ok(Self(from_hex_array(s)?))
    }
}

impl fmt::Debug for Ed25519Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519Sig({}...)", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for Ed25519Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// An Ed25519-SHA3 keypair.
///
/// Always consistent: the public half is derived from, or checked against,
/// the private half when the keypair is built.
#[derive(Clone)]
pub struct Keypair {
    private: Ed25519PrivateKey,
    verifying_key: VerifyingKey,
}

impl Keypair {
    /// Generate a new random keypair.
    pub fn generate() -> Self {
        let mut seed = [0u8; SEED_LEN];
        rand::thread_rng().fill_bytes(&mut seed);
        Self::from_seed(&seed)
    }

    /// Create from a 32-byte seed.
    pub fn from_seed(seed: &[u8; SEED_LEN]) -> Self {
        Self::from_private_key(Ed25519PrivateKey::from_seed(*seed))
    }

    /// Create from a private key, deriving the public key.
    pub fn from_private_key(private: Ed25519PrivateKey) -> Self {
        let esk = expand_seed(private.seed());
        let verifying_key = VerifyingKey::from(&esk);
        Self {
            private,
            verifying_key,
        }
    }

    /// Create from both halves, rejecting a public key that does not match.
    pub fn from_parts(public: Ed25519PublicKey, private: Ed25519PrivateKey) -> Result<Self> {
        let keypair = Self::from_private_key(private);
        if keypair.public_key() != public {
            return Err(Error::KeyMismatch);
        }
        Ok(keypair)
    }

    /// Get the public key.
    pub fn public_key(&self) -> Ed25519PublicKey {
        Ed25519PublicKey(self.verifying_key.to_bytes())
    }

    /// Get the private key.
    pub fn private_key(&self) -> &Ed25519PrivateKey {
        &self.private
    }

    /// Sign a message.
    pub fn sign(&self, message: &[u8]) -> Ed25519Signature {
        let esk = expand_seed(self.private.seed());
        let sig = raw_sign::<Sha3_512>(&esk, message, &self.verifying_key);
        Ed25519Signature(sig.to_bytes())
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keypair({:?})", self.public_key())
    }
}

/// Expand a seed into the clamped scalar and nonce prefix using SHA3-512.
fn expand_seed(seed: &[u8; SEED_LEN]) -> ExpandedSecretKey {
    let digest = Sha3_512::digest(seed);
    let mut bytes = [0u8; 64];
    bytes.copy_from_slice(&digest);
    ExpandedSecretKey::from_bytes(&bytes)
}
