//! Error types for txseal core.

use thiserror::Error;

/// Errors that can occur while hashing, signing or assembling batches.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed hex: odd length, a non-hex character, or the wrong number
    /// of bytes for a key or hash.
    #[error("decoding error: {0}")]
    Decoding(#[from] hex::FromHexError),

    /// A tagged union carried a tag this crate does not know.
    #[error("unrecognized {kind} variant: {tag}")]
    UnsupportedVariant { kind: &'static str, tag: u64 },

    /// Key material rejected by the Ed25519 primitive.
    #[error("crypto provider error: {0}")]
    CryptoProvider(#[from] ed25519_dalek::SignatureError),

    /// The public half of a keypair does not belong to the private half.
    #[error("public key does not match private key")]
    KeyMismatch,

    #[error("batch must contain at least one transaction")]
    EmptyBatch,

    #[error("batch of {size} transactions exceeds the limit of {limit}")]
    BatchTooLarge { size: usize, limit: usize },

    /// Canonical bytes that do not describe a valid value.
    #[error("malformed encoding: {0}")]
    Malformed(String),
}

/// Result type for txseal core operations.
pub type Result<T> = std::result::Result<T, Error>;
