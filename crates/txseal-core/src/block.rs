//! Blocks, versioned as a closed sum type.
//!
//! New versions are added as new variants. Every match over [`Block`] is
//! exhaustive, and an unknown version tag on the wire is rejected by
//! [`crate::canonical::decode_block`].

use serde::{Deserialize, Serialize};

use crate::signer::Signature;
use crate::transaction::Transaction;

/// Wire tag of [`Block::V1`]. Tag 0 means "not set".
pub const BLOCK_V1_TAG: u64 = 1;

/// Payload of a version 1 block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockPayload {
    pub height: u64,

    /// Uppercase hex hash of the previous block.
    pub prev_block_hash: String,

    /// Creation time (Unix milliseconds).
    pub created_time: u64,

    pub transactions: Vec<Transaction>,

    /// Uppercase hex hashes of transactions rejected from this block.
    pub rejected_transactions_hashes: Vec<String>,
}

/// A version 1 block: payload plus peer signatures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockV1 {
    pub payload: BlockPayload,
    pub signatures: Vec<Signature>,
}

/// A block of any known version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Block {
    V1(BlockV1),
}

impl Block {
    /// Wire tag of this block's version.
    pub fn version_tag(&self) -> u64 {
        match self {
            Block::V1(_) => BLOCK_V1_TAG,
        }
    }

    /// Height of the block.
    pub fn height(&self) -> u64 {
        match self {
            Block::V1(v1) => v1.payload.height,
        }
    }
}

impl From<BlockV1> for Block {
    fn from(block: BlockV1) -> Self {
        Block::V1(block)
    }
}
