//! Transactions, batch metadata and the mutable transaction builder.
//!
//! A transaction is built once and then treated as immutable. Adding batch
//! metadata or a signature means going back through [`TransactionBuilder`],
//! which takes ownership of the transaction and hands it back on
//! [`TransactionBuilder::build`].

use serde::{Deserialize, Serialize};

use crate::crypto::Keypair;
use crate::digest::{payload_hash, reduced_payload_hash, transaction_hash, ReducedHash, TxHash};
use crate::signer::{sign_hash, Signature};

/// How a downstream consensus layer should treat the members of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum BatchType {
    /// All members succeed or all fail.
    Atomic = 0,
    /// Members are applied in sequence.
    Ordered = 1,
}

impl BatchType {
    /// Convert to the wire tag.
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// Try to parse from the wire tag.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Atomic),
            1 => Some(Self::Ordered),
            _ => None,
        }
    }
}

/// Batch metadata attached to a transaction's payload envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchMeta {
    pub batch_type: BatchType,

    /// Uppercase hex reduced hashes of every member, in batch order.
    pub reduced_hashes: Vec<String>,
}

/// A ledger command. Opaque to hashing beyond its canonical encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    AddAssetQuantity {
        asset_id: String,
        amount: String,
    },
    SubtractAssetQuantity {
        asset_id: String,
        amount: String,
    },
    TransferAsset {
        src_account_id: String,
        dest_account_id: String,
        asset_id: String,
        description: String,
        amount: String,
    },
    CreateAccount {
        account_name: String,
        domain_id: String,
        /// Uppercase hex public key.
        public_key: String,
    },
    SetAccountDetail {
        account_id: String,
        key: String,
        value: String,
    },
    AddSignatory {
        account_id: String,
        /// Uppercase hex public key.
        public_key: String,
    },
}

/// The core transaction body, excluding batch metadata and signatures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReducedPayload {
    pub creator_account_id: String,

    /// Creation time (Unix milliseconds).
    pub created_time: u64,

    /// Number of signatures required for the transaction to be valid.
    pub quorum: u32,

    pub commands: Vec<Command>,
}

/// The payload envelope: reduced payload plus optional batch metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    pub reduced_payload: ReducedPayload,
    pub batch: Option<BatchMeta>,
}

/// A transaction: payload envelope plus any number of signatures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub payload: Payload,
    pub signatures: Vec<Signature>,
}

impl Transaction {
    /// Batching-stable identity hash (see [`crate::digest::reduced_hash`]).
    pub fn reduced_hash(&self) -> ReducedHash {
        reduced_payload_hash(&self.payload.reduced_payload)
    }

    /// Full-payload hash (see [`crate::digest::transaction_hash`]).
    pub fn hash(&self) -> TxHash {
        transaction_hash(self)
    }

    /// Get the batch metadata, if this transaction belongs to a batch.
    pub fn batch_meta(&self) -> Option<&BatchMeta> {
        self.payload.batch.as_ref()
    }

    /// Get the creator account.
    pub fn creator_account_id(&self) -> &str {
        &self.payload.reduced_payload.creator_account_id
    }
}

/// Builder that owns a transaction while metadata and signatures are added.
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    payload: Payload,
    signatures: Vec<Signature>,
}

impl TransactionBuilder {
    /// Start an unbatched, unsigned transaction.
    pub fn new(reduced_payload: ReducedPayload) -> Self {
        Self {
            payload: Payload {
                reduced_payload,
                batch: None,
            },
            signatures: Vec::new(),
        }
    }

    /// Reopen an existing transaction for mutation.
    pub fn from_transaction(tx: Transaction) -> Self {
        Self {
            payload: tx.payload,
            signatures: tx.signatures,
        }
    }

    /// Set the batch metadata, replacing any previous metadata.
    pub fn set_batch_meta(
        mut self,
        batch_type: BatchType,
        reduced_hashes: impl IntoIterator<Item = String>,
    ) -> Self {
        self.payload.batch = Some(BatchMeta {
            batch_type,
            reduced_hashes: reduced_hashes.into_iter().collect(),
        });
        self
    }

    /// Remove the batch metadata.
    pub fn clear_batch_meta(mut self) -> Self {
        self.payload.batch = None;
        self
    }

    /// Drop every signature collected so far.
    pub fn clear_signatures(mut self) -> Self {
        self.signatures.clear();
        self
    }

    /// Append a signature over the current full-payload hash.
    ///
    /// Later changes to the payload invalidate this signature, so sign last.
    pub fn sign(mut self, keypair: &Keypair) -> Self {
        let hash = payload_hash(&self.payload);
        self.signatures.push(sign_hash(hash.as_bytes(), keypair));
        self
    }

    /// Finish the transaction.
    pub fn build(self) -> Transaction {
        Transaction {
            payload: self.payload,
            signatures: self.signatures,
        }
    }
}
