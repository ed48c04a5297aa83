//! Digest engine: SHA3-256 over the canonical bytes of each payload shape.
//!
//! Every hash domain has its own type. A [`ReducedHash`] identifies a
//! transaction for batch membership and never changes once the transaction
//! is built; a [`TxHash`] covers the whole payload envelope and changes when
//! batch metadata is attached. The two cannot be compared by accident.

use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_256};
use std::fmt;

use crate::block::{Block, BlockV1};
use crate::canonical::{
    decode_block, encode_block_payload, encode_payload, encode_query_payload,
    encode_reduced_payload,
};
use crate::error::Result;
use crate::hex_codec::{from_hex_array, to_hex};
use crate::query::Query;
use crate::transaction::{Payload, ReducedPayload, Transaction};

/// Length of every digest in bytes.
pub const HASH_LEN: usize = 32;

/// Compute the SHA3-256 digest of data.
pub fn sha3_256(data: impl AsRef<[u8]>) -> [u8; HASH_LEN] {
    let mut hasher = Sha3_256::new();
    hasher.update(data.as_ref());
    hasher.finalize().into()
}

macro_rules! digest_type {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub [u8; HASH_LEN]);

        impl $name {
            /// Create from raw bytes.
            pub const fn from_bytes(bytes: [u8; HASH_LEN]) -> Self {
                Self(bytes)
            }

            /// Get the raw bytes.
            pub const fn as_bytes(&self) -> &[u8; HASH_LEN] {
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

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "({}...)"), &self.to_hex()[..16])
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl From<[u8; HASH_LEN]> for $name {
            fn from(bytes: [u8; HASH_LEN]) -> Self {
                Self(bytes)
            }
        }
    };
}

digest_type!(
    /// SHA3-256 of a transaction's reduced payload.
    ReducedHash,
    "ReducedHash"
);

digest_type!(
    /// SHA3-256 of a transaction's payload envelope. Used for status lookups.
    TxHash,
    "TxHash"
);

digest_type!(
    /// SHA3-256 of a block payload.
    BlockHash,
    "BlockHash"
);

digest_type!(
    /// SHA3-256 of a query payload.
    QueryHash,
    "QueryHash"
);

/// Something with a canonical hash that can be signed.
pub trait Hashable {
    type Hash: AsRef<[u8]>;

    fn hash(&self) -> Self::Hash;
}

/// Hash of a reduced payload.
pub fn reduced_payload_hash(reduced_payload: &ReducedPayload) -> ReducedHash {
    ReducedHash(sha3_256(encode_reduced_payload(reduced_payload)))
}

/// Batching-stable identity hash of a transaction.
pub fn reduced_hash(tx: &Transaction) -> ReducedHash {
    reduced_payload_hash(&tx.payload.reduced_payload)
}

/// Hash of a payload envelope.
pub fn payload_hash(payload: &Payload) -> TxHash {
    TxHash(sha3_256(encode_payload(payload)))
}

/// Full-payload hash of a transaction. Signatures are not covered.
pub fn transaction_hash(tx: &Transaction) -> TxHash {
    payload_hash(&tx.payload)
}

/// Hash of a version 1 block.
pub fn block_v1_hash(block: &BlockV1) -> BlockHash {
    BlockHash(sha3_256(encode_block_payload(&block.payload)))
}

/// Hash of a block of any known version.
pub fn block_hash(block: &Block) -> BlockHash {
    match block {
        Block::V1(v1) => block_v1_hash(v1),
    }
}

/// Hash a canonically encoded block.
///
/// Fails with [`crate::Error::UnsupportedVariant`] when the version tag is
/// unset or unknown.
pub fn encoded_block_hash(bytes: &[u8]) -> Result<BlockHash> {
    let block = decode_block(bytes)?;
    Ok(block_hash(&block))
}

/// Hash of a query payload.
pub fn query_hash(query: &Query) -> QueryHash {
    QueryHash(sha3_256(encode_query_payload(&query.payload)))
}

impl Hashable for Transaction {
    type Hash = TxHash;

    fn hash(&self) -> TxHash {
        transaction_hash(self)
    }
}

impl Hashable for BlockV1 {
    type Hash = BlockHash;

    fn hash(&self) -> BlockHash {
        block_v1_hash(self)
    }
}

impl Hashable for Block {
    type Hash = BlockHash;

    fn hash(&self) -> BlockHash {
        block_hash(self)
    }
}

impl Hashable for Query {
    type Hash = QueryHash;

    fn hash(&self) -> QueryHash {
        query_hash(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockPayload;
    use crate::canonical::encode_block;
    use crate::crypto::Keypair;
    use crate::error::Error;
    use crate::query::{QueryKind, QueryPayload};
    use crate::transaction::{BatchType, Command, TransactionBuilder};

    fn sample_tx() -> Transaction {
        TransactionBuilder::new(ReducedPayload {
            creator_account_id: "alice@test".into(),
            created_time: 1_736_870_400_000,
            quorum: 1,
            commands: vec![Command::SetAccountDetail {
                account_id: "alice@test".into(),
                key: "age".into(),
                value: "42".into(),
            }],
        })
        .build()
    }

    #[test]
    fn test_sha3_256_known_vectors() {
        assert_eq!(
            hex::encode(sha3_256(b"")),
            "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
        );
        assert_eq!(
            hex::encode(sha3_256(b"abc")),
            "3a985da74fe225b2045c172d6bd390bd855f086e3e9d525b46bfe24511431532"
        );
    }

    #[test]
    fn test_reduced_hash_deterministic() {
        let tx = sample_tx();
        assert_eq!(reduced_hash(&tx), reduced_hash(&tx));
        assert_eq!(reduced_hash(&tx), tx.reduced_hash());
    }

    #[test]
    fn test_reduced_hash_stable_under_batching_and_signing() {
        let tx = sample_tx();
        let before = reduced_hash(&tx);
        let tx_hash_before = transaction_hash(&tx);

        let keypair = Keypair::from_seed(&[0x42; 32]);
        let batched = TransactionBuilder::from_transaction(tx)
            .set_batch_meta(BatchType::Atomic, vec![before.to_hex()])
            .sign(&keypair)
            .build();

        assert_eq!(reduced_hash(&batched), before);
        assert_ne!(transaction_hash(&batched), tx_hash_before);
        assert_ne!(transaction_hash(&batched).0, reduced_hash(&batched).0);
    }

    #[test]
    fn test_transaction_hash_ignores_signatures() {
        let tx = sample_tx();
        let keypair = Keypair::from_seed(&[0x42; 32]);
        let signed = TransactionBuilder::from_transaction(tx.clone())
            .sign(&keypair)
            .build();
        assert_eq!(transaction_hash(&tx), transaction_hash(&signed));
    }

    #[test]
    fn test_block_hash_dispatch() {
        let v1 = BlockV1 {
            payload: BlockPayload {
                height: 7,
                prev_block_hash: to_hex([0u8; 32]),
                created_time: 1_736_870_400_000,
                transactions: vec![sample_tx()],
                rejected_transactions_hashes: Vec::new(),
            },
            signatures: Vec::new(),
        };
        let block = Block::V1(v1.clone());
        assert_eq!(block_hash(&block), block_v1_hash(&v1));
        assert_eq!(
            encoded_block_hash(&encode_block(&block)).unwrap(),
            block_v1_hash(&v1)
        );
    }

    #[test]
    fn test_encoded_block_hash_unknown_version() {
        // {0: 7, 1: null}
        let bytes = [0xa2, 0x00, 0x07, 0x01, 0xf6];
        let err = encoded_block_hash(&bytes).unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedVariant { kind: "block", tag: 7 }
        ));
    }

    #[test]
    fn test_encoded_block_hash_unset_version() {
        // {0: 0}
        let bytes = [0xa1, 0x00, 0x00];
        let err = encoded_block_hash(&bytes).unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedVariant { kind: "block", tag: 0 }
        ));
    }

    #[test]
    fn test_query_hash_ignores_signature() {
        let keypair = Keypair::from_seed(&[0x42; 32]);
        let query = Query::new(QueryPayload {
            creator_account_id: "alice@test".into(),
            created_time: 1_736_870_400_000,
            query_counter: 1,
            kind: QueryKind::GetAccount {
                account_id: "bob@test".into(),
            },
        });
        let signed = query.clone().sign(&keypair);
        assert_eq!(query_hash(&query), query_hash(&signed));
    }

    #[test]
    fn test_hash_debug_and_display() {
        let h = TxHash::from_bytes([0xab; 32]);
        assert_eq!(format!("{}", h), "AB".repeat(32));
        assert!(format!("{:?}", h).starts_with("TxHash("));
        assert_eq!(TxHash::from_hex(&h.to_hex()).unwrap(), h);
    }
}
