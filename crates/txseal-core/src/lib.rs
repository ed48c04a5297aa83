//! # txseal core
//!
//! Deterministic transaction hashing and batch signing for a ledger client.
//!
//! This crate contains no I/O and holds no state between calls. Everything is
//! a pure function of its inputs, except that transactions moved into a
//! builder or a batch come back rebuilt.
//!
//! ## Hash domains
//!
//! - [`ReducedHash`] - SHA3-256 of the reduced payload. Batching-stable identity.
//! - [`TxHash`] - SHA3-256 of the payload envelope. Used for status lookups.
//! - [`BlockHash`] - SHA3-256 of a block payload.
//! - [`QueryHash`] - SHA3-256 of a query payload.
//!
//! All of them are computed over the canonical CBOR bytes produced by the
//! [`canonical`] module.
//!
//! ## Batches
//!
//! ```rust
//! use txseal_core::{create_tx_atomic_batch, Command, Keypair, ReducedPayload, TransactionBuilder};
//!
//! let keypair = Keypair::generate();
//! let tx = TransactionBuilder::new(ReducedPayload {
//!     creator_account_id: "alice@test".into(),
//!     created_time: 1_736_870_400_000,
//!     quorum: 1,
//!     commands: vec![Command::AddAssetQuantity {
//!         asset_id: "coin#test".into(),
//!         amount: "1.00".into(),
//!     }],
//! })
//! .build();
//!
//! let batch = create_tx_atomic_batch(vec![tx], &keypair).unwrap();
//! assert_eq!(batch[0].batch_meta().unwrap().reduced_hashes.len(), 1);
//! ```

pub mod batch;
pub mod block;
pub mod canonical;
pub mod crypto;
pub mod digest;
pub mod endpoint;
pub mod error;
pub mod hex_codec;
pub mod keys;
pub mod query;
pub mod signer;
pub mod transaction;

pub use batch::{
    batch_hashes_hex, create_batch, create_tx_atomic_batch, create_tx_ordered_batch,
    BatchAssembler, BatchConfig, SignaturePolicy,
};
pub use block::{Block, BlockPayload, BlockV1};
pub use crypto::{Ed25519PrivateKey, Ed25519PublicKey, Ed25519Signature, Keypair};
pub use digest::{
    block_hash, block_v1_hash, encoded_block_hash, payload_hash, query_hash, reduced_hash,
    reduced_payload_hash, sha3_256, transaction_hash, BlockHash, Hashable, QueryHash,
    ReducedHash, TxHash,
};
pub use endpoint::{create_tx_list, create_tx_status_request, TxList, TxStatusRequest};
pub use error::{Error, Result};
pub use hex_codec::{from_hex, to_hex};
pub use keys::{parse_hex_keypair, parse_hex_private_key, parse_hex_public_key};
pub use query::{Query, QueryKind, QueryPayload};
pub use signer::{sign, sign_hash, Signature};
pub use transaction::{
    BatchMeta, BatchType, Command, Payload, ReducedPayload, Transaction, TransactionBuilder,
};
