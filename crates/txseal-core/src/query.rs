//! Queries: signed read requests against the ledger.

use serde::{Deserialize, Serialize};

use crate::crypto::Keypair;
use crate::signer::{sign, Signature};

/// What a query asks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryKind {
    GetAccount {
        account_id: String,
    },
    GetAccountAssets {
        account_id: String,
    },
    GetSignatories {
        account_id: String,
    },
    /// Look up transactions by uppercase hex [`crate::TxHash`].
    GetTransactions {
        tx_hashes: Vec<String>,
    },
    GetBlock {
        height: u64,
    },
}

impl QueryKind {
    /// Wire tag of this query kind.
    pub fn tag(&self) -> u64 {
        match self {
            QueryKind::GetAccount { .. } => 1,
            QueryKind::GetAccountAssets { .. } => 2,
            QueryKind::GetSignatories { .. } => 3,
            QueryKind::GetTransactions { .. } => 4,
            QueryKind::GetBlock { .. } => 5,
        }
    }
}

/// The signed part of a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryPayload {
    pub creator_account_id: String,

    /// Creation time (Unix milliseconds).
    pub created_time: u64,

    /// Per-creator counter distinguishing otherwise identical queries.
    pub query_counter: u64,

    pub kind: QueryKind,
}

/// A query and its single optional signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub payload: QueryPayload,
    pub signature: Option<Signature>,
}

impl Query {
    /// Create an unsigned query.
    pub fn new(payload: QueryPayload) -> Self {
        Self {
            payload,
            signature: None,
        }
    }

    /// Sign the query hash, replacing any previous signature.
    pub fn sign(mut self, keypair: &Keypair) -> Self {
        self.signature = Some(sign(&self, keypair));
        self
    }
}
