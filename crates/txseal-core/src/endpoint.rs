//! Request shapes handed to the transport layer.

use serde::{Deserialize, Serialize};

use crate::digest::TxHash;
use crate::transaction::Transaction;

/// Status lookup for one transaction, keyed by its full-payload hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxStatusRequest {
    /// Uppercase hex [`TxHash`].
    pub tx_hash: String,
}

/// Transactions submitted together, typically one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxList {
    pub transactions: Vec<Transaction>,
}

/// Build a status request for a transaction hash.
pub fn create_tx_status_request(hash: &TxHash) -> TxStatusRequest {
    TxStatusRequest {
        tx_hash: hash.to_hex(),
    }
}

/// Collect transactions into a list, preserving order.
pub fn create_tx_list(transactions: impl IntoIterator<Item = Transaction>) -> TxList {
    TxList {
        transactions: transactions.into_iter().collect(),
    }
}
