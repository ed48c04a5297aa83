//! Test fixtures and helpers.

use txseal_core::{
    Command, Keypair, Query, QueryKind, QueryPayload, ReducedPayload, Transaction,
    TransactionBuilder,
};

/// An account with a keypair, able to build and sign transactions.
pub struct TestFixture {
    pub account_id: String,
    pub keypair: Keypair,
}

impl TestFixture {
    /// Create a fixture with a random keypair.
    pub fn new(account_id: &str) -> Self {
        Self {
            account_id: account_id.to_string(),
            keypair: Keypair::generate(),
        }
    }

    /// Create a fixture with a deterministic keypair.
    pub fn with_seed(account_id: &str, seed: [u8; 32]) -> Self {
        Self {
            account_id: account_id.to_string(),
            keypair: Keypair::from_seed(&seed),
        }
    }

    /// Uppercase hex public key.
    pub fn public_key_hex(&self) -> String {
        self.keypair.public_key().to_hex()
    }

    /// An unsigned reduced payload created by this account.
    pub fn reduced_payload(&self, commands: Vec<Command>, created_time: u64) -> ReducedPayload {
        ReducedPayload {
            creator_account_id: self.account_id.clone(),
            created_time,
            quorum: 1,
            commands,
        }
    }

    /// An unsigned, unbatched transaction.
    pub fn make_transaction(&self, commands: Vec<Command>, created_time: u64) -> Transaction {
        TransactionBuilder::new(self.reduced_payload(commands, created_time)).build()
    }

    /// A transaction signed by this account.
    pub fn make_signed_transaction(&self, commands: Vec<Command>, created_time: u64) -> Transaction {
        TransactionBuilder::new(self.reduced_payload(commands, created_time))
            .sign(&self.keypair)
            .build()
    }

    /// An unsigned transfer from this account.
    pub fn make_transfer(&self, dest_account_id: &str, amount: &str, created_time: u64) -> Transaction {
        self.make_transaction(
            vec![Command::TransferAsset {
                src_account_id: self.account_id.clone(),
                dest_account_id: dest_account_id.to_string(),
                asset_id: "coin#test".to_string(),
                description: String::new(),
                amount: amount.to_string(),
            }],
            created_time,
        )
    }

    /// A signed account lookup.
    pub fn make_query(&self, account_id: &str, query_counter: u64) -> Query {
        Query::new(QueryPayload {
            creator_account_id: self.account_id.clone(),
            created_time: now_millis(),
            query_counter,
            kind: QueryKind::GetAccount {
                account_id: account_id.to_string(),
            },
        })
        .sign(&self.keypair)
    }
}

/// Create `n` fixtures with deterministic seeds and accounts `user{i}@test`.
///
/// Seeds encode the low 16 bits of `i`, so keys repeat once `n > 65536`.
pub fn multi_party_fixtures(n: usize) -> Vec<TestFixture> {
    (0..n)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[0] = i as u8;
            seed[1] = (i >> 8) as u8;
            seed[31] = 0xff;
            TestFixture::with_seed(&format!("user{i}@test"), seed)
        })
        .collect()
}

/// Current time in Unix milliseconds.
pub fn now_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
