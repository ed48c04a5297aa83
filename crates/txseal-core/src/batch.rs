//! Batch assembly.
//!
//! A batch is a list of transactions that each carry the same [`BatchMeta`]:
//! the batch type plus the reduced hash of every member, in order. Reduced
//! hashes are used because they do not change when the metadata itself is
//! attached. After the metadata is set each member is signed again, since its
//! full-payload hash has changed.
//!
//! [`BatchMeta`]: crate::transaction::BatchMeta

use tracing::{debug, trace};

use crate::crypto::Keypair;
use crate::digest::reduced_hash;
use crate::error::{Error, Result};
use crate::transaction::{BatchType, Transaction, TransactionBuilder};

/// What happens to signatures a transaction carried before it was batched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SignaturePolicy {
    /// Keep them and append the batch signature.
    #[default]
    Append,
    /// Drop them. They cover the pre-batch payload hash.
    Replace,
}

/// Configuration for batch assembly.
#[derive(Debug, Clone, Default)]
pub struct BatchConfig {
    /// Largest accepted batch. `None` means unbounded.
    pub max_transactions: Option<usize>,
    pub signature_policy: SignaturePolicy,
}

/// Assembles ORDERED and ATOMIC batches under a [`BatchConfig`].
#[derive(Debug, Clone, Default)]
pub struct BatchAssembler {
    config: BatchConfig,
}

impl BatchAssembler {
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Stamp every transaction with the shared batch metadata and sign it.
    ///
    /// Output order matches input order. Nothing is rebuilt unless every
    /// precondition holds, so an error never leaves a partial batch.
    pub fn assemble(
        &self,
        transactions: impl IntoIterator<Item = Transaction>,
        batch_type: BatchType,
        keypair: &Keypair,
    ) -> Result<Vec<Transaction>> {
        let transactions: Vec<Transaction> = transactions.into_iter().collect();
        self.check_size(transactions.len())?;

        let hashes = batch_hashes_hex(&transactions);
        debug!(
            ?batch_type,
            size = transactions.len(),
            signer = %keypair.public_key().to_hex(),
            "assembling batch"
        );

        let batch = transactions
            .into_iter()
            .map(|tx| {
                let mut builder = TransactionBuilder::from_transaction(tx)
                    .set_batch_meta(batch_type, hashes.iter().cloned());
                if self.config.signature_policy == SignaturePolicy::Replace {
                    builder = builder.clear_signatures();
                }
                builder.sign(keypair).build()
            })
            .collect();
        Ok(batch)
    }

    fn check_size(&self, size: usize) -> Result<()> {
        if size == 0 {
            return Err(Error::EmptyBatch);
        }
        if let Some(limit) = self.config.max_transactions {
            if size > limit {
                return Err(Error::BatchTooLarge { size, limit });
            }
        }
        Ok(())
    }
}

/// Uppercase hex reduced hash of each transaction, in order.
pub fn batch_hashes_hex(transactions: &[Transaction]) -> Vec<String> {
    transactions
        .iter()
        .map(|tx| {
            let hash = reduced_hash(tx);
            trace!(reduced_hash = %hash, "batch member");
            hash.to_hex()
        })
        .collect()
}

/// Assemble a batch with the default configuration.
pub fn create_batch(
    transactions: impl IntoIterator<Item = Transaction>,
    batch_type: BatchType,
    keypair: &Keypair,
) -> Result<Vec<Transaction>> {
    BatchAssembler::default().assemble(transactions, batch_type, keypair)
}

/// Assemble an ORDERED batch.
pub fn create_tx_ordered_batch(
    transactions: impl IntoIterator<Item = Transaction>,
    keypair: &Keypair,
) -> Result<Vec<Transaction>> {
    create_batch(transactions, BatchType::Ordered, keypair)
}

/// Assemble an ATOMIC batch.
pub fn create_tx_atomic_batch(
    transactions: impl IntoIterator<Item = Transaction>,
    keypair: &Keypair,
) -> Result<Vec<Transaction>> {
    create_batch(transactions, BatchType::Atomic, keypair)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::{Command, ReducedPayload};

    fn tx(creator: &str, amount: &str) -> Transaction {
        TransactionBuilder::new(ReducedPayload {
            creator_account_id: creator.into(),
            created_time: 1_736_870_400_000,
            quorum: 1,
            commands: vec![Command::AddAssetQuantity {
                asset_id: "coin#test".into(),
                amount: amount.into(),
            }],
        })
        .build()
    }

    fn keypair() -> Keypair {
        Keypair::from_seed(&[0x42; 32])
    }

    #[test]
    fn test_atomic_pair() {
        let a = tx("alice@test", "1");
        let b = tx("bob@test", "2");
        let expected = vec![reduced_hash(&a).to_hex(), reduced_hash(&b).to_hex()];

        let batch = create_tx_atomic_batch(vec![a, b], &keypair()).unwrap();
        assert_eq!(batch.len(), 2);
        for member in &batch {
            let meta = member.batch_meta().unwrap();
            assert_eq!(meta.batch_type, BatchType::Atomic);
            assert_eq!(meta.reduced_hashes, expected);
        }
        assert_eq!(batch[0].creator_account_id(), "alice@test");
        assert_eq!(batch[1].creator_account_id(), "bob@test");
    }

    #[test]
    fn test_single_ordered() {
        let a = tx("alice@test", "1");
        let expected = vec![reduced_hash(&a).to_hex()];

        let batch = create_tx_ordered_batch(vec![a], &keypair()).unwrap();
        assert_eq!(batch.len(), 1);
        let meta = batch[0].batch_meta().unwrap();
        assert_eq!(meta.batch_type, BatchType::Ordered);
        assert_eq!(meta.reduced_hashes, expected);
    }

    #[test]
    fn test_empty_batch_rejected() {
        let err = create_tx_ordered_batch(Vec::new(), &keypair()).unwrap_err();
        assert!(matches!(err, Error::EmptyBatch));
    }

    #[test]
    fn test_batch_limit() {
        let assembler = BatchAssembler::new(BatchConfig {
            max_transactions: Some(1),
            ..BatchConfig::default()
        });
        let err = assembler
            .assemble(
                vec![tx("a@test", "1"), tx("b@test", "2")],
                BatchType::Atomic,
                &keypair(),
            )
            .unwrap_err();
        assert!(matches!(err, Error::BatchTooLarge { size: 2, limit: 1 }));
    }

    #[test]
    fn test_batch_signature_covers_batched_payload() {
        let kp = keypair();
        let batch = create_tx_atomic_batch(
            vec![tx("alice@test", "1"), tx("bob@test", "2")],
            &kp,
        )
        .unwrap();
        for member in &batch {
            assert_eq!(member.signatures.len(), 1);
            member.signatures[0].verify(member.hash().as_bytes()).unwrap();
        }
    }

    #[test]
    fn test_signature_policy() {
        let kp = keypair();
        let presigned = TransactionBuilder::from_transaction(tx("alice@test", "1"))
            .sign(&kp)
            .build();

        let appended = create_tx_atomic_batch(vec![presigned.clone()], &kp).unwrap();
        assert_eq!(appended[0].signatures.len(), 2);
        assert_eq!(appended[0].signatures[0], presigned.signatures[0]);

        let replaced = BatchAssembler::new(BatchConfig {
            signature_policy: SignaturePolicy::Replace,
            ..BatchConfig::default()
        })
        .assemble(vec![presigned], BatchType::Atomic, &kp)
        .unwrap();
        assert_eq!(replaced[0].signatures.len(), 1);
        replaced[0].signatures[0]
            .verify(replaced[0].hash().as_bytes())
            .unwrap();
    }

    #[test]
    fn test_duplicates_kept() {
        let a = tx("alice@test", "1");
        let batch = create_tx_ordered_batch(vec![a.clone(), a], &keypair()).unwrap();
        assert_eq!(batch.len(), 2);
        let meta = batch[0].batch_meta().unwrap();
        assert_eq!(meta.reduced_hashes[0], meta.reduced_hashes[1]);
        assert_eq!(batch[0], batch[1]);
    }

    #[test]
    fn test_rebatching_overwrites_meta() {
        let kp = keypair();
        let first = create_tx_atomic_batch(vec![tx("a@test", "1"), tx("b@test", "2")], &kp)
            .unwrap();
        let second = create_tx_ordered_batch(vec![first[0].clone()], &kp).unwrap();
        let meta = second[0].batch_meta().unwrap();
        assert_eq!(meta.batch_type, BatchType::Ordered);
        assert_eq!(meta.reduced_hashes, vec![first[0].reduced_hash().to_hex()]);
    }
}
