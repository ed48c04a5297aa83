//! Property tests for hashing and batch assembly.

use proptest::prelude::*;

use txseal_core::{
    canonical::{decode_transaction, encode_transaction},
    create_batch, reduced_hash, transaction_hash, BatchAssembler, BatchConfig, SignaturePolicy,
    TransactionBuilder,
};
use txseal_testkit::generators::{batch_type, keypair, reduced_payload, transactions};
use txseal_testkit::{transaction_from_params, TransactionParams};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn hashes_are_deterministic(params in any::<TransactionParams>()) {
        let a = transaction_from_params(&params);
        let b = transaction_from_params(&params);
        prop_assert_eq!(reduced_hash(&a), reduced_hash(&b));
        prop_assert_eq!(transaction_hash(&a), transaction_hash(&b));
    }

    #[test]
    fn signatures_do_not_affect_hashes(rp in reduced_payload(4), kp in keypair()) {
        let unsigned = TransactionBuilder::new(rp.clone()).build();
        let signed = TransactionBuilder::new(rp).sign(&kp).build();
        prop_assert_eq!(unsigned.reduced_hash(), signed.reduced_hash());
        prop_assert_eq!(unsigned.hash(), signed.hash());
    }

    #[test]
    fn reduced_and_full_hash_domains_differ(params in any::<TransactionParams>()) {
        let tx = transaction_from_params(&params);
        let (reduced, full) = (tx.reduced_hash(), tx.hash());
        prop_assert_ne!(reduced.as_bytes(), full.as_bytes());
    }

    #[test]
    fn batch_members_share_metadata(txs in transactions(6), bt in batch_type(), kp in keypair()) {
        let expected: Vec<String> = txs.iter().map(|tx| tx.reduced_hash().to_hex()).collect();
        let batch = create_batch(txs, bt, &kp).unwrap();

        prop_assert_eq!(batch.len(), expected.len());
        for (member, reduced) in batch.iter().zip(&expected) {
            let meta = member.batch_meta().unwrap();
            prop_assert_eq!(meta.batch_type, bt);
            prop_assert_eq!(&meta.reduced_hashes, &expected);
            // Attaching metadata leaves the reduced hash alone.
            prop_assert_eq!(&member.reduced_hash().to_hex(), reduced);
        }
    }

    #[test]
    fn batch_signature_covers_batched_hash(txs in transactions(4), bt in batch_type(), kp in keypair()) {
        let unbatched: Vec<_> = txs.iter().map(|tx| tx.hash()).collect();
        let batch = create_batch(txs, bt, &kp).unwrap();

        for (member, before) in batch.iter().zip(&unbatched) {
            let hash = member.hash();
            prop_assert_ne!(&hash, before);
            let last = member.signatures.last().unwrap();
            prop_assert_eq!(&last.public_key, &kp.public_key().to_hex());
            prop_assert!(last.verify(hash.as_bytes()).is_ok());
            prop_assert!(last.verify(before.as_bytes()).is_err());
        }
    }

    #[test]
    fn replace_policy_leaves_one_signature(params in prop::collection::vec(any::<TransactionParams>(), 1..4), kp in keypair()) {
        let txs: Vec<_> = params.iter().map(transaction_from_params).collect();
        let assembler = BatchAssembler::new(BatchConfig {
            max_transactions: None,
            signature_policy: SignaturePolicy::Replace,
        });
        let batch = assembler.assemble(txs, txseal_core::BatchType::Atomic, &kp).unwrap();
        for member in &batch {
            prop_assert_eq!(member.signatures.len(), 1);
        }
    }

    #[test]
    fn decoded_batch_member_keeps_its_hash(txs in transactions(3), bt in batch_type(), kp in keypair()) {
        for member in create_batch(txs, bt, &kp).unwrap() {
            let decoded = decode_transaction(&encode_transaction(&member)).unwrap();
            prop_assert_eq!(decoded.hash(), member.hash());
            prop_assert_eq!(decoded, member);
        }
    }
}
