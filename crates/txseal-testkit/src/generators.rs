//! Proptest generators for property-based testing.

use proptest::prelude::*;

use txseal_core::{
    BatchType, Command, Keypair, ReducedPayload, Transaction, TransactionBuilder,
};

/// Generate a random keypair.
pub fn keypair() -> impl Strategy<Value = Keypair> {
    any::<[u8; 32]>().prop_map(|seed| Keypair::from_seed(&seed))
}

/// Generate an account id of the form `name@domain`.
pub fn account_id() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,15}@[a-z][a-z0-9]{0,7}".prop_map(String::from)
}

/// Generate a decimal amount.
pub fn amount() -> impl Strategy<Value = String> {
    (0u64..1_000_000, 0u8..100).prop_map(|(whole, cents)| format!("{whole}.{cents:02}"))
}

/// Generate an asset id of the form `name#domain`.
pub fn asset_id() -> impl Strategy<Value = String> {
    "[a-z]{1,8}#[a-z]{1,8}".prop_map(String::from)
}

/// Generate a ledger command.
pub fn command() -> impl Strategy<Value = Command> {
    prop_oneof![
        (asset_id(), amount())
            .prop_map(|(asset_id, amount)| Command::AddAssetQuantity { asset_id, amount }),
        (asset_id(), amount())
            .prop_map(|(asset_id, amount)| Command::SubtractAssetQuantity { asset_id, amount }),
        (account_id(), account_id(), asset_id(), ".{0,32}", amount()).prop_map(
            |(src_account_id, dest_account_id, asset_id, description, amount)| {
                Command::TransferAsset {
                    src_account_id,
                    dest_account_id,
                    asset_id,
                    description,
                    amount,
                }
            }
        ),
        ("[a-z]{1,16}", "[a-z]{1,8}", any::<[u8; 32]>()).prop_map(
            |(account_name, domain_id, key)| Command::CreateAccount {
                account_name,
                domain_id,
                public_key: hex::encode_upper(key),
            }
        ),
        (account_id(), "[a-z]{1,16}", ".{0,64}").prop_map(|(account_id, key, value)| {
            Command::SetAccountDetail {
                account_id,
                key,
                value,
            }
        }),
        (account_id(), any::<[u8; 32]>()).prop_map(|(account_id, key)| Command::AddSignatory {
            account_id,
            public_key: hex::encode_upper(key),
        }),
    ]
}

/// Generate a batch type.
pub fn batch_type() -> impl Strategy<Value = BatchType> {
    prop_oneof![Just(BatchType::Atomic), Just(BatchType::Ordered)]
}

/// Generate a reduced payload with up to `max_commands` commands.
pub fn reduced_payload(max_commands: usize) -> impl Strategy<Value = ReducedPayload> {
    (
        account_id(),
        0u64..=1_800_000_000_000u64,
        1u32..=8u32,
        prop::collection::vec(command(), 0..=max_commands),
    )
        .prop_map(
            |(creator_account_id, created_time, quorum, commands)| ReducedPayload {
                creator_account_id,
                created_time,
                quorum,
                commands,
            },
        )
}

/// Generate an unsigned, unbatched transaction.
pub fn transaction() -> impl Strategy<Value = Transaction> {
    reduced_payload(4).prop_map(|rp| TransactionBuilder::new(rp).build())
}

/// Generate between 1 and `max_len` unsigned transactions.
pub fn transactions(max_len: usize) -> impl Strategy<Value = Vec<Transaction>> {
    prop::collection::vec(transaction(), 1..=max_len.max(1))
}

/// Parameters for generating a transaction, optionally pre-signed.
#[derive(Debug, Clone)]
pub struct TransactionParams {
    pub reduced_payload: ReducedPayload,
    pub presign_seed: Option<[u8; 32]>,
}

impl Arbitrary for TransactionParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (reduced_payload(4), any::<Option<[u8; 32]>>())
            .prop_map(|(reduced_payload, presign_seed)| TransactionParams {
                reduced_payload,
                presign_seed,
            })
            .boxed()
    }
}

/// Build a transaction from parameters.
pub fn transaction_from_params(params: &TransactionParams) -> Transaction {
    let builder = TransactionBuilder::new(params.reduced_payload.clone());
    match params.presign_seed {
        Some(seed) => builder.sign(&Keypair::from_seed(&seed)).build(),
        None => builder.build(),
    }
}
