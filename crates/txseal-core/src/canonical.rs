//! Canonical CBOR encoding of transactions, blocks and queries.
//!
//! Every structure is a CBOR map with small integer keys, written with
//! RFC 8949 core deterministic rules:
//! - Map keys sorted by encoded byte comparison
//! - Integers use the smallest valid encoding
//! - Definite lengths only
//! - Absent optional fields are encoded as null, never omitted
//!
//! Hashes are computed over these bytes, so the layout is frozen. Changing a
//! key or a tag changes every hash and invalidates every signature.

use ciborium::value::{Integer, Value};
use std::io::Cursor;

use crate::block::{Block, BlockPayload, BlockV1, BLOCK_V1_TAG};
use crate::endpoint::TxList;
use crate::error::{Error, Result};
use crate::query::{Query, QueryKind, QueryPayload};
use crate::signer::Signature;
use crate::transaction::{BatchMeta, BatchType, Command, Payload, ReducedPayload, Transaction};

/// Map keys. Keys 0-23 encode as a single byte.
mod keys {
    pub mod reduced {
        pub const CREATOR: u64 = 0;
        pub const CREATED_TIME: u64 = 1;
        pub const QUORUM: u64 = 2;
        pub const COMMANDS: u64 = 3;
    }

    pub mod payload {
        pub const REDUCED: u64 = 0;
        pub const BATCH: u64 = 1;
    }

    pub mod batch {
        pub const TYPE: u64 = 0;
        pub const HASHES: u64 = 1;
    }

    pub mod signature {
        pub const SIGNATURE: u64 = 0;
        pub const PUBLIC_KEY: u64 = 1;
    }

    pub mod tx {
        pub const PAYLOAD: u64 = 0;
        pub const SIGNATURES: u64 = 1;
    }

    pub mod block_payload {
        pub const HEIGHT: u64 = 0;
        pub const PREV_BLOCK_HASH: u64 = 1;
        pub const CREATED_TIME: u64 = 2;
        pub const TRANSACTIONS: u64 = 3;
        pub const REJECTED: u64 = 4;
    }

    pub mod block_v1 {
        pub const PAYLOAD: u64 = 0;
        pub const SIGNATURES: u64 = 1;
    }

    pub mod block {
        pub const VERSION: u64 = 0;
        pub const BODY: u64 = 1;
    }

    pub mod query_payload {
        pub const CREATOR: u64 = 0;
        pub const CREATED_TIME: u64 = 1;
        pub const COUNTER: u64 = 2;
        pub const KIND: u64 = 3;
    }

    pub mod query {
        pub const PAYLOAD: u64 = 0;
        pub const SIGNATURE: u64 = 1;
    }

    pub mod tx_list {
        pub const TRANSACTIONS: u64 = 0;
    }

    /// Key of the variant tag inside a tagged-union map. Fields follow from 1.
    pub const TAG: u64 = 0;
}

/// Command wire tags.
mod command_tags {
    pub const ADD_ASSET_QUANTITY: u64 = 1;
    pub const SUBTRACT_ASSET_QUANTITY: u64 = 2;
    pub const TRANSFER_ASSET: u64 = 3;
    pub const CREATE_ACCOUNT: u64 = 4;
    pub const SET_ACCOUNT_DETAIL: u64 = 5;
    pub const ADD_SIGNATORY: u64 = 6;
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Encode a reduced payload.
pub fn encode_reduced_payload(reduced_payload: &ReducedPayload) -> Vec<u8> {
    encode_cbor_value_canonical(&reduced_payload_value(reduced_payload))
}

/// Encode a payload envelope.
pub fn encode_payload(payload: &Payload) -> Vec<u8> {
    encode_cbor_value_canonical(&payload_value(payload))
}

/// Encode a full transaction, signatures included.
pub fn encode_transaction(tx: &Transaction) -> Vec<u8> {
    encode_cbor_value_canonical(&transaction_value(tx))
}

/// Encode a block payload.
pub fn encode_block_payload(payload: &BlockPayload) -> Vec<u8> {
    encode_cbor_value_canonical(&block_payload_value(payload))
}

/// Encode a versioned block.
pub fn encode_block(block: &Block) -> Vec<u8> {
    encode_cbor_value_canonical(&block_value(block))
}

/// Encode a query payload.
pub fn encode_query_payload(payload: &QueryPayload) -> Vec<u8> {
    encode_cbor_value_canonical(&query_payload_value(payload))
}

/// Encode a query with its signature.
pub fn encode_query(query: &Query) -> Vec<u8> {
    encode_cbor_value_canonical(&query_value(query))
}

/// Encode a transaction list.
pub fn encode_tx_list(list: &TxList) -> Vec<u8> {
    let value = map(vec![(
        keys::tx_list::TRANSACTIONS,
        Value::Array(list.transactions.iter().map(transaction_value).collect()),
    )]);
    encode_cbor_value_canonical(&value)
}

fn uint(n: impl Into<u64>) -> Value {
    let n: u64 = n.into();
    Value::Integer(n.into())
}

fn text(s: &str) -> Value {
    Value::Text(s.to_owned())
}

fn texts(items: &[String]) -> Value {
    Value::Array(items.iter().map(|s| text(s)).collect())
}

fn map(entries: Vec<(u64, Value)>) -> Value {
    Value::Map(
        entries
            .into_iter()
            .map(|(k, v)| (uint(k), v))
            .collect(),
    )
}

/// A tagged-union map: the tag under key 0, then fields under keys 1, 2, ...
fn tagged(tag: u64, fields: &[&String]) -> Value {
    let mut entries = Vec::with_capacity(fields.len() + 1);
    entries.push((keys::TAG, uint(tag)));
    for (i, field) in fields.iter().enumerate() {
        entries.push((i as u64 + 1, text(field)));
    }
    map(entries)
}

fn command_value(command: &Command) -> Value {
    use self::command_tags::*;

    match command {
        Command::AddAssetQuantity { asset_id, amount } => {
            tagged(ADD_ASSET_QUANTITY, &[asset_id, amount])
        }
        Command::SubtractAssetQuantity { asset_id, amount } => {
            tagged(SUBTRACT_ASSET_QUANTITY, &[asset_id, amount])
        }
        Command::TransferAsset {
            src_account_id,
            dest_account_id,
            asset_id,
            description,
            amount,
        } => tagged(
            TRANSFER_ASSET,
            &[src_account_id, dest_account_id, asset_id, description, amount],
        ),
        Command::CreateAccount {
            account_name,
            domain_id,
            public_key,
        } => tagged(CREATE_ACCOUNT, &[account_name, domain_id, public_key]),
        Command::SetAccountDetail {
            account_id,
            key,
            value,
        } => tagged(SET_ACCOUNT_DETAIL, &[account_id, key, value]),
        Command::AddSignatory {
            account_id,
            public_key,
        } => tagged(ADD_SIGNATORY, &[account_id, public_key]),
    }
}

fn reduced_payload_value(reduced: &ReducedPayload) -> Value {
    use self::keys::reduced::*;

    map(vec![
        (CREATOR, text(&reduced.creator_account_id)),
        (CREATED_TIME, uint(reduced.created_time)),
        (QUORUM, uint(reduced.quorum)),
        (
            COMMANDS,
            Value::Array(reduced.commands.iter().map(command_value).collect()),
        ),
    ])
}

fn batch_value(batch: &BatchMeta) -> Value {
    map(vec![
        (keys::batch::TYPE, uint(batch.batch_type.to_u8())),
        (keys::batch::HASHES, texts(&batch.reduced_hashes)),
    ])
}

fn payload_value(payload: &Payload) -> Value {
    let batch = match &payload.batch {
        Some(meta) => batch_value(meta),
        None => Value::Null,
    };
    map(vec![
        (keys::payload::REDUCED, reduced_payload_value(&payload.reduced_payload)),
        (keys::payload::BATCH, batch),
    ])
}

fn signature_value(signature: &Signature) -> Value {
    map(vec![
        (keys::signature::SIGNATURE, text(&signature.signature)),
        (keys::signature::PUBLIC_KEY, text(&signature.public_key)),
    ])
}

fn signatures_value(signatures: &[Signature]) -> Value {
    Value::Array(signatures.iter().map(signature_value).collect())
}

fn transaction_value(tx: &Transaction) -> Value {
    map(vec![
        (keys::tx::PAYLOAD, payload_value(&tx.payload)),
        (keys::tx::SIGNATURES, signatures_value(&tx.signatures)),
    ])
}

fn block_payload_value(payload: &BlockPayload) -> Value {
    use self::keys::block_payload::*;

    map(vec![
        (HEIGHT, uint(payload.height)),
        (PREV_BLOCK_HASH, text(&payload.prev_block_hash)),
        (CREATED_TIME, uint(payload.created_time)),
        (
            TRANSACTIONS,
            Value::Array(payload.transactions.iter().map(transaction_value).collect()),
        ),
        (REJECTED, texts(&payload.rejected_transactions_hashes)),
    ])
}

fn block_value(block: &Block) -> Value {
    let body = match block {
        Block::V1(v1) => map(vec![
            (keys::block_v1::PAYLOAD, block_payload_value(&v1.payload)),
            (keys::block_v1::SIGNATURES, signatures_value(&v1.signatures)),
        ]),
    };
    map(vec![
        (keys::block::VERSION, uint(block.version_tag())),
        (keys::block::BODY, body),
    ])
}

fn query_kind_value(kind: &QueryKind) -> Value {
    let field = match kind {
        QueryKind::GetAccount { account_id }
        | QueryKind::GetAccountAssets { account_id }
        | QueryKind::GetSignatories { account_id } => text(account_id),
        QueryKind::GetTransactions { tx_hashes } => texts(tx_hashes),
        QueryKind::GetBlock { height } => uint(*height),
    };
    map(vec![(keys::TAG, uint(kind.tag())), (1, field)])
}

fn query_payload_value(payload: &QueryPayload) -> Value {
    use self::keys::query_payload::*;

    map(vec![
        (CREATOR, text(&payload.creator_account_id)),
        (CREATED_TIME, uint(payload.created_time)),
        (COUNTER, uint(payload.query_counter)),
        (KIND, query_kind_value(&payload.kind)),
    ])
}

fn query_value(query: &Query) -> Value {
    let signature = match &query.signature {
        Some(sig) => signature_value(sig),
        None => Value::Null,
    };
    map(vec![
        (keys::query::PAYLOAD, query_payload_value(&query.payload)),
        (keys::query::SIGNATURE, signature),
    ])
}

/// Encode a CBOR Value to canonical bytes.
fn encode_cbor_value_canonical(value: &Value) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_value_to(&mut buf, value);
    buf
}

fn encode_value_to(buf: &mut Vec<u8>, value: &Value) {
    match value {
        Value::Integer(i) => encode_integer(buf, *i),
        Value::Bytes(b) => {
            encode_head(buf, 2, b.len() as u64);
            buf.extend_from_slice(b);
        }
        Value::Text(s) => {
            encode_head(buf, 3, s.len() as u64);
            buf.extend_from_slice(s.as_bytes());
        }
        Value::Array(items) => {
            encode_head(buf, 4, items.len() as u64);
            for item in items {
                encode_value_to(buf, item);
            }
        }
        Value::Map(entries) => encode_map_canonical(buf, entries),
        Value::Bool(b) => buf.push(if *b { 0xf5 } else { 0xf4 }),
        Value::Null => buf.push(0xf6),
        // The `*_value` builders above only emit integers, text, arrays,
        // maps and null.
        _ => unreachable!("unsupported CBOR value in canonical encoding"),
    }
}

/// Major types 0 and 1.
fn encode_integer(buf: &mut Vec<u8>, i: Integer) {
    let n: i128 = i.into();
    if n >= 0 {
        encode_head(buf, 0, n as u64);
    } else {
        // CBOR encodes -1 as 0, -2 as 1, etc.
        encode_head(buf, 1, (-1 - n) as u64);
    }
}

/// Write a major type with its argument in the smallest encoding.
fn encode_head(buf: &mut Vec<u8>, major: u8, n: u64) {
    let mt = major << 5;
    if n < 24 {
        buf.push(mt | n as u8);
    } else if n <= u8::MAX as u64 {
        buf.push(mt | 24);
        buf.push(n as u8);
    } else if n <= u16::MAX as u64 {
        buf.push(mt | 25);
        buf.extend_from_slice(&(n as u16).to_be_bytes());
    } else if n <= u32::MAX as u64 {
        buf.push(mt | 26);
        buf.extend_from_slice(&(n as u32).to_be_bytes());
    } else {
        buf.push(mt | 27);
        buf.extend_from_slice(&n.to_be_bytes());
    }
}

/// Major type 5, keys sorted by their encoded bytes.
fn encode_map_canonical(buf: &mut Vec<u8>, entries: &[(Value, Value)]) {
    let mut pairs: Vec<(Vec<u8>, &Value)> = entries
        .iter()
        .map(|(k, v)| (encode_cbor_value_canonical(k), v))
        .collect();
    pairs.sort_by(|a, b| a.0.cmp(&b.0));

    encode_head(buf, 5, pairs.len() as u64);
    for (key_bytes, value) in pairs {
        buf.extend_from_slice(&key_bytes);
        encode_value_to(buf, value);
    }
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Decode a transaction from canonical bytes.
pub fn decode_transaction(bytes: &[u8]) -> Result<Transaction> {
    transaction_from_value(&read_value(bytes)?)
}

/// Decode a versioned block from canonical bytes.
///
/// The version tag is checked before the body, so an unknown version fails
/// with `UnsupportedVariant` whatever its body looks like.
pub fn decode_block(bytes: &[u8]) -> Result<Block> {
    let value = read_value(bytes)?;
    let fields = Fields::of(&value, "block")?;

    let tag = match fields.get(keys::block::VERSION) {
        Some(_) => fields.uint(keys::block::VERSION, "block version")?,
        None => 0,
    };
    match tag {
        BLOCK_V1_TAG => {
            let body = fields.required(keys::block::BODY, "block body")?;
            let body = Fields::of(body, "block body")?;
            let payload = block_payload_from_value(
                body.required(keys::block_v1::PAYLOAD, "block payload")?,
            )?;
            let signatures = signatures_from_value(
                body.required(keys::block_v1::SIGNATURES, "block signatures")?,
            )?;
            Ok(Block::V1(BlockV1 {
                payload,
                signatures,
            }))
        }
        other => {
            tracing::warn!(tag = other, "block has undefined version");
            Err(Error::UnsupportedVariant {
                kind: "block",
                tag: other,
            })
        }
    }
}

/// Decode a transaction list from canonical bytes.
pub fn decode_tx_list(bytes: &[u8]) -> Result<TxList> {
    let value = read_value(bytes)?;
    let fields = Fields::of(&value, "tx list")?;
    let transactions = fields
        .array(keys::tx_list::TRANSACTIONS, "tx list transactions")?
        .iter()
        .map(transaction_from_value)
        .collect::<Result<Vec<_>>>()?;
    Ok(TxList { transactions })
}

/// Parse exactly one CBOR item, rejecting trailing bytes.
fn read_value(bytes: &[u8]) -> Result<Value> {
    let mut cursor = Cursor::new(bytes);
    let value: Value = ciborium::from_reader(&mut cursor).map_err(|e| {
        tracing::warn!(error = %e, "failed to parse canonical bytes");
        Error::Malformed(e.to_string())
    })?;
    if cursor.position() as usize != bytes.len() {
        return Err(Error::Malformed("trailing bytes after value".into()));
    }
    Ok(value)
}

/// Integer-keyed view over a CBOR map.
struct Fields<'a> {
    entries: &'a [(Value, Value)],
}

impl<'a> Fields<'a> {
    fn of(value: &'a Value, what: &str) -> Result<Self> {
        match value {
            Value::Map(entries) => Ok(Self { entries }),
            _ => Err(Error::Malformed(format!("{what}: expected map"))),
        }
    }

    fn get(&self, key: u64) -> Option<&'a Value> {
        self.entries
            .iter()
            .find(|(k, _)| matches!(k, Value::Integer(i) if i128::from(*i) == key as i128))
            .map(|(_, v)| v)
    }

    fn required(&self, key: u64, what: &str) -> Result<&'a Value> {
        self.get(key)
            .ok_or_else(|| Error::Malformed(format!("missing {what}")))
    }

    fn uint(&self, key: u64, what: &str) -> Result<u64> {
        as_uint(self.required(key, what)?, what)
    }

    fn text(&self, key: u64, what: &str) -> Result<String> {
        as_text(self.required(key, what)?, what)
    }

    fn array(&self, key: u64, what: &str) -> Result<&'a [Value]> {
        as_array(self.required(key, what)?, what)
    }

    fn texts(&self, key: u64, what: &str) -> Result<Vec<String>> {
        self.array(key, what)?
            .iter()
            .map(|v| as_text(v, what))
            .collect()
    }
}

fn as_uint(value: &Value, what: &str) -> Result<u64> {
    match value {
        Value::Integer(i) => u64::try_from(i128::from(*i))
            .map_err(|_| Error::Malformed(format!("{what}: out of range"))),
        _ => Err(Error::Malformed(format!("{what}: expected integer"))),
    }
}

fn as_text(value: &Value, what: &str) -> Result<String> {
    match value {
        Value::Text(s) => Ok(s.clone()),
        _ => Err(Error::Malformed(format!("{what}: expected text"))),
    }
}

fn as_array<'a>(value: &'a Value, what: &str) -> Result<&'a [Value]> {
    match value {
        Value::Array(items) => Ok(items),
        _ => Err(Error::Malformed(format!("{what}: expected array"))),
    }
}

fn command_from_value(value: &Value) -> Result<Command> {
    use self::command_tags::*;

    let f = Fields::of(value, "command")?;
    let tag = f.uint(keys::TAG, "command tag")?;
    let field = |i: u64| f.text(i, "command field");

    let command = match tag {
        ADD_ASSET_QUANTITY => Command::AddAssetQuantity {
            asset_id: field(1)?,
            amount: field(2)?,
        },
        SUBTRACT_ASSET_QUANTITY => Command::SubtractAssetQuantity {
            asset_id: field(1)?,
            amount: field(2)?,
        },
        TRANSFER_ASSET => Command::TransferAsset {
            src_account_id: field(1)?,
            dest_account_id: field(2)?,
            asset_id: field(3)?,
            description: field(4)?,
            amount: field(5)?,
        },
        CREATE_ACCOUNT => Command::CreateAccount {
            account_name: field(1)?,
            domain_id: field(2)?,
            public_key: field(3)?,
        },
        SET_ACCOUNT_DETAIL => Command::SetAccountDetail {
            account_id: field(1)?,
            key: field(2)?,
            value: field(3)?,
        },
        ADD_SIGNATORY => Command::AddSignatory {
            account_id: field(1)?,
            public_key: field(2)?,
        },
        other => {
            return Err(Error::UnsupportedVariant {
                kind: "command",
                tag: other,
            })
        }
    };
    Ok(command)
}

fn reduced_payload_from_value(value: &Value) -> Result<ReducedPayload> {
    use self::keys::reduced::*;

    let f = Fields::of(value, "reduced payload")?;
    let quorum = u32::try_from(f.uint(QUORUM, "quorum")?)
        .map_err(|_| Error::Malformed("quorum: out of range".into()))?;
    let commands = f
        .array(COMMANDS, "commands")?
        .iter()
        .map(command_from_value)
        .collect::<Result<Vec<_>>>()?;

    Ok(ReducedPayload {
        creator_account_id: f.text(CREATOR, "creator account id")?,
        created_time: f.uint(CREATED_TIME, "created time")?,
        quorum,
        commands,
    })
}

fn batch_from_value(value: &Value) -> Result<Option<BatchMeta>> {
    if let Value::Null = value {
        return Ok(None);
    }
    let f = Fields::of(value, "batch meta")?;
    let tag = f.uint(keys::batch::TYPE, "batch type")?;
    let batch_type = u8::try_from(tag)
        .ok()
        .and_then(BatchType::from_u8)
        .ok_or(Error::UnsupportedVariant {
            kind: "batch type",
            tag,
        })?;

    Ok(Some(BatchMeta {
        batch_type,
        reduced_hashes: f.texts(keys::batch::HASHES, "batch hashes")?,
    }))
}

fn payload_from_value(value: &Value) -> Result<Payload> {
    let f = Fields::of(value, "payload")?;
    let batch = match f.get(keys::payload::BATCH) {
        Some(v) => batch_from_value(v)?,
        None => None,
    };
    Ok(Payload {
        reduced_payload: reduced_payload_from_value(
            f.required(keys::payload::REDUCED, "reduced payload")?,
        )?,
        batch,
    })
}

fn signatures_from_value(value: &Value) -> Result<Vec<Signature>> {
    as_array(value, "signatures")?
        .iter()
        .map(|item| {
            let f = Fields::of(item, "signature")?;
            Ok(Signature {
                signature: f.text(keys::signature::SIGNATURE, "signature")?,
                public_key: f.text(keys::signature::PUBLIC_KEY, "public key")?,
            })
        })
        .collect()
}

fn transaction_from_value(value: &Value) -> Result<Transaction> {
    let f = Fields::of(value, "transaction")?;
    Ok(Transaction {
        payload: payload_from_value(f.required(keys::tx::PAYLOAD, "transaction payload")?)?,
        signatures: signatures_from_value(
            f.required(keys::tx::SIGNATURES, "transaction signatures")?,
        )?,
    })
}

fn block_payload_from_value(value: &Value) -> Result<BlockPayload> {
    use self::keys::block_payload::*;

    let f = Fields::of(value, "block payload")?;
    let transactions = f
        .array(TRANSACTIONS, "block transactions")?
        .iter()
        .map(transaction_from_value)
        .collect::<Result<Vec<_>>>()?;

    Ok(BlockPayload {
        height: f.uint(HEIGHT, "height")?,
        prev_block_hash: f.text(PREV_BLOCK_HASH, "prev block hash")?,
        created_time: f.uint(CREATED_TIME, "created time")?,
        transactions,
        rejected_transactions_hashes: f.texts(REJECTED, "rejected transaction hashes")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::Keypair;
    use crate::transaction::TransactionBuilder;

    fn sample_reduced() -> ReducedPayload {
        ReducedPayload {
            creator_account_id: "alice@test".into(),
            created_time: 1_736_870_400_000,
            quorum: 2,
            commands: vec![
                Command::TransferAsset {
                    src_account_id: "alice@test".into(),
                    dest_account_id: "bob@test".into(),
                    asset_id: "coin#test".into(),
                    description: "rent".into(),
                    amount: "12.50".into(),
                },
                Command::AddSignatory {
                    account_id: "alice@test".into(),
                    public_key: "AB".repeat(32),
                },
            ],
        }
    }

    fn sample_tx() -> Transaction {
        TransactionBuilder::new(sample_reduced())
            .set_batch_meta(BatchType::Ordered, vec!["CD".repeat(32)])
            .sign(&Keypair::from_seed(&[0x42; 32]))
            .build()
    }

    #[test]
    fn test_encoding_deterministic() {
        let tx = sample_tx();
        assert_eq!(encode_transaction(&tx), encode_transaction(&tx.clone()));
        assert_eq!(
            encode_reduced_payload(&tx.payload.reduced_payload),
            encode_reduced_payload(&sample_reduced())
        );
    }

    #[test]
    fn test_batch_meta_changes_payload_but_not_reduced_bytes() {
        let plain = TransactionBuilder::new(sample_reduced()).build();
        let batched = sample_tx();
        assert_ne!(encode_payload(&plain.payload), encode_payload(&batched.payload));
        assert_eq!(
            encode_reduced_payload(&plain.payload.reduced_payload),
            encode_reduced_payload(&batched.payload.reduced_payload)
        );
    }

    #[test]
    fn test_unbatched_payload_encodes_null_batch() {
        let plain = TransactionBuilder::new(sample_reduced()).build();
        let bytes = encode_payload(&plain.payload);
        assert_eq!(bytes[0], 0xa2);
        assert_eq!(*bytes.last().unwrap(), 0xf6);
    }

    #[test]
    fn test_head_encoding() {
        let mut buf = Vec::new();
        encode_head(&mut buf, 0, 23);
        assert_eq!(buf, vec![0x17]);

        buf.clear();
        encode_head(&mut buf, 0, 24);
        assert_eq!(buf, vec![0x18, 24]);

        buf.clear();
        encode_head(&mut buf, 0, 256);
        assert_eq!(buf, vec![0x19, 0x01, 0x00]);

        buf.clear();
        encode_head(&mut buf, 3, 70_000);
        assert_eq!(buf, vec![0x7a, 0x00, 0x01, 0x11, 0x70]);

        buf.clear();
        encode_head(&mut buf, 0, 1_736_870_400_000);
        assert_eq!(buf[0], 0x1b);
        assert_eq!(buf.len(), 9);
    }

    #[test]
    fn test_map_key_ordering() {
        let value = map(vec![(8, uint(80u64)), (0, uint(0u64)), (5, uint(50u64))]);
        let buf = encode_cbor_value_canonical(&value);
        assert_eq!(buf, vec![0xa3, 0x00, 0x00, 0x05, 0x18, 50, 0x08, 0x18, 80]);
    }

    #[test]
    fn test_transaction_roundtrip() {
        let tx = sample_tx();
        let decoded = decode_transaction(&encode_transaction(&tx)).unwrap();
        assert_eq!(decoded, tx);
    }

    #[test]
    fn test_block_roundtrip() {
        let block = Block::V1(BlockV1 {
            payload: BlockPayload {
                height: 3,
                prev_block_hash: "00".repeat(32),
                created_time: 1_736_870_400_000,
                transactions: vec![sample_tx()],
                rejected_transactions_hashes: vec!["EF".repeat(32)],
            },
            signatures: Vec::new(),
        });
        let decoded = decode_block(&encode_block(&block)).unwrap();
        assert_eq!(decoded, block);
    }

    #[test]
    fn test_decode_rejects_trailing_bytes() {
        let mut bytes = encode_transaction(&sample_tx());
        bytes.push(0x00);
        assert!(matches!(
            decode_transaction(&bytes),
            Err(Error::Malformed(_))
        ));
    }

    #[test]
    fn test_decode_rejects_unknown_command() {
        // {0: {0: {0: "a", 1: 1, 2: 1, 3: [{0: 99}]}, 1: null}, 1: []}
        let value = map(vec![
            (
                0,
                map(vec![
                    (
                        0,
                        map(vec![
                            (0, text("a")),
                            (1, uint(1u64)),
                            (2, uint(1u64)),
                            (3, Value::Array(vec![map(vec![(0, uint(99u64))])])),
                        ]),
                    ),
                    (1, Value::Null),
                ]),
            ),
            (1, Value::Array(Vec::new())),
        ]);
        let bytes = encode_cbor_value_canonical(&value);
        assert!(matches!(
            decode_transaction(&bytes),
            Err(Error::UnsupportedVariant {
                kind: "command",
                tag: 99
            })
        ));
    }

    #[test]
    fn test_decode_garbage() {
        assert!(matches!(
            decode_transaction(&[0xff, 0x00]),
            Err(Error::Malformed(_))
        ));
        assert!(matches!(
            decode_transaction(&[0x01]),
            Err(Error::Malformed(_))
        ));
    }

    #[test]
    fn test_query_encoding_covers_signature_only_in_full_form() {
        let keypair = Keypair::from_seed(&[0x42; 32]);
        let query = Query::new(QueryPayload {
            creator_account_id: "alice@test".into(),
            created_time: 5,
            query_counter: 9,
            kind: QueryKind::GetTransactions {
                tx_hashes: vec!["AA".repeat(32)],
            },
        });
        let signed = query.clone().sign(&keypair);
        assert_eq!(
            encode_query_payload(&query.payload),
            encode_query_payload(&signed.payload)
        );
        assert_ne!(encode_query(&query), encode_query(&signed));
    }
}
