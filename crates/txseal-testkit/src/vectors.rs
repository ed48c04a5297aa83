//! Golden test vectors for deterministic verification.
//!
//! Each vector is a single-transaction batch built from a fixed seed. The
//! expected values pin the canonical reduced-payload bytes, both hash
//! domains and the Ed25519-SHA3 signature, so any change to the encoding or
//! the signature scheme shows up here first.

use serde::Serialize;
use txseal_core::{
    canonical::encode_reduced_payload, create_batch, BatchType, Command, Keypair,
    ReducedPayload, TransactionBuilder,
};

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Seed of the signing key.
    pub seed: [u8; 32],
    pub creator_account_id: &'static str,
    pub created_time: u64,
    pub quorum: u32,
    pub commands: fn() -> Vec<Command>,
    pub batch_type: BatchType,

    // Expected outputs, uppercase hex.
    pub expected_reduced_bytes: &'static str,
    pub expected_reduced_hash: &'static str,
    pub expected_unbatched_tx_hash: &'static str,
    pub expected_batched_tx_hash: &'static str,
    pub expected_public_key: &'static str,
    pub expected_signature: &'static str,
}

/// Values computed from a vector's inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VectorOutput {
    pub reduced_bytes: String,
    pub reduced_hash: String,
    pub unbatched_tx_hash: String,
    pub batched_tx_hash: String,
    pub public_key: String,
    pub signature: String,
}

impl GoldenVector {
    fn reduced_payload(&self) -> ReducedPayload {
        ReducedPayload {
            creator_account_id: self.creator_account_id.to_string(),
            created_time: self.created_time,
            quorum: self.quorum,
            commands: (self.commands)(),
        }
    }

    /// The expected outputs as a [`VectorOutput`].
    pub fn expected(&self) -> VectorOutput {
        VectorOutput {
            reduced_bytes: self.expected_reduced_bytes.to_string(),
            reduced_hash: self.expected_reduced_hash.to_string(),
            unbatched_tx_hash: self.expected_unbatched_tx_hash.to_string(),
            batched_tx_hash: self.expected_batched_tx_hash.to_string(),
            public_key: self.expected_public_key.to_string(),
            signature: self.expected_signature.to_string(),
        }
    }
}

fn no_commands() -> Vec<Command> {
    Vec::new()
}

fn rent_transfer() -> Vec<Command> {
    vec![Command::TransferAsset {
        src_account_id: "alice@test".into(),
        dest_account_id: "bob@test".into(),
        asset_id: "coin#test".into(),
        description: "rent".into(),
        amount: "12.50".into(),
    }]
}

fn detail_and_mint() -> Vec<Command> {
    vec![
        Command::SetAccountDetail {
            account_id: "bob@test".into(),
            key: "age".into(),
            value: "42".into(),
        },
        Command::AddAssetQuantity {
            asset_id: "coin#test".into(),
            amount: "1.00".into(),
        },
    ]
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "minimal",
            seed: [0x01; 32],
            creator_account_id: "a@b",
            created_time: 0,
            quorum: 1,
            commands: no_commands,
            batch_type: BatchType::Ordered,
            expected_reduced_bytes: "A40063614062010002010380",
            expected_reduced_hash:
                "A52AEC7631DEEC2DC008B08F5DFD47BA97BF5A406B4DA4E6F6797BCD6B975473",
            expected_unbatched_tx_hash:
                "104FBA59CD846DDE7BF10FB21902C01393DBDFE3B62AC8B3893088655D6917E6",
            expected_batched_tx_hash:
                "C0BFCF0F0EF5090AC96B587CFDBAFBAFA7C49E91525E9ACB9C14EE65604542CB",
            expected_public_key:
                "817CED3C2846A792139B359149A1BBBA4CDC3F26136F093AA3DCC9DD7B41E117",
            expected_signature: "82514011FB0B7C577C0A4B24AF145E83603BEC5702AB1FD7980DDDE23553E765\
                                 CA4D0A584FF3CA26EA316AFCA2ADD3D6021AE8E30041A4909830570128FCB708",
        },
        GoldenVector {
            name: "transfer",
            seed: [0x42; 32],
            creator_account_id: "alice@test",
            created_time: 1_736_870_400_000,
            quorum: 1,
            commands: rent_transfer,
            batch_type: BatchType::Atomic,
            expected_reduced_bytes: "A4006A616C6963654074657374011B00000194658B1000020103\
                                     81A60003016A616C69636540746573740268626F624074657374\
                                     0369636F696E2374657374046472656E74056531322E3530",
            expected_reduced_hash:
                "37F920DA3CEAD0EC261EDA5C1FB24523DAF99EC8C7E816AF3754044CBE51170F",
            expected_unbatched_tx_hash:
                "3D47A9CE1A0DB7A678950E97EC6BDB41A2D04414DA6C593C3BD5440BC6E607AF",
            expected_batched_tx_hash:
                "704DFEEC245B778B4CF2F87AF469EE953B74E08A2880B9FEF1BA8D10C680F492",
            expected_public_key:
                "A85DFDD29DB148C4518951CE3865D8B284FD19C9FCE3FAC63F8D1D0C32E1F148",
            expected_signature: "4885B758303FA0C5F861952DACF043CA3E7291EAF3DF8088C644165ACE9AB397\
                                 C406045D276B12C3FC756C48B4BEA9E505011C22B4E08C62FF2F5559BFBD0302",
        },
        GoldenVector {
            name: "detail_quorum2",
            seed: [0x07; 32],
            creator_account_id: "bob@test",
            created_time: 1_736_870_401_000,
            quorum: 2,
            commands: detail_and_mint,
            batch_type: BatchType::Ordered,
            expected_reduced_bytes: "A40068626F624074657374011B00000194658B13E8020203\
                                     82A400050168626F624074657374026361676503623432\
                                     A300010169636F696E23746573740264312E3030",
            expected_reduced_hash:
                "3DB090853EC807FF84C0E377D6821863BFEE90989E2270C100C90D07A29E3981",
            expected_unbatched_tx_hash:
                "70EBE037FF98D5BE9564E0B7481027DCFC61A8DFBE9606CFACC2AEFC19EB288C",
            expected_batched_tx_hash:
                "38FBEBD08213A1A7F241948D098BA358B0428C94987331BB072E5180A8A02750",
            expected_public_key:
                "7A91EFA3CA0A0D81733A180DE7AAEFDB59BDF00A54BEC8780B17204FD4E3D783",
            expected_signature: "DC6AFCD3CF89AB1D1B7B7D379831962EE134DC5B92FB0D2777E312ABA1260473\
                                 0C79F80FF8CBA2AA1BB2D3BFA7583FD72A7B3DC4DCEB275E18E5D2FFF894200A",
        },
    ]
}

/// Compute a vector's outputs with the current implementation.
pub fn compute_vector(vector: &GoldenVector) -> VectorOutput {
    let keypair = Keypair::from_seed(&vector.seed);
    let reduced_payload = vector.reduced_payload();
    let reduced_bytes = encode_reduced_payload(&reduced_payload);

    let tx = TransactionBuilder::new(reduced_payload).build();
    let unbatched_tx_hash = tx.hash();

    let mut batch = create_batch(vec![tx], vector.batch_type, &keypair)
        .unwrap_or_else(|e| panic!("vector '{}' failed to batch: {e}", vector.name));
    let batched = batch.remove(0);
    let signature = batched.signatures[0].clone();

    VectorOutput {
        reduced_bytes: hex::encode_upper(reduced_bytes),
        reduced_hash: batched.reduced_hash().to_hex(),
        unbatched_tx_hash: unbatched_tx_hash.to_hex(),
        batched_tx_hash: batched.hash().to_hex(),
        public_key: signature.public_key,
        signature: signature.signature,
    }
}

/// Check every vector. Returns `(name, matches, computed)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool, VectorOutput)> {
    all_vectors()
        .iter()
        .map(|v| {
            let computed = compute_vector(v);
            let matches = computed == v.expected();
            (v.name.to_string(), matches, computed)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vectors_match_expected() {
        for vector in all_vectors() {
            let computed = compute_vector(&vector);
            assert_eq!(
                computed,
                vector.expected(),
                "vector '{}' drifted:\n{}",
                vector.name,
                serde_json::to_string_pretty(&computed).unwrap_or_default()
            );
        }
    }

    #[test]
    fn test_vectors_are_deterministic() {
        for vector in all_vectors() {
            assert_eq!(compute_vector(&vector), compute_vector(&vector));
        }
    }

    #[test]
    fn test_verify_all_vectors_reports_every_vector() {
        let report = verify_all_vectors();
        assert_eq!(report.len(), all_vectors().len());
        assert!(report.iter().all(|(_, ok, _)| *ok));
    }

    #[test]
    fn test_reduced_and_tx_hash_differ() {
        for vector in all_vectors() {
            let out = compute_vector(&vector);
            assert_ne!(out.reduced_hash, out.unbatched_tx_hash);
            assert_ne!(out.unbatched_tx_hash, out.batched_tx_hash);
        }
    }
}
