//! # txseal testkit
//!
//! Testing utilities for txseal.
//!
//! - **Golden vectors**: fixed inputs whose hashes and signatures must not
//!   drift between releases
//! - **Generators**: proptest strategies for property-based testing
//! - **Fixtures**: deterministic accounts that build and sign transactions
//!
//! ## Fixtures
//!
//! ```rust
//! use txseal_testkit::fixtures::TestFixture;
//!
//! let alice = TestFixture::with_seed("alice@test", [0x01; 32]);
//! let tx = alice.make_transfer("bob@test", "5.00", 1_736_870_400_000);
//! assert_eq!(tx.creator_account_id(), "alice@test");
//! ```
//!
//! ## Property testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use txseal_testkit::generators::transactions;
//!
//! proptest! {
//!     #[test]
//!     fn reduced_hash_is_deterministic(txs in transactions(8)) {
//!         for tx in &txs {
//!             prop_assert_eq!(tx.reduced_hash(), tx.reduced_hash());
//!         }
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_party_fixtures, TestFixture};
pub use generators::{transaction_from_params, TransactionParams};
pub use vectors::{all_vectors, compute_vector, verify_all_vectors, GoldenVector, VectorOutput};
