//! Solar-Crypto: transaction and block cryptography for the Solar network
//!
//! This crate provides the codec and signing layer used by Solar wallets,
//! relays and explorers:
//! - Network configuration with milestones resolved by block height
//! - Key, address and WIF derivation (secp256k1, BIP340 Schnorr)
//! - Binary and JSON codecs for every core and Solar transaction type
//! - Fluent transaction builders with single, second and multi signatures
//! - Block header serialisation, ids and full block validation
//! - Message signing and verification
//!
//! # Example
//!
//! ```rust
//! use solar_crypto::{BuilderFactory, NetworkContext, TransactionFactory};
//!
//! let context = NetworkContext::from_preset("testnet").unwrap();
//!
//! // Build and sign a transfer
//! let transaction = BuilderFactory::transfer(&context)
//!     .recipient_id("D61mfSggzbvQgTUe6JhYKH2doHaqJ3Dyib")
//!     .amount(100_000_000u64)
//!     .nonce(1u64)
//!     .sign("this is a top secret passphrase")
//!     .unwrap()
//!     .build()
//!     .unwrap();
//!
//! // Decode it again from its bytes
//! let decoded = TransactionFactory::from_bytes(
//!     &context,
//!     &transaction.serialised,
//!     true,
//!     Default::default(),
//! )
//! .unwrap();
//! assert_eq!(decoded.id(), transaction.id());
//! ```

pub mod blocks;
pub mod cli;
pub mod config;
pub mod context;
pub mod crypto;
pub mod identities;
pub mod transactions;
pub mod utils;

// Re-export commonly used types
pub use blocks::{Block, BlockData, BlockError, BlockFactory};
pub use config::{ConfigError, ConfigManager, Milestone, NetworkConfig};
pub use context::NetworkContext;
pub use crypto::{Message, SignedMessage, Slots};
pub use identities::{Address, IdentityError, Keys, PublicKey, Wif};
pub use transactions::{
    BuilderFactory, SerialiseOptions, Transaction, TransactionData, TransactionError,
    TransactionFactory,
};
pub use utils::{BigNumber, ByteBuffer};
