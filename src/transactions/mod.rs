//! Transactions: wire codec, ids, signing and verification
//!
//! Every variant is described by a [`TransactionHandler`] that only knows its
//! own asset bytes. The common header, memo and signatures are written and
//! read centrally by [`Serialiser`] and [`Deserialiser`], which look the
//! handler up in the [`TransactionRegistry`] of the active
//! [`crate::NetworkContext`].

pub mod asset;
pub mod builder;
pub mod deserialiser;
pub mod factory;
pub mod handlers;
pub mod json;
pub mod registry;
pub mod serialiser;
pub mod signer;
pub mod transaction;
pub mod types;
pub mod utils;
pub mod verifier;

use thiserror::Error;

use crate::identities::IdentityError;
use crate::utils::{BigNumberError, BufferError};

pub use asset::{
    Asset, HtlcClaimAsset, HtlcLockAsset, HtlcLockExpiration, MultiSignatureAsset, TransferItem,
};
pub use builder::{BuilderFactory, TransactionBuilder};
pub use deserialiser::Deserialiser;
pub use factory::TransactionFactory;
pub use handlers::{SerialiseEnv, TransactionHandler};
pub use registry::TransactionRegistry;
pub use serialiser::Serialiser;
pub use signer::Signer;
pub use transaction::{Transaction, TransactionData};
pub use types::{
    CoreTransactionType, DelegateStatus, HtlcLockExpirationType, HtlcSecretHashType,
    InternalTransactionType, SerialiseOptions, SolarTransactionType, TransactionTypeGroup,
};
pub use utils::Utils;
pub use verifier::Verifier;

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum TransactionError {
    #[error("Failed to deserialise transaction, encountered invalid bytes: {0}")]
    InvalidTransactionBytes(String),
    #[error("{0}")]
    Schema(String),
    #[error("Version {0} not supported")]
    Version(u8),
    #[error("Unknown transaction type: {0}")]
    UnknownType(InternalTransactionType),
    #[error("Transaction type {0} is already registered")]
    AlreadyRegistered(&'static str),
    #[error("Transaction key {0} is already registered")]
    KeyAlreadyRegistered(&'static str),
    #[error("Invalid multisignature, because duplicate participant found")]
    DuplicateParticipant,
    #[error("The multisignature asset is invalid")]
    InvalidMultiSignatureAsset,
    #[error("Number of transfers exceeded the allowed maximum of {0}")]
    MaximumTransferCountExceeded(usize),
    #[error("Length of memo exceeded the allowed maximum {0}")]
    MemoLengthExceeded(usize),
    #[error("Length of {field} exceeded the allowed maximum {max}, got {length}")]
    LengthExceeded {
        field: &'static str,
        length: usize,
        max: usize,
    },
    #[error("Expected the transaction to be signed")]
    MissingSignature,
    #[error("{0}")]
    AddressNetwork(String),
    #[error("Missing asset for {0} transaction")]
    MissingAsset(&'static str),
    #[error("Expected a sender public key")]
    MissingSenderPublicKey,
    #[error("Invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("Invalid base58: {0}")]
    Base58(#[from] bs58::decode::Error),
    #[error("Invalid utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error(transparent)]
    Buffer(#[from] BufferError),
    #[error(transparent)]
    BigNumber(#[from] BigNumberError),
    #[error(transparent)]
    Identity(#[from] IdentityError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl TransactionError {
    /// Errors the factory passes through instead of wrapping as invalid bytes
    pub fn is_passthrough(&self) -> bool {
        matches!(
            self,
            TransactionError::Version(_)
                | TransactionError::Schema(_)
                | TransactionError::DuplicateParticipant
        )
    }
}
