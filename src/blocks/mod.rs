//! Blocks: header codec, ids, signatures and validation
//!
//! The header is a fixed 141 byte layout followed by the 64 byte generator
//! signature. Transactions follow as a table of u32 lengths and then the
//! serialised transactions themselves.

pub mod block;
pub mod deserialiser;
pub mod factory;
pub mod serialiser;

use thiserror::Error;

use crate::identities::IdentityError;
use crate::transactions::TransactionError;
use crate::utils::{BigNumberError, BufferError};

pub use block::{Block, BlockData, BlockVerification};
pub use deserialiser::Deserialiser;
pub use factory::BlockFactory;
pub use serialiser::Serialiser;

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum BlockError {
    #[error("Invalid block header: wrote {0} bytes")]
    InvalidHeader(usize),
    #[error("Expected the block to be signed")]
    MissingSignature,
    #[error("Transaction without id in block")]
    MissingTransactionId,
    #[error("{0}")]
    Schema(String),
    #[error("Invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error(transparent)]
    Buffer(#[from] BufferError),
    #[error(transparent)]
    BigNumber(#[from] BigNumberError),
    #[error(transparent)]
    Identity(#[from] IdentityError),
    #[error(transparent)]
    Transaction(#[from] TransactionError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
