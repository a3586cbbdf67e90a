//! Key, address and WIF derivation
//!
//! All functions take the network version bytes explicitly; callers holding a
//! [`crate::NetworkContext`] read them from its configuration.

pub mod address;
pub mod keys;
pub mod private_key;
pub mod public_key;
pub mod wif;

use thiserror::Error;

use crate::crypto::SchnorrError;
use crate::utils::Base58Error;

pub use address::{Address, AddressBuffer};
pub use keys::Keys;
pub use private_key::PrivateKey;
pub use public_key::PublicKey;
pub use wif::Wif;

/// Errors raised while deriving or parsing identities
#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("Expected length to be {0}, but got {1}")]
    PrivateKeyLength(usize, usize),
    #[error("Invalid private key")]
    InvalidPrivateKey,
    #[error("Expected {0} to be a valid public key")]
    InvalidPublicKey(String),
    #[error("Expected version to be {0}, but got {1}")]
    NetworkVersion(u8, u8),
    #[error("Invalid WIF: {0}")]
    InvalidWif(&'static str),
    #[error("The multisignature asset is invalid")]
    InvalidMultiSignatureAsset,
    #[error("Invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error(transparent)]
    Base58(#[from] Base58Error),
    #[error(transparent)]
    Schnorr(#[from] SchnorrError),
}
