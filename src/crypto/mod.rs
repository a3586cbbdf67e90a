//! Cryptographic primitives
//!
//! This module provides:
//! - SHA-256, double SHA-256 and RIPEMD-160
//! - Schnorr signatures (BIP-340 and the legacy draft)
//! - Signed messages
//! - Forging slot arithmetic

pub mod hash;
pub mod message;
pub mod schnorr;
pub mod slots;

use once_cell::sync::Lazy;
use secp256k1::{All, Secp256k1};

pub use hash::{hash256, ripemd160, sha256, sha256_hex};
pub use message::{Message, SignedMessage};
pub use schnorr::SchnorrError;
pub use slots::{SlotInfo, Slots};

/// Shared signing and verification context
pub(crate) static SECP256K1: Lazy<Secp256k1<All>> = Lazy::new(Secp256k1::new);
