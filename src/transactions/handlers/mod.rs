//! Per-variant asset codecs
//!
//! A handler writes and reads only the asset section of its variant. Header,
//! memo and signatures are handled by the serialiser and deserialiser.

pub mod burn;
pub mod delegate;
pub mod htlc;
pub mod ipfs;
pub mod signature;
pub mod transfer;
pub mod vote;

use std::sync::Arc;

use super::transaction::TransactionData;
use super::types::InternalTransactionType;
use super::TransactionError;
use crate::config::Milestone;
use crate::identities::Address;
use crate::utils::{BigNumber, ByteBuffer};

pub use burn::BurnHandler;
pub use delegate::{DelegateRegistrationHandler, DelegateResignationHandler};
pub use htlc::{HtlcClaimHandler, HtlcLockHandler, HtlcRefundHandler};
pub use ipfs::IpfsHandler;
pub use signature::{MultiSignatureHandler, SecondSignatureHandler};
pub use transfer::{LegacyTransferHandler, TransferHandler};
pub use vote::{LegacyVoteHandler, VoteHandler};

/// Per call state threaded through asset serialisation
///
/// Recipient addresses with the wrong network byte are still written; the
/// mismatch is parked in `address_error` until the transaction id is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialiseEnv {
    pub network_version: u8,
    pub address_error: Option<String>,
}

impl SerialiseEnv {
    pub fn new(network_version: u8) -> Self {
        Self {
            network_version,
            address_error: None,
        }
    }

    /// Decode `address` to its 21 raw bytes, returning any network mismatch
    pub(crate) fn address_bytes(
        &self,
        address: &str,
    ) -> Result<(Vec<u8>, Option<String>), TransactionError> {
        let buffer = Address::to_buffer(address, self.network_version)?;
        Ok((buffer.bytes, buffer.error))
    }
}

pub trait TransactionHandler: Send + Sync {
    fn transaction_type(&self) -> InternalTransactionType;

    /// Stable camelCase name, also the key into the static fee table
    fn key(&self) -> &'static str;

    fn default_static_fee(&self) -> BigNumber;

    fn static_fee(&self, milestone: &Milestone, _data: Option<&TransactionData>) -> BigNumber {
        milestone
            .static_fee(self.key())
            .unwrap_or_else(|| self.default_static_fee())
    }

    /// Asset bytes, or `None` when the variant cannot be written without an asset
    fn serialise(
        &self,
        data: &TransactionData,
        env: &mut SerialiseEnv,
    ) -> Result<Option<Vec<u8>>, TransactionError>;

    fn deserialise(
        &self,
        buf: &mut ByteBuffer,
        data: &mut TransactionData,
    ) -> Result<(), TransactionError>;
}

/// Every variant known to the codec, in registration order
pub fn builtin() -> Vec<Arc<dyn TransactionHandler>> {
    vec![
        Arc::new(LegacyTransferHandler),
        Arc::new(SecondSignatureHandler),
        Arc::new(DelegateRegistrationHandler),
        Arc::new(LegacyVoteHandler),
        Arc::new(MultiSignatureHandler),
        Arc::new(IpfsHandler),
        Arc::new(TransferHandler),
        Arc::new(DelegateResignationHandler),
        Arc::new(HtlcLockHandler),
        Arc::new(HtlcClaimHandler),
        Arc::new(HtlcRefundHandler),
        Arc::new(BurnHandler),
        Arc::new(VoteHandler),
    ]
}

/// Length prefix for a one byte field
pub(crate) fn length_u8(field: &'static str, length: usize) -> Result<u8, TransactionError> {
    u8::try_from(length).map_err(|_| TransactionError::LengthExceeded {
        field,
        length,
        max: u8::MAX as usize,
    })
}

/// Length prefix for a two byte little-endian field
pub(crate) fn length_u16(field: &'static str, length: usize) -> Result<u16, TransactionError> {
    u16::try_from(length).map_err(|_| TransactionError::LengthExceeded {
        field,
        length,
        max: u16::MAX as usize,
    })
}

/// Fixed capacity writer used by the handlers, trimmed to what was written
pub(crate) fn finish(buf: ByteBuffer) -> Option<Vec<u8>> {
    Some(buf.into_result())
}
