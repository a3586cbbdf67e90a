//! Bytes back to [`Transaction`]
//!
//! The wire format has no explicit signature markers. After the asset, the
//! remaining length decides what follows: 64 byte Schnorr signatures first,
//! then 65 byte `index ‖ signature` multi-signature entries.

use std::collections::HashSet;

use super::transaction::{Transaction, TransactionData};
use super::types::SerialiseOptions;
use super::TransactionError;
use crate::context::NetworkContext;
use crate::utils::{BigNumber, ByteBuffer};

const SIGNATURE_SIZE: usize = 64;
const MULTI_SIGNATURE_SIZE: usize = 65;

pub struct Deserialiser;

impl Deserialiser {
    pub fn deserialise(
        context: &NetworkContext,
        serialised: &[u8],
        options: SerialiseOptions,
    ) -> Result<Transaction, TransactionError> {
        let mut buf = ByteBuffer::from_bytes(serialised);
        let mut data = TransactionData::default();

        Self::deserialise_common(&mut data, &mut buf)?;
        let handler = context.registry().get(data.internal_type())?;
        if data.version == 0 {
            data.version = 3;
        }

        Self::deserialise_memo(&mut data, &mut buf)?;
        handler.deserialise(&mut buf, &mut data)?;
        Self::deserialise_signatures(&mut data, &mut buf)?;

        if !options.skips_version_check()
            && !context.config().is_supported_transaction_version(data.version)
        {
            return Err(TransactionError::Version(data.version));
        }

        Ok(Transaction::new(data, buf.into_result(), handler.key()))
    }

    /// [`Deserialiser::deserialise`] from a hex string
    pub fn deserialise_hex(
        context: &NetworkContext,
        serialised: &str,
        options: SerialiseOptions,
    ) -> Result<Transaction, TransactionError> {
        Self::deserialise(context, &hex::decode(serialised)?, options)
    }

    fn deserialise_common(data: &mut TransactionData, buf: &mut ByteBuffer) -> Result<(), TransactionError> {
        data.header_type = 0xff - buf.read_u8()?;
        data.version = buf.read_u8()?;
        data.network = Some(buf.read_u8()?);
        data.type_group = buf.read_u32_le()?;
        data.transaction_type = buf.read_u16_le()?;
        data.nonce = BigNumber::from(buf.read_u64_le()?);
        data.sender_public_key = Some(hex::encode(buf.read_bytes(33)?));
        data.fee = BigNumber::from(buf.read_u64_le()?);
        Ok(())
    }

    fn deserialise_memo(data: &mut TransactionData, buf: &mut ByteBuffer) -> Result<(), TransactionError> {
        let length = buf.read_u8()? as usize;
        if length > 0 {
            data.memo = Some(String::from_utf8_lossy(buf.read_bytes(length)?).into_owned());
        }
        Ok(())
    }

    fn deserialise_signatures(
        data: &mut TransactionData,
        buf: &mut ByteBuffer,
    ) -> Result<(), TransactionError> {
        let can_read_single = |buf: &ByteBuffer| {
            let remaining = buf.remainder_len();
            remaining > 0
                && (remaining % SIGNATURE_SIZE == 0 || remaining % MULTI_SIGNATURE_SIZE != 0)
        };

        if can_read_single(buf) {
            data.signature = Some(hex::encode(buf.read_bytes(SIGNATURE_SIZE)?));
        }
        if can_read_single(buf) {
            data.second_signature = Some(hex::encode(buf.read_bytes(SIGNATURE_SIZE)?));
        }

        let remaining = buf.remainder_len();
        if remaining == 0 {
            return Ok(());
        }
        if remaining % MULTI_SIGNATURE_SIZE != 0 {
            return Err(TransactionError::InvalidTransactionBytes(
                "signature buffer not exhausted".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        let mut signatures = Vec::with_capacity(remaining / MULTI_SIGNATURE_SIZE);
        for _ in 0..remaining / MULTI_SIGNATURE_SIZE {
            let part = buf.read_bytes(MULTI_SIGNATURE_SIZE)?;
            if !seen.insert(part[0]) {
                return Err(TransactionError::DuplicateParticipant);
            }
            signatures.push(hex::encode(part));
        }
        data.signatures = Some(signatures);
        Ok(())
    }
}
