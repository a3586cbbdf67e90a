//! Canonical transaction bytes
//!
//! ```text
//! 0xff - headerType | version | network | typeGroup u32 | type u16
//! nonce u64 | senderPublicKey 33B | fee u64 | memo length u8 + memo
//! asset | signature | secondSignature | signatures
//! ```
//! All integers are little-endian.

use super::handlers::SerialiseEnv;
use super::transaction::TransactionData;
use super::types::SerialiseOptions;
use super::TransactionError;
use crate::context::NetworkContext;
use crate::identities::IdentityError;
use crate::utils::ByteBuffer;

/// Used when the active milestone does not bound the block payload
const DEFAULT_BUFFER_SIZE: usize = 83_886;

pub struct Serialiser;

impl Serialiser {
    /// Bytes of `data` after the supported version check
    pub fn get_bytes(
        context: &NetworkContext,
        data: &TransactionData,
        options: SerialiseOptions,
    ) -> Result<Vec<u8>, TransactionError> {
        Self::get_bytes_with_env(context, data, options).map(|(bytes, _)| bytes)
    }

    /// Serialise without the version check
    pub fn serialise(
        context: &NetworkContext,
        data: &TransactionData,
        options: SerialiseOptions,
    ) -> Result<Vec<u8>, TransactionError> {
        Self::serialise_with_env(context, data, options).map(|(bytes, _)| bytes)
    }

    /// [`Serialiser::get_bytes`] plus any deferred recipient network mismatch
    pub(crate) fn get_bytes_with_env(
        context: &NetworkContext,
        data: &TransactionData,
        options: SerialiseOptions,
    ) -> Result<(Vec<u8>, Option<String>), TransactionError> {
        let version = if data.version == 0 { 1 } else { data.version };
        if !options.skips_version_check()
            && !context.config().is_supported_transaction_version(version)
        {
            return Err(TransactionError::Version(version));
        }
        Self::serialise_with_env(context, data, options)
    }

    pub(crate) fn serialise_with_env(
        context: &NetworkContext,
        data: &TransactionData,
        options: SerialiseOptions,
    ) -> Result<(Vec<u8>, Option<String>), TransactionError> {
        let handler = context.registry().get(data.internal_type())?;
        let mut buf = ByteBuffer::new(Self::buffer_size(context));

        Self::serialise_common(context, data, &mut buf)?;
        Self::serialise_memo(data, &mut buf)?;

        let mut env = SerialiseEnv::new(context.network_version());
        let asset = handler
            .serialise(data, &mut env)?
            .ok_or(TransactionError::MissingAsset(handler.key()))?;
        buf.write_bytes(&asset)?;

        Self::serialise_signatures(data, &mut buf, options)?;
        Ok((buf.into_result(), env.address_error))
    }

    /// Twice the average transaction share of a full block
    fn buffer_size(context: &NetworkContext) -> usize {
        let block = &context.config().get_milestone(None).block;
        if block.max_payload > 0 && block.max_transactions > 0 {
            (block.max_payload / block.max_transactions) as usize * 2
        } else {
            DEFAULT_BUFFER_SIZE
        }
    }

    fn serialise_common(
        context: &NetworkContext,
        data: &TransactionData,
        buf: &mut ByteBuffer,
    ) -> Result<(), TransactionError> {
        let sender = data
            .sender_public_key
            .as_deref()
            .ok_or(TransactionError::MissingSenderPublicKey)?;
        let sender = hex::decode(sender)?;
        if sender.len() != 33 {
            return Err(IdentityError::InvalidPublicKey(hex::encode(&sender)).into());
        }

        buf.write_u8(0xff - data.header_type)?;
        buf.write_u8(if data.version == 0 { 3 } else { data.version })?;
        buf.write_u8(match data.network {
            Some(network) if network != 0 => network,
            _ => context.network_version(),
        })?;
        buf.write_u32_le(data.type_group)?;
        buf.write_u16_le(data.transaction_type)?;
        buf.write_i64_le(data.nonce.to_i64()?)?;
        buf.write_bytes(&sender)?;
        buf.write_i64_le(data.fee.to_i64()?)?;
        Ok(())
    }

    fn serialise_memo(data: &TransactionData, buf: &mut ByteBuffer) -> Result<(), TransactionError> {
        match data.memo.as_deref() {
            Some(memo) if !memo.is_empty() => {
                let length = u8::try_from(memo.len())
                    .map_err(|_| TransactionError::MemoLengthExceeded(u8::MAX as usize))?;
                buf.write_u8(length)?;
                buf.write_bytes(memo.as_bytes())?;
            }
            _ => buf.write_u8(0)?,
        }
        Ok(())
    }

    fn serialise_signatures(
        data: &TransactionData,
        buf: &mut ByteBuffer,
        options: SerialiseOptions,
    ) -> Result<(), TransactionError> {
        if let Some(signature) = &data.signature {
            if !options.contains(SerialiseOptions::EXCLUDE_SIGNATURE) {
                buf.write_bytes(&hex::decode(signature)?)?;
            }
        }
        if let Some(second_signature) = &data.second_signature {
            if !options.contains(SerialiseOptions::EXCLUDE_SECOND_SIGNATURE) {
                buf.write_bytes(&hex::decode(second_signature)?)?;
            }
        }
        if let Some(signatures) = &data.signatures {
            if !options.contains(SerialiseOptions::EXCLUDE_MULTI_SIGNATURE) {
                buf.write_bytes(&hex::decode(signatures.concat())?)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transactions::asset::Asset;
    use crate::utils::BigNumber;

    const SENDER: &str = "034151a3ec46b5670a682b0a63394f863587d1bc97483b1b6c70eb58e7f0aed192";

    fn registration() -> TransactionData {
        TransactionData {
            version: 3,
            type_group: 1,
            transaction_type: 2,
            nonce: BigNumber::from(1u64),
            sender_public_key: Some(SENDER.to_string()),
            fee: BigNumber::from(25u64),
            asset: Some(Asset::DelegateRegistration {
                username: "gym".to_string(),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_header_layout() {
        let context = NetworkContext::from_preset("testnet").unwrap();
        let bytes = Serialiser::serialise(&context, &registration(), SerialiseOptions::empty()).unwrap();

        assert_eq!(bytes.len(), 58 + 1 + 4);
        assert_eq!(bytes[0], 0xff);
        assert_eq!(bytes[1], 3);
        assert_eq!(bytes[2], 30);
        assert_eq!(&bytes[3..7], &[1, 0, 0, 0]);
        assert_eq!(&bytes[7..9], &[2, 0]);
        assert_eq!(&bytes[9..17], &[1, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(hex::encode(&bytes[17..50]), SENDER);
        assert_eq!(&bytes[50..58], &[25, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(bytes[58], 0);
        assert_eq!(&bytes[59..], &[3, b'g', b'y', b'm']);
    }

    #[test]
    fn test_memo_and_signature_exclusion() {
        let context = NetworkContext::from_preset("testnet").unwrap();
        let mut data = registration();
        data.memo = Some("hi".to_string());
        data.signature = Some("aa".repeat(64));
        data.second_signature = Some("bb".repeat(64));

        let full = Serialiser::serialise(&context, &data, SerialiseOptions::empty()).unwrap();
        assert_eq!(full.len(), 58 + 3 + 4 + 128);
        assert_eq!(&full[58..61], &[2, b'h', b'i']);

        let unsigned = Serialiser::serialise(
            &context,
            &data,
            SerialiseOptions::EXCLUDE_SIGNATURE | SerialiseOptions::EXCLUDE_SECOND_SIGNATURE,
        )
        .unwrap();
        assert_eq!(unsigned.len(), full.len() - 128);

        let first_only =
            Serialiser::serialise(&context, &data, SerialiseOptions::EXCLUDE_SECOND_SIGNATURE).unwrap();
        assert_eq!(*first_only.last().unwrap(), 0xaa);
    }

    #[test]
    fn test_memo_length_limit() {
        let context = NetworkContext::from_preset("testnet").unwrap();
        let mut data = registration();
        data.memo = Some("a".repeat(255));
        let bytes = Serialiser::serialise(&context, &data, SerialiseOptions::empty()).unwrap();
        assert_eq!(bytes[58], 255);

        data.memo = Some("a".repeat(256));
        assert!(matches!(
            Serialiser::serialise(&context, &data, SerialiseOptions::empty()),
            Err(TransactionError::MemoLengthExceeded(255))
        ));
    }

    #[test]
    fn test_version_check() {
        let context = NetworkContext::from_preset("testnet").unwrap();
        let mut data = registration();
        data.version = 0;
        assert!(matches!(
            Serialiser::get_bytes(&context, &data, SerialiseOptions::empty()),
            Err(TransactionError::Version(1))
        ));

        let bytes =
            Serialiser::get_bytes(&context, &data, SerialiseOptions::DISABLE_VERSION_CHECK).unwrap();
        assert_eq!(bytes[1], 3);
    }

    #[test]
    fn test_missing_asset_and_unknown_type() {
        let context = NetworkContext::from_preset("testnet").unwrap();
        let mut data = registration();
        data.asset = None;
        assert!(matches!(
            Serialiser::serialise(&context, &data, SerialiseOptions::empty()),
            Err(TransactionError::MissingAsset("delegateRegistration"))
        ));

        data.type_group = 9;
        assert!(matches!(
            Serialiser::serialise(&context, &data, SerialiseOptions::empty()),
            Err(TransactionError::UnknownType(_))
        ));
    }
}
