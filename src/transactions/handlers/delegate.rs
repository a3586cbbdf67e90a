use super::{finish, length_u8, SerialiseEnv, TransactionHandler};
use crate::transactions::asset::Asset;
use crate::transactions::transaction::TransactionData;
use crate::transactions::types::{CoreTransactionType, InternalTransactionType};
use crate::transactions::TransactionError;
use crate::utils::{BigNumber, ByteBuffer};

pub struct DelegateRegistrationHandler;

impl TransactionHandler for DelegateRegistrationHandler {
    fn transaction_type(&self) -> InternalTransactionType {
        InternalTransactionType::core(CoreTransactionType::DelegateRegistration)
    }

    fn key(&self) -> &'static str {
        "delegateRegistration"
    }

    fn default_static_fee(&self) -> BigNumber {
        BigNumber::from(2_500_000_000u64)
    }

    fn serialise(
        &self,
        data: &TransactionData,
        _env: &mut SerialiseEnv,
    ) -> Result<Option<Vec<u8>>, TransactionError> {
        let Some(Asset::DelegateRegistration { username }) = &data.asset else {
            return Ok(None);
        };
        let mut buf = ByteBuffer::new(username.len() + 1);
        buf.write_u8(length_u8("username", username.len())?)?;
        buf.write_bytes(username.as_bytes())?;
        Ok(finish(buf))
    }

    fn deserialise(
        &self,
        buf: &mut ByteBuffer,
        data: &mut TransactionData,
    ) -> Result<(), TransactionError> {
        let length = buf.read_u8()? as usize;
        let username = String::from_utf8(buf.read_bytes(length)?.to_vec())?;
        data.asset = Some(Asset::DelegateRegistration { username });
        Ok(())
    }
}

/// Resignation type is stored as `0xff - type`, so it never collides with a
/// multi-signature index byte (`0x00..=0x0f`)
pub struct DelegateResignationHandler;

impl TransactionHandler for DelegateResignationHandler {
    fn transaction_type(&self) -> InternalTransactionType {
        InternalTransactionType::core(CoreTransactionType::DelegateResignation)
    }

    fn key(&self) -> &'static str {
        "delegateResignation"
    }

    fn default_static_fee(&self) -> BigNumber {
        BigNumber::from(2_500_000_000u64)
    }

    fn serialise(
        &self,
        data: &TransactionData,
        _env: &mut SerialiseEnv,
    ) -> Result<Option<Vec<u8>>, TransactionError> {
        match &data.asset {
            Some(Asset::DelegateResignation {
                resignation_type: Some(resignation_type),
            }) if *resignation_type != 0 => Ok(Some(vec![0xff - resignation_type])),
            _ => Ok(Some(Vec::new())),
        }
    }

    fn deserialise(
        &self,
        buf: &mut ByteBuffer,
        data: &mut TransactionData,
    ) -> Result<(), TransactionError> {
        // Only signatures left
        let remaining = buf.remainder_len();
        if (remaining <= 128 && remaining % 64 == 0) || (remaining >= 130 && remaining % 65 == 0) {
            return Ok(());
        }

        let raw = buf.read_u8()?;
        if raw <= 0x0f {
            buf.jump(-1)?;
            return Ok(());
        }
        data.asset = Some(Asset::DelegateResignation {
            resignation_type: Some(0xff - raw),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_layout() {
        let data = TransactionData {
            asset: Some(Asset::DelegateRegistration {
                username: "gym".to_string(),
            }),
            ..Default::default()
        };
        let bytes = DelegateRegistrationHandler
            .serialise(&data, &mut SerialiseEnv::new(63))
            .unwrap()
            .unwrap();
        assert_eq!(bytes, vec![3, b'g', b'y', b'm']);

        let mut decoded = TransactionData::default();
        DelegateRegistrationHandler
            .deserialise(&mut ByteBuffer::from_bytes(bytes), &mut decoded)
            .unwrap();
        assert_eq!(decoded.asset, data.asset);
    }

    #[test]
    fn test_registration_without_asset() {
        assert!(DelegateRegistrationHandler
            .serialise(&TransactionData::default(), &mut SerialiseEnv::new(63))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_registration_username_too_long() {
        let data = TransactionData {
            asset: Some(Asset::DelegateRegistration {
                username: "g".repeat(256),
            }),
            ..Default::default()
        };
        assert!(matches!(
            DelegateRegistrationHandler.serialise(&data, &mut SerialiseEnv::new(63)),
            Err(TransactionError::LengthExceeded { field: "username", length: 256, max: 255 })
        ));
    }

    fn resignation(resignation_type: Option<u8>) -> Vec<u8> {
        let data = TransactionData {
            asset: Some(Asset::DelegateResignation { resignation_type }),
            ..Default::default()
        };
        DelegateResignationHandler
            .serialise(&data, &mut SerialiseEnv::new(63))
            .unwrap()
            .unwrap()
    }

    #[test]
    fn test_resignation_serialise() {
        assert!(resignation(None).is_empty());
        assert!(resignation(Some(0)).is_empty());
        assert_eq!(resignation(Some(1)), vec![0xfe]);
        assert_eq!(resignation(Some(2)), vec![0xfd]);
    }

    #[test]
    fn test_resignation_deserialise_with_signature() {
        let mut bytes = vec![0xfe];
        bytes.extend_from_slice(&[0u8; 64]);
        let mut buf = ByteBuffer::from_bytes(bytes);
        let mut data = TransactionData::default();
        DelegateResignationHandler.deserialise(&mut buf, &mut data).unwrap();

        assert_eq!(
            data.asset,
            Some(Asset::DelegateResignation {
                resignation_type: Some(1)
            })
        );
        assert_eq!(buf.remainder_len(), 64);
    }

    #[test]
    fn test_resignation_absent_before_signatures() {
        let mut buf = ByteBuffer::from_bytes(vec![0u8; 64]);
        let mut data = TransactionData::default();
        DelegateResignationHandler.deserialise(&mut buf, &mut data).unwrap();
        assert!(data.asset.is_none());
        assert_eq!(buf.offset(), 0);

        // A lone multi-signature starts with its participant index
        let mut bytes = vec![0x02];
        bytes.extend_from_slice(&[0u8; 64]);
        let mut buf = ByteBuffer::from_bytes(bytes);
        DelegateResignationHandler.deserialise(&mut buf, &mut data).unwrap();
        assert!(data.asset.is_none());
        assert_eq!(buf.offset(), 0);
    }
}
