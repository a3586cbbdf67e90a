//! Hash time locked contract variants

use super::{finish, length_u8, SerialiseEnv, TransactionHandler};
use crate::identities::Address;
use crate::transactions::asset::{Asset, HtlcClaimAsset, HtlcLockAsset, HtlcLockExpiration};
use crate::transactions::transaction::TransactionData;
use crate::transactions::types::{CoreTransactionType, InternalTransactionType};
use crate::transactions::TransactionError;
use crate::utils::{BigNumber, ByteBuffer};

pub struct HtlcLockHandler;

impl TransactionHandler for HtlcLockHandler {
    fn transaction_type(&self) -> InternalTransactionType {
        InternalTransactionType::core(CoreTransactionType::HtlcLock)
    }

    fn key(&self) -> &'static str {
        "htlcLock"
    }

    fn default_static_fee(&self) -> BigNumber {
        BigNumber::from(10_000_000u64)
    }

    fn serialise(
        &self,
        data: &TransactionData,
        env: &mut SerialiseEnv,
    ) -> Result<Option<Vec<u8>>, TransactionError> {
        let Some(Asset::HtlcLock {
            amount,
            recipient_id,
            lock,
        }) = &data.asset
        else {
            return Err(TransactionError::MissingAsset(self.key()));
        };

        let mut buf = ByteBuffer::new(99);
        buf.write_u64_le(amount.to_u64()?)?;
        if let Some(lock) = lock {
            let secret_hash = hex::decode(&lock.secret_hash)?;
            buf.write_u8(length_u8("secretHash", secret_hash.len())?)?;
            buf.write_bytes(&secret_hash)?;
            buf.write_u8(lock.expiration.expiration_type)?;
            buf.write_u32_le(lock.expiration.value)?;
        }
        if let Some(recipient_id) = recipient_id {
            let (address, error) = env.address_bytes(recipient_id)?;
            env.address_error = error;
            buf.write_bytes(&address)?;
        }
        Ok(finish(buf))
    }

    fn deserialise(
        &self,
        buf: &mut ByteBuffer,
        data: &mut TransactionData,
    ) -> Result<(), TransactionError> {
        let amount = BigNumber::from(buf.read_u64_le()?);
        let secret_hash_length = buf.read_u8()? as usize;
        let secret_hash = hex::encode(buf.read_bytes(secret_hash_length)?);
        let expiration_type = buf.read_u8()?;
        let value = buf.read_u32_le()?;
        let recipient_id = Address::from_buffer(buf.read_bytes(21)?);

        data.asset = Some(Asset::HtlcLock {
            amount,
            recipient_id: Some(recipient_id),
            lock: Some(HtlcLockAsset {
                secret_hash,
                expiration: HtlcLockExpiration {
                    expiration_type,
                    value,
                },
            }),
        });
        Ok(())
    }
}

pub struct HtlcClaimHandler;

impl TransactionHandler for HtlcClaimHandler {
    fn transaction_type(&self) -> InternalTransactionType {
        InternalTransactionType::core(CoreTransactionType::HtlcClaim)
    }

    fn key(&self) -> &'static str {
        "htlcClaim"
    }

    fn default_static_fee(&self) -> BigNumber {
        BigNumber::zero()
    }

    fn serialise(
        &self,
        data: &TransactionData,
        _env: &mut SerialiseEnv,
    ) -> Result<Option<Vec<u8>>, TransactionError> {
        let Some(Asset::HtlcClaim(claim)) = &data.asset else {
            return Ok(Some(Vec::new()));
        };

        let unlock_secret = hex::decode(&claim.unlock_secret)?;
        let mut buf = ByteBuffer::new(34 + unlock_secret.len());
        buf.write_u8(claim.hash_type)?;
        buf.write_bytes(&hex::decode(&claim.lock_transaction_id)?)?;
        buf.write_u8(length_u8("unlockSecret", unlock_secret.len())?)?;
        buf.write_bytes(&unlock_secret)?;
        Ok(finish(buf))
    }

    fn deserialise(
        &self,
        buf: &mut ByteBuffer,
        data: &mut TransactionData,
    ) -> Result<(), TransactionError> {
        let hash_type = buf.read_u8()?;
        let lock_transaction_id = hex::encode(buf.read_bytes(32)?);
        let unlock_secret_length = buf.read_u8()? as usize;
        let unlock_secret = hex::encode(buf.read_bytes(unlock_secret_length)?);

        data.asset = Some(Asset::HtlcClaim(HtlcClaimAsset {
            hash_type,
            lock_transaction_id,
            unlock_secret,
        }));
        Ok(())
    }
}

pub struct HtlcRefundHandler;

impl TransactionHandler for HtlcRefundHandler {
    fn transaction_type(&self) -> InternalTransactionType {
        InternalTransactionType::core(CoreTransactionType::HtlcRefund)
    }

    fn key(&self) -> &'static str {
        "htlcRefund"
    }

    fn default_static_fee(&self) -> BigNumber {
        BigNumber::zero()
    }

    fn serialise(
        &self,
        data: &TransactionData,
        _env: &mut SerialiseEnv,
    ) -> Result<Option<Vec<u8>>, TransactionError> {
        let mut buf = ByteBuffer::new(32);
        if let Some(Asset::HtlcRefund {
            lock_transaction_id,
        }) = &data.asset
        {
            buf.write_bytes(&hex::decode(lock_transaction_id)?)?;
        }
        Ok(finish(buf))
    }

    fn deserialise(
        &self,
        buf: &mut ByteBuffer,
        data: &mut TransactionData,
    ) -> Result<(), TransactionError> {
        let lock_transaction_id = hex::encode(buf.read_bytes(32)?);
        data.asset = Some(Asset::HtlcRefund {
            lock_transaction_id,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOCK_ID: &str = "943c220691e711c39c79d437ce185748a0018940e1a4144293af9d05627d2eb4";

    fn decode(handler: &dyn TransactionHandler, bytes: Vec<u8>) -> TransactionData {
        let mut data = TransactionData::default();
        handler
            .deserialise(&mut ByteBuffer::from_bytes(bytes), &mut data)
            .unwrap();
        data
    }

    #[test]
    fn test_lock_layout() {
        let data = TransactionData {
            asset: Some(Asset::HtlcLock {
                amount: BigNumber::from(1_000u64),
                recipient_id: Some("D61mfSggzbvQgTUe6JhYKH2doHaqJ3Dyib".to_string()),
                lock: Some(HtlcLockAsset {
                    secret_hash: "ab".repeat(32),
                    expiration: HtlcLockExpiration {
                        expiration_type: 2,
                        value: 500,
                    },
                }),
            }),
            ..Default::default()
        };
        let bytes = HtlcLockHandler
            .serialise(&data, &mut SerialiseEnv::new(30))
            .unwrap()
            .unwrap();

        assert_eq!(bytes.len(), 8 + 1 + 32 + 1 + 4 + 21);
        assert_eq!(bytes[8], 32);
        assert_eq!(bytes[41], 2);
        assert_eq!(decode(&HtlcLockHandler, bytes).asset, data.asset);
    }

    #[test]
    fn test_claim_layout() {
        let claim = HtlcClaimAsset {
            hash_type: 0,
            lock_transaction_id: LOCK_ID.to_string(),
            unlock_secret: "6434".repeat(16),
        };
        let data = TransactionData {
            asset: Some(Asset::HtlcClaim(claim)),
            ..Default::default()
        };
        let bytes = HtlcClaimHandler
            .serialise(&data, &mut SerialiseEnv::new(30))
            .unwrap()
            .unwrap();

        assert_eq!(bytes.len(), 34 + 32);
        assert_eq!(bytes[33], 32);
        assert_eq!(decode(&HtlcClaimHandler, bytes).asset, data.asset);

        let empty = HtlcClaimHandler
            .serialise(&TransactionData::default(), &mut SerialiseEnv::new(30))
            .unwrap()
            .unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_oversized_secrets() {
        let lock = TransactionData {
            asset: Some(Asset::HtlcLock {
                amount: BigNumber::from(1u64),
                recipient_id: None,
                lock: Some(HtlcLockAsset {
                    secret_hash: "ab".repeat(256),
                    expiration: HtlcLockExpiration {
                        expiration_type: 1,
                        value: 1,
                    },
                }),
            }),
            ..Default::default()
        };
        assert!(matches!(
            HtlcLockHandler.serialise(&lock, &mut SerialiseEnv::new(30)),
            Err(TransactionError::LengthExceeded { field: "secretHash", length: 256, .. })
        ));

        let claim = TransactionData {
            asset: Some(Asset::HtlcClaim(HtlcClaimAsset {
                hash_type: 0,
                lock_transaction_id: LOCK_ID.to_string(),
                unlock_secret: "cd".repeat(300),
            })),
            ..Default::default()
        };
        assert!(matches!(
            HtlcClaimHandler.serialise(&claim, &mut SerialiseEnv::new(30)),
            Err(TransactionError::LengthExceeded { field: "unlockSecret", length: 300, .. })
        ));
    }

    #[test]
    fn test_refund_layout() {
        let data = TransactionData {
            asset: Some(Asset::HtlcRefund {
                lock_transaction_id: LOCK_ID.to_string(),
            }),
            ..Default::default()
        };
        let bytes = HtlcRefundHandler
            .serialise(&data, &mut SerialiseEnv::new(30))
            .unwrap()
            .unwrap();
        assert_eq!(hex::encode(&bytes), LOCK_ID);
        assert_eq!(decode(&HtlcRefundHandler, bytes).asset, data.asset);
    }
}
