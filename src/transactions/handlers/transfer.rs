use super::{finish, length_u16, SerialiseEnv, TransactionHandler};
use crate::identities::Address;
use crate::transactions::asset::{Asset, TransferItem};
use crate::transactions::transaction::TransactionData;
use crate::transactions::types::{CoreTransactionType, InternalTransactionType};
use crate::transactions::TransactionError;
use crate::utils::{BigNumber, ByteBuffer};

const ADDRESS_SIZE: usize = 21;

// =============================================================================
// Multi-recipient transfer (Core/6)
// =============================================================================

pub struct TransferHandler;

impl TransactionHandler for TransferHandler {
    fn transaction_type(&self) -> InternalTransactionType {
        InternalTransactionType::core(CoreTransactionType::Transfer)
    }

    fn key(&self) -> &'static str {
        "transfer"
    }

    fn default_static_fee(&self) -> BigNumber {
        BigNumber::from(10_000_000u64)
    }

    fn serialise(
        &self,
        data: &TransactionData,
        env: &mut SerialiseEnv,
    ) -> Result<Option<Vec<u8>>, TransactionError> {
        let Some(Asset::Transfer(transfers)) = &data.asset else {
            return Ok(None);
        };

        let mut buf = ByteBuffer::new(2 + transfers.len() * (8 + ADDRESS_SIZE));
        buf.write_u16_le(length_u16("transfers", transfers.len())?)?;
        for transfer in transfers {
            buf.write_u64_le(transfer.amount.to_u64()?)?;
            let (address, error) = env.address_bytes(&transfer.recipient_id)?;
            env.address_error = error.or(env.address_error.take());
            buf.write_bytes(&address)?;
        }
        Ok(finish(buf))
    }

    fn deserialise(
        &self,
        buf: &mut ByteBuffer,
        data: &mut TransactionData,
    ) -> Result<(), TransactionError> {
        let total = buf.read_u16_le()?;
        let mut transfers = Vec::with_capacity(total as usize);
        for _ in 0..total {
            let amount = BigNumber::from(buf.read_u64_le()?);
            let recipient_id = Address::from_buffer(buf.read_bytes(ADDRESS_SIZE)?);
            transfers.push(TransferItem {
                amount,
                recipient_id,
            });
        }
        data.asset = Some(Asset::Transfer(transfers));
        Ok(())
    }
}

// =============================================================================
// Single recipient transfer (Core/0)
// =============================================================================

pub struct LegacyTransferHandler;

impl TransactionHandler for LegacyTransferHandler {
    fn transaction_type(&self) -> InternalTransactionType {
        InternalTransactionType::core(CoreTransactionType::LegacyTransfer)
    }

    fn key(&self) -> &'static str {
        "legacyTransfer"
    }

    fn default_static_fee(&self) -> BigNumber {
        BigNumber::from(10_000_000u64)
    }

    fn serialise(
        &self,
        data: &TransactionData,
        env: &mut SerialiseEnv,
    ) -> Result<Option<Vec<u8>>, TransactionError> {
        let Some(Asset::LegacyTransfer {
            amount,
            expiration,
            recipient_id,
        }) = &data.asset
        else {
            return Err(TransactionError::MissingAsset(self.key()));
        };

        let mut buf = ByteBuffer::new(12 + ADDRESS_SIZE);
        buf.write_u64_le(amount.to_u64()?)?;
        buf.write_u32_le(*expiration)?;
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
        let expiration = buf.read_u32_le()?;
        let recipient_id = Address::from_buffer(buf.read_bytes(ADDRESS_SIZE)?);
        data.asset = Some(Asset::LegacyTransfer {
            amount,
            expiration,
            recipient_id: Some(recipient_id),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECIPIENT: &str = "D61mfSggzbvQgTUe6JhYKH2doHaqJ3Dyib";

    fn transfer_data(items: Vec<TransferItem>) -> TransactionData {
        TransactionData {
            asset: Some(Asset::Transfer(items)),
            ..Default::default()
        }
    }

    #[test]
    fn test_transfer_layout() {
        let data = transfer_data(vec![
            TransferItem {
                amount: BigNumber::from(1u64),
                recipient_id: RECIPIENT.to_string(),
            },
            TransferItem {
                amount: BigNumber::from(258u64),
                recipient_id: RECIPIENT.to_string(),
            },
        ]);
        let mut env = SerialiseEnv::new(30);
        let bytes = TransferHandler.serialise(&data, &mut env).unwrap().unwrap();

        assert_eq!(bytes.len(), 2 + 2 * 29);
        assert_eq!(&bytes[..2], &[2, 0]);
        assert_eq!(&bytes[2..10], &[1, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(bytes[10], 30);
        assert_eq!(&bytes[31..33], &[2, 1]);
        assert!(env.address_error.is_none());

        let mut decoded = TransactionData::default();
        TransferHandler
            .deserialise(&mut ByteBuffer::from_bytes(bytes), &mut decoded)
            .unwrap();
        assert_eq!(decoded.asset, data.asset);
    }

    #[test]
    fn test_transfer_without_asset() {
        let mut env = SerialiseEnv::new(30);
        assert!(TransferHandler
            .serialise(&TransactionData::default(), &mut env)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_transfer_count_overflow() {
        let items = (0..65_536)
            .map(|_| TransferItem {
                amount: BigNumber::from(1u64),
                recipient_id: RECIPIENT.to_string(),
            })
            .collect();
        assert!(matches!(
            TransferHandler.serialise(&transfer_data(items), &mut SerialiseEnv::new(30)),
            Err(TransactionError::LengthExceeded { field: "transfers", length: 65_536, max: 65_535 })
        ));
    }

    #[test]
    fn test_wrong_network_is_deferred() {
        let data = transfer_data(vec![TransferItem {
            amount: BigNumber::from(1u64),
            recipient_id: RECIPIENT.to_string(),
        }]);
        let mut env = SerialiseEnv::new(63);
        let bytes = TransferHandler.serialise(&data, &mut env).unwrap().unwrap();
        assert_eq!(bytes.len(), 31);
        assert_eq!(
            env.address_error.as_deref(),
            Some("Expected address network byte 63, but got 30.")
        );
    }

    #[test]
    fn test_legacy_transfer_layout() {
        let data = TransactionData {
            asset: Some(Asset::LegacyTransfer {
                amount: BigNumber::from(5u64),
                expiration: 7,
                recipient_id: Some(RECIPIENT.to_string()),
            }),
            ..Default::default()
        };
        let mut env = SerialiseEnv::new(30);
        let bytes = LegacyTransferHandler
            .serialise(&data, &mut env)
            .unwrap()
            .unwrap();
        assert_eq!(bytes.len(), 33);
        assert_eq!(&bytes[8..12], &[7, 0, 0, 0]);

        let mut decoded = TransactionData::default();
        LegacyTransferHandler
            .deserialise(&mut ByteBuffer::from_bytes(bytes), &mut decoded)
            .unwrap();
        assert_eq!(decoded.asset, data.asset);
        assert_eq!(decoded.amount(), Some(&BigNumber::from(5u64)));
    }

    #[test]
    fn test_legacy_transfer_requires_amount() {
        let mut env = SerialiseEnv::new(30);
        assert!(matches!(
            LegacyTransferHandler.serialise(&TransactionData::default(), &mut env),
            Err(TransactionError::MissingAsset("legacyTransfer"))
        ));
    }
}
