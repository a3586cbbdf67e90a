use super::{SerialiseEnv, TransactionHandler};
use crate::transactions::asset::Asset;
use crate::transactions::transaction::TransactionData;
use crate::transactions::types::{InternalTransactionType, SolarTransactionType};
use crate::transactions::TransactionError;
use crate::utils::{BigNumber, ByteBuffer};

pub struct BurnHandler;

impl TransactionHandler for BurnHandler {
    fn transaction_type(&self) -> InternalTransactionType {
        InternalTransactionType::solar(SolarTransactionType::Burn)
    }

    fn key(&self) -> &'static str {
        "burn"
    }

    fn default_static_fee(&self) -> BigNumber {
        BigNumber::zero()
    }

    fn serialise(
        &self,
        data: &TransactionData,
        _env: &mut SerialiseEnv,
    ) -> Result<Option<Vec<u8>>, TransactionError> {
        let Some(Asset::Burn { amount }) = &data.asset else {
            return Err(TransactionError::MissingAsset(self.key()));
        };
        Ok(Some(amount.to_u64()?.to_le_bytes().to_vec()))
    }

    fn deserialise(
        &self,
        buf: &mut ByteBuffer,
        data: &mut TransactionData,
    ) -> Result<(), TransactionError> {
        let amount = BigNumber::from(buf.read_u64_le()?);
        data.asset = Some(Asset::Burn { amount });
        Ok(())
    }
}
