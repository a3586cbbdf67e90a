//! Second signature and multi-signature registrations

use super::{finish, length_u8, SerialiseEnv, TransactionHandler};
use crate::config::Milestone;
use crate::transactions::asset::{Asset, MultiSignatureAsset};
use crate::transactions::transaction::TransactionData;
use crate::transactions::types::{CoreTransactionType, InternalTransactionType};
use crate::transactions::TransactionError;
use crate::utils::{BigNumber, ByteBuffer};

const PUBLIC_KEY_SIZE: usize = 33;

pub struct SecondSignatureHandler;

impl TransactionHandler for SecondSignatureHandler {
    fn transaction_type(&self) -> InternalTransactionType {
        InternalTransactionType::core(CoreTransactionType::SecondSignature)
    }

    fn key(&self) -> &'static str {
        "secondSignature"
    }

    fn default_static_fee(&self) -> BigNumber {
        BigNumber::from(500_000_000u64)
    }

    fn serialise(
        &self,
        data: &TransactionData,
        _env: &mut SerialiseEnv,
    ) -> Result<Option<Vec<u8>>, TransactionError> {
        let mut buf = ByteBuffer::new(PUBLIC_KEY_SIZE);
        if let Some(Asset::SecondSignature { public_key }) = &data.asset {
            buf.write_bytes(&hex::decode(public_key)?)?;
        }
        Ok(finish(buf))
    }

    fn deserialise(
        &self,
        buf: &mut ByteBuffer,
        data: &mut TransactionData,
    ) -> Result<(), TransactionError> {
        let public_key = hex::encode(buf.read_bytes(PUBLIC_KEY_SIZE)?);
        data.asset = Some(Asset::SecondSignature { public_key });
        Ok(())
    }
}

pub struct MultiSignatureHandler;

impl TransactionHandler for MultiSignatureHandler {
    fn transaction_type(&self) -> InternalTransactionType {
        InternalTransactionType::core(CoreTransactionType::MultiSignature)
    }

    fn key(&self) -> &'static str {
        "multiSignature"
    }

    fn default_static_fee(&self) -> BigNumber {
        BigNumber::from(500_000_000u64)
    }

    /// Charged once per participant plus once for the registration itself
    fn static_fee(&self, milestone: &Milestone, data: Option<&TransactionData>) -> BigNumber {
        let base = milestone
            .static_fee(self.key())
            .unwrap_or_else(|| self.default_static_fee());
        match data.and_then(TransactionData::multi_signature) {
            Some(asset) => base.times(asset.public_keys.len() + 1),
            None => base,
        }
    }

    fn serialise(
        &self,
        data: &TransactionData,
        _env: &mut SerialiseEnv,
    ) -> Result<Option<Vec<u8>>, TransactionError> {
        let asset = data
            .multi_signature()
            .ok_or(TransactionError::MissingAsset(self.key()))?;

        let mut buf = ByteBuffer::new(2 + asset.public_keys.len() * PUBLIC_KEY_SIZE);
        buf.write_u8(asset.min)?;
        buf.write_u8(length_u8("publicKeys", asset.public_keys.len())?)?;
        for public_key in &asset.public_keys {
            buf.write_bytes(&hex::decode(public_key)?)?;
        }
        Ok(finish(buf))
    }

    fn deserialise(
        &self,
        buf: &mut ByteBuffer,
        data: &mut TransactionData,
    ) -> Result<(), TransactionError> {
        let min = buf.read_u8()?;
        let count = buf.read_u8()?;
        let public_keys = (0..count)
            .map(|_| buf.read_bytes(PUBLIC_KEY_SIZE).map(hex::encode))
            .collect::<Result<Vec<_>, _>>()?;

        data.asset = Some(Asset::MultiSignature(MultiSignatureAsset { min, public_keys }));
        Ok(())
    }
}
