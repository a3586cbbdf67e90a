use super::{finish, SerialiseEnv, TransactionHandler};
use crate::transactions::asset::Asset;
use crate::transactions::transaction::TransactionData;
use crate::transactions::types::{CoreTransactionType, InternalTransactionType};
use crate::transactions::TransactionError;
use crate::utils::{BigNumber, ByteBuffer};

/// Stores a base58 multihash as raw `fn ‖ len ‖ digest` bytes
pub struct IpfsHandler;

impl TransactionHandler for IpfsHandler {
    fn transaction_type(&self) -> InternalTransactionType {
        InternalTransactionType::core(CoreTransactionType::Ipfs)
    }

    fn key(&self) -> &'static str {
        "ipfs"
    }

    fn default_static_fee(&self) -> BigNumber {
        BigNumber::from(500_000_000u64)
    }

    fn serialise(
        &self,
        data: &TransactionData,
        _env: &mut SerialiseEnv,
    ) -> Result<Option<Vec<u8>>, TransactionError> {
        let Some(Asset::Ipfs(hash)) = &data.asset else {
            return Ok(None);
        };
        let raw = bs58::decode(hash).into_vec()?;
        let mut buf = ByteBuffer::new(raw.len());
        buf.write_bytes(&raw)?;
        Ok(finish(buf))
    }

    fn deserialise(
        &self,
        buf: &mut ByteBuffer,
        data: &mut TransactionData,
    ) -> Result<(), TransactionError> {
        let hash_function = buf.read_u8()?;
        let length = buf.read_u8()?;
        let digest = buf.read_bytes(length as usize)?;

        let mut multihash = Vec::with_capacity(digest.len() + 2);
        multihash.push(hash_function);
        multihash.push(length);
        multihash.extend_from_slice(digest);

        data.asset = Some(Asset::Ipfs(bs58::encode(multihash).into_string()));
        Ok(())
    }
}
