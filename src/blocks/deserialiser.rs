use super::block::{Block, BlockData};
use super::serialiser::SIGNATURE_SIZE;
use super::BlockError;
use crate::context::NetworkContext;
use crate::transactions::{SerialiseOptions, Transaction, TransactionFactory};
use crate::utils::{BigNumber, ByteBuffer};

pub struct Deserialiser;

impl Deserialiser {
    /// Decode a block into its header fields and transactions
    ///
    /// Transactions are skipped for `header_only` or when nothing follows
    /// the signature. `unchecked` decodes them through
    /// [`TransactionFactory::from_bytes_unsafe`], which accepts legacy versions.
    pub fn deserialise(
        context: &NetworkContext,
        serialised: &[u8],
        header_only: bool,
        unchecked: bool,
    ) -> Result<(BlockData, Vec<Transaction>), BlockError> {
        let mut buf = ByteBuffer::from_bytes(serialised);
        let mut data = BlockData::default();
        Self::deserialise_header(&mut data, &mut buf)?;

        let transactions = if header_only || buf.remainder_len() == 0 {
            Vec::new()
        } else {
            Self::deserialise_transactions(context, &data, &mut buf, unchecked)?
        };

        data.id = Some(Block::get_id(&data)?);
        Ok((data, transactions))
    }

    fn deserialise_header(data: &mut BlockData, buf: &mut ByteBuffer) -> Result<(), BlockError> {
        data.version = buf.read_u32_le()?;
        data.timestamp = buf.read_u32_le()?;
        data.height = buf.read_u32_le()?;
        data.previous_block = Some(hex::encode(buf.read_bytes(32)?));
        data.number_of_transactions = buf.read_u32_le()?;
        data.total_amount = BigNumber::from(buf.read_u64_le()?);
        data.total_fee = BigNumber::from(buf.read_u64_le()?);
        data.reward = BigNumber::from(buf.read_u64_le()?);
        data.payload_length = buf.read_u32_le()?;
        data.payload_hash = hex::encode(buf.read_bytes(32)?);
        data.generator_public_key = hex::encode(buf.read_bytes(33)?);
        data.block_signature = Some(hex::encode(buf.read_bytes(SIGNATURE_SIZE)?));
        Ok(())
    }

    fn deserialise_transactions(
        context: &NetworkContext,
        data: &BlockData,
        buf: &mut ByteBuffer,
        unchecked: bool,
    ) -> Result<Vec<Transaction>, BlockError> {
        let lengths = (0..data.number_of_transactions)
            .map(|_| buf.read_u32_le())
            .collect::<Result<Vec<_>, _>>()?;

        let mut transactions = Vec::with_capacity(lengths.len());
        for length in lengths {
            let bytes = buf.read_bytes(length as usize)?;
            let transaction = if unchecked {
                TransactionFactory::from_bytes_unsafe(context, bytes, None)?
            } else {
                TransactionFactory::from_bytes(context, bytes, true, SerialiseOptions::empty())?
            };
            transactions.push(transaction);
        }
        Ok(transactions)
    }
}
