use super::block::{Block, BlockData};
use super::BlockError;
use crate::context::NetworkContext;
use crate::transactions::Utils;
use crate::utils::ByteBuffer;

pub const HEADER_SIZE: usize = 141;
pub const SIGNATURE_SIZE: usize = 64;

pub struct Serialiser;

impl Serialiser {
    /// Bytes a block occupies on the wire, length table included
    pub fn size(block: &Block) -> usize {
        let signature = block.data.block_signature.as_ref().map_or(0, |signature| signature.len() / 2);
        let transactions: usize = block
            .transactions
            .iter()
            .map(|transaction| 4 + transaction.serialised.len())
            .sum();
        HEADER_SIZE + signature + transactions
    }

    /// Header bytes, optionally followed by the block signature
    pub fn serialise(data: &BlockData, include_signature: bool) -> Result<Vec<u8>, BlockError> {
        let mut buf = ByteBuffer::new(HEADER_SIZE + SIGNATURE_SIZE);
        Self::serialise_header(data, &mut buf)?;

        if include_signature {
            if let Some(signature) = &data.block_signature {
                buf.write_bytes(&hex::decode(signature)?)?;
            }
        }
        Ok(buf.into_result())
    }

    /// Header, signature, the transaction length table and the transactions
    ///
    /// A zero transaction count in `data` is taken from its transaction list.
    pub fn serialise_with_transactions(context: &NetworkContext, data: &BlockData) -> Result<Vec<u8>, BlockError> {
        let mut header = data.clone();
        if header.number_of_transactions == 0 {
            header.number_of_transactions = data.transactions.len() as u32;
        }
        let serialised_header = Self::serialise(&header, true)?;

        let transactions = data
            .transactions
            .iter()
            .map(|transaction| Utils::to_bytes(context, transaction))
            .collect::<Result<Vec<_>, _>>()?;
        let payload: usize = transactions.iter().map(|bytes| bytes.len() + 4).sum();

        let mut buf = ByteBuffer::new(serialised_header.len() + payload);
        buf.write_bytes(&serialised_header)?;
        buf.jump((transactions.len() * 4) as isize)?;
        for (i, bytes) in transactions.iter().enumerate() {
            let offset = buf.offset();
            buf.go_to(serialised_header.len() + i * 4)?;
            buf.write_u32_le(bytes.len() as u32)?;
            buf.go_to(offset)?;
            buf.write_bytes(bytes)?;
        }
        Ok(buf.into_result())
    }

    fn serialise_header(data: &BlockData, buf: &mut ByteBuffer) -> Result<(), BlockError> {
        buf.write_u32_le(data.version)?;
        buf.write_u32_le(data.timestamp)?;
        buf.write_u32_le(data.height)?;
        match &data.previous_block {
            Some(previous_block) => buf.write_bytes(&hex::decode(previous_block)?)?,
            None => buf.write_bytes(&[0u8; 32])?,
        }
        buf.write_u32_le(data.number_of_transactions)?;
        buf.write_u64_le(data.total_amount.to_u64()?)?;
        buf.write_u64_le(data.total_fee.to_u64()?)?;
        buf.write_u64_le(data.reward.to_u64()?)?;
        buf.write_u32_le(data.payload_length)?;
        buf.write_bytes(&hex::decode(&data.payload_hash)?)?;
        buf.write_bytes(&hex::decode(&data.generator_public_key)?)?;

        if buf.offset() != HEADER_SIZE {
            return Err(BlockError::InvalidHeader(buf.offset()));
        }
        Ok(())
    }
}
