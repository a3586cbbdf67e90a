use serde_json::Value;

use super::block::{Block, BlockData};
use super::deserialiser::Deserialiser;
use super::serialiser::Serialiser;
use super::BlockError;
use crate::context::NetworkContext;
use crate::crypto::hash::sha256;
use crate::identities::Keys;

pub struct BlockFactory;

impl BlockFactory {
    /// Sign `data` as its generator and assemble the block
    ///
    /// The signature scheme follows the milestone at the block height.
    pub fn make(
        context: &NetworkContext,
        mut data: BlockData,
        keys: &Keys,
        aux: Option<&[u8; 32]>,
    ) -> Result<Block, BlockError> {
        let bip340 = context.config().get_milestone(Some(data.height)).bip340;
        data.generator_public_key = keys.public_key_hex();
        if data.number_of_transactions == 0 {
            data.number_of_transactions = data.transactions.len() as u32;
        }

        let hash = sha256(&Serialiser::serialise(&data, false)?);
        data.block_signature = Some(keys.sign(&hash, bip340, aux)?);
        data.id = Some(Block::get_id(&data)?);
        log::debug!("Signed block {} at height {}", data.id.as_deref().unwrap_or_default(), data.height);

        Self::from_data(context, data, false)
    }

    pub fn from_hex(context: &NetworkContext, serialised: &str) -> Result<Block, BlockError> {
        Self::from_serialised(context, &hex::decode(serialised)?)
    }

    pub fn from_bytes(context: &NetworkContext, serialised: &[u8]) -> Result<Block, BlockError> {
        Self::from_serialised(context, serialised)
    }

    pub fn from_json(context: &NetworkContext, json: &Value) -> Result<Block, BlockError> {
        Self::from_data(context, BlockData::from_json(json)?, false)
    }

    /// Serialise `data` with its transactions and decode the result
    ///
    /// `unchecked` decodes the transactions without the supported version
    /// check.
    pub fn from_data(context: &NetworkContext, data: BlockData, unchecked: bool) -> Result<Block, BlockError> {
        let serialised = Serialiser::serialise_with_transactions(context, &data)?;
        let (header, transactions) = Deserialiser::deserialise(context, &serialised, false, unchecked)?;
        Ok(Block::new(context, header, transactions, serialised))
    }

    pub fn from_serialised(context: &NetworkContext, serialised: &[u8]) -> Result<Block, BlockError> {
        let (header, transactions) = Deserialiser::deserialise(context, serialised, false, false)?;
        Ok(Block::new(context, header, transactions, serialised.to_vec()))
    }
}
