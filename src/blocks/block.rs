//! Decoded blocks and their validation

use std::collections::{BTreeMap, HashSet};

use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::serialiser::Serialiser;
use super::BlockError;
use crate::config::GenesisBlock;
use crate::context::NetworkContext;
use crate::crypto::hash::sha256;
use crate::crypto::schnorr;
use crate::crypto::slots::Slots;
use crate::transactions::{Transaction, TransactionData};
use crate::utils::BigNumber;

/// Block header fields plus the derived values filled in when a [`Block`]
/// is assembled
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlockData {
    pub id: Option<String>,
    pub version: u32,
    pub timestamp: u32,
    pub height: u32,
    pub previous_block: Option<String>,
    pub number_of_transactions: u32,
    pub total_amount: BigNumber,
    pub total_fee: BigNumber,
    pub reward: BigNumber,
    pub payload_length: u32,
    pub payload_hash: String,
    pub generator_public_key: String,
    pub block_signature: Option<String>,
    pub burned_fee: Option<BigNumber>,
    pub dev_fund: BTreeMap<String, BigNumber>,
    /// Transactions to serialise; empty once a [`Block`] owns them
    pub transactions: Vec<TransactionData>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBlock {
    id: Option<String>,
    #[serde(default)]
    version: u32,
    timestamp: u32,
    height: u32,
    previous_block: Option<String>,
    #[serde(default)]
    number_of_transactions: u32,
    total_amount: BigNumber,
    total_fee: BigNumber,
    reward: BigNumber,
    #[serde(default)]
    payload_length: u32,
    payload_hash: String,
    generator_public_key: String,
    block_signature: Option<String>,
    #[serde(default)]
    transactions: Vec<Value>,
}

impl BlockData {
    pub fn from_json(value: &Value) -> Result<Self, BlockError> {
        let raw: RawBlock = serde_json::from_value(value.clone())?;
        let transactions = raw
            .transactions
            .iter()
            .map(TransactionData::from_json)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: raw.id,
            version: raw.version,
            timestamp: raw.timestamp,
            height: raw.height,
            previous_block: raw.previous_block,
            number_of_transactions: raw.number_of_transactions,
            total_amount: raw.total_amount,
            total_fee: raw.total_fee,
            reward: raw.reward,
            payload_length: raw.payload_length,
            payload_hash: raw.payload_hash,
            generator_public_key: raw.generator_public_key,
            block_signature: raw.block_signature,
            transactions,
            ..Default::default()
        })
    }
}

impl From<&GenesisBlock> for BlockData {
    fn from(genesis: &GenesisBlock) -> Self {
        Self {
            id: Some(genesis.id.clone()),
            version: genesis.version,
            timestamp: genesis.timestamp,
            height: genesis.height,
            previous_block: Some(genesis.previous_block.clone()),
            number_of_transactions: genesis.number_of_transactions,
            total_amount: genesis.total_amount.clone(),
            total_fee: genesis.total_fee.clone(),
            reward: genesis.reward.clone(),
            payload_length: genesis.payload_length,
            payload_hash: genesis.payload_hash.clone(),
            generator_public_key: genesis.generator_public_key.clone(),
            block_signature: Some(genesis.block_signature.clone()),
            ..Default::default()
        }
    }
}

/// Outcome of [`Block::verify`]; `verified` holds exactly when `errors` is empty
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlockVerification {
    pub verified: bool,
    pub contains_multi_signatures: bool,
    pub errors: Vec<String>,
}

// =============================================================================
// Block
// =============================================================================

#[derive(Debug, Clone)]
pub struct Block {
    pub data: BlockData,
    pub transactions: Vec<Transaction>,
    pub verification: BlockVerification,
    pub serialised: Vec<u8>,
}

impl Block {
    /// Attach `transactions` to the header and run the validation
    ///
    /// Each transaction is stamped with the block id, height, timestamp and
    /// its position, and gets its burned fee for the block height.
    pub(crate) fn new(
        context: &NetworkContext,
        mut data: BlockData,
        mut transactions: Vec<Transaction>,
        serialised: Vec<u8>,
    ) -> Self {
        data.transactions.clear();

        let mut burned_fee = BigNumber::zero();
        for (sequence, transaction) in transactions.iter_mut().enumerate() {
            transaction.data.block_id = data.id.clone();
            transaction.data.block_height = Some(data.height);
            transaction.data.sequence = Some(sequence as u32);
            transaction.data.timestamp = Some(data.timestamp);

            transaction.set_burned_fee(context, Some(data.height));
            if let Some(fee) = &transaction.data.burned_fee {
                burned_fee = burned_fee.plus(fee);
            }
        }
        data.burned_fee = Some(burned_fee);
        data.dev_fund = context.config().calculate_dev_fund(data.height, &data.reward);

        let mut block = Self {
            data,
            transactions,
            verification: BlockVerification::default(),
            serialised,
        };
        block.verification = block.verify(context);
        block
    }

    /// Hex SHA-256 of the signed header
    pub fn get_id(data: &BlockData) -> Result<String, BlockError> {
        Ok(hex::encode(sha256(&Serialiser::serialise(data, true)?)))
    }

    pub fn id(&self) -> Option<&str> {
        self.data.id.as_deref()
    }

    /// Header fields only
    pub fn header(&self) -> BlockData {
        BlockData {
            burned_fee: None,
            dev_fund: BTreeMap::new(),
            transactions: Vec::new(),
            ..self.data.clone()
        }
    }

    /// Check the generator signature over the unsigned header, using BIP-340
    /// when the milestone at the block height enables it
    pub fn verify_signature(&self, context: &NetworkContext) -> Result<bool, BlockError> {
        let bip340 = context.config().get_milestone(Some(self.data.height)).bip340;
        let hash = sha256(&Serialiser::serialise(&self.data, false)?);
        let signature = self
            .data
            .block_signature
            .as_ref()
            .ok_or(BlockError::MissingSignature)?;
        Ok(schnorr::verify_hex(&hash, signature, &self.data.generator_public_key, bip340))
    }

    /// Validate the block against the milestone at its height
    ///
    /// Ordinary failures are collected as messages; the block is verified
    /// when none were recorded.
    pub fn verify(&self, context: &NetworkContext) -> BlockVerification {
        let mut result = BlockVerification::default();
        if let Err(error) = self.collect_errors(context, &mut result) {
            result.errors.push(error.to_string());
        }
        result.verified = result.errors.is_empty();

        if !result.verified {
            log::debug!(
                "Block {} at height {} failed verification: {}",
                self.id().unwrap_or("<unknown>"),
                self.data.height,
                result.errors.join("; ")
            );
        }
        result
    }

    fn collect_errors(&self, context: &NetworkContext, result: &mut BlockVerification) -> Result<(), BlockError> {
        let block = &self.data;
        let config = context.config();
        let constants = config.get_milestone(Some(block.height));

        if block.height != 1 && block.previous_block.is_none() {
            result.errors.push("Invalid previous block".to_string());
        }

        if !self.verify_signature(context)? {
            result.errors.push("Failed to verify block signature".to_string());
        }

        if block.version != constants.block.version {
            result.errors.push("Invalid block version".to_string());
        }

        let block_time = i64::from(constants.block_time.unwrap_or(0));
        if i64::from(block.timestamp) > Slots::new(config).get_time(None) + block_time {
            result.errors.push("Invalid block timestamp".to_string());
        }

        let size = Serialiser::size(self);
        let max_payload = constants.block.max_payload as usize;
        if size > max_payload {
            result
                .errors
                .push(format!("Payload is too large: {} > {}", size, max_payload));
        }

        let unverified: Vec<&Transaction> = self.transactions.iter().filter(|tx| !tx.verified).collect();
        if !unverified.is_empty() {
            result.errors.push("One or more transactions are not verified:".to_string());
            for transaction in &unverified {
                result.errors.push(format!("=> {}", hex::encode(&transaction.serialised)));
            }
            result.contains_multi_signatures = unverified.iter().any(|tx| tx.data.signatures.is_some());
        }

        if self.transactions.len() != block.number_of_transactions as usize {
            result.errors.push("Invalid number of transactions".to_string());
        }

        if self.transactions.len() > constants.block.max_transactions as usize && block.height > 1 {
            result.errors.push("Transactions length is too high".to_string());
        }

        let mut applied = HashSet::new();
        let mut total_amount = BigNumber::zero();
        let mut total_fee = BigNumber::zero();
        let mut payload = Vec::with_capacity(self.transactions.len() * 32);
        for transaction in &self.transactions {
            let id = transaction.id().ok_or(BlockError::MissingTransactionId)?;
            let bytes = hex::decode(id)?;

            if !applied.insert(id) {
                result.errors.push(format!("Encountered duplicate transaction: {}", id));
            }
            if let Some(expiration) = transaction.data.expiration() {
                if expiration > 0 && expiration <= block.height {
                    result.errors.push(format!("Encountered expired transaction: {}", id));
                }
            }

            if let Some(amount) = transaction.data.amount() {
                total_amount = total_amount.plus(amount);
            }
            total_fee = total_fee.plus(&transaction.data.fee);
            payload.extend_from_slice(&bytes);
        }

        if !total_amount.is_equal_to(&block.total_amount) {
            result.errors.push("Invalid total amount".to_string());
        }
        if !total_fee.is_equal_to(&block.total_fee) {
            result.errors.push("Invalid total fee".to_string());
        }
        if hex::encode(sha256(&payload)) != block.payload_hash {
            result.errors.push("Invalid payload hash".to_string());
        }
        Ok(())
    }

    pub fn to_json(&self) -> Value {
        let data = &self.data;
        let mut map = Map::new();
        if let Some(id) = &data.id {
            map.insert("id".into(), json!(id));
        }
        map.insert("version".into(), json!(data.version));
        map.insert("timestamp".into(), json!(data.timestamp));
        map.insert("height".into(), json!(data.height));
        if let Some(previous_block) = &data.previous_block {
            map.insert("previousBlock".into(), json!(previous_block));
        }
        map.insert("numberOfTransactions".into(), json!(data.number_of_transactions));
        map.insert("totalAmount".into(), json!(data.total_amount.to_string()));
        map.insert("totalFee".into(), json!(data.total_fee.to_string()));
        map.insert("reward".into(), json!(data.reward.to_string()));
        map.insert("payloadLength".into(), json!(data.payload_length));
        map.insert("payloadHash".into(), json!(data.payload_hash));
        map.insert("generatorPublicKey".into(), json!(data.generator_public_key));
        if let Some(signature) = &data.block_signature {
            map.insert("blockSignature".into(), json!(signature));
        }
        if let Some(burned_fee) = &data.burned_fee {
            map.insert("burnedFee".into(), json!(burned_fee.to_string()));
        }
        let dev_fund: Map<String, Value> = data
            .dev_fund
            .iter()
            .map(|(wallet, amount)| (wallet.clone(), json!(amount.to_string())))
            .collect();
        map.insert("devFund".into(), Value::Object(dev_fund));
        map.insert(
            "transactions".into(),
            Value::Array(self.transactions.iter().map(Transaction::to_json).collect()),
        );
        Value::Object(map)
    }
}
