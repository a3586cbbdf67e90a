//! Static network parameters
//!
//! Everything in here is fixed for the lifetime of a network. Height scoped
//! parameters live in [`super::milestone`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::BigNumber;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bip32Prefixes {
    pub public: u32,
    pub private: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct NetworkClient {
    pub token: String,
    pub symbol: String,
    pub explorer: String,
}

/// Chain identity: address and WIF version bytes, BIP-32 prefixes, nethash
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    pub name: String,
    pub message_prefix: String,
    pub bip32: Bip32Prefixes,
    pub pub_key_hash: u8,
    pub nethash: String,
    pub wif: u8,
    pub slip44: u32,
    #[serde(default)]
    pub aip20: u32,
    #[serde(default)]
    pub client: NetworkClient,
}

/// Historically malformed ids that are still accepted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Exceptions {
    pub blocks: Vec<String>,
    pub transactions: Vec<String>,
    pub blocks_transactions: BTreeMap<String, Vec<String>>,
    pub transaction_id_fix_table: BTreeMap<String, String>,
}

/// A transaction of the genesis block, reduced to its id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisTransaction {
    pub id: String,
}

/// Header of the first block of the chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenesisBlock {
    pub id: String,
    #[serde(default)]
    pub version: u32,
    pub timestamp: u32,
    pub height: u32,
    pub previous_block: String,
    pub number_of_transactions: u32,
    pub total_amount: BigNumber,
    pub total_fee: BigNumber,
    pub reward: BigNumber,
    pub payload_length: u32,
    pub payload_hash: String,
    pub generator_public_key: String,
    pub block_signature: String,
    #[serde(default)]
    pub transactions: Vec<GenesisTransaction>,
}

/// A complete network description as shipped in the presets
///
/// Milestones are kept as raw JSON deltas; [`super::ConfigManager`] merges
/// them into typed snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    pub network: Network,
    #[serde(default)]
    pub exceptions: Exceptions,
    pub milestones: Vec<Value>,
    pub genesis_block: GenesisBlock,
}
