//! Network configuration and milestone resolution
//!
//! A [`ConfigManager`] holds one network: its static parameters, the
//! exception tables and the milestone list. Milestones are declared as sparse
//! deltas and merged cumulatively when the configuration is set, so looking
//! up the parameters for a height is a cursor walk over ready made snapshots.

pub mod milestone;
pub mod network;
pub mod schedule;

use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

use serde_json::Value;
use thiserror::Error;

pub use milestone::{
    BlockConstants, BurnConstants, DynamicFees, DynamicReward, FeeConstants, Milestone,
    P2pConstants, TransferConstants,
};
pub use network::{
    Bip32Prefixes, Exceptions, GenesisBlock, GenesisTransaction, Network, NetworkClient, NetworkConfig,
};

const MAINNET: &str = include_str!("presets/mainnet.json");
const TESTNET: &str = include_str!("presets/testnet.json");

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0}")]
    InvalidMilestoneConfiguration(String),
    #[error("Unknown network preset: {0}")]
    UnknownPreset(String),
    #[error("Invalid network configuration: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Attempted to use milestones but none were set")]
    NoMilestones,
    #[error("No milestones specifying any height were found")]
    NoBlockTime,
    #[error("No dynamic reward configured for rank {0}")]
    NoDynamicReward(u32),
}

/// Load one of the bundled network descriptions (`mainnet`, `testnet`)
pub fn preset(name: &str) -> Result<NetworkConfig, ConfigError> {
    let raw = match name.to_lowercase().as_str() {
        "mainnet" => MAINNET,
        "testnet" => TESTNET,
        _ => return Err(ConfigError::UnknownPreset(name.to_string())),
    };
    Ok(serde_json::from_str(raw)?)
}

/// Result of [`ConfigManager::next_milestone_with_new_value`]
#[derive(Debug, Clone, PartialEq)]
pub struct NextMilestone<T> {
    pub found: bool,
    pub height: u32,
    pub data: Option<T>,
}

// =============================================================================
// Config Manager
// =============================================================================

/// Active network plus its merged milestone list
///
/// The milestone cursor and the configured height are atomics, so a shared
/// reference is all that lookups need. Replacing the configuration takes
/// `&mut self`.
#[derive(Debug)]
pub struct ConfigManager {
    config: NetworkConfig,
    milestones: Vec<Milestone>,
    cursor: AtomicUsize,
    /// Zero means "not set"
    height: AtomicU32,
}

impl ConfigManager {
    pub fn new(config: NetworkConfig) -> Result<Self, ConfigError> {
        let milestones = Self::build_milestones(&config.milestones)?;
        log::info!(
            "Network configuration set to {} ({} milestones)",
            config.network.name,
            milestones.len()
        );
        Ok(Self {
            config,
            milestones,
            cursor: AtomicUsize::new(0),
            height: AtomicU32::new(0),
        })
    }

    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        Self::new(preset(name)?)
    }

    /// Replace the active network; the configured height is kept
    pub fn set_config(&mut self, config: NetworkConfig) -> Result<(), ConfigError> {
        let milestones = Self::build_milestones(&config.milestones)?;
        log::info!(
            "Network configuration changed to {} ({} milestones)",
            config.network.name,
            milestones.len()
        );
        self.config = config;
        self.milestones = milestones;
        *self.cursor.get_mut() = 0;
        Ok(())
    }

    pub fn set_from_preset(&mut self, name: &str) -> Result<(), ConfigError> {
        self.set_config(preset(name)?)
    }

    pub fn all(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn network(&self) -> &Network {
        &self.config.network
    }

    pub fn exceptions(&self) -> &Exceptions {
        &self.config.exceptions
    }

    pub fn genesis_block(&self) -> &GenesisBlock {
        &self.config.genesis_block
    }

    /// Merged milestones in height order
    pub fn milestones(&self) -> &[Milestone] {
        &self.milestones
    }

    pub fn set_height(&self, height: u32) {
        self.height.store(height, Ordering::Relaxed);
    }

    pub fn height(&self) -> Option<u32> {
        match self.height.load(Ordering::Relaxed) {
            0 => None,
            height => Some(height),
        }
    }

    fn resolve_height(&self, height: Option<u32>) -> u32 {
        height
            .filter(|height| *height > 0)
            .or_else(|| self.height())
            .unwrap_or(1)
    }

    /// True when a milestone is declared exactly at `height`
    pub fn is_new_milestone(&self, height: Option<u32>) -> bool {
        let height = self.resolve_height(height);
        self.milestones
            .iter()
            .any(|milestone| milestone.height == height)
    }

    /// Effective milestone at `height` (configured height, else 1, when `None`)
    ///
    /// The cursor starts where the previous lookup left it, which makes
    /// monotonic access patterns cheap.
    pub fn get_milestone(&self, height: Option<u32>) -> &Milestone {
        let height = self.resolve_height(height);
        let mut index = self.cursor.load(Ordering::Relaxed).min(self.milestones.len() - 1);

        while index + 1 < self.milestones.len() && height >= self.milestones[index + 1].height {
            index += 1;
        }
        while index > 0 && height < self.milestones[index].height {
            index -= 1;
        }

        self.cursor.store(index, Ordering::Relaxed);
        &self.milestones[index]
    }

    /// First milestone above `from_height` whose selected value is set,
    /// non-zero and differs from the value in force at `from_height`
    pub fn next_milestone_with_new_value<T, F>(&self, from_height: u32, select: F) -> NextMilestone<T>
    where
        T: PartialEq + Default,
        F: Fn(&Milestone) -> Option<T>,
    {
        let current = select(self.get_milestone(Some(from_height)));
        for milestone in &self.milestones {
            if milestone.height <= from_height {
                continue;
            }
            if let Some(value) = select(milestone).filter(|value| *value != T::default()) {
                if current.as_ref() != Some(&value) {
                    return NextMilestone {
                        found: true,
                        height: milestone.height,
                        data: Some(value),
                    };
                }
            }
        }

        NextMilestone {
            found: false,
            height: from_height,
            data: None,
        }
    }

    /// Version 3 is always accepted; version 2 only while legacy Schnorr
    /// signatures are still allowed at the configured height
    pub fn is_supported_transaction_version(&self, version: u8) -> bool {
        let milestone = self.get_milestone(None);
        version == 3
            || (version == 2 && (milestone.accept_legacy_schnorr_transactions || !milestone.bip340))
    }

    // =========================================================================
    // Exceptions
    // =========================================================================

    pub fn is_id_exception(&self, id: &str) -> bool {
        if id.is_empty() {
            return false;
        }
        let exceptions = &self.config.exceptions;
        let hit = exceptions.blocks.iter().any(|e| e == id)
            || exceptions.transactions.iter().any(|e| e == id);
        if hit {
            log::debug!("Accepting {} from the exception table", id);
        }
        hit
    }

    /// Exception check for a block or transaction id
    ///
    /// Short (pre 64 char) block ids only qualify when the block carries
    /// exactly the transactions listed for it.
    pub fn is_exception(&self, id: &str, transaction_ids: &[String]) -> bool {
        if id.len() < 64 {
            let Some(expected) = self.config.exceptions.blocks_transactions.get(id) else {
                return false;
            };
            if expected.len() != transaction_ids.len() {
                return false;
            }
            let mut expected = expected.clone();
            let mut actual = transaction_ids.to_vec();
            expected.sort();
            actual.sort();
            if expected != actual {
                return false;
            }
        }
        self.is_id_exception(id)
    }

    /// Whether `id` is one of the transactions the genesis block was built with
    pub fn is_genesis_transaction(&self, id: &str) -> bool {
        self.config
            .genesis_block
            .transactions
            .iter()
            .any(|transaction| transaction.id == id)
    }

    /// Replacement id for a handful of transactions hashed with a bogus field
    pub fn fixed_transaction_id(&self, id: &str) -> Option<&str> {
        self.config
            .exceptions
            .transaction_id_fix_table
            .get(id)
            .map(String::as_str)
    }

    // =========================================================================
    // Milestone merging
    // =========================================================================

    fn build_milestones(deltas: &[Value]) -> Result<Vec<Milestone>, ConfigError> {
        if deltas.is_empty() {
            return Err(ConfigError::NoMilestones);
        }

        let mut deltas = deltas.to_vec();
        deltas.sort_by_key(|delta| milestone::declared_height(delta).unwrap_or(0));
        Self::validate_milestones(&deltas)?;

        let mut merged: Vec<Value> = Vec::with_capacity(deltas.len());
        for delta in &deltas {
            let next = match merged.last() {
                Some(previous) => milestone::deep_merge(previous, delta),
                None => delta.clone(),
            };
            merged.push(next);
        }

        merged
            .into_iter()
            .map(|value| serde_json::from_value(value).map_err(ConfigError::from))
            .collect()
    }

    /// Block times must be non-zero and delegate count changes must land on a
    /// round boundary of the previous count
    fn validate_milestones(sorted: &[Value]) -> Result<(), ConfigError> {
        if let Some(delta) = sorted
            .iter()
            .find(|delta| delta.get("blockTime").and_then(Value::as_u64) == Some(0))
        {
            let height = milestone::declared_height(delta).unwrap_or(0);
            log::warn!("Rejecting milestone at height {}", height);
            return Err(ConfigError::InvalidMilestoneConfiguration(format!(
                "Bad milestone at height: {}. The block time must be greater than zero",
                height
            )));
        }

        let delegate_milestones: Vec<(u32, u64)> = sorted
            .iter()
            .filter_map(|delta| {
                let delegates = delta.get("activeDelegates").and_then(Value::as_u64)?;
                (delegates > 0).then(|| (milestone::declared_height(delta).unwrap_or(0), delegates))
            })
            .collect();

        for pair in delegate_milestones.windows(2) {
            let (previous_height, previous_delegates) = pair[0];
            let (current_height, current_delegates) = pair[1];
            if previous_delegates == current_delegates {
                continue;
            }
            if u64::from(current_height - previous_height) % previous_delegates != 0 {
                log::warn!("Rejecting milestone at height {}", current_height);
                return Err(ConfigError::InvalidMilestoneConfiguration(format!(
                    "Bad milestone at height: {}. The number of delegates can only be changed at the beginning of a new round",
                    current_height
                )));
            }
        }
        Ok(())
    }
}

impl Clone for ConfigManager {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            milestones: self.milestones.clone(),
            cursor: AtomicUsize::new(self.cursor.load(Ordering::Relaxed)),
            height: AtomicU32::new(self.height.load(Ordering::Relaxed)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config_with(milestones: Vec<Value>) -> NetworkConfig {
        let mut config = preset("testnet").unwrap();
        config.milestones = milestones;
        config
    }

    #[test]
    fn test_milestone_resolution_merges_lower_heights_only() {
        let manager = ConfigManager::new(config_with(vec![
            json!({ "height": 1, "blockTime": 8, "activeDelegates": 53 }),
            json!({ "height": 100, "reward": 500 }),
            json!({ "height": 200, "bip340": true }),
        ]))
        .unwrap();

        let milestone = manager.get_milestone(Some(150));
        assert_eq!(milestone.height, 100);
        assert_eq!(milestone.block_time, Some(8));
        assert_eq!(milestone.reward, Some(500u64.into()));
        assert!(!milestone.bip340);

        assert!(manager.get_milestone(Some(250)).bip340);
        // Walk back down
        assert_eq!(manager.get_milestone(Some(50)).height, 1);
        assert_eq!(manager.get_milestone(None).height, 1);
    }

    #[test]
    fn test_delegate_change_off_round_boundary_is_rejected() {
        let result = ConfigManager::new(config_with(vec![
            json!({ "height": 1, "activeDelegates": 51 }),
            json!({ "height": 75, "activeDelegates": 53 }),
        ]));

        match result {
            Err(ConfigError::InvalidMilestoneConfiguration(message)) => assert_eq!(
                message,
                "Bad milestone at height: 75. The number of delegates can only be changed at the beginning of a new round"
            ),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_delegate_change_on_round_boundary_is_accepted() {
        let manager = ConfigManager::new(config_with(vec![
            json!({ "height": 1, "activeDelegates": 51 }),
            json!({ "height": 103, "activeDelegates": 53 }),
        ]))
        .unwrap();
        assert_eq!(manager.get_milestone(Some(103)).active_delegates, Some(53));
    }

    #[test]
    fn test_unsorted_milestones_are_ordered() {
        let manager = ConfigManager::new(config_with(vec![
            json!({ "height": 10, "blockTime": 16 }),
            json!({ "height": 1, "blockTime": 8 }),
        ]))
        .unwrap();
        let heights: Vec<u32> = manager.milestones().iter().map(|m| m.height).collect();
        assert_eq!(heights, vec![1, 10]);
    }

    #[test]
    fn test_presets() {
        let mainnet = ConfigManager::from_preset("Mainnet").unwrap();
        assert_eq!(mainnet.network().pub_key_hash, 63);
        assert_eq!(mainnet.milestones().len(), 5);

        let later = mainnet.get_milestone(Some(1_175_000));
        assert!(later.bip340);
        assert!(!later.accept_legacy_schnorr_transactions);
        assert!(!later.legacy_vote);
        // Carried over from the first milestone
        assert_eq!(later.block_time, Some(8));
        assert_eq!(later.static_fee("transfer"), Some(50_000_000u64.into()));

        assert!(matches!(
            ConfigManager::from_preset("devnet"),
            Err(ConfigError::UnknownPreset(_))
        ));
    }

    #[test]
    fn test_set_config_swaps_network() {
        let mut manager = ConfigManager::from_preset("testnet").unwrap();
        manager.get_milestone(Some(1_000_000));
        manager.set_from_preset("mainnet").unwrap();
        assert_eq!(manager.network().name, "mainnet");
        assert_eq!(manager.get_milestone(Some(1)).height, 1);
    }

    #[test]
    fn test_next_milestone_with_new_value() {
        let manager = ConfigManager::new(config_with(vec![
            json!({ "height": 1, "blockTime": 8 }),
            json!({ "height": 5, "reward": 2 }),
            json!({ "height": 10, "blockTime": 16 }),
            json!({ "height": 20, "blockTime": 16, "reward": 3 }),
        ]))
        .unwrap();

        let next = manager.next_milestone_with_new_value(1, |m| m.block_time);
        assert_eq!(next, NextMilestone { found: true, height: 10, data: Some(16) });

        let none = manager.next_milestone_with_new_value(10, |m| m.block_time);
        assert!(!none.found);
        assert_eq!(none.height, 10);
    }

    #[test]
    fn test_zero_block_time() {
        let result = ConfigManager::new(config_with(vec![
            json!({ "height": 1, "blockTime": 8 }),
            json!({ "height": 10, "blockTime": 0 }),
        ]));
        match result {
            Err(ConfigError::InvalidMilestoneConfiguration(message)) => assert_eq!(
                message,
                "Bad milestone at height: 10. The block time must be greater than zero"
            ),
            other => panic!("unexpected result: {:?}", other),
        }

        let manager = ConfigManager::new(config_with(vec![
            json!({ "height": 1, "blockTime": 8, "reward": 5 }),
            json!({ "height": 10, "reward": 0 }),
            json!({ "height": 20, "reward": 7 }),
        ]))
        .unwrap();
        let next = manager.next_milestone_with_new_value(1, |m| m.reward.clone());
        assert_eq!(next.height, 20);
    }

    #[test]
    fn test_supported_transaction_versions() {
        let manager = ConfigManager::from_preset("mainnet").unwrap();
        assert!(manager.is_supported_transaction_version(3));
        assert!(manager.is_supported_transaction_version(2));

        manager.set_height(1_175_000);
        assert!(manager.is_supported_transaction_version(3));
        assert!(!manager.is_supported_transaction_version(2));
        assert!(!manager.is_supported_transaction_version(1));
    }

    #[test]
    fn test_exceptions() {
        let mut config = preset("testnet").unwrap();
        config.exceptions.transactions = vec!["a".repeat(64)];
        config.exceptions.blocks = vec!["12345".to_string()];
        config
            .exceptions
            .blocks_transactions
            .insert("12345".to_string(), vec!["t2".to_string(), "t1".to_string()]);
        config
            .exceptions
            .transaction_id_fix_table
            .insert("b".repeat(64), "c".repeat(64));
        let manager = ConfigManager::new(config).unwrap();

        assert!(manager.is_exception(&"a".repeat(64), &[]));
        assert!(!manager.is_exception(&"d".repeat(64), &[]));
        assert!(manager.is_exception("12345", &["t1".to_string(), "t2".to_string()]));
        assert!(!manager.is_exception("12345", &["t1".to_string()]));
        assert!(!manager.is_id_exception(""));
        assert_eq!(manager.fixed_transaction_id(&"b".repeat(64)), Some("c".repeat(64).as_str()));
    }

    #[test]
    fn test_genesis_transactions() {
        let mut manager = ConfigManager::from_preset("mainnet").unwrap();
        assert_eq!(manager.genesis_block().transactions.len(), 107);

        let registration = "083f81f2b52d918d1fce0eade7a78cee5a30e493bfa3a188fb582404fe7da589";
        assert!(manager.is_genesis_transaction(registration));
        assert!(!manager.is_genesis_transaction(&"0".repeat(64)));

        manager.set_from_preset("testnet").unwrap();
        assert!(!manager.is_genesis_transaction(registration));
        assert!(manager.is_genesis_transaction(
            "baf0a184399f329f2fd463d75434926727d26a6ae3f9d606da18e808608ceba4"
        ));
    }
}
