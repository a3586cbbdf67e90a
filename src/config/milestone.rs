//! Height scoped consensus parameters
//!
//! A network declares milestones as sparse deltas. The effective milestone at
//! a height is the cumulative deep merge of every delta at or below it:
//! objects merge key by key, while arrays and scalars from the newer delta
//! replace the older value wholesale.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utils::BigNumber;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct BlockConstants {
    pub version: u32,
    pub max_transactions: u32,
    pub max_payload: u32,
    pub accept_expired_transaction_timestamps: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct BurnConstants {
    pub fee_percent: Option<i64>,
    pub tx_amount: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct DynamicFees {
    pub enabled: bool,
    pub min_fee: u64,
    pub addon_bytes: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct FeeConstants {
    pub static_fees: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct P2pConstants {
    pub minimum_versions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TransferConstants {
    pub minimum: u32,
    pub maximum: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct DynamicReward {
    pub enabled: bool,
    pub ranks: BTreeMap<String, BigNumber>,
    pub secondary_reward: Option<BigNumber>,
}

/// Effective (merged) parameters in force from `height` onwards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Milestone {
    pub height: u32,
    pub active_delegates: Option<u32>,
    pub block: BlockConstants,
    pub block_time: Option<u32>,
    pub burn: Option<BurnConstants>,
    pub dynamic_fees: Option<DynamicFees>,
    pub epoch: Option<DateTime<Utc>>,
    pub fees: Option<FeeConstants>,
    pub legacy_transfer: bool,
    pub legacy_vote: bool,
    pub p2p: Option<P2pConstants>,
    pub transfer: Option<TransferConstants>,
    pub reward: Option<BigNumber>,
    pub dynamic_reward: Option<DynamicReward>,
    pub accept_legacy_schnorr_transactions: bool,
    pub bip340: bool,
    pub dev_fund: BTreeMap<String, f64>,
    pub blocks_to_revoke_delegate_resignation: Option<u32>,
    pub delegate_resignation_type_asset: bool,
    pub htlc_enabled: bool,
}

impl Milestone {
    /// Static fee configured for a transaction key
    pub fn static_fee(&self, key: &str) -> Option<BigNumber> {
        self.fees
            .as_ref()
            .and_then(|fees| fees.static_fees.get(key))
            .map(|fee| BigNumber::from(*fee))
    }

    /// Maximum number of transfers in a single transfer transaction
    pub fn max_transfers(&self) -> usize {
        match &self.transfer {
            Some(transfer) if transfer.maximum > 0 => transfer.maximum as usize,
            _ => 256,
        }
    }
}

/// Recursively overlay `source` onto `target`
pub fn deep_merge(target: &Value, source: &Value) -> Value {
    match (target, source) {
        (Value::Object(target), Value::Object(source)) => {
            let mut merged: Map<String, Value> = target.clone();
            for (key, value) in source {
                let next = match merged.get(key) {
                    Some(existing) => deep_merge(existing, value),
                    None => value.clone(),
                };
                merged.insert(key.clone(), next);
            }
            Value::Object(merged)
        }
        (_, source) => source.clone(),
    }
}

/// Height declared by a raw milestone delta
pub fn declared_height(delta: &Value) -> Option<u32> {
    delta
        .get("height")
        .and_then(Value::as_u64)
        .and_then(|h| u32::try_from(h).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deep_merge_objects_and_arrays() {
        let base = json!({
            "height": 1,
            "fees": { "staticFees": { "transfer": 1, "vote": 2 } },
            "p2p": { "minimumVersions": [">=1.0.0", ">=1.1.0"] }
        });
        let delta = json!({
            "height": 2,
            "fees": { "staticFees": { "vote": 3 } },
            "p2p": { "minimumVersions": [">=2.0.0"] }
        });

        let merged = deep_merge(&base, &delta);
        assert_eq!(merged["height"], 2);
        assert_eq!(merged["fees"]["staticFees"]["transfer"], 1);
        assert_eq!(merged["fees"]["staticFees"]["vote"], 3);
        assert_eq!(merged["p2p"]["minimumVersions"], json!([">=2.0.0"]));
    }

    #[test]
    fn test_milestone_deserialises_sparse_delta() {
        let milestone: Milestone = serde_json::from_value(json!({
            "height": 75632,
            "reward": 1000000000,
            "devFund": { "Sgymbo4rg9aBeJJ2YmV12xdRY2xo6b94U9": 5 }
        }))
        .unwrap();

        assert_eq!(milestone.height, 75632);
        assert_eq!(milestone.reward, Some(BigNumber::from(1_000_000_000u64)));
        assert_eq!(milestone.dev_fund["Sgymbo4rg9aBeJJ2YmV12xdRY2xo6b94U9"], 5.0);
        assert!(!milestone.bip340);
        assert_eq!(milestone.max_transfers(), 256);
    }

    #[test]
    fn test_static_fee_lookup() {
        let milestone: Milestone = serde_json::from_value(json!({
            "height": 1,
            "fees": { "staticFees": { "transfer": 50000000 } }
        }))
        .unwrap();

        assert_eq!(milestone.static_fee("transfer"), Some(BigNumber::from(50_000_000u64)));
        assert_eq!(milestone.static_fee("vote"), None);
    }
}
