//! Block time and reward schedules derived from the milestones

use std::collections::BTreeMap;

use super::{ConfigError, ConfigManager, DynamicReward};
use crate::utils::BigNumber;

impl ConfigManager {
    /// Block time in force at `height`
    pub fn calculate_block_time(&self, height: u32) -> Result<u32, ConfigError> {
        self.milestones()
            .iter()
            .rev()
            .filter(|milestone| milestone.height <= height)
            .find_map(|milestone| milestone.block_time.filter(|time| *time > 0))
            .ok_or(ConfigError::NoBlockTime)
    }

    /// True when `height` is the first height of a block time span
    pub fn is_new_block_time(&self, height: u32) -> bool {
        if height == 1 {
            return true;
        }

        let mut span_start = None;
        for milestone in self.milestones().iter().rev() {
            if milestone.height > height {
                continue;
            }
            match span_start {
                None => {
                    if milestone.block_time.is_some() {
                        span_start = Some(milestone);
                    }
                }
                Some(start) if start.block_time == milestone.block_time => {
                    span_start = Some(milestone);
                }
                Some(_) => break,
            }
        }

        span_start.map_or(false, |milestone| milestone.height == height)
    }

    /// Flat block reward at `height`
    pub fn get_reward(&self, height: u32) -> BigNumber {
        self.milestones()
            .iter()
            .rev()
            .filter(|milestone| milestone.height <= height)
            .find_map(|milestone| milestone.reward.clone().filter(|reward| !reward.is_zero()))
            .unwrap_or_else(BigNumber::zero)
    }

    fn dynamic_reward(&self, height: u32) -> Option<&DynamicReward> {
        self.milestones()
            .iter()
            .rev()
            .filter(|milestone| milestone.height <= height)
            .find_map(|milestone| milestone.dynamic_reward.as_ref())
    }

    /// Reward for the delegate forging at `rank`, honouring dynamic rewards
    pub fn calculate_reward(&self, height: u32, rank: u32) -> Result<BigNumber, ConfigError> {
        match self.dynamic_reward(height) {
            Some(dynamic) if dynamic.enabled => dynamic
                .ranks
                .get(&rank.to_string())
                .cloned()
                .ok_or(ConfigError::NoDynamicReward(rank)),
            _ => Ok(self.get_reward(height)),
        }
    }

    /// Share of `reward` owed to each dev fund wallet at `height`
    pub fn calculate_dev_fund(&self, height: u32, reward: &BigNumber) -> BTreeMap<String, BigNumber> {
        self.get_milestone(Some(height))
            .dev_fund
            .iter()
            .map(|(wallet, percent)| {
                let basis_points = (percent * 100.0).round() as i64;
                (wallet.clone(), reward.times(basis_points).divided_by(10_000u64))
            })
            .collect()
    }
}
