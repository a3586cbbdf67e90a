//! Forging slot arithmetic
//!
//! Times are seconds since the network epoch (the `epoch` of the first
//! milestone). Block time can change at milestones, so slot numbers are
//! accumulated span by span using the timestamps of the blocks that closed
//! each span, supplied by the caller.

use chrono::{DateTime, Utc};

use crate::config::{ConfigError, ConfigManager, NextMilestone};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotInfo {
    pub block_time: u32,
    pub start_time: i64,
    pub end_time: i64,
    pub slot_number: i64,
    pub forging_status: bool,
}

/// Block time state after walking every span that ended at or below a height
struct Span {
    block_time: u32,
    total_slots: i64,
    last_span_end_time: i64,
}

pub struct Slots<'a> {
    config: &'a ConfigManager,
}

impl<'a> Slots<'a> {
    pub fn new(config: &'a ConfigManager) -> Self {
        Self { config }
    }

    /// Seconds elapsed between the network epoch and `now` (default: the current time)
    pub fn get_time(&self, now: Option<DateTime<Utc>>) -> i64 {
        let now = now.unwrap_or_else(Utc::now);
        let epoch = self.config.get_milestone(Some(1)).epoch.unwrap_or_default();
        (now.timestamp_millis() - epoch.timestamp_millis()).div_euclid(1000)
    }

    pub fn get_time_in_ms_until_next_slot<F>(&self, timestamp_for_block: F) -> Result<i64, ConfigError>
    where
        F: Fn(u32) -> i64,
    {
        let next_slot = self.get_next_slot(&timestamp_for_block)?;
        let next_slot_time = self.get_slot_time(&timestamp_for_block, next_slot, None)?;
        Ok((next_slot_time - self.get_time(None)) * 1000)
    }

    pub fn get_slot_number<F>(
        &self,
        timestamp_for_block: F,
        timestamp: Option<i64>,
        height: Option<u32>,
    ) -> Result<i64, ConfigError>
    where
        F: Fn(u32) -> i64,
    {
        Ok(self
            .get_slot_info(timestamp_for_block, timestamp, height)?
            .slot_number)
    }

    pub fn get_slot_time<F>(&self, timestamp_for_block: F, slot: i64, height: Option<u32>) -> Result<i64, ConfigError>
    where
        F: Fn(u32) -> i64,
    {
        let span = self.walk_spans(&timestamp_for_block, self.latest_height(height))?;
        Ok(span.last_span_end_time + (slot - span.total_slots) * i64::from(span.block_time))
    }

    pub fn get_next_slot<F>(&self, timestamp_for_block: F) -> Result<i64, ConfigError>
    where
        F: Fn(u32) -> i64,
    {
        Ok(self.get_slot_number(timestamp_for_block, None, None)? + 1)
    }

    pub fn is_forging_allowed<F>(
        &self,
        timestamp_for_block: F,
        timestamp: Option<i64>,
        height: Option<u32>,
    ) -> Result<bool, ConfigError>
    where
        F: Fn(u32) -> i64,
    {
        Ok(self
            .get_slot_info(timestamp_for_block, timestamp, height)?
            .forging_status)
    }

    pub fn get_slot_info<F>(
        &self,
        timestamp_for_block: F,
        timestamp: Option<i64>,
        height: Option<u32>,
    ) -> Result<SlotInfo, ConfigError>
    where
        F: Fn(u32) -> i64,
    {
        let timestamp = timestamp.unwrap_or_else(|| self.get_time(None));
        let span = self.walk_spans(&timestamp_for_block, self.latest_height(height))?;
        let block_time = i64::from(span.block_time);

        let slots_in_span = (timestamp - span.last_span_end_time).div_euclid(block_time);
        let start_time = span.last_span_end_time + slots_in_span * block_time;

        Ok(SlotInfo {
            block_time: span.block_time,
            start_time,
            end_time: start_time + block_time - 1,
            slot_number: span.total_slots + slots_in_span,
            forging_status: timestamp < start_time + block_time / 2,
        })
    }

    /// The first milestone plus every later one that changes the block time
    pub fn milestones_which_affect_block_times(&self) -> Vec<NextMilestone<u32>> {
        let mut milestones = vec![NextMilestone {
            found: true,
            height: 1,
            data: self.config.get_milestone(Some(1)).block_time,
        }];

        let mut next = self
            .config
            .next_milestone_with_new_value(1, |milestone| milestone.block_time);
        while next.found {
            let height = next.height;
            milestones.push(next);
            next = self
                .config
                .next_milestone_with_new_value(height, |milestone| milestone.block_time);
        }
        milestones
    }

    fn walk_spans<F>(&self, timestamp_for_block: &F, height: u32) -> Result<Span, ConfigError>
    where
        F: Fn(u32) -> i64,
    {
        let mut span = Span {
            block_time: self.config.calculate_block_time(1)?,
            total_slots: 0,
            last_span_end_time: 0,
        };
        let mut milestone_height = 1;
        let mut next = self
            .config
            .next_milestone_with_new_value(1, |milestone| milestone.block_time);
        let spans = self.milestones_which_affect_block_times().len();

        for _ in 1..spans {
            if height < next.height {
                break;
            }
            let block_time = i64::from(span.block_time);
            let span_start = timestamp_for_block(milestone_height);
            span.last_span_end_time = timestamp_for_block(next.height - 1) + block_time;
            span.total_slots += (span.last_span_end_time - span_start).div_euclid(block_time);

            span.block_time = next.data.unwrap_or(span.block_time);
            milestone_height = next.height;
            next = self
                .config
                .next_milestone_with_new_value(next.height, |milestone| milestone.block_time);
        }
        Ok(span)
    }

    fn latest_height(&self, height: Option<u32>) -> u32 {
        height
            .filter(|height| *height > 0)
            .or_else(|| self.config.height())
            .unwrap_or(1)
    }
}
