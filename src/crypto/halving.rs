//! Bitcoin halving schedule estimates.
//!
//! The subsidy halves every `blocks_per_halving` blocks. The next halving is
//! the smallest multiple of that interval strictly above the current height,
//! and its date is projected from an average block time.

use crate::errors::{CalcError, CalcResult};
use chrono::{DateTime, TimeDelta, Utc};

pub const BLOCKS_PER_HALVING: u64 = 210_000;
pub const AVG_BLOCK_TIME_SECS: u64 = 600;

/// Chain constants used for projection. Both fields are non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HalvingParams {
    blocks_per_halving: u64,
    avg_block_time_secs: u64,
}

impl HalvingParams {
    pub fn new(blocks_per_halving: u64, avg_block_time_secs: u64) -> CalcResult<Self> {
        if blocks_per_halving == 0 || avg_block_time_secs == 0 {
            return Err(CalcError::InvalidInput(format!(
                "halving params must be non-zero: \
                 blocks_per_halving={blocks_per_halving}, avg_block_time_secs={avg_block_time_secs}"
            )));
        }
        Ok(Self {
            blocks_per_halving,
            avg_block_time_secs,
        })
    }

    pub fn blocks_per_halving(&self) -> u64 {
        self.blocks_per_halving
    }

    pub fn avg_block_time_secs(&self) -> u64 {
        self.avg_block_time_secs
    }
}

impl Default for HalvingParams {
    fn default() -> Self {
        Self {
            blocks_per_halving: BLOCKS_PER_HALVING,
            avg_block_time_secs: AVG_BLOCK_TIME_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct HalvingEstimate {
    pub current_block_height: u64,
    pub next_halving_block: u64,
    pub blocks_remaining: u64,
    pub estimated_seconds: u64,
    pub estimated_date: DateTime<Utc>,
    /// 1-based index of the upcoming halving
    pub halving_number: u64,
}

/// Project the next halving from `current_block_height` as seen at `now`.
pub fn halving_estimate(
    current_block_height: u64,
    now: DateTime<Utc>,
    params: &HalvingParams,
) -> CalcResult<HalvingEstimate> {
    let epoch = current_block_height / params.blocks_per_halving;
    let out_of_range = || {
        CalcError::InvalidInput(format!("block height {current_block_height} out of range"))
    };

    let next_halving_block = (epoch + 1)
        .checked_mul(params.blocks_per_halving)
        .ok_or_else(out_of_range)?;
    let blocks_remaining = next_halving_block - current_block_height;
    let estimated_seconds = blocks_remaining
        .checked_mul(params.avg_block_time_secs)
        .ok_or_else(out_of_range)?;

    let estimated_date = i64::try_from(estimated_seconds)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .and_then(|delta| now.checked_add_signed(delta))
        .ok_or_else(out_of_range)?;

    Ok(HalvingEstimate {
        current_block_height,
        next_halving_block,
        blocks_remaining,
        estimated_seconds,
        estimated_date,
        halving_number: epoch + 1,
    })
}

/// Block subsidy after `halvings_away` further halvings.
#[inline]
pub fn block_reward_after_halving(current_reward: f64, halvings_away: u32) -> f64 {
    let exponent = i32::try_from(halvings_away).unwrap_or(i32::MAX);
    current_reward / 2f64.powi(exponent)
}
