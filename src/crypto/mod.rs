pub mod halving;
pub mod profit;
pub mod staking;
