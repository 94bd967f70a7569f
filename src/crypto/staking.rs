//! Staking reward projections.
//!
//! Without compounding the reward is simple interest over the holding period.
//! Otherwise rewards are restaked every period:
//!
//!   periods  = periods_per_year * days / 365
//!   reward   = amount * (1 + apr / periods_per_year)^periods - amount

use crate::errors::CalcResult;
use crate::interest::{apr_to_apy, Compounding, DAYS_PER_YEAR};
use crate::numeric::{ensure_finite, round2};

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct StakingRewards {
    pub reward: f64,
    pub final_balance: f64,
    /// Effective annual yield for the chosen compounding, percent
    pub effective_apy: f64,
    pub compounding: Compounding,
}

/// Reward earned over `period_days`, rounded to cents.
pub fn staking_rewards(
    amount: f64,
    apr_pct: f64,
    period_days: f64,
    compounding: Compounding,
) -> CalcResult<f64> {
    let apr = apr_pct / 100.0;
    let years = period_days / DAYS_PER_YEAR;
    let reward = match compounding.periods_per_year() {
        None => amount * apr * years,
        Some(periods_per_year) => {
            let n = f64::from(periods_per_year);
            let periods = n * years;
            let rate_per_period = apr / n;
            amount * (1.0 + rate_per_period).powf(periods) - amount
        }
    };
    Ok(round2(ensure_finite(reward, "staking reward")?))
}

/// Reward plus final balance and effective APY.
pub fn staking_breakdown(
    amount: f64,
    apr_pct: f64,
    period_days: f64,
    compounding: Compounding,
) -> CalcResult<StakingRewards> {
    let reward = staking_rewards(amount, apr_pct, period_days, compounding)?;
    let final_balance = ensure_finite(amount + reward, "staking balance")?;
    Ok(StakingRewards {
        reward,
        final_balance: round2(final_balance),
        effective_apy: apr_to_apy(apr_pct, compounding)?,
        compounding,
    })
}
