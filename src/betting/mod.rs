pub mod ev;
pub mod kelly;
pub mod odds;
pub mod parlay;

use crate::errors::{CalcError, CalcResult};

/// Probability inputs are percentages in [0, 100].
pub fn validate_probability_pct(probability_pct: f64) -> CalcResult<f64> {
    if !probability_pct.is_finite() || !(0.0..=100.0).contains(&probability_pct) {
        return Err(CalcError::InvalidInput(format!(
            "probability must be between 0 and 100, got {probability_pct}"
        )));
    }
    Ok(probability_pct)
}

/// Decimal odds include the stake, so anything below 1.0 is meaningless.
pub fn validate_decimal_odds(decimal_odds: f64) -> CalcResult<f64> {
    if !decimal_odds.is_finite() || decimal_odds < 1.0 {
        return Err(CalcError::InvalidInput(format!(
            "decimal odds must be at least 1.0, got {decimal_odds}"
        )));
    }
    Ok(decimal_odds)
}
