use crate::errors::{CalcError, CalcResult};
use crate::numeric::{ensure_finite, round2};

/// Kelly criterion sizing for a single decimal-odds bet.
///
/// f* = (b * p - q) / b
///
/// where:
///   b = net odds (decimal_odds - 1)
///   p = win probability
///   q = 1 - p
///
/// The result is expressed as a percentage of bankroll, clamped to [0, 100]
/// and rounded to cents. Half and quarter Kelly scale an already computed
/// full-Kelly value; they never recompute the formula.

/// Kelly sizing result. Stack-allocated.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct KellyResult {
    pub full: f64,    // Full Kelly, percent of bankroll
    pub half: f64,    // Full / 2
    pub quarter: f64, // Full / 4
}

/// Full Kelly as a percent of bankroll. Odds of exactly 1.0 pay nothing on a
/// win and are reported as `DegenerateOdds`.
#[inline]
pub fn checked_kelly_criterion(probability_pct: f64, decimal_odds: f64) -> CalcResult<f64> {
    let b = decimal_odds - 1.0;
    if b == 0.0 {
        return Err(CalcError::DegenerateOdds(decimal_odds));
    }

    let p = probability_pct / 100.0;
    let q = 1.0 - p;
    let fraction = ensure_finite((b * p - q) / b, "kelly fraction")?;

    Ok(round2((fraction * 100.0).clamp(0.0, 100.0)))
}

/// Full Kelly with degenerate odds mapped to "no bet".
#[inline]
pub fn kelly_criterion(probability_pct: f64, decimal_odds: f64) -> f64 {
    match checked_kelly_criterion(probability_pct, decimal_odds) {
        Ok(pct) => pct,
        Err(e) => {
            tracing::debug!("kelly fallback to zero: {e}");
            0.0
        }
    }
}

#[inline]
pub fn half_kelly(full_kelly_pct: f64) -> f64 {
    round2(full_kelly_pct / 2.0)
}

#[inline]
pub fn quarter_kelly(full_kelly_pct: f64) -> f64 {
    round2(full_kelly_pct / 4.0)
}

/// Full, half and quarter Kelly from one formula evaluation.
pub fn compute_kelly(probability_pct: f64, decimal_odds: f64) -> KellyResult {
    let full = kelly_criterion(probability_pct, decimal_odds);
    KellyResult {
        full,
        half: half_kelly(full),
        quarter: quarter_kelly(full),
    }
}

/// Currency amount to stake for a bankroll at the given percent.
#[inline]
pub fn stake_for(bankroll: f64, fraction_pct: f64) -> f64 {
    round2(bankroll * (fraction_pct / 100.0))
}
