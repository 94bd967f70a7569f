use crate::errors::CalcResult;
use crate::numeric::{ensure_finite, round2};

/// Expected value and return on investment for a single bet.
///
/// EV  = p * stake * (odds - 1) - (1 - p) * stake
/// ROI = (p * odds - 1) * 100
///
/// where:
///   p = win probability (probability_pct / 100)
///   odds = decimal odds, stake included
///
/// Pure functions, no allocations. Inputs are assumed pre-validated.

/// Bet parameters. Stack-allocated.
#[derive(Debug, Clone, Copy, serde::Deserialize)]
pub struct BetParams {
    pub probability: f64, // Win probability in percent [0, 100]
    pub odds: f64,        // Decimal odds (>= 1)
    pub stake: f64,       // Amount wagered (>= 0)
}

/// EV summary. Stack-allocated.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct EvResult {
    /// Signed expected profit in currency units
    pub expected_value: f64,
    /// Expected return per unit staked, in percent
    pub roi: f64,
    /// Whether the bet has positive expectation
    pub is_positive: bool,
}

/// Expected profit of staking `stake` at `decimal_odds`, rounded to cents.
#[inline]
pub fn expected_value(probability_pct: f64, decimal_odds: f64, stake: f64) -> CalcResult<f64> {
    let p = probability_pct / 100.0;
    let win = p * (stake * (decimal_odds - 1.0));
    let lose = (1.0 - p) * stake;
    Ok(round2(ensure_finite(win - lose, "expected value")?))
}

/// Expected return in percent, independent of stake.
#[inline]
pub fn roi(probability_pct: f64, decimal_odds: f64) -> CalcResult<f64> {
    let p = probability_pct / 100.0;
    Ok(round2(ensure_finite((p * decimal_odds - 1.0) * 100.0, "roi")?))
}

pub fn compute_ev(params: &BetParams) -> CalcResult<EvResult> {
    let expected_value = expected_value(params.probability, params.odds, params.stake)?;
    Ok(EvResult {
        expected_value,
        roi: roi(params.probability, params.odds)?,
        is_positive: expected_value > 0.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CalcError;

    #[test]
    fn test_fair_bet_zero_ev() {
        // 50% at even money
        assert_eq!(expected_value(50.0, 2.0, 100.0), Ok(0.0));
        assert_eq!(roi(50.0, 2.0), Ok(0.0));
    }

    #[test]
    fn test_edge_positive_ev() {
        // 60% at 2.0: 0.6*100 - 0.4*100 = 20
        assert_eq!(expected_value(60.0, 2.0, 100.0), Ok(20.0));
        assert_eq!(roi(60.0, 2.0), Ok(20.0));
    }

    #[test]
    fn test_negative_ev() {
        // 25% at 3.0: 0.25*200 - 0.75*100 = -25
        assert_eq!(expected_value(25.0, 3.0, 100.0), Ok(-25.0));
        assert_eq!(roi(25.0, 3.0), Ok(-25.0));
    }

    #[test]
    fn test_linear_in_stake() {
        for &(p, odds, stake) in &[(37.0, 2.9, 40.0), (80.0, 1.25, 12.5), (5.0, 21.0, 333.0)] {
            let single = expected_value(p, odds, stake).unwrap();
            let double = expected_value(p, odds, 2.0 * stake).unwrap();
            assert!(
                (double - 2.0 * single).abs() <= 0.01 + 1e-9,
                "EV should scale with stake: {double} vs 2*{single}"
            );
        }
    }

    #[test]
    fn test_compute_ev_flags_positive() {
        let result = compute_ev(&BetParams { probability: 70.0, odds: 1.8, stake: 10.0 }).unwrap();
        assert!(result.is_positive);
        assert_eq!(result.expected_value, 2.6);
        assert_eq!(result.roi, 26.0);
    }

    #[test]
    fn test_huge_stake_stays_finite() {
        // 50% at 3.0 returns half the stake; 1e307 must not overflow through rounding
        assert_eq!(expected_value(50.0, 3.0, 1e307), Ok(0.5e307));
    }

    #[test]
    fn test_overflow_reported() {
        assert_eq!(
            expected_value(50.0, 3.0, f64::MAX),
            Err(CalcError::NonFinite("expected value"))
        );
        assert!(compute_ev(&BetParams { probability: 50.0, odds: 1e308, stake: 10.0 }).is_err());
    }

    #[test]
    fn test_idempotent() {
        let a = compute_ev(&BetParams { probability: 33.3, odds: 3.1, stake: 17.0 });
        let b = compute_ev(&BetParams { probability: 33.3, odds: 3.1, stake: 17.0 });
        assert_eq!(a, b);
    }
}
