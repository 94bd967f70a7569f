use crate::betting::odds::{decimal_to_american, format_american, OddsFormat};
use crate::errors::CalcResult;
use crate::numeric::{ensure_finite, round2};
use smallvec::SmallVec;

/// Parlay (accumulator) pricing.
///
/// Combined decimal odds are the product of every leg's decimal odds; the
/// payout is the stake times that product. An empty parlay prices at 1.0.

/// Parlay legs as decimal odds. Typical slips stay inline.
pub type ParlayLegs = SmallVec<[f64; 8]>;

/// Combined parlay price in the requested format.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParlayQuote {
    Decimal(f64),
    American(i64),
}

impl std::fmt::Display for ParlayQuote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Decimal(odds) => write!(f, "{odds:.2}"),
            Self::American(line) => write!(f, "{}", format_american(*line)),
        }
    }
}

#[inline]
pub fn combined_decimal_odds(legs: &[f64]) -> f64 {
    legs.iter().product()
}

/// Price the parlay in `format`.
pub fn parlay_odds(legs: &[f64], format: OddsFormat) -> CalcResult<ParlayQuote> {
    let product = ensure_finite(combined_decimal_odds(legs), "parlay odds")?;
    match format {
        OddsFormat::Decimal => Ok(ParlayQuote::Decimal(round2(product))),
        OddsFormat::American => decimal_to_american(product).map(ParlayQuote::American),
    }
}

/// Total return (stake included) if every leg wins.
#[inline]
pub fn parlay_payout(stake: f64, legs: &[f64]) -> CalcResult<f64> {
    let payout = ensure_finite(stake * combined_decimal_odds(legs), "parlay payout")?;
    Ok(round2(payout))
}
