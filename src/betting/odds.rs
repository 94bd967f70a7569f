//! Odds format handling: decimal <-> American conversion and implied probability.

use crate::errors::{CalcError, CalcResult};
use crate::numeric::{ensure_finite, round2};
use std::str::FromStr;

/// Supported odds display formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OddsFormat {
    Decimal,
    American,
}

impl FromStr for OddsFormat {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "decimal" => Ok(Self::Decimal),
            "american" => Ok(Self::American),
            _ => Err(CalcError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Convert decimal odds to an American moneyline.
///
/// Odds of 2.0 and above become `+round((d - 1) * 100)`, shorter odds become
/// `-round(100 / (d - 1))`. Exactly 1.0 has no American representation.
pub fn decimal_to_american(decimal_odds: f64) -> CalcResult<i64> {
    if !decimal_odds.is_finite() || decimal_odds < 1.0 {
        return Err(CalcError::InvalidInput(format!(
            "decimal odds must be at least 1.0, got {decimal_odds}"
        )));
    }

    let net = decimal_odds - 1.0;
    if decimal_odds >= 2.0 {
        Ok((net * 100.0).round() as i64)
    } else if net == 0.0 {
        Err(CalcError::DegenerateOdds(decimal_odds))
    } else {
        let line = ensure_finite(100.0 / net, "american odds")?;
        Ok(-(line.round() as i64))
    }
}

/// Convert an American moneyline to decimal odds. Lines strictly between
/// -100 and +100 do not exist.
pub fn american_to_decimal(american: f64) -> CalcResult<f64> {
    if !american.is_finite() || american.abs() < 100.0 {
        return Err(CalcError::InvalidInput(format!(
            "american odds must be <= -100 or >= +100, got {american}"
        )));
    }

    let decimal = if american > 0.0 {
        1.0 + american / 100.0
    } else {
        1.0 + 100.0 / american.abs()
    };
    Ok(round2(decimal))
}

/// Break-even win probability implied by decimal odds, in percent.
pub fn implied_probability(decimal_odds: f64) -> CalcResult<f64> {
    if !decimal_odds.is_finite() || decimal_odds < 1.0 {
        return Err(CalcError::InvalidInput(format!(
            "decimal odds must be at least 1.0, got {decimal_odds}"
        )));
    }
    Ok(round2(100.0 / decimal_odds))
}

/// Format a moneyline the way bookmakers print it, with an explicit `+` on underdog lines.
pub fn format_american(line: i64) -> String {
    if line > 0 {
        format!("+{line}")
    } else {
        line.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format() {
        assert_eq!("decimal".parse::<OddsFormat>(), Ok(OddsFormat::Decimal));
        assert_eq!("american".parse::<OddsFormat>(), Ok(OddsFormat::American));
        for raw in ["DECIMAL", " American ", "Decimal", ""] {
            assert_eq!(
                raw.parse::<OddsFormat>(),
                Err(CalcError::UnsupportedFormat(raw.to_string())),
                "{raw:?} must be rejected"
            );
        }
        assert_eq!(
            "fractional".parse::<OddsFormat>(),
            Err(CalcError::UnsupportedFormat("fractional".to_string()))
        );
    }

    #[test]
    fn test_decimal_to_american() {
        assert_eq!(decimal_to_american(6.0), Ok(500));
        assert_eq!(decimal_to_american(2.0), Ok(100));
        assert_eq!(decimal_to_american(1.5), Ok(-200));
        assert_eq!(decimal_to_american(1.25), Ok(-400));
    }

    #[test]
    fn test_decimal_to_american_degenerate() {
        assert_eq!(decimal_to_american(1.0), Err(CalcError::DegenerateOdds(1.0)));
        assert!(decimal_to_american(0.5).is_err());
    }

    #[test]
    fn test_american_to_decimal() {
        assert_eq!(american_to_decimal(500.0), Ok(6.0));
        assert_eq!(american_to_decimal(-200.0), Ok(1.5));
        assert_eq!(american_to_decimal(100.0), Ok(2.0));
        assert!(american_to_decimal(50.0).is_err());
        assert!(american_to_decimal(-99.0).is_err());
    }

    #[test]
    fn test_implied_probability() {
        assert_eq!(implied_probability(2.0), Ok(50.0));
        assert_eq!(implied_probability(4.0), Ok(25.0));
        assert_eq!(implied_probability(3.0), Ok(33.33));
    }

    #[test]
    fn test_format_american() {
        assert_eq!(format_american(500), "+500");
        assert_eq!(format_american(-200), "-200");
    }
}
