//! Simple and compound interest, and nominal-to-effective rate conversion.
//!
//! Rates are percentages. Compounding tables live here so staking and savings
//! calculators share one definition of a "period".

use crate::errors::{CalcError, CalcResult};
use crate::numeric::{ensure_finite, ensure_non_negative, round2};
use std::str::FromStr;

pub const DAYS_PER_YEAR: f64 = 365.0;
pub const DAILY_PERIODS: u32 = 365;
pub const WEEKLY_PERIODS: u32 = 52;
pub const MONTHLY_PERIODS: u32 = 12;

/// How often accrued rewards are added back to principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compounding {
    None,
    Daily,
    Weekly,
    Monthly,
}

impl Compounding {
    /// Compounding periods per year; `None` for simple interest.
    #[inline]
    pub fn periods_per_year(self) -> Option<u32> {
        match self {
            Self::None => None,
            Self::Daily => Some(DAILY_PERIODS),
            Self::Weekly => Some(WEEKLY_PERIODS),
            Self::Monthly => Some(MONTHLY_PERIODS),
        }
    }
}

impl FromStr for Compounding {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            _ => Err(CalcError::UnsupportedFormat(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct CompoundInterest {
    pub final_amount: f64,
    pub interest: f64,
}

/// P * r * t
#[inline]
pub fn simple_interest(principal: f64, rate_pct: f64, years: f64) -> CalcResult<f64> {
    let interest = ensure_finite(principal * (rate_pct / 100.0) * years, "simple interest")?;
    Ok(round2(interest))
}

/// P * (1 + r/n)^(n*t)
pub fn compound_interest(
    principal: f64,
    rate_pct: f64,
    years: f64,
    periods_per_year: u32,
) -> CalcResult<CompoundInterest> {
    ensure_non_negative(principal, "principal")?;
    ensure_non_negative(years, "years")?;
    if periods_per_year == 0 {
        return Err(CalcError::InvalidInput(
            "periods per year must be at least 1".to_string(),
        ));
    }

    let n = f64::from(periods_per_year);
    let growth = (1.0 + rate_pct / 100.0 / n).powf(n * years);
    let final_amount = ensure_finite(principal * growth, "compound amount")?;

    Ok(CompoundInterest {
        final_amount: round2(final_amount),
        interest: round2(final_amount - principal),
    })
}

/// Effective annual yield for a nominal APR, in percent.
pub fn apr_to_apy(apr_pct: f64, compounding: Compounding) -> CalcResult<f64> {
    let apy = match compounding.periods_per_year() {
        None => apr_pct,
        Some(periods) => {
            let n = f64::from(periods);
            ((1.0 + apr_pct / 100.0 / n).powf(n) - 1.0) * 100.0
        }
    };
    Ok(round2(ensure_finite(apy, "effective apy")?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_interest() {
        assert_eq!(simple_interest(1000.0, 5.0, 3.0), Ok(150.0));
        assert_eq!(simple_interest(0.0, 5.0, 3.0), Ok(0.0));
    }

    #[test]
    fn test_overflow_reported() {
        assert!(matches!(
            simple_interest(1e300, 1e300, 1.0),
            Err(CalcError::NonFinite(_))
        ));
        assert!(matches!(
            compound_interest(1e300, 1e6, 100.0, DAILY_PERIODS),
            Err(CalcError::NonFinite(_))
        ));
        assert!(matches!(
            apr_to_apy(1e6, Compounding::Daily),
            Err(CalcError::NonFinite(_))
        ));
    }

    #[test]
    fn test_compound_interest_annual() {
        // 1000 * 1.1^2 = 1210
        let result = compound_interest(1000.0, 10.0, 2.0, 1).unwrap();
        assert_eq!(result.final_amount, 1210.0);
        assert_eq!(result.interest, 210.0);
    }

    #[test]
    fn test_compound_beats_simple() {
        let simple = simple_interest(1000.0, 12.0, 1.0).unwrap();
        let monthly = compound_interest(1000.0, 12.0, 1.0, MONTHLY_PERIODS).unwrap();
        assert!(monthly.interest > simple, "{} should exceed {simple}", monthly.interest);
        assert_eq!(monthly.interest, 126.83);
    }

    #[test]
    fn test_compound_rejects_zero_periods() {
        assert!(compound_interest(1000.0, 5.0, 1.0, 0).is_err());
        assert!(compound_interest(-1.0, 5.0, 1.0, 12).is_err());
    }

    #[test]
    fn test_apr_to_apy() {
        assert_eq!(apr_to_apy(12.0, Compounding::None), Ok(12.0));
        assert_eq!(apr_to_apy(12.0, Compounding::Monthly), Ok(12.68));
        let daily = apr_to_apy(12.0, Compounding::Daily).unwrap();
        let weekly = apr_to_apy(12.0, Compounding::Weekly).unwrap();
        assert!(daily > weekly, "daily {daily} should beat weekly {weekly}");
    }

    #[test]
    fn test_parse_compounding() {
        assert_eq!("daily".parse::<Compounding>(), Ok(Compounding::Daily));
        assert!("Daily".parse::<Compounding>().is_err());
        assert!(" monthly".parse::<Compounding>().is_err());
        assert!("hourly".parse::<Compounding>().is_err());
        assert_eq!(Compounding::Weekly.periods_per_year(), Some(52));
        assert_eq!(Compounding::None.periods_per_year(), None);
    }
}
