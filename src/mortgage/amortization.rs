//! Fixed-rate mortgage amortization.
//!
//! The principal-and-interest payment is the standard annuity:
//!
//!   M = P * r * (1 + r)^n / ((1 + r)^n - 1)
//!
//! with `r` the monthly rate and `n` the number of months. Each schedule row
//! charges interest on the remaining balance and applies the rest of the
//! payment to principal. The final row absorbs any floating-point drift so the
//! loan closes at exactly zero.

use crate::errors::{CalcError, CalcResult};
use crate::numeric::{ensure_finite, ensure_non_negative, round2};

pub const MONTHS_PER_YEAR: u32 = 12;
pub const MAX_TERM_YEARS: u32 = 100;
/// Drift on the closing balance beyond this is logged as a formula regression.
pub const DRIFT_TOLERANCE: f64 = 0.01;

/// Loan parameters. Taxes, insurance and PMI are annual amounts.
#[derive(Debug, Clone, Copy, serde::Deserialize)]
pub struct MortgageInput {
    pub loan_amount: f64,
    pub annual_rate_pct: f64,
    pub term_years: u32,
    #[serde(default)]
    pub down_payment: f64,
    #[serde(default)]
    pub property_tax: f64,
    #[serde(default)]
    pub insurance: f64,
    #[serde(default)]
    pub pmi: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct MonthlyBreakdown {
    pub principal_and_interest: f64,
    pub property_tax: f64,
    pub insurance: f64,
    pub pmi: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct ScheduleRow {
    pub month: u32,
    pub year: u32,
    pub payment: f64,
    pub principal: f64,
    pub interest: f64,
    pub balance: f64,
    pub total_principal: f64,
    pub total_interest: f64,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MortgageResult {
    /// Loan amount less down payment
    pub financed_amount: f64,
    pub monthly: MonthlyBreakdown,
    pub total_interest: f64,
    /// Every payment over the term, escrow items included
    pub total_cost: f64,
    pub schedule: Vec<ScheduleRow>,
}

/// Fixed monthly principal-and-interest payment. A zero rate repays
/// principal in equal instalments.
#[inline]
pub fn monthly_payment(principal: f64, annual_rate_pct: f64, months: u32) -> f64 {
    if months == 0 {
        return 0.0;
    }
    let n = f64::from(months);
    let r = annual_rate_pct / 100.0 / f64::from(MONTHS_PER_YEAR);
    if r == 0.0 {
        return principal / n;
    }
    let growth = (1.0 + r).powf(n);
    principal * r * growth / (growth - 1.0)
}

fn validate(input: &MortgageInput) -> CalcResult<u32> {
    ensure_non_negative(input.loan_amount, "loan_amount")?;
    ensure_non_negative(input.annual_rate_pct, "annual_rate_pct")?;
    ensure_non_negative(input.down_payment, "down_payment")?;
    ensure_non_negative(input.property_tax, "property_tax")?;
    ensure_non_negative(input.insurance, "insurance")?;
    ensure_non_negative(input.pmi, "pmi")?;

    if input.term_years == 0 || input.term_years > MAX_TERM_YEARS {
        return Err(CalcError::InvalidInput(format!(
            "term must be between 1 and {MAX_TERM_YEARS} years, got {}",
            input.term_years
        )));
    }
    if input.down_payment > input.loan_amount {
        return Err(CalcError::InvalidInput(format!(
            "down payment {} exceeds loan amount {}",
            input.down_payment, input.loan_amount
        )));
    }

    Ok(input.term_years * MONTHS_PER_YEAR)
}

/// Compute the payment breakdown and the full month-by-month schedule.
pub fn amortize(input: &MortgageInput) -> CalcResult<MortgageResult> {
    let months = validate(input)?;
    let financed = input.loan_amount - input.down_payment;
    let rate = input.annual_rate_pct / 100.0 / f64::from(MONTHS_PER_YEAR);
    let payment = ensure_finite(
        monthly_payment(financed, input.annual_rate_pct, months),
        "monthly payment",
    )?;

    let mut schedule = Vec::with_capacity(months as usize);
    let mut balance = financed;
    let mut total_principal = 0.0;
    let mut total_interest = 0.0;
    let mut total_paid = 0.0;

    for month in 1..=months {
        let interest = balance * rate;
        let mut principal = payment - interest;

        if month == months {
            let drift = balance - principal;
            if drift.abs() > DRIFT_TOLERANCE {
                tracing::warn!(
                    drift,
                    financed,
                    rate_pct = input.annual_rate_pct,
                    months,
                    "amortization drift above tolerance, clamping final balance"
                );
            }
            principal = balance;
        }

        balance = (balance - principal).max(0.0);
        total_principal += principal;
        total_interest += interest;
        total_paid += principal + interest;

        schedule.push(ScheduleRow {
            month,
            year: (month - 1) / MONTHS_PER_YEAR + 1,
            payment: round2(principal + interest),
            principal: round2(principal),
            interest: round2(interest),
            balance: round2(balance),
            total_principal: round2(total_principal),
            total_interest: round2(total_interest),
        });
    }

    let periods_per_year = f64::from(MONTHS_PER_YEAR);
    let property_tax = input.property_tax / periods_per_year;
    let insurance = input.insurance / periods_per_year;
    let pmi = input.pmi / periods_per_year;
    let escrow = property_tax + insurance + pmi;

    let total_cost = ensure_finite(total_paid + escrow * f64::from(months), "total cost")?;
    let monthly_total = ensure_finite(payment + escrow, "monthly total")?;

    Ok(MortgageResult {
        financed_amount: round2(financed),
        monthly: MonthlyBreakdown {
            principal_and_interest: round2(payment),
            property_tax: round2(property_tax),
            insurance: round2(insurance),
            pmi: round2(pmi),
            total: round2(monthly_total),
        },
        total_interest: round2(ensure_finite(total_interest, "total interest")?),
        total_cost: round2(total_cost),
        schedule,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loan(loan_amount: f64, annual_rate_pct: f64, term_years: u32) -> MortgageInput {
        MortgageInput {
            loan_amount,
            annual_rate_pct,
            term_years,
            down_payment: 0.0,
            property_tax: 0.0,
            insurance: 0.0,
            pmi: 0.0,
        }
    }

    #[test]
    fn test_standard_30_year_payment() {
        // 200k at 6% over 30 years: 1199.10
        let result = amortize(&loan(200_000.0, 6.0, 30)).unwrap();
        assert_eq!(result.monthly.principal_and_interest, 1199.10);
        assert_eq!(result.schedule.len(), 360);
    }

    #[test]
    fn test_schedule_closes_at_zero() {
        let result = amortize(&loan(350_000.0, 7.25, 15)).unwrap();
        let last = result.schedule.last().unwrap();
        assert_eq!(last.balance, 0.0);
        assert_eq!(last.month, 180);
        assert_eq!(last.year, 15);
    }

    #[test]
    fn test_principal_sums_to_financed_amount() {
        let mut input = loan(400_000.0, 5.5, 30);
        input.down_payment = 80_000.0;
        let result = amortize(&input).unwrap();
        let sum: f64 = result.schedule.iter().map(|r| r.principal).sum();
        let tolerance = 0.01 * result.schedule.len() as f64;
        assert!(
            (sum - 320_000.0).abs() <= tolerance,
            "principal sum {sum} should match financed amount"
        );
        assert_eq!(result.financed_amount, 320_000.0);
    }

    #[test]
    fn test_balance_strictly_decreasing() {
        let result = amortize(&loan(150_000.0, 4.0, 10)).unwrap();
        for pair in result.schedule.windows(2) {
            assert!(
                pair[1].balance < pair[0].balance,
                "balance must fall: month {} {} -> {}",
                pair[1].month,
                pair[0].balance,
                pair[1].balance
            );
            assert!(pair[1].balance >= 0.0);
        }
    }

    #[test]
    fn test_zero_rate() {
        let result = amortize(&loan(12_000.0, 0.0, 1)).unwrap();
        assert_eq!(result.monthly.principal_and_interest, 1000.0);
        assert_eq!(result.total_interest, 0.0);
        assert_eq!(result.schedule.last().unwrap().balance, 0.0);
    }

    #[test]
    fn test_escrow_items_added() {
        let mut input = loan(200_000.0, 6.0, 30);
        input.property_tax = 2400.0;
        input.insurance = 1200.0;
        input.pmi = 600.0;
        let result = amortize(&input).unwrap();
        assert_eq!(result.monthly.property_tax, 200.0);
        assert_eq!(result.monthly.insurance, 100.0);
        assert_eq!(result.monthly.pmi, 50.0);
        assert_eq!(result.monthly.total, 1549.10);
        let expected_cost = result.monthly.principal_and_interest * 360.0 + 350.0 * 360.0;
        assert!((result.total_cost - expected_cost).abs() < 5.0);
    }

    #[test]
    fn test_running_totals() {
        let result = amortize(&loan(100_000.0, 3.0, 5)).unwrap();
        let last = result.schedule.last().unwrap();
        assert_eq!(last.total_principal, 100_000.0);
        assert_eq!(last.total_interest, result.total_interest);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(amortize(&loan(100_000.0, 3.0, 0)).is_err());
        assert!(amortize(&loan(-1.0, 3.0, 30)).is_err());
        assert!(amortize(&loan(100_000.0, 3.0, MAX_TERM_YEARS + 1)).is_err());
        let mut input = loan(100_000.0, 3.0, 30);
        input.down_payment = 200_000.0;
        assert!(matches!(amortize(&input), Err(CalcError::InvalidInput(_))));
    }

    #[test]
    fn test_overflowing_totals_rejected() {
        let mut input = loan(100_000.0, 3.0, 30);
        input.property_tax = f64::MAX;
        assert_eq!(amortize(&input), Err(CalcError::NonFinite("total cost")));
    }

    #[test]
    fn test_idempotent() {
        let input = loan(275_000.0, 6.875, 30);
        assert_eq!(amortize(&input), amortize(&input));
    }
}
