use crate::errors::{CalcError, CalcResult};
use crate::numeric::{ensure_finite, ensure_non_negative, round2};

/// Spot trade profit/loss.
///
/// cost     = amount * buy_price
/// fees     = cost * fees_pct / 100
/// profit   = amount * sell_price - cost - fees
/// profit % = profit / cost * 100
///
/// A zero cost basis has no defined percentage and is rejected.

/// Trade inputs. Stack-allocated.
#[derive(Debug, Clone, Copy, serde::Deserialize)]
pub struct TradeParams {
    pub buy_price: f64,
    pub sell_price: f64,
    pub amount: f64,
    #[serde(default)]
    pub fees_pct: f64, // Fee on the cost basis, percent
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct CryptoProfit {
    pub cost_basis: f64,
    pub proceeds: f64,
    pub fees: f64,
    pub profit: f64,
    pub profit_percentage: f64,
}

pub fn crypto_profit(params: &TradeParams) -> CalcResult<CryptoProfit> {
    let buy = ensure_non_negative(params.buy_price, "buy_price")?;
    let sell = ensure_non_negative(params.sell_price, "sell_price")?;
    let amount = ensure_non_negative(params.amount, "amount")?;
    let fees_pct = ensure_non_negative(params.fees_pct, "fees_pct")?;

    let cost_basis = amount * buy;
    if cost_basis == 0.0 {
        return Err(CalcError::ZeroCostBasis);
    }

    let proceeds = amount * sell;
    let fees = cost_basis * fees_pct / 100.0;
    let profit = proceeds - cost_basis - fees;
    let profit_percentage = ensure_finite(profit / cost_basis * 100.0, "profit percentage")?;

    Ok(CryptoProfit {
        cost_basis: round2(cost_basis),
        proceeds: round2(proceeds),
        fees: round2(fees),
        profit: round2(profit),
        profit_percentage: round2(profit_percentage),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trade(buy_price: f64, sell_price: f64, amount: f64, fees_pct: f64) -> TradeParams {
        TradeParams { buy_price, sell_price, amount, fees_pct }
    }

    #[test]
    fn test_profitable_trade_with_fees() {
        // cost 2000, proceeds 3000, fees 20 -> profit 980 (49%)
        let result = crypto_profit(&trade(20_000.0, 30_000.0, 0.1, 1.0)).unwrap();
        assert_eq!(result.cost_basis, 2000.0);
        assert_eq!(result.fees, 20.0);
        assert_eq!(result.profit, 980.0);
        assert_eq!(result.profit_percentage, 49.0);
    }

    #[test]
    fn test_losing_trade() {
        let result = crypto_profit(&trade(100.0, 80.0, 10.0, 0.0)).unwrap();
        assert_eq!(result.profit, -200.0);
        assert_eq!(result.profit_percentage, -20.0);
    }

    #[test]
    fn test_zero_cost_basis_rejected() {
        assert_eq!(
            crypto_profit(&trade(0.0, 80.0, 10.0, 0.0)),
            Err(CalcError::ZeroCostBasis)
        );
        assert_eq!(
            crypto_profit(&trade(100.0, 80.0, 0.0, 0.0)),
            Err(CalcError::ZeroCostBasis)
        );
    }

    #[test]
    fn test_negative_inputs_rejected() {
        assert!(matches!(
            crypto_profit(&trade(-1.0, 80.0, 10.0, 0.0)),
            Err(CalcError::InvalidInput(_))
        ));
    }
}
