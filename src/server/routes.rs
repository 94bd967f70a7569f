use crate::betting::ev::{compute_ev, BetParams, EvResult};
use crate::betting::kelly::{compute_kelly, stake_for, KellyResult};
use crate::betting::odds::{
    american_to_decimal, decimal_to_american, format_american, implied_probability, OddsFormat,
};
use crate::betting::parlay::{combined_decimal_odds, parlay_odds, parlay_payout, ParlayLegs};
use crate::betting::{validate_decimal_odds, validate_probability_pct};
use crate::crypto::halving::{block_reward_after_halving, halving_estimate, HalvingEstimate};
use crate::crypto::profit::{crypto_profit, CryptoProfit, TradeParams};
use crate::crypto::staking::{staking_breakdown, StakingRewards};
use crate::errors::{CalcError, CalcResult};
use crate::interest::{compound_interest, simple_interest, CompoundInterest, Compounding};
use crate::mortgage::amortization::{amortize, MortgageInput, MortgageResult};
use crate::numeric::{ensure_finite, ensure_non_negative, round2};
use crate::state::AppState;
use axum::extract::State;
use axum::response::Json;
use std::sync::Arc;

type ApiResult<T> = Result<Json<T>, CalcError>;

/// Count the outcome and hand the result to axum.
fn respond<T>(state: &AppState, route: &'static str, result: CalcResult<T>) -> ApiResult<T> {
    match result {
        Ok(value) => {
            state.counters.record_served();
            Ok(Json(value))
        }
        Err(e) => {
            state.counters.record_rejected();
            tracing::debug!(route, "calculation rejected: {e}");
            Err(e)
        }
    }
}

fn default_decimal() -> String {
    "decimal".to_string()
}

fn default_compounding() -> String {
    "none".to_string()
}

// ── Betting ──

/// POST /api/betting/ev
pub async fn post_ev(
    State(state): State<Arc<AppState>>,
    Json(params): Json<BetParams>,
) -> ApiResult<EvResult> {
    respond(&state, "betting/ev", calc_ev(&params))
}

fn calc_ev(params: &BetParams) -> CalcResult<EvResult> {
    validate_probability_pct(params.probability)?;
    validate_decimal_odds(params.odds)?;
    ensure_non_negative(params.stake, "stake")?;
    compute_ev(params)
}

#[derive(serde::Deserialize)]
pub struct KellyRequest {
    pub probability: f64,
    pub odds: f64,
    pub bankroll: Option<f64>,
}

#[derive(Debug, serde::Serialize)]
pub struct KellyResponse {
    #[serde(flatten)]
    pub fractions: KellyResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stakes: Option<KellyResult>,
}

/// POST /api/betting/kelly
pub async fn post_kelly(
    State(state): State<Arc<AppState>>,
    Json(req): Json<KellyRequest>,
) -> ApiResult<KellyResponse> {
    respond(&state, "betting/kelly", calc_kelly(&req))
}

fn calc_kelly(req: &KellyRequest) -> CalcResult<KellyResponse> {
    validate_probability_pct(req.probability)?;
    validate_decimal_odds(req.odds)?;
    let fractions = compute_kelly(req.probability, req.odds);
    let stakes = match req.bankroll {
        Some(bankroll) => {
            let bankroll = ensure_non_negative(bankroll, "bankroll")?;
            Some(KellyResult {
                full: stake_for(bankroll, fractions.full),
                half: stake_for(bankroll, fractions.half),
                quarter: stake_for(bankroll, fractions.quarter),
            })
        }
        None => None,
    };
    Ok(KellyResponse { fractions, stakes })
}

#[derive(serde::Deserialize)]
pub struct ParlayRequest {
    pub legs: ParlayLegs,
    #[serde(default = "default_decimal")]
    pub format: String,
    pub stake: Option<f64>,
}

#[derive(Debug, serde::Serialize)]
pub struct ParlayResponse {
    pub format: OddsFormat,
    pub odds: String,
    pub decimal_odds: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payout: Option<f64>,
}

/// POST /api/betting/parlay
pub async fn post_parlay(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ParlayRequest>,
) -> ApiResult<ParlayResponse> {
    respond(&state, "betting/parlay", calc_parlay(&req))
}

fn calc_parlay(req: &ParlayRequest) -> CalcResult<ParlayResponse> {
    let format = req.format.parse::<OddsFormat>()?;
    for &leg in &req.legs {
        validate_decimal_odds(leg)?;
    }
    let quote = parlay_odds(&req.legs, format)?;
    let payout = match req.stake {
        Some(stake) => Some(parlay_payout(ensure_non_negative(stake, "stake")?, &req.legs)?),
        None => None,
    };
    Ok(ParlayResponse {
        format,
        odds: quote.to_string(),
        decimal_odds: round2(ensure_finite(combined_decimal_odds(&req.legs), "parlay odds")?),
        payout,
    })
}

#[derive(serde::Deserialize)]
pub struct ConvertRequest {
    pub value: f64,
    #[serde(default = "default_decimal")]
    pub from: String,
}

#[derive(Debug, serde::Serialize)]
pub struct ConvertResponse {
    pub decimal: f64,
    pub american: String,
    pub implied_probability: f64,
}

/// POST /api/betting/convert
pub async fn post_convert(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ConvertRequest>,
) -> ApiResult<ConvertResponse> {
    respond(&state, "betting/convert", calc_convert(&req))
}

fn calc_convert(req: &ConvertRequest) -> CalcResult<ConvertResponse> {
    let decimal = match req.from.parse::<OddsFormat>()? {
        OddsFormat::Decimal => validate_decimal_odds(req.value)?,
        OddsFormat::American => american_to_decimal(req.value)?,
    };
    Ok(ConvertResponse {
        decimal: round2(decimal),
        american: format_american(decimal_to_american(decimal)?),
        implied_probability: implied_probability(decimal)?,
    })
}

// ── Crypto ──

#[derive(serde::Deserialize)]
pub struct HalvingRequest {
    pub current_block_height: u64,
    pub current_reward: Option<f64>,
}

#[derive(Debug, serde::Serialize)]
pub struct HalvingResponse {
    #[serde(flatten)]
    pub estimate: HalvingEstimate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_block_reward: Option<f64>,
}

/// POST /api/crypto/halving
pub async fn post_halving(
    State(state): State<Arc<AppState>>,
    Json(req): Json<HalvingRequest>,
) -> ApiResult<HalvingResponse> {
    respond(&state, "crypto/halving", calc_halving(&state, &req))
}

fn calc_halving(state: &AppState, req: &HalvingRequest) -> CalcResult<HalvingResponse> {
    let estimate = halving_estimate(
        req.current_block_height,
        chrono::Utc::now(),
        &state.config.halving,
    )?;
    let next_block_reward = match req.current_reward {
        Some(reward) => Some(block_reward_after_halving(
            ensure_non_negative(reward, "current_reward")?,
            1,
        )),
        None => None,
    };
    Ok(HalvingResponse {
        estimate,
        next_block_reward,
    })
}

/// POST /api/crypto/profit
pub async fn post_profit(
    State(state): State<Arc<AppState>>,
    Json(params): Json<TradeParams>,
) -> ApiResult<CryptoProfit> {
    respond(&state, "crypto/profit", crypto_profit(&params))
}

#[derive(serde::Deserialize)]
pub struct StakingRequest {
    pub amount: f64,
    pub apr: f64,
    pub period_days: f64,
    #[serde(default = "default_compounding")]
    pub compounding: String,
}

/// POST /api/crypto/staking
pub async fn post_staking(
    State(state): State<Arc<AppState>>,
    Json(req): Json<StakingRequest>,
) -> ApiResult<StakingRewards> {
    respond(&state, "crypto/staking", calc_staking(&req))
}

fn calc_staking(req: &StakingRequest) -> CalcResult<StakingRewards> {
    let compounding = req.compounding.parse::<Compounding>()?;
    let amount = ensure_non_negative(req.amount, "amount")?;
    let apr = ensure_non_negative(req.apr, "apr")?;
    let days = ensure_non_negative(req.period_days, "period_days")?;
    staking_breakdown(amount, apr, days, compounding)
}

// ── Interest ──

#[derive(serde::Deserialize)]
pub struct SimpleInterestRequest {
    pub principal: f64,
    pub rate: f64,
    pub years: f64,
}

#[derive(Debug, serde::Serialize)]
pub struct SimpleInterestResponse {
    pub interest: f64,
    pub final_amount: f64,
}

/// POST /api/interest/simple
pub async fn post_simple_interest(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SimpleInterestRequest>,
) -> ApiResult<SimpleInterestResponse> {
    respond(&state, "interest/simple", calc_simple_interest(&req))
}

fn calc_simple_interest(req: &SimpleInterestRequest) -> CalcResult<SimpleInterestResponse> {
    let principal = ensure_non_negative(req.principal, "principal")?;
    let years = ensure_non_negative(req.years, "years")?;
    let interest = simple_interest(principal, req.rate, years)?;
    let final_amount = ensure_finite(principal + interest, "final amount")?;
    Ok(SimpleInterestResponse {
        interest,
        final_amount: round2(final_amount),
    })
}

#[derive(serde::Deserialize)]
pub struct CompoundInterestRequest {
    pub principal: f64,
    pub rate: f64,
    pub years: f64,
    pub periods_per_year: u32,
}

/// POST /api/interest/compound
pub async fn post_compound_interest(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CompoundInterestRequest>,
) -> ApiResult<CompoundInterest> {
    let result = compound_interest(req.principal, req.rate, req.years, req.periods_per_year);
    respond(&state, "interest/compound", result)
}

// ── Mortgage ──

/// POST /api/mortgage
pub async fn post_mortgage(
    State(state): State<Arc<AppState>>,
    Json(input): Json<MortgageInput>,
) -> ApiResult<MortgageResult> {
    respond(&state, "mortgage", amortize(&input))
}

// ── Service ──

/// GET /api/health
pub async fn get_health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /api/counters -- lock-free reads
pub async fn get_counters(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    use portable_atomic::Ordering::Relaxed;
    Json(serde_json::json!({
        "calculations_served": state.counters.calculations_served.load(Relaxed),
        "calculations_rejected": state.counters.calculations_rejected.load(Relaxed),
    }))
}
