use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

/// Domain-specific error types for the calculators.
/// Degenerate inputs must surface here instead of leaking NaN/Infinity:
/// - Unsupported enumerations are rejected by name
/// - Zero denominators get a dedicated variant per formula
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalcError {
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("degenerate odds {0}: net payout is zero")]
    DegenerateOdds(f64),

    #[error("zero cost basis: buy price times amount must be positive")]
    ZeroCostBasis,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("non-finite result: {0}")]
    NonFinite(&'static str),

    #[error("config error: {0}")]
    Config(String),
}

pub type CalcResult<T> = Result<T, CalcError>;

impl IntoResponse for CalcError {
    fn into_response(self) -> Response {
        let status = match self {
            CalcError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        };
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
