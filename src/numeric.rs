//! Shared numeric helpers.
//!
//! Every displayed amount in the crate goes through `round2`, so the rounding
//! rule lives in exactly one place: round half away from zero at two decimals.

use crate::errors::{CalcError, CalcResult};

/// Round to two decimals, half away from zero. Normalises `-0.0` to `0.0`.
/// Magnitudes too large to scale by 100 carry no cents and pass through.
#[inline]
pub fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    if !scaled.is_finite() {
        return value;
    }
    let rounded = scaled.round() / 100.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Reject NaN/Infinity produced by a formula.
#[inline]
pub fn ensure_finite(value: f64, what: &'static str) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::NonFinite(what))
    }
}

/// Reject negative or non-finite inputs for money/rate fields.
#[inline]
pub fn ensure_non_negative(value: f64, field: &str) -> CalcResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(CalcError::InvalidInput(format!(
            "{field} must be a non-negative number, got {value}"
        )));
    }
    Ok(value)
}
