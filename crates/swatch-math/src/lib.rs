//! Deterministic numeric helpers for similarity and merge scoring.

#![forbid(unsafe_code)]

/// Absolute tolerance under which two numeric property values are equal.
pub const NUMERIC_TOLERANCE: f64 = 0.01;

/// Round a floating point value to `decimals` decimal places.
#[must_use]
pub fn round_f64(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Unrounded ratio that guards division by zero.
///
/// Thresholds compare against this value directly; it is never rounded.
#[must_use]
pub fn ratio(numer: f64, denom: usize) -> f64 {
    if denom == 0 {
        0.0
    } else {
        numer / denom as f64
    }
}

/// Return a 4-decimal ratio and guard division by zero.
#[must_use]
pub fn safe_ratio(numer: usize, denom: usize) -> f64 {
    round_f64(ratio(numer as f64, denom), 4)
}

/// Clamp into `[0, 1]`. NaN maps to 0.
#[must_use]
pub fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Numeric equality within [`NUMERIC_TOLERANCE`].
#[must_use]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < NUMERIC_TOLERANCE
}

/// Render a number the way style keys spell it: integral values without a
/// fractional part (`16`, not `16.0`).
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
