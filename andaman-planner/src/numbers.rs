//! Numeric coercion helpers centralizing safe conversions for prices and durations.

use num_traits::cast::cast;
use serde_json::Value;

/// Read a JSON value as a finite `f64`, rejecting strings, NaN and infinities.
#[must_use]
pub fn finite_number(value: &Value) -> Option<f64> {
    value.as_f64().filter(|n| n.is_finite())
}

/// Coerce a raw price to whole rupees. Missing, non-finite or negative input is 0.
#[must_use]
pub fn coerce_amount(value: Option<&Value>) -> i64 {
    value
        .and_then(finite_number)
        .map_or(0, |n| round_f64_to_i64(n).max(0))
}

/// Round a f64 and clamp it to the i64 range, returning 0 for non-finite values.
#[must_use]
pub fn round_f64_to_i64(value: f64) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    let min = cast::<i64, f64>(i64::MIN).unwrap_or(f64::MIN);
    let max = cast::<i64, f64>(i64::MAX).unwrap_or(f64::MAX);
    let clamped = value.clamp(min, max).round();
    // i64::MAX is not representable as f64; the clamp lands one past it.
    cast::<f64, i64>(clamped).unwrap_or(if clamped > 0.0 { i64::MAX } else { 0 })
}

/// Convert i64 to f64 while allowing precision loss in a single location.
#[must_use]
pub fn i64_to_f64(value: i64) -> f64 {
    cast::<i64, f64>(value).unwrap_or(0.0)
}

/// Convert a count to i64 for price multiplication, saturating on overflow.
#[must_use]
pub fn count_to_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
