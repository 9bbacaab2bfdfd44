//! Tolerant deserializers for numeric telemetry leaves.
//!
//! A missing, `null` or wrongly-typed number becomes `None` instead of
//! rejecting the whole frame, so the rest of the snapshot still reaches the
//! operator.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Any finite JSON number.
pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_f64().filter(|v| v.is_finite()))
}

/// A non-negative integer; integral floats such as `250.0` are accepted.
pub fn unsigned<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if let Some(n) = value.as_u64() {
        return Ok(Some(n));
    }
    Ok(value
        .as_f64()
        .filter(|v| v.is_finite() && *v >= 0.0 && v.fract() == 0.0)
        .map(|v| v as u64))
}
