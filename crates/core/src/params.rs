//! Helpers for reading typed settings out of a `serde_json::Value` object.
//!
//! Each helper takes a JSON value, a key name, and a default. If the key is
//! missing or the value is not the expected type, the default is returned.
//! Range checks are left to [`ClassifierConfig::validate`](crate::ClassifierConfig::validate).

use serde_json::Value;

/// Extracts an `f64` from `params[name]`, returning `default` if missing or wrong type.
///
/// Accepts both JSON numbers (including integers) and converts them to f64.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts a `usize` from `params[name]`, returning `default` if missing or wrong type.
///
/// Only succeeds if the JSON value is a non-negative integer that fits in `usize`.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(default)
}

/// Extracts a `u32` from `params[name]`, returning `default` if missing,
/// wrong type, or too large.
pub fn param_u32(params: &Value, name: &str, default: u32) -> u32 {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn param_f64_extracts_existing_float() {
        let params = json!({"min_sat": 0.25});
        assert!((param_f64(&params, "min_sat", 0.15) - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_extracts_integer_as_float() {
        let params = json!({"min_val": 1});
        assert!((param_f64(&params, "min_val", 0.0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_returns_default_when_key_missing() {
        let params = json!({"other": 1.0});
        assert!((param_f64(&params, "min_sat", 0.15) - 0.15).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_returns_default_when_wrong_type() {
        let params = json!({"min_sat": "high"});
        assert!((param_f64(&params, "min_sat", 0.15) - 0.15).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_returns_default_for_non_object() {
        let params = json!([1, 2, 3]);
        assert!((param_f64(&params, "min_sat", 0.15) - 0.15).abs() < f64::EPSILON);
    }

    #[test]
    fn param_usize_extracts_integer() {
        let params = json!({"bins": 12});
        assert_eq!(param_usize(&params, "bins", 36), 12);
    }

    #[test]
    fn param_usize_rejects_negative_and_float() {
        assert_eq!(param_usize(&json!({"bins": -4}), "bins", 36), 36);
        assert_eq!(param_usize(&json!({"bins": 4.5}), "bins", 36), 36);
    }

    #[test]
    fn param_u32_rejects_values_above_u32_max() {
        let params = json!({"sample_width": 5_000_000_000u64});
        assert_eq!(param_u32(&params, "sample_width", 50), 50);
    }

    #[test]
    fn param_u32_extracts_integer() {
        let params = json!({"sample_height": 64});
        assert_eq!(param_u32(&params, "sample_height", 50), 64);
    }

    #[test]
    fn param_helpers_return_default_for_null() {
        let params = json!({"bins": null, "min_sat": null});
        assert_eq!(param_usize(&params, "bins", 36), 36);
        assert!((param_f64(&params, "min_sat", 0.15) - 0.15).abs() < f64::EPSILON);
    }
}
