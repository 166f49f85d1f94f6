//! Helpers for extracting typed parameters from a `serde_json::Value`.
//!
//! If the key is missing or the value has the wrong type, the default is
//! returned; these never fail.

use serde_json::Value;

/// Extracts an `f64` from `params[name]`, returning `default` if missing
/// or wrong type. JSON integers are accepted and widened.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts a `usize` from `params[name]`, returning `default` if missing,
/// negative, fractional, or wrong type.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .map(|v| v as usize)
        .unwrap_or(default)
}

/// Extracts a `bool` from `params[name]`, returning `default` if missing
/// or wrong type.
pub fn param_bool(params: &Value, name: &str, default: bool) -> bool {
    params.get(name).and_then(Value::as_bool).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn param_f64_extracts_float_and_widens_integer() {
        let params = json!({"amplitude": 0.16, "harmonics": 3});
        assert!((param_f64(&params, "amplitude", 0.0) - 0.16).abs() < f64::EPSILON);
        assert!((param_f64(&params, "harmonics", 0.0) - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_falls_back_when_missing_or_wrong_type() {
        let params = json!({"amplitude": "big"});
        assert!((param_f64(&params, "amplitude", 0.12) - 0.12).abs() < f64::EPSILON);
        assert!((param_f64(&params, "absent", 2.0) - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn param_usize_extracts_integer() {
        let params = json!({"vertex_count": 200});
        assert_eq!(param_usize(&params, "vertex_count", 100), 200);
    }

    #[test]
    fn param_usize_rejects_negative_and_fractional() {
        let params = json!({"a": -3, "b": 2.5});
        assert_eq!(param_usize(&params, "a", 7), 7);
        assert_eq!(param_usize(&params, "b", 7), 7);
    }

    #[test]
    fn param_bool_extracts_and_falls_back() {
        let params = json!({"commit": true, "junk": 1});
        assert!(param_bool(&params, "commit", false));
        assert!(!param_bool(&params, "junk", false));
        assert!(param_bool(&params, "absent", true));
    }

    #[test]
    fn non_object_params_use_defaults() {
        let params = json!("not an object");
        assert!((param_f64(&params, "x", 1.5) - 1.5).abs() < f64::EPSILON);
        assert_eq!(param_usize(&params, "x", 4), 4);
        assert!(param_bool(&params, "x", true));
    }
}
