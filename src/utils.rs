use polars::prelude::AnyValue;
use serde::Serializer;
use serde_json::{Number, Value};

/// Largest magnitude at which every whole f64 is exact.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Formats an optional f64 to 2 decimal places, or returns "n/a" if None or non-finite.
pub fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => format!("{x:.2}"),
        _ => "n/a".to_owned(),
    }
}

/// JSON number for finite floats, `null` otherwise.
pub fn f64_to_json(v: Option<f64>) -> Value {
    v.and_then(Number::from_f64).map_or(Value::Null, Value::Number)
}

/// Chart value as JSON: whole numbers become integers, `null` when missing.
pub fn chart_number(v: Option<f64>) -> Value {
    match v {
        Some(x) if x.is_finite() && x.fract() == 0.0 && x.abs() <= MAX_EXACT_INTEGER => {
            Value::from(x as i64)
        }
        other => f64_to_json(other),
    }
}

/// Serializes a list of chart values with [`chart_number`].
///
/// # Errors
///
/// Propagates the serializer's error.
pub fn serialize_chart_numbers<S: Serializer>(
    values: &[Option<f64>],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(values.iter().map(|v| chart_number(*v)))
}

/// Converts a polars cell into a JSON value.
///
/// Numbers and booleans keep their type, strings are unquoted, temporal and
/// other values use their display form.
pub fn any_value_to_json(value: &AnyValue<'_>) -> Value {
    match value {
        AnyValue::Null => Value::Null,
        AnyValue::Boolean(b) => Value::Bool(*b),
        AnyValue::String(s) => Value::String((*s).to_owned()),
        AnyValue::StringOwned(s) => Value::String(s.to_string()),
        AnyValue::Int8(v) => Value::from(*v),
        AnyValue::Int16(v) => Value::from(*v),
        AnyValue::Int32(v) => Value::from(*v),
        AnyValue::Int64(v) => Value::from(*v),
        AnyValue::UInt8(v) => Value::from(*v),
        AnyValue::UInt16(v) => Value::from(*v),
        AnyValue::UInt32(v) => Value::from(*v),
        AnyValue::UInt64(v) => Value::from(*v),
        AnyValue::Float32(v) => f64_to_json(Some(f64::from(*v))),
        AnyValue::Float64(v) => f64_to_json(Some(*v)),
        other => Value::String(other.to_string()),
    }
}

/// Text form of a JSON value used for chart labels.
pub fn label_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_opt() {
        assert_eq!(fmt_opt(Some(1.23456)), "1.23");
        assert_eq!(fmt_opt(Some(f64::NAN)), "n/a");
        assert_eq!(fmt_opt(None), "n/a");
    }

    #[test]
    fn test_any_value_to_json() {
        assert_eq!(any_value_to_json(&AnyValue::String("N")), Value::from("N"));
        assert_eq!(any_value_to_json(&AnyValue::Int64(7)), Value::from(7));
        assert_eq!(any_value_to_json(&AnyValue::Float64(f64::NAN)), Value::Null);
        assert_eq!(any_value_to_json(&AnyValue::Null), Value::Null);
    }

    #[test]
    fn test_chart_number() {
        assert_eq!(chart_number(Some(2.0)), Value::from(2));
        assert_eq!(chart_number(Some(-15.0)), Value::from(-15));
        assert_eq!(chart_number(Some(7.5)), Value::from(7.5));
        assert_eq!(chart_number(Some(f64::INFINITY)), Value::Null);
        assert_eq!(chart_number(None), Value::Null);
    }

    #[test]
    fn test_label_text() {
        assert_eq!(label_text(&Value::from("N")), "N");
        assert_eq!(label_text(&Value::from(3)), "3");
    }
}
