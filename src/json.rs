//! This module exports different types for JSON interactions.
//!
//! Request bodies are assembled as [`JsonMap`]s and handed to the transport as a [`Value`]; the
//! rest of the codebase goes through these aliases instead of naming `serde_json` directly.

use serde::de::DeserializeOwned;
use serde::ser::Serialize;

use crate::Result;

pub type Value = serde_json::Value;

pub use serde_json::json;
pub use serde_json::Error as JsonError;

pub type JsonMap = serde_json::Map<String, Value>;

pub const NULL: Value = Value::Null;

#[allow(clippy::missing_errors_doc)] // It's obvious
pub fn to_string<T>(v: &T) -> Result<String>
where
    T: Serialize,
{
    Ok(serde_json::to_string(v)?)
}

#[allow(clippy::missing_errors_doc)] // It's obvious
pub fn from_value<T>(v: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    Ok(serde_json::from_value(v)?)
}

#[allow(clippy::missing_errors_doc)] // It's obvious
pub fn to_value<T>(value: T) -> Result<Value>
where
    T: Serialize,
{
    Ok(serde_json::to_value(value)?)
}

/// Renders a JSON value the way string concatenation would: strings verbatim, numbers like
/// [`stringify_f64`], everything else through its JSON text (`true`, `null`, `[1,2]`).
#[must_use]
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) if n.is_f64() => n.as_f64().map_or_else(|| n.to_string(), stringify_f64),
        other => other.to_string(),
    }
}

/// Renders a float as text, without a trailing `.0` for integral values: `2.0` is `"2"`.
#[must_use]
pub fn stringify_f64(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
#[track_caller]
pub(crate) fn assert_json<T>(data: &T, json: Value)
where
    T: Serialize + std::fmt::Debug,
{
    let serialized = to_value(data).unwrap();
    assert!(
        serialized == json,
        "data->JSON serialization failed\nexpected: {json:?}\n     got: {serialized:?}"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stringify_scalars() {
        assert_eq!(stringify(&json!("hi")), "hi");
        assert_eq!(stringify(&json!(12)), "12");
        assert_eq!(stringify(&json!(1.5)), "1.5");
        assert_eq!(stringify(&json!(true)), "true");
        assert_eq!(stringify(&NULL), "null");
    }

    #[test]
    fn integral_floats_lose_the_fraction() {
        assert_eq!(stringify(&json!(2.0)), "2");
        assert_eq!(stringify(&json!(-0.5)), "-0.5");
        assert_eq!(stringify_f64(2.0), "2");
        assert_eq!(stringify_f64(f64::INFINITY), "Infinity");
        assert_eq!(stringify_f64(f64::NAN), "NaN");
    }
}
