use serde::de::{Deserialize, Deserializer};

use crate::internal::prelude::*;

/// Used with `#[serde(default, deserialize_with = "deserialize_some")]` to tell an explicit
/// `null` apart from an absent field: absent stays `None`, `null` becomes `Some(null)` (or
/// `Some(None)` for an `Option<Option<T>>`).
pub fn deserialize_some<'de, D, T>(deserializer: D) -> StdResult<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Whether a JSON value counts as set when deciding if a reply carries an embed: `null`,
/// `false`, `0` and the empty string do not.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::json;

    #[derive(Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "deserialize_some")]
        name: Option<Option<String>>,
    }

    #[test]
    fn absent_and_null_are_distinct() {
        let absent: Patch = serde_json::from_value(json!({})).unwrap();
        let null: Patch = serde_json::from_value(json!({"name": null})).unwrap();
        let set: Patch = serde_json::from_value(json!({"name": "blobface"})).unwrap();

        assert_eq!(absent.name, None);
        assert_eq!(null.name, Some(None));
        assert_eq!(set.name, Some(Some("blobface".to_owned())));
    }

    #[test]
    fn truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!({})));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!("x")));
    }
}
