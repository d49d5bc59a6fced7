//! Deserialization helpers for backend payloads whose shape is not guaranteed.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

/// Treat an explicit `null` the same as a missing field.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode an optional block, downgrading a block of unexpected shape to `None`.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(value) => match serde_json::from_value(value) {
            Ok(parsed) => Ok(Some(parsed)),
            Err(e) => {
                tracing::warn!(
                    target_type = std::any::type_name::<T>(),
                    error = %e,
                    "Ignoring malformed response block"
                );
                Ok(None)
            }
        },
    }
}

/// Like [`lenient`], but yields the default value instead of `None`.
pub(crate) fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(lenient(deserializer)?.unwrap_or_default())
}

/// Accept either a JSON string or a number and keep its textual form.
pub(crate) fn stringish<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}

/// Integer view of a JSON number. Floats count only when they carry no fraction.
fn whole(n: &Number) -> Option<i64> {
    n.as_i64().or_else(|| {
        n.as_f64()
            .filter(|f| f.is_finite() && f.fract() == 0.0)
            .filter(|f| *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
            .map(|f| f as i64)
    })
}

fn whole_value<T: TryFrom<i64>>(value: Value) -> Option<T> {
    match value {
        Value::Number(n) => whole(&n).and_then(|v| T::try_from(v).ok()),
        Value::String(s) => s.trim().parse::<i64>().ok().and_then(|v| T::try_from(v).ok()),
        _ => None,
    }
}

/// Accept `3`, `3.0` or `"3"` for an integer field. Anything else yields the default.
pub(crate) fn whole_number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64> + Default,
{
    Ok(whole_number_opt(deserializer)?.unwrap_or_default())
}

/// Optional variant of [`whole_number`]: unusable values become `None`.
pub(crate) fn whole_number_opt<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(whole_value))
}

/// List of integers where individual entries may be floats. Unusable entries are dropped.
pub(crate) fn whole_numbers<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items.into_iter().filter_map(whole_value).collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        #[serde(default, deserialize_with = "nullable")]
        tags: Vec<String>,
        #[serde(default, deserialize_with = "lenient")]
        block: Option<Vec<u32>>,
        #[serde(default, deserialize_with = "stringish")]
        label: String,
        #[serde(default, deserialize_with = "whole_number")]
        page: u32,
        #[serde(default, deserialize_with = "whole_number_opt")]
        year: Option<i32>,
        #[serde(default, deserialize_with = "whole_numbers")]
        years: Vec<i32>,
    }

    #[test]
    fn test_null_becomes_default() {
        let p: Payload = serde_json::from_str(r#"{"tags": null}"#).unwrap();
        assert!(p.tags.is_empty());
        assert!(p.block.is_none());
        assert_eq!(p.label, "");
    }

    #[test]
    fn test_malformed_block_is_dropped() {
        let p: Payload = serde_json::from_str(r#"{"block": {"not": "a list"}}"#).unwrap();
        assert!(p.block.is_none());
    }

    #[test]
    fn test_wellformed_block_is_kept() {
        let p: Payload = serde_json::from_str(r#"{"block": [1, 2, 3]}"#).unwrap();
        assert_eq!(p.block, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_stringish_accepts_numbers() {
        let p: Payload = serde_json::from_str(r#"{"label": 2019}"#).unwrap();
        assert_eq!(p.label, "2019");
        let p: Payload = serde_json::from_str(r#"{"label": "2020"}"#).unwrap();
        assert_eq!(p.label, "2020");
    }

    #[test]
    fn test_integral_floats_are_whole_numbers() {
        let p: Payload =
            serde_json::from_str(r#"{"page": 3.0, "year": 2019.0, "years": [2016.0, 2019]}"#)
                .unwrap();
        assert_eq!(p.page, 3);
        assert_eq!(p.year, Some(2019));
        assert_eq!(p.years, vec![2016, 2019]);
    }

    #[test]
    fn test_unusable_numbers_fall_back() {
        let p: Payload = serde_json::from_str(
            r#"{"page": -1, "year": 2019.5, "years": [2016.5, null, "2020", 2021.0]}"#,
        )
        .unwrap();
        assert_eq!(p.page, 0);
        assert_eq!(p.year, None);
        assert_eq!(p.years, vec![2020, 2021]);

        let p: Payload = serde_json::from_str(r#"{"page": null, "year": null, "years": null}"#).unwrap();
        assert_eq!(p.page, 0);
        assert_eq!(p.year, None);
        assert!(p.years.is_empty());
    }
}
