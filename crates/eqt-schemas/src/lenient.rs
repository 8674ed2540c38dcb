//! Lenient field decoders for vendor payloads.
//!
//! The vendor is inconsistent about whether numeric fields arrive as JSON
//! numbers or as strings, and uses `null` / `""` for "not set". These helpers
//! accept either shape. Use with `#[serde(default, deserialize_with = ...)]`.

use serde::{de, Deserialize, Deserializer};
use serde_json::Value;

/// Any scalar as a string. `null` becomes `""`.
pub fn string<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(d)? {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(de::Error::custom(format!(
            "expected scalar, got {}",
            type_name(&other)
        ))),
    }
}

/// Any scalar as an optional string. `null` and blank strings become `None`.
pub fn opt_string<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = string(d)?;
    if s.trim().is_empty() {
        Ok(None)
    } else {
        Ok(Some(s))
    }
}

/// Number or numeric string as `f64`. `null` and `""` become `0.0`.
pub fn decimal<'de, D>(d: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(d)? {
        Value::Null => Ok(0.0),
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| de::Error::custom("number out of range for f64")),
        Value::String(s) if s.trim().is_empty() => Ok(0.0),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| de::Error::custom(format!("invalid decimal string: {s}"))),
        other => Err(de::Error::custom(format!(
            "expected number, got {}",
            type_name(&other)
        ))),
    }
}

/// Integer or integer string as `i64`. `null` and `""` become `0`.
pub fn integer<'de, D>(d: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(d)? {
        Value::Null => Ok(0),
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| de::Error::custom(format!("not an integer: {n}"))),
        Value::String(s) if s.trim().is_empty() => Ok(0),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| de::Error::custom(format!("invalid integer string: {s}"))),
        other => Err(de::Error::custom(format!(
            "expected integer, got {}",
            type_name(&other)
        ))),
    }
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "super::string")]
        id: String,
        #[serde(default, deserialize_with = "super::decimal")]
        px: f64,
        #[serde(default, deserialize_with = "super::integer")]
        qty: i64,
        #[serde(default, deserialize_with = "super::opt_string")]
        tag: Option<String>,
    }

    #[test]
    fn numbers_and_strings_decode_alike() {
        let a: Row = serde_json::from_str(r#"{"id":1594,"px":12.5,"qty":-50,"tag":""}"#).unwrap();
        let b: Row =
            serde_json::from_str(r#"{"id":"1594","px":"12.5","qty":"-50","tag":null}"#).unwrap();
        assert_eq!(a.id, b.id);
        assert_eq!(a.px, b.px);
        assert_eq!(a.qty, -50);
        assert_eq!(b.qty, -50);
        assert!(a.tag.is_none() && b.tag.is_none());
    }

    #[test]
    fn missing_fields_take_defaults() {
        let r: Row = serde_json::from_str("{}").unwrap();
        assert_eq!(r.id, "");
        assert_eq!(r.px, 0.0);
        assert_eq!(r.qty, 0);
    }

    #[test]
    fn garbage_numeric_string_is_an_error() {
        assert!(serde_json::from_str::<Row>(r#"{"qty":"ten"}"#).is_err());
    }
}
