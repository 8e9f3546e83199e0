//! Forgiving deserializers for form-shaped JSON.
//!
//! Intake forms send `null`, blank strings and numbers typed as text. Each
//! helper maps a value it cannot read to the field's empty value instead of
//! failing the whole document. Use with `#[serde(default, deserialize_with = ..)]`
//! so a missing key behaves like an unreadable one.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;

use crate::units;

fn finite_number(value: &JsonValue) -> Option<f64> {
    let raw = match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    raw.filter(|n| n.is_finite())
}

fn raw<'de, D>(deserializer: D) -> Result<Option<JsonValue>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<JsonValue>::deserialize(deserializer)
}

/// Physical measurement; unreadable or negative values become zero.
pub fn measure<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    raw(deserializer).map(|v| units::measure(v.as_ref().and_then(finite_number).unwrap_or(0.0)))
}

/// Unit count, truncated toward zero.
pub fn count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    // `as` saturates at u32::MAX for absurd inputs.
    measure(deserializer).map(|n| n.trunc() as u32)
}

/// Optional amount; blank or unreadable input is `None`.
pub fn amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    raw(deserializer).map(|v| v.as_ref().and_then(finite_number))
}

/// Checkbox value: `true` or `"true"` set it, anything else clears it.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    raw(deserializer).map(|v| match v {
        Some(JsonValue::Bool(b)) => b,
        Some(JsonValue::String(s)) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    })
}

/// Free text; numbers are kept as their text, other shapes are dropped.
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    raw(deserializer).map(|v| match v {
        Some(JsonValue::String(s)) => Some(s),
        Some(JsonValue::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Any typed value, `None` when it does not parse.
pub fn optional<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    raw(deserializer).map(|v| v.and_then(|v| serde_json::from_value(v).ok()))
}

/// Any typed value, its `Default` when it does not parse.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    optional(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Form {
        #[serde(default, deserialize_with = "super::amount")]
        amount: Option<f64>,
        #[serde(default, deserialize_with = "super::flag")]
        flag: bool,
        #[serde(default, deserialize_with = "super::text")]
        text: Option<String>,
        #[serde(default, deserialize_with = "super::or_default")]
        tags: Vec<String>,
    }

    fn form(value: serde_json::Value) -> Form {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn amounts_accept_text_and_drop_blanks() {
        assert_eq!(form(json!({ "amount": "1250.50" })).amount, Some(1250.5));
        assert_eq!(form(json!({ "amount": 80 })).amount, Some(80.0));
        assert_eq!(form(json!({ "amount": "" })).amount, None);
        assert_eq!(form(json!({ "amount": null })).amount, None);
        assert_eq!(form(json!({ "amount": "1e999" })).amount, None);
    }

    #[test]
    fn flags_default_to_false() {
        assert!(form(json!({ "flag": true })).flag);
        assert!(form(json!({ "flag": " TRUE " })).flag);
        assert!(!form(json!({ "flag": null })).flag);
        assert!(!form(json!({ "flag": "" })).flag);
        assert!(!form(json!({})).flag);
    }

    #[test]
    fn text_keeps_numbers_and_drops_other_shapes() {
        assert_eq!(form(json!({ "text": 6907 })).text.as_deref(), Some("6907"));
        assert_eq!(form(json!({ "text": "FOB" })).text.as_deref(), Some("FOB"));
        assert_eq!(form(json!({ "text": { "x": 1 } })).text, None);
    }

    #[test]
    fn unreadable_collections_become_empty() {
        assert!(form(json!({ "tags": null })).tags.is_empty());
        assert!(form(json!({ "tags": "40HC" })).tags.is_empty());
        assert_eq!(form(json!({ "tags": ["40HC"] })).tags, ["40HC"]);
    }
}
