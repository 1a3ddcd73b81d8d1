use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Money amount as the wallet API reports it.
///
/// `currency` is an ISO 4217 code; the API sends it either as a number
/// (`643`) or as a string (`"RUB"`), both land here as text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sum {
    pub amount: f64,
    #[serde(deserialize_with = "string_or_number")]
    pub currency: String,
}

/// Accept a JSON string or number (or null) and keep it as text.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(de::Error::custom(format!(
            "expected string or number, got {}",
            crate::mapper::shape_of(&other)
        ))),
    }
}

/// Accept a JSON number or a numeric string.
pub(crate) fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| de::Error::custom("number out of range")),
        Value::String(s) => s
            .parse()
            .map_err(|e| de::Error::custom(format!("invalid numeric string {s:?}: {e}"))),
        Value::Null => Ok(0.0),
        other => Err(de::Error::custom(format!(
            "expected number, got {}",
            crate::mapper::shape_of(&other)
        ))),
    }
}
