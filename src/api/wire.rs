//! JSON payloads exchanged with the calculator service.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `POST /calculate` body.
#[derive(Debug, Serialize)]
pub(super) struct EvaluateRequest<'a> {
    pub(super) expression: &'a str,
}

/// `POST /calculate` response. Successful results arrive as JSON numbers,
/// service-side failures as `"ERROR: ..."` strings.
#[derive(Debug, Deserialize)]
pub(super) struct EvaluateResponse {
    pub(super) result: Value,
}

/// `POST /search` body.
#[derive(Debug, Serialize)]
pub(super) struct SearchRequest<'a> {
    pub(super) query: &'a str,
}

/// One past expression/result pair.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HistoryEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub expression: String,
    #[serde(deserialize_with = "deserialize_display_value")]
    pub result: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl HistoryEntry {
    /// Entry without service metadata.
    pub fn new(expression: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            id: None,
            expression: expression.into(),
            result: result.into(),
            timestamp: None,
        }
    }
}

/// Convert a JSON result value into the string shown in the display.
///
/// Numbers follow browser formatting (`4.0` shows as `4`, `1e30` as
/// `1e+30`); strings pass through untouched. Returns `None` for arrays,
/// objects, and null.
pub fn format_result_value(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => {
            if let Some(n) = number.as_i64() {
                return Some(n.to_string());
            }
            if let Some(n) = number.as_u64() {
                return Some(n.to_string());
            }
            number.as_f64().map(format_float)
        }
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn format_float(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == 0.0 {
        // JS prints negative zero as "0".
        "0".to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        exponent_form(n)
    } else {
        // f64's Display drops a trailing `.0`, matching JS number printing.
        n.to_string()
    }
}

/// JS exponent notation: shortest mantissa, explicit `+` on positive exponents.
fn exponent_form(n: f64) -> String {
    let text = format!("{n:e}");
    match text.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => text,
    }
}

fn deserialize_display_value<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    format_result_value(&value)
        .ok_or_else(|| serde::de::Error::custom(format!("unsupported result value: {value}")))
}
