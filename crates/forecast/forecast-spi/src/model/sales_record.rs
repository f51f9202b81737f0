//! Historical sales record

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// One observed sale used as training input.
///
/// The wire names are capitalised (`Date`, `Amount`). `Amount` accepts either
/// a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Amount", deserialize_with = "amount_from_number_or_text")]
    pub amount: f64,
}

impl SalesRecord {
    pub fn new(date: impl Into<String>, amount: f64) -> Self {
        Self {
            date: date.into(),
            amount,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
}

fn amount_from_number_or_text<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match RawAmount::deserialize(deserializer)? {
        RawAmount::Number(v) => v,
        RawAmount::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| D::Error::custom(format!("invalid amount '{text}'")))?,
    };
    if !value.is_finite() {
        return Err(D::Error::custom(format!("amount must be finite, got {value}")));
    }
    Ok(value)
}
