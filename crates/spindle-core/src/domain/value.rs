//! ValueEnvelope - 時系列の 1 値を包む `{timestamp, data}` オブジェクト
//!
//! raw write で保存した値は必ず 1 つの envelope に包まれ、
//! read で返る値は必ず 1 つの envelope（または envelope の配列）から取り出されます。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use super::errors::StoreError;
use super::time::{format_timestamp, timestamp_to_time};

/// A single time-series value as stored by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueEnvelope {
    /// store-native timestamp (ms since epoch)
    pub timestamp: f64,

    /// caller-supplied JSON value
    pub data: serde_json::Value,
}

impl ValueEnvelope {
    pub fn new(timestamp: f64, data: serde_json::Value) -> Self {
        Self { timestamp, data }
    }

    /// timestamp を calendar time として取得（範囲外は None）
    pub fn time(&self) -> Option<DateTime<Utc>> {
        timestamp_to_time(self.timestamp)
    }

    pub(crate) fn parse(operation: &'static str, raw: &str) -> Result<Self, StoreError> {
        serde_json::from_str(raw).map_err(|_| StoreError::decode(operation, raw))
    }

    pub(crate) fn parse_array(operation: &'static str, raw: &str) -> Result<Vec<Self>, StoreError> {
        serde_json::from_str(raw).map_err(|_| StoreError::decode(operation, raw))
    }
}

/// Body of a raw write: `{"data": <data>}`, data inserted verbatim.
pub(crate) fn raw_value_body(data: &str) -> String {
    format!("{{\"data\": {data}}}")
}

/// Body of a timed raw write: `{"data": <data>,"timestamp":<ts>}`.
pub(crate) fn raw_value_body_at(data: &str, timestamp: f64) -> String {
    format!(
        "{{\"data\": {data},\"timestamp\":{}}}",
        format_timestamp(timestamp)
    )
}

/// Serialises one stored value the way store-json returns it.
pub(crate) fn envelope_json(timestamp: f64, data: &RawValue) -> String {
    format!(
        "{{\"timestamp\":{},\"data\":{}}}",
        format_timestamp(timestamp),
        data.get()
    )
}

/// Unwraps the single envelope of a `latest` response.
///
/// - `[]` -> `Ok(None)`
/// - `[x]` -> `Ok(Some(x))`（x は受信したテキストそのまま）
/// - それ以外 -> Decode エラー
pub(crate) fn unwrap_single(operation: &'static str, raw: &str) -> Result<Option<String>, StoreError> {
    let mut elements: Vec<Box<RawValue>> =
        serde_json::from_str(raw).map_err(|_| StoreError::decode(operation, raw))?;
    match elements.len() {
        0 => Ok(None),
        1 => Ok(elements.pop().map(|element| element.get().to_string())),
        _ => Err(StoreError::decode(operation, raw)),
    }
}
