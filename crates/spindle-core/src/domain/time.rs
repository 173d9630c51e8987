//! Time conversion between calendar time and store-native timestamps.
//!
//! store-json のタイムスタンプは「Unix epoch からのミリ秒」を f64 で表したものです。
//! ミリ秒未満は常に切り捨て（丸めない）。

use chrono::{DateTime, TimeDelta, Utc};

const NANOS_PER_MILLI: f64 = 1_000_000.0;

/// Calendar time -> store timestamp (ms since epoch, sub-ms truncated).
///
/// `timestamp()` は floor した秒を返すので epoch より前の時刻でも切り捨てになる。
pub fn time_to_timestamp(t: DateTime<Utc>) -> f64 {
    let millis = t.timestamp() * 1000 + i64::from(t.timestamp_subsec_millis());
    millis as f64
}

/// Store timestamp -> calendar time.
///
/// 小数部（ミリ秒未満）はナノ秒に変換して保持する。
/// 非有限値や chrono の範囲外は `None`。
pub fn timestamp_to_time(ts: f64) -> Option<DateTime<Utc>> {
    if !ts.is_finite() {
        return None;
    }
    let whole = ts.floor();
    let sub_milli_nanos = ((ts - whole) * NANOS_PER_MILLI) as i64;
    DateTime::from_timestamp_millis(whole as i64)?
        .checked_add_signed(TimeDelta::nanoseconds(sub_milli_nanos))
}

/// Formats a timestamp the way the store parses JSON numbers: plain decimal,
/// shortest round-trip digits, no exponent, no trailing `.0`.
pub fn format_timestamp(ts: f64) -> String {
    // f64 の Display は指数表記を使わず最短桁数で出力する
    format!("{ts}")
}
