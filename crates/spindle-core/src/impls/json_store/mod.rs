//! store-json バックエンドの実装
//!
//! ワイヤ上のパスはストアと完全に一致している必要があります。

mod key_value;
mod time_series;

pub use self::key_value::JsonStoreKeyValue;
pub use self::time_series::JsonStoreTimeSeries;

pub(crate) const KV_PATH: &str = "/kv";
pub(crate) const TS_PATH: &str = "/ts";
pub(crate) const TS_LATEST_PATH: &str = "/ts/latest";
pub(crate) const TS_SINCE_PATH: &str = "/ts/since";
pub(crate) const TS_RANGE_PATH: &str = "/ts/range";
