//! InMemoryStore - store-json をメモリ上でエミュレートする transport
//!
//! # 学習ポイント
//! - URL サフィックスによるルーティング（`/kv`, `/ts`, `/ts/latest`, `/ts/since`, `/ts/range`）
//! - `RawValue` による data の無変換保存
//! - tokio::sync::Mutex による排他制御
//!
//! # エミュレートする振る舞い
//! - key-value: データソースごとに 1 スロット。未書き込みの GET は 404（NotFound）
//! - 時系列: timestamp 昇順に保持。timestamp 省略時は Clock の時刻を付与
//! - since / range: 両端を含む
//! - 不正な本文・パラメータは 400、メソッド違いは 405

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::value::RawValue;
use tokio::sync::Mutex;

use crate::domain::time_to_timestamp;
use crate::domain::value::envelope_json;
use crate::impls::json_store::{KV_PATH, TS_LATEST_PATH, TS_PATH, TS_RANGE_PATH, TS_SINCE_PATH};
use crate::ports::{Clock, Method, StoreTransport, SystemClock, TransportError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    KeyValue,
    TimeSeries,
    Latest,
    Since,
    Range,
}

/// サフィックスの長い順（`/ts` より `/ts/latest` を先に判定）
const ROUTES: &[(&str, Route)] = &[
    (TS_LATEST_PATH, Route::Latest),
    (TS_SINCE_PATH, Route::Since),
    (TS_RANGE_PATH, Route::Range),
    (TS_PATH, Route::TimeSeries),
    (KV_PATH, Route::KeyValue),
];

fn route(url: &str) -> Option<(&str, Route)> {
    ROUTES.iter().find_map(|&(suffix, route)| {
        url.strip_suffix(suffix)
            .filter(|datasource| !datasource.is_empty())
            .map(|datasource| (datasource, route))
    })
}

#[derive(Debug)]
struct StoredValue {
    timestamp: f64,
    data: Box<RawValue>,
}

#[derive(Debug, Deserialize)]
struct IncomingValue {
    data: Box<RawValue>,
    #[serde(default)]
    timestamp: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryParams {
    start_timestamp: f64,
    #[serde(default)]
    end_timestamp: Option<f64>,
}

#[derive(Debug, Default)]
struct StoreState {
    /// データソース endpoint -> JSON テキスト
    kv: HashMap<String, String>,
    /// データソース endpoint -> timestamp 昇順の値
    series: HashMap<String, Vec<StoredValue>>,
}

/// InMemoryStore は開発・テスト用の store-json
///
/// # 使用例
/// ```ignore
/// let store = Arc::new(InMemoryStore::new());
/// let factory = StoreFactory::new(store);
/// let ts = factory.time_series("http://store", "sensor-1", "store-json")?;
/// ts.write_raw_value("21.5").await?;
/// ```
pub struct InMemoryStore {
    state: Mutex<StoreState>,
    clock: Arc<dyn Clock>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// ingest timestamp に使う Clock を指定
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(StoreState::default()),
            clock,
        }
    }

    async fn handle(
        &self,
        method: Method,
        url: &str,
        payload: Option<&str>,
    ) -> Result<String, TransportError> {
        let (datasource, route) = route(url).ok_or_else(|| TransportError::NotFound {
            url: url.to_string(),
        })?;
        tracing::trace!(%method, %url, ?route, "in-memory store request");

        match (route, method) {
            (Route::KeyValue, Method::Get) => self.read_kv(datasource, url).await,
            (Route::KeyValue, Method::Post) => {
                self.write_kv(datasource, url, require(url, payload)?).await
            }
            (Route::TimeSeries, Method::Post) => {
                self.write_ts(datasource, url, require(url, payload)?).await
            }
            (Route::Latest, Method::Get) => self.latest(datasource).await,
            (Route::Since | Route::Range, Method::Get) => {
                let params: QueryParams = serde_json::from_str(require(url, payload)?)
                    .map_err(|e| bad_request(url, e))?;
                let end = match route {
                    Route::Range => Some(params.end_timestamp.ok_or_else(|| {
                        bad_request(url, "missing endTimestamp")
                    })?),
                    _ => None,
                };
                self.query(datasource, params.start_timestamp, end).await
            }
            _ => Err(TransportError::Status {
                url: url.to_string(),
                status: 405,
                body: format!("method {method} not allowed"),
            }),
        }
    }

    async fn read_kv(&self, datasource: &str, url: &str) -> Result<String, TransportError> {
        let state = self.state.lock().await;
        state
            .kv
            .get(datasource)
            .cloned()
            .ok_or_else(|| TransportError::NotFound {
                url: url.to_string(),
            })
    }

    async fn write_kv(
        &self,
        datasource: &str,
        url: &str,
        body: &str,
    ) -> Result<String, TransportError> {
        serde_json::from_str::<&RawValue>(body).map_err(|e| bad_request(url, e))?;
        let mut state = self.state.lock().await;
        state.kv.insert(datasource.to_string(), body.to_string());
        Ok(String::new())
    }

    async fn write_ts(
        &self,
        datasource: &str,
        url: &str,
        body: &str,
    ) -> Result<String, TransportError> {
        let incoming: IncomingValue = serde_json::from_str(body).map_err(|e| bad_request(url, e))?;
        let timestamp = incoming
            .timestamp
            .unwrap_or_else(|| time_to_timestamp(self.clock.now()));

        let mut state = self.state.lock().await;
        let values = state.series.entry(datasource.to_string()).or_default();
        // 同じ timestamp は書き込み順
        let at = values.partition_point(|v| v.timestamp <= timestamp);
        values.insert(
            at,
            StoredValue {
                timestamp,
                data: incoming.data,
            },
        );
        Ok(String::new())
    }

    async fn latest(&self, datasource: &str) -> Result<String, TransportError> {
        let state = self.state.lock().await;
        let latest = state.series.get(datasource).and_then(|values| values.last());
        Ok(json_array(latest))
    }

    async fn query(
        &self,
        datasource: &str,
        start: f64,
        end: Option<f64>,
    ) -> Result<String, TransportError> {
        let state = self.state.lock().await;
        let matching = state
            .series
            .get(datasource)
            .into_iter()
            .flatten()
            .filter(|v| v.timestamp >= start && end.is_none_or(|end| v.timestamp <= end));
        Ok(json_array(matching))
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn require<'a>(url: &str, payload: Option<&'a str>) -> Result<&'a str, TransportError> {
    payload.ok_or_else(|| bad_request(url, "missing request body"))
}

fn bad_request(url: &str, reason: impl std::fmt::Display) -> TransportError {
    TransportError::Status {
        url: url.to_string(),
        status: 400,
        body: reason.to_string(),
    }
}

fn json_array<'a>(values: impl IntoIterator<Item = &'a StoredValue>) -> String {
    let items: Vec<String> = values
        .into_iter()
        .map(|v| envelope_json(v.timestamp, &v.data))
        .collect();
    format!("[{}]", items.join(","))
}

#[async_trait]
impl StoreTransport for InMemoryStore {
    async fn request(&self, url: &str, method: Method) -> Result<String, TransportError> {
        self.handle(method, url, None).await
    }

    async fn request_with_json_params(
        &self,
        url: &str,
        method: Method,
        params: &str,
    ) -> Result<String, TransportError> {
        self.handle(method, url, Some(params)).await
    }

    async fn request_post(&self, url: &str, body: &str) -> Result<String, TransportError> {
        self.handle(Method::Post, url, Some(body)).await
    }
}
