//! TimeSeriesStore port - 時系列データソースのファサード
//!
//! 1 つの値は `{timestamp, data}` の JSON オブジェクト（ValueEnvelope）です。
//! 実装はバックエンドごとに 1 つ（現在は `JsonStoreTimeSeries` のみ）。

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{StoreError, ValueEnvelope};

/// TimeSeriesStore は時系列データソースの読み書きを提供
///
/// # 呼び出しモデル
/// - 1 操作につき transport へのリクエストは高々 1 回
/// - キャッシュ・リトライなし
/// - 実装は不変（immutable）なので複数タスクから同時に使ってよい
#[async_trait]
pub trait TimeSeriesStore: Send + Sync {
    /// 最新の値（envelope の JSON テキスト）。値がなければ `None`。
    async fn read_latest(&self) -> Result<Option<String>, StoreError>;

    /// `start` 以降（含む）の値。envelope の JSON 配列をそのまま返す。
    async fn read_since(&self, start: DateTime<Utc>) -> Result<String, StoreError>;

    /// `start` から `end` まで（両端を含む）の値。envelope の JSON 配列をそのまま返す。
    ///
    /// `start > end` は `StoreError::InvalidRange`（リクエストは送らない）。
    async fn read_range(&self, start: DateTime<Utc>, end: DateTime<Utc>)
    -> Result<String, StoreError>;

    /// JSON 値を書き込む。timestamp はストアが付与する。
    async fn write_raw_value(&self, data: &str) -> Result<(), StoreError>;

    /// JSON 値を指定時刻で書き込む。
    async fn write_raw_value_at(&self, data: &str, at: DateTime<Utc>) -> Result<(), StoreError>;

    /// このストアの timestamp 表現に変換
    fn time_to_timestamp(&self, t: DateTime<Utc>) -> f64;

    /// このストアの timestamp 表現から変換
    fn timestamp_to_time(&self, ts: f64) -> Option<DateTime<Utc>>;

    /// データソースが属するストアの URL
    fn store_url(&self) -> Result<String, StoreError>;

    /// `read_latest` を ValueEnvelope にデコード
    async fn latest_value(&self) -> Result<Option<ValueEnvelope>, StoreError> {
        match self.read_latest().await? {
            Some(raw) => ValueEnvelope::parse("latest", &raw).map(Some),
            None => Ok(None),
        }
    }

    /// `read_since` を ValueEnvelope の列にデコード
    async fn values_since(&self, start: DateTime<Utc>) -> Result<Vec<ValueEnvelope>, StoreError> {
        let raw = self.read_since(start).await?;
        ValueEnvelope::parse_array("since", &raw)
    }

    /// `read_range` を ValueEnvelope の列にデコード
    async fn values_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ValueEnvelope>, StoreError> {
        let raw = self.read_range(start, end).await?;
        ValueEnvelope::parse_array("range", &raw)
    }
}
