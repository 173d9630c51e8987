//! StoreFactory - バックエンド種別タグからファサードを生成
//!
//! # 学習ポイント
//! - タグ文字列 -> enum -> コンストラクタ の 1 段ずつの変換
//! - 生成時検証（Fail-fast 設計）: 不正なタグは生成時に失敗し、呼び出し時には失敗しない
//! - trait object（`Box<dyn TimeSeriesStore>`）を返して呼び出し側から実装を隠す
//!
//! # 生成経路
//! - **明示指定**: `(store_href, datasource_id, store_type)`
//! - **メタデータ**: カタログメタデータ（JSON）から endpoint と store_type を取り出す
//! - **環境変数**: メタデータを環境変数から読む（`app::config`）

use std::sync::Arc;

use crate::app::config;
use crate::domain::{ConstructionError, DatasourceMetadata, Endpoint, StoreType};
use crate::impls::{JsonStoreKeyValue, JsonStoreTimeSeries};
use crate::ports::{KeyValueStore, StoreTransport, TimeSeriesStore};

/// StoreFactory はファサードを生成する
///
/// # 使用例
/// ```ignore
/// let factory = StoreFactory::new(Arc::new(InMemoryStore::new()));
/// let ts = factory.time_series("http://store:8080", "sensor-1", "store-json")?;
/// let kv = factory.key_value_from_metadata(&metadata_json)?;
/// ```
///
/// 生成したファサードはすべて同じ transport を共有する。
#[derive(Clone)]
pub struct StoreFactory {
    transport: Arc<dyn StoreTransport>,
}

impl StoreFactory {
    pub fn new(transport: Arc<dyn StoreTransport>) -> Self {
        Self { transport }
    }

    /// StoreType -> 時系列ファサード
    pub fn time_series_for(&self, endpoint: Endpoint, store_type: StoreType) -> Box<dyn TimeSeriesStore> {
        tracing::debug!(%endpoint, %store_type, "creating time series store");
        match store_type {
            StoreType::Json => Box::new(JsonStoreTimeSeries::new(endpoint, self.transport.clone())),
        }
    }

    /// StoreType -> key-value ファサード
    pub fn key_value_for(&self, endpoint: Endpoint, store_type: StoreType) -> Box<dyn KeyValueStore> {
        tracing::debug!(%endpoint, %store_type, "creating key-value store");
        match store_type {
            StoreType::Json => Box::new(JsonStoreKeyValue::new(endpoint, self.transport.clone())),
        }
    }

    pub fn time_series(
        &self,
        store_href: &str,
        datasource_id: &str,
        store_type: &str,
    ) -> Result<Box<dyn TimeSeriesStore>, ConstructionError> {
        let store_type = parse_store_type(store_type)?;
        Ok(self.time_series_for(Endpoint::for_datasource(store_href, datasource_id), store_type))
    }

    pub fn key_value(
        &self,
        store_href: &str,
        datasource_id: &str,
        store_type: &str,
    ) -> Result<Box<dyn KeyValueStore>, ConstructionError> {
        let store_type = parse_store_type(store_type)?;
        Ok(self.key_value_for(Endpoint::for_datasource(store_href, datasource_id), store_type))
    }

    pub fn time_series_from_metadata(
        &self,
        metadata: &str,
    ) -> Result<Box<dyn TimeSeriesStore>, ConstructionError> {
        let (endpoint, store_type) = resolve_metadata(metadata)?;
        Ok(self.time_series_for(endpoint, store_type))
    }

    pub fn key_value_from_metadata(
        &self,
        metadata: &str,
    ) -> Result<Box<dyn KeyValueStore>, ConstructionError> {
        let (endpoint, store_type) = resolve_metadata(metadata)?;
        Ok(self.key_value_for(endpoint, store_type))
    }

    /// 環境変数 `var` のメタデータから時系列ファサードを生成
    pub fn time_series_from_env(&self, var: &str) -> Result<Box<dyn TimeSeriesStore>, ConstructionError> {
        self.time_series_from_metadata(&config::metadata_from_env(var)?)
    }

    /// 環境変数 `var` のメタデータから key-value ファサードを生成
    pub fn key_value_from_env(&self, var: &str) -> Result<Box<dyn KeyValueStore>, ConstructionError> {
        self.key_value_from_metadata(&config::metadata_from_env(var)?)
    }
}

fn parse_store_type(tag: &str) -> Result<StoreType, ConstructionError> {
    tag.parse::<StoreType>().inspect_err(|_| {
        tracing::warn!(tag, "unsupported store type");
    })
}

/// メタデータ -> (endpoint, StoreType)
///
/// 空のタグは「未サポート」ではなく「未指定」として区別する。
fn resolve_metadata(metadata: &str) -> Result<(Endpoint, StoreType), ConstructionError> {
    let meta = DatasourceMetadata::parse(metadata)?;
    let endpoint = meta.endpoint();
    let tag = meta.store_type_tag();
    if tag.is_empty() {
        tracing::warn!(%endpoint, "unspecified store type");
        return Err(ConstructionError::UnspecifiedStoreType {
            endpoint: endpoint.to_string(),
        });
    }
    Ok((endpoint, parse_store_type(tag)?))
}
