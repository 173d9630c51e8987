//! KeyValueStore port - key-value データソースのファサード
//!
//! 値は JSON テキストのまま保存・取得されます（envelope なし）。

use async_trait::async_trait;

use crate::domain::StoreError;

/// KeyValueStore は単一スロットの key-value データソース
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// 保存されている JSON テキスト
    ///
    /// 一度も書き込まれていなければ `StoreError::NotFound`。
    async fn read(&self) -> Result<String, StoreError>;

    /// JSON テキストをそのまま保存
    async fn write(&self, data: &str) -> Result<(), StoreError>;

    /// データソースが属するストアの URL
    fn store_url(&self) -> Result<String, StoreError>;
}
