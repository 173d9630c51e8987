//! StoreType - ストアのバックエンド種別タグ
//!
//! カタログメタデータの `urn:X-databox:rels:hasStoreType` に入っている文字列を
//! enum として扱います。現在サポートしているのは `store-json` のみです。
//!
//! # 新しいバックエンドの追加
//! 1. variant を追加し、`as_str()` にタグ文字列を追加
//! 2. `impls` に TimeSeriesStore / KeyValueStore の実装を追加
//! 3. `StoreFactory` の match に 1 行ずつ追加
//!
//! 呼び出し側のコードは変更不要です。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::ConstructionError;

/// StoreType はストアが話すワイヤプロトコルを識別する
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StoreType {
    /// databox の store-json
    #[serde(rename = "store-json")]
    Json,
}

impl StoreType {
    /// サポートしている全 variant
    pub const ALL: &'static [StoreType] = &[StoreType::Json];

    /// ワイヤ上のタグ文字列
    pub const fn as_str(&self) -> &'static str {
        match self {
            StoreType::Json => "store-json",
        }
    }
}

impl fmt::Display for StoreType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoreType {
    type Err = ConstructionError;

    /// 空文字列も未サポート扱い（"未指定" の判定はメタデータ経路で行う）
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        StoreType::ALL
            .iter()
            .copied()
            .find(|store_type| store_type.as_str() == tag)
            .ok_or_else(|| ConstructionError::UnsupportedStoreType(tag.to_string()))
    }
}
