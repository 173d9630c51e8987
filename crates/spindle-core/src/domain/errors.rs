//! Errors - エラー型と分類
//!
//! # 分類
//! - **ConstructionError**: ファサード生成時のエラー（タグ不正・メタデータ不正）
//! - **StoreError**: 呼び出し時のエラー（transport / decode / not found など）
//!
//! ConstructionError は生成時にしか発生せず、StoreError は呼び出し時にしか発生しません。

use thiserror::Error;

use crate::ports::TransportError;

/// ConstructionError はファサード生成時のエラー
#[derive(Debug, Error)]
pub enum ConstructionError {
    #[error("unsupported store type: {0:?}")]
    UnsupportedStoreType(String),

    #[error("unspecified store type for {endpoint}")]
    UnspecifiedStoreType { endpoint: String },

    #[error("invalid datasource metadata: {0}")]
    InvalidMetadata(#[from] serde_json::Error),

    #[error("datasource metadata not found in environment variable {0}")]
    MissingEnvironment(String),
}

/// StoreError は読み書き操作のエラー
#[derive(Debug, Error)]
pub enum StoreError {
    /// transport のエラーはそのまま素通し
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// レスポンスの形が envelope / 配列の契約に合わない
    #[error("unexpected response from {operation}: {raw}")]
    Decode { operation: &'static str, raw: String },

    /// key-value に一度も書き込まれていない
    #[error("no value found at {0}")]
    NotFound(String),

    #[error("invalid datasource endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("invalid range: start timestamp {start} is after end timestamp {end}")]
    InvalidRange { start: f64, end: f64 },
}

impl StoreError {
    pub(crate) fn decode(operation: &'static str, raw: impl Into<String>) -> Self {
        StoreError::Decode {
            operation,
            raw: raw.into(),
        }
    }

    /// "まだ値がない" かどうか（NotFound のみ true）
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}
