//! StoreTransport port - ストアへの HTTP 風リクエスト
//!
//! 接続管理・TLS・ソケットレベルのリトライ・タイムアウトはすべて実装側の責務です。
//! コアはリクエストの組み立てとレスポンスの解釈だけを行います。
//!
//! # 実装
//! - **InMemoryStore**: store-json のエミュレーション（開発・テスト用）
//! - **RecordingTransport**: リクエストを記録し、台本どおりに応答（テスト用）
//! - **HttpTransport**: reqwest による本番用（feature `http`）

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

/// HTTP メソッド（ストアが使うものだけ）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// TransportError は transport レベルのエラー
///
/// NotFound は「まだ値がない」を表すので他の失敗と区別する。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("not found: {url}")]
    NotFound { url: String },

    #[error("request to {url} failed with status {status}: {body}")]
    Status { url: String, status: u16, body: String },

    #[error("request to {url} failed: {message}")]
    Network { url: String, message: String },
}

/// StoreTransport はストアへのリクエストを実行する
///
/// 3 つの操作はすべてレスポンス本文（テキスト）全体か、エラーを返す。
/// 非 2xx は実装側でエラーに変換する。
///
/// # Thread Safety
/// - `Send + Sync` を要求（同じ transport を複数のファサードで共有するため）
#[async_trait]
pub trait StoreTransport: Send + Sync {
    /// 本文なしのリクエスト
    async fn request(&self, url: &str, method: Method) -> Result<String, TransportError>;

    /// JSON パラメータ付きのリクエスト（表現方法は実装が決める）
    async fn request_with_json_params(
        &self,
        url: &str,
        method: Method,
        params: &str,
    ) -> Result<String, TransportError>;

    /// JSON 本文の POST
    async fn request_post(&self, url: &str, body: &str) -> Result<String, TransportError>;
}
