//! RecordingTransport - リクエストを記録し、台本どおりに応答する transport
//!
//! ファサードが組み立てたリクエスト（メソッド・URL・パラメータ・本文）を
//! そのまま検証したいテスト向けです。
//!
//! # 使用例
//! ```ignore
//! let transport = Arc::new(RecordingTransport::new().respond_with(Ok("[]".into())));
//! let ts = JsonStoreTimeSeries::new(Endpoint::new("http://store/ds"), transport.clone());
//! ts.read_latest().await?;
//! assert_eq!(transport.requests().await[0].url, "http://store/ds/ts/latest");
//! ```

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::ports::{Method, StoreTransport, TransportError};

/// リクエストに付いていたもの
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    None,
    JsonParams(String),
    Body(String),
}

/// 記録された 1 リクエスト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: String,
    pub payload: Payload,
}

/// RecordingTransport は記録用の transport
///
/// 応答キューが空になった後は空文字列を返す。
#[derive(Debug, Default)]
pub struct RecordingTransport {
    requests: Mutex<Vec<RecordedRequest>>,
    responses: Mutex<VecDeque<Result<String, TransportError>>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// 次の応答を台本に追加（呼ばれた順に返す）
    pub fn respond_with(mut self, response: Result<String, TransportError>) -> Self {
        self.responses.get_mut().push_back(response);
        self
    }

    /// これまでに記録されたリクエスト
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().await.clone()
    }

    async fn record(
        &self,
        method: Method,
        url: &str,
        payload: Payload,
    ) -> Result<String, TransportError> {
        self.requests.lock().await.push(RecordedRequest {
            method,
            url: url.to_string(),
            payload,
        });
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(String::new()))
    }
}

#[async_trait]
impl StoreTransport for RecordingTransport {
    async fn request(&self, url: &str, method: Method) -> Result<String, TransportError> {
        self.record(method, url, Payload::None).await
    }

    async fn request_with_json_params(
        &self,
        url: &str,
        method: Method,
        params: &str,
    ) -> Result<String, TransportError> {
        self.record(method, url, Payload::JsonParams(params.to_string()))
            .await
    }

    async fn request_post(&self, url: &str, body: &str) -> Result<String, TransportError> {
        self.record(Method::Post, url, Payload::Body(body.to_string()))
            .await
    }
}
