//! HttpTransport - reqwest による本番用 transport（feature `http`）
//!
//! - JSON パラメータは GET の本文として送る（store-json の受け付け方に合わせる）
//! - 404 は `TransportError::NotFound`、それ以外の非 2xx は `TransportError::Status`
//! - タイムアウトは reqwest::Client 側で設定する

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, StatusCode};

use crate::ports::{Method, StoreTransport, TransportError};

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HttpTransport はストアに HTTP でリクエストする
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// デフォルトのタイムアウトで作成
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| network_error("", e))?;
        Ok(Self { client })
    }

    /// 設定済みの client を使う（TLS 設定・認証ヘッダなど）
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    fn builder(&self, url: &str, method: Method) -> RequestBuilder {
        match method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
        }
    }

    async fn send(&self, url: &str, request: RequestBuilder) -> Result<String, TransportError> {
        let response = request.send().await.map_err(|e| network_error(url, e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| network_error(url, e))?;
        tracing::trace!(%url, status = status.as_u16(), "store response");

        if status == StatusCode::NOT_FOUND {
            return Err(TransportError::NotFound {
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            return Err(TransportError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

fn network_error(url: &str, e: reqwest::Error) -> TransportError {
    TransportError::Network {
        url: url.to_string(),
        message: e.to_string(),
    }
}

#[async_trait]
impl StoreTransport for HttpTransport {
    async fn request(&self, url: &str, method: Method) -> Result<String, TransportError> {
        self.send(url, self.builder(url, method)).await
    }

    async fn request_with_json_params(
        &self,
        url: &str,
        method: Method,
        params: &str,
    ) -> Result<String, TransportError> {
        let request = self
            .builder(url, method)
            .header(CONTENT_TYPE, "application/json")
            .body(params.to_string());
        self.send(url, request).await
    }

    async fn request_post(&self, url: &str, body: &str) -> Result<String, TransportError> {
        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body.to_string());
        self.send(url, request).await
    }
}
