//! JsonStoreKeyValue - store-json の key-value ファサード

use std::sync::Arc;

use async_trait::async_trait;

use super::KV_PATH;
use crate::domain::{Endpoint, StoreError};
use crate::ports::{KeyValueStore, Method, StoreTransport, TransportError};

/// store-json の key-value データソース
#[derive(Clone)]
pub struct JsonStoreKeyValue {
    endpoint: Endpoint,
    transport: Arc<dyn StoreTransport>,
}

impl JsonStoreKeyValue {
    pub fn new(endpoint: Endpoint, transport: Arc<dyn StoreTransport>) -> Self {
        Self {
            endpoint,
            transport,
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }
}

impl std::fmt::Debug for JsonStoreKeyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonStoreKeyValue")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl KeyValueStore for JsonStoreKeyValue {
    async fn read(&self) -> Result<String, StoreError> {
        let url = self.endpoint.resource(KV_PATH);
        tracing::debug!(%url, "kv read");

        match self.transport.request(&url, Method::Get).await {
            Ok(data) => Ok(data),
            Err(TransportError::NotFound { url }) => Err(StoreError::NotFound(url)),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, data: &str) -> Result<(), StoreError> {
        let url = self.endpoint.resource(KV_PATH);
        tracing::debug!(%url, "kv write");

        self.transport.request_post(&url, data).await?;
        Ok(())
    }

    fn store_url(&self) -> Result<String, StoreError> {
        self.endpoint.store_url()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::recording::{Payload, RecordingTransport};

    const ENDPOINT: &str = "http://store:8080/settings";

    fn facade(transport: RecordingTransport) -> (JsonStoreKeyValue, Arc<RecordingTransport>) {
        let transport = Arc::new(transport);
        let kv = JsonStoreKeyValue::new(Endpoint::new(ENDPOINT), transport.clone());
        (kv, transport)
    }

    #[tokio::test]
    async fn read_returns_body_as_is() {
        let (kv, transport) =
            facade(RecordingTransport::new().respond_with(Ok("{\"mode\":\"eco\"}".to_string())));

        assert_eq!(kv.read().await.unwrap(), "{\"mode\":\"eco\"}");

        let requests = transport.requests().await;
        assert_eq!(requests[0].method, Method::Get);
        assert_eq!(requests[0].url, format!("{ENDPOINT}/kv"));
        assert_eq!(requests[0].payload, Payload::None);
    }

    #[tokio::test]
    async fn read_not_found_is_distinct_from_transport_error() {
        let (kv, _) = facade(RecordingTransport::new().respond_with(Err(
            TransportError::NotFound {
                url: format!("{ENDPOINT}/kv"),
            },
        )));

        let err = kv.read().await.unwrap_err();
        assert!(err.is_not_found());
        assert!(matches!(err, StoreError::NotFound(ref url) if url.ends_with("/kv")));
    }

    #[tokio::test]
    async fn read_other_failures_stay_transport_errors() {
        let (kv, _) = facade(RecordingTransport::new().respond_with(Err(TransportError::Status {
            url: format!("{ENDPOINT}/kv"),
            status: 500,
            body: "oops".to_string(),
        })));

        let err = kv.read().await.unwrap_err();
        assert!(!err.is_not_found());
        assert!(matches!(err, StoreError::Transport(TransportError::Status { status: 500, .. })));
    }

    #[tokio::test]
    async fn write_posts_raw_json_without_envelope() {
        let (kv, transport) = facade(RecordingTransport::new());

        kv.write("{\"mode\":\"eco\"}").await.unwrap();

        let requests = transport.requests().await;
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(requests[0].url, format!("{ENDPOINT}/kv"));
        assert_eq!(requests[0].payload, Payload::Body("{\"mode\":\"eco\"}".to_string()));
    }

    #[test]
    fn store_url_strips_datasource_id() {
        let kv = JsonStoreKeyValue::new(Endpoint::new(ENDPOINT), Arc::new(RecordingTransport::new()));
        assert_eq!(kv.store_url().unwrap(), "http://store:8080");
    }
}
