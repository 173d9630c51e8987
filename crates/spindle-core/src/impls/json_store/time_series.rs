//! JsonStoreTimeSeries - store-json の時系列ファサード

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{TS_LATEST_PATH, TS_PATH, TS_RANGE_PATH, TS_SINCE_PATH};
use crate::domain::value::{raw_value_body, raw_value_body_at, unwrap_single};
use crate::domain::{Endpoint, StoreError, format_timestamp, time};
use crate::ports::{Method, StoreTransport, TimeSeriesStore};

/// store-json の時系列データソース
///
/// endpoint と transport だけを持つ不変オブジェクト。
#[derive(Clone)]
pub struct JsonStoreTimeSeries {
    endpoint: Endpoint,
    transport: Arc<dyn StoreTransport>,
}

impl JsonStoreTimeSeries {
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

impl std::fmt::Debug for JsonStoreTimeSeries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonStoreTimeSeries")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl TimeSeriesStore for JsonStoreTimeSeries {
    async fn read_latest(&self) -> Result<Option<String>, StoreError> {
        let url = self.endpoint.resource(TS_LATEST_PATH);
        tracing::debug!(%url, "ts read latest");

        let raw = self.transport.request(&url, Method::Get).await?;
        unwrap_single("latest", &raw).inspect_err(|_| {
            tracing::warn!(%url, %raw, "unexpected response from latest");
        })
    }

    async fn read_since(&self, start: DateTime<Utc>) -> Result<String, StoreError> {
        let url = self.endpoint.resource(TS_SINCE_PATH);
        let params = format!(
            "{{\"startTimestamp\": {}}}",
            format_timestamp(self.time_to_timestamp(start))
        );
        tracing::debug!(%url, %params, "ts read since");

        Ok(self
            .transport
            .request_with_json_params(&url, Method::Get, &params)
            .await?)
    }

    async fn read_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<String, StoreError> {
        let start_ts = self.time_to_timestamp(start);
        let end_ts = self.time_to_timestamp(end);
        if start_ts > end_ts {
            return Err(StoreError::InvalidRange {
                start: start_ts,
                end: end_ts,
            });
        }

        let url = self.endpoint.resource(TS_RANGE_PATH);
        let params = format!(
            "{{\"startTimestamp\": {},\"endTimestamp\": {}}}",
            format_timestamp(start_ts),
            format_timestamp(end_ts)
        );
        tracing::debug!(%url, %params, "ts read range");

        Ok(self
            .transport
            .request_with_json_params(&url, Method::Get, &params)
            .await?)
    }

    async fn write_raw_value(&self, data: &str) -> Result<(), StoreError> {
        let url = self.endpoint.resource(TS_PATH);
        tracing::debug!(%url, "ts write");

        self.transport
            .request_post(&url, &raw_value_body(data))
            .await?;
        Ok(())
    }

    async fn write_raw_value_at(&self, data: &str, at: DateTime<Utc>) -> Result<(), StoreError> {
        let url = self.endpoint.resource(TS_PATH);
        let body = raw_value_body_at(data, self.time_to_timestamp(at));
        tracing::debug!(%url, "ts write at");

        self.transport.request_post(&url, &body).await?;
        Ok(())
    }

    fn time_to_timestamp(&self, t: DateTime<Utc>) -> f64 {
        time::time_to_timestamp(t)
    }

    fn timestamp_to_time(&self, ts: f64) -> Option<DateTime<Utc>> {
        time::timestamp_to_time(ts)
    }

    fn store_url(&self) -> Result<String, StoreError> {
        self.endpoint.store_url()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ValueEnvelope;
    use crate::impls::recording::{Payload, RecordedRequest, RecordingTransport};
    use crate::ports::TransportError;
    use chrono::TimeZone;
    use serde_json::json;

    const ENDPOINT: &str = "http://store:8080/sensor-1";

    fn facade(transport: RecordingTransport) -> (JsonStoreTimeSeries, Arc<RecordingTransport>) {
        let transport = Arc::new(transport);
        let ts = JsonStoreTimeSeries::new(Endpoint::new(ENDPOINT), transport.clone());
        (ts, transport)
    }

    fn at(secs: i64, nanos: u32) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, nanos).single().unwrap()
    }

    #[tokio::test]
    async fn read_latest_empty_array_is_no_value() {
        let (ts, transport) = facade(RecordingTransport::new().respond_with(Ok("[]".to_string())));

        assert_eq!(ts.read_latest().await.unwrap(), None);
        assert_eq!(
            transport.requests().await,
            vec![RecordedRequest {
                method: Method::Get,
                url: format!("{ENDPOINT}/ts/latest"),
                payload: Payload::None,
            }]
        );
    }

    #[tokio::test]
    async fn read_latest_unwraps_single_envelope() {
        let (ts, _) = facade(
            RecordingTransport::new()
                .respond_with(Ok("[{\"timestamp\":1000,\"data\":5}]".to_string())),
        );

        let latest = ts.read_latest().await.unwrap();
        assert_eq!(latest.as_deref(), Some("{\"timestamp\":1000,\"data\":5}"));
    }

    #[tokio::test]
    async fn read_latest_without_brackets_is_decode_error() {
        let (ts, _) = facade(RecordingTransport::new().respond_with(Ok("{}".to_string())));

        let err = ts.read_latest().await.unwrap_err();
        assert!(matches!(err, StoreError::Decode { ref raw, .. } if raw == "{}"));
    }

    #[tokio::test]
    async fn read_latest_propagates_transport_error_unchanged() {
        let failure = TransportError::Status {
            url: format!("{ENDPOINT}/ts/latest"),
            status: 503,
            body: "unavailable".to_string(),
        };
        let (ts, _) = facade(RecordingTransport::new().respond_with(Err(failure.clone())));

        let err = ts.read_latest().await.unwrap_err();
        assert!(matches!(err, StoreError::Transport(ref e) if *e == failure));
    }

    #[tokio::test]
    async fn read_since_sends_start_timestamp_and_returns_raw_array() {
        let body = "[{\"timestamp\":1700000000123,\"data\":1}]";
        let (ts, transport) = facade(RecordingTransport::new().respond_with(Ok(body.to_string())));

        let raw = ts.read_since(at(1_700_000_000, 123_456_789)).await.unwrap();
        assert_eq!(raw, body);

        let requests = transport.requests().await;
        assert_eq!(requests[0].method, Method::Get);
        assert_eq!(requests[0].url, format!("{ENDPOINT}/ts/since"));
        assert_eq!(
            requests[0].payload,
            Payload::JsonParams("{\"startTimestamp\": 1700000000123}".to_string())
        );
    }

    #[tokio::test]
    async fn read_range_sends_both_timestamps() {
        let (ts, transport) = facade(RecordingTransport::new().respond_with(Ok("[]".to_string())));
        let t1 = at(1_700_000_000, 0);
        let t2 = at(1_700_000_060, 999_999);

        assert_eq!(ts.read_range(t1, t2).await.unwrap(), "[]");

        let requests = transport.requests().await;
        assert_eq!(requests[0].url, format!("{ENDPOINT}/ts/range"));
        let Payload::JsonParams(params) = &requests[0].payload else {
            panic!("expected json params, got {:?}", requests[0].payload);
        };
        let params: serde_json::Value = serde_json::from_str(params).unwrap();
        let fields = params.as_object().unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(
            params["startTimestamp"].as_f64(),
            Some(ts.time_to_timestamp(t1))
        );
        assert_eq!(
            params["endTimestamp"].as_f64(),
            Some(ts.time_to_timestamp(t2))
        );
    }

    #[tokio::test]
    async fn read_range_equal_bounds_is_allowed() {
        let (ts, transport) = facade(RecordingTransport::new().respond_with(Ok("[]".to_string())));
        let t = at(1_700_000_000, 0);

        ts.read_range(t, t).await.unwrap();
        assert_eq!(transport.requests().await.len(), 1);
    }

    #[tokio::test]
    async fn read_range_inverted_is_rejected_locally() {
        let (ts, transport) = facade(RecordingTransport::new());

        let err = ts
            .read_range(at(1_700_000_060, 0), at(1_700_000_000, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidRange { .. }));
        assert!(transport.requests().await.is_empty());
    }

    #[tokio::test]
    async fn write_raw_value_posts_data_without_timestamp() {
        let (ts, transport) = facade(RecordingTransport::new());

        ts.write_raw_value("5").await.unwrap();

        let requests = transport.requests().await;
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(requests[0].url, format!("{ENDPOINT}/ts"));
        assert_eq!(requests[0].payload, Payload::Body("{\"data\": 5}".to_string()));
    }

    #[tokio::test]
    async fn write_raw_value_at_posts_data_and_plain_timestamp() {
        let (ts, transport) = facade(RecordingTransport::new());
        let t = at(1_700_000_000, 42_000_000);

        ts.write_raw_value_at("5", t).await.unwrap();

        let requests = transport.requests().await;
        let Payload::Body(body) = &requests[0].payload else {
            panic!("expected body, got {:?}", requests[0].payload);
        };
        assert!(body.contains("\"timestamp\":1700000000042}"));
        let v: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(v["data"], json!(5));
        assert_eq!(v["timestamp"].as_f64(), Some(ts.time_to_timestamp(t)));
    }

    #[tokio::test]
    async fn write_propagates_transport_error() {
        let failure = TransportError::Network {
            url: format!("{ENDPOINT}/ts"),
            message: "connection reset".to_string(),
        };
        let (ts, _) = facade(RecordingTransport::new().respond_with(Err(failure.clone())));

        let err = ts.write_raw_value("1").await.unwrap_err();
        assert!(matches!(err, StoreError::Transport(ref e) if *e == failure));
    }

    #[tokio::test]
    async fn latest_value_decodes_envelope() {
        let (ts, _) = facade(
            RecordingTransport::new()
                .respond_with(Ok("[{\"timestamp\":1000,\"data\":{\"t\":21.5}}]".to_string())),
        );

        let value = ts.latest_value().await.unwrap();
        assert_eq!(value, Some(ValueEnvelope::new(1000.0, json!({"t": 21.5}))));
    }

    #[tokio::test]
    async fn values_since_rejects_non_envelope_array() {
        let (ts, _) = facade(RecordingTransport::new().respond_with(Ok("[1,2,3]".to_string())));

        let err = ts.values_since(at(0, 0)).await.unwrap_err();
        assert!(matches!(err, StoreError::Decode { operation: "since", .. }));
    }

    #[test]
    fn store_url_strips_datasource_id() {
        let ts = JsonStoreTimeSeries::new(Endpoint::new(ENDPOINT), Arc::new(RecordingTransport::new()));
        assert_eq!(ts.store_url().unwrap(), "http://store:8080");
    }

    #[test]
    fn time_conversion_is_exposed_per_instance() {
        let ts = JsonStoreTimeSeries::new(Endpoint::new(ENDPOINT), Arc::new(RecordingTransport::new()));
        let t = at(1, 2_500_000);
        assert_eq!(ts.time_to_timestamp(t), 1002.0);
        assert_eq!(ts.timestamp_to_time(1002.0), Some(at(1, 2_000_000)));
    }
}
