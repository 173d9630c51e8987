//! Endpoint - データソースの所在（URL 風の文字列）
//!
//! データソースの endpoint は `{store_url}/{datasource_id}` の形をしています。
//! ファサードは生成後に endpoint を変更しません。

use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::StoreError;

/// Endpoint はデータソースの URL
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Endpoint(String);

impl Endpoint {
    pub fn new(href: impl Into<String>) -> Self {
        Self(href.into())
    }

    /// ストア URL とデータソース ID から endpoint を組み立てる
    pub fn for_datasource(store_href: &str, datasource_id: &str) -> Self {
        Self(format!("{store_href}/{datasource_id}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `"/kv"`, `"/ts/latest"` などのリソース URL
    pub fn resource(&self, suffix: &str) -> String {
        format!("{}{}", self.0, suffix)
    }

    /// 最後のパスセグメント（データソース ID）を取り除いてストア URL を返す
    ///
    /// `scheme://` の後ろに `/` 区切りのセグメントがない場合はエラー。
    pub fn store_url(&self) -> Result<String, StoreError> {
        let href = self.0.as_str();
        let authority_start = href.find("://").map_or(0, |i| i + 3);
        let rest = &href[authority_start..];

        let Some(sep) = rest.rfind('/') else {
            return Err(StoreError::InvalidEndpoint(href.to_string()));
        };
        let (store, datasource) = (&rest[..sep], &rest[sep + 1..]);
        if store.is_empty() || datasource.is_empty() {
            return Err(StoreError::InvalidEndpoint(href.to_string()));
        }

        Ok(href[..authority_start + sep].to_string())
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Endpoint {
    fn from(href: String) -> Self {
        Self(href)
    }
}

impl From<&str> for Endpoint {
    fn from(href: &str) -> Self {
        Self(href.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn for_datasource_joins_with_slash() {
        let endpoint = Endpoint::for_datasource("http://store:8080", "sensor-1");
        assert_eq!(endpoint.as_str(), "http://store:8080/sensor-1");
        assert_eq!(
            endpoint.resource("/ts/latest"),
            "http://store:8080/sensor-1/ts/latest"
        );
    }

    #[rstest]
    #[case("http://store:8080/sensor-1", "http://store:8080")]
    #[case("https://store/api/v1/sensor-1", "https://store/api/v1")]
    #[case("store/sensor-1", "store")]
    fn store_url_strips_last_segment(#[case] href: &str, #[case] expected: &str) {
        let endpoint = Endpoint::new(href);
        assert_eq!(endpoint.store_url().unwrap(), expected);
    }

    #[rstest]
    #[case("http://store:8080")]
    #[case("http://store:8080/")]
    #[case("http:///sensor-1")]
    #[case("sensor-1")]
    #[case("")]
    fn store_url_rejects_endpoint_without_datasource(#[case] href: &str) {
        let err = Endpoint::new(href).store_url().unwrap_err();
        assert!(matches!(err, StoreError::InvalidEndpoint(ref h) if h == href));
    }

    #[test]
    fn store_url_inverts_for_datasource() {
        let endpoint = Endpoint::for_datasource("http://store:8080", "ds");
        assert_eq!(endpoint.store_url().unwrap(), "http://store:8080");
    }
}
