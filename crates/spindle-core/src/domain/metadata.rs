//! DatasourceMetadata - カタログ（Hypercat item）メタデータ
//!
//! コンテナマネージャがアプリに渡すデータソース記述です。
//! `href` にデータソースの endpoint、`item-metadata` に rel/val ペアの一覧が入ります。
//!
//! ```json
//! {
//!   "href": "http://store:8080/sensor-1",
//!   "item-metadata": [
//!     { "rel": "urn:X-hypercat:rels:hasDescription:en", "val": "Temperature" },
//!     { "rel": "urn:X-databox:rels:hasStoreType", "val": "store-json" }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use super::endpoint::Endpoint;
use super::errors::ConstructionError;

pub const REL_STORE_TYPE: &str = "urn:X-databox:rels:hasStoreType";
pub const REL_DESCRIPTION: &str = "urn:X-hypercat:rels:hasDescription:en";
pub const REL_VENDOR: &str = "urn:X-databox:rels:hasVendor";
pub const REL_DATASOURCE_TYPE: &str = "urn:X-databox:rels:hasType";
pub const REL_DATASOURCE_ID: &str = "urn:X-databox:rels:hasDatasourceid";

/// One `{rel, val}` pair of `item-metadata`.
///
/// `val` は文字列とは限らない（bool や数値のこともある）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelValPair {
    pub rel: String,
    #[serde(default)]
    pub val: serde_json::Value,
}

/// Catalogue metadata of a single data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasourceMetadata {
    #[serde(default)]
    pub href: String,

    #[serde(rename = "item-metadata", default)]
    pub item_metadata: Vec<RelValPair>,
}

impl DatasourceMetadata {
    pub fn parse(blob: &str) -> Result<Self, ConstructionError> {
        Ok(serde_json::from_str(blob)?)
    }

    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new(self.href.clone())
    }

    /// rel に対応する文字列値（最初に見つかったもの）
    ///
    /// rel がない、または val が文字列でない場合は None（エラーにしない）。
    pub fn lookup(&self, rel: &str) -> Option<&str> {
        self.item_metadata
            .iter()
            .find(|pair| pair.rel == rel)
            .and_then(|pair| pair.val.as_str())
    }

    /// バックエンド種別タグ（未指定なら空文字列）
    pub fn store_type_tag(&self) -> &str {
        self.lookup(REL_STORE_TYPE).unwrap_or_default()
    }

    pub fn description(&self) -> Option<&str> {
        self.lookup(REL_DESCRIPTION)
    }

    pub fn vendor(&self) -> Option<&str> {
        self.lookup(REL_VENDOR)
    }

    pub fn datasource_type(&self) -> Option<&str> {
        self.lookup(REL_DATASOURCE_TYPE)
    }

    pub fn datasource_id(&self) -> Option<&str> {
        self.lookup(REL_DATASOURCE_ID)
    }
}
