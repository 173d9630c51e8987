//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **JsonStoreTimeSeries / JsonStoreKeyValue**: store-json バックエンドのファサード
//! - **InMemoryStore**: store-json をエミュレートする transport（開発用）
//! - **RecordingTransport**: リクエストを記録する transport（テスト用）
//! - **HttpTransport**: reqwest による transport（feature `http`）

pub mod inmem_store;
pub mod json_store;
pub mod recording;

#[cfg(feature = "http")]
pub mod http;

// 主要な型を再エクスポート
pub use self::inmem_store::InMemoryStore;
pub use self::json_store::{JsonStoreKeyValue, JsonStoreTimeSeries};
pub use self::recording::{Payload, RecordedRequest, RecordingTransport};

#[cfg(feature = "http")]
pub use self::http::HttpTransport;
