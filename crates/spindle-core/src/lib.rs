//! spindle-core
//!
//! Client facades for datasource stores.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（Endpoint, StoreType, ValueEnvelope, time, metadata, errors）
//! - **ports**: 抽象化レイヤー（StoreTransport, TimeSeriesStore, KeyValueStore, Clock）
//! - **impls**: 実装（store-json ファサード、InMemoryStore、RecordingTransport、HttpTransport）
//! - **app**: StoreFactory と環境変数からの設定

pub mod app;
pub mod domain;
pub mod impls;
pub mod ports;

pub use app::StoreFactory;
pub use domain::{ConstructionError, Endpoint, StoreError, StoreType, ValueEnvelope};
pub use ports::{KeyValueStore, StoreTransport, TimeSeriesStore, TransportError};
