//! Ports - 抽象化レイヤー
//!
//! このモジュールは Hexagonal Architecture の「ポート」を定義します。
//!
//! # 構成
//! - **StoreTransport**: ストアへの I/O（外部コラボレータ）
//! - **TimeSeriesStore / KeyValueStore**: データモデルごとのファサード（capability）
//! - **Clock**: 時刻の抽象化
//!
//! ファサードの実装はバックエンドごとに 1 つ。呼び出し側は trait object
//! （`Box<dyn TimeSeriesStore>` など）だけを扱います。

pub mod clock;
pub mod key_value;
pub mod time_series;
pub mod transport;

// 主要な trait を再エクスポート
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::key_value::KeyValueStore;
pub use self::time_series::TimeSeriesStore;
pub use self::transport::{Method, StoreTransport, TransportError};
