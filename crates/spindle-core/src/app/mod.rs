//! App - アプリケーション層
//!
//! ports と impls を組み合わせて、呼び出し側にファサードを渡します。
//!
//! # 主要コンポーネント
//! - **StoreFactory**: バックエンド種別タグ -> ファサードの生成
//! - **config**: 環境変数からのメタデータ読み込み

pub mod config;
pub mod factory;

// 主要な型を再エクスポート
pub use self::config::{datasource_env_key, metadata_from_env};
pub use self::factory::StoreFactory;
