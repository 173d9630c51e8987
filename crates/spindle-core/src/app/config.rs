//! Config - 環境変数からのデータソースメタデータ読み込み
//!
//! コンテナマネージャはデータソースごとのカタログメタデータを
//! `DATASOURCE_<NAME>` 形式の環境変数でアプリに渡します。
//!
//! edition 2024 では `std::env::set_var` が unsafe なので、
//! テストでは `metadata_from_lookup` に lookup 関数を渡して検証します。

use crate::domain::ConstructionError;

/// データソースメタデータの環境変数プレフィックス
pub const DATASOURCE_ENV_PREFIX: &str = "DATASOURCE_";

/// データソース名 -> 環境変数名（`sensor-1` -> `DATASOURCE_SENSOR_1`）
pub fn datasource_env_key(name: &str) -> String {
    let normalized: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
        .collect();
    format!("{DATASOURCE_ENV_PREFIX}{normalized}")
}

/// 環境変数 `var` からメタデータ（JSON テキスト）を取得
pub fn metadata_from_env(var: &str) -> Result<String, ConstructionError> {
    metadata_from_lookup(var, |key| std::env::var(key).ok())
}

/// lookup 関数からメタデータを取得（未設定・空文字列はエラー）
pub fn metadata_from_lookup<F>(var: &str, lookup: F) -> Result<String, ConstructionError>
where
    F: FnOnce(&str) -> Option<String>,
{
    lookup(var)
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ConstructionError::MissingEnvironment(var.to_string()))
}
