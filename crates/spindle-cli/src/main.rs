use std::sync::Arc;

use chrono::{TimeDelta, Utc};
use spindle_core::app::datasource_env_key;
use spindle_core::impls::InMemoryStore;
use spindle_core::{KeyValueStore, StoreError, StoreFactory, TimeSeriesStore};
use tracing_subscriber::EnvFilter;

const STORE_HREF: &str = "http://127.0.0.1:8080";
const DATASOURCE: &str = "demo-temperature";

/// メタデータ経由でファサードを作るデモ（環境変数がなければ組み立てる）
fn datasource_metadata() -> String {
    let key = datasource_env_key(DATASOURCE);
    std::env::var(&key).unwrap_or_else(|_| {
        serde_json::json!({
            "href": format!("{STORE_HREF}/{DATASOURCE}"),
            "item-metadata": [
                { "rel": "urn:X-hypercat:rels:hasDescription:en", "val": "Demo temperature" },
                { "rel": "urn:X-databox:rels:hasStoreType", "val": "store-json" }
            ]
        })
        .to_string()
    })
}

async fn run(factory: &StoreFactory) -> Result<(), Box<dyn std::error::Error>> {
    // (A) 時系列: メタデータから生成
    let ts = factory.time_series_from_metadata(&datasource_metadata())?;
    println!("store url: {}", ts.store_url()?);

    match ts.read_latest().await? {
        Some(latest) => println!("latest (before): {latest}"),
        None => println!("latest (before): no value yet"),
    }

    // (B) 値を書き込む（時刻指定あり・なし）
    let now = Utc::now();
    for (i, minutes_ago) in [30, 20, 10].into_iter().enumerate() {
        let at = now - TimeDelta::minutes(minutes_ago);
        ts.write_raw_value_at(&format!("{{\"celsius\": {}}}", 20.0 + i as f64), at)
            .await?;
    }
    ts.write_raw_value("{\"celsius\": 23.5}").await?;

    // (C) 読み出し
    let latest = ts.latest_value().await?;
    println!("latest (after): {latest:?}");

    let range = ts
        .read_range(now - TimeDelta::minutes(25), now - TimeDelta::minutes(5))
        .await?;
    println!("range: {range}");

    for value in ts.values_since(now - TimeDelta::hours(1)).await? {
        println!("  {:?} -> {}", value.time(), value.data);
    }

    // (D) key-value: 明示指定で生成
    let kv = factory.key_value(STORE_HREF, "demo-settings", "store-json")?;
    match kv.read().await {
        Err(StoreError::NotFound(url)) => println!("kv: nothing at {url} yet"),
        other => println!("kv: {other:?}"),
    }
    kv.write("{\"unit\": \"celsius\"}").await?;
    println!("kv: {}", kv.read().await?);

    // (E) 未サポートのタグは生成時に失敗する
    if let Err(e) = factory.time_series(STORE_HREF, DATASOURCE, "store-unknown") {
        println!("expected failure: {e}");
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // サンプルなので transport は InMemoryStore（本番は HttpTransport）
    let factory = StoreFactory::new(Arc::new(InMemoryStore::new()));

    if let Err(e) = run(&factory).await {
        tracing::error!(error = %e, "demo failed");
        std::process::exit(1);
    }
}
