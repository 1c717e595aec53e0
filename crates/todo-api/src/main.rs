//! todo-api バイナリのエントリポイント

use infrastructure::{ConnectionProvider, DynamoDbConnector};
use shared::{init_tracing, Config};
use std::net::SocketAddr;
use std::sync::Arc;
use todo_api::{app, TodoService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = init_tracing() {
        eprintln!("トレーシング初期化エラー: {e}");
    }

    // 接続パラメータの欠落はここで起動エラーにする
    let config = Config::from_env()?;
    tracing::info!(
        environment = %config.environment,
        store = %config.store_endpoint(),
        table = %config.dynamodb_table,
        "Configuration loaded"
    );

    // 接続は最初のリクエストで確立し、以降はプロセス終了まで共有する
    let connections = ConnectionProvider::new(DynamoDbConnector::new(&config));
    let service = Arc::new(TodoService::new(connections));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server starting");

    axum::serve(listener, app(service)).await?;
    Ok(())
}
