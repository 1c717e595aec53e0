use crate::TodoRepository;
use domain::TodoResult;
use std::future::Future;
use tokio::sync::OnceCell;
use tracing::{error, info};

/// ストアへの接続を確立する
pub trait Connector: Send + Sync {
    type Collection: TodoRepository;

    fn connect(&self) -> impl Future<Output = TodoResult<Self::Collection>> + Send;
}

/// プロセス内で唯一のコレクションハンドルを遅延生成して共有する
///
/// 起動時に一度だけ構築し、サービスへ注入する。初回の `get_connection` で接続し、
/// 以降はキャッシュしたハンドルを返す。同時に初回呼び出しが来ても `connect` は 1 回だけ。
/// 接続に失敗した場合はセルを空のまま残し、次の呼び出しで再試行する。
pub struct ConnectionProvider<C: Connector> {
    connector: C,
    collection: OnceCell<C::Collection>,
}

impl<C: Connector> ConnectionProvider<C> {
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            collection: OnceCell::new(),
        }
    }

    pub async fn get_connection(&self) -> TodoResult<&C::Collection> {
        self.collection
            .get_or_try_init(|| async {
                info!("Opening document store connection");
                match self.connector.connect().await {
                    Ok(collection) => {
                        info!("Document store connection established");
                        Ok(collection)
                    }
                    Err(e) => {
                        error!(error = %e, "Failed to connect to document store");
                        Err(e)
                    }
                }
            })
            .await
    }

    pub fn is_connected(&self) -> bool {
        self.collection.initialized()
    }
}
