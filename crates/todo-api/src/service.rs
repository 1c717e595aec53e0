//! ToDo サービス
//!
//! リクエストペイロードと永続化ドキュメントの仲介を行う唯一の業務ロジック層。
//! 呼び出し間で ToDo の状態は保持しない。

use domain::{NewTodo, Todo, TodoId, TodoInput, TodoResult};
use infrastructure::{ConnectionProvider, Connector, TodoRepository};
use serde_json::Value;
use tracing::{info, instrument};

pub struct TodoService<C: Connector> {
    connections: ConnectionProvider<C>,
}

impl<C: Connector> TodoService<C> {
    pub fn new(connections: ConnectionProvider<C>) -> Self {
        Self { connections }
    }

    /// 全 ToDo を作成日時の降順で返す
    #[instrument(skip(self))]
    pub async fn list_todos(&self) -> TodoResult<Vec<Todo>> {
        let collection = self.connections.get_connection().await?;
        collection.list_newest_first().await
    }

    /// ペイロードを検証して ToDo を 1 件作成し、新しい ID を返す
    ///
    /// 検証に失敗した場合はストアに触れずに `TodoError::Validation` を返す。
    #[instrument(skip_all)]
    pub async fn create_todo(&self, payload: &Value) -> TodoResult<TodoId> {
        let input = TodoInput::from_payload(payload)?;
        let new_todo = NewTodo::stamp(input);

        let collection = self.connections.get_connection().await?;
        let id = collection.insert(new_todo).await?;

        info!(todo_id = %id, "Todo created");
        Ok(id)
    }

    pub fn is_connected(&self) -> bool {
        self.connections.is_connected()
    }
}
