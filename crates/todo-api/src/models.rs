use domain::{Todo, TodoId};
use serde::{Deserialize, Serialize};

/// GET /todos レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ListTodosResponse {
    pub todos: Vec<Todo>,
}

/// POST /todos レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateTodoResponse {
    pub id: TodoId,
}

/// GET /health レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthBody {
    pub status: String,
    /// ストア接続状態（connected / pending）
    pub store: String,
}
