use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use infrastructure::Connector;
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::{CreateTodoResponse, HealthBody, ListTodosResponse};
use crate::service::TodoService;

pub async fn list_todos<C: Connector>(
    State(service): State<Arc<TodoService<C>>>,
) -> Result<impl IntoResponse, ApiError> {
    let todos = service.list_todos().await?;
    Ok((StatusCode::OK, Json(ListTodosResponse { todos })))
}

/// ボディは生のバイト列で受け取り、JSON の不備も `{"error": ...}` 形式の 400 にする
///
/// サイズ超過などボディ読み取り自体の失敗も同じ形式で返す。
pub async fn create_todo<C: Connector>(
    State(service): State<Arc<TodoService<C>>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let body = body?;
    if body.is_empty() {
        return Err(ApiError::BadRequest("Empty body".to_string()));
    }

    let payload: serde_json::Value = serde_json::from_slice(&body)?;
    let id = service.create_todo(&payload).await?;
    Ok((StatusCode::CREATED, Json(CreateTodoResponse { id })))
}

pub async fn health<C: Connector>(
    State(service): State<Arc<TodoService<C>>>,
) -> impl IntoResponse {
    let store = if service.is_connected() {
        "connected"
    } else {
        "pending"
    };
    let body = HealthBody {
        status: "ok".to_string(),
        store: store.to_string(),
    };
    (StatusCode::OK, Json(body))
}

pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}
