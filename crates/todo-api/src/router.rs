use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue};
use axum::middleware::map_response;
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use infrastructure::Connector;
use std::sync::Arc;

use crate::handlers;
use crate::service::TodoService;

/// POST ボディの上限（バイト）
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// ルータを構築して返します。
/// `/todos/` は Web クライアントが末尾スラッシュ付きで呼ぶため同じハンドラに割り当てる。
pub fn app<C: Connector + 'static>(service: Arc<TodoService<C>>) -> Router {
    let todos = || {
        get(handlers::list_todos::<C>)
            .post(handlers::create_todo::<C>)
            .options(handlers::preflight)
    };

    Router::new()
        .route("/health", get(handlers::health::<C>))
        .route("/todos", todos())
        .route("/todos/", todos())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(map_response(add_cors_headers))
        .with_state(service)
}

async fn add_cors_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET,POST,OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    response
}
