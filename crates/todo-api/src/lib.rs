//! ToDo REST API（axum）
//!
//! `GET /todos` で一覧（新しい順）、`POST /todos` で作成を提供します。
//! 業務ロジックは `service::TodoService` に閉じ、HTTP 層はステータスコードへの
//! 対応付けのみを担当します。

pub mod error;
pub mod handlers;
pub mod models;
pub mod router;
pub mod service;

pub use router::{app, MAX_BODY_BYTES};
pub use service::TodoService;
