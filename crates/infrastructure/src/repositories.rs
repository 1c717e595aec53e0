use domain::{NewTodo, Todo, TodoId, TodoResult};
use std::future::Future;

/// ToDo コレクションへのアクセス
///
/// 実装は 1 操作につきストアへの単一の呼び出し（一覧はページ追跡を含む）を行う。
pub trait TodoRepository: Send + Sync {
    /// 全件を作成日時の降順（新しい順）で取得
    fn list_newest_first(&self) -> impl Future<Output = TodoResult<Vec<Todo>>> + Send;

    /// 1 件挿入し、採番した ID を返す
    fn insert(&self, todo: NewTodo) -> impl Future<Output = TodoResult<TodoId>> + Send;
}
