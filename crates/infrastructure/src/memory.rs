use crate::{Connector, TodoRepository};
use domain::{NewTodo, Todo, TodoError, TodoId, TodoResult};
use std::sync::{Arc, Mutex, MutexGuard};

/// 開発/テスト用のインメモリ ToDo コレクション
#[derive(Debug, Clone, Default)]
pub struct InMemoryTodoCollection {
    todos: Arc<Mutex<Vec<Todo>>>,
}

impl InMemoryTodoCollection {
    fn lock(&self) -> TodoResult<MutexGuard<'_, Vec<Todo>>> {
        self.todos
            .lock()
            .map_err(|_| TodoError::storage("in-memory store lock poisoned"))
    }

    pub fn len(&self) -> usize {
        self.lock().map(|todos| todos.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TodoRepository for InMemoryTodoCollection {
    async fn list_newest_first(&self) -> TodoResult<Vec<Todo>> {
        // 挿入の逆順に並べてから安定ソートするので、同時刻は後から入れたものが先
        let mut todos: Vec<Todo> = self.lock()?.iter().rev().cloned().collect();
        todos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(todos)
    }

    async fn insert(&self, todo: NewTodo) -> TodoResult<TodoId> {
        let todo = todo.into_todo(TodoId::new());
        let id = todo.id.clone();
        self.lock()?.push(todo);
        Ok(id)
    }
}

/// 共有のインメモリコレクションを返すコネクタ
#[derive(Debug, Clone, Default)]
pub struct InMemoryConnector {
    collection: InMemoryTodoCollection,
}

impl InMemoryConnector {
    pub fn new(collection: InMemoryTodoCollection) -> Self {
        Self { collection }
    }
}

impl Connector for InMemoryConnector {
    type Collection = InMemoryTodoCollection;

    async fn connect(&self) -> TodoResult<Self::Collection> {
        Ok(self.collection.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use domain::TodoInput;

    fn new_todo(title: &str, offset_secs: i64) -> NewTodo {
        let base = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        NewTodo::with_created_at(
            TodoInput::new(title).unwrap(),
            base + Duration::seconds(offset_secs),
        )
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let collection = InMemoryTodoCollection::default();
        collection.insert(new_todo("middle", 10)).await.unwrap();
        collection.insert(new_todo("oldest", 0)).await.unwrap();
        collection.insert(new_todo("newest", 20)).await.unwrap();

        let titles: Vec<String> = collection
            .list_newest_first()
            .await
            .unwrap()
            .into_iter()
            .map(|todo| todo.title)
            .collect();

        assert_eq!(titles, vec!["newest", "middle", "oldest"]);
    }

    #[tokio::test]
    async fn test_insert_assigns_unique_ids() {
        let collection = InMemoryTodoCollection::default();
        let first = collection.insert(new_todo("a", 0)).await.unwrap();
        let second = collection.insert(new_todo("a", 0)).await.unwrap();

        assert_ne!(first, second);
        assert_eq!(collection.len(), 2);
    }

    #[tokio::test]
    async fn test_connector_shares_collection() {
        let collection = InMemoryTodoCollection::default();
        let connector = InMemoryConnector::new(collection.clone());

        let connected = connector.connect().await.unwrap();
        connected.insert(new_todo("shared", 0)).await.unwrap();

        assert_eq!(collection.len(), 1);
    }
}
