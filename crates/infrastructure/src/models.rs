use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, SecondsFormat, Utc};
use domain::{Todo, TodoId};
use std::collections::HashMap;

/// 全 ToDo が属するパーティション
pub const TODO_PARTITION: &str = "TODO";
/// ToDo アイテムのエンティティタイプ
pub const TODO_ENTITY_TYPE: &str = "Todo";

/// DynamoDB Single Table Design のキー構造
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamoDbKeys {
    pub pk: String, // パーティションキー
    pub sk: String, // ソートキー
}

impl DynamoDbKeys {
    /// ToDo 用のキーを生成
    ///
    /// SK は `<作成日時>#<ID>`。作成日時は固定長の RFC 3339 なので、
    /// 辞書順がそのまま時刻順になる。
    pub fn for_todo(todo: &Todo) -> Self {
        Self {
            pk: TODO_PARTITION.to_string(),
            sk: format!("{}#{}", format_timestamp(&todo.created_at), todo.id.as_str()),
        }
    }
}

/// マイクロ秒精度・`Z` 付きの固定長形式
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// ToDo を DynamoDB AttributeValue マップに変換
pub fn todo_to_item(todo: &Todo) -> HashMap<String, AttributeValue> {
    let keys = DynamoDbKeys::for_todo(todo);
    let mut item = HashMap::new();

    item.insert("PK".to_string(), AttributeValue::S(keys.pk));
    item.insert("SK".to_string(), AttributeValue::S(keys.sk));
    item.insert(
        "EntityType".to_string(),
        AttributeValue::S(TODO_ENTITY_TYPE.to_string()),
    );
    item.insert("id".to_string(), AttributeValue::S(todo.id.as_str().to_string()));
    item.insert("title".to_string(), AttributeValue::S(todo.title.clone()));
    item.insert(
        "created_at".to_string(),
        AttributeValue::S(format_timestamp(&todo.created_at)),
    );

    item
}

/// DynamoDB AttributeValue マップから ToDo を復元
pub fn item_to_todo(item: &HashMap<String, AttributeValue>) -> Result<Todo, String> {
    let id = item
        .get("id")
        .and_then(|v| v.as_s().ok())
        .ok_or("Missing id")?
        .clone();

    let title = item
        .get("title")
        .and_then(|v| v.as_s().ok())
        .ok_or("Missing title")?
        .clone();

    let created_at = item
        .get("created_at")
        .and_then(|v| v.as_s().ok())
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or("Missing or invalid created_at")?;

    Ok(Todo {
        id: TodoId::from_string(id),
        title,
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_todo() -> Todo {
        Todo {
            id: TodoId::from_string("01ARZ3NDEKTSV4RRFFQ69G5FAV".to_string()),
            title: "Buy milk".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_dynamodb_keys_for_todo() {
        let keys = DynamoDbKeys::for_todo(&sample_todo());
        assert_eq!(keys.pk, "TODO");
        assert_eq!(keys.sk, "2024-05-01T12:00:00.000000Z#01ARZ3NDEKTSV4RRFFQ69G5FAV");
    }

    #[test]
    fn test_sort_keys_order_by_time() {
        let mut earlier = sample_todo();
        earlier.created_at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 59, 59).unwrap();
        let mut later = sample_todo();
        later.created_at = earlier.created_at + chrono::Duration::microseconds(1);

        assert!(DynamoDbKeys::for_todo(&earlier).sk < DynamoDbKeys::for_todo(&later).sk);
    }

    #[test]
    fn test_item_conversion() {
        let todo = sample_todo();
        let item = todo_to_item(&todo);

        assert_eq!(item.get("EntityType").unwrap().as_s().unwrap(), "Todo");
        assert_eq!(
            item.get("created_at").unwrap().as_s().unwrap(),
            "2024-05-01T12:00:00.000000Z"
        );

        let restored = item_to_todo(&item).unwrap();
        assert_eq!(restored, todo);
    }

    #[test]
    fn test_item_missing_title_is_rejected() {
        let mut item = todo_to_item(&sample_todo());
        item.remove("title");
        assert_eq!(item_to_todo(&item).unwrap_err(), "Missing title");
    }
}
