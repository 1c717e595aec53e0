use crate::models::{item_to_todo, todo_to_item, TODO_PARTITION};
use crate::{Connector, TodoRepository};
use aws_config::retry::RetryConfig;
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::config::{Credentials, Region, SharedCredentialsProvider};
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, AttributeValue, BillingMode, KeySchemaElement, KeyType,
    ScalarAttributeType, TableStatus,
};
use aws_sdk_dynamodb::Client;
use domain::{NewTodo, Todo, TodoError, TodoId, TodoResult};
use shared::Config;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

/// テーブルが ACTIVE になるまでの確認回数
const TABLE_READY_ATTEMPTS: u32 = 30;
const TABLE_READY_INTERVAL: Duration = Duration::from_millis(500);

fn storage_error(operation: &str, err: impl std::error::Error) -> TodoError {
    TodoError::storage(format!("DynamoDB {operation} failed: {}", DisplayErrorContext(err)))
}

/// 設定されたホスト/ポートの DynamoDB に接続するコネクタ
#[derive(Debug, Clone)]
pub struct DynamoDbConnector {
    endpoint: String,
    region: String,
    table_name: String,
    credentials: Credentials,
}

impl DynamoDbConnector {
    pub fn new(config: &Config) -> Self {
        Self {
            endpoint: config.store_endpoint(),
            region: config.aws_region.clone(),
            table_name: config.dynamodb_table.clone(),
            credentials: static_credentials(config),
        }
    }

    async fn build_client(&self) -> Client {
        // 失敗はそのまま呼び出し側へ返す（SDK 側で再試行しない）
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .endpoint_url(&self.endpoint)
            .region(Region::new(self.region.clone()))
            .credentials_provider(SharedCredentialsProvider::new(self.credentials.clone()))
            .retry_config(RetryConfig::disabled())
            .load()
            .await;

        Client::new(&sdk_config)
    }
}

/// 接続に使う静的な認証情報
///
/// 環境変数で両方与えられていればそれを使い、無ければ DynamoDB Local 向けのダミー値。
/// 既定の認証チェーン（IMDS 等）は辿らない。
fn static_credentials(config: &Config) -> Credentials {
    match (&config.aws_access_key_id, &config.aws_secret_access_key) {
        (Some(key_id), Some(secret)) => {
            Credentials::new(key_id.clone(), secret.clone(), None, None, "todo-env")
        }
        _ => Credentials::new("local", "local", None, None, "todo-local"),
    }
}

impl Connector for DynamoDbConnector {
    type Collection = DynamoDbTodoCollection;

    async fn connect(&self) -> TodoResult<Self::Collection> {
        info!(endpoint = %self.endpoint, table = %self.table_name, "Connecting to DynamoDB");

        let collection = DynamoDbTodoCollection {
            client: self.build_client().await,
            table_name: self.table_name.clone(),
        };
        collection.ensure_table().await?;

        Ok(collection)
    }
}

/// DynamoDB 上の ToDo コレクション
#[derive(Debug, Clone)]
pub struct DynamoDbTodoCollection {
    client: Client,
    table_name: String,
}

impl DynamoDbTodoCollection {
    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// テーブルの存在を確認し、なければ作成して ACTIVE になるまで待つ
    async fn ensure_table(&self) -> TodoResult<()> {
        match self.table_status().await? {
            Some(TableStatus::Active) => return Ok(()),
            Some(_) => {}
            None => self.create_table().await?,
        }

        for _ in 0..TABLE_READY_ATTEMPTS {
            if let Some(TableStatus::Active) = self.table_status().await? {
                info!(table = %self.table_name, "Table is active");
                return Ok(());
            }
            sleep(TABLE_READY_INTERVAL).await;
        }

        Err(TodoError::storage(format!(
            "table {} did not become active",
            self.table_name
        )))
    }

    async fn table_status(&self) -> TodoResult<Option<TableStatus>> {
        match self
            .client
            .describe_table()
            .table_name(&self.table_name)
            .send()
            .await
        {
            Ok(output) => Ok(output
                .table()
                .and_then(|table| table.table_status())
                .cloned()),
            Err(e)
                if e
                    .as_service_error()
                    .is_some_and(|service| service.is_resource_not_found_exception()) =>
            {
                Ok(None)
            }
            Err(e) => Err(storage_error("DescribeTable", e)),
        }
    }

    async fn create_table(&self) -> TodoResult<()> {
        warn!(table = %self.table_name, "Table not found, creating it");

        let attribute = |name: &str| {
            AttributeDefinition::builder()
                .attribute_name(name)
                .attribute_type(ScalarAttributeType::S)
                .build()
                .map_err(|e| storage_error("CreateTable", e))
        };
        let key = |name: &str, key_type: KeyType| {
            KeySchemaElement::builder()
                .attribute_name(name)
                .key_type(key_type)
                .build()
                .map_err(|e| storage_error("CreateTable", e))
        };

        self.client
            .create_table()
            .table_name(&self.table_name)
            .billing_mode(BillingMode::PayPerRequest)
            .attribute_definitions(attribute("PK")?)
            .attribute_definitions(attribute("SK")?)
            .key_schema(key("PK", KeyType::Hash)?)
            .key_schema(key("SK", KeyType::Range)?)
            .send()
            .await
            .map_err(|e| storage_error("CreateTable", e))?;

        Ok(())
    }
}

impl TodoRepository for DynamoDbTodoCollection {
    async fn list_newest_first(&self) -> TodoResult<Vec<Todo>> {
        let mut todos = Vec::new();
        let mut exclusive_start_key = None;

        loop {
            let output = self
                .client
                .query()
                .table_name(&self.table_name)
                .key_condition_expression("PK = :pk")
                .expression_attribute_values(":pk", AttributeValue::S(TODO_PARTITION.to_string()))
                .scan_index_forward(false)
                .set_exclusive_start_key(exclusive_start_key.take())
                .send()
                .await
                .map_err(|e| storage_error("Query", e))?;

            for item in output.items() {
                let todo = item_to_todo(item)
                    .map_err(|e| TodoError::storage(format!("Malformed todo item: {e}")))?;
                todos.push(todo);
            }

            match output.last_evaluated_key() {
                Some(key) if !key.is_empty() => exclusive_start_key = Some(key.clone()),
                _ => break,
            }
        }

        info!(count = todos.len(), "Todos listed");
        Ok(todos)
    }

    async fn insert(&self, todo: NewTodo) -> TodoResult<TodoId> {
        let todo = todo.into_todo(TodoId::new());

        // 同じキーが既に存在する場合は書き込まない（ID を再利用しない）
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(todo_to_item(&todo)))
            .condition_expression("attribute_not_exists(PK)")
            .send()
            .await
            .map_err(|e| storage_error("PutItem", e))?;

        info!(todo_id = %todo.id, "Todo saved successfully");
        Ok(todo.id)
    }
}
