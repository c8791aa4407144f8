/// DynamoDBでTodoアイテムを管理するためのリポジトリ
///
/// すべての操作は呼び出し時にテーブル名を受け取る。
/// 1つのリポジトリインスタンスで複数テーブルを扱える。
use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client as DynamoDbClient;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::TodoItem;

/// 属性名: ID（パーティションキー）
const ATTR_ID: &str = "id";
/// 属性名: タイトル
const ATTR_TITLE: &str = "title";
/// 属性名: 完了フラグ
const ATTR_IS_COMPLETE: &str = "isComplete";

/// リポジトリ操作のエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RepositoryError {
    /// キーとして使えない値（空のIDなど）
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// DynamoDBへの書き込みに失敗
    #[error("Write error: {0}")]
    WriteError(String),

    /// DynamoDBからの読み取りに失敗
    #[error("Read error: {0}")]
    ReadError(String),

    /// データのシリアライズ/デシリアライズに失敗
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Todoアイテム永続化用トレイト
///
/// 実際のDynamoDB実装とテスト用モックを差し替えられるよう抽象化する。
/// 「見つからない」はエラーではなく`Ok(None)`で表す。
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// IDでアイテムを取得
    ///
    /// # 戻り値
    /// * 見つかった場合は`Ok(Some(TodoItem))`
    /// * 見つからなかった場合は`Ok(None)`
    /// * 失敗時は`Err(RepositoryError)`
    async fn get_by_id(&self, id: &str, table: &str) -> Result<Option<TodoItem>, RepositoryError>;

    /// テーブル内の全アイテムを取得（空テーブルは空のVec）
    async fn list_all(&self, table: &str) -> Result<Vec<TodoItem>, RepositoryError>;

    /// アイテムを保存（同じIDのアイテムは上書き）
    async fn put_todo(&self, item: &TodoItem, table: &str) -> Result<(), RepositoryError>;

    /// IDでアイテムを削除
    ///
    /// 存在しないIDの削除も`Ok(())`を返す。
    async fn delete_by_id(&self, id: &str, table: &str) -> Result<(), RepositoryError>;
}

/// TodoItemをDynamoDBのアイテムに変換
pub fn todo_to_item(todo: &TodoItem) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (ATTR_ID.to_string(), AttributeValue::S(todo.id.clone())),
        (ATTR_TITLE.to_string(), AttributeValue::S(todo.title.clone())),
        (
            ATTR_IS_COMPLETE.to_string(),
            AttributeValue::Bool(todo.is_complete),
        ),
    ])
}

/// DynamoDBのアイテムをTodoItemに変換
pub fn item_to_todo(item: &HashMap<String, AttributeValue>) -> Result<TodoItem, RepositoryError> {
    let id = item
        .get(ATTR_ID)
        .and_then(|v| v.as_s().ok())
        .ok_or_else(|| RepositoryError::SerializationError("Missing id field".to_string()))?
        .clone();

    let title = item
        .get(ATTR_TITLE)
        .and_then(|v| v.as_s().ok())
        .ok_or_else(|| RepositoryError::SerializationError("Missing title field".to_string()))?
        .clone();

    let is_complete = *item
        .get(ATTR_IS_COMPLETE)
        .and_then(|v| v.as_bool().ok())
        .ok_or_else(|| {
            RepositoryError::SerializationError("Missing isComplete field".to_string())
        })?;

    Ok(TodoItem {
        id,
        title,
        is_complete,
    })
}

/// 空白のみ・空のIDを拒否
fn ensure_key(id: &str) -> Result<(), RepositoryError> {
    if id.trim().is_empty() {
        return Err(RepositoryError::InvalidKey("id must not be empty".to_string()));
    }
    Ok(())
}

/// スキャン1ページ分のアイテムをTodoItemに変換して追加
///
/// 変換できないアイテムはログに残してスキップする。
fn collect_page(
    items: Vec<HashMap<String, AttributeValue>>,
    table: &str,
    todos: &mut Vec<TodoItem>,
) {
    for item in items {
        match item_to_todo(&item) {
            Ok(todo) => todos.push(todo),
            Err(e) => {
                warn!(table = table, error = %e, "アイテムのデシリアライズに失敗、スキップ");
            }
        }
    }
}

/// 次ページの開始キーを決める（空のキーは最終ページ）
fn next_start_key(
    last_evaluated_key: Option<HashMap<String, AttributeValue>>,
) -> Option<HashMap<String, AttributeValue>> {
    last_evaluated_key.filter(|key| !key.is_empty())
}

/// TodoRepositoryのDynamoDB実装
#[derive(Debug, Clone)]
pub struct DynamoTodoRepository {
    /// DynamoDBクライアント
    client: DynamoDbClient,
}

impl DynamoTodoRepository {
    pub fn new(client: DynamoDbClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TodoRepository for DynamoTodoRepository {
    async fn get_by_id(&self, id: &str, table: &str) -> Result<Option<TodoItem>, RepositoryError> {
        ensure_key(id)?;

        let result = self
            .client
            .get_item()
            .table_name(table)
            .key(ATTR_ID, AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(|e| RepositoryError::ReadError(DisplayErrorContext(&e).to_string()))?;

        match result.item {
            Some(item) => Ok(Some(item_to_todo(&item)?)),
            None => Ok(None),
        }
    }

    async fn list_all(&self, table: &str) -> Result<Vec<TodoItem>, RepositoryError> {
        let mut todos = Vec::new();
        let mut exclusive_start_key: Option<HashMap<String, AttributeValue>> = None;

        // LastEvaluatedKeyがなくなるまでページを辿る
        loop {
            let response = self
                .client
                .scan()
                .table_name(table)
                .set_exclusive_start_key(exclusive_start_key.take())
                .send()
                .await
                .map_err(|e| RepositoryError::ReadError(DisplayErrorContext(&e).to_string()))?;

            collect_page(response.items.unwrap_or_default(), table, &mut todos);

            exclusive_start_key = next_start_key(response.last_evaluated_key);
            if exclusive_start_key.is_none() {
                break;
            }
        }

        debug!(table = table, count = todos.len(), "スキャン完了");

        Ok(todos)
    }

    async fn put_todo(&self, item: &TodoItem, table: &str) -> Result<(), RepositoryError> {
        ensure_key(&item.id)?;

        self.client
            .put_item()
            .table_name(table)
            .set_item(Some(todo_to_item(item)))
            .send()
            .await
            .map_err(|e| RepositoryError::WriteError(DisplayErrorContext(&e).to_string()))?;

        Ok(())
    }

    async fn delete_by_id(&self, id: &str, table: &str) -> Result<(), RepositoryError> {
        ensure_key(id)?;

        self.client
            .delete_item()
            .table_name(table)
            .key(ATTR_ID, AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(|e| RepositoryError::WriteError(DisplayErrorContext(&e).to_string()))?;

        Ok(())
    }
}
