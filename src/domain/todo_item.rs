/// Todoアイテムのドメインモデル
///
/// テーブルに保存される1件のレコードと、作成・更新リクエストのペイロードを定義する。
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Todoアイテムの検証エラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TodoValidationError {
    /// IDが空文字列
    #[error("id must not be empty")]
    EmptyId,

    /// パスのIDとボディのIDが一致しない
    #[error("body id '{body}' does not match path id '{path}'")]
    IdMismatch { path: String, body: String },
}

/// 保存対象のTodoアイテム
///
/// JSON表現は `{"id": ..., "title": ..., "isComplete": ...}`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    /// アイテムID（テーブル内で一意）
    pub id: String,
    /// タイトル
    pub title: String,
    /// 完了フラグ
    pub is_complete: bool,
}

impl TodoItem {
    pub fn new(id: impl Into<String>, title: impl Into<String>, is_complete: bool) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            is_complete,
        }
    }

    /// IDが空でないことを検証
    pub fn validate(&self) -> Result<(), TodoValidationError> {
        if self.id.trim().is_empty() {
            return Err(TodoValidationError::EmptyId);
        }
        Ok(())
    }
}

/// 作成リクエストのペイロード
///
/// `id`が省略された場合はUUID v4を採番する。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTodo {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub is_complete: bool,
}

impl NewTodo {
    /// 保存用のTodoItemに変換
    pub fn into_item(self) -> Result<TodoItem, TodoValidationError> {
        let id = match self.id {
            Some(id) => id,
            None => Uuid::new_v4().to_string(),
        };
        let item = TodoItem::new(id, self.title, self.is_complete);
        item.validate()?;
        Ok(item)
    }
}

/// 更新リクエストのペイロード（全置換）
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoUpdate {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub is_complete: bool,
}

impl TodoUpdate {
    /// パスパラメータのIDを適用してTodoItemに変換
    ///
    /// ボディにIDが含まれる場合はパスのIDと一致している必要がある。
    pub fn into_item(self, path_id: &str) -> Result<TodoItem, TodoValidationError> {
        if let Some(body_id) = self.id
            && body_id != path_id
        {
            return Err(TodoValidationError::IdMismatch {
                path: path_id.to_string(),
                body: body_id,
            });
        }
        let item = TodoItem::new(path_id, self.title, self.is_complete);
        item.validate()?;
        Ok(item)
    }
}
