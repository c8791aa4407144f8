/// Todoアイテムを全置換で更新するApp
use std::sync::Arc;

use async_trait::async_trait;
use lambda_http::http::StatusCode;
use tracing::debug;

use super::app::{parse_body, require_id, App, AppError, ValidationStatus};
use crate::domain::{ApiGatewayEvent, ApiGatewayResponse, TodoUpdate};
use crate::infrastructure::TodoRepository;

/// PUT /todos/{id}
///
/// 部分更新はなく、ボディの内容でアイテム全体を置き換える（存在しなければ作成）。
pub struct UpdateApp<R>
where
    R: TodoRepository,
{
    table: String,
    repository: Arc<R>,
    validation: ValidationStatus,
}

impl<R> UpdateApp<R>
where
    R: TodoRepository,
{
    pub fn new(table: impl Into<String>, repository: Arc<R>) -> Self {
        Self {
            table: table.into(),
            repository,
            validation: ValidationStatus::default(),
        }
    }

    /// 検証エラー時のステータスコードを差し替える
    pub fn with_validation_status(mut self, validation: ValidationStatus) -> Self {
        self.validation = validation;
        self
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }
}

#[async_trait]
impl<R> App for UpdateApp<R>
where
    R: TodoRepository,
{
    fn name(&self) -> &'static str {
        "update"
    }

    fn table(&self) -> &str {
        &self.table
    }

    fn validation_status(&self) -> &ValidationStatus {
        &self.validation
    }

    async fn execute(&self, event: &ApiGatewayEvent) -> Result<ApiGatewayResponse, AppError> {
        let id = require_id(event)?;
        let todo = parse_body::<TodoUpdate>(event)?.into_item(id)?;

        debug!(table = %self.table, id = id, "Todo更新");
        self.repository.put_todo(&todo, &self.table).await?;

        Ok(ApiGatewayResponse::json(StatusCode::OK.as_u16(), &todo)?)
    }
}
