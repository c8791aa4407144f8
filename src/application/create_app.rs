/// Todoアイテムを新規作成するApp
use std::sync::Arc;

use async_trait::async_trait;
use lambda_http::http::StatusCode;
use tracing::debug;

use super::app::{parse_body, App, AppError, ValidationStatus};
use crate::domain::{ApiGatewayEvent, ApiGatewayResponse, NewTodo};
use crate::infrastructure::TodoRepository;

/// POST /todos
///
/// ボディの`id`が省略された場合はUUIDを採番する。
/// 同じIDのアイテムは上書きされるため、再実行しても結果は変わらない。
pub struct CreateApp<R>
where
    R: TodoRepository,
{
    table: String,
    repository: Arc<R>,
    validation: ValidationStatus,
}

impl<R> CreateApp<R>
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
impl<R> App for CreateApp<R>
where
    R: TodoRepository,
{
    fn name(&self) -> &'static str {
        "create"
    }

    fn table(&self) -> &str {
        &self.table
    }

    fn validation_status(&self) -> &ValidationStatus {
        &self.validation
    }

    async fn execute(&self, event: &ApiGatewayEvent) -> Result<ApiGatewayResponse, AppError> {
        let todo = parse_body::<NewTodo>(event)?.into_item()?;

        debug!(table = %self.table, id = %todo.id, "Todo作成");
        self.repository.put_todo(&todo, &self.table).await?;

        Ok(ApiGatewayResponse::json(StatusCode::CREATED.as_u16(), &todo)?)
    }
}
