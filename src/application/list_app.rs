/// テーブル内のTodoアイテムを全件返すApp
use std::sync::Arc;

use async_trait::async_trait;
use lambda_http::http::StatusCode;

use super::app::{App, AppError, ValidationStatus};
use crate::domain::{ApiGatewayEvent, ApiGatewayResponse};
use crate::infrastructure::TodoRepository;

/// GET /todos
///
/// 空テーブルでも200 + 空配列を返す。
pub struct ListApp<R>
where
    R: TodoRepository,
{
    table: String,
    repository: Arc<R>,
    validation: ValidationStatus,
}

impl<R> ListApp<R>
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
    ///
    /// ListAppには検証対象がないため、設定値はレスポンスに影響しない。
    pub fn with_validation_status(mut self, validation: ValidationStatus) -> Self {
        self.validation = validation;
        self
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }
}

#[async_trait]
impl<R> App for ListApp<R>
where
    R: TodoRepository,
{
    fn name(&self) -> &'static str {
        "list"
    }

    fn table(&self) -> &str {
        &self.table
    }

    fn validation_status(&self) -> &ValidationStatus {
        &self.validation
    }

    async fn execute(&self, _event: &ApiGatewayEvent) -> Result<ApiGatewayResponse, AppError> {
        let todos = self.repository.list_all(&self.table).await?;
        Ok(ApiGatewayResponse::json(StatusCode::OK.as_u16(), &todos)?)
    }
}
