/// IDでTodoアイテムを削除するApp
use std::sync::Arc;

use async_trait::async_trait;
use lambda_http::http::StatusCode;
use tracing::debug;

use super::app::{require_id, App, AppError, ValidationStatus};
use crate::domain::{ApiGatewayEvent, ApiGatewayResponse};
use crate::infrastructure::TodoRepository;

/// DELETE /todos/{id}
///
/// 存在しないIDの削除も成功（204）として扱う。
pub struct DeleteApp<R>
where
    R: TodoRepository,
{
    table: String,
    repository: Arc<R>,
    validation: ValidationStatus,
}

impl<R> DeleteApp<R>
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
impl<R> App for DeleteApp<R>
where
    R: TodoRepository,
{
    fn name(&self) -> &'static str {
        "delete"
    }

    fn table(&self) -> &str {
        &self.table
    }

    fn validation_status(&self) -> &ValidationStatus {
        &self.validation
    }

    async fn execute(&self, event: &ApiGatewayEvent) -> Result<ApiGatewayResponse, AppError> {
        let id = require_id(event)?;

        debug!(table = %self.table, id = id, "Todo削除");
        self.repository.delete_by_id(id, &self.table).await?;

        Ok(ApiGatewayResponse::empty(StatusCode::NO_CONTENT.as_u16()))
    }
}
