/// IDでTodoアイテムを1件取得するApp
use std::sync::Arc;

use async_trait::async_trait;
use lambda_http::http::StatusCode;
use tracing::debug;

use super::app::{require_id, App, AppError, ValidationStatus};
use crate::domain::{ApiGatewayEvent, ApiGatewayResponse};
use crate::infrastructure::TodoRepository;

/// GET /todos/{id}
///
/// - 見つかった場合: 200 + アイテム
/// - 見つからない場合: 404
/// - `id`が欠落: `ValidationStatus::missing_id`（既定404）、リポジトリは呼ばない
pub struct GetByIdApp<R>
where
    R: TodoRepository,
{
    table: String,
    repository: Arc<R>,
    validation: ValidationStatus,
}

impl<R> GetByIdApp<R>
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
impl<R> App for GetByIdApp<R>
where
    R: TodoRepository,
{
    fn name(&self) -> &'static str {
        "get_by_id"
    }

    fn table(&self) -> &str {
        &self.table
    }

    fn validation_status(&self) -> &ValidationStatus {
        &self.validation
    }

    async fn execute(&self, event: &ApiGatewayEvent) -> Result<ApiGatewayResponse, AppError> {
        let id = require_id(event)?;

        debug!(table = %self.table, id = id, "Todo取得");
        let todo = self
            .repository
            .get_by_id(id, &self.table)
            .await?
            .ok_or_else(|| AppError::NotFound(id.to_string()))?;

        Ok(ApiGatewayResponse::json(StatusCode::OK.as_u16(), &todo)?)
    }
}
