/// App共通の契約
///
/// 各Appはテーブル名とリポジトリを保持し、1回の呼び出しで
/// リポジトリ操作を最大1回だけ実行してレスポンスを返す。
use async_trait::async_trait;
use lambda_http::http::StatusCode;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::domain::{ApiGatewayEvent, ApiGatewayResponse, TodoValidationError};
use crate::infrastructure::RepositoryError;

/// IDを受け取るパスパラメータ名
pub const ID_PARAMETER: &str = "id";

/// 検証エラー時に返すステータスコード
///
/// Appごとに差し替えられる設定値として扱う。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationStatus {
    /// パスパラメータ`id`が欠落・空の場合
    pub missing_id: u16,
    /// ボディが欠落・不正な場合
    pub invalid_body: u16,
}

impl Default for ValidationStatus {
    fn default() -> Self {
        Self {
            missing_id: StatusCode::NOT_FOUND.as_u16(),
            invalid_body: StatusCode::BAD_REQUEST.as_u16(),
        }
    }
}

/// App実行時のエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AppError {
    /// パスパラメータ`id`が欠落
    #[error("Missing path parameter: id")]
    MissingId,

    /// ボディが欠落または不正
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// 指定IDのアイテムが存在しない
    #[error("Todo not found: {0}")]
    NotFound(String),

    /// ストア操作の失敗
    #[error("Store failure: {0}")]
    Store(#[from] RepositoryError),

    /// レスポンスのシリアライズに失敗
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<TodoValidationError> for AppError {
    fn from(err: TodoValidationError) -> Self {
        AppError::InvalidBody(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl AppError {
    /// エラーに対応するステータスコード
    pub fn status_code(&self, validation: &ValidationStatus) -> u16 {
        match self {
            AppError::MissingId => validation.missing_id,
            AppError::InvalidBody(_) => validation.invalid_body,
            AppError::NotFound(_) => StatusCode::NOT_FOUND.as_u16(),
            AppError::Store(_) | AppError::Serialization(_) => {
                StatusCode::INTERNAL_SERVER_ERROR.as_u16()
            }
        }
    }

    /// エラーをレスポンスに変換
    ///
    /// ストア起因のエラーは内部情報を返さない。
    pub fn into_response(self, validation: &ValidationStatus) -> ApiGatewayResponse {
        let status = self.status_code(validation);
        match self {
            AppError::Store(_) | AppError::Serialization(_) => {
                ApiGatewayResponse::error(status, "internal_error", "Internal server error")
            }
            other => ApiGatewayResponse::error(status, error_kind(status), other.to_string()),
        }
    }
}

/// ステータスコードからエラー種別を決める
fn error_kind(status: u16) -> &'static str {
    match status {
        400 => "bad_request",
        404 => "not_found",
        409 => "conflict",
        422 => "unprocessable_entity",
        500..=599 => "internal_error",
        _ => "client_error",
    }
}

/// イベントから必須のIDを取り出す
pub fn require_id(event: &ApiGatewayEvent) -> Result<&str, AppError> {
    event.path_parameter(ID_PARAMETER).ok_or(AppError::MissingId)
}

/// イベントのボディをJSONとしてデシリアライズする
pub fn parse_body<T: for<'de> serde::Deserialize<'de>>(
    event: &ApiGatewayEvent,
) -> Result<T, AppError> {
    let body = event
        .body()
        .ok_or_else(|| AppError::InvalidBody("body is required".to_string()))?;
    serde_json::from_str(body).map_err(|e| AppError::InvalidBody(e.to_string()))
}

/// 1つのCRUD操作を担うハンドラー
#[async_trait]
pub trait App: Send + Sync {
    /// ログ用のApp名
    fn name(&self) -> &'static str;

    /// 操作対象のテーブル名
    fn table(&self) -> &str;

    /// 検証エラー時のステータスコード設定
    fn validation_status(&self) -> &ValidationStatus;

    /// 検証・リポジトリ呼び出し・レスポンス変換を実行
    async fn execute(&self, event: &ApiGatewayEvent) -> Result<ApiGatewayResponse, AppError>;

    /// イベントを処理してレスポンスを返す
    ///
    /// すべてのエラーはレスポンスに変換されるため、失敗を呼び出し元へ伝播しない。
    async fn run(&self, event: &ApiGatewayEvent) -> ApiGatewayResponse {
        let id = event.path_parameter(ID_PARAMETER).unwrap_or("-");

        match self.execute(event).await {
            Ok(response) => {
                info!(
                    app = self.name(),
                    table = self.table(),
                    id = id,
                    status = response.status_code,
                    "リクエスト処理完了"
                );
                response
            }
            Err(err) => {
                let response = err.clone().into_response(self.validation_status());
                if response.status_code >= 500 {
                    error!(
                        app = self.name(),
                        table = self.table(),
                        id = id,
                        status = response.status_code,
                        error = %err,
                        "リクエスト処理失敗"
                    );
                } else {
                    warn!(
                        app = self.name(),
                        table = self.table(),
                        id = id,
                        status = response.status_code,
                        error = %err,
                        "リクエストを拒否"
                    );
                }
                response
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ApiErrorBody;

    #[test]
    fn test_default_validation_status() {
        let status = ValidationStatus::default();
        assert_eq!(status.missing_id, 404);
        assert_eq!(status.invalid_body, 400);
    }

    #[test]
    fn test_status_code_mapping() {
        let validation = ValidationStatus::default();

        assert_eq!(AppError::MissingId.status_code(&validation), 404);
        assert_eq!(
            AppError::InvalidBody("x".to_string()).status_code(&validation),
            400
        );
        assert_eq!(
            AppError::NotFound("1".to_string()).status_code(&validation),
            404
        );
        assert_eq!(
            AppError::Store(RepositoryError::WriteError("x".to_string())).status_code(&validation),
            500
        );
        assert_eq!(
            AppError::Serialization("x".to_string()).status_code(&validation),
            500
        );
    }

    #[test]
    fn test_status_code_follows_configuration() {
        let validation = ValidationStatus {
            missing_id: 400,
            invalid_body: 422,
        };

        assert_eq!(AppError::MissingId.status_code(&validation), 400);
        assert_eq!(
            AppError::InvalidBody("x".to_string()).status_code(&validation),
            422
        );
    }

    #[test]
    fn test_store_error_response_hides_details() {
        let err = AppError::Store(RepositoryError::ReadError("secret detail".to_string()));

        let response = err.into_response(&ValidationStatus::default());
        let body: ApiErrorBody = response.parse_body().unwrap();

        assert_eq!(response.status_code, 500);
        assert_eq!(body.error, "internal_error");
        assert!(!body.message.contains("secret detail"));
    }

    #[test]
    fn test_client_error_response_body() {
        let response = AppError::MissingId.into_response(&ValidationStatus::default());
        let body: ApiErrorBody = response.parse_body().unwrap();

        assert_eq!(body.error, "not_found");
        assert_eq!(body.message, "Missing path parameter: id");
    }

    #[test]
    fn test_require_id() {
        let event = ApiGatewayEvent::new();
        assert_eq!(require_id(&event), Err(AppError::MissingId));

        let event = ApiGatewayEvent::new().with_path_parameter("id", "");
        assert_eq!(require_id(&event), Err(AppError::MissingId));

        let event = ApiGatewayEvent::new().with_path_parameter("id", "123");
        assert_eq!(require_id(&event), Ok("123"));
    }

    #[test]
    fn test_parse_body_missing() {
        let result = parse_body::<serde_json::Value>(&ApiGatewayEvent::new());
        assert_eq!(
            result,
            Err(AppError::InvalidBody("body is required".to_string()))
        );
    }

    #[test]
    fn test_parse_body_malformed() {
        let event = ApiGatewayEvent::new().with_body("{not json");
        let result = parse_body::<serde_json::Value>(&event);
        assert!(matches!(result, Err(AppError::InvalidBody(_))));
    }

    #[test]
    fn test_app_error_from_conversions() {
        let err: AppError = RepositoryError::WriteError("w".to_string()).into();
        assert_eq!(err, AppError::Store(RepositoryError::WriteError("w".to_string())));

        let err: AppError = TodoValidationError::EmptyId.into();
        assert_eq!(err, AppError::InvalidBody("id must not be empty".to_string()));
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(error_kind(400), "bad_request");
        assert_eq!(error_kind(404), "not_found");
        assert_eq!(error_kind(503), "internal_error");
        assert_eq!(error_kind(418), "client_error");
    }
}
