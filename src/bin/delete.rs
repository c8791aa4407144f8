/// DELETE /todos/{id} Lambdaエントリポイント
///
/// API Gateway経由のHTTPリクエストをDeleteAppで処理する。
use std::sync::Arc;

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use todo_api::application::{App, DeleteApp};
use todo_api::domain::ApiGatewayResponse;
use todo_api::infrastructure::{
    init_logging, into_api_gateway_event, into_http_response, DynamoDbConfig,
    DynamoDbConfigError, DynamoTodoRepository,
};
use tokio::sync::OnceCell;
use tracing::{error, info};

/// warm start時に再利用するAppインスタンス
static APP: OnceCell<DeleteApp<DynamoTodoRepository>> = OnceCell::const_new();

/// Appを取得（初期化されていなければ環境変数から構築）
async fn get_app() -> Result<&'static DeleteApp<DynamoTodoRepository>, DynamoDbConfigError> {
    APP.get_or_try_init(|| async {
        let config = DynamoDbConfig::from_env().await?;
        let repository = Arc::new(DynamoTodoRepository::new(config.client().clone()));
        info!(table = config.table_name(), "DeleteAppを初期化");
        Ok(DeleteApp::new(config.table_name(), repository))
    })
    .await
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    run(service_fn(handler)).await
}

/// HTTPリクエストハンドラー
///
/// 設定エラー時はリクエストを処理せず500を返す。
async fn handler(request: Request) -> Result<Response<Body>, Error> {
    let app = match get_app().await {
        Ok(app) => app,
        Err(err) => {
            error!(error = %err, "DynamoDB設定読み込み失敗");
            let response =
                ApiGatewayResponse::error(500, "internal_error", "Internal server error");
            return Ok(into_http_response(response)?);
        }
    };

    let event = into_api_gateway_event(&request);
    let response = app.run(&event).await;

    Ok(into_http_response(response)?)
}
