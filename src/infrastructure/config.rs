/// DynamoDB接続設定
use aws_sdk_dynamodb::Client as DynamoDbClient;
use thiserror::Error;

/// テーブル名を指定する環境変数
pub const TABLE_NAME_VAR: &str = "TABLE_NAME";

/// DynamoDBエンドポイントを上書きする環境変数（DynamoDB Local等）
pub const DYNAMODB_ENDPOINT_VAR: &str = "DYNAMODB_ENDPOINT";

/// DynamoDB設定のエラー型
#[derive(Debug, Error)]
pub enum DynamoDbConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
}

/// テーブル名とクライアントを持つDynamoDB設定
///
/// 環境変数:
/// - TABLE_NAME: Todoアイテム保存用テーブル（必須）
/// - DYNAMODB_ENDPOINT: エンドポイントURLの上書き（任意）
#[derive(Debug, Clone)]
pub struct DynamoDbConfig {
    /// DynamoDBクライアントインスタンス
    client: DynamoDbClient,
    /// Todoテーブル名
    table_name: String,
}

impl DynamoDbConfig {
    /// 環境からAWS設定を読み込み、環境変数からテーブル名を読み取って新しいDynamoDbConfigを作成
    pub async fn from_env() -> Result<Self, DynamoDbConfigError> {
        // AWS SDKの初期化より先に必須設定を検証する
        let table_name = read_table_name()?;
        let endpoint = read_endpoint();

        // 環境からAWS設定を読み込み（認証情報、リージョンなど）
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(endpoint) = endpoint {
            loader = loader.endpoint_url(endpoint);
        }
        let aws_config = loader.load().await;

        let client = DynamoDbClient::new(&aws_config);

        Ok(Self { client, table_name })
    }

    /// 明示的な値で新しいDynamoDbConfigを作成（テスト用）
    pub fn new(client: DynamoDbClient, table_name: String) -> Self {
        Self { client, table_name }
    }

    /// DynamoDBクライアントへの参照を取得
    pub fn client(&self) -> &DynamoDbClient {
        &self.client
    }

    /// Todoテーブル名を取得
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

/// TABLE_NAMEを読み込む（空文字列は未設定扱い）
fn read_table_name() -> Result<String, DynamoDbConfigError> {
    std::env::var(TABLE_NAME_VAR)
        .ok()
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| DynamoDbConfigError::MissingEnvVar(TABLE_NAME_VAR.to_string()))
}

fn read_endpoint() -> Option<String> {
    std::env::var(DYNAMODB_ENDPOINT_VAR)
        .ok()
        .filter(|url| !url.trim().is_empty())
}
