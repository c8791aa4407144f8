// API Gatewayプロキシ統合のイベントとレスポンス
//
// Appが参照するのはpathParametersとbodyのみ。
// それ以外のフィールドはデシリアライズ時に無視する。

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// レスポンスのContent-Type
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// API Gatewayからの受信イベント
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGatewayEvent {
    /// パスパラメータ（ルートにパラメータがない場合はnull）
    #[serde(default)]
    pub path_parameters: Option<HashMap<String, String>>,
    /// リクエストボディ
    #[serde(default)]
    pub body: Option<String>,
}

impl ApiGatewayEvent {
    pub fn new() -> Self {
        Self::default()
    }

    /// パスパラメータを追加したイベントを返す
    pub fn with_path_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_parameters
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// ボディを設定したイベントを返す
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// パスパラメータを取得
    ///
    /// 値が空文字列・空白のみの場合は存在しないものとして扱う。
    pub fn path_parameter(&self, name: &str) -> Option<&str> {
        self.path_parameters
            .as_ref()
            .and_then(|params| params.get(name))
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }

    /// 空でないボディを取得
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref().filter(|body| !body.trim().is_empty())
    }
}

/// エラーレスポンスのボディ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// エラー種別（例: "bad_request", "not_found", "internal_error"）
    pub error: String,
    /// 詳細なエラーメッセージ
    pub message: String,
}

/// API Gatewayへ返すレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGatewayResponse {
    /// HTTPステータスコード
    pub status_code: u16,
    /// レスポンスヘッダー
    pub headers: HashMap<String, String>,
    /// シリアライズ済みボディ（空の場合あり）
    pub body: String,
}

impl ApiGatewayResponse {
    /// 値をJSONボディとして持つレスポンスを作成
    pub fn json<T: Serialize>(status_code: u16, value: &T) -> Result<Self, serde_json::Error> {
        let body = serde_json::to_string(value)?;
        Ok(Self::with_body(status_code, body))
    }

    /// ボディなしのレスポンスを作成
    pub fn empty(status_code: u16) -> Self {
        Self::with_body(status_code, String::new())
    }

    /// `{"error": ..., "message": ...}` 形式のエラーレスポンスを作成
    pub fn error(status_code: u16, error: impl Into<String>, message: impl Into<String>) -> Self {
        let body = ApiErrorBody {
            error: error.into(),
            message: message.into(),
        };
        // ApiErrorBodyは文字列フィールドのみのため失敗しない
        let body = serde_json::to_string(&body).unwrap_or_default();
        Self::with_body(status_code, body)
    }

    fn with_body(status_code: u16, body: String) -> Self {
        Self {
            status_code,
            headers: default_headers(),
            body,
        }
    }

    /// ボディをJSONとしてデシリアライズ
    pub fn parse_body<T: for<'de> Deserialize<'de>>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// 全レスポンス共通のヘッダー
fn default_headers() -> HashMap<String, String> {
    HashMap::from([
        ("Content-Type".to_string(), CONTENT_TYPE_JSON.to_string()),
        ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_without_path_parameters() {
        let event: ApiGatewayEvent = serde_json::from_value(json!({
            "resource": "/todos/{id}",
            "httpMethod": "GET"
        }))
        .unwrap();

        assert!(event.path_parameters.is_none());
        assert!(event.path_parameter("id").is_none());
        assert!(event.body().is_none());
    }

    #[test]
    fn test_event_with_null_path_parameters() {
        let event: ApiGatewayEvent =
            serde_json::from_value(json!({"pathParameters": null, "body": null})).unwrap();

        assert!(event.path_parameter("id").is_none());
    }

    #[test]
    fn test_event_path_parameter_lookup() {
        let event: ApiGatewayEvent = serde_json::from_value(json!({
            "pathParameters": {"id": "123"},
            "body": "{\"title\":\"x\"}"
        }))
        .unwrap();

        assert_eq!(event.path_parameter("id"), Some("123"));
        assert_eq!(event.path_parameter("other"), None);
        assert_eq!(event.body(), Some("{\"title\":\"x\"}"));
    }

    #[test]
    fn test_empty_path_parameter_is_absent() {
        let event = ApiGatewayEvent::new().with_path_parameter("id", "");
        assert!(event.path_parameter("id").is_none());
    }

    #[test]
    fn test_blank_path_parameter_is_absent() {
        let event = ApiGatewayEvent::new().with_path_parameter("id", "   ");
        assert!(event.path_parameter("id").is_none());
    }

    #[test]
    fn test_blank_body_is_absent() {
        let event = ApiGatewayEvent::new().with_body("  ");
        assert!(event.body().is_none());
    }

    #[test]
    fn test_json_response() {
        let response = ApiGatewayResponse::json(200, &json!({"id": "1"})).unwrap();

        assert_eq!(response.status_code, 200);
        assert_eq!(response.body, r#"{"id":"1"}"#);
        assert_eq!(
            response.headers.get("Content-Type").map(String::as_str),
            Some(CONTENT_TYPE_JSON)
        );
        assert_eq!(
            response.headers.get("Access-Control-Allow-Origin").map(String::as_str),
            Some("*")
        );
    }

    #[test]
    fn test_empty_response() {
        let response = ApiGatewayResponse::empty(204);

        assert_eq!(response.status_code, 204);
        assert!(response.body.is_empty());
    }

    #[test]
    fn test_error_response_body() {
        let response = ApiGatewayResponse::error(404, "not_found", "todo 1 not found");

        let body: ApiErrorBody = response.parse_body().unwrap();
        assert_eq!(response.status_code, 404);
        assert_eq!(body.error, "not_found");
        assert_eq!(body.message, "todo 1 not found");
    }

    #[test]
    fn test_response_serializes_status_code_field() {
        let value = serde_json::to_value(ApiGatewayResponse::empty(204)).unwrap();

        assert_eq!(value["statusCode"], 204);
        assert_eq!(value["body"], "");
    }
}
