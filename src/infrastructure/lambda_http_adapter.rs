// lambda_httpのリクエスト/レスポンスとAppのイベント/レスポンスの相互変換
//
// API Gatewayのプロキシイベントはlambda_httpがhttp::Requestへ変換するため、
// パスパラメータとボディだけを取り出してApiGatewayEventに詰め直す。

use std::collections::HashMap;

use lambda_http::http::Error as HttpError;
use lambda_http::{Body, Request, RequestExt, Response};

use crate::domain::{ApiGatewayEvent, ApiGatewayResponse};

/// lambda_httpのRequestをApiGatewayEventに変換
pub fn into_api_gateway_event(request: &Request) -> ApiGatewayEvent {
    let params = request.path_parameters();
    let path_parameters = if params.is_empty() {
        None
    } else {
        Some(
            params
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect::<HashMap<String, String>>(),
        )
    };

    let body = match request.body() {
        Body::Text(text) => Some(text.clone()),
        Body::Binary(bytes) => String::from_utf8(bytes.clone()).ok(),
        _ => None,
    };

    ApiGatewayEvent {
        path_parameters,
        body,
    }
}

/// ApiGatewayResponseをlambda_httpのResponseに変換
pub fn into_http_response(response: ApiGatewayResponse) -> Result<Response<Body>, HttpError> {
    let mut builder = Response::builder().status(response.status_code);
    for (name, value) in &response.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }

    let body = if response.body.is_empty() {
        Body::Empty
    } else {
        Body::Text(response.body)
    };

    builder.body(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_http::http::Request as HttpRequest;

    fn request_with(body: Body) -> Request {
        HttpRequest::builder()
            .method("POST")
            .uri("/todos")
            .body(body)
            .unwrap()
    }

    #[test]
    fn test_request_without_path_parameters() {
        let event = into_api_gateway_event(&request_with(Body::Empty));

        assert!(event.path_parameters.is_none());
        assert!(event.body.is_none());
    }

    #[test]
    fn test_request_with_path_parameters() {
        let request = request_with(Body::Empty).with_path_parameters(HashMap::from([(
            "id".to_string(),
            "123".to_string(),
        )]));

        let event = into_api_gateway_event(&request);
        assert_eq!(event.path_parameter("id"), Some("123"));
    }

    #[test]
    fn test_request_text_body() {
        let request = request_with(Body::Text(r#"{"title":"x"}"#.to_string()));

        let event = into_api_gateway_event(&request);
        assert_eq!(event.body(), Some(r#"{"title":"x"}"#));
    }

    #[test]
    fn test_request_binary_body() {
        let request = request_with(Body::Binary(br#"{"title":"x"}"#.to_vec()));

        let event = into_api_gateway_event(&request);
        assert_eq!(event.body(), Some(r#"{"title":"x"}"#));
    }

    #[test]
    fn test_request_invalid_utf8_body_is_dropped() {
        let request = request_with(Body::Binary(vec![0xff, 0xfe]));

        let event = into_api_gateway_event(&request);
        assert!(event.body.is_none());
    }

    #[test]
    fn test_into_http_response_with_body() {
        let response = ApiGatewayResponse::error(404, "not_found", "missing");

        let http = into_http_response(response).unwrap();

        assert_eq!(http.status(), 404);
        assert_eq!(
            http.headers().get("content-type").unwrap(),
            "application/json"
        );
        assert_eq!(
            http.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
        match http.body() {
            Body::Text(text) => assert!(text.contains("not_found")),
            _ => panic!("予期しないBody型"),
        }
    }

    #[test]
    fn test_into_http_response_empty_body() {
        let http = into_http_response(ApiGatewayResponse::empty(204)).unwrap();

        assert_eq!(http.status(), 204);
        assert!(matches!(http.body(), Body::Empty));
    }
}
