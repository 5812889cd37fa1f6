use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, Response, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use url_guard_core::{
    AnalysisError, CompletionClient, DefaultAnalyzer, GatewayClient, GatewaySettings,
};
use url_guard_web::{create_router, AppState};

struct StubClient {
    reply: fn() -> Result<String, AnalysisError>,
    calls: AtomicUsize,
}

#[async_trait]
impl CompletionClient for StubClient {
    async fn complete(&self, _system: &str, _user: &str) -> Result<String, AnalysisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.reply)()
    }
}

fn router_with(reply: fn() -> Result<String, AnalysisError>) -> (Router, Arc<StubClient>) {
    let client = Arc::new(StubClient {
        reply,
        calls: AtomicUsize::new(0),
    });
    let analyzer = DefaultAnalyzer::new(Arc::clone(&client));
    (create_router(AppState::new(Arc::new(analyzer))), client)
}

fn post_json(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/analyze-url")
        .header("origin", "http://localhost:5173")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

fn allow_origin(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get("access-control-allow-origin")
        .and_then(|v| v.to_str().ok())
}

#[tokio::test]
async fn end_to_end_malware_scan() {
    let (app, client) = router_with(|| {
        Ok("Sure! ```json\n{\"safetyScore\":85,\"status\":\"safe\",\"findings\":[],\"recommendations\":[\"Keep software updated\"]}\n```".into())
    });

    let response = app
        .oneshot(post_json(
            r#"{"url":"http://example.com","scanType":"malware"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(allow_origin(&response), Some("*"));
    assert_eq!(
        body_json(response).await,
        json!({
            "safetyScore": 85,
            "status": "safe",
            "findings": [],
            "recommendations": ["Keep software updated"]
        })
    );
    assert_eq!(client.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unparsable_reply_returns_fallback_with_success_status() {
    let (app, _) = router_with(|| Ok("The site seems fine to me.".into()));
    let response = app
        .oneshot(post_json(r#"{"url":"http://example.com"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["safetyScore"], 50);
    assert_eq!(body["status"], "warning");
    assert_eq!(body["findings"], json!(["Unable to complete full analysis"]));
}

#[tokio::test]
async fn upstream_statuses_are_mapped() {
    let cases: [(fn() -> Result<String, AnalysisError>, StatusCode); 3] = [
        (|| Err(AnalysisError::RateLimited), StatusCode::TOO_MANY_REQUESTS),
        (|| Err(AnalysisError::QuotaExhausted), StatusCode::PAYMENT_REQUIRED),
        (
            || Err(AnalysisError::Upstream { status: 500 }),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (reply, expected) in cases {
        let (app, _) = router_with(reply);
        let response = app
            .oneshot(post_json(
                r#"{"url":"http://example.com","scanType":"legal"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), expected);
        assert_eq!(allow_origin(&response), Some("*"));
        let body = body_json(response).await;
        assert!(body["error"].is_string(), "missing error field for {expected}");
    }
}

#[tokio::test]
async fn rate_limit_message_is_passed_to_client() {
    let (app, _) = router_with(|| Err(AnalysisError::RateLimited));
    let response = app
        .oneshot(post_json(r#"{"url":"http://example.com"}"#))
        .await
        .unwrap();
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Rate limit exceeded. Please try again later." })
    );
}

#[tokio::test]
async fn missing_credential_yields_500_without_network() {
    let settings = GatewaySettings {
        api_key: None,
        endpoint: "http://127.0.0.1:9".into(),
        ..GatewaySettings::default()
    };
    let client = Arc::new(GatewayClient::new(&settings).unwrap());
    let app = create_router(AppState::new(Arc::new(DefaultAnalyzer::new(client))));

    let response = app
        .oneshot(post_json(
            r#"{"url":"http://example.com","scanType":"vulnerability"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "URL_GUARD_API_KEY is not configured" })
    );
}

#[tokio::test]
async fn malformed_body_yields_json_error() {
    let (app, client) = router_with(|| Ok(String::new()));
    let response = app.oneshot(post_json("not json")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_json(response).await["error"].is_string());
    assert_eq!(client.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn preflight_is_answered_without_analysis() {
    let (app, client) = router_with(|| Ok(String::new()));
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/analyze-url")
        .header("origin", "http://localhost:5173")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type,apikey")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(allow_origin(&response), Some("*"));
    let allow_headers = response
        .headers()
        .get("access-control-allow-headers")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(allow_headers.contains("apikey"));
    assert!(allow_headers.contains("x-client-info"));
    assert!(body_bytes(response).await.is_empty());
    assert_eq!(client.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn bare_options_request_is_empty() {
    let (app, client) = router_with(|| Ok(String::new()));
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/analyze-url")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_bytes(response).await.is_empty());
    assert_eq!(client.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn health_reports_ok() {
    let (app, _) = router_with(|| Ok(String::new()));
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "status": "ok" }));
}
