use std::sync::Arc;

use async_trait::async_trait;
use insta::assert_json_snapshot;
use url_guard_core::{
    AnalysisError, AnalysisResult, CompletionClient, DefaultAnalyzer, ScanRequest, ScanType,
    UrlAnalyzer,
};

struct CannedClient(&'static str);

#[async_trait]
impl CompletionClient for CannedClient {
    async fn complete(&self, _system: &str, _user: &str) -> Result<String, AnalysisError> {
        Ok(self.0.to_string())
    }
}

async fn analyze_with(reply: &'static str, scan_type: ScanType) -> AnalysisResult {
    let analyzer = DefaultAnalyzer::new(Arc::new(CannedClient(reply)));
    analyzer
        .analyze(&ScanRequest::new("http://example.com", scan_type))
        .await
        .unwrap_or_else(|err| panic!("analysis failed: {err}"))
}

#[tokio::test(flavor = "current_thread")]
async fn fenced_reply_snapshot() {
    let result = analyze_with(
        "Sure! ```json\n{\"safetyScore\":85,\"status\":\"safe\",\"findings\":[],\"recommendations\":[\"Keep software updated\"]}\n```",
        ScanType::Malware,
    )
    .await;
    assert_json_snapshot!("fenced_reply", result);
}

#[tokio::test(flavor = "current_thread")]
async fn prose_reply_snapshot() {
    let result = analyze_with(
        "I'm unable to browse the web, but the domain looks fine.",
        ScanType::Vulnerability,
    )
    .await;
    assert_json_snapshot!("prose_reply", result);
}

#[tokio::test(flavor = "current_thread")]
async fn broken_json_reply_snapshot() {
    let result = analyze_with("{\"safetyScore\": 85, \"status\": }", ScanType::Legal).await;
    assert_json_snapshot!("broken_json_reply", result);
}
