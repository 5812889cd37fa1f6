use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument};

use super::{extractor::extract_analysis, prompts, AnalysisResult, ScanRequest, UrlAnalyzer};
use crate::error::AnalysisError;
use crate::llm::CompletionClient;

/// Analyzer that builds the category prompt, asks the completion client and
/// extracts the structured result from its reply.
pub struct DefaultAnalyzer<C: CompletionClient + ?Sized> {
    client: Arc<C>,
}

impl<C: CompletionClient + ?Sized> DefaultAnalyzer<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }
}

impl<C: CompletionClient + ?Sized> Clone for DefaultAnalyzer<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
        }
    }
}

#[async_trait]
impl<C: CompletionClient + ?Sized> UrlAnalyzer for DefaultAnalyzer<C> {
    #[instrument(skip_all, fields(url = %request.url))]
    async fn analyze(&self, request: &ScanRequest) -> Result<AnalysisResult, AnalysisError> {
        let scan_type = request.scan_type();
        info!(scan_type = %scan_type, "analyzing URL");

        let system = prompts::system_prompt(scan_type);
        let user = prompts::user_prompt(&request.url);
        let content = self.client.complete(system, &user).await?;
        Ok(extract_analysis(&content))
    }
}
