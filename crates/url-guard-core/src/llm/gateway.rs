use super::{CompletionClient, GatewaySettings};
use crate::error::AnalysisError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};

/// Chat-completion client for an OpenAI-compatible AI gateway.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    http: Client,
    url: String,
    api_key: Option<String>,
    model: String,
    temperature: f32,
}

impl GatewayClient {
    pub fn new(settings: &GatewaySettings) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("url-guard/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("failed to build AI gateway HTTP client")?;
        Ok(Self {
            http,
            url: settings.completions_url(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            temperature: settings.temperature,
        })
    }

    fn build_request<'a>(&'a self, system: &'a str, user: &'a str) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: self.temperature,
        }
    }
}

#[async_trait]
impl CompletionClient for GatewayClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String, AnalysisError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AnalysisError::missing_credential(GatewaySettings::API_KEY_ENV))?;

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(api_key)
            .json(&self.build_request(system, user))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), body = %body, "AI gateway error");
            return Err(classify_status(status.as_u16()));
        }

        let chat: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|err| AnalysisError::InvalidResponse(err.to_string()))?;
        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AnalysisError::InvalidResponse("missing message content".into()))?;
        debug!(content = %content, "AI response");
        Ok(content)
    }
}

/// Map a non-success gateway status onto the error taxonomy.
fn classify_status(status: u16) -> AnalysisError {
    match status {
        429 => AnalysisError::RateLimited,
        402 => AnalysisError::QuotaExhausted,
        other => AnalysisError::Upstream { status: other },
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}
