mod gateway;
mod settings;

use async_trait::async_trait;

use crate::error::AnalysisError;

pub use gateway::GatewayClient;
pub use settings::{
    GatewayOverrides, GatewaySettings, DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
    DEFAULT_TIMEOUT_SECS,
};

/// Client abstraction over a chat-completion service.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send a system instruction plus user message and return the text of the first choice.
    async fn complete(&self, system: &str, user: &str) -> Result<String, AnalysisError>;
}
