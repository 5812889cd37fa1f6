use thiserror::Error;

/// Failures that can abort a URL analysis before a result is produced.
///
/// Malformed model output is deliberately absent: the extractor absorbs it
/// into a fallback result instead of failing the request.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("{0}")]
    Configuration(String),
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,
    #[error("AI credits depleted. Please add credits to continue.")]
    QuotaExhausted,
    #[error("AI gateway error: {status}")]
    Upstream { status: u16 },
    #[error("failed to reach AI gateway: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid AI gateway response: {0}")]
    InvalidResponse(String),
    #[error("invalid request body: {0}")]
    InvalidRequest(String),
}

/// Coarse classification used when translating errors into client responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    RateLimited,
    QuotaExhausted,
    Configuration,
    Generic,
}

impl AnalysisError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::RateLimited => ErrorKind::RateLimited,
            Self::QuotaExhausted => ErrorKind::QuotaExhausted,
            Self::Configuration(_) => ErrorKind::Configuration,
            _ => ErrorKind::Generic,
        }
    }

    /// HTTP status the request handler responds with.
    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::RateLimited => 429,
            ErrorKind::QuotaExhausted => 402,
            ErrorKind::Configuration | ErrorKind::Generic => 500,
        }
    }

    pub fn missing_credential(var: &str) -> Self {
        Self::Configuration(format!("{var} is not configured"))
    }
}
