pub mod analysis;
pub mod error;
pub mod llm;
pub mod report;

pub use analysis::{
    default_analyzer::DefaultAnalyzer, extractor::extract_analysis, AnalysisResult,
    SafetyStatus, ScanRequest, ScanType, UrlAnalyzer,
};
pub use error::{AnalysisError, ErrorKind};
pub use llm::{CompletionClient, GatewayClient, GatewayOverrides, GatewaySettings};
