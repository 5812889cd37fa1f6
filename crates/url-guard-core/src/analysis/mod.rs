use async_trait::async_trait;
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::error::AnalysisError;

pub mod default_analyzer;
pub mod extractor;
pub mod prompts;

/// One of the fixed analysis categories that selects the instruction template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanType {
    Malware,
    Vulnerability,
    Legal,
}

impl ScanType {
    pub const ALL: [ScanType; 3] = [Self::Malware, Self::Vulnerability, Self::Legal];

    /// Resolve a client-supplied scan type, defaulting to `Vulnerability` when
    /// the value is absent or unrecognized.
    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            Some("malware") => Self::Malware,
            Some("legal") => Self::Legal,
            _ => Self::Vulnerability,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Malware => "malware",
            Self::Vulnerability => "vulnerability",
            Self::Legal => "legal",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Malware => "Malware Scanning",
            Self::Vulnerability => "Vulnerability Scanning",
            Self::Legal => "Legal Security",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Malware => "Detect malicious software and harmful code in websites",
            Self::Vulnerability => "Identify security weaknesses and potential threats",
            Self::Legal => "Check compliance with security standards and regulations",
        }
    }
}

impl std::fmt::Display for ScanType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inbound request body. `scanType` is kept as raw text so unknown values
/// fall back to the default category instead of rejecting the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanRequest {
    pub url: String,
    #[serde(rename = "scanType", default)]
    pub scan_type: Option<String>,
}

impl ScanRequest {
    pub fn new(url: impl Into<String>, scan_type: ScanType) -> Self {
        Self {
            url: url.into(),
            scan_type: Some(scan_type.as_str().to_string()),
        }
    }

    pub fn scan_type(&self) -> ScanType {
        ScanType::from_name(self.scan_type.as_deref())
    }
}

/// Qualitative verdict reported by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SafetyStatus {
    Safe,
    Warning,
    Danger,
}

impl std::fmt::Display for SafetyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Safe => "safe",
            Self::Warning => "warning",
            Self::Danger => "danger",
        })
    }
}

/// Structured analysis returned to the caller.
///
/// `safety_score` is expected within 0–100 but is passed through unclamped;
/// the model is free to violate the range. Whole-number floats such as `85.0`
/// are accepted; fractional scores are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(deserialize_with = "deserialize_score")]
    pub safety_score: i64,
    pub status: SafetyStatus,
    #[serde(default)]
    pub findings: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl AnalysisResult {
    /// Returned when the completion contains no `{...}` substring at all.
    pub fn fallback_unmatched() -> Self {
        Self {
            safety_score: 50,
            status: SafetyStatus::Warning,
            findings: vec!["Unable to complete full analysis".into()],
            recommendations: vec!["Try scanning again or contact support".into()],
        }
    }

    /// Returned when a `{...}` substring exists but does not parse.
    pub fn fallback_unparsable() -> Self {
        Self {
            safety_score: 50,
            status: SafetyStatus::Warning,
            findings: vec!["Analysis completed with limited results".into()],
            recommendations: vec!["Consider manual review of this URL".into()],
        }
    }
}

fn deserialize_score<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(score) = number.as_i64() {
        return Ok(score);
    }
    match number.as_f64() {
        Some(score) if score.is_finite() && score.fract() == 0.0 => Ok(score as i64),
        _ => Err(de::Error::custom(format!(
            "safetyScore must be a whole number (got {number})"
        ))),
    }
}

/// Entry point used by the request handler and the CLI.
#[async_trait]
pub trait UrlAnalyzer: Send + Sync {
    /// Run a single analysis; either a full result or an error, never partial.
    async fn analyze(&self, request: &ScanRequest) -> Result<AnalysisResult, AnalysisError>;
}
