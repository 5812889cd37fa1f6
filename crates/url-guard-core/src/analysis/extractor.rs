use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use super::AnalysisResult;

// Greedy: spans from the first `{` to the last `}` in the text.
static JSON_OBJECT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\{.*\}").expect("embedded JSON pattern is valid")
});

/// Locate the embedded JSON object in free-form model output.
pub fn find_json_object(text: &str) -> Option<&str> {
    JSON_OBJECT.find(text).map(|m| m.as_str())
}

/// Turn raw completion text into an [`AnalysisResult`].
///
/// Never fails: missing or malformed JSON yields one of the fixed fallback
/// results. Trailing prose containing `}` defeats the greedy match and also
/// lands on the fallback.
pub fn extract_analysis(content: &str) -> AnalysisResult {
    let Some(candidate) = find_json_object(content) else {
        warn!("no JSON object found in completion; using fallback result");
        return AnalysisResult::fallback_unmatched();
    };
    match serde_json::from_str::<AnalysisResult>(candidate) {
        Ok(result) => result,
        Err(err) => {
            warn!(error = %err, "failed to parse completion JSON; using fallback result");
            AnalysisResult::fallback_unparsable()
        }
    }
}
