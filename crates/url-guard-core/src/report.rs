use std::fmt::Write;

use crate::analysis::{AnalysisResult, ScanType};

/// Format styles supported by the report renderer.
#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Qualitative band derived from the safety score for display purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Good,
    Moderate,
    Poor,
}

impl ScoreBand {
    pub fn from_score(score: i64) -> Self {
        if score >= 70 {
            Self::Good
        } else if score >= 40 {
            Self::Moderate
        } else {
            Self::Poor
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Moderate => "moderate",
            Self::Poor => "poor",
        }
    }
}

/// Produce a report string for an analysis result in the desired format.
pub fn render_report(
    url: &str,
    scan_type: ScanType,
    result: &AnalysisResult,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Human => render_human(url, scan_type, result),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
    }
}

fn render_human(url: &str, scan_type: ScanType, result: &AnalysisResult) -> anyhow::Result<String> {
    let mut out = String::new();
    writeln!(out, "{} :: {}", scan_type.title(), url)?;
    writeln!(
        out,
        "Safety Score: {}/100 ({})",
        result.safety_score,
        ScoreBand::from_score(result.safety_score).label()
    )?;
    writeln!(out, "Status: {}", result.status)?;

    write_list(&mut out, "Findings", &result.findings)?;
    write_list(&mut out, "Recommendations", &result.recommendations)?;
    Ok(out)
}

fn write_list(out: &mut String, heading: &str, items: &[String]) -> std::fmt::Result {
    writeln!(out)?;
    writeln!(out, "{heading}:")?;
    if items.is_empty() {
        writeln!(out, "  None")?;
    }
    for item in items {
        writeln!(out, "  - {}", single_line(item))?;
    }
    Ok(())
}

fn single_line(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            '\n' | '\r' => ' ',
            _ => c,
        })
        .collect()
}
