//! Output formatting for analysis results.
//!
//! Supports two output formats:
//! - Text: one `subject,object:description` line per contradiction, nothing
//!   when there are none
//! - JSON: structured output for programmatic consumption

use serde::{Deserialize, Serialize};

use crate::analyze::Analysis;
use crate::artifact::ArtifactSet;
use crate::types::{AnalysisResult, Contradiction};

/// Pass/fail signal derived from a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Success,
    Failure,
}

impl Signal {
    pub fn passed(&self) -> bool {
        *self == Signal::Success
    }
}

/// Render `result` as report text plus its signal.
///
/// The text has no trailing newline; `Empty` renders as `""`.
pub fn render(result: &AnalysisResult) -> (String, Signal) {
    match result {
        AnalysisResult::Empty => (String::new(), Signal::Success),
        AnalysisResult::NonEmpty(cs) => {
            let lines: Vec<String> = cs.iter().map(Contradiction::to_string).collect();
            (lines.join("\n"), Signal::Failure)
        }
    }
}

/// Write the text report to stdout.
pub fn write_text(result: &AnalysisResult) -> Signal {
    let (text, signal) = render(result);
    if !text.is_empty() {
        println!("{}", text);
    }
    signal
}

// =============================================================================
// JSON Format
// =============================================================================

/// JSON report structure.
#[derive(Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub files: Vec<String>,
    pub passed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub contradictions: Vec<JsonContradiction>,
    pub discarded_count: usize,
}

/// JSON contradiction structure.
#[derive(Serialize, Deserialize)]
pub struct JsonContradiction {
    pub subject: String,
    pub object: String,
    pub description: String,
    pub synthetic: bool,
}

impl JsonReport {
    pub fn new(artifacts: &ArtifactSet, analysis: &Analysis) -> Self {
        let (_, signal) = render(&analysis.result);
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            files: artifacts.identifiers().map(str::to_string).collect(),
            passed: signal.passed(),
            summary: analysis.summary.clone(),
            contradictions: analysis
                .result
                .contradictions()
                .iter()
                .map(contradiction_to_json)
                .collect(),
            discarded_count: analysis.discarded,
        }
    }
}

fn contradiction_to_json(c: &Contradiction) -> JsonContradiction {
    JsonContradiction {
        subject: c.subject.clone(),
        object: c.object.clone(),
        description: c.description.clone(),
        synthetic: c.is_synthetic(),
    }
}

/// Write the JSON report to stdout.
pub fn write_json(artifacts: &ArtifactSet, analysis: &Analysis) -> anyhow::Result<Signal> {
    let report = JsonReport::new(artifacts, analysis);
    let json = serde_json::to_string_pretty(&report)?;
    println!("{}", json);
    Ok(if report.passed {
        Signal::Success
    } else {
        Signal::Failure
    })
}
