//! Response parsing.
//!
//! Backend output is untrusted free-form text. Two independent strategies
//! recover contradictions from it:
//!
//! - JSON: a `{summary, errors: [{file1, file2, description}]}` object,
//!   either in the first fenced code block or as the whole trimmed text
//! - Lines: any line containing `subject,object:` for an ordered pair of
//!   known identifiers
//!
//! `parse` composes them: JSON first when the backend asked for JSON, then
//! lines. When neither recovers anything but the text still talks about
//! contradictions, one synthetic contradiction is produced so the finding is
//! not silently dropped.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::artifact::ArtifactSet;
use crate::types::Contradiction;

/// Description used when contradictions are mentioned but cannot be parsed.
pub const UNPARSEABLE_DESCRIPTION: &str =
    "contradictions were reported, but the details could not be parsed";

/// First fenced code block, optionally tagged `json`.
static FENCED_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```(?:json)?\s*(.*?)```").expect("valid regex"));

/// Words that indicate the response is describing a contradiction.
static CUE_WORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)contradict|mismatch|inconsisten|discrepan|矛盾|不一致").expect("valid regex")
});

/// Phrases that mention a cue word only to deny it. A denial covers a list
/// of cue nouns joined by `or`, `and`, `nor` or commas.
static NEGATED_CUES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:no|zero|without|not\s+any|did\s+not\s+find\s+any|found\s+no)\s+(?:\w+\s+)?(?:contradictions?|mismatch(?:es)?|inconsistenc(?:y|ies)|discrepanc(?:y|ies))(?:\s*(?:,|\bor\b|\band\b|\bnor\b)\s*(?:\w+\s+)?(?:contradictions?|mismatch(?:es)?|inconsistenc(?:y|ies)|discrepanc(?:y|ies)))*\b|矛盾(?:点)?(?:は|が)?(?:ありません|見つかりませんでした|なし)|不一致(?:は|が)?(?:ありません|見つかりませんでした|なし)",
    )
    .expect("valid regex")
});

/// The output contract a backend asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `subject,object:description` per line
    Lines,
    /// `{summary, errors: [...]}` JSON object
    Json,
}

/// Errors from the JSON strategy.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("no JSON object found in response")]
    NoJson,
    #[error("invalid JSON response: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// The structured response schema.
#[derive(Debug, Clone, Deserialize)]
pub struct StructuredResponse {
    #[serde(default)]
    pub summary: String,
    pub errors: Vec<StructuredError>,
}

/// One entry of `errors`.
#[derive(Debug, Clone, Deserialize)]
pub struct StructuredError {
    pub file1: String,
    pub file2: String,
    pub description: String,
}

impl From<StructuredError> for Contradiction {
    /// Multi-line descriptions are folded onto one line so each entry stays
    /// one report line.
    fn from(e: StructuredError) -> Self {
        let description = e
            .description
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        Contradiction::new(e.file1, e.file2, description)
    }
}

/// Candidates recovered from one raw response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedResponse {
    /// The model's overall assessment, when it gave one
    pub summary: Option<String>,
    pub contradictions: Vec<Contradiction>,
}

/// Locate the JSON object in `raw`.
pub fn extract_json(raw: &str) -> Option<&str> {
    if let Some(caps) = FENCED_BLOCK.captures(raw) {
        return caps.get(1).map(|m| m.as_str().trim());
    }

    let trimmed = raw.trim();
    if trimmed.starts_with('{') && trimmed.ends_with('}') {
        return Some(trimmed);
    }

    None
}

/// JSON strategy: decode the structured response.
pub fn parse_json(raw: &str) -> Result<StructuredResponse, ParseError> {
    let json = extract_json(raw).ok_or(ParseError::NoJson)?;
    Ok(serde_json::from_str(json)?)
}

/// Line strategy: one contradiction per line that contains `a,b:` for some
/// ordered pair of distinct identifiers.
///
/// When several pairs match a line the earliest occurrence wins, then the
/// longest token.
pub fn parse_lines(raw: &str, artifacts: &ArtifactSet) -> Vec<Contradiction> {
    let ids: Vec<&str> = artifacts.identifiers().collect();
    let tokens: Vec<(&str, &str, String)> = ids
        .iter()
        .flat_map(|subject| {
            ids.iter()
                .filter(move |object| *object != subject)
                .map(move |object| (*subject, *object, format!("{},{}:", subject, object)))
        })
        .collect();

    raw.lines()
        .filter_map(|line| {
            tokens
                .iter()
                .filter_map(|(subject, object, token)| {
                    line.find(token.as_str())
                        .map(|pos| (pos, token.len(), *subject, *object))
                })
                .min_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)))
                .map(|(pos, len, subject, object)| {
                    Contradiction::new(subject, object, line[pos + len..].trim())
                })
        })
        .collect()
}

/// True if `raw` starts a JSON object or a code fence that `extract_json`
/// could not locate, as happens when a reply is cut off mid-object.
fn looks_like_json(raw: &str) -> bool {
    raw.trim_start().starts_with('{') || raw.matches("```").count() % 2 == 1
}

/// True if `raw` mentions a contradiction other than to deny one.
pub fn has_contradiction_cue(raw: &str) -> bool {
    let stripped = NEGATED_CUES.replace_all(raw, "");
    CUE_WORDS.is_match(&stripped)
}

/// Recover candidate contradictions from a backend's raw response.
pub fn parse(raw: &str, format: OutputFormat, artifacts: &ArtifactSet) -> ParsedResponse {
    if raw.trim().is_empty() {
        return ParsedResponse::default();
    }

    let mut malformed = false;
    if format == OutputFormat::Json {
        match parse_json(raw) {
            Ok(response) => {
                let summary = Some(response.summary).filter(|s| !s.trim().is_empty());
                return ParsedResponse {
                    summary,
                    contradictions: response.errors.into_iter().map(Into::into).collect(),
                };
            }
            Err(ParseError::NoJson) if !looks_like_json(raw) => {
                debug!("no JSON in response, falling back to lines")
            }
            Err(e) => {
                warn!(error = %e, "malformed JSON response, falling back to lines");
                malformed = true;
            }
        }
    }

    let contradictions = parse_lines(raw, artifacts);
    if !contradictions.is_empty() {
        return ParsedResponse {
            summary: None,
            contradictions,
        };
    }

    if malformed || has_contradiction_cue(raw) {
        debug!("response mentions contradictions but none could be parsed");
        return ParsedResponse {
            summary: None,
            contradictions: vec![Contradiction::synthetic(artifacts, UNPARSEABLE_DESCRIPTION)],
        };
    }

    ParsedResponse::default()
}
