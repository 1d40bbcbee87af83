//! Deterministic rule-based backend.
//!
//! Does no analysis at all: any artifact whose identifier contains
//! `incorrect` makes it emit a fixed list of canned contradictions, in the
//! same line format a real backend is asked for. This gives the parse,
//! validate and report stages a free, repeatable input.

use super::{Backend, BackendError};
use crate::artifact::ArtifactSet;
use crate::parse::OutputFormat;

/// Identifier substring that triggers the canned contradictions.
pub const MARKER: &str = "incorrect";

/// Canned descriptions reported between the first two artifacts.
const PAIR_DESCRIPTIONS: &[&str] = &[
    "the add function does not convert its arguments to numbers",
    "the multiply function is not described in the documentation",
    "the optional third argument (operation type) is not described in the documentation",
];

/// Canned description reported between the first and third artifacts.
const THIRD_FILE_DESCRIPTION: &str = "the files do not agree on what the module does";

pub struct MockBackend;

impl MockBackend {
    /// Canned contradiction lines for `artifacts`, empty when no identifier
    /// carries the marker.
    pub fn lines(artifacts: &ArtifactSet) -> Vec<String> {
        if !artifacts.identifiers().any(|id| id.contains(MARKER)) {
            return Vec::new();
        }

        let (Some(first), Some(second)) = (artifacts.get(0), artifacts.get(1)) else {
            return Vec::new();
        };

        let mut lines: Vec<String> = PAIR_DESCRIPTIONS
            .iter()
            .map(|desc| format!("{},{}:{}", first.identifier(), second.identifier(), desc))
            .collect();

        if let Some(third) = artifacts.get(2) {
            lines.push(format!(
                "{},{}:{}",
                first.identifier(),
                third.identifier(),
                THIRD_FILE_DESCRIPTION
            ));
        }

        lines
    }
}

impl Backend for MockBackend {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn output_format(&self) -> OutputFormat {
        OutputFormat::Lines
    }

    fn invoke(&self, artifacts: &ArtifactSet) -> Result<String, BackendError> {
        Ok(Self::lines(artifacts).join("\n"))
    }
}
