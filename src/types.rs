//! Core types threaded through the analysis pipeline.

use crate::artifact::ArtifactSet;

/// Where a contradiction came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Origin {
    /// Parsed out of a backend response
    #[default]
    Backend,
    /// Produced by the pipeline itself to signal a failure or an
    /// unattributable finding
    Synthetic,
}

/// A detected inconsistency between two artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contradiction {
    pub subject: String,
    pub object: String,
    pub description: String,
    pub origin: Origin,
}

impl Contradiction {
    pub fn new(
        subject: impl Into<String>,
        object: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            object: object.into(),
            description: description.into(),
            origin: Origin::Backend,
        }
    }

    /// A pipeline-generated contradiction whose subject and object are both
    /// the joined identifiers of the whole set.
    pub fn synthetic(artifacts: &ArtifactSet, description: impl Into<String>) -> Self {
        let sentinel = artifacts.joined_identifiers();
        Self {
            subject: sentinel.clone(),
            object: sentinel,
            description: description.into(),
            origin: Origin::Synthetic,
        }
    }

    pub fn is_synthetic(&self) -> bool {
        self.origin == Origin::Synthetic
    }
}

impl std::fmt::Display for Contradiction {
    /// `subject,object:description`, or `subject:description` for synthetic
    /// entries whose sentinel already lists every file.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.origin {
            Origin::Backend => write!(f, "{},{}:{}", self.subject, self.object, self.description),
            Origin::Synthetic => write!(f, "{}:{}", self.subject, self.description),
        }
    }
}

/// Outcome of one analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AnalysisResult {
    /// No contradictions.
    #[default]
    Empty,
    /// At least one contradiction, in report order.
    NonEmpty(Vec<Contradiction>),
}

impl AnalysisResult {
    /// `Empty` for an empty vector, `NonEmpty` otherwise.
    pub fn from_vec(contradictions: Vec<Contradiction>) -> Self {
        if contradictions.is_empty() {
            AnalysisResult::Empty
        } else {
            AnalysisResult::NonEmpty(contradictions)
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, AnalysisResult::Empty)
    }

    pub fn contradictions(&self) -> &[Contradiction] {
        match self {
            AnalysisResult::Empty => &[],
            AnalysisResult::NonEmpty(cs) => cs,
        }
    }

    pub fn into_contradictions(self) -> Vec<Contradiction> {
        match self {
            AnalysisResult::Empty => Vec::new(),
            AnalysisResult::NonEmpty(cs) => cs,
        }
    }
}
