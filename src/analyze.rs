//! The analysis pipeline.
//!
//! select backend -> invoke -> parse -> validate. Failures never escape as
//! errors: they are folded into the result according to the configured
//! `FailurePolicy` and `OutOfSetPolicy`.

use tracing::{info, warn};

use crate::artifact::ArtifactSet;
use crate::backend::{self, Backend, BackendError};
use crate::config::{Config, FailurePolicy, OutOfSetPolicy};
use crate::parse;
use crate::types::{AnalysisResult, Contradiction};
use crate::validate;

/// Description of the synthetic contradiction for infrastructure failures.
pub const ANALYSIS_FAILED_DESCRIPTION: &str =
    "an error occurred while analyzing the files for contradictions";

/// Description of the synthetic contradiction for findings that named no
/// supplied file.
pub const UNATTRIBUTED_DESCRIPTION: &str =
    "contradictions were found, but none of them referenced the supplied files";

/// Everything one run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub result: AnalysisResult,
    /// Overall assessment from a structured response
    pub summary: Option<String>,
    /// Number of backend contradictions dropped by validation
    pub discarded: usize,
}

impl Analysis {
    fn from_result(result: AnalysisResult) -> Self {
        Self {
            result,
            summary: None,
            discarded: 0,
        }
    }
}

/// Policies applied around a backend invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pipeline {
    pub failure_policy: FailurePolicy,
    pub out_of_set: OutOfSetPolicy,
}

impl Pipeline {
    pub fn new(failure_policy: FailurePolicy, out_of_set: OutOfSetPolicy) -> Self {
        Self {
            failure_policy,
            out_of_set,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.failure_policy, config.out_of_set)
    }

    /// Run `backend` over `artifacts`.
    pub fn run(&self, backend: &dyn Backend, artifacts: &ArtifactSet) -> Analysis {
        info!(
            backend = backend.name(),
            files = artifacts.len(),
            "analyzing files for contradictions"
        );

        let raw = match backend.invoke(artifacts) {
            Ok(raw) => raw,
            Err(e) => return self.fail(&e, artifacts),
        };

        let parsed = parse::parse(&raw, backend.output_format(), artifacts);
        if let Some(summary) = &parsed.summary {
            info!(summary = %summary, "analysis summary");
        }

        let outcome = validate::partition(parsed.contradictions, artifacts);
        let discarded = outcome.discarded.len();

        let result = if outcome.is_fully_masked() && self.out_of_set == OutOfSetPolicy::Report {
            warn!(discarded, "every reported contradiction referenced unknown files");
            AnalysisResult::NonEmpty(vec![Contradiction::synthetic(
                artifacts,
                UNATTRIBUTED_DESCRIPTION,
            )])
        } else {
            outcome.into_result()
        };

        Analysis {
            result,
            summary: parsed.summary,
            discarded,
        }
    }

    /// Fold an infrastructure failure into a result.
    pub fn fail(&self, error: &BackendError, artifacts: &ArtifactSet) -> Analysis {
        let unavailable = error.is_unavailable();
        match self.failure_policy {
            FailurePolicy::FailClosed => {
                warn!(error = %error, unavailable, "backend failed, reporting analysis failure");
                Analysis::from_result(AnalysisResult::NonEmpty(vec![Contradiction::synthetic(
                    artifacts,
                    ANALYSIS_FAILED_DESCRIPTION,
                )]))
            }
            FailurePolicy::FailOpen => {
                warn!(error = %error, unavailable, "backend failed, ignoring under fail-open policy");
                Analysis::from_result(AnalysisResult::Empty)
            }
        }
    }
}

/// Select the backend for `config` and analyze `artifacts` with it.
pub fn analyze(config: &Config, artifacts: &ArtifactSet) -> Analysis {
    let pipeline = Pipeline::from_config(config);
    match backend::select(config) {
        Ok(backend) => pipeline.run(backend.as_ref(), artifacts),
        Err(e) => pipeline.fail(&BackendError::Configuration(e), artifacts),
    }
}
